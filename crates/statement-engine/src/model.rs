//! Core data types for royalty statements

/// One row of the input table.
///
/// Numeric fields are `None` when the source cell was missing, empty, or
/// not a finite number; formatting treats absent as zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoyaltyRecord {
    pub owner_id: String,
    pub owner_name: String,
    pub contact: Option<String>,
    pub account_number: Option<String>,
    pub bank_id: Option<String>,
    pub title_id: Option<String>,
    pub title_name: String,
    pub author: String,
    pub sales: Option<f64>,
    pub royalty_rate: Option<f64>,
    pub royalties_earned: Option<f64>,
    pub ingoing_balance: Option<f64>,
    pub outgoing_balance: Option<f64>,
    pub payment: Option<f64>,
}

/// All records belonging to one owner, in input row order.
///
/// Groups are only ever built from existing records, so they are never
/// empty; owner-level metadata always comes from the first record.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnerGroup {
    owner_id: String,
    records: Vec<RoyaltyRecord>,
}

impl OwnerGroup {
    pub(crate) fn new(owner_id: String, first: RoyaltyRecord) -> Self {
        Self {
            owner_id,
            records: vec![first],
        }
    }

    pub(crate) fn push(&mut self, record: RoyaltyRecord) {
        self.records.push(record);
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    pub fn records(&self) -> &[RoyaltyRecord] {
        &self.records
    }

    /// The record that supplies owner-level metadata
    pub fn first(&self) -> &RoyaltyRecord {
        &self.records[0]
    }

    /// Sum of the group's payments, absent treated as zero
    pub fn total_payment(&self) -> f64 {
        self.records.iter().filter_map(|r| r.payment).sum()
    }
}
