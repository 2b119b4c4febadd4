//! Reading the input table
//!
//! The source is a CSV table with one row per title and owner. Headers
//! and fields are trimmed on load. Numeric cells parse leniently: empty,
//! unparseable, or non-finite values become absent rather than errors.

use std::fs::File;
use std::io;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::error::StatementError;
use crate::model::RoyaltyRecord;

/// Numeric columns the table is expected to carry. A wholly missing
/// column is tolerated but logged.
const NUMERIC_COLUMNS: [&str; 6] = [
    "Sales",
    "Royalty_rate",
    "Royalties_earned",
    "Ingoing_balance",
    "Outgoing_balance",
    "Payment",
];

#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Copyright_owner_ID", default)]
    owner_id: String,
    #[serde(rename = "Copyright_owner", default)]
    owner_name: String,
    #[serde(rename = "Contact", default)]
    contact: Option<String>,
    #[serde(rename = "Account_number", default)]
    account_number: Option<String>,
    #[serde(rename = "Bank_ID", default)]
    bank_id: Option<String>,
    #[serde(rename = "Title_ID", default)]
    title_id: Option<String>,
    #[serde(rename = "Title_name", default)]
    title_name: String,
    #[serde(rename = "Author", default)]
    author: String,
    #[serde(rename = "Sales", default, deserialize_with = "lenient_number")]
    sales: Option<f64>,
    #[serde(rename = "Royalty_rate", default, deserialize_with = "lenient_number")]
    royalty_rate: Option<f64>,
    #[serde(
        rename = "Royalties_earned",
        default,
        deserialize_with = "lenient_number"
    )]
    royalties_earned: Option<f64>,
    #[serde(
        rename = "Ingoing_balance",
        default,
        deserialize_with = "lenient_number"
    )]
    ingoing_balance: Option<f64>,
    #[serde(
        rename = "Outgoing_balance",
        default,
        deserialize_with = "lenient_number"
    )]
    outgoing_balance: Option<f64>,
    #[serde(rename = "Payment", default, deserialize_with = "lenient_number")]
    payment: Option<f64>,
}

impl RawRow {
    fn into_domain(self) -> RoyaltyRecord {
        RoyaltyRecord {
            owner_id: self.owner_id,
            owner_name: self.owner_name,
            contact: self.contact,
            account_number: self.account_number,
            bank_id: self.bank_id,
            title_id: self.title_id,
            title_name: self.title_name,
            author: self.author,
            sales: self.sales,
            royalty_rate: self.royalty_rate,
            royalties_earned: self.royalties_earned,
            ingoing_balance: self.ingoing_balance,
            outgoing_balance: self.outgoing_balance,
            payment: self.payment,
        }
    }
}

/// Absent on anything that is not a finite number.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite()))
}

/// Read all records from a CSV file.
pub fn read_records(path: &Path) -> Result<Vec<RoyaltyRecord>, StatementError> {
    let file = File::open(path)?;
    read_records_from(file)
}

/// Read all records from any CSV reader.
pub fn read_records_from<R: io::Read>(input: R) -> Result<Vec<RoyaltyRecord>, StatementError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);

    warn_missing_numeric_columns(reader.headers()?);

    let mut records = Vec::new();
    for row in reader.deserialize::<RawRow>() {
        records.push(row?.into_domain());
    }

    Ok(records)
}

fn warn_missing_numeric_columns(headers: &csv::StringRecord) {
    for column in NUMERIC_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            tracing::warn!("Column '{}' not found in the input table", column);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_full_row_parses() {
        let csv = "\
Copyright_owner_ID,Copyright_owner,Contact,Account_number,Bank_ID,Title_ID,Title_name,Author,Sales,Royalty_rate,Royalties_earned,Ingoing_balance,Outgoing_balance,Payment
O1,Anna Larsson,anna@example.com,SE11 2233,NDEASESS,T100,Blue Garden,Maria Stone,1200,0.07,84,0,0,40
";
        let records = read_records_from(csv.as_bytes()).unwrap();

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.owner_id, "O1");
        assert_eq!(record.owner_name, "Anna Larsson");
        assert_eq!(record.contact.as_deref(), Some("anna@example.com"));
        assert_eq!(record.title_id.as_deref(), Some("T100"));
        assert_eq!(record.sales, Some(1200.0));
        assert_eq!(record.royalty_rate, Some(0.07));
        assert_eq!(record.payment, Some(40.0));
    }

    #[test]
    fn test_headers_and_fields_are_trimmed() {
        let csv = "\
Copyright_owner_ID , Copyright_owner , Title_name , Author , Sales
O1 , Anna Larsson , Blue Garden , Maria Stone , 1200
";
        let records = read_records_from(csv.as_bytes()).unwrap();

        assert_eq!(records[0].owner_name, "Anna Larsson");
        assert_eq!(records[0].sales, Some(1200.0));
    }

    #[test]
    fn test_non_numeric_cells_become_absent() {
        let csv = "\
Copyright_owner_ID,Copyright_owner,Title_name,Author,Sales,Royalty_rate,Payment
O1,Anna,Blue Garden,Maria,n/a,\"1,5\",
";
        let records = read_records_from(csv.as_bytes()).unwrap();

        assert_eq!(records[0].sales, None);
        assert_eq!(records[0].royalty_rate, None);
        assert_eq!(records[0].payment, None);
    }

    #[test]
    fn test_missing_numeric_column_is_absent_for_all_rows() {
        let csv = "\
Copyright_owner_ID,Copyright_owner,Title_name,Author,Sales
O1,Anna,Blue Garden,Maria,1200
O1,Anna,Red Garden,Maria,800
";
        let records = read_records_from(csv.as_bytes()).unwrap();

        assert!(records.iter().all(|r| r.payment.is_none()));
        assert!(records.iter().all(|r| r.outgoing_balance.is_none()));
        assert_eq!(records[0].sales, Some(1200.0));
    }

    #[test]
    fn test_empty_metadata_cells_become_absent() {
        let csv = "\
Copyright_owner_ID,Copyright_owner,Contact,Account_number,Bank_ID,Title_ID,Title_name,Author,Payment
O1,Anna,,,,,Blue Garden,Maria,10
";
        let records = read_records_from(csv.as_bytes()).unwrap();

        assert_eq!(records[0].contact, None);
        assert_eq!(records[0].account_number, None);
        assert_eq!(records[0].bank_id, None);
        assert_eq!(records[0].title_id, None);
    }

    #[test]
    fn test_non_finite_numbers_become_absent() {
        let csv = "\
Copyright_owner_ID,Copyright_owner,Title_name,Author,Payment
O1,Anna,Blue Garden,Maria,inf
O1,Anna,Red Garden,Maria,NaN
";
        let records = read_records_from(csv.as_bytes()).unwrap();

        assert_eq!(records[0].payment, None);
        assert_eq!(records[1].payment, None);
    }
}
