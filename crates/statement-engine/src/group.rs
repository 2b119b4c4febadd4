//! Partitioning records into per-owner groups

use std::collections::HashMap;

use crate::model::{OwnerGroup, RoyaltyRecord};

/// Split records into one group per distinct owner ID.
///
/// Group order follows the first appearance of each owner; row order
/// within a group is preserved. Every record lands in exactly one group.
pub fn group_by_owner(records: Vec<RoyaltyRecord>) -> Vec<OwnerGroup> {
    let mut groups: Vec<OwnerGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        match index.get(record.owner_id.as_str()) {
            Some(&at) => groups[at].push(record),
            None => {
                index.insert(record.owner_id.clone(), groups.len());
                let owner_id = record.owner_id.clone();
                groups.push(OwnerGroup::new(owner_id, record));
            }
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn record(owner_id: &str, title_id: &str) -> RoyaltyRecord {
        RoyaltyRecord {
            owner_id: owner_id.to_string(),
            title_id: Some(title_id.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_groups_follow_first_appearance() {
        let records = vec![
            record("B", "T1"),
            record("A", "T2"),
            record("B", "T3"),
            record("C", "T4"),
            record("A", "T5"),
        ];

        let groups = group_by_owner(records);
        let order: Vec<&str> = groups.iter().map(|g| g.owner_id()).collect();

        assert_eq!(order, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_row_order_preserved_within_group() {
        let records = vec![
            record("A", "T1"),
            record("B", "T2"),
            record("A", "T3"),
            record("A", "T4"),
        ];

        let groups = group_by_owner(records);
        let titles: Vec<&str> = groups[0]
            .records()
            .iter()
            .filter_map(|r| r.title_id.as_deref())
            .collect();

        assert_eq!(titles, vec!["T1", "T3", "T4"]);
    }

    #[test]
    fn test_empty_input_yields_no_groups() {
        assert!(group_by_owner(Vec::new()).is_empty());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Grouping is a true partition: nothing dropped, nothing
        /// duplicated, each group homogeneous, order by first appearance.
        #[test]
        fn prop_grouping_partitions_the_input(
            rows in proptest::collection::vec((0u8..5, 0u32..10_000), 0..40)
        ) {
            let records: Vec<RoyaltyRecord> = rows
                .iter()
                .enumerate()
                .map(|(i, (owner, cents))| RoyaltyRecord {
                    owner_id: format!("O{}", owner),
                    title_id: Some(format!("T{}", i)),
                    payment: Some(*cents as f64 / 100.0),
                    ..Default::default()
                })
                .collect();

            let groups = group_by_owner(records.clone());

            // No record dropped or duplicated.
            let total: usize = groups.iter().map(|g| g.records().len()).sum();
            prop_assert_eq!(total, records.len());

            // Each group's rows are exactly the input rows with its
            // owner ID, in input order.
            for group in &groups {
                let expected: Vec<&RoyaltyRecord> = records
                    .iter()
                    .filter(|r| r.owner_id == group.owner_id())
                    .collect();
                let actual: Vec<&RoyaltyRecord> = group.records().iter().collect();
                prop_assert_eq!(actual, expected);
            }

            // Group order matches first appearance, with no repeats.
            let mut seen = Vec::new();
            for record in &records {
                if !seen.contains(&record.owner_id.as_str()) {
                    seen.push(record.owner_id.as_str());
                }
            }
            let order: Vec<&str> = groups.iter().map(|g| g.owner_id()).collect();
            prop_assert_eq!(order, seen);
        }
    }
}
