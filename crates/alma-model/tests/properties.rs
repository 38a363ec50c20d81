//! Property tests for index construction and lookup.

use std::collections::BTreeSet;

use proptest::prelude::*;

use alma_model::{IdPolicy, RelationshipIndex, RelationshipRecord, lookup};

fn id_strategy() -> impl Strategy<Value = String> {
    "[0-9]{1,4}"
}

fn row_strategy() -> impl Strategy<Value = (String, Vec<String>)> {
    (id_strategy(), prop::collection::vec(id_strategy(), 1..4))
}

fn records_from(rows: &[(String, Vec<String>)]) -> Vec<RelationshipRecord> {
    rows.iter()
        .filter_map(|(child, parents)| {
            RelationshipRecord::from_cells(child, &parents.join("|||"), IdPolicy::Exact)
        })
        .collect()
}

proptest! {
    #[test]
    fn every_parent_token_maps_back_to_child(rows in prop::collection::vec(row_strategy(), 0..20)) {
        let records = records_from(&rows);
        let index = RelationshipIndex::from_records(&records);
        for record in &records {
            for parent in record.parent_ids() {
                let children = index.children_of(parent).expect("parent indexed");
                prop_assert!(children.contains(record.child_id()));
            }
        }
    }

    #[test]
    fn every_child_holds_all_row_parents(rows in prop::collection::vec(row_strategy(), 0..20)) {
        let records = records_from(&rows);
        let index = RelationshipIndex::from_records(&records);
        for record in &records {
            let parents = index.parents_of(record.child_id()).expect("child indexed");
            for parent in record.parent_ids() {
                prop_assert!(parents.contains(parent));
            }
        }
    }

    #[test]
    fn every_child_query_finds_parents(rows in prop::collection::vec(row_strategy(), 1..20)) {
        let records = records_from(&rows);
        let index = RelationshipIndex::from_records(&records);
        for record in &records {
            prop_assert!(!lookup(&index, record.child_id()).as_child_parents.is_empty());
        }
    }

    #[test]
    fn rebuilding_gives_identical_results(
        rows in prop::collection::vec(row_strategy(), 0..20),
        query in id_strategy(),
    ) {
        let records = records_from(&rows);
        let first = RelationshipIndex::from_records(&records);
        let second = RelationshipIndex::from_records(&records);
        prop_assert_eq!(lookup(&first, &query), lookup(&second, &query));
        for record in &records {
            prop_assert_eq!(
                lookup(&first, record.child_id()),
                lookup(&second, record.child_id())
            );
        }
    }
}

#[test]
fn duplicate_parent_tokens_collapse() {
    let record = RelationshipRecord::from_cells("C", "A|||A|||B", IdPolicy::Exact).unwrap();
    let index = RelationshipIndex::from_records(&[record]);
    let expected: BTreeSet<String> = ["A", "B"].iter().map(|v| (*v).to_string()).collect();
    assert_eq!(lookup(&index, "C").as_child_parents, expected);
}
