//! Integration tests for loading a relationship table and querying it.

use std::fs;
use std::path::PathBuf;

use alma_ingest::{IngestError, TableOptions, load_index};
use alma_model::{Role, lookup};
use tempfile::TempDir;

fn write_table(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write table");
    path
}

fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

#[test]
fn lookup_scenario_single_row() {
    let dir = TempDir::new().unwrap();
    let path = write_table(&dir, "CHILD PARENT ALMA.csv", "CHILD,PARENT\n1001,2002|||2003\n");
    let (index, report) = load_index(&path, &TableOptions::default()).expect("load");
    assert_eq!(report.records, 1);

    let child = lookup(&index, "1001");
    assert_eq!(child.as_child_parents.into_iter().collect::<Vec<_>>(), ids(&["2002", "2003"]));
    assert!(child.as_parent_children.is_empty());

    let parent = lookup(&index, "2002");
    assert!(parent.as_child_parents.is_empty());
    assert_eq!(parent.as_parent_children.into_iter().collect::<Vec<_>>(), ids(&["1001"]));

    assert!(lookup(&index, "9999").is_not_found());
}

#[test]
fn missing_parent_column_fails_without_index() {
    let dir = TempDir::new().unwrap();
    let path = write_table(&dir, "table.csv", "CHILD,NOTES\n1001,2002\n");
    let err = load_index(&path, &TableOptions::default()).unwrap_err();
    assert!(matches!(err, IngestError::Schema { ref column, .. } if column == "PARENT"));
}

#[test]
fn loading_twice_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let path = write_table(
        &dir,
        "table.csv",
        "CHILD,PARENT\n1,10|||11\n2,10\n10,100\n,5\n3,\n",
    );
    let (first, first_report) = load_index(&path, &TableOptions::default()).unwrap();
    let (second, second_report) = load_index(&path, &TableOptions::default()).unwrap();
    assert_eq!(first_report, second_report);
    assert_eq!(first, second);
    for query in ["1", "2", "3", "5", "10", "11", "100", "missing"] {
        assert_eq!(lookup(&first, query), lookup(&second, query));
    }
}

#[test]
fn child_on_several_rows_unions_parents() {
    let dir = TempDir::new().unwrap();
    let path = write_table(&dir, "table.csv", "CHILD,PARENT\n1,10\n1,11|||10\n");
    let (index, _) = load_index(&path, &TableOptions::default()).unwrap();
    let result = lookup(&index, "1");
    assert_eq!(result.as_child_parents.into_iter().collect::<Vec<_>>(), ids(&["10", "11"]));
}

#[test]
fn record_can_be_child_and_parent() {
    let dir = TempDir::new().unwrap();
    let path = write_table(&dir, "table.tsv", "child\tparent\n1\t10\n10\t100\n");
    let (index, _) = load_index(&path, &TableOptions::default()).unwrap();
    let result = lookup(&index, "10");
    assert_eq!(result.role(), Role::Both);
    assert_eq!(index.role_of("100"), Role::Parent);
}

#[test]
fn custom_column_names() {
    let dir = TempDir::new().unwrap();
    let path = write_table(&dir, "table.csv", "MMS_ID,HOST_ID\n1,2\n");
    let options = TableOptions::default().with_columns("MMS_ID", "HOST_ID");
    let (index, _) = load_index(&path, &options).unwrap();
    assert_eq!(index.role_of("1"), Role::Child);
}
