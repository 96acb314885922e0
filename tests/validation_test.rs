use std::path::PathBuf;

use dprender::error::Error;
use dprender::validation::validate_names;
use serde_yaml::Value;

fn entry(file: &str, yaml: &str) -> (PathBuf, Value) {
    (PathBuf::from(file), serde_yaml::from_str(yaml).unwrap())
}

fn report(docs: &[(PathBuf, Value)]) -> String {
    match validate_names(docs) {
        Err(Error::NameValidationError(report)) => report,
        other => panic!("Expected NameValidationError, got {other:?}"),
    }
}

#[test]
fn test_exact_duplicates_list_every_file() {
    let docs = vec![
        entry("a.yaml", "name: Sales"),
        entry("b.yaml", "name: Finance"),
        entry("c.yaml", "name: Sales"),
    ];

    let report = report(&docs);

    assert!(report.contains("'Sales' appears 2 times in files: a.yaml, c.yaml"));
    assert!(!report.contains("Finance"));
    assert!(!report.contains("resolve to"));
}

#[test]
fn test_case_insensitive_duplicates() {
    let docs = vec![entry("a.yaml", "name: Sales"), entry("b.yaml", "name: SALES")];

    let report = report(&docs);

    assert!(report.contains("Names that resolve to 'sales' appear 2 times"));
    assert!(report.contains("'Sales' in a.yaml"));
    assert!(report.contains("'SALES' in b.yaml"));
}

#[test]
fn test_missing_null_and_non_string_names() {
    let docs = vec![
        entry("a.yaml", "description: no name"),
        entry("b.yaml", "name: ~"),
        entry("c.yaml", "name: 42"),
    ];

    let report = report(&docs);

    assert!(report.contains("a.yaml is missing the 'name' field"));
    assert!(report.contains("b.yaml has a null 'name' field"));
    assert!(report.contains("c.yaml has a non-string 'name' field: a number"));
}

#[test]
fn test_empty_collection_passes() {
    assert!(validate_names(&[]).is_ok());
}
