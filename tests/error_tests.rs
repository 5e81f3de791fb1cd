//! Error handling tests

use tidyledger::error::LedgerError;

#[test]
fn test_header_not_found_message() {
    let err = LedgerError::HeaderNotFound {
        sheet: "Actual P&L 2024".to_string(),
        searched_rows: 60,
    };
    assert_eq!(
        err.to_string(),
        "No header row found in 'Actual P&L 2024' within the first 60 rows"
    );
    assert!(err.is_recoverable());
}

#[test]
fn test_missing_semantic_columns_lists_names() {
    let err = LedgerError::MissingSemanticColumns {
        missing: vec!["Account".to_string(), "Line Item".to_string()],
    };
    assert_eq!(
        err.to_string(),
        "Missing semantic columns: Account, Line Item"
    );
    assert!(err.is_recoverable());
}

#[test]
fn test_structural_errors_are_not_recoverable() {
    let err = LedgerError::StructuralMismatch("header row 12 beyond 10 rows".to_string());
    assert!(err.to_string().starts_with("Structural mismatch:"));
    assert!(!err.is_recoverable());

    assert!(!LedgerError::Workbook("bad zip".to_string()).is_recoverable());
    assert!(!LedgerError::Validation("depth must be > 0".to_string()).is_recoverable());
}

#[test]
fn test_io_error_converts() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let err: LedgerError = io.into();
    assert!(matches!(err, LedgerError::Io(_)));
    assert!(err.to_string().contains("gone"));
}

#[test]
fn test_yaml_error_converts() {
    let yaml_err = serde_yaml::from_str::<Vec<u32>>("not: [a list").unwrap_err();
    let err: LedgerError = yaml_err.into();
    assert!(err.to_string().starts_with("Config parsing error:"));
}
