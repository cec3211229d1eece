//! Tests for core_kernel error types

use core_kernel::error::CoreError;
use core_kernel::{PortError, RawId, ReportId};

#[test]
fn test_identifier_failure_is_validation() {
    let error = ReportId::parse_raw(&RawId::Text("abc".to_string())).unwrap_err();

    assert_eq!(error, CoreError::validation(error.message()));
    assert!(error.to_string().starts_with("Invalid identifier"));
    assert!(!error.message().starts_with("Invalid identifier"));
}

#[test]
fn test_port_error_conflict() {
    let error = PortError::conflict("duplicate key value");

    assert!(error.is_conflict());
    assert!(!error.is_not_found());
    assert!(error.to_string().contains("duplicate key"));
}

#[test]
fn test_port_error_validation_keeps_message() {
    let error = PortError::validation("rating must be between 1 and 5");

    match error {
        PortError::Validation { message } => assert!(message.contains("rating")),
        _ => panic!("Expected Validation error"),
    }
}
