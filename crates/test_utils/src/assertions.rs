//! Custom Test Assertions
//!
//! Assertion helpers that print the offending value when they fail.

use std::fmt::Debug;

use domain_claims::{ClaimError, ClaimRequest, ClaimState, ItemReport};

/// Asserts that a result failed with `InvalidArgument`
pub fn assert_invalid_argument<T: Debug>(result: &Result<T, ClaimError>) {
    assert!(
        matches!(result, Err(ClaimError::InvalidArgument(_))),
        "Expected InvalidArgument, got {:?}",
        result
    );
}

/// Asserts that a result failed with `NotFound`
pub fn assert_not_found<T: Debug>(result: &Result<T, ClaimError>) {
    assert!(
        matches!(result, Err(ClaimError::NotFound { .. })),
        "Expected NotFound, got {:?}",
        result
    );
}

/// Asserts that a result failed with `Conflict` or `DecisionAlreadyMade`
pub fn assert_conflict<T: Debug>(result: &Result<T, ClaimError>) {
    assert!(
        matches!(
            result,
            Err(ClaimError::Conflict(_)) | Err(ClaimError::DecisionAlreadyMade { .. })
        ),
        "Expected a conflict, got {:?}",
        result
    );
}

/// Asserts the states of a report's claims, in submission order
pub fn assert_claim_states(claims: &[ClaimRequest], expected: &[ClaimState]) {
    let actual: Vec<ClaimState> = claims.iter().map(|c| c.state).collect();
    assert_eq!(actual, expected, "Claim states differ");
}

/// Asserts that a report's claimed flag matches
pub fn assert_report_claimed(report: &ItemReport, expected: bool) {
    assert_eq!(
        report.is_claimed, expected,
        "Expected report {} claimed={}, got claimed={}",
        report.id, expected, report.is_claimed
    );
}

/// Asserts an API error body carries the given error code
pub fn assert_error_body(body: &serde_json::Value, code: &str) {
    assert_eq!(body["success"], false, "Expected success=false in {}", body);
    assert_eq!(body["error"], code, "Unexpected error code in {}", body);
    assert!(
        body["message"].as_str().is_some_and(|m| !m.is_empty()),
        "Expected a message in {}",
        body
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_error_body() {
        let body = serde_json::json!({
            "success": false,
            "error": "not_found",
            "message": "Report 7 not found"
        });
        assert_error_body(&body, "not_found");
    }

    #[test]
    #[should_panic(expected = "Expected NotFound")]
    fn test_assert_not_found_panics_on_ok() {
        let result: Result<i32, ClaimError> = Ok(1);
        assert_not_found(&result);
    }
}
