//! Tests for report and claim entities in domain_claims

use chrono::{NaiveDate, Utc};
use proptest::prelude::*;

use core_kernel::{ClaimId, ReportId};

use domain_claims::claim::{validate_reason, ClaimDecision, ClaimRequest, ClaimState};
use domain_claims::item::{
    parse_item_date, ItemClaimState, ItemKind, ItemReport, ReportFilter, ReportStatus,
};
use domain_claims::ClaimError;
use test_utils::{
    assert_invalid_argument, blank_text_strategy, fake_report_draft, non_blank_text_strategy,
    ItemReportBuilder, ReportDraftBuilder,
};

fn report(kind: ItemKind) -> ItemReport {
    ItemReportBuilder::new().with_kind(kind).build()
}

fn pending_claim() -> ClaimRequest {
    ClaimRequest {
        id: ClaimId::new(7).unwrap(),
        report_id: ReportId::new(1).unwrap(),
        reason: "It has my name inside".to_string(),
        state: ClaimState::Pending,
        submitted_at: Utc::now(),
        decided_at: None,
    }
}

// ============================================================================
// Report Tests
// ============================================================================

mod report_tests {
    use super::*;

    #[test]
    fn test_found_report_claim_state() {
        let mut found = report(ItemKind::Found);
        assert_eq!(found.claim_state(), Some(ItemClaimState::Unclaimed));

        found.mark_claimed().unwrap();
        assert_eq!(found.claim_state(), Some(ItemClaimState::Claimed));
    }

    #[test]
    fn test_lost_report_has_no_claim_state() {
        assert_eq!(report(ItemKind::Lost).claim_state(), None);
    }

    #[test]
    fn test_claimed_report_cannot_be_claimed_again() {
        let mut found = report(ItemKind::Found);
        found.mark_claimed().unwrap();

        let result = found.mark_claimed();
        assert!(matches!(result, Err(ClaimError::Conflict(_))));
        assert!(found.is_claimed);
    }

    #[test]
    fn test_lost_report_is_not_claimable() {
        let lost = report(ItemKind::Lost);
        assert!(matches!(lost.ensure_claimable(), Err(ClaimError::NotFound { .. })));
    }

    #[test]
    fn test_removed_report_is_not_claimable() {
        let found = ItemReportBuilder::new().removed().build();
        assert!(matches!(found.ensure_claimable(), Err(ClaimError::NotFound { .. })));
    }

    #[test]
    fn test_remove_lost_report_once() {
        let mut lost = report(ItemKind::Lost);
        lost.remove().unwrap();
        assert_eq!(lost.status, ReportStatus::Removed);

        assert!(matches!(lost.remove(), Err(ClaimError::NotFound { .. })));
    }

    #[test]
    fn test_found_report_cannot_be_removed() {
        let mut found = report(ItemKind::Found);
        assert!(found.remove().is_err());
        assert!(found.is_active());
    }
}

// ============================================================================
// Draft Validation Tests
// ============================================================================

mod draft_tests {
    use super::*;

    #[test]
    fn test_validate_trims_and_drops_blank_image() {
        let report = ReportDraftBuilder::new()
            .with_name("  Blue Backpack ")
            .with_image_url("   ")
            .build()
            .validate()
            .unwrap();

        assert_eq!(report.name, "Blue Backpack");
        assert_eq!(report.image_url, None);
        assert_eq!(report.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn test_validate_keeps_image_url() {
        let report = ReportDraftBuilder::new()
            .with_image_url(" https://img.example.com/bag.jpg ")
            .build()
            .validate()
            .unwrap();
        assert_eq!(report.image_url.as_deref(), Some("https://img.example.com/bag.jpg"));
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        match ReportDraftBuilder::new().with_name("   ").build().validate() {
            Err(ClaimError::InvalidArgument(msg)) => assert!(msg.contains("itemName")),
            other => panic!("expected InvalidArgument, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_bad_date() {
        let result = ReportDraftBuilder::new().with_date("first of March").build().validate();
        assert_invalid_argument(&result);
    }

    #[test]
    fn test_parse_item_date_accepts_timestamp() {
        let date = parse_item_date("2024-03-01T10:30:00Z").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn test_generated_drafts_validate() {
        for kind in [ItemKind::Lost, ItemKind::Found] {
            for _ in 0..20 {
                let draft = fake_report_draft(kind);
                let report = draft.clone().validate().unwrap();
                assert_eq!(report.kind, kind);
                assert_eq!(report.name, draft.name.trim());
            }
        }
    }

    proptest! {
        #[test]
        fn blank_description_is_rejected(text in blank_text_strategy()) {
            let result = ReportDraftBuilder::new().with_description(text).build().validate();
            prop_assert!(matches!(result, Err(ClaimError::InvalidArgument(msg)) if msg.contains("description")));
        }

        #[test]
        fn visible_description_is_trimmed(text in non_blank_text_strategy()) {
            let report = ReportDraftBuilder::new()
                .with_description(text.clone())
                .build()
                .validate()
                .unwrap();
            prop_assert_eq!(report.description, text.trim());
        }
    }
}

// ============================================================================
// Claim Tests
// ============================================================================

mod claim_tests {
    use super::*;

    #[test]
    fn test_approve_pending_claim() {
        let mut claim = pending_claim();

        let state = claim.decide(ClaimDecision::Approve).unwrap();

        assert_eq!(state, ClaimState::Approved);
        assert!(claim.decided_at.is_some());
    }

    #[test]
    fn test_decided_claim_is_immutable() {
        let mut claim = pending_claim();
        claim.decide(ClaimDecision::Reject).unwrap();

        let result = claim.decide(ClaimDecision::Approve);

        assert!(matches!(
            result,
            Err(ClaimError::DecisionAlreadyMade { state: ClaimState::Rejected, .. })
        ));
        assert_eq!(claim.state, ClaimState::Rejected);
    }

    #[test]
    fn test_validate_reason() {
        assert_eq!(validate_reason("  mine ", "reason").unwrap(), "mine");

        let err = validate_reason("\t ", "reason").unwrap_err();
        assert_eq!(err.to_string(), "Invalid argument: reason must be a non-empty string");
    }

    #[test]
    fn test_state_display() {
        assert_eq!(ClaimState::Pending.to_string(), "pending");
        assert_eq!(ClaimState::Approved.to_string(), "approved");
        assert!(ClaimState::Rejected.is_decided());
    }
}

// ============================================================================
// Filter Tests
// ============================================================================

mod filter_tests {
    use super::*;

    #[test]
    fn test_found_filter_by_claimed() {
        let claimed = ItemReportBuilder::new().claimed().build();
        let unclaimed = report(ItemKind::Found);

        let only_claimed = ReportFilter::Found { claimed: Some(true) };
        assert!(only_claimed.matches(&claimed));
        assert!(!only_claimed.matches(&unclaimed));

        let any = ReportFilter::Found { claimed: None };
        assert!(any.matches(&claimed) && any.matches(&unclaimed));
    }

    #[test]
    fn test_removed_reports_never_match() {
        let lost = ItemReportBuilder::new().with_kind(ItemKind::Lost).removed().build();
        assert!(!ReportFilter::Lost.matches(&lost));
    }
}
