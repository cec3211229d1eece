//! Test Data Generators
//!
//! Proptest strategies for identifier and input validation properties, and
//! `fake`-based generators for realistic accounts and reports.

use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::{Sentence, Word};
use fake::faker::name::en::Name;
use fake::{Fake, Faker};
use proptest::prelude::*;

use core_kernel::RawId;
use domain_accounts::SignupForm;
use domain_claims::{ItemKind, ReportDraft};

use crate::fixtures::{IdFixtures, SEEDED_CATEGORIES};

/// Identifiers that fit the store's key range
fn positive_id_strategy() -> impl Strategy<Value = i64> {
    1i64..=i64::from(i32::MAX)
}

/// Strategy for raw client identifiers that must be accepted
pub fn valid_raw_id_strategy() -> impl Strategy<Value = RawId> {
    positive_id_strategy().prop_flat_map(|id| {
        prop_oneof![
            Just(RawId::Integer(id)),
            Just(RawId::Float(id as f64)),
            Just(RawId::Text(id.to_string())),
        ]
    })
}

/// Strategy for raw client identifiers that must be rejected
pub fn invalid_raw_id_strategy() -> impl Strategy<Value = RawId> {
    prop_oneof![
        (i64::MIN..=0).prop_map(RawId::Integer),
        (1i64..1_000_000).prop_map(|n| RawId::Float(n as f64 + 0.5)),
        "[a-zA-Z]{1,8}".prop_map(RawId::Text),
        Just(RawId::Text(String::new())),
        Just(RawId::Text("   ".to_string())),
    ]
}

/// Strategy for text that is empty after trimming
pub fn blank_text_strategy() -> impl Strategy<Value = String> {
    "[ \t\n]{0,6}"
}

/// Strategy for text with at least one visible character
pub fn non_blank_text_strategy() -> impl Strategy<Value = String> {
    "[ ]{0,2}[a-zA-Z0-9][a-zA-Z0-9 ,.]{0,40}"
}

/// Strategy for feedback ratings, valid or not
pub fn rating_strategy() -> impl Strategy<Value = i64> {
    -10i64..15
}

/// Generates a signup form that passes validation
pub fn fake_signup_form() -> SignupForm {
    let suffix: u16 = Faker.fake();
    SignupForm {
        full_name: Name().fake(),
        phone_number: format!("555-{:04}", suffix % 10_000),
        email: SafeEmail().fake(),
        password: format!("pw-{:08}", Faker.fake::<u32>()),
    }
}

/// Generates a valid report draft of the given kind
pub fn fake_report_draft(kind: ItemKind) -> ReportDraft {
    let noun: String = Word().fake();
    let category = (1..=SEEDED_CATEGORIES.len() as i64).fake::<i64>();
    ReportDraft {
        kind,
        name: format!("Lost {}", noun),
        category_id: core_kernel::CategoryId::new(category).unwrap_or_else(|_| IdFixtures::bags()),
        description: Sentence(3..8).fake(),
        image_url: None,
        location: format!("Building {}", (1..20).fake::<u8>()),
        date: "2024-03-01".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    proptest! {
        #[test]
        fn valid_raw_ids_parse(raw in valid_raw_id_strategy()) {
            prop_assert!(core_kernel::ReportId::parse_raw(&raw).is_ok());
        }

        #[test]
        fn invalid_raw_ids_are_rejected(raw in invalid_raw_id_strategy()) {
            prop_assert!(core_kernel::ReportId::parse_raw(&raw).is_err());
        }

        #[test]
        fn blank_text_trims_to_empty(text in blank_text_strategy()) {
            prop_assert!(text.trim().is_empty());
        }
    }

    #[test]
    fn test_fake_signup_form_validates() {
        for _ in 0..20 {
            let form = fake_signup_form().normalized();
            assert!(form.validate().is_ok(), "{:?}", form);
        }
    }

    #[test]
    fn test_fake_report_draft_validates() {
        assert!(fake_report_draft(ItemKind::Lost).validate().is_ok());
    }
}
