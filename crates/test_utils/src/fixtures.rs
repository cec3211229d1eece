//! Pre-built Test Fixtures
//!
//! Consistent, predictable data for unit and integration tests. Category
//! IDs match the rows seeded by the initial migration.

use chrono::NaiveDate;
use once_cell::sync::Lazy;

use core_kernel::{CategoryId, ReportId, UserId};
use domain_accounts::SignupForm;
use domain_claims::{ItemKind, ReportDraft};

/// Seeded category names in ID order
pub const SEEDED_CATEGORIES: &[&str] = &["Electronics", "Bags", "Documents", "Clothing", "Keys", "Other"];

/// The date used by the standard report fixtures
pub static MARCH_FIRST: Lazy<NaiveDate> =
    Lazy::new(|| NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid fixture date"));

/// Fixture for identifiers
pub struct IdFixtures;

impl IdFixtures {
    pub fn electronics() -> CategoryId {
        CategoryId::new(1).expect("valid fixture id")
    }

    pub fn bags() -> CategoryId {
        CategoryId::new(2).expect("valid fixture id")
    }

    /// A report ID that no fixture ever creates
    pub fn missing_report() -> ReportId {
        ReportId::new(999_999).expect("valid fixture id")
    }

    pub fn missing_user() -> UserId {
        UserId::new(999_999).expect("valid fixture id")
    }
}

/// Fixture for item reports
pub struct ReportFixtures;

impl ReportFixtures {
    /// The found backpack used in the end-to-end claim scenario
    pub fn blue_backpack() -> ReportDraft {
        ReportDraft {
            kind: ItemKind::Found,
            name: "Blue Backpack".to_string(),
            category_id: IdFixtures::bags(),
            description: "Navy blue backpack with a laptop sleeve".to_string(),
            image_url: None,
            location: "Library".to_string(),
            date: "2024-03-01".to_string(),
        }
    }

    pub fn lost_phone() -> ReportDraft {
        ReportDraft {
            kind: ItemKind::Lost,
            name: "Black Phone".to_string(),
            category_id: IdFixtures::electronics(),
            description: "Cracked screen, red case".to_string(),
            image_url: Some("https://img.example.com/phone.jpg".to_string()),
            location: "Cafeteria".to_string(),
            date: "2024-02-28".to_string(),
        }
    }

    pub fn claim_reason() -> &'static str {
        "It has my student card in the front pocket"
    }
}

/// Fixture for accounts
pub struct AccountFixtures;

impl AccountFixtures {
    pub const PASSWORD: &'static str = "correct horse battery";
    pub const ADMIN_EMAIL: &'static str = "admin@campus.example";
    pub const ADMIN_KEY: &'static str = "admin-key-2024";

    pub fn signup_form() -> SignupForm {
        SignupForm {
            full_name: "Jane Doe".to_string(),
            phone_number: "555-0100".to_string(),
            email: "jane.doe@example.com".to_string(),
            password: Self::PASSWORD.to_string(),
        }
    }
}
