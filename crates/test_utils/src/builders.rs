//! Test Data Builders
//!
//! Builders with sensible defaults so tests only spell out the fields they
//! care about.

use chrono::Utc;

use core_kernel::{CategoryId, LocationId, ReportId};
use domain_accounts::SignupForm;
use domain_claims::{ItemKind, ItemReport, ReportDraft, ReportStatus};

use crate::fixtures::{AccountFixtures, IdFixtures, ReportFixtures, MARCH_FIRST};

/// Builder for report drafts
pub struct ReportDraftBuilder {
    draft: ReportDraft,
}

impl Default for ReportDraftBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportDraftBuilder {
    /// Starts from the found backpack fixture
    pub fn new() -> Self {
        Self {
            draft: ReportFixtures::blue_backpack(),
        }
    }

    pub fn lost(mut self) -> Self {
        self.draft.kind = ItemKind::Lost;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.draft.name = name.into();
        self
    }

    pub fn with_category(mut self, category_id: CategoryId) -> Self {
        self.draft.category_id = category_id;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.draft.description = description.into();
        self
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.draft.image_url = Some(url.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.draft.location = location.into();
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.draft.date = date.into();
        self
    }

    pub fn build(self) -> ReportDraft {
        self.draft
    }
}

/// Builder for stored report entities, for tests that skip the store
/// Defaults to an active, unclaimed found backpack with ID 1
pub struct ItemReportBuilder {
    kind: ItemKind,
    is_claimed: bool,
    status: ReportStatus,
}

impl Default for ItemReportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemReportBuilder {
    pub fn new() -> Self {
        Self {
            kind: ItemKind::Found,
            is_claimed: false,
            status: ReportStatus::Active,
        }
    }

    pub fn with_kind(mut self, kind: ItemKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn claimed(mut self) -> Self {
        self.is_claimed = true;
        self
    }

    pub fn removed(mut self) -> Self {
        self.status = ReportStatus::Removed;
        self
    }

    pub fn build(self) -> ItemReport {
        ItemReport {
            id: ReportId::new(1).expect("valid fixture id"),
            kind: self.kind,
            name: "Blue Backpack".to_string(),
            category_id: IdFixtures::bags(),
            category_name: "Bags".to_string(),
            description: "Navy blue backpack".to_string(),
            image_id: None,
            image_url: None,
            location_id: LocationId::new(1).expect("valid fixture id"),
            location: "Library".to_string(),
            date: *MARCH_FIRST,
            is_claimed: self.is_claimed,
            status: self.status,
            created_at: Utc::now(),
        }
    }
}

/// Builder for signup payloads
pub struct SignupFormBuilder {
    form: SignupForm,
}

impl Default for SignupFormBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SignupFormBuilder {
    pub fn new() -> Self {
        Self {
            form: AccountFixtures::signup_form(),
        }
    }

    pub fn with_full_name(mut self, name: impl Into<String>) -> Self {
        self.form.full_name = name.into();
        self
    }

    pub fn with_phone_number(mut self, phone: impl Into<String>) -> Self {
        self.form.phone_number = phone.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.form.email = email.into();
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.form.password = password.into();
        self
    }

    pub fn build(self) -> SignupForm {
        self.form
    }

    /// Renders the form as the camelCase JSON body the API accepts
    pub fn build_json(self) -> serde_json::Value {
        serde_json::json!({
            "fullName": self.form.full_name,
            "phoneNumber": self.form.phone_number,
            "email": self.form.email,
            "password": self.form.password,
        })
    }
}
