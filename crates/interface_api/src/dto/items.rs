//! Item report DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{CategoryId, RawId, ReportId};
use domain_claims::{Category, ItemKind, ItemReport, ReportDraft, ReportStatus};

use super::required_id;
use crate::error::ApiError;

/// Body of `POST /api/report-lost-item` and `POST /api/report-found-item`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportItemRequest {
    pub item_name: Option<String>,
    pub category_id: Option<RawId>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub location: Option<String>,
    #[serde(alias = "dateLost", alias = "dateFound")]
    pub date: Option<String>,
}

impl ReportItemRequest {
    /// Builds a draft of the given kind; text fields are checked by the manager
    pub fn into_draft(self, kind: ItemKind) -> Result<ReportDraft, ApiError> {
        let category_id = required_id(self.category_id.as_ref(), "categoryId", CategoryId::parse_raw)?;

        Ok(ReportDraft {
            kind,
            name: self.item_name.unwrap_or_default(),
            category_id,
            description: self.description.unwrap_or_default(),
            image_url: self.image_url,
            location: self.location.unwrap_or_default(),
            date: self.date.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportItemResponse {
    pub success: bool,
    pub report_id: ReportId,
    pub message: String,
}

/// A report as listed to clients
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub id: ReportId,
    pub kind: String,
    pub item_name: String,
    pub category_id: CategoryId,
    pub category_name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub location: String,
    pub date: NaiveDate,
    pub is_claimed: bool,
    pub removed: bool,
    pub created_at: DateTime<Utc>,
}

impl From<ItemReport> for ReportResponse {
    fn from(report: ItemReport) -> Self {
        Self {
            id: report.id,
            kind: report.kind.to_string(),
            item_name: report.name,
            category_id: report.category_id,
            category_name: report.category_name,
            description: report.description,
            image_url: report.image_url,
            location: report.location,
            date: report.date,
            is_claimed: report.is_claimed,
            removed: report.status == ReportStatus::Removed,
            created_at: report.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub id: CategoryId,
    pub name: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_found_report_accepts_date_found_alias() {
        let request: ReportItemRequest = serde_json::from_value(json!({
            "itemName": "Blue Backpack",
            "categoryId": "2",
            "description": "Navy",
            "location": "Library",
            "dateFound": "2024-03-01"
        }))
        .unwrap();

        let draft = request.into_draft(ItemKind::Found).unwrap();
        assert_eq!(draft.category_id.get(), 2);
        assert_eq!(draft.date, "2024-03-01");
        assert_eq!(draft.image_url, None);
    }

    #[test]
    fn test_missing_category_is_bad_request() {
        let request: ReportItemRequest = serde_json::from_value(json!({
            "itemName": "Keys",
            "dateLost": "2024-03-01"
        }))
        .unwrap();

        assert!(matches!(
            request.into_draft(ItemKind::Lost),
            Err(ApiError::BadRequest(msg)) if msg.contains("categoryId")
        ));
    }

    #[test]
    fn test_fractional_category_is_bad_request() {
        let request: ReportItemRequest =
            serde_json::from_value(json!({ "categoryId": 2.5 })).unwrap();
        assert!(matches!(request.into_draft(ItemKind::Lost), Err(ApiError::BadRequest(_))));
    }
}
