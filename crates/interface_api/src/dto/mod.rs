//! Request and response bodies
//!
//! Bodies use camelCase field names. Identifiers arrive as [`RawId`] so
//! `5`, `5.0` and `"5"` are all accepted and parsed by the handler.
//!
//! [`RawId`]: core_kernel::RawId

pub mod accounts;
pub mod claims;
pub mod items;

use serde::Serialize;

use core_kernel::{CoreError, RawId};

use crate::error::ApiError;

/// Acknowledgement for writes that return no identifier
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Parses an identifier field that must be present
pub fn required_id<T>(
    raw: Option<&RawId>,
    field: &str,
    parse: impl FnOnce(&RawId) -> Result<T, CoreError>,
) -> Result<T, ApiError> {
    let raw = raw.ok_or_else(|| ApiError::BadRequest(format!("{} is required", field)))?;
    Ok(parse(raw)?)
}
