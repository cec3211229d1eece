//! Accounts domain errors

use thiserror::Error;

use core_kernel::{CoreError, PortError};

/// Errors that can occur in account and feedback operations
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// Duplicate email on signup
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Bad credentials or an account that may not sign in
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Store failure: {0}")]
    Store(PortError),
}

impl AccountError {
    pub fn invalid(message: impl Into<String>) -> Self {
        AccountError::InvalidArgument(message.into())
    }

    pub fn not_found(entity: &'static str, id: impl std::fmt::Display) -> Self {
        AccountError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        AccountError::Unauthorized(message.into())
    }

    pub fn is_store_failure(&self) -> bool {
        matches!(self, AccountError::Store(_))
    }
}

impl From<CoreError> for AccountError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => AccountError::InvalidArgument(msg),
        }
    }
}

impl From<PortError> for AccountError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::NotFound { entity_type, id } => AccountError::NotFound {
                entity: "Referenced entity",
                id: format!("{} {}", entity_type, id),
            },
            PortError::Conflict { message } => AccountError::Conflict(message),
            PortError::Validation { message, .. } => AccountError::InvalidArgument(message),
            other => AccountError::Store(other),
        }
    }
}

impl From<validator::ValidationErrors> for AccountError {
    /// Flattens field errors into one message, ordered by field name
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{} is invalid", field),
                })
            })
            .collect();
        messages.sort();
        AccountError::InvalidArgument(messages.join("; "))
    }
}
