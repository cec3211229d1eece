//! Kernel error type
//!
//! The kernel only ever rejects values while building identifiers, so a
//! single variant covers it. Callers map it onto their own "bad argument"
//! error.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("Invalid identifier: {0}")]
    Validation(String),
}

impl CoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        CoreError::Validation(message.into())
    }

    /// The caller-facing message without the prefix
    pub fn message(&self) -> &str {
        match self {
            CoreError::Validation(msg) => msg,
        }
    }
}
