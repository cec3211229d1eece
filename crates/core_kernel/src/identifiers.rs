//! Strongly-typed identifiers for domain entities
//!
//! Every entity in the store is keyed by a positive integer. Newtype wrappers
//! keep report, claim and category keys from being mixed up, and guarantee the
//! value is positive and fits the store's `INTEGER` columns.
//!
//! Clients are loose about how they send identifiers (`5`, `5.0`, `"5"`), so
//! [`RawId`] captures whatever arrived and each identifier type parses it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// An identifier exactly as it arrived in a request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl RawId {
    /// Interprets the raw value as an integer
    ///
    /// Floats are accepted only when they have no fractional part; strings
    /// must contain a base-10 integer once trimmed.
    pub fn to_i64(&self, label: &str) -> Result<i64, CoreError> {
        match self {
            RawId::Integer(value) => Ok(*value),
            RawId::Float(value) => {
                if value.is_finite()
                    && value.fract() == 0.0
                    && *value >= i64::MIN as f64
                    && *value <= i64::MAX as f64
                {
                    Ok(*value as i64)
                } else {
                    Err(CoreError::validation(format!("{} must be a positive integer", label)))
                }
            }
            RawId::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Err(CoreError::validation(format!("{} is required", label)));
                }
                trimmed
                    .parse::<i64>()
                    .map_err(|_| CoreError::validation(format!("{} must be a positive integer", label)))
            }
        }
    }
}

impl From<i64> for RawId {
    fn from(value: i64) -> Self {
        RawId::Integer(value)
    }
}

impl From<&str> for RawId {
    fn from(value: &str) -> Self {
        RawId::Text(value.to_string())
    }
}

macro_rules! define_id {
    ($name:ident, $label:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "i64", into = "i32")]
        pub struct $name(i32);

        impl $name {
            /// Creates an identifier, rejecting zero, negatives and values beyond `i32::MAX`
            pub fn new(value: i64) -> Result<Self, CoreError> {
                if value <= 0 {
                    return Err(CoreError::validation(concat!($label, " must be a positive integer")));
                }
                i32::try_from(value)
                    .map(Self)
                    .map_err(|_| CoreError::validation(concat!($label, " is out of range")))
            }

            /// Parses an identifier from loosely-typed client input
            pub fn parse_raw(raw: &RawId) -> Result<Self, CoreError> {
                raw.to_i64($label).and_then(Self::new)
            }

            /// Returns the underlying integer
            pub fn get(&self) -> i32 {
                self.0
            }

            /// Returns the human-readable name used in error messages
            pub fn label() -> &'static str {
                $label
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse_raw(&RawId::Text(s.to_string()))
            }
        }

        impl TryFrom<i64> for $name {
            type Error = CoreError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = CoreError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(i64::from(value))
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> i32 {
                id.0
            }
        }
    };
}

// Item and claim identifiers
define_id!(ReportId, "Report ID");
define_id!(ClaimId, "Claim ID");

// Lookup identifiers
define_id!(CategoryId, "Category ID");
define_id!(LocationId, "Location ID");
define_id!(ImageId, "Image ID");

// Account identifiers
define_id!(UserId, "User ID");
define_id!(AdminId, "Admin ID");
define_id!(FeedbackId, "Feedback ID");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_id_display() {
        let id = ReportId::new(42).unwrap();
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_id_parsing() {
        let parsed: ReportId = " 17 ".parse().unwrap();
        assert_eq!(parsed.get(), 17);
    }

    #[test]
    fn test_i32_conversion() {
        let id = CategoryId::try_from(9i32).unwrap();
        let back: i32 = id.into();
        assert_eq!(back, 9);
    }
}
