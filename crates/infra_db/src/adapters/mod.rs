//! Domain Adapters
//!
//! PostgreSQL implementations of the domain ports. Each adapter:
//! - Implements the domain's port trait
//! - Translates between domain models and database row types
//! - Uses the repository layer for database operations
//!
//! # Usage
//!
//! ```rust,ignore
//! use infra_db::adapters::{PostgresAccountAdapter, PostgresLostFoundAdapter};
//!
//! let lost_found = PostgresLostFoundAdapter::new(pool.clone());
//! let accounts = PostgresAccountAdapter::new(pool);
//! ```

pub mod lost_found;
pub mod accounts;

pub use lost_found::{PostgresLostFoundAdapter, PostgresLostFoundTransaction};
pub use accounts::PostgresAccountAdapter;
