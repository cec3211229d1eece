//! Infrastructure Database Layer
//!
//! PostgreSQL persistence for the lost and found service using SQLx.
//!
//! # Architecture
//!
//! The crate follows the repository pattern: repositories own the SQL and
//! return row types, and adapters implement the domain ports on top of
//! them. Schema migrations live in the workspace `migrations/` directory and
//! are embedded at compile time.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig};
//! use infra_db::adapters::PostgresLostFoundAdapter;
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/lost_found")).await?;
//! run_migrations(&pool).await?;
//! let adapter = PostgresLostFoundAdapter::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{create_pool, run_migrations, DatabaseConfig, DatabasePool, MIGRATOR};
pub use error::DatabaseError;
pub use adapters::{PostgresAccountAdapter, PostgresLostFoundAdapter};
