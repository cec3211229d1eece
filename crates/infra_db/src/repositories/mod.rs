//! Repository implementations for the lost and found schema
//!
//! Each repository encapsulates the SQL for one group of tables and maps
//! rows onto plain row structs; the adapters translate those into domain
//! types.
//!
//! Queries are checked at runtime (`query_as` + `FromRow`) so the crate
//! builds without a live database. Methods that must run inside a caller's
//! transaction take a `&mut PgConnection` instead of using the pool.

pub mod items;
pub mod claims;
pub mod lookups;
pub mod accounts;

pub use items::ItemRepository;
pub use claims::ClaimsRepository;
pub use lookups::LookupRepository;
pub use accounts::AccountRepository;
