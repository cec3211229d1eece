//! Request handlers, one module per resource

pub mod accounts;
pub mod claims;
pub mod feedback;
pub mod health;
pub mod items;
