//! Core Kernel - Foundational types for the lost-and-found system
//!
//! This crate provides the building blocks shared by every other crate:
//! - Strongly-typed positive integer identifiers
//! - Parsing of loosely-typed identifiers arriving from clients
//! - Port infrastructure for swappable store adapters

pub mod identifiers;
pub mod error;
pub mod ports;

pub use identifiers::{
    RawId, ReportId, ClaimId, CategoryId, LocationId, ImageId,
    UserId, AdminId, FeedbackId,
};
pub use error::CoreError;
pub use ports::{
    PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth,
};
