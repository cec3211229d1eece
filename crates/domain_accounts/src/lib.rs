//! Accounts Domain
//!
//! User signup and login, administrator credentials, and user feedback.
//!
//! Passwords and admin keys are only ever handled as PHC hash strings once
//! they pass through the [`CredentialHasher`] supplied by the caller.

pub mod user;
pub mod admin;
pub mod feedback;
pub mod ports;
pub mod service;
pub mod error;

pub use user::{AccountStatus, NewUser, SignupForm, UserCredential, UserSummary};
pub use admin::AdminCredential;
pub use feedback::{FeedbackAuthor, NewFeedback, Rating, ReviewRow};
pub use ports::AccountPort;
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::InMemoryAccountStore;
pub use service::{AccountService, CredentialHasher};
pub use error::AccountError;
