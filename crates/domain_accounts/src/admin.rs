//! Administrator credentials

use core_kernel::AdminId;

/// Stored admin key for one administrator email
#[derive(Debug, Clone)]
pub struct AdminCredential {
    pub id: AdminId,
    pub email: String,
    /// PHC string of the admin key
    pub key_hash: String,
}
