//! Admin account record.

use serde::Serialize;

use assistra_core::{Email, UserRole};

/// The admin account returned by a successful credential check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminUser {
    /// Display name.
    pub name: String,
    /// Login email (normalized).
    pub email: Email,
    /// Login alias accepted in place of the email.
    pub username: String,
    /// Permission level.
    pub role: UserRole,
}
