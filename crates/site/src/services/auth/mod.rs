//! Admin credential check.
//!
//! The site has exactly one admin account, configured through the
//! environment. Its password is kept as an Argon2id hash; a plaintext
//! `ADMIN_PASSWORD` is hashed once when the checker is built and dropped.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use assistra_core::Email;

use crate::config::{AdminConfig, AdminPassword};
use crate::models::AdminUser;

/// Verifies admin login attempts.
#[derive(Clone)]
pub struct CredentialChecker {
    user: AdminUser,
    password_hash: String,
}

impl std::fmt::Debug for CredentialChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialChecker")
            .field("user", &self.user)
            .field("password_hash", &"[REDACTED]")
            .finish()
    }
}

impl CredentialChecker {
    /// Build the checker from configuration.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MalformedHash` if a configured hash cannot be
    /// parsed, or `AuthError::PasswordHash` if hashing a plaintext password
    /// fails.
    pub fn from_config(config: &AdminConfig) -> Result<Self, AuthError> {
        let password_hash = match &config.password {
            AdminPassword::Hash(hash) => {
                PasswordHash::new(hash).map_err(|_| AuthError::MalformedHash)?;
                hash.clone()
            }
            AdminPassword::Plaintext(_) => {
                tracing::warn!(
                    "ADMIN_PASSWORD is configured in plaintext; set ADMIN_PASSWORD_HASH instead"
                );
                hash_password(config.password.plaintext().unwrap_or_default())?
            }
        };

        Ok(Self {
            user: AdminUser {
                name: config.name.clone(),
                email: config.email.clone(),
                username: config.username.clone(),
                role: config.role,
            },
            password_hash,
        })
    }

    /// Check an identifier (email or username) and password.
    ///
    /// Returns the admin record on a match, `None` otherwise. The password is
    /// verified even when the identifier is unknown so both failures cost
    /// the same.
    #[must_use]
    pub fn verify(&self, identifier: &str, password: &str) -> Option<AdminUser> {
        let identifier_matches = self.matches_identifier(identifier);
        let password_matches = verify_password(password, &self.password_hash).is_ok();

        (identifier_matches && password_matches).then(|| self.user.clone())
    }

    fn matches_identifier(&self, identifier: &str) -> bool {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return false;
        }

        match Email::parse(identifier) {
            Ok(email) => email == self.user.email,
            Err(_) => identifier == self.user.username,
        }
    }
}

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::MalformedHash)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
