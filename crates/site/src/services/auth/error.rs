//! Authentication error types.

use thiserror::Error;

/// Errors that can occur while preparing or checking admin credentials.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Wrong password or unknown identifier.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The configured password hash is not a valid PHC string.
    #[error("stored password hash is malformed")]
    MalformedHash,

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
