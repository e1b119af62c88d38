//! Unified error handling with Sentry integration.
//!
//! Route handlers return `Result<T, AppError>`. Upstream failures (CMS,
//! newsletter provider, session store) are captured to Sentry and answered
//! with a generic message; details stay in the logs.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::cms::CmsError;
use crate::services::auth::AuthError;
use crate::services::klaviyo::KlaviyoError;

/// Application-level error type for the site.
#[derive(Debug, Error)]
pub enum AppError {
    /// A CMS query failed.
    #[error("CMS error: {0}")]
    Cms(#[from] CmsError),

    /// The newsletter provider rejected or failed the request.
    #[error("Newsletter error: {0}")]
    Newsletter(#[from] KlaviyoError),

    /// Credential check failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Session store failure.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// User is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Cms(_)
            | Self::Newsletter(_)
            | Self::Session(_)
            | Self::Internal(_)
            | Self::Auth(AuthError::MalformedHash | AuthError::PasswordHash) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Auth(AuthError::InvalidCredentials) | Self::Unauthorized(_) => {
                StatusCode::UNAUTHORIZED
            }
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Auth(AuthError::InvalidCredentials) => "Invalid credentials".to_string(),
            Self::NotFound(_) => "Not found".to_string(),
            Self::Unauthorized(_) => "Unauthorized".to_string(),
            Self::BadRequest(msg) => msg.clone(),
            _ => "Internal server error".to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context after a successful login.
pub fn set_sentry_user(username: &str, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            username: Some(username.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context on logout.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("post como-delegar".to_string());
        assert_eq!(err.to_string(), "Not found: post como-delegar");

        let err = AppError::BadRequest("invalid email".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid email");
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Unauthorized("test".to_string())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Auth(AuthError::InvalidCredentials)),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::Cms(CmsError::Api {
                source_name: "contentful",
                status: 503,
                message: "unavailable".to_string(),
            })),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(AppError::Newsletter(KlaviyoError::InvalidApiKey)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
