//! Session check endpoint.
//!
//! `GET /api/auth/session` reports whether a user is signed in:
//!
//! | Situation              | Status | Body                                          |
//! |------------------------|--------|-----------------------------------------------|
//! | signed in              | 200    | `{"authenticated": true, "user": {...}}`      |
//! | signed out             | 401    | `{"authenticated": false}`                    |
//! | session store failure  | 500    | `{"authenticated": false, "error": "..."}`    |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::middleware::load_current_user;
use crate::models::SessionUser;

/// Session check response body.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<SessionUser>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
}

/// Report the current session.
#[instrument(skip(session))]
pub async fn session(session: Session) -> Response {
    match load_current_user(&session).await {
        Ok(Some(user)) => (
            StatusCode::OK,
            Json(SessionResponse {
                authenticated: true,
                user: Some(user),
                error: None,
            }),
        )
            .into_response(),
        Ok(None) => (
            StatusCode::UNAUTHORIZED,
            Json(SessionResponse {
                authenticated: false,
                user: None,
                error: None,
            }),
        )
            .into_response(),
        Err(e) => {
            let event_id = sentry::capture_error(&e);
            tracing::error!(error = %e, sentry_event_id = %event_id, "Failed to read session");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SessionResponse {
                    authenticated: false,
                    user: None,
                    error: Some("Failed to read session"),
                }),
            )
                .into_response()
        }
    }
}
