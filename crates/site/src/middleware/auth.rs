//! Admin session extractors.
//!
//! [`RequireAdmin`] runs the [`SessionGate`] for a single request: the
//! session is resolved, the status is fed to the gate, and the outcome
//! decides between rendering the handler and sending the visitor to the
//! login page.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use super::gate::{GateOutcome, LOGIN_PATH, SessionGate, SessionStatus};
use crate::models::{SessionUser, session_keys};
use crate::state::AppState;

/// Extractor guarding admin-only handlers.
///
/// Holds the signed-in admin. The user is `None` only when the auth bypass
/// is enabled and nobody is signed in.
///
/// # Example
///
/// ```rust,ignore
/// async fn dashboard(RequireAdmin(user): RequireAdmin) -> impl IntoResponse {
///     format!("Olá, {}!", user.map_or("visitante".into(), |u| u.name))
/// }
/// ```
pub struct RequireAdmin(pub Option<SessionUser>);

/// Why an admin-only request was turned away.
#[derive(Debug)]
pub enum AdminRejection {
    /// Send HTML requests to the login page.
    Redirect(&'static str),
    /// API requests get a bare 401.
    Unauthorized,
    /// Signed in, but not as an admin.
    Forbidden,
}

impl IntoResponse for AdminRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Redirect(to) => Redirect::to(to).into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
            Self::Forbidden => (
                StatusCode::FORBIDDEN,
                "Acesso restrito a administradores.",
            )
                .into_response(),
        }
    }
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AdminRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let bypass = state.auth_bypass();
        let is_api = parts.uri.path().starts_with("/api/");

        // A session that cannot be read counts as signed out
        let user = match parts.extensions.get::<Session>() {
            Some(session) => load_current_user(session).await.unwrap_or_else(|e| {
                tracing::error!(error = %e, "Failed to read admin session");
                None
            }),
            None => {
                tracing::error!("Session layer missing in front of an admin route");
                None
            }
        };

        let status = match user {
            Some(user) if !user.is_admin && !bypass => return Err(AdminRejection::Forbidden),
            Some(user) => SessionStatus::Authenticated(user),
            None => SessionStatus::Unauthenticated,
        };

        // The status is already resolved and the gate is fresh, so it either
        // renders or asks for the login redirect
        match SessionGate::new(bypass).observe(&status) {
            GateOutcome::Render(user) => Ok(Self(user)),
            _ if is_api => Err(AdminRejection::Unauthorized),
            _ => Err(AdminRejection::Redirect(LOGIN_PATH)),
        }
    }
}

/// Extractor that reads the signed-in user without rejecting anonymous
/// visitors. Session read failures count as "not signed in".
pub struct OptionalUser(pub Option<SessionUser>);

impl<S> FromRequestParts<S> for OptionalUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = match parts.extensions.get::<Session>() {
            Some(session) => load_current_user(session).await.ok().flatten(),
            None => None,
        };

        Ok(Self(user))
    }
}

/// Read the signed-in user from the session.
///
/// # Errors
///
/// Returns an error if the session store cannot be read or the stored value
/// does not deserialize.
pub async fn load_current_user(
    session: &Session,
) -> Result<Option<SessionUser>, tower_sessions::session::Error> {
    session.get(session_keys::CURRENT_USER).await
}

/// Store the signed-in user in the session.
///
/// The session id is cycled first so a pre-login id cannot be reused.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &SessionUser,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Sign the user out by discarding the whole session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.flush().await
}
