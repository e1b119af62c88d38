//! Session gate state machine.
//!
//! A gate wraps protected content and reacts to the session status:
//!
//! ```text
//! Loading ──▶ Authenticated    render the content
//!        └──▶ Unauthenticated  redirect to the login page (once)
//! ```
//!
//! The gate itself does no I/O. The caller resolves the session and feeds
//! each observed status to [`SessionGate::observe`]; the returned
//! [`GateOutcome`] says what to show.

use axum::response::{Html, IntoResponse, Response};

use crate::models::SessionUser;

/// Where unauthenticated visitors are sent.
pub const LOGIN_PATH: &str = "/admin/login";

const WAITING_HTML: &str = r#"<!doctype html>
<html lang="pt"><head><meta charset="utf-8"><title>Assistra</title>
<link rel="stylesheet" href="/static/css/main.css"></head>
<body><div class="gate-waiting" role="status" aria-live="polite">Carregando…</div></body></html>"#;

/// Session status as seen by the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    /// The session check has not answered yet.
    Loading,
    /// A session user is present.
    Authenticated(SessionUser),
    /// The session check answered and there is no user.
    Unauthenticated,
}

/// What the gate shows for an observed status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// Neutral waiting indicator.
    Waiting,
    /// The protected content. `None` only when the bypass let an anonymous
    /// visitor through.
    Render(Option<SessionUser>),
    /// Send the visitor to the login page.
    Redirect(&'static str),
    /// Nothing to show; a redirect is already under way.
    Blank,
}

/// Gate for one protected view.
#[derive(Debug, Clone)]
pub struct SessionGate {
    bypass: bool,
    redirected: bool,
}

impl SessionGate {
    /// Create a gate. `bypass` renders content without a session and must
    /// come from the explicit, feature-gated configuration flag.
    #[must_use]
    pub const fn new(bypass: bool) -> Self {
        Self {
            bypass,
            redirected: false,
        }
    }

    /// Feed an observed status and get what to show.
    ///
    /// Repeated `Unauthenticated` observations redirect only the first time;
    /// once the status changes the gate is armed again.
    pub fn observe(&mut self, status: &SessionStatus) -> GateOutcome {
        if self.bypass {
            let user = match status {
                SessionStatus::Authenticated(user) => Some(user.clone()),
                SessionStatus::Loading | SessionStatus::Unauthenticated => None,
            };
            return GateOutcome::Render(user);
        }

        match status {
            SessionStatus::Loading => {
                self.redirected = false;
                GateOutcome::Waiting
            }
            SessionStatus::Authenticated(user) => {
                self.redirected = false;
                GateOutcome::Render(Some(user.clone()))
            }
            SessionStatus::Unauthenticated if self.redirected => GateOutcome::Blank,
            SessionStatus::Unauthenticated => {
                self.redirected = true;
                GateOutcome::Redirect(LOGIN_PATH)
            }
        }
    }
}

/// The waiting indicator page.
#[must_use]
pub fn waiting_indicator() -> Response {
    Html(WAITING_HTML).into_response()
}
