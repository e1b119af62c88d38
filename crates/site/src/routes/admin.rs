//! Admin area: login, logout and the gated dashboard.
//!
//! The admin area is Portuguese only and lives outside the locale prefix.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{clear_sentry_user, set_sentry_user};
use crate::middleware::gate::LOGIN_PATH;
use crate::middleware::{OptionalUser, RequireAdmin, clear_current_user, set_current_user};
use crate::models::SessionUser;
use crate::state::AppState;

/// Where a successful login lands.
pub const DASHBOARD_PATH: &str = "/admin";

/// Login form data.
#[derive(Deserialize)]
pub struct LoginForm {
    /// Email or username.
    pub identifier: String,
    pub password: String,
}

/// Query parameters for error display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/login.html")]
pub struct LoginTemplate {
    pub error: Option<&'static str>,
}

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub user: Option<SessionUser>,
    pub bypass: bool,
    pub blog_sources: usize,
    pub store_configured: bool,
    pub newsletter_configured: bool,
}

fn error_message(code: &str) -> &'static str {
    match code {
        "credentials" => "E-mail, usuário ou senha incorretos.",
        "session" => "Não foi possível iniciar a sessão. Tente novamente.",
        _ => "Não foi possível entrar. Tente novamente.",
    }
}

/// Display the login page. Signed-in admins go straight to the dashboard.
#[instrument(skip(user))]
pub async fn login_page(
    OptionalUser(user): OptionalUser,
    Query(query): Query<MessageQuery>,
) -> Response {
    if user.is_some_and(|user| user.is_admin) {
        return Redirect::to(DASHBOARD_PATH).into_response();
    }

    LoginTemplate {
        error: query.error.as_deref().map(error_message),
    }
    .into_response()
}

/// Handle login form submission.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    // argon2 verification is CPU bound
    let checker = state.clone();
    let verified = tokio::task::spawn_blocking(move || {
        checker
            .credentials()
            .verify(&form.identifier, &form.password)
    })
    .await;

    let user = match verified {
        Ok(Some(user)) => user,
        Ok(None) => {
            tracing::warn!("Admin login failed");
            return Redirect::to("/admin/login?error=credentials").into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, "Credential check task failed");
            return Redirect::to("/admin/login?error=unknown").into_response();
        }
    };

    if let Err(e) = set_current_user(&session, &SessionUser::from(&user)).await {
        tracing::error!(error = %e, "Failed to set session");
        return Redirect::to("/admin/login?error=session").into_response();
    }

    set_sentry_user(&user.username, Some(user.email.as_str()));
    tracing::info!(username = %user.username, "Admin logged in");
    Redirect::to(DASHBOARD_PATH).into_response()
}

/// Sign out and return to the login page.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!(error = %e, "Failed to clear session");
    }
    clear_sentry_user();
    Redirect::to(LOGIN_PATH).into_response()
}

/// Display the dashboard. Behind the session gate.
#[instrument(skip(state, user))]
pub async fn dashboard(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
) -> impl IntoResponse {
    DashboardTemplate {
        user,
        bypass: state.auth_bypass(),
        blog_sources: state.blog().source_count(),
        store_configured: state.store().is_some(),
        newsletter_configured: state.newsletter().is_some(),
    }
}
