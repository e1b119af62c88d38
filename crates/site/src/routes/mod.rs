//! HTTP route handlers for the site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /{lang}                 - Home page
//! GET  /{lang}/about           - About page
//! GET  /{lang}/services        - Services catalog
//! GET  /{lang}/store           - Product listing (Contentful)
//! GET  /{lang}/blog            - Blog index (Contentful + Sanity)
//! GET  /{lang}/blog/{slug}     - Blog post
//!
//! # Admin
//! GET  /admin/login            - Login page
//! POST /admin/login            - Login action (rate limited)
//! POST /admin/logout           - Logout action
//! GET  /admin                  - Dashboard (session gate)
//!
//! # API
//! GET  /api/auth/session       - Session check
//! POST /api/newsletter         - Newsletter signup
//!
//! GET  /health                 - Liveness
//! GET  /static/*               - Static assets
//! ```
//!
//! `{lang}` is `pt` or `en`. Anything else under the locale prefix gets the
//! 404 page; unprefixed paths are redirected by the locale middleware before
//! routing matters.

pub mod admin;
pub mod api;
pub mod blog;
pub mod newsletter;
pub mod pages;
pub mod store;

use std::time::Duration;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_sessions::{MemoryStore, SessionStore};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::{
    create_session_layer, locale_middleware, login_rate_limiter, request_id_middleware,
    security_headers_middleware,
};
use crate::state::AppState;

/// Static assets shipped with the crate.
pub const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin", get(admin::dashboard))
        .route(
            "/admin/login",
            post(admin::login)
                .layer(login_rate_limiter())
                .get(admin::login_page),
        )
        .route("/admin/logout", post(admin::logout))
}

/// Create the API routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/session", get(api::session::session))
        .route("/api/newsletter", post(newsletter::subscribe))
}

/// Create all routes for the site.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .merge(pages::router())
        .merge(store::router())
        .merge(blog::router())
        .merge(admin_routes())
        .merge(api_routes())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .fallback(pages::fallback)
}

/// Assemble the application with the in-memory session store.
pub fn build_router(state: AppState) -> Router {
    build_router_with_store(state, MemoryStore::default())
}

/// Assemble the application: routes, middleware stack and state.
///
/// Layers are listed innermost first; the locale router ends up outermost
/// so unprefixed paths are redirected before anything else runs.
pub fn build_router_with_store<Store>(state: AppState, store: Store) -> Router
where
    Store: SessionStore + Clone,
{
    let session_layer = create_session_layer(state.config(), store);

    routes()
        .layer(session_layer)
        .layer(axum_middleware::from_fn(security_headers_middleware))
        .layer(axum_middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>, latency: Duration, span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
        // Sentry layers (outside the app for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
        .layer(axum_middleware::from_fn(locale_middleware))
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the CMS.
async fn health() -> &'static str {
    "ok"
}
