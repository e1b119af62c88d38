//! Locale prefix routing.
//!
//! Every public page lives under `/pt` or `/en`. This middleware runs in front
//! of all routes and sends visitors who arrive without a locale prefix to the
//! Portuguese version of the same path.
//!
//! | Path                                         | Outcome            |
//! |----------------------------------------------|--------------------|
//! | `/api/*`, `/_next/*`, `/static/*`            | pass through       |
//! | `/admin`, `/admin/*`, `/health`, `/health/*` | pass through       |
//! | `/favicon.ico`, any path containing a dot    | pass through       |
//! | `/`                                          | 307 to `/pt`       |
//! | `/pt`, `/pt/*`, `/en`, `/en/*`               | pass through       |
//! | `/pt/`, `/en/about/` (trailing slash)        | 307 without it     |
//! | anything else                                | 307 to `/pt{path}` |
//!
//! Only the default locale is ever injected; `/en` is reached by following a
//! link, never by redirect.

use axum::{
    body::Body,
    extract::{FromRequestParts, RawPathParams, Request},
    http::{HeaderValue, StatusCode, header::LOCATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use assistra_core::Locale;

use crate::error::AppError;

/// Path prefixes that never get a locale.
const EXCLUDED_PREFIXES: &[&str] = &["/api", "/_next", "/static", "/admin", "/health"];

/// Where requests go when evaluation fails.
pub const FALLBACK_TARGET: &str = "/pt";

/// Result of inspecting a request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocaleRoute {
    /// Serve the request unchanged.
    PassThrough,
    /// Redirect to this path (and query).
    Redirect(String),
}

/// Reasons the locale decision could not be made.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocaleRouteError {
    /// The request target is not an absolute path (`*`, authority form).
    #[error("request path is not absolute: {0:?}")]
    NotAbsolute(String),
    /// The redirect target is not a valid `Location` header value.
    #[error("redirect target is not a valid header value")]
    InvalidTarget,
}

/// Whether `path` is exempt from locale handling.
#[must_use]
pub fn is_excluded(path: &str) -> bool {
    let under_prefix = EXCLUDED_PREFIXES.iter().any(|prefix| {
        path.strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    });

    // Any dot counts as a static asset, wherever it appears
    under_prefix || path == "/favicon.ico" || path.contains('.')
}

fn with_query(mut target: String, query: Option<&str>) -> String {
    if let Some(query) = query.filter(|q| !q.is_empty()) {
        target.push('?');
        target.push_str(query);
    }
    target
}

/// Decide what to do with a request for `path` (and optional `query`).
///
/// # Errors
///
/// Returns `LocaleRouteError::NotAbsolute` if `path` does not start with `/`.
pub fn route(path: &str, query: Option<&str>) -> Result<LocaleRoute, LocaleRouteError> {
    if !path.starts_with('/') {
        return Err(LocaleRouteError::NotAbsolute(path.to_string()));
    }

    if is_excluded(path) {
        return Ok(LocaleRoute::PassThrough);
    }

    let trimmed = path.trim_end_matches('/');
    let canonical = if trimmed.is_empty() { "/" } else { trimmed };

    if Locale::from_path(canonical).is_some() {
        if canonical == path {
            return Ok(LocaleRoute::PassThrough);
        }
        return Ok(LocaleRoute::Redirect(with_query(
            canonical.to_string(),
            query,
        )));
    }

    Ok(LocaleRoute::Redirect(with_query(
        Locale::default().prefix(canonical),
        query,
    )))
}

/// Build a `307 Temporary Redirect` to `target`.
///
/// # Errors
///
/// Returns `LocaleRouteError::InvalidTarget` if `target` cannot be sent as a
/// `Location` header.
pub fn redirect(target: &str) -> Result<Response, LocaleRouteError> {
    let location = HeaderValue::from_str(target).map_err(|_| LocaleRouteError::InvalidTarget)?;

    Response::builder()
        .status(StatusCode::TEMPORARY_REDIRECT)
        .header(LOCATION, location)
        .body(Body::empty())
        .map_err(|_| LocaleRouteError::InvalidTarget)
}

/// The fixed redirect served when locale evaluation fails.
fn fallback_redirect() -> Response {
    (
        StatusCode::TEMPORARY_REDIRECT,
        [(LOCATION, HeaderValue::from_static(FALLBACK_TARGET))],
    )
        .into_response()
}

/// Middleware enforcing the locale prefix.
///
/// Failures never surface as errors: they are logged and answered with a
/// redirect to [`FALLBACK_TARGET`].
pub async fn locale_middleware(request: Request, next: Next) -> Response {
    let uri = request.uri();
    let decision = route(uri.path(), uri.query());

    match decision.and_then(|route| match route {
        LocaleRoute::PassThrough => Ok(None),
        LocaleRoute::Redirect(target) => redirect(&target).map(Some),
    }) {
        Ok(None) => next.run(request).await,
        Ok(Some(response)) => response,
        Err(err) => {
            tracing::warn!(error = %err, uri = %request.uri(), "Locale routing failed, using fallback");
            fallback_redirect()
        }
    }
}

/// Extractor for the `{lang}` path parameter.
///
/// Rejects with 404 when the segment is not a supported locale.
pub struct Lang(pub Locale);

impl<S> FromRequestParts<S> for Lang
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let params = RawPathParams::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::NotFound("locale".to_string()))?;

        params
            .iter()
            .find(|(name, _)| *name == "lang")
            .and_then(|(_, value)| Locale::from_segment(value))
            .map(Self)
            .ok_or_else(|| AppError::NotFound(format!("locale in {}", parts.uri.path())))
    }
}
