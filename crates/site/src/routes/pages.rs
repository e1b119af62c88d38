//! Static marketing pages and the 404 page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
};
use tracing::instrument;

use assistra_core::Locale;

use crate::middleware::Lang;
use crate::state::AppState;
use crate::views::PageContext;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub page: PageContext,
}

/// About page template.
#[derive(Template, WebTemplate)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub page: PageContext,
}

/// Services page template.
#[derive(Template, WebTemplate)]
#[template(path = "services.html")]
pub struct ServicesTemplate {
    pub page: PageContext,
}

/// Not found page template.
#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub page: PageContext,
}

/// Display the home page.
#[instrument]
pub async fn home(Lang(locale): Lang) -> impl IntoResponse {
    HomeTemplate {
        page: PageContext::new(locale, "/"),
    }
}

/// Display the about page.
#[instrument]
pub async fn about(Lang(locale): Lang) -> impl IntoResponse {
    AboutTemplate {
        page: PageContext::new(locale, "/about"),
    }
}

/// Display the services catalog.
#[instrument]
pub async fn services(Lang(locale): Lang) -> impl IntoResponse {
    ServicesTemplate {
        page: PageContext::new(locale, "/services"),
    }
}

/// The 404 page in `locale`.
#[must_use]
pub fn not_found_page(locale: Locale) -> Response {
    (
        StatusCode::NOT_FOUND,
        NotFoundTemplate {
            page: PageContext::new(locale, "/"),
        },
    )
        .into_response()
}

/// Router fallback: the 404 page in the locale of the requested path.
pub async fn fallback(uri: Uri) -> Response {
    not_found_page(Locale::from_path(uri.path()).unwrap_or_default())
}

/// Create the static page routes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{lang}", get(home))
        .route("/{lang}/about", get(about))
        .route("/{lang}/services", get(services))
}
