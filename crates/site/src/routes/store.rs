//! Store route handler.
//!
//! Products are Contentful entries. Without Contentful the store renders an
//! empty listing.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Router, extract::State, response::IntoResponse, routing::get};
use tracing::instrument;

use assistra_core::Locale;

use crate::cms::Product;
use crate::error::AppError;
use crate::middleware::Lang;
use crate::state::AppState;
use crate::views::PageContext;

/// Product view for templates.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub name: String,
    pub description: Option<String>,
    /// Formatted price, `None` when the product has no price.
    pub price: Option<String>,
    pub image_url: Option<String>,
    pub purchase_url: Option<String>,
}

impl ProductView {
    fn new(product: Product, locale: Locale) -> Self {
        Self {
            price: product.price.map(|price| price.display(locale)),
            name: product.name,
            description: product.description,
            image_url: product.image_url,
            purchase_url: product.purchase_url,
        }
    }
}

/// Store page template.
#[derive(Template, WebTemplate)]
#[template(path = "store.html")]
pub struct StoreTemplate {
    pub page: PageContext,
    pub products: Vec<ProductView>,
}

/// Display the product listing.
///
/// # Errors
///
/// Returns 500 if Contentful is configured and the query fails.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Lang(locale): Lang,
) -> Result<impl IntoResponse, AppError> {
    let products = match state.store() {
        Some(client) => client.list_products(locale).await?,
        None => Vec::new(),
    };

    Ok(StoreTemplate {
        page: PageContext::new(locale, "/store"),
        products: products
            .into_iter()
            .map(|product| ProductView::new(product, locale))
            .collect(),
    })
}

/// Create the store routes router.
pub fn router() -> Router<AppState> {
    Router::new().route("/{lang}/store", get(index))
}
