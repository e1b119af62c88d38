//! Contentful Content Delivery API client.
//!
//! Reads two content types:
//!
//! - `blogPost` - `title`, `slug`, `excerpt`, `author`, `publishDate`,
//!   `coverImage` (asset link) and `body` (rich text)
//! - `product` - `name`, `slug`, `description`, `price`, `currency`,
//!   `image` (asset link) and `purchaseUrl`
//!
//! Entries are requested in the page locale (`pt-BR` / `en-US`); Contentful
//! applies its own locale fallback for untranslated fields.

use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use assistra_core::{CurrencyCode, Locale, Price};

use super::CmsError;
use super::rich_text;
use super::types::{CmsSource, Post, PostSummary, Product, absolute_asset_url, parse_date};
use crate::config::ContentfulConfig;

/// Maximum entries fetched per listing.
const PAGE_LIMIT: &str = "100";

/// Client for the Contentful Content Delivery API.
#[derive(Clone)]
pub struct ContentfulClient {
    inner: Arc<ContentfulClientInner>,
}

struct ContentfulClientInner {
    client: reqwest::Client,
    entries_url: String,
    access_token: String,
}

impl ContentfulClient {
    /// Create a new Content Delivery API client.
    #[must_use]
    pub fn new(config: &ContentfulConfig) -> Self {
        let entries_url = format!(
            "{}/spaces/{}/environments/{}/entries",
            config.base_url.trim_end_matches('/'),
            config.space_id,
            config.environment
        );

        Self {
            inner: Arc::new(ContentfulClientInner {
                client: reqwest::Client::new(),
                entries_url,
                access_token: config.access_token.expose_secret().to_string(),
            }),
        }
    }

    /// List blog posts, newest first.
    ///
    /// # Errors
    ///
    /// Returns `CmsError` if the request fails or the response is malformed.
    #[instrument(skip(self))]
    pub async fn list_posts(&self, locale: Locale) -> Result<Vec<PostSummary>, CmsError> {
        let page: EntryPage<PostFields> = self
            .entries(&[
                ("content_type", "blogPost"),
                ("locale", locale.content_tag()),
                ("order", "-fields.publishDate"),
                ("limit", PAGE_LIMIT),
            ])
            .await?;

        let assets = page.asset_urls();
        Ok(page
            .items
            .into_iter()
            .filter_map(|entry| entry.fields.into_summary(&assets))
            .collect())
    }

    /// Fetch a single blog post by slug.
    ///
    /// # Errors
    ///
    /// Returns `CmsError` if the request fails or the response is malformed.
    #[instrument(skip(self))]
    pub async fn get_post(&self, locale: Locale, slug: &str) -> Result<Option<Post>, CmsError> {
        let page: EntryPage<PostFields> = self
            .entries(&[
                ("content_type", "blogPost"),
                ("locale", locale.content_tag()),
                ("fields.slug", slug),
                ("limit", "1"),
            ])
            .await?;

        let assets = page.asset_urls();
        Ok(page.items.into_iter().next().and_then(|entry| {
            let body = entry
                .fields
                .body
                .as_ref()
                .map(rich_text::from_contentful)
                .unwrap_or_default();
            entry
                .fields
                .into_summary(&assets)
                .map(|summary| Post { summary, body })
        }))
    }

    /// List store products, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `CmsError` if the request fails or the response is malformed.
    #[instrument(skip(self))]
    pub async fn list_products(&self, locale: Locale) -> Result<Vec<Product>, CmsError> {
        let page: EntryPage<ProductFields> = self
            .entries(&[
                ("content_type", "product"),
                ("locale", locale.content_tag()),
                ("order", "fields.name"),
                ("limit", PAGE_LIMIT),
            ])
            .await?;

        let assets = page.asset_urls();
        Ok(page
            .items
            .into_iter()
            .filter_map(|entry| entry.fields.into_product(&assets))
            .collect())
    }

    async fn entries<T: DeserializeOwned>(
        &self,
        query: &[(&str, &str)],
    ) -> Result<EntryPage<T>, CmsError> {
        let url = url::Url::parse_with_params(&self.inner.entries_url, query)?;
        let response = self
            .inner
            .client
            .get(url)
            .bearer_auth(&self.inner.access_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CmsError::Api {
                source_name: "contentful",
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        let page: EntryPage<T> = serde_json::from_slice(&bytes)?;
        debug!(items = page.items.len(), "Contentful entries fetched");
        Ok(page)
    }
}

// =============================================================================
// Response types
// =============================================================================

#[derive(Debug, Deserialize)]
struct EntryPage<T> {
    #[serde(default = "Vec::new")]
    items: Vec<Entry<T>>,
    #[serde(default)]
    includes: Includes,
}

impl<T> EntryPage<T> {
    /// Map of asset id to absolute file URL.
    fn asset_urls(&self) -> HashMap<String, String> {
        self.includes
            .asset
            .iter()
            .filter_map(|asset| {
                let url = asset.fields.file.as_ref()?.url.as_deref()?;
                Some((asset.sys.id.clone(), absolute_asset_url(url)))
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct Entry<T> {
    fields: T,
}

#[derive(Debug, Default, Deserialize)]
struct Includes {
    #[serde(rename = "Asset", default)]
    asset: Vec<Asset>,
}

#[derive(Debug, Deserialize)]
struct Asset {
    sys: Sys,
    fields: AssetFields,
}

#[derive(Debug, Deserialize)]
struct AssetFields {
    file: Option<AssetFile>,
}

#[derive(Debug, Deserialize)]
struct AssetFile {
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Sys {
    id: String,
}

#[derive(Debug, Deserialize)]
struct Link {
    sys: Sys,
}

impl Link {
    fn resolve(&self, assets: &HashMap<String, String>) -> Option<String> {
        assets.get(self.sys.id.as_str()).cloned()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostFields {
    title: Option<String>,
    slug: Option<String>,
    excerpt: Option<String>,
    author: Option<String>,
    publish_date: Option<String>,
    cover_image: Option<Link>,
    body: Option<serde_json::Value>,
}

impl PostFields {
    /// Entries missing a title or slug are unpublishable and skipped.
    fn into_summary(self, assets: &HashMap<String, String>) -> Option<PostSummary> {
        Some(PostSummary {
            cover_image: self.cover_image.as_ref().and_then(|link| link.resolve(assets)),
            published_at: self.publish_date.as_deref().and_then(parse_date),
            slug: self.slug.filter(|s| !s.is_empty())?,
            title: self.title?,
            excerpt: self.excerpt,
            author: self.author,
            source: CmsSource::Contentful,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductFields {
    name: Option<String>,
    slug: Option<String>,
    description: Option<String>,
    price: Option<Decimal>,
    currency: Option<String>,
    image: Option<Link>,
    purchase_url: Option<String>,
}

impl ProductFields {
    fn into_product(self, assets: &HashMap<String, String>) -> Option<Product> {
        let currency = self
            .currency
            .as_deref()
            .and_then(|code| code.parse::<CurrencyCode>().ok())
            .unwrap_or_default();

        Some(Product {
            image_url: self.image.as_ref().and_then(|link| link.resolve(assets)),
            price: self.price.map(|amount| Price::new(amount, currency)),
            slug: self.slug.filter(|s| !s.is_empty())?,
            name: self.name?,
            description: self.description,
            purchase_url: self.purchase_url,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::cms::types::{Block, BlockKind};

    const ENTRIES_PATH: &str = "/spaces/space1/environments/master/entries";

    fn client_for(server: &MockServer) -> ContentfulClient {
        ContentfulClient::new(&ContentfulConfig {
            space_id: "space1".to_string(),
            environment: "master".to_string(),
            access_token: SecretString::from("cda-token"),
            base_url: server.uri(),
        })
    }

    fn post_page() -> serde_json::Value {
        json!({
            "items": [
                {
                    "sys": { "id": "e1" },
                    "fields": {
                        "title": "Como delegar tarefas",
                        "slug": "como-delegar",
                        "excerpt": "Primeiros passos",
                        "publishDate": "2024-05-01T10:00:00.000Z",
                        "coverImage": { "sys": { "type": "Link", "linkType": "Asset", "id": "a1" } },
                        "body": {
                            "nodeType": "document",
                            "content": [
                                { "nodeType": "paragraph", "content": [{ "nodeType": "text", "value": "Texto" }] }
                            ]
                        }
                    }
                },
                { "sys": { "id": "e2" }, "fields": { "title": "Sem slug" } }
            ],
            "includes": {
                "Asset": [
                    { "sys": { "id": "a1" }, "fields": { "file": { "url": "//images.ctfassets.net/s/a1.jpg" } } }
                ]
            }
        })
    }

    #[tokio::test]
    async fn test_list_posts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(ENTRIES_PATH))
            .and(header("authorization", "Bearer cda-token"))
            .and(query_param("content_type", "blogPost"))
            .and(query_param("locale", "en-US"))
            .respond_with(ResponseTemplate::new(200).set_body_json(post_page()))
            .mount(&server)
            .await;

        let posts = client_for(&server).list_posts(Locale::En).await.unwrap();

        assert_eq!(posts.len(), 1);
        let post = posts.first().unwrap();
        assert_eq!(post.slug, "como-delegar");
        assert_eq!(post.published_at, chrono::NaiveDate::from_ymd_opt(2024, 5, 1));
        assert_eq!(
            post.cover_image.as_deref(),
            Some("https://images.ctfassets.net/s/a1.jpg")
        );
        assert_eq!(post.source, CmsSource::Contentful);
    }

    #[tokio::test]
    async fn test_get_post_by_slug() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(ENTRIES_PATH))
            .and(query_param("fields.slug", "como-delegar"))
            .and(query_param("locale", "pt-BR"))
            .respond_with(ResponseTemplate::new(200).set_body_json(post_page()))
            .mount(&server)
            .await;

        let post = client_for(&server)
            .get_post(Locale::Pt, "como-delegar")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(post.summary.title, "Como delegar tarefas");
        assert_eq!(post.body, vec![Block::new(BlockKind::Paragraph, "Texto")]);
    }

    #[tokio::test]
    async fn test_get_post_missing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
            .mount(&server)
            .await;

        let post = client_for(&server).get_post(Locale::Pt, "nope").await.unwrap();
        assert!(post.is_none());
    }

    #[tokio::test]
    async fn test_list_products() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(ENTRIES_PATH))
            .and(query_param("content_type", "product"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    { "sys": { "id": "p1" }, "fields": {
                        "name": "Mentoria VA",
                        "slug": "mentoria",
                        "price": 497.9,
                        "currency": "BRL",
                        "purchaseUrl": "https://pay.example.com/mentoria"
                    }},
                    { "sys": { "id": "p2" }, "fields": { "name": "Ebook", "slug": "ebook" } }
                ]
            })))
            .mount(&server)
            .await;

        let products = client_for(&server).list_products(Locale::Pt).await.unwrap();

        assert_eq!(products.len(), 2);
        let mentoria = products.first().unwrap();
        assert_eq!(
            mentoria.price.unwrap().display(Locale::Pt),
            "R$ 497,90"
        );
        assert!(products.get(1).unwrap().price.is_none());
    }

    #[tokio::test]
    async fn test_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_string("AccessTokenInvalid"))
            .mount(&server)
            .await;

        let err = client_for(&server).list_posts(Locale::Pt).await.unwrap_err();
        assert!(matches!(err, CmsError::Api { status: 401, .. }));
    }
}
