//! Headless CMS clients.
//!
//! # Architecture
//!
//! - The CMS is the source of truth - NO local sync, NO cache; every page
//!   view queries the configured backends directly
//! - Contentful (Content Delivery API) serves blog posts and store products
//! - Sanity (GROQ query API) serves blog posts
//!
//! # Blog sources
//!
//! Both backends can publish blog posts and neither is treated as the
//! authoritative one. [`Blog`] asks every configured source, in a fixed
//! order (Contentful, then Sanity):
//!
//! - listing merges all posts, newest first; when two sources publish the
//!   same slug, the earlier source wins
//! - lookup by slug returns the first source that has it
//!
//! A failing source fails the whole request: partial listings are never
//! served.

mod contentful;
pub mod rich_text;
mod sanity;
pub mod types;

pub use contentful::ContentfulClient;
pub use sanity::SanityClient;
pub use types::*;

use std::collections::HashSet;

use thiserror::Error;

use assistra_core::Locale;

use crate::config::SiteConfig;

/// Errors that can occur when querying a CMS.
#[derive(Debug, Error)]
pub enum CmsError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The CMS answered with a non-2xx status.
    #[error("{source_name} API error: {status} - {message}")]
    Api {
        source_name: &'static str,
        status: u16,
        message: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A request URL could not be built.
    #[error("invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// One configured blog backend.
#[derive(Clone)]
pub enum BlogSource {
    Contentful(ContentfulClient),
    Sanity(SanityClient),
}

impl BlogSource {
    async fn list_posts(&self, locale: Locale) -> Result<Vec<PostSummary>, CmsError> {
        match self {
            Self::Contentful(client) => client.list_posts(locale).await,
            Self::Sanity(client) => client.list_posts(locale).await,
        }
    }

    async fn get_post(&self, locale: Locale, slug: &str) -> Result<Option<Post>, CmsError> {
        match self {
            Self::Contentful(client) => client.get_post(locale, slug).await,
            Self::Sanity(client) => client.get_post(locale, slug).await,
        }
    }
}

/// Blog posts from every configured source.
#[derive(Clone, Default)]
pub struct Blog {
    sources: Vec<BlogSource>,
}

impl Blog {
    /// Build from explicit sources, in priority order.
    #[must_use]
    pub const fn new(sources: Vec<BlogSource>) -> Self {
        Self { sources }
    }

    /// Build from configuration. Unconfigured backends are left out.
    #[must_use]
    pub fn from_config(config: &SiteConfig) -> Self {
        let mut sources = Vec::new();
        if let Some(contentful) = &config.contentful {
            sources.push(BlogSource::Contentful(ContentfulClient::new(contentful)));
        }
        if let Some(sanity) = &config.sanity {
            sources.push(BlogSource::Sanity(SanityClient::new(sanity)));
        }
        if sources.is_empty() {
            tracing::warn!("No CMS configured; the blog will be empty");
        }
        Self { sources }
    }

    /// Number of configured sources.
    #[must_use]
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// List posts from every source, newest first.
    ///
    /// # Errors
    ///
    /// Returns the first `CmsError` raised by any source.
    pub async fn list_posts(&self, locale: Locale) -> Result<Vec<PostSummary>, CmsError> {
        let mut batches = Vec::with_capacity(self.sources.len());
        for source in &self.sources {
            batches.push(source.list_posts(locale).await?);
        }
        Ok(merge_posts(batches))
    }

    /// Find a post by slug, asking sources in priority order.
    ///
    /// # Errors
    ///
    /// Returns the first `CmsError` raised before the post is found.
    pub async fn get_post(&self, locale: Locale, slug: &str) -> Result<Option<Post>, CmsError> {
        for source in &self.sources {
            if let Some(post) = source.get_post(locale, slug).await? {
                return Ok(Some(post));
            }
        }
        Ok(None)
    }
}

/// Merge per-source listings: drop later duplicates by slug, then order by
/// publication date (newest first, undated last). The sort is stable, so
/// equal dates keep source order.
fn merge_posts(batches: Vec<Vec<PostSummary>>) -> Vec<PostSummary> {
    let mut seen = HashSet::new();
    let mut merged: Vec<PostSummary> = batches
        .into_iter()
        .flatten()
        .filter(|post| seen.insert(post.slug.clone()))
        .collect();

    merged.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    merged
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;
    use secrecy::SecretString;
    use serde_json::json;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::{ContentfulConfig, SanityConfig};

    fn summary(slug: &str, date: Option<(i32, u32, u32)>, source: CmsSource) -> PostSummary {
        PostSummary {
            slug: slug.to_string(),
            title: slug.to_uppercase(),
            excerpt: None,
            author: None,
            published_at: date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            cover_image: None,
            source,
        }
    }

    #[test]
    fn test_merge_dedups_and_orders() {
        let contentful = vec![
            summary("shared", Some((2024, 1, 10)), CmsSource::Contentful),
            summary("old", Some((2023, 3, 1)), CmsSource::Contentful),
        ];
        let sanity = vec![
            summary("shared", Some((2024, 9, 1)), CmsSource::Sanity),
            summary("newest", Some((2024, 11, 5)), CmsSource::Sanity),
            summary("undated", None, CmsSource::Sanity),
        ];

        let merged = merge_posts(vec![contentful, sanity]);
        let slugs: Vec<&str> = merged.iter().map(|p| p.slug.as_str()).collect();

        assert_eq!(slugs, vec!["newest", "shared", "old", "undated"]);
        let shared = merged.iter().find(|p| p.slug == "shared").unwrap();
        assert_eq!(shared.source, CmsSource::Contentful);
    }

    #[tokio::test]
    async fn test_blog_without_sources_is_empty() {
        let blog = Blog::default();
        assert!(blog.list_posts(Locale::Pt).await.unwrap().is_empty());
        assert!(blog.get_post(Locale::Pt, "any").await.unwrap().is_none());
    }

    async fn contentful_server(body: serde_json::Value) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;
        server
    }

    fn contentful_source(server: &MockServer) -> BlogSource {
        BlogSource::Contentful(ContentfulClient::new(&ContentfulConfig {
            space_id: "s".to_string(),
            environment: "master".to_string(),
            access_token: SecretString::from("t"),
            base_url: server.uri(),
        }))
    }

    fn sanity_source(server: &MockServer) -> BlogSource {
        BlogSource::Sanity(SanityClient::new(&SanityConfig {
            project_id: "p".to_string(),
            dataset: "production".to_string(),
            api_version: "2021-10-21".to_string(),
            token: None,
            base_url: server.uri(),
        }))
    }

    #[tokio::test]
    async fn test_get_post_falls_through_to_next_source() {
        let contentful = contentful_server(json!({ "items": [] })).await;
        let sanity = contentful_server(json!({
            "result": { "slug": "only-in-sanity", "title": "Only in Sanity" }
        }))
        .await;

        let blog = Blog::new(vec![contentful_source(&contentful), sanity_source(&sanity)]);
        let post = blog
            .get_post(Locale::Pt, "only-in-sanity")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(post.summary.source, CmsSource::Sanity);
    }

    #[tokio::test]
    async fn test_failing_source_fails_listing() {
        let contentful = contentful_server(json!({ "items": [] })).await;
        let sanity = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&sanity)
            .await;

        let blog = Blog::new(vec![contentful_source(&contentful), sanity_source(&sanity)]);
        let err = blog.list_posts(Locale::En).await.unwrap_err();

        assert!(matches!(
            err,
            CmsError::Api {
                source_name: "sanity",
                status: 503,
                ..
            }
        ));
    }
}
