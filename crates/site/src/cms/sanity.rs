//! Sanity HTTP query API client.
//!
//! Posts are `post` documents queried with GROQ. A post with a `language`
//! field only shows up in that locale; posts without one show up in both.

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use assistra_core::Locale;

use super::CmsError;
use super::rich_text;
use super::types::{CmsSource, Post, PostSummary, parse_date};
use crate::config::SanityConfig;

const POST_FILTER: &str =
    r#"_type == "post" && defined(slug.current) && (!defined(language) || language == $lang)"#;

const POST_PROJECTION: &str = r#"{
  "slug": slug.current,
  title,
  excerpt,
  publishedAt,
  "author": author->name,
  "coverImage": mainImage.asset->url
}"#;

const POST_BODY_PROJECTION: &str = r#"{
  "slug": slug.current,
  title,
  excerpt,
  publishedAt,
  "author": author->name,
  "coverImage": mainImage.asset->url,
  body
}"#;

/// Client for the Sanity HTTP query API.
#[derive(Clone)]
pub struct SanityClient {
    inner: Arc<SanityClientInner>,
}

struct SanityClientInner {
    client: reqwest::Client,
    query_url: String,
    token: Option<String>,
}

impl SanityClient {
    /// Create a new query API client.
    #[must_use]
    pub fn new(config: &SanityConfig) -> Self {
        let query_url = format!(
            "{}/v{}/data/query/{}",
            config.base_url.trim_end_matches('/'),
            config.api_version.trim_start_matches('v'),
            config.dataset
        );

        Self {
            inner: Arc::new(SanityClientInner {
                client: reqwest::Client::new(),
                query_url,
                token: config.token.as_ref().map(|t| t.expose_secret().to_string()),
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
        let query = format!("*[{POST_FILTER}] | order(publishedAt desc){POST_PROJECTION}");
        let docs: Vec<PostDoc> = self.query(&query, locale, None).await?;

        Ok(docs.into_iter().filter_map(PostDoc::into_summary).collect())
    }

    /// Fetch a single blog post by slug.
    ///
    /// # Errors
    ///
    /// Returns `CmsError` if the request fails or the response is malformed.
    #[instrument(skip(self))]
    pub async fn get_post(&self, locale: Locale, slug: &str) -> Result<Option<Post>, CmsError> {
        let query = format!("*[{POST_FILTER} && slug.current == $slug][0]{POST_BODY_PROJECTION}");
        let doc: Option<PostDoc> = self.query(&query, locale, Some(slug)).await?;

        Ok(doc.and_then(|mut doc| {
            let body = doc
                .body
                .take()
                .map(|body| rich_text::from_portable_text(&body))
                .unwrap_or_default();
            doc.into_summary().map(|summary| Post { summary, body })
        }))
    }

    async fn query<T: DeserializeOwned>(
        &self,
        groq: &str,
        locale: Locale,
        slug: Option<&str>,
    ) -> Result<T, CmsError> {
        // Parameter values are JSON literals.
        let lang_param = serde_json::to_string(locale.as_str())?;
        let mut params = vec![("query", groq.to_string()), ("$lang", lang_param)];
        if let Some(slug) = slug {
            params.push(("$slug", serde_json::to_string(slug)?));
        }

        let url = url::Url::parse_with_params(&self.inner.query_url, &params)?;
        let mut request = self.inner.client.get(url);
        if let Some(token) = &self.inner.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CmsError::Api {
                source_name: "sanity",
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        let envelope: QueryResponse<T> = serde_json::from_slice(&bytes)?;
        debug!(ms = ?envelope.ms, "Sanity query answered");
        Ok(envelope.result)
    }
}

#[derive(Debug, Deserialize)]
struct QueryResponse<T> {
    result: T,
    #[serde(default)]
    ms: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostDoc {
    slug: Option<String>,
    title: Option<String>,
    excerpt: Option<String>,
    published_at: Option<String>,
    author: Option<String>,
    cover_image: Option<String>,
    #[serde(default)]
    body: Option<serde_json::Value>,
}

impl PostDoc {
    fn into_summary(self) -> Option<PostSummary> {
        Some(PostSummary {
            published_at: self.published_at.as_deref().and_then(parse_date),
            slug: self.slug.filter(|s| !s.is_empty())?,
            title: self.title?,
            excerpt: self.excerpt,
            author: self.author,
            cover_image: self.cover_image,
            source: CmsSource::Sanity,
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

    fn client_for(server: &MockServer, token: Option<&str>) -> SanityClient {
        SanityClient::new(&SanityConfig {
            project_id: "abc123".to_string(),
            dataset: "production".to_string(),
            api_version: "2021-10-21".to_string(),
            token: token.map(SecretString::from),
            base_url: server.uri(),
        })
    }

    #[tokio::test]
    async fn test_list_posts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2021-10-21/data/query/production"))
            .and(query_param("$lang", "\"en\""))
            .and(header("authorization", "Bearer sk-read"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ms": 4,
                "result": [
                    {
                        "slug": "remote-assistant",
                        "title": "Hiring a remote assistant",
                        "publishedAt": "2024-06-10T08:00:00Z",
                        "author": "Marina",
                        "coverImage": "https://cdn.sanity.io/images/abc123/production/x.jpg"
                    },
                    { "slug": null, "title": "Draft without slug" }
                ]
            })))
            .mount(&server)
            .await;

        let posts = client_for(&server, Some("sk-read"))
            .list_posts(Locale::En)
            .await
            .unwrap();

        assert_eq!(posts.len(), 1);
        let post = posts.first().unwrap();
        assert_eq!(post.slug, "remote-assistant");
        assert_eq!(post.author.as_deref(), Some("Marina"));
        assert_eq!(post.source, CmsSource::Sanity);
    }

    #[tokio::test]
    async fn test_get_post_by_slug() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("$slug", "\"remote-assistant\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": {
                    "slug": "remote-assistant",
                    "title": "Hiring a remote assistant",
                    "body": [
                        { "_type": "block", "style": "normal", "children": [{ "_type": "span", "text": "Body" }] }
                    ]
                }
            })))
            .mount(&server)
            .await;

        let post = client_for(&server, None)
            .get_post(Locale::En, "remote-assistant")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(post.body, vec![Block::new(BlockKind::Paragraph, "Body")]);
        assert!(post.summary.published_at.is_none());
    }

    #[tokio::test]
    async fn test_get_post_null_result() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": null })))
            .mount(&server)
            .await;

        let post = client_for(&server, None)
            .get_post(Locale::Pt, "missing")
            .await
            .unwrap();
        assert!(post.is_none());
    }

    #[tokio::test]
    async fn test_malformed_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server, None)
            .list_posts(Locale::Pt)
            .await
            .unwrap_err();
        assert!(matches!(err, CmsError::Parse(_)));
    }
}
