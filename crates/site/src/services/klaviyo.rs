//! Klaviyo API client for the newsletter list.
//!
//! Subscribing is a bulk job on Klaviyo's side: the API answers `202 Accepted`
//! and creates or updates the profile asynchronously, so subscribing the same
//! address twice is harmless.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use thiserror::Error;

use assistra_core::{Email, Locale};

use crate::config::KlaviyoConfig;

/// Klaviyo API version.
const API_REVISION: &str = "2024-10-15";

/// Errors that can occur when interacting with Klaviyo API.
#[derive(Debug, Error)]
pub enum KlaviyoError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The API key cannot be sent as a header.
    #[error("invalid API key format")]
    InvalidApiKey,
}

/// Klaviyo API client for newsletter subscriptions.
#[derive(Clone)]
pub struct KlaviyoClient {
    client: reqwest::Client,
    base_url: String,
    list_id: String,
}

impl KlaviyoClient {
    /// Create a new Klaviyo API client.
    ///
    /// # Errors
    ///
    /// Returns error if the API key is not a valid header value or the HTTP
    /// client fails to build.
    pub fn new(config: &KlaviyoConfig) -> Result<Self, KlaviyoError> {
        let mut headers = HeaderMap::new();

        let auth_value = format!("Klaviyo-API-Key {}", config.api_key.expose_secret());
        let mut auth_header =
            HeaderValue::from_str(&auth_value).map_err(|_| KlaviyoError::InvalidApiKey)?;
        auth_header.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_header);
        headers.insert("revision", HeaderValue::from_static(API_REVISION));
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/vnd.api+json"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            list_id: config.list_id.clone(),
        })
    }

    /// Subscribe an email to the newsletter list.
    ///
    /// The page locale is recorded as the profile's `locale` property so
    /// campaigns can be sent in the visitor's language.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails or answers with a non-2xx status.
    pub async fn subscribe(&self, email: &Email, locale: Locale) -> Result<(), KlaviyoError> {
        let url = format!("{}/profile-subscription-bulk-create-jobs", self.base_url);

        let body = serde_json::json!({
            "data": {
                "type": "profile-subscription-bulk-create-job",
                "attributes": {
                    "custom_source": "Assistra Website",
                    "profiles": {
                        "data": [{
                            "type": "profile",
                            "attributes": {
                                "email": email.as_str(),
                                "properties": { "locale": locale.as_str() },
                                "subscriptions": {
                                    "email": {
                                        "marketing": { "consent": "SUBSCRIBED" }
                                    }
                                }
                            }
                        }]
                    }
                },
                "relationships": {
                    "list": {
                        "data": { "type": "list", "id": self.list_id }
                    }
                }
            }
        });

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(KlaviyoError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }
}
