//! Application state shared across handlers.

use std::sync::Arc;

use crate::cms::{Blog, ContentfulClient};
use crate::config::SiteConfig;
use crate::services::auth::{AuthError, CredentialChecker};
use crate::services::klaviyo::{KlaviyoClient, KlaviyoError};

/// Errors building the application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("admin credentials: {0}")]
    Credentials(#[from] AuthError),
    #[error("newsletter client: {0}")]
    Newsletter(#[from] KlaviyoError),
}

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Holds configuration and the upstream
/// clients; there is no cache, every request queries the CMS directly.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SiteConfig,
    credentials: CredentialChecker,
    blog: Blog,
    store: Option<ContentfulClient>,
    newsletter: Option<KlaviyoClient>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the admin password cannot be prepared or the
    /// newsletter client cannot be built.
    pub fn new(config: SiteConfig) -> Result<Self, StateError> {
        let credentials = CredentialChecker::from_config(&config.admin)?;
        let blog = Blog::from_config(&config);
        let store = config.contentful.as_ref().map(ContentfulClient::new);
        let newsletter = config
            .klaviyo
            .as_ref()
            .map(KlaviyoClient::new)
            .transpose()?;

        if newsletter.is_none() {
            tracing::warn!("Klaviyo not configured; newsletter signups will fail");
        }

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                credentials,
                blog,
                store,
                newsletter,
            }),
        })
    }

    /// Get a reference to the site configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    /// Admin credential checker.
    #[must_use]
    pub fn credentials(&self) -> &CredentialChecker {
        &self.inner.credentials
    }

    /// Blog posts from every configured CMS.
    #[must_use]
    pub fn blog(&self) -> &Blog {
        &self.inner.blog
    }

    /// Product catalog client, if Contentful is configured.
    #[must_use]
    pub fn store(&self) -> Option<&ContentfulClient> {
        self.inner.store.as_ref()
    }

    /// Newsletter client, if Klaviyo is configured.
    #[must_use]
    pub fn newsletter(&self) -> Option<&KlaviyoClient> {
        self.inner.newsletter.as_ref()
    }

    /// Whether the session gate lets everyone through.
    #[must_use]
    pub fn auth_bypass(&self) -> bool {
        self.inner.config.auth_bypass
    }
}
