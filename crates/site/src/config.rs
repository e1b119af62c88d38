//! Site configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SITE_BASE_URL` - Public URL for the site (https enables secure cookies)
//! - `ADMIN_NAME` - Display name of the admin account
//! - `ADMIN_EMAIL` - Email of the admin account
//! - `ADMIN_PASSWORD_HASH` - Argon2 PHC hash of the admin password, or
//! - `ADMIN_PASSWORD` - Plaintext admin password (hashed at startup)
//!
//! ## Optional
//! - `SITE_HOST` - Bind address (default: 127.0.0.1)
//! - `SITE_PORT` - Listen port (default: 3000)
//! - `ADMIN_USERNAME` - Login alias for the admin account (default: admin)
//! - `ADMIN_ROLE` - Role of the admin account (default: admin)
//! - `CONTENTFUL_SPACE_ID`, `CONTENTFUL_ACCESS_TOKEN` - Contentful Delivery API
//! - `CONTENTFUL_ENVIRONMENT` - Contentful environment (default: master)
//! - `SANITY_PROJECT_ID` - Sanity project
//! - `SANITY_DATASET` - Sanity dataset (default: production)
//! - `SANITY_API_VERSION` - Sanity API version (default: 2021-10-21)
//! - `SANITY_TOKEN` - Sanity read token for private datasets
//! - `KLAVIYO_API_KEY`, `KLAVIYO_LIST_ID` - Newsletter list
//! - `SITE_INSECURE_AUTH_BYPASS` - Skip the admin gate (needs the
//!   `insecure-auth-bypass` build feature, ignored otherwise)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::net::{IpAddr, SocketAddr};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use assistra_core::{Email, UserRole};

const MIN_ADMIN_PASSWORD_LENGTH: usize = 12;

/// Placeholder fragments rejected in plaintext admin passwords (case-insensitive).
const PLACEHOLDER_PATTERNS: &[&str] = &["changeme", "password", "senha", "admin123", "123456"];

pub const CONTENTFUL_DEFAULT_BASE_URL: &str = "https://cdn.contentful.com";
pub const KLAVIYO_DEFAULT_BASE_URL: &str = "https://a.klaviyo.com/api";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Site application configuration.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the site
    pub base_url: String,
    /// The admin account allowed through the login gate
    pub admin: AdminConfig,
    /// Contentful Delivery API, when configured
    pub contentful: Option<ContentfulConfig>,
    /// Sanity query API, when configured
    pub sanity: Option<SanityConfig>,
    /// Klaviyo newsletter list, when configured
    pub klaviyo: Option<KlaviyoConfig>,
    /// Render admin pages without a session. Only ever true in builds with
    /// the `insecure-auth-bypass` feature.
    pub auth_bypass: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// How the admin password is stored in the environment.
#[derive(Clone)]
pub enum AdminPassword {
    /// Argon2 PHC string.
    Hash(String),
    /// Plaintext, hashed once at startup.
    Plaintext(SecretString),
}

impl std::fmt::Debug for AdminPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hash(_) => f.write_str("Hash([REDACTED])"),
            Self::Plaintext(_) => f.write_str("Plaintext([REDACTED])"),
        }
    }
}

/// The single admin account.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    pub name: String,
    pub email: Email,
    pub username: String,
    pub role: UserRole,
    pub password: AdminPassword,
}

/// Contentful Content Delivery API configuration.
///
/// Implements `Debug` manually to redact the access token.
#[derive(Clone)]
pub struct ContentfulConfig {
    pub space_id: String,
    pub environment: String,
    pub access_token: SecretString,
    /// API origin, overridable for tests.
    pub base_url: String,
}

impl std::fmt::Debug for ContentfulConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentfulConfig")
            .field("space_id", &self.space_id)
            .field("environment", &self.environment)
            .field("access_token", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Sanity HTTP query API configuration.
#[derive(Clone)]
pub struct SanityConfig {
    pub project_id: String,
    pub dataset: String,
    pub api_version: String,
    pub token: Option<SecretString>,
    /// API origin, overridable for tests. Defaults to the project's API CDN.
    pub base_url: String,
}

impl std::fmt::Debug for SanityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SanityConfig")
            .field("project_id", &self.project_id)
            .field("dataset", &self.dataset)
            .field("api_version", &self.api_version)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Klaviyo newsletter configuration.
#[derive(Clone)]
pub struct KlaviyoConfig {
    pub api_key: SecretString,
    pub list_id: String,
    /// API origin, overridable for tests.
    pub base_url: String,
}

impl std::fmt::Debug for KlaviyoConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KlaviyoConfig")
            .field("api_key", &"[REDACTED]")
            .field("list_id", &self.list_id)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl SiteConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(&lookup);

        let host = env
            .or_default("SITE_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("SITE_HOST".to_string(), e.to_string()))?;
        let port = env
            .or_default("SITE_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("SITE_PORT".to_string(), e.to_string()))?;
        let base_url = env.required("SITE_BASE_URL")?;
        url::Url::parse(&base_url)
            .map_err(|e| ConfigError::InvalidEnvVar("SITE_BASE_URL".to_string(), e.to_string()))?;

        Ok(Self {
            host,
            port,
            base_url,
            admin: AdminConfig::load(&env)?,
            contentful: ContentfulConfig::load(&env),
            sanity: SanityConfig::load(&env),
            klaviyo: KlaviyoConfig::load(&env),
            auth_bypass: auth_bypass_requested(&env),
            sentry_dsn: env.optional("SENTRY_DSN"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the site is served over HTTPS.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl AdminConfig {
    fn load(env: &Env<'_>) -> Result<Self, ConfigError> {
        let email = Email::parse(&env.required("ADMIN_EMAIL")?)
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_EMAIL".to_string(), e.to_string()))?;
        let role = env
            .or_default("ADMIN_ROLE", "admin")
            .parse::<UserRole>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_ROLE".to_string(), e))?;

        let password = if let Some(hash) = env.optional("ADMIN_PASSWORD_HASH") {
            if !hash.starts_with("$argon2") {
                return Err(ConfigError::InvalidEnvVar(
                    "ADMIN_PASSWORD_HASH".to_string(),
                    "expected an argon2 PHC string".to_string(),
                ));
            }
            AdminPassword::Hash(hash)
        } else {
            let plaintext = env.required("ADMIN_PASSWORD")?;
            validate_admin_password(&plaintext, "ADMIN_PASSWORD")?;
            AdminPassword::Plaintext(SecretString::from(plaintext))
        };

        Ok(Self {
            name: env.required("ADMIN_NAME")?,
            email,
            username: env.or_default("ADMIN_USERNAME", "admin"),
            role,
            password,
        })
    }
}

impl ContentfulConfig {
    fn load(env: &Env<'_>) -> Option<Self> {
        Some(Self {
            space_id: env.optional("CONTENTFUL_SPACE_ID")?,
            access_token: SecretString::from(env.optional("CONTENTFUL_ACCESS_TOKEN")?),
            environment: env.or_default("CONTENTFUL_ENVIRONMENT", "master"),
            base_url: CONTENTFUL_DEFAULT_BASE_URL.to_string(),
        })
    }
}

impl SanityConfig {
    fn load(env: &Env<'_>) -> Option<Self> {
        let project_id = env.optional("SANITY_PROJECT_ID")?;
        Some(Self {
            base_url: format!("https://{project_id}.apicdn.sanity.io"),
            project_id,
            dataset: env.or_default("SANITY_DATASET", "production"),
            api_version: env.or_default("SANITY_API_VERSION", "2021-10-21"),
            token: env.optional("SANITY_TOKEN").map(SecretString::from),
        })
    }
}

impl KlaviyoConfig {
    fn load(env: &Env<'_>) -> Option<Self> {
        Some(Self {
            api_key: SecretString::from(env.optional("KLAVIYO_API_KEY")?),
            list_id: env.optional("KLAVIYO_LIST_ID")?,
            base_url: KLAVIYO_DEFAULT_BASE_URL.to_string(),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Variable lookup wrapper. Empty values count as unset.
struct Env<'a>(&'a dyn Fn(&str) -> Option<String>);

impl Env<'_> {
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.optional(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }
}

/// Read the bypass flag. Only builds with `insecure-auth-bypass` honor it.
fn auth_bypass_requested(env: &Env<'_>) -> bool {
    let requested = env
        .optional("SITE_INSECURE_AUTH_BYPASS")
        .is_some_and(|v| matches!(v.trim(), "1" | "true" | "yes"));

    if requested && !cfg!(feature = "insecure-auth-bypass") {
        tracing::warn!(
            "SITE_INSECURE_AUTH_BYPASS is set but this build lacks the insecure-auth-bypass feature; ignoring"
        );
        return false;
    }

    requested
}

/// Reject short or placeholder plaintext admin passwords.
fn validate_admin_password(password: &str, var_name: &str) -> Result<(), ConfigError> {
    if password.chars().count() < MIN_ADMIN_PASSWORD_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!("must be at least {MIN_ADMIN_PASSWORD_LENGTH} characters"),
        ));
    }

    let lower = password.to_lowercase();
    if let Some(pattern) = PLACEHOLDER_PATTERNS.iter().find(|p| lower.contains(*p)) {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!("appears to be a placeholder (contains '{pattern}')"),
        ));
    }

    Ok(())
}

impl AdminPassword {
    /// Returns the plaintext when the password was configured unhashed.
    #[must_use]
    pub fn plaintext(&self) -> Option<&str> {
        match self {
            Self::Plaintext(secret) => Some(secret.expose_secret()),
            Self::Hash(_) => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn base_vars() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("SITE_BASE_URL", "https://assistra.com.br"),
            ("ADMIN_NAME", "Marina Alves"),
            ("ADMIN_EMAIL", "Marina@Assistra.com.br"),
            ("ADMIN_PASSWORD", "k7#Qv9!rT2xLw4"),
        ])
    }

    fn load(vars: &HashMap<&'static str, &'static str>) -> Result<SiteConfig, ConfigError> {
        SiteConfig::from_lookup(|key| vars.get(key).map(|v| (*v).to_string()))
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = load(&base_vars()).unwrap();

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert!(config.is_secure());
        assert_eq!(config.admin.username, "admin");
        assert_eq!(config.admin.role, UserRole::Admin);
        assert_eq!(config.admin.email.as_str(), "marina@assistra.com.br");
        assert!(config.contentful.is_none());
        assert!(config.sanity.is_none());
        assert!(config.klaviyo.is_none());
        assert!(!config.auth_bypass);
    }

    #[test]
    fn test_missing_base_url() {
        let mut vars = base_vars();
        vars.remove("SITE_BASE_URL");
        let err = load(&vars).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref k) if k == "SITE_BASE_URL"));
    }

    #[test]
    fn test_invalid_port() {
        let mut vars = base_vars();
        vars.insert("SITE_PORT", "http");
        assert!(matches!(
            load(&vars).unwrap_err(),
            ConfigError::InvalidEnvVar(_, _)
        ));
    }

    #[test]
    fn test_password_hash_preferred_over_plaintext() {
        let mut vars = base_vars();
        vars.insert("ADMIN_PASSWORD_HASH", "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA");
        let config = load(&vars).unwrap();
        assert!(matches!(config.admin.password, AdminPassword::Hash(_)));
        assert!(config.admin.password.plaintext().is_none());
    }

    #[test]
    fn test_password_hash_must_be_argon2() {
        let mut vars = base_vars();
        vars.insert("ADMIN_PASSWORD_HASH", "5f4dcc3b5aa765d61d8327deb882cf99");
        assert!(load(&vars).is_err());
    }

    #[test]
    fn test_weak_plaintext_password_rejected() {
        let mut vars = base_vars();
        vars.insert("ADMIN_PASSWORD", "short");
        assert!(matches!(
            load(&vars).unwrap_err(),
            ConfigError::InsecureSecret(_, _)
        ));

        vars.insert("ADMIN_PASSWORD", "minhasenha-forte-2024");
        assert!(matches!(
            load(&vars).unwrap_err(),
            ConfigError::InsecureSecret(_, _)
        ));
    }

    #[test]
    fn test_cms_enabled_only_when_complete() {
        let mut vars = base_vars();
        vars.insert("CONTENTFUL_SPACE_ID", "space123");
        let config = load(&vars).unwrap();
        assert!(config.contentful.is_none());

        vars.insert("CONTENTFUL_ACCESS_TOKEN", "cda-token");
        vars.insert("SANITY_PROJECT_ID", "abc123");
        let config = load(&vars).unwrap();
        let contentful = config.contentful.unwrap();
        assert_eq!(contentful.environment, "master");
        assert_eq!(contentful.base_url, CONTENTFUL_DEFAULT_BASE_URL);
        let sanity = config.sanity.unwrap();
        assert_eq!(sanity.base_url, "https://abc123.apicdn.sanity.io");
        assert_eq!(sanity.dataset, "production");
    }

    #[test]
    fn test_empty_values_count_as_unset() {
        let mut vars = base_vars();
        vars.insert("KLAVIYO_API_KEY", "pk_live");
        vars.insert("KLAVIYO_LIST_ID", "  ");
        assert!(load(&vars).unwrap().klaviyo.is_none());
    }

    #[cfg(not(feature = "insecure-auth-bypass"))]
    #[test]
    fn test_bypass_ignored_without_feature() {
        let mut vars = base_vars();
        vars.insert("SITE_INSECURE_AUTH_BYPASS", "true");
        assert!(!load(&vars).unwrap().auth_bypass);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let mut vars = base_vars();
        vars.insert("CONTENTFUL_SPACE_ID", "space123");
        vars.insert("CONTENTFUL_ACCESS_TOKEN", "super_secret_cda_token");
        vars.insert("KLAVIYO_API_KEY", "super_secret_klaviyo_key");
        vars.insert("KLAVIYO_LIST_ID", "Xy12");
        let config = load(&vars).unwrap();

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("space123"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_cda_token"));
        assert!(!debug_output.contains("super_secret_klaviyo_key"));
        assert!(!debug_output.contains("k7#Qv9!rT2xLw4"));
    }
}
