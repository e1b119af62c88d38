//! Session middleware configuration.
//!
//! Sessions live in process memory: the only thing stored is the signed-in
//! admin, and losing it on restart just means signing in again.

use tower_sessions::{Expiry, SessionManagerLayer, SessionStore};

use crate::config::SiteConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "assistra_session";

/// Session expiry time in seconds (8 hours of inactivity).
const SESSION_EXPIRY_SECONDS: i64 = 8 * 60 * 60;

/// Create the session layer over `store`.
///
/// The server uses `MemoryStore`; tests plug in stores that fail.
#[must_use]
pub fn create_session_layer<Store>(config: &SiteConfig, store: Store) -> SessionManagerLayer<Store>
where
    Store: SessionStore + Clone,
{
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
