//! HTTP middleware stack for the site.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Locale router (redirect unprefixed paths to `/pt`)
//! 2. Sentry layer (capture errors)
//! 3. `TraceLayer` (request tracing)
//! 4. Request ID (add unique ID to each request)
//! 5. Security headers (CSP, frame options, etc.)
//! 6. Session layer (tower-sessions with in-memory store)
//!
//! The login form additionally sits behind a rate limiter (governor). The
//! session gate is not a layer: admin handlers take the [`RequireAdmin`]
//! extractor.

pub mod auth;
pub mod gate;
pub mod locale;
pub mod rate_limit;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use auth::{
    OptionalUser, RequireAdmin, clear_current_user, load_current_user, set_current_user,
};
pub use gate::{GateOutcome, SessionGate, SessionStatus};
pub use locale::{Lang, locale_middleware};
pub use rate_limit::login_rate_limiter;
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
