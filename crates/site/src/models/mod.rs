//! Domain models for the site.

pub mod admin_user;
pub mod session;

pub use admin_user::AdminUser;
pub use session::{SessionUser, keys as session_keys};
