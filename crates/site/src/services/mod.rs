//! Business logic services for the site.
//!
//! # Services
//!
//! - `auth` - Admin credential check (argon2)
//! - `klaviyo` - Newsletter list subscription

pub mod auth;
pub mod klaviyo;
