//! Core types for Assistra.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod locale;
pub mod price;
pub mod role;

pub use email::{Email, EmailError};
pub use locale::Locale;
pub use price::{CurrencyCode, Price};
pub use role::UserRole;
