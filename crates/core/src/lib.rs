//! Assistra Core - Shared types library.
//!
//! Types used by the `assistra-site` web server and its tests:
//!
//! - [`Locale`] - the two language variants the site is published in
//! - [`Email`] - validated email addresses (admin identity, newsletter)
//! - [`Price`] - product prices in the store listing
//! - [`UserRole`] - role carried by an authenticated session
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and lets the routing rules be tested without a server.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
