//! Assistra site library.
//!
//! The bilingual (pt/en) marketing site with its CMS-backed blog and store,
//! newsletter signup, and the session-gated admin area. Exposed as a
//! library so the router can be exercised in tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cms;
pub mod config;
pub mod error;
pub mod i18n;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod views;
