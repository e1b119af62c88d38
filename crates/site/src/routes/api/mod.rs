//! JSON API handlers.

pub mod session;
