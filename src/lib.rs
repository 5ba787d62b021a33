//! Translation resolver: serve per-language translation dictionaries for page requests.
//!
//! The library exposes the i18n core (module discovery, the module index and
//! the resolver) and the axum server the binary runs.

pub mod config;
pub mod error;
pub mod i18n;
pub mod response;
pub mod server;
