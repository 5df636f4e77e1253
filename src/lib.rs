//! # GigaCloud Catalog Client
//!
//! Fetches product detail records from the GigaCloud logistics API using
//! OAuth2 client-credentials tokens that are cached in a shared key-value
//! store until shortly before they expire.
//!
//! Modules:
//! - `config`: YAML configuration, defaults and validation
//! - `cache`: token store contract and the in-memory store
//! - `sources`: site credentials and the token provider
//! - `products`: product detail model and fetcher
//! - `client`: facade wiring everything from a loaded config

pub mod cache;
pub mod client;
pub mod config;
pub mod errors;
pub mod helpers;
pub mod observability;
pub mod products;
pub mod sources;
pub mod utils;

#[cfg(test)]
mod tests;

pub use crate::client::GigaClient;
pub use crate::config::types::ServiceConfig;
pub use crate::errors::GigaError;
pub use crate::products::model::ProductDetail;
