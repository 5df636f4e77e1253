//! Sources module
//!
//! Where bearer tokens come from: the site credential table and the
//! client-credentials token provider backed by a `TokenStore`.

pub mod credentials;
pub mod token_provider;
pub mod token_response;

pub use credentials::{ClientCredentials, CredentialTable};
pub use token_provider::{AccessToken, TokenProvider};
