use std::future::Future;

use anyhow::Result;

use crate::utils::constants::TOKEN_CACHE_KEY_PREFIX;

/// Shared key-value store holding bearer tokens.
///
/// Implementations must stop returning a value once its TTL has elapsed;
/// the token provider does not re-validate what `get` hands back.
pub trait TokenStore: Send + Sync {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>>> + Send;

    fn set(
        &self,
        key: &str,
        value: &str,
        ttl_seconds: u64,
    ) -> impl Future<Output = Result<()>> + Send;
}

/// `giga_token:<client_id>`
pub fn token_cache_key(client_id: &str) -> String {
    format!("{}{}", TOKEN_CACHE_KEY_PREFIX, client_id)
}

#[cfg(test)]
mod tests {
    use super::token_cache_key;

    #[test]
    fn key_is_prefixed_client_id() {
        assert_eq!(token_cache_key("32379916_USA_release"), "giga_token:32379916_USA_release");
    }
}
