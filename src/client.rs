use std::sync::Arc;

use anyhow::Result;

use crate::cache::memory_store::MemoryTokenStore;
use crate::cache::token_store::TokenStore;
use crate::config::types::ServiceConfig;
use crate::errors::GigaError;
use crate::helpers::http::build_http_client;
use crate::products::fetcher::ProductFetcher;
use crate::products::model::ProductDetail;
use crate::sources::credentials::CredentialTable;
use crate::sources::token_provider::{AccessToken, TokenProvider};

/// Token provider and product fetcher wired from one `ServiceConfig`,
/// sharing a single HTTP client.
#[derive(Debug)]
pub struct GigaClient<S = MemoryTokenStore> {
    fetcher: ProductFetcher<S>,
}

impl GigaClient<MemoryTokenStore> {
    /// Client backed by a process-local token store.
    pub fn from_config(cfg: &ServiceConfig) -> Result<Self> {
        Self::with_store(cfg, Arc::new(MemoryTokenStore::new()))
    }
}

impl<S: TokenStore> GigaClient<S> {
    /// Client backed by a shared store (e.g. one reachable by other instances).
    pub fn with_store(cfg: &ServiceConfig, store: Arc<S>) -> Result<Self> {
        let client = build_http_client(&cfg.settings.http)?;

        let tokens = TokenProvider::new(
            client.clone(),
            cfg.vendor.token_url.clone(),
            CredentialTable::from_config(cfg),
            store,
        )
        .with_safety_margin(cfg.settings.safety_margin_seconds());

        let fetcher = ProductFetcher::new(client, cfg.vendor.product_detail_url.clone(), tokens)
            .with_max_skus_per_request(cfg.vendor.max_skus_per_request);

        Ok(Self { fetcher })
    }

    pub async fn get_token(&self, site: &str) -> Option<AccessToken> {
        self.fetcher.token_provider().get_token(site).await
    }

    pub async fn get_product_by_skus<T: AsRef<str>>(
        &self,
        site: &str,
        skus: &[T],
    ) -> Result<Vec<ProductDetail>, GigaError> {
        self.fetcher.get_product_by_skus(site, skus).await
    }

    pub async fn get_product_by_sku(
        &self,
        site: &str,
        sku: &str,
    ) -> Result<Option<ProductDetail>, GigaError> {
        self.fetcher.get_product_by_sku(site, sku).await
    }

    pub fn max_skus_per_request(&self) -> usize {
        self.fetcher.max_skus_per_request()
    }

    pub fn store(&self) -> &Arc<S> {
        self.fetcher.token_provider().store()
    }
}
