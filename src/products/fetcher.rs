use http::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use tracing::{debug, error, info, warn};

use crate::cache::token_store::TokenStore;
use crate::errors::GigaError;
use crate::helpers::time::get_instant;
use crate::observability::metrics::get_metrics;
use crate::products::model::{ProductDetail, ProductDetailRequest, ProductDetailResponse};
use crate::sources::token_provider::{AccessToken, TokenProvider};
use crate::utils::constants::MAX_SKUS_PER_REQUEST;

static JSON_CONTENT_TYPE: &str = "application/json";
/// longest slice of an error body that ends up in the log
const LOGGED_BODY_LIMIT: usize = 500;

/// Looks up product detail records for a batch of SKUs on one site.
#[derive(Debug)]
pub struct ProductFetcher<S> {
    client: Client,
    product_detail_url: String,
    max_skus_per_request: usize,
    tokens: TokenProvider<S>,
}

impl<S: TokenStore> ProductFetcher<S> {
    pub fn new(client: Client, product_detail_url: impl Into<String>, tokens: TokenProvider<S>) -> Self {
        Self {
            client,
            product_detail_url: product_detail_url.into(),
            max_skus_per_request: MAX_SKUS_PER_REQUEST,
            tokens,
        }
    }

    /// Lower the batch limit; values above the vendor limit are clamped.
    pub fn with_max_skus_per_request(mut self, max: usize) -> Self {
        self.max_skus_per_request = max.clamp(1, MAX_SKUS_PER_REQUEST);
        self
    }

    pub fn max_skus_per_request(&self) -> usize {
        self.max_skus_per_request
    }

    pub fn token_provider(&self) -> &TokenProvider<S> {
        &self.tokens
    }

    /// Fetch details for `skus` (1..=limit entries). Records come back in the
    /// vendor's order; an empty list means the vendor matched nothing.
    pub async fn get_product_by_skus<T: AsRef<str>>(
        &self,
        site: &str,
        skus: &[T],
    ) -> Result<Vec<ProductDetail>, GigaError> {
        let metrics = get_metrics().await;
        let result = self.fetch(site, skus).await;

        match &result {
            Ok(products) => {
                metrics
                    .products_received
                    .with_label_values(&[site])
                    .inc_by(products.len() as u64);
            }
            Err(e) => {
                let reason = e.reason();
                metrics.product_failures.with_label_values(&[site, reason]).inc();
                error!(site = %site, reason, error = %e, "giga product detail request failed");
            }
        }
        result
    }

    /// Single-SKU convenience over `get_product_by_skus`. Records for any
    /// other SKU are ignored.
    pub async fn get_product_by_sku(
        &self,
        site: &str,
        sku: &str,
    ) -> Result<Option<ProductDetail>, GigaError> {
        let products = self.get_product_by_skus(site, &[sku]).await?;
        Ok(products.into_iter().find(|p| p.sku.as_deref() == Some(sku)))
    }

    fn validate<T: AsRef<str>>(&self, skus: &[T]) -> Result<(), GigaError> {
        if skus.is_empty() {
            return Err(GigaError::InvalidArgument("sku list can't be empty".to_owned()));
        }
        if skus.len() > self.max_skus_per_request {
            return Err(GigaError::InvalidArgument(format!(
                "sku list size can't exceed {} (got {})",
                self.max_skus_per_request,
                skus.len()
            )));
        }
        Ok(())
    }

    async fn fetch<T: AsRef<str>>(
        &self,
        site: &str,
        skus: &[T],
    ) -> Result<Vec<ProductDetail>, GigaError> {
        self.validate(skus)?;

        let token = self
            .tokens
            .get_token(site)
            .await
            .ok_or_else(|| GigaError::TokenUnavailable(site.to_owned()))?;

        let request = ProductDetailRequest {
            skus: skus.iter().map(AsRef::as_ref).collect(),
        };

        let metrics = get_metrics().await;
        let start = get_instant();
        metrics.product_requests.with_label_values(&[site]).inc();
        info!(site = %site, skus = request.skus.len(), "requesting giga product details");

        let result = self.send(&token, &request).await;

        metrics
            .product_fetch_duration
            .with_label_values(&[site])
            .observe(start.elapsed().as_secs_f64());

        let response = result?;
        if !response.success {
            warn!(site = %site, "giga product/detailInfo reported success=false");
        }
        let products = response.data.unwrap_or_default();
        debug!(site = %site, received = products.len(), "giga product details received");
        Ok(products)
    }

    async fn send(
        &self,
        token: &AccessToken,
        request: &ProductDetailRequest<'_>,
    ) -> Result<ProductDetailResponse, GigaError> {
        let response = self
            .client
            .post(&self.product_detail_url)
            .header(AUTHORIZATION, token.bearer())
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(
                status = status.as_u16(),
                body = %body.chars().take(LOGGED_BODY_LIMIT).collect::<String>(),
                "giga product/detailInfo error body"
            );
            return Err(GigaError::Http {
                status,
                message: status.canonical_reason().unwrap_or_default().to_owned(),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
