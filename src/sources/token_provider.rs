use std::fmt;
use std::sync::Arc;

use http::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::{debug, error, info, warn};

use crate::cache::token_store::{token_cache_key, TokenStore};
use crate::errors::TokenError;
use crate::helpers::time::{cache_ttl_seconds, get_instant};
use crate::observability::metrics::get_metrics;
use crate::sources::credentials::{ClientCredentials, CredentialTable};
use crate::sources::token_response::{parse_token_response, TokenGrant};
use crate::utils::constants::DEFAULT_SAFETY_MARGIN_SECS;

static GRANT_TYPE_CLIENT_CREDENTIALS: &str = "client_credentials";
static FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Bearer token issued for one site.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `Authorization` header value.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// Resolves a site to its client, serves cached tokens and performs the
/// client-credentials exchange on a miss.
pub struct TokenProvider<S> {
    client: Client,
    token_url: String,
    credentials: Arc<CredentialTable>,
    store: Arc<S>,
    safety_margin_seconds: u64,
}

impl<S: TokenStore> TokenProvider<S> {
    pub fn new(
        client: Client,
        token_url: impl Into<String>,
        credentials: CredentialTable,
        store: Arc<S>,
    ) -> Self {
        Self {
            client,
            token_url: token_url.into(),
            credentials: Arc::new(credentials),
            store,
            safety_margin_seconds: DEFAULT_SAFETY_MARGIN_SECS,
        }
    }

    pub fn with_safety_margin(mut self, safety_margin_seconds: u64) -> Self {
        self.safety_margin_seconds = safety_margin_seconds;
        self
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Token for `site`, or `None` when the site is not configured or the
    /// vendor could not issue one. Failures are logged, never returned.
    pub async fn get_token(&self, site: &str) -> Option<AccessToken> {
        match self.try_get_token(site).await {
            Ok(token) => Some(token),
            Err(e) => {
                get_metrics()
                    .await
                    .token_failures
                    .with_label_values(&[site, e.reason()])
                    .inc();
                error!(site = %site, reason = e.reason(), error = %e, "failed to obtain giga access token");
                None
            }
        }
    }

    async fn try_get_token(&self, site: &str) -> Result<AccessToken, TokenError> {
        let credentials = self.credentials.resolve(site)?;
        let cache_key = token_cache_key(&credentials.client_id);

        match self.store.get(&cache_key).await {
            Ok(Some(cached)) => {
                debug!(site = %site, client_id = %credentials.client_id, "token served from store");
                get_metrics().await.token_cache_hits.with_label_values(&[site]).inc();
                return Ok(AccessToken::new(cached));
            }
            Ok(None) => {}
            // an unreadable store is treated like an empty one
            Err(e) => warn!(site = %site, key = %cache_key, error = %e, "token store read failed"),
        }

        let grant = self.fetch_token(site, &credentials).await?;
        let ttl = cache_ttl_seconds(grant.expires_in, self.safety_margin_seconds);

        self.store
            .set(&cache_key, &grant.access_token, ttl)
            .await
            .map_err(TokenError::Store)?;

        info!(
            site = %site,
            client_id = %credentials.client_id,
            expires_in = grant.expires_in,
            ttl_seconds = ttl,
            "giga token obtained and cached"
        );
        Ok(AccessToken::new(grant.access_token))
    }

    /// One client-credentials exchange against the token endpoint. No caching.
    pub async fn fetch_token(
        &self,
        site: &str,
        credentials: &ClientCredentials,
    ) -> Result<TokenGrant, TokenError> {
        let metrics = get_metrics().await;
        let start = get_instant();
        metrics.token_requests.with_label_values(&[site]).inc();

        let result = self.exchange(credentials).await;

        metrics
            .token_fetch_duration
            .with_label_values(&[site])
            .observe(start.elapsed().as_secs_f64());
        result
    }

    async fn exchange(&self, credentials: &ClientCredentials) -> Result<TokenGrant, TokenError> {
        let form = [
            ("grant_type", GRANT_TYPE_CLIENT_CREDENTIALS),
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
        ];

        let response = self
            .client
            .post(&self.token_url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // the body only feeds the error message
            let body = response.text().await.unwrap_or_default();
            return Err(TokenError::Status { status, body });
        }
        parse_token_response(&response.text().await?)
    }
}

impl<S> fmt::Debug for TokenProvider<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenProvider")
            .field("token_url", &self.token_url)
            .field("credentials", &self.credentials)
            .field("safety_margin_seconds", &self.safety_margin_seconds)
            .finish()
    }
}
