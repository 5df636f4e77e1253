use std::time::Duration;

use anyhow::Result;
use reqwest::Client;

use crate::config::settings::HttpConfig;

/// Shared client for both vendor endpoints.
///
/// reqwest exposes connect and read timeouts but no write timeout, so the
/// whole request is capped at connect + write + read.
pub fn build_http_client(cfg: &HttpConfig) -> Result<Client> {
    let total = cfg
        .connect_timeout_ms
        .saturating_add(cfg.write_timeout_ms)
        .saturating_add(cfg.read_timeout_ms);

    let client = Client::builder()
        .connect_timeout(Duration::from_millis(cfg.connect_timeout_ms))
        .read_timeout(Duration::from_millis(cfg.read_timeout_ms))
        .timeout(Duration::from_millis(total))
        .build()?;
    Ok(client)
}
