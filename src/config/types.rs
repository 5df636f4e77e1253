use serde::Deserialize;
use std::collections::HashMap;

use crate::config::settings::SettingsConfig;
use crate::utils::constants::{DEFAULT_PRODUCT_DETAIL_URL, DEFAULT_TOKEN_URL, MAX_SKUS_PER_REQUEST};

/// ================================
/// Full service configuration
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    #[serde(default)]
    pub settings: SettingsConfig,
    #[serde(default)]
    pub vendor: VendorConfig,
    /// site code (US, DE, EU, ...) -> client id
    pub sites: HashMap<String, String>,
    /// client id -> client secret
    pub clients: HashMap<String, String>,
}

/// ================================
/// Vendor endpoints
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct VendorConfig {
    #[serde(default = "default_token_url")]
    pub token_url: String,
    #[serde(default = "default_product_detail_url")]
    pub product_detail_url: String,
    /// invariant: 1..=200
    #[serde(default = "default_max_skus_per_request")]
    pub max_skus_per_request: usize,
}

impl Default for VendorConfig {
    fn default() -> Self {
        Self {
            token_url: default_token_url(),
            product_detail_url: default_product_detail_url(),
            max_skus_per_request: MAX_SKUS_PER_REQUEST,
        }
    }
}

fn default_token_url() -> String {
    DEFAULT_TOKEN_URL.to_owned()
}

fn default_product_detail_url() -> String {
    DEFAULT_PRODUCT_DETAIL_URL.to_owned()
}

fn default_max_skus_per_request() -> usize {
    MAX_SKUS_PER_REQUEST
}
