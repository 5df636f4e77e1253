//! Shared constants and invariants

pub const DEFAULT_SAFETY_MARGIN_SECS: u64 = 60;

pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_WRITE_TIMEOUT_MS: u64 = 20_000;
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 30_000;

pub const DEFAULT_TOKEN_URL: &str = "https://api.gigacloudlogistics.com/api-auth-v1/oauth/token";
pub const DEFAULT_PRODUCT_DETAIL_URL: &str =
    "https://api.gigacloudlogistics.com/api-b2b-v1/product/detailInfo";

/// vendor batch limit for product/detailInfo
pub const MAX_SKUS_PER_REQUEST: usize = 200;

pub const TOKEN_CACHE_KEY_PREFIX: &str = "giga_token:";
