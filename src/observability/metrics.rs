use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};
use tracing::info;
use std::sync::Arc;
use tokio::sync::OnceCell;

// Declare the static OnceCell to hold the Metrics.
static METRICS_INSTANCE: OnceCell<Arc<Metrics>> = OnceCell::const_new();

/// Asynchronously initializes and gets a reference to the static `Metrics`.
pub async fn get_metrics() -> &'static Arc<Metrics> {
    METRICS_INSTANCE.get_or_init(|| async {
        info!("Initializing Metrics ...");
        Metrics::new()}
    ).await
}

pub const REASON_CONFIG: &str = "config";
pub const REASON_STATUS: &str = "status";
pub const REASON_TRANSPORT: &str = "transport";
pub const REASON_MALFORMED: &str = "malformed";
pub const REASON_STORE: &str = "store";
pub const REASON_INVALID_ARGUMENT: &str = "invalid_argument";
pub const REASON_NO_TOKEN: &str = "no_token";
pub const REASON_DECODE: &str = "decode";

#[derive(Clone)]
pub struct Metrics {
    pub registry: Registry,

    // Token metrics
    pub token_requests: IntCounterVec,
    pub token_failures: IntCounterVec,
    pub token_cache_hits: IntCounterVec,
    pub token_fetch_duration: HistogramVec,

    // Product metrics
    pub product_requests: IntCounterVec,
    pub product_failures: IntCounterVec,
    pub product_fetch_duration: HistogramVec,
    pub products_received: IntCounterVec,

    // Config
    pub config_parse_failures: IntCounter,
    pub config_validation_errors: IntCounter,
}

impl Metrics {
    fn new() -> Arc<Self> {
        let registry = Registry::new_custom(Some("gigaclient".into()), None).unwrap();

        let metrics: Arc<Metrics> = Arc::new(Self {
            // Token
            token_requests: IntCounterVec::new(Opts::new("token_requests_total", "OAuth2 token requests sent by site"),&["site"],).unwrap(),
            token_failures: IntCounterVec::new(Opts::new("token_failures_total", "Token acquisition failures by reason"),&["site", "reason"],).unwrap(),
            token_cache_hits: IntCounterVec::new(Opts::new("token_cache_hits_total", "Tokens served from the token store"),&["site"],).unwrap(),
            token_fetch_duration: HistogramVec::new(HistogramOpts::new("token_fetch_duration_seconds", "Token endpoint round-trip seconds").buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),&["site"],).unwrap(),

            // Product
            product_requests: IntCounterVec::new(Opts::new("product_requests_total", "product/detailInfo requests by site"),&["site"],).unwrap(),
            product_failures: IntCounterVec::new(Opts::new("product_failures_total", "product/detailInfo failures by reason"),&["site", "reason"],).unwrap(),
            product_fetch_duration: HistogramVec::new(HistogramOpts::new("product_fetch_duration_seconds", "product/detailInfo round-trip seconds").buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),&["site"],).unwrap(),
            products_received: IntCounterVec::new(Opts::new("products_received_total", "Product detail records received"),&["site"],).unwrap(),

            // Config
            config_parse_failures: IntCounter::new("config_parse_failures_total","Config files that failed to parse",).unwrap(),
            config_validation_errors: IntCounter::new("config_validation_errors_total","Validation errors during startup",).unwrap(),

            registry,
        });

        // Register all metrics in the registry
        let reg = &metrics.registry;
        reg.register(Box::new(metrics.token_requests.clone())).unwrap();
        reg.register(Box::new(metrics.token_failures.clone())).unwrap();
        reg.register(Box::new(metrics.token_cache_hits.clone())).unwrap();
        reg.register(Box::new(metrics.token_fetch_duration.clone())).unwrap();
        reg.register(Box::new(metrics.product_requests.clone())).unwrap();
        reg.register(Box::new(metrics.product_failures.clone())).unwrap();
        reg.register(Box::new(metrics.product_fetch_duration.clone())).unwrap();
        reg.register(Box::new(metrics.products_received.clone())).unwrap();
        reg.register(Box::new(metrics.config_parse_failures.clone())).unwrap();
        reg.register(Box::new(metrics.config_validation_errors.clone())).unwrap();

        metrics
    }

    /// Text exposition format of every registered metric.
    pub fn render(&self) -> anyhow::Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
