//! Configuration validation with aggregated errors.
//! - Aggregates all issues into Vec<String>
//! - Checks:
//!   * every site resolves to a registered client with a non-empty secret
//!   * vendor endpoints are absolute http(s) URLs
//!   * batch limit, timeouts, safety margin and logging level bounds

use tracing::{error, info};

use crate::config::settings::{HttpConfig, SettingsConfig};
use crate::config::types::{ServiceConfig, VendorConfig};
use crate::observability::metrics::get_metrics;
use crate::utils::constants::MAX_SKUS_PER_REQUEST;

/// Public entrypoint: returns Ok(()) or Err(Vec<String>) containing all issues.
pub async fn validate_service_config(cfg: &ServiceConfig) -> Result<(), Vec<String>> {
    let mut errors: Vec<String> = Vec::new();

    validate_settings(&cfg.settings, &mut errors);
    validate_vendor(&cfg.vendor, &mut errors);
    validate_credentials(cfg, &mut errors);

    if errors.is_empty() {
        info!("config valid");
        Ok(())
    } else {
        error!("configuration validation errors ({}):", errors.len());
        for e in &errors {
            error!(" - {}", e);
        }
        get_metrics().await.config_validation_errors.inc();
        Err(errors)
    }
}

/// SETTINGS VALIDATION
fn validate_settings(settings: &SettingsConfig, errors: &mut Vec<String>) {
    if let Some(s) = settings.safety_margin_seconds {
        if s > 60 * 60 * 24 {
            errors.push(format!(
                "settings.safety_margin_seconds ({}) is unreasonably large",
                s
            ));
        }
    }

    validate_http("settings.http", &settings.http, errors);

    if let Some(logging) = &settings.logging {
        let valid = ["trace", "debug", "info", "warn", "error"];
        if !valid.contains(&logging.level.to_lowercase().as_str()) {
            errors.push(format!(
                "settings.logging.level '{}' invalid; allowed: {:?}",
                logging.level, valid
            ));
        }
    }
}

fn validate_http(path: &str, http: &HttpConfig, errors: &mut Vec<String>) {
    for (name, value) in [
        ("connect_timeout_ms", http.connect_timeout_ms),
        ("write_timeout_ms", http.write_timeout_ms),
        ("read_timeout_ms", http.read_timeout_ms),
    ] {
        if value == 0 {
            errors.push(format!("{}.{} must be > 0", path, name));
        }
    }
}

/// VENDOR VALIDATION
fn validate_vendor(vendor: &VendorConfig, errors: &mut Vec<String>) {
    validate_url("vendor.token_url", &vendor.token_url, errors);
    validate_url("vendor.product_detail_url", &vendor.product_detail_url, errors);

    if vendor.max_skus_per_request == 0 || vendor.max_skus_per_request > MAX_SKUS_PER_REQUEST {
        errors.push(format!(
            "vendor.max_skus_per_request ({}) must be in range 1..={}",
            vendor.max_skus_per_request, MAX_SKUS_PER_REQUEST
        ));
    }
}

fn validate_url(path: &str, url: &str, errors: &mut Vec<String>) {
    let url = url.trim();
    if url.is_empty() {
        errors.push(format!("{} cannot be empty", path));
    } else if !(url.starts_with("http://") || url.starts_with("https://")) {
        errors.push(format!("{} '{}' must be an http(s) URL", path, url));
    }
}

/// CREDENTIAL TABLES
fn validate_credentials(cfg: &ServiceConfig, errors: &mut Vec<String>) {
    if cfg.sites.is_empty() {
        errors.push("config: 'sites' is empty; at least one site required".to_string());
    }
    if cfg.clients.is_empty() {
        errors.push("config: 'clients' is empty; at least one client required".to_string());
    }

    for (site, client_id) in &cfg.sites {
        if site.trim().is_empty() {
            errors.push("sites: site code cannot be empty".to_string());
        }
        if client_id.trim().is_empty() {
            errors.push(format!("sites.{}: client id cannot be empty", site));
        } else if !cfg.clients.contains_key(client_id) {
            errors.push(format!(
                "sites.{} references unknown client '{}'",
                site, client_id
            ));
        }
    }

    for (client_id, secret) in &cfg.clients {
        if secret.trim().is_empty() {
            errors.push(format!(
                "clients.{}: secret is empty (unset environment variable?)",
                client_id
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn valid_config() -> ServiceConfig {
        ServiceConfig {
            settings: SettingsConfig::default(),
            vendor: VendorConfig::default(),
            sites: HashMap::from([("US".to_owned(), "us_client".to_owned())]),
            clients: HashMap::from([("us_client".to_owned(), "secret".to_owned())]),
        }
    }

    #[tokio::test]
    async fn valid_config_passes() {
        assert!(validate_service_config(&valid_config()).await.is_ok());
    }

    #[tokio::test]
    async fn invalid_config_reports_all_errors() {
        let mut cfg = valid_config();
        cfg.sites.insert("DE".to_owned(), "missing_client".to_owned());
        cfg.clients.insert("blank".to_owned(), "  ".to_owned());
        cfg.vendor.token_url = "ftp://vendor/token".to_owned();
        cfg.vendor.max_skus_per_request = 500;
        cfg.settings.http.read_timeout_ms = 0;

        let errors = validate_service_config(&cfg).await.unwrap_err();

        assert_eq!(errors.len(), 5, "{:#?}", errors);
        assert!(errors.iter().any(|e| e.contains("unknown client 'missing_client'")));
        assert!(errors.iter().any(|e| e.contains("clients.blank")));
        assert!(errors.iter().any(|e| e.contains("vendor.token_url")));
        assert!(errors.iter().any(|e| e.contains("max_skus_per_request")));
        assert!(errors.iter().any(|e| e.contains("read_timeout_ms")));
    }

    #[tokio::test]
    async fn empty_tables_are_rejected() {
        let mut cfg = valid_config();
        cfg.sites.clear();
        cfg.clients.clear();

        let errors = validate_service_config(&cfg).await.unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
