use std::{fs, path::Path};

use anyhow::{bail, Result};
use regex::Regex;
use tracing::{debug, error};

use crate::config::proc_validator;
use crate::config::settings::LoggingConfig;
use crate::config::types::ServiceConfig;
use crate::observability::metrics::get_metrics;
use crate::utils::constants::DEFAULT_SAFETY_MARGIN_SECS;

/// Load and validate config from YAML file
pub async fn file_to_config(path: &Path) -> Result<ServiceConfig> {
    let content = fs::read_to_string(path)?;

    let expanded = expand_env_vars(&content);
    parse_config(expanded).await
}

pub async fn parse_config(content: String) -> Result<ServiceConfig> {
    let metrics = get_metrics().await;
    let mut service_config: ServiceConfig = serde_yaml::from_str(&content)
        .inspect_err(|e| {
            error!("parse config error: {}", e);
            metrics.config_parse_failures.inc();
        })?;

    // Apply defaults
    if service_config.settings.logging.is_none() {
        service_config.settings.logging = Some(LoggingConfig::default());
    }
    if service_config.settings.safety_margin_seconds.is_none() {
        service_config.settings.safety_margin_seconds = Some(DEFAULT_SAFETY_MARGIN_SECS);
    }

    debug!("validation config ...");
    if let Err(errors) = proc_validator::validate_service_config(&service_config).await {
        bail!(
            "config is not valid, total errors:{}, \n{}",
            errors.len(),
            errors.join("\n")
        );
    }

    Ok(service_config)
}

/// Replaces `${VAR}` and `${VAR:default}` with the process environment value.
pub fn expand_env_vars(input: &str) -> String {
    let re = match Regex::new(r"\$\{(\w+)(?::([^\}]*))?\}") {
        Ok(re) => re,
        Err(_) => return input.to_owned(),
    };
    re.replace_all(input, |caps: &regex::Captures| {
        let var = &caps[1];
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        std::env::var(var).unwrap_or_else(|_| default.to_string())
    })
    .to_string()
}
