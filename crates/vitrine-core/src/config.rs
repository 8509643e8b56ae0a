use std::path::PathBuf;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::app_config::StoreConfig;
use crate::ConfigError;

/// Load store configuration, applying environment overrides to the defaults.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if an override is present but invalid.
pub fn load_store_config() -> Result<StoreConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_store_config_from_env()
}

/// Load store configuration from environment variables already in the process.
///
/// Unlike [`load_store_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if an override is present but invalid.
pub fn load_store_config_from_env() -> Result<StoreConfig, ConfigError> {
    build_store_config(|key| std::env::var(key))
}

/// Build store configuration using the provided env-var lookup function.
///
/// Every variable is optional; unset variables keep the [`StoreConfig::default`]
/// value.
fn build_store_config<F>(lookup: F) -> Result<StoreConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let defaults = StoreConfig::default();

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: u32| -> Result<u32, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw.parse::<u32>().map_err(|e| invalid(var, e.to_string())),
            Err(_) => Ok(default),
        }
    };

    let parse_u64 = |var: &str, default: u64| -> Result<u64, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw.parse::<u64>().map_err(|e| invalid(var, e.to_string())),
            Err(_) => Ok(default),
        }
    };

    let parse_amount = |var: &str, default: Decimal| -> Result<Decimal, ConfigError> {
        let Ok(raw) = lookup(var) else {
            return Ok(default);
        };
        let value = Decimal::from_str(raw.trim()).map_err(|e| invalid(var, e.to_string()))?;
        if value.is_sign_negative() {
            return Err(invalid(var, format!("amount must not be negative, got {value}")));
        }
        Ok(value)
    };

    let feed_url = or_default("VITRINE_FEED_URL", &defaults.feed_url);
    if feed_url.trim().is_empty() {
        return Err(invalid("VITRINE_FEED_URL", "feed URL is empty".to_string()));
    }

    let delivery_fee = parse_amount("VITRINE_DELIVERY_FEE", defaults.delivery_fee)?;
    let min_order_value = parse_amount("VITRINE_MIN_ORDER_VALUE", defaults.min_order_value)?;

    let whatsapp_number = or_default("VITRINE_WHATSAPP_NUMBER", &defaults.whatsapp_number);
    validate_destination_number(&whatsapp_number)
        .map_err(|reason| invalid("VITRINE_WHATSAPP_NUMBER", reason))?;

    let store_name = or_default("VITRINE_STORE_NAME", &defaults.store_name);
    let placeholder_image = or_default("VITRINE_PLACEHOLDER_IMAGE", &defaults.placeholder_image);
    let log_level = or_default("VITRINE_LOG_LEVEL", &defaults.log_level);
    let request_timeout_secs =
        parse_u64("VITRINE_REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs)?;
    let user_agent = or_default("VITRINE_USER_AGENT", &defaults.user_agent);
    let max_retries = parse_u32("VITRINE_MAX_RETRIES", defaults.max_retries)?;
    let retry_backoff_base_secs = parse_u64(
        "VITRINE_RETRY_BACKOFF_BASE_SECS",
        defaults.retry_backoff_base_secs,
    )?;
    let fallback_catalog_path = lookup("VITRINE_FALLBACK_CATALOG")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    Ok(StoreConfig {
        feed_url,
        delivery_fee,
        min_order_value,
        whatsapp_number,
        store_name,
        placeholder_image,
        log_level,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_secs,
        fallback_catalog_path,
    })
}

/// The order channel addresses a bare digit string: no `+`, spaces, or dashes.
fn validate_destination_number(number: &str) -> Result<(), String> {
    if number.is_empty() {
        return Err("destination number is empty".to_string());
    }
    if !number.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!(
            "destination number must contain digits only, got \"{number}\""
        ));
    }
    Ok(())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
