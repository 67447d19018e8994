use std::str::FromStr;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_CATALOG_BASE_URL: &str = "https://stageapi.monkcommerce.app";
const DEFAULT_USER_AGENT: &str = "shelfpick/0.1 (product-picker)";

/// Reads `.env` (if present) and then the process environment.
///
/// # Errors
///
/// Returns `ConfigError` when the API key is missing or a value fails to parse.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Same as [`load_app_config`] but ignores `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` when the API key is missing or a value fails to parse.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let text = |var: &str, default: &str| lookup(var).unwrap_or_else(|_| default.to_owned());

    let catalog_api_key = lookup("SHELFPICK_CATALOG_API_KEY")
        .ok()
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingEnvVar("SHELFPICK_CATALOG_API_KEY".to_owned()))?;

    let catalog_base_url = text("SHELFPICK_CATALOG_BASE_URL", DEFAULT_CATALOG_BASE_URL);
    if !(catalog_base_url.starts_with("http://") || catalog_base_url.starts_with("https://")) {
        return Err(invalid(
            "SHELFPICK_CATALOG_BASE_URL",
            format!("expected an http(s) URL, got \"{catalog_base_url}\""),
        ));
    }

    let page_limit: u32 = parse_var(&lookup, "SHELFPICK_PAGE_LIMIT", "10")?;
    if page_limit == 0 {
        return Err(invalid("SHELFPICK_PAGE_LIMIT", "must be at least 1".to_owned()));
    }

    Ok(AppConfig {
        env: parse_environment(&text("SHELFPICK_ENV", "development")),
        log_level: text("SHELFPICK_LOG_LEVEL", "info"),
        catalog_base_url,
        catalog_api_key,
        page_limit,
        request_timeout_secs: parse_var(&lookup, "SHELFPICK_REQUEST_TIMEOUT_SECS", "30")?,
        user_agent: text("SHELFPICK_USER_AGENT", DEFAULT_USER_AGENT),
        max_retries: parse_var(&lookup, "SHELFPICK_MAX_RETRIES", "2")?,
        retry_backoff_base_ms: parse_var(&lookup, "SHELFPICK_RETRY_BACKOFF_BASE_MS", "500")?,
    })
}

/// Parses `var` as a number, falling back to `default` when unset.
fn parse_var<F, T>(lookup: &F, var: &str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = lookup(var).unwrap_or_else(|_| default.to_owned());
    raw.trim()
        .parse::<T>()
        .map_err(|e| invalid(var, e.to_string()))
}

fn invalid(var: &str, reason: String) -> ConfigError {
    ConfigError::InvalidEnvVar {
        var: var.to_owned(),
        reason,
    }
}

/// Anything other than `production` or `test` is treated as development.
fn parse_environment(s: &str) -> Environment {
    match s.trim().to_ascii_lowercase().as_str() {
        "production" | "prod" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
