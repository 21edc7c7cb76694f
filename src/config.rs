use crate::error::AppError;
use std::env;
use std::num::NonZeroU32;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.opendota.com/api";
const DEFAULT_REQUESTS_PER_MINUTE: u32 = 60;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub base_url: String,
    pub requests_per_minute: NonZeroU32,
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("OPENDOTA_API_KEY").filter(|k| !k.trim().is_empty());

        let base_url = lookup("OPENDOTA_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let requests_per_minute = match lookup("OPENDOTA_REQUESTS_PER_MINUTE") {
            Some(raw) => parse_positive(&raw, "OPENDOTA_REQUESTS_PER_MINUTE")?,
            None => DEFAULT_REQUESTS_PER_MINUTE,
        };
        let requests_per_minute = NonZeroU32::new(requests_per_minute).ok_or_else(|| {
            AppError::ConfigError("OPENDOTA_REQUESTS_PER_MINUTE must be positive".to_string())
        })?;

        let timeout_secs = match lookup("OPENDOTA_TIMEOUT_SECS") {
            Some(raw) => u64::from(parse_positive(&raw, "OPENDOTA_TIMEOUT_SECS")?),
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Config {
            api_key,
            base_url,
            requests_per_minute,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn parse_positive(raw: &str, name: &str) -> Result<u32, AppError> {
    match raw.trim().parse::<u32>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(AppError::ConfigError(format!(
            "{} must be a positive integer, got '{}'",
            name, raw
        ))),
    }
}
