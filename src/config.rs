use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::api::coingecko::CoinGeckoClient;

/// Configuration errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}'")]
    Invalid { key: String, value: String },
}

/// Runtime settings, read from the environment (and `.env`)
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub markets_per_page: u32,
    pub chart_days: u32,
    pub chart_coins: Vec<String>,
    pub chart_dir: PathBuf,
    pub chart_width: u32,
    pub chart_height: u32,
    pub recently_viewed_limit: usize,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: CoinGeckoClient::DEFAULT_BASE_URL.to_string(),
            markets_per_page: 100,
            chart_days: 7,
            chart_coins: vec![
                "bitcoin".to_string(),
                "ethereum".to_string(),
                "litecoin".to_string(),
            ],
            chart_dir: std::env::temp_dir(),
            chart_width: 1024,
            chart_height: 768,
            recently_viewed_limit: 5,
            request_timeout: Duration::from_secs(15),
        }
    }
}

impl Config {
    /// Load from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` to resolve variable names. Unset or blank
    /// variables fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Config::default();

        if let Some(url) = get("COINGECKO_API_URL") {
            config.api_base_url = url;
        }
        if let Some(v) = get("MARKETS_PER_PAGE") {
            config.markets_per_page = parse_positive("MARKETS_PER_PAGE", &v)?;
        }
        if let Some(v) = get("CHART_DAYS") {
            config.chart_days = parse_positive("CHART_DAYS", &v)?;
        }
        if let Some(v) = get("CHART_COINS") {
            let coins: Vec<String> = v
                .split(',')
                .map(|c| c.trim().to_lowercase())
                .filter(|c| !c.is_empty())
                .collect();
            if coins.is_empty() {
                return Err(invalid("CHART_COINS", &v));
            }
            config.chart_coins = coins;
        }
        if let Some(v) = get("CHART_OUTPUT_DIR") {
            config.chart_dir = PathBuf::from(v);
        }
        if let Some(v) = get("CHART_WIDTH") {
            config.chart_width = parse_positive("CHART_WIDTH", &v)?;
        }
        if let Some(v) = get("CHART_HEIGHT") {
            config.chart_height = parse_positive("CHART_HEIGHT", &v)?;
        }
        if let Some(v) = get("RECENTLY_VIEWED_LIMIT") {
            config.recently_viewed_limit = parse_positive("RECENTLY_VIEWED_LIMIT", &v)?;
        }
        if let Some(v) = get("REQUEST_TIMEOUT_SECS") {
            config.request_timeout = Duration::from_secs(parse_positive("REQUEST_TIMEOUT_SECS", &v)?);
        }

        Ok(config)
    }
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::Invalid {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn parse_positive<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr + PartialOrd + Default,
{
    match value.parse::<T>() {
        Ok(n) if n > T::default() => Ok(n),
        _ => Err(invalid(key, value)),
    }
}
