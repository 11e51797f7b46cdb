use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One entry of GET /coins/markets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketCoin {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub current_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub market_cap_rank: Option<u32>,
    pub price_change_percentage_24h: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_7d_in_currency: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_30d_in_currency: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_1y_in_currency: Option<f64>,
}

/// Amount keyed by quote currency. Only USD is requested.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CurrencyAmounts {
    pub usd: Option<f64>,
}

/// `market_data` block of GET /coins/{id}
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketData {
    #[serde(default)]
    pub market_cap: CurrencyAmounts,
    #[serde(default)]
    pub total_volume: CurrencyAmounts,
    pub total_supply: Option<f64>,
    pub max_supply: Option<f64>,
    pub circulating_supply: Option<f64>,
}

/// Response from GET /coins/{id}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinResponse {
    pub id: String,
    pub name: String,
    pub market_data: Option<MarketData>,
}

/// Response from GET /coins/{id}/market_chart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketChartResponse {
    /// `[timestamp_ms, price]` pairs, validated by the sampler
    pub prices: Vec<Vec<serde_json::Value>>,
}

/// Error body, e.g. `{"error": "coin not found"}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: Option<String>,
}

/// Comprehensive error type for API operations
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// 400 Bad Request
    #[error("Bad Request: {0}")]
    BadRequest(String),
    /// 404 Not Found
    #[error("Not Found: {0}")]
    NotFound(String),
    /// 5xx Server Error
    #[error("Server Error ({0}): {1}")]
    ServerError(u16, String),
    /// Other HTTP errors
    #[error("HTTP Error ({0}): {1}")]
    HttpError(u16, String),
    /// Network/request error
    #[error("Request Error: {0}")]
    RequestError(String),
    /// Deserialization error
    #[error("Deserialization Error: {0}")]
    DeserializationError(String),
}
