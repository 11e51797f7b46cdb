use std::time::Duration;

use reqwest::Client as HttpClient;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::models::{ApiError, CoinResponse, ErrorResponse, MarketChartResponse, MarketCoin};

/// The only quote currency the dashboard asks for
pub const VS_CURRENCY: &str = "usd";

/// CoinGecko public REST API client
#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    http_client: HttpClient,
    base_url: String,
}

impl CoinGeckoClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.coingecko.com/api/v3";

    /// Create a new client. `base_url` is normally [`Self::DEFAULT_BASE_URL`].
    pub fn with_base_url(base_url: String, timeout: Duration) -> Result<Self, ApiError> {
        let http_client = HttpClient::builder()
            .default_headers(Self::create_headers())
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::RequestError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn create_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("crypto-era/", env!("CARGO_PKG_VERSION"))),
        );
        headers
    }

    /// Coin ids are lowercase slugs like `bitcoin` or `usd-coin`
    fn check_coin_id(id: &str) -> Result<(), ApiError> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '_' | '.'));
        if valid {
            Ok(())
        } else {
            Err(ApiError::BadRequest(format!("Invalid coin id '{}'", id)))
        }
    }

    /// Parse error response based on HTTP status code
    async fn handle_error_response(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> ApiError {
        let status_code = status.as_u16();
        let body_text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&body_text)
            .ok()
            .and_then(|e| e.error)
            .unwrap_or(body_text);

        match status_code {
            400 => ApiError::BadRequest(message),
            404 => ApiError::NotFound(message),
            500..=599 => {
                warn!("Server error {}: {}", status_code, message);
                ApiError::ServerError(status_code, message)
            }
            _ => ApiError::HttpError(status_code, message),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {} {:?}", url, query);

        let response = self
            .http_client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::handle_error_response(status, response).await);
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))
    }

    /// GET /coins/markets
    ///
    /// Market snapshots ordered by market cap, with 7d/30d/1y change columns.
    pub async fn get_markets(&self, per_page: u32, page: u32) -> Result<Vec<MarketCoin>, ApiError> {
        self.get_json(
            "/coins/markets",
            &[
                ("vs_currency", VS_CURRENCY.to_string()),
                ("order", "market_cap_desc".to_string()),
                ("per_page", per_page.to_string()),
                ("page", page.to_string()),
                ("sparkline", "false".to_string()),
                ("price_change_percentage", "7d,30d,1y".to_string()),
            ],
        )
        .await
    }

    /// GET /coins/{id}
    pub async fn get_coin(&self, id: &str) -> Result<CoinResponse, ApiError> {
        Self::check_coin_id(id)?;
        self.get_json(&format!("/coins/{}", id), &[]).await
    }

    /// GET /coins/{id}/market_chart
    ///
    /// Historical prices over the last `days` days.
    pub async fn get_market_chart(&self, id: &str, days: u32) -> Result<MarketChartResponse, ApiError> {
        Self::check_coin_id(id)?;
        self.get_json(
            &format!("/coins/{}/market_chart", id),
            &[
                ("vs_currency", VS_CURRENCY.to_string()),
                ("days", days.to_string()),
            ],
        )
        .await
    }
}
