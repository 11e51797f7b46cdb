use tracing::debug;

use crate::api::coingecko::{ApiError, CoinGeckoClient, CoinResponse};
use crate::models::CoinDetails;
use crate::utils::{format_amount, format_usd};

impl From<CoinResponse> for CoinDetails {
    fn from(coin: CoinResponse) -> Self {
        let market_data = coin.market_data.unwrap_or_default();
        CoinDetails {
            name: coin.name,
            market_cap: market_data.market_cap.usd,
            total_volume: market_data.total_volume.usd,
            circulating_supply: market_data.circulating_supply,
            total_supply: market_data.total_supply,
            max_supply: market_data.max_supply,
        }
    }
}

/// Fetch details for the coin detail view
pub async fn fetch_details(client: &CoinGeckoClient, id: &str) -> Result<CoinDetails, ApiError> {
    let coin = client.get_coin(id).await?;
    debug!("Fetched details for {}", coin.id);
    Ok(CoinDetails::from(coin))
}

pub fn create_details_view(details: &CoinDetails) -> String {
    format!(
        "{}\n  Market Cap:          {}\n  24h Trading Volume:  {}\n  Circulating Supply:  {}\n  Total Supply:        {}\n  Max Supply:          {}\n",
        details.name,
        format_usd(details.market_cap),
        format_usd(details.total_volume),
        format_amount(details.circulating_supply),
        format_amount(details.total_supply),
        format_amount(details.max_supply),
    )
}
