use tracing::info;

use crate::api::coingecko::{ApiError, CoinGeckoClient, MarketCoin};
use crate::config::Config;
use crate::models::CoinSummary;
use crate::utils::{format_percent, format_usd, Table};

impl From<MarketCoin> for CoinSummary {
    fn from(coin: MarketCoin) -> Self {
        CoinSummary {
            id: coin.id,
            symbol: coin.symbol,
            name: coin.name,
            market_cap_rank: coin.market_cap_rank,
            current_price: coin.current_price,
            price_change_24h: coin.price_change_percentage_24h,
            price_change_7d: coin.price_change_percentage_7d_in_currency,
            price_change_30d: coin.price_change_percentage_30d_in_currency,
            price_change_1y: coin.price_change_percentage_1y_in_currency,
            market_cap: coin.market_cap,
        }
    }
}

/// Fetch the first page of the market table
pub async fn fetch_markets(client: &CoinGeckoClient, config: &Config) -> Result<Vec<CoinSummary>, ApiError> {
    let markets = client.get_markets(config.markets_per_page, 1).await?;
    info!("📈 Loaded {} coins from the market", markets.len());
    Ok(markets.into_iter().map(CoinSummary::from).collect())
}

/// Coins whose name contains `term`, ignoring case. A blank term keeps all.
pub fn filter_by_name<'a>(markets: &'a [CoinSummary], term: &str) -> Vec<&'a CoinSummary> {
    let term = term.trim().to_lowercase();
    markets
        .iter()
        .filter(|coin| coin.name.to_lowercase().contains(&term))
        .collect()
}

/// Look up a coin by id, falling back to a case-insensitive name or symbol match
pub fn find_coin<'a>(markets: &'a [CoinSummary], query: &str) -> Option<&'a CoinSummary> {
    let query = query.trim();
    markets.iter().find(|coin| coin.id == query).or_else(|| {
        markets.iter().find(|coin| {
            coin.name.eq_ignore_ascii_case(query) || coin.symbol.eq_ignore_ascii_case(query)
        })
    })
}

/// Render the market table
pub fn create_market_view(coins: &[&CoinSummary]) -> String {
    let mut table = Table::new(vec![
        "#", "Id", "Token", "Last Price", "24H", "7D", "30D", "1Y", "Market Cap",
    ]);
    for coin in coins {
        table.add_row(vec![
            coin.market_cap_rank.map(|r| r.to_string()).unwrap_or_default(),
            coin.id.clone(),
            coin.name.clone(),
            format_usd(coin.current_price),
            format_percent(coin.price_change_24h),
            format_percent(coin.price_change_7d),
            format_percent(coin.price_change_30d),
            format_percent(coin.price_change_1y),
            format_usd(coin.market_cap),
        ]);
    }
    table.render()
}

/// Render a plain list of coin names (watchlist, recently viewed)
pub fn create_coin_list_view(title: &str, coins: &[CoinSummary]) -> String {
    if coins.is_empty() {
        return format!("{}: (empty)\n", title);
    }
    let mut output = format!("{}:\n", title);
    for coin in coins {
        output.push_str(&format!("  • {} ({})\n", coin.name, coin.id));
    }
    output
}
