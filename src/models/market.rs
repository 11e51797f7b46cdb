//! Market table and coin detail models

/// One row of the market table
#[derive(Debug, Clone, PartialEq)]
pub struct CoinSummary {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub market_cap_rank: Option<u32>,
    pub current_price: Option<f64>,
    /// Percent changes over 24 hours, 7 days, 30 days and one year
    pub price_change_24h: Option<f64>,
    pub price_change_7d: Option<f64>,
    pub price_change_30d: Option<f64>,
    pub price_change_1y: Option<f64>,
    pub market_cap: Option<f64>,
}

/// Details shown for the selected coin
#[derive(Debug, Clone, PartialEq)]
pub struct CoinDetails {
    pub name: String,
    pub market_cap: Option<f64>,
    pub total_volume: Option<f64>,
    pub circulating_supply: Option<f64>,
    pub total_supply: Option<f64>,
    pub max_supply: Option<f64>,
}
