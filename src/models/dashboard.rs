//! Session state of the dashboard

use super::market::{CoinDetails, CoinSummary};

/// The coin currently open in the detail view
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedCoin {
    pub coin: CoinSummary,
    pub details: CoinDetails,
}

/// Everything the dashboard remembers during a session. Updated by
/// replacing it with the value returned from `dashboard_service`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    pub markets: Vec<CoinSummary>,
    pub search_term: String,
    /// Newest first
    pub watchlist: Vec<CoinSummary>,
    /// Newest first
    pub recently_viewed: Vec<CoinSummary>,
    pub selected: Option<SelectedCoin>,
}
