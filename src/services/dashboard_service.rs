//! Pure transitions of [`DashboardState`]. Every function takes the current
//! state by reference and returns the next one.

use crate::models::{CoinDetails, CoinSummary, DashboardState, SelectedCoin};
use crate::services::market_service;

pub fn with_markets(state: &DashboardState, markets: Vec<CoinSummary>) -> DashboardState {
    DashboardState {
        markets,
        ..state.clone()
    }
}

pub fn with_search_term(state: &DashboardState, term: &str) -> DashboardState {
    DashboardState {
        search_term: term.trim().to_string(),
        ..state.clone()
    }
}

/// Market rows passing the current search term
pub fn visible_markets(state: &DashboardState) -> Vec<&CoinSummary> {
    market_service::filter_by_name(&state.markets, &state.search_term)
}

/// Put `coin` at the front of the watchlist unless it is already there
pub fn add_to_watchlist(state: &DashboardState, coin: &CoinSummary) -> DashboardState {
    if state.watchlist.iter().any(|c| c.id == coin.id) {
        return state.clone();
    }

    let mut watchlist = Vec::with_capacity(state.watchlist.len() + 1);
    watchlist.push(coin.clone());
    watchlist.extend(state.watchlist.iter().cloned());

    DashboardState {
        watchlist,
        ..state.clone()
    }
}

/// Move `coin` to the front of the recently viewed list, keeping at most `limit`
pub fn record_view(state: &DashboardState, coin: &CoinSummary, limit: usize) -> DashboardState {
    let recently_viewed = std::iter::once(coin.clone())
        .chain(state.recently_viewed.iter().filter(|c| c.id != coin.id).cloned())
        .take(limit)
        .collect();

    DashboardState {
        recently_viewed,
        ..state.clone()
    }
}

/// Open the detail view for `coin` and record the view
pub fn select_coin(
    state: &DashboardState,
    coin: &CoinSummary,
    details: CoinDetails,
    recent_limit: usize,
) -> DashboardState {
    let viewed = record_view(state, coin, recent_limit);
    DashboardState {
        selected: Some(SelectedCoin {
            coin: coin.clone(),
            details,
        }),
        ..viewed
    }
}

/// Leave the detail view
pub fn clear_selection(state: &DashboardState) -> DashboardState {
    DashboardState {
        selected: None,
        ..state.clone()
    }
}
