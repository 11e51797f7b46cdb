use super::Session;
use crate::services::{dashboard_service, market_service};

/// Add a coin from the market table to the watchlist
pub fn execute(session: &mut Session, args: &[&str]) -> Result<String, String> {
    if args.is_empty() {
        return Err("Usage: `watch <coin id or name>`".to_string());
    }

    let query = args.join(" ");
    let coin = market_service::find_coin(&session.state.markets, &query)
        .cloned()
        .ok_or_else(|| format!("Coin '{}' is not in the market table", query))?;

    if session.state.watchlist.iter().any(|c| c.id == coin.id) {
        return Ok(format!("{} is already on your watchlist.\n", coin.name));
    }

    session.state = dashboard_service::add_to_watchlist(&session.state, &coin);
    tracing::info!("⭐ Added {} to watchlist", coin.id);

    Ok(format!("Added {} to your watchlist.\n", coin.name))
}

pub fn execute_watchlist(session: &Session) -> String {
    market_service::create_coin_list_view("Watchlist", &session.state.watchlist)
}

pub fn execute_recent(session: &Session) -> String {
    market_service::create_coin_list_view("Recently Viewed", &session.state.recently_viewed)
}
