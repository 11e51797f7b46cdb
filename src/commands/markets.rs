use super::Session;
use crate::services::{dashboard_service, market_service};

/// Show the market table, filtered by the current search term
pub async fn execute(session: &mut Session, args: &[&str]) -> Result<String, String> {
    if args.first() == Some(&"help") {
        return Ok("Usage: markets\nShows the market table, filtered by the active search.\n".to_string());
    }

    if session.state.markets.is_empty() {
        execute_refresh(session).await?;
    }

    Ok(render_markets(session))
}

/// Refetch the market table
pub async fn execute_refresh(session: &mut Session) -> Result<String, String> {
    tracing::info!("🔄 Refreshing market table");

    let markets = market_service::fetch_markets(&session.client, &session.config)
        .await
        .map_err(|e| format!("Failed to load markets: {}", e))?;
    session.state = dashboard_service::with_markets(&session.state, markets);

    Ok(format!("Loaded {} coins.\n", session.state.markets.len()))
}

/// Set the search term and show the matching rows. No term clears the search.
pub async fn execute_search(session: &mut Session, args: &[&str]) -> Result<String, String> {
    let term = args.join(" ");
    session.state = dashboard_service::with_search_term(&session.state, &term);

    execute(session, &[]).await
}

fn render_markets(session: &Session) -> String {
    let visible = dashboard_service::visible_markets(&session.state);

    let mut output = String::from("Trending Market\n");
    if !session.state.search_term.is_empty() {
        output.push_str(&format!(
            "search: \"{}\" ({} of {})\n",
            session.state.search_term,
            visible.len(),
            session.state.markets.len()
        ));
    }
    output.push_str(&market_service::create_market_view(&visible));
    output
}
