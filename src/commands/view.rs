use super::Session;
use crate::services::{dashboard_service, detail_service, market_service};

/// Open the detail view for a coin from the market table. Without arguments
/// the current selection is shown again.
pub async fn execute(session: &mut Session, args: &[&str]) -> Result<String, String> {
    if args.is_empty() {
        return match &session.state.selected {
            Some(selected) => Ok(detail_service::create_details_view(&selected.details)),
            None => Err("Usage: `view <coin id or name>`".to_string()),
        };
    }

    let query = args.join(" ");
    let coin = market_service::find_coin(&session.state.markets, &query)
        .cloned()
        .ok_or_else(|| format!("Coin '{}' is not in the market table", query))?;

    tracing::info!("🔎 Viewing {}", coin.id);

    let details = detail_service::fetch_details(&session.client, &coin.id)
        .await
        .map_err(|e| format!("Failed to load details for {}: {}", coin.name, e))?;

    let view = detail_service::create_details_view(&details);
    session.state = dashboard_service::select_coin(
        &session.state,
        &coin,
        details,
        session.config.recently_viewed_limit,
    );

    Ok(format!(
        "{}\nUse `chart` to plot {}, `back` to return.\n",
        view, coin.name
    ))
}

/// Leave the detail view
pub fn execute_back(session: &mut Session) -> String {
    let Some(name) = session.state.selected.as_ref().map(|s| s.coin.name.clone()) else {
        return "Nothing selected.\n".to_string();
    };

    session.state = dashboard_service::clear_selection(&session.state);
    format!("Closed {}.\n", name)
}
