use super::Session;
use crate::services::chart_service::{self, ChartRequest};
use crate::services::market_service;

/// Resolve a coin argument to an id and axis label, preferring the market
/// table's symbol for the label
fn chart_request(session: &Session, query: &str) -> ChartRequest {
    match market_service::find_coin(&session.state.markets, query) {
        Some(coin) => ChartRequest {
            id: coin.id.clone(),
            label: coin.symbol.to_uppercase(),
        },
        None => ChartRequest {
            id: query.to_lowercase(),
            label: query.to_uppercase(),
        },
    }
}

/// Coins to chart: the arguments, else the selected coin, else the trending set
fn chart_requests(session: &Session, args: &[&str]) -> Vec<ChartRequest> {
    if !args.is_empty() {
        return args.iter().map(|arg| chart_request(session, arg)).collect();
    }

    match &session.state.selected {
        Some(selected) => vec![chart_request(session, &selected.coin.id)],
        None => session
            .config
            .chart_coins
            .iter()
            .map(|id| chart_request(session, id))
            .collect(),
    }
}

/// Build the sampled price chart, print its points and save it as a PNG
pub async fn execute(session: &mut Session, args: &[&str]) -> Result<String, String> {
    let requests = chart_requests(session, args);
    let days = session.config.chart_days;

    tracing::info!(
        "🎨 Building {}d chart for {:?}",
        days,
        requests.iter().map(|r| r.id.as_str()).collect::<Vec<_>>()
    );

    let chart = chart_service::build_chart(&session.client, &requests, days)
        .await
        .map_err(|e| e.to_string())?;

    let mut output = chart_service::create_chart_table(&chart);

    let path = chart_service::chart_path(&session.config.chart_dir, &chart.title);
    match chart_service::render_chart(
        &chart,
        &path,
        session.config.chart_width,
        session.config.chart_height,
    ) {
        Ok(written) => output.push_str(&format!("Chart saved to {}\n", written.display())),
        Err(e) => {
            tracing::warn!("Chart image not written: {}", e);
            output.push_str(&format!("⚠️ Chart image not written: {}\n", e));
        }
    }

    Ok(output)
}
