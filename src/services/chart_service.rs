use std::path::{Path, PathBuf};

use chrono::Utc;
use plotters::prelude::*;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::api::coingecko::{ApiError, CoinGeckoClient};
use crate::models::{DisplaySeries, PriceChart, PricePoint};
use crate::services::sampler_service::{self, SamplerError};
use crate::utils::{format_usd, Table};

/// Line colors, assigned to series in order
const SERIES_COLORS: [RGBColor; 3] = [
    RGBColor(255, 99, 132),
    RGBColor(54, 162, 235),
    RGBColor(75, 192, 192),
];

/// Chart errors
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("No coins requested for the chart")]
    NoCoins,
    #[error("{coin}: {source}")]
    Api { coin: String, source: ApiError },
    #[error("{coin}: {source}")]
    Sampler { coin: String, source: SamplerError },
    #[error("Not enough price data for {0} ({1} point(s) found, need at least 2)")]
    NotEnoughData(String, usize),
    #[error("Chart task failed: {0}")]
    Task(String),
    #[error("Failed to render chart: {0}")]
    Render(String),
    #[error("Failed to write chart: {0}")]
    Io(#[from] std::io::Error),
}

/// One coin to put on a chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRequest {
    pub id: String,
    pub label: String,
}

fn render_err<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Render(e.to_string())
}

/// Fetch one coin's history and sample it for display
pub async fn fetch_display_series(
    client: &CoinGeckoClient,
    request: &ChartRequest,
    days: u32,
) -> Result<DisplaySeries, ChartError> {
    let history = client
        .get_market_chart(&request.id, days)
        .await
        .map_err(|source| ChartError::Api {
            coin: request.id.clone(),
            source,
        })?;

    debug!("{}: {} raw price samples", request.id, history.prices.len());

    sampler_service::sample_for_display(&request.label, &history.prices).map_err(|source| {
        ChartError::Sampler {
            coin: request.id.clone(),
            source,
        }
    })
}

/// X axis label for a sample, e.g. `03/14 09:00` (UTC)
pub fn point_label(point: &PricePoint) -> String {
    point
        .datetime()
        .map(|dt| dt.format("%m/%d %H:%M").to_string())
        .unwrap_or_default()
}

/// Fetch every requested coin concurrently and assemble the chart.
/// X labels come from the first series.
pub async fn build_chart(
    client: &CoinGeckoClient,
    requests: &[ChartRequest],
    days: u32,
) -> Result<PriceChart, ChartError> {
    if requests.is_empty() {
        return Err(ChartError::NoCoins);
    }

    let mut tasks = JoinSet::new();
    for (index, request) in requests.iter().cloned().enumerate() {
        let client = client.clone();
        tasks.spawn(async move {
            let series = fetch_display_series(&client, &request, days).await;
            (index, series)
        });
    }

    let mut slots: Vec<Option<DisplaySeries>> = vec![None; requests.len()];
    while let Some(joined) = tasks.join_next().await {
        let (index, series) = joined.map_err(|e| ChartError::Task(e.to_string()))?;
        slots[index] = Some(series?);
    }
    let series: Vec<DisplaySeries> = slots.into_iter().flatten().collect();

    let labels = series[0].points.iter().map(point_label).collect();
    let title = match series.as_slice() {
        [single] => format!("{} Price (last {}d)", single.label, days),
        _ => format!("Trending Market (last {}d)", days),
    };

    info!("📊 Built chart '{}' with {} series", title, series.len());

    Ok(PriceChart {
        title,
        labels,
        series,
    })
}

/// Where to write a chart image
pub fn chart_path(dir: &Path, name: &str) -> PathBuf {
    let slug: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    dir.join(format!("crypto_era_{}_{}.png", slug, Utc::now().timestamp_millis()))
}

/// y range with 10% padding, kept open when every price is equal
fn price_range(points: &[PricePoint]) -> (f64, f64) {
    let min_price = points.iter().map(|p| p.price).fold(f64::INFINITY, f64::min);
    let max_price = points.iter().map(|p| p.price).fold(f64::NEG_INFINITY, f64::max);

    let padding = ((max_price - min_price) * 0.1)
        .max(max_price.abs() * 0.01)
        .max(1e-8);
    ((min_price - padding).max(0.0), max_price + padding)
}

fn label_at(labels: &[String], x: f64) -> String {
    let index = x.round();
    if (x - index).abs() > 1e-6 || index < 0.0 {
        return String::new();
    }
    labels.get(index as usize).cloned().unwrap_or_default()
}

/// Draw the chart as a PNG at `path`: one panel per series, each with its
/// own dollar axis.
pub fn render_chart(chart: &PriceChart, path: &Path, width: u32, height: u32) -> Result<PathBuf, ChartError> {
    if chart.series.is_empty() {
        return Err(ChartError::NoCoins);
    }
    if let Some(short) = chart.series.iter().find(|s| s.points.len() < 2) {
        return Err(ChartError::NotEnoughData(short.label.clone(), short.points.len()));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    {
        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;
        let root = root
            .titled(&chart.title, ("sans-serif", 30).into_font())
            .map_err(render_err)?;
        let panels = root.split_evenly((chart.series.len(), 1));

        for (i, (series, panel)) in chart.series.iter().zip(panels.iter()).enumerate() {
            let color = SERIES_COLORS[i % SERIES_COLORS.len()];
            let (y_min, y_max) = price_range(&series.points);
            let x_max = (series.points.len() - 1) as f64;

            let mut plot = ChartBuilder::on(panel)
                .caption(&series.label, ("sans-serif", 20).into_font())
                .margin(10)
                .x_label_area_size(30)
                .y_label_area_size(90)
                .build_cartesian_2d(0f64..x_max, y_min..y_max)
                .map_err(render_err)?;

            plot.configure_mesh()
                .x_labels(series.points.len())
                .x_label_formatter(&|x: &f64| label_at(&chart.labels, *x))
                .y_label_formatter(&|y: &f64| format!("${:.2}", y))
                .draw()
                .map_err(render_err)?;

            let coords: Vec<(f64, f64)> = series
                .points
                .iter()
                .enumerate()
                .map(|(x, p)| (x as f64, p.price))
                .collect();

            plot.draw_series(LineSeries::new(coords.iter().copied(), color.stroke_width(2)))
                .map_err(render_err)?;
            plot.draw_series(coords.iter().map(|&c| Circle::new(c, 3, color.filled())))
                .map_err(render_err)?;
        }

        root.present().map_err(render_err)?;
    }

    info!("🖼️ Chart written to {}", path.display());
    Ok(path.to_path_buf())
}

/// Text rendering of the sampled points, one row per x label
pub fn create_chart_table(chart: &PriceChart) -> String {
    let mut headers = vec!["Time"];
    headers.extend(chart.series.iter().map(|s| s.label.as_str()));
    let mut table = Table::new(headers);

    let rows = chart.series.iter().map(|s| s.points.len()).max().unwrap_or(0);
    for i in 0..rows {
        let mut row = vec![chart.labels.get(i).cloned().unwrap_or_default()];
        row.extend(
            chart
                .series
                .iter()
                .map(|s| format_usd(s.points.get(i).map(|p| p.price))),
        );
        table.add_row(row);
    }

    let mut output = format!("{}\n", chart.title);
    output.push_str(&table.render());
    for series in chart.series.iter().filter(|s| s.is_short()) {
        output.push_str(&format!(
            "note: {} has only {} hourly sample(s), showing {}\n",
            series.label,
            series.hourly_len,
            series.points.len()
        ));
    }
    output
}
