//! Data models for the dashboard commands and services
//!
//! This module organizes the result and state structs shared across commands.

pub mod chart;
pub mod dashboard;
pub mod market;

// Re-export commonly used types for convenience
pub use chart::{DisplaySeries, PriceChart, PricePoint};
pub use dashboard::{DashboardState, SelectedCoin};
pub use market::{CoinDetails, CoinSummary};
