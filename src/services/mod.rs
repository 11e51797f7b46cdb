pub mod chart_service;
pub mod dashboard_service;
pub mod detail_service;
pub mod market_service;
pub mod sampler_service;
