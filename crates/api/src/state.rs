use std::sync::Arc;

use crate::metrics::HttpMetrics;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: devboard_db::DbPool,
    /// Per-route request counters and latency histograms.
    pub metrics: Arc<HttpMetrics>,
}

impl AppState {
    pub fn new(pool: devboard_db::DbPool) -> Self {
        Self {
            pool,
            metrics: Arc::new(HttpMetrics::new()),
        }
    }
}
