//! In-process HTTP metrics rendered in the Prometheus text exposition format.
//!
//! Every request passes through [`track_metrics`], which records a request
//! counter keyed by method, matched route and status, and a latency
//! histogram keyed by method and matched route. `GET /metrics` renders the
//! registry with [`HttpMetrics::render`].

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use axum::extract::{MatchedPath, Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::state::AppState;

/// Content type for the text exposition format.
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Route label for requests that matched no route.
pub const UNMATCHED_PATH: &str = "unmatched";

/// Latency histogram upper bounds, in seconds.
const DURATION_BUCKETS: [f64; 11] = [
    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

#[derive(Debug, Default)]
struct Histogram {
    buckets: [u64; DURATION_BUCKETS.len()],
    sum_seconds: f64,
    count: u64,
}

impl Histogram {
    fn observe(&mut self, seconds: f64) {
        for (bucket, bound) in self.buckets.iter_mut().zip(DURATION_BUCKETS) {
            if seconds <= bound {
                *bucket += 1;
            }
        }
        self.sum_seconds += seconds;
        self.count += 1;
    }
}

#[derive(Debug, Default)]
struct Registry {
    /// (method, path, status) -> count
    requests: BTreeMap<(String, String, u16), u64>,
    /// (method, path) -> latency histogram
    durations: BTreeMap<(String, String), Histogram>,
}

/// Request counters and latency histograms for the HTTP layer.
#[derive(Debug, Default)]
pub struct HttpMetrics {
    registry: Mutex<Registry>,
}

impl HttpMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one finished request.
    pub fn record(&self, method: &str, path: &str, status: u16, elapsed: Duration) {
        let mut registry = self
            .registry
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        *registry
            .requests
            .entry((method.to_string(), path.to_string(), status))
            .or_default() += 1;

        registry
            .durations
            .entry((method.to_string(), path.to_string()))
            .or_default()
            .observe(elapsed.as_secs_f64());
    }

    /// Total requests recorded for a method, route and status.
    pub fn request_count(&self, method: &str, path: &str, status: u16) -> u64 {
        let registry = self
            .registry
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        registry
            .requests
            .get(&(method.to_string(), path.to_string(), status))
            .copied()
            .unwrap_or(0)
    }

    /// Render the HTTP request series.
    pub fn render(&self) -> String {
        let registry = self
            .registry
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut body = String::new();

        body.push_str("# HELP devboard_http_requests_total Total HTTP requests handled.\n");
        body.push_str("# TYPE devboard_http_requests_total counter\n");
        for ((method, path, status), count) in &registry.requests {
            let _ = writeln!(
                body,
                "devboard_http_requests_total{{method=\"{}\",path=\"{}\",status=\"{status}\"}} {count}",
                escape_label(method),
                escape_label(path),
            );
        }

        body.push_str(
            "# HELP devboard_http_request_duration_seconds HTTP request latency in seconds.\n",
        );
        body.push_str("# TYPE devboard_http_request_duration_seconds histogram\n");
        for ((method, path), histogram) in &registry.durations {
            let labels = format!(
                "method=\"{}\",path=\"{}\"",
                escape_label(method),
                escape_label(path)
            );
            for (bound, count) in DURATION_BUCKETS.iter().zip(histogram.buckets) {
                let _ = writeln!(
                    body,
                    "devboard_http_request_duration_seconds_bucket{{{labels},le=\"{bound}\"}} {count}"
                );
            }
            let _ = writeln!(
                body,
                "devboard_http_request_duration_seconds_bucket{{{labels},le=\"+Inf\"}} {}",
                histogram.count
            );
            let _ = writeln!(
                body,
                "devboard_http_request_duration_seconds_sum{{{labels}}} {:.9}",
                histogram.sum_seconds
            );
            let _ = writeln!(
                body,
                "devboard_http_request_duration_seconds_count{{{labels}}} {}",
                histogram.count
            );
        }

        body
    }
}

/// Render the pool gauges and build info.
pub fn render_process_gauges(pool: &devboard_db::DbPool) -> String {
    let mut body = String::new();
    body.push_str("# HELP devboard_db_pool_connections Open database connections.\n");
    body.push_str("# TYPE devboard_db_pool_connections gauge\n");
    let _ = writeln!(body, "devboard_db_pool_connections {}", pool.size());
    body.push_str("# HELP devboard_db_pool_idle_connections Idle database connections.\n");
    body.push_str("# TYPE devboard_db_pool_idle_connections gauge\n");
    let _ = writeln!(body, "devboard_db_pool_idle_connections {}", pool.num_idle());
    body.push_str("# HELP devboard_build_info Build information.\n");
    body.push_str("# TYPE devboard_build_info gauge\n");
    let _ = writeln!(
        body,
        "devboard_build_info{{version=\"{}\"}} 1",
        env!("CARGO_PKG_VERSION")
    );
    body
}

/// Middleware recording every request into [`AppState::metrics`].
pub async fn track_metrics(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let started = Instant::now();
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| UNMATCHED_PATH.to_owned());

    let response = next.run(request).await;

    state
        .metrics
        .record(&method, &path, response.status().as_u16(), started.elapsed());
    response
}

fn escape_label(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}
