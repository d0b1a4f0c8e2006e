//! Metrics collection and exposition.
//!
//! # Metrics
//! - `json_server_requests_total` (counter): requests by method, status, path
//! - `json_server_request_duration_seconds` (histogram): handling latency
//!
//! Unmatched requests are labelled `path="none"` to bound cardinality.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener on `addr`.
///
/// Must run inside a tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one handled request.
pub fn record_request(method: &str, status: u16, path: &str, start_time: Instant) {
    metrics::counter!(
        "json_server_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string(),
        "path" => path.to_string()
    )
    .increment(1);
    metrics::histogram!(
        "json_server_request_duration_seconds",
        "method" => method.to_string(),
        "path" => path.to_string()
    )
    .record(start_time.elapsed().as_secs_f64());
}
