//! Metrics collection and exposition.
//!
//! # Metrics
//! - `planner_http_requests_total` (counter): requests by method, status
//! - `planner_http_request_duration_seconds` (histogram): latency distribution
//! - `planner_spa_resolutions_total` (counter): client route lookups by outcome
//! - `planner_bookings_total` (counter): booking attempts by outcome
//!
//! # Design Decisions
//! - Recording is a no-op until an exporter is installed
//! - Labels stay low-cardinality (no paths, no ids)

use std::net::SocketAddr;
use std::time::Instant;

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(method: &str, status: u16, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("status", status.to_string()),
    ];
    counter!("planner_http_requests_total", &labels).increment(1);
    histogram!("planner_http_request_duration_seconds", &labels)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_spa_resolution(outcome: &'static str) {
    counter!("planner_spa_resolutions_total", "outcome" => outcome).increment(1);
}

pub fn record_booking(outcome: &'static str) {
    counter!("planner_bookings_total", "outcome" => outcome).increment(1);
}

/// Middleware recording count and latency of every request.
pub async fn track_requests(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let response = next.run(request).await;
    record_request(&method, response.status().as_u16(), start);
    response
}
