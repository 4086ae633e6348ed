//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_requests_total` (counter): requests by mode (leaf/chain) and status
//! - `relay_sessions_created_total` (counter): sessions minted
//! - `relay_sessions_active` (gauge): sessions held by the store
//! - `relay_downstream_duration_seconds` (histogram): next-hop latency by outcome
//!
//! Without an installed recorder every call here is a no-op.

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus recorder and its scrape endpoint.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint started");
    Ok(())
}

/// Record a finished relay request.
pub fn record_request(mode: &'static str, status: u16) {
    metrics::counter!(
        "relay_requests_total",
        "mode" => mode,
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record a newly created session and the resulting store size.
pub fn record_session_created(store_len: usize) {
    metrics::counter!("relay_sessions_created_total").increment(1);
    metrics::gauge!("relay_sessions_active").set(store_len as f64);
}

/// Record the latency of a downstream call.
pub fn record_downstream(outcome: &'static str, started: Instant) {
    metrics::histogram!("relay_downstream_duration_seconds", "outcome" => outcome)
        .record(started.elapsed().as_secs_f64());
}
