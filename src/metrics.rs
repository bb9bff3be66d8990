//! Prometheus metrics for record activity and request latency.

use std::time::Instant;

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::debug;

use crate::store::LogKind;

// === Metric Name Constants ===

/// Records appended counter metric name.
pub const METRIC_RECORDS_APPENDED: &str = "records_appended_total";
/// Current log size gauge metric name.
pub const METRIC_RECORD_LOG_SIZE: &str = "record_log_size";
/// Rejected request bodies counter metric name.
pub const METRIC_BODY_REJECTIONS: &str = "body_rejections_total";
/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";

/// Initialize all metric descriptions.
/// Call this once at startup, after a recorder is installed.
pub fn init_metrics() {
    describe_counter!(
        METRIC_RECORDS_APPENDED,
        "Total number of records appended, by log"
    );
    describe_gauge!(
        METRIC_RECORD_LOG_SIZE,
        "Number of records currently held, by log"
    );
    describe_counter!(
        METRIC_BODY_REJECTIONS,
        "Total number of POST bodies rejected as invalid JSON, by log"
    );
    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP request handling latency in milliseconds"
    );

    debug!("Metrics initialized");
}

/// Install the global Prometheus recorder and return its render handle.
pub fn install_recorder() -> Result<PrometheusHandle, metrics_exporter_prometheus::BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    init_metrics();
    Ok(handle)
}

/// Record a successful append and the resulting log size.
pub fn record_append(kind: LogKind, len: usize) {
    counter!(METRIC_RECORDS_APPENDED, "log" => kind.to_string()).increment(1);
    gauge!(METRIC_RECORD_LOG_SIZE, "log" => kind.to_string()).set(len as f64);
}

/// Increment the rejected-body counter.
pub fn inc_body_rejections(kind: LogKind) {
    counter!(METRIC_BODY_REJECTIONS, "log" => kind.to_string()).increment(1);
}

/// Record HTTP request latency.
pub fn record_http_latency(start: Instant, endpoint: &'static str) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_HTTP_REQUEST_LATENCY, "endpoint" => endpoint).record(latency_ms);
}

/// RAII guard that records request latency for an endpoint when dropped.
pub struct LatencyTimer {
    start: Instant,
    endpoint: &'static str,
}

impl LatencyTimer {
    /// Start timing `endpoint`.
    pub fn new(endpoint: &'static str) -> Self {
        Self {
            start: Instant::now(),
            endpoint,
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        record_http_latency(self.start, self.endpoint);
    }
}
