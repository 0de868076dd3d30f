//! Prometheus metrics for the presence server

use metrics::{counter, describe_counter, describe_gauge, gauge};

/// Initialize all metric descriptions
pub fn init_metrics() {
    describe_counter!("presence_status_reads_total", "Total number of status reads");
    describe_counter!("presence_status_changes_total", "Total number of successful status changes");
    describe_counter!("presence_errors_total", "Total number of error responses by type");
    describe_gauge!("presence_status_updated_at_seconds", "Unix timestamp of the last status change");
}

/// Record a read of `/api/status`
pub fn record_status_read() {
    counter!("presence_status_reads_total").increment(1);
}

/// Record a successful status change
pub fn record_status_change(status: &str, updated_at: i64) {
    counter!("presence_status_changes_total", "status" => status.to_string()).increment(1);
    gauge!("presence_status_updated_at_seconds").set(updated_at as f64);
}

/// Record an error response
pub fn record_error(error_type: &str) {
    counter!("presence_errors_total", "type" => error_type.to_string()).increment(1);
}

/// Storage for Prometheus handle
static PROMETHEUS_HANDLE: std::sync::OnceLock<metrics_exporter_prometheus::PrometheusHandle> =
    std::sync::OnceLock::new();

/// Install the Prometheus recorder
pub fn init_prometheus() -> anyhow::Result<()> {
    let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
    let handle = builder.install_recorder()?;
    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| anyhow::anyhow!("Failed to set Prometheus handle"))?;
    Ok(())
}

/// Render metrics in the Prometheus text format
pub fn get_prometheus_metrics() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Prometheus metrics not initialized\n".to_string())
}
