//! Metrics helper structs for convenient metric recording

use prometheus::{Encoder, TextEncoder};

use super::{
    AGGREGATIONS_TOTAL, DEVICES_LOADED, RECORDS_AGGREGATED_TOTAL, TAG_LOOKUPS_TOTAL,
    TEMPLATES_RENDERED_TOTAL,
};
use crate::template::RenderMode;

/// Encode all metrics to Prometheus text format
pub fn encode_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer).unwrap_or_default())
}

/// Helper struct for recording template metrics
pub struct RenderMetrics;

impl RenderMetrics {
    /// Record a completed render
    pub fn record_render(mode: RenderMode) {
        TEMPLATES_RENDERED_TOTAL
            .with_label_values(&[mode.as_str()])
            .inc();
    }

    /// Record a device lookup that found a device
    pub fn record_lookup_hit() {
        TAG_LOOKUPS_TOTAL.with_label_values(&["hit"]).inc();
    }

    /// Record a device lookup that found nothing
    pub fn record_lookup_miss() {
        TAG_LOOKUPS_TOTAL.with_label_values(&["miss"]).inc();
    }

    /// Record a tag rendered without a lookup context
    pub fn record_no_context() {
        TAG_LOOKUPS_TOTAL.with_label_values(&["no_context"]).inc();
    }
}

/// Helper struct for recording aggregation metrics
pub struct AggregationMetrics;

impl AggregationMetrics {
    /// Record one aggregation over `records` input records
    pub fn record_aggregation(records: usize) {
        AGGREGATIONS_TOTAL.inc();
        RECORDS_AGGREGATED_TOTAL.inc_by(records as u64);
    }
}

/// Helper struct for device directory metrics
pub struct DeviceMetrics;

impl DeviceMetrics {
    /// Set the current directory size
    pub fn set_loaded(count: usize) {
        DEVICES_LOADED.set(count as i64);
    }
}
