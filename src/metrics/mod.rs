//! Prometheus metrics for the alert render service.
//!
//! This module provides metrics for monitoring the engine:
//! - Template render counts by output mode
//! - Device lookups performed by tag transforms, by outcome
//! - Aggregation calls and records walked
//! - Device directory size

mod helpers;

pub use helpers::{encode_metrics, AggregationMetrics, DeviceMetrics, RenderMetrics};

use lazy_static::lazy_static;
use prometheus::{
    register_int_counter, register_int_counter_vec, register_int_gauge, IntCounter,
    IntCounterVec, IntGauge,
};

/// Prefix for all metrics
const METRIC_PREFIX: &str = "alert_render";

lazy_static! {
    // ============================================================================
    // Template Metrics
    // ============================================================================

    /// Templates rendered, by output mode
    pub static ref TEMPLATES_RENDERED_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_templates_rendered_total", METRIC_PREFIX),
        "Total templates rendered",
        &["mode"]
    ).unwrap();

    /// Device lookups issued by tag transforms
    pub static ref TAG_LOOKUPS_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_tag_lookups_total", METRIC_PREFIX),
        "Device lookups performed by template tags",
        &["outcome"]
    ).unwrap();

    // ============================================================================
    // Aggregation Metrics
    // ============================================================================

    /// Aggregation calls
    pub static ref AGGREGATIONS_TOTAL: IntCounter = register_int_counter!(
        format!("{}_aggregations_total", METRIC_PREFIX),
        "Total field aggregations performed"
    ).unwrap();

    /// Records walked by the aggregator
    pub static ref RECORDS_AGGREGATED_TOTAL: IntCounter = register_int_counter!(
        format!("{}_records_aggregated_total", METRIC_PREFIX),
        "Total records walked by field aggregation"
    ).unwrap();

    // ============================================================================
    // Device Directory Metrics
    // ============================================================================

    /// Devices currently held in the directory
    pub static ref DEVICES_LOADED: IntGauge = register_int_gauge!(
        format!("{}_devices_loaded", METRIC_PREFIX),
        "Number of devices in the lookup directory"
    ).unwrap();
}
