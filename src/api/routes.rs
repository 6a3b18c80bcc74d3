use axum::{
    routing::{get, post},
    Router,
};

use crate::server::AppState;

use super::aggregate::aggregate_fields;
use super::devices::{delete_device, get_device, list_devices, put_device};
use super::health::health;
use super::metrics::prometheus_metrics;
use super::render::{present_alerts, render_template};

pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health & Metrics
        .route("/health", get(health))
        .route("/metrics", get(prometheus_metrics))
        // Engine endpoints
        .nest(
            "/api/v1",
            Router::new()
                .route("/render", post(render_template))
                .route("/alerts/present", post(present_alerts))
                .route("/aggregate", post(aggregate_fields)),
        )
}

/// Device directory routes, nested under `/api/v1/devices`
pub fn device_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_devices))
        .route(
            "/{mac}",
            get(get_device).put(put_device).delete(delete_device),
        )
}
