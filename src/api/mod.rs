//! API layer - HTTP endpoint handlers organized by domain.

mod aggregate;
mod devices;
mod health;
mod metrics;
mod render;
mod routes;

// Re-export all handlers for use in server/app.rs
pub use aggregate::{aggregate_fields, AggregateRequest, AggregateResponse};
pub use devices::{delete_device, get_device, list_devices, put_device, DeviceListResponse};
pub use health::{health, HealthResponse};
pub use metrics::prometheus_metrics;
pub use render::{
    present_alerts, render_template, PresentAlertsRequest, PresentAlertsResponse, RenderRequest,
    RenderResponse,
};
pub use routes::{api_routes, device_routes};
