//! Template rendering and alert presentation endpoints.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::alert::{present_all, AlertRecord, AlertView};
use crate::server::AppState;
use crate::template::{render, RenderMode, Rendered, TemplateRenderer};

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    /// Template with `{{path}}` / `{{path#tag}}` placeholders
    #[serde(default)]
    pub template: Option<String>,

    /// Event record the placeholders resolve against
    #[serde(default)]
    pub event: Option<serde_json::Value>,

    /// Return typed segments instead of a string
    #[serde(default)]
    pub structured: bool,
}

#[derive(Debug, Serialize)]
pub struct RenderResponse {
    /// `null` when no template was given
    pub output: Option<Rendered>,
}

/// POST /api/v1/render - Expand one template against one event
#[tracing::instrument(
    name = "http.render_template",
    skip(state, request),
    fields(structured = request.structured)
)]
pub async fn render_template(
    State(state): State<AppState>,
    Json(request): Json<RenderRequest>,
) -> Json<RenderResponse> {
    let output = render(
        Some(state.devices.as_ref()),
        request.template.as_deref(),
        request.event.as_ref(),
        RenderMode::from_structured(request.structured),
    );

    Json(RenderResponse { output })
}

#[derive(Debug, Deserialize)]
pub struct PresentAlertsRequest {
    pub alerts: Vec<AlertRecord>,

    #[serde(default)]
    pub structured: bool,
}

#[derive(Debug, Serialize)]
pub struct PresentAlertsResponse {
    pub alerts: Vec<AlertView>,
    pub total: usize,
}

/// POST /api/v1/alerts/present - Render a batch of stored alerts for display
#[tracing::instrument(
    name = "http.present_alerts",
    skip(state, request),
    fields(alerts = request.alerts.len())
)]
pub async fn present_alerts(
    State(state): State<AppState>,
    Json(request): Json<PresentAlertsRequest>,
) -> Json<PresentAlertsResponse> {
    let renderer = TemplateRenderer::new(state.devices.as_ref());
    let alerts = present_all(
        &renderer,
        &request.alerts,
        RenderMode::from_structured(request.structured),
    );
    let total = alerts.len();

    Json(PresentAlertsResponse { alerts, total })
}
