//! Alert presentation through the template renderer

use super::types::{AlertRecord, AlertView, STATE_RESOLVED};
use crate::template::{is_truthy, RenderMode, Rendered, TemplateRenderer};

/// Title used when neither the template nor the topic yields anything
const DEFAULT_TITLE: &str = "Alert";

/// Render an alert's title and body against its event
pub fn present(renderer: &TemplateRenderer<'_>, alert: &AlertRecord, mode: RenderMode) -> AlertView {
    let has_event = is_truthy(&alert.event);

    let title = alert
        .title
        .as_deref()
        .filter(|_| has_event)
        .and_then(|title| renderer.render(Some(title), Some(&alert.event), mode))
        .filter(|rendered| !rendered.is_blank())
        .unwrap_or_else(|| fallback_title(alert));

    let body = renderer.render(alert.body.as_deref(), Some(&alert.event), mode);

    AlertView {
        title,
        body,
        topic: alert.topic.clone(),
        severity: severity(&alert.notification_type),
        resolved: alert.state == STATE_RESOLVED,
        timestamp: alert.timestamp.or(alert.time),
        rule_id: alert.rule_id.clone(),
    }
}

/// Present a batch of alerts in order
pub fn present_all(
    renderer: &TemplateRenderer<'_>,
    alerts: &[AlertRecord],
    mode: RenderMode,
) -> Vec<AlertView> {
    alerts
        .iter()
        .map(|alert| present(renderer, alert, mode))
        .collect()
}

fn fallback_title(alert: &AlertRecord) -> Rendered {
    if alert.topic.is_empty() {
        Rendered::Text(DEFAULT_TITLE.to_string())
    } else {
        Rendered::Text(alert.topic.clone())
    }
}

fn severity(notification_type: &str) -> String {
    match notification_type {
        "" => "muted".to_string(),
        other => other.replace("danger", "warning"),
    }
}
