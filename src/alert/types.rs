//! Stored alert and presentation types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::template::Rendered;

/// State value marking an alert as handled
pub const STATE_RESOLVED: &str = "Resolved";

/// An alert as stored by the router's alert rules
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlertRecord {
    /// Topic the rule matched, e.g. `wifi:auth:fail`
    #[serde(rename = "Topic", default)]
    pub topic: String,

    /// Title template from the rule action
    #[serde(rename = "Title", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Body template from the rule action
    #[serde(rename = "Body", default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    /// Event that triggered the alert
    #[serde(rename = "Event", default)]
    pub event: serde_json::Value,

    /// `info`, `warning`, `danger`, `error`, ...
    #[serde(rename = "NotificationType", default)]
    pub notification_type: String,

    #[serde(rename = "RuleId", default)]
    pub rule_id: String,

    /// Triage state: empty, `Triaged` or `Resolved`
    #[serde(rename = "State", default)]
    pub state: String,

    #[serde(
        rename = "Timestamp",
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<DateTime<Utc>>,

    /// Storage time, set when the alert was written to its bucket
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub time: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Unparseable timestamps are dropped rather than rejecting the alert
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::String(s)) => DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok(),
        _ => None,
    })
}

/// An alert ready for the list view
#[derive(Debug, Clone, Serialize)]
pub struct AlertView {
    pub title: Rendered,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Rendered>,

    pub topic: String,

    /// Display severity, `danger` folded into `warning`, `muted` when unset
    pub severity: String,

    pub resolved: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub rule_id: String,
}
