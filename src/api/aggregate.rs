//! Field aggregation endpoint.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::aggregate::{AggregateScope, FieldCounts};
use crate::server::AppState;

#[derive(Debug, Deserialize)]
pub struct AggregateRequest {
    /// Event-like records; non-object entries are ignored
    pub records: Vec<serde_json::Value>,

    /// Walk each record's `Event` sub-object instead of the record
    #[serde(default)]
    pub use_event_field: bool,
}

#[derive(Debug, Serialize)]
pub struct AggregateResponse {
    /// `"path:value"` -> occurrence count
    pub counts: FieldCounts,
    /// Number of distinct keys
    pub keys: usize,
    /// Sum of all counts
    pub total: u64,
}

/// POST /api/v1/aggregate - Count field/value occurrences across records
#[tracing::instrument(
    name = "http.aggregate_fields",
    skip(state, request),
    fields(records = request.records.len(), use_event_field = request.use_event_field)
)]
pub async fn aggregate_fields(
    State(state): State<AppState>,
    Json(request): Json<AggregateRequest>,
) -> Json<AggregateResponse> {
    let scope = AggregateScope::from_event_field(request.use_event_field);
    let counts = state.aggregator.aggregate(&request.records, scope);

    Json(AggregateResponse {
        keys: counts.len(),
        total: counts.total(),
        counts,
    })
}
