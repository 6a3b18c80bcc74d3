//! Field aggregation over alert/event batches.
//!
//! Flattens heterogeneous event records into `"path:value"` occurrence
//! counts that drive the alert summary charts. Timestamps are never counted,
//! and below the top level only a fixed set of common network fields is.

mod counts;
mod walk;

pub use counts::FieldCounts;
pub use walk::{aggregate, AggregateScope, FieldAggregator, COMMON_FIELDS, DEFAULT_MAX_DEPTH};
