//! Recursive field walk over event records

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::counts::FieldCounts;
use crate::metrics::AggregationMetrics;
use crate::template::display_value;

/// Fields counted at any nesting depth; below the top level everything else
/// is ignored
pub const COMMON_FIELDS: [&str; 10] = [
    "SrcIP",
    "DstIP",
    "IP",
    "DstMAC",
    "SrcMAC",
    "SrcPort",
    "DstPort",
    "MAC",
    "FirstAnswer",
    "FirstName",
];

/// Default nesting limit for the walk
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Which part of each record is walked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateScope {
    /// The record itself
    #[default]
    Record,
    /// Only the record's `Event` sub-object
    Event,
}

impl AggregateScope {
    pub fn from_event_field(use_event_field: bool) -> Self {
        if use_event_field {
            AggregateScope::Event
        } else {
            AggregateScope::Record
        }
    }
}

/// Builds [`FieldCounts`] from batches of event records
#[derive(Debug, Clone, Copy)]
pub struct FieldAggregator {
    max_depth: usize,
}

impl Default for FieldAggregator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl FieldAggregator {
    /// Create an aggregator that stops descending below `max_depth` levels
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Count `"path:value"` occurrences across `records`.
    ///
    /// Records (or `Event` sub-objects) that are not JSON objects are skipped.
    pub fn aggregate(&self, records: &[Value], scope: AggregateScope) -> FieldCounts {
        let mut counts = FieldCounts::new();

        for record in records {
            let target = match scope {
                AggregateScope::Record => Some(record),
                AggregateScope::Event => record.get("Event"),
            };

            match target {
                Some(Value::Object(map)) => self.walk_object(map, "", 0, &mut counts),
                _ => tracing::trace!(?scope, "Skipping non-object record"),
            }
        }

        AggregationMetrics::record_aggregation(records.len());
        tracing::debug!(
            records = records.len(),
            keys = counts.len(),
            "Aggregated record fields"
        );
        counts
    }

    fn walk_object(
        &self,
        map: &Map<String, Value>,
        prefix: &str,
        depth: usize,
        counts: &mut FieldCounts,
    ) {
        for (key, value) in map {
            self.visit(key, value, prefix, depth, counts);
        }
    }

    fn visit(
        &self,
        key: &str,
        value: &Value,
        prefix: &str,
        depth: usize,
        counts: &mut FieldCounts,
    ) {
        match value {
            Value::Null => return,
            Value::String(s) if s.is_empty() => return,
            Value::Object(_) | Value::Array(_) => {
                if depth >= self.max_depth {
                    tracing::debug!(
                        prefix = prefix,
                        key = key,
                        depth,
                        "Aggregation depth limit reached"
                    );
                    return;
                }

                let nested_prefix = format!("{}{}.", prefix, key);
                match value {
                    Value::Object(map) => {
                        self.walk_object(map, &nested_prefix, depth + 1, counts)
                    }
                    Value::Array(items) => {
                        for (index, item) in items.iter().enumerate() {
                            let key = index.to_string();
                            self.visit(&key, item, &nested_prefix, depth + 1, counts);
                        }
                    }
                    _ => {}
                }
                return;
            }
            _ => {}
        }

        if is_excluded_key(key) {
            return;
        }

        if !prefix.is_empty() && !COMMON_FIELDS.contains(&key) {
            return;
        }

        counts.increment(format!("{}{}:{}", prefix, key, display_value(value)));
    }
}

/// Timestamps and bucket names have unbounded cardinality
fn is_excluded_key(key: &str) -> bool {
    let lower = key.to_lowercase();
    lower == "bucket" || lower.contains("time")
}

/// Aggregate with the default depth limit
pub fn aggregate(records: &[Value], scope: AggregateScope) -> FieldCounts {
    FieldAggregator::default().aggregate(records, scope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_basic_count() {
        let records = vec![json!({"SrcIP": "1.1.1.1"}), json!({"SrcIP": "1.1.1.1"})];
        let counts = aggregate(&records, AggregateScope::Record);

        assert_eq!(counts.len(), 1);
        assert_eq!(counts.get("SrcIP:1.1.1.1"), 2);
    }

    #[test]
    fn test_exclusions() {
        let records = vec![json!({"time": 123, "bucket": "x", "SrcIP": "1.1.1.1"})];
        let counts = aggregate(&records, AggregateScope::Record);

        assert_eq!(counts.len(), 1);
        assert_eq!(counts.get("SrcIP:1.1.1.1"), 1);
    }

    #[test]
    fn test_bucket_case_insensitive() {
        let records = vec![json!({"Bucket": "dns:serve", "BUCKET": "x", "SrcIP": "1.1.1.1"})];
        let counts = aggregate(&records, AggregateScope::Record);

        assert_eq!(counts.sorted(), vec![("SrcIP:1.1.1.1", 1)]);
        assert!(aggregate(&[json!({"Bucket": "x"})], AggregateScope::Record).is_empty());
    }

    #[test]
    fn test_time_substring_case_insensitive() {
        let records = vec![json!({"Timestamp": "2024-05-16", "LastTimeSeen": 5, "Topic": "dns"})];
        let counts = aggregate(&records, AggregateScope::Record);

        assert_eq!(counts.sorted(), vec![("Topic:dns", 1)]);
    }

    #[test]
    fn test_nested_allowlist() {
        let records = vec![
            json!({"Event": {"Nested": {"SrcPort": 53}}}),
            json!({"Event": {"Nested": {"RandomField": "x"}}}),
        ];
        let counts = aggregate(&records, AggregateScope::Event);

        assert_eq!(counts.get("Nested.SrcPort:53"), 1);
        assert_eq!(counts.len(), 1);
    }

    #[test]
    fn test_record_scope_prefixes_event() {
        let records = vec![json!({"Topic": "nft:drop", "Event": {"IP": {"SrcIP": "10.0.0.2"}}})];
        let counts = aggregate(&records, AggregateScope::Record);

        assert_eq!(counts.get("Topic:nft:drop"), 1);
        assert_eq!(counts.get("Event.IP.SrcIP:10.0.0.2"), 1);
        assert!(!counts.contains("Event.IP:"));
    }

    #[test]
    fn test_skips_empty_values() {
        let records = vec![json!({"Router": "", "Status": null, "Port": 0, "Up": false})];
        let counts = aggregate(&records, AggregateScope::Record);

        assert_eq!(counts.sorted(), vec![("Port:0", 1), ("Up:false", 1)]);
    }

    #[test]
    fn test_non_object_records_skipped() {
        let records = vec![
            json!("string"),
            json!(42),
            json!(["SrcIP", "1.1.1.1"]),
            json!(null),
            json!({"Event": "not-an-object"}),
            json!({"SrcIP": "2.2.2.2"}),
        ];

        let counts = aggregate(&records, AggregateScope::Record);
        assert_eq!(counts.get("SrcIP:2.2.2.2"), 1);

        let counts = aggregate(&records, AggregateScope::Event);
        assert!(counts.is_empty());
    }

    #[test]
    fn test_arrays_walked_by_index() {
        let records = vec![json!({"Answers": [{"IP": "1.2.3.4"}, {"Name": "x"}]})];
        let counts = aggregate(&records, AggregateScope::Record);

        assert_eq!(counts.sorted(), vec![("Answers.0.IP:1.2.3.4", 1)]);
    }

    #[test]
    fn test_depth_limit() {
        let records = vec![json!({"A": {"B": {"SrcIP": "deep"}}, "SrcIP": "top"})];

        let counts = FieldAggregator::new(1).aggregate(&records, AggregateScope::Record);
        assert_eq!(counts.sorted(), vec![("SrcIP:top", 1)]);

        let counts = FieldAggregator::new(2).aggregate(&records, AggregateScope::Record);
        assert_eq!(counts.get("A.B.SrcIP:deep"), 1);
    }

    #[test]
    fn test_pathological_depth_does_not_overflow() {
        let mut value = json!({"SrcIP": "bottom"});
        for _ in 0..1_000 {
            value = json!({ "n": value });
        }
        let counts = aggregate(&[value], AggregateScope::Record);
        assert!(counts.is_empty());
    }

    #[test]
    fn test_order_and_split_independent() {
        let records = vec![
            json!({"SrcIP": "1.1.1.1", "DstPort": 53}),
            json!({"SrcIP": "2.2.2.2", "Event": {"MAC": "aa"}}),
            json!({"SrcIP": "1.1.1.1", "DstPort": 443}),
        ];

        let whole = aggregate(&records, AggregateScope::Record);

        let mut reversed = records.clone();
        reversed.reverse();
        assert_eq!(aggregate(&reversed, AggregateScope::Record), whole);

        let mut merged = aggregate(&records[..1], AggregateScope::Record);
        merged.merge(&aggregate(&records[1..], AggregateScope::Record));
        assert_eq!(merged, whole);
    }
}
