//! Field/value occurrence counts

use std::collections::hash_map;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Flat map of `"path:value"` to occurrence count.
///
/// Merging is key-wise addition, so counts built over disjoint record sets
/// can be combined in any order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldCounts(HashMap<String, u64>);

impl FieldCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count for `key`, zero when absent
    pub fn get(&self, key: &str) -> u64 {
        self.0.get(key).copied().unwrap_or(0)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Add one occurrence of `key`
    pub fn increment(&mut self, key: String) {
        *self.0.entry(key).or_insert(0) += 1;
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, u64> {
        self.0.iter()
    }

    /// Add every count from `other` into `self`
    pub fn merge(&mut self, other: &FieldCounts) {
        for (key, count) in &other.0 {
            *self.0.entry(key.clone()).or_insert(0) += count;
        }
    }

    /// Entries ordered by key, the order charts display them in
    pub fn sorted(&self) -> Vec<(&str, u64)> {
        let mut entries: Vec<(&str, u64)> =
            self.0.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// The `limit` highest counts, ties broken by key
    pub fn top(&self, limit: usize) -> Vec<(&str, u64)> {
        let mut entries = self.sorted();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries.truncate(limit);
        entries
    }
}

impl Extend<(String, u64)> for FieldCounts {
    fn extend<I: IntoIterator<Item = (String, u64)>>(&mut self, iter: I) {
        for (key, count) in iter {
            *self.0.entry(key).or_insert(0) += count;
        }
    }
}

impl FromIterator<(String, u64)> for FieldCounts {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut counts = FieldCounts::new();
        counts.extend(iter);
        counts
    }
}

impl IntoIterator for FieldCounts {
    type Item = (String, u64);
    type IntoIter = hash_map::IntoIter<String, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_adds_keywise() {
        let mut a: FieldCounts = vec![("SrcIP:1.1.1.1".to_string(), 2)].into_iter().collect();
        let b: FieldCounts = vec![
            ("SrcIP:1.1.1.1".to_string(), 1),
            ("DstPort:53".to_string(), 4),
        ]
        .into_iter()
        .collect();

        a.merge(&b);
        assert_eq!(a.get("SrcIP:1.1.1.1"), 3);
        assert_eq!(a.get("DstPort:53"), 4);
        assert_eq!(a.get("missing"), 0);
        assert_eq!(a.total(), 7);
    }

    #[test]
    fn test_sorted_and_top() {
        let counts: FieldCounts = vec![
            ("b:1".to_string(), 1),
            ("a:1".to_string(), 5),
            ("c:1".to_string(), 5),
        ]
        .into_iter()
        .collect();

        assert_eq!(counts.sorted(), vec![("a:1", 5), ("b:1", 1), ("c:1", 5)]);
        assert_eq!(counts.top(2), vec![("a:1", 5), ("c:1", 5)]);
    }

    #[test]
    fn test_serializes_flat() {
        let mut counts = FieldCounts::new();
        counts.increment("SrcIP:1.1.1.1".to_string());
        assert_eq!(
            serde_json::to_value(&counts).unwrap(),
            json!({"SrcIP:1.1.1.1": 1})
        );
    }
}
