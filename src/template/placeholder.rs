//! Placeholder scanning and event path resolution

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

lazy_static! {
    /// `{{path}}` or `{{path#tag}}`, ASCII word characters only
    static ref PLACEHOLDER: Regex =
        Regex::new(r"\{\{([0-9A-Za-z_.]+)(?:#([0-9A-Za-z_]+))?\}\}").unwrap();
}

/// A placeholder match within a template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder<'t> {
    /// Byte offset of the opening `{{`
    pub start: usize,
    /// Byte offset just past the closing `}}`
    pub end: usize,
    /// Full matched text
    pub raw: &'t str,
    pub path: &'t str,
    pub tag: Option<&'t str>,
}

impl<'t> Placeholder<'t> {
    /// Matches containing `__` are dropped from the output
    pub fn is_disabled(&self) -> bool {
        self.raw.contains("__")
    }
}

/// Iterate placeholders left to right, non-overlapping
pub fn scan(template: &str) -> impl Iterator<Item = Placeholder<'_>> {
    PLACEHOLDER.captures_iter(template).filter_map(|caps| {
        let whole = caps.get(0)?;
        let path = caps.get(1)?;
        Some(Placeholder {
            start: whole.start(),
            end: whole.end(),
            raw: whole.as_str(),
            path: path.as_str(),
            tag: caps.get(2).map(|m| m.as_str()),
        })
    })
}

/// Walk `path` through `event`.
///
/// Any missing or falsy step, the last one included, yields `None`, which
/// renders as the empty string. A leaf of `0` or `false` is therefore blank.
pub fn resolve_path<'a>(event: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = event;
    for level in path.split('.') {
        if !is_truthy(current) {
            return None;
        }

        let next = match current {
            Value::Object(map) => map.get(level),
            Value::Array(items) => level.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        };

        match next {
            Some(value) if is_truthy(value) => current = value,
            _ => return None,
        }
    }
    Some(current)
}

/// Loose truthiness of a JSON value: null, false, 0 and "" are falsy
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Display form of a resolved value
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            // Whole floats drop the fraction: 1.0 displays as "1"
            Some(f) if n.is_f64() => f.to_string(),
            _ => n.to_string(),
        },
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        // For arrays and objects, use JSON representation
        _ => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scan_positions() {
        let found: Vec<_> = scan("a {{X.Y}} b {{Z#Device}}").collect();
        assert_eq!(found.len(), 2);

        assert_eq!(found[0].start, 2);
        assert_eq!(found[0].end, 9);
        assert_eq!(found[0].path, "X.Y");
        assert_eq!(found[0].tag, None);

        assert_eq!(found[1].raw, "{{Z#Device}}");
        assert_eq!(found[1].path, "Z");
        assert_eq!(found[1].tag, Some("Device"));
    }

    #[test]
    fn test_scan_rejects_malformed() {
        assert_eq!(scan("{{a b}} {{}} {{a#}} {a} {{a-b}}").count(), 0);
        assert_eq!(scan("{{{a}}}").map(|p| p.path).collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn test_scan_non_ascii_word() {
        assert_eq!(scan("{{café}}").count(), 0);
    }

    #[test]
    fn test_disabled() {
        let p = scan("{{a__b}}").next().unwrap();
        assert!(p.is_disabled());
        let p = scan("{{a_b#Device}}").next().unwrap();
        assert!(!p.is_disabled());
    }

    #[test]
    fn test_resolve_nested() {
        let event = json!({"Data": {"MAC": "11:22:33:44:55:66"}});
        assert_eq!(
            resolve_path(&event, "Data.MAC"),
            Some(&json!("11:22:33:44:55:66"))
        );
        assert_eq!(resolve_path(&event, "Data.IP"), None);
        assert_eq!(resolve_path(&event, "Data.MAC.Extra"), None);
    }

    #[test]
    fn test_resolve_array_index() {
        let event = json!({"Answers": [{"Name": "a"}, {"Name": "b"}]});
        assert_eq!(resolve_path(&event, "Answers.1.Name"), Some(&json!("b")));
        assert_eq!(resolve_path(&event, "Answers.5.Name"), None);
    }

    #[test]
    fn test_resolve_falsy_collapses() {
        let event = json!({"Count": 0, "Flag": false, "Empty": "", "Nested": {"Zero": 0}});
        assert_eq!(resolve_path(&event, "Count"), None);
        assert_eq!(resolve_path(&event, "Flag"), None);
        assert_eq!(resolve_path(&event, "Empty"), None);
        assert_eq!(resolve_path(&event, "Nested.Zero"), None);
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&json!("x")), "x");
        assert_eq!(display_value(&json!(53)), "53");
        assert_eq!(display_value(&json!(true)), "true");
        assert_eq!(display_value(&json!(null)), "");
        assert_eq!(display_value(&json!({"a": 1})), r#"{"a":1}"#);
    }

    #[test]
    fn test_display_whole_float() {
        assert_eq!(display_value(&json!(1.0)), "1");
        assert_eq!(display_value(&json!(-20.0)), "-20");
        assert_eq!(display_value(&json!(1.5)), "1.5");
        assert_eq!(display_value(&json!(u64::MAX)), "18446744073709551615");
    }
}
