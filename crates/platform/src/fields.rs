//! Tolerant field extraction for semi-structured command output.
//!
//! `ioreg` prints one `"Key" = value` pair per line and flattens nested
//! dictionaries onto a single line (`"AdapterDetails" = {"Watts"=96,...}`).
//! Lookups never fail: a missing or malformed value resolves to `None` and the
//! caller applies its own default.

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

/// How a field's raw text is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Base-10 signed integer.
    Integer,
    /// `Yes`/`No` (also `true`/`false`, `1`/`0`).
    Flag,
    /// Free text, quoted or bare.
    Text,
}

/// One entry of a probe's field table.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub key: &'static str,
    pub kind: FieldKind,
    /// Missing required fields are logged; they never fail the scan.
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(key: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            kind,
            required: true,
        }
    }

    pub const fn optional(key: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            kind,
            required: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Integer(i64),
    Flag(bool),
    Text(String),
}

/// Values resolved by [`scan`], keyed by field name.
#[derive(Debug, Clone, Default)]
pub struct Fields {
    values: HashMap<&'static str, FieldValue>,
}

impl Fields {
    pub fn integer(&self, key: &str) -> Option<i64> {
        match self.values.get(key) {
            Some(FieldValue::Integer(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn flag(&self, key: &str) -> Option<bool> {
        match self.values.get(key) {
            Some(FieldValue::Flag(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        match self.values.get(key) {
            Some(FieldValue::Text(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Resolve every field in `table` against `text`.
pub fn scan(text: &str, table: &[FieldSpec]) -> Fields {
    let mut values = HashMap::with_capacity(table.len());

    for field in table {
        let value = match field.kind {
            FieldKind::Integer => extract_integer(text, field.key).map(FieldValue::Integer),
            FieldKind::Flag => extract_flag(text, field.key).map(FieldValue::Flag),
            FieldKind::Text => extract_text(text, field.key)
                .filter(|value| !value.is_empty())
                .map(|value| FieldValue::Text(value.to_string())),
        };

        match value {
            Some(value) => {
                values.insert(field.key, value);
            }
            None if field.required => {
                debug!(field = field.key, "Required field missing from output");
            }
            None => {}
        }
    }

    Fields { values }
}

/// Find the value assigned to `"key"`.
///
/// A pair that starts its own line wins over one nested inside a dictionary,
/// so `"Temperature" = 3055` is preferred to `"BatteryData" = {"Temperature"=3100}`.
pub fn extract_text<'a>(text: &'a str, key: &str) -> Option<&'a str> {
    let needle = format!("\"{}\"", key);
    let mut nested = None;

    for (pos, _) in text.match_indices(&needle) {
        let Some(value) = value_after(&text[pos + needle.len()..]) else {
            continue;
        };
        if starts_line(text, pos) {
            return Some(value);
        }
        nested.get_or_insert(value);
    }

    nested
}

/// Find `"key"` and parse its value as a base-10 integer.
pub fn extract_integer(text: &str, key: &str) -> Option<i64> {
    extract_text(text, key)?.parse().ok()
}

/// Find `"key"` and interpret its value as a boolean flag.
pub fn extract_flag(text: &str, key: &str) -> Option<bool> {
    let value = extract_text(text, key)?;
    if ["yes", "true", "1"]
        .iter()
        .any(|v| value.eq_ignore_ascii_case(v))
    {
        Some(true)
    } else if ["no", "false", "0"]
        .iter()
        .any(|v| value.eq_ignore_ascii_case(v))
    {
        Some(false)
    } else {
        None
    }
}

fn value_after(rest: &str) -> Option<&str> {
    let rest = rest
        .trim_start_matches([' ', '\t'])
        .strip_prefix('=')?
        .trim_start_matches([' ', '\t']);

    if let Some(quoted) = rest.strip_prefix('"') {
        let end = quoted.find('"')?;
        return Some(&quoted[..end]);
    }

    let end = rest
        .find(|c: char| c.is_whitespace() || matches!(c, ',' | ';' | '}' | ')'))
        .unwrap_or(rest.len());
    (end > 0).then(|| &rest[..end])
}

fn starts_line(text: &str, pos: usize) -> bool {
    let line_start = text[..pos].rfind('\n').map_or(0, |i| i + 1);
    text[line_start..pos]
        .trim_matches(|c: char| c.is_whitespace() || c == '|')
        .is_empty()
}

/// Depth-first search for the first object carrying `key`.
pub fn find_key<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map
            .get(key)
            .or_else(|| map.values().find_map(|child| find_key(child, key))),
        Value::Array(items) => items.iter().find_map(|child| find_key(child, key)),
        _ => None,
    }
}

/// String value for `key`, accepting numbers too. Blank strings count as absent.
pub fn json_text(value: &Value, key: &str) -> Option<String> {
    match find_key(value, key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Integer value for `key`, accepting numeric strings too.
pub fn json_integer(value: &Value, key: &str) -> Option<i64> {
    match find_key(value, key)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
