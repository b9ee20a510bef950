//! # Compact Pretty JSON
//!
//! Formats JSON for display the way documentation sites usually show it:
//! values that fit on a line stay on one line, everything else is broken up
//! with two-space indentation.

use regex::{Captures, Regex};
use serde_json::Value;
use std::sync::OnceLock;

const INDENT: &str = "  ";

/// Line width used for compaction
pub const DEFAULT_MAX_LENGTH: usize = 80;

fn string_or_separator() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"("(?:[^\\"]|\\.)*")|[:,]"#).expect("separator pattern is valid")
    })
}

/// Format `value` with the default line width
pub fn to_pretty_compact(value: &Value) -> String {
    to_pretty_compact_with_width(value, DEFAULT_MAX_LENGTH)
}

/// Format `value`, keeping any line at most `max_length` columns where possible
pub fn to_pretty_compact_with_width(value: &Value, max_length: usize) -> String {
    format_value(value, "", 0, max_length)
}

fn format_value(value: &Value, current_indent: &str, reserved: usize, max_length: usize) -> String {
    let compact = compact_json(value);
    let available = max_length.saturating_sub(current_indent.len() + reserved);

    if width(&compact) <= available {
        let spaced = space_separators(&compact);
        if width(&spaced) <= available {
            return spaced;
        }
    }

    let next_indent = format!("{current_indent}{INDENT}");
    let (start, end, items) = match value {
        Value::Array(values) => {
            let last = values.len().saturating_sub(1);
            let items: Vec<String> = values
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    let reserved = if index == last { 0 } else { 1 };
                    format_value(item, &next_indent, reserved, max_length)
                })
                .collect();
            ("[", "]", items)
        }
        Value::Object(map) => {
            let last = map.len().saturating_sub(1);
            let items: Vec<String> = map
                .iter()
                .enumerate()
                .map(|(index, (key, item))| {
                    let key_part = format!("{}: ", Value::String(key.clone()));
                    let reserved = width(&key_part) + if index == last { 0 } else { 1 };
                    let formatted = format_value(item, &next_indent, reserved, max_length);
                    format!("{key_part}{formatted}")
                })
                .collect();
            ("{", "}", items)
        }
        _ => return compact,
    };

    if items.is_empty() {
        return compact;
    }

    let separator = format!(",\n{next_indent}");
    format!(
        "{start}\n{next_indent}{}\n{current_indent}{end}",
        items.join(&separator)
    )
}

/// Single-line JSON with integral floats printed as integers (`41.0` as `41`)
fn compact_json(value: &Value) -> String {
    match value {
        Value::Number(number) => match number.as_f64() {
            Some(float) if number.is_f64() && float.is_finite() && float.fract() == 0.0 => {
                if float == 0.0 {
                    "0".to_string()
                } else if float.abs() < 1e21 {
                    format!("{float:.0}")
                } else {
                    number.to_string()
                }
            }
            _ => number.to_string(),
        },
        Value::Array(values) => {
            let items: Vec<String> = values.iter().map(compact_json).collect();
            format!("[{}]", items.join(","))
        }
        Value::Object(map) => {
            let items: Vec<String> = map
                .iter()
                .map(|(key, item)| format!("{}:{}", Value::String(key.clone()), compact_json(item)))
                .collect();
            format!("{{{}}}", items.join(","))
        }
        other => other.to_string(),
    }
}

/// Add a space after every `:` and `,` that is not inside a string literal
fn space_separators(compact: &str) -> String {
    string_or_separator()
        .replace_all(compact, |caps: &Captures| match caps.get(1) {
            Some(literal) => literal.as_str().to_string(),
            None => format!("{} ", &caps[0]),
        })
        .into_owned()
}

fn width(text: &str) -> usize {
    text.chars().count()
}
