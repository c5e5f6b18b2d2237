//! Turning engine results into output lines

use lipton_engine::{ScriptError, ScriptValue};
use serde_json::{Map, Value};

pub(crate) const NO_ELEMENTS: &str = "no elements found";
pub(crate) const EMPTY_STORAGE: &str = "local storage is empty";
pub(crate) const NO_COOKIES: &str = "no cookies found";

/// Console rendering of an evaluation result.
///
/// Objects and arrays become indented JSON, scalars their text, an absent
/// result the word `undefined`.
pub fn render_value(value: &ScriptValue) -> Vec<String> {
    match value {
        None => vec!["undefined".to_string()],
        Some(v @ (Value::Object(_) | Value::Array(_))) => {
            let pretty = serde_json::to_string_pretty(v).unwrap_or_else(|_| v.to_string());
            pretty.lines().map(str::to_string).collect()
        }
        Some(Value::String(s)) if s.is_empty() => vec![String::new()],
        Some(Value::String(s)) => s.lines().map(str::to_string).collect(),
        Some(other) => vec![other.to_string()],
    }
}

pub(crate) fn render_error(error: &ScriptError) -> String {
    format!("Error: {}", error)
}

/// Lines of the Elements view
pub fn element_lines(value: &ScriptValue) -> Vec<String> {
    let lines = non_empty_lines(&text_of(value));
    if lines.is_empty() {
        vec![NO_ELEMENTS.to_string()]
    } else {
        lines
    }
}

/// Lines of the LocalStorage view: `key: value` per entry, or the raw dump
/// when it does not parse as a JSON object.
pub fn storage_lines(value: &ScriptValue) -> Vec<String> {
    if let Some(Value::Object(map)) = value {
        return entry_lines(map);
    }

    let raw = text_of(value);
    if raw.trim().is_empty() {
        return vec![EMPTY_STORAGE.to_string()];
    }

    match serde_json::from_str::<Value>(&raw) {
        Ok(parsed) if is_falsy(&parsed) => vec![EMPTY_STORAGE.to_string()],
        Ok(Value::Object(map)) => entry_lines(&map),
        Ok(_) => raw.lines().map(str::to_string).collect(),
        Err(e) => {
            tracing::debug!(error = %e, "Storage dump is not JSON, showing it raw");
            raw.lines().map(str::to_string).collect()
        }
    }
}

/// `null`, `false`, zero and empty containers all mean nothing is stored
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(m) => m.is_empty(),
    }
}

/// Lines of the Cookies view, one cookie per line
pub fn cookie_lines(value: &ScriptValue) -> Vec<String> {
    let lines = non_empty_lines(&text_of(value));
    if lines.is_empty() {
        vec![NO_COOKIES.to_string()]
    } else {
        lines
    }
}

fn entry_lines(map: &Map<String, Value>) -> Vec<String> {
    if map.is_empty() {
        return vec![EMPTY_STORAGE.to_string()];
    }

    map.iter()
        .map(|(key, value)| match value {
            Value::String(s) => format!("{}: {}", key, s),
            other => format!("{}: {}", key, other),
        })
        .collect()
}

/// Probe results are expected to be strings; anything else is shown as JSON
fn text_of(value: &ScriptValue) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn non_empty_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}
