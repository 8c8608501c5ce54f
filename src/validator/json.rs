//! Helpers for reading a catalog document that has not been trusted yet.

use serde_json::{Number, Value};

/// Whether a field carries a meaningful value.
///
/// Catalogs are hand-edited and the editor writes placeholders such as
/// `""` or `0` for untouched fields, so absent, `null`, `false`, `0` and the
/// empty string all count as unset. Arrays and objects are always set, even
/// when empty.
pub(crate) fn is_set(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// `Some` only when the field exists and is set.
pub(crate) fn set_field<'a>(node: &'a Value, name: &str) -> Option<&'a Value> {
    node.get(name).filter(|v| is_set(Some(v)))
}

/// The field as a JSON number, if it is one.
pub(crate) fn number_field<'a>(node: &'a Value, name: &str) -> Option<&'a Number> {
    match node.get(name) {
        Some(Value::Number(n)) => Some(n),
        _ => None,
    }
}

/// Whether a field exists but is not a JSON boolean.
pub(crate) fn present_but_not_bool(node: &Value, name: &str) -> bool {
    node.get(name).is_some_and(|v| !v.is_boolean())
}

/// Whether a field exists but is not a JSON number.
pub(crate) fn present_but_not_number(node: &Value, name: &str) -> bool {
    node.get(name).is_some_and(|v| !v.is_number())
}

/// Renders a value the way it should read inside a diagnostic message.
pub(crate) fn describe(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => format_number(n),
        other => other.to_string(),
    }
}

/// Formats a number without a trailing `.0` for whole values.
pub(crate) fn format_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => format!("{}", f as i64),
        Some(f) => format!("{}", f),
        None => n.to_string(),
    }
}
