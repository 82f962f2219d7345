//! Deep cloning for JSON values.

use serde_json::{Map, Value};

/// Builds a deep copy of a JSON value.
///
/// Every nested array and object in the result is a fresh allocation; the
/// clone never aliases any part of the source tree, so callers may mutate
/// it freely as scratch space.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use json_vet_util::{deep_clone, deep_equal};
///
/// let source = json!({"nested": {"list": [1, 2, 3]}});
/// let copy = deep_clone(&source);
/// assert!(deep_equal(&source, &copy));
/// ```
pub fn deep_clone(value: &Value) -> Value {
    match value {
        Value::Null => Value::Null,
        Value::Bool(b) => Value::Bool(*b),
        Value::Number(n) => Value::Number(n.clone()),
        Value::String(s) => Value::String(s.clone()),
        Value::Array(items) => Value::Array(items.iter().map(deep_clone).collect()),
        Value::Object(entries) => Value::Object(
            entries
                .iter()
                .map(|(k, v)| (k.clone(), deep_clone(v)))
                .collect::<Map<String, Value>>(),
        ),
    }
}
