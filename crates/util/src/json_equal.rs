//! Deep structural equality for JSON values.

use serde_json::Value;

/// Compares two JSON values structurally.
///
/// Scalars compare by exact type and value (`0` is not `false`, `""` is not
/// `null`). Arrays compare element by element in order. Objects compare by
/// key set and per-key value, independent of key order.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use json_vet_util::deep_equal;
///
/// assert!(deep_equal(&json!({"a": 1, "b": 2}), &json!({"b": 2, "a": 1})));
/// assert!(!deep_equal(&json!([1, 2]), &json!([2, 1])));
/// ```
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        // Compare numerically so `1` and `1.0` are the same value.
        (Value::Number(a), Value::Number(b)) => {
            a == b
                || a.as_f64()
                    .zip(b.as_f64())
                    .map(|(x, y)| x == y)
                    .unwrap_or(false)
        }
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| deep_equal(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(k, v)| b.get(k).is_some_and(|w| deep_equal(v, w)))
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalars() {
        assert!(deep_equal(&json!(null), &json!(null)));
        assert!(deep_equal(&json!(true), &json!(true)));
        assert!(deep_equal(&json!("x"), &json!("x")));
        assert!(!deep_equal(&json!("x"), &json!("y")));
        assert!(!deep_equal(&json!(false), &json!(null)));
    }

    #[test]
    fn test_numbers_compare_numerically() {
        assert!(deep_equal(&json!(1), &json!(1.0)));
        assert!(!deep_equal(&json!(1), &json!(1.5)));
    }

    #[test]
    fn test_no_cross_type_coercion() {
        assert!(!deep_equal(&json!(0), &json!(false)));
        assert!(!deep_equal(&json!(1), &json!(true)));
        assert!(!deep_equal(&json!(""), &json!(null)));
        assert!(!deep_equal(&json!({}), &json!([])));
    }

    #[test]
    fn test_arrays_are_ordered() {
        assert!(deep_equal(&json!([1, 2, 3]), &json!([1, 2, 3])));
        assert!(!deep_equal(&json!([1, 2, 3]), &json!([3, 2, 1])));
        assert!(!deep_equal(&json!([1, 2, 3]), &json!([1, 2])));
    }

    #[test]
    fn test_objects_ignore_key_order() {
        assert!(deep_equal(
            &json!({"a": 1, "b": [true, null]}),
            &json!({"b": [true, null], "a": 1})
        ));
    }

    #[test]
    fn test_objects_compare_key_sets() {
        assert!(!deep_equal(&json!({"a": 1}), &json!({"a": 1, "b": 2})));
        assert!(!deep_equal(&json!({"a": 1}), &json!({"b": 1})));
    }

    #[test]
    fn test_nested_structures() {
        let a = json!({"items": [{"id": 1, "tags": ["x"]}, {"id": 2}]});
        let b = json!({"items": [{"tags": ["x"], "id": 1}, {"id": 2}]});
        let c = json!({"items": [{"tags": ["y"], "id": 1}, {"id": 2}]});
        assert!(deep_equal(&a, &b));
        assert!(!deep_equal(&a, &c));
    }
}
