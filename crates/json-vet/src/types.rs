//! Type registry: predicates classifying a JSON value into primitive kinds.

use serde_json::Value;

use crate::context::Context;
use crate::error::SchemaError;
use crate::validator::Validator;

/// Tests a present value against a primitive type name.
///
/// Recognized names: `string`, `number` (finite), `integer` (zero
/// fractional part), `boolean`, `array`, `object`, `null`, `date` (a string
/// in ISO date or date-time shape, since JSON carries no date kind), `any`
/// (true for every present value) and `undefined` (never true for a present
/// value). Unrecognized names match nothing.
pub fn matches_primitive(instance: &Value, name: &str) -> bool {
    match name {
        "string" => instance.is_string(),
        "number" => instance
            .as_f64()
            .map(|n| n.is_finite())
            .unwrap_or(false),
        "integer" => match instance {
            Value::Number(n) => {
                n.is_i64() || n.is_u64() || n.as_f64().map(|f| f.fract() == 0.0).unwrap_or(false)
            }
            _ => false,
        },
        "boolean" => instance.is_boolean(),
        "array" => instance.is_array(),
        "object" => instance.is_object(),
        "null" => instance.is_null(),
        "date" => instance.as_str().map(is_date_like).unwrap_or(false),
        "any" => true,
        "undefined" => false,
        _ => false,
    }
}

/// Tests a present value against a `type` specification: a primitive name,
/// a schema (full validation of a scratch clone), or an array of either
/// (passes when at least one member passes).
pub(crate) fn test_type(
    validator: &Validator,
    instance: &Value,
    spec: &Value,
    ctx: &Context,
) -> Result<bool, SchemaError> {
    match spec {
        Value::String(name) => Ok(matches_primitive(instance, name)),
        Value::Object(_) => {
            let mut scratch = json_vet_util::deep_clone(instance);
            let result = validator.validate_node(Some(&mut scratch), spec, &ctx.without_defaults())?;
            Ok(result.valid())
        }
        Value::Array(members) => {
            for member in members {
                if !matches!(member, Value::String(_) | Value::Object(_)) {
                    return Err(SchemaError::InvalidTypeSpec);
                }
                if test_type(validator, instance, member, ctx)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
        _ => Err(SchemaError::InvalidTypeSpec),
    }
}

/// A string in `YYYY-MM-DD` shape, optionally followed by a `T`-separated
/// time part.
fn is_date_like(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() < 10 {
        return false;
    }
    let date_ok = bytes[0..4].iter().all(u8::is_ascii_digit)
        && bytes[4] == b'-'
        && bytes[5..7].iter().all(u8::is_ascii_digit)
        && bytes[7] == b'-'
        && bytes[8..10].iter().all(u8::is_ascii_digit);
    if !date_ok {
        return false;
    }
    match bytes.get(10) {
        None => true,
        Some(b'T') | Some(b't') | Some(b' ') => bytes[11..]
            .iter()
            .all(|b| b.is_ascii_digit() || matches!(b, b':' | b'.' | b'+' | b'-' | b'Z' | b'z')),
        Some(_) => false,
    }
}
