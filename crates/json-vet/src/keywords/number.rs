//! Numeric range and divisibility constraints.

use serde_json::{Map, Value};

use crate::context::Context;
use crate::error::SchemaError;
use crate::result::{ErrorKind, ValidationError, ValidationResult};

fn bound(schema: &Map<String, Value>, keyword: &'static str) -> Result<Option<f64>, SchemaError> {
    match schema.get(keyword) {
        None => Ok(None),
        Some(v) => v.as_f64().map(Some).ok_or(SchemaError::InvalidKeyword {
            keyword,
            expected: "a number",
        }),
    }
}

fn exclusive(schema: &Map<String, Value>, keyword: &str) -> bool {
    schema.get(keyword).and_then(Value::as_bool) == Some(true)
}

pub(crate) fn validate_bounds(
    instance: &Value,
    schema: &Map<String, Value>,
    ctx: &Context,
    out: &mut ValidationResult,
) -> Result<(), SchemaError> {
    let minimum = bound(schema, "minimum")?;
    let maximum = bound(schema, "maximum")?;
    if minimum.is_none() && maximum.is_none() {
        return Ok(());
    }
    // Range constraints apply to numbers only.
    let Some(num) = instance.as_f64() else {
        return Ok(());
    };
    if let Some(min) = minimum {
        if exclusive(schema, "exclusiveMinimum") {
            if num <= min {
                out.push(ValidationError::at(
                    ctx,
                    ErrorKind::Range,
                    format!("must be greater than the exclusive minimum of {min}"),
                ));
            }
        } else if num < min {
            out.push(ValidationError::at(
                ctx,
                ErrorKind::Range,
                format!("is less than the minimum of {min}"),
            ));
        }
    }
    if let Some(max) = maximum {
        if exclusive(schema, "exclusiveMaximum") {
            if num >= max {
                out.push(ValidationError::at(
                    ctx,
                    ErrorKind::Range,
                    format!("must be less than the exclusive maximum of {max}"),
                ));
            }
        } else if num > max {
            out.push(ValidationError::at(
                ctx,
                ErrorKind::Range,
                format!("is greater than the maximum of {max}"),
            ));
        }
    }
    Ok(())
}

/// `divisibleBy` and `multipleOf` are synonyms; a zero divisor is a schema
/// defect, never a validation failure.
pub(crate) fn validate_divisor(
    instance: &Value,
    schema: &Map<String, Value>,
    ctx: &Context,
    out: &mut ValidationResult,
) -> Result<(), SchemaError> {
    for keyword in ["divisibleBy", "multipleOf"] {
        let Some(spec) = schema.get(keyword) else {
            continue;
        };
        let divisor = spec.as_f64().ok_or(SchemaError::InvalidKeyword {
            keyword,
            expected: "a number",
        })?;
        if divisor == 0.0 {
            return Err(SchemaError::ZeroDivisor(keyword));
        }
        let Some(num) = instance.as_f64() else {
            continue;
        };
        if (num / divisor).fract() != 0.0 {
            out.push(ValidationError::at(
                ctx,
                ErrorKind::Divisor,
                format!("is not a multiple of {divisor}"),
            ));
        }
    }
    Ok(())
}
