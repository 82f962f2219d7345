//! Sequence constraints: `items`/`additionalItems`, counts, uniqueness.

use serde_json::{Map, Value};

use crate::context::Context;
use crate::error::SchemaError;
use crate::result::{ErrorKind, ValidationError, ValidationResult};
use crate::validator::Validator;

fn count_bound(
    schema: &Map<String, Value>,
    keyword: &'static str,
) -> Result<Option<u64>, SchemaError> {
    match schema.get(keyword) {
        None => Ok(None),
        Some(v) => v.as_u64().map(Some).ok_or(SchemaError::InvalidKeyword {
            keyword,
            expected: "a non-negative integer",
        }),
    }
}

pub(crate) fn validate_item_counts(
    instance: &Value,
    schema: &Map<String, Value>,
    ctx: &Context,
    out: &mut ValidationResult,
) -> Result<(), SchemaError> {
    let min = count_bound(schema, "minItems")?;
    let max = count_bound(schema, "maxItems")?;
    let Some(items) = instance.as_array() else {
        return Ok(());
    };
    let len = items.len() as u64;
    if let Some(min) = min {
        if len < min {
            out.push(ValidationError::at(
                ctx,
                ErrorKind::Items,
                format!("contains fewer items than the minimum of {min}"),
            ));
        }
    }
    if let Some(max) = max {
        if len > max {
            out.push(ValidationError::at(
                ctx,
                ErrorKind::Items,
                format!("contains more items than the maximum of {max}"),
            ));
        }
    }
    Ok(())
}

/// Pairwise deep-equality scan. Quadratic on purpose: structural equality
/// over arbitrary nested JSON has no cheap hash, and validation-sized
/// inputs keep n small.
pub(crate) fn validate_unique_items(
    instance: &Value,
    schema: &Map<String, Value>,
    ctx: &Context,
    out: &mut ValidationResult,
) -> Result<(), SchemaError> {
    if schema.get("uniqueItems").and_then(Value::as_bool) != Some(true) {
        return Ok(());
    }
    let Some(items) = instance.as_array() else {
        return Ok(());
    };
    for (later, item) in items.iter().enumerate().skip(1) {
        if items[..later]
            .iter()
            .any(|earlier| json_vet_util::deep_equal(earlier, item))
        {
            out.push(ValidationError::at(
                &ctx.extend_index(later),
                ErrorKind::UniqueItems,
                "contains duplicate item",
            ));
        }
    }
    Ok(())
}

pub(crate) fn validate_items(
    validator: &Validator,
    instance: &mut Value,
    schema: &Map<String, Value>,
    ctx: &Context,
    out: &mut ValidationResult,
) -> Result<(), SchemaError> {
    let Some(items) = schema.get("items") else {
        return Ok(());
    };
    let Some(len) = instance.as_array().map(Vec::len) else {
        return Ok(());
    };
    match items {
        // One schema for every element.
        Value::Object(_) => {
            for index in 0..len {
                let child_ctx = ctx.extend_index(index);
                let element = instance
                    .as_array_mut()
                    .and_then(|elements| elements.get_mut(index));
                let child = validator.validate_node(element, items, &child_ctx)?;
                out.import(child);
            }
        }
        // Positional schemas; overflow falls back to `additionalItems`.
        Value::Array(positional) => {
            for index in 0..len {
                let child_ctx = ctx.extend_index(index);
                let subschema = match positional.get(index) {
                    Some(subschema) => subschema,
                    None => match schema.get("additionalItems") {
                        None | Some(Value::Bool(true)) => continue,
                        Some(Value::Bool(false)) => {
                            out.push(ValidationError::at(
                                &child_ctx,
                                ErrorKind::AdditionalItems,
                                "additionalItems not permitted",
                            ));
                            // Fail closed: one overflow error, stop scanning.
                            break;
                        }
                        Some(extra @ Value::Object(_)) => extra,
                        Some(_) => {
                            return Err(SchemaError::InvalidKeyword {
                                keyword: "additionalItems",
                                expected: "a boolean or a schema",
                            })
                        }
                    },
                };
                let element = instance
                    .as_array_mut()
                    .and_then(|elements| elements.get_mut(index));
                let child = validator.validate_node(element, subschema, &child_ctx)?;
                out.import(child);
            }
        }
        _ => {
            return Err(SchemaError::InvalidKeyword {
                keyword: "items",
                expected: "a schema or an array of schemas",
            })
        }
    }
    Ok(())
}
