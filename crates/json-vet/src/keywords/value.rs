//! `type` and `enum`.

use serde_json::{Map, Value};

use crate::context::Context;
use crate::error::SchemaError;
use crate::result::{ErrorKind, ValidationError, ValidationResult};
use crate::types::test_type;
use crate::validator::Validator;

use super::{skip_blank, type_label};

pub(crate) fn validate_type(
    validator: &Validator,
    instance: &Value,
    schema: &Map<String, Value>,
    ctx: &Context,
    out: &mut ValidationResult,
) -> Result<(), SchemaError> {
    let Some(spec) = schema.get("type") else {
        return Ok(());
    };
    if test_type(validator, instance, spec, ctx)? {
        return Ok(());
    }
    let message = match spec {
        Value::Array(members) if members.len() != 1 => {
            let labels: Vec<String> = members.iter().map(type_label).collect();
            format!("is none of [{}]", labels.join(", "))
        }
        Value::Array(members) => format!("is not a {}", type_label(&members[0])),
        single => format!("is not a {}", type_label(single)),
    };
    out.push(ValidationError::at(ctx, ErrorKind::Type, message));
    Ok(())
}

pub(crate) fn validate_enum(
    instance: &Value,
    schema: &Map<String, Value>,
    ctx: &Context,
    out: &mut ValidationResult,
) -> Result<(), SchemaError> {
    let Some(candidates) = schema.get("enum") else {
        return Ok(());
    };
    let candidates = candidates.as_array().ok_or(SchemaError::EnumNotArray)?;
    if skip_blank(instance, schema) {
        return Ok(());
    }
    if candidates
        .iter()
        .any(|candidate| json_vet_util::deep_equal(instance, candidate))
    {
        return Ok(());
    }
    let rendered: Vec<String> = candidates
        .iter()
        .map(|c| serde_json::to_string(c).unwrap_or_else(|_| c.to_string()))
        .collect();
    out.push(ValidationError::at(
        ctx,
        ErrorKind::Enum,
        format!("is not one of enum values: {}", rendered.join(", ")),
    ));
    Ok(())
}
