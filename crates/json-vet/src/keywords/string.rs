//! String length, `pattern`, and `format`.

use regex::Regex;
use serde_json::{Map, Value};

use crate::context::Context;
use crate::error::SchemaError;
use crate::formats::FormatFailure;
use crate::result::{ErrorKind, ValidationError, ValidationResult};
use crate::validator::Validator;

use super::{skip_blank, string_form};

fn length_bound(
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

pub(crate) fn validate_length(
    instance: &Value,
    schema: &Map<String, Value>,
    ctx: &Context,
    out: &mut ValidationResult,
) -> Result<(), SchemaError> {
    let min = length_bound(schema, "minLength")?;
    let max = length_bound(schema, "maxLength")?;
    if min.is_none() && max.is_none() {
        return Ok(());
    }
    // Length constraints apply to strings only.
    let Some(s) = instance.as_str() else {
        return Ok(());
    };
    let len = s.chars().count() as u64;
    if let Some(min) = min {
        if len < min {
            out.push(ValidationError::at(
                ctx,
                ErrorKind::Length,
                format!("is shorter than the minimum length of {min}"),
            ));
        }
    }
    if let Some(max) = max {
        if len > max {
            out.push(ValidationError::at(
                ctx,
                ErrorKind::Length,
                format!("is longer than the maximum length of {max}"),
            ));
        }
    }
    Ok(())
}

pub(crate) fn validate_pattern(
    instance: &Value,
    schema: &Map<String, Value>,
    ctx: &Context,
    out: &mut ValidationResult,
) -> Result<(), SchemaError> {
    let Some(spec) = schema.get("pattern") else {
        return Ok(());
    };
    let pattern = spec.as_str().ok_or(SchemaError::InvalidKeyword {
        keyword: "pattern",
        expected: "a regular expression string",
    })?;
    let re = Regex::new(pattern).map_err(|source| SchemaError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })?;
    if skip_blank(instance, schema) {
        return Ok(());
    }
    let Some(subject) = string_form(instance) else {
        return Ok(());
    };
    if !re.is_match(&subject) {
        out.push(ValidationError::at(
            ctx,
            ErrorKind::Pattern,
            format!("does not match the pattern {pattern}"),
        ));
    }
    Ok(())
}

pub(crate) fn validate_format(
    validator: &Validator,
    instance: &Value,
    schema: &Map<String, Value>,
    ctx: &Context,
    out: &mut ValidationResult,
) -> Result<(), SchemaError> {
    let Some(spec) = schema.get("format") else {
        return Ok(());
    };
    let name = spec.as_str().ok_or(SchemaError::InvalidKeyword {
        keyword: "format",
        expected: "a format name string",
    })?;
    if skip_blank(instance, schema) {
        return Ok(());
    }
    let Some(subject) = string_form(instance) else {
        return Ok(());
    };
    let outcome = validator
        .formats()
        .check(name, &subject)
        .ok_or_else(|| SchemaError::UnknownFormat(name.to_string()))?;
    match outcome {
        None => {}
        Some(FormatFailure::Rejected) => out.push(ValidationError::at(
            ctx,
            ErrorKind::Format,
            format!("does not conform to the \"{name}\" format"),
        )),
        Some(FormatFailure::Mismatch(pattern)) => out.push(ValidationError::at(
            ctx,
            ErrorKind::Format,
            format!("does not conform to the \"{name}\" format (pattern: {pattern})"),
        )),
        Some(FormatFailure::Custom(message)) => {
            out.push(ValidationError::at(ctx, ErrorKind::Format, message))
        }
    }
    Ok(())
}
