//! Object constraints: required names, property descent, extras, sizes,
//! and cross-field dependencies.

use regex::Regex;
use serde_json::{Map, Value};

use crate::context::Context;
use crate::error::SchemaError;
use crate::result::{ErrorKind, ValidationError, ValidationResult};
use crate::validator::Validator;

/// `required` in its array-of-names form. The boolean form is handled by
/// the orchestrator's short-circuit before any keyword runs.
pub(crate) fn validate_required_names(
    instance: &Value,
    schema: &Map<String, Value>,
    ctx: &Context,
    out: &mut ValidationResult,
) -> Result<(), SchemaError> {
    let Some(Value::Array(names)) = schema.get("required") else {
        return Ok(());
    };
    let Some(object) = instance.as_object() else {
        return Ok(());
    };
    for name in names {
        let name = name.as_str().ok_or(SchemaError::InvalidKeyword {
            keyword: "required",
            expected: "a boolean or an array of property names",
        })?;
        let missing = match object.get(name) {
            None | Some(Value::Null) => true,
            Some(_) => false,
        };
        if missing {
            out.push(ValidationError::at_property(
                ctx,
                name,
                ErrorKind::Required,
                "is required",
            ));
        }
    }
    Ok(())
}

fn property_bound(
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

pub(crate) fn validate_property_counts(
    instance: &Value,
    schema: &Map<String, Value>,
    ctx: &Context,
    out: &mut ValidationResult,
) -> Result<(), SchemaError> {
    let min = property_bound(schema, "minProperties")?;
    let max = property_bound(schema, "maxProperties")?;
    let Some(object) = instance.as_object() else {
        return Ok(());
    };
    let len = object.len() as u64;
    if let Some(min) = min {
        if len < min {
            out.push(ValidationError::at(
                ctx,
                ErrorKind::Size,
                format!("has fewer properties than the minimum of {min}"),
            ));
        }
    }
    if let Some(max) = max {
        if len > max {
            out.push(ValidationError::at(
                ctx,
                ErrorKind::Size,
                format!("has more properties than the maximum of {max}"),
            ));
        }
    }
    Ok(())
}

/// Recursive descent into declared properties. This is the one place where
/// the engine mutates the instance: an absent key whose sub-schema declares
/// a `default` is populated before the child validation runs.
pub(crate) fn validate_properties(
    validator: &Validator,
    instance: &mut Value,
    schema: &Map<String, Value>,
    ctx: &Context,
    out: &mut ValidationResult,
) -> Result<(), SchemaError> {
    let Some(properties) = schema.get("properties") else {
        return Ok(());
    };
    let properties = properties
        .as_object()
        .ok_or(SchemaError::InvalidKeyword {
            keyword: "properties",
            expected: "an object mapping names to schemas",
        })?;
    if !instance.is_object() {
        return Ok(());
    }
    for (name, subschema) in properties {
        if ctx.defaults_enabled() && validator.options().apply_defaults {
            let default = subschema.as_object().and_then(|node| node.get("default"));
            if let (Some(default), Some(object)) = (default, instance.as_object_mut()) {
                if !object.contains_key(name) {
                    object.insert(name.clone(), json_vet_util::deep_clone(default));
                }
            }
        }
        let child_ctx = ctx.extend_key(name);
        let child_value = instance
            .as_object_mut()
            .and_then(|object| object.get_mut(name));
        let child = validator.validate_node(child_value, subschema, &child_ctx)?;
        out.import(child);
    }
    Ok(())
}

/// Every own key is tested against every pattern; each match validates the
/// value against that pattern's sub-schema, so one key can accumulate
/// errors from several patterns.
pub(crate) fn validate_pattern_properties(
    validator: &Validator,
    instance: &mut Value,
    schema: &Map<String, Value>,
    ctx: &Context,
    out: &mut ValidationResult,
) -> Result<(), SchemaError> {
    let Some(patterns) = schema.get("patternProperties") else {
        return Ok(());
    };
    let patterns = patterns.as_object().ok_or(SchemaError::InvalidKeyword {
        keyword: "patternProperties",
        expected: "an object mapping patterns to schemas",
    })?;
    if !instance.is_object() {
        return Ok(());
    }
    let mut compiled = Vec::with_capacity(patterns.len());
    for (pattern, subschema) in patterns {
        let re = Regex::new(pattern).map_err(|source| SchemaError::InvalidPattern {
            pattern: pattern.clone(),
            source,
        })?;
        compiled.push((re, subschema));
    }
    let keys: Vec<String> = instance
        .as_object()
        .map(|object| object.keys().cloned().collect())
        .unwrap_or_default();
    for key in keys {
        for (re, subschema) in &compiled {
            if !re.is_match(&key) {
                continue;
            }
            let child_ctx = ctx.extend_key(&key);
            let child_value = instance
                .as_object_mut()
                .and_then(|object| object.get_mut(&key));
            let child = validator.validate_node(child_value, subschema, &child_ctx)?;
            out.import(child);
        }
    }
    Ok(())
}

/// Keys not named in `properties`. Skipped entirely when
/// `patternProperties` is present; the pattern pass owns extras then.
pub(crate) fn validate_additional_properties(
    validator: &Validator,
    instance: &mut Value,
    schema: &Map<String, Value>,
    ctx: &Context,
    out: &mut ValidationResult,
) -> Result<(), SchemaError> {
    if schema.contains_key("patternProperties") {
        return Ok(());
    }
    let Some(additional) = schema.get("additionalProperties") else {
        return Ok(());
    };
    if !instance.is_object() {
        return Ok(());
    }
    let declared = schema.get("properties").and_then(Value::as_object);
    let extras: Vec<String> = instance
        .as_object()
        .map(|object| {
            object
                .keys()
                .filter(|key| declared.map_or(true, |d| !d.contains_key(*key)))
                .cloned()
                .collect()
        })
        .unwrap_or_default();
    match additional {
        Value::Bool(true) => {}
        Value::Bool(false) => {
            for key in extras {
                out.push(ValidationError::at_property(
                    ctx,
                    &key,
                    ErrorKind::AdditionalProperties,
                    "does not exist in the schema",
                ));
            }
        }
        subschema @ Value::Object(_) => {
            for key in extras {
                let child_ctx = ctx.extend_key(&key);
                let child_value = instance
                    .as_object_mut()
                    .and_then(|object| object.get_mut(&key));
                let child = validator.validate_node(child_value, subschema, &child_ctx)?;
                out.import(child);
            }
        }
        _ => {
            return Err(SchemaError::InvalidKeyword {
                keyword: "additionalProperties",
                expected: "a boolean or a schema",
            })
        }
    }
    Ok(())
}

/// Presence-triggered requirements: a present key may demand sibling
/// properties (string or array form) or conformance of the whole enclosing
/// object to another schema.
pub(crate) fn validate_dependencies(
    validator: &Validator,
    instance: &mut Value,
    schema: &Map<String, Value>,
    ctx: &Context,
    out: &mut ValidationResult,
) -> Result<(), SchemaError> {
    let Some(dependencies) = schema.get("dependencies") else {
        return Ok(());
    };
    let dependencies = dependencies
        .as_object()
        .ok_or(SchemaError::InvalidKeyword {
            keyword: "dependencies",
            expected: "an object mapping names to dependencies",
        })?;
    if !instance.is_object() {
        return Ok(());
    }
    for (key, dependency) in dependencies {
        let present = instance
            .as_object()
            .map_or(false, |object| object.contains_key(key));
        if !present {
            continue;
        }
        let declared_at = format!("{}.{}", ctx.path(), key);
        match dependency {
            Value::String(sibling) => {
                require_sibling(instance, sibling, &declared_at, ctx, out);
            }
            Value::Array(siblings) => {
                for sibling in siblings {
                    let sibling = sibling.as_str().ok_or(SchemaError::InvalidKeyword {
                        keyword: "dependencies",
                        expected: "property names in an array dependency",
                    })?;
                    require_sibling(instance, sibling, &declared_at, ctx, out);
                }
            }
            Value::Object(_) => {
                // The whole enclosing object is re-validated, not just the
                // dependent property. Defaults stay off: this is a check,
                // not a descent.
                let nested = validator.validate_node(
                    Some(&mut *instance),
                    dependency,
                    &ctx.without_defaults(),
                )?;
                if !nested.valid() {
                    out.push(ValidationError {
                        property: ctx.path().to_string(),
                        message: format!("does not meet dependency required by {declared_at}"),
                        kind: ErrorKind::Dependencies,
                        nested: nested.take_errors(),
                    });
                }
            }
            _ => {
                return Err(SchemaError::InvalidKeyword {
                    keyword: "dependencies",
                    expected: "a property name, an array of names, or a schema",
                })
            }
        }
    }
    Ok(())
}

fn require_sibling(
    instance: &Value,
    sibling: &str,
    declared_at: &str,
    ctx: &Context,
    out: &mut ValidationResult,
) {
    let present = instance
        .as_object()
        .map_or(false, |object| object.contains_key(sibling));
    if !present {
        out.push(ValidationError::at_property(
            ctx,
            sibling,
            ErrorKind::Dependencies,
            format!("property {sibling} not found, required by {declared_at}"),
        ));
    }
}
