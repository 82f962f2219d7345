//! Boolean schema composition: `allOf`, `anyOf`, `oneOf`, `not`/`disallow`.

use serde_json::{Map, Value};

use crate::context::Context;
use crate::error::SchemaError;
use crate::result::{ErrorKind, ValidationError, ValidationResult};
use crate::types::test_type;
use crate::validator::Validator;

use super::{schema_id, type_label};

fn combinator_branches<'a>(
    schema: &'a Map<String, Value>,
    keyword: &'static str,
) -> Result<Option<&'a Vec<Value>>, SchemaError> {
    match schema.get(keyword) {
        None => Ok(None),
        Some(Value::Array(branches)) => Ok(Some(branches)),
        Some(_) => Err(SchemaError::CombinatorNotArray(keyword)),
    }
}

/// Branch trials never write defaults into the instance.
fn trial(
    validator: &Validator,
    instance: &mut Value,
    branch: &Value,
    ctx: &Context,
) -> Result<ValidationResult, SchemaError> {
    validator.validate_node(Some(instance), branch, &ctx.without_defaults())
}

pub(crate) fn validate_all_of(
    validator: &Validator,
    instance: &mut Value,
    schema: &Map<String, Value>,
    ctx: &Context,
    out: &mut ValidationResult,
) -> Result<(), SchemaError> {
    let Some(branches) = combinator_branches(schema, "allOf")? else {
        return Ok(());
    };
    for branch in branches {
        let result = trial(validator, instance, branch, ctx)?;
        if !result.valid() {
            let nested = result.take_errors();
            out.push(ValidationError {
                property: ctx.path().to_string(),
                message: format!(
                    "does not match allOf schema {} with {} error[s]:",
                    schema_id(branch),
                    nested.len()
                ),
                kind: ErrorKind::AllOf,
                nested,
            });
        }
    }
    Ok(())
}

pub(crate) fn validate_any_of(
    validator: &Validator,
    instance: &mut Value,
    schema: &Map<String, Value>,
    ctx: &Context,
    out: &mut ValidationResult,
) -> Result<(), SchemaError> {
    let Some(branches) = combinator_branches(schema, "anyOf")? else {
        return Ok(());
    };
    let mut collected = ValidationResult::new();
    for branch in branches {
        let result = trial(validator, instance, branch, ctx)?;
        if result.valid() {
            return Ok(());
        }
        collected.import(result);
    }
    // No branch matched: surface every branch's raw diagnostics, flattened.
    out.import(collected);
    Ok(())
}

pub(crate) fn validate_not(
    validator: &Validator,
    instance: &Value,
    schema: &Map<String, Value>,
    ctx: &Context,
    out: &mut ValidationResult,
) -> Result<(), SchemaError> {
    let Some(prohibited) = schema.get("not").or_else(|| schema.get("disallow")) else {
        return Ok(());
    };
    if !test_type(validator, instance, prohibited, ctx)? {
        return Ok(());
    }
    // A prohibited schema that pins down required names gets per-name
    // diagnostics; anything else is reported as one prohibited-type error.
    let required = prohibited
        .as_object()
        .and_then(|node| node.get("required"))
        .and_then(Value::as_array);
    if let Some(names) = required {
        let mut named_any = false;
        for name in names {
            if let Some(name) = name.as_str() {
                named_any = true;
                out.push(ValidationError::at_property(
                    ctx,
                    name,
                    ErrorKind::Not,
                    "can not be present",
                ));
            }
        }
        if named_any {
            return Ok(());
        }
    }
    let label = match prohibited {
        Value::String(name) => name.clone(),
        Value::Array(members) => {
            let labels: Vec<String> = members.iter().map(type_label).collect();
            format!("[{}]", labels.join(", "))
        }
        _ => schema_id(prohibited),
    };
    out.push(ValidationError::at(
        ctx,
        ErrorKind::Not,
        format!("is of prohibited type {label}"),
    ));
    Ok(())
}

pub(crate) fn validate_one_of(
    validator: &Validator,
    instance: &mut Value,
    schema: &Map<String, Value>,
    ctx: &Context,
    out: &mut ValidationResult,
) -> Result<(), SchemaError> {
    let Some(branches) = combinator_branches(schema, "oneOf")? else {
        return Ok(());
    };
    let dependency_branches = branches
        .iter()
        .filter(|branch| {
            branch
                .as_object()
                .map_or(false, |node| node.contains_key("dependencies"))
        })
        .count();

    // Mutually-exclusive-dependency fast path: exactly two branches that
    // encode an if-A-then-B / if-A-then-not-B pair via their dependencies.
    if branches.len() == 2
        && dependency_branches == 2
        && mutually_exclusive(&branches[0], &branches[1])
    {
        let mut passes = 0usize;
        let mut real_failure: Option<ValidationResult> = None;
        for branch in branches {
            let result = trial(validator, instance, branch, ctx)?;
            if result.valid() {
                passes += 1;
            } else if !dependency_only(&result) && real_failure.is_none() {
                // A branch that fails only through its dependencies is
                // merely guarded off, which exclusivity expects; only a
                // non-dependency failure is a real one.
                real_failure = Some(result);
            }
        }
        if passes != 1 {
            match real_failure {
                Some(failure) => out.import(failure),
                None => out.push(not_exactly_one(branches, ctx)),
            }
        }
        return Ok(());
    }

    // No-dependencies fast path: count passes, aggregating diagnostics so a
    // total miss reports every branch's errors.
    if dependency_branches == 0 {
        let mut passes = 0usize;
        let mut collected = ValidationResult::new();
        for branch in branches {
            let result = trial(validator, instance, branch, ctx)?;
            if result.valid() {
                passes += 1;
            } else {
                collected.import(result);
            }
        }
        match passes {
            1 => {}
            0 => out.import(collected),
            _ => out.push(not_exactly_one(branches, ctx)),
        }
        return Ok(());
    }

    // Generic path: plain boolean counting.
    let mut passes = 0usize;
    for branch in branches {
        if trial(validator, instance, branch, ctx)?.valid() {
            passes += 1;
        }
    }
    if passes != 1 {
        out.push(not_exactly_one(branches, ctx));
    }
    Ok(())
}

fn not_exactly_one(branches: &[Value], ctx: &Context) -> ValidationError {
    let ids: Vec<String> = branches.iter().map(schema_id).collect();
    ValidationError::at(
        ctx,
        ErrorKind::OneOf,
        format!("is not exactly one from [{}]", ids.join(", ")),
    )
}

fn dependency_only(result: &ValidationResult) -> bool {
    result
        .errors()
        .iter()
        .all(|error| error.kind == ErrorKind::Dependencies)
}

/// Litmus test for the two-branch exclusivity pattern: for every dependency
/// key declared by both branches, stripping one level of `not` from deep
/// clones of the two dependency sub-schemas must leave structurally
/// identical trees, and at least one side must actually have had a `not`.
fn mutually_exclusive(a: &Value, b: &Value) -> bool {
    let deps_a = a.get("dependencies").and_then(Value::as_object);
    let deps_b = b.get("dependencies").and_then(Value::as_object);
    let (Some(deps_a), Some(deps_b)) = (deps_a, deps_b) else {
        return false;
    };
    let shared: Vec<&String> = deps_a.keys().filter(|key| deps_b.contains_key(*key)).collect();
    if shared.is_empty() {
        return false;
    }
    for key in shared {
        let mut clone_a = json_vet_util::deep_clone(&deps_a[key.as_str()]);
        let mut clone_b = json_vet_util::deep_clone(&deps_b[key.as_str()]);
        let stripped_a = strip_not(&mut clone_a);
        let stripped_b = strip_not(&mut clone_b);
        if !stripped_a && !stripped_b {
            return false;
        }
        if !json_vet_util::deep_equal(&clone_a, &clone_b) {
            return false;
        }
    }
    true
}

/// Removes one level of `not` wrapping wherever it occurs in the tree,
/// hoisting the negated schema's entries into the enclosing node. Hoisted
/// content is not re-stripped. Operates on scratch clones only.
fn strip_not(value: &mut Value) -> bool {
    match value {
        Value::Object(node) => {
            let hoisted = match node.remove("not") {
                Some(Value::Object(negated)) => Some(negated),
                Some(other) => {
                    node.insert("not".to_string(), other);
                    None
                }
                None => None,
            };
            let mut stripped = hoisted.is_some();
            for (_, child) in node.iter_mut() {
                stripped |= strip_not(child);
            }
            if let Some(negated) = hoisted {
                for (key, val) in negated {
                    node.insert(key, val);
                }
            }
            stripped
        }
        Value::Array(items) => {
            let mut stripped = false;
            for item in items.iter_mut() {
                stripped |= strip_not(item);
            }
            stripped
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strip_not_hoists_one_level() {
        let mut v = json!({"properties": {"q": {"not": {"required": ["r"]}}}});
        assert!(strip_not(&mut v));
        assert_eq!(v, json!({"properties": {"q": {"required": ["r"]}}}));
    }

    #[test]
    fn test_strip_not_leaves_plain_schema() {
        let mut v = json!({"properties": {"q": {"required": ["r"]}}});
        assert!(!strip_not(&mut v));
        assert_eq!(v, json!({"properties": {"q": {"required": ["r"]}}}));
    }

    #[test]
    fn test_strip_not_does_not_restrip_hoisted_content() {
        let mut v = json!({"not": {"not": {"required": ["r"]}}});
        assert!(strip_not(&mut v));
        assert_eq!(v, json!({"not": {"required": ["r"]}}));
    }

    #[test]
    fn test_mutually_exclusive_pair() {
        let a = json!({
            "dependencies": {"p": {"properties": {"q": {"required": ["r"]}}}},
            "properties": {"p": {"enum": ["1", "2"]}}
        });
        let b = json!({
            "dependencies": {"p": {"properties": {"q": {"not": {"required": ["r"]}}}}},
            "properties": {"p": {"enum": ["3", "4"]}}
        });
        assert!(mutually_exclusive(&a, &b));
    }

    #[test]
    fn test_not_exclusive_without_any_not() {
        let a = json!({"dependencies": {"p": {"required": ["x"]}}});
        let b = json!({"dependencies": {"p": {"required": ["x"]}}});
        assert!(!mutually_exclusive(&a, &b));
    }

    #[test]
    fn test_not_exclusive_when_post_strip_differs() {
        let a = json!({"dependencies": {"p": {"required": ["x"]}}});
        let b = json!({"dependencies": {"p": {"not": {"required": ["y"]}}}});
        assert!(!mutually_exclusive(&a, &b));
    }

    #[test]
    fn test_not_exclusive_without_shared_key() {
        let a = json!({"dependencies": {"p": {"not": {"required": ["x"]}}}});
        let b = json!({"dependencies": {"q": {"required": ["x"]}}});
        assert!(!mutually_exclusive(&a, &b));
    }
}
