//! The orchestrator: recursive schema/instance walk.

use serde_json::Value;

use crate::context::Context;
use crate::error::SchemaError;
use crate::formats::{Format, FormatRegistry};
use crate::keywords::{array, combinators, number, object, string, value};
use crate::result::{ErrorKind, ValidationError, ValidationResult};

/// Every keyword the engine understands, plus the annotation keys a schema
/// may legitimately carry. Consulted only under `strict_keywords`.
const KNOWN_KEYWORDS: &[&str] = &[
    "type",
    "properties",
    "patternProperties",
    "additionalProperties",
    "items",
    "additionalItems",
    "minProperties",
    "maxProperties",
    "minimum",
    "maximum",
    "exclusiveMinimum",
    "exclusiveMaximum",
    "divisibleBy",
    "multipleOf",
    "required",
    "pattern",
    "format",
    "minLength",
    "maxLength",
    "minItems",
    "maxItems",
    "uniqueItems",
    "dependencies",
    "enum",
    "not",
    "disallow",
    "allOf",
    "anyOf",
    "oneOf",
    // Annotations.
    "id",
    "$ref",
    "$schema",
    "title",
    "description",
    "default",
    "definitions",
];

/// Behavior switches for a [`Validator`].
#[derive(Debug, Clone)]
pub struct ValidatorOptions {
    /// Treat unrecognized schema keys as `SchemaError::UnknownKeyword`
    /// instead of ignoring them.
    pub strict_keywords: bool,
    /// Write a sub-schema's declared `default` into the instance when the
    /// corresponding key is absent. This is the engine's only side effect.
    pub apply_defaults: bool,
    /// Root segment of every property path; `instance` when unset.
    pub root_property: Option<String>,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        ValidatorOptions {
            strict_keywords: false,
            apply_defaults: true,
            root_property: None,
        }
    }
}

/// The validation engine.
///
/// Owns its format registry and options; independent `Validator` values
/// share nothing. Validation may populate declared defaults into the
/// instance it is given (see [`ValidatorOptions::apply_defaults`]); it has
/// no other side effects.
#[derive(Debug, Default)]
pub struct Validator {
    options: ValidatorOptions,
    formats: FormatRegistry,
}

impl Validator {
    /// Engine with default options and the built-in formats.
    pub fn new() -> Self {
        Validator::default()
    }

    pub fn with_options(options: ValidatorOptions) -> Self {
        Validator {
            options,
            formats: FormatRegistry::with_builtins(),
        }
    }

    /// Registers a named format. Configure before validating; the registry
    /// is never touched during a validation call.
    pub fn add_format(&mut self, name: impl Into<String>, format: Format) {
        self.formats.register(name, format);
    }

    pub fn formats(&self) -> &FormatRegistry {
        &self.formats
    }

    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    /// Validates `instance` against `schema` from a fresh root context.
    pub fn validate(
        &self,
        instance: &mut Value,
        schema: &Value,
    ) -> Result<ValidationResult, SchemaError> {
        let root = self.options.root_property.as_deref().unwrap_or("instance");
        let ctx = Context::new(root);
        self.validate_node(Some(instance), schema, &ctx)
    }

    /// Validates with a caller-seeded context, for embedding this engine as
    /// a nested check inside a larger framework. Error paths are prefixed
    /// with the context's path.
    pub fn validate_in_context(
        &self,
        instance: &mut Value,
        schema: &Value,
        ctx: &Context,
    ) -> Result<ValidationResult, SchemaError> {
        self.validate_node(Some(instance), schema, ctx)
    }

    /// One step of the recursive walk. `None` models an absent instance.
    pub(crate) fn validate_node(
        &self,
        instance: Option<&mut Value>,
        schema: &Value,
        ctx: &Context,
    ) -> Result<ValidationResult, SchemaError> {
        let node = schema.as_object().ok_or(SchemaError::NotAnObject)?;
        if self.options.strict_keywords {
            for key in node.keys() {
                if !KNOWN_KEYWORDS.contains(&key.as_str()) {
                    return Err(SchemaError::UnknownKeyword(key.clone()));
                }
            }
        }
        let ctx = ctx.enter(schema, instance.as_deref());
        let mut out = ValidationResult::new();

        // `required: true` on an absent or null instance short-circuits:
        // further constraints on a missing value are meaningless.
        let required = node.get("required").and_then(Value::as_bool) == Some(true);
        let absent = matches!(instance.as_deref(), None | Some(Value::Null));
        if required && absent {
            out.push(ValidationError::at(&ctx, ErrorKind::Required, "is required"));
            return Ok(out);
        }

        // Absence neutrality: no keyword but `required` constrains a value
        // that is not there.
        let Some(instance) = instance else {
            return Ok(out);
        };

        // Fixed keyword enumeration; this order is the error order.
        value::validate_type(self, instance, node, &ctx, &mut out)?;
        combinators::validate_not(self, instance, node, &ctx, &mut out)?;
        value::validate_enum(instance, node, &ctx, &mut out)?;
        string::validate_format(self, instance, node, &ctx, &mut out)?;
        number::validate_bounds(instance, node, &ctx, &mut out)?;
        number::validate_divisor(instance, node, &ctx, &mut out)?;
        string::validate_length(instance, node, &ctx, &mut out)?;
        string::validate_pattern(instance, node, &ctx, &mut out)?;
        array::validate_item_counts(instance, node, &ctx, &mut out)?;
        array::validate_unique_items(instance, node, &ctx, &mut out)?;
        array::validate_items(self, instance, node, &ctx, &mut out)?;
        object::validate_property_counts(instance, node, &ctx, &mut out)?;
        object::validate_required_names(instance, node, &ctx, &mut out)?;
        object::validate_properties(self, instance, node, &ctx, &mut out)?;
        object::validate_pattern_properties(self, instance, node, &ctx, &mut out)?;
        object::validate_additional_properties(self, instance, node, &ctx, &mut out)?;
        object::validate_dependencies(self, instance, node, &ctx, &mut out)?;
        combinators::validate_all_of(self, instance, node, &ctx, &mut out)?;
        combinators::validate_any_of(self, instance, node, &ctx, &mut out)?;
        combinators::validate_one_of(self, instance, node, &ctx, &mut out)?;
        Ok(out)
    }
}

/// Validates with a default [`Validator`].
pub fn validate(instance: &mut Value, schema: &Value) -> Result<ValidationResult, SchemaError> {
    Validator::new().validate(instance, schema)
}
