//! Attribute validators, one module per keyword family.
//!
//! Every routine has the same shape: it inspects one keyword on the schema
//! node, appends any violations to the shared result, and surfaces schema
//! defects as `SchemaError`. A routine that finds its keyword absent, or
//! the instance of a kind its constraint does not apply to, is a no-op.

pub(crate) mod array;
pub(crate) mod combinators;
pub(crate) mod number;
pub(crate) mod object;
pub(crate) mod string;
pub(crate) mod value;

use serde_json::{Map, Value};

/// Identifier used when reporting a sub-schema in a message: its `id`, else
/// its quoted `title`, else its `$ref`, else the literal `<subschema>`.
pub(crate) fn schema_id(schema: &Value) -> String {
    let Some(node) = schema.as_object() else {
        return "<subschema>".to_string();
    };
    if let Some(id) = node.get("id").and_then(Value::as_str) {
        return id.to_string();
    }
    if let Some(title) = node.get("title").and_then(Value::as_str) {
        return format!("\"{}\"", title);
    }
    if let Some(reference) = node.get("$ref").and_then(Value::as_str) {
        return reference.to_string();
    }
    "<subschema>".to_string()
}

/// Display label for one member of a `type` specification.
pub(crate) fn type_label(spec: &Value) -> String {
    match spec {
        Value::String(name) => name.clone(),
        Value::Object(node) => {
            let ident = node
                .get("id")
                .or_else(|| node.get("title"))
                .or_else(|| node.get("$ref"))
                .and_then(Value::as_str)
                .unwrap_or("subschema");
            format!("<{}>", ident)
        }
        other => other.to_string(),
    }
}

/// The string form of a scalar instance, used by `pattern` and `format`.
/// Containers and null have no string form.
pub(crate) fn string_form(instance: &Value) -> Option<String> {
    match instance {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Whether string-shaped checks (`pattern`, `format`, `enum`) are skipped
/// for this instance: null, or an empty string on a node that is not
/// `required: true`.
pub(crate) fn skip_blank(instance: &Value, schema: &Map<String, Value>) -> bool {
    match instance {
        Value::Null => true,
        Value::String(s) if s.is_empty() => {
            schema.get("required").and_then(Value::as_bool) != Some(true)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schema_id_preference_order() {
        assert_eq!(schema_id(&json!({"id": "a", "title": "b", "$ref": "#/c"})), "a");
        assert_eq!(schema_id(&json!({"title": "b", "$ref": "#/c"})), "\"b\"");
        assert_eq!(schema_id(&json!({"$ref": "#/c"})), "#/c");
        assert_eq!(schema_id(&json!({"type": "string"})), "<subschema>");
    }

    #[test]
    fn test_type_label() {
        assert_eq!(type_label(&json!("string")), "string");
        assert_eq!(type_label(&json!({"id": "point"})), "<point>");
        assert_eq!(type_label(&json!({"type": "object"})), "<subschema>");
    }

    #[test]
    fn test_string_form() {
        assert_eq!(string_form(&json!("x")), Some("x".to_string()));
        assert_eq!(string_form(&json!(1.5)), Some("1.5".to_string()));
        assert_eq!(string_form(&json!(true)), Some("true".to_string()));
        assert_eq!(string_form(&json!([])), None);
        assert_eq!(string_form(&json!(null)), None);
    }

    #[test]
    fn test_skip_blank() {
        let lenient = json!({"format": "alpha"});
        let strict = json!({"format": "alpha", "required": true});
        assert!(skip_blank(&json!(null), lenient.as_object().unwrap()));
        assert!(skip_blank(&json!(""), lenient.as_object().unwrap()));
        assert!(!skip_blank(&json!(""), strict.as_object().unwrap()));
        assert!(!skip_blank(&json!("x"), lenient.as_object().unwrap()));
    }
}
