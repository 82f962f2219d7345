//! Malformed schemas are configuration defects, raised immediately and
//! never reported as data-validation failures.

use json_vet::{validate, SchemaError, Validator, ValidatorOptions};
use serde_json::json;

#[test]
fn enum_must_be_an_array() {
    let mut v = json!("x");
    assert!(matches!(
        validate(&mut v, &json!({"enum": "x"})),
        Err(SchemaError::EnumNotArray)
    ));
}

#[test]
fn combinator_operands_must_be_arrays() {
    for keyword in ["allOf", "anyOf", "oneOf"] {
        let mut v = json!(1);
        let schema = json!({keyword: {"type": "number"}});
        assert!(matches!(
            validate(&mut v, &schema),
            Err(SchemaError::CombinatorNotArray(k)) if k == keyword
        ));
    }
}

#[test]
fn zero_divisor_is_a_schema_defect_not_a_validation_failure() {
    for keyword in ["divisibleBy", "multipleOf"] {
        let mut v = json!(4);
        let schema = json!({keyword: 0});
        assert!(matches!(
            validate(&mut v, &schema),
            Err(SchemaError::ZeroDivisor(k)) if k == keyword
        ));
    }
}

#[test]
fn zero_divisor_is_raised_even_for_non_numeric_instances() {
    // The schema is unusable regardless of what the data looks like.
    let mut v = json!("not a number");
    assert!(matches!(
        validate(&mut v, &json!({"multipleOf": 0})),
        Err(SchemaError::ZeroDivisor(_))
    ));
}

#[test]
fn unknown_format_name_is_a_configuration_error() {
    let mut v = json!("x");
    assert!(matches!(
        validate(&mut v, &json!({"format": "no-such-format"})),
        Err(SchemaError::UnknownFormat(name)) if name == "no-such-format"
    ));
}

#[test]
fn unknown_format_is_not_raised_for_skipped_instances() {
    // A null instance skips the format check before the lookup happens, so
    // nothing forces the configuration error here.
    let mut v = json!(null);
    assert!(validate(&mut v, &json!({"format": "no-such-format"}))
        .unwrap()
        .valid());
}

#[test]
fn invalid_pattern_is_reported_with_its_source() {
    let mut v = json!("x");
    match validate(&mut v, &json!({"pattern": "("})) {
        Err(SchemaError::InvalidPattern { pattern, .. }) => assert_eq!(pattern, "("),
        other => panic!("expected InvalidPattern, got {other:?}"),
    }
}

#[test]
fn invalid_pattern_properties_key_is_reported() {
    let mut v = json!({"a": 1});
    assert!(matches!(
        validate(&mut v, &json!({"patternProperties": {"[": {}}})),
        Err(SchemaError::InvalidPattern { .. })
    ));
}

#[test]
fn non_object_schema_nodes_are_rejected() {
    let mut v = json!({"a": 1});
    assert!(matches!(
        validate(&mut v, &json!({"properties": {"a": "not-a-schema"}})),
        Err(SchemaError::NotAnObject)
    ));
}

#[test]
fn malformed_keyword_operands_are_rejected() {
    let mut v = json!([1, 2]);
    assert!(matches!(
        validate(&mut v, &json!({"items": "not-a-schema"})),
        Err(SchemaError::InvalidKeyword { keyword: "items", .. })
    ));

    let mut v = json!(1);
    assert!(matches!(
        validate(&mut v, &json!({"minimum": "one"})),
        Err(SchemaError::InvalidKeyword { keyword: "minimum", .. })
    ));
}

#[test]
fn invalid_type_specification_is_rejected() {
    let mut v = json!(1);
    assert!(matches!(
        validate(&mut v, &json!({"type": 3})),
        Err(SchemaError::InvalidTypeSpec)
    ));
}

#[test]
fn strict_keywords_rejects_unrecognized_keys() {
    let strict = Validator::with_options(ValidatorOptions {
        strict_keywords: true,
        ..ValidatorOptions::default()
    });
    let mut v = json!("x");
    assert!(matches!(
        strict.validate(&mut v, &json!({"mnLength": 3})),
        Err(SchemaError::UnknownKeyword(key)) if key == "mnLength"
    ));
    // Annotation keys stay legal in strict mode.
    let mut v = json!("x");
    assert!(strict
        .validate(
            &mut v,
            &json!({"title": "name", "description": "d", "type": "string"})
        )
        .unwrap()
        .valid());
}

#[test]
fn lenient_mode_ignores_unrecognized_keys() {
    let mut v = json!("x");
    assert!(validate(&mut v, &json!({"mnLength": 300})).unwrap().valid());
}
