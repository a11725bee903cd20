use jval_validator::{validate, Options, ValidationReport, Validator, ViolationKind};
use serde_json::{json, Value};

fn check(schema: Value, instance: Value) -> ValidationReport {
    validate(&instance, &schema).expect("schema must build")
}

#[test]
fn test_empty_schema_accepts_anything() {
    for instance in [
        json!(null),
        json!(true),
        json!(42),
        json!("text"),
        json!([1, "a", null]),
        json!({ "nested": { "deep": [1, 2] } }),
    ] {
        let report = check(json!({}), instance);
        assert!(report.valid);
        assert!(report.violations.is_empty());
    }
}

#[test]
fn test_report_invariant_and_idempotence() {
    let schema = json!({
        "type": "object",
        "properties": { "a": { "type": "string" }, "b": { "minimum": 10 } },
        "required": ["c"]
    });
    let instance = json!({ "a": 1, "b": 3 });
    let first = check(schema.clone(), instance.clone());
    let second = check(schema, instance);
    assert_eq!(first.valid, first.violations.is_empty());
    assert_eq!(first, second);
    let rendered: Vec<String> = first.violations.iter().map(|v| v.to_string()).collect();
    let rendered_again: Vec<String> = second.violations.iter().map(|v| v.to_string()).collect();
    assert_eq!(rendered, rendered_again);
}

#[test]
fn test_required_missing_property() {
    let report = check(json!({ "required": ["a"] }), json!({}));
    assert_eq!(report.violations.len(), 1);
    let violation = &report.violations[0];
    assert_eq!(violation.keys.to_string(), "");
    assert_eq!(violation.keyword(), "required");
    assert!(violation.to_string().contains("\"a\""));
}

#[test]
fn test_required_one_violation_per_missing_name() {
    let report = check(json!({ "required": ["a", "b"] }), json!({ "b": 1 }));
    assert_eq!(report.violations.len(), 1);
    assert!(matches!(
        &report.violations[0].kind,
        ViolationKind::Required { name } if name == "a"
    ));

    let report = check(json!({ "required": ["a", "b"] }), json!({}));
    assert_eq!(report.violations.len(), 2);
}

#[test]
fn test_integral_number_satisfies_integer() {
    let schema = json!({ "type": "integer", "minimum": 5 });
    let report = check(schema.clone(), json!(3));
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].keyword(), "minimum");

    let report = check(schema.clone(), json!(7.0));
    assert!(report.valid);

    let report = check(schema, json!(7.5));
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].keyword(), "type");
}

#[test]
fn test_items_violation_carries_index_path() {
    let schema = json!({ "type": "array", "items": { "type": "string" } });
    let report = check(schema, json!(["x", 1, "y"]));
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].keys.to_string(), "1");
    assert_eq!(report.violations[0].keyword(), "type");
}

#[test]
fn test_oneof_reports_match_count() {
    let schema = json!({
        "oneOf": [{ "type": "integer" }, { "minimum": 0 }]
    });
    let report = check(schema, json!(3));
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].keyword(), "oneOf");
    assert_eq!(
        report.violations[0].to_string(),
        "->oneOf: 2 branches matched, expected exactly 1"
    );

    let schema = json!({ "oneOf": [{ "type": "string" }, { "type": "boolean" }] });
    let report = check(schema, json!(3));
    assert_eq!(report.violations.len(), 1);
    assert!(matches!(
        report.violations[0].kind,
        ViolationKind::OneOf { matched: 0 }
    ));
}

#[test]
fn test_additional_properties_false() {
    let schema = json!({
        "properties": { "n": { "type": "number" } },
        "additionalProperties": false
    });
    let report = check(schema, json!({ "n": 1, "extra": true }));
    assert_eq!(report.violations.len(), 1);
    let violation = &report.violations[0];
    assert_eq!(violation.keyword(), "additionalProperties");
    assert!(matches!(
        &violation.kind,
        ViolationKind::AdditionalProperties { name } if name == "extra"
    ));
}

#[test]
fn test_additional_properties_schema() {
    let schema = json!({
        "properties": { "n": { "type": "number" } },
        "additionalProperties": { "type": "string" }
    });
    let report = check(schema, json!({ "n": 1, "extra": true, "tag": "ok" }));
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].keys.to_string(), "extra");
    assert_eq!(report.violations[0].keyword(), "type");
}

#[test]
fn test_anyof_single_aggregate_violation() {
    let schema = json!({
        "anyOf": [{ "type": "string" }, { "minimum": 10 }]
    });
    let report = check(schema, json!(3));
    assert_eq!(report.violations.len(), 1);
    let violation = &report.violations[0];
    assert_eq!(violation.keyword(), "anyOf");
    // Branch failures appear in the message, not as separate records
    assert!(violation.to_string().contains("no branch matched"));
    assert!(violation.to_string().contains("minimum"));

    let report = check(json!({ "anyOf": [{ "type": "string" }, {}] }), json!(3));
    assert!(report.valid);
}

#[test]
fn test_allof_records_every_branch_failure() {
    let schema = json!({
        "allOf": [
            { "minimum": 10 },
            { "multipleOf": 7 },
            { "maximum": 100 }
        ]
    });
    let report = check(schema, json!(3));
    assert_eq!(report.violations.len(), 2);
    assert_eq!(report.violations[0].keyword(), "minimum");
    assert_eq!(report.violations[1].keyword(), "multipleOf");
}

#[test]
fn test_not() {
    let report = check(json!({ "not": { "type": "string" } }), json!("nope"));
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].keyword(), "not");

    let report = check(json!({ "not": { "type": "string" } }), json!(1));
    assert!(report.valid);
}

#[test]
fn test_array_counts_and_uniqueness_all_reported() {
    let schema = json!({ "minItems": 3, "uniqueItems": true });
    let report = check(schema, json!([1, 1.0]));
    // Both logically distinct checks keep their own record, in keyword order
    assert_eq!(report.violations.len(), 2);
    assert_eq!(report.violations[0].keyword(), "minItems");
    assert_eq!(report.violations[1].keyword(), "uniqueItems");
}

#[test]
fn test_enum_and_const_structural_equality() {
    let schema = json!({ "enum": [{ "x": 1, "y": 2 }, [1, 2]] });
    // object member order does not matter
    let instance: Value = serde_json::from_str(r#"{"y":2,"x":1}"#).unwrap();
    assert!(check(schema.clone(), instance).valid);
    // array order does
    let report = check(schema, json!([2, 1]));
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].keyword(), "enum");

    // numbers compare by value
    assert!(check(json!({ "const": 1 }), json!(1.0)).valid);
    let report = check(json!({ "const": "a" }), json!("b"));
    assert_eq!(report.violations[0].keyword(), "const");
}

#[test]
fn test_pattern_is_unanchored() {
    let schema = json!({ "pattern": "b+c" });
    assert!(check(schema.clone(), json!("aaabbbccc")).valid);
    let report = check(schema, json!("abd"));
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].keyword(), "pattern");
}

#[test]
fn test_multiple_of_negative_values() {
    let schema = json!({ "multipleOf": 0.5 });
    assert!(check(schema.clone(), json!(-2.5)).valid);
    let report = check(schema, json!(-2.4));
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].keyword(), "multipleOf");

    assert!(check(json!({ "multipleOf": 2 }), json!(-4)).valid);
    let report = check(json!({ "multipleOf": 2 }), json!(-3));
    assert_eq!(report.violations[0].keyword(), "multipleOf");
}

#[test]
fn test_length_counts_code_points() {
    let schema = json!({ "minLength": 3, "maxLength": 3 });
    assert!(check(schema.clone(), json!("héé")).valid);
    let report = check(schema.clone(), json!("hé"));
    assert_eq!(report.violations[0].keyword(), "minLength");
    let report = check(schema, json!("hééé"));
    assert_eq!(report.violations[0].keyword(), "maxLength");
}

#[test]
fn test_constraints_gate_on_instance_kind() {
    // numeric and string constraints simply do not apply to other kinds
    let schema = json!({ "minimum": 5, "minLength": 10, "minItems": 4 });
    assert!(check(schema, json!(true)).valid);
}

#[test]
fn test_formats() {
    let cases = [
        ("email", "user@example.com", "not-an-email"),
        ("uuid", "550e8400-e29b-41d4-a716-446655440000", "550e8400"),
        ("ipv4", "127.0.0.1", "999.0.0.1"),
        ("ipv6", "::1", "localhost"),
        ("date", "2024-02-29", "2024-02-30"),
        ("date-time", "2024-02-29T10:00:00Z", "2024-02-29 10:00:00"),
        ("time", "10:00:00Z", "25:00:00Z"),
        ("uri", "https://example.com/x", "not a uri"),
        ("regex", "^a+$", "(unclosed"),
        ("hostname", "example.com", "-example.com"),
    ];
    for (format, good, bad) in cases {
        let schema = json!({ "format": format });
        assert!(check(schema.clone(), json!(good)).valid, "format {}", format);
        let report = check(schema, json!(bad));
        assert_eq!(report.violations.len(), 1, "format {}", format);
        assert_eq!(report.violations[0].keyword(), "format");
    }

    // unrecognized format names validate nothing
    assert!(check(json!({ "format": "no-such-format" }), json!("x")).valid);
}

#[test]
fn test_contains() {
    let schema = json!({ "contains": { "type": "string" } });
    assert!(check(schema.clone(), json!([1, 2, "x"])).valid);
    let report = check(schema, json!([1, 2]));
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].keyword(), "contains");
}

#[test]
fn test_pattern_properties() {
    let schema = json!({
        "properties": { "name": { "type": "string" } },
        "patternProperties": { "^x-": { "type": "number" } },
        "additionalProperties": false
    });
    assert!(check(schema.clone(), json!({ "name": "a", "x-rate": 3 })).valid);

    // a pattern match both validates and exempts from additionalProperties
    let report = check(schema.clone(), json!({ "x-rate": "fast" }));
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].keys.to_string(), "x-rate");
    assert_eq!(report.violations[0].keyword(), "type");

    let report = check(schema, json!({ "other": 1 }));
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].keyword(), "additionalProperties");
}

#[test]
fn test_properties_count() {
    let schema = json!({ "minProperties": 1, "maxProperties": 2 });
    assert!(check(schema.clone(), json!({ "a": 1 })).valid);
    let report = check(schema.clone(), json!({}));
    assert_eq!(report.violations[0].keyword(), "minProperties");
    let report = check(schema, json!({ "a": 1, "b": 2, "c": 3 }));
    assert_eq!(report.violations[0].keyword(), "maxProperties");
}

#[test]
fn test_conditional() {
    let schema = json!({
        "if": { "properties": { "kind": { "const": "user" } }, "required": ["kind"] },
        "then": { "required": ["name"] },
        "else": { "required": ["id"] }
    });
    assert!(check(schema.clone(), json!({ "kind": "user", "name": "a" })).valid);

    let report = check(schema.clone(), json!({ "kind": "user" }));
    assert_eq!(report.violations.len(), 1);
    assert!(matches!(
        &report.violations[0].kind,
        ViolationKind::Required { name } if name == "name"
    ));

    let report = check(schema, json!({ "kind": "group" }));
    assert!(matches!(
        &report.violations[0].kind,
        ViolationKind::Required { name } if name == "id"
    ));
}

#[test]
fn test_exclusive_bounds_both_drafts() {
    // draft-6 numeric form
    let schema = json!({ "exclusiveMinimum": 3 });
    assert!(check(schema.clone(), json!(4)).valid);
    let report = check(schema, json!(3));
    assert_eq!(report.violations[0].keyword(), "exclusiveMinimum");

    // draft-4 boolean form normalizes to the same check
    let schema = json!({ "minimum": 3, "exclusiveMinimum": true });
    let report = check(schema, json!(3));
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].keyword(), "exclusiveMinimum");
}

#[test]
fn test_recursive_defs() {
    let schema = json!({
        "$defs": {
            "node": {
                "type": "object",
                "properties": {
                    "value": { "type": "integer" },
                    "next": { "$ref": "#/$defs/node" }
                },
                "required": ["value"]
            }
        },
        "$ref": "#/$defs/node"
    });
    let valid = json!({ "value": 1, "next": { "value": 2, "next": { "value": 3 } } });
    assert!(check(schema.clone(), valid).valid);

    let invalid = json!({ "value": 1, "next": { "value": "two" } });
    let report = check(schema, invalid);
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].keys.to_string(), "next.value");
}

#[test]
fn test_def_names_with_punctuation() {
    let schema = json!({
        "$defs": { "foo-bar": { "type": "integer" } },
        "properties": { "x": { "$ref": "#/$defs/foo-bar" } }
    });
    assert!(check(schema.clone(), json!({ "x": 1 })).valid);

    let report = check(schema, json!({ "x": "a" }));
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].keys.to_string(), "x");
    assert_eq!(report.violations[0].keyword(), "type");
}

#[test]
fn test_max_depth_guard_reports_once() {
    let schema = json!({
        "$defs": {
            "loop": { "allOf": [{ "$ref": "#/$defs/loop" }] }
        },
        "$ref": "#/$defs/loop"
    });
    let validator = Validator::with_options(&schema, Options { max_depth: 16 }).unwrap();
    let report = validator.validate(&json!(1));
    assert!(!report.valid);
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].keyword(), "maxDepth");
    assert_eq!(report.violations[0].to_string(), "->maxDepth: schema too deep");
}

#[test]
fn test_validator_reuse() {
    let schema = json!({ "type": "string" });
    let validator = Validator::new(&schema).unwrap();
    assert!(validator.validate(&json!("a")).valid);
    assert!(!validator.validate(&json!(1)).valid);
    assert!(validator.validate(&json!("b")).valid);
}

#[test]
fn test_violation_rendering() {
    let schema = json!({
        "properties": {
            "profile": {
                "properties": {
                    "tags": { "items": { "maxLength": 2 } }
                }
            }
        }
    });
    let report = check(schema, json!({ "profile": { "tags": ["ok", "toolong"] } }));
    assert_eq!(report.violations.len(), 1);
    assert_eq!(
        report.violations[0].to_string(),
        "profile.tags.1->maxLength: the string has more than 2 characters"
    );
}

#[test]
fn test_report_serialization() {
    let schema = json!({
        "properties": { "tags": { "maxItems": 1 } }
    });
    let report = check(schema, json!({ "tags": [1, 2] }));
    let serialized = serde_json::to_value(&report).unwrap();
    assert_eq!(
        serialized,
        json!({
            "valid": false,
            "violations": [{
                "path": "tags",
                "keyword": "maxItems",
                "message": "the array has more than 1 items"
            }]
        })
    );
}

#[test]
fn test_keyword_order_at_same_path() {
    // multiple failures at one path come out in fixed keyword order
    let schema = json!({
        "type": "integer",
        "enum": [10],
        "minimum": 5
    });
    let report = check(schema, json!(2.5));
    let keywords: Vec<&str> = report.violations.iter().map(|v| v.keyword()).collect();
    assert_eq!(keywords, ["type", "enum", "minimum"]);
}

#[test]
fn test_contradictory_bounds_build_but_never_pass() {
    let schema = json!({ "minimum": 10, "maximum": 5 });
    let report = check(schema, json!(7));
    assert_eq!(report.violations.len(), 2);
}

#[test]
fn test_invalid_schema_is_fatal() {
    assert!(validate(&json!(1), &json!({ "properties": 5 })).is_err());
    assert!(validate(&json!(1), &json!({ "pattern": "(bad" })).is_err());
}
