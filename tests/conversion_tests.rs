//! End-to-end conversion tests through the public parser API.

use avrocast::{convert, AvroValue, CoercionOptions, Error, RecordParser, ValueError};
use serde_json::json;

// ============================================================================
// Fixtures
// ============================================================================

const WIZARD_SCHEMA: &str = r#"
{
    "name": "Wizard",
    "type": "record",
    "namespace": "com.example.wizards",
    "fields": [
        {"name": "name", "type": ["null", "string"], "default": null},
        {"name": "curse", "type": "string"},
        {"name": "house", "type": "string", "default": "slytherin"},
        {"name": "wand", "type": ["null", "string"], "default": null},
        {"name": "muggle", "type": "null", "default": null},
        {"name": "has_broom", "type": "boolean", "default": true},
        {"name": "spell_bytes", "type": "bytes"},
        {"name": "spell_performance", "type": "float", "default": 50.05},
        {"name": "spell_affinity", "type": "double", "default": 324235235.5235325},
        {"name": "good_spells", "type": "int", "default": 0},
        {"name": "evil_spells", "type": "long", "default": 3},
        {"name": "muggles_killed", "type": ["null", "long"], "default": null},
        {
            "name": "testing",
            "type": "record",
            "fields": [
                {"name": "name", "type": ["null", "string"], "default": null},
                {"name": "curse", "type": "string"}
            ]
        },
        {
            "name": "metadata",
            "type": {
                "name": "points",
                "type": "record",
                "fields": [
                    {"name": "house", "type": ["null", "string"], "default": null},
                    {"name": "points", "type": "int"}
                ]
            }
        }
    ]
}
"#;

const FULL_RECORD: &str = r#"
{
    "name": "Tom",
    "curse": "imperius",
    "house": "slytherin",
    "wand": "unicorn",
    "has_broom": false,
    "spell_bytes": "YWxvaG9tb3Jh",
    "spell_performance": 89.67,
    "spell_affinity": 4.940656458412465441765687928682213723651e-321,
    "bad_spells": 42949672951234,
    "evil_spells": 7,
    "good_spells": 1,
    "muggles_killed": 3,
    "testing": {"name": "test", "curse": "bleh"},
    "metadata": {"house": "slytherin", "points": 123}
}
"#;

const SPARSE_RECORD: &str = r#"
{
    "name": null,
    "curse": "cruciatus",
    "spell_bytes": "YWxvaG9tb3Jh",
    "spell_performance": 89.67,
    "testing": {"curse": "bleh"},
    "metadata": {"points": 123}
}
"#;

fn single_field_schema(field: serde_json::Value) -> String {
    json!({"name": "Test", "type": "record", "fields": [field]}).to_string()
}

fn parse_one(
    field: serde_json::Value,
    record: serde_json::Value,
    options: CoercionOptions,
) -> Result<AvroValue, ValueError> {
    let parser = RecordParser::new(&single_field_schema(field), options).unwrap();
    parser
        .parse_value(&record)
        .map(|r| r.get("test").cloned().unwrap())
}

fn string(s: &str) -> AvroValue {
    AvroValue::String(s.to_string())
}

fn union(branch: &str, value: AvroValue) -> AvroValue {
    AvroValue::Union(branch.to_string(), Box::new(value))
}

// ============================================================================
// Whole Records
// ============================================================================

#[test]
fn test_full_record_without_defaults() {
    let parser = RecordParser::new(WIZARD_SCHEMA, CoercionOptions::default()).unwrap();
    let record = parser.parse(FULL_RECORD.as_bytes()).unwrap();

    assert_eq!(record.get("name"), Some(&union("string", string("Tom"))));
    assert_eq!(record.get("curse"), Some(&string("imperius")));
    assert_eq!(record.get("wand"), Some(&union("string", string("unicorn"))));
    assert_eq!(record.get("muggle"), Some(&AvroValue::Null));
    assert_eq!(record.get("has_broom"), Some(&AvroValue::Boolean(false)));
    assert_eq!(
        record.get("spell_bytes"),
        Some(&AvroValue::Bytes(b"YWxvaG9tb3Jh".to_vec()))
    );
    assert_eq!(record.get("spell_performance"), Some(&AvroValue::Float(89.67)));
    assert!(matches!(record.get("spell_affinity"), Some(AvroValue::Double(_))));
    assert_eq!(record.get("good_spells"), Some(&AvroValue::Int(1)));
    assert_eq!(record.get("evil_spells"), Some(&AvroValue::Long(7)));
    assert_eq!(record.get("muggles_killed"), Some(&union("long", AvroValue::Long(3))));
    assert_eq!(record.get("bad_spells"), None);

    let testing = record.get("testing").unwrap();
    assert_eq!(testing.get("name"), Some(&union("string", string("test"))));
    assert_eq!(testing.get("curse"), Some(&string("bleh")));

    let metadata = record.get("metadata").unwrap();
    assert_eq!(metadata.get("house"), Some(&union("string", string("slytherin"))));
    assert_eq!(metadata.get("points"), Some(&AvroValue::Int(123)));
}

#[test]
fn test_sparse_record_uses_defaults() {
    let parser = RecordParser::new(WIZARD_SCHEMA, CoercionOptions::default()).unwrap();
    let record = parser.parse(SPARSE_RECORD.as_bytes()).unwrap();

    let affinity_default = parser
        .schema()
        .child("spell_affinity")
        .and_then(|f| f.default.as_ref())
        .and_then(|d| d.as_f64())
        .unwrap();
    assert_eq!(
        record.get("spell_affinity"),
        Some(&AvroValue::Double(affinity_default))
    );
    assert_eq!(record.get("spell_performance"), Some(&AvroValue::Float(89.67)));

    let mut output = record.to_json();
    let object = output.as_object_mut().unwrap();
    object.remove("spell_affinity");
    object.remove("spell_performance");
    assert_eq!(
        output,
        json!({
            "name": null,
            "curse": "cruciatus",
            "house": "slytherin",
            "wand": null,
            "muggle": null,
            "has_broom": true,
            "spell_bytes": "YWxvaG9tb3Jh",
            "good_spells": 0,
            "evil_spells": 3,
            "muggles_killed": null,
            "testing": {"name": null, "curse": "bleh"},
            "metadata": {"house": null, "points": 123}
        })
    );
}

#[test]
fn test_record_output_has_exactly_schema_fields() {
    let parser = RecordParser::new(WIZARD_SCHEMA, CoercionOptions::default()).unwrap();
    let record = parser.parse(FULL_RECORD.as_bytes()).unwrap();

    let AvroValue::Record(fields) = record else {
        panic!("expected record");
    };
    let names: Vec<&str> = fields.iter().map(|(n, _)| n.as_str()).collect();
    let expected: Vec<&str> = parser
        .schema()
        .children
        .iter()
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(names, expected);
}

#[test]
fn test_missing_required_field_names_the_field() {
    let parser = RecordParser::new(WIZARD_SCHEMA, CoercionOptions::default()).unwrap();
    let err = parser
        .parse(br#"{"curse": "x", "spell_bytes": "", "testing": {"curse": "y"}}"#)
        .unwrap_err();

    assert_eq!(err.path(), vec!["metadata"]);
    assert_eq!(
        err.root_cause(),
        &ValueError::MissingValue {
            field: "metadata".to_string()
        }
    );
}

#[test]
fn test_default_and_string_rejection_end_to_end() {
    let schema = r#"{"name": "T", "type": "record", "fields": [
        {"name": "n", "type": "int"},
        {"name": "s", "type": "string", "default": "x"}
    ]}"#;

    let record = convert(schema, br#"{"n": 0}"#, CoercionOptions::default()).unwrap();
    assert_eq!(record.to_json(), json!({"n": 0, "s": "x"}));

    let err = convert(schema, br#"{"n": "5"}"#, CoercionOptions::default()).unwrap_err();
    let Error::Value(err) = err else {
        panic!("expected value error");
    };
    assert!(matches!(
        err.root_cause(),
        ValueError::TypeMismatch { expected: "int", .. }
    ));
}

// ============================================================================
// String Coercion
// ============================================================================

#[test]
fn test_string_to_float() {
    let field = json!({"name": "test", "type": "float"});
    let options = CoercionOptions::new().with_string_to_number();

    assert_eq!(
        parse_one(field.clone(), json!({"test": "123.45"}), options.clone()),
        Ok(AvroValue::Float(123.45))
    );
    assert!(parse_one(field, json!({"test": false}), options).is_err());
}

#[test]
fn test_union_string_to_long() {
    let field = json!({"name": "test", "type": ["null", "long"], "default": null});
    let options = CoercionOptions::new().with_string_to_number();

    assert_eq!(
        parse_one(field.clone(), json!({"test": "123"}), options.clone()),
        Ok(union("long", AvroValue::Long(123)))
    );
    assert!(parse_one(field, json!({"test": false}), options).is_err());
}

#[test]
fn test_string_to_double() {
    let field = json!({"name": "test", "type": "double"});
    let options = CoercionOptions::new().with_string_to_number();

    assert_eq!(
        parse_one(field.clone(), json!({"test": "3.95e-321"}), options.clone()),
        Ok(AvroValue::Double(3.95e-321))
    );
    assert!(parse_one(field, json!({"test": true}), options).is_err());
}

#[test]
fn test_string_to_long() {
    let field = json!({"name": "test", "type": "long"});
    let options = CoercionOptions::new().with_string_to_number();

    assert_eq!(
        parse_one(field.clone(), json!({"test": "52949672951234"}), options.clone()),
        Ok(AvroValue::Long(52_949_672_951_234))
    );
    assert!(matches!(
        parse_one(field, json!({"test": "aa1571057118"}), options),
        Err(ValueError::InvalidString { target: "long", .. })
    ));
}

#[test]
fn test_string_to_int() {
    let field = json!({"name": "test", "type": "int"});
    let options = CoercionOptions::new().with_string_to_number();

    assert_eq!(
        parse_one(field.clone(), json!({"test": "63554737"}), options.clone()),
        Ok(AvroValue::Int(63_554_737))
    );
    assert!(matches!(
        parse_one(field, json!({"test": "4294967296"}), options),
        Err(ValueError::InvalidString { target: "int", .. })
    ));
}

#[test]
fn test_string_to_bool() {
    let field = json!({"name": "test", "type": "boolean"});
    let options = CoercionOptions::new().with_string_to_bool();

    for (input, expected) in [("true", true), ("FALSE", false), ("  TrUe ", true)] {
        assert_eq!(
            parse_one(field.clone(), json!({"test": input}), options.clone()),
            Ok(AvroValue::Boolean(expected)),
            "input {input:?}"
        );
    }
    assert!(parse_one(field.clone(), json!({"test": "yes"}), options).is_err());
    assert!(parse_one(field, json!({"test": "true"}), CoercionOptions::default()).is_err());
}

#[test]
fn test_overflowing_and_non_finite_strings_rejected() {
    let options = CoercionOptions::new().with_string_to_number();

    for (type_name, input) in [
        ("float", "1e300"),
        ("float", "inf"),
        ("double", "1e400"),
        ("double", "NaN"),
        ("double", "-infinity"),
    ] {
        let field = json!({"name": "test", "type": type_name});
        assert!(
            matches!(
                parse_one(field, json!({"test": input}), options.clone()),
                Err(ValueError::InvalidString { .. })
            ),
            "{type_name} accepted {input:?}"
        );
    }

    let field = json!({"name": "test", "type": "float"});
    assert!(matches!(
        parse_one(field, json!({"test": 1e300}), CoercionOptions::default()),
        Err(ValueError::OutOfRange { target: "float", .. })
    ));
}

#[test]
fn test_false_is_never_a_float() {
    let field = json!({"name": "test", "type": "float"});
    let options = CoercionOptions::new()
        .with_string_to_number()
        .with_string_to_bool();
    assert!(matches!(
        parse_one(field, json!({"test": false}), options),
        Err(ValueError::TypeMismatch { expected: "float", .. })
    ));
}

// ============================================================================
// Timestamps
// ============================================================================

fn millis_field() -> serde_json::Value {
    json!({"name": "test", "type": "long", "logicalType": "timestamp-millis"})
}

fn micros_field() -> serde_json::Value {
    json!({"name": "test", "type": "long", "logicalType": "timestamp-micros"})
}

#[test]
fn test_date_string_to_timestamp() {
    let options = CoercionOptions::new().with_date_time_format("rfc3339");

    assert_eq!(
        parse_one(millis_field(), json!({"test": "2019-10-14T12:45:18Z"}), options.clone()),
        Ok(AvroValue::TimestampMillis(1_571_057_118_000))
    );
    assert!(matches!(
        parse_one(millis_field(), json!({"test": "12:45:18-2019-10-14"}), options),
        Err(ValueError::InvalidDateTime { .. })
    ));
}

#[test]
fn test_date_string_with_strftime_pattern() {
    let options = CoercionOptions::new().with_date_time_format("%Y-%m-%d %H:%M:%S");
    assert_eq!(
        parse_one(micros_field(), json!({"test": "2019-10-14 12:45:18"}), options),
        Ok(AvroValue::TimestampMicros(1_571_057_118_000_000))
    );
}

#[test]
fn test_timestamp_to_millis() {
    let options = CoercionOptions::new().with_timestamp_to_millis();
    let expected = AvroValue::TimestampMillis(1_571_057_118_000);

    assert_eq!(
        parse_one(millis_field(), json!({"test": 1_571_057_118}), options.clone()),
        Ok(expected.clone())
    );
    // Fractional JSON numbers lose their fraction on the integer path.
    assert_eq!(
        parse_one(millis_field(), json!({"test": 1_571_057_118.456_678_9}), options.clone()),
        Ok(expected.clone())
    );

    let options = options.with_string_to_number();
    assert_eq!(
        parse_one(millis_field(), json!({"test": "1571057118"}), options.clone()),
        Ok(expected)
    );
    assert_eq!(
        parse_one(millis_field(), json!({"test": "1571057118.12345678"}), options.clone()),
        Ok(AvroValue::TimestampMillis(1_571_057_118_123))
    );
    assert!(parse_one(millis_field(), json!({"test": "aa1571057118"}), options).is_err());
}

#[test]
fn test_timestamp_to_micros() {
    let options = CoercionOptions::new()
        .with_timestamp_to_micros()
        .with_string_to_number();

    assert_eq!(
        parse_one(micros_field(), json!({"test": 1_571_057_118}), options.clone()),
        Ok(AvroValue::TimestampMicros(1_571_057_118_000_000))
    );
    assert_eq!(
        parse_one(micros_field(), json!({"test": "1571057118.12345678"}), options),
        Ok(AvroValue::TimestampMicros(1_571_057_118_123_456))
    );
}

#[test]
fn test_decimal_timestamp_strings_are_exact() {
    let options = CoercionOptions::new()
        .with_string_to_number()
        .with_timestamp_to_millis();

    for (input, expected) in [
        ("1571057118.123", 1_571_057_118_123),
        ("1571057118.001", 1_571_057_118_001),
        ("1571057118.999", 1_571_057_118_999),
        ("1571057118.1", 1_571_057_118_100),
    ] {
        assert_eq!(
            parse_one(millis_field(), json!({"test": input}), options.clone()),
            Ok(AvroValue::TimestampMillis(expected)),
            "input {input:?}"
        );
    }
}

#[test]
fn test_timestamp_in_field_unit_without_flags() {
    let value = parse_one(
        millis_field(),
        json!({"test": 1_571_057_118_000_i64}),
        CoercionOptions::default(),
    )
    .unwrap();
    let scaled = parse_one(
        millis_field(),
        json!({"test": 1_571_057_118}),
        CoercionOptions::new().with_timestamp_to_millis(),
    )
    .unwrap();

    assert_eq!(value, scaled);
    assert_eq!(value.as_datetime(), scaled.as_datetime());
}

#[test]
fn test_fractional_string_requires_string_to_number() {
    let options = CoercionOptions::new().with_timestamp_to_micros();
    assert!(parse_one(micros_field(), json!({"test": "1571057118.12345678"}), options).is_err());
}

#[test]
fn test_now_for_null_timestamp() {
    let options = CoercionOptions::new().with_now_for_null_timestamp();
    let before = chrono::Utc::now().timestamp_millis();

    for record in [json!({"test": null}), json!({})] {
        let value = parse_one(millis_field(), record, options.clone()).unwrap();
        let AvroValue::TimestampMillis(ms) = value else {
            panic!("expected millisecond timestamp");
        };
        assert!(ms >= before);
    }

    assert!(matches!(
        parse_one(millis_field(), json!({"test": null}), CoercionOptions::default()),
        Err(ValueError::UnexpectedNull { .. })
    ));
}
