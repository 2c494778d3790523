use insta::assert_snapshot;

use crate::decode::{self, DecodeError};
use crate::{Json, parse};

#[test]
fn decodes_primitives() {
    assert_eq!(decode::string(&parse(r#""hi""#).unwrap()).unwrap(), "hi");
    assert!(decode::boolean(&parse("true").unwrap()).unwrap());
    assert_eq!(decode::int32(&parse("123").unwrap()).unwrap(), 123);
    assert_eq!(decode::int64(&parse("-9000000000").unwrap()).unwrap(), -9_000_000_000);
    assert_eq!(decode::float64(&parse("1.5").unwrap()).unwrap(), 1.5);
    assert_eq!(decode::float32(&parse("0.25").unwrap()).unwrap(), 0.25);
    decode::null(&parse("null").unwrap()).unwrap();
}

#[test]
fn rejects_wrong_types() {
    assert_eq!(
        decode::string(&parse("17").unwrap()),
        Err(DecodeError::failure("expected a string", &Json::from(17)))
    );
    assert_eq!(
        decode::boolean(&parse("null").unwrap()),
        Err(DecodeError::failure("expected a boolean", &Json::Null))
    );
    assert_eq!(
        decode::int32(&parse(r#""3""#).unwrap()),
        Err(DecodeError::failure(
            "expected a 32-bit integer",
            &Json::from("3")
        ))
    );
}

#[test]
fn integer_width_and_fraction_checks() {
    // One past i32::MAX still fits i64.
    let value = parse("2147483648").unwrap();
    assert!(decode::int32(&value).is_err());
    assert_eq!(decode::int64(&value).unwrap(), 2_147_483_648);

    // A fraction is not an integer even when the width fits.
    assert!(decode::int32(&parse("1.5").unwrap()).is_err());

    // One past i64::MAX is still an exact integer.
    let value = parse("9223372036854775808").unwrap();
    assert!(decode::int64(&value).is_err());
    assert_eq!(
        decode::integer(&value).unwrap().to_string(),
        "9223372036854775808"
    );
}

#[test]
fn integral_spellings_count_as_integers() {
    assert_eq!(decode::int32(&parse("1e2").unwrap()).unwrap(), 100);
    assert_eq!(decode::int32(&parse("25.0").unwrap()).unwrap(), 25);
}

#[test]
fn decimal_accepts_any_number() {
    assert_eq!(
        decode::decimal(&parse("1e3").unwrap()).unwrap().to_string(),
        "1e3"
    );
    assert!(decode::decimal(&parse("true").unwrap()).is_err());
}

#[test]
fn null_substitution() {
    assert_eq!(decode::null_or(&parse("null").unwrap(), 7).unwrap(), 7);
    assert!(decode::null_or(&parse("0").unwrap(), 7).is_err());
}

#[test]
fn arrays_of_items() {
    let value = parse("[1, 2, 3]").unwrap();
    assert_eq!(decode::array(&value, decode::int32).unwrap(), vec![1, 2, 3]);
}

#[test]
fn array_errors_carry_the_index() {
    let value = parse(r#"[1, "x", 3]"#).unwrap();
    assert_eq!(
        decode::array(&value, decode::int32),
        Err(DecodeError::at_index(
            1,
            DecodeError::failure("expected a 32-bit integer", &Json::from("x"))
        ))
    );
}

#[test]
fn object_entries_preserve_order() {
    let value = parse(r#"{"a": 1, "b": 2}"#).unwrap();
    assert_eq!(
        decode::object(&value, decode::int32).unwrap(),
        vec![("a".to_string(), 1), ("b".to_string(), 2)]
    );
}

#[test]
fn field_access() {
    let value = parse(r#"{"name": "ada", "level": 3}"#).unwrap();
    assert_eq!(
        decode::field(&value, "name", decode::string).unwrap(),
        "ada"
    );
    assert_eq!(decode::field(&value, "level", decode::int32).unwrap(), 3);
}

#[test]
fn missing_field_error_names_the_field_and_holds_the_object() {
    let value = parse(r#"{"present": 1}"#).unwrap();
    assert_eq!(
        decode::field(&value, "missing", decode::int32),
        Err(DecodeError::at_field(
            "missing",
            DecodeError::failure("no value for field", &value)
        ))
    );
}

#[test]
fn optional_and_nullable_fields() {
    let value = parse(r#"{"present": 1, "blank": null}"#).unwrap();

    // optional_field: absent defaults, null is handed to the decoder.
    assert_eq!(
        decode::optional_field(&value, "absent", 9, decode::int32).unwrap(),
        9
    );
    assert_eq!(
        decode::optional_field(&value, "present", 9, decode::int32).unwrap(),
        1
    );
    assert!(decode::optional_field(&value, "blank", 9, decode::int32).is_err());

    // nullable_field: null defaults, absent is still an error.
    assert_eq!(
        decode::nullable_field(&value, "blank", 9, decode::int32).unwrap(),
        9
    );
    assert!(decode::nullable_field(&value, "absent", 9, decode::int32).is_err());

    // optional_nullable_field distinguishes the two defaults.
    assert_eq!(
        decode::optional_nullable_field(&value, "absent", 8, 9, decode::int32).unwrap(),
        8
    );
    assert_eq!(
        decode::optional_nullable_field(&value, "blank", 8, 9, decode::int32).unwrap(),
        9
    );
    assert_eq!(
        decode::optional_nullable_field(&value, "present", 8, 9, decode::int32).unwrap(),
        1
    );
}

#[test]
fn index_access() {
    let value = parse(r#"["a", "b"]"#).unwrap();
    assert_eq!(decode::index(&value, 1, decode::string).unwrap(), "b");
    assert_eq!(
        decode::index(&value, 5, decode::string),
        Err(DecodeError::at_index(
            5,
            DecodeError::failure("expected array index to be in bounds", &value)
        ))
    );
}

#[test]
fn one_of_returns_the_first_success() {
    let value = parse("7").unwrap();
    let as_text = |v: &Json| decode::int32(v).map(|n| n.to_string());
    let result = decode::one_of(&value, &[&decode::string, &as_text]).unwrap();
    assert_eq!(result, "7");
}

#[test]
fn one_of_aggregates_every_failure() {
    let value = parse("null").unwrap();
    let as_text = |v: &Json| decode::boolean(v).map(|b| b.to_string());
    let err = decode::one_of(&value, &[&decode::string, &as_text]).unwrap_err();
    assert_eq!(
        err,
        DecodeError::OneOf(vec![
            DecodeError::failure("expected a string", &value),
            DecodeError::failure("expected a boolean", &value),
        ])
    );
}

#[test]
fn one_of_flattens_nested_alternations() {
    let value = parse("null").unwrap();
    let as_text = |v: &Json| decode::boolean(v).map(|b| b.to_string());
    let digits = |v: &Json| decode::int32(v).map(|n| n.to_string());
    let inner = |v: &Json| decode::one_of(v, &[&as_text, &digits]);
    let err = decode::one_of(&value, &[&decode::string, &inner]).unwrap_err();
    match err {
        DecodeError::OneOf(errors) => {
            assert_eq!(errors.len(), 3);
            assert!(errors.iter().all(|e| matches!(e, DecodeError::Failure(..))));
        }
        other => panic!("expected OneOf, got {other:?}"),
    }
}

#[test]
#[should_panic(expected = "one_of requires at least one decoder")]
fn one_of_panics_without_alternatives() {
    let value = parse("null").unwrap();
    let _ = decode::one_of::<i32>(&value, &[]);
}

#[test]
fn duplicate_keys_decode_to_the_last_value() {
    let value = parse(r#"{"a": 1, "a": 2}"#).unwrap();
    assert_eq!(decode::field(&value, "a", decode::int32).unwrap(), 2);
}

#[test]
fn wrap_adapts_foreign_errors() {
    let value = parse(r#""not-a-port""#).unwrap();
    let port = decode::string(&value).and_then(|s| {
        s.parse::<u16>()
            .map_err(|e| DecodeError::wrap(e, &value))
    });
    assert!(matches!(port, Err(DecodeError::Failure(..))));
}

#[test]
fn render_top_level_failure() {
    let err = decode::string(&parse("17").unwrap()).unwrap_err();
    assert_snapshot!(err.to_string(), @r#"
    Problem with the given value:

        17

    expected a string
    "#);
}

#[test]
fn render_missing_field() {
    let value = parse(r#"{"present": 1}"#).unwrap();
    let err = decode::field(&value, "missing", decode::int32).unwrap_err();
    assert_snapshot!(err.to_string(), @r#"
    Problem with the value at json.missing:

        {
            "present": 1
        }

    no value for field
    "#);
}

#[test]
fn render_nested_path() {
    let value = parse(r#"{"users": [{"name": 1}]}"#).unwrap();
    let err = decode::field(&value, "users", |v| {
        decode::array(v, |u| decode::field(u, "name", decode::string))
    })
    .unwrap_err();
    assert_snapshot!(err.to_string(), @r#"
    Problem with the value at json.users[0].name:

        1

    expected a string
    "#);
}

#[test]
fn render_non_identifier_key_in_brackets() {
    let value = parse(r#"{"my key": true}"#).unwrap();
    let err = decode::field(&value, "my key", decode::string).unwrap_err();
    assert_snapshot!(err.to_string(), @r#"
    Problem with the value at json[my key]:

        true

    expected a string
    "#);
}

#[test]
fn render_one_of_alternatives() {
    let value = parse("null").unwrap();
    let as_text = |v: &Json| decode::boolean(v).map(|b| b.to_string());
    let err = decode::one_of(&value, &[&decode::string, &as_text]).unwrap_err();
    assert_snapshot!(err.to_string(), @r#"
    The oneOf decoder at json failed in the following 2 ways:

    (1) Problem with the given value:

        null

    expected a string

    (2) Problem with the given value:

        null

    expected a boolean
    "#);
}

#[test]
fn one_of_with_a_single_failure_renders_transparently() {
    let value = parse("null").unwrap();
    let err = decode::one_of(&value, &[&decode::string]).unwrap_err();
    let plain = decode::string(&value).unwrap_err();
    assert_eq!(err.to_string(), plain.to_string());
}
