use rstest::rstest;

use crate::{ArrayBuilder, Json, ObjectBuilder, ParseOptions, parse, parse_with_options};

fn number_literal(value: &Json) -> String {
    value.as_number().unwrap().to_string()
}

#[test]
fn keywords() {
    assert_eq!(parse("null").unwrap(), Json::Null);
    assert_eq!(parse("true").unwrap(), Json::Boolean(true));
    assert_eq!(parse("false").unwrap(), Json::Boolean(false));
}

#[test]
fn surrounding_whitespace() {
    assert_eq!(parse(" \t\r\n true \t\r\n ").unwrap(), Json::Boolean(true));
    assert_eq!(parse(" [ 1 , 2 ] ").unwrap(), parse("[1,2]").unwrap());
}

#[test]
fn named_escapes() {
    let value = parse(r#""a\"\\\/\b\f\n\r\tz""#).unwrap();
    assert_eq!(
        value.as_string(),
        Some("a\"\\/\u{0008}\u{000C}\n\r\tz")
    );
}

#[test]
fn unicode_escapes() {
    assert_eq!(parse(r#""\u0041""#).unwrap().as_string(), Some("A"));
    // A surrogate pair combines into one astral character.
    assert_eq!(parse(r#""\uD834\uDD1E""#).unwrap().as_string(), Some("𝄞"));
    // Escaped and raw spellings agree.
    assert_eq!(parse(r#""\uD834\uDD1E""#).unwrap(), parse("\"𝄞\"").unwrap());
}

#[test]
fn raw_multibyte_passthrough() {
    let value = parse("\"héllo 世界\"").unwrap();
    assert_eq!(value.as_string(), Some("héllo 世界"));
}

#[test]
fn numbers_keep_their_spelling() {
    assert_eq!(number_literal(&parse("1e3").unwrap()), "1e3");
    assert_eq!(number_literal(&parse("-0.5").unwrap()), "-0.5");
    assert_eq!(number_literal(&parse("10.0").unwrap()), "10.0");
    assert_eq!(number_literal(&parse("0E+2").unwrap()), "0E+2");
}

#[test]
fn big_integers_survive() {
    let digits = "123456789012345678901234567890123456789";
    let value = parse(digits).unwrap();
    assert_eq!(number_literal(&value), digits);
    assert_eq!(value.to_string(), digits);
}

#[test]
fn equal_values_with_different_spellings() {
    assert_eq!(parse("1e3").unwrap(), parse("1000").unwrap());
    assert_eq!(parse("-0").unwrap(), parse("0").unwrap());
    assert_eq!(parse("1.5e2").unwrap(), parse("150").unwrap());
}

#[test]
fn nested_structure() {
    let parsed = parse(r#"{"name": "ada", "tags": ["x", "y"], "level": 3}"#).unwrap();

    let mut tags = ArrayBuilder::new();
    tags.push("x").push("y");
    let mut expected = ObjectBuilder::new();
    expected
        .insert("name", "ada")
        .insert("tags", tags.build())
        .insert("level", 3);
    assert_eq!(parsed, expected.build());
}

#[test]
fn object_key_order_is_preserved() {
    let value = parse(r#"{"z": 1, "a": 2, "m": 3}"#).unwrap();
    let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, ["z", "a", "m"]);
}

#[test]
fn duplicate_keys_last_write_wins() {
    let value = parse(r#"{"a": 1, "b": 2, "a": 3}"#).unwrap();
    let map = value.as_object().unwrap();
    let keys: Vec<_> = map.keys().cloned().collect();
    // The first occurrence keeps its position, the last its value.
    assert_eq!(keys, ["a", "b"]);
    assert_eq!(map.get("a"), Some(&Json::from(3)));
}

#[test]
fn empty_containers() {
    assert_eq!(parse("[]").unwrap(), Json::Array(Vec::new()));
    assert_eq!(parse("{}").unwrap(), Json::Object(crate::Map::new()));
    assert_eq!(parse("[ ]").unwrap(), Json::Array(Vec::new()));
    assert_eq!(parse("{ }").unwrap(), Json::Object(crate::Map::new()));
}

#[test]
fn nesting_up_to_the_limit() {
    let text = format!("{}null{}", "[".repeat(512), "]".repeat(512));
    assert!(parse(&text).is_ok());

    let options = ParseOptions { max_depth: 4 };
    assert!(parse_with_options("[[[[1]]]]", options).is_ok());
}

#[rstest]
#[case::lonely_number("42")]
#[case::negative_real("-0.1")]
#[case::huge_exponent("1e999999")]
#[case::string_with_space(r#"" ""#)]
#[case::heterogeneous_array(r#"[null, 1, "two", [3], {"four": 4}]"#)]
#[case::deep_object(r#"{"a": {"b": {"c": {"d": []}}}}"#)]
#[case::escaped_key(r#"{"a": 1}"#)]
fn accepts(#[case] text: &str) {
    assert!(parse(text).is_ok(), "expected {text:?} to parse");
}
