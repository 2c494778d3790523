//! Acceptance corpus in the JSONTestSuite naming convention: `y_` cases
//! must parse as a single document, `n_` cases must fail.

use rstest::rstest;

use crate::parse;

#[rstest]
#[case::y_zero("0")]
#[case::y_negative_zero("-0")]
#[case::y_integer("123")]
#[case::y_negative_integer("-123")]
#[case::y_fraction("0.5")]
#[case::y_exponent("1e1")]
#[case::y_capital_exponent_plus("1E+2")]
#[case::y_negative_exponent("2e-2")]
#[case::y_fraction_with_exponent("1.25e3")]
#[case::y_null("null")]
#[case::y_true("true")]
#[case::y_false("false")]
#[case::y_empty_string(r#""""#)]
#[case::y_simple_string(r#""a""#)]
#[case::y_space_string(r#"" ""#)]
#[case::y_escaped_quote(r#""\"""#)]
#[case::y_escaped_backslash(r#""\\""#)]
#[case::y_hex_escape(r#""\u0061""#)]
#[case::y_empty_array("[]")]
#[case::y_single_element("[1]")]
#[case::y_nested_array(r#"[["a"]]"#)]
#[case::y_heterogeneous(r#"[null, true, 0, "x", [], {}]"#)]
#[case::y_empty_object("{}")]
#[case::y_simple_object(r#"{"a": 1}"#)]
#[case::y_empty_key(r#"{"": 0}"#)]
#[case::y_nested_object(r#"{"a": {"b": [1, 2]}}"#)]
#[case::y_surrounded_by_whitespace(" \t\r\n 1 \t\r\n ")]
fn y_must_parse(#[case] text: &str) {
    assert!(parse(text).is_ok(), "expected {text:?} to parse");
}

#[rstest]
#[case::n_empty("")]
#[case::n_whitespace_only("  ")]
#[case::n_leading_zero("01")]
#[case::n_bare_minus("-")]
#[case::n_leading_plus("+1")]
#[case::n_leading_dot(".5")]
#[case::n_trailing_dot("1.")]
#[case::n_bare_exponent("1e")]
#[case::n_signed_bare_exponent("1e+")]
#[case::n_truncated_null("nul")]
#[case::n_truncated_true("tru")]
#[case::n_keyword_with_suffix("falsey")]
#[case::n_nan("NaN")]
#[case::n_infinity("Infinity")]
#[case::n_single_quotes("'a'")]
#[case::n_unterminated_string("\"a")]
#[case::n_unknown_escape(r#""\q""#)]
#[case::n_raw_tab_in_string("\"a\tb\"")]
#[case::n_unclosed_array("[")]
#[case::n_bare_close_bracket("]")]
#[case::n_array_trailing_comma("[1,]")]
#[case::n_array_missing_comma("[1 2]")]
#[case::n_mismatched_array_close("[}")]
#[case::n_unclosed_object("{")]
#[case::n_bare_close_brace("}")]
#[case::n_key_without_value(r#"{"a"}"#)]
#[case::n_missing_value(r#"{"a":}"#)]
#[case::n_object_trailing_comma(r#"{"a":1,}"#)]
#[case::n_single_quoted_key("{'a':1}")]
#[case::n_missing_colon(r#"{"a" 1}"#)]
#[case::n_entries_without_comma(r#"{"a":1 "b":2}"#)]
#[case::n_mismatched_object_close("{]")]
#[case::n_two_documents("1 1")]
#[case::n_comment("// nope")]
fn n_must_fail(#[case] text: &str) {
    assert!(parse(text).is_err(), "expected {text:?} to fail");
}
