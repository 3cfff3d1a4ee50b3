//! Parser and serializer conformance tests.
//!
//! Exercises the round-trip, rejection, numeric classification and Unicode
//! properties of the public API.

use json_tree::{
    parse, parse_with_limits, serialize, LexError, Limits, Number, ParseErrorKind, Value,
};

// ============================================================================
// Round-trip: parse(serialize(V)) == V
// ============================================================================

fn assert_round_trips(value: Value) {
    let rendered = serialize(&value);
    let reparsed = parse(&rendered)
        .unwrap_or_else(|e| panic!("canonical text {rendered:?} failed to reparse: {e}"));
    assert_eq!(reparsed, value, "round trip through {rendered:?}");
}

#[test]
fn roundtrip_scalars() {
    assert_round_trips(Value::Null);
    assert_round_trips(Value::Bool(true));
    assert_round_trips(Value::Bool(false));
    assert_round_trips(Value::from(0));
    assert_round_trips(Value::from(-42));
    assert_round_trips(Value::from(i64::MAX));
    assert_round_trips(Value::from(i64::MIN));
}

#[test]
fn roundtrip_floats_keep_classification() {
    assert_round_trips(Value::from(1.5));
    assert_round_trips(Value::from(1.0));
    assert_round_trips(Value::from(-12000.0));
    assert_round_trips(Value::from(0.0025));
    assert_round_trips(Value::from(1e300));
    assert_round_trips(Value::from(-0.0));
}

#[test]
fn roundtrip_strings() {
    assert_round_trips(Value::from("hello"));
    assert_round_trips(Value::from(""));
    assert_round_trips(Value::from("line\nbreak\ttab \"quote\" back\\slash"));
    assert_round_trips(Value::from("é 😀 héllo"));
    assert_round_trips(Value::from("control \u{0001}\u{001f} chars"));
}

#[test]
fn roundtrip_containers() {
    assert_round_trips(Value::Array(vec![]));
    assert_round_trips(Value::Object(vec![]));
    assert_round_trips(Value::Array(vec![
        Value::Null,
        Value::Bool(false),
        Value::from(7),
        Value::from(2.5),
        Value::from("x"),
    ]));
    assert_round_trips(Value::Object(vec![
        ("b".to_string(), Value::from(2)),
        (
            "a".to_string(),
            Value::Array(vec![Value::from(1), Value::Object(vec![])]),
        ),
        ("é\n".to_string(), Value::Null),
    ]));
}

// ============================================================================
// Idempotence: serialize(parse(serialize(V))) == serialize(V)
// ============================================================================

#[test]
fn serialization_is_idempotent() {
    let values = [
        Value::from(-12000.0),
        Value::Object(vec![
            ("b".to_string(), Value::from(2)),
            ("a".to_string(), Value::from(1)),
        ]),
        Value::Array(vec![Value::from("a\tb"), Value::from(1.0)]),
    ];
    for value in values {
        let first = serialize(&value);
        let second = serialize(&parse(&first).unwrap());
        assert_eq!(first, second);
    }
}

#[test]
fn reparse_of_canonical_text_is_stable() {
    let inputs = [
        " { \"z\" : [ 1 , 2.0 , \"\\u00e9\" ] , \"y\" : null } ",
        "[[1,2],[3,[4,5]]]",
        "-12e3",
    ];
    for input in inputs {
        let canonical = serialize(&parse(input).unwrap());
        assert_eq!(serialize(&parse(&canonical).unwrap()), canonical);
    }
}

// ============================================================================
// Rejection
// ============================================================================

#[test]
fn rejects_empty_input() {
    assert_eq!(parse("").unwrap_err().kind, ParseErrorKind::EmptyInput);
    assert_eq!(parse(" \t\n ").unwrap_err().kind, ParseErrorKind::EmptyInput);
}

#[test]
fn rejects_leading_plus() {
    let err = parse("+1").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnexpectedCharacter);
}

#[test]
fn rejects_leading_zero() {
    assert_eq!(
        parse("01").unwrap_err().kind,
        ParseErrorKind::Lex(LexError::MalformedNumber)
    );
}

#[test]
fn rejects_unterminated_array() {
    assert_eq!(
        parse("[1,2,").unwrap_err().kind,
        ParseErrorKind::UnexpectedEnd
    );
    assert_eq!(
        parse("[1 2]").unwrap_err().kind,
        ParseErrorKind::ExpectedCommaOrClose
    );
}

#[test]
fn rejects_trailing_data() {
    let err = parse("{\"a\":1}x").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::TrailingData);
    assert_eq!(err.offset, 7);
}

#[test]
fn rejects_malformed_strings() {
    assert_eq!(
        parse("\"abc").unwrap_err().kind,
        ParseErrorKind::Lex(LexError::UnterminatedString)
    );
    assert_eq!(
        parse(r#""\q""#).unwrap_err().kind,
        ParseErrorKind::Lex(LexError::InvalidEscape)
    );
    assert_eq!(
        parse("\"a\u{0000}b\"").unwrap_err().kind,
        ParseErrorKind::Lex(LexError::UnescapedControl)
    );
}

#[test]
fn rejects_bad_object_syntax() {
    assert_eq!(
        parse("{1:2}").unwrap_err().kind,
        ParseErrorKind::ExpectedStringKey
    );
    assert_eq!(
        parse(r#"{"a" 1}"#).unwrap_err().kind,
        ParseErrorKind::ExpectedColon
    );
    assert_eq!(
        parse(r#"{"a":1 "b":2}"#).unwrap_err().kind,
        ParseErrorKind::ExpectedCommaOrClose
    );
}

// ============================================================================
// Numeric classification
// ============================================================================

#[test]
fn exponent_form_stays_float() {
    // -12e3 is numerically integral but syntactically float-formed; the
    // classification is preserved, not coerced.
    let value = parse("-12e3").unwrap();
    assert_eq!(value, Value::Number(Number::Float(-12000.0)));
    assert_eq!(value.as_i64(), None);
    assert_eq!(value.as_f64(), Some(-12000.0));
    assert_eq!(serialize(&value), "-12000.0");
}

#[test]
fn fraction_form_stays_float() {
    assert_eq!(parse("1.0").unwrap(), Value::Number(Number::Float(1.0)));
    assert_eq!(serialize(&parse("1.0").unwrap()), "1.0");
}

#[test]
fn plain_integral_form_is_int() {
    let value = parse("-12000").unwrap();
    assert_eq!(value, Value::Number(Number::Int(-12000)));
    assert_eq!(serialize(&value), "-12000");
}

#[test]
fn int_and_float_arms_are_distinct() {
    assert_ne!(parse("5").unwrap(), parse("5.0").unwrap());
}

#[test]
fn integer_overflow_falls_back_to_float() {
    let value = parse("9223372036854775808").unwrap();
    assert!(matches!(value, Value::Number(Number::Float(_))));
}

// ============================================================================
// Nested structure
// ============================================================================

#[test]
fn nested_arrays_reproduce_structure() {
    let value = parse("[[1,2],[3,[4,5]]]").unwrap();
    let outer = value.as_array().unwrap();
    assert_eq!(outer.len(), 2);
    assert_eq!(outer[0].as_array().unwrap().len(), 2);
    assert_eq!(value.get_index(0).and_then(|v| v.get_index(1)), Some(&Value::from(2)));
    let inner = value.get_index(1).and_then(|v| v.get_index(1)).unwrap();
    assert_eq!(
        inner,
        &Value::Array(vec![Value::from(4), Value::from(5)])
    );
}

#[test]
fn nesting_beyond_limit_is_reported() {
    let mut deep = "[".repeat(513);
    deep.push('1');
    deep.push_str(&"]".repeat(513));
    assert_eq!(
        parse(&deep).unwrap_err().kind,
        ParseErrorKind::NestingTooDeep
    );

    let limits = Limits::with_max_depth(3);
    assert!(parse_with_limits("[[[1]]]", limits).is_ok());
    assert_eq!(
        parse_with_limits("[[[[1]]]]", limits).unwrap_err().kind,
        ParseErrorKind::NestingTooDeep
    );
}

// ============================================================================
// Unicode
// ============================================================================

#[test]
fn unicode_escape_decodes_to_scalar() {
    assert_eq!(parse(r#""\u00e9""#).unwrap(), Value::from("é"));
}

#[test]
fn surrogate_pair_combines_to_emoji() {
    assert_eq!(parse(r#""\ud83d\ude00""#).unwrap(), Value::from("😀"));
}

#[test]
fn decoded_unicode_serializes_as_utf8() {
    let value = parse(r#""\u00e9 \ud83d\ude00""#).unwrap();
    assert_eq!(serialize(&value), "\"é 😀\"");
}

#[test]
fn duplicate_keys_last_wins() {
    let value = parse(r#"{"a":1,"b":2,"a":3}"#).unwrap();
    assert_eq!(value.get("a"), Some(&Value::from(3)));
    assert_eq!(serialize(&value), r#"{"a":3,"b":2}"#);
}
