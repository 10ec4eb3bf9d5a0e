//! Purpose: Regression coverage for parse-failure category mapping.
//! Exports: Integration tests only.
//! Role: Verify stable category labels used by parse diagnostics.
//! Invariants: Category mapping remains deterministic for representative errors.
//! Notes: Uses source include to exercise internal helper logic without widening API surface.

#[path = "../src/json/parse.rs"]
mod parse;

use parse::ParseFailureCategory;
use serde_json::Value;

#[test]
fn category_mapping_handles_syntax_and_numeric_errors() {
    let syntax_err = parse::from_str::<Value>(r#"{"a":}"#).unwrap_err();
    assert_eq!(
        parse::categorize_error(&syntax_err),
        ParseFailureCategory::Syntax
    );

    let number_err = parse::from_str::<Value>(r#"{"n":1e400}"#).unwrap_err();
    assert_eq!(
        parse::categorize_error(&number_err),
        ParseFailureCategory::NumericRange
    );
}

#[test]
fn category_mapping_handles_utf8_and_depth() {
    let utf8_err = parse::from_slice::<Value>(&[b'"', 0xff, b'"']).unwrap_err();
    assert_eq!(
        parse::categorize_error(&utf8_err),
        ParseFailureCategory::Utf8
    );

    let deep = format!("{}{}", "[".repeat(200), "]".repeat(200));
    let depth_err = parse::from_str::<Value>(&deep).unwrap_err();
    assert_eq!(
        parse::categorize_error(&depth_err),
        ParseFailureCategory::DepthLimit
    );
}

#[test]
fn hint_contains_category_and_context() {
    let err = parse::from_str::<Value>(r#"{"n":1e400}"#).unwrap_err();
    let hint = parse::hint_for_error(&err, "test.context");
    assert!(hint.contains("parse category: numeric-range"));
    assert!(hint.contains("context: test.context"));
}

#[test]
fn unknown_category_fallback_is_stable() {
    assert_eq!(
        parse::categorize_message("opaque parser issue"),
        ParseFailureCategory::Unknown
    );
    assert_eq!(ParseFailureCategory::Unknown.label(), "unknown");
}
