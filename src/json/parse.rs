//! Purpose: Provide the internal JSON text decode entrypoints.
//! Exports: `from_str`, `from_slice`, `ParseFailureCategory`, `categorize_error`,
//! `categorize_message`, `hint_for_error`.
//! Role: Parser boundary that centralizes serde_json usage and failure labelling.
//! Invariants: Invalid UTF-8 is reported before any JSON parsing is attempted.
//! Invariants: Category labels are stable; callers and tests match on them.
//! Notes: Error mapping into the crate error type is done by callsites so domain
//! context stays explicit; this file depends on serde only.

use serde::de::{DeserializeOwned, Error as _};
use serde_json::error::Category;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ParseFailureCategory {
    Syntax,
    NumericRange,
    Utf8,
    DepthLimit,
    Eof,
    Unknown,
}

impl ParseFailureCategory {
    pub(crate) fn label(self) -> &'static str {
        match self {
            ParseFailureCategory::Syntax => "syntax",
            ParseFailureCategory::NumericRange => "numeric-range",
            ParseFailureCategory::Utf8 => "utf8",
            ParseFailureCategory::DepthLimit => "depth-limit",
            ParseFailureCategory::Eof => "eof",
            ParseFailureCategory::Unknown => "unknown",
        }
    }
}

pub(crate) fn from_str<T: DeserializeOwned>(input: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(input)
}

pub(crate) fn from_slice<T: DeserializeOwned>(input: &[u8]) -> Result<T, serde_json::Error> {
    let text = std::str::from_utf8(input)
        .map_err(|err| serde_json::Error::custom(format!("invalid utf-8 input: {err}")))?;
    serde_json::from_str(text)
}

pub(crate) fn categorize_error(err: &serde_json::Error) -> ParseFailureCategory {
    match categorize_message(&err.to_string()) {
        ParseFailureCategory::Unknown => match err.classify() {
            Category::Eof => ParseFailureCategory::Eof,
            Category::Syntax => ParseFailureCategory::Syntax,
            Category::Data | Category::Io => ParseFailureCategory::Unknown,
        },
        category => category,
    }
}

pub(crate) fn categorize_message(message: &str) -> ParseFailureCategory {
    let lowered = message.to_ascii_lowercase();
    if lowered.contains("recursion limit") || lowered.contains("nesting") {
        ParseFailureCategory::DepthLimit
    } else if lowered.contains("number out of range") || lowered.contains("overflow") {
        ParseFailureCategory::NumericRange
    } else if lowered.contains("utf-8") || lowered.contains("utf8") {
        ParseFailureCategory::Utf8
    } else if lowered.contains("eof while parsing") {
        ParseFailureCategory::Eof
    } else {
        ParseFailureCategory::Unknown
    }
}

pub(crate) fn hint_for_error(err: &serde_json::Error, context: &str) -> String {
    format!(
        "parse category: {}; context: {context}",
        categorize_error(err).label()
    )
}

#[cfg(test)]
mod tests {
    use super::{ParseFailureCategory, categorize_error, from_slice, from_str};
    use serde_json::Value;

    #[test]
    fn valid_input_parses_in_key_order() {
        let value: Value = from_str(r#"{"b":1,"a":2}"#).expect("parse");
        let keys: Vec<&str> = value
            .as_object()
            .expect("object")
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn invalid_utf8_is_caught_before_parsing() {
        let err = from_slice::<Value>(&[b'"', 0xff, b'"']).expect_err("utf8");
        assert_eq!(categorize_error(&err), ParseFailureCategory::Utf8);
    }

    #[test]
    fn truncated_input_is_eof() {
        let err = from_str::<Value>("{").expect_err("eof");
        assert_eq!(categorize_error(&err), ParseFailureCategory::Eof);
    }
}
