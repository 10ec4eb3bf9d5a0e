//! Purpose: Internal JSON text boundary shared by the CLI and the response reader.
//! Exports: `parse` module with decode helpers and failure categorization.
//! Role: Single seam where bytes become a value tree, so callsites avoid ad hoc decode logic.
//! Invariants: Parse failures surface as `ErrorKind::Parse` with a category hint.

pub(crate) mod parse;

use crate::core::error::{Error, ErrorKind};
use serde_json::Value;

/// Parses bytes into a value tree, labelling failures with a category hint.
pub(crate) fn value_from_slice(input: &[u8], context: &str) -> Result<Value, Error> {
    parse::from_slice(input).map_err(|err| parse_error(err, context))
}

pub(crate) fn value_from_str(input: &str, context: &str) -> Result<Value, Error> {
    parse::from_str(input).map_err(|err| parse_error(err, context))
}

fn parse_error(err: serde_json::Error, context: &str) -> Error {
    Error::new(ErrorKind::Parse)
        .with_message("input is not valid JSON")
        .with_hint(parse::hint_for_error(&err, context))
        .with_source(err)
}
