//! Purpose: Turn raw endpoint responses into records for command-layer callers.
//! Exports: `read_response`, `read_page_response`, `read_response_text`, `parse_payload`.
//! Role: Wraps every decode failure as a single "response could not be understood"
//! error carrying the original payload, so callers handle one failure kind.
//! Invariants: Schema-definition defects pass through unwrapped.
//! Invariants: The decode failure stays reachable as the error's `source`.

use crate::core::codec::{DecodeOptions, decode};
use crate::core::error::{Error, ErrorKind};
use crate::core::field::WireValue;
use crate::core::page::{CursorPage, decode_page};
use crate::core::record::Record;
use serde_json::Value;

pub fn read_response<T: Record>(payload: Value, options: &DecodeOptions) -> Result<T, Error> {
    decode::<T>(&payload, options).map_err(|err| unreadable(err, T::NAME, payload))
}

pub fn read_page_response<T: WireValue>(
    payload: Value,
    element_key: &str,
    options: &DecodeOptions,
) -> Result<CursorPage<T>, Error> {
    decode_page::<T>(&payload, element_key, options)
        .map_err(|err| unreadable(err, "CursorPage", payload))
}

/// Parses raw response bytes into a value tree.
pub fn parse_payload(bytes: &[u8], context: &str) -> Result<Value, Error> {
    crate::json::value_from_slice(bytes, context)
}

/// Parses response text, then reads it like `read_response`.
pub fn read_response_text<T: Record>(text: &str, options: &DecodeOptions) -> Result<T, Error> {
    let payload = crate::json::value_from_str(text, T::NAME)?;
    read_response(payload, options)
}

fn unreadable(err: Error, record: &'static str, payload: Value) -> Error {
    if err.kind() == ErrorKind::SchemaDefinition {
        return err;
    }
    tracing::debug!(record, error = %err, "response rejected");
    let mut wrapped = Error::new(ErrorKind::UnreadableResponse)
        .with_message(format!("response could not be understood as {record}"))
        .with_record(record)
        .with_payload(payload);
    if let Some(field) = err.field() {
        wrapped = wrapped.with_field(field.to_string());
    }
    wrapped.with_source(err)
}
