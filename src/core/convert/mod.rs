//! Purpose: Per-shape bidirectional conversions between wire values and Rust values.
//! Exports: `datetime`, `color`, `uri`, `enums`, `flags`, `geometry`, `shape_of`, `number`.
//! Role: Leaf helpers the decode/encode engine dispatches to by `TypeTag`.
//! Invariants: Converters are pure and never mutate their input.
//! Invariants: Failures carry no field path; the engine attaches it on the way out.

pub mod color;
pub mod datetime;
pub mod enums;
pub mod flags;
pub mod geometry;
pub mod uri;

use crate::core::error::{Error, ErrorKind};
use serde_json::{Number, Value};

/// Beyond 2^53 not every integer is representable, so larger doubles stay floats.
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Wire shape name used in type-mismatch diagnostics.
pub fn shape_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Encodes a double. Whole values are written as integers so `1` and
/// `[-122, 37]` come back as written rather than as `1.0`.
pub fn number(value: f64) -> Result<Value, Error> {
    if value.fract() == 0.0 && value.abs() <= EXACT_INTEGER_LIMIT {
        return Ok(Value::from(value as i64));
    }
    Number::from_f64(value).map(Value::Number).ok_or_else(|| {
        Error::new(ErrorKind::ValueFormat).with_message(format!("{value} is not a finite number"))
    })
}

#[cfg(test)]
mod tests {
    use super::number;
    use crate::core::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn whole_doubles_encode_as_integers() {
        assert_eq!(number(1.0).expect("number"), json!(1));
        assert_eq!(number(-122.0).expect("number"), json!(-122));
        assert!(number(1.0).expect("number").is_i64());
        assert_eq!(number(0.031).expect("number"), json!(0.031));
        assert!(number(1e300).expect("number").is_f64());
    }

    #[test]
    fn non_finite_doubles_are_rejected() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(number(value).unwrap_err().kind(), ErrorKind::ValueFormat);
        }
    }
}
