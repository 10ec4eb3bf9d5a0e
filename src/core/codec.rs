//! Purpose: Interpret record schemas to decode value trees and encode records back.
//! Exports: `DecodeOptions`, `DateFallback`, `AbsorbedFailure`, `Decoded`, `decode`,
//! `decode_reported`, `encode`.
//! Role: The one generic engine behind every record type and cursor page.
//! Invariants: Decoding never mutates its input and keeps no state across calls.
//! Invariants: Undeclared wire keys are ignored; absent or null fields take the zero value.
//! Invariants: Encoding follows schema order and omits zero-valued fields.
//! Invariants: Only optional date-time fields absorb failures, and only when the
//! policy says so; every absorbed failure is logged and reported.

use crate::core::convert::color::Rgb;
use crate::core::convert::{datetime, enums, flags, geometry, number, shape_of, uri};
use crate::core::error::{Error, ErrorKind};
use crate::core::record::Record;
use crate::core::schema::{FieldSpec, RecordSchema, TypeTag};
use crate::core::slot::{Fields, Slot};
use serde_json::{Map, Value};

pub const DEFAULT_MAX_DEPTH: usize = 32;

/// What to do when an optional date-time field fails to parse.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DateFallback {
    /// Leave the field at its zero value and report the failure (legacy behavior).
    ZeroOnOptional,
    /// Abort the record like any other value-format failure.
    Strict,
}

#[derive(Clone, Debug)]
pub struct DecodeOptions {
    pub date_fallback: DateFallback,
    pub max_depth: usize,
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self {
            date_fallback: DateFallback::ZeroOnOptional,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn strict() -> Self {
        Self {
            date_fallback: DateFallback::Strict,
            ..Self::new()
        }
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// An optional date-time field whose parse failure was replaced by the zero value.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AbsorbedFailure {
    pub record: &'static str,
    pub field: String,
    pub raw: String,
    pub reason: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Decoded<T> {
    pub value: T,
    pub absorbed: Vec<AbsorbedFailure>,
}

pub fn decode<T: Record>(value: &Value, options: &DecodeOptions) -> Result<T, Error> {
    decode_reported(value, options).map(|decoded| decoded.value)
}

pub fn decode_reported<T: Record>(
    value: &Value,
    options: &DecodeOptions,
) -> Result<Decoded<T>, Error> {
    let schema = T::schema()?;
    let mut decoder = Decoder::new(options);
    let fields = decoder.record(value, schema, 0)?;
    let record = T::from_fields(fields).map_err(|err| err.or_record(T::NAME))?;
    Ok(Decoded {
        value: record,
        absorbed: decoder.into_absorbed(),
    })
}

pub fn encode<T: Record>(record: &T) -> Result<Value, Error> {
    let schema = T::schema()?;
    encode_record(&record.to_fields(), schema).map_err(|err| err.or_record(T::NAME))
}

#[derive(Clone, Copy, Debug)]
enum Segment<'a> {
    Key(&'a str),
    Index(usize),
}

/// Per-call decode state: the current field path and absorbed failures.
pub(crate) struct Decoder<'a> {
    options: &'a DecodeOptions,
    path: Vec<Segment<'a>>,
    absorbed: Vec<AbsorbedFailure>,
}

impl<'a> Decoder<'a> {
    pub(crate) fn new(options: &'a DecodeOptions) -> Self {
        Self {
            options,
            path: Vec::new(),
            absorbed: Vec::new(),
        }
    }

    pub(crate) fn into_absorbed(self) -> Vec<AbsorbedFailure> {
        self.absorbed
    }

    fn path(&self) -> String {
        let mut out = String::new();
        for segment in &self.path {
            match segment {
                Segment::Key(key) => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str(key);
                }
                Segment::Index(idx) => {
                    out.push('[');
                    out.push_str(&idx.to_string());
                    out.push(']');
                }
            }
        }
        out
    }

    fn locate(&self, err: Error) -> Error {
        err.or_field(|| self.path())
    }

    pub(crate) fn record(
        &mut self,
        value: &Value,
        schema: &'static RecordSchema,
        depth: usize,
    ) -> Result<Fields, Error> {
        if depth > self.options.max_depth {
            return Err(self.locate(
                Error::new(ErrorKind::DepthLimit)
                    .with_message(format!(
                        "record nesting exceeds {} levels",
                        self.options.max_depth
                    ))
                    .with_record(schema.name()),
            ));
        }
        let object = value.as_object().ok_or_else(|| {
            self.locate(mismatch(&format!("record({})", schema.name()), value))
                .with_record(schema.name())
        })?;

        let mut fields = Fields::with_capacity(schema.fields().len());
        for spec in schema.fields() {
            self.path.push(Segment::Key(spec.wire_key));
            let result = match object.get(spec.wire_key) {
                None | Some(Value::Null) if spec.required => Err(Error::new(
                    ErrorKind::MissingField,
                )
                .with_message(format!("missing required field `{}`", spec.wire_key))),
                None | Some(Value::Null) => Ok(None),
                Some(raw) => match self.value(raw, &spec.shape, depth) {
                    Err(err) if self.absorbs(spec, &err) => {
                        self.absorb(schema.name(), raw, &err);
                        Ok(None)
                    }
                    other => other,
                },
            };
            let result = result.map_err(|err| self.locate(err).or_record(schema.name()));
            self.path.pop();
            fields.put(spec.wire_key, result?);
        }

        if tracing::enabled!(tracing::Level::TRACE) {
            let ignored = object
                .keys()
                .filter(|key| schema.field(key).is_none())
                .count();
            tracing::trace!(record = schema.name(), ignored, "ignored undeclared keys");
        }
        Ok(fields)
    }

    /// Converts one present wire value. `Ok(None)` means the value maps to zero.
    pub(crate) fn value(
        &mut self,
        raw: &Value,
        shape: &TypeTag,
        depth: usize,
    ) -> Result<Option<Slot>, Error> {
        let slot = match shape {
            TypeTag::String => Slot::String(text(raw, shape)?.to_string()),
            TypeTag::Integer => Slot::Integer(integer(raw)?),
            TypeTag::Double => Slot::Double(raw.as_f64().ok_or_else(|| mismatch(shape, raw))?),
            TypeTag::Boolean => Slot::Boolean(raw.as_bool().ok_or_else(|| mismatch(shape, raw))?),
            TypeTag::DateTime(profile) => {
                Slot::DateTime(datetime::parse(text(raw, shape)?, *profile)?)
            }
            TypeTag::Color => Slot::Color(Rgb::parse_hex(text(raw, shape)?)?),
            TypeTag::Uri => match uri::parse(text(raw, shape)?)? {
                Some(uri) => Slot::Uri(uri),
                None => return Ok(None),
            },
            TypeTag::Enum(table) => Slot::Enum(enums::decode(table, text(raw, shape)?)?),
            TypeTag::Flags(table) => {
                let items = raw.as_array().ok_or_else(|| mismatch(shape, raw))?;
                Slot::Flags(flags::decode(table, items)?)
            }
            TypeTag::Record(record) => {
                let schema = (record.schema)()?;
                Slot::Record(self.record(raw, schema, depth + 1)?)
            }
            TypeTag::Array(element) => {
                let items = raw.as_array().ok_or_else(|| mismatch(shape, raw))?;
                Slot::Array(self.elements(items, element, depth + 1)?)
            }
            TypeTag::Geometry => Slot::Geometry(geometry::decode(raw)?),
        };
        Ok(Some(slot))
    }

    pub(crate) fn elements(
        &mut self,
        items: &[Value],
        element: &TypeTag,
        depth: usize,
    ) -> Result<Vec<Slot>, Error> {
        let mut slots = Vec::with_capacity(items.len());
        for (idx, item) in items.iter().enumerate() {
            self.path.push(Segment::Index(idx));
            let result = match self.value(item, element, depth) {
                Ok(Some(slot)) => Ok(slot),
                Ok(None) => Err(Error::new(ErrorKind::ValueFormat)
                    .with_message(format!("empty {element} is not allowed inside an array"))),
                Err(err) => Err(err),
            };
            let result = result.map_err(|err| self.locate(err));
            self.path.pop();
            slots.push(result?);
        }
        Ok(slots)
    }

    pub(crate) fn enter(&mut self, key: &'a str) {
        self.path.push(Segment::Key(key));
    }

    pub(crate) fn leave(&mut self) {
        self.path.pop();
    }

    fn absorbs(&self, spec: &FieldSpec, err: &Error) -> bool {
        self.options.date_fallback == DateFallback::ZeroOnOptional
            && !spec.required
            && spec.shape.is_date_time()
            && err.kind() == ErrorKind::ValueFormat
    }

    fn absorb(&mut self, record: &'static str, raw: &Value, err: &Error) {
        let field = self.path();
        let raw = raw
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| raw.to_string());
        let reason = err.message().unwrap_or("unparseable date-time").to_string();
        tracing::warn!(
            record,
            field = %field,
            raw = %raw,
            "optional date-time did not parse; left at zero value"
        );
        self.absorbed.push(AbsorbedFailure {
            record,
            field,
            raw,
            reason,
        });
    }
}

fn mismatch(expected: &(impl std::fmt::Display + ?Sized), actual: &Value) -> Error {
    Error::new(ErrorKind::TypeMismatch)
        .with_message("wire shape disagrees with declared shape")
        .with_shapes(expected.to_string(), shape_of(actual))
}

fn text<'v>(raw: &'v Value, shape: &TypeTag) -> Result<&'v str, Error> {
    raw.as_str().ok_or_else(|| mismatch(shape, raw))
}

fn integer(raw: &Value) -> Result<i64, Error> {
    match raw {
        Value::Number(number) => number.as_i64().ok_or_else(|| {
            if number.is_u64() {
                Error::new(ErrorKind::ValueFormat)
                    .with_message(format!("{number} does not fit a signed 64-bit integer"))
            } else {
                Error::new(ErrorKind::TypeMismatch)
                    .with_message("wire shape disagrees with declared shape")
                    .with_shapes("integer", "fractional number")
            }
        }),
        other => Err(mismatch(&TypeTag::Integer, other)),
    }
}

pub(crate) fn encode_record(fields: &Fields, schema: &RecordSchema) -> Result<Value, Error> {
    let mut map = Map::new();
    for spec in schema.fields() {
        if let Some(slot) = fields.get(spec.wire_key) {
            let value = encode_value(slot, &spec.shape)
                .map_err(|err| err.within(spec.wire_key).or_record(schema.name()))?;
            map.insert(spec.wire_key.to_string(), value);
        }
    }
    Ok(Value::Object(map))
}

pub(crate) fn encode_value(slot: &Slot, shape: &TypeTag) -> Result<Value, Error> {
    match (shape, slot) {
        (TypeTag::String, Slot::String(text)) => Ok(Value::String(text.clone())),
        (TypeTag::Integer, Slot::Integer(number)) => Ok(Value::from(*number)),
        (TypeTag::Double, Slot::Double(value)) => number(*value),
        (TypeTag::Boolean, Slot::Boolean(flag)) => Ok(Value::Bool(*flag)),
        (TypeTag::DateTime(profile), Slot::DateTime(at)) => {
            datetime::format(*at, *profile).map(Value::String)
        }
        (TypeTag::Color, Slot::Color(color)) => Ok(Value::String(color.to_hex())),
        (TypeTag::Uri, Slot::Uri(uri)) => Ok(Value::String(uri.as_str().to_string())),
        (TypeTag::Enum(table), Slot::Enum(index)) => enums::encode(table, *index),
        (TypeTag::Flags(table), Slot::Flags(bits)) => Ok(flags::encode(table, *bits)),
        (TypeTag::Record(record), Slot::Record(fields)) => {
            let schema = (record.schema)()?;
            encode_record(fields, schema)
        }
        (TypeTag::Array(element), Slot::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(idx, item)| {
                encode_value(item, element).map_err(|err| err.within(&format!("[{idx}]")))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        (TypeTag::Geometry, Slot::Geometry(shape)) => geometry::encode(shape),
        (shape, slot) => Err(Error::new(ErrorKind::Internal)
            .with_message("slot does not match declared shape")
            .with_shapes(shape.to_string(), slot.kind())),
    }
}

#[cfg(test)]
mod tests {
    use super::{DateFallback, DecodeOptions, decode, decode_reported, encode};
    use crate::core::convert::color::Rgb;
    use crate::core::convert::flags::FlagSet;
    use crate::core::convert::geometry::{Geometry, Position};
    use crate::core::convert::uri::Uri;
    use crate::core::error::ErrorKind;
    use crate::core::schema::{DateProfile, TypeTag};
    use serde_json::json;
    use time::OffsetDateTime;
    use time::macros::datetime;

    crate::closed_enum! {
        enum Tone {
            Warm = "warm",
            Cool = "cool",
        }
    }

    crate::record! {
        struct Leaf {
            name: String => "name", required;
            at: OffsetDateTime => "at";
            seen: OffsetDateTime => "seen" as TypeTag::DateTime(DateProfile::SearchResult);
            born: OffsetDateTime => "born", required;
        }
    }

    crate::record! {
        struct Branch {
            id: String => "id_str", required;
            count: i64 => "count";
            ratio: f64 => "ratio";
            open: bool => "open";
            color: Option<Rgb> => "color";
            link: Option<Uri> => "link";
            tone: Option<Tone> => "tone";
            tones: FlagSet<Tone> => "tones";
            leaf: Option<Leaf> => "leaf";
            leaves: Vec<Leaf> => "leaves";
            tags: Vec<String> => "tags";
            place: Option<Geometry> => "place";
            parent: Option<Box<Branch>> => "parent";
        }
    }

    fn options() -> DecodeOptions {
        DecodeOptions::new()
    }

    #[test]
    fn decodes_every_shape() {
        let wire = json!({
            "id_str": "7",
            "count": 3,
            "ratio": 0.5,
            "open": true,
            "color": "C0DEED",
            "link": "https://example.com/a",
            "tone": "cool",
            "tones": ["cool", "warm"],
            "leaf": {"name": "x", "born": "Wed Aug 27 13:08:45 +0000 2008"},
            "leaves": [{"name": "y", "born": "Wed Aug 27 13:08:45 +0000 2008"}],
            "tags": ["a", "b"],
            "place": {"type": "Point", "coordinates": [1.5, 2.5]},
            "parent": {"id_str": "6"}
        });
        let branch: Branch = decode(&wire, &options()).expect("decode");
        assert_eq!(branch.id, "7");
        assert_eq!(branch.count, 3);
        assert_eq!(branch.color, Some(Rgb::new(0xc0, 0xde, 0xed)));
        assert_eq!(branch.tone, Some(Tone::Cool));
        assert_eq!(branch.tones.tokens(), vec!["warm", "cool"]);
        let leaf = branch.leaf.as_ref().expect("leaf");
        assert_eq!(leaf.born, datetime!(2008-08-27 13:08:45 UTC));
        assert_eq!(leaf.at, OffsetDateTime::UNIX_EPOCH);
        assert_eq!(branch.leaves.len(), 1);
        assert_eq!(branch.place, Some(Geometry::Point(Position::new(1.5, 2.5))));
        assert_eq!(branch.parent.as_ref().map(|parent| parent.id.as_str()), Some("6"));
    }

    #[test]
    fn encode_follows_schema_order_and_omits_zero() {
        let wire = json!({
            "tags": ["a"],
            "open": true,
            "id_str": "7",
            "color": "ffffff",
            "extra": {"ignored": true}
        });
        let branch: Branch = decode(&wire, &options()).expect("decode");
        let out = encode(&branch).expect("encode");
        let keys: Vec<_> = out.as_object().expect("object").keys().cloned().collect();
        assert_eq!(keys, vec!["id_str", "open", "color", "tags"]);
        assert_eq!(encode(&branch).expect("encode"), out);
    }

    #[test]
    fn uri_and_whole_double_re_encode_as_written() {
        for link in ["https://example.com", "HTTP://Example.com/Jack", "http://example.com/a b"] {
            let wire = json!({"id_str": "1", "ratio": 1, "link": link});
            let branch: Branch = decode(&wire, &options()).expect("decode");
            assert_eq!(branch.link.as_ref().map(Uri::as_str), Some(link));
            let out = encode(&branch).expect("encode");
            assert_eq!(out, wire);
            assert!(out["ratio"].is_i64());
        }
    }

    #[test]
    fn null_counts_as_absent() {
        let branch: Branch =
            decode(&json!({"id_str": "1", "leaf": null, "link": ""}), &options()).expect("decode");
        assert_eq!(branch.leaf, None);
        assert_eq!(branch.link, None);
        let err = decode::<Branch>(&json!({"id_str": null}), &options()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingField);
    }

    #[test]
    fn errors_carry_full_field_paths() {
        let wire = json!({
            "id_str": "1",
            "parent": {"id_str": "2", "leaves": [{"name": "a", "born": "Wed Aug 27 13:08:45 +0000 2008"}, {"born": "Wed Aug 27 13:08:45 +0000 2008"}]}
        });
        let err = decode::<Branch>(&wire, &options()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingField);
        assert_eq!(err.field(), Some("parent.leaves[1].name"));
        assert_eq!(err.record(), Some("Leaf"));

        let err = decode::<Branch>(&json!({"id_str": "1", "count": "3"}), &options()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert_eq!(err.field(), Some("count"));
        assert_eq!(err.expected(), Some("integer"));
        assert_eq!(err.actual(), Some("string"));
    }

    #[test]
    fn optional_date_failure_is_absorbed_and_reported() {
        let wire = json!({"name": "a", "born": "Wed Aug 27 13:08:45 +0000 2008", "at": "yesterday"});
        let decoded = decode_reported::<Leaf>(&wire, &options()).expect("decode");
        assert_eq!(decoded.value.at, OffsetDateTime::UNIX_EPOCH);
        assert_eq!(decoded.absorbed.len(), 1);
        assert_eq!(decoded.absorbed[0].field, "at");
        assert_eq!(decoded.absorbed[0].raw, "yesterday");
        assert_eq!(decoded.absorbed[0].record, "Leaf");
    }

    #[test]
    fn strict_policy_and_required_dates_do_not_absorb() {
        let wire = json!({"name": "a", "born": "Wed Aug 27 13:08:45 +0000 2008", "at": "yesterday"});
        let err = decode::<Leaf>(&wire, &DecodeOptions::strict()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueFormat);
        assert_eq!(err.field(), Some("at"));
        assert_eq!(DecodeOptions::strict().date_fallback, DateFallback::Strict);

        let wire = json!({"name": "a", "born": "2008-08-27"});
        let err = decode::<Leaf>(&wire, &options()).unwrap_err();
        assert_eq!(err.field(), Some("born"));
    }

    #[test]
    fn search_profile_field_round_trips() {
        let wire = json!({"name": "a", "born": "Wed Aug 27 13:08:45 +0000 2008", "seen": "Fri, 05 Nov 2010 09:30:00 +0000"});
        let leaf: Leaf = decode(&wire, &options()).expect("decode");
        assert_eq!(encode(&leaf).expect("encode"), wire);
    }

    #[test]
    fn depth_guard_trips_on_deep_nesting() {
        let mut wire = json!({"id_str": "leaf"});
        for idx in 0..5 {
            wire = json!({"id_str": idx.to_string(), "parent": wire});
        }
        let mut shallow = DecodeOptions::new();
        shallow.max_depth = 3;
        let err = decode::<Branch>(&wire, &shallow).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DepthLimit);
        assert!(decode::<Branch>(&wire, &options()).is_ok());
    }

    #[test]
    fn array_element_failures_name_the_index() {
        let err = decode::<Branch>(&json!({"id_str": "1", "tags": ["a", 2]}), &options()).unwrap_err();
        assert_eq!(err.field(), Some("tags[1]"));
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn non_object_record_is_a_type_mismatch() {
        let err = decode::<Branch>(&json!(["not", "an", "object"]), &options()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert_eq!(err.expected(), Some("record(Branch)"));
    }
}
