//! Purpose: Describe record layouts as ordered field tables and validate them once.
//! Exports: `TypeTag`, `DateProfile`, `TokenTable`, `RecordRef`, `FieldDecl`, `FieldSpec`,
//! `RecordSchema`, `SchemaDefect`, `cached`.
//! Role: The single source of truth the decode/encode engine interprets per record type.
//! Invariants: A derived schema is immutable and lives for the process.
//! Invariants: Wire keys are non-empty and unique within one schema.
//! Invariants: Shape defects are reported at derivation, never per record.
//! Notes: Nested records are referenced by function pointer and resolved lazily, so
//! self-referential records derive without recursion.

use crate::core::error::{Error, ErrorKind};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::sync::OnceLock;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DateProfile {
    /// `Wed Aug 27 13:08:45 +0000 2008`
    Standard,
    /// `Wed, 27 Aug 2008 13:08:45 +0000`
    SearchResult,
}

impl DateProfile {
    pub fn name(self) -> &'static str {
        match self {
            DateProfile::Standard => "standard",
            DateProfile::SearchResult => "search-result",
        }
    }
}

/// Closed, ordered token table shared by closed enums and flag sets.
/// Table order is the canonical encode order.
#[derive(Debug, Eq, PartialEq)]
pub struct TokenTable {
    pub name: &'static str,
    pub tokens: &'static [&'static str],
}

impl TokenTable {
    pub fn position(&self, token: &str) -> Option<usize> {
        self.tokens.iter().position(|candidate| *candidate == token)
    }
}

#[derive(Clone, Copy)]
pub struct RecordRef {
    pub name: &'static str,
    pub schema: fn() -> Result<&'static RecordSchema, Error>,
}

impl fmt::Debug for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RecordRef").field(&self.name).finish()
    }
}

impl PartialEq for RecordRef {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TypeTag {
    String,
    Integer,
    Double,
    Boolean,
    DateTime(DateProfile),
    Color,
    Uri,
    Enum(&'static TokenTable),
    Flags(&'static TokenTable),
    Record(RecordRef),
    Array(Box<TypeTag>),
    Geometry,
}

impl TypeTag {
    pub fn array(element: TypeTag) -> Self {
        TypeTag::Array(Box::new(element))
    }

    pub fn is_date_time(&self) -> bool {
        matches!(self, TypeTag::DateTime(_))
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::String => f.write_str("string"),
            TypeTag::Integer => f.write_str("integer"),
            TypeTag::Double => f.write_str("double"),
            TypeTag::Boolean => f.write_str("boolean"),
            TypeTag::DateTime(profile) => write!(f, "date-time({})", profile.name()),
            TypeTag::Color => f.write_str("color"),
            TypeTag::Uri => f.write_str("uri"),
            TypeTag::Enum(table) => write!(f, "enum({})", table.name),
            TypeTag::Flags(table) => write!(f, "flags({})", table.name),
            TypeTag::Record(record) => write!(f, "record({})", record.name),
            TypeTag::Array(element) => write!(f, "array<{element}>"),
            TypeTag::Geometry => f.write_str("geometry"),
        }
    }
}

/// One field as written in a record declaration, before validation.
#[derive(Clone, Debug)]
pub struct FieldDecl {
    pub field: &'static str,
    pub wire_key: &'static str,
    /// Shape implied by the Rust type of the field.
    pub natural: TypeTag,
    /// Explicit shape from the declaration, if any.
    pub declared: Option<TypeTag>,
    pub required: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldSpec {
    pub field: &'static str,
    pub wire_key: &'static str,
    pub shape: TypeTag,
    pub required: bool,
}

#[derive(Debug)]
pub struct RecordSchema {
    name: &'static str,
    fields: Vec<FieldSpec>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SchemaDefect {
    pub record: &'static str,
    pub field: Option<&'static str>,
    pub reason: String,
}

impl SchemaDefect {
    pub fn to_error(&self) -> Error {
        let mut err = Error::new(ErrorKind::SchemaDefinition)
            .with_message(self.reason.clone())
            .with_record(self.record);
        if let Some(field) = self.field {
            err = err.with_field(field);
        }
        err
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct FieldSpecView {
    pub field: &'static str,
    pub wire_key: &'static str,
    pub shape: String,
    pub required: bool,
}

impl RecordSchema {
    pub fn derive(name: &'static str, decls: Vec<FieldDecl>) -> Result<Self, SchemaDefect> {
        let mut seen = HashSet::new();
        let mut fields = Vec::with_capacity(decls.len());
        for decl in decls {
            let defect = |reason: String| SchemaDefect {
                record: name,
                field: Some(decl.field),
                reason,
            };
            if decl.wire_key.is_empty() {
                return Err(defect("empty wire key".to_string()));
            }
            if !seen.insert(decl.wire_key) {
                return Err(defect(format!("duplicate wire key `{}`", decl.wire_key)));
            }
            let shape = match &decl.declared {
                Some(declared) if !compatible(&decl.natural, declared) => {
                    return Err(defect(format!(
                        "declared shape {declared} is incompatible with field type shape {}",
                        decl.natural
                    )));
                }
                Some(declared) => declared.clone(),
                None => decl.natural.clone(),
            };
            validate_shape(&shape).map_err(defect)?;
            if decl.required && zero_is_meaningful(&shape) {
                return Err(defect(format!(
                    "required {shape} field is omitted on encode when zero and cannot be re-read"
                )));
            }
            fields.push(FieldSpec {
                field: decl.field,
                wire_key: decl.wire_key,
                shape,
                required: decl.required,
            });
        }
        Ok(Self { name, fields })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, wire_key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.wire_key == wire_key)
    }

    pub fn describe(&self) -> Vec<FieldSpecView> {
        self.fields
            .iter()
            .map(|spec| FieldSpecView {
                field: spec.field,
                wire_key: spec.wire_key,
                shape: spec.shape.to_string(),
                required: spec.required,
            })
            .collect()
    }
}

/// Rejects shape combinations the engine has no converter for.
pub fn validate_shape(shape: &TypeTag) -> Result<(), String> {
    match shape {
        TypeTag::Enum(table) => validate_table(table, usize::MAX),
        TypeTag::Flags(table) => validate_table(table, 64),
        TypeTag::Array(element) => match element.as_ref() {
            TypeTag::Array(_) => Err("arrays of arrays are not supported".to_string()),
            TypeTag::Geometry => Err("arrays of geometries are not supported".to_string()),
            TypeTag::Flags(_) => Err("arrays of flag sets are not supported".to_string()),
            other => validate_shape(other),
        },
        _ => Ok(()),
    }
}

fn validate_table(table: &TokenTable, max: usize) -> Result<(), String> {
    if table.tokens.is_empty() {
        return Err(format!("token table {} is empty", table.name));
    }
    if table.tokens.len() > max {
        return Err(format!(
            "token table {} has {} entries (max {max})",
            table.name,
            table.tokens.len()
        ));
    }
    let mut seen = HashSet::new();
    for token in table.tokens {
        if !seen.insert(*token) {
            return Err(format!(
                "token table {} repeats token `{token}`",
                table.name
            ));
        }
    }
    Ok(())
}

/// Shapes whose zero value is an ordinary wire value (`0`, `false`, `[]`).
/// Encode drops zero values, so such a field cannot also be required.
fn zero_is_meaningful(shape: &TypeTag) -> bool {
    matches!(
        shape,
        TypeTag::Integer | TypeTag::Double | TypeTag::Boolean | TypeTag::Flags(_) | TypeTag::Array(_)
    )
}

/// A declaration may only narrow a date-time field to another profile.
fn compatible(natural: &TypeTag, declared: &TypeTag) -> bool {
    match (natural, declared) {
        (TypeTag::DateTime(_), TypeTag::DateTime(_)) => true,
        (TypeTag::Array(a), TypeTag::Array(b)) => compatible(a, b),
        (a, b) => a == b,
    }
}

/// Derives a schema on first use and caches the outcome, defect included.
pub fn cached(
    cell: &'static OnceLock<Result<RecordSchema, SchemaDefect>>,
    name: &'static str,
    decls: fn() -> Vec<FieldDecl>,
) -> Result<&'static RecordSchema, Error> {
    cell.get_or_init(|| {
        let derived = RecordSchema::derive(name, decls());
        match &derived {
            Ok(schema) => {
                tracing::debug!(record = name, fields = schema.fields.len(), "derived schema")
            }
            Err(defect) => {
                tracing::error!(record = name, reason = %defect.reason, "schema defect")
            }
        }
        derived
    })
    .as_ref()
    .map_err(SchemaDefect::to_error)
}

#[cfg(test)]
mod tests {
    use super::{DateProfile, FieldDecl, RecordSchema, TokenTable, TypeTag};

    static MODES: TokenTable = TokenTable {
        name: "Mode",
        tokens: &["public", "private"],
    };
    static EMPTY: TokenTable = TokenTable {
        name: "Empty",
        tokens: &[],
    };
    static REPEATED: TokenTable = TokenTable {
        name: "Repeated",
        tokens: &["a", "b", "a"],
    };

    fn decl(field: &'static str, wire_key: &'static str, natural: TypeTag) -> FieldDecl {
        FieldDecl {
            field,
            wire_key,
            natural,
            declared: None,
            required: false,
        }
    }

    #[test]
    fn derive_keeps_declaration_order() {
        let schema = RecordSchema::derive(
            "Sample",
            vec![
                decl("id", "id_str", TypeTag::String),
                decl("count", "count", TypeTag::Integer),
                decl("mode", "mode", TypeTag::Enum(&MODES)),
            ],
        )
        .expect("derive");
        let keys: Vec<_> = schema.fields().iter().map(|spec| spec.wire_key).collect();
        assert_eq!(keys, vec!["id_str", "count", "mode"]);
        assert_eq!(schema.field("count").map(|spec| spec.field), Some("count"));
    }

    #[test]
    fn date_profile_override_is_accepted() {
        let mut created = decl("created_at", "created_at", TypeTag::DateTime(DateProfile::Standard));
        created.declared = Some(TypeTag::DateTime(DateProfile::SearchResult));
        let schema = RecordSchema::derive("Sample", vec![created]).expect("derive");
        assert_eq!(
            schema.fields()[0].shape,
            TypeTag::DateTime(DateProfile::SearchResult)
        );
    }

    #[test]
    fn incompatible_override_is_a_defect() {
        let mut color = decl("color", "color", TypeTag::String);
        color.declared = Some(TypeTag::Color);
        let defect = RecordSchema::derive("Sample", vec![color]).unwrap_err();
        assert_eq!(defect.field, Some("color"));
        assert!(defect.reason.contains("incompatible"));
    }

    #[test]
    fn duplicate_and_empty_keys_are_defects() {
        let defect = RecordSchema::derive(
            "Sample",
            vec![
                decl("a", "key", TypeTag::String),
                decl("b", "key", TypeTag::String),
            ],
        )
        .unwrap_err();
        assert!(defect.reason.contains("duplicate wire key"));

        let defect = RecordSchema::derive("Sample", vec![decl("a", "", TypeTag::String)]).unwrap_err();
        assert_eq!(defect.reason, "empty wire key");
    }

    #[test]
    fn unsupported_shapes_are_defects() {
        let nested = TypeTag::array(TypeTag::array(TypeTag::Integer));
        let defect = RecordSchema::derive("Sample", vec![decl("grid", "grid", nested)]).unwrap_err();
        assert!(defect.reason.contains("arrays of arrays"));

        let shapes = TypeTag::array(TypeTag::Geometry);
        assert!(RecordSchema::derive("Sample", vec![decl("shapes", "shapes", shapes)]).is_err());

        let empty = TypeTag::Enum(&EMPTY);
        assert!(RecordSchema::derive("Sample", vec![decl("e", "e", empty)]).is_err());

        let repeated = TypeTag::Flags(&REPEATED);
        let defect = RecordSchema::derive("Sample", vec![decl("f", "f", repeated)]).unwrap_err();
        assert!(defect.reason.contains("repeats token `a`"));
    }

    #[test]
    fn required_numeric_and_boolean_fields_are_defects() {
        for shape in [
            TypeTag::Integer,
            TypeTag::Double,
            TypeTag::Boolean,
            TypeTag::array(TypeTag::String),
        ] {
            let mut hits = decl("hits", "remaining_hits", shape);
            hits.required = true;
            let defect = RecordSchema::derive("Sample", vec![hits]).unwrap_err();
            assert_eq!(defect.field, Some("hits"));
            assert!(defect.reason.contains("cannot be re-read"));
        }

        let mut id = decl("id", "id_str", TypeTag::String);
        id.required = true;
        assert!(RecordSchema::derive("Sample", vec![id]).is_ok());
    }

    #[test]
    fn shapes_render_readably() {
        assert_eq!(
            TypeTag::array(TypeTag::DateTime(DateProfile::SearchResult)).to_string(),
            "array<date-time(search-result)>"
        );
        assert_eq!(TypeTag::Enum(&MODES).to_string(), "enum(Mode)");
    }
}
