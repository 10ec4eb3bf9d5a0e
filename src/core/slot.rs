// Intermediate, shape-tagged field values assembled by the engine before a record exists.
use crate::core::convert::color::Rgb;
use crate::core::convert::geometry::Geometry;
use crate::core::convert::uri::Uri;
use crate::core::error::Error;
use crate::core::field::FieldType;
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq)]
pub enum Slot {
    String(String),
    Integer(i64),
    Double(f64),
    Boolean(bool),
    DateTime(OffsetDateTime),
    Color(Rgb),
    Uri(Uri),
    Enum(usize),
    Flags(u64),
    Record(Fields),
    Array(Vec<Slot>),
    Geometry(Geometry),
}

impl Slot {
    pub fn kind(&self) -> &'static str {
        match self {
            Slot::String(_) => "string",
            Slot::Integer(_) => "integer",
            Slot::Double(_) => "double",
            Slot::Boolean(_) => "boolean",
            Slot::DateTime(_) => "date-time",
            Slot::Color(_) => "color",
            Slot::Uri(_) => "uri",
            Slot::Enum(_) => "enum",
            Slot::Flags(_) => "flags",
            Slot::Record(_) => "record",
            Slot::Array(_) => "array",
            Slot::Geometry(_) => "geometry",
        }
    }
}

/// Populated fields of one record keyed by wire key, in schema order.
/// Zero-valued fields have no entry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Fields {
    entries: Vec<(&'static str, Slot)>,
}

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn put(&mut self, key: &'static str, slot: Option<Slot>) {
        if let Some(slot) = slot {
            self.entries.push((key, slot));
        }
    }

    pub fn get(&self, key: &str) -> Option<&Slot> {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == key)
            .map(|(_, slot)| slot)
    }

    /// Moves a field out as its Rust type, or the type's zero value when unset.
    pub fn take<T: FieldType>(&mut self, key: &str) -> Result<T, Error> {
        match self.entries.iter().position(|(candidate, _)| *candidate == key) {
            Some(idx) => {
                let (_, slot) = self.entries.remove(idx);
                T::from_slot(slot).map_err(|err| err.or_field(|| key.to_string()))
            }
            None => Ok(T::zero()),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(key, _)| *key)
    }
}
