//! Purpose: Cursor-paged collections whose element key varies by call site.
//! Exports: `CursorPage`, `decode_page`, `decode_page_reported`, `encode_page`, `NO_CURSOR`.
//! Role: Plain generic window of elements plus forward/backward cursor tokens.
//! Invariants: Cursor `"0"` means no further page in that direction.
//! Invariants: The element key never collides with a cursor key.
//! Notes: `*_cursor_str` wins over the numeric `*_cursor`; with neither present the
//! cursor is `"0"`.

use crate::core::codec::{Decoded, DecodeOptions, Decoder, encode_value};
use crate::core::convert::shape_of;
use crate::core::error::{Error, ErrorKind};
use crate::core::field::{FieldType, WireValue};
use crate::core::schema::{TypeTag, validate_shape};
use crate::core::slot::Slot;
use serde_json::{Map, Value};

pub const NO_CURSOR: &str = "0";

const NEXT_CURSOR_STR: &str = "next_cursor_str";
const PREVIOUS_CURSOR_STR: &str = "previous_cursor_str";
const NEXT_CURSOR: &str = "next_cursor";
const PREVIOUS_CURSOR: &str = "previous_cursor";
const CURSOR_KEYS: [&str; 4] = [NEXT_CURSOR_STR, PREVIOUS_CURSOR_STR, NEXT_CURSOR, PREVIOUS_CURSOR];

#[derive(Clone, Debug, PartialEq)]
pub struct CursorPage<T> {
    pub next_cursor: String,
    pub previous_cursor: String,
    pub elements: Vec<T>,
}

impl<T> CursorPage<T> {
    pub fn new(elements: Vec<T>) -> Self {
        Self {
            next_cursor: NO_CURSOR.to_string(),
            previous_cursor: NO_CURSOR.to_string(),
            elements,
        }
    }

    pub fn with_cursors(mut self, next: impl Into<String>, previous: impl Into<String>) -> Self {
        self.next_cursor = next.into();
        self.previous_cursor = previous.into();
        self
    }

    pub fn has_next(&self) -> bool {
        self.next_cursor != NO_CURSOR
    }

    pub fn has_previous(&self) -> bool {
        self.previous_cursor != NO_CURSOR
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl<T> Default for CursorPage<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

fn element_shape<T: WireValue>(element_key: &str) -> Result<TypeTag, Error> {
    let defect = |reason: String| {
        Error::new(ErrorKind::SchemaDefinition)
            .with_message(reason)
            .with_field(element_key.to_string())
    };
    if element_key.is_empty() {
        return Err(defect("empty page element key".to_string()));
    }
    if CURSOR_KEYS.iter().any(|key| *key == element_key) {
        return Err(defect(format!(
            "page element key `{element_key}` collides with a cursor key"
        )));
    }
    let shape = TypeTag::array(T::tag());
    validate_shape(&shape).map_err(defect)?;
    Ok(shape)
}

pub fn decode_page<T: WireValue>(
    value: &Value,
    element_key: &str,
    options: &DecodeOptions,
) -> Result<CursorPage<T>, Error> {
    decode_page_reported(value, element_key, options).map(|decoded| decoded.value)
}

pub fn decode_page_reported<T: WireValue>(
    value: &Value,
    element_key: &str,
    options: &DecodeOptions,
) -> Result<Decoded<CursorPage<T>>, Error> {
    let shape = element_shape::<T>(element_key)?;
    let TypeTag::Array(element) = &shape else {
        return Err(Error::new(ErrorKind::Internal).with_message("page shape is not an array"));
    };
    let object = value.as_object().ok_or_else(|| {
        Error::new(ErrorKind::TypeMismatch)
            .with_message("cursor page must be an object")
            .with_shapes("object", shape_of(value))
    })?;

    let next_cursor = cursor(object, NEXT_CURSOR_STR, NEXT_CURSOR)?;
    let previous_cursor = cursor(object, PREVIOUS_CURSOR_STR, PREVIOUS_CURSOR)?;

    let items = match object.get(element_key) {
        None | Some(Value::Null) => {
            return Err(Error::new(ErrorKind::MissingField)
                .with_message(format!("missing page element array `{element_key}`"))
                .with_field(element_key.to_string()));
        }
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(Error::new(ErrorKind::TypeMismatch)
                .with_message("wire shape disagrees with declared shape")
                .with_shapes(shape.to_string(), shape_of(other))
                .with_field(element_key.to_string()));
        }
    };

    let mut decoder = Decoder::new(options);
    decoder.enter(element_key);
    let slots = decoder.elements(items, element, 1);
    decoder.leave();
    let elements = <Vec<T> as FieldType>::from_slot(Slot::Array(slots?))?;

    Ok(Decoded {
        value: CursorPage {
            next_cursor,
            previous_cursor,
            elements,
        },
        absorbed: decoder.into_absorbed(),
    })
}

pub fn encode_page<T: WireValue>(page: &CursorPage<T>, element_key: &str) -> Result<Value, Error> {
    let shape = element_shape::<T>(element_key)?;
    let elements = Slot::Array(page.elements.iter().map(WireValue::to_slot).collect());
    let mut map = Map::new();
    map.insert(
        element_key.to_string(),
        encode_value(&elements, &shape).map_err(|err| err.within(element_key))?,
    );
    insert_cursor(&mut map, NEXT_CURSOR, NEXT_CURSOR_STR, &page.next_cursor);
    insert_cursor(&mut map, PREVIOUS_CURSOR, PREVIOUS_CURSOR_STR, &page.previous_cursor);
    Ok(Value::Object(map))
}

fn cursor(object: &Map<String, Value>, text_key: &str, number_key: &str) -> Result<String, Error> {
    let invalid = |key: &str, value: &Value| {
        Error::new(ErrorKind::TypeMismatch)
            .with_message("cursor must be a string or integer")
            .with_shapes("string", shape_of(value))
            .with_field(key.to_string())
    };
    match object.get(text_key) {
        Some(Value::String(token)) => return Ok(token.clone()),
        None | Some(Value::Null) => {}
        Some(other) => return Err(invalid(text_key, other)),
    }
    match object.get(number_key) {
        Some(Value::Number(number)) if number.is_i64() || number.is_u64() => Ok(number.to_string()),
        Some(Value::String(token)) => Ok(token.clone()),
        None | Some(Value::Null) => Ok(NO_CURSOR.to_string()),
        Some(other) => Err(invalid(number_key, other)),
    }
}

fn insert_cursor(map: &mut Map<String, Value>, number_key: &str, text_key: &str, token: &str) {
    if let Ok(number) = token.parse::<i64>() {
        map.insert(number_key.to_string(), Value::from(number));
    }
    map.insert(text_key.to_string(), Value::String(token.to_string()));
}
