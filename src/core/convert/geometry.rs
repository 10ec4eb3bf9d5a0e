//! Purpose: GeoJSON-style geometry union used by tweets, users and places.
//! Exports: `Position`, `Geometry`, `decode`, `encode`.
//! Role: Discriminated on the wire by `type`; payload under `coordinates`.
//! Invariants: Coordinates are `[longitude, latitude]` on the wire, never swapped.
//! Invariants: An unrecognized `type` is an unknown-discriminator failure.

use crate::core::convert::{number, shape_of};
use crate::core::error::{Error, ErrorKind};
use serde_json::{Map, Value};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
    pub longitude: f64,
    pub latitude: f64,
}

impl Position {
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Point(Position),
    /// Linear rings, each an ordered sequence of positions.
    Polygon(Vec<Vec<Position>>),
}

impl Geometry {
    pub fn kind(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::Polygon(_) => "Polygon",
        }
    }
}

pub fn decode(value: &Value) -> Result<Geometry, Error> {
    let object = value.as_object().ok_or_else(|| {
        Error::new(ErrorKind::TypeMismatch)
            .with_message("geometry must be an object")
            .with_shapes("object", shape_of(value))
    })?;
    let kind = match object.get("type") {
        None | Some(Value::Null) => {
            return Err(Error::new(ErrorKind::MissingField)
                .with_message("geometry is missing `type`"));
        }
        Some(Value::String(kind)) => kind.as_str(),
        Some(other) => {
            return Err(Error::new(ErrorKind::TypeMismatch)
                .with_message("geometry `type` must be a string")
                .with_shapes("string", shape_of(other)));
        }
    };
    let coordinates = || {
        object.get("coordinates").ok_or_else(|| {
            Error::new(ErrorKind::MissingField)
                .with_message(format!("{kind} geometry is missing `coordinates`"))
        })
    };
    match kind {
        "Point" => position(coordinates()?).map(Geometry::Point),
        "Polygon" => {
            let rings = array(coordinates()?, "polygon coordinates")?;
            rings
                .iter()
                .map(|ring| {
                    array(ring, "polygon ring")?
                        .iter()
                        .map(position)
                        .collect::<Result<Vec<_>, _>>()
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Geometry::Polygon)
        }
        other => Err(Error::new(ErrorKind::UnknownDiscriminator)
            .with_message(format!(
                "unknown geometry type `{other}` (expected Point or Polygon)"
            ))),
    }
}

pub fn encode(geometry: &Geometry) -> Result<Value, Error> {
    let coordinates = match geometry {
        Geometry::Point(point) => position_value(point)?,
        Geometry::Polygon(rings) => Value::Array(
            rings
                .iter()
                .map(|ring| {
                    ring.iter()
                        .map(position_value)
                        .collect::<Result<Vec<_>, _>>()
                        .map(Value::Array)
                })
                .collect::<Result<Vec<_>, _>>()?,
        ),
    };
    let mut map = Map::new();
    map.insert("type".to_string(), Value::String(geometry.kind().to_string()));
    map.insert("coordinates".to_string(), coordinates);
    Ok(Value::Object(map))
}

fn array<'a>(value: &'a Value, what: &str) -> Result<&'a Vec<Value>, Error> {
    value.as_array().ok_or_else(|| {
        Error::new(ErrorKind::TypeMismatch)
            .with_message(format!("{what} must be an array"))
            .with_shapes("array", shape_of(value))
    })
}

fn position(value: &Value) -> Result<Position, Error> {
    let pair = array(value, "position")?;
    match pair.as_slice() {
        [longitude, latitude] => match (longitude.as_f64(), latitude.as_f64()) {
            (Some(longitude), Some(latitude)) => Ok(Position::new(longitude, latitude)),
            _ => Err(Error::new(ErrorKind::TypeMismatch)
                .with_message("position members must be numbers")
                .with_shapes("[number, number]", "non-numeric member")),
        },
        _ => Err(Error::new(ErrorKind::TypeMismatch)
            .with_message(format!(
                "position must be a [longitude, latitude] pair, found {} members",
                pair.len()
            ))
            .with_shapes("[number, number]", "array")),
    }
}

fn position_value(position: &Position) -> Result<Value, Error> {
    Ok(Value::Array(vec![
        number(position.longitude)?,
        number(position.latitude)?,
    ]))
}
