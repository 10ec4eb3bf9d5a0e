//! Purpose: Bind Rust field types to engine shapes and slots.
//! Exports: `WireValue`, `FieldType`, `slot_mismatch`.
//! Role: Compile-time half of the schema; each Rust type names its natural shape.
//! Invariants: `FieldType::to_slot` returns `None` exactly for the zero value.
//! Invariants: A slot/type disagreement is an internal error; schemas make it unreachable.

use crate::core::convert::color::Rgb;
use crate::core::convert::enums::ClosedEnum;
use crate::core::convert::flags::FlagSet;
use crate::core::convert::geometry::Geometry;
use crate::core::convert::uri::Uri;
use crate::core::error::{Error, ErrorKind};
use crate::core::record::Record;
use crate::core::schema::{DateProfile, TypeTag};
use crate::core::slot::Slot;
use time::OffsetDateTime;

/// A value that can appear on the wire: a field's payload or an array element.
pub trait WireValue: Sized {
    fn tag() -> TypeTag;
    fn from_slot(slot: Slot) -> Result<Self, Error>;
    fn to_slot(&self) -> Slot;
}

/// A record field type with a zero value that is omitted on encode.
pub trait FieldType: Sized {
    fn tag() -> TypeTag;
    fn zero() -> Self;
    fn from_slot(slot: Slot) -> Result<Self, Error>;
    fn to_slot(&self) -> Option<Slot>;
}

pub fn slot_mismatch(expected: &str, slot: &Slot) -> Error {
    Error::new(ErrorKind::Internal)
        .with_message("decoded slot does not match field type")
        .with_shapes(expected, slot.kind())
}

macro_rules! wire_value {
    ($ty:ty, $tag:expr, $variant:ident) => {
        impl WireValue for $ty {
            fn tag() -> TypeTag {
                $tag
            }

            fn from_slot(slot: Slot) -> Result<Self, Error> {
                match slot {
                    Slot::$variant(value) => Ok(value),
                    other => Err(slot_mismatch(stringify!($ty), &other)),
                }
            }

            fn to_slot(&self) -> Slot {
                Slot::$variant(self.clone())
            }
        }
    };
}

wire_value!(String, TypeTag::String, String);
wire_value!(i64, TypeTag::Integer, Integer);
wire_value!(f64, TypeTag::Double, Double);
wire_value!(bool, TypeTag::Boolean, Boolean);
wire_value!(OffsetDateTime, TypeTag::DateTime(DateProfile::Standard), DateTime);
wire_value!(Rgb, TypeTag::Color, Color);
wire_value!(Uri, TypeTag::Uri, Uri);
wire_value!(Geometry, TypeTag::Geometry, Geometry);

macro_rules! zeroable {
    ($($ty:ty => $zero:expr),* $(,)?) => {
        $(
            impl FieldType for $ty {
                fn tag() -> TypeTag {
                    <$ty as WireValue>::tag()
                }

                fn zero() -> Self {
                    $zero
                }

                fn from_slot(slot: Slot) -> Result<Self, Error> {
                    <$ty as WireValue>::from_slot(slot)
                }

                fn to_slot(&self) -> Option<Slot> {
                    if *self == $zero {
                        None
                    } else {
                        Some(WireValue::to_slot(self))
                    }
                }
            }
        )*
    };
}

zeroable! {
    String => String::new(),
    i64 => 0,
    f64 => 0.0,
    bool => false,
    OffsetDateTime => OffsetDateTime::UNIX_EPOCH,
}

impl<T: Record> WireValue for Box<T> {
    fn tag() -> TypeTag {
        TypeTag::Record(T::record_ref())
    }

    fn from_slot(slot: Slot) -> Result<Self, Error> {
        match slot {
            Slot::Record(fields) => T::from_fields(fields).map(Box::new),
            other => Err(slot_mismatch(T::NAME, &other)),
        }
    }

    fn to_slot(&self) -> Slot {
        Slot::Record(self.as_ref().to_fields())
    }
}

impl<T: WireValue> FieldType for Option<T> {
    fn tag() -> TypeTag {
        T::tag()
    }

    fn zero() -> Self {
        None
    }

    fn from_slot(slot: Slot) -> Result<Self, Error> {
        T::from_slot(slot).map(Some)
    }

    fn to_slot(&self) -> Option<Slot> {
        self.as_ref().map(WireValue::to_slot)
    }
}

impl<T: WireValue> FieldType for Vec<T> {
    fn tag() -> TypeTag {
        TypeTag::array(T::tag())
    }

    fn zero() -> Self {
        Vec::new()
    }

    fn from_slot(slot: Slot) -> Result<Self, Error> {
        match slot {
            Slot::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(idx, item)| {
                    T::from_slot(item).map_err(|err| err.or_field(|| format!("[{idx}]")))
                })
                .collect(),
            other => Err(slot_mismatch("array", &other)),
        }
    }

    fn to_slot(&self) -> Option<Slot> {
        if self.is_empty() {
            None
        } else {
            Some(Slot::Array(self.iter().map(WireValue::to_slot).collect()))
        }
    }
}

impl<F: ClosedEnum> FieldType for FlagSet<F> {
    fn tag() -> TypeTag {
        TypeTag::Flags(F::TABLE)
    }

    fn zero() -> Self {
        FlagSet::empty()
    }

    fn from_slot(slot: Slot) -> Result<Self, Error> {
        match slot {
            Slot::Flags(bits) => Ok(FlagSet::from_bits(bits)),
            other => Err(slot_mismatch(F::TABLE.name, &other)),
        }
    }

    fn to_slot(&self) -> Option<Slot> {
        if self.is_empty() {
            None
        } else {
            Some(Slot::Flags(self.bits()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldType, WireValue};
    use crate::core::convert::color::Rgb;
    use crate::core::schema::{DateProfile, TypeTag};
    use crate::core::slot::Slot;
    use time::OffsetDateTime;

    #[test]
    fn zero_values_produce_no_slot() {
        assert_eq!(FieldType::to_slot(&String::new()), None);
        assert_eq!(FieldType::to_slot(&0i64), None);
        assert_eq!(FieldType::to_slot(&false), None);
        assert_eq!(FieldType::to_slot(&OffsetDateTime::UNIX_EPOCH), None);
        assert_eq!(FieldType::to_slot(&Vec::<String>::new()), None);
        assert_eq!(FieldType::to_slot(&Option::<Rgb>::None), None);
        assert_eq!(FieldType::to_slot(&7i64), Some(Slot::Integer(7)));
    }

    #[test]
    fn natural_tags_follow_rust_types() {
        assert_eq!(<Vec<String> as FieldType>::tag(), TypeTag::array(TypeTag::String));
        assert_eq!(<Option<Rgb> as FieldType>::tag(), TypeTag::Color);
        assert_eq!(
            <OffsetDateTime as FieldType>::tag(),
            TypeTag::DateTime(DateProfile::Standard)
        );
    }

    #[test]
    fn array_slot_errors_name_the_index() {
        let slot = Slot::Array(vec![Slot::String("a".to_string()), Slot::Integer(1)]);
        let err = <Vec<String> as FieldType>::from_slot(slot).unwrap_err();
        assert_eq!(err.field(), Some("[1]"));
        assert_eq!(<String as WireValue>::tag(), TypeTag::String);
    }
}
