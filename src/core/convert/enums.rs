//! Purpose: Closed string enumerations keyed by a static token table.
//! Exports: `ClosedEnum`, `closed_enum!`, `decode`, `encode`.
//! Role: One table drives both the closed-enum shape and the flag-set shape.
//! Invariants: Variant order equals token order; variant index is the table index.
//! Invariants: Unknown tokens are rejected for closed enums (flag sets ignore them).

use crate::core::error::{Error, ErrorKind};
use crate::core::schema::TokenTable;
use serde_json::Value;

pub trait ClosedEnum: Copy + Eq + 'static {
    const TABLE: &'static TokenTable;
    const VARIANTS: &'static [Self];

    fn index(self) -> usize;

    fn from_index(index: usize) -> Option<Self> {
        Self::VARIANTS.get(index).copied()
    }

    fn from_token(token: &str) -> Option<Self> {
        Self::TABLE.position(token).and_then(Self::from_index)
    }

    fn token(self) -> &'static str {
        Self::TABLE.tokens[self.index()]
    }
}

/// Declares a fieldless enum whose variants map one-to-one onto wire tokens.
#[macro_export]
macro_rules! closed_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident = $token:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        $vis enum $name {
            $($variant),+
        }

        impl $crate::core::convert::enums::ClosedEnum for $name {
            const TABLE: &'static $crate::core::schema::TokenTable =
                &$crate::core::schema::TokenTable {
                    name: stringify!($name),
                    tokens: &[$($token),+],
                };
            const VARIANTS: &'static [Self] = &[$(Self::$variant),+];

            fn index(self) -> usize {
                self as usize
            }
        }

        impl $crate::core::field::WireValue for $name {
            fn tag() -> $crate::core::schema::TypeTag {
                $crate::core::schema::TypeTag::Enum(
                    <Self as $crate::core::convert::enums::ClosedEnum>::TABLE,
                )
            }

            fn from_slot(
                slot: $crate::core::slot::Slot,
            ) -> Result<Self, $crate::core::error::Error> {
                match slot {
                    $crate::core::slot::Slot::Enum(index) => {
                        <Self as $crate::core::convert::enums::ClosedEnum>::from_index(index)
                            .ok_or_else(|| {
                                $crate::core::field::slot_mismatch(
                                    stringify!($name),
                                    &$crate::core::slot::Slot::Enum(index),
                                )
                            })
                    }
                    other => Err($crate::core::field::slot_mismatch(stringify!($name), &other)),
                }
            }

            fn to_slot(&self) -> $crate::core::slot::Slot {
                $crate::core::slot::Slot::Enum(
                    <Self as $crate::core::convert::enums::ClosedEnum>::index(*self),
                )
            }
        }
    };
}

pub fn decode(table: &TokenTable, text: &str) -> Result<usize, Error> {
    table.position(text).ok_or_else(|| {
        Error::new(ErrorKind::ValueFormat).with_message(format!(
            "`{text}` is not a known {} token (expected one of: {})",
            table.name,
            table.tokens.join(", ")
        ))
    })
}

pub fn encode(table: &TokenTable, index: usize) -> Result<Value, Error> {
    table
        .tokens
        .get(index)
        .map(|token| Value::String((*token).to_string()))
        .ok_or_else(|| {
            Error::new(ErrorKind::Internal)
                .with_message(format!("{} has no token at index {index}", table.name))
        })
}
