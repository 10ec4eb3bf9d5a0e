//! Purpose: Bit-flag sets carried on the wire as arrays of snake_case tokens.
//! Exports: `FlagSet`, `decode`, `encode`.
//! Role: Fixed-size `u64` set keyed by a closed enum's token table.
//! Invariants: Bit `i` is `TABLE.tokens[i]`; encode order is table order.
//! Invariants: Unrecognized tokens are ignored on decode (forward compatible).

use crate::core::convert::enums::ClosedEnum;
use crate::core::convert::shape_of;
use crate::core::error::{Error, ErrorKind};
use crate::core::schema::TokenTable;
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;

pub struct FlagSet<F> {
    bits: u64,
    marker: PhantomData<F>,
}

impl<F: ClosedEnum> FlagSet<F> {
    pub const fn empty() -> Self {
        Self {
            bits: 0,
            marker: PhantomData,
        }
    }

    /// Bits beyond the flag table are dropped.
    pub fn from_bits(bits: u64) -> Self {
        Self {
            bits: bits & mask(F::TABLE),
            marker: PhantomData,
        }
    }

    pub fn bits(&self) -> u64 {
        self.bits
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn contains(&self, flag: F) -> bool {
        self.bits & bit(flag) != 0
    }

    pub fn insert(&mut self, flag: F) {
        self.bits |= bit(flag);
    }

    pub fn remove(&mut self, flag: F) {
        self.bits &= !bit(flag);
    }

    pub fn with(mut self, flag: F) -> Self {
        self.insert(flag);
        self
    }

    /// Set flags in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = F> + '_ {
        F::VARIANTS
            .iter()
            .copied()
            .filter(move |flag| self.contains(*flag))
    }

    pub fn tokens(&self) -> Vec<&'static str> {
        self.iter().map(ClosedEnum::token).collect()
    }
}

fn bit<F: ClosedEnum>(flag: F) -> u64 {
    1u64 << flag.index()
}

fn mask(table: &TokenTable) -> u64 {
    match table.tokens.len() {
        len if len >= 64 => u64::MAX,
        len => (1u64 << len) - 1,
    }
}

impl<F: ClosedEnum> Default for FlagSet<F> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<F> Clone for FlagSet<F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F> Copy for FlagSet<F> {}

impl<F> PartialEq for FlagSet<F> {
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits
    }
}

impl<F> Eq for FlagSet<F> {}

impl<F: ClosedEnum> fmt::Debug for FlagSet<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.tokens()).finish()
    }
}

impl<F: ClosedEnum> FromIterator<F> for FlagSet<F> {
    fn from_iter<I: IntoIterator<Item = F>>(iter: I) -> Self {
        let mut set = Self::empty();
        for flag in iter {
            set.insert(flag);
        }
        set
    }
}

pub fn decode(table: &TokenTable, items: &[Value]) -> Result<u64, Error> {
    let mut bits = 0u64;
    for (idx, item) in items.iter().enumerate() {
        let Some(token) = item.as_str() else {
            return Err(Error::new(ErrorKind::TypeMismatch)
                .with_message(format!("flag token {idx} is not a string"))
                .with_shapes("string", shape_of(item)));
        };
        match table.position(token) {
            Some(position) => bits |= 1u64 << position,
            None => tracing::debug!(table = table.name, token, "ignoring unknown flag token"),
        }
    }
    Ok(bits)
}

pub fn encode(table: &TokenTable, bits: u64) -> Value {
    Value::Array(
        table
            .tokens
            .iter()
            .enumerate()
            .filter(|(position, _)| bits & (1u64 << position) != 0)
            .map(|(_, token)| Value::String((*token).to_string()))
            .collect(),
    )
}
