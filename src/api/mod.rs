//! Purpose: Define the stable public Rust API boundary for tweetshape.
//! Exports: Decode/encode operations, page helpers, response readers, and the
//! record, schema, value and error types callers need.
//! Role: Public, additive-only surface; internal engine modules stay reachable but
//! callers should not need them.
//! Invariants: Every operation here is stateless apart from the schema cache.

mod response;

pub use crate::core::codec::{
    AbsorbedFailure, DEFAULT_MAX_DEPTH, DateFallback, DecodeOptions, Decoded, decode,
    decode_reported, encode,
};
pub use crate::core::convert::color::Rgb;
pub use crate::core::convert::enums::ClosedEnum;
pub use crate::core::convert::flags::FlagSet;
pub use crate::core::convert::geometry::{Geometry, Position};
pub use crate::core::convert::uri::Uri;
#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::field::{FieldType, WireValue};
pub use crate::core::page::{
    CursorPage, NO_CURSOR, decode_page, decode_page_reported, encode_page,
};
pub use crate::core::record::Record;
pub use crate::core::schema::{
    DateProfile, FieldSpec, FieldSpecView, RecordSchema, TokenTable, TypeTag,
};
pub use crate::records::{Canonical, CatalogEntry, catalog, find, prepare_all};
pub use response::{parse_payload, read_page_response, read_response, read_response_text};
