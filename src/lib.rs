//! Purpose: Library crate behind the `tweetshape` CLI and tests.
//! Exports: `api` (public boundary), `core` (schema engine), `records` (domain records).
//! Role: Maps REST payload value trees to typed records and back.
//! Invariants: Record types are declared as data; one engine interprets every schema.
//! Invariants: Library calls hold no state beyond the lazily derived schema cache.
pub mod api;
pub mod core;
pub(crate) mod json;
pub mod notice;
pub mod records;
