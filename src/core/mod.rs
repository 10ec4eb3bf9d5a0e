// Core modules implementing schemas, conversions, the codec engine and error modeling.
pub mod codec;
pub mod convert;
pub mod error;
pub mod field;
pub mod page;
pub mod record;
pub mod schema;
pub mod slot;
