//! Purpose: Declare typed records as data and bind them to cached schemas.
//! Exports: `Record`, `record!`.
//! Role: Generates, per record type, the ordered (wire key, field, shape) table plus
//! the moves between a complete `Fields` set and the record value.
//! Invariants: Field order in the declaration is schema order and encode order.
//! Invariants: A record is constructed only from a fully decoded `Fields` set.
//! Notes: A field may override its natural shape with `as <TypeTag>`; derivation
//! rejects any override other than a date-time profile.

use crate::core::error::Error;
use crate::core::schema::{RecordRef, RecordSchema};
use crate::core::slot::Fields;

pub trait Record: Sized + 'static {
    const NAME: &'static str;

    fn schema() -> Result<&'static RecordSchema, Error>;

    fn from_fields(fields: Fields) -> Result<Self, Error>;

    fn to_fields(&self) -> Fields;

    fn record_ref() -> RecordRef {
        RecordRef {
            name: Self::NAME,
            schema: Self::schema,
        }
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! __field_required {
    () => {
        false
    };
    (required) => {
        true
    };
}

/// Declares a record struct and its wire schema.
///
/// ```ignore
/// record! {
///     pub struct SavedSearch {
///         id: String => "id_str", required;
///         query: String => "query", required;
///         created_at: OffsetDateTime => "created_at";
///     }
/// }
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $field:ident : $fty:ty => $key:literal $(as $shape:expr)? $(, $req:ident)? ;
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq)]
        $vis struct $name {
            $(
                $(#[$fmeta])*
                pub $field: $fty,
            )*
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    $($field: <$fty as $crate::core::field::FieldType>::zero(),)*
                }
            }
        }

        impl $crate::core::record::Record for $name {
            const NAME: &'static str = stringify!($name);

            fn schema() -> Result<
                &'static $crate::core::schema::RecordSchema,
                $crate::core::error::Error,
            > {
                static SCHEMA: ::std::sync::OnceLock<
                    Result<
                        $crate::core::schema::RecordSchema,
                        $crate::core::schema::SchemaDefect,
                    >,
                > = ::std::sync::OnceLock::new();

                fn decls() -> Vec<$crate::core::schema::FieldDecl> {
                    vec![
                        $(
                            $crate::core::schema::FieldDecl {
                                field: stringify!($field),
                                wire_key: $key,
                                natural: <$fty as $crate::core::field::FieldType>::tag(),
                                declared: {
                                    #[allow(unused_mut)]
                                    let mut declared = None;
                                    $(declared = Some($shape);)?
                                    declared
                                },
                                required: $crate::__field_required!($($req)?),
                            },
                        )*
                    ]
                }

                $crate::core::schema::cached(&SCHEMA, stringify!($name), decls)
            }

            #[allow(unused_mut, unused_variables)]
            fn from_fields(
                mut fields: $crate::core::slot::Fields,
            ) -> Result<Self, $crate::core::error::Error> {
                Ok(Self {
                    $($field: fields.take::<$fty>($key)?,)*
                })
            }

            #[allow(unused_mut)]
            fn to_fields(&self) -> $crate::core::slot::Fields {
                let mut fields = $crate::core::slot::Fields::new();
                $(
                    fields.put(
                        $key,
                        <$fty as $crate::core::field::FieldType>::to_slot(&self.$field),
                    );
                )*
                fields
            }
        }

        impl $crate::core::field::WireValue for $name {
            fn tag() -> $crate::core::schema::TypeTag {
                $crate::core::schema::TypeTag::Record(
                    <Self as $crate::core::record::Record>::record_ref(),
                )
            }

            fn from_slot(
                slot: $crate::core::slot::Slot,
            ) -> Result<Self, $crate::core::error::Error> {
                match slot {
                    $crate::core::slot::Slot::Record(fields) => {
                        <Self as $crate::core::record::Record>::from_fields(fields)
                    }
                    other => Err($crate::core::field::slot_mismatch(stringify!($name), &other)),
                }
            }

            fn to_slot(&self) -> $crate::core::slot::Slot {
                $crate::core::slot::Slot::Record(
                    <Self as $crate::core::record::Record>::to_fields(self),
                )
            }
        }
    };
}
