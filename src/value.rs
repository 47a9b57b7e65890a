use serde::Serialize;
use time::OffsetDateTime;

use crate::{error::Result, sql::ser};

/// A bind argument.
///
/// Scalar variants carry an `Option` so that a NULL keeps its declared SQL
/// type: `Value::I32(None)` is bound as an `int` NULL, while the untyped
/// [`Value::Null`] falls back to `nvarchar (1)`. This distinguishes
/// "absent" from "present-and-zero" the way `sql.NullX` wrappers and
/// nullable pointers do in other drivers.
///
/// Conversions exist from every payload type `T`, from `Option<T>` (an
/// explicit nullable wrapper) and from `Option<&T>` (a nullable reference),
/// so `args` lists are usually built with `Value::from`/`.into()`.
/// Arbitrary serializable host types go through [`Value::serialized`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// NULL with no declared type.
    Null,
    Bool(Option<bool>),
    I8(Option<i8>),
    U8(Option<u8>),
    I16(Option<i16>),
    U16(Option<u16>),
    I32(Option<i32>),
    U32(Option<u32>),
    I64(Option<i64>),
    U64(Option<u64>),
    F32(Option<f32>),
    F64(Option<f64>),
    Text(Option<String>),
    Bytes(Option<Vec<u8>>),
    Timestamp(Option<OffsetDateTime>),
}

impl Value {
    /// Converts an arbitrary serializable host value into a [`Value`].
    ///
    /// Only shapes with a SQL Server mapping are accepted: primitives,
    /// strings, byte sequences, `Option`s of those (`None` becomes the
    /// untyped [`Value::Null`]) and newtypes around them. Maps, structs,
    /// sequences and other aggregates fail with
    /// [`Error::UnsupportedType`](crate::Error::UnsupportedType) before any
    /// command text is built.
    pub fn serialized(value: &impl Serialize) -> Result<Self> {
        ser::to_value(value)
    }
}

macro_rules! impl_from_copy {
    ($($ty:ty => $variant:ident,)*) => {$(
        impl From<$ty> for Value {
            #[inline]
            fn from(v: $ty) -> Self {
                Value::$variant(Some(v))
            }
        }

        impl From<Option<$ty>> for Value {
            #[inline]
            fn from(v: Option<$ty>) -> Self {
                Value::$variant(v)
            }
        }

        impl From<Option<&$ty>> for Value {
            #[inline]
            fn from(v: Option<&$ty>) -> Self {
                Value::$variant(v.copied())
            }
        }
    )*};
}

impl_from_copy!(
    bool => Bool,
    i8 => I8,
    u8 => U8,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    i64 => I64,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    OffsetDateTime => Timestamp,
);

impl From<String> for Value {
    #[inline]
    fn from(v: String) -> Self {
        Value::Text(Some(v))
    }
}

impl From<Option<String>> for Value {
    #[inline]
    fn from(v: Option<String>) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(v: &str) -> Self {
        Value::Text(Some(v.to_owned()))
    }
}

impl From<Option<&str>> for Value {
    #[inline]
    fn from(v: Option<&str>) -> Self {
        Value::Text(v.map(str::to_owned))
    }
}

impl From<Vec<u8>> for Value {
    #[inline]
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(Some(v))
    }
}

impl From<Option<Vec<u8>>> for Value {
    #[inline]
    fn from(v: Option<Vec<u8>>) -> Self {
        Value::Bytes(v)
    }
}

impl From<&[u8]> for Value {
    #[inline]
    fn from(v: &[u8]) -> Self {
        Value::Bytes(Some(v.to_vec()))
    }
}

impl From<Option<&[u8]>> for Value {
    #[inline]
    fn from(v: Option<&[u8]>) -> Self {
        Value::Bytes(v.map(<[u8]>::to_vec))
    }
}
