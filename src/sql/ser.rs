use std::fmt;

use serde::{
    Serialize,
    ser::{self, Impossible, Serializer},
};

use crate::{error, value::Value};

// === BridgeError ===

#[derive(Debug, thiserror::Error)]
enum BridgeError {
    #[error("{0} has no SQL Server mapping")]
    Unsupported(&'static str),
    #[error("{0}")]
    Custom(String),
}

impl ser::Error for BridgeError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Self::Custom(msg.to_string())
    }
}

impl From<BridgeError> for error::Error {
    fn from(err: BridgeError) -> Self {
        match err {
            BridgeError::Unsupported(what) => error::Error::UnsupportedType(what.to_owned()),
            BridgeError::Custom(msg) => error::Error::Encoding(msg.into()),
        }
    }
}

// === ValueSerializer ===

type Result<T = Value, E = BridgeError> = std::result::Result<T, E>;
type Unsupported = Impossible<Value, BridgeError>;

struct ValueSerializer;

macro_rules! unsupported {
    ($ser_method:ident($ty:ty) -> $ret:ty, $($other:tt)*) => {
        #[inline]
        fn $ser_method(self, _v: $ty) -> $ret {
            Err(BridgeError::Unsupported(stringify!($ser_method)))
        }
        unsupported!($($other)*);
    };
    ($ser_method:ident($ty:ty), $($other:tt)*) => {
        unsupported!($ser_method($ty) -> Result, $($other)*);
    };
    () => {};
}

macro_rules! to_variant {
    ($($ser_method:ident($ty:ty) -> $variant:ident,)*) => {$(
        #[inline]
        fn $ser_method(self, v: $ty) -> Result {
            Ok(Value::$variant(Some(v)))
        }
    )*};
}

impl Serializer for ValueSerializer {
    type Error = BridgeError;
    type Ok = Value;
    type SerializeMap = Unsupported;
    type SerializeSeq = Unsupported;
    type SerializeStruct = Unsupported;
    type SerializeStructVariant = Unsupported;
    type SerializeTuple = Unsupported;
    type SerializeTupleStruct = Unsupported;
    type SerializeTupleVariant = Unsupported;

    unsupported!(
        serialize_i128(i128),
        serialize_u128(u128),
    );

    to_variant!(
        serialize_bool(bool) -> Bool,
        serialize_i8(i8) -> I8,
        serialize_i16(i16) -> I16,
        serialize_i32(i32) -> I32,
        serialize_i64(i64) -> I64,
        serialize_u8(u8) -> U8,
        serialize_u16(u16) -> U16,
        serialize_u32(u32) -> U32,
        serialize_u64(u64) -> U64,
        serialize_f32(f32) -> F32,
        serialize_f64(f64) -> F64,
    );

    #[inline]
    fn serialize_char(self, value: char) -> Result {
        Ok(Value::Text(Some(value.to_string())))
    }

    #[inline]
    fn serialize_str(self, value: &str) -> Result {
        Ok(Value::Text(Some(value.to_owned())))
    }

    #[inline]
    fn serialize_bytes(self, value: &[u8]) -> Result {
        Ok(Value::Bytes(Some(value.to_vec())))
    }

    #[inline]
    fn serialize_none(self) -> Result {
        Ok(Value::Null)
    }

    #[inline]
    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result {
        value.serialize(self)
    }

    #[inline]
    fn serialize_unit(self) -> Result {
        Ok(Value::Null)
    }

    #[inline]
    fn serialize_unit_struct(self, name: &'static str) -> Result {
        Err(BridgeError::Unsupported(name))
    }

    #[inline]
    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result {
        Ok(Value::Text(Some(variant.to_owned())))
    }

    #[inline]
    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result {
        value.serialize(self)
    }

    #[inline]
    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result {
        Err(BridgeError::Unsupported(name))
    }

    #[inline]
    fn serialize_seq(self, _len: Option<usize>) -> Result<Unsupported> {
        Err(BridgeError::Unsupported("sequence"))
    }

    #[inline]
    fn serialize_tuple(self, _len: usize) -> Result<Unsupported> {
        Err(BridgeError::Unsupported("tuple"))
    }

    #[inline]
    fn serialize_tuple_struct(self, name: &'static str, _len: usize) -> Result<Unsupported> {
        Err(BridgeError::Unsupported(name))
    }

    #[inline]
    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Unsupported> {
        Err(BridgeError::Unsupported(name))
    }

    #[inline]
    fn serialize_map(self, _len: Option<usize>) -> Result<Unsupported> {
        Err(BridgeError::Unsupported("map"))
    }

    #[inline]
    fn serialize_struct(self, name: &'static str, _len: usize) -> Result<Unsupported> {
        Err(BridgeError::Unsupported(name))
    }

    #[inline]
    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Unsupported> {
        Err(BridgeError::Unsupported(name))
    }

    #[inline]
    fn is_human_readable(&self) -> bool {
        true
    }
}

// === Public API ===

pub(crate) fn to_value(value: &impl Serialize) -> error::Result<Value> {
    value.serialize(ValueSerializer).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn check(v: impl Serialize) -> Value {
        to_value(&v).unwrap()
    }

    #[test]
    fn it_maps_primitives_with_exact_width() {
        assert_eq!(check(7i8), Value::I8(Some(7)));
        assert_eq!(check(7u16), Value::U16(Some(7)));
        assert_eq!(check(9_000_000_000i64), Value::I64(Some(9_000_000_000)));
        assert_eq!(check(42.5f64), Value::F64(Some(42.5)));
        assert_eq!(check(true), Value::Bool(Some(true)));
    }

    #[test]
    fn it_maps_text_and_options() {
        assert_eq!(check("ab"), Value::Text(Some("ab".into())));
        assert_eq!(check('x'), Value::Text(Some("x".into())));
        assert_eq!(check(Some(42i32)), Value::I32(Some(42)));
        assert_eq!(check(None::<i32>), Value::Null);
        assert_eq!(check(()), Value::Null);
    }

    #[test]
    fn it_unwraps_newtypes() {
        #[derive(Serialize)]
        struct UserId(u32);

        assert_eq!(check(UserId(3)), Value::U32(Some(3)));
    }

    #[test]
    fn it_rejects_aggregates() {
        #[derive(Serialize)]
        struct Point {
            x: i32,
            y: i32,
        }

        let err = to_value(&Point { x: 1, y: 2 }).unwrap_err();
        assert!(matches!(err, Error::UnsupportedType(name) if name == "Point"));

        let map = std::collections::HashMap::<u32, u32>::new();
        assert!(matches!(
            to_value(&map),
            Err(Error::UnsupportedType(name)) if name == "map"
        ));
        assert!(matches!(
            to_value(&vec![1, 2, 3]),
            Err(Error::UnsupportedType(name)) if name == "sequence"
        ));
        assert!(matches!(
            to_value(&42i128),
            Err(Error::UnsupportedType(name)) if name == "serialize_i128"
        ));
    }
}
