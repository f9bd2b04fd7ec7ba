use serde::ser::{Impossible, Serializer};

use crate::url_encoder::{Error, Result};

/// Renders a plain value into its string form.
///
/// `None` renders into `Ok(None)`, compound values are rejected.
pub(crate) struct ScalarSerializer;

type Rejected = Impossible<Option<String>, Error>;

macro_rules! impl_with_to_string {
    ($(($trait_fn:ident, $prim_ty:ty)),*) => {
        $(fn $trait_fn(self, v: $prim_ty) -> Result<Self::Ok> {
            Ok(Some(v.to_string()))
        })*
    };
}

impl Serializer for ScalarSerializer {
    type Ok = Option<String>;
    type Error = Error;

    type SerializeSeq = Rejected;
    type SerializeTuple = Rejected;
    type SerializeTupleStruct = Rejected;
    type SerializeTupleVariant = Rejected;
    type SerializeMap = Rejected;
    type SerializeStruct = Rejected;
    type SerializeStructVariant = Rejected;

    impl_with_to_string!(
        (serialize_bool, bool),
        (serialize_char, char),
        (serialize_str, &str),
        (serialize_u8, u8),
        (serialize_u16, u16),
        (serialize_u32, u32),
        (serialize_u64, u64),
        (serialize_u128, u128),
        (serialize_i8, i8),
        (serialize_i16, i16),
        (serialize_i32, i32),
        (serialize_i64, i64),
        (serialize_i128, i128),
        (serialize_f32, f32),
        (serialize_f64, f64)
    );

    fn serialize_bytes(self, _v: &[u8]) -> Result<Self::Ok> {
        Err(Error::UnsupportedOperation("bytes"))
    }

    fn serialize_none(self) -> Result<Self::Ok> {
        Ok(None)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + serde::Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Self::Ok> {
        Ok(Some(String::new()))
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok> {
        Ok(Some(String::new()))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Self::Ok> {
        Ok(Some(variant.to_owned()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + serde::Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Self::Ok>
    where
        T: ?Sized + serde::Serialize,
    {
        Err(Error::UnsupportedOperation("enum variant with data"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(Error::UnsupportedOperation("sequence as plain value"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(Error::UnsupportedOperation("tuple as plain value"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(Error::UnsupportedOperation("tuple struct as plain value"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Error::UnsupportedOperation("enum variant with data"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(Error::UnsupportedOperation("map as plain value"))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Err(Error::UnsupportedOperation("struct as plain value"))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Error::UnsupportedOperation("enum variant with data"))
    }
}

#[cfg(test)]
mod tests {
    use super::ScalarSerializer;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Id(u32);

    #[derive(Serialize)]
    enum Order {
        #[serde(rename = "asc")]
        Ascending,
    }

    #[test]
    fn plain_values() {
        assert_eq!(true.serialize(ScalarSerializer), Ok(Some("true".to_owned())));
        assert_eq!(1.5f64.serialize(ScalarSerializer), Ok(Some("1.5".to_owned())));
        assert_eq!('x'.serialize(ScalarSerializer), Ok(Some("x".to_owned())));
        assert_eq!(Id(7).serialize(ScalarSerializer), Ok(Some("7".to_owned())));
        assert_eq!(
            Order::Ascending.serialize(ScalarSerializer),
            Ok(Some("asc".to_owned()))
        );
        assert_eq!(Some(-3i64).serialize(ScalarSerializer), Ok(Some("-3".to_owned())));
        assert_eq!(None::<u8>.serialize(ScalarSerializer), Ok(None));
    }

    #[test]
    fn compound_values() {
        assert!(vec![1, 2].serialize(ScalarSerializer).is_err());
        assert!((1, 2).serialize(ScalarSerializer).is_err());
    }
}
