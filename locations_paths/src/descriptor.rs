//! Structural description of serializable values.
//!
//! [`describe`] drives value's [`Serialize`] implementation just far enough to learn
//! its shape: the kind of value, serde container name and names of struct fields.
//! Field values themselves are never serialized.

use serde::ser::{
    Serialize, SerializeMap, SerializeSeq, SerializeStruct, SerializeStructVariant,
    SerializeTuple, SerializeTupleStruct, SerializeTupleVariant, Serializer,
};

use crate::url_encoder::{Error, Result};

/// Shape of a serialized value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Plain value, unit, unit struct or unit enum variant.
    Scalar,
    /// Struct with named fields.
    Class,
    /// Sequence, tuple or tuple struct.
    Collection,
    Map,
    /// Enum variant carrying data.
    Variant,
    /// `None`.
    Absent,
}

/// Structural descriptor of a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    kind: Kind,
    name: Option<&'static str>,
    fields: Vec<&'static str>,
}

impl Descriptor {
    fn new(kind: Kind, name: Option<&'static str>) -> Self {
        Self {
            kind,
            name,
            fields: vec![],
        }
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Serde container name (for named types).
    pub fn name(&self) -> Option<&'static str> {
        self.name
    }

    /// Ordered names of serialized struct fields.
    pub fn fields(&self) -> &[&'static str] {
        &self.fields
    }

    pub fn element_name(&self, index: usize) -> Option<&'static str> {
        self.fields.get(index).copied()
    }

    pub fn is_class(&self) -> bool {
        self.kind == Kind::Class
    }
}

/// Describe the shape of `value`.
pub fn describe<T: ?Sized + Serialize>(value: &T) -> Result<Descriptor> {
    value.serialize(Describer)
}

struct Describer;

macro_rules! impl_scalar {
    ($(($trait_fn:ident, $prim_ty:ty)),*) => {
        $(fn $trait_fn(self, _v: $prim_ty) -> Result<Self::Ok> {
            Ok(Descriptor::new(Kind::Scalar, None))
        })*
    };
}

impl Serializer for Describer {
    type Ok = Descriptor;
    type Error = Error;

    type SerializeSeq = ShapeProbe;
    type SerializeTuple = ShapeProbe;
    type SerializeTupleStruct = ShapeProbe;
    type SerializeTupleVariant = ShapeProbe;
    type SerializeMap = ShapeProbe;
    type SerializeStruct = ShapeProbe;
    type SerializeStructVariant = ShapeProbe;

    impl_scalar!(
        (serialize_bool, bool),
        (serialize_char, char),
        (serialize_str, &str),
        (serialize_bytes, &[u8]),
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

    fn serialize_none(self) -> Result<Self::Ok> {
        Ok(Descriptor::new(Kind::Absent, None))
    }

    fn serialize_some<T>(self, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Self::Ok> {
        Ok(Descriptor::new(Kind::Scalar, None))
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<Self::Ok> {
        Ok(Descriptor::new(Kind::Scalar, Some(name)))
    }

    fn serialize_unit_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<Self::Ok> {
        Ok(Descriptor::new(Kind::Scalar, Some(name)))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        Ok(Descriptor::new(Kind::Variant, Some(name)))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Ok(ShapeProbe::new(Kind::Collection, None))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Ok(ShapeProbe::new(Kind::Collection, None))
    }

    fn serialize_tuple_struct(
        self,
        name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Ok(ShapeProbe::new(Kind::Collection, Some(name)))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Ok(ShapeProbe::new(Kind::Variant, Some(name)))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Ok(ShapeProbe::new(Kind::Map, None))
    }

    fn serialize_struct(self, name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Ok(ShapeProbe::new(Kind::Class, Some(name)))
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Ok(ShapeProbe::new(Kind::Variant, Some(name)))
    }
}

/// Compound state of [`Describer`]: records field names and skips values.
struct ShapeProbe(Descriptor);

impl ShapeProbe {
    fn new(kind: Kind, name: Option<&'static str>) -> Self {
        Self(Descriptor::new(kind, name))
    }
}

impl SerializeStruct for ShapeProbe {
    type Ok = Descriptor;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, _value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.0.fields.push(key);
        Ok(())
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(self.0)
    }
}

impl SerializeStructVariant for ShapeProbe {
    type Ok = Descriptor;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        SerializeStruct::serialize_field(self, key, value)
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(self.0)
    }
}

macro_rules! impl_skip_elements {
    ($($trait_ty:ident :: $trait_fn:ident),*) => {
        $(impl $trait_ty for ShapeProbe {
            type Ok = Descriptor;
            type Error = Error;

            fn $trait_fn<T>(&mut self, _value: &T) -> Result<()>
            where
                T: ?Sized + Serialize,
            {
                Ok(())
            }

            fn end(self) -> Result<Self::Ok> {
                Ok(self.0)
            }
        })*
    };
}

impl_skip_elements!(
    SerializeSeq::serialize_element,
    SerializeTuple::serialize_element,
    SerializeTupleStruct::serialize_field,
    SerializeTupleVariant::serialize_field
);

impl SerializeMap for ShapeProbe {
    type Ok = Descriptor;
    type Error = Error;

    fn serialize_key<T>(&mut self, _key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        Ok(())
    }

    fn serialize_value<T>(&mut self, _value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        Ok(())
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(self.0)
    }
}
