//! Conversion of nested values into flat lists of strings.
//!
//! When a struct field holds another struct, that has no location of its own,
//! [`UrlEncoder`](crate::UrlEncoder) first asks a [`ConversionService`] to turn it into
//! plain values, which are then written under the name of the outer field.
//! If conversion fails, the nested struct is encoded field by field instead.

use std::collections::HashMap;
use std::fmt::{Debug, Display};

use serde::ser::{Impossible, Serialize, SerializeMap, SerializeStruct, Serializer};

use crate::descriptor::{Descriptor, Kind};
use crate::scalar::ScalarSerializer;

/// Service converting values into lists of plain strings.
pub trait ConversionService {
    fn to_values<T>(
        &self,
        descriptor: &Descriptor,
        value: &T,
    ) -> Result<Vec<String>, ConversionError>
    where
        T: ?Sized + Serialize;
}

impl<C: ConversionService> ConversionService for &C {
    fn to_values<T>(
        &self,
        descriptor: &Descriptor,
        value: &T,
    ) -> Result<Vec<String>, ConversionError>
    where
        T: ?Sized + Serialize,
    {
        (**self).to_values(descriptor, value)
    }
}

/// Converts plain values only. Structs are never convertible.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultConversionService;

impl ConversionService for DefaultConversionService {
    fn to_values<T>(
        &self,
        descriptor: &Descriptor,
        value: &T,
    ) -> Result<Vec<String>, ConversionError>
    where
        T: ?Sized + Serialize,
    {
        match descriptor.kind() {
            Kind::Scalar | Kind::Absent => value
                .serialize(ScalarSerializer)
                .map(|value| value.into_iter().collect())
                .map_err(|err| ConversionError::Custom(err.to_string())),
            _ => Err(ConversionError::NotConvertible(type_label(descriptor))),
        }
    }
}

type Converter = Box<dyn Fn(&Fields) -> Result<Vec<String>, ConversionError> + Send + Sync>;

/// Conversion service with converters registered per serde container name.
///
/// A converter receives flattened plain fields of the nested struct.
/// Types without registered converter are handled by [`DefaultConversionService`].
///
/// ```
/// use locations_paths::ConversionRegistry;
///
/// let conversion = ConversionRegistry::new().with("Range", |fields| {
///     Ok(vec![format!("{}..{}", fields.require("from")?, fields.require("to")?)])
/// });
///
/// assert!(conversion.contains("Range"));
/// ```
#[derive(Default)]
pub struct ConversionRegistry {
    converters: HashMap<&'static str, Converter>,
}

impl ConversionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register converter for a type with serde container name `type_name`.
    pub fn register<F>(&mut self, type_name: &'static str, converter: F) -> &mut Self
    where
        F: Fn(&Fields) -> Result<Vec<String>, ConversionError> + Send + Sync + 'static,
    {
        self.converters.insert(type_name, Box::new(converter));
        self
    }

    pub fn with<F>(mut self, type_name: &'static str, converter: F) -> Self
    where
        F: Fn(&Fields) -> Result<Vec<String>, ConversionError> + Send + Sync + 'static,
    {
        self.register(type_name, converter);
        self
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.converters.contains_key(type_name)
    }
}

impl Debug for ConversionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.converters.keys()).finish()
    }
}

impl ConversionService for ConversionRegistry {
    fn to_values<T>(
        &self,
        descriptor: &Descriptor,
        value: &T,
    ) -> Result<Vec<String>, ConversionError>
    where
        T: ?Sized + Serialize,
    {
        let converter = descriptor
            .name()
            .and_then(|name| self.converters.get(name));

        match converter {
            Some(converter) => converter(&flatten(value)?),
            None => DefaultConversionService.to_values(descriptor, value),
        }
    }
}

fn type_label(descriptor: &Descriptor) -> String {
    descriptor.name().unwrap_or("anonymous value").to_owned()
}

/// Plain fields of a flat struct or map, in serialization order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields {
    pairs: Vec<(String, String)>,
}

impl Fields {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(id, _)| id == name)
            .map(|(_, value)| value.as_str())
    }

    /// Get field value or fail with [`ConversionError::MissingField`].
    pub fn require(&self, name: &str) -> Result<&str, ConversionError> {
        self.get(name)
            .ok_or_else(|| ConversionError::MissingField(name.to_owned()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Flatten plain fields of `value`.
///
/// `None` fields are skipped. Nested compound fields make the value not convertible.
pub fn flatten<T: ?Sized + Serialize>(value: &T) -> Result<Fields, ConversionError> {
    let mut fields = Fields::default();
    value.serialize(Flattener {
        fields: &mut fields,
    })?;

    Ok(fields)
}

struct Flattener<'f> {
    fields: &'f mut Fields,
}

impl Flattener<'_> {
    fn push<T: ?Sized + Serialize>(&mut self, name: String, value: &T) -> Result<(), ConversionError> {
        match value.serialize(ScalarSerializer) {
            Ok(Some(value)) => {
                self.fields.pairs.push((name, value));
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(_) => Err(ConversionError::NotConvertible(name)),
        }
    }
}

macro_rules! reject {
    ($(($trait_fn:ident, $prim_ty:ty)),*) => {
        $(fn $trait_fn(self, _v: $prim_ty) -> Result<Self::Ok, Self::Error> {
            Err(ConversionError::NotConvertible(stringify!($prim_ty).to_owned()))
        })*
    };
}

impl<'f> Serializer for Flattener<'f> {
    type Ok = ();
    type Error = ConversionError;

    type SerializeSeq = Impossible<(), ConversionError>;
    type SerializeTuple = Impossible<(), ConversionError>;
    type SerializeTupleStruct = Impossible<(), ConversionError>;
    type SerializeTupleVariant = Impossible<(), ConversionError>;
    type SerializeMap = FlatFields<'f>;
    type SerializeStruct = FlatFields<'f>;
    type SerializeStructVariant = Impossible<(), ConversionError>;

    reject!(
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

    fn serialize_none(self) -> Result<Self::Ok, Self::Error> {
        Ok(())
    }

    fn serialize_some<T>(self, value: &T) -> Result<Self::Ok, Self::Error>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Self::Ok, Self::Error> {
        Ok(())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok, Self::Error> {
        Ok(())
    }

    fn serialize_unit_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<Self::Ok, Self::Error> {
        Err(ConversionError::NotConvertible(name.to_owned()))
    }

    fn serialize_newtype_struct<T>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Self::Ok, Self::Error>
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
    ) -> Result<Self::Ok, Self::Error>
    where
        T: ?Sized + Serialize,
    {
        Err(ConversionError::NotConvertible(name.to_owned()))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, Self::Error> {
        Err(ConversionError::NotConvertible("sequence".to_owned()))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, Self::Error> {
        Err(ConversionError::NotConvertible("tuple".to_owned()))
    }

    fn serialize_tuple_struct(
        self,
        name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, Self::Error> {
        Err(ConversionError::NotConvertible(name.to_owned()))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, Self::Error> {
        Err(ConversionError::NotConvertible(name.to_owned()))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, Self::Error> {
        Ok(FlatFields {
            flattener: self,
            key: None,
        })
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, Self::Error> {
        Ok(FlatFields {
            flattener: self,
            key: None,
        })
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, Self::Error> {
        Err(ConversionError::NotConvertible(name.to_owned()))
    }
}

struct FlatFields<'f> {
    flattener: Flattener<'f>,
    key: Option<String>,
}

impl SerializeStruct for FlatFields<'_> {
    type Ok = ();
    type Error = ConversionError;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<(), Self::Error>
    where
        T: ?Sized + Serialize,
    {
        self.flattener.push(key.to_owned(), value)
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        Ok(())
    }
}

impl SerializeMap for FlatFields<'_> {
    type Ok = ();
    type Error = ConversionError;

    fn serialize_key<T>(&mut self, key: &T) -> Result<(), Self::Error>
    where
        T: ?Sized + Serialize,
    {
        match key.serialize(ScalarSerializer) {
            Ok(Some(key)) => {
                self.key = Some(key);
                Ok(())
            }
            _ => Err(ConversionError::NotConvertible("map key".to_owned())),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<(), Self::Error>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .key
            .take()
            .ok_or_else(|| ConversionError::Custom("map value without a key".to_owned()))?;

        self.flattener.push(key, value)
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        Ok(())
    }
}

/// Type of errors, returned by [`ConversionService`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionError {
    /// Service doesn't know how to convert the value.
    NotConvertible(String),
    /// Converter required a field, that wasn't present.
    MissingField(String),
    /// Custom error variant in accordance with serde guidelines.
    Custom(String),
}

impl serde::ser::Error for ConversionError {
    fn custom<T>(msg: T) -> Self
    where
        T: Display,
    {
        Self::Custom(msg.to_string())
    }
}

impl std::error::Error for ConversionError {}

impl Display for ConversionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotConvertible(what) => write!(f, "can't convert `{what}` into plain values"),
            Self::MissingField(name) => write!(f, "missing field: {name}"),
            Self::Custom(msg) => write!(f, "{msg}"),
        }
    }
}
