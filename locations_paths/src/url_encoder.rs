use http::{ParametersBuilder, Url, UrlBuilder};
use serde::ser::{
    Impossible, Serialize, SerializeMap, SerializeSeq, SerializeStruct, SerializeTuple,
    SerializeTupleStruct, Serializer,
};
use tracing::{debug, trace};

use crate::conversion::ConversionService;
use crate::descriptor::{describe, Kind};
use crate::location::{Location, LocationLookup};
use crate::location_pattern::{self, FormatError, LocationPattern};
use crate::scalar::ScalarSerializer;

/// Result type for this [`UrlEncoder`] functionality.
pub type Result<T> = std::result::Result<T, Error>;

/// Serializer of typed locations into [`Url`].
///
/// Fields of serialized structs are written either into the path (when location template
/// has a capture with the same name) or into the query string (otherwise).
///
/// # Encoding rules
///
/// * Location template is taken from the first visited struct, that has one.
///   Nested structs with locations of their own don't replace it.
/// * Plain values are rendered with their [`Display`](std::fmt::Display) form,
///   unit values as empty strings and unit enum variants as variant names.
/// * Elements of sequences are written under the name of the containing field,
///   so `tags: vec!["a", "b"]` becomes `?tags=a&tags=b`.
/// * Entries of a root map (structs with flattened fields) are written under their keys,
///   entries of nested maps inherit the name of the containing field.
/// * `None` fields are omitted. `None` anywhere else can't be represented.
/// * Nested structs without location of their own are first offered to
///   [`ConversionService`]. Converted values are written under the name of the outer field.
///   Otherwise their fields are written as if they were fields of the outer struct.
/// * Path parameters keep the last written value, query parameters keep all of them.
///
/// One encoder serializes exactly one value.
pub struct UrlEncoder<'c, L: ?Sized, C> {
    lookup: &'c L,
    conversion: &'c C,
    pattern: Option<LocationPattern<'c>>,
    path_parameters: ParametersBuilder,
    query_parameters: ParametersBuilder,
}

impl<'c, L, C> UrlEncoder<'c, L, C>
where
    L: LocationLookup + ?Sized,
    C: ConversionService,
{
    pub fn new(lookup: &'c L, conversion: &'c C) -> Self {
        Self {
            lookup,
            conversion,
            pattern: None,
            path_parameters: ParametersBuilder::new(),
            query_parameters: ParametersBuilder::new(),
        }
    }

    /// Serialize `value` into this encoder.
    pub fn encode<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.encode_element(None, false, value)
    }

    /// Serialize location `value`, resolving the pattern from its type up front.
    ///
    /// Template of `T` is looked up by [`Location::NAME`] first and falls back to
    /// [`Location::PATH`]. Required for types, that serde writes as maps
    /// (structs with `#[serde(flatten)]` fields).
    pub fn encode_location<T: Location>(&mut self, value: &T) -> Result<()> {
        if self.pattern.is_none() {
            let lookup: &'c L = self.lookup;
            let template = lookup.location(T::NAME).unwrap_or(T::PATH);

            self.resolve(T::NAME, template)?;
        }

        self.encode(value)
    }

    /// Location pattern, resolved so far.
    pub fn pattern(&self) -> Option<&LocationPattern<'c>> {
        self.pattern.as_ref()
    }

    pub fn path_parameters(&self) -> &ParametersBuilder {
        &self.path_parameters
    }

    pub fn query_parameters(&self) -> &ParametersBuilder {
        &self.query_parameters
    }

    /// Render encoded path and query into [`Url`].
    ///
    /// Scheme, host and port are left default.
    pub fn build(self) -> Result<Url> {
        let pattern = self.pattern.as_ref().ok_or(Error::MissingPattern)?;
        let encoded_path = pattern.format(&self.path_parameters.build())?;

        debug!(
            template = pattern.template(),
            path = %encoded_path,
            "built location url"
        );

        let mut builder = UrlBuilder::new();
        builder.encoded_path = encoded_path;
        builder.parameters = self.query_parameters;

        Ok(builder.build())
    }

    fn begin_structure(&mut self, name: &'static str) -> Result<()> {
        if self.pattern.is_some() {
            return Ok(());
        }

        let lookup: &'c L = self.lookup;

        match lookup.location(name) {
            Some(template) => self.resolve(name, template),
            None => Ok(()),
        }
    }

    fn resolve(&mut self, name: &str, template: &'c str) -> Result<()> {
        let pattern = LocationPattern::new(template)?;
        debug!(location = name, template, "resolved location pattern");
        self.pattern = Some(pattern);

        Ok(())
    }

    fn write(&mut self, name: Option<&str>, value: String) -> Result<()> {
        let pattern = self.pattern.as_ref().ok_or(Error::MissingPattern)?;
        let name = name.ok_or(Error::MissingElementName)?;

        if pattern.contains(name) {
            trace!(name, value = %value, "path parameter");
            self.path_parameters.set(name, value);
        } else {
            trace!(name, value = %value, "query parameter");
            self.query_parameters.append(name, value);
        }

        Ok(())
    }

    fn encode_element<T>(&mut self, name: Option<&str>, nullable: bool, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        if let Some(name) = name {
            if let Some(values) = self.convert_nested(value)? {
                for value in values {
                    self.write(Some(name), value)?;
                }

                return Ok(());
            }
        }

        value.serialize(ElementEncoder {
            encoder: self,
            name,
            nullable,
        })
    }

    /// Try converting nested struct without location into plain values.
    fn convert_nested<T>(&self, value: &T) -> Result<Option<Vec<String>>>
    where
        T: ?Sized + Serialize,
    {
        let descriptor = describe(value)?;

        let type_name = match descriptor.name() {
            Some(name) if descriptor.kind() == Kind::Class => name,
            _ => return Ok(None),
        };

        if self.lookup.location(type_name).is_some() {
            return Ok(None);
        }

        match self.conversion.to_values(&descriptor, value) {
            Ok(values) => {
                trace!(type_name, count = values.len(), "converted nested value");
                Ok(Some(values))
            }
            Err(err) => {
                trace!(type_name, %err, "nested value is not convertible, encoding fields");
                Ok(None)
            }
        }
    }
}

/// Serializer of a single element, carrying its name.
struct ElementEncoder<'e, 'n, 'c, L: ?Sized, C> {
    encoder: &'e mut UrlEncoder<'c, L, C>,
    name: Option<&'n str>,
    nullable: bool,
}

impl<'e, 'n, 'c, L, C> ElementEncoder<'e, 'n, 'c, L, C>
where
    L: LocationLookup + ?Sized,
    C: ConversionService,
{
    fn write(self, value: String) -> Result<()> {
        self.encoder.write(self.name, value)
    }

    fn compound(self) -> Compound<'e, 'n, 'c, L, C> {
        Compound {
            encoder: self.encoder,
            name: self.name,
            key: None,
        }
    }
}

macro_rules! impl_with_to_string {
    ($(($trait_fn:ident, $prim_ty:ty)),*) => {
        $(fn $trait_fn(self, v: $prim_ty) -> Result<()> {
            self.write(v.to_string())
        })*
    };
}

impl<'e, 'n, 'c, L, C> Serializer for ElementEncoder<'e, 'n, 'c, L, C>
where
    L: LocationLookup + ?Sized,
    C: ConversionService,
{
    type Ok = ();
    type Error = Error;

    type SerializeSeq = Compound<'e, 'n, 'c, L, C>;
    type SerializeTuple = Compound<'e, 'n, 'c, L, C>;
    type SerializeTupleStruct = Compound<'e, 'n, 'c, L, C>;
    type SerializeMap = Compound<'e, 'n, 'c, L, C>;
    type SerializeStruct = Compound<'e, 'n, 'c, L, C>;
    type SerializeTupleVariant = Impossible<(), Error>;
    type SerializeStructVariant = Impossible<(), Error>;

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

    fn serialize_bytes(self, _v: &[u8]) -> Result<()> {
        Err(Error::UnsupportedOperation("bytes"))
    }

    fn serialize_none(self) -> Result<()> {
        if self.nullable {
            Ok(())
        } else {
            Err(Error::UnsupportedOperation("null"))
        }
    }

    fn serialize_some<T>(self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<()> {
        self.write(String::new())
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<()> {
        // unnamed unit struct is a location without fields
        if self.name.is_none() {
            return self.encoder.begin_structure(name);
        }

        self.write(String::new())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<()> {
        self.write(variant.to_owned())
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        Err(Error::UnsupportedOperation("enum variant with data"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Ok(self.compound())
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Ok(self.compound())
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Ok(self.compound())
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
        Ok(self.compound())
    }

    fn serialize_struct(self, name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        self.encoder.begin_structure(name)?;
        Ok(self.compound())
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

/// Compound state of [`ElementEncoder`].
///
/// Struct fields and root map entries are named by themselves,
/// elements of sequences and nested maps inherit the name of container.
struct Compound<'e, 'n, 'c, L: ?Sized, C> {
    encoder: &'e mut UrlEncoder<'c, L, C>,
    name: Option<&'n str>,
    key: Option<String>,
}

impl<L, C> SerializeStruct for Compound<'_, '_, '_, L, C>
where
    L: LocationLookup + ?Sized,
    C: ConversionService,
{
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.encoder.encode_element(Some(key), true, value)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl<L, C> SerializeMap for Compound<'_, '_, '_, L, C>
where
    L: LocationLookup + ?Sized,
    C: ConversionService,
{
    type Ok = ();
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        if self.name.is_some() {
            return Ok(());
        }

        let key = key
            .serialize(ScalarSerializer)
            .ok()
            .flatten()
            .ok_or(Error::UnsupportedOperation("map key, that isn't a plain value"))?;

        self.key = Some(key);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        if let Some(name) = self.name {
            return self.encoder.encode_element(Some(name), true, value);
        }

        let key = self
            .key
            .take()
            .ok_or_else(|| Error::Custom("map value serialized before its key".to_owned()))?;

        self.encoder.encode_element(Some(&key), true, value)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

macro_rules! impl_inherit_name {
    ($($trait_ty:ident :: $trait_fn:ident),*) => {
        $(impl<L, C> $trait_ty for Compound<'_, '_, '_, L, C>
        where
            L: LocationLookup + ?Sized,
            C: ConversionService,
        {
            type Ok = ();
            type Error = Error;

            fn $trait_fn<T>(&mut self, value: &T) -> Result<()>
            where
                T: ?Sized + Serialize,
            {
                self.encoder.encode_element(self.name, false, value)
            }

            fn end(self) -> Result<()> {
                Ok(())
            }
        })*
    };
}

impl_inherit_name!(
    SerializeSeq::serialize_element,
    SerializeTuple::serialize_element,
    SerializeTupleStruct::serialize_field
);

/// Type of errors, returned by [`UrlEncoder`]
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// No visited struct had a location template.
    MissingPattern,
    /// A plain value was serialized outside of any named field.
    MissingElementName,
    /// Location template had a capture, that no field was written into.
    MissingPathParameter(String),
    /// Location template was malformed.
    Pattern(location_pattern::Error),
    /// Value can't be represented in URL (`None` outside of a field, bytes,
    /// enum variants with data).
    UnsupportedOperation(&'static str),
    /// Custom error variant in accordance with serde guidelines.
    Custom(String),
}

impl From<location_pattern::Error> for Error {
    fn from(value: location_pattern::Error) -> Self {
        Self::Pattern(value)
    }
}

impl From<FormatError> for Error {
    fn from(value: FormatError) -> Self {
        match value {
            FormatError::MissingPathParameter(name) => Self::MissingPathParameter(name),
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T>(msg: T) -> Self
    where
        T: std::fmt::Display,
    {
        Self::Custom(msg.to_string())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Pattern(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingPattern => write!(f, "no location template found"),
            Self::MissingElementName => {
                write!(f, "plain values can only be encoded as named fields")
            }
            Self::MissingPathParameter(name) => write!(f, "missing path parameter: {name}"),
            Self::Pattern(err) => write!(f, "invalid location template: {err}"),
            Self::UnsupportedOperation(what) => {
                write!(f, "encoding {what} to URL is not supported")
            }
            Self::Custom(msg) => write!(f, "{msg}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap};

    use super::{Error, UrlEncoder};
    use crate::location::Location;
    use crate::conversion::{ConversionRegistry, DefaultConversionService};
    use serde::Serialize;

    fn locations() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("User", "/users/{id}"),
            ("Post", "/users/{user_id}/posts/{id}"),
            ("Files", "/files/{*path}"),
            ("Other", "/other/{id}"),
        ])
    }

    macro_rules! encode {
        ($val:expr) => {
            encode!($val, &DefaultConversionService)
        };
        ($val:expr, $conversion:expr) => {{
            let lookup = locations();
            let mut encoder = UrlEncoder::new(&lookup, $conversion);

            encoder.encode($val).and_then(|_| encoder.build())
        }};
    }

    #[derive(Serialize)]
    struct User {
        id: u32,
        name: &'static str,
        tags: Vec<&'static str>,
        #[serde(skip_serializing_if = "Option::is_none")]
        page: Option<u32>,
    }

    #[derive(Serialize)]
    struct Post {
        user_id: &'static str,
        id: u64,
        draft: bool,
    }

    #[derive(Serialize)]
    struct Files {
        path: String,
    }

    #[derive(Serialize)]
    struct Range {
        from: u32,
        to: u32,
    }

    #[derive(Serialize)]
    struct Search {
        id: u32,
        q: Option<String>,
        range: Range,
    }

    #[derive(Serialize)]
    struct Unknown {
        a: u32,
    }

    #[derive(Serialize)]
    #[serde(rename = "User")]
    struct Tuple(u32, u32);

    #[derive(Serialize)]
    #[serde(rename = "User")]
    struct WithOther {
        id: u32,
        other: Other,
    }

    #[derive(Serialize)]
    struct Other {
        id: u32,
        extra: u32,
    }

    #[derive(Serialize)]
    #[serde(rename = "User")]
    struct Sorted {
        id: u32,
        order: Order,
        unit: (),
    }

    #[derive(Serialize)]
    #[serde(rename_all = "lowercase")]
    enum Order {
        Ascending,
        Page(u32),
    }

    #[derive(Serialize)]
    #[serde(rename = "User")]
    struct Paged {
        id: u32,
        order: Order,
    }

    #[derive(Serialize)]
    #[serde(rename = "User")]
    struct Nullable {
        id: u32,
        values: Vec<Option<u32>>,
    }

    #[test]
    fn path_and_query() {
        let user = User {
            id: 42,
            name: "John Doe",
            tags: vec!["a", "b&c"],
            page: None,
        };
        let url = encode!(&user).unwrap();

        assert_eq!(url.encoded_path(), "/users/42");
        assert_eq!(
            url.parameters().pairs().collect::<Vec<_>>(),
            [("name", "John Doe"), ("tags", "a"), ("tags", "b&c")]
        );
        assert_eq!(url.full_path(), "/users/42?name=John+Doe&tags=a&tags=b%26c");
    }

    #[test]
    fn only_path() {
        let post = Post {
            user_id: "john/doe",
            id: 7,
            draft: false,
        };
        let url = encode!(&post).unwrap();

        assert_eq!(url.encoded_path(), "/users/john%2Fdoe/posts/7");
        assert_eq!(url.full_path(), "/users/john%2Fdoe/posts/7?draft=false");
    }

    #[test]
    fn wildcard() {
        let files = Files {
            path: "css/site main.css".to_owned(),
        };

        assert_eq!(
            encode!(&files).unwrap().encoded_path(),
            "/files/css/site%20main.css"
        );
    }

    #[test]
    fn missing_pattern() {
        assert_eq!(encode!(&Unknown { a: 1 }), Err(Error::MissingPattern));
        assert_eq!(encode!(&5), Err(Error::MissingPattern));
    }

    #[test]
    fn missing_path_parameter() {
        #[derive(Serialize)]
        #[serde(rename = "Post")]
        struct Partial {
            id: u32,
        }

        assert_eq!(
            encode!(&Partial { id: 1 }),
            Err(Error::MissingPathParameter("user_id".to_owned()))
        );
    }

    #[test]
    fn nested_without_location_is_flattened_by_fields() {
        let search = Search {
            id: 1,
            q: None,
            range: Range { from: 2, to: 3 },
        };

        let lookup = HashMap::from([("Search", "/search/{id}")]);
        let mut encoder = UrlEncoder::new(&lookup, &DefaultConversionService);
        encoder.encode(&search).unwrap();
        let url = encoder.build().unwrap();

        assert_eq!(url.full_path(), "/search/1?from=2&to=3");
    }

    #[test]
    fn nested_without_location_is_converted() {
        let search = Search {
            id: 1,
            q: Some("rust".to_owned()),
            range: Range { from: 2, to: 3 },
        };
        let conversion = ConversionRegistry::new().with("Range", |fields| {
            Ok(vec![
                fields.require("from")?.to_owned(),
                fields.require("to")?.to_owned(),
            ])
        });

        let lookup = HashMap::from([("Search", "/search/{id}")]);
        let mut encoder = UrlEncoder::new(&lookup, &conversion);
        encoder.encode(&search).unwrap();
        let url = encoder.build().unwrap();

        assert_eq!(
            url.parameters().pairs().collect::<Vec<_>>(),
            [("q", "rust"), ("range", "2"), ("range", "3")]
        );
    }

    #[test]
    fn nested_location_keeps_root_pattern() {
        let value = WithOther {
            id: 1,
            other: Other { id: 2, extra: 3 },
        };
        let url = encode!(&value).unwrap();

        // nested `id` overwrites path parameter of the same name
        assert_eq!(url.encoded_path(), "/users/2");
        assert_eq!(url.full_path(), "/users/2?extra=3");
    }

    #[test]
    fn nested_location_supplies_pattern() {
        #[derive(Serialize)]
        struct Wrapper {
            user: Other,
        }

        let url = encode!(&Wrapper {
            user: Other { id: 5, extra: 6 }
        })
        .unwrap();

        assert_eq!(url.full_path(), "/other/5?extra=6");
    }

    #[test]
    fn enums_and_units() {
        let value = Sorted {
            id: 1,
            order: Order::Ascending,
            unit: (),
        };

        assert_eq!(
            encode!(&value).unwrap().full_path(),
            "/users/1?order=ascending&unit="
        );
        assert_eq!(
            encode!(&Paged {
                id: 1,
                order: Order::Page(2)
            }),
            Err(Error::UnsupportedOperation("enum variant with data"))
        );
    }

    #[test]
    fn null_outside_of_field() {
        let value = Nullable {
            id: 1,
            values: vec![Some(1), None],
        };

        assert_eq!(
            encode!(&value),
            Err(Error::UnsupportedOperation("null"))
        );
    }

    #[test]
    fn tuple_struct_has_no_names() {
        assert_eq!(encode!(&Tuple(1, 2)), Err(Error::MissingPattern));
    }

    #[test]
    fn unit_struct_root() {
        #[derive(Serialize)]
        struct Index;

        let lookup = HashMap::from([("Index", "/")]);
        let mut encoder = UrlEncoder::new(&lookup, &DefaultConversionService);
        encoder.encode(&Index).unwrap();

        assert_eq!(encoder.build().unwrap().full_path(), "/");
        assert_eq!(encode!(&Index), Err(Error::MissingPattern));
    }

    #[test]
    fn nested_map_entries_inherit_field_name() {
        #[derive(Serialize)]
        #[serde(rename = "User")]
        struct Extra {
            id: u32,
            extra: BTreeMap<&'static str, Option<u32>>,
        }

        let value = Extra {
            id: 3,
            extra: BTreeMap::from([("a", Some(1)), ("id", Some(9)), ("z", None)]),
        };

        assert_eq!(
            encode!(&value).unwrap().full_path(),
            "/users/3?extra=1&extra=9"
        );
    }

    #[derive(Serialize)]
    struct Paging {
        page: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        per_page: Option<u32>,
    }

    #[derive(Serialize)]
    struct Listing {
        id: u32,
        #[serde(flatten)]
        paging: Paging,
    }

    impl Location for Listing {
        const NAME: &'static str = "Listing";
        const PATH: &'static str = "/lists/{id}";
    }

    #[test]
    fn flattened_location_entries_are_named_by_keys() {
        let listing = Listing {
            id: 1,
            paging: Paging {
                page: 2,
                per_page: Some(20),
            },
        };
        let lookup: HashMap<&str, &str> = HashMap::new();

        let mut encoder = UrlEncoder::new(&lookup, &DefaultConversionService);
        encoder.encode_location(&listing).unwrap();

        assert_eq!(
            encoder.build().unwrap().full_path(),
            "/lists/1?page=2&per_page=20"
        );

        // without its type, a flattened struct is just a map
        assert_eq!(encode!(&listing), Err(Error::MissingPattern));
    }

    #[test]
    fn looked_up_template_wins_over_type_path() {
        let lookup = HashMap::from([("Listing", "/archive/{id}")]);
        let mut encoder = UrlEncoder::new(&lookup, &DefaultConversionService);

        encoder
            .encode_location(&Listing {
                id: 4,
                paging: Paging {
                    page: 1,
                    per_page: None,
                },
            })
            .unwrap();

        assert_eq!(encoder.build().unwrap().full_path(), "/archive/4?page=1");
    }

    #[test]
    fn path_overwrites_query_appends() {
        #[derive(Serialize)]
        #[serde(rename = "User")]
        struct Repeated {
            id: Vec<u32>,
            q: Vec<u32>,
        }

        let value = Repeated {
            id: vec![1, 2],
            q: vec![1, 2],
        };

        assert_eq!(encode!(&value).unwrap().full_path(), "/users/2?q=1&q=2");
    }

    #[test]
    fn pattern_is_exposed() {
        let lookup = locations();
        let mut encoder = UrlEncoder::new(&lookup, &DefaultConversionService);

        assert!(encoder.pattern().is_none());

        encoder.encode(&Post { user_id: "a", id: 1, draft: true }).unwrap();

        assert_eq!(
            encoder.pattern().map(|pattern| pattern.template()),
            Some("/users/{user_id}/posts/{id}")
        );
        assert_eq!(encoder.path_parameters().get("id"), Some("1"));
        assert_eq!(encoder.query_parameters().get("draft"), Some("true"));
    }
}
