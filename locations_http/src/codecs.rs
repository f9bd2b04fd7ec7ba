use std::borrow::Cow;
use std::fmt::Display;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::parameters::{Parameters, ParametersBuilder};

/// Characters, that are left unescaped inside a single path segment:
/// unreserved characters, sub-delims, `:` and `@`.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b';')
    .remove(b'=')
    .remove(b':')
    .remove(b'@');

/// Percent-encode a value to be placed into a single path segment.
///
/// `/` is always escaped.
pub fn encode_url_path_part(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

/// Percent-encode a path, keeping `/` separators as is.
pub fn encode_url_path(path: &str) -> String {
    path.split('/')
        .map(encode_url_path_part)
        .collect::<Vec<_>>()
        .join("/")
}

/// Encode a query name or value the way `application/x-www-form-urlencoded` does
/// (spaces become `+`).
pub fn encode_url_query_component(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Percent-decode a path or fragment component.
pub fn decode_url_component(value: &str) -> Result<String, DecodeError> {
    percent_decode_str(value)
        .decode_utf8()
        .map(Cow::into_owned)
        .map_err(|_| DecodeError::InvalidUtf8(value.to_owned()))
}

/// Percent-decode a query component, treating `+` as space.
pub fn decode_url_query_component(value: &str) -> Result<String, DecodeError> {
    let value = value.replace('+', " ");
    decode_url_component(&value)
}

/// Parse `key=value&key2=value2` query string into ordered [`Parameters`].
///
/// Repeated keys accumulate values. Keys without `=` get an empty value.
pub fn parse_query_string(query: &str) -> Parameters {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut builder = ParametersBuilder::new();

    for (name, value) in form_urlencoded::parse(query.as_bytes()) {
        builder.append(name, value);
    }

    builder.build()
}

/// Serialize parameters as `key=value&key2=value2`.
///
/// A name without values is written alone, without `=`.
pub fn form_url_encode(parameters: &Parameters) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());

    for (name, values) in parameters.entries() {
        if values.is_empty() {
            serializer.append_key_only(name);
        }

        for value in values {
            serializer.append_pair(name, value);
        }
    }

    serializer.finish()
}

/// An error type for url decoding.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// Decoded bytes weren't valid UTF-8.
    InvalidUtf8(String),
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidUtf8(value) => {
                write!(f, "percent-decoded `{value}` is not valid UTF-8")
            }
        }
    }
}

impl std::error::Error for DecodeError {}
