//! Location template parser and serializer of typed locations into URLs, used by `locations` crate

pub mod conversion;
pub mod descriptor;
pub mod location;
pub mod location_pattern;
mod scalar;
pub mod url_encoder;

pub use http;

pub use conversion::{
    ConversionError, ConversionRegistry, ConversionService, DefaultConversionService, Fields,
};
pub use descriptor::{describe, Descriptor, Kind};
pub use location::{Location, LocationLookup};
pub use location_pattern::{FormatError, LocationPattern, Segment};
pub use url_encoder::{Error, Result, UrlEncoder};

use http::Url;

/// Serialize typed location into [`Url`].
///
/// Only the location of `T` itself is known to the encoder, nested values are encoded
/// with [`DefaultConversionService`].
///
/// ## Returns
///
/// [`Url`] with percent encoded path and query parameters, relative to default host
pub fn encode<T: Location>(value: &T) -> Result<Url> {
    let lookup = [(T::NAME, T::PATH)];
    let mut encoder = UrlEncoder::new(&lookup[..], &DefaultConversionService);
    encoder.encode_location(value)?;
    encoder.build()
}

/// Serialize `value` into [`Url`], resolving location templates with `lookup` and converting
/// nested values with `conversion`.
pub fn encode_with<L, C, T>(lookup: &L, conversion: &C, value: &T) -> Result<Url>
where
    L: LocationLookup + ?Sized,
    C: ConversionService,
    T: serde::Serialize + ?Sized,
{
    let mut encoder = UrlEncoder::new(lookup, conversion);
    encoder.encode(value)?;
    encoder.build()
}
