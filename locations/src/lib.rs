//! # `locations`: typed URL locations
//!
//! Describe resources of your HTTP service as plain serializable structs and render them
//! into URLs without formatting strings by hand.
//!
//! ## How does it work
//!
//! Every location type carries a template, like `/users/{id}/posts`. When a value is
//! serialized, each field, whose name matches a capture of the template, is substituted
//! into the path, and every other field goes into the query string.
//!
//! ```ignore
//! use locations::{href, Location, serde::Serialize};
//!
//! #[derive(Serialize, Location)]
//! #[serde(crate = "locations::serde")]
//! #[location("/users/{id}/posts")]
//! struct UserPosts {
//!     id: u32,
//!     tags: Vec<String>,
//!     page: Option<u32>,
//! }
//!
//! let url = href(&UserPosts { id: 7, tags: vec!["rust".into()], page: None })?;
//! assert_eq!(url.full_path(), "/users/7/posts?tags=rust");
//! ```
//!
//! Nested structs, that have locations of their own, are looked up through
//! [`Locations`] registry, which also holds base URL and [`ConversionService`]
//! for nested values.

use std::collections::HashMap;

#[cfg(feature = "derive")]
pub use locations_macros::Location;

pub use paths;
pub use paths::http;
pub use serde;

pub use paths::http::{Parameters, ParametersBuilder, Url, UrlBuilder, UrlProtocol};
pub use paths::{
    ConversionError, ConversionRegistry, ConversionService, DefaultConversionService, Error,
    Fields, Location, LocationLookup, LocationPattern, Result, UrlEncoder,
};

use tracing::{debug, warn};

/// Render `value` into URL, relative to default host.
///
/// Nested values with locations of their own are not resolved, use [`Locations`] for that.
pub fn href<T: Location>(value: &T) -> Result<Url> {
    paths::encode(value)
}

/// Registry of location templates with runtime configuration for rendering them.
#[derive(Debug, Default)]
pub struct Locations<C = DefaultConversionService> {
    templates: HashMap<&'static str, &'static str>,
    conversion: C,
    base: Option<Url>,
}

impl Locations {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: ConversionService> Locations<C> {
    /// Register location of type `T`.
    pub fn register<T: Location>(&mut self) -> &mut Self {
        match self.templates.insert(T::NAME, T::PATH) {
            Some(previous) if previous != T::PATH => warn!(
                location = T::NAME,
                previous,
                template = T::PATH,
                "location template replaced"
            ),
            _ => debug!(location = T::NAME, template = T::PATH, "registered location"),
        }

        self
    }

    pub fn with<T: Location>(mut self) -> Self {
        self.register::<T>();
        self
    }

    /// Replace the service, used for nested values without locations.
    pub fn with_conversion<D: ConversionService>(self, conversion: D) -> Locations<D> {
        Locations {
            templates: self.templates,
            conversion,
            base: self.base,
        }
    }

    /// Set base URL.
    ///
    /// Rendered URLs take protocol, host, port and credentials from the base, base path
    /// becomes a prefix of rendered paths and base query parameters go first.
    pub fn with_base(mut self, base: Url) -> Self {
        self.base = Some(base);
        self
    }

    pub fn base(&self) -> Option<&Url> {
        self.base.as_ref()
    }

    pub fn conversion(&self) -> &C {
        &self.conversion
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Render location `value` into URL.
    ///
    /// Template of `T` is taken from this registry, or from `T` itself, if it wasn't registered.
    pub fn href<T: Location>(&self, value: &T) -> Result<Url> {
        let mut encoder = UrlEncoder::new(self, &self.conversion);
        encoder.encode_location(value)?;

        Ok(self.rebase(encoder.build()?))
    }

    /// Render any serializable `value` into URL.
    ///
    /// The template is taken from the first nested struct registered in this registry.
    pub fn href_value<T: serde::Serialize + ?Sized>(&self, value: &T) -> Result<Url> {
        let relative = paths::encode_with(self, &self.conversion, value)?;

        Ok(self.rebase(relative))
    }

    fn rebase(&self, relative: Url) -> Url {
        match &self.base {
            Some(base) => resolve(base, &relative),
            None => relative,
        }
    }
}

impl<C> LocationLookup for Locations<C> {
    fn location(&self, name: &str) -> Option<&str> {
        self.templates.get(name).copied()
    }
}

fn resolve(base: &Url, relative: &Url) -> Url {
    let mut builder = UrlBuilder::from(base);

    builder.encoded_path = format!(
        "{}{}",
        base.encoded_path().trim_end_matches('/'),
        relative.encoded_path()
    );
    builder.parameters.append_all(relative.parameters().entries());
    builder.fragment = relative.fragment().to_owned();

    builder.build()
}
