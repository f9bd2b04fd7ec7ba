//! # `locations`: typed URL locations
//!
//! `proc-macro` crate for `Location` derive.
//!
//! A *location* is a serializable struct, that describes a single resource of an HTTP
//! service. Its fields are bound either to captures of the location template (path
//! parameters) or to the query string (every other field).
//!
//! The template is declared with a `#[location]` attribute with one required argument:
//! a string literal with `{name}` captures.
//!
//! ```ignore
//! use locations::{Location, serde::Serialize};
//!
//! #[derive(Serialize, Location)]
//! #[serde(crate = "locations::serde")]
//! #[location("/users/{id}/posts")]
//! struct UserPosts {
//!     id: u32,
//!     page: Option<u32>,
//! }
//! ```
//!
//! Captures are matched against serialized field names, so serde `rename`, `rename_all`
//! and `skip` attributes are taken into account. Invalid templates and captures without
//! a matching field are compile errors.
//!
//! ## Options
//!
//! - `root = path::to::locations`: path to `locations` crate, when it is only
//!   reachable through a re-export.

use proc_macro::TokenStream;

/// # `Location` derive macro
///
/// Implements `locations::Location` for a struct with named fields or a unit struct,
/// using the template from `#[location("...")]` attribute and serde container name.
#[proc_macro_derive(Location, attributes(location))]
pub fn derive_location(input: TokenStream) -> TokenStream {
    locations_macro_impl::derive_location(input.into()).into()
}
