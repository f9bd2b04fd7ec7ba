//! URL model and url codecs, used by `locations` crate
//!
//! [`Url`] is an immutable, already encoded URL. [`UrlBuilder`] is its mutable
//! counterpart, which can copy components from either a built [`Url`] or another builder.

pub mod codecs;
pub mod parameters;
pub mod protocol;
pub mod url;

pub use codecs::DecodeError;
pub use parameters::{Parameters, ParametersBuilder};
pub use protocol::UrlProtocol;
pub use url::{Url, UrlBuilder};
