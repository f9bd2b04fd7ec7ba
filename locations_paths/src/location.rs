use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};

use serde::Serialize;

use crate::location_pattern::{Error, LocationPattern};

/// A type, that is addressed by a location template.
///
/// Usually implemented with `#[derive(Location)]` from `locations` crate.
pub trait Location: Serialize {
    /// Serde container name of the type.
    const NAME: &'static str;
    /// Location template, like `/users/{id}`.
    const PATH: &'static str;

    fn pattern() -> Result<LocationPattern<'static>, Error> {
        LocationPattern::new(Self::PATH)
    }
}

/// Provider of location templates by serde container name.
pub trait LocationLookup {
    fn location(&self, name: &str) -> Option<&str>;
}

impl<L: LocationLookup + ?Sized> LocationLookup for &L {
    fn location(&self, name: &str) -> Option<&str> {
        (**self).location(name)
    }
}

impl<K, V, S> LocationLookup for HashMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    V: AsRef<str>,
    S: BuildHasher,
{
    fn location(&self, name: &str) -> Option<&str> {
        self.get(name).map(AsRef::as_ref)
    }
}

impl<K, V> LocationLookup for [(K, V)]
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn location(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(id, _)| id.as_ref() == name)
            .map(|(_, template)| template.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups() {
        let map = HashMap::from([("User", "/users/{id}")]);
        let pairs = [("User".to_owned(), "/users/{id}".to_owned())];

        assert_eq!(map.location("User"), Some("/users/{id}"));
        assert_eq!(map.location("Post"), None);
        assert_eq!(pairs[..].location("User"), Some("/users/{id}"));
        assert_eq!((&map).location("User"), Some("/users/{id}"));
    }
}
