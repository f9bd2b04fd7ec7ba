use crate::codecs;

type Entries = Vec<(String, Vec<String>)>;

/// Immutable ordered multi-map of string parameters.
///
/// Names keep the order of their first insertion, values of a single name keep
/// the order they were appended in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters {
    entries: Entries,
}

impl Parameters {
    /// Parameters without any entries.
    pub const fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Get first value for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        get(&self.entries, name)
    }

    /// Get all values for `name`.
    pub fn get_all(&self, name: &str) -> Option<&[String]> {
        get_all(&self.entries, name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get_all(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Flattened `(name, value)` pairs in order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().flat_map(|(name, values)| {
            values
                .iter()
                .map(move |value| (name.as_str(), value.as_str()))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Count of distinct names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Serialize as `key=value&key2=value2` query string.
    pub fn form_url_encode(&self) -> String {
        codecs::form_url_encode(self)
    }
}

impl<N, V> FromIterator<(N, V)> for Parameters
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut builder = ParametersBuilder::new();

        for (name, value) in iter {
            builder.append(name, value);
        }

        builder.build()
    }
}

/// Mutable counterpart of [`Parameters`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParametersBuilder {
    entries: Entries,
}

impl ParametersBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `value` to the values of `name`.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let name = name.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(id, _)| *id == name) {
            Some((_, values)) => values.push(value),
            None => self.entries.push((name, vec![value])),
        }

        self
    }

    /// Replace all values of `name` with a single `value`.
    ///
    /// Position of an already present name is kept.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let name = name.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(id, _)| *id == name) {
            Some((_, values)) => *values = vec![value],
            None => self.entries.push((name, vec![value])),
        }

        self
    }

    /// Append every value of every entry.
    pub fn append_all<'a, I>(&mut self, entries: I) -> &mut Self
    where
        I: IntoIterator<Item = (&'a str, &'a [String])>,
    {
        for (name, values) in entries {
            match self.entries.iter_mut().find(|(id, _)| id == name) {
                Some((_, present)) => present.extend_from_slice(values),
                None => self.entries.push((name.to_owned(), values.to_vec())),
            }
        }

        self
    }

    pub fn remove(&mut self, name: &str) -> Option<Vec<String>> {
        let idx = self.entries.iter().position(|(id, _)| id == name)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        get(&self.entries, name)
    }

    pub fn get_all(&self, name: &str) -> Option<&[String]> {
        get_all(&self.entries, name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get_all(name).is_some()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Create immutable snapshot of current entries.
    pub fn build(&self) -> Parameters {
        Parameters {
            entries: self.entries.clone(),
        }
    }
}

fn get_all<'e>(entries: &'e Entries, name: &str) -> Option<&'e [String]> {
    entries
        .iter()
        .find(|(id, _)| id == name)
        .map(|(_, values)| values.as_slice())
}

fn get<'e>(entries: &'e Entries, name: &str) -> Option<&'e str> {
    get_all(entries, name)
        .and_then(|values| values.first())
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_accumulates() {
        let mut builder = ParametersBuilder::new();
        builder.append("a", "1").append("b", "2").append("a", "3");

        let parameters = builder.build();

        assert_eq!(parameters.get("a"), Some("1"));
        assert_eq!(
            parameters.pairs().collect::<Vec<_>>(),
            [("a", "1"), ("a", "3"), ("b", "2")]
        );
        assert_eq!(parameters.len(), 2);
    }

    #[test]
    fn set_overwrites_in_place() {
        let mut builder = ParametersBuilder::new();
        builder.append("a", "1").append("b", "2").append("a", "3");
        builder.set("a", "4");

        assert_eq!(builder.get_all("a"), Some(&["4".to_owned()][..]));
        assert_eq!(builder.entries().next().map(|(name, _)| name), Some("a"));
    }

    #[test]
    fn append_all_merges() {
        let source: Parameters = [("a", "1"), ("b", "2")].into_iter().collect();

        let mut builder = ParametersBuilder::new();
        builder.append("b", "0");
        builder.append_all(source.entries());

        assert_eq!(
            builder.build().pairs().collect::<Vec<_>>(),
            [("b", "0"), ("b", "2"), ("a", "1")]
        );
    }

    #[test]
    fn remove() {
        let mut builder = ParametersBuilder::new();
        builder.append("a", "1");

        assert_eq!(builder.remove("a"), Some(vec!["1".to_owned()]));
        assert_eq!(builder.remove("a"), None);
        assert!(builder.is_empty());
    }

    #[test]
    fn empty() {
        let parameters = Parameters::empty();

        assert!(parameters.is_empty());
        assert_eq!(parameters.get("a"), None);
        assert!(!parameters.contains("a"));
        assert_eq!(parameters.form_url_encode(), "");
    }
}
