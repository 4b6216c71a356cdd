//! Insertion-ordered parameter mapping.
//!
//! Interpolation resolves keys in the order they were first registered, so
//! the mapping cannot be a `HashMap`. Overwriting a key replaces its value
//! but leaves it at its original position.

/// An ordered `key -> value` mapping of interpolation parameters.
///
/// Keys are stored without the leading `@` marker.
///
/// ## Examples
///
/// ```
/// use named_interpolator::Parameters;
///
/// let mut params = Parameters::new();
/// params.insert("b", "2");
/// params.insert("a", "1");
/// params.insert("b", "3");
///
/// assert_eq!(params.keys().collect::<Vec<_>>(), vec!["b", "a"]);
/// assert_eq!(params.get("b"), Some("3"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters {
    entries: Vec<(String, String)>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `key -> value`, or overwrites the value of an existing key in
    /// place. Returns the value that was replaced, if any.
    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) -> Option<String> {
        let key = key.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.into_iter()
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for Parameters {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Parameters::new();
        params.extend(iter);
        params
    }
}

impl<'a> IntoIterator for &'a Parameters {
    type Item = (&'a str, &'a str);
    type IntoIter = std::iter::Map<
        std::slice::Iter<'a, (String, String)>,
        fn(&'a (String, String)) -> (&'a str, &'a str),
    >;

    fn into_iter(self) -> Self::IntoIter {
        let as_pair: fn(&'a (String, String)) -> (&'a str, &'a str) =
            |(key, value)| (key.as_str(), value.as_str());
        self.entries.iter().map(as_pair)
    }
}
