use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

/// Insertion-ordered query-string parameters.
///
/// Mirrors the semantics of a browser's search params: `get` reads the
/// first occurrence, `set` overwrites the first occurrence in place and
/// drops later duplicates, new keys are appended, `remove` drops every
/// occurrence. Empty keys never make it into the pairs, since `parse`
/// could not read them back.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a query string, with or without the leading `?`. Parsing is
    /// lossy and never fails.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = url::form_urlencoded::parse(query.as_bytes())
            .filter(|(key, _)| !key.is_empty())
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        Self { pairs }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if key.is_empty() {
            debug!("Ignoring query parameter with an empty key");
            return;
        }

        match self.pairs.iter().position(|(k, _)| *k == key) {
            Some(index) => {
                self.pairs[index].1 = value;
                let mut seen = false;
                self.pairs.retain(|(k, _)| {
                    if *k != key {
                        return true;
                    }
                    let keep = !seen;
                    seen = true;
                    keep
                });
            }
            None => self.pairs.push((key, value)),
        }
    }

    pub fn remove(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }

    /// Apply a partial update: `None` deletes the key, `Some` sets it.
    pub fn merge<I, K, V>(&mut self, updates: I)
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in updates {
            let key = key.into();
            match value {
                Some(value) => self.set(key, value),
                None => self.remove(&key),
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// First value for every key.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        for (key, value) in &self.pairs {
            map.entry(key.clone()).or_insert_with(|| value.clone());
        }
        map
    }

    /// Serialize without the leading `?`.
    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        for (key, value) in iter {
            params.set(key, value);
        }
        params
    }
}
