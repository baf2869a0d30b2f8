use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;

/// Letters, digits and `-_.~` pass through; everything else is escaped.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Request parameters keyed by name, iterated in key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    inner: BTreeMap<String, String>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key`, replacing any earlier value. Values are stored as text.
    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) -> &mut Self {
        self.inner.insert(key.into(), value.to_string());
        self
    }

    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.inner.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.inner.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: ToString,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for QueryParams
where
    K: Into<String>,
    V: ToString,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a QueryParams {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&build_query_string(Some(self)))
    }
}

/// Percent-encodes a single key or value.
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Renders `params` as `k=v&k=v`, skipping pairs whose value is empty.
pub fn build_query_string(params: Option<&QueryParams>) -> String {
    let Some(params) = params else {
        return String::new();
    };
    params
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| format!("{}={}", encode_component(key), encode_component(value)))
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use percent_encoding::percent_decode_str;

    #[test]
    fn absent_params_render_empty() {
        assert_eq!(build_query_string(None), "");
        assert_eq!(build_query_string(Some(&QueryParams::new())), "");
    }

    #[test]
    fn empty_values_are_dropped() {
        let params = QueryParams::from([("a", "1"), ("b", "")]);
        assert_eq!(build_query_string(Some(&params)), "a=1");
    }

    #[test]
    fn reserved_characters_are_escaped() {
        let params = QueryParams::from([("a b", "c&d")]);
        let rendered = build_query_string(Some(&params));
        assert_eq!(rendered, "a%20b=c%26d");

        let (key, value) = rendered.split_once('=').unwrap();
        assert_eq!(percent_decode_str(key).decode_utf8().unwrap(), "a b");
        assert_eq!(percent_decode_str(value).decode_utf8().unwrap(), "c&d");
    }

    #[test]
    fn unreserved_characters_survive() {
        assert_eq!(encode_component("Az09-_.~"), "Az09-_.~");
        assert_eq!(encode_component("é/?="), "%C3%A9%2F%3F%3D");
    }

    #[test]
    fn keys_render_in_sorted_order() {
        let params = QueryParams::new()
            .with("inflect", true)
            .with("difficulty", 2)
            .with("category", "news");
        assert_eq!(
            build_query_string(Some(&params)),
            "category=news&difficulty=2&inflect=true"
        );
        assert_eq!(params.to_string(), build_query_string(Some(&params)));
    }

    #[test]
    fn insert_replaces_existing_value() {
        let mut params = QueryParams::new();
        params.insert("q", "dog").insert("q", "cat");
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("q"), Some("cat"));
    }
}
