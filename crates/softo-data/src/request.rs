//! HTTP request builder.

use std::collections::HashMap;

/// A GET request under construction.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    pub(crate) url: String,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) query: Vec<(String, String)>,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::new(),
            query: Vec::new(),
        }
    }

    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Append query parameters. Encoding happens when the request is sent.
    pub fn query<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// The target URL, without query parameters.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_accumulates_in_order() {
        let req = RequestBuilder::new("http://x/api")
            .query([("category", "tees")])
            .query(vec![("type".to_string(), "clothes".to_string())]);
        assert_eq!(
            req.query,
            vec![
                ("category".to_string(), "tees".to_string()),
                ("type".to_string(), "clothes".to_string()),
            ]
        );
    }

    #[test]
    fn test_header_replaces_same_name() {
        let req = RequestBuilder::new("http://x")
            .header("Accept", "text/html")
            .header("Accept", "application/json");
        assert_eq!(
            req.headers.get("Accept").map(String::as_str),
            Some("application/json")
        );
    }
}
