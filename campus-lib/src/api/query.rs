//! List query parameters.

use url::Url;

/// Query parameters for a list request.
///
/// Filters are free text matched by the server. Whitespace is trimmed and
/// blank filters are dropped, so an all-blank query lists everything.
///
/// # Example
///
/// ```
/// use campus_lib::api::Query;
///
/// let query = Query::new()
///     .filter("name", "  ada ")
///     .filter("email", "   ");
///
/// assert_eq!(query.params(), &[("name".to_string(), "ada".to_string())]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    params: Vec<(String, String)>,
}

impl Query {
    /// Creates an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a query from `(key, value)` filter pairs.
    pub fn from_filters<K, V, I>(filters: I) -> Self
    where
        K: Into<String>,
        V: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        filters
            .into_iter()
            .fold(Self::new(), |query, (key, value)| query.filter(key, value))
    }

    /// Adds a filter; blank values are ignored.
    pub fn filter(mut self, key: impl Into<String>, value: impl AsRef<str>) -> Self {
        let value = value.as_ref().trim();
        if !value.is_empty() {
            self.params.push((key.into(), value.to_string()));
        }
        self
    }

    /// Returns the effective parameters.
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Returns `true` if no filter is active.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Appends the parameters to a URL's query string.
    pub(crate) fn apply(&self, url: &mut Url) {
        if self.params.is_empty() {
            return;
        }
        let mut pairs = url.query_pairs_mut();
        for (key, value) in &self.params {
            pairs.append_pair(key, value);
        }
    }
}
