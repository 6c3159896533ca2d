//! Search query types for the catalogue index.
//!
//! This module defines the multi-valued query parameters accepted by the
//! search endpoint and the boolean query they translate into.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Multi-valued query parameters, grouped by key.
///
/// Keys keep the order in which they first appeared; values keep their
/// request order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams(IndexMap<String, Vec<String>>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Group raw `key=value` pairs (e.g. from a URL query string) by key.
    ///
    /// # Example
    ///
    /// ```
    /// use catalogue_indexer_shared::QueryParams;
    ///
    /// let params = QueryParams::from_pairs(vec![
    ///     ("id".to_string(), "1".to_string()),
    ///     ("id".to_string(), "2".to_string()),
    /// ]);
    /// assert_eq!(params.get("id"), Some(&["1".to_string(), "2".to_string()][..]));
    /// ```
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut params = Self::new();
        for (key, value) in pairs {
            params.push(key, value);
        }
        params
    }

    /// Append a value under a key.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.entry(key.into()).or_default().push(value.into());
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.0.get(key).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.0.iter()
    }
}

/// A single clause of a [`BooleanQuery`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QueryClause {
    /// Phrase match of `value` against `field`.
    Match { field: String, value: String },
    /// Matches if any of the inner clauses match.
    AnyOf(Vec<QueryClause>),
}

impl QueryClause {
    pub fn matches(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Match {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// A conjunction of clauses: a document matches if every clause matches.
///
/// An empty query matches every document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BooleanQuery {
    pub must: Vec<QueryClause>,
}

impl BooleanQuery {
    /// Translate query parameters into a boolean query.
    ///
    /// Every key contributes one clause that must match. A key with a single
    /// value becomes a phrase match; a repeated key becomes a match-any over
    /// its values.
    ///
    /// # Example
    ///
    /// ```
    /// use catalogue_indexer_shared::{BooleanQuery, QueryClause, QueryParams};
    ///
    /// let params = QueryParams::from_pairs(vec![("type", "product")]);
    /// let query = BooleanQuery::translate(&params);
    /// assert_eq!(query.must, vec![QueryClause::matches("type", "product")]);
    /// ```
    pub fn translate(params: &QueryParams) -> Self {
        let must = params
            .iter()
            .filter(|(_, values)| !values.is_empty())
            .map(|(key, values)| match values.as_slice() {
                [value] => QueryClause::matches(key.as_str(), value.as_str()),
                values => QueryClause::AnyOf(
                    values
                        .iter()
                        .map(|value| QueryClause::matches(key.as_str(), value.as_str()))
                        .collect(),
                ),
            })
            .collect();

        Self { must }
    }

    pub fn is_match_all(&self) -> bool {
        self.must.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pairs_groups_by_key() {
        let params = QueryParams::from_pairs(vec![
            ("id", "1"),
            ("type", "product"),
            ("id", "2"),
        ]);

        assert_eq!(params.len(), 2);
        assert_eq!(params.get("id").unwrap(), &["1".to_string(), "2".to_string()]);
        assert_eq!(params.get("type").unwrap(), &["product".to_string()]);
        assert!(params.get("missing").is_none());
    }

    #[test]
    fn test_translate_repeated_and_single_keys() {
        let params = QueryParams::from_pairs(vec![("id", "1"), ("id", "2"), ("type", "product")]);

        let query = BooleanQuery::translate(&params);

        assert_eq!(
            query.must,
            vec![
                QueryClause::AnyOf(vec![
                    QueryClause::matches("id", "1"),
                    QueryClause::matches("id", "2"),
                ]),
                QueryClause::matches("type", "product"),
            ]
        );
    }

    #[test]
    fn test_translate_single_value_is_plain_match() {
        let params = QueryParams::from_pairs(vec![("variant.sku", "shoe-red")]);

        let query = BooleanQuery::translate(&params);

        assert_eq!(query.must.len(), 1);
        assert!(matches!(query.must[0], QueryClause::Match { .. }));
    }

    #[test]
    fn test_translate_empty_params_matches_all() {
        let query = BooleanQuery::translate(&QueryParams::new());
        assert!(query.is_match_all());
    }

    #[test]
    fn test_duplicate_values_are_kept() {
        // Repeating the same value is harmless inside a match-any clause.
        let params = QueryParams::from_pairs(vec![("id", "1"), ("id", "1")]);

        let query = BooleanQuery::translate(&params);

        assert_eq!(
            query.must,
            vec![QueryClause::AnyOf(vec![
                QueryClause::matches("id", "1"),
                QueryClause::matches("id", "1"),
            ])]
        );
    }
}
