//! Row projection: ordered column-label to value mappings.
//!
//! A [`Row`] preserves the column order reported by the result metadata, not
//! alphabetical or declared-schema order. A [`RowSet`] preserves
//! result-iteration order with no implicit sorting.

use crate::value::Value;
use indexmap::IndexMap;

/// One result row: an ordered mapping from column label to value.
///
/// Labels come from the live result metadata and are not required to be
/// unique. When two result columns share a label, the last one written wins
/// while the column keeps its first-seen position. This mirrors the engine's
/// metadata iteration order and is deliberate; see [`Row::insert`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: IndexMap<String, Value>,
}

/// An ordered sequence of rows, in result-iteration order.
pub type RowSet = Vec<Row>;

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Self {
            columns: IndexMap::new(),
        }
    }

    /// Insert a column value under the given label.
    ///
    /// If the label is already present the value is replaced (last write
    /// wins) and the column keeps its original position. Returns the
    /// previous value, if any.
    pub fn insert(&mut self, label: impl Into<String>, value: Value) -> Option<Value> {
        self.columns.insert(label.into(), value)
    }

    /// Get the value for a column label.
    pub fn get(&self, label: &str) -> Option<&Value> {
        self.columns.get(label)
    }

    /// Column labels in result-metadata order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(|k| k.as_str())
    }

    /// Iterate over (label, value) pairs in result-metadata order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of columns in the row.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check whether the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl FromIterator<(String, Value)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (label, value) in iter {
            row.insert(label, value);
        }
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_preserved() {
        let mut row = Row::new();
        row.insert("Z", Value::Integer(1));
        row.insert("a", Value::Integer(2));
        row.insert("M", Value::Integer(3));

        let labels: Vec<&str> = row.labels().collect();
        assert_eq!(labels, vec!["Z", "a", "M"]);
    }

    #[test]
    fn test_label_collision_last_write_wins() {
        let mut row = Row::new();
        row.insert("ID", Value::Integer(1));
        row.insert("NAME", Value::Text("first".into()));
        let previous = row.insert("ID", Value::Integer(2));

        assert_eq!(previous, Some(Value::Integer(1)));
        assert_eq!(row.get("ID"), Some(&Value::Integer(2)));
        // Position of the colliding column is unchanged.
        let labels: Vec<&str> = row.labels().collect();
        assert_eq!(labels, vec!["ID", "NAME"]);
        assert_eq!(row.len(), 2);
    }

    #[test]
    fn test_get_missing_label() {
        let row = Row::new();
        assert!(row.get("ABSENT").is_none());
        assert!(row.is_empty());
    }

    #[test]
    fn test_from_iterator() {
        let row: Row = vec![
            ("A".to_string(), Value::Integer(1)),
            ("B".to_string(), Value::Text("x".into())),
        ]
        .into_iter()
        .collect();

        assert_eq!(row.len(), 2);
        assert_eq!(row.get("A"), Some(&Value::Integer(1)));
        assert_eq!(row.get("B"), Some(&Value::Text("x".into())));
    }
}
