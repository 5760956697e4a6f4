use std::sync::Arc;
use std::vec;

use super::result_set::ResultSet;
use super::row::Row;

/// Forward-only, single-pass cursor over query results.
///
/// Produced by `query` operations; advance it with [`RowCursor::next_row`] or
/// through the `Iterator` impl. Once a row has been yielded it cannot be
/// revisited, and a drained cursor cannot be restarted — run the query again
/// for a fresh cursor.
///
/// Rows are materialized before the cursor is handed out, so dropping a
/// half-consumed cursor releases everything; no driver-side handle can leak.
#[derive(Debug)]
pub struct RowCursor {
    rows: vec::IntoIter<Row>,
    column_names: Arc<Vec<String>>,
}

impl RowCursor {
    pub(crate) fn new(result_set: ResultSet) -> Self {
        let column_names = result_set
            .column_names()
            .map_or_else(|| Arc::new(Vec::new()), Arc::clone);
        Self {
            rows: result_set.results.into_iter(),
            column_names,
        }
    }

    /// Advance the cursor; `None` means end of data.
    pub fn next_row(&mut self) -> Option<Row> {
        self.rows.next()
    }

    /// Column names of the underlying result, in select order.
    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Rows not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.rows.len()
    }
}

impl Iterator for RowCursor {
    type Item = Row;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_row()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RowValues;

    fn two_row_set() -> ResultSet {
        let mut rs = ResultSet::with_capacity(2);
        rs.set_column_names(Arc::new(vec!["id".to_string()]));
        rs.add_row_values(vec![RowValues::Int(1)]);
        rs.add_row_values(vec![RowValues::Int(2)]);
        rs
    }

    #[test]
    fn cursor_is_single_pass() {
        let mut cursor = RowCursor::new(two_row_set());
        assert_eq!(cursor.remaining(), 2);
        let first = cursor.next_row().unwrap();
        assert_eq!(first.get("id"), Some(&RowValues::Int(1)));
        assert_eq!(cursor.remaining(), 1);
        assert!(cursor.next_row().is_some());
        assert!(cursor.next_row().is_none());
        // drained for good
        assert!(cursor.next_row().is_none());
    }
}
