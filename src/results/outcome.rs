/// Result of a DML or DDL statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExecOutcome {
    /// Rows changed by the statement.
    pub rows_affected: usize,
    /// Rowid generated by the most recent successful INSERT on this
    /// connection. Meaningful after inserting into a table with an
    /// auto-increment (rowid) key; stale otherwise.
    pub last_insert_id: i64,
}

impl ExecOutcome {
    #[must_use]
    pub fn new(rows_affected: usize, last_insert_id: i64) -> Self {
        Self {
            rows_affected,
            last_insert_id,
        }
    }
}
