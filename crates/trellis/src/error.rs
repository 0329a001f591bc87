//! Error types for the completion model.

use thiserror::Error;

/// Errors raised while building or refreshing completion categories.
///
/// Address resolution never produces an error: malformed or stale
/// [`ModelIndex`](crate::model::ModelIndex) values resolve to invalid
/// indices or absent data, because tree-traversal callers probe bounds as
/// a matter of course.
#[derive(Error, Debug)]
pub enum SqlError {
    /// The backing table is missing or its schema could not be probed.
    ///
    /// Raised at category construction; the category must not be added.
    #[error("table '{table}' is not reachable: {source}")]
    Schema {
        /// Name of the table that failed the probe.
        table: String,
        /// The underlying engine error.
        source: rusqlite::Error,
    },

    /// A configured filter column index does not exist in the table.
    #[error("filter column {index} out of range for table '{table}' with {count} columns")]
    FilterColumn {
        /// Name of the table being probed.
        table: String,
        /// The out-of-range column index.
        index: usize,
        /// How many columns the table actually has.
        count: usize,
    },

    /// The engine rejected or failed to execute a statement.
    #[error("query failed: {0}")]
    Query(#[from] rusqlite::Error),
}

/// Result type for completion model operations.
pub type SqlResult<T> = Result<T, SqlError>;
