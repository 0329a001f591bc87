//! The query-engine boundary: SQLite access and paged result sets.
//!
//! [`Database`] is a cheap-to-clone handle over a single SQLite
//! connection. [`PagedRows`] materializes a statement's results
//! incrementally, in [`FETCH_BATCH`]-row batches, so large result sets are
//! only pulled in as a view scrolls into them.
//!
//! Statements are kept as SQL text and re-prepared per page rather than
//! holding a cursor open across calls; paging wraps the stored statement
//! in `SELECT * FROM (<stmt>) LIMIT <batch> OFFSET <loaded>`, which stays
//! composable with statements that carry their own `LIMIT`.

use std::sync::Arc;

use parking_lot::Mutex;
use rusqlite::types::Value;
use rusqlite::{Connection, params_from_iter};

use crate::error::{SqlError, SqlResult};
use crate::model::ItemData;

/// How many rows an incremental fetch pulls in at a time.
pub const FETCH_BATCH: usize = 256;

/// A shared handle to a SQLite database.
///
/// All categories of a completion model run their statements through one
/// `Database`. Cloning the handle is cheap; the underlying connection is
/// shared.
///
/// Table and column names interpolated into statements come from the
/// embedding application's configuration, not from user input; only
/// pattern values travel as bound parameters.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Opens a database file, creating it if it does not exist.
    pub fn open<P: AsRef<std::path::Path>>(path: P) -> SqlResult<Self> {
        Ok(Self::from_connection(Connection::open(path)?))
    }

    /// Opens a fresh in-memory database.
    pub fn open_in_memory() -> SqlResult<Self> {
        Ok(Self::from_connection(Connection::open_in_memory()?))
    }

    /// Wraps an already-open connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Executes a single statement, returning the number of affected rows.
    pub fn execute(&self, sql: &str, params: &[Value]) -> SqlResult<usize> {
        let conn = self.conn.lock();
        Ok(conn.execute(sql, params_from_iter(params.iter()))?)
    }

    /// Executes a batch of semicolon-separated statements.
    pub fn execute_batch(&self, sql: &str) -> SqlResult<()> {
        let conn = self.conn.lock();
        Ok(conn.execute_batch(sql)?)
    }

    /// Probes a table and returns its column names, in declaration order.
    ///
    /// This is the schema probe run when a category is attached: a
    /// one-row `SELECT` is prepared against the table, and failure means
    /// the table is missing or malformed.
    pub fn column_names(&self, table: &str) -> SqlResult<Vec<String>> {
        let conn = self.conn.lock();
        let stmt = conn
            .prepare(&format!("SELECT * FROM {table} LIMIT 1"))
            .map_err(|source| SqlError::Schema {
                table: table.to_string(),
                source,
            })?;
        Ok(stmt.column_names().iter().map(|s| s.to_string()).collect())
    }

    /// Runs a statement and returns its first batch of rows.
    ///
    /// The same parameter values are re-bound for every subsequent
    /// [`PagedRows::fetch_more`] page.
    pub fn run(&self, sql: &str, params: &[Value]) -> SqlResult<PagedRows> {
        let (columns, rows) = self.query_page(sql, params, 0)?;
        let exhausted = rows.len() < FETCH_BATCH;
        Ok(PagedRows {
            db: Some(self.clone()),
            sql: sql.to_string(),
            params: params.to_vec(),
            columns,
            rows,
            exhausted,
        })
    }

    /// Fetches one batch of rows at the given offset.
    fn query_page(
        &self,
        sql: &str,
        params: &[Value],
        offset: usize,
    ) -> SqlResult<(usize, Vec<Vec<Value>>)> {
        let page_sql = format!("SELECT * FROM ({sql}) LIMIT {FETCH_BATCH} OFFSET {offset}");
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(&page_sql)?;
        let columns = stmt.column_count();
        let mut rows = stmt.query(params_from_iter(params.iter()))?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let mut values = Vec::with_capacity(columns);
            for i in 0..columns {
                values.push(row.get::<_, Value>(i)?);
            }
            out.push(values);
        }
        tracing::trace!(
            target: "trellis::sql",
            offset,
            fetched = out.len(),
            "fetched result page"
        );
        Ok((columns, out))
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").finish_non_exhaustive()
    }
}

/// An incrementally-fetched result set.
///
/// Rows already fetched are materialized; [`fetch_more`](Self::fetch_more)
/// appends the next batch until the statement is exhausted.
/// [`row_count`](Self::row_count) reflects the rows loaded so far, not the
/// total the statement would yield.
pub struct PagedRows {
    /// Handle for fetching further pages; `None` for a detached set.
    db: Option<Database>,
    sql: String,
    params: Vec<Value>,
    columns: usize,
    rows: Vec<Vec<Value>>,
    exhausted: bool,
}

impl PagedRows {
    /// An empty result set not backed by any statement.
    ///
    /// Used as the replacement state after a failed re-query: nothing to
    /// show, nothing to fetch.
    pub fn detached() -> Self {
        Self {
            db: None,
            sql: String::new(),
            params: Vec::new(),
            columns: 0,
            rows: Vec::new(),
            exhausted: true,
        }
    }

    /// Number of rows fetched so far.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns the statement yields.
    pub fn column_count(&self) -> usize {
        self.columns
    }

    /// The value at (row, col), if both are in range.
    pub fn value(&self, row: usize, col: usize) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Whether another batch may be available.
    pub fn can_fetch_more(&self) -> bool {
        !self.exhausted
    }

    /// Appends the next batch of rows and returns how many arrived.
    ///
    /// A fetch on an exhausted set is a no-op returning 0. A failed fetch
    /// marks the set exhausted; rows already loaded are kept.
    pub fn fetch_more(&mut self) -> SqlResult<usize> {
        // A detached set is always exhausted.
        let Some(db) = self.db.as_ref() else {
            return Ok(0);
        };
        if self.exhausted {
            return Ok(0);
        }
        let page = match db.query_page(&self.sql, &self.params, self.rows.len()) {
            Ok((_, page)) => page,
            Err(err) => {
                self.exhausted = true;
                return Err(err);
            }
        };
        let added = page.len();
        if added < FETCH_BATCH {
            self.exhausted = true;
        }
        self.rows.extend(page);
        Ok(added)
    }
}

impl From<Value> for ItemData {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => ItemData::None,
            Value::Integer(n) => ItemData::Int(n),
            Value::Real(n) => ItemData::Float(n),
            Value::Text(s) => ItemData::String(s),
            Value::Blob(b) => ItemData::Bytes(b),
        }
    }
}
