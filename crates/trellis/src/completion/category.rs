//! A single completion category backed by one table.

use parking_lot::RwLock;
use rusqlite::types::Value;

use crate::error::{SqlError, SqlResult};
use crate::model::ItemData;
use crate::sql::{Database, PagedRows};

/// Direction of a category's `ORDER BY` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Smallest values first.
    Ascending,
    /// Largest values first.
    Descending,
}

impl SortOrder {
    fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        }
    }
}

/// Optional knobs for a new category.
///
/// # Example
///
/// ```
/// use trellis::completion::{CategoryOptions, SortOrder};
///
/// let options = CategoryOptions::new()
///     .with_select("url, title")
///     .with_where("redirect = 0")
///     .with_sort("atime", SortOrder::Descending)
///     .with_limit(500);
/// ```
#[derive(Debug, Clone)]
pub struct CategoryOptions {
    select: String,
    where_clause: Option<String>,
    sort: Option<(String, SortOrder)>,
    limit: Option<usize>,
}

impl Default for CategoryOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryOptions {
    /// Options with all defaults: select every column, no static
    /// predicate, engine ordering, no row limit.
    pub fn new() -> Self {
        Self {
            select: "*".to_string(),
            where_clause: None,
            sort: None,
            limit: None,
        }
    }

    /// Sets a custom result column expression for the select statement.
    pub fn with_select(mut self, select: impl Into<String>) -> Self {
        self.select = select.into();
        self
    }

    /// Sets a static predicate ANDed onto the pattern filter.
    pub fn with_where(mut self, predicate: impl Into<String>) -> Self {
        self.where_clause = Some(predicate.into());
        self
    }

    /// Sorts results by the given field.
    pub fn with_sort(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort = Some((field.into(), order));
        self
    }

    /// Caps the number of rows a query may return.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// One completion category: a table plus its compiled filter statement and
/// live result set.
///
/// The statement is built once at construction; each pattern change
/// re-executes it with new bindings and replaces the result set wholesale.
pub struct Category {
    name: String,
    query: String,
    fields: Vec<String>,
    db: Database,
    rows: RwLock<PagedRows>,
}

impl Category {
    /// Probes the table, builds the filter statement, and runs the initial
    /// match-everything fill.
    ///
    /// `filter_columns` are indices into the table's columns, resolved to
    /// field names via the probe; each resolved field becomes one arm of
    /// the OR'd `LIKE` predicate.
    pub(crate) fn new(
        db: &Database,
        name: &str,
        filter_columns: &[usize],
        options: &CategoryOptions,
    ) -> SqlResult<Self> {
        let columns = db.column_names(name)?;
        let mut fields = Vec::with_capacity(filter_columns.len());
        for &index in filter_columns {
            let field = columns.get(index).ok_or_else(|| SqlError::FilterColumn {
                table: name.to_string(),
                index,
                count: columns.len(),
            })?;
            fields.push(field.clone());
        }

        // The incoming pattern has literal % and _ escaped with '\', so
        // the statement must declare '\' as the escape character.
        let filter = fields
            .iter()
            .map(|f| format!("{f} LIKE ? ESCAPE '\\'"))
            .collect::<Vec<_>>()
            .join(" OR ");
        let mut query = format!("SELECT {} FROM {} WHERE ({})", options.select, name, filter);
        if let Some(where_clause) = &options.where_clause {
            query.push_str(&format!(" AND {where_clause}"));
        }
        if let Some((field, order)) = &options.sort {
            query.push_str(&format!(" ORDER BY {field} {}", order.as_sql()));
        }
        if let Some(limit) = options.limit {
            query.push_str(&format!(" LIMIT {limit}"));
        }

        let category = Self {
            name: name.to_string(),
            query,
            fields,
            db: db.clone(),
            rows: RwLock::new(PagedRows::detached()),
        };
        category.apply_pattern("%")?;
        Ok(category)
    }

    /// The table name, doubling as the category's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The compiled filter statement.
    pub fn statement(&self) -> &str {
        &self.query
    }

    /// Re-executes the statement with a new compiled pattern and replaces
    /// the live result set.
    ///
    /// The pattern value is bound once per filtered field. On failure the
    /// previous result set is gone: the category is left empty and the
    /// error propagates; callers must not assume rollback.
    pub fn apply_pattern(&self, pattern: &str) -> SqlResult<()> {
        let params: Vec<Value> = self
            .fields
            .iter()
            .map(|_| Value::Text(pattern.to_string()))
            .collect();
        match self.db.run(&self.query, &params) {
            Ok(rows) => {
                *self.rows.write() = rows;
                Ok(())
            }
            Err(err) => {
                *self.rows.write() = PagedRows::detached();
                Err(err)
            }
        }
    }

    /// Number of rows fetched so far.
    pub fn row_count(&self) -> usize {
        self.rows.read().row_count()
    }

    /// Whether another batch of rows may be available.
    pub fn can_fetch_more(&self) -> bool {
        self.rows.read().can_fetch_more()
    }

    /// Pulls in the next batch of rows and returns how many arrived.
    ///
    /// A fetch with nothing left to load is a no-op returning 0. An
    /// engine fault is logged and swallowed, and the set is treated as
    /// exhausted; the tree protocol's fetch path has no error channel.
    pub fn fetch_more(&self) -> usize {
        match self.rows.write().fetch_more() {
            Ok(added) => added,
            Err(err) => {
                tracing::warn!(
                    target: "trellis::completion",
                    category = %self.name,
                    error = %err,
                    "incremental fetch failed"
                );
                0
            }
        }
    }

    /// The stored value at (row, col) of the live result set.
    ///
    /// Out-of-range positions yield `ItemData::None`.
    pub fn data(&self, row: usize, col: usize) -> ItemData {
        self.rows
            .read()
            .value(row, col)
            .cloned()
            .map(ItemData::from)
            .unwrap_or_default()
    }
}

impl std::fmt::Debug for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Category")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .field("rows", &self.row_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::compile;

    fn history_db() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.execute_batch(
            "CREATE TABLE history (url TEXT, title TEXT, atime INTEGER);
             INSERT INTO history VALUES ('https://duckduckgo.com', 'DuckDuckGo', 3);
             INSERT INTO history VALUES ('https://example.com/rust', 'Rust Book', 2);
             INSERT INTO history VALUES ('https://example.com/sale', '50% off sale', 1);",
        )
        .unwrap();
        db
    }

    #[test]
    fn test_missing_table_fails_construction() {
        let db = history_db();
        let err = Category::new(&db, "bookmarks", &[0], &CategoryOptions::new()).unwrap_err();
        assert!(matches!(err, SqlError::Schema { ref table, .. } if table == "bookmarks"));
    }

    #[test]
    fn test_filter_column_out_of_range() {
        let db = history_db();
        let err = Category::new(&db, "history", &[0, 5], &CategoryOptions::new()).unwrap_err();
        assert!(matches!(
            err,
            SqlError::FilterColumn {
                index: 5,
                count: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_statement_shape() {
        let db = history_db();
        let options = CategoryOptions::new()
            .with_select("url, title")
            .with_where("atime > 0")
            .with_sort("atime", SortOrder::Descending)
            .with_limit(100);
        let cat = Category::new(&db, "history", &[0, 1], &options).unwrap();
        assert_eq!(
            cat.statement(),
            "SELECT url, title FROM history \
             WHERE (url LIKE ? ESCAPE '\\' OR title LIKE ? ESCAPE '\\') \
             AND atime > 0 ORDER BY atime DESC LIMIT 100"
        );
    }

    #[test]
    fn test_initial_fill_matches_everything() {
        let db = history_db();
        let cat = Category::new(&db, "history", &[0], &CategoryOptions::new()).unwrap();
        assert_eq!(cat.row_count(), 3);
    }

    #[test]
    fn test_or_semantics_across_fields() {
        let db = history_db();
        let cat = Category::new(&db, "history", &[0, 1], &CategoryOptions::new()).unwrap();
        // "rust" appears in one row's url and another row's title.
        cat.apply_pattern(&compile("rust")).unwrap();
        assert_eq!(cat.row_count(), 2);

        // A single filtered field narrows the match.
        let cat = Category::new(&db, "history", &[1], &CategoryOptions::new()).unwrap();
        cat.apply_pattern(&compile("rust")).unwrap();
        assert_eq!(cat.row_count(), 1);
        assert_eq!(cat.data(0, 1).as_string(), Some("Rust Book"));
    }

    #[test]
    fn test_static_predicate_still_applies() {
        let db = history_db();
        let options = CategoryOptions::new().with_where("atime >= 2");
        let cat = Category::new(&db, "history", &[0, 1], &options).unwrap();
        assert_eq!(cat.row_count(), 2);

        cat.apply_pattern(&compile("sale")).unwrap();
        // The sale row matches the pattern but fails the predicate.
        assert_eq!(cat.row_count(), 0);
    }

    #[test]
    fn test_sort_and_limit() {
        let db = history_db();
        let options = CategoryOptions::new()
            .with_sort("atime", SortOrder::Descending)
            .with_limit(2);
        let cat = Category::new(&db, "history", &[0], &options).unwrap();
        assert_eq!(cat.row_count(), 2);
        assert_eq!(cat.data(0, 1).as_string(), Some("DuckDuckGo"));
        assert_eq!(cat.data(1, 1).as_string(), Some("Rust Book"));

        let options = CategoryOptions::new().with_sort("atime", SortOrder::Ascending);
        let cat = Category::new(&db, "history", &[0], &options).unwrap();
        assert_eq!(cat.data(0, 1).as_string(), Some("50% off sale"));
    }

    #[test]
    fn test_escaped_pattern_matches_literal_percent() {
        let db = history_db();
        let cat = Category::new(&db, "history", &[1], &CategoryOptions::new()).unwrap();
        cat.apply_pattern(&compile("50% off")).unwrap();
        assert_eq!(cat.row_count(), 1);
        assert_eq!(cat.data(0, 1).as_string(), Some("50% off sale"));
    }

    #[test]
    fn test_failed_apply_leaves_empty_set() {
        let db = history_db();
        let cat = Category::new(&db, "history", &[0], &CategoryOptions::new()).unwrap();
        assert_eq!(cat.row_count(), 3);

        db.execute_batch("DROP TABLE history;").unwrap();
        assert!(cat.apply_pattern("%").is_err());
        assert_eq!(cat.row_count(), 0);
        assert!(!cat.can_fetch_more());
    }

    #[test]
    fn test_fetch_more_on_loaded_category_is_noop() {
        let db = history_db();
        let cat = Category::new(&db, "history", &[0], &CategoryOptions::new()).unwrap();
        assert!(!cat.can_fetch_more());
        assert_eq!(cat.fetch_more(), 0);
        assert_eq!(cat.row_count(), 3);
    }

    #[test]
    fn test_out_of_range_data_is_absent() {
        let db = history_db();
        let cat = Category::new(&db, "history", &[0], &CategoryOptions::new()).unwrap();
        assert!(cat.data(99, 0).is_none());
        assert!(cat.data(0, 99).is_none());
    }
}
