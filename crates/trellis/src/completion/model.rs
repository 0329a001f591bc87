//! The completion model: an `ItemModel` over SQL-backed categories.

use parking_lot::RwLock;

use crate::completion::category::{Category, CategoryOptions};
use crate::completion::pattern::compile;
use crate::error::SqlResult;
use crate::model::{ItemData, ItemFlags, ItemModel, ItemRole, ModelIndex, ModelSignals, Node};
use crate::sql::Database;

/// A SQL-backed model that provides completion data as a two-level tree.
///
/// Top-level rows are categories, each backed by a single table; their
/// children are the rows of that table matching the current filter
/// pattern. Every node has three columns; only a category's first column
/// has children, and item rows are always leaves.
///
/// The model is single-owner and synchronous: every call runs to
/// completion on the calling thread, and nothing mutates a category's
/// result set except [`new_category`](Self::new_category),
/// [`set_pattern`](Self::set_pattern) and
/// [`fetch_more`](ItemModel::fetch_more).
pub struct CompletionModel {
    db: Database,
    categories: Vec<Category>,
    /// Last raw (uncompiled) pattern, kept for highlighting.
    pattern: RwLock<String>,
    column_widths: [u16; 3],
    columns_to_filter: Vec<usize>,
    signals: ModelSignals,
}

impl CompletionModel {
    /// Creates an empty model over the given database.
    ///
    /// By default the filter applies to column 0 of each category's table
    /// and the column width hint is `[30, 70, 0]`.
    pub fn new(db: Database) -> Self {
        Self {
            db,
            categories: Vec::new(),
            pattern: RwLock::new(String::new()),
            column_widths: [30, 70, 0],
            columns_to_filter: vec![0],
            signals: ModelSignals::new(),
        }
    }

    /// Sets the width percentages views should give the three columns.
    ///
    /// A display hint only; nothing in the model enforces it.
    pub fn with_column_widths(mut self, widths: [u16; 3]) -> Self {
        self.column_widths = widths;
        self
    }

    /// Sets which table columns the filter pattern applies to.
    ///
    /// Indices are resolved to field names per table when a category is
    /// attached, so this only affects categories added afterwards.
    pub fn with_filter_columns(mut self, columns: Vec<usize>) -> Self {
        self.columns_to_filter = columns;
        self
    }

    /// Creates a new completion category and appends it to this model.
    ///
    /// `name` is both the category's display name and the table it is
    /// backed by. The table is probed, the filter statement is built, and
    /// the category is filled with the match-everything pattern. On error
    /// nothing is appended.
    ///
    /// Addition order defines display order and is never re-sorted.
    pub fn new_category(&mut self, name: &str, options: CategoryOptions) -> SqlResult<()> {
        let category = Category::new(&self.db, name, &self.columns_to_filter, &options)?;
        let row = self.categories.len();
        self.signals
            .emit_rows_inserted(ModelIndex::invalid(), row, row, || {
                self.categories.push(category);
            });
        Ok(())
    }

    /// Sets the filter pattern for all categories.
    ///
    /// The raw input is stored verbatim (see [`pattern`](Self::pattern)),
    /// compiled once, and broadcast to every category in display order.
    /// The broadcast is fail-fast: the first category error propagates
    /// immediately, leaving earlier categories with their new rows and
    /// later ones with their old rows. No cross-table rollback is
    /// attempted; `model_reset` fires on the error path too so views
    /// re-read rather than hold stale indices.
    ///
    /// Must not be called while a traversal of this model is in progress:
    /// it replaces every category's result set in place.
    pub fn set_pattern(&self, raw: &str) -> SqlResult<()> {
        tracing::debug!(
            target: "trellis::completion",
            pattern = raw,
            "setting completion pattern"
        );
        *self.pattern.write() = raw.to_string();
        let compiled = compile(raw);

        self.signals.model_about_to_reset.emit(());
        let mut result = Ok(());
        for category in &self.categories {
            if let Err(err) = category.apply_pattern(&compiled) {
                result = Err(err);
                break;
            }
        }
        self.signals.model_reset.emit(());
        result
    }

    /// Returns the last raw (uncompiled) filter pattern.
    pub fn pattern(&self) -> String {
        self.pattern.read().clone()
    }

    /// Returns the width percentages views should give the three columns.
    pub fn column_widths(&self) -> [u16; 3] {
        self.column_widths
    }

    /// Returns the category at the given position, if any.
    pub fn category(&self, index: usize) -> Option<&Category> {
        self.categories.get(index)
    }

    /// Returns the index of the first child (non-category) in the model.
    ///
    /// Scans categories in display order for the first with any rows;
    /// returns an invalid index if every category is empty.
    pub fn first_item(&self) -> ModelIndex {
        for (row, category) in self.categories.iter().enumerate() {
            if category.row_count() > 0 {
                let parent = self.index(row, 0, &ModelIndex::invalid());
                let index = self.index(0, 0, &parent);
                debug_assert!(index.is_valid());
                return index;
            }
        }
        ModelIndex::invalid()
    }

    /// Returns the index of the last child (non-category) in the model.
    ///
    /// Scans categories in reverse display order; returns an invalid
    /// index if every category is empty.
    pub fn last_item(&self) -> ModelIndex {
        for (row, category) in self.categories.iter().enumerate().rev() {
            let children = category.row_count();
            if children > 0 {
                let parent = self.index(row, 0, &ModelIndex::invalid());
                let index = self.index(children - 1, 0, &parent);
                debug_assert!(index.is_valid());
                return index;
            }
        }
        ModelIndex::invalid()
    }

    /// Returns the count of non-category items across all categories.
    pub fn total_item_count(&self) -> usize {
        self.categories.iter().map(|c| c.row_count()).sum()
    }

    /// Resolves an index to the category it points at, if any.
    ///
    /// Only category header rows resolve; items and invalid indices do
    /// not. Any column of a category row resolves; the column rule
    /// applies to expansion, not to paging.
    fn cat_from_index(&self, index: &ModelIndex) -> Option<&Category> {
        match index.node() {
            Node::Category => self.categories.get(index.row()),
            Node::None | Node::Item { .. } => None,
        }
    }
}

impl ItemModel for CompletionModel {
    fn row_count(&self, parent: &ModelIndex) -> usize {
        if !parent.is_valid() {
            // Top level: one row per category.
            return self.categories.len();
        }
        if parent.column() != 0 {
            // Only the first column has children.
            return 0;
        }
        self.cat_from_index(parent)
            .map(|category| category.row_count())
            .unwrap_or(0)
    }

    fn column_count(&self, _parent: &ModelIndex) -> usize {
        3
    }

    fn data(&self, index: &ModelIndex, role: ItemRole) -> ItemData {
        if role != ItemRole::Display {
            return ItemData::None;
        }
        match index.node() {
            Node::None => ItemData::None,
            Node::Category => {
                if index.column() != 0 {
                    return ItemData::None;
                }
                match self.categories.get(index.row()) {
                    Some(category) => ItemData::from(category.name()),
                    None => ItemData::None,
                }
            }
            Node::Item { category } => match self.categories.get(category) {
                Some(category) => category.data(index.row(), index.column()),
                None => ItemData::None,
            },
        }
    }

    fn index(&self, row: usize, column: usize, parent: &ModelIndex) -> ModelIndex {
        if row >= self.row_count(parent) || column >= self.column_count(parent) {
            return ModelIndex::invalid();
        }
        match parent.node() {
            Node::None => ModelIndex::category(row, column),
            // The row is tagged with its owning category's position, so
            // resolving its parent later needs no search.
            Node::Category => ModelIndex::item(parent.row(), row, column),
            Node::Item { .. } => ModelIndex::invalid(),
        }
    }

    fn parent(&self, index: &ModelIndex) -> ModelIndex {
        match index.node() {
            Node::Item { category } => ModelIndex::category(category, 0),
            Node::None | Node::Category => ModelIndex::invalid(),
        }
    }

    fn signals(&self) -> &ModelSignals {
        &self.signals
    }

    fn flags(&self, index: &ModelIndex) -> ItemFlags {
        match index.node() {
            Node::None => ItemFlags::default(),
            // Category headers are structural: visible but not interactive.
            Node::Category => ItemFlags::disabled(),
            Node::Item { .. } => ItemFlags::new().with_never_has_children(true),
        }
    }

    fn can_fetch_more(&self, parent: &ModelIndex) -> bool {
        self.cat_from_index(parent)
            .map(|category| category.can_fetch_more())
            .unwrap_or(false)
    }

    fn fetch_more(&self, parent: &ModelIndex) {
        let Some(category) = self.cat_from_index(parent) else {
            return;
        };
        let first = category.row_count();
        let added = category.fetch_more();
        if added > 0 {
            let parent = ModelIndex::category(parent.row(), 0);
            self.signals
                .emit_rows_inserted(parent, first, first + added - 1, || {});
        }
    }
}
