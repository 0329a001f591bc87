//! Model index for addressing items in the two-level completion tree.
//!
//! The `ModelIndex` type is the fundamental way to reference items within
//! an `ItemModel`. It contains row, column, and a tagged [`Node`] payload
//! that records which level of the tree the index points at and, for item
//! rows, the position of the owning category.

use std::cmp::Ordering;

/// Identifies which slot of the two-level tree an index refers to.
///
/// An item carries the position of its owning category in the model's
/// category list rather than a reference to the category itself, so parent
/// resolution is a constant-time read of the payload with no search and
/// no borrowed back-pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Node {
    /// The index does not point at anything.
    None,
    /// A top-level category header row; the category is `row()`.
    Category,
    /// A result row inside a category.
    Item {
        /// Position of the owning category in the model's category list.
        category: usize,
    },
}

/// Represents a position within an `ItemModel`.
///
/// `ModelIndex` is used by views and selection handling to locate items
/// within a model. Each index contains its row and column plus the [`Node`]
/// payload identifying the tree level it addresses.
///
/// # Index Validity
///
/// Model indices should be used immediately and not stored long-term.
/// Setting a new filter pattern replaces every category's result set, and
/// previously obtained item indices no longer describe a row.
///
/// # Example
///
/// ```ignore
/// use trellis::model::{ItemModel, ModelIndex};
///
/// // Get a category
/// let category = model.index(0, 0, &ModelIndex::invalid());
///
/// // Get its first result row
/// let item = model.index(0, 0, &category);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelIndex {
    /// The row within the parent.
    row: usize,
    /// The column within the parent.
    column: usize,
    /// Which level of the tree this index addresses.
    node: Node,
}

impl Default for ModelIndex {
    fn default() -> Self {
        Self::invalid()
    }
}

impl ModelIndex {
    /// Creates an invalid (null) model index.
    ///
    /// An invalid index is used to represent:
    /// - The root of the model (as a parent reference)
    /// - A non-existent or out-of-bounds item
    /// - An uninitialized index
    ///
    /// # Example
    ///
    /// ```
    /// use trellis::model::ModelIndex;
    ///
    /// let root = ModelIndex::invalid();
    /// assert!(!root.is_valid());
    /// ```
    #[inline]
    pub const fn invalid() -> Self {
        Self {
            row: 0,
            column: 0,
            node: Node::None,
        }
    }

    /// Creates an index addressing a category header row.
    ///
    /// `row` is the category's position in the model's category list.
    /// This is typically called by the model's `index` method rather than
    /// directly.
    #[inline]
    pub const fn category(row: usize, column: usize) -> Self {
        Self {
            row,
            column,
            node: Node::Category,
        }
    }

    /// Creates an index addressing a result row inside a category.
    ///
    /// `category` is the position of the owning category in the model's
    /// category list; `row` and `column` locate the cell within that
    /// category's result set.
    #[inline]
    pub const fn item(category: usize, row: usize, column: usize) -> Self {
        Self {
            row,
            column,
            node: Node::Item { category },
        }
    }

    /// Returns `true` if this is a valid index.
    ///
    /// Invalid indices are returned when:
    /// - Requesting an out-of-bounds position
    /// - Using `ModelIndex::invalid()`
    /// - Referencing the root (which has no index)
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.node != Node::None
    }

    /// Returns the row of this index within its parent.
    ///
    /// Returns 0 for invalid indices.
    #[inline]
    pub fn row(&self) -> usize {
        self.row
    }

    /// Returns the column of this index within its parent.
    ///
    /// Returns 0 for invalid indices.
    #[inline]
    pub fn column(&self) -> usize {
        self.column
    }

    /// Returns the tree-level payload of this index.
    #[inline]
    pub fn node(&self) -> Node {
        self.node
    }

    /// Returns `true` if this index addresses a category header row.
    #[inline]
    pub fn is_category(&self) -> bool {
        self.node == Node::Category
    }

    /// Returns `true` if this index addresses a result row.
    #[inline]
    pub fn is_item(&self) -> bool {
        matches!(self.node, Node::Item { .. })
    }

    /// Creates a sibling index at the given row and column.
    ///
    /// The sibling shares this index's parentage: a category's sibling is
    /// another category, an item's sibling is another item of the same
    /// category. Returns an invalid index if this index is invalid.
    ///
    /// Note: This creates the index structure but doesn't validate
    /// against a model. Use with model methods for validation.
    #[inline]
    pub fn sibling(&self, row: usize, column: usize) -> ModelIndex {
        match self.node {
            Node::None => ModelIndex::invalid(),
            Node::Category => ModelIndex::category(row, column),
            Node::Item { category } => ModelIndex::item(category, row, column),
        }
    }

    /// Creates a sibling at the same column but different row.
    ///
    /// Convenience method for `sibling(row, self.column())`.
    #[inline]
    pub fn sibling_at_row(&self, row: usize) -> ModelIndex {
        self.sibling(row, self.column)
    }

    /// Returns the depth of this index in the tree hierarchy.
    ///
    /// Categories have depth 0, items depth 1. Returns 0 for invalid
    /// indices.
    pub fn depth(&self) -> usize {
        match self.node {
            Node::Item { .. } => 1,
            Node::None | Node::Category => 0,
        }
    }
}

impl std::fmt::Debug for ModelIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.node {
            Node::None => write!(f, "ModelIndex(invalid)"),
            Node::Category => f
                .debug_struct("ModelIndex")
                .field("category", &self.row)
                .field("column", &self.column)
                .finish(),
            Node::Item { category } => f
                .debug_struct("ModelIndex")
                .field("category", &category)
                .field("row", &self.row)
                .field("column", &self.column)
                .finish(),
        }
    }
}

impl PartialOrd for ModelIndex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ModelIndex {
    fn cmp(&self, other: &Self) -> Ordering {
        // Invalid indices sort before valid ones, categories before items.
        fn rank(node: Node) -> usize {
            match node {
                Node::None => 0,
                Node::Category => 1,
                Node::Item { .. } => 2,
            }
        }
        fn owner(node: Node) -> usize {
            match node {
                Node::Item { category } => category,
                Node::None | Node::Category => 0,
            }
        }
        rank(self.node)
            .cmp(&rank(other.node))
            .then_with(|| owner(self.node).cmp(&owner(other.node)))
            .then_with(|| self.row.cmp(&other.row))
            .then_with(|| self.column.cmp(&other.column))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_index() {
        let index = ModelIndex::invalid();
        assert!(!index.is_valid());
        assert_eq!(index.row(), 0);
        assert_eq!(index.column(), 0);
        assert_eq!(index.node(), Node::None);
        assert_eq!(index.depth(), 0);
    }

    #[test]
    fn test_category_index() {
        let index = ModelIndex::category(2, 0);
        assert!(index.is_valid());
        assert!(index.is_category());
        assert!(!index.is_item());
        assert_eq!(index.row(), 2);
        assert_eq!(index.depth(), 0);
    }

    #[test]
    fn test_item_index() {
        let index = ModelIndex::item(1, 5, 2);
        assert!(index.is_valid());
        assert!(index.is_item());
        assert_eq!(index.row(), 5);
        assert_eq!(index.column(), 2);
        assert_eq!(index.node(), Node::Item { category: 1 });
        assert_eq!(index.depth(), 1);
    }

    #[test]
    fn test_sibling_keeps_parentage() {
        let item = ModelIndex::item(3, 0, 0);
        let sibling = item.sibling(7, 1);
        assert_eq!(sibling.node(), Node::Item { category: 3 });
        assert_eq!(sibling.row(), 7);
        assert_eq!(sibling.column(), 1);

        let category = ModelIndex::category(0, 0);
        assert_eq!(category.sibling_at_row(4), ModelIndex::category(4, 0));

        assert!(!ModelIndex::invalid().sibling(0, 0).is_valid());
    }

    #[test]
    fn test_equality() {
        // Two invalid indices are equal
        assert_eq!(ModelIndex::invalid(), ModelIndex::invalid());
        assert_eq!(ModelIndex::item(0, 1, 2), ModelIndex::item(0, 1, 2));

        // Same position under different categories is a different index
        assert_ne!(ModelIndex::item(0, 1, 2), ModelIndex::item(1, 1, 2));
        // A category is never equal to an item at the same position
        assert_ne!(ModelIndex::category(0, 0), ModelIndex::item(0, 0, 0));
    }

    #[test]
    fn test_ordering() {
        let cat0 = ModelIndex::category(0, 0);
        let cat1 = ModelIndex::category(1, 0);
        let item = ModelIndex::item(0, 0, 0);

        assert!(ModelIndex::invalid() < cat0); // Invalid < Valid
        assert!(cat0 < cat1); // Row 0 < Row 1
        assert!(cat1 < item); // Categories before items
        assert!(ModelIndex::item(0, 9, 0) < ModelIndex::item(1, 0, 0));
        assert!(ModelIndex::item(0, 0, 0) < ModelIndex::item(0, 0, 1));
    }
}
