//! Model/View protocol layer for Trellis.
//!
//! This module provides the foundational types for the Model/View pattern,
//! which separates data representation from display logic:
//!
//! - `ModelIndex`: Identifies an item's position in a model, tagged with
//!   the tree level it addresses
//! - `ItemRole`: Specifies what type of data to access
//! - `ItemData`: Type-erased container for item data
//! - `ItemModel`: The trait that models implement
//! - `ModelSignals`: Signals for change notifications
//!
//! The concrete model lives in [`crate::completion`]: a two-level tree
//! whose top-level rows are categories and whose children are the SQL rows
//! matching the current filter pattern.
//!
//! # Example
//!
//! ```no_run
//! use trellis::model::{ItemModel, ModelIndex};
//! # fn demo(model: &dyn ItemModel) {
//! let root = ModelIndex::invalid();
//! for row in 0..model.row_count(&root) {
//!     let category = model.index(row, 0, &root);
//!     if let Some(name) = model.display_text(&category) {
//!         println!("{name}: {} rows", model.row_count(&category));
//!     }
//! }
//! # }
//! ```
//!
//! Views query models using `ModelIndex` and `ItemRole` to get `ItemData`.
//! Models emit signals when data changes, which views listen to for
//! updates.

mod index;
mod role;
mod traits;

pub use index::{ModelIndex, Node};
pub use role::{ItemData, ItemRole};
pub use traits::{ItemFlags, ItemModel, ModelSignals};
