//! The SQL-backed completion model.
//!
//! A [`CompletionModel`] wraps one or more tables of a single database.
//! Top level indices represent categories, each backed by a single table;
//! child indices represent the rows of those tables matching the current
//! filter pattern.
//!
//! Setting a pattern compiles it once ([`compile`]) and re-runs every
//! category's stored statement with the compiled value bound per filtered
//! field; results stream in lazily through the protocol's fetch calls.
//!
//! # Example
//!
//! ```no_run
//! use trellis::completion::{CategoryOptions, CompletionModel, SortOrder};
//! use trellis::sql::Database;
//!
//! # fn main() -> trellis::error::SqlResult<()> {
//! let db = Database::open("completions.db")?;
//! let mut model = CompletionModel::new(db).with_filter_columns(vec![0, 1]);
//! model.new_category(
//!     "history",
//!     CategoryOptions::new().with_sort("atime", SortOrder::Descending),
//! )?;
//!
//! model.set_pattern("rust book")?;
//! if model.first_item().is_valid() {
//!     println!("{} completions", model.total_item_count());
//! }
//! # Ok(())
//! # }
//! ```

mod category;
mod model;
mod pattern;

pub use category::{Category, CategoryOptions, SortOrder};
pub use model::CompletionModel;
pub use pattern::compile;
