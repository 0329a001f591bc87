//! Trellis - a SQLite-backed completion model in the Model/View style.
//!
//! Trellis presents a two-level, lazily-populated tree over a relational
//! database. Top-level nodes are *categories*, each backed by a single
//! table; their children are the rows of that table matching the current
//! filter pattern. Views consume the tree through the standard item-model
//! protocol ([`model::ItemModel`]); free-text input is compiled into an
//! escaped SQL `LIKE` predicate applied across each category's configured
//! filter fields.
//!
//! # Example
//!
//! ```no_run
//! use trellis::prelude::*;
//!
//! fn main() -> SqlResult<()> {
//!     let db = Database::open_in_memory()?;
//!     db.execute_batch("CREATE TABLE history (url TEXT, title TEXT);")?;
//!
//!     let mut model = CompletionModel::new(db);
//!     model.new_category("history", CategoryOptions::new())?;
//!     model.set_pattern("rust book")?;
//!
//!     println!("{} completions", model.total_item_count());
//!     Ok(())
//! }
//! ```

pub mod completion;
pub mod error;
pub mod model;
pub mod prelude;
pub mod sql;

pub use trellis_core::{ConnectionId, Signal};
