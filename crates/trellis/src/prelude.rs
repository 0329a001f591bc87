//! Convenience re-exports of the types most consumers need.
//!
//! ```
//! use trellis::prelude::*;
//! ```

pub use crate::completion::{Category, CategoryOptions, CompletionModel, SortOrder, compile};
pub use crate::error::{SqlError, SqlResult};
pub use crate::model::{ItemData, ItemFlags, ItemModel, ItemRole, ModelIndex, ModelSignals, Node};
pub use crate::sql::{Database, PagedRows};
pub use trellis_core::{ConnectionId, Signal};
