//! Core systems for Trellis.
//!
//! This crate provides the foundational component of the Trellis completion
//! model: a type-safe signal/slot system for change notification. Models
//! emit signals when their data is replaced or extended, and views connect
//! slots to stay synchronized.
//!
//! # Signal/Slot Example
//!
//! ```
//! use trellis_core::Signal;
//!
//! // Create a signal that notifies when a value changes
//! let value_changed = Signal::<i32>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! // Emit the signal
//! value_changed.emit(42);
//!
//! // Disconnect when done
//! value_changed.disconnect(conn_id);
//! ```

mod signal;

pub use signal::{ConnectionId, Signal};
