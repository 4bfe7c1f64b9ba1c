//! Core systems for Tagflow.
//!
//! This crate provides the foundational pieces the tag-entry engine is built on:
//!
//! - **Signal/Slot System**: Type-safe notification from the engine to its host
//! - **Geometry**: Points, sizes, rectangles, margins and colors
//! - **Logging**: `tracing` targets and performance spans
//!
//! # Signal/Slot Example
//!
//! ```
//! use tagflow_core::Signal;
//!
//! let finished_editing = Signal::<String>::new();
//!
//! let conn_id = finished_editing.connect(|tag| {
//!     println!("Final tag: {}", tag);
//! });
//!
//! finished_editing.emit("rust".to_string());
//! finished_editing.disconnect(conn_id);
//! ```

pub mod logging;
pub mod signal;
pub mod types;

pub use logging::PerfSpan;
pub use signal::{ConnectionId, Signal};
pub use types::{Color, ContentMargins, Point, Rect, Size};
