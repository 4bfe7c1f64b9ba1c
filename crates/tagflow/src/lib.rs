//! Tagflow - an inline tag-entry engine.
//!
//! A tag field is a wrapping grid of editable text chips that behaves like a
//! single multi-value text field. This crate holds everything about it that
//! does not depend on a UI toolkit: which chip is being edited, whether its
//! text is valid, when a new chip opens, when a chip is merged away, and how
//! chips wrap into rows. Drawing is delegated to a [`TagSurface`].
//!
//! # Example
//!
//! ```
//! use tagflow::prelude::*;
//!
//! let config = Configuration::default()
//!     .with_validation(Validation::email_address())
//!     .with_tag_limit(TagLimit::Exactly(3));
//!
//! assert!(config.is_valid("ada@example.com"));
//! assert!(!config.is_valid("ada"));
//! ```
//!
//! See [`TagCollectionController`] for driving a field end to end.
//!
//! [`TagSurface`]: widget::TagSurface
//! [`TagCollectionController`]: widget::TagCollectionController

pub use tagflow_core::*;

pub mod config;
pub mod error;
pub mod model;
pub mod prelude;
pub mod widget;

pub use error::{TagError, TagResult};
