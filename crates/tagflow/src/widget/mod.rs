//! Widget layer of the tag field.
//!
//! # Modules
//!
//! - [`validator`]: composable tag text predicates
//! - [`widgets`]: the per-chip state machine and the collection controller
//! - [`layout`]: flow layout of chips into rows
//! - [`animation`]: easing and the natural size transition
//! - [`surface`]: the rendering collaborator trait

pub mod animation;
pub mod layout;
pub mod surface;
pub mod validator;
pub mod widgets;

pub use surface::TagSurface;
pub use validator::{Validation, ValidationRule, Validator};
pub use widgets::{TagCellController, TagCollectionController, TagMode};
