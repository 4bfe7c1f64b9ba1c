//! Prelude module for Tagflow.
//!
//! ```
//! use tagflow::prelude::*;
//! ```

// ============================================================================
// Signal/Slot and Geometry
// ============================================================================

pub use crate::signal::{ConnectionId, Signal};
pub use crate::types::{Color, ContentMargins, Point, Rect, Size};

// ============================================================================
// Configuration & Errors
// ============================================================================

pub use crate::config::{
    Configuration, FontSpec, FontWeight, InputHints, ModeStyle, ModeStyles, PlaceholderStyle,
    TagLimit,
};
pub use crate::error::{TagError, TagResult};

// ============================================================================
// Model
// ============================================================================

pub use crate::model::{Tag, TagStore};

// ============================================================================
// Widgets
// ============================================================================

pub use crate::widget::layout::{Alignment, FlowGeometry, FlowLayout};
pub use crate::widget::surface::TagSurface;
pub use crate::widget::validator::{Validation, ValidationRule, Validator};
pub use crate::widget::widgets::{
    CellIntent, CellResponse, TagCellController, TagCollectionController, TagMode,
};
