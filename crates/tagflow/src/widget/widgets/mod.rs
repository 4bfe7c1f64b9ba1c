//! The tag-entry widgets.
//!
//! - [`TagCellController`]: edit state machine of a single chip
//! - [`TagCollectionController`]: orchestrates all chips of a field

mod tag_cell;
mod tag_field;

pub use tag_cell::{
    CHIP_PADDING, CellIntent, CellResponse, TagCellController, TagMode, apply_replacement,
    derive_mode,
};
pub use tag_field::TagCollectionController;
