//! Chip positioning.
//!
//! - [`FlowLayout`]: wraps variable-width chips into left-packed rows
//! - [`FlowGeometry`]: frames plus total content size from one pass
//! - [`Alignment`]: how the default pass spreads a row

mod flow_layout;

pub use flow_layout::{FlowGeometry, FlowLayout};

/// Default spacing between chips and between rows, in points.
pub const DEFAULT_SPACING: f32 = 5.0;

/// Horizontal alignment of chips within a row during the default pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    /// Pack at the left edge.
    Start,
    /// Center the row.
    Center,
    /// Pack at the right edge.
    End,
    /// Spread the chips so the row spans the full width (default).
    #[default]
    Stretch,
}
