//! Flow layout for variable-width chips.
//!
//! `FlowLayout` arranges chips left to right, wrapping to the next row when
//! the available width is exceeded, the way words wrap in a paragraph.
//!
//! Positioning runs in two passes:
//!
//! 1. [`FlowLayout::default_pass`] fills rows greedily and spreads the chips
//!    of each row according to the configured [`Alignment`]. With the default
//!    `Stretch` alignment, rows are justified edge to edge.
//! 2. [`FlowLayout::left_pack`] rewrites every x-origin so each row is packed
//!    tightly against the left margin with exactly `horizontal_spacing`
//!    between neighbours.
//!
//! # Example
//!
//! ```
//! use tagflow::widget::layout::FlowLayout;
//! use tagflow_core::{ContentMargins, Size};
//!
//! let layout = FlowLayout::new()
//!     .with_content_margins(ContentMargins::uniform(0.0))
//!     .with_spacing(10.0, 5.0);
//!
//! let chip = Size::new(50.0, 20.0);
//! let geometry = layout.compute(&[chip, chip, chip], 120.0);
//!
//! // Two chips fit on the first row, the third wraps.
//! assert_eq!(geometry.frames[1].origin.x, 60.0);
//! assert_eq!(geometry.frames[2].origin.y, 25.0);
//! assert_eq!(geometry.content_size.height, 45.0);
//! ```

use tagflow_core::logging::{span_names, targets};
use tagflow_core::{ContentMargins, PerfSpan, Rect, Size};

use super::{Alignment, DEFAULT_SPACING};

/// Result of a layout pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FlowGeometry {
    /// One frame per input size, in input order.
    pub frames: Vec<Rect>,
    /// Size of the whole content including margins.
    pub content_size: Size,
}

/// A flow layout that wraps chips horizontally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowLayout {
    content_margins: ContentMargins,
    /// Horizontal spacing between chips in a row.
    horizontal_spacing: f32,
    /// Vertical spacing between rows.
    vertical_spacing: f32,
    /// Row alignment used by the default pass.
    alignment: Alignment,
}

impl FlowLayout {
    /// Create a flow layout with default spacing and no margins.
    pub fn new() -> Self {
        Self {
            content_margins: ContentMargins::default(),
            horizontal_spacing: DEFAULT_SPACING,
            vertical_spacing: DEFAULT_SPACING,
            alignment: Alignment::default(),
        }
    }

    /// Set the content margins.
    pub fn with_content_margins(mut self, margins: ContentMargins) -> Self {
        self.content_margins = margins;
        self
    }

    /// Set horizontal and vertical spacing.
    pub fn with_spacing(mut self, horizontal: f32, vertical: f32) -> Self {
        self.horizontal_spacing = horizontal;
        self.vertical_spacing = vertical;
        self
    }

    /// Set the default-pass alignment.
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    #[inline]
    pub fn content_margins(&self) -> ContentMargins {
        self.content_margins
    }

    pub fn set_content_margins(&mut self, margins: ContentMargins) {
        self.content_margins = margins;
    }

    /// Get the horizontal spacing between chips.
    #[inline]
    pub fn horizontal_spacing(&self) -> f32 {
        self.horizontal_spacing
    }

    /// Set the horizontal spacing between chips.
    pub fn set_horizontal_spacing(&mut self, spacing: f32) {
        self.horizontal_spacing = spacing;
    }

    /// Get the vertical spacing between rows.
    #[inline]
    pub fn vertical_spacing(&self) -> f32 {
        self.vertical_spacing
    }

    /// Set the vertical spacing between rows.
    pub fn set_vertical_spacing(&mut self, spacing: f32) {
        self.vertical_spacing = spacing;
    }

    #[inline]
    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.alignment = alignment;
    }

    /// Width left for chips once the side margins are taken off.
    #[inline]
    pub fn content_width(&self, width: f32) -> f32 {
        (width - self.content_margins.horizontal()).max(0.0)
    }

    /// Greedy row filling.
    ///
    /// A chip moves to the next row when placing it would overflow the
    /// content width. The first chip of a row is always placed, even if it is
    /// wider than the content width. Chips are vertically centered in their
    /// row.
    pub fn default_pass(&self, sizes: &[Size], width: f32) -> Vec<Rect> {
        let mut frames = vec![Rect::ZERO; sizes.len()];
        let content_x = self.content_margins.left;
        let content_width = self.content_width(width);

        let mut row: Vec<usize> = Vec::new();
        let mut row_y = self.content_margins.top;
        let mut row_width: f32 = 0.0;
        let mut row_height: f32 = 0.0;

        for (index, size) in sizes.iter().enumerate() {
            let next_width = if row.is_empty() {
                size.width
            } else {
                row_width + self.horizontal_spacing + size.width
            };

            if !row.is_empty() && next_width > content_width {
                self.place_row(&row, sizes, &mut frames, content_x, content_width, row_y, row_height);
                row_y += row_height + self.vertical_spacing;
                row.clear();
                row_width = size.width;
                row_height = size.height;
            } else {
                row_width = next_width;
                row_height = row_height.max(size.height);
            }
            row.push(index);
        }

        self.place_row(&row, sizes, &mut frames, content_x, content_width, row_y, row_height);
        frames
    }

    #[allow(clippy::too_many_arguments)]
    fn place_row(
        &self,
        row: &[usize],
        sizes: &[Size],
        frames: &mut [Rect],
        content_x: f32,
        content_width: f32,
        row_y: f32,
        row_height: f32,
    ) {
        if row.is_empty() {
            return;
        }

        let used: f32 = row.iter().map(|&i| sizes[i].width).sum::<f32>()
            + (row.len() - 1) as f32 * self.horizontal_spacing;
        let free = (content_width - used).max(0.0);

        let (offset, extra_gap) = match self.alignment {
            Alignment::Start => (0.0, 0.0),
            Alignment::Center => (free / 2.0, 0.0),
            Alignment::End => (free, 0.0),
            Alignment::Stretch if row.len() > 1 => (0.0, free / (row.len() - 1) as f32),
            Alignment::Stretch => (0.0, 0.0),
        };

        let mut x = content_x + offset;
        for &index in row {
            let size = sizes[index];
            let y = row_y + (row_height - size.height) / 2.0;
            frames[index] = Rect::new(x, y, size.width, size.height);
            x += size.width + self.horizontal_spacing + extra_gap;
        }
    }

    /// Pack every row tightly against the left margin.
    ///
    /// A frame starts a new row when its y-origin is strictly below its
    /// predecessor's. The first frame of a row moves to the left margin; any
    /// other frame moves to its predecessor's right edge plus the horizontal
    /// spacing. Only x-origins change.
    pub fn left_pack(&self, frames: &mut [Rect]) {
        let mut previous: Option<Rect> = None;
        for frame in frames.iter_mut() {
            frame.origin.x = match previous {
                Some(prev) if frame.origin.y <= prev.origin.y => {
                    prev.right() + self.horizontal_spacing
                }
                _ => self.content_margins.left,
            };
            previous = Some(*frame);
        }
    }

    /// Run both passes and measure the content.
    pub fn compute(&self, sizes: &[Size], width: f32) -> FlowGeometry {
        let _perf = PerfSpan::new(span_names::LAYOUT);

        let mut frames = self.default_pass(sizes, width);
        self.left_pack(&mut frames);

        let content_bottom = frames
            .iter()
            .map(Rect::bottom)
            .fold(self.content_margins.top, f32::max);
        let content_size = Size::new(width, content_bottom + self.content_margins.bottom);

        tracing::trace!(
            target: targets::LAYOUT,
            items = sizes.len(),
            width,
            height = content_size.height,
            "flow layout computed"
        );

        FlowGeometry {
            frames,
            content_size,
        }
    }

    /// Content height, margins included, needed at `width`.
    pub fn height_for_width(&self, sizes: &[Size], width: f32) -> f32 {
        self.compute(sizes, width).content_size.height
    }
}

impl Default for FlowLayout {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare(horizontal: f32, vertical: f32) -> FlowLayout {
        FlowLayout::new()
            .with_content_margins(ContentMargins::uniform(0.0))
            .with_spacing(horizontal, vertical)
    }

    #[test]
    fn test_flow_layout_creation() {
        let layout = FlowLayout::new();
        assert_eq!(layout.horizontal_spacing(), DEFAULT_SPACING);
        assert_eq!(layout.vertical_spacing(), DEFAULT_SPACING);
        assert_eq!(layout.alignment(), Alignment::Stretch);
    }

    #[test]
    fn test_empty_input() {
        let layout = bare(10.0, 5.0).with_content_margins(ContentMargins::new(4.0, 2.0, 4.0, 2.0));
        let geometry = layout.compute(&[], 200.0);
        assert!(geometry.frames.is_empty());
        assert_eq!(geometry.content_size, Size::new(200.0, 4.0));
    }

    #[test]
    fn test_single_row() {
        let layout = bare(10.0, 5.0);
        let sizes = [Size::new(50.0, 30.0); 3];
        let geometry = layout.compute(&sizes, 200.0);

        let xs: Vec<f32> = geometry.frames.iter().map(|f| f.origin.x).collect();
        assert_eq!(xs, vec![0.0, 60.0, 120.0]);
        assert!(geometry.frames.iter().all(|f| f.origin.y == 0.0));
        assert_eq!(geometry.content_size.height, 30.0);
    }

    #[test]
    fn test_wrapping() {
        let layout = bare(10.0, 5.0);
        let sizes = [Size::new(50.0, 30.0); 4];
        let frames = layout.compute(&sizes, 150.0).frames;

        assert_eq!(frames[0].origin.y, 0.0);
        assert_eq!(frames[1].origin.y, 0.0);
        assert_eq!(frames[2].origin.y, 35.0);
        assert_eq!(frames[3].origin.y, 35.0);
        assert_eq!(frames[2].origin.x, 0.0);
        assert_eq!(frames[3].origin.x, 60.0);
    }

    #[test]
    fn test_default_pass_stretch_justifies_rows() {
        let layout = bare(10.0, 5.0);
        let sizes = [Size::new(40.0, 20.0), Size::new(40.0, 20.0)];
        let frames = layout.default_pass(&sizes, 200.0);

        assert_eq!(frames[0].origin.x, 0.0);
        assert_eq!(frames[1].right(), 200.0);
    }

    #[test]
    fn test_left_pack_undoes_justification() {
        let layout = bare(10.0, 5.0);
        let sizes = [Size::new(40.0, 20.0), Size::new(70.0, 20.0), Size::new(40.0, 20.0)];
        let geometry = layout.compute(&sizes, 200.0);

        let xs: Vec<f32> = geometry.frames.iter().map(|f| f.origin.x).collect();
        assert_eq!(xs, vec![0.0, 50.0, 130.0]);
    }

    #[test]
    fn test_left_pack_row_break_on_greater_y() {
        let layout = bare(5.0, 5.0).with_content_margins(ContentMargins::new(4.0, 0.0, 4.0, 0.0));
        let mut frames = vec![
            Rect::new(30.0, 0.0, 20.0, 10.0),
            Rect::new(90.0, 0.0, 20.0, 10.0),
            Rect::new(50.0, 15.0, 20.0, 10.0),
        ];
        layout.left_pack(&mut frames);

        assert_eq!(frames[0].origin.x, 4.0);
        assert_eq!(frames[1].origin.x, 29.0);
        assert_eq!(frames[2].origin.x, 4.0);
        assert_eq!(frames[2].origin.y, 15.0);
    }

    #[test]
    fn test_alignment_center_and_end() {
        let sizes = [Size::new(40.0, 30.0), Size::new(40.0, 30.0)];

        let centered = bare(10.0, 0.0).with_alignment(Alignment::Center);
        let frames = centered.default_pass(&sizes, 200.0);
        assert!((frames[0].origin.x - 55.0).abs() < 0.01);

        let trailing = bare(10.0, 0.0).with_alignment(Alignment::End);
        let frames = trailing.default_pass(&sizes, 200.0);
        assert!((frames[1].right() - 200.0).abs() < 0.01);
    }

    #[test]
    fn test_oversized_item_gets_own_row() {
        let layout = bare(10.0, 5.0);
        let sizes = [Size::new(30.0, 20.0), Size::new(500.0, 20.0), Size::new(30.0, 20.0)];
        let frames = layout.compute(&sizes, 100.0).frames;

        assert_eq!(frames[0].origin.y, 0.0);
        assert_eq!(frames[1].origin.y, 25.0);
        assert_eq!(frames[1].origin.x, 0.0);
        assert_eq!(frames[2].origin.y, 50.0);
    }

    #[test]
    fn test_rows_vertically_centered() {
        let layout = bare(10.0, 5.0);
        let sizes = [Size::new(30.0, 30.0), Size::new(30.0, 20.0)];
        let frames = layout.default_pass(&sizes, 100.0);
        assert_eq!(frames[1].origin.y, 5.0);
    }

    #[test]
    fn test_height_for_width() {
        let layout = bare(10.0, 5.0);
        let sizes = [Size::new(100.0, 30.0); 3];

        assert!((layout.height_for_width(&sizes, 500.0) - 30.0).abs() < 0.01);
        // One chip per row: 30 + 5 + 30 + 5 + 30.
        assert!((layout.height_for_width(&sizes, 120.0) - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_margins_offset_content() {
        let layout = FlowLayout::new()
            .with_content_margins(ContentMargins::new(4.0, 2.0, 4.0, 2.0))
            .with_spacing(5.0, 5.0);
        let sizes = [Size::new(30.0, 20.0); 2];
        let geometry = layout.compute(&sizes, 100.0);

        assert_eq!(geometry.frames[0].origin, tagflow_core::Point::new(4.0, 2.0));
        assert_eq!(geometry.frames[1].origin.x, 39.0);
        assert_eq!(geometry.content_size.height, 24.0);
    }
}
