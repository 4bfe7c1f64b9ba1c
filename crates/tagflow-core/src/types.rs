//! Basic geometry and color types.
//!
//! These are plain value types shared by the layout engine and the
//! configuration. Colors are pass-through data for the renderer; the engine
//! never interprets them.

use std::fmt;

use serde::Deserialize;

/// A point in 2D space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The origin point (0, 0).
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// A size in 2D space (width and height).
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Zero size.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Check if the size has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Compare two sizes with a small tolerance for float noise.
    #[inline]
    pub fn approx_eq(&self, other: &Size) -> bool {
        (self.width - other.width).abs() < 0.01 && (self.height - other.height).abs() < 0.01
    }
}

impl From<(f32, f32)> for Size {
    fn from((width, height): (f32, f32)) -> Self {
        Self { width, height }
    }
}

/// A rectangle defined by origin and size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    /// Create a new rectangle from origin and size.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point { x, y },
            size: Size { width, height },
        }
    }

    /// Empty rectangle at origin.
    pub const ZERO: Self = Self {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    /// Left edge x coordinate.
    #[inline]
    pub fn left(&self) -> f32 {
        self.origin.x
    }

    /// Top edge y coordinate.
    #[inline]
    pub fn top(&self) -> f32 {
        self.origin.y
    }

    /// Right edge x coordinate.
    #[inline]
    pub fn right(&self) -> f32 {
        self.origin.x + self.size.width
    }

    /// Bottom edge y coordinate.
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.height
    }

    /// Width of the rectangle.
    #[inline]
    pub fn width(&self) -> f32 {
        self.size.width
    }

    /// Height of the rectangle.
    #[inline]
    pub fn height(&self) -> f32 {
        self.size.height
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }

    /// Shrink the rectangle by per-side margins.
    #[inline]
    pub fn inset_by(&self, margins: ContentMargins) -> Rect {
        Rect::new(
            self.origin.x + margins.left,
            self.origin.y + margins.top,
            (self.size.width - margins.horizontal()).max(0.0),
            (self.size.height - margins.vertical()).max(0.0),
        )
    }
}

/// Spacing around content (section insets).
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ContentMargins {
    /// Left margin.
    pub left: f32,
    /// Top margin.
    pub top: f32,
    /// Right margin.
    pub right: f32,
    /// Bottom margin.
    pub bottom: f32,
}

impl ContentMargins {
    /// Create new content margins.
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create uniform margins (same value on all sides).
    pub const fn uniform(margin: f32) -> Self {
        Self::new(margin, margin, margin, margin)
    }

    /// Create symmetric margins (same horizontal and vertical).
    pub const fn symmetric(horizontal: f32, vertical: f32) -> Self {
        Self::new(horizontal, vertical, horizontal, vertical)
    }

    /// Total horizontal margin (left + right).
    #[inline]
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Total vertical margin (top + bottom).
    #[inline]
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

/// An RGBA color with straight (non-premultiplied) alpha.
///
/// Deserializes from a hex string such as `"#2451A0"` or `"#2451A0FF"`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Create a new color from RGBA components (0.0-1.0 range).
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from RGB components.
    #[inline]
    pub const fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color from 8-bit RGBA components (0-255 range).
    #[inline]
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// Create an opaque color from 8-bit RGB components.
    #[inline]
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba8(r, g, b, 255)
    }

    /// Create a color from a hex string (e.g., "#FF0000" or "#FF0000FF").
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        let len = hex.len();

        if (len != 6 && len != 8) || !hex.is_ascii() {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        let a = if len == 8 {
            u8::from_str_radix(&hex[6..8], 16).ok()?
        } else {
            255
        };

        Some(Self::from_rgba8(r, g, b, a))
    }

    /// Convert to 8-bit RGBA components.
    pub fn to_rgba8(self) -> [u8; 4] {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [channel(self.r), channel(self.g), channel(self.b), channel(self.a)]
    }

    // Common colors
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Self = Self::from_rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::from_rgb(1.0, 1.0, 1.0);
    pub const RED: Self = Self::from_rgb(1.0, 0.0, 0.0);
    pub const BLUE: Self = Self::from_rgb(0.0, 0.0, 1.0);
    pub const GRAY: Self = Self::from_rgb(0.5, 0.5, 0.5);
    pub const DARK_GRAY: Self = Self::from_rgb(0.25, 0.25, 0.25);
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            write!(f, "#{r:02X}{g:02X}{b:02X}")
        } else {
            write!(f, "#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value).ok_or_else(|| format!("invalid hex color: {value:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(4.0, 2.0, 40.0, 20.0);
        assert_eq!(rect.left(), 4.0);
        assert_eq!(rect.right(), 44.0);
        assert_eq!(rect.bottom(), 22.0);
        assert!(rect.contains(Point::new(10.0, 10.0)));
        assert!(!rect.contains(Point::new(44.0, 10.0)));
    }

    #[test]
    fn test_rect_inset_by_clamps() {
        let rect = Rect::new(0.0, 0.0, 6.0, 100.0);
        let inner = rect.inset_by(ContentMargins::new(4.0, 2.0, 4.0, 2.0));
        assert_eq!(inner.origin, Point::new(4.0, 2.0));
        assert_eq!(inner.width(), 0.0);
        assert_eq!(inner.height(), 96.0);
    }

    #[test]
    fn test_margins_totals() {
        let margins = ContentMargins::new(4.0, 2.0, 6.0, 3.0);
        assert_eq!(margins.horizontal(), 10.0);
        assert_eq!(margins.vertical(), 5.0);
        assert_eq!(ContentMargins::symmetric(1.0, 2.0), ContentMargins::new(1.0, 2.0, 1.0, 2.0));
    }

    #[test]
    fn test_color_hex_round_trip() {
        let color = Color::from_hex("#2451A0").unwrap();
        assert_eq!(color.to_string(), "#2451A0");

        let translucent = Color::from_hex("FF000080").unwrap();
        assert_eq!(translucent.to_string(), "#FF000080");
    }

    #[test]
    fn test_color_hex_rejects_garbage() {
        assert!(Color::from_hex("#12345").is_none());
        assert!(Color::from_hex("#GGGGGG").is_none());
        assert!(Color::from_hex("#ééé").is_none());
    }

    #[test]
    fn test_color_deserializes_from_string() {
        #[derive(Deserialize)]
        struct Wrapper {
            color: Color,
        }

        let parsed: Wrapper = toml::from_str(r##"color = "#FFFFFF""##).unwrap();
        assert_eq!(parsed.color, Color::WHITE);

        let err = toml::from_str::<Wrapper>(r#"color = "white""#);
        assert!(err.is_err());
    }
}
