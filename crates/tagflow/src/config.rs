//! Configuration for the tag field.
//!
//! A [`Configuration`] is an immutable bundle of appearance, geometry and
//! behaviour settings. It is handed to the controller at construction and can
//! only be replaced wholesale; nothing reads it through a global.
//!
//! Appearance values (colors, fonts, radii, input hints) are pass-through data
//! for the rendering layer. The engine itself only reads the geometry, the
//! advance flags, the tag limit and the validation.
//!
//! # Loading from TOML
//!
//! Every field is optional and falls back to its default:
//!
//! ```
//! use tagflow::config::{Configuration, TagLimit};
//!
//! let config = Configuration::from_toml_str(
//!     r##"
//!     cell_height = 24
//!     advance_on_return = false
//!     tag_limit = { exactly = 5 }
//!
//!     [styles.view]
//!     background = "#2452a0"
//!
//!     [validation]
//!     kind = "all"
//!     rules = [{ kind = "email_address" }, { kind = "max_length", max = 64 }]
//!     "##,
//! )
//! .unwrap();
//!
//! assert_eq!(config.cell_height, 24.0);
//! assert_eq!(config.tag_limit, TagLimit::Exactly(5));
//! assert!(config.is_valid("a@b.com"));
//! ```

use serde::Deserialize;
use tagflow_core::{Color, ContentMargins};

use crate::error::TagResult;
use crate::widget::layout::FlowLayout;
use crate::widget::validator::{Validation, evaluate};
use crate::widget::widgets::TagMode;

/// Font weight hint for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    Light,
    #[default]
    Regular,
    Medium,
    Bold,
}

/// Font description handed to the renderer and to text measurement.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FontSpec {
    /// Font family. `None` means the platform's system font.
    pub family: Option<String>,
    /// Point size.
    pub size: f32,
    pub weight: FontWeight,
}

impl FontSpec {
    /// The system font at the given size and weight.
    pub fn system(size: f32, weight: FontWeight) -> Self {
        Self {
            family: None,
            size,
            weight,
        }
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::system(12.0, FontWeight::Medium)
    }
}

/// Appearance of a chip in one [`TagMode`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ModeStyle {
    pub background: Color,
    pub text_color: Color,
    pub font: FontSpec,
    pub corner_radius: f32,
}

impl Default for ModeStyle {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            text_color: Color::BLACK,
            font: FontSpec::default(),
            corner_radius: 8.0,
        }
    }
}

/// One [`ModeStyle`] per chip mode.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ModeStyles {
    pub view: ModeStyle,
    pub edit: ModeStyle,
    pub invalid: ModeStyle,
}

impl ModeStyles {
    /// The style for `mode`.
    pub fn get(&self, mode: TagMode) -> &ModeStyle {
        match mode {
            TagMode::View => &self.view,
            TagMode::Edit => &self.edit,
            TagMode::Invalid => &self.invalid,
        }
    }
}

impl Default for ModeStyles {
    fn default() -> Self {
        Self {
            view: ModeStyle {
                background: Color::BLUE,
                text_color: Color::WHITE,
                ..ModeStyle::default()
            },
            edit: ModeStyle::default(),
            invalid: ModeStyle {
                background: Color::RED,
                text_color: Color::WHITE,
                ..ModeStyle::default()
            },
        }
    }
}

/// Text shown while the field holds no tags.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlaceholderStyle {
    pub text: String,
    pub font: FontSpec,
    pub color: Color,
}

impl Default for PlaceholderStyle {
    fn default() -> Self {
        Self {
            text: "Add tags...".to_string(),
            font: FontSpec::system(12.0, FontWeight::Light),
            color: Color::GRAY,
        }
    }
}

/// Maximum number of tags the field accepts.
///
/// In TOML this is either `"unlimited"` or `{ exactly = n }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagLimit {
    #[default]
    Unlimited,
    Exactly(usize),
}

impl TagLimit {
    /// The limit as a number, if there is one.
    pub fn max(self) -> Option<usize> {
        match self {
            TagLimit::Unlimited => None,
            TagLimit::Exactly(n) => Some(n),
        }
    }

    /// Whether `len` tags fill the limit.
    pub fn is_reached(self, len: usize) -> bool {
        self.max().is_some_and(|max| len >= max)
    }
}

/// Keyboard layout hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyboardKind {
    #[default]
    Default,
    Ascii,
    EmailAddress,
    Url,
}

/// Label of the return key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnKeyKind {
    Default,
    #[default]
    Done,
    Next,
    Go,
}

/// Automatic capitalization hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Autocapitalization {
    #[default]
    None,
    Words,
    Sentences,
    AllCharacters,
}

/// Text input hints for the platform text field. Not interpreted here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct InputHints {
    pub keyboard: KeyboardKind,
    pub return_key: ReturnKeyKind,
    pub autocapitalization: Autocapitalization,
    pub autocorrection: bool,
}

/// All settings for one tag field.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Chip appearance per mode.
    pub styles: ModeStyles,
    /// Placeholder text and appearance.
    pub placeholder: PlaceholderStyle,
    /// Height of every chip.
    pub cell_height: f32,
    /// Insets around the chip grid.
    pub insets: ContentMargins,
    /// Horizontal gap between chips in a row.
    pub interitem_spacing: f32,
    /// Vertical gap between rows.
    pub line_spacing: f32,
    /// Typing a space finishes the current chip.
    pub advance_on_whitespace: bool,
    /// Pressing return finishes the current chip. When unset, return only
    /// dismisses the keyboard.
    pub advance_on_return: bool,
    pub tag_limit: TagLimit,
    pub input_hints: InputHints,
    /// Predicate a finished tag must satisfy. `None` accepts everything.
    pub validation: Option<Validation>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            styles: ModeStyles::default(),
            placeholder: PlaceholderStyle::default(),
            cell_height: 20.0,
            insets: ContentMargins::new(4.0, 2.0, 4.0, 2.0),
            interitem_spacing: 5.0,
            line_spacing: 5.0,
            advance_on_whitespace: true,
            advance_on_return: true,
            tag_limit: TagLimit::Unlimited,
            input_hints: InputHints::default(),
            validation: Some(Validation::non_empty()),
        }
    }
}

impl Configuration {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from TOML. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> TagResult<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn with_styles(mut self, styles: ModeStyles) -> Self {
        self.styles = styles;
        self
    }

    pub fn with_mode_style(mut self, mode: TagMode, style: ModeStyle) -> Self {
        match mode {
            TagMode::View => self.styles.view = style,
            TagMode::Edit => self.styles.edit = style,
            TagMode::Invalid => self.styles.invalid = style,
        }
        self
    }

    pub fn with_placeholder(mut self, placeholder: PlaceholderStyle) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn with_placeholder_text(mut self, text: impl Into<String>) -> Self {
        self.placeholder.text = text.into();
        self
    }

    pub fn with_cell_height(mut self, height: f32) -> Self {
        self.cell_height = height;
        self
    }

    pub fn with_insets(mut self, insets: ContentMargins) -> Self {
        self.insets = insets;
        self
    }

    /// Set the gap between chips in a row and between rows.
    pub fn with_spacing(mut self, interitem: f32, line: f32) -> Self {
        self.interitem_spacing = interitem;
        self.line_spacing = line;
        self
    }

    pub fn with_advance_on_whitespace(mut self, enabled: bool) -> Self {
        self.advance_on_whitespace = enabled;
        self
    }

    pub fn with_advance_on_return(mut self, enabled: bool) -> Self {
        self.advance_on_return = enabled;
        self
    }

    pub fn with_tag_limit(mut self, limit: TagLimit) -> Self {
        self.tag_limit = limit;
        self
    }

    pub fn with_input_hints(mut self, hints: InputHints) -> Self {
        self.input_hints = hints;
        self
    }

    pub fn with_validation(mut self, validation: Validation) -> Self {
        self.validation = Some(validation);
        self
    }

    /// Accept every tag text.
    pub fn without_validation(mut self) -> Self {
        self.validation = None;
        self
    }

    /// Evaluate the configured validation against `text`.
    #[inline]
    pub fn is_valid(&self, text: &str) -> bool {
        evaluate(text, self.validation.as_ref())
    }

    /// Smallest height the field reports: one row of chips plus insets.
    pub fn min_height(&self) -> f32 {
        self.cell_height + self.insets.top + self.insets.bottom
    }

    /// Widest a chip may be at the given field width.
    pub fn max_chip_width(&self, field_width: f32) -> f32 {
        (field_width - self.insets.left - self.insets.right).max(0.0)
    }

    /// A flow layout using these insets and spacings.
    pub fn flow_layout(&self) -> FlowLayout {
        FlowLayout::new()
            .with_content_margins(self.insets)
            .with_spacing(self.interitem_spacing, self.line_spacing)
    }
}
