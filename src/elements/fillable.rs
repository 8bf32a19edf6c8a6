//! Fillable elements: freely positioned form fields.

use serde::{Deserialize, Serialize};

/// Default font size of text-bearing fields, in canvas pixels.
pub const DEFAULT_FIELD_FONT_SIZE: f32 = 16.0;

fn default_field_font_size() -> f32 {
    DEFAULT_FIELD_FONT_SIZE
}

/// Position and size of a fillable element, in pixels from the page's top-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Frame {
    /// Create a frame.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The frame as a canvas-space rectangle.
    pub fn rect(&self) -> crate::geometry::Rect {
        crate::geometry::Rect::new(self.x, self.y, self.width, self.height)
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new(50.0, 50.0, 200.0, 40.0)
    }
}

/// Horizontal text alignment within a field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Flush left
    #[default]
    Left,
    /// Centered
    Center,
    /// Flush right
    Right,
}

/// Free text field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextField {
    /// Position and size
    #[serde(flatten)]
    pub frame: Frame,
    /// Entered text; may span several lines
    #[serde(default)]
    pub content: String,
    /// Hint shown while empty (never exported)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Whether the signer must fill it
    #[serde(default)]
    pub required: bool,
    /// Font size (pixels)
    #[serde(default = "default_field_font_size")]
    pub font_size: f32,
    /// Bold face
    #[serde(default)]
    pub bold: bool,
    /// Italic face
    #[serde(default)]
    pub italic: bool,
    /// Underline rule under each line
    #[serde(default)]
    pub underline: bool,
    /// Horizontal alignment
    #[serde(default)]
    pub text_align: TextAlign,
    /// CSS hex text color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Default for TextField {
    fn default() -> Self {
        Self {
            frame: Frame::default(),
            content: String::new(),
            placeholder: None,
            required: false,
            font_size: DEFAULT_FIELD_FONT_SIZE,
            bold: false,
            italic: false,
            underline: false,
            text_align: TextAlign::Left,
            color: None,
        }
    }
}

/// Signature field; `value` holds the drawn signature as an image data URL.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureField {
    /// Position and size
    #[serde(flatten)]
    pub frame: Frame,
    /// Signature image (`data:image/png;base64,...`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Whether the signer must fill it
    #[serde(default)]
    pub required: bool,
    /// Hint shown while empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

/// Date field; `value` is an ISO `YYYY-MM-DD` date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateField {
    /// Position and size
    #[serde(flatten)]
    pub frame: Frame,
    /// Selected date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Display format such as `MM/DD/YYYY`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,
    /// Whether the signer must fill it
    #[serde(default)]
    pub required: bool,
    /// Hint shown while empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Font size (pixels)
    #[serde(default = "default_field_font_size")]
    pub font_size: f32,
}

impl Default for DateField {
    fn default() -> Self {
        Self {
            frame: Frame::default(),
            value: None,
            date_format: None,
            required: false,
            placeholder: None,
            font_size: DEFAULT_FIELD_FONT_SIZE,
        }
    }
}

/// Initials field: typed initials in `content`, or a drawn image in `value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitialsField {
    /// Position and size
    #[serde(flatten)]
    pub frame: Frame,
    /// Typed initials
    #[serde(default)]
    pub content: String,
    /// Drawn initials (`data:image/png;base64,...`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Whether the signer must fill it
    #[serde(default)]
    pub required: bool,
    /// Hint shown while empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Font size (pixels)
    #[serde(default = "default_field_font_size")]
    pub font_size: f32,
}

impl Default for InitialsField {
    fn default() -> Self {
        Self {
            frame: Frame::new(50.0, 50.0, 80.0, 40.0),
            content: String::new(),
            value: None,
            required: false,
            placeholder: None,
            font_size: DEFAULT_FIELD_FONT_SIZE,
        }
    }
}

/// Checkbox field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckboxField {
    /// Position and size
    #[serde(flatten)]
    pub frame: Frame,
    /// Checked state
    #[serde(default)]
    pub checked: bool,
    /// Whether the signer must tick it
    #[serde(default)]
    pub required: bool,
}

impl Default for CheckboxField {
    fn default() -> Self {
        Self {
            frame: Frame::new(50.0, 50.0, 20.0, 20.0),
            checked: false,
            required: false,
        }
    }
}
