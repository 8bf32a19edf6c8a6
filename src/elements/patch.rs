//! Partial updates from the property panel.

use super::{CanvasElement, ElementId, ElementKind, TextAlign};
use serde::{Deserialize, Serialize};

/// A partial update addressed to one element.
///
/// Every field is independently optional. Fields that have no meaning for the
/// target element's type (for example `checked` on a heading) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementPatch {
    /// Target element
    pub id: ElementId,
    /// Owning page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Fillable left edge
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    /// Fillable top edge
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    /// Fillable width
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    /// Height (blocks and fillables)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    /// Block stack order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
    /// Text content (heading, text field, initials)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Font size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    /// Bold face
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    /// Italic face
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    /// Underline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    /// Text alignment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    /// Text color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Field value (signature / initials image, date)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Checkbox state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    /// Required flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// Placeholder hint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Date display format
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,
    /// Inline image payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
    /// Remote image location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Video location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    /// Table rows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,
    /// Table columns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<u32>,
    /// Table cell text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Vec<String>>>,
    /// Block margin
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<f32>,
    /// Block padding
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<f32>,
    /// Block background color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

fn set<T>(slot: &mut T, value: &Option<T>)
where
    T: Clone,
{
    if let Some(v) = value {
        *slot = v.clone();
    }
}

fn set_opt<T>(slot: &mut Option<T>, value: &Option<T>)
where
    T: Clone,
{
    if let Some(v) = value {
        *slot = Some(v.clone());
    }
}

impl ElementPatch {
    /// Create an empty patch for an element.
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Patch the position of a fillable.
    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    /// Patch the size (width applies to fillables only).
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Patch the text content.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Move the element to another page.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Move a block to another position in its page's stack.
    pub fn with_order(mut self, order: u32) -> Self {
        self.order = Some(order);
        self
    }

    /// Merge the patch into an element. The `id` is never changed.
    pub fn apply_to(&self, element: &mut CanvasElement) {
        set(&mut element.page, &self.page);

        if let Some(layout) = element.block_layout_mut() {
            set(&mut layout.height, &self.height);
            set(&mut layout.order, &self.order);
            set_opt(&mut layout.style.margin, &self.margin);
            set_opt(&mut layout.style.padding, &self.padding);
            set_opt(&mut layout.style.background_color, &self.background_color);
        }
        if let Some(frame) = element.frame_mut() {
            set(&mut frame.x, &self.x);
            set(&mut frame.y, &self.y);
            set(&mut frame.width, &self.width);
            set(&mut frame.height, &self.height);
        }

        match &mut element.kind {
            ElementKind::Heading(h) => {
                set(&mut h.content, &self.content);
                set(&mut h.font_size, &self.font_size);
            },
            ElementKind::Image(i) => {
                set_opt(&mut i.image_data, &self.image_data);
                set_opt(&mut i.image_url, &self.image_url);
            },
            ElementKind::Video(v) => {
                set_opt(&mut v.video_url, &self.video_url);
            },
            ElementKind::Table(t) => {
                set(&mut t.rows, &self.rows);
                set(&mut t.columns, &self.columns);
                set(&mut t.data, &self.data);
            },
            ElementKind::TextField(f) => {
                set(&mut f.content, &self.content);
                set_opt(&mut f.placeholder, &self.placeholder);
                set(&mut f.required, &self.required);
                set(&mut f.font_size, &self.font_size);
                set(&mut f.bold, &self.bold);
                set(&mut f.italic, &self.italic);
                set(&mut f.underline, &self.underline);
                set(&mut f.text_align, &self.text_align);
                set_opt(&mut f.color, &self.color);
            },
            ElementKind::Signature(f) => {
                set_opt(&mut f.value, &self.value);
                set(&mut f.required, &self.required);
                set_opt(&mut f.placeholder, &self.placeholder);
            },
            ElementKind::Date(f) => {
                set_opt(&mut f.value, &self.value);
                set_opt(&mut f.date_format, &self.date_format);
                set(&mut f.required, &self.required);
                set_opt(&mut f.placeholder, &self.placeholder);
                set(&mut f.font_size, &self.font_size);
            },
            ElementKind::Initials(f) => {
                set(&mut f.content, &self.content);
                set_opt(&mut f.value, &self.value);
                set(&mut f.required, &self.required);
                set_opt(&mut f.placeholder, &self.placeholder);
                set(&mut f.font_size, &self.font_size);
            },
            ElementKind::Checkbox(f) => {
                set(&mut f.checked, &self.checked);
                set(&mut f.required, &self.required);
            },
        }
    }
}
