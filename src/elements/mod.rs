//! Placeable canvas elements.
//!
//! Every element is either a **block** or a **fillable**:
//!
//! - Blocks (`heading`, `image`, `video`, `table`) are stacked vertically on their
//!   page. They have a height and an `order`, never an `(x, y)` position.
//! - Fillables (`text-field`, `signature`, `date`, `initials`, `checkbox`) are
//!   positioned freely with an explicit frame and never take part in ordering.
//!
//! The JSON form matches the editor UI: a flat object with a kebab-case `type`
//! discriminant and camelCase fields.
//!
//! ```
//! use pagecraft::elements::{CanvasElement, ElementType};
//!
//! let json = r#"{"id":"f1","page":2,"type":"text-field",
//!     "x":10,"y":20,"width":150,"height":30,"content":"Jane"}"#;
//! let element: CanvasElement = serde_json::from_str(json).unwrap();
//! assert_eq!(element.element_type(), ElementType::TextField);
//! assert!(element.is_fillable());
//! ```

mod block;
mod fillable;
mod patch;

pub use block::{
    BlockLayout, BoxStyle, HeadingBlock, ImageBlock, TableBlock, VideoBlock, DEFAULT_BLOCK_HEIGHT,
    DEFAULT_HEADING_FONT_SIZE,
};
pub use fillable::{
    CheckboxField, DateField, Frame, InitialsField, SignatureField, TextAlign, TextField,
    DEFAULT_FIELD_FONT_SIZE,
};
pub use patch::ElementPatch;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque element identifier, unique across the whole document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Wrap an existing identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Discriminant of [`ElementKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementType {
    /// Heading block
    Heading,
    /// Image block
    Image,
    /// Video block
    Video,
    /// Table block
    Table,
    /// Free text field
    TextField,
    /// Signature field
    Signature,
    /// Date field
    Date,
    /// Initials field
    Initials,
    /// Checkbox field
    Checkbox,
}

impl ElementType {
    /// Every element type, in declaration order.
    pub const ALL: [ElementType; 9] = [
        ElementType::Heading,
        ElementType::Image,
        ElementType::Video,
        ElementType::Table,
        ElementType::TextField,
        ElementType::Signature,
        ElementType::Date,
        ElementType::Initials,
        ElementType::Checkbox,
    ];

    /// True for types laid out in the vertical block stack.
    pub fn is_block(&self) -> bool {
        match self {
            ElementType::Heading | ElementType::Image | ElementType::Video | ElementType::Table => {
                true
            },
            ElementType::TextField
            | ElementType::Signature
            | ElementType::Date
            | ElementType::Initials
            | ElementType::Checkbox => false,
        }
    }

    /// True for freely positioned form fields.
    pub fn is_fillable(&self) -> bool {
        !self.is_block()
    }

    /// The `type` string used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::Heading => "heading",
            ElementType::Image => "image",
            ElementType::Video => "video",
            ElementType::Table => "table",
            ElementType::TextField => "text-field",
            ElementType::Signature => "signature",
            ElementType::Date => "date",
            ElementType::Initials => "initials",
            ElementType::Checkbox => "checkbox",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type-specific payload of a canvas element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ElementKind {
    /// Heading block
    Heading(HeadingBlock),
    /// Image block
    Image(ImageBlock),
    /// Video block
    Video(VideoBlock),
    /// Table block
    Table(TableBlock),
    /// Free text field
    TextField(TextField),
    /// Signature field
    Signature(SignatureField),
    /// Date field
    Date(DateField),
    /// Initials field
    Initials(InitialsField),
    /// Checkbox field
    Checkbox(CheckboxField),
}

impl ElementKind {
    /// Default payload for a type.
    pub fn default_for(element_type: ElementType) -> Self {
        match element_type {
            ElementType::Heading => ElementKind::Heading(HeadingBlock::default()),
            ElementType::Image => ElementKind::Image(ImageBlock::default()),
            ElementType::Video => ElementKind::Video(VideoBlock::default()),
            ElementType::Table => ElementKind::Table(TableBlock::default()),
            ElementType::TextField => ElementKind::TextField(TextField::default()),
            ElementType::Signature => ElementKind::Signature(SignatureField::default()),
            ElementType::Date => ElementKind::Date(DateField::default()),
            ElementType::Initials => ElementKind::Initials(InitialsField::default()),
            ElementType::Checkbox => ElementKind::Checkbox(CheckboxField::default()),
        }
    }

    /// Discriminant of this payload.
    pub fn element_type(&self) -> ElementType {
        match self {
            ElementKind::Heading(_) => ElementType::Heading,
            ElementKind::Image(_) => ElementType::Image,
            ElementKind::Video(_) => ElementType::Video,
            ElementKind::Table(_) => ElementType::Table,
            ElementKind::TextField(_) => ElementType::TextField,
            ElementKind::Signature(_) => ElementType::Signature,
            ElementKind::Date(_) => ElementType::Date,
            ElementKind::Initials(_) => ElementType::Initials,
            ElementKind::Checkbox(_) => ElementType::Checkbox,
        }
    }
}

/// An element placed on a document page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasElement {
    /// Document-wide unique identifier
    pub id: ElementId,
    /// Owning page (1-based)
    pub page: u32,
    /// Type and payload
    #[serde(flatten)]
    pub kind: ElementKind,
}

impl CanvasElement {
    /// Create an element with an explicit id.
    pub fn new(id: impl Into<String>, page: u32, kind: ElementKind) -> Self {
        Self {
            id: ElementId::new(id),
            page,
            kind,
        }
    }

    /// Create an element of the given type with default payload and a fresh id.
    pub fn with_defaults(element_type: ElementType, page: u32) -> Self {
        Self {
            id: ElementId::generate(),
            page,
            kind: ElementKind::default_for(element_type),
        }
    }

    /// Discriminant of this element.
    pub fn element_type(&self) -> ElementType {
        self.kind.element_type()
    }

    /// True for block elements.
    pub fn is_block(&self) -> bool {
        self.element_type().is_block()
    }

    /// True for fillable elements.
    pub fn is_fillable(&self) -> bool {
        self.element_type().is_fillable()
    }

    /// Stack placement, for blocks.
    pub fn block_layout(&self) -> Option<&BlockLayout> {
        match &self.kind {
            ElementKind::Heading(b) => Some(&b.layout),
            ElementKind::Image(b) => Some(&b.layout),
            ElementKind::Video(b) => Some(&b.layout),
            ElementKind::Table(b) => Some(&b.layout),
            _ => None,
        }
    }

    /// Mutable stack placement, for blocks.
    pub fn block_layout_mut(&mut self) -> Option<&mut BlockLayout> {
        match &mut self.kind {
            ElementKind::Heading(b) => Some(&mut b.layout),
            ElementKind::Image(b) => Some(&mut b.layout),
            ElementKind::Video(b) => Some(&mut b.layout),
            ElementKind::Table(b) => Some(&mut b.layout),
            _ => None,
        }
    }

    /// Position and size, for fillables.
    pub fn frame(&self) -> Option<&Frame> {
        match &self.kind {
            ElementKind::TextField(f) => Some(&f.frame),
            ElementKind::Signature(f) => Some(&f.frame),
            ElementKind::Date(f) => Some(&f.frame),
            ElementKind::Initials(f) => Some(&f.frame),
            ElementKind::Checkbox(f) => Some(&f.frame),
            _ => None,
        }
    }

    /// Mutable position and size, for fillables.
    pub fn frame_mut(&mut self) -> Option<&mut Frame> {
        match &mut self.kind {
            ElementKind::TextField(f) => Some(&mut f.frame),
            ElementKind::Signature(f) => Some(&mut f.frame),
            ElementKind::Date(f) => Some(&mut f.frame),
            ElementKind::Initials(f) => Some(&mut f.frame),
            ElementKind::Checkbox(f) => Some(&mut f.frame),
            _ => None,
        }
    }

    /// Stack order, for blocks.
    pub fn order(&self) -> Option<u32> {
        self.block_layout().map(|l| l.order)
    }

    /// Set the stack order. No effect on fillables.
    pub fn set_order(&mut self, order: u32) {
        if let Some(layout) = self.block_layout_mut() {
            layout.order = order;
        }
    }

    /// Height in pixels, whichever layout the element uses.
    pub fn height(&self) -> f32 {
        match (self.block_layout(), self.frame()) {
            (Some(layout), _) => layout.height,
            (None, Some(frame)) => frame.height,
            (None, None) => 0.0,
        }
    }
}

/// True when the element takes part in the vertical block stack.
pub fn is_block_element(element: &CanvasElement) -> bool {
    element.is_block()
}

/// True when the element is a freely positioned form field.
pub fn is_fillable_element(element: &CanvasElement) -> bool {
    element.is_fillable()
}
