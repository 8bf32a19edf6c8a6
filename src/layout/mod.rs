//! Colors and the vertical-stack layout used by block elements.
//!
//! Block elements (headings, images, videos, tables) are not positioned by
//! coordinates. Each page stacks its blocks top to bottom in `order`, every
//! block spanning the full page width and occupying exactly its own height.

use crate::elements::CanvasElement;

/// RGB color representation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel (0.0 - 1.0)
    pub r: f32,
    /// Green channel (0.0 - 1.0)
    pub g: f32,
    /// Blue channel (0.0 - 1.0)
    pub b: f32,
}

impl Color {
    /// Create a new color.
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create a black color.
    pub fn black() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Create a white color.
    pub fn white() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }

    /// Create a gray color.
    pub fn gray(level: f32) -> Self {
        Self::new(level, level, level)
    }

    /// Parse a CSS hex color (`#rrggbb`, `rrggbb` or `#rgb`).
    ///
    /// Returns `None` for anything else, including named colors.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagecraft::layout::Color;
    ///
    /// assert_eq!(Color::from_hex("#ff0000"), Some(Color::new(1.0, 0.0, 0.0)));
    /// assert_eq!(Color::from_hex("#000"), Some(Color::black()));
    /// assert_eq!(Color::from_hex("tomato"), None);
    /// ```
    pub fn from_hex(value: &str) -> Option<Self> {
        let hex = value.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok().map(|v| v as f32 / 255.0);
        match hex.len() {
            6 => Some(Self::new(channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
            3 => {
                let expand = |i: usize| {
                    let c = &hex[i..i + 1];
                    channel(&format!("{c}{c}"))
                };
                Some(Self::new(expand(0)?, expand(1)?, expand(2)?))
            },
            _ => None,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

/// A block placed in the vertical stack of its page.
#[derive(Debug, Clone, Copy)]
pub struct BlockSlot<'a> {
    /// The block element
    pub element: &'a CanvasElement,
    /// Distance from the top of the page to the top of the block (canvas pixels)
    pub y_offset: f32,
    /// Height the block occupies in the stack (canvas pixels)
    pub height: f32,
}

/// Stack ordered blocks top to bottom.
///
/// Each block occupies `[y, y + height)` and the next one starts where it
/// ends. Input is expected in `order` sequence; fillable elements are skipped
/// and negative or non-finite heights count as zero.
pub fn layout_blocks<'a>(ordered_blocks: &[&'a CanvasElement]) -> Vec<BlockSlot<'a>> {
    let mut running_y = 0.0f32;
    let mut slots = Vec::with_capacity(ordered_blocks.len());

    for &element in ordered_blocks {
        let Some(layout) = element.block_layout() else {
            continue;
        };
        let height = if layout.height.is_finite() { layout.height.max(0.0) } else { 0.0 };
        slots.push(BlockSlot {
            element,
            y_offset: running_y,
            height,
        });
        running_y += height;
    }

    slots
}
