//! PDF manipulation behind a trait.
//!
//! The editor never touches PDF objects directly. Page lifecycle operations
//! and the export pipeline talk to a [`PdfBackend`]; [`LopdfBackend`] is the
//! implementation shipped with the crate.
//!
//! Backend page indices are **0-based**; the editor's page numbers are
//! 1-based. Callers convert at the boundary.

mod lopdf_backend;

pub use lopdf_backend::LopdfBackend;

use crate::error::Result;
use crate::export::EmbeddedImage;
use crate::fonts::StandardFont;
use crate::geometry::{PageSize, Point, Rect};
use crate::layout::Color;

/// A single line of text placed at a baseline origin (PDF space).
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    /// Text to draw
    pub text: String,
    /// Baseline start x
    pub x: f32,
    /// Baseline y
    pub y: f32,
    /// Font face
    pub font: StandardFont,
    /// Size in points
    pub size: f32,
    /// Fill color
    pub color: Color,
}

/// Stroke settings for a line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    /// Stroke color
    pub color: Color,
    /// Width in points
    pub width: f32,
}

/// Fill and stroke settings for a rectangle. `None` skips that paint.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RectStyle {
    /// Interior color
    pub fill: Option<Color>,
    /// Border color
    pub stroke: Option<Color>,
    /// Border width in points
    pub line_width: f32,
}

impl RectStyle {
    /// Fill only.
    pub fn filled(color: Color) -> Self {
        Self {
            fill: Some(color),
            stroke: None,
            line_width: 0.0,
        }
    }

    /// Border only.
    pub fn stroked(color: Color, line_width: f32) -> Self {
        Self {
            fill: None,
            stroke: Some(color),
            line_width,
        }
    }

    /// Filled with a border.
    pub fn boxed(fill: Color, stroke: Color, line_width: f32) -> Self {
        Self {
            fill: Some(fill),
            stroke: Some(stroke),
            line_width,
        }
    }
}

/// PDF operations the editor and the export pipeline rely on.
pub trait PdfBackend {
    /// Number of pages.
    fn page_count(&self) -> usize;

    /// Size of the page at `index` in points.
    fn page_size(&self, index: usize) -> Result<PageSize>;

    /// Append a blank page.
    fn add_page(&mut self, size: PageSize) -> Result<()>;

    /// Insert a blank page so that it ends up at `index` (`0..=page_count`).
    fn insert_page(&mut self, index: usize, size: PageSize) -> Result<()>;

    /// Remove the page at `index`.
    fn remove_page(&mut self, index: usize) -> Result<()>;

    /// Move the page at `from` so that it ends up at `to`.
    fn move_page(&mut self, from: usize, to: usize) -> Result<()>;

    /// Copy pages of another PDF into this one, starting at position `at`.
    ///
    /// `indices` selects source pages (0-based, in the given order); `None`
    /// copies all of them. Returns the number of pages inserted.
    fn copy_pages_from(&mut self, source: &[u8], indices: Option<&[usize]>, at: usize) -> Result<usize>;

    /// Draw one line of text.
    fn draw_text(&mut self, page: usize, run: &TextRun) -> Result<()>;

    /// Draw an image scaled into `rect`.
    fn draw_image(&mut self, page: usize, image: &EmbeddedImage, rect: Rect) -> Result<()>;

    /// Draw a straight line.
    fn draw_line(&mut self, page: usize, from: Point, to: Point, style: &LineStyle) -> Result<()>;

    /// Draw a rectangle.
    fn draw_rectangle(&mut self, page: usize, rect: Rect, style: &RectStyle) -> Result<()>;

    /// Serialize the document.
    fn save(&mut self) -> Result<Vec<u8>>;

    /// Parse a document.
    fn load(bytes: &[u8]) -> Result<Self>
    where
        Self: Sized;

    /// An independent copy of the current document.
    fn duplicate(&mut self) -> Result<Self>
    where
        Self: Sized,
    {
        let bytes = self.save()?;
        Self::load(&bytes)
    }
}
