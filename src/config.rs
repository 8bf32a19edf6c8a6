//! Configuration for the editor and the export pipeline.

use crate::geometry::{PageDimensions, PageSize};
use serde::{Deserialize, Serialize};

/// Name of the composed PDF written by [`crate::session::DocumentSession::write_export`].
pub const DEFAULT_EXPORT_FILE_NAME: &str = "document-with-elements.pdf";

/// Editor and export configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Canvas size given to freshly inserted pages before they are rendered.
    pub default_page_dimensions: PageDimensions,

    /// PDF size of blank pages added to the backing document.
    pub default_pdf_page_size: PageSize,

    /// Pixels per PDF point used when rendering pages onto the canvas.
    pub render_scale: f32,

    /// File name of the export artifact.
    pub export_file_name: String,

    /// Compress content streams on save.
    pub compress: bool,

    /// Offset (pixels, both axes) applied to copied fillable fields.
    pub copy_offset: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            default_page_dimensions: PageDimensions::DEFAULT,
            default_pdf_page_size: PageSize::LETTER,
            render_scale: 1.0,
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
            compress: true,
            copy_offset: 20.0,
        }
    }

    /// Set the canvas size of new blank pages.
    pub fn with_default_page_dimensions(mut self, dimensions: PageDimensions) -> Self {
        self.default_page_dimensions = dimensions;
        self
    }

    /// Set the PDF size of new blank pages.
    pub fn with_default_pdf_page_size(mut self, size: PageSize) -> Self {
        self.default_pdf_page_size = size;
        self
    }

    /// Set the render scale (pixels per point).
    pub fn with_render_scale(mut self, scale: f32) -> Self {
        self.render_scale = scale;
        self
    }

    /// Set the export file name.
    pub fn with_export_file_name(mut self, name: impl Into<String>) -> Self {
        self.export_file_name = name.into();
        self
    }

    /// Enable or disable stream compression on save.
    pub fn with_compress(mut self, enable: bool) -> Self {
        self.compress = enable;
        self
    }

    /// Set the copy offset for duplicated fillables.
    pub fn with_copy_offset(mut self, offset: f32) -> Self {
        self.copy_offset = offset;
        self
    }

    /// Render scale, falling back to 1.0 when unusable.
    pub fn effective_render_scale(&self) -> f32 {
        if self.render_scale.is_finite() && self.render_scale > 0.0 {
            self.render_scale
        } else {
            1.0
        }
    }
}
