//! Block elements: stacked vertically per page, ordered by `order`.

use serde::{Deserialize, Serialize};

/// Default stack height of a newly created block, in canvas pixels.
pub const DEFAULT_BLOCK_HEIGHT: f32 = 100.0;

/// Default heading font size, in canvas pixels.
pub const DEFAULT_HEADING_FONT_SIZE: f32 = 24.0;

fn default_heading_font_size() -> f32 {
    DEFAULT_HEADING_FONT_SIZE
}

fn default_table_rows() -> u32 {
    2
}

fn default_table_columns() -> u32 {
    2
}

/// Optional box-model styling shared by all blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxStyle {
    /// Outer spacing (pixels)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<f32>,
    /// Inner spacing (pixels)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<f32>,
    /// CSS hex background color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

/// Stack placement of a block: its height and its position in the page's order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockLayout {
    /// Explicit, user-resizable height (pixels)
    pub height: f32,
    /// Position in the page's stack; dense and zero-based at rest
    pub order: u32,
    /// Box-model styling
    #[serde(flatten)]
    pub style: BoxStyle,
}

impl Default for BlockLayout {
    fn default() -> Self {
        Self {
            height: DEFAULT_BLOCK_HEIGHT,
            order: 0,
            style: BoxStyle::default(),
        }
    }
}

/// Heading text block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingBlock {
    /// Stack placement
    #[serde(flatten)]
    pub layout: BlockLayout,
    /// Heading text
    #[serde(default)]
    pub content: String,
    /// Font size (pixels)
    #[serde(default = "default_heading_font_size")]
    pub font_size: f32,
}

impl Default for HeadingBlock {
    fn default() -> Self {
        Self {
            layout: BlockLayout::default(),
            content: "Heading".to_string(),
            font_size: DEFAULT_HEADING_FONT_SIZE,
        }
    }
}

/// Image block. `image_data` is a base64 data URL; `image_url` a remote reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageBlock {
    /// Stack placement
    #[serde(flatten)]
    pub layout: BlockLayout,
    /// Inline image payload (`data:image/png;base64,...`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
    /// Remote image location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Embedded video block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoBlock {
    /// Stack placement
    #[serde(flatten)]
    pub layout: BlockLayout,
    /// Video location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

/// Table block with a fixed grid of text cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableBlock {
    /// Stack placement
    #[serde(flatten)]
    pub layout: BlockLayout,
    /// Number of rows
    #[serde(default = "default_table_rows")]
    pub rows: u32,
    /// Number of columns
    #[serde(default = "default_table_columns")]
    pub columns: u32,
    /// Cell text, row-major; may be shorter than the grid
    #[serde(default)]
    pub data: Vec<Vec<String>>,
}

impl Default for TableBlock {
    fn default() -> Self {
        Self {
            layout: BlockLayout::default(),
            rows: default_table_rows(),
            columns: default_table_columns(),
            data: Vec::new(),
        }
    }
}

impl TableBlock {
    /// Text of a cell, empty when the data grid is shorter than the table.
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.data
            .get(row)
            .and_then(|r| r.get(column))
            .map(String::as_str)
            .unwrap_or("")
    }
}
