//! Per-type drawing of elements onto one PDF page.

use chrono::NaiveDate;

use super::image::{is_data_url, EmbeddedImage};
use super::transform::PageTransform;
use crate::backend::{LineStyle, PdfBackend, RectStyle, TextRun};
use crate::elements::{
    CanvasElement, CheckboxField, DateField, ElementKind, HeadingBlock, ImageBlock, InitialsField,
    SignatureField, TableBlock, TextAlign, TextField, VideoBlock,
};
use crate::error::Result;
use crate::fonts::StandardFont;
use crate::geometry::{Point, Rect};
use crate::layout::Color;

/// Underline offset below the baseline, in points.
const UNDERLINE_OFFSET: f32 = 2.0;
/// Caption and table text size before scaling.
const CAPTION_FONT_SIZE: f32 = 12.0;
/// Horizontal inset of table cell text before scaling.
const CELL_TEXT_INSET: f32 = 4.0;
/// Most table cells drawn along one axis; the rest of a larger grid is dropped.
const MAX_TABLE_CELLS_PER_AXIS: usize = 64;

/// Outcome of drawing one element.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Painted {
    /// Something was drawn
    Drawn,
    /// Nothing to draw (empty value)
    Empty,
    /// A placeholder was drawn in place of the real content
    Fallback(String),
}

/// Draws elements on one page through a backend.
pub(super) struct PagePainter<'a> {
    backend: &'a mut dyn PdfBackend,
    page: usize,
    transform: PageTransform,
}

impl<'a> PagePainter<'a> {
    pub(super) fn new(backend: &'a mut dyn PdfBackend, page: usize, transform: PageTransform) -> Self {
        Self {
            backend,
            page,
            transform,
        }
    }

    /// Draw `element` into `area`, a clamped PDF-space box.
    pub(super) fn paint(&mut self, element: &CanvasElement, area: Rect) -> Result<Painted> {
        match &element.kind {
            ElementKind::TextField(field) => self.text_field(field, area),
            ElementKind::Signature(field) => self.signature(field, area),
            ElementKind::Date(field) => self.date(field, area),
            ElementKind::Initials(field) => self.initials(field, area),
            ElementKind::Checkbox(field) => self.checkbox(field, area),
            ElementKind::Heading(block) => self.heading(block, area),
            ElementKind::Image(block) => self.image_block(block, area),
            ElementKind::Video(block) => self.video(block, area),
            ElementKind::Table(block) => self.table(block, area),
        }
    }

    fn scaled(&self, size: f32) -> f32 {
        size * self.transform.font_scale()
    }

    fn text_field(&mut self, field: &TextField, area: Rect) -> Result<Painted> {
        if field.content.is_empty() {
            return Ok(Painted::Empty);
        }
        let font = StandardFont::select(field.bold, field.italic);
        let size = self.scaled(field.font_size);
        let color = field
            .color
            .as_deref()
            .and_then(Color::from_hex)
            .unwrap_or_default();

        let lines: Vec<&str> = field.content.split('\n').collect();
        let count = lines.len();
        for (i, line) in lines.into_iter().enumerate() {
            let line = line.trim_end_matches('\r');
            let width = font.text_width(line, size);
            let x = match field.text_align {
                TextAlign::Left => area.x,
                TextAlign::Center => area.x + (area.width - width) / 2.0,
                TextAlign::Right => area.right() - width,
            };
            let baseline = area.y + (count - 1 - i) as f32 * size;
            self.text(line, x, baseline, font, size, color)?;

            if field.underline && !line.is_empty() {
                let y = baseline - UNDERLINE_OFFSET;
                let style = LineStyle {
                    color,
                    width: (size / 16.0).max(0.5),
                };
                self.backend
                    .draw_line(self.page, Point::new(x, y), Point::new(x + width, y), &style)?;
            }
        }
        Ok(Painted::Drawn)
    }

    fn signature(&mut self, field: &SignatureField, area: Rect) -> Result<Painted> {
        match field.value.as_deref().filter(|v| !v.is_empty()) {
            Some(value) => self.image_or_placeholder(value, area),
            None => Ok(Painted::Empty),
        }
    }

    fn date(&mut self, field: &DateField, area: Rect) -> Result<Painted> {
        let Some(value) = field.value.as_deref().filter(|v| !v.trim().is_empty()) else {
            return Ok(Painted::Empty);
        };
        let text = format_date(value, field.date_format.as_deref());
        let font = StandardFont::Helvetica;
        let size = self.scaled(field.font_size);
        let baseline = centered_baseline(area, font, size);
        self.text(&text, area.x, baseline, font, size, Color::black())?;
        Ok(Painted::Drawn)
    }

    fn initials(&mut self, field: &InitialsField, area: Rect) -> Result<Painted> {
        let payload = field
            .value
            .as_deref()
            .filter(|v| is_data_url(v))
            .or_else(|| Some(field.content.as_str()).filter(|c| is_data_url(c)));
        if let Some(url) = payload {
            return self.image_or_placeholder(url, area);
        }

        let text = if field.content.trim().is_empty() {
            field.value.as_deref().unwrap_or_default()
        } else {
            field.content.as_str()
        };
        if text.trim().is_empty() {
            return Ok(Painted::Empty);
        }
        let font = StandardFont::Helvetica;
        let size = self.scaled(field.font_size);
        let x = area.x + (area.width - font.text_width(text, size)) / 2.0;
        self.text(text, x, centered_baseline(area, font, size), font, size, Color::black())?;
        Ok(Painted::Drawn)
    }

    fn checkbox(&mut self, field: &CheckboxField, area: Rect) -> Result<Painted> {
        let border = self.scaled(1.0);
        self.backend.draw_rectangle(
            self.page,
            area,
            &RectStyle::boxed(Color::white(), Color::black(), border),
        )?;
        if field.checked {
            let at = |fx: f32, fy: f32| Point::new(area.x + fx * area.width, area.y + fy * area.height);
            let style = LineStyle {
                color: Color::black(),
                width: self.scaled(2.0),
            };
            self.backend.draw_line(self.page, at(0.2, 0.5), at(0.4, 0.25), &style)?;
            self.backend.draw_line(self.page, at(0.4, 0.25), at(0.8, 0.75), &style)?;
        }
        Ok(Painted::Drawn)
    }

    fn heading(&mut self, block: &HeadingBlock, area: Rect) -> Result<Painted> {
        let content = self.block_box(&block.layout.style, area)?;
        let font = StandardFont::HelveticaBold;
        let size = self.scaled(block.font_size);
        let mut baseline = content.bottom() - font.ascent(size);
        for line in block.content.lines() {
            self.text(line, content.x, baseline, font, size, Color::black())?;
            baseline -= size;
        }
        Ok(Painted::Drawn)
    }

    fn image_block(&mut self, block: &ImageBlock, area: Rect) -> Result<Painted> {
        let content = self.block_box(&block.layout.style, area)?;
        if let Some(data) = block.image_data.as_deref().filter(|d| !d.is_empty()) {
            return self.image_or_placeholder(data, content);
        }
        self.placeholder(content)?;
        match block.image_url.as_deref().filter(|u| !u.is_empty()) {
            Some(url) => Ok(Painted::Fallback(format!("remote image not embedded: {}", url))),
            None => Ok(Painted::Drawn),
        }
    }

    fn video(&mut self, block: &VideoBlock, area: Rect) -> Result<Painted> {
        let content = self.block_box(&block.layout.style, area)?;
        self.placeholder(content)?;
        let caption = match block.video_url.as_deref().filter(|u| !u.is_empty()) {
            Some(url) => format!("Video: {}", url),
            None => "Video".to_string(),
        };
        let font = StandardFont::Helvetica;
        let size = self.scaled(CAPTION_FONT_SIZE);
        let x = (content.x + (content.width - font.text_width(&caption, size)) / 2.0).max(content.x);
        let baseline = centered_baseline(content, font, size);
        self.text(&caption, x, baseline, font, size, Color::gray(0.3))?;
        Ok(Painted::Drawn)
    }

    fn table(&mut self, block: &TableBlock, area: Rect) -> Result<Painted> {
        let content = self.block_box(&block.layout.style, area)?;
        if block.rows == 0 || block.columns == 0 || !content.has_area() {
            return Ok(Painted::Empty);
        }
        let rows = grid_span(block.rows, content.height);
        let columns = grid_span(block.columns, content.width);
        let cell_width = content.width / columns as f32;
        let cell_height = content.height / rows as f32;
        let grid = RectStyle::stroked(Color::gray(0.6), self.scaled(0.5));
        let font = StandardFont::Helvetica;
        let size = self.scaled(CAPTION_FONT_SIZE).min(cell_height * 0.6);
        let inset = self.scaled(CELL_TEXT_INSET);

        for row in 0..rows {
            let y = content.bottom() - (row + 1) as f32 * cell_height;
            for column in 0..columns {
                let cell = Rect::new(content.x + column as f32 * cell_width, y, cell_width, cell_height);
                self.backend.draw_rectangle(self.page, cell, &grid)?;
                let text = block.cell(row, column);
                if !text.is_empty() {
                    let baseline = centered_baseline(cell, font, size);
                    self.text(text, cell.x + inset, baseline, font, size, Color::black())?;
                }
            }
        }
        Ok(Painted::Drawn)
    }

    /// Apply margin, background and padding; returns the content box.
    fn block_box(&mut self, style: &crate::elements::BoxStyle, area: Rect) -> Result<Rect> {
        let outer = area.inset(self.scaled(style.margin.unwrap_or(0.0)));
        if let Some(color) = style.background_color.as_deref().and_then(Color::from_hex) {
            if outer.has_area() {
                self.backend
                    .draw_rectangle(self.page, outer, &RectStyle::filled(color))?;
            }
        }
        Ok(outer.inset(self.scaled(style.padding.unwrap_or(0.0))))
    }

    /// Draw a data-URL image contained in `area`, or a placeholder when it
    /// cannot be decoded.
    fn image_or_placeholder(&mut self, url: &str, area: Rect) -> Result<Painted> {
        match EmbeddedImage::from_data_url(url) {
            Ok(image) => {
                let target = image.fit_contain(area);
                self.backend.draw_image(self.page, &image, target)?;
                Ok(Painted::Drawn)
            },
            Err(e) => {
                self.placeholder(area)?;
                Ok(Painted::Fallback(e.to_string()))
            },
        }
    }

    fn placeholder(&mut self, area: Rect) -> Result<()> {
        if !area.has_area() {
            return Ok(());
        }
        let style = RectStyle::boxed(Color::gray(0.9), Color::gray(0.6), self.scaled(1.0));
        self.backend.draw_rectangle(self.page, area, &style)
    }

    fn text(&mut self, text: &str, x: f32, y: f32, font: StandardFont, size: f32, color: Color) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        let run = TextRun {
            text: text.to_string(),
            x,
            y,
            font,
            size,
            color,
        };
        self.backend.draw_text(self.page, &run)
    }
}

/// Baseline that vertically centres one line of `font` at `size` in `area`.
fn centered_baseline(area: Rect, font: StandardFont, size: f32) -> f32 {
    let ascent = font.ascent(size);
    let descent = font.descent(size);
    area.y + (area.height - (ascent + descent)) / 2.0 + descent
}

/// Format an ISO `YYYY-MM-DD` value for display.
///
/// Values that do not start with a valid ISO date are returned unchanged.
pub(crate) fn format_date(value: &str, format: Option<&str>) -> String {
    let trimmed = value.trim();
    let Some(date) = trimmed
        .get(..10)
        .and_then(|iso| NaiveDate::parse_from_str(iso, "%Y-%m-%d").ok())
    else {
        return trimmed.to_string();
    };

    let pattern = match format.map(str::trim) {
        Some("DD/MM/YYYY") => "%d/%m/%Y",
        Some("YYYY-MM-DD") => "%Y-%m-%d",
        Some("MMMM D, YYYY") => "%B %-d, %Y",
        _ => "%m/%d/%Y",
    };
    date.format(pattern).to_string()
}

/// Cells to draw along an axis of `extent` points: at most one per point.
fn grid_span(count: u32, extent: f32) -> usize {
    (count as usize)
        .min(extent.max(1.0) as usize)
        .min(MAX_TABLE_CELLS_PER_AXIS)
}
