//! Composition of canvas elements onto the PDF.
//!
//! Export walks the store once per page. For each page it builds a
//! [`PageTransform`] from the canvas size recorded for that page and the PDF
//! page size reported by the backend, then draws:
//!
//! 1. blocks, stacked top to bottom in `order` (each spanning the canvas width);
//! 2. fillables, in insertion order, at their own frames.
//!
//! Problems with a single element never abort the export. They are recorded
//! as an [`ExportWarning`] in the [`ExportReport`], logged, and the element is
//! skipped or replaced by a placeholder.

mod draw;
mod image;
mod transform;

pub use self::image::{decode_data_url, is_data_url, ColorSpace, EmbeddedImage, ImageError, ImageFormat};
pub use self::transform::{PageTransform, Placement};

use std::collections::BTreeMap;

use crate::backend::PdfBackend;
use crate::editor::EditorStore;
use crate::elements::{CanvasElement, ElementId};
use crate::geometry::Rect;
use crate::layout::layout_blocks;
use self::draw::{PagePainter, Painted};

/// Why an element was skipped or degraded during export.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExportWarning {
    /// Element references a page the PDF does not have
    #[error("element {id}: page {page} is outside the document ({page_count} pages)")]
    PageOutOfRange {
        /// Element
        id: ElementId,
        /// Its page
        page: u32,
        /// Pages in the PDF
        page_count: usize,
    },

    /// No canvas size was recorded for the element's page
    #[error("element {id}: no canvas dimensions for page {page}")]
    MissingDimensions {
        /// Element
        id: ElementId,
        /// Its page
        page: u32,
    },

    /// Canvas or PDF page size cannot produce a transform
    #[error("element {id}: unusable page size on page {page}")]
    InvalidDimensions {
        /// Element
        id: ElementId,
        /// Its page
        page: u32,
    },

    /// Element box lies entirely off the page
    #[error("element {id}: box lies outside page {page}")]
    OutOfBounds {
        /// Element
        id: ElementId,
        /// Its page
        page: u32,
    },

    /// A placeholder was drawn instead of the real content
    #[error("element {id}: drew placeholder ({reason})")]
    Fallback {
        /// Element
        id: ElementId,
        /// Why the content could not be drawn
        reason: String,
    },

    /// The backend failed while drawing the element
    #[error("element {id}: draw failed ({reason})")]
    DrawFailed {
        /// Element
        id: ElementId,
        /// Backend error
        reason: String,
    },
}

impl ExportWarning {
    /// The element the warning is about.
    pub fn element_id(&self) -> &ElementId {
        match self {
            ExportWarning::PageOutOfRange { id, .. }
            | ExportWarning::MissingDimensions { id, .. }
            | ExportWarning::InvalidDimensions { id, .. }
            | ExportWarning::OutOfBounds { id, .. }
            | ExportWarning::Fallback { id, .. }
            | ExportWarning::DrawFailed { id, .. } => id,
        }
    }
}

/// Summary of one export pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportReport {
    /// Elements drawn with their real content
    pub drawn: usize,
    /// Elements with nothing to draw (empty values)
    pub empty: usize,
    /// Skipped or degraded elements
    pub warnings: Vec<ExportWarning>,
}

impl ExportReport {
    fn warn(&mut self, warning: ExportWarning) {
        log::warn!("Export: {}", warning);
        self.warnings.push(warning);
    }

    /// True when every element was drawn as-is.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Draw every element of `store` onto `backend`.
///
/// The backend's pages must correspond 1:1 to the store's pages. Elements
/// are grouped by page; each page is visited once.
pub fn export_elements(store: &EditorStore, backend: &mut dyn PdfBackend) -> ExportReport {
    let mut report = ExportReport::default();
    let page_count = backend.page_count();

    let mut by_page: BTreeMap<u32, Vec<&CanvasElement>> = BTreeMap::new();
    for element in store.elements() {
        by_page.entry(element.page).or_default().push(element);
    }

    for (page, elements) in by_page {
        if page == 0 || page as usize > page_count {
            for element in elements {
                report.warn(ExportWarning::PageOutOfRange {
                    id: element.id.clone(),
                    page,
                    page_count,
                });
            }
            continue;
        }
        export_page(store, backend, page, &elements, &mut report);
    }

    log::info!(
        "Exported {} elements ({} empty, {} warnings)",
        report.drawn,
        report.empty,
        report.warnings.len()
    );
    report
}

fn export_page(
    store: &EditorStore,
    backend: &mut dyn PdfBackend,
    page: u32,
    elements: &[&CanvasElement],
    report: &mut ExportReport,
) {
    let Some(canvas) = store.page_dimensions(page) else {
        for element in elements {
            report.warn(ExportWarning::MissingDimensions {
                id: element.id.clone(),
                page,
            });
        }
        return;
    };
    let index = (page - 1) as usize;
    let transform = backend
        .page_size(index)
        .ok()
        .and_then(|size| PageTransform::new(canvas, size));
    let Some(transform) = transform else {
        for element in elements {
            report.warn(ExportWarning::InvalidDimensions {
                id: element.id.clone(),
                page,
            });
        }
        return;
    };

    let mut blocks: Vec<&CanvasElement> = elements.iter().copied().filter(|e| e.is_block()).collect();
    blocks.sort_by_key(|e| e.order().unwrap_or(0));
    let canvas_width = canvas.page_width;
    let block_boxes = layout_blocks(&blocks)
        .into_iter()
        .map(|slot| (slot.element, Rect::new(0.0, slot.y_offset, canvas_width, slot.height)));
    let field_boxes = elements
        .iter()
        .copied()
        .filter_map(|e| e.frame().map(|frame| (e, frame.rect())));

    let mut painter = PagePainter::new(backend, index, transform);
    for (element, canvas_box) in block_boxes.chain(field_boxes) {
        let area = match transform.place(canvas_box) {
            Placement::Visible(area) => area,
            Placement::OutOfBounds => {
                report.warn(ExportWarning::OutOfBounds {
                    id: element.id.clone(),
                    page,
                });
                continue;
            },
        };
        match painter.paint(element, area) {
            Ok(Painted::Drawn) => report.drawn += 1,
            Ok(Painted::Empty) => report.empty += 1,
            Ok(Painted::Fallback(reason)) => report.warn(ExportWarning::Fallback {
                id: element.id.clone(),
                reason,
            }),
            Err(e) => report.warn(ExportWarning::DrawFailed {
                id: element.id.clone(),
                reason: e.to_string(),
            }),
        }
    }
    log::debug!("Exported page {} ({} elements)", page, elements.len());
}
