//! An open document: the editor store and the PDF it describes.
//!
//! [`DocumentSession`] keeps an [`EditorStore`] and a [`PdfBackend`] in
//! lockstep. Page lifecycle operations are applied to the backend first and
//! reach the store only if the backend succeeded, so a failure never leaves
//! the two disagreeing about the page list.

use std::fs;
use std::path::{Path, PathBuf};

use crate::backend::PdfBackend;
use crate::config::EditorConfig;
use crate::editor::{Command, EditorSnapshot, EditorStore};
use crate::error::{Error, Result};
use crate::export::{export_elements, ExportReport};
use crate::geometry::PageDimensions;
use crate::render::{PageRasterizer, RasterPage, RenderTicket, RenderTracker};

/// Result of an export.
#[derive(Debug, Clone)]
pub struct ExportOutput {
    /// The composed PDF
    pub bytes: Vec<u8>,
    /// Per-element outcome
    pub report: ExportReport,
}

/// A document being edited.
pub struct DocumentSession<B: PdfBackend> {
    store: EditorStore,
    backend: B,
    renders: RenderTracker,
    is_loading: bool,
}

impl<B: PdfBackend> DocumentSession<B> {
    /// Start editing `backend`'s document.
    ///
    /// An empty document gets one blank page. Canvas dimensions start at the
    /// PDF page sizes times the configured render scale.
    pub fn new(mut backend: B, config: EditorConfig) -> Result<Self> {
        if backend.page_count() == 0 {
            backend.add_page(config.default_pdf_page_size)?;
        }
        let store = EditorStore::with_pages(config, backend.page_count() as u32);
        let mut session = Self {
            store,
            backend,
            renders: RenderTracker::new(),
            is_loading: false,
        };
        session.regenerate_page_dimensions();
        Ok(session)
    }

    /// Parse `bytes` with the backend and start editing it.
    pub fn open(bytes: &[u8], config: EditorConfig) -> Result<Self> {
        check_header(bytes)?;
        Self::new(B::load(bytes)?, config)
    }

    /// Resume from a saved editor state.
    ///
    /// # Errors
    ///
    /// [`Error::PageCountMismatch`] when the state and the document disagree
    /// on the number of pages.
    pub fn from_snapshot(backend: B, snapshot: EditorSnapshot, config: EditorConfig) -> Result<Self> {
        let store = EditorStore::from_snapshot(snapshot, config);
        if store.total_pages() as usize != backend.page_count() {
            return Err(Error::PageCountMismatch {
                state: store.total_pages() as usize,
                document: backend.page_count(),
            });
        }
        Ok(Self {
            store,
            backend,
            renders: RenderTracker::new(),
            is_loading: false,
        })
    }

    /// The editor state.
    pub fn store(&self) -> &EditorStore {
        &self.store
    }

    /// The working document.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Session configuration.
    pub fn config(&self) -> &EditorConfig {
        self.store.config()
    }

    /// True while an upload or document replacement is in progress.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Apply a command, routing page lifecycle changes through the backend.
    pub fn apply(&mut self, command: Command) -> Result<()> {
        match command {
            Command::InsertBlankPageAfter { after } => {
                self.insert_blank_page_after(after)?;
            },
            Command::InsertPagesAfter { after, count } => {
                self.insert_blank_pages_after(after, count)?;
            },
            Command::DeletePage { page } => {
                self.delete_page(page)?;
            },
            Command::ReorderPage {
                source_index,
                destination_index,
            } => {
                self.reorder_page(source_index, destination_index)?;
            },
            other => self.store.dispatch(other)?,
        }
        Ok(())
    }

    /// Insert a blank page after `after` (0 for the front).
    ///
    /// Returns `Ok(false)` when `after` is past the last page.
    pub fn insert_blank_page_after(&mut self, after: u32) -> Result<bool> {
        self.insert_blank_pages_after(after, 1)
    }

    fn insert_blank_pages_after(&mut self, after: u32, count: u32) -> Result<bool> {
        if count == 0 || after > self.store.total_pages() {
            return Ok(false);
        }
        let size = self.config().default_pdf_page_size;
        for i in 0..count {
            if let Err(e) = self.backend.insert_page((after + i) as usize, size) {
                self.remove_inserted_pages(after, i);
                return Err(e);
            }
        }
        self.store.insert_pages_after(after, count);
        self.renders.invalidate_all();
        log::info!("Inserted {} blank page(s) after page {}", count, after);
        Ok(true)
    }

    /// Undo the first `inserted` pages of a failed multi-page insert.
    fn remove_inserted_pages(&mut self, after: u32, inserted: u32) {
        for _ in 0..inserted {
            if let Err(e) = self.backend.remove_page(after as usize) {
                log::error!("Failed to roll back inserted page after page {}: {}", after, e);
                return;
            }
        }
    }

    /// Delete page `page` and its elements.
    ///
    /// # Errors
    ///
    /// [`Error::LastPage`] when the document has a single page; nothing is
    /// changed in that case.
    pub fn delete_page(&mut self, page: u32) -> Result<bool> {
        if self.store.total_pages() <= 1 {
            return Err(Error::LastPage);
        }
        if !self.store.contains_page(page) {
            return Ok(false);
        }
        self.backend.remove_page((page - 1) as usize)?;
        let deleted = self.store.delete_page(page)?;
        self.renders.invalidate_all();
        log::info!("Deleted page {}", page);
        Ok(deleted)
    }

    /// Move the page at 0-based `source_index` to `destination_index`.
    pub fn reorder_page(&mut self, source_index: usize, destination_index: usize) -> Result<bool> {
        let total = self.store.total_pages() as usize;
        if source_index >= total || destination_index >= total || source_index == destination_index {
            return Ok(false);
        }
        self.backend.move_page(source_index, destination_index)?;
        let moved = self.store.reorder_page(source_index, destination_index);
        self.renders.invalidate_all();
        log::info!("Moved page {} to position {}", source_index + 1, destination_index + 1);
        Ok(moved)
    }

    /// Copy every page of the PDF in `bytes` in after page `after`.
    ///
    /// Existing elements on later pages shift down by the number of inserted
    /// pages, and the whole dimension map is regenerated from the backend's
    /// page sizes. Returns the number of pages inserted.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidHeader`] when `bytes` is not a PDF, or any backend
    /// failure. The session is unchanged on error.
    pub fn upload_and_insert_pages_after(&mut self, after: u32, bytes: &[u8]) -> Result<usize> {
        self.is_loading = true;
        let result = self.insert_uploaded_pages(after, bytes);
        self.is_loading = false;
        if let Err(e) = &result {
            log::warn!("Upload rejected: {}", e);
        }
        result
    }

    fn insert_uploaded_pages(&mut self, after: u32, bytes: &[u8]) -> Result<usize> {
        let total = self.store.total_pages();
        if after > total {
            return Err(Error::PageOutOfRange {
                page: after as usize,
                count: total as usize,
            });
        }
        check_header(bytes)?;

        let inserted = self.backend.copy_pages_from(bytes, None, after as usize)?;
        if inserted == 0 {
            return Ok(0);
        }
        self.store.insert_pages_after(after, inserted as u32);
        self.regenerate_page_dimensions();
        self.renders.invalidate_all();
        log::info!("Inserted {} uploaded page(s) after page {}", inserted, after);
        Ok(inserted)
    }

    /// Replace the whole document; all elements are discarded.
    pub fn replace_document(&mut self, bytes: &[u8]) -> Result<()> {
        self.is_loading = true;
        let result = check_header(bytes).and_then(|()| B::load(bytes));
        self.is_loading = false;

        let backend = result?;
        if backend.page_count() == 0 {
            return Err(Error::Unsupported("document has no pages".to_string()));
        }
        self.store = EditorStore::with_pages(self.store.config().clone(), backend.page_count() as u32);
        self.backend = backend;
        self.regenerate_page_dimensions();
        self.renders.invalidate_all();
        log::info!("Replaced document ({} pages)", self.store.total_pages());
        Ok(())
    }

    /// Compose every element onto a copy of the document.
    ///
    /// The working document is left untouched.
    pub fn export(&mut self) -> Result<ExportOutput> {
        let mut composed = self.backend.duplicate()?;
        let report = export_elements(&self.store, &mut composed);
        let bytes = composed.save()?;
        Ok(ExportOutput { bytes, report })
    }

    /// Export into `dir` under the configured file name.
    pub fn write_export(&mut self, dir: &Path) -> Result<(PathBuf, ExportReport)> {
        let output = self.export()?;
        let path = dir.join(&self.config().export_file_name);
        fs::write(&path, &output.bytes)?;
        log::info!("Wrote {} ({} bytes)", path.display(), output.bytes.len());
        Ok((path, output.report))
    }

    /// Start rendering `page`; `None` if the page does not exist.
    pub fn begin_render(&mut self, page: u32) -> Option<RenderTicket> {
        self.store
            .contains_page(page)
            .then(|| self.renders.begin(page))
    }

    /// Accept a finished render if it is still current, recording the
    /// rendered size as the page's canvas dimensions.
    pub fn complete_render(&mut self, ticket: RenderTicket, raster: &RasterPage) -> bool {
        if !self.renders.complete(ticket) {
            return false;
        }
        self.store.set_page_dimensions(ticket.page, raster.dimensions())
    }

    /// Render `page` and record its dimensions.
    ///
    /// Returns `None` when the render was superseded before it finished.
    pub fn render_page(&mut self, rasterizer: &dyn PageRasterizer, page: u32) -> Result<Option<RasterPage>> {
        let Some(ticket) = self.begin_render(page) else {
            return Err(Error::PageOutOfRange {
                page: page as usize,
                count: self.store.total_pages() as usize,
            });
        };
        let bytes = self.backend.save()?;
        let raster = rasterizer.render_page(&bytes, page, self.config().effective_render_scale())?;
        Ok(self.complete_render(ticket, &raster).then_some(raster))
    }

    /// Rebuild the dimension map from the backend's page sizes.
    fn regenerate_page_dimensions(&mut self) {
        let scale = self.config().effective_render_scale();
        let fallback = self.config().default_page_dimensions;
        let dimensions: Vec<PageDimensions> = (0..self.backend.page_count())
            .map(|i| {
                self.backend
                    .page_size(i)
                    .map(|size| size.to_pixels(scale))
                    .unwrap_or(fallback)
            })
            .collect();
        self.store.rebuild_page_dimensions(dimensions);
    }
}

fn check_header(bytes: &[u8]) -> Result<()> {
    if bytes.starts_with(b"%PDF-") {
        return Ok(());
    }
    let found = String::from_utf8_lossy(&bytes[..bytes.len().min(5)]).into_owned();
    Err(Error::InvalidHeader(found))
}
