//! Page rasterization for the editor canvas.
//!
//! Rasterizing is delegated to a [`PageRasterizer`]. Renders may finish out
//! of order, so every request takes a [`RenderTicket`] from a
//! [`RenderTracker`] and only the newest ticket for a page is accepted.

use std::collections::HashMap;

use crate::error::Result;
use crate::geometry::PageDimensions;

/// A rendered page bitmap.
#[derive(Debug, Clone)]
pub struct RasterPage {
    /// RGBA pixels
    pub image: image::RgbaImage,
    /// Width in pixels
    pub width_px: u32,
    /// Height in pixels
    pub height_px: u32,
}

impl RasterPage {
    /// Wrap a bitmap, taking the pixel size from it.
    pub fn new(image: image::RgbaImage) -> Self {
        let (width_px, height_px) = image.dimensions();
        Self {
            image,
            width_px,
            height_px,
        }
    }

    /// Canvas size for the page this bitmap was rendered from.
    pub fn dimensions(&self) -> PageDimensions {
        PageDimensions::new(self.width_px as f32, self.height_px as f32)
    }
}

/// Renders a page of a PDF to a bitmap.
pub trait PageRasterizer {
    /// Render 1-based `page_number` of `document` at `scale` pixels per point.
    fn render_page(&self, document: &[u8], page_number: u32, scale: f32) -> Result<RasterPage>;
}

/// Identifies one render request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderTicket {
    /// 1-based page
    pub page: u32,
    /// Request counter, unique per tracker
    pub generation: u64,
}

/// Tracks the newest outstanding render per page.
#[derive(Debug, Default)]
pub struct RenderTracker {
    next_generation: u64,
    latest: HashMap<u32, u64>,
}

impl RenderTracker {
    /// A tracker with no outstanding renders.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a render of `page`, superseding any earlier request for it.
    pub fn begin(&mut self, page: u32) -> RenderTicket {
        self.next_generation += 1;
        self.latest.insert(page, self.next_generation);
        RenderTicket {
            page,
            generation: self.next_generation,
        }
    }

    /// Finish a render. Returns `true` if its result should be used.
    ///
    /// A ticket is accepted at most once, and only if no newer request for
    /// the same page was started and the tracker was not invalidated since.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagecraft::render::RenderTracker;
    ///
    /// let mut tracker = RenderTracker::new();
    /// let first = tracker.begin(1);
    /// let second = tracker.begin(1);
    /// assert!(!tracker.complete(first));
    /// assert!(tracker.complete(second));
    /// ```
    pub fn complete(&mut self, ticket: RenderTicket) -> bool {
        match self.latest.get(&ticket.page) {
            Some(&generation) if generation == ticket.generation => {
                self.latest.remove(&ticket.page);
                true
            },
            _ => {
                log::debug!(
                    "Discarding stale render of page {} (generation {})",
                    ticket.page,
                    ticket.generation
                );
                false
            },
        }
    }

    /// True while a request for `page` is outstanding.
    pub fn is_pending(&self, page: u32) -> bool {
        self.latest.contains_key(&page)
    }

    /// Drop every outstanding request, e.g. after pages were renumbered.
    pub fn invalidate_all(&mut self) {
        self.latest.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_ticket_wins() {
        let mut tracker = RenderTracker::new();
        let old = tracker.begin(2);
        let new = tracker.begin(2);
        assert!(tracker.is_pending(2));
        assert!(tracker.complete(new));
        assert!(!tracker.complete(old));
        assert!(!tracker.is_pending(2));
    }

    #[test]
    fn test_ticket_accepted_once() {
        let mut tracker = RenderTracker::new();
        let ticket = tracker.begin(1);
        assert!(tracker.complete(ticket));
        assert!(!tracker.complete(ticket));
    }

    #[test]
    fn test_pages_are_independent() {
        let mut tracker = RenderTracker::new();
        let a = tracker.begin(1);
        let b = tracker.begin(2);
        assert!(tracker.complete(b));
        assert!(tracker.complete(a));
    }

    #[test]
    fn test_invalidate_all() {
        let mut tracker = RenderTracker::new();
        let ticket = tracker.begin(1);
        tracker.invalidate_all();
        assert!(!tracker.complete(ticket));
    }

    #[test]
    fn test_raster_page_dimensions() {
        let page = RasterPage::new(image::RgbaImage::new(612, 792));
        assert_eq!(page.dimensions(), PageDimensions::new(612.0, 792.0));
    }
}
