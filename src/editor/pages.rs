//! Page lifecycle: insert, delete and reorder pages.
//!
//! Three structures move together on every page operation: the `page` of each
//! element, the keys of the dimension map and the current page. All three are
//! rewritten through one [`PageRemap`], so they can never disagree about where
//! a page went.

use super::state::EditorStore;
use crate::error::{Error, Result};
use crate::geometry::PageDimensions;
use std::collections::BTreeMap;

/// A renumbering of 1-based page numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRemap {
    /// `count` pages inserted after page `after` (0 inserts at the front)
    Insert {
        /// Page the new pages follow
        after: u32,
        /// Number of new pages
        count: u32,
    },
    /// Page `page` removed
    Delete {
        /// Removed page
        page: u32,
    },
    /// Page `from` taken out and reinserted so that it ends up at `to`
    Move {
        /// Original position
        from: u32,
        /// Final position
        to: u32,
    },
}

impl PageRemap {
    /// New number of `page`, or `None` when the page no longer exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagecraft::editor::PageRemap;
    ///
    /// let remap = PageRemap::Move { from: 1, to: 3 };
    /// assert_eq!(remap.apply(1), Some(3));
    /// assert_eq!(remap.apply(2), Some(1));
    /// assert_eq!(remap.apply(3), Some(2));
    /// assert_eq!(remap.apply(4), Some(4));
    ///
    /// assert_eq!(PageRemap::Delete { page: 2 }.apply(2), None);
    /// ```
    pub fn apply(&self, page: u32) -> Option<u32> {
        match *self {
            PageRemap::Insert { after, count } => {
                Some(if page > after { page + count } else { page })
            },
            PageRemap::Delete { page: removed } => match page.cmp(&removed) {
                std::cmp::Ordering::Equal => None,
                std::cmp::Ordering::Greater => Some(page - 1),
                std::cmp::Ordering::Less => Some(page),
            },
            PageRemap::Move { from, to } => Some(if page == from {
                to
            } else if from < to && page > from && page <= to {
                page - 1
            } else if to < from && page >= to && page < from {
                page + 1
            } else {
                page
            }),
        }
    }
}

impl EditorStore {
    /// Insert a blank page after page `after` (0 inserts before page 1).
    ///
    /// The new page gets the default canvas size and becomes current.
    /// Returns `false` when `after` is past the last page.
    pub fn insert_blank_page_after(&mut self, after: u32) -> bool {
        self.insert_pages_after(after, 1)
    }

    /// Insert `count` pages after page `after` in a single renumbering pass.
    ///
    /// The new pages get the default canvas size until real sizes are known;
    /// see [`rebuild_page_dimensions`](Self::rebuild_page_dimensions).
    pub fn insert_pages_after(&mut self, after: u32, count: u32) -> bool {
        if count == 0 {
            return false;
        }
        if after > self.total_pages {
            log::debug!(
                "Ignoring insert after page {} (document has {} pages)",
                after,
                self.total_pages
            );
            return false;
        }

        self.apply_remap(PageRemap::Insert { after, count });
        self.total_pages += count;
        let default_dims = self.config.default_page_dimensions;
        for page in after + 1..=after + count {
            self.page_dimensions.insert(page, default_dims);
        }
        self.current_page = after + 1;

        log::info!(
            "Inserted {} page(s) after page {}; document now has {} pages",
            count,
            after,
            self.total_pages
        );
        true
    }

    /// Replace the whole dimension map from an authoritative per-page list.
    ///
    /// Entry `i` becomes page `i + 1`. Missing or invalid entries fall back to
    /// the default size; entries past the last page are ignored.
    pub fn rebuild_page_dimensions<I>(&mut self, dimensions: I)
    where
        I: IntoIterator<Item = PageDimensions>,
    {
        let default_dims = self.config.default_page_dimensions;
        let mut provided = dimensions.into_iter();
        let mut rebuilt = BTreeMap::new();

        for page in 1..=self.total_pages {
            let dims = match provided.next() {
                Some(dims) if dims.is_valid() => dims,
                Some(dims) => {
                    log::warn!("Invalid dimensions {:?} for page {}; using default", dims, page);
                    default_dims
                },
                None => {
                    log::warn!("No dimensions for page {}; using default", page);
                    default_dims
                },
            };
            rebuilt.insert(page, dims);
        }
        if provided.next().is_some() {
            log::warn!("Ignoring dimensions past page {}", self.total_pages);
        }

        self.page_dimensions = rebuilt;
    }

    /// Delete page `page` and every element on it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LastPage`] when the document has a single page; the
    /// state is untouched in that case. Deleting a page that does not exist is
    /// a no-op returning `Ok(false)`.
    pub fn delete_page(&mut self, page: u32) -> Result<bool> {
        if self.total_pages <= 1 {
            return Err(Error::LastPage);
        }
        if !self.contains_page(page) {
            log::debug!(
                "Ignoring delete of page {} (document has {} pages)",
                page,
                self.total_pages
            );
            return Ok(false);
        }

        let destroyed = self.elements.iter().filter(|e| e.page == page).count();
        self.apply_remap(PageRemap::Delete { page });
        self.total_pages -= 1;
        self.current_page = self.current_page.min(self.total_pages);

        log::info!(
            "Deleted page {} with {} element(s); document now has {} pages",
            page,
            destroyed,
            self.total_pages
        );
        Ok(true)
    }

    /// Move the page at 0-based `source_index` to `destination_index`.
    ///
    /// Out-of-range indices and moves onto the same position are no-ops.
    pub fn reorder_page(&mut self, source_index: usize, destination_index: usize) -> bool {
        let total = self.total_pages as usize;
        if source_index >= total || destination_index >= total {
            log::debug!(
                "Ignoring page move {} -> {} (document has {} pages)",
                source_index,
                destination_index,
                total
            );
            return false;
        }
        if source_index == destination_index {
            return false;
        }

        let from = source_index as u32 + 1;
        let to = destination_index as u32 + 1;
        self.apply_remap(PageRemap::Move { from, to });
        log::info!("Moved page {} to position {}", from, to);
        true
    }

    /// Rewrite element pages, dimension keys and the current page.
    ///
    /// Elements and dimension records whose page disappears are dropped, along
    /// with any selection pointing at a dropped element. A current page that
    /// disappears stays where it is and is clamped by the caller.
    fn apply_remap(&mut self, remap: PageRemap) {
        let mut destroyed = Vec::new();
        self.elements.retain_mut(|element| match remap.apply(element.page) {
            Some(page) => {
                element.page = page;
                true
            },
            None => {
                destroyed.push(element.id.clone());
                false
            },
        });
        if !destroyed.is_empty() {
            self.clear_selection_of(|id| destroyed.contains(id));
        }

        self.page_dimensions = std::mem::take(&mut self.page_dimensions)
            .into_iter()
            .filter_map(|(page, dims)| remap.apply(page).map(|page| (page, dims)))
            .collect();

        if let Some(page) = remap.apply(self.current_page) {
            self.current_page = page;
        }
        self.refresh_selection();
        log::debug!("Applied page remap {:?}", remap);
    }
}
