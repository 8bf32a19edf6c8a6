//! Editor intents as a closed command type.

use super::state::{EditorStore, OrderPlacement};
use crate::elements::{CanvasElement, ElementId, ElementPatch};
use crate::error::Result;
use crate::geometry::PageDimensions;
use serde::{Deserialize, Serialize};

/// Every mutation the editor UI can request.
///
/// Commands are applied in dispatch order, one state transition each;
/// `UpdateMultipleElements` is the only batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Command {
    /// Add an element
    AddElement {
        /// The new element
        element: CanvasElement,
        /// Order handling for blocks
        #[serde(default)]
        placement: OrderPlacement,
    },
    /// Patch one element
    UpdateElement {
        /// Fields to change
        patch: ElementPatch,
    },
    /// Remove one element
    DeleteElement {
        /// Target
        id: ElementId,
    },
    /// Replace several elements atomically
    UpdateMultipleElements {
        /// Full replacements, keyed by id
        elements: Vec<CanvasElement>,
    },
    /// Duplicate an element
    CopyElement {
        /// Source element
        id: ElementId,
    },
    /// Select (or deselect) an element
    SetActiveElement {
        /// Element to select, `None` to clear
        id: Option<ElementId>,
    },
    /// Switch pages
    SetCurrentPage {
        /// 1-based page
        page: u32,
    },
    /// Record a rendered page size
    SetPageDimensions {
        /// 1-based page
        page: u32,
        /// Canvas size in pixels
        dimensions: PageDimensions,
    },
    /// Insert a blank page
    InsertBlankPageAfter {
        /// Page the new page follows (0 for the front)
        after: u32,
    },
    /// Insert several pages in one pass
    InsertPagesAfter {
        /// Page the new pages follow
        after: u32,
        /// Number of pages
        count: u32,
    },
    /// Delete a page and its elements
    DeletePage {
        /// 1-based page
        page: u32,
    },
    /// Move a page
    ReorderPage {
        /// 0-based source position
        source_index: usize,
        /// 0-based destination position
        destination_index: usize,
    },
    /// Swap a block with the one above
    MoveBlockUp {
        /// Page of the block
        page: u32,
        /// Current order of the block
        order: u32,
    },
    /// Swap a block with the one below
    MoveBlockDown {
        /// Page of the block
        page: u32,
        /// Current order of the block
        order: u32,
    },
    /// Drag a block to another stack position
    ReorderBlocks {
        /// Page of the blocks
        page: u32,
        /// 0-based source position in the stack
        source_index: usize,
        /// 0-based destination position in the stack
        destination_index: usize,
    },
}

impl Command {
    /// True for commands that add, remove or move pages.
    pub fn is_page_lifecycle(&self) -> bool {
        matches!(
            self,
            Command::InsertBlankPageAfter { .. }
                | Command::InsertPagesAfter { .. }
                | Command::DeletePage { .. }
                | Command::ReorderPage { .. }
        )
    }
}

impl EditorStore {
    /// Apply one command.
    ///
    /// # Errors
    ///
    /// Only `DeletePage` on a single-page document fails; every other command
    /// is total and ignores unknown ids or out-of-range positions.
    pub fn dispatch(&mut self, command: Command) -> Result<()> {
        log::debug!("Dispatching {:?}", command);
        match command {
            Command::AddElement { element, placement } => {
                self.add_element(element, placement);
            },
            Command::UpdateElement { patch } => {
                self.update_element(&patch);
            },
            Command::DeleteElement { id } => {
                self.delete_element(&id);
            },
            Command::UpdateMultipleElements { elements } => {
                self.update_multiple_elements(elements);
            },
            Command::CopyElement { id } => {
                self.copy_element(&id);
            },
            Command::SetActiveElement { id } => self.set_active_element(id),
            Command::SetCurrentPage { page } => self.set_current_page(page),
            Command::SetPageDimensions { page, dimensions } => {
                self.set_page_dimensions(page, dimensions);
            },
            Command::InsertBlankPageAfter { after } => {
                self.insert_blank_page_after(after);
            },
            Command::InsertPagesAfter { after, count } => {
                self.insert_pages_after(after, count);
            },
            Command::DeletePage { page } => {
                self.delete_page(page)?;
            },
            Command::ReorderPage {
                source_index,
                destination_index,
            } => {
                self.reorder_page(source_index, destination_index);
            },
            Command::MoveBlockUp { page, order } => {
                self.move_block_up(page, order);
            },
            Command::MoveBlockDown { page, order } => {
                self.move_block_down(page, order);
            },
            Command::ReorderBlocks {
                page,
                source_index,
                destination_index,
            } => {
                self.reorder_blocks(page, source_index, destination_index);
            },
        }
        Ok(())
    }
}
