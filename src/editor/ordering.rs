//! Block ordering: the vertical stack of blocks on each page.
//!
//! At rest the blocks of a page carry orders `0..k` with no gaps or
//! duplicates. Single-step moves swap two orders; drag reorders and
//! compaction renumber the whole page. Every change goes through
//! `update_multiple_elements` so a page is never seen half-renumbered.

use super::state::EditorStore;
use crate::elements::{CanvasElement, ElementId};

impl EditorStore {
    /// Blocks on a page, sorted by order (ties keep insertion order).
    pub fn blocks_on_page(&self, page: u32) -> Vec<&CanvasElement> {
        let mut blocks: Vec<&CanvasElement> =
            self.elements.iter().filter(|e| e.page == page && e.is_block()).collect();
        blocks.sort_by_key(|e| e.order().unwrap_or(0));
        blocks
    }

    /// Swap the block at `order` with the one above it.
    ///
    /// Returns `false` when there is no such block or it is already on top.
    pub fn move_block_up(&mut self, page: u32, order: u32) -> bool {
        self.swap_with_neighbour(page, order, Direction::Up)
    }

    /// Swap the block at `order` with the one below it.
    pub fn move_block_down(&mut self, page: u32, order: u32) -> bool {
        self.swap_with_neighbour(page, order, Direction::Down)
    }

    /// Move the block at stack position `source_index` to `destination_index`
    /// and renumber the page densely.
    pub fn reorder_blocks(
        &mut self,
        page: u32,
        source_index: usize,
        destination_index: usize,
    ) -> bool {
        let mut blocks: Vec<CanvasElement> =
            self.blocks_on_page(page).into_iter().cloned().collect();
        if source_index >= blocks.len() || destination_index >= blocks.len() {
            log::debug!(
                "Ignoring block move {} -> {} on page {} ({} blocks)",
                source_index,
                destination_index,
                page,
                blocks.len()
            );
            return false;
        }
        if source_index == destination_index {
            return false;
        }

        let moved = blocks.remove(source_index);
        blocks.insert(destination_index, moved);
        for (index, block) in blocks.iter_mut().enumerate() {
            block.set_order(index as u32);
        }
        self.update_multiple_elements(blocks);
        true
    }

    /// Move block `id` to stack position `target`, clamped to the last position.
    pub(super) fn move_block_to(&mut self, page: u32, id: &ElementId, target: u32) -> bool {
        let blocks = self.blocks_on_page(page);
        let Some(source) = blocks.iter().position(|b| &b.id == id) else {
            return false;
        };
        let destination = (target as usize).min(blocks.len() - 1);
        self.reorder_blocks(page, source, destination)
    }

    /// Renumber the blocks of a page to `0..k`, keeping their relative order.
    ///
    /// Only blocks whose order actually changes are rewritten.
    pub fn compact_block_orders(&mut self, page: u32) {
        let changed: Vec<CanvasElement> = self
            .blocks_on_page(page)
            .into_iter()
            .enumerate()
            .filter(|(index, block)| block.order() != Some(*index as u32))
            .map(|(index, block)| {
                let mut block = block.clone();
                block.set_order(index as u32);
                block
            })
            .collect();

        if !changed.is_empty() {
            log::debug!("Compacted {} block order(s) on page {}", changed.len(), page);
            self.update_multiple_elements(changed);
        }
    }

    fn swap_with_neighbour(&mut self, page: u32, order: u32, direction: Direction) -> bool {
        let blocks = self.blocks_on_page(page);
        let Some(position) = blocks.iter().position(|b| b.order() == Some(order)) else {
            log::debug!("No block with order {} on page {}", order, page);
            return false;
        };
        let neighbour = match direction {
            Direction::Up => position.checked_sub(1),
            Direction::Down => Some(position + 1).filter(|&n| n < blocks.len()),
        };
        let Some(neighbour) = neighbour else {
            return false;
        };

        let mut current = blocks[position].clone();
        let mut other = blocks[neighbour].clone();
        let current_order = current.order().unwrap_or(0);
        let other_order = other.order().unwrap_or(0);
        current.set_order(other_order);
        other.set_order(current_order);

        self.update_multiple_elements(vec![current, other]);
        true
    }
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Up,
    Down,
}
