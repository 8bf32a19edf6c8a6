//! The authoritative page/element store.

use crate::config::EditorConfig;
use crate::elements::{CanvasElement, ElementId, ElementKind, ElementPatch};
use crate::geometry::PageDimensions;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// How `add_element` treats the `order` of a block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OrderPlacement {
    /// Keep the order supplied by the caller.
    #[default]
    Explicit,
    /// Place the block after every existing block on its page.
    Append,
}

/// Serializable copy of the editor state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorSnapshot {
    /// Number of pages
    pub total_pages: u32,
    /// Active page (1-based)
    #[serde(default = "first_page")]
    pub current_page: u32,
    /// Every element of the document
    #[serde(default)]
    pub canvas_elements: Vec<CanvasElement>,
    /// Canvas size per page
    #[serde(default)]
    pub page_dimensions: BTreeMap<u32, PageDimensions>,
}

fn first_page() -> u32 {
    1
}

/// A broken store invariant, reported by [`EditorStore::validate`].
#[derive(Debug, Clone, PartialEq)]
pub enum StateViolation {
    /// The dimension map has the wrong number of entries
    DimensionCount {
        /// Page count of the store
        total_pages: u32,
        /// Entries in the dimension map
        entries: usize,
    },
    /// A page has no dimension record
    MissingDimensions(u32),
    /// A dimension record is keyed outside `1..=total_pages`
    StaleDimensions(u32),
    /// The current page is outside `1..=total_pages`
    CurrentPage {
        /// Current page
        current: u32,
        /// Page count
        total_pages: u32,
    },
    /// An element references a page that does not exist
    ElementPage {
        /// Offending element
        id: ElementId,
        /// Its page
        page: u32,
    },
    /// Two elements share an id
    DuplicateId(ElementId),
    /// Block orders on a page are not `0..k`
    SparseOrder {
        /// Page
        page: u32,
        /// Orders found, sorted
        orders: Vec<u32>,
    },
}

impl fmt::Display for StateViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateViolation::DimensionCount {
                total_pages,
                entries,
            } => write!(f, "{} pages but {} dimension records", total_pages, entries),
            StateViolation::MissingDimensions(page) => {
                write!(f, "page {} has no dimensions", page)
            },
            StateViolation::StaleDimensions(page) => {
                write!(f, "dimension record for nonexistent page {}", page)
            },
            StateViolation::CurrentPage {
                current,
                total_pages,
            } => write!(f, "current page {} outside 1..={}", current, total_pages),
            StateViolation::ElementPage { id, page } => {
                write!(f, "element {} on nonexistent page {}", id, page)
            },
            StateViolation::DuplicateId(id) => write!(f, "duplicate element id {}", id),
            StateViolation::SparseOrder { page, orders } => {
                write!(f, "block orders on page {} are not dense: {:?}", page, orders)
            },
        }
    }
}

/// Single source of truth for pages, elements and selection.
///
/// All mutation goes through methods on this type: element operations here,
/// page lifecycle in [`super::pages`], block ordering in [`super::ordering`]
/// and the [`super::Command`] dispatcher on top of them.
///
/// Unknown element ids are ignored (logged at debug level) by every
/// operation. Deleting the last page is the only rejected mutation.
#[derive(Debug, Clone)]
pub struct EditorStore {
    pub(super) config: EditorConfig,
    pub(super) total_pages: u32,
    pub(super) current_page: u32,
    pub(super) elements: Vec<CanvasElement>,
    pub(super) page_dimensions: BTreeMap<u32, PageDimensions>,
    pub(super) active_element_id: Option<ElementId>,
    pub(super) selected_text_element: Option<CanvasElement>,
}

impl Default for EditorStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorStore {
    /// A one-page document with default configuration.
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    /// A one-page document.
    pub fn with_config(config: EditorConfig) -> Self {
        Self::with_pages(config, 1)
    }

    /// An empty document of `total_pages` pages (at least one), all with
    /// the configured default dimensions.
    pub fn with_pages(config: EditorConfig, total_pages: u32) -> Self {
        let total_pages = total_pages.max(1);
        let page_dimensions = (1..=total_pages)
            .map(|page| (page, config.default_page_dimensions))
            .collect();
        Self {
            config,
            total_pages,
            current_page: 1,
            elements: Vec::new(),
            page_dimensions,
            active_element_id: None,
            selected_text_element: None,
        }
    }

    /// Restore a store from a snapshot.
    ///
    /// The page count and dimension map are normalized: missing or invalid
    /// records get the default size and stray keys are dropped. Elements are
    /// kept as they are, even when their page does not exist.
    pub fn from_snapshot(snapshot: EditorSnapshot, config: EditorConfig) -> Self {
        let mut store = Self::with_pages(config, snapshot.total_pages);
        for (page, dims) in snapshot.page_dimensions {
            if store.page_dimensions.contains_key(&page) && dims.is_valid() {
                store.page_dimensions.insert(page, dims);
            } else {
                log::debug!("Dropping dimension record for page {}", page);
            }
        }
        store.current_page = snapshot.current_page.clamp(1, store.total_pages);
        store.elements = snapshot.canvas_elements;
        for violation in store.validate() {
            log::warn!("Restored state: {}", violation);
        }
        store
    }

    /// Copy the state into a serializable snapshot.
    pub fn snapshot(&self) -> EditorSnapshot {
        EditorSnapshot {
            total_pages: self.total_pages,
            current_page: self.current_page,
            canvas_elements: self.elements.clone(),
            page_dimensions: self.page_dimensions.clone(),
        }
    }

    // === Queries ===

    /// Configuration in effect.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Number of pages.
    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Active page (1-based).
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Every element, in insertion order.
    pub fn elements(&self) -> &[CanvasElement] {
        &self.elements
    }

    /// Look up an element by id.
    pub fn element(&self, id: &ElementId) -> Option<&CanvasElement> {
        self.elements.iter().find(|e| &e.id == id)
    }

    /// Elements owned by a page, in insertion order.
    pub fn elements_on_page(&self, page: u32) -> impl Iterator<Item = &CanvasElement> {
        self.elements.iter().filter(move |e| e.page == page)
    }

    /// Canvas size of a page.
    pub fn page_dimensions(&self, page: u32) -> Option<PageDimensions> {
        self.page_dimensions.get(&page).copied()
    }

    /// The whole dimension map.
    pub fn all_page_dimensions(&self) -> &BTreeMap<u32, PageDimensions> {
        &self.page_dimensions
    }

    /// Id of the element being edited.
    pub fn active_element_id(&self) -> Option<&ElementId> {
        self.active_element_id.as_ref()
    }

    /// The element being edited.
    pub fn active_element(&self) -> Option<&CanvasElement> {
        self.active_element_id.as_ref().and_then(|id| self.element(id))
    }

    /// Cached copy of the selected text field, kept in sync with the store.
    pub fn selected_text_element(&self) -> Option<&CanvasElement> {
        self.selected_text_element.as_ref()
    }

    /// True when `page` is in `1..=total_pages`.
    pub fn contains_page(&self, page: u32) -> bool {
        page >= 1 && page <= self.total_pages
    }

    /// The order a block appended to `page` would receive.
    pub fn next_block_order(&self, page: u32) -> u32 {
        self.elements
            .iter()
            .filter(|e| e.page == page)
            .filter_map(|e| e.order())
            .max()
            .map_or(0, |max| max + 1)
    }

    // === Element mutation ===

    /// Add an element.
    ///
    /// Returns `false` (and leaves the store untouched) when the element's page
    /// does not exist or its id is already taken.
    pub fn add_element(&mut self, mut element: CanvasElement, placement: OrderPlacement) -> bool {
        if !self.contains_page(element.page) {
            log::debug!(
                "Ignoring element {} for nonexistent page {}",
                element.id,
                element.page
            );
            return false;
        }
        if self.element(&element.id).is_some() {
            log::debug!("Ignoring element with duplicate id {}", element.id);
            return false;
        }
        if placement == OrderPlacement::Append && element.is_block() {
            element.set_order(self.next_block_order(element.page));
        }
        log::debug!(
            "Added {} {} on page {}",
            element.element_type(),
            element.id,
            element.page
        );
        self.elements.push(element);
        true
    }

    /// Merge a patch into the matching element.
    ///
    /// A block moved to another page is appended to that page's stack and the
    /// page it left is compacted. Page changes to nonexistent pages are dropped.
    /// An `order` change on a block that stays put is a drag within its stack:
    /// the target is clamped to the stack and the page renumbered densely.
    pub fn update_element(&mut self, patch: &ElementPatch) -> bool {
        let Some(index) = self.position(&patch.id) else {
            log::debug!("Ignoring update for unknown element {}", patch.id);
            return false;
        };

        let old_page = self.elements[index].page;
        let old_order = self.elements[index].order();
        let mut updated = self.elements[index].clone();
        patch.apply_to(&mut updated);

        if !self.contains_page(updated.page) {
            log::debug!("Ignoring move of {} to nonexistent page {}", patch.id, updated.page);
            updated.page = old_page;
        }
        let moved_block = updated.is_block() && updated.page != old_page;
        let requested_order = match (updated.order(), old_order) {
            (Some(new), Some(old)) if !moved_block && new != old => Some(new),
            _ => None,
        };
        if moved_block {
            updated.set_order(self.next_block_order(updated.page));
        } else if let Some(old) = old_order {
            updated.set_order(old);
        }

        self.elements[index] = updated;
        if moved_block {
            self.compact_block_orders(old_page);
        }
        if let Some(target) = requested_order {
            self.move_block_to(old_page, &patch.id, target);
        }
        self.refresh_selection();
        true
    }

    /// Remove an element and any selection pointing at it.
    pub fn delete_element(&mut self, id: &ElementId) -> bool {
        let Some(index) = self.position(id) else {
            log::debug!("Ignoring delete of unknown element {}", id);
            return false;
        };
        let removed = self.elements.remove(index);
        self.clear_selection_of(|candidate| candidate == id);
        if removed.is_block() {
            self.compact_block_orders(removed.page);
        }
        true
    }

    /// Replace several elements at once, keyed by id.
    ///
    /// The new element list is built aside and swapped in as one transition.
    /// Unknown ids and replacements targeting nonexistent pages are skipped.
    /// Returns the number of elements replaced.
    pub fn update_multiple_elements(&mut self, replacements: Vec<CanvasElement>) -> usize {
        let mut next = self.elements.clone();
        let mut replaced = 0;

        for replacement in replacements {
            if !self.contains_page(replacement.page) {
                log::debug!(
                    "Ignoring replacement of {} onto nonexistent page {}",
                    replacement.id,
                    replacement.page
                );
                continue;
            }
            match next.iter_mut().find(|e| e.id == replacement.id) {
                Some(slot) => {
                    *slot = replacement;
                    replaced += 1;
                },
                None => log::debug!("Ignoring replacement of unknown element {}", replacement.id),
            }
        }

        if replaced > 0 {
            self.elements = next;
            self.refresh_selection();
        }
        replaced
    }

    /// Duplicate an element under a fresh id.
    ///
    /// Blocks are appended to the end of their page's stack; fillables are
    /// offset by the configured copy offset.
    pub fn copy_element(&mut self, id: &ElementId) -> Option<ElementId> {
        let Some(source) = self.element(id) else {
            log::debug!("Ignoring copy of unknown element {}", id);
            return None;
        };

        let mut copy = source.clone();
        copy.id = ElementId::generate();
        if copy.is_block() {
            copy.set_order(self.next_block_order(copy.page));
        }
        let offset = self.config.copy_offset;
        if let Some(frame) = copy.frame_mut() {
            frame.x += offset;
            frame.y += offset;
        }

        let new_id = copy.id.clone();
        self.elements.push(copy);
        Some(new_id)
    }

    // === Selection and navigation ===

    /// Select an element for editing, or clear the selection with `None`.
    pub fn set_active_element(&mut self, id: Option<ElementId>) {
        match id {
            None => {
                self.active_element_id = None;
                self.selected_text_element = None;
            },
            Some(id) => {
                let Some(element) = self.element(&id) else {
                    log::debug!("Ignoring selection of unknown element {}", id);
                    return;
                };
                self.selected_text_element = match element.kind {
                    ElementKind::TextField(_) => Some(element.clone()),
                    _ => None,
                };
                self.active_element_id = Some(id);
            },
        }
    }

    /// Switch pages; clamped to the document.
    pub fn set_current_page(&mut self, page: u32) {
        self.current_page = page.clamp(1, self.total_pages);
    }

    /// Record the rendered canvas size of a page.
    ///
    /// Ignored for pages outside the document and for sizes that cannot
    /// serve as a scale reference.
    pub fn set_page_dimensions(&mut self, page: u32, dimensions: PageDimensions) -> bool {
        if !self.contains_page(page) {
            log::debug!("Ignoring dimensions for nonexistent page {}", page);
            return false;
        }
        if !dimensions.is_valid() {
            log::debug!("Ignoring invalid dimensions {:?} for page {}", dimensions, page);
            return false;
        }
        self.page_dimensions.insert(page, dimensions);
        true
    }

    // === Invariants ===

    /// Check every store invariant; an empty result means the state is consistent.
    pub fn validate(&self) -> Vec<StateViolation> {
        let mut violations = Vec::new();

        if self.page_dimensions.len() != self.total_pages as usize {
            violations.push(StateViolation::DimensionCount {
                total_pages: self.total_pages,
                entries: self.page_dimensions.len(),
            });
        }
        for page in 1..=self.total_pages {
            if !self.page_dimensions.contains_key(&page) {
                violations.push(StateViolation::MissingDimensions(page));
            }
        }
        for &page in self.page_dimensions.keys() {
            if !self.contains_page(page) {
                violations.push(StateViolation::StaleDimensions(page));
            }
        }
        if !self.contains_page(self.current_page) {
            violations.push(StateViolation::CurrentPage {
                current: self.current_page,
                total_pages: self.total_pages,
            });
        }

        let mut seen = HashSet::new();
        let mut orders: BTreeMap<u32, Vec<u32>> = BTreeMap::new();
        for element in &self.elements {
            if !seen.insert(&element.id) {
                violations.push(StateViolation::DuplicateId(element.id.clone()));
            }
            if !self.contains_page(element.page) {
                violations.push(StateViolation::ElementPage {
                    id: element.id.clone(),
                    page: element.page,
                });
            }
            if let Some(order) = element.order() {
                orders.entry(element.page).or_default().push(order);
            }
        }
        for (page, mut page_orders) in orders {
            page_orders.sort_unstable();
            let dense = page_orders.iter().enumerate().all(|(i, &o)| o as usize == i);
            if !dense {
                violations.push(StateViolation::SparseOrder {
                    page,
                    orders: page_orders,
                });
            }
        }

        violations
    }

    /// True when [`validate`](Self::validate) finds nothing.
    pub fn is_consistent(&self) -> bool {
        self.validate().is_empty()
    }

    // === Internal helpers ===

    pub(super) fn position(&self, id: &ElementId) -> Option<usize> {
        self.elements.iter().position(|e| &e.id == id)
    }

    /// Drop active/selected references whose id matches.
    pub(super) fn clear_selection_of<F>(&mut self, mut is_gone: F)
    where
        F: FnMut(&ElementId) -> bool,
    {
        if self.active_element_id.as_ref().is_some_and(&mut is_gone) {
            self.active_element_id = None;
        }
        if self
            .selected_text_element
            .as_ref()
            .is_some_and(|selected| is_gone(&selected.id))
        {
            self.selected_text_element = None;
        }
    }

    /// Re-copy the cached selected element from the store.
    pub(super) fn refresh_selection(&mut self) {
        let selected_id = self.selected_text_element.as_ref().map(|s| s.id.clone());
        if let Some(id) = selected_id {
            self.selected_text_element = self.element(&id).cloned();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{ElementType, Frame};

    fn block(id: &str, page: u32, order: u32) -> CanvasElement {
        let mut element = CanvasElement::with_defaults(ElementType::Heading, page);
        element.id = ElementId::new(id);
        element.set_order(order);
        element
    }

    fn field(id: &str, page: u32) -> CanvasElement {
        let mut element = CanvasElement::with_defaults(ElementType::TextField, page);
        element.id = ElementId::new(id);
        element
    }

    #[test]
    fn test_new_store_is_consistent() {
        let store = EditorStore::new();
        assert_eq!(store.total_pages(), 1);
        assert_eq!(store.current_page(), 1);
        assert_eq!(store.page_dimensions(1), Some(PageDimensions::DEFAULT));
        assert!(store.is_consistent());
    }

    #[test]
    fn test_append_assigns_next_order() {
        let mut store = EditorStore::new();
        assert!(store.add_element(block("a", 1, 7), OrderPlacement::Append));
        assert!(store.add_element(block("b", 1, 7), OrderPlacement::Append));
        assert!(store.add_element(field("f", 1), OrderPlacement::Append));

        assert_eq!(store.element(&"a".into()).and_then(|e| e.order()), Some(0));
        assert_eq!(store.element(&"b".into()).and_then(|e| e.order()), Some(1));
        assert_eq!(store.element(&"f".into()).and_then(|e| e.order()), None);
    }

    #[test]
    fn test_explicit_order_is_kept() {
        let mut store = EditorStore::new();
        store.add_element(block("a", 1, 0), OrderPlacement::Explicit);
        store.add_element(block("b", 1, 1), OrderPlacement::Explicit);
        assert_eq!(store.element(&"b".into()).and_then(|e| e.order()), Some(1));
        assert!(store.is_consistent());
    }

    #[test]
    fn test_add_rejects_bad_page_and_duplicate_id() {
        let mut store = EditorStore::new();
        assert!(!store.add_element(field("x", 2), OrderPlacement::Explicit));
        assert!(store.add_element(field("x", 1), OrderPlacement::Explicit));
        assert!(!store.add_element(field("x", 1), OrderPlacement::Explicit));
        assert_eq!(store.elements().len(), 1);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut store = EditorStore::new();
        store.add_element(field("f", 1), OrderPlacement::Explicit);
        let before = store.snapshot();
        assert!(!store.update_element(&ElementPatch::new("missing").with_content("x")));
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_update_refreshes_selected_copy() {
        let mut store = EditorStore::new();
        store.add_element(field("f", 1), OrderPlacement::Explicit);
        store.set_active_element(Some("f".into()));

        store.update_element(&ElementPatch::new("f").with_content("Jane Doe"));

        let selected = store.selected_text_element().unwrap();
        match &selected.kind {
            ElementKind::TextField(f) => assert_eq!(f.content, "Jane Doe"),
            other => panic!("unexpected kind {:?}", other),
        }
    }

    #[test]
    fn test_update_moves_block_to_end_of_other_page() {
        let mut store = EditorStore::with_pages(EditorConfig::default(), 2);
        store.add_element(block("a", 1, 0), OrderPlacement::Explicit);
        store.add_element(block("b", 1, 1), OrderPlacement::Explicit);
        store.add_element(block("c", 2, 0), OrderPlacement::Explicit);

        store.update_element(&ElementPatch::new("a").with_page(2));

        assert_eq!(store.element(&"a".into()).map(|e| (e.page, e.order())), Some((2, Some(1))));
        assert_eq!(store.element(&"b".into()).and_then(|e| e.order()), Some(0));
        assert!(store.is_consistent());
    }

    #[test]
    fn test_update_ignores_move_to_missing_page() {
        let mut store = EditorStore::new();
        store.add_element(field("f", 1), OrderPlacement::Explicit);
        store.update_element(&ElementPatch::new("f").with_page(9).with_position(1.0, 2.0));
        let element = store.element(&"f".into()).unwrap();
        assert_eq!(element.page, 1);
        assert_eq!(element.frame().map(|f| f.x), Some(1.0));
    }

    #[test]
    fn test_delete_clears_selection_and_compacts() {
        let mut store = EditorStore::new();
        store.add_element(block("a", 1, 0), OrderPlacement::Explicit);
        store.add_element(block("b", 1, 1), OrderPlacement::Explicit);
        store.add_element(block("c", 1, 2), OrderPlacement::Explicit);
        store.set_active_element(Some("b".into()));

        assert!(store.delete_element(&"b".into()));
        assert!(store.active_element_id().is_none());
        assert_eq!(store.element(&"c".into()).and_then(|e| e.order()), Some(1));
        assert!(!store.delete_element(&"b".into()));
        assert!(store.is_consistent());
    }

    #[test]
    fn test_update_multiple_is_single_transition() {
        let mut store = EditorStore::new();
        store.add_element(block("a", 1, 0), OrderPlacement::Explicit);
        store.add_element(block("b", 1, 1), OrderPlacement::Explicit);

        let mut a = store.element(&"a".into()).cloned().unwrap();
        let mut b = store.element(&"b".into()).cloned().unwrap();
        a.set_order(1);
        b.set_order(0);
        let ghost = block("ghost", 1, 5);

        assert_eq!(store.update_multiple_elements(vec![a, b, ghost]), 2);
        assert!(store.element(&"ghost".into()).is_none());
        assert!(store.is_consistent());
    }

    #[test]
    fn test_copy_block_is_appended_last() {
        let mut store = EditorStore::new();
        store.add_element(block("a", 1, 0), OrderPlacement::Explicit);
        store.add_element(block("b", 1, 1), OrderPlacement::Explicit);

        let copy = store.copy_element(&"a".into()).unwrap();
        assert_ne!(copy, ElementId::new("a"));
        assert_eq!(store.element(&copy).and_then(|e| e.order()), Some(2));
        assert!(store.is_consistent());
    }

    #[test]
    fn test_copy_fillable_is_offset() {
        let mut store = EditorStore::with_config(EditorConfig::new().with_copy_offset(10.0));
        store.add_element(field("f", 1), OrderPlacement::Explicit);
        let copy = store.copy_element(&"f".into()).unwrap();
        let frame = *store.element(&copy).and_then(|e| e.frame()).unwrap();
        assert_eq!(frame, Frame::new(60.0, 60.0, 200.0, 40.0));
    }

    #[test]
    fn test_set_current_page_clamps() {
        let mut store = EditorStore::with_pages(EditorConfig::default(), 3);
        store.set_current_page(10);
        assert_eq!(store.current_page(), 3);
        store.set_current_page(0);
        assert_eq!(store.current_page(), 1);
    }

    #[test]
    fn test_set_page_dimensions_validation() {
        let mut store = EditorStore::new();
        assert!(store.set_page_dimensions(1, PageDimensions::new(918.0, 1188.0)));
        assert!(!store.set_page_dimensions(2, PageDimensions::new(918.0, 1188.0)));
        assert!(!store.set_page_dimensions(1, PageDimensions::new(0.0, 10.0)));
        assert_eq!(store.page_dimensions(1), Some(PageDimensions::new(918.0, 1188.0)));
    }

    #[test]
    fn test_validate_reports_sparse_orders() {
        let mut store = EditorStore::new();
        store.add_element(block("a", 1, 0), OrderPlacement::Explicit);
        store.add_element(block("b", 1, 3), OrderPlacement::Explicit);
        let violations = store.validate();
        assert_eq!(
            violations,
            vec![StateViolation::SparseOrder {
                page: 1,
                orders: vec![0, 3]
            }]
        );
    }

    #[test]
    fn test_snapshot_round_trip_normalizes() {
        let json = r#"{"totalPages":2,"currentPage":5,
            "canvasElements":[{"id":"f","page":2,"type":"checkbox","x":1,"y":2,"width":20,"height":20}],
            "pageDimensions":{"1":{"pageWidth":918,"pageHeight":1188},"7":{"pageWidth":1,"pageHeight":1}}}"#;
        let snapshot: EditorSnapshot = serde_json::from_str(json).unwrap();
        let store = EditorStore::from_snapshot(snapshot, EditorConfig::default());

        assert_eq!(store.current_page(), 2);
        assert_eq!(store.page_dimensions(1), Some(PageDimensions::new(918.0, 1188.0)));
        assert_eq!(store.page_dimensions(2), Some(PageDimensions::DEFAULT));
        assert_eq!(store.page_dimensions(7), None);
        assert!(store.is_consistent());
    }
}
