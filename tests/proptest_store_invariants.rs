//! Property tests: arbitrary command sequences never break store invariants.
//!
//! After every command the store must have one dimension record per page,
//! a current page inside the document, every element on an existing page,
//! unique ids, and dense block orders on every page.

use proptest::prelude::*;

use pagecraft::config::EditorConfig;
use pagecraft::editor::{Command, EditorStore, OrderPlacement};
use pagecraft::elements::{CanvasElement, ElementId, ElementPatch, ElementType};
use pagecraft::Error;

#[derive(Debug, Clone)]
enum Step {
    AddBlock { page: u32, append: bool },
    AddField { page: u32 },
    DeleteElement { index: usize },
    CopyElement { index: usize },
    MoveToPage { index: usize, page: u32 },
    SetOrder { index: usize, order: u32 },
    InsertPages { after: u32, count: u32 },
    DeletePage { page: u32 },
    ReorderPage { from: usize, to: usize },
    MoveBlockUp { page: u32, order: u32 },
    MoveBlockDown { page: u32, order: u32 },
    ReorderBlocks { page: u32, from: usize, to: usize },
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        (1u32..6, any::<bool>()).prop_map(|(page, append)| Step::AddBlock { page, append }),
        (1u32..6).prop_map(|page| Step::AddField { page }),
        (0usize..12).prop_map(|index| Step::DeleteElement { index }),
        (0usize..12).prop_map(|index| Step::CopyElement { index }),
        (0usize..12, 1u32..6).prop_map(|(index, page)| Step::MoveToPage { index, page }),
        (0usize..12, 0u32..8).prop_map(|(index, order)| Step::SetOrder { index, order }),
        (0u32..6, 1u32..3).prop_map(|(after, count)| Step::InsertPages { after, count }),
        (1u32..6).prop_map(|page| Step::DeletePage { page }),
        (0usize..6, 0usize..6).prop_map(|(from, to)| Step::ReorderPage { from, to }),
        (1u32..6, 0u32..5).prop_map(|(page, order)| Step::MoveBlockUp { page, order }),
        (1u32..6, 0u32..5).prop_map(|(page, order)| Step::MoveBlockDown { page, order }),
        (1u32..6, 0usize..5, 0usize..5).prop_map(|(page, from, to)| Step::ReorderBlocks {
            page,
            from,
            to
        }),
    ]
}

fn element_id_at(store: &EditorStore, index: usize) -> ElementId {
    store
        .elements()
        .get(index)
        .map(|e| e.id.clone())
        .unwrap_or_else(|| ElementId::new("missing"))
}

fn to_command(store: &EditorStore, step: Step) -> Command {
    match step {
        Step::AddBlock { page, append } => {
            let mut element = CanvasElement::with_defaults(ElementType::Table, page);
            let placement = if append {
                OrderPlacement::Append
            } else {
                element.set_order(store.next_block_order(page));
                OrderPlacement::Explicit
            };
            Command::AddElement { element, placement }
        },
        Step::AddField { page } => Command::AddElement {
            element: CanvasElement::with_defaults(ElementType::Date, page),
            placement: OrderPlacement::Explicit,
        },
        Step::DeleteElement { index } => Command::DeleteElement {
            id: element_id_at(store, index),
        },
        Step::CopyElement { index } => Command::CopyElement {
            id: element_id_at(store, index),
        },
        Step::MoveToPage { index, page } => Command::UpdateElement {
            patch: ElementPatch::new(element_id_at(store, index)).with_page(page),
        },
        Step::SetOrder { index, order } => Command::UpdateElement {
            patch: ElementPatch::new(element_id_at(store, index)).with_order(order),
        },
        Step::InsertPages { after, count } => Command::InsertPagesAfter { after, count },
        Step::DeletePage { page } => Command::DeletePage { page },
        Step::ReorderPage { from, to } => Command::ReorderPage {
            source_index: from,
            destination_index: to,
        },
        Step::MoveBlockUp { page, order } => Command::MoveBlockUp { page, order },
        Step::MoveBlockDown { page, order } => Command::MoveBlockDown { page, order },
        Step::ReorderBlocks { page, from, to } => Command::ReorderBlocks {
            page,
            source_index: from,
            destination_index: to,
        },
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_commands_preserve_invariants(
        initial_pages in 1u32..4,
        steps in prop::collection::vec(step(), 1..40),
    ) {
        let mut store = EditorStore::with_pages(EditorConfig::default(), initial_pages);
        for step in steps {
            let command = to_command(&store, step);
            let total_before = store.total_pages();
            match store.dispatch(command) {
                Ok(()) => {},
                Err(Error::LastPage) => prop_assert_eq!(total_before, 1),
                Err(e) => return Err(TestCaseError::fail(format!("unexpected error: {}", e))),
            }
            let violations = store.validate();
            prop_assert!(violations.is_empty(), "violations: {:?}", violations);
        }
    }

    #[test]
    fn prop_page_moves_are_permutations(
        pages in 2u32..8,
        moves in prop::collection::vec((0usize..8, 0usize..8), 1..10),
    ) {
        let mut store = EditorStore::with_pages(EditorConfig::default(), pages);
        for page in 1..=pages {
            let mut marker = CanvasElement::with_defaults(ElementType::Checkbox, page);
            marker.id = ElementId::new(format!("m{}", page));
            store.add_element(marker, OrderPlacement::Explicit);
        }

        for (from, to) in moves {
            store.reorder_page(from, to);
        }

        let mut marker_pages: Vec<u32> = store.elements().iter().map(|e| e.page).collect();
        marker_pages.sort_unstable();
        prop_assert_eq!(marker_pages, (1..=pages).collect::<Vec<_>>());
        prop_assert_eq!(store.total_pages(), pages);
        prop_assert!(store.is_consistent());
    }

    #[test]
    fn prop_delete_removes_exactly_one_page(
        pages in 2u32..8,
        target in 1u32..8,
    ) {
        prop_assume!(target <= pages);
        let mut store = EditorStore::with_pages(EditorConfig::default(), pages);
        for page in 1..=pages {
            let mut marker = CanvasElement::with_defaults(ElementType::Initials, page);
            marker.id = ElementId::new(format!("m{}", page));
            store.add_element(marker, OrderPlacement::Explicit);
        }

        prop_assert!(store.delete_page(target).unwrap());

        prop_assert_eq!(store.total_pages(), pages - 1);
        let target_id = ElementId::new(format!("m{}", target));
        prop_assert!(store.element(&target_id).is_none());
        for page in 1..=pages {
            if page == target {
                continue;
            }
            let expected = if page > target { page - 1 } else { page };
            let actual = store.element(&ElementId::new(format!("m{}", page))).map(|e| e.page);
            prop_assert_eq!(actual, Some(expected));
        }
        prop_assert!(store.is_consistent());
    }
}
