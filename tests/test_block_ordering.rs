//! Integration tests for the block stack on each page.
//!
//! Blocks on a page always carry orders `0..k`; fillables never take part.

use pagecraft::config::EditorConfig;
use pagecraft::editor::{Command, EditorStore, OrderPlacement};
use pagecraft::elements::{CanvasElement, ElementId, ElementPatch, ElementType};
use pagecraft::layout::layout_blocks;

fn add(store: &mut EditorStore, id: &str, element_type: ElementType, page: u32) {
    let mut element = CanvasElement::with_defaults(element_type, page);
    element.id = ElementId::new(id);
    store
        .dispatch(Command::AddElement {
            element,
            placement: OrderPlacement::Append,
        })
        .unwrap();
}

/// Two pages; page 1 holds blocks a, b, c (in that order) plus a text field.
fn sample_store() -> EditorStore {
    let mut store = EditorStore::with_pages(EditorConfig::default(), 2);
    add(&mut store, "a", ElementType::Heading, 1);
    add(&mut store, "field", ElementType::TextField, 1);
    add(&mut store, "b", ElementType::Image, 1);
    add(&mut store, "c", ElementType::Table, 1);
    add(&mut store, "z", ElementType::Video, 2);
    store
}

fn stack(store: &EditorStore, page: u32) -> Vec<String> {
    store
        .blocks_on_page(page)
        .iter()
        .map(|b| b.id.as_str().to_string())
        .collect()
}

fn orders(store: &EditorStore, page: u32) -> Vec<u32> {
    store
        .blocks_on_page(page)
        .iter()
        .filter_map(|b| b.order())
        .collect()
}

mod append_tests {
    use super::*;

    #[test]
    fn test_appended_blocks_are_dense_per_page() {
        let store = sample_store();
        assert_eq!(stack(&store, 1), vec!["a", "b", "c"]);
        assert_eq!(orders(&store, 1), vec![0, 1, 2]);
        assert_eq!(orders(&store, 2), vec![0]);
        assert_eq!(store.element(&"field".into()).and_then(|e| e.order()), None);
        assert!(store.is_consistent());
    }

    #[test]
    fn test_next_block_order() {
        let store = sample_store();
        assert_eq!(store.next_block_order(1), 3);
        assert_eq!(store.next_block_order(2), 1);

        let empty = EditorStore::new();
        assert_eq!(empty.next_block_order(1), 0);
    }
}

mod move_tests {
    use super::*;

    #[test]
    fn test_move_up_and_down() {
        let mut store = sample_store();
        store
            .dispatch(Command::MoveBlockUp { page: 1, order: 2 })
            .unwrap();
        assert_eq!(stack(&store, 1), vec!["a", "c", "b"]);

        store
            .dispatch(Command::MoveBlockDown { page: 1, order: 0 })
            .unwrap();
        assert_eq!(stack(&store, 1), vec!["c", "a", "b"]);
        assert_eq!(orders(&store, 1), vec![0, 1, 2]);
        assert!(store.is_consistent());
    }

    #[test]
    fn test_move_changes_only_the_swapped_pair() {
        let mut store = sample_store();
        let before = store.elements().to_vec();

        assert!(store.move_block_up(1, 2));

        let changed: Vec<&str> = before
            .iter()
            .zip(store.elements())
            .filter(|(old, new)| old != new)
            .map(|(old, _)| old.id.as_str())
            .collect();
        assert_eq!(changed, vec!["b", "c"]);
        for (old, new) in before.iter().zip(store.elements()) {
            let mut old = old.clone();
            if let Some(order) = new.order() {
                old.set_order(order);
            }
            assert_eq!(&old, new);
        }
        assert_eq!(stack(&store, 1), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_moves_at_the_edges_are_noops() {
        let mut store = sample_store();
        assert!(!store.move_block_up(1, 0));
        assert!(!store.move_block_down(1, 2));
        assert!(!store.move_block_up(1, 9));
        assert_eq!(stack(&store, 1), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_moves_leave_other_page_alone() {
        let mut store = sample_store();
        store.move_block_down(1, 0);
        assert_eq!(stack(&store, 2), vec!["z"]);
        assert_eq!(orders(&store, 2), vec![0]);
    }
}

mod reorder_tests {
    use super::*;

    #[test]
    fn test_drag_to_top() {
        let mut store = sample_store();
        store
            .dispatch(Command::ReorderBlocks {
                page: 1,
                source_index: 2,
                destination_index: 0,
            })
            .unwrap();
        assert_eq!(stack(&store, 1), vec!["c", "a", "b"]);
        assert_eq!(orders(&store, 1), vec![0, 1, 2]);
        assert!(store.is_consistent());
    }

    #[test]
    fn test_drag_to_bottom() {
        let mut store = sample_store();
        assert!(store.reorder_blocks(1, 0, 2));
        assert_eq!(stack(&store, 1), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_drag_out_of_range_is_noop() {
        let mut store = sample_store();
        let before = store.snapshot();
        assert!(!store.reorder_blocks(1, 0, 3));
        assert!(!store.reorder_blocks(1, 1, 1));
        assert!(!store.reorder_blocks(2, 0, 1));
        assert_eq!(store.snapshot(), before);
    }
}

mod compaction_tests {
    use super::*;

    #[test]
    fn test_delete_compacts_page() {
        let mut store = sample_store();
        store
            .dispatch(Command::DeleteElement { id: "a".into() })
            .unwrap();
        assert_eq!(stack(&store, 1), vec!["b", "c"]);
        assert_eq!(orders(&store, 1), vec![0, 1]);
        assert!(store.is_consistent());
    }

    #[test]
    fn test_block_moved_to_other_page_goes_last() {
        let mut store = sample_store();
        store
            .dispatch(Command::UpdateElement {
                patch: ElementPatch::new("b").with_page(2),
            })
            .unwrap();
        assert_eq!(stack(&store, 1), vec!["a", "c"]);
        assert_eq!(stack(&store, 2), vec!["z", "b"]);
        assert_eq!(orders(&store, 1), vec![0, 1]);
        assert_eq!(orders(&store, 2), vec![0, 1]);
        assert!(store.is_consistent());
    }

    #[test]
    fn test_order_patch_is_clamped_to_the_stack() {
        let mut store = sample_store();
        store
            .dispatch(Command::UpdateElement {
                patch: ElementPatch::new("a").with_order(5),
            })
            .unwrap();
        assert_eq!(stack(&store, 1), vec!["b", "c", "a"]);
        assert_eq!(orders(&store, 1), vec![0, 1, 2]);
        assert!(store.is_consistent());

        store
            .dispatch(Command::UpdateElement {
                patch: ElementPatch::new("a").with_order(0),
            })
            .unwrap();
        assert_eq!(stack(&store, 1), vec!["a", "b", "c"]);
        assert_eq!(orders(&store, 1), vec![0, 1, 2]);
    }

    #[test]
    fn test_order_patch_on_two_blocks_stays_dense() {
        let mut store = EditorStore::new();
        add(&mut store, "a", ElementType::Heading, 1);
        add(&mut store, "b", ElementType::Heading, 1);

        store
            .dispatch(Command::UpdateElement {
                patch: ElementPatch::new("a").with_order(5),
            })
            .unwrap();

        assert_eq!(stack(&store, 1), vec!["b", "a"]);
        assert_eq!(orders(&store, 1), vec![0, 1]);
        assert!(store.is_consistent());
    }

    #[test]
    fn test_order_patch_ignored_when_block_changes_page() {
        let mut store = sample_store();
        store
            .dispatch(Command::UpdateElement {
                patch: ElementPatch::new("a").with_page(2).with_order(0),
            })
            .unwrap();
        assert_eq!(stack(&store, 2), vec!["z", "a"]);
        assert_eq!(orders(&store, 1), vec![0, 1]);
        assert_eq!(orders(&store, 2), vec![0, 1]);
        assert!(store.is_consistent());
    }

    #[test]
    fn test_copy_goes_to_end_of_stack() {
        let mut store = sample_store();
        store
            .dispatch(Command::CopyElement { id: "a".into() })
            .unwrap();
        let blocks = store.blocks_on_page(1);
        assert_eq!(blocks.len(), 4);
        assert_ne!(blocks[3].id, ElementId::new("a"));
        assert_eq!(blocks[3].order(), Some(3));
        assert!(store.is_consistent());
    }

    #[test]
    fn test_compact_repairs_gaps() {
        let json = r#"{"totalPages":1,"canvasElements":[
            {"id":"x","page":1,"type":"heading","height":50,"order":4,"content":"X"},
            {"id":"y","page":1,"type":"heading","height":50,"order":9,"content":"Y"}
        ]}"#;
        let snapshot = serde_json::from_str(json).unwrap();
        let mut store = EditorStore::from_snapshot(snapshot, EditorConfig::default());
        assert!(!store.is_consistent());

        store.compact_block_orders(1);
        assert_eq!(stack(&store, 1), vec!["x", "y"]);
        assert_eq!(orders(&store, 1), vec![0, 1]);
        assert!(store.is_consistent());
    }
}

mod layout_tests {
    use super::*;

    #[test]
    fn test_stack_follows_order() {
        let mut store = sample_store();
        store.reorder_blocks(1, 2, 0);

        let blocks = store.blocks_on_page(1);
        let slots = layout_blocks(&blocks);
        let ids: Vec<&str> = slots.iter().map(|s| s.element.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
        assert_eq!(slots[0].y_offset, 0.0);
        assert_eq!(slots[1].y_offset, slots[0].height);
        assert_eq!(slots[2].y_offset, slots[0].height + slots[1].height);
    }
}
