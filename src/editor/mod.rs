//! Editor state: pages, elements, ordering and selection.
//!
//! [`EditorStore`] is the single owner of the document model. It is passed by
//! reference to whatever needs to read or mutate it; every mutation goes
//! through its methods or through [`EditorStore::dispatch`].
//!
//! ## Architecture
//!
//! ```text
//! Command ──dispatch──▶ EditorStore
//!                        ├── state     element add/update/delete, selection
//!                        ├── pages     insert/delete/reorder pages (PageRemap)
//!                        └── ordering  block stack per page
//! ```
//!
//! ## Example
//!
//! ```
//! use pagecraft::editor::{Command, EditorStore, OrderPlacement};
//! use pagecraft::elements::{CanvasElement, ElementType};
//!
//! let mut store = EditorStore::new();
//! let heading = CanvasElement::with_defaults(ElementType::Heading, 1);
//! store.dispatch(Command::AddElement { element: heading, placement: OrderPlacement::Append })?;
//! store.dispatch(Command::InsertBlankPageAfter { after: 1 })?;
//!
//! assert_eq!(store.total_pages(), 2);
//! assert_eq!(store.current_page(), 2);
//! assert!(store.is_consistent());
//! # Ok::<(), pagecraft::Error>(())
//! ```

mod command;
mod ordering;
mod pages;
mod state;

pub use command::Command;
pub use pages::PageRemap;
pub use state::{EditorSnapshot, EditorStore, OrderPlacement, StateViolation};
