// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::too_many_arguments)]
#![allow(clippy::new_without_default)]
#![allow(clippy::should_implement_trait)]
// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # pagecraft
//!
//! Page and element model for a WYSIWYG PDF builder.
//!
//! A document is a PDF plus a flat list of canvas elements placed on its
//! pages. This crate owns the part with the invariants: the page lifecycle
//! (insert, delete, reorder, upload), the dense block order on each page,
//! and the canvas-to-PDF composition performed at export.
//!
//! ## Core Features
//!
//! - **Element model**: block elements (heading, image, video, table) stacked by
//!   `order`; fillable fields (text, signature, date, initials, checkbox) placed freely
//! - **Editor store**: one owner of pages, elements, page dimensions and selection;
//!   every mutation is a method or a [`editor::Command`]
//! - **Page lifecycle**: a single page-number remap shared by elements,
//!   dimensions and the current page
//! - **Export**: Y-flipping, independently scaled transform with clamping and
//!   per-element recovery (skip with warning, or placeholder)
//! - **Backends**: PDF manipulation behind [`backend::PdfBackend`], implemented on `lopdf`
//!
//! ## Architecture
//!
//! ```text
//!   Command ──▶ DocumentSession ──▶ EditorStore (elements, pages, dims)
//!                     │
//!                     ├──▶ PdfBackend (page tree, content streams)
//!                     └──▶ export: PageTransform + PagePainter ──▶ PDF bytes
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use pagecraft::backend::LopdfBackend;
//! use pagecraft::editor::{Command, OrderPlacement};
//! use pagecraft::elements::{CanvasElement, ElementType};
//! use pagecraft::{DocumentSession, EditorConfig};
//!
//! let backend = LopdfBackend::new();
//! let mut session = DocumentSession::new(backend, EditorConfig::default())?;
//!
//! let heading = CanvasElement::with_defaults(ElementType::Heading, 1);
//! session.apply(Command::AddElement { element: heading, placement: OrderPlacement::Append })?;
//! session.apply(Command::InsertBlankPageAfter { after: 1 })?;
//!
//! let output = session.export()?;
//! assert!(output.bytes.starts_with(b"%PDF-"));
//! assert_eq!(output.report.drawn, 1);
//! # Ok::<(), pagecraft::Error>(())
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Shared primitives
pub mod geometry;
pub mod layout;

// Document model
pub mod editor;
pub mod elements;

// Composition
pub mod export;
pub mod fonts;
pub mod writer;

// PDF manipulation and rendering
pub mod backend;
pub mod render;

// Store + backend
pub mod session;

pub use config::EditorConfig;
pub use editor::{Command, EditorStore};
pub use error::{Error, Result};
pub use session::{DocumentSession, ExportOutput};

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
