//! Content stream generation for exported elements.

mod content_stream;

pub use content_stream::{encode_win_ansi, ContentStreamBuilder, ContentStreamOp};
