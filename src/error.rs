//! Error types for the editor and export pipeline.
//!
//! Most failures in this crate are recovered locally (an element is skipped or
//! replaced by a placeholder during export). The variants below are the ones
//! that reach the caller: rejected preconditions and I/O or library failures.

use crate::export::ImageError;

/// Result type alias for editor operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types surfaced to the caller.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Attempted to delete the only remaining page
    #[error("Cannot delete the last remaining page")]
    LastPage,

    /// Invalid PDF header (expected '%PDF-')
    #[error("Invalid PDF header: expected '%PDF-', found '{0}'")]
    InvalidHeader(String),

    /// Page index outside the document
    #[error("Page {page} out of range (document has {count} pages)")]
    PageOutOfRange {
        /// Requested page (1-based unless stated otherwise by the caller)
        page: usize,
        /// Number of pages in the document
        count: usize,
    },

    /// Saved editor state does not fit the document it is applied to
    #[error("Editor state has {state} pages but the document has {document}")]
    PageCountMismatch {
        /// Pages in the editor state
        state: usize,
        /// Pages in the document
        document: usize,
    },

    /// Error reported by the PDF object layer
    #[error("PDF error: {0}")]
    Pdf(String),

    /// Image decoding or embedding error
    #[error("Image error: {0}")]
    Image(#[from] ImageError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Unsupported feature
    #[error("Unsupported feature: {0}")]
    Unsupported(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        Error::Pdf(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_page_error() {
        let msg = format!("{}", Error::LastPage);
        assert!(msg.contains("last remaining page"));
    }

    #[test]
    fn test_page_count_mismatch_error() {
        let msg = format!("{}", Error::PageCountMismatch { state: 4, document: 2 });
        assert!(msg.contains("4 pages"));
        assert!(msg.contains("has 2"));
    }

    #[test]
    fn test_invalid_header_error() {
        let err = Error::InvalidHeader("GIF89a".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("Invalid PDF header"));
        assert!(msg.contains("GIF89a"));
    }

    #[test]
    fn test_page_out_of_range_error() {
        let err = Error::PageOutOfRange { page: 7, count: 3 };
        let msg = format!("{}", err);
        assert!(msg.contains('7'));
        assert!(msg.contains("3 pages"));
    }

    #[test]
    fn test_image_error_conversion() {
        let err: Error = ImageError::UnsupportedFormat.into();
        assert!(matches!(err, Error::Image(ImageError::UnsupportedFormat)));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
