//! Error types for the herma-sheet library.
//!
//! Every failure is fatal to the run: there is no per-image or per-page
//! recovery. The first error returned by any stage ends the
//! [`crate::stream::SheetStream`] and is propagated out of
//! [`crate::convert::convert`] unchanged.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the herma-sheet library.
#[derive(Debug, Error)]
pub enum SheetError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// No input images were supplied.
    #[error("No input images given\nPass at least one image path before the output path.")]
    NoInputs,

    /// Input file was not found at the given path.
    #[error("Image file not found: '{path}'\nCheck the path exists and is readable.")]
    InputNotFound { path: PathBuf },

    /// The file exists but the codec could not open or decode it.
    #[error("Cannot open '{path}' as an image: {source}")]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The image decoded to zero pixels.
    #[error("Image '{path}' is empty (0 pixels wide or high)")]
    EmptyImage { path: PathBuf },

    // ── Layout errors ─────────────────────────────────────────────────────
    /// More images were placed on one page than the label grid has rows.
    #[error(
        "Image {} does not fit on the page: the sheet holds {capacity} rows\n\
Use grouped mode (the default) to spread images across several pages.",
        .index + 1
    )]
    PageCapacityExceeded { index: usize, capacity: usize },

    // ── Output errors ─────────────────────────────────────────────────────
    /// The output path's extension does not name a format the codec can write.
    #[error("Cannot infer an image format from output path '{path}'\nUse an extension such as .png or .jpg.")]
    UnsupportedOutputFormat { path: PathBuf },

    /// Could not create the directory that should hold the output pages.
    #[error("Failed to create output directory '{path}': {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Encoding or writing a page failed.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_display_is_one_based() {
        let e = SheetError::PageCapacityExceeded {
            index: 4,
            capacity: 4,
        };
        let msg = e.to_string();
        assert!(msg.contains("Image 5"), "got: {msg}");
        assert!(msg.contains("4 rows"), "got: {msg}");
    }

    #[test]
    fn not_found_display_names_path() {
        let e = SheetError::InputNotFound {
            path: PathBuf::from("/tmp/missing-cover.jpg"),
        };
        assert!(e.to_string().contains("missing-cover.jpg"));
    }

    #[test]
    fn unsupported_format_display() {
        let e = SheetError::UnsupportedOutputFormat {
            path: PathBuf::from("sheet.pdfx"),
        };
        let msg = e.to_string();
        assert!(msg.contains("sheet.pdfx"), "got: {msg}");
        assert!(msg.contains(".png"), "got: {msg}");
    }
}
