//! Progress-callback trait for per-image and per-page events.
//!
//! Inject an [`Arc<dyn ConversionProgressCallback>`] via
//! [`crate::config::ConversionConfigBuilder::progress_callback`] to be told
//! as each image passes through the pipeline and as each page is written.
//!
//! # Example
//!
//! ```rust
//! use herma_sheet::{ConversionProgressCallback, ConversionConfig};
//! use std::path::Path;
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct PageCounter {
//!     written: AtomicUsize,
//! }
//!
//! impl ConversionProgressCallback for PageCounter {
//!     fn on_page_written(&self, page_num: usize, path: &Path) {
//!         self.written.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("page {} → {}", page_num, path.display());
//!     }
//! }
//!
//! let counter = Arc::new(PageCounter { written: AtomicUsize::new(0) });
//!
//! let config = ConversionConfig::builder()
//!     .progress_callback(counter as Arc<dyn ConversionProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use std::path::Path;
use std::sync::Arc;

/// Called by the pipeline as it processes images and writes pages.
///
/// The pipeline is sequential, so calls never overlap, but implementations
/// must still be `Send + Sync` so a config can be shared across threads.
/// All methods have default no-op implementations.
pub trait ConversionProgressCallback: Send + Sync {
    /// Called once before the first image is loaded.
    ///
    /// # Arguments
    /// * `total_images` — number of input paths
    fn on_conversion_start(&self, total_images: usize) {
        let _ = total_images;
    }

    /// Called when an image has been loaded, scaled and padded.
    ///
    /// # Arguments
    /// * `image_num` — 1-indexed position in the input list
    /// * `total_images` — number of input paths
    /// * `path` — the input file
    fn on_image_complete(&self, image_num: usize, total_images: usize, path: &Path) {
        let _ = (image_num, total_images, path);
    }

    /// Called after a page has been encoded and saved.
    ///
    /// # Arguments
    /// * `page_num` — 1-indexed page number
    /// * `path` — where the page was written
    fn on_page_written(&self, page_num: usize, path: &Path) {
        let _ = (page_num, path);
    }

    /// Called once after the last page has been written.
    fn on_conversion_complete(&self, total_pages: usize, total_images: usize) {
        let _ = (total_pages, total_images);
    }
}

/// Convenience alias for a shared, type-erased callback.
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;

/// A callback that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {}
