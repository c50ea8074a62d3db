//! Result types returned by [`crate::convert::convert`].

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Summary of a finished run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionOutput {
    /// One entry per written page, in page order.
    pub pages: Vec<PageResult>,
    pub stats: ConversionStats,
}

/// One written page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResult {
    /// 0-indexed page number; the index inserted into grouped file names.
    pub page_index: usize,
    pub path: PathBuf,
    /// Number of distinct images on the page. Each is printed twice.
    pub stickers: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionStats {
    pub total_images: usize,
    pub total_pages: usize,
    pub total_duration_ms: u64,
}

impl ConversionOutput {
    /// All written paths, in page order.
    pub fn paths(&self) -> Vec<&PathBuf> {
        self.pages.iter().map(|p| &p.path).collect()
    }
}
