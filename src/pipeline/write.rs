//! Writer: derive page file names and encode finished pages.
//!
//! The encoder is picked from the output path's extension and nothing else.
//! [`output_format`] is checked before the first image is loaded so a typo in
//! the output name fails the run immediately.

use crate::error::SheetError;
use image::{ImageFormat, RgbImage};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Resolve the encoder for `path` from its extension.
///
/// # Errors
/// [`SheetError::UnsupportedOutputFormat`] when the extension is missing,
/// unknown, or names a format this build cannot encode.
pub fn output_format(path: &Path) -> Result<ImageFormat, SheetError> {
    match ImageFormat::from_path(path) {
        Ok(format) if format.writing_enabled() => Ok(format),
        _ => Err(SheetError::UnsupportedOutputFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// Insert `.{index}` before the extension of `base`.
///
/// `sheet.png` becomes `sheet.0.png`; a path without an extension just gains
/// the suffix (`sheet` → `sheet.0`). Only the last extension is moved, so
/// `covers.v2.png` becomes `covers.v2.0.png`.
pub fn page_output_path(base: &Path, index: usize) -> PathBuf {
    let mut name: OsString = base.file_stem().map(OsString::from).unwrap_or_default();
    name.push(format!(".{index}"));
    if let Some(ext) = base.extension() {
        name.push(".");
        name.push(ext);
    }
    base.with_file_name(name)
}

/// Encode `page` as `format` and save it to `path`, creating parent directories.
pub fn write_page(page: &RgbImage, path: &Path, format: ImageFormat) -> Result<(), SheetError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| SheetError::OutputDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    debug!(
        "Encoding {}x{} px page as {:?}",
        page.width(),
        page.height(),
        format
    );
    page.save_with_format(path, format)
        .map_err(|source| SheetError::OutputWrite {
            path: path.to_path_buf(),
            source,
        })?;

    info!("Wrote {}", path.display());
    Ok(())
}
