//! Loader: open an input path as an RGB raster.
//!
//! The format is sniffed from the file's leading bytes, falling back to the
//! extension, so a mislabelled `cover.png` that is really a JPEG still opens.
//! Alpha is dropped on load; every later stage works on `RgbImage`.

use crate::error::SheetError;
use image::{ImageError, ImageReader, RgbImage};
use std::path::Path;
use tracing::debug;

/// Open and decode one input image.
///
/// # Errors
/// * [`SheetError::InputNotFound`] if nothing exists at `path`
/// * [`SheetError::ImageDecode`] if the file cannot be read or decoded
/// * [`SheetError::EmptyImage`] if it decodes to zero pixels
pub fn load_image(path: &Path) -> Result<RgbImage, SheetError> {
    if !path.exists() {
        return Err(SheetError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let decode_err = |source: ImageError| SheetError::ImageDecode {
        path: path.to_path_buf(),
        source,
    };

    let image = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| decode_err(ImageError::IoError(e)))?
        .decode()
        .map_err(decode_err)?;

    if image.width() == 0 || image.height() == 0 {
        return Err(SheetError::EmptyImage {
            path: path.to_path_buf(),
        });
    }

    debug!(
        "Loaded {} → {}x{} px ({:?})",
        path.display(),
        image.width(),
        image.height(),
        image.color()
    );

    Ok(image.to_rgb8())
}
