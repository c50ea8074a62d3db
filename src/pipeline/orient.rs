//! Orienter/Scaler: turn an input landscape and fit it into the label footprint.
//!
//! Orientation is decided from the aspect ratio alone. EXIF orientation and
//! the picture's content are not consulted: anything at least as tall as it
//! is wide is rotated a quarter turn counter-clockwise.
//!
//! Scaling uses one uniform factor, the larger of the two per-axis ratios,
//! so the result touches the footprint on one axis and stays inside it on
//! the other. Small images are enlarged the same way.

use crate::layout::SheetLayout;
use image::imageops::{self, FilterType};
use image::RgbImage;
use tracing::debug;

/// Rotate `image` a quarter turn counter-clockwise if `height >= width`.
pub fn orient(image: RgbImage) -> RgbImage {
    if image.height() >= image.width() {
        debug!(
            "Rotating {}x{} px image to landscape",
            image.width(),
            image.height()
        );
        imageops::rotate270(&image)
    } else {
        image
    }
}

/// Target size `(w, h)` for an image of `(width, height)` scaled into
/// `footprint` with aspect ratio preserved. Dimensions are truncated.
pub fn fitted_size(width: u32, height: u32, footprint: (u32, u32)) -> (u32, u32) {
    let (fw, fh) = footprint;
    let fact_w = f64::from(width) / f64::from(fw);
    let fact_h = f64::from(height) / f64::from(fh);
    let fact = fact_w.max(fact_h);

    let new_w = (f64::from(width) / fact) as u32;
    let new_h = (f64::from(height) / fact) as u32;
    // A 1-px-high sliver of a very wide image would otherwise vanish.
    (new_w.max(1), new_h.max(1))
}

/// Orient `image`, then resize it to fit the layout's label footprint.
pub fn orient_and_scale(image: RgbImage, layout: &SheetLayout) -> RgbImage {
    let image = orient(image);
    let (w, h) = image.dimensions();
    let (new_w, new_h) = fitted_size(w, h, layout.footprint_px());

    debug!("Scaling {}x{} px → {}x{} px", w, h, new_w, new_h);
    imageops::resize(&image, new_w, new_h, FilterType::CatmullRom)
}
