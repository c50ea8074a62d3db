//! Padder: grow a scaled image by the bleed margin without a hard border.
//!
//! The padded canvas is a copy of the image itself, stretched to the padded
//! size (aspect ratio ignored) and heavily blurred. The untouched image is
//! then pasted over the centre. After trimming, a slightly misaligned cut
//! shows soft colour instead of a white edge.

use crate::layout::SheetLayout;
use image::imageops::{self, FilterType};
use image::RgbImage;
use tracing::debug;

/// Offset that centres `inner` inside `outer`, truncated toward zero.
///
/// Negative when `inner` is larger than `outer`.
pub fn centre_offset(outer: u32, inner: u32) -> i64 {
    (i64::from(outer) - i64::from(inner)) / 2
}

/// Pad `subject` to the layout's padded size over a blurred stretch of itself.
///
/// The output is always exactly [`SheetLayout::padded_px`], whatever the
/// size of `subject`. Pasting overwrites the centre region; nothing is blended.
pub fn pad_with_blur(subject: &RgbImage, layout: &SheetLayout) -> RgbImage {
    let (pw, ph) = layout.padded_px();

    let stretched = imageops::resize(subject, pw, ph, FilterType::CatmullRom);
    let mut canvas = if layout.blur_sigma > 0.0 {
        imageops::blur(&stretched, layout.blur_sigma)
    } else {
        stretched
    };

    let x = centre_offset(pw, subject.width());
    let y = centre_offset(ph, subject.height());
    debug!(
        "Padding {}x{} px → {}x{} px at ({}, {})",
        subject.width(),
        subject.height(),
        pw,
        ph,
        x,
        y
    );
    imageops::replace(&mut canvas, subject, x, y);

    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn small_layout() -> SheetLayout {
        SheetLayout {
            dpi: 30,
            blur_sigma: 2.0,
            ..SheetLayout::default()
        }
    }

    fn gradient(w: u32, h: u32) -> RgbImage {
        RgbImage::from_fn(w, h, |x, y| Rgb([(x * 2) as u8, (y * 3) as u8, 77]))
    }

    #[test]
    fn centre_offset_truncates() {
        assert_eq!(centre_offset(104, 98), 3);
        assert_eq!(centre_offset(65, 60), 2);
        assert_eq!(centre_offset(10, 10), 0);
        assert_eq!(centre_offset(10, 13), -1);
    }

    #[test]
    fn output_size_is_independent_of_input() {
        let layout = small_layout();
        for &(w, h) in &[(98, 43), (40, 60), (1, 1), (120, 90)] {
            let out = pad_with_blur(&gradient(w, h), &layout);
            assert_eq!(out.dimensions(), layout.padded_px(), "input {w}x{h}");
        }
    }

    #[test]
    fn herma_padded_size() {
        let layout = SheetLayout {
            blur_sigma: 0.0,
            ..SheetLayout::default()
        };
        let out = pad_with_blur(&gradient(64, 40), &layout);
        assert_eq!(out.dimensions(), (1048, 659));
    }

    #[test]
    fn subject_is_pasted_unmodified_and_centred() {
        let layout = small_layout();
        let subject = gradient(97, 43);
        let out = pad_with_blur(&subject, &layout);

        let (pw, ph) = layout.padded_px();
        let x0 = centre_offset(pw, 97) as u32;
        let y0 = centre_offset(ph, 43) as u32;

        // Opposite margins differ by at most one pixel.
        let right = pw - x0 - 97;
        let bottom = ph - y0 - 43;
        assert!(right.abs_diff(x0) <= 1, "left {x0}, right {right}");
        assert!(bottom.abs_diff(y0) <= 1, "top {y0}, bottom {bottom}");

        for &(x, y) in &[(0, 0), (96, 0), (0, 42), (96, 42), (50, 20)] {
            assert_eq!(
                out.get_pixel(x0 + x, y0 + y),
                subject.get_pixel(x, y),
                "subject pixel ({x}, {y})"
            );
        }
    }

    #[test]
    fn background_comes_from_the_image() {
        let layout = small_layout();
        let subject = RgbImage::from_pixel(60, 30, Rgb([200, 40, 10]));
        let out = pad_with_blur(&subject, &layout);

        // A flat image blurs to (nearly) itself: the margins carry its colour, not white.
        let (pw, ph) = layout.padded_px();
        for &(x, y) in &[(0, 0), (pw - 1, ph - 1)] {
            let px = out.get_pixel(x, y);
            for (got, want) in px.0.iter().zip([200u8, 40, 10]) {
                assert!(got.abs_diff(want) <= 2, "margin pixel ({x}, {y}) = {px:?}");
            }
        }
    }
}
