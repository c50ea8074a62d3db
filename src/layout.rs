//! Physical sheet geometry and millimetre-to-pixel conversion.
//!
//! All positions on the sheet are specified in millimetres and converted to
//! pixels only at the last moment, one expression at a time. A slot offset is
//! computed as a millimetre sum *first* and then converted, never as a sum of
//! separately converted pixel values: the two differ by a pixel here and
//! there, and the cut lines of the printed sheet depend on the former.
//!
//! Conversion truncates toward zero. Do not "fix" this to rounding.

use serde::{Deserialize, Serialize};

/// Inches per millimetre, to the precision the label offsets were measured with.
pub const INCHES_PER_MM: f64 = 0.03937008;

/// Convert a length in millimetres to a pixel count at `dpi`, truncating.
///
/// Negative lengths saturate to `0`.
///
/// ```rust
/// use herma_sheet::layout::mm_to_px;
///
/// assert_eq!(mm_to_px(0.0, 300), 0);
/// assert_eq!(mm_to_px(83.8, 300), 989);
/// assert_eq!(mm_to_px(210.0, 300), 2480);
/// ```
pub fn mm_to_px(mm: f64, dpi: u32) -> u32 {
    (INCHES_PER_MM * mm * f64::from(dpi)) as u32
}

/// Pixel offsets of one label row on the page canvas.
///
/// Both columns receive the same image, so a row is a single `y` with two `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridSlot {
    /// Left edge of the padded image in the first column.
    pub left_x: u32,
    /// Left edge of the padded image in the second column.
    pub right_x: u32,
    /// Top edge of the padded image.
    pub y: u32,
}

/// Physical layout of one label sheet.
///
/// Defaults describe HERMA 5028 (A4, two columns of 83.8 × 50.8 mm labels)
/// printed at 300 DPI. Every field can be overridden from a partial JSON
/// document:
///
/// ```rust
/// use herma_sheet::SheetLayout;
///
/// let layout: SheetLayout = serde_json::from_str(r#"{ "dpi": 600 }"#).unwrap();
/// assert_eq!(layout.dpi, 600);
/// assert_eq!(layout.sticker_width_mm, 83.8);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetLayout {
    /// Print resolution. Default: 300.
    pub dpi: u32,

    /// Width of one label in millimetres. Default: 83.8.
    pub sticker_width_mm: f64,

    /// Height of one label in millimetres. Default: 50.8.
    pub sticker_height_mm: f64,

    /// Extra size added to each axis of a padded image. Default: 5.0.
    ///
    /// Half of it is on each side, so every slot offset is shifted back by
    /// `bleed_mm / 2` to keep the label itself on its true origin.
    pub bleed_mm: f64,

    /// Page width in millimetres. Default: 210 (A4).
    pub page_width_mm: f64,

    /// Page height in millimetres. Default: 297 (A4).
    pub page_height_mm: f64,

    /// Distance from the top page edge to the first label row. Default: 21.5.
    pub first_row_mm: f64,

    /// Distance from the left page edge to the first label column. Default: 18.64.
    pub first_column_mm: f64,

    /// Horizontal gap between the two label columns. Default: 5.26.
    pub column_gap_mm: f64,

    /// Hard number of rows that may be placed on one page. Default: 4.
    pub rows_per_page: usize,

    /// Gaussian blur sigma, in pixels, for the padding background. Default: 16.
    pub blur_sigma: f32,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            dpi: 300,
            sticker_width_mm: 83.8,
            sticker_height_mm: 50.8,
            bleed_mm: 5.0,
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            first_row_mm: 21.5,
            first_column_mm: 18.64,
            column_gap_mm: 5.26,
            rows_per_page: 4,
            blur_sigma: 16.0,
        }
    }
}

impl SheetLayout {
    /// The HERMA 5028 layout. Same as [`SheetLayout::default`].
    pub fn herma_5028() -> Self {
        Self::default()
    }

    /// Convert millimetres to pixels at this layout's DPI.
    pub fn px(&self, mm: f64) -> u32 {
        mm_to_px(mm, self.dpi)
    }

    /// Size `(w, h)` a scaled image must fit into.
    pub fn footprint_px(&self) -> (u32, u32) {
        (self.px(self.sticker_width_mm), self.px(self.sticker_height_mm))
    }

    /// Size `(w, h)` of a padded image: the footprint plus bleed on each axis.
    pub fn padded_px(&self) -> (u32, u32) {
        (
            self.px(self.sticker_width_mm + self.bleed_mm),
            self.px(self.sticker_height_mm + self.bleed_mm),
        )
    }

    /// Size `(w, h)` of the page canvas.
    pub fn page_px(&self) -> (u32, u32) {
        (self.px(self.page_width_mm), self.px(self.page_height_mm))
    }

    /// Vertical distance between two consecutive images.
    ///
    /// Every other label row of the sheet is used, so this is two label heights.
    pub fn row_pitch_mm(&self) -> f64 {
        2.0 * self.sticker_height_mm
    }

    /// Pixel offsets for the `index`-th image (0-based) on a page.
    ///
    /// Does not check capacity; see [`crate::pipeline::compose::SheetCompositor`].
    pub fn slot(&self, index: usize) -> GridSlot {
        let shift = self.bleed_mm / 2.0;
        let y_mm = self.first_row_mm + self.row_pitch_mm() * index as f64 - shift;
        let left_mm = self.first_column_mm - shift;
        let right_mm = self.first_column_mm + self.sticker_width_mm + self.column_gap_mm - shift;

        GridSlot {
            left_x: self.px(left_mm),
            right_x: self.px(right_mm),
            y: self.px(y_mm),
        }
    }

    /// Check that the layout describes something that can be drawn.
    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.dpi == 0 {
            return Err("DPI must be > 0".into());
        }
        let lengths = [
            ("sticker_width_mm", self.sticker_width_mm),
            ("sticker_height_mm", self.sticker_height_mm),
            ("page_width_mm", self.page_width_mm),
            ("page_height_mm", self.page_height_mm),
        ];
        for (name, value) in lengths {
            if !(value.is_finite() && value > 0.0) {
                return Err(format!("{name} must be a positive length, got {value}"));
            }
        }
        if !(self.bleed_mm.is_finite() && self.bleed_mm >= 0.0) {
            return Err(format!("bleed_mm must be ≥ 0, got {}", self.bleed_mm));
        }
        let (fw, fh) = self.footprint_px();
        if fw == 0 || fh == 0 {
            return Err(format!(
                "label footprint is {fw}x{fh} px at {} DPI; raise the DPI",
                self.dpi
            ));
        }
        if self.rows_per_page == 0 {
            return Err("rows_per_page must be ≥ 1".into());
        }
        if !(self.blur_sigma.is_finite() && self.blur_sigma >= 0.0) {
            return Err(format!("blur_sigma must be ≥ 0, got {}", self.blur_sigma));
        }
        Ok(())
    }
}
