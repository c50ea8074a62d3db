//! Sheet compositor: paste padded images onto a white page canvas.
//!
//! Each image occupies one row and is pasted twice, once per label column.
//! A compositor holds exactly one page; it refuses the image after the
//! layout's last row instead of starting a new canvas. Splitting the input
//! into pages is [`crate::stream::SheetStream`]'s job.

use crate::error::SheetError;
use crate::layout::{GridSlot, SheetLayout};
use image::imageops;
use image::{Rgb, RgbImage};
use tracing::{debug, warn};

/// Accumulates padded images on one page canvas.
#[derive(Debug, Clone)]
pub struct SheetCompositor {
    layout: SheetLayout,
    canvas: RgbImage,
    placed: usize,
}

impl SheetCompositor {
    /// Start a blank white page for `layout`.
    pub fn new(layout: &SheetLayout) -> Self {
        let (w, h) = layout.page_px();
        debug!("New page canvas {}x{} px", w, h);
        Self {
            layout: layout.clone(),
            canvas: RgbImage::from_pixel(w, h, Rgb([255, 255, 255])),
            placed: 0,
        }
    }

    /// Number of images placed so far.
    pub fn placed(&self) -> usize {
        self.placed
    }

    pub fn is_empty(&self) -> bool {
        self.placed == 0
    }

    /// Paste `sticker` into the next row, in both columns.
    ///
    /// Returns the slot used. Parts of the image that fall outside the
    /// canvas are clipped.
    ///
    /// # Errors
    /// [`SheetError::PageCapacityExceeded`] once `rows_per_page` images are on
    /// the page. The canvas is left unchanged.
    pub fn place(&mut self, sticker: &RgbImage) -> Result<GridSlot, SheetError> {
        let capacity = self.layout.rows_per_page;
        if self.placed >= capacity {
            return Err(SheetError::PageCapacityExceeded {
                index: self.placed,
                capacity,
            });
        }

        let slot = self.layout.slot(self.placed);
        let (page_w, page_h) = self.canvas.dimensions();
        let bottom = u64::from(slot.y) + u64::from(sticker.height());
        let right = u64::from(slot.right_x) + u64::from(sticker.width());
        if bottom > u64::from(page_h) || right > u64::from(page_w) {
            warn!(
                "Row {} extends past the page edge ({}x{} px at ({}, {}) on {}x{} px); it will be clipped",
                self.placed + 1,
                sticker.width(),
                sticker.height(),
                slot.right_x,
                slot.y,
                page_w,
                page_h
            );
        }

        let y = i64::from(slot.y);
        imageops::replace(&mut self.canvas, sticker, i64::from(slot.left_x), y);
        imageops::replace(&mut self.canvas, sticker, i64::from(slot.right_x), y);
        debug!(
            "Placed row {} at x={}/{} y={}",
            self.placed + 1,
            slot.left_x,
            slot.right_x,
            slot.y
        );

        self.placed += 1;
        Ok(slot)
    }

    /// Finish the page and hand over the canvas.
    pub fn finish(self) -> RgbImage {
        self.canvas
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

    fn small_layout() -> SheetLayout {
        SheetLayout {
            dpi: 30,
            ..SheetLayout::default()
        }
    }

    fn flat(layout: &SheetLayout, shade: u8) -> RgbImage {
        let (w, h) = layout.padded_px();
        RgbImage::from_pixel(w, h, Rgb([shade, 0, 255 - shade]))
    }

    #[test]
    fn blank_page_is_white_and_page_sized() {
        let layout = small_layout();
        let page = SheetCompositor::new(&layout).finish();
        assert_eq!(page.dimensions(), layout.page_px());
        assert!(page.pixels().all(|p| *p == WHITE));
    }

    #[test]
    fn three_images_give_six_instances_at_grid_offsets() {
        let layout = SheetLayout::herma_5028();
        let mut sheet = SheetCompositor::new(&layout);
        let stickers: Vec<RgbImage> = (0..3).map(|i| flat(&layout, 10 + i * 50)).collect();

        for s in &stickers {
            sheet.place(s).unwrap();
        }
        assert_eq!(sheet.placed(), 3);
        let page = sheet.finish();

        let (pw, ph) = layout.padded_px();
        for (i, s) in stickers.iter().enumerate() {
            let slot = layout.slot(i);
            let colour = *s.get_pixel(0, 0);
            for x in [slot.left_x, slot.right_x] {
                assert_eq!(*page.get_pixel(x, slot.y), colour, "row {i} col x={x}");
                assert_eq!(*page.get_pixel(x + pw - 1, slot.y + ph - 1), colour);
            }
            // Just outside the first column stays white.
            assert_eq!(*page.get_pixel(slot.left_x - 1, slot.y), WHITE);
        }

        // Row 0 at the measured HERMA offsets.
        assert_eq!(*page.get_pixel(190, 224), *stickers[0].get_pixel(0, 0));
        assert_eq!(*page.get_pixel(1242, 224), *stickers[0].get_pixel(0, 0));
        assert_eq!(*page.get_pixel(189, 224), WHITE);
    }

    #[test]
    fn columns_are_identical() {
        let layout = small_layout();
        let (w, h) = layout.padded_px();
        let sticker = RgbImage::from_fn(w, h, |x, y| Rgb([x as u8, y as u8, 9]));
        let mut sheet = SheetCompositor::new(&layout);
        let slot = sheet.place(&sticker).unwrap();
        let page = sheet.finish();

        for y in 0..h {
            for x in 0..w {
                assert_eq!(
                    page.get_pixel(slot.left_x + x, slot.y + y),
                    page.get_pixel(slot.right_x + x, slot.y + y)
                );
            }
        }
    }

    #[test]
    fn four_fit_and_fifth_overflows() {
        let layout = small_layout();
        let sticker = flat(&layout, 100);
        let mut sheet = SheetCompositor::new(&layout);

        for i in 0..4 {
            let slot = sheet.place(&sticker).unwrap();
            assert_eq!(slot, layout.slot(i));
        }
        let err = sheet.place(&sticker).unwrap_err();
        assert!(
            matches!(
                err,
                SheetError::PageCapacityExceeded {
                    index: 4,
                    capacity: 4
                }
            ),
            "got: {err}"
        );
        assert_eq!(sheet.placed(), 4);
    }

    #[test]
    fn capacity_follows_layout() {
        let layout = SheetLayout {
            rows_per_page: 1,
            ..small_layout()
        };
        let sticker = flat(&layout, 1);
        let mut sheet = SheetCompositor::new(&layout);
        sheet.place(&sticker).unwrap();
        assert!(sheet.place(&sticker).is_err());
    }

    #[test]
    fn off_page_row_is_clipped_not_fatal() {
        // On A4 the fourth row starts below the bottom edge.
        let layout = small_layout();
        let (_, page_h) = layout.page_px();
        assert!(layout.slot(3).y >= page_h);

        let mut sheet = SheetCompositor::new(&layout);
        let sticker = flat(&layout, 30);
        for _ in 0..4 {
            sheet.place(&sticker).unwrap();
        }
        assert_eq!(sheet.finish().dimensions(), layout.page_px());
    }
}
