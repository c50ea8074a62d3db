//! Lazy, pull-based sheet assembly.
//!
//! [`sheet_stream`] chains the per-image stages into one iterator and groups
//! its output into pages. Nothing is decoded until the caller asks for the
//! next page, and only one page canvas plus one in-flight image are alive at
//! a time. The stream is single-pass: once it ends, or yields an error,
//! it stays finished.

use crate::config::{ConversionConfig, PageMode};
use crate::error::SheetError;
use crate::layout::SheetLayout;
use crate::pipeline::compose::SheetCompositor;
use crate::pipeline::{fill, load, orient};
use image::RgbImage;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One composed page.
#[derive(Debug, Clone)]
pub struct Sheet {
    /// 0-indexed page number.
    pub index: usize,
    /// Number of distinct images on the page.
    pub stickers: usize,
    pub image: RgbImage,
}

/// Load, orient, scale and pad one input.
pub fn prepare_sticker(path: &Path, layout: &SheetLayout) -> Result<RgbImage, SheetError> {
    let image = load::load_image(path)?;
    let scaled = orient::orient_and_scale(image, layout);
    Ok(fill::pad_with_blur(&scaled, layout))
}

/// Lazily turn `paths` into padded stickers, reporting each to the config's callback.
pub fn stickers<'a>(
    paths: &'a [PathBuf],
    config: &'a ConversionConfig,
) -> impl Iterator<Item = Result<RgbImage, SheetError>> + 'a {
    let total = paths.len();
    paths.iter().enumerate().map(move |(i, path)| {
        let sticker = prepare_sticker(path, &config.layout)?;
        if let Some(ref cb) = config.progress_callback {
            cb.on_image_complete(i + 1, total, path);
        }
        Ok(sticker)
    })
}

/// Build the page iterator for `paths` under `config`.
///
/// The config is assumed valid; see [`ConversionConfig::validate`].
pub fn sheet_stream<'a>(
    paths: &'a [PathBuf],
    config: &'a ConversionConfig,
) -> SheetStream<impl Iterator<Item = Result<RgbImage, SheetError>> + 'a> {
    SheetStream::new(stickers(paths, config), config.layout.clone(), config.mode)
}

/// Groups a stream of padded stickers into pages according to a [`PageMode`].
#[derive(Debug)]
pub struct SheetStream<I> {
    stickers: I,
    layout: SheetLayout,
    mode: PageMode,
    next_index: usize,
    done: bool,
}

impl<I> SheetStream<I>
where
    I: Iterator<Item = Result<RgbImage, SheetError>>,
{
    pub fn new(stickers: I, layout: SheetLayout, mode: PageMode) -> Self {
        Self {
            stickers,
            layout,
            mode,
            next_index: 0,
            done: false,
        }
    }

    fn page_limit(&self) -> usize {
        match self.mode {
            PageMode::Grouped { per_page } => per_page,
            PageMode::SinglePage => usize::MAX,
        }
    }

    fn fail(&mut self, err: SheetError) -> Option<Result<Sheet, SheetError>> {
        self.done = true;
        Some(Err(err))
    }
}

impl<I> Iterator for SheetStream<I>
where
    I: Iterator<Item = Result<RgbImage, SheetError>>,
{
    type Item = Result<Sheet, SheetError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let limit = self.page_limit();
        // The canvas is only allocated once there is something to put on it.
        let mut page: Option<SheetCompositor> = None;

        while page.as_ref().map_or(0, SheetCompositor::placed) < limit {
            let sticker = match self.stickers.next() {
                None => {
                    self.done = true;
                    break;
                }
                Some(Err(e)) => return self.fail(e),
                Some(Ok(sticker)) => sticker,
            };

            let compositor = page.get_or_insert_with(|| SheetCompositor::new(&self.layout));
            if let Err(e) = compositor.place(&sticker) {
                return self.fail(e);
            }
        }

        let compositor = page?;
        let index = self.next_index;
        self.next_index += 1;
        debug!(
            "Page {} complete with {} images",
            index + 1,
            compositor.placed()
        );

        Some(Ok(Sheet {
            index,
            stickers: compositor.placed(),
            image: compositor.finish(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use std::cell::Cell;
    use std::rc::Rc;

    fn layout() -> SheetLayout {
        SheetLayout {
            dpi: 30,
            ..SheetLayout::default()
        }
    }

    fn padded(layout: &SheetLayout) -> RgbImage {
        let (w, h) = layout.padded_px();
        RgbImage::from_pixel(w, h, Rgb([40, 80, 120]))
    }

    fn ok_stickers(n: usize) -> impl Iterator<Item = Result<RgbImage, SheetError>> {
        let l = layout();
        (0..n).map(move |_| Ok(padded(&l)))
    }

    fn counts(stream: impl Iterator<Item = Result<Sheet, SheetError>>) -> Vec<usize> {
        stream.map(|s| s.unwrap().stickers).collect()
    }

    #[test]
    fn groups_of_three() {
        let s = SheetStream::new(ok_stickers(7), layout(), PageMode::Grouped { per_page: 3 });
        assert_eq!(counts(s), vec![3, 3, 1]);
    }

    #[test]
    fn exact_multiple_has_no_trailing_empty_page() {
        let s = SheetStream::new(ok_stickers(6), layout(), PageMode::Grouped { per_page: 3 });
        assert_eq!(counts(s), vec![3, 3]);
    }

    #[test]
    fn empty_input_gives_no_pages() {
        let mut s = SheetStream::new(ok_stickers(0), layout(), PageMode::default());
        assert!(s.next().is_none());
    }

    #[test]
    fn page_indices_count_up() {
        let s = SheetStream::new(ok_stickers(5), layout(), PageMode::Grouped { per_page: 2 });
        let idx: Vec<usize> = s.map(|p| p.unwrap().index).collect();
        assert_eq!(idx, vec![0, 1, 2]);
    }

    #[test]
    fn single_page_takes_four() {
        let s = SheetStream::new(ok_stickers(4), layout(), PageMode::SinglePage);
        assert_eq!(counts(s), vec![4]);
    }

    #[test]
    fn single_page_fails_on_fifth_and_stops() {
        let mut s = SheetStream::new(ok_stickers(5), layout(), PageMode::SinglePage);
        let err = s.next().unwrap().unwrap_err();
        assert!(matches!(err, SheetError::PageCapacityExceeded { index: 4, .. }));
        assert!(s.next().is_none());
    }

    #[test]
    fn upstream_error_ends_stream() {
        let l = layout();
        let items: Vec<Result<RgbImage, SheetError>> = vec![
            Ok(padded(&l)),
            Err(SheetError::InputNotFound {
                path: PathBuf::from("gone.png"),
            }),
            Ok(padded(&l)),
        ];
        let mut s = SheetStream::new(items.into_iter(), l, PageMode::default());
        assert!(matches!(
            s.next(),
            Some(Err(SheetError::InputNotFound { .. }))
        ));
        assert!(s.next().is_none());
    }

    #[test]
    fn pulls_only_what_one_page_needs() {
        let pulled = Rc::new(Cell::new(0));
        let counter = pulled.clone();
        let l = layout();
        let upstream = (0..9).map(move |_| {
            counter.set(counter.get() + 1);
            Ok(padded(&l))
        });

        let mut s = SheetStream::new(upstream, layout(), PageMode::Grouped { per_page: 3 });
        s.next().unwrap().unwrap();
        assert_eq!(pulled.get(), 3);
        s.next().unwrap().unwrap();
        assert_eq!(pulled.get(), 6);
    }
}
