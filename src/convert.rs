//! Conversion entry points.
//!
//! [`convert`] runs the whole pipeline and writes every page to disk.
//! [`render_sheets`] stops short of the writer and returns the pages in memory.
//! Use [`crate::stream::sheet_stream`] directly to handle pages one at a time.

use crate::config::{ConversionConfig, PageMode};
use crate::error::SheetError;
use crate::output::{ConversionOutput, ConversionStats, PageResult};
use crate::pipeline::write;
use crate::stream::{sheet_stream, Sheet};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Lay out `inputs` on label sheets and write them next to `output`.
///
/// In [`PageMode::Grouped`] every page goes to `output` with its page index
/// inserted before the extension, even when there is only one page. In
/// [`PageMode::SinglePage`] the page is written to `output` itself.
///
/// # Errors
/// Any [`SheetError`]; the run stops at the first one. Pages written before
/// the failure are left on disk.
pub fn convert<I, P>(
    inputs: I,
    output: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, SheetError>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let start = Instant::now();
    let output = output.as_ref();
    let paths = collect_inputs(inputs)?;
    config.validate()?;

    // ── Step 1: Resolve the encoder before any decoding work ─────────────
    let format = write::output_format(output)?;
    info!(
        "Laying out {} images ({:?}) → {}",
        paths.len(),
        config.mode,
        output.display()
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_start(paths.len());
    }

    // ── Step 2: Pull pages through the pipeline and write each ───────────
    let mut pages = Vec::new();
    for sheet in sheet_stream(&paths, config) {
        let sheet = sheet?;
        let path = match config.mode {
            PageMode::Grouped { .. } => write::page_output_path(output, sheet.index),
            PageMode::SinglePage => output.to_path_buf(),
        };
        write::write_page(&sheet.image, &path, format)?;

        if let Some(ref cb) = config.progress_callback {
            cb.on_page_written(sheet.index + 1, &path);
        }
        pages.push(PageResult {
            page_index: sheet.index,
            path,
            stickers: sheet.stickers,
        });
    }

    let stats = ConversionStats {
        total_images: paths.len(),
        total_pages: pages.len(),
        total_duration_ms: start.elapsed().as_millis() as u64,
    };
    info!(
        "Conversion complete: {} images on {} pages, {}ms total",
        stats.total_images, stats.total_pages, stats.total_duration_ms
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_complete(stats.total_pages, stats.total_images);
    }

    Ok(ConversionOutput { pages, stats })
}

/// Lay out `inputs` and return the composed pages without writing them.
pub fn render_sheets<I, P>(inputs: I, config: &ConversionConfig) -> Result<Vec<Sheet>, SheetError>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let paths = collect_inputs(inputs)?;
    config.validate()?;
    sheet_stream(&paths, config).collect()
}

fn collect_inputs<I, P>(inputs: I) -> Result<Vec<PathBuf>, SheetError>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let paths: Vec<PathBuf> = inputs
        .into_iter()
        .map(|p| p.as_ref().to_path_buf())
        .collect();
    if paths.is_empty() {
        return Err(SheetError::NoInputs);
    }
    Ok(paths)
}
