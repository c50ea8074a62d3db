//! CLI binary for herma-sheet.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ConversionConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use herma_sheet::{
    convert, ConversionConfig, ConversionProgressCallback, PageMode, ProgressCallback, SheetLayout,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: one bar over the input images, plus a log
/// line per written page.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0);
        let style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  [{bar:42.green/238}] {pos:>3}/{len} images  {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ");

        bar.set_style(style);
        bar.set_prefix("Padding");
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }
}

impl ConversionProgressCallback for CliProgressCallback {
    fn on_conversion_start(&self, total_images: usize) {
        self.bar.set_length(total_images as u64);
    }

    fn on_image_complete(&self, _image_num: usize, _total: usize, path: &Path) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.bar.set_message(name);
        self.bar.inc(1);
    }

    fn on_page_written(&self, page_num: usize, path: &Path) {
        self.bar.println(format!(
            "  {} Page {:>2}  {}",
            green("✓"),
            page_num,
            dim(&path.display().to_string())
        ));
    }

    fn on_conversion_complete(&self, total_pages: usize, total_images: usize) {
        self.bar.finish_and_clear();
        eprintln!(
            "{} {} covers on {} pages",
            green("✔"),
            bold(&total_images.to_string()),
            bold(&total_pages.to_string())
        );
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Three covers per page → sheet.0.png, sheet.1.png, …
  cover-conv a.jpg b.jpg c.jpg d.jpg sheet.png

  # Up to four covers on one page, written to exactly sheet.png
  cover-conv --single-page a.jpg b.jpg sheet.png

  # Print at 600 DPI
  cover-conv --dpi 600 covers/*.jpg sheet.png

  # Different label stock (partial JSON, unset fields keep HERMA 5028 values)
  cover-conv --layout avery.json covers/*.jpg sheet.png

LAYOUT FILE FIELDS (millimetres unless noted):
  dpi, sticker_width_mm, sticker_height_mm, bleed_mm, page_width_mm,
  page_height_mm, first_row_mm, first_column_mm, column_gap_mm,
  rows_per_page (count), blur_sigma (pixels)
"#;

/// Convert cover images to HERMA 5028 sticker sheets.
#[derive(Parser, Debug)]
#[command(
    name = "cover-conv",
    version,
    about = "Convert cover images to HERMA 5028 sticker sheets",
    long_about = "Rotate, scale and blur-pad cover images, then tile them onto A4 pages \
laid out for HERMA 5028 labels. Every cover is printed twice, side by side. \
The output format follows the output file's extension.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Input images followed by the output path.
    #[arg(required = true, num_args = 2.., value_name = "INPUT... OUTPUT")]
    paths: Vec<PathBuf>,

    /// Enable DEBUG-level tracing logs.
    #[arg(short = 'v', long, visible_alias = "verbose")]
    debug: bool,

    /// Suppress all output except errors.
    #[arg(short, long)]
    quiet: bool,

    /// Put all covers on one page (fails past the last row) and write to OUTPUT exactly.
    #[arg(long, conflicts_with = "per_page")]
    single_page: bool,

    /// Covers per page in grouped mode.
    #[arg(long)]
    per_page: Option<usize>,

    /// Print resolution, overriding the layout.
    #[arg(long)]
    dpi: Option<u32>,

    /// JSON file with sheet layout overrides.
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Print a JSON summary of the written pages to stdout.
    #[arg(long)]
    json: bool,

    /// Disable progress bar.
    #[arg(long)]
    no_progress: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let show_progress = wants_progress(&cli, std::io::stderr().is_terminal());
    let filter = log_filter(&cli, show_progress);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    // ── Split positional paths ───────────────────────────────────────────
    let (output, inputs) = cli
        .paths
        .split_last()
        .context("Expected at least one input and an output path")?;
    let output = resolve_path(output)?;
    let inputs = inputs
        .iter()
        .map(|p| resolve_path(p))
        .collect::<Result<Vec<_>>>()?;

    // ── Build config ─────────────────────────────────────────────────────
    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new() as Arc<dyn ConversionProgressCallback>)
    } else {
        None
    };
    let config = build_config(&cli, progress_cb)?;

    // ── Run conversion ───────────────────────────────────────────────────
    let result = convert(&inputs, &output, &config).context("Conversion failed")?;

    if cli.json {
        let json = serde_json::to_string_pretty(&result).context("Failed to serialise output")?;
        println!("{json}");
    } else if !cli.quiet && !show_progress {
        for page in &result.pages {
            eprintln!("{}", page.path.display());
        }
        eprintln!(
            "Laid out {} covers on {} pages in {}ms",
            result.stats.total_images, result.stats.total_pages, result.stats.total_duration_ms
        );
    }

    Ok(())
}

/// The bar only draws on a terminal; elsewhere indicatif hides it and the
/// log lines have to carry the progress instead.
fn wants_progress(cli: &Cli, stderr_is_terminal: bool) -> bool {
    stderr_is_terminal && !cli.quiet && !cli.no_progress && !cli.json && !cli.debug
}

fn log_filter(cli: &Cli, show_progress: bool) -> &'static str {
    if cli.debug {
        "debug"
    } else if cli.quiet || show_progress {
        // INFO logs would interleave with the bar; the bar reports the same.
        "error"
    } else {
        "info"
    }
}

/// Map CLI args to `ConversionConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ConversionConfig> {
    let mut layout = match cli.layout {
        Some(ref path) => {
            let path = resolve_path(path)?;
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read layout from {:?}", path))?;
            serde_json::from_str::<SheetLayout>(&text)
                .with_context(|| format!("Invalid layout JSON in {:?}", path))?
        }
        None => SheetLayout::herma_5028(),
    };
    if let Some(dpi) = cli.dpi {
        layout.dpi = dpi;
    }

    let mode = if cli.single_page {
        PageMode::SinglePage
    } else {
        let per_page = cli.per_page.unwrap_or(herma_sheet::config::DEFAULT_PER_PAGE);
        PageMode::Grouped { per_page }
    };

    let mut builder = ConversionConfig::builder().layout(layout).mode(mode);
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}

/// Expand `~`, then anchor relative paths at the working directory.
fn resolve_path(path: &Path) -> Result<PathBuf> {
    let expanded = expand_tilde(path);
    std::path::absolute(&expanded)
        .with_context(|| format!("Failed to resolve path {:?}", expanded))
}

/// Replace a leading `~` with the home directory.
fn expand_tilde(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(rest),
        None => path.to_path_buf(),
    }
}
