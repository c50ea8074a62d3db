//! # herma-sheet
//!
//! Lay out cover images on HERMA 5028 adhesive label sheets (A4, two columns
//! of 83.8 × 50.8 mm labels) ready for printing.
//!
//! Each image is turned landscape, scaled into the label footprint, padded by
//! a 5 mm bleed filled with a blurred copy of itself, and pasted twice per
//! row onto a white 300-DPI page.
//!
//! ## Pipeline Overview
//!
//! ```text
//! image paths
//!  │
//!  ├─ 1. Load     decode, convert to RGB
//!  ├─ 2. Orient   rotate portrait → landscape, fit into 83.8 × 50.8 mm
//!  ├─ 3. Fill     pad to 88.8 × 55.8 mm over a Gaussian-blurred stretch
//!  ├─ 4. Compose  paste into row i, both columns, on a white A4 canvas
//!  └─ 5. Write    encode by the output extension (sheet.0.png, sheet.1.png, …)
//! ```
//!
//! Stages run lazily, one image at a time; see [`stream`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use herma_sheet::{convert, ConversionConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::default();
//!     let output = convert(["front.jpg", "back.jpg"], "sheet.png", &config)?;
//!     for page in &output.pages {
//!         println!("{} ({} covers)", page.path.display(), page.stickers);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `cover-conv` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod layout;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod stream;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder, PageMode};
pub use convert::{convert, render_sheets};
pub use error::SheetError;
pub use layout::{mm_to_px, GridSlot, SheetLayout};
pub use output::{ConversionOutput, ConversionStats, PageResult};
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback};
pub use stream::{sheet_stream, Sheet, SheetStream};
