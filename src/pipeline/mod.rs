//! Pipeline stages for building label sheets.
//!
//! Each submodule implements exactly one transformation step and works on
//! owned `RgbImage` values handed forward from the previous one.
//!
//! ## Data Flow
//!
//! ```text
//! load ──▶ orient ──▶ fill ──▶ compose ──▶ write
//! (decode)  (rotate,   (blur    (grid       (encode by
//!            scale)     pad)     paste)      extension)
//! ```
//!
//! 1. [`load`]    — open an input path, sniff the format, convert to RGB
//! 2. [`orient`]  — rotate portrait images, fit into the label footprint
//! 3. [`fill`]    — pad to footprint + bleed over a blurred stretch of itself
//! 4. [`compose`] — paste padded images twice per row onto a white page
//! 5. [`write`]   — derive page paths and save with the extension's encoder

pub mod compose;
pub mod fill;
pub mod load;
pub mod orient;
pub mod write;
