//! Configuration types for building label sheets.
//!
//! All behaviour is controlled through [`ConversionConfig`], built via its
//! [`ConversionConfigBuilder`]. The physical geometry lives in a
//! [`SheetLayout`] value carried by the config, so a whole run can be
//! repeated at another DPI or on another label stock by swapping one field.

use crate::error::SheetError;
use crate::layout::SheetLayout;
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default number of images per page in [`PageMode::Grouped`].
pub const DEFAULT_PER_PAGE: usize = 3;

/// How input images are distributed over pages.
///
/// There is no automatic continuation: a page never silently spills into the
/// next one. Either the caller asks for fixed-size groups, or everything goes
/// on one page and overflow is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageMode {
    /// Emit one page per `per_page` consecutive images. (default)
    ///
    /// The last page carries whatever is left; its empty rows stay white.
    /// Output files always get the page index inserted before the suffix.
    Grouped { per_page: usize },
    /// Put every image on a single page, failing with
    /// [`SheetError::PageCapacityExceeded`] past `rows_per_page`.
    ///
    /// The page is written to the exact output path.
    SinglePage,
}

impl Default for PageMode {
    fn default() -> Self {
        PageMode::Grouped {
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// Configuration for a sheet conversion.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use herma_sheet::{ConversionConfig, PageMode};
///
/// let config = ConversionConfig::builder()
///     .dpi(600)
///     .mode(PageMode::SinglePage)
///     .build()
///     .unwrap();
/// assert_eq!(config.layout.dpi, 600);
/// ```
#[derive(Clone, Default)]
pub struct ConversionConfig {
    /// Physical sheet geometry. Default: HERMA 5028 at 300 DPI.
    pub layout: SheetLayout,

    /// Page distribution policy. Default: groups of three.
    pub mode: PageMode,

    /// Optional per-image / per-page event sink.
    pub progress_callback: Option<ProgressCallback>,
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("layout", &self.layout)
            .field("mode", &self.mode)
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn ConversionProgressCallback>"),
            )
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }

    /// Check the layout and the mode against each other.
    pub fn validate(&self) -> Result<(), SheetError> {
        self.layout.validate().map_err(SheetError::InvalidConfig)?;
        if let PageMode::Grouped { per_page } = self.mode {
            if per_page == 0 {
                return Err(SheetError::InvalidConfig(
                    "per_page must be ≥ 1".into(),
                ));
            }
            if per_page > self.layout.rows_per_page {
                return Err(SheetError::InvalidConfig(format!(
                    "per_page ({per_page}) exceeds the sheet's {} rows",
                    self.layout.rows_per_page
                )));
            }
        }
        Ok(())
    }
}

/// Builder for [`ConversionConfig`].
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl fmt::Debug for ConversionConfigBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfigBuilder")
            .field("config", &self.config)
            .finish()
    }
}

impl ConversionConfigBuilder {
    pub fn layout(mut self, layout: SheetLayout) -> Self {
        self.config.layout = layout;
        self
    }

    pub fn dpi(mut self, dpi: u32) -> Self {
        self.config.layout.dpi = dpi;
        self
    }

    pub fn blur_sigma(mut self, sigma: f32) -> Self {
        self.config.layout.blur_sigma = sigma;
        self
    }

    pub fn mode(mut self, mode: PageMode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Shorthand for `mode(PageMode::Grouped { per_page })`.
    pub fn per_page(mut self, per_page: usize) -> Self {
        self.config.mode = PageMode::Grouped { per_page };
        self
    }

    pub fn single_page(mut self) -> Self {
        self.config.mode = PageMode::SinglePage;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, SheetError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_groups_of_three() {
        let c = ConversionConfig::default();
        assert_eq!(c.mode, PageMode::Grouped { per_page: 3 });
        assert_eq!(c.layout, SheetLayout::herma_5028());
        assert!(c.validate().is_ok());
    }

    #[test]
    fn builder_rejects_zero_per_page() {
        let err = ConversionConfig::builder().per_page(0).build().unwrap_err();
        assert!(matches!(err, SheetError::InvalidConfig(_)));
    }

    #[test]
    fn builder_rejects_groups_larger_than_sheet() {
        let err = ConversionConfig::builder().per_page(5).build().unwrap_err();
        assert!(err.to_string().contains("4 rows"), "got: {err}");
    }

    #[test]
    fn builder_accepts_full_sheet_groups() {
        let c = ConversionConfig::builder().per_page(4).build().unwrap();
        assert_eq!(c.mode, PageMode::Grouped { per_page: 4 });
    }

    #[test]
    fn builder_rejects_zero_dpi() {
        assert!(ConversionConfig::builder().dpi(0).build().is_err());
    }

    #[test]
    fn builder_rejects_negative_blur() {
        assert!(ConversionConfig::builder().blur_sigma(-1.0).build().is_err());
    }

    #[test]
    fn single_page_ignores_per_page_limit() {
        let layout = SheetLayout {
            rows_per_page: 1,
            ..SheetLayout::default()
        };
        let c = ConversionConfig::builder()
            .layout(layout)
            .single_page()
            .build()
            .unwrap();
        assert_eq!(c.mode, PageMode::SinglePage);
    }

    #[test]
    fn debug_hides_callback() {
        let s = format!("{:?}", ConversionConfig::default());
        assert!(s.contains("ConversionConfig"));
        assert!(s.contains("progress_callback: None"));
    }
}
