//! Output backends
//!
//! Both backends consume a [`DisplayList`](crate::paint::DisplayList) and
//! never see the box tree: `raster` produces pixels, `svg` produces markup.

pub mod config;
pub mod raster;
pub mod svg;

pub use config::SvgConfig;
pub use raster::{load_font, render_raster, RasterRenderer};
pub use svg::{render_svg, SvgBuilder};

/// Output file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Png,
    Svg,
}

impl OutputFormat {
    /// Guess the format from a file name, defaulting to PNG
    pub fn from_path(path: &std::path::Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("svg") => OutputFormat::Svg,
            _ => OutputFormat::Png,
        }
    }
}
