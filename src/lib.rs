//! GRUB theme preview - render a boot loader theme without rebooting
//!
//! This library parses GRUB `theme.txt` files, resolves the geometry of every
//! component against a screen size and paints the result to PNG or SVG.
//!
//! # Example
//!
//! ```rust
//! use grub_theme_preview::{render_with_config, RenderConfig};
//!
//! let theme = r##"
//!     desktop-color: "#203040"
//!     + boot_menu { left = 20% top = 20% width = 60% height = 60% }
//! "##;
//! let config = RenderConfig::new().with_screen_size(320, 200);
//! let image = render_with_config(theme, &config).unwrap();
//! assert_eq!(image.dimensions(), (320, 200));
//! ```

pub mod components;
pub mod config;
pub mod error;
pub mod layout;
pub mod paint;
pub mod palette;
pub mod renderer;
pub mod theme;

pub use config::{ConfigError, MenuEntry, RenderConfig};
pub use error::ParseError;
pub use layout::{BoxTree, EvalContext, Expr, LayoutError, Length, Rect};
pub use paint::{DisplayList, ImageCache, Painter};
pub use palette::{Color, Palette};
pub use renderer::{OutputFormat, SvgConfig};
pub use theme::{parse, Theme};

use std::path::Path;

use image::RgbaImage;
use thiserror::Error;

/// Errors that can occur during the render pipeline
#[derive(Debug, Error)]
pub enum RenderError {
    /// Error during parsing
    #[error("parse errors: {}", format_parse_errors(.0))]
    Parse(Vec<ParseError>),

    /// Error during layout
    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),

    /// Error encoding or saving the output image
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Error writing the output file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<Vec<ParseError>> for RenderError {
    fn from(errors: Vec<ParseError>) -> Self {
        RenderError::Parse(errors)
    }
}

fn format_parse_errors(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Walk a fully built tree and paint every box, parents before children
pub fn paint_tree(
    tree: &BoxTree,
    ctx: &EvalContext,
    painter: &mut Painter<'_>,
) -> Result<(), LayoutError> {
    tree.walk(ctx, |_, node, rect| painter.paint(node, rect))
}

fn print_tree(tree: &BoxTree, ctx: &EvalContext) -> Result<(), LayoutError> {
    eprintln!("=== Layout Debug ===");
    for (id, rect) in tree.resolve_all(ctx)? {
        let indent = "  ".repeat(tree.depth(id));
        eprintln!(
            "{}[{}] x={:.1} y={:.1} w={:.1} h={:.1}",
            indent,
            tree.get(id).name,
            rect.x,
            rect.y,
            rect.width,
            rect.height
        );
    }
    eprintln!("====================");
    Ok(())
}

/// Lay out a parsed theme and paint it into a display list
pub fn display_list(
    theme: &Theme,
    config: &RenderConfig,
    images: &mut ImageCache,
) -> Result<DisplayList, RenderError> {
    let tree = components::build_tree(theme, config)?;
    let ctx = EvalContext::for_screen(config.screen_width, config.screen_height);

    if config.debug {
        print_tree(&tree, &ctx)?;
    }

    let mut painter = Painter::new(images, config.screen_width, config.screen_height)
        .with_outline(config.outline);
    paint_tree(&tree, &ctx, &mut painter)?;
    let list = painter.finish();
    log::debug!("painted {} draw commands", list.len());
    Ok(list)
}

fn rasterize(list: &DisplayList, images: &mut ImageCache, config: &RenderConfig) -> RgbaImage {
    let has_text = list
        .commands()
        .iter()
        .any(|c| matches!(c, paint::DrawCommand::Text { .. }));
    let font = if has_text {
        renderer::load_font(config.font_file.as_deref())
    } else {
        None
    };
    renderer::render_raster(list, images, font)
}

/// Render theme source to an image with default configuration
pub fn render(source: &str) -> Result<RgbaImage, RenderError> {
    render_with_config(source, &RenderConfig::default())
}

/// Render theme source to an image
pub fn render_with_config(source: &str, config: &RenderConfig) -> Result<RgbaImage, RenderError> {
    let theme = parse(source)?;
    let mut images = ImageCache::new(config.resource_dir());
    let list = display_list(&theme, config, &mut images)?;
    Ok(rasterize(&list, &mut images, config))
}

/// Render theme source to an SVG document
pub fn render_svg_with_config(source: &str, config: &RenderConfig) -> Result<String, RenderError> {
    let theme = parse(source)?;
    let mut images = ImageCache::new(config.resource_dir());
    let list = display_list(&theme, config, &mut images)?;
    Ok(renderer::render_svg(&list, &mut images, &config.svg))
}

/// Render an already parsed theme and write it to `output`
pub fn render_to_file(
    theme: &Theme,
    config: &RenderConfig,
    output: &Path,
    format: OutputFormat,
) -> Result<(), RenderError> {
    let mut images = ImageCache::new(config.resource_dir());
    let list = display_list(theme, config, &mut images)?;
    match format {
        OutputFormat::Png => {
            rasterize(&list, &mut images, config).save_with_format(output, image::ImageFormat::Png)?
        }
        OutputFormat::Svg => {
            std::fs::write(output, renderer::render_svg(&list, &mut images, &config.svg))?
        }
    }
    log::debug!("wrote {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> RenderConfig {
        RenderConfig::new().with_screen_size(64, 48)
    }

    #[test]
    fn test_render_desktop_color() {
        let image = render_with_config(r##"desktop-color: "#ff0000""##, &small()).unwrap();
        assert_eq!(image.dimensions(), (64, 48));
        assert_eq!(image.get_pixel(10, 10).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_default_screen_size() {
        let image = render("").unwrap();
        assert_eq!(image.dimensions(), (1366, 768));
    }

    #[test]
    fn test_parse_error() {
        let err = render("+ boot_menu {").unwrap_err();
        assert!(matches!(err, RenderError::Parse(_)));
    }

    #[test]
    fn test_layout_error() {
        let err = render_with_config("+ boot_menu { item_spacing = 10% }", &small()).unwrap_err();
        assert!(matches!(
            err,
            RenderError::Layout(LayoutError::MalformedLength { .. })
        ));
    }

    #[test]
    fn test_outline_covers_screen_edge() {
        let config = small().with_outline(true);
        let image = render_with_config("", &config).unwrap();
        assert_eq!(image.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(image.get_pixel(63, 47).0, [255, 0, 0, 255]);
        assert_eq!(image.get_pixel(30, 20).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_render_svg() {
        let svg = render_svg_with_config(r##"desktop-color: "#00ff00""##, &small()).unwrap();
        assert!(svg.contains(r##"fill="#00ff00""##));
        assert!(svg.contains(r#"viewBox="0 0 64 48""#));
    }

    #[test]
    fn test_paint_tree_aborts_on_unknown() {
        let tree = BoxTree::new();
        let mut images = ImageCache::default();
        let mut painter = Painter::new(&mut images, 10, 10);
        let err = paint_tree(&tree, &EvalContext::new(), &mut painter).unwrap_err();
        assert!(matches!(err, LayoutError::UnresolvedUnknown { .. }));
    }
}
