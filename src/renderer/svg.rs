//! SVG generation from display lists

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::{ImageFormat, RgbaImage};

use crate::layout::{Rect, TextAlign};
use crate::paint::{DisplayList, DrawCommand, ImageCache};
use crate::palette::Color;

use super::SvgConfig;

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: SvgConfig,
    elements: Vec<String>,
    indent: usize,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            elements: vec![],
            indent: 1,
        }
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    /// Add a filled rectangle
    pub fn add_rect(&mut self, rect: Rect, color: Color) {
        self.elements.push(format!(
            r#"{}<rect class="{}" x="{}" y="{}" width="{}" height="{}"{}/>"#,
            self.indent_str(),
            self.config.class("fill"),
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            fill_attrs(color)
        ));
    }

    /// Add a one pixel outline
    pub fn add_outline(&mut self, rect: Rect, color: Color) {
        // Stroke centered on the inner pixel row, like the raster backend
        self.elements.push(format!(
            r#"{}<rect class="{}" x="{}" y="{}" width="{}" height="{}" fill="none" stroke="{}" stroke-width="1"/>"#,
            self.indent_str(),
            self.config.class("outline"),
            rect.x + 0.5,
            rect.y + 0.5,
            (rect.width - 1.0).max(0.0),
            (rect.height - 1.0).max(0.0),
            color.to_hex()
        ));
    }

    /// Add an image stretched to `rect`
    pub fn add_image(&mut self, rect: Rect, href: &str) {
        self.elements.push(format!(
            r#"{}<image class="{}" x="{}" y="{}" width="{}" height="{}" preserveAspectRatio="none" href="{href}" xlink:href="{href}"/>"#,
            self.indent_str(),
            self.config.class("image"),
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            href = escape_xml(href)
        ));
    }

    /// Add a single line of text, top-aligned in `rect`
    pub fn add_text(&mut self, text: &str, rect: Rect, font_size: f64, color: Color, align: TextAlign) {
        let (x, anchor) = match align {
            TextAlign::Left => (rect.x, "start"),
            TextAlign::Center => (rect.x + rect.width / 2.0, "middle"),
            TextAlign::Right => (rect.right(), "end"),
        };

        self.elements.push(format!(
            r#"{}<text class="{}" x="{}" y="{}" font-size="{}" text-anchor="{}" dominant-baseline="text-before-edge"{}>{}</text>"#,
            self.indent_str(),
            self.config.class("text"),
            x,
            rect.y,
            font_size,
            anchor,
            fill_attrs(color),
            escape_xml(text)
        ));
    }

    /// Build the final SVG string
    pub fn build(self, width: u32, height: u32) -> String {
        let nl = self.newline();

        let mut svg = String::new();

        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = width,
            h = height
        ));
        svg.push_str(nl);

        // Canvas background, matching the raster backend
        svg.push_str(&format!(
            r##"{}<rect width="{}" height="{}" fill="#000000"/>"##,
            self.indent_str(),
            width,
            height
        ));
        svg.push_str(nl);

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");

        svg
    }
}

fn fill_attrs(color: Color) -> String {
    if color.a == 255 {
        format!(r#" fill="{}""#, color.to_hex())
    } else {
        format!(
            r#" fill="{}" fill-opacity="{}""#,
            color.to_hex(),
            f64::from(color.a) / 255.0
        )
    }
}

/// `data:` URI holding the image as PNG
pub fn png_data_uri(image: &RgbaImage) -> Result<String, image::ImageError> {
    let mut bytes = Cursor::new(Vec::new());
    image.write_to(&mut bytes, ImageFormat::Png)?;
    Ok(format!(
        "data:image/png;base64,{}",
        STANDARD.encode(bytes.into_inner())
    ))
}

fn image_href(name: &str, images: &mut ImageCache, config: &SvgConfig) -> Option<String> {
    if !config.embed_images {
        return Some(images.path_of(name).to_string_lossy().into_owned());
    }
    let image = images.get(name)?;
    match png_data_uri(&image) {
        Ok(uri) => Some(uri),
        Err(e) => {
            log::warn!("cannot embed image '{}': {}", name, e);
            None
        }
    }
}

/// Render a display list to an SVG string
pub fn render_svg(list: &DisplayList, images: &mut ImageCache, config: &SvgConfig) -> String {
    let mut builder = SvgBuilder::new(config.clone());

    for command in list.commands() {
        match command {
            DrawCommand::FillRect { rect, color } => builder.add_rect(*rect, *color),
            DrawCommand::StrokeRect { rect, color } => builder.add_outline(*rect, *color),
            DrawCommand::Image { name, rect } => {
                if let Some(href) = image_href(name, images, config) {
                    builder.add_image(*rect, &href);
                }
            }
            DrawCommand::Text {
                text,
                rect,
                font_size,
                color,
                align,
            } => builder.add_text(text, *rect, *font_size, *color, *align),
        }
    }

    builder.build(list.width(), list.height())
}

/// Escape special XML characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
