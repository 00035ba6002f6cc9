//! Raster backend
//!
//! Executes a [`DisplayList`] onto an RGBA canvas. Images are resized with
//! a Lanczos3 filter and alpha-composited, text is rasterised with fontdue.

use std::path::Path;

use fontdue::{Font, FontSettings};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::layout::{Rect, TextAlign};
use crate::paint::{DisplayList, DrawCommand, ImageCache};
use crate::palette::Color;

/// Fonts tried when none is configured
pub const FONT_SEARCH_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Load the configured font, or the first system font found
pub fn load_font(configured: Option<&Path>) -> Option<Font> {
    if let Some(path) = configured {
        match read_font(path) {
            Some(font) => return Some(font),
            None => log::warn!("cannot load font '{}', searching system fonts", path.display()),
        }
    }

    let font = FONT_SEARCH_PATHS
        .iter()
        .find_map(|path| read_font(Path::new(path)));
    if font.is_none() {
        log::warn!("no usable font found, text will not be drawn");
    }
    font
}

fn read_font(path: &Path) -> Option<Font> {
    let data = std::fs::read(path).ok()?;
    match Font::from_bytes(data, FontSettings::default()) {
        Ok(font) => {
            log::debug!("loaded font {}", path.display());
            Some(font)
        }
        Err(e) => {
            log::warn!("invalid font '{}': {}", path.display(), e);
            None
        }
    }
}

/// Software renderer for display lists
pub struct RasterRenderer {
    buffer: RgbaImage,
    font: Option<Font>,
}

impl RasterRenderer {
    /// A black canvas of the given size
    pub fn new(width: u32, height: u32, font: Option<Font>) -> Self {
        Self {
            buffer: RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255])),
            font,
        }
    }

    /// Execute every command, back to front
    pub fn render(&mut self, list: &DisplayList, images: &mut ImageCache) {
        for command in list.commands() {
            match command {
                DrawCommand::FillRect { rect, color } => self.fill_rect(*rect, *color),
                DrawCommand::StrokeRect { rect, color } => self.stroke_rect(*rect, *color),
                DrawCommand::Image { name, rect } => match images.get(name) {
                    Some(image) => self.draw_image(&image, *rect),
                    None => log::warn!("image '{}' unavailable, skipped", name),
                },
                DrawCommand::Text {
                    text,
                    rect,
                    font_size,
                    color,
                    align,
                } => self.draw_text(text, *rect, *font_size as f32, *color, *align),
            }
        }
    }

    pub fn into_image(self) -> RgbaImage {
        self.buffer
    }

    /// Pixel bounds of `rect` clipped to the canvas, as (x0, y0, x1, y1)
    fn clip(&self, rect: Rect) -> Option<(u32, u32, u32, u32)> {
        let x0 = rect.x.round().max(0.0);
        let y0 = rect.y.round().max(0.0);
        let x1 = rect.right().round().min(f64::from(self.buffer.width()));
        let y1 = rect.bottom().round().min(f64::from(self.buffer.height()));
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }

    fn blend_pixel(&mut self, x: u32, y: u32, color: Color, coverage: u8) {
        let alpha = (u16::from(color.a) * u16::from(coverage) / 255) as u8;
        if alpha == 0 {
            return;
        }
        let bg = *self.buffer.get_pixel(x, y);
        let fg = Rgba([color.r, color.g, color.b, 255]);
        self.buffer.put_pixel(x, y, alpha_blend(fg, bg, alpha));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some((x0, y0, x1, y1)) = self.clip(rect) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                self.blend_pixel(x, y, color, 255);
            }
        }
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color) {
        let (x, y) = (rect.x.round(), rect.y.round());
        let (right, bottom) = (rect.right().round() - 1.0, rect.bottom().round() - 1.0);
        let (width, height) = ((right - x + 1.0).max(1.0), (bottom - y + 1.0).max(1.0));
        self.fill_rect(Rect::new(x, y, width, 1.0), color);
        self.fill_rect(Rect::new(x, bottom.max(y), width, 1.0), color);
        self.fill_rect(Rect::new(x, y, 1.0, height), color);
        self.fill_rect(Rect::new(right.max(x), y, 1.0, height), color);
    }

    fn draw_image(&mut self, image: &RgbaImage, rect: Rect) {
        let rect = Rect::new(
            rect.x.round(),
            rect.y.round(),
            rect.width.round(),
            rect.height.round(),
        );
        let (src_w, src_h) = image.dimensions();
        if rect.width < 1.0 || rect.height < 1.0 || src_w == 0 || src_h == 0 {
            return;
        }
        // Only the part of the image that lands on the canvas is scaled
        let Some((x0, y0, x1, y1)) = self.clip(rect) else {
            return;
        };
        let (cx0, cx1) = source_span(
            f64::from(x0) - rect.x,
            f64::from(x1) - rect.x,
            f64::from(src_w) / rect.width,
            src_w,
        );
        let (cy0, cy1) = source_span(
            f64::from(y0) - rect.y,
            f64::from(y1) - rect.y,
            f64::from(src_h) / rect.height,
            src_h,
        );

        let visible = imageops::crop_imm(image, cx0, cy0, cx1 - cx0, cy1 - cy0).to_image();
        let (width, height) = (x1 - x0, y1 - y0);
        let scaled = if visible.dimensions() == (width, height) {
            visible
        } else {
            imageops::resize(&visible, width, height, FilterType::Lanczos3)
        };
        imageops::overlay(&mut self.buffer, &scaled, i64::from(x0), i64::from(y0));
    }

    fn text_width(font: &Font, text: &str, font_size: f32) -> f32 {
        text.chars()
            .filter(|ch| !ch.is_control())
            .map(|ch| font.metrics(ch, font_size).advance_width)
            .sum()
    }

    fn draw_text(&mut self, text: &str, rect: Rect, font_size: f32, color: Color, align: TextAlign) {
        let Some(font) = self.font.take() else {
            return;
        };

        let width = Self::text_width(&font, text, font_size);
        let mut cursor_x = match align {
            TextAlign::Left => rect.x as f32,
            TextAlign::Center => rect.x as f32 + (rect.width as f32 - width) / 2.0,
            TextAlign::Right => rect.x as f32 + rect.width as f32 - width,
        };
        let ascent = font
            .horizontal_line_metrics(font_size)
            .map(|m| m.ascent)
            .unwrap_or(font_size);
        let baseline = rect.y as f32 + ascent;

        let (canvas_w, canvas_h) = self.buffer.dimensions();
        for ch in text.chars().filter(|ch| !ch.is_control()) {
            let (metrics, bitmap) = font.rasterize(ch, font_size);
            let glyph_x = cursor_x.round() as i32 + metrics.xmin;
            let glyph_y = baseline.round() as i32 - metrics.ymin - metrics.height as i32;

            for gy in 0..metrics.height {
                for gx in 0..metrics.width {
                    let coverage = bitmap[gy * metrics.width + gx];
                    let px = glyph_x + gx as i32;
                    let py = glyph_y + gy as i32;
                    if coverage > 0
                        && px >= 0
                        && py >= 0
                        && (px as u32) < canvas_w
                        && (py as u32) < canvas_h
                    {
                        self.blend_pixel(px as u32, py as u32, color, coverage);
                    }
                }
            }
            cursor_x += metrics.advance_width;
        }

        self.font = Some(font);
    }
}

/// Source pixel range `lo..hi` covering destination offsets `start..end`
fn source_span(start: f64, end: f64, scale: f64, limit: u32) -> (u32, u32) {
    let lo = ((start * scale).floor().max(0.0) as u32).min(limit - 1);
    let hi = ((end * scale).ceil() as u32).clamp(lo + 1, limit);
    (lo, hi)
}

/// Blend `fg` over `bg` with the given opacity
fn alpha_blend(fg: Rgba<u8>, bg: Rgba<u8>, alpha: u8) -> Rgba<u8> {
    let a = f32::from(alpha) / 255.0;
    let inv_a = 1.0 - a;

    Rgba([
        f32::from(fg[0]).mul_add(a, f32::from(bg[0]) * inv_a) as u8,
        f32::from(fg[1]).mul_add(a, f32::from(bg[1]) * inv_a) as u8,
        f32::from(fg[2]).mul_add(a, f32::from(bg[2]) * inv_a) as u8,
        255,
    ])
}

/// Render a display list onto a fresh canvas
pub fn render_raster(list: &DisplayList, images: &mut ImageCache, font: Option<Font>) -> RgbaImage {
    let mut renderer = RasterRenderer::new(list.width(), list.height(), font);
    renderer.render(list, images);
    renderer.into_image()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(width: u32, height: u32, commands: Vec<DrawCommand>) -> DisplayList {
        let mut list = DisplayList::new(width, height);
        for command in commands {
            list.push(command);
        }
        list
    }

    #[test]
    fn test_canvas_starts_black() {
        let mut images = ImageCache::default();
        let image = render_raster(&list(4, 3, Vec::new()), &mut images, None);
        assert_eq!(image.dimensions(), (4, 3));
        assert!(image.pixels().all(|p| *p == Rgba([0, 0, 0, 255])));
    }

    #[test]
    fn test_fill_is_clipped() {
        let mut images = ImageCache::default();
        let image = render_raster(
            &list(
                4,
                4,
                vec![DrawCommand::FillRect {
                    rect: Rect::new(2.0, -5.0, 10.0, 7.0),
                    color: Color::WHITE,
                }],
            ),
            &mut images,
            None,
        );
        assert_eq!(*image.get_pixel(3, 1), Rgba([255, 255, 255, 255]));
        assert_eq!(*image.get_pixel(1, 1), Rgba([0, 0, 0, 255]));
        assert_eq!(*image.get_pixel(3, 2), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_stroke_leaves_interior() {
        let mut images = ImageCache::default();
        let red = Color::rgb(255, 0, 0);
        let image = render_raster(
            &list(
                6,
                6,
                vec![DrawCommand::StrokeRect {
                    rect: Rect::new(1.0, 1.0, 4.0, 4.0),
                    color: red,
                }],
            ),
            &mut images,
            None,
        );
        let red_px = Rgba([255, 0, 0, 255]);
        assert_eq!(*image.get_pixel(1, 1), red_px);
        assert_eq!(*image.get_pixel(4, 4), red_px);
        assert_eq!(*image.get_pixel(4, 1), red_px);
        assert_eq!(*image.get_pixel(2, 2), Rgba([0, 0, 0, 255]));
        assert_eq!(*image.get_pixel(5, 5), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_image_is_stretched() {
        let mut images = ImageCache::default();
        images.insert("white.png", RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 255])));
        let image = render_raster(
            &list(
                8,
                8,
                vec![DrawCommand::Image {
                    name: "white.png".to_string(),
                    rect: Rect::new(2.0, 2.0, 4.0, 3.0),
                }],
            ),
            &mut images,
            None,
        );
        assert!(image.get_pixel(2, 2)[0] > 250);
        assert!(image.get_pixel(5, 4)[0] > 250);
        assert_eq!(*image.get_pixel(6, 4), Rgba([0, 0, 0, 255]));
        assert_eq!(*image.get_pixel(5, 5), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_huge_image_rect_is_clipped() {
        let mut images = ImageCache::default();
        images.insert("white.png", RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 255])));
        let image = render_raster(
            &list(
                16,
                16,
                vec![DrawCommand::Image {
                    name: "white.png".to_string(),
                    rect: Rect::new(-100.0, -100.0, 200_000.0, 200_000.0),
                }],
            ),
            &mut images,
            None,
        );
        assert!(image.pixels().all(|p| p[0] > 250));
    }

    #[test]
    fn test_partly_visible_image_shows_visible_part() {
        let mut images = ImageCache::default();
        let mut two_tone = RgbaImage::from_pixel(2, 1, Rgba([255, 0, 0, 255]));
        two_tone.put_pixel(1, 0, Rgba([0, 0, 255, 255]));
        images.insert("two_tone.png", two_tone);
        let image = render_raster(
            &list(
                8,
                4,
                vec![DrawCommand::Image {
                    name: "two_tone.png".to_string(),
                    rect: Rect::new(-8.0, 0.0, 16.0, 4.0),
                }],
            ),
            &mut images,
            None,
        );
        for (x, y) in [(0, 0), (7, 3)] {
            let p = image.get_pixel(x, y);
            assert!(p[2] > 250 && p[0] < 5, "{:?}", p);
        }
    }

    #[test]
    fn test_source_span() {
        assert_eq!(source_span(0.0, 16.0, 0.125, 2), (0, 2));
        assert_eq!(source_span(8.0, 16.0, 0.125, 2), (1, 2));
        assert_eq!(source_span(0.0, 16.0, 1e-5, 2), (0, 1));
    }

    #[test]
    fn test_text_without_font_is_skipped() {
        let mut images = ImageCache::default();
        let image = render_raster(
            &list(
                8,
                8,
                vec![DrawCommand::Text {
                    text: "A".to_string(),
                    rect: Rect::new(0.0, 0.0, 8.0, 8.0),
                    font_size: 8.0,
                    color: Color::WHITE,
                    align: TextAlign::Left,
                }],
            ),
            &mut images,
            None,
        );
        assert!(image.pixels().all(|p| *p == Rgba([0, 0, 0, 255])));
    }

    #[test]
    fn test_alpha_blend() {
        let fg = Rgba([200, 100, 50, 255]);
        let bg = Rgba([10, 20, 30, 255]);
        assert_eq!(alpha_blend(fg, bg, 255), fg);
        assert_eq!(alpha_blend(fg, bg, 0), bg);
    }
}
