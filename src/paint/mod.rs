//! Painting resolved boxes into a display list
//!
//! [`Painter`] is handed every box together with its resolved rectangle
//! during a tree walk and turns the box's [`PaintKind`] into
//! [`DrawCommand`]s. Backends only ever see the resulting [`DisplayList`].

mod display_list;
mod kind;
mod resources;
pub mod style_box;

pub use display_list::{DisplayList, DrawCommand};
pub use kind::PaintKind;
pub use resources::{ImageCache, ResourceError};
pub use style_box::{pixmap_name, StyleBoxPart};

use crate::layout::{LayoutBox, Rect};
use crate::palette::Color;

/// Outline color for every box
pub const BOX_OUTLINE: Color = Color::rgb(0xff, 0x00, 0x00);
/// Outline color for style box corners
pub const CORNER_OUTLINE: Color = Color::rgb(0xf9, 0xf8, 0x06);
/// Outline color for style box edges
pub const EDGE_OUTLINE: Color = Color::rgb(0xf9, 0x73, 0x06);

/// Dispatches paint kinds to drawing commands
pub struct Painter<'a> {
    images: &'a mut ImageCache,
    outline: bool,
    list: DisplayList,
}

impl<'a> Painter<'a> {
    pub fn new(images: &'a mut ImageCache, width: u32, height: u32) -> Self {
        Self {
            images,
            outline: false,
            list: DisplayList::new(width, height),
        }
    }

    pub fn with_outline(mut self, outline: bool) -> Self {
        self.outline = outline;
        self
    }

    /// Paint one box at its resolved position
    ///
    /// With outlines enabled every box is outlined, painted or not, before
    /// its own content.
    pub fn paint(&mut self, node: &LayoutBox, rect: Rect) {
        if self.outline {
            self.list.push(DrawCommand::StrokeRect {
                rect,
                color: BOX_OUTLINE,
            });
        }

        let Some(kind) = &node.paint else {
            return;
        };

        match kind {
            PaintKind::Fill { color } => self.list.push(DrawCommand::FillRect {
                rect,
                color: *color,
            }),
            PaintKind::Pixmap { file } => self.paint_pixmap(&node.name, file, rect),
            PaintKind::StyleBox { pattern } => self.paint_style_box(pattern, rect),
            PaintKind::Text {
                text,
                color,
                font_size,
                align,
            } => self.list.push(DrawCommand::Text {
                text: text.clone(),
                rect,
                font_size: *font_size,
                color: *color,
                align: *align,
            }),
        }
    }

    fn paint_pixmap(&mut self, box_name: &str, file: &str, rect: Rect) {
        if rect.is_empty() {
            log::debug!("{}: skipping pixmap '{}' in empty rectangle", box_name, file);
            return;
        }
        if self.images.get(file).is_none() {
            return;
        }
        self.list.push(DrawCommand::Image {
            name: file.to_string(),
            rect,
        });
    }

    fn paint_style_box(&mut self, pattern: &str, rect: Rect) {
        for placed in style_box::place_parts(pattern, rect, self.images) {
            if self.outline && placed.part != StyleBoxPart::Center {
                let color = if placed.part.is_corner() {
                    CORNER_OUTLINE
                } else {
                    EDGE_OUTLINE
                };
                self.list.push(DrawCommand::StrokeRect {
                    rect: placed.rect,
                    color,
                });
            }
            self.list.push(DrawCommand::Image {
                name: placed.name,
                rect: placed.rect,
            });
        }
    }

    pub fn finish(self) -> DisplayList {
        self.list
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::TextAlign;
    use image::{Rgba, RgbaImage};
    use pretty_assertions::assert_eq;

    fn cache_with(names: &[(&str, u32, u32)]) -> ImageCache {
        let mut cache = ImageCache::new("/nonexistent");
        for (name, w, h) in names {
            cache.insert(*name, RgbaImage::from_pixel(*w, *h, Rgba([0, 0, 0, 255])));
        }
        cache
    }

    #[test]
    fn test_box_without_paint() {
        let mut cache = cache_with(&[]);
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);

        let mut painter = Painter::new(&mut cache, 100, 100);
        painter.paint(&LayoutBox::new("empty"), rect);
        assert!(painter.finish().is_empty());

        let mut painter = Painter::new(&mut cache, 100, 100).with_outline(true);
        painter.paint(&LayoutBox::new("empty"), rect);
        assert_eq!(
            painter.finish().commands(),
            &[DrawCommand::StrokeRect {
                rect,
                color: BOX_OUTLINE
            }]
        );
    }

    #[test]
    fn test_fill_and_text() {
        let mut cache = cache_with(&[]);
        let mut painter = Painter::new(&mut cache, 100, 100);
        let rect = Rect::new(1.0, 2.0, 3.0, 4.0);
        painter.paint(
            &LayoutBox::new("bg").with_paint(PaintKind::Fill {
                color: Color::WHITE,
            }),
            rect,
        );
        painter.paint(
            &LayoutBox::new("label").with_paint(PaintKind::Text {
                text: "hi".to_string(),
                color: Color::BLACK,
                font_size: 12.0,
                align: TextAlign::Center,
            }),
            rect,
        );
        let list = painter.finish();
        assert_eq!(
            list.commands(),
            &[
                DrawCommand::FillRect {
                    rect,
                    color: Color::WHITE
                },
                DrawCommand::Text {
                    text: "hi".to_string(),
                    rect,
                    font_size: 12.0,
                    color: Color::BLACK,
                    align: TextAlign::Center,
                },
            ]
        );
    }

    #[test]
    fn test_outline_precedes_paint() {
        let mut cache = cache_with(&[("bg.png", 2, 2)]);
        let mut painter = Painter::new(&mut cache, 100, 100).with_outline(true);
        let rect = Rect::new(0.0, 0.0, 50.0, 50.0);
        painter.paint(
            &LayoutBox::new("image").with_paint(PaintKind::Pixmap {
                file: "bg.png".to_string(),
            }),
            rect,
        );
        let list = painter.finish();
        assert_eq!(
            list.commands(),
            &[
                DrawCommand::StrokeRect {
                    rect,
                    color: BOX_OUTLINE
                },
                DrawCommand::Image {
                    name: "bg.png".to_string(),
                    rect
                },
            ]
        );
    }

    #[test]
    fn test_missing_pixmap_is_skipped() {
        let mut cache = cache_with(&[]);
        let mut painter = Painter::new(&mut cache, 100, 100);
        painter.paint(
            &LayoutBox::new("image").with_paint(PaintKind::Pixmap {
                file: "missing.png".to_string(),
            }),
            Rect::new(0.0, 0.0, 10.0, 10.0),
        );
        assert!(painter.finish().is_empty());
    }

    #[test]
    fn test_style_box_outlines() {
        let mut cache = cache_with(&[("m_nw.png", 4, 4), ("m_n.png", 1, 4), ("m_c.png", 1, 1)]);
        let mut painter = Painter::new(&mut cache, 100, 100).with_outline(true);
        let rect = Rect::new(10.0, 10.0, 20.0, 20.0);
        painter.paint(
            &LayoutBox::new("menu").with_paint(PaintKind::StyleBox {
                pattern: "m_*.png".to_string(),
            }),
            rect,
        );
        let list = painter.finish();
        let outlines: Vec<_> = list
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::StrokeRect { color, .. } => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(outlines, vec![BOX_OUTLINE, CORNER_OUTLINE, EDGE_OUTLINE]);
        let images: Vec<_> = list.image_names().collect();
        assert_eq!(images, vec!["m_nw.png", "m_n.png", "m_c.png"]);
    }
}
