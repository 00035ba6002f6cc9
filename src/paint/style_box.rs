//! Nine-part style boxes
//!
//! A style box surrounds a resolved rectangle with corner and edge images and
//! fills it with a center image. Part images are found by substituting the
//! part key for the first `*` in the theme's pattern, so `menu_*.png` yields
//! `menu_nw.png`, `menu_n.png` and so on.

use crate::layout::Rect;

use super::resources::ImageCache;

/// One of the nine regions of a style box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleBoxPart {
    Northwest,
    North,
    Northeast,
    West,
    Center,
    East,
    Southwest,
    South,
    Southeast,
}

impl StyleBoxPart {
    /// All parts, in painting order
    pub const ALL: [StyleBoxPart; 9] = [
        StyleBoxPart::Northwest,
        StyleBoxPart::North,
        StyleBoxPart::Northeast,
        StyleBoxPart::West,
        StyleBoxPart::Center,
        StyleBoxPart::East,
        StyleBoxPart::Southwest,
        StyleBoxPart::South,
        StyleBoxPart::Southeast,
    ];

    pub fn key(self) -> &'static str {
        match self {
            StyleBoxPart::Northwest => "nw",
            StyleBoxPart::North => "n",
            StyleBoxPart::Northeast => "ne",
            StyleBoxPart::West => "w",
            StyleBoxPart::Center => "c",
            StyleBoxPart::East => "e",
            StyleBoxPart::Southwest => "sw",
            StyleBoxPart::South => "s",
            StyleBoxPart::Southeast => "se",
        }
    }

    pub fn is_corner(self) -> bool {
        matches!(
            self,
            StyleBoxPart::Northwest
                | StyleBoxPart::Northeast
                | StyleBoxPart::Southwest
                | StyleBoxPart::Southeast
        )
    }

    /// Where this part goes around `rect`, given the part image's natural size.
    ///
    /// Corners keep their natural size, edges stretch along the side they
    /// border and the center stretches to the whole rectangle.
    pub fn placement(self, rect: Rect, part_width: f64, part_height: f64) -> Rect {
        let Rect {
            x,
            y,
            width,
            height,
        } = rect;
        match self {
            StyleBoxPart::Northwest => {
                Rect::new(x - part_width, y - part_height, part_width, part_height)
            }
            StyleBoxPart::North => Rect::new(x, y - part_height, width, part_height),
            StyleBoxPart::Northeast => Rect::new(x + width, y - part_height, part_width, part_height),
            StyleBoxPart::West => Rect::new(x - part_width, y, part_width, height),
            StyleBoxPart::Center => rect,
            StyleBoxPart::East => Rect::new(x + width, y, part_width, height),
            StyleBoxPart::Southwest => Rect::new(x - part_width, y + height, part_width, part_height),
            StyleBoxPart::South => Rect::new(x, y + height, width, part_height),
            StyleBoxPart::Southeast => Rect::new(x + width, y + height, part_width, part_height),
        }
    }
}

/// Image name for one part of a style box pattern
pub fn pixmap_name(pattern: &str, part: StyleBoxPart) -> String {
    pattern.replacen('*', part.key(), 1)
}

/// A style box part ready to draw
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedPart {
    pub part: StyleBoxPart,
    pub name: String,
    pub rect: Rect,
}

/// Place every available part of `pattern` around `rect`.
///
/// Parts whose image cannot be loaded are skipped. An empty pattern places nothing.
pub fn place_parts(pattern: &str, rect: Rect, images: &mut ImageCache) -> Vec<PlacedPart> {
    if pattern.is_empty() {
        return Vec::new();
    }

    StyleBoxPart::ALL
        .iter()
        .filter_map(|&part| {
            let name = pixmap_name(pattern, part);
            let (width, height) = images.dimensions(&name)?;
            let rect = part.placement(rect, f64::from(width), f64::from(height));
            Some(PlacedPart { part, name, rect })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn image(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]))
    }

    #[test]
    fn test_pixmap_name() {
        assert_eq!(pixmap_name("menu_*.png", StyleBoxPart::Northwest), "menu_nw.png");
        assert_eq!(pixmap_name("item_*.png", StyleBoxPart::Center), "item_c.png");
        assert_eq!(pixmap_name("a*b*.png", StyleBoxPart::South), "asb*.png");
    }

    #[test]
    fn test_placement_around_rect() {
        let rect = Rect::new(100.0, 50.0, 200.0, 80.0);
        assert_eq!(
            StyleBoxPart::Northwest.placement(rect, 10.0, 6.0),
            Rect::new(90.0, 44.0, 10.0, 6.0)
        );
        assert_eq!(
            StyleBoxPart::North.placement(rect, 3.0, 6.0),
            Rect::new(100.0, 44.0, 200.0, 6.0)
        );
        assert_eq!(
            StyleBoxPart::East.placement(rect, 10.0, 1.0),
            Rect::new(300.0, 50.0, 10.0, 80.0)
        );
        assert_eq!(StyleBoxPart::Center.placement(rect, 1.0, 1.0), rect);
        assert_eq!(
            StyleBoxPart::Southeast.placement(rect, 10.0, 6.0),
            Rect::new(300.0, 130.0, 10.0, 6.0)
        );
    }

    #[test]
    fn test_place_parts_skips_missing() {
        let mut images = ImageCache::new("/nonexistent");
        images.insert("box_nw.png", image(4, 4));
        images.insert("box_c.png", image(1, 1));
        let rect = Rect::new(10.0, 10.0, 20.0, 20.0);

        let parts = place_parts("box_*.png", rect, &mut images);
        let keys: Vec<_> = parts.iter().map(|p| p.part.key()).collect();
        assert_eq!(keys, vec!["nw", "c"]);
        assert_eq!(parts[0].rect, Rect::new(6.0, 6.0, 4.0, 4.0));
        assert_eq!(parts[1].rect, rect);
    }

    #[test]
    fn test_empty_pattern() {
        let mut images = ImageCache::new("/nonexistent");
        assert!(place_parts("", Rect::zero(), &mut images).is_empty());
    }

    #[test]
    fn test_corners() {
        let corners = StyleBoxPart::ALL.iter().filter(|p| p.is_corner()).count();
        assert_eq!(corners, 4);
    }
}
