//! Properties shared by every component

use crate::layout::{LayoutBox, Length};
use crate::theme::PropertySource;

/// Font size used when a font name does not end in a size
pub const DEFAULT_FONT_SIZE: f64 = 16.0;

/// The `left`, `top`, `width` and `height` of a component
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CommonGeometry {
    pub left: Length,
    pub top: Length,
    pub width: Length,
    pub height: Length,
}

impl CommonGeometry {
    /// Read the geometry properties, treating absent ones as zero
    pub fn read(source: &impl PropertySource) -> Self {
        let get = |name| source.get_length(name).unwrap_or_default();
        Self {
            left: get("left"),
            top: get("top"),
            width: get("width"),
            height: get("height"),
        }
    }

    /// A box carrying this geometry
    pub fn to_box(&self, name: impl Into<String>) -> LayoutBox {
        LayoutBox::new(name)
            .with_left(self.left)
            .with_top(self.top)
            .with_width(self.width)
            .with_height(self.height)
    }
}

/// Whether the component should be shown (`visible`, default true)
pub fn is_visible(source: &impl PropertySource) -> bool {
    source.get_bool("visible").unwrap_or(true)
}

/// Point size of a GRUB font name such as `"DejaVu Sans Bold 14"`
pub fn font_size(font: &str) -> f64 {
    font.split_whitespace()
        .last()
        .and_then(|token| token.parse::<f64>().ok())
        .filter(|size| *size > 0.0)
        .unwrap_or(DEFAULT_FONT_SIZE)
}

/// Diagnostic name for a component box: its `id` if it has one
pub fn box_name(kind: &str, source: &impl PropertySource) -> String {
    match source.get_string("id") {
        Some(id) => format!("{}#{}", kind, id),
        None => kind.to_string(),
    }
}
