//! What a box draws once its geometry is known

use crate::layout::TextAlign;
use crate::palette::Color;

/// Paint behavior attached to a [`LayoutBox`](crate::layout::LayoutBox).
///
/// The [`Painter`](super::Painter) maps each kind to display-list commands.
#[derive(Debug, Clone, PartialEq)]
pub enum PaintKind {
    /// Solid color over the whole box
    Fill { color: Color },
    /// Theme image stretched to the box
    Pixmap { file: String },
    /// Nine-part style box around the box; `pattern` contains a `*`
    StyleBox { pattern: String },
    /// Single line of text anchored at the box's top edge
    Text {
        text: String,
        color: Color,
        font_size: f64,
        align: TextAlign,
    },
}
