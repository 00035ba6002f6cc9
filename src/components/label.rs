//! `+ label { ... }`

use crate::config::RenderConfig;
use crate::layout::{BoxId, BoxTree, TextAlign};
use crate::paint::PaintKind;
use crate::palette::Color;
use crate::theme::{Component, PropertySource};

use super::common::{box_name, font_size, CommonGeometry, DEFAULT_FONT_SIZE};

/// Label id whose text shows the boot countdown
pub const TIMEOUT_LABEL_ID: &str = "__timeout__";

pub fn build(tree: &mut BoxTree, parent: BoxId, component: &Component, config: &RenderConfig) -> BoxId {
    let mut text = component.get_string("text").unwrap_or_default();
    if component.get_string("id").as_deref() == Some(TIMEOUT_LABEL_ID) {
        text = text.replace("%d", &config.timeout.to_string());
    }

    let color = component
        .get_string("color")
        .map(|spec| config.palette.resolve_or(&spec, Color::BLACK))
        .unwrap_or(Color::BLACK);

    let font_size = component
        .get_string("font")
        .map(|font| font_size(&font))
        .unwrap_or(DEFAULT_FONT_SIZE);

    let align = match component.get_string("align") {
        Some(keyword) => TextAlign::from_keyword(&keyword).unwrap_or_else(|| {
            log::warn!("label: unknown align '{}', using left", keyword);
            TextAlign::Left
        }),
        None => TextAlign::Left,
    };

    let node = CommonGeometry::read(component)
        .to_box(box_name("label", component))
        .with_paint(PaintKind::Text {
            text,
            color,
            font_size,
            align,
        });
    tree.add_child(parent, node)
}
