//! `+ boot_menu { ... }`
//!
//! The menu box is styled with `menu_pixmap_style`. Every previewed entry
//! becomes an item box stacked from the top of the menu, holding an icon
//! and a text box:
//!
//! ```text
//! item.left   = item_padding
//! item.top    = item_padding + i * (item_height + item_spacing)
//! item.width  = menu.width - 2 * item_padding - 2
//! icon.top    = (item_height - icon_height) / 2
//! text.left   = icon_width + item_icon_space
//! text.top    = (item_height - font_size) / 2
//! text.width  = item.width - icon_width - item_icon_space
//! ```

use crate::config::{MenuEntry, RenderConfig};
use crate::layout::{BoxId, BoxTree, Expr, LayoutBox, LayoutError, Length, TextAlign};
use crate::paint::PaintKind;
use crate::palette::Color;
use crate::theme::{Component, PropertySource};

use super::common::{box_name, font_size, CommonGeometry};

/// Settings of a boot menu, with defaults applied
#[derive(Debug, Clone, PartialEq)]
pub struct BootMenu {
    pub geometry: CommonGeometry,
    pub menu_pixmap_style: Option<String>,

    pub item_font: String,
    pub item_color: String,
    pub item_pixmap_style: Option<String>,
    pub selected_item_font: String,
    pub selected_item_color: String,
    pub selected_item_pixmap_style: Option<String>,

    pub item_height: Length,
    pub item_padding: Length,
    pub item_spacing: Length,

    pub icon_width: Length,
    pub icon_height: Length,
    pub item_icon_space: Length,

    pub scrollbar: bool,
    pub scrollbar_width: Length,
    pub scrollbar_frame: Option<String>,
    pub scrollbar_thumb: Option<String>,
}

impl BootMenu {
    pub fn from_component(component: &Component) -> Self {
        let length = |name, default| {
            component
                .get_length(name)
                .unwrap_or(Length::Absolute(default))
        };

        let item_font = component
            .get_string("item_font")
            .unwrap_or_else(|| "Unknown Regular 16".to_string());
        let item_color = component
            .get_string("item_color")
            .unwrap_or_else(|| "black".to_string());

        Self {
            geometry: CommonGeometry::read(component),
            menu_pixmap_style: component.get_string("menu_pixmap_style"),

            selected_item_font: component
                .get_string("selected_item_font")
                .unwrap_or_else(|| item_font.clone()),
            selected_item_color: component
                .get_string("selected_item_color")
                .unwrap_or_else(|| item_color.clone()),
            item_font,
            item_color,
            item_pixmap_style: component.get_string("item_pixmap_style"),
            selected_item_pixmap_style: component.get_string("selected_item_pixmap_style"),

            item_height: length("item_height", 42.0),
            item_padding: length("item_padding", 14.0),
            item_spacing: length("item_spacing", 16.0),

            icon_width: length("icon_width", 32.0),
            icon_height: length("icon_height", 32.0),
            item_icon_space: length("item_icon_space", 4.0),

            scrollbar: component.get_bool("scrollbar").unwrap_or(true),
            scrollbar_width: length("scrollbar_width", 16.0),
            scrollbar_frame: component.get_string("scrollbar_frame"),
            scrollbar_thumb: component.get_string("scrollbar_thumb"),
        }
    }
}

/// Pixel values of the item geometry slots
struct ItemMetrics {
    height: f64,
    padding: f64,
    spacing: f64,
    icon_width: f64,
    icon_height: f64,
    icon_space: f64,
}

impl ItemMetrics {
    fn new(menu: &BootMenu) -> Result<Self, LayoutError> {
        Ok(Self {
            height: menu.item_height.absolute("item_height")?,
            padding: menu.item_padding.absolute("item_padding")?,
            spacing: menu.item_spacing.absolute("item_spacing")?,
            icon_width: menu.icon_width.absolute("icon_width")?,
            icon_height: menu.icon_height.absolute("icon_height")?,
            icon_space: menu.item_icon_space.absolute("item_icon_space")?,
        })
    }
}

fn style_box(pattern: &Option<String>) -> Option<PaintKind> {
    pattern
        .as_ref()
        .filter(|p| !p.is_empty())
        .map(|pattern| PaintKind::StyleBox {
            pattern: pattern.clone(),
        })
}

fn attach_paint(node: LayoutBox, paint: Option<PaintKind>) -> LayoutBox {
    match paint {
        Some(paint) => node.with_paint(paint),
        None => node,
    }
}

pub fn build(
    tree: &mut BoxTree,
    parent: BoxId,
    component: &Component,
    config: &RenderConfig,
) -> Result<BoxId, LayoutError> {
    let menu = BootMenu::from_component(component);
    let metrics = ItemMetrics::new(&menu)?;

    let node = menu.geometry.to_box(box_name("boot_menu", component));
    let menu_id = tree.add_child(parent, attach_paint(node, style_box(&menu.menu_pixmap_style)));

    let item_width =
        tree.derived_width(menu_id) - Expr::constant(2.0) * metrics.padding - 2.0;
    let mut y = Expr::constant(metrics.padding);

    for (index, entry) in config.menu_entries.iter().enumerate() {
        let selected = index == config.selected_entry;
        let (font, color, style) = if selected {
            (
                &menu.selected_item_font,
                &menu.selected_item_color,
                &menu.selected_item_pixmap_style,
            )
        } else {
            (&menu.item_font, &menu.item_color, &menu.item_pixmap_style)
        };

        let item = LayoutBox::new(format!("item[{}]", index))
            .with_left(Length::Absolute(metrics.padding))
            .with_top_expr(y.clone())
            .with_width_expr(item_width.clone())
            .with_height(Length::Absolute(metrics.height));
        let item_id = tree.add_child(menu_id, attach_paint(item, style_box(style)));

        add_icon(tree, item_id, entry, &metrics);

        let text_size = font_size(font);
        let text = LayoutBox::new(format!("item[{}].text", index))
            .with_left_expr(Expr::constant(metrics.icon_width) + metrics.icon_space)
            .with_top_expr((Expr::constant(metrics.height) - text_size) / 2.0)
            .with_width_expr(item_width.clone() - metrics.icon_width - metrics.icon_space)
            .with_height(Length::Absolute(text_size))
            .with_paint(PaintKind::Text {
                text: entry.text.clone(),
                color: config.palette.resolve_or(color, Color::BLACK),
                font_size: text_size,
                align: TextAlign::Left,
            });
        tree.add_child(item_id, text);

        y = y + (Expr::constant(metrics.height) + metrics.spacing);
    }

    if menu.scrollbar {
        add_scrollbar(tree, menu_id, &menu)?;
    }

    log::debug!(
        "boot_menu: {} items, selected {}",
        config.menu_entries.len(),
        config.selected_entry
    );
    Ok(menu_id)
}

fn add_icon(tree: &mut BoxTree, item_id: BoxId, entry: &MenuEntry, metrics: &ItemMetrics) {
    let Some(class) = &entry.icon else {
        return;
    };
    let icon = LayoutBox::new(format!("icon:{}", class))
        .with_left(Length::Absolute(0.0))
        .with_top_expr((Expr::constant(metrics.height) - metrics.icon_height) / 2.0)
        .with_width(Length::Absolute(metrics.icon_width))
        .with_height(Length::Absolute(metrics.icon_height))
        .with_paint(PaintKind::Pixmap {
            file: format!("icons/{}.png", class),
        });
    tree.add_child(item_id, icon);
}

fn add_scrollbar(tree: &mut BoxTree, menu_id: BoxId, menu: &BootMenu) -> Result<(), LayoutError> {
    let Some(frame) = style_box(&menu.scrollbar_frame) else {
        return Ok(());
    };
    let width = menu.scrollbar_width.absolute("scrollbar_width")?;

    let frame_box = LayoutBox::new("scrollbar")
        .with_left_expr(tree.derived_width(menu_id) - width)
        .with_top(Length::Absolute(0.0))
        .with_width(Length::Absolute(width))
        .with_height(Length::Relative(100.0))
        .with_paint(frame);
    let frame_id = tree.add_child(menu_id, frame_box);

    let thumb = LayoutBox::new("scrollbar.thumb")
        .with_width(Length::Relative(100.0))
        .with_height(Length::Relative(100.0));
    tree.add_child(frame_id, attach_paint(thumb, style_box(&menu.scrollbar_thumb)));
    Ok(())
}
