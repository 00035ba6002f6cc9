//! Building the box tree from a parsed theme
//!
//! Global properties style the root (screen) box. Every visible component
//! becomes one or more boxes below it.

pub mod boot_menu;
pub mod common;
pub mod image;
pub mod label;

pub use boot_menu::BootMenu;
pub use common::{font_size, CommonGeometry, DEFAULT_FONT_SIZE};

use crate::config::RenderConfig;
use crate::layout::{BoxId, BoxTree, LayoutBox, LayoutError, Length};
use crate::paint::PaintKind;
use crate::palette::Color;
use crate::theme::{Component, PropertySource, Theme};

/// Build the complete box tree for a theme
pub fn build_tree(theme: &Theme, config: &RenderConfig) -> Result<BoxTree, LayoutError> {
    let mut tree = BoxTree::new();
    let root = tree.root();

    if let Some(spec) = theme.get_string("desktop-color") {
        tree.get_mut(root).paint = Some(PaintKind::Fill {
            color: config.palette.resolve_or(&spec, Color::BLACK),
        });
    }

    if let Some(file) = theme.get_string("desktop-image") {
        let background = LayoutBox::new("desktop-image")
            .with_width(Length::Relative(100.0))
            .with_height(Length::Relative(100.0))
            .with_paint(PaintKind::Pixmap { file });
        tree.add_child(root, background);
    }

    build_components(&mut tree, root, &theme.components, config)?;

    log::debug!("built box tree with {} boxes", tree.len());
    Ok(tree)
}

fn build_components(
    tree: &mut BoxTree,
    parent: BoxId,
    components: &[Component],
    config: &RenderConfig,
) -> Result<(), LayoutError> {
    for component in components {
        if !common::is_visible(component) {
            log::debug!("skipping invisible {}", component.kind);
            continue;
        }

        match component.kind.as_str() {
            "boot_menu" => {
                boot_menu::build(tree, parent, component, config)?;
            }
            "label" => {
                label::build(tree, parent, component, config);
            }
            "image" => {
                image::build(tree, parent, component);
            }
            "canvas" => {
                let node = CommonGeometry::read(component)
                    .to_box(common::box_name("canvas", component));
                let id = tree.add_child(parent, node);
                build_components(tree, id, &component.children, config)?;
            }
            other => {
                log::warn!("unsupported component '{}' skipped", other);
            }
        }
    }
    Ok(())
}
