//! `+ image { ... }`

use crate::layout::{BoxId, BoxTree};
use crate::paint::PaintKind;
use crate::theme::{Component, PropertySource};

use super::common::{box_name, CommonGeometry};

pub fn build(tree: &mut BoxTree, parent: BoxId, component: &Component) -> BoxId {
    let mut node = CommonGeometry::read(component).to_box(box_name("image", component));
    match component.get_string("file") {
        Some(file) => node = node.with_paint(PaintKind::Pixmap { file }),
        None => log::warn!("{}: no file set, nothing to draw", node.name),
    }
    tree.add_child(parent, node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Length;
    use crate::theme::parse;

    #[test]
    fn test_image_pixmap() {
        let theme = parse(r#"+ image { file = "logo.png" left = 50% width = 64 }"#).unwrap();
        let mut tree = BoxTree::new();
        let root = tree.root();
        let id = build(&mut tree, root, &theme.components[0]);
        let node = tree.get(id);
        assert_eq!(
            node.paint,
            Some(PaintKind::Pixmap {
                file: "logo.png".to_string()
            })
        );
        assert_eq!(node.left, Some(Length::Relative(50.0)));
        assert_eq!(node.width, Some(Length::Absolute(64.0)));
    }

    #[test]
    fn test_image_without_file() {
        let theme = parse("+ image { }").unwrap();
        let mut tree = BoxTree::new();
        let root = tree.root();
        let id = build(&mut tree, root, &theme.components[0]);
        assert_eq!(tree.get(id).paint, None);
    }
}
