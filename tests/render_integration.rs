//! End-to-end rendering of themes with on-disk resources

use std::fs;
use std::path::Path;

use image::{Rgba, RgbaImage};
use tempfile::TempDir;

use grub_theme_preview::{
    display_list, parse, render_svg_with_config, render_to_file, render_with_config, DisplayList,
    ImageCache, OutputFormat, RenderConfig, SvgConfig,
};
use grub_theme_preview::paint::DrawCommand;

const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
const GREEN: Rgba<u8> = Rgba([0, 255, 0, 255]);
const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

fn write_pixmap(dir: &Path, name: &str, width: u32, height: u32, color: Rgba<u8>) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    RgbaImage::from_pixel(width, height, color).save(path).unwrap();
}

fn assert_close(actual: &Rgba<u8>, expected: Rgba<u8>) {
    let close = actual
        .0
        .iter()
        .zip(expected.0.iter())
        .all(|(a, e)| a.abs_diff(*e) <= 2);
    assert!(close, "{:?} != {:?}", actual, expected);
}

fn theme_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_pixmap(dir.path(), "background.png", 4, 4, BLUE);
    write_pixmap(dir.path(), "logo.png", 4, 4, RED);
    write_pixmap(dir.path(), "menu_c.png", 2, 2, GREEN);
    write_pixmap(dir.path(), "menu_nw.png", 5, 5, RED);
    dir
}

fn config(dir: &TempDir) -> RenderConfig {
    RenderConfig::new()
        .with_screen_size(200, 100)
        .with_theme_dir(dir.path())
}

fn list_for(source: &str, config: &RenderConfig) -> DisplayList {
    let theme = parse(source).unwrap();
    let mut images = ImageCache::new(config.resource_dir());
    display_list(&theme, config, &mut images).unwrap()
}

#[test]
fn test_desktop_image_and_image_component() {
    let dir = theme_dir();
    let source = r#"
        desktop-image: "background.png"
        + image { file = "logo.png" left = 10 top = 10 width = 20 height = 20 }
    "#;

    let image = render_with_config(source, &config(&dir)).unwrap();
    assert_eq!(image.dimensions(), (200, 100));
    assert_close(image.get_pixel(150, 80), BLUE);
    assert_close(image.get_pixel(20, 20), RED);
}

#[test]
fn test_missing_pixmap_still_renders() {
    let dir = theme_dir();
    let source = r#"
        desktop-color: "0,255,0"
        + image { file = "missing.png" left = 0 top = 0 width = 100% height = 100% }
    "#;

    let image = render_with_config(source, &config(&dir)).unwrap();
    assert_eq!(*image.get_pixel(100, 50), GREEN);
}

#[test]
fn test_menu_style_box_parts() {
    let dir = theme_dir();
    let source = r#"
        + boot_menu {
            left = 50 top = 20 width = 100 height = 60
            menu_pixmap_style = "menu_*.png"
        }
    "#;

    let list = list_for(source, &config(&dir).with_menu_entries(vec![]));
    let images: Vec<_> = list
        .commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Image { name, rect } => Some((name.as_str(), rect.x, rect.y, rect.width)),
            _ => None,
        })
        .collect();
    assert_eq!(
        images,
        vec![("menu_nw.png", 45.0, 15.0, 5.0), ("menu_c.png", 50.0, 20.0, 100.0)]
    );
}

#[test]
fn test_menu_entries_with_icons() {
    let dir = theme_dir();
    write_pixmap(dir.path(), "icons/linux.png", 8, 8, RED);
    let source = r#"
        + boot_menu { left = 0 top = 0 width = 100% height = 100% item_font = "Sans 12" }
    "#;

    let entries = vec![
        grub_theme_preview::MenuEntry::new("Linux").with_icon("linux"),
        grub_theme_preview::MenuEntry::new("Setup"),
    ];
    let list = list_for(source, &config(&dir).with_menu_entries(entries));

    let icons: Vec<_> = list.image_names().collect();
    assert_eq!(icons, vec!["icons/linux.png"]);

    let texts: Vec<_> = list
        .commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Text {
                text,
                rect,
                font_size,
                ..
            } => Some((text.as_str(), rect.y, *font_size)),
            _ => None,
        })
        .collect();
    // item_padding 14, item_height 42, item_spacing 16, text centered in the item
    assert_eq!(texts, vec![("Linux", 29.0, 12.0), ("Setup", 87.0, 12.0)]);
}

#[test]
fn test_timeout_label_text() {
    let dir = theme_dir();
    let source = r#"
        + label { id = "__timeout__" text = "Booting in %d seconds" left = 0 top = 0 width = 100% height = 20 }
    "#;

    let list = list_for(source, &config(&dir).with_timeout(7));
    assert!(list.commands().iter().any(|c| matches!(
        c,
        DrawCommand::Text { text, .. } if text == "Booting in 7 seconds"
    )));
}

#[test]
fn test_outlines_every_box() {
    let dir = theme_dir();
    let source = r#"
        + canvas {
            left = 10 top = 10 width = 50 height = 50
            + label { text = "x" }
        }
    "#;

    let list = list_for(source, &config(&dir).with_outline(true));
    let outlines = list
        .commands()
        .iter()
        .filter(|c| matches!(c, DrawCommand::StrokeRect { .. }))
        .count();
    // screen, canvas, label
    assert_eq!(outlines, 3);
}

#[test]
fn test_render_to_png_file() {
    let dir = theme_dir();
    let output = dir.path().join("out.png");
    let theme = parse(r#"desktop-image: "background.png""#).unwrap();

    render_to_file(&theme, &config(&dir), &output, OutputFormat::Png).unwrap();

    let written = image::open(&output).unwrap().to_rgba8();
    assert_eq!(written.dimensions(), (200, 100));
    assert_close(written.get_pixel(0, 0), BLUE);
}

#[test]
fn test_render_to_svg_file() {
    let dir = theme_dir();
    let output = dir.path().join("out.svg");
    let theme = parse(r#"+ image { file = "logo.png" width = 10 height = 10 }"#).unwrap();

    render_to_file(&theme, &config(&dir), &output, OutputFormat::Svg).unwrap();

    let svg = fs::read_to_string(&output).unwrap();
    assert!(svg.starts_with("<?xml"));
    assert!(svg.contains("data:image/png;base64,"));
}

#[test]
fn test_svg_linked_images() {
    let dir = theme_dir();
    let config = config(&dir).with_svg(SvgConfig::default().with_embed_images(false));
    let svg = render_svg_with_config(
        r#"+ image { file = "logo.png" width = 10 height = 10 }"#,
        &config,
    )
    .unwrap();
    assert!(svg.contains("logo.png\""));
    assert!(!svg.contains("base64"));
}

#[test]
fn test_config_file_drives_render() {
    let dir = theme_dir();
    let config_path = dir.path().join("preview.toml");
    fs::write(
        &config_path,
        r#"
[screen]
width = 64
height = 32

[render]
outline = true
"#,
    )
    .unwrap();

    let config = RenderConfig::from_file(&config_path)
        .unwrap()
        .with_theme_dir(dir.path());
    let image = render_with_config("", &config).unwrap();
    assert_eq!(image.dimensions(), (64, 32));
    assert_eq!(*image.get_pixel(0, 0), RED);
}
