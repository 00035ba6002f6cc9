//! Render configuration
//!
//! Everything that used to be a process-wide option lives here and is
//! passed explicitly to the render entry points. A configuration can be
//! loaded from TOML; every key is optional:
//!
//! ```toml
//! [screen]
//! width = 1920
//! height = 1080
//!
//! [render]
//! outline = true
//! font = "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf"
//!
//! [menu]
//! selected = 1
//! timeout = 5
//!
//! [[menu.entries]]
//! text = "Debian GNU/Linux"
//! icon = "debian"
//!
//! [colors]
//! accent = "#2ca7f8"
//!
//! [svg]
//! pretty_print = false
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::palette::Palette;
use crate::renderer::SvgConfig;

pub const DEFAULT_SCREEN_WIDTH: u32 = 1366;
pub const DEFAULT_SCREEN_HEIGHT: u32 = 768;
pub const DEFAULT_TIMEOUT: u32 = 10;

/// Errors that can occur when loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// One entry of the previewed boot menu
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MenuEntry {
    pub text: String,
    /// Icon class, looked up as `icons/<class>.png`
    #[serde(default)]
    pub icon: Option<String>,
}

impl MenuEntry {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            icon: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

fn default_menu_entries() -> Vec<MenuEntry> {
    vec![
        MenuEntry::new("Deepin GNU/Linux").with_icon("deepin"),
        MenuEntry::new("Advanced options for Deepin GNU/Linux"),
        MenuEntry::new("Windows XP").with_icon("windows"),
        MenuEntry::new("System setup"),
    ]
}

/// Configuration for the complete render pipeline
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub screen_width: u32,
    pub screen_height: u32,
    /// Directory theme resources are loaded from; the working directory when unset
    pub theme_dir: Option<PathBuf>,
    /// Outline every painted box and style box part
    pub outline: bool,
    /// TrueType font for text; searched in system locations when unset
    pub font_file: Option<PathBuf>,
    pub menu_entries: Vec<MenuEntry>,
    /// Index into `menu_entries` drawn with the selected styles
    pub selected_entry: usize,
    /// Seconds substituted into the `__timeout__` label
    pub timeout: u32,
    /// Named colors for theme color strings
    pub palette: Palette,
    /// SVG output configuration
    pub svg: SvgConfig,
    /// Debug mode: print the resolved box tree
    pub debug: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            screen_width: DEFAULT_SCREEN_WIDTH,
            screen_height: DEFAULT_SCREEN_HEIGHT,
            theme_dir: None,
            outline: false,
            font_file: None,
            menu_entries: default_menu_entries(),
            selected_entry: 0,
            timeout: DEFAULT_TIMEOUT,
            palette: Palette::default(),
            svg: SvgConfig::default(),
            debug: false,
        }
    }
}

/// TOML structure for deserializing configuration files
#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    #[serde(default)]
    screen: TomlScreen,
    #[serde(default)]
    render: TomlRender,
    #[serde(default)]
    menu: TomlMenu,
    #[serde(default)]
    colors: HashMap<String, String>,
    #[serde(default)]
    svg: TomlSvg,
}

#[derive(Deserialize, Default)]
struct TomlScreen {
    width: Option<u32>,
    height: Option<u32>,
}

#[derive(Deserialize, Default)]
struct TomlRender {
    outline: Option<bool>,
    font: Option<PathBuf>,
    theme_dir: Option<PathBuf>,
}

#[derive(Deserialize, Default)]
struct TomlMenu {
    entries: Option<Vec<MenuEntry>>,
    selected: Option<usize>,
    timeout: Option<u32>,
}

#[derive(Deserialize, Default)]
struct TomlSvg {
    standalone: Option<bool>,
    pretty_print: Option<bool>,
    class_prefix: Option<String>,
    embed_images: Option<bool>,
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file, filling gaps with defaults
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string, filling gaps with defaults
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlConfig = toml::from_str(content)?;
        let mut config = Self::default();

        if let Some(width) = parsed.screen.width {
            config.screen_width = width;
        }
        if let Some(height) = parsed.screen.height {
            config.screen_height = height;
        }
        if let Some(outline) = parsed.render.outline {
            config.outline = outline;
        }
        if parsed.render.font.is_some() {
            config.font_file = parsed.render.font;
        }
        if parsed.render.theme_dir.is_some() {
            config.theme_dir = parsed.render.theme_dir;
        }
        if let Some(entries) = parsed.menu.entries {
            config.menu_entries = entries;
        }
        if let Some(selected) = parsed.menu.selected {
            config.selected_entry = selected;
        }
        if let Some(timeout) = parsed.menu.timeout {
            config.timeout = timeout;
        }
        config.palette.extend(parsed.colors);

        if let Some(standalone) = parsed.svg.standalone {
            config.svg.standalone = standalone;
        }
        if let Some(pretty) = parsed.svg.pretty_print {
            config.svg.pretty_print = pretty;
        }
        if let Some(prefix) = parsed.svg.class_prefix {
            config.svg.class_prefix = if prefix.is_empty() { None } else { Some(prefix) };
        }
        if let Some(embed) = parsed.svg.embed_images {
            config.svg.embed_images = embed;
        }

        Ok(config)
    }

    /// Set the screen size the theme is laid out for
    pub fn with_screen_size(mut self, width: u32, height: u32) -> Self {
        self.screen_width = width;
        self.screen_height = height;
        self
    }

    /// Set the directory theme resources are loaded from
    pub fn with_theme_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.theme_dir = Some(dir.into());
        self
    }

    /// Directory images are resolved against
    pub fn resource_dir(&self) -> &Path {
        self.theme_dir.as_deref().unwrap_or(Path::new("."))
    }

    /// Enable or disable box outlines
    pub fn with_outline(mut self, outline: bool) -> Self {
        self.outline = outline;
        self
    }

    /// Set the font used for text
    pub fn with_font_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.font_file = Some(path.into());
        self
    }

    /// Set the previewed menu entries
    pub fn with_menu_entries(mut self, entries: Vec<MenuEntry>) -> Self {
        self.menu_entries = entries;
        self
    }

    /// Set the selected menu entry
    pub fn with_selected_entry(mut self, index: usize) -> Self {
        self.selected_entry = index;
        self
    }

    /// Set the timeout shown by the `__timeout__` label
    pub fn with_timeout(mut self, seconds: u32) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the palette for color resolution
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Set the SVG configuration
    pub fn with_svg(mut self, config: SvgConfig) -> Self {
        self.svg = config;
        self
    }

    /// Enable or disable debug mode
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}
