//! Color resolution for theme color strings
//!
//! Themes write colors as `#rrggbb`, `#rgb`, `r, g, b` or a named color.
//! Named colors come from a built-in table that the `[colors]` section of a
//! render configuration extends.

use std::collections::HashMap;

/// An RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#rgb` or `#rrggbb`
    pub fn from_hex(value: &str) -> Option<Self> {
        let digits = value.strip_prefix('#')?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match digits.len() {
            3 => {
                let channel = |i: usize| u8::from_str_radix(&digits[i..=i], 16).ok().map(|v| v * 17);
                Some(Self::rgb(channel(0)?, channel(1)?, channel(2)?))
            }
            6 => {
                let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
                Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
            }
            _ => None,
        }
    }

    /// Parse the `r, g, b` form
    fn from_components(value: &str) -> Option<Self> {
        let parts: Vec<u8> = value
            .split(',')
            .map(|part| part.trim().parse::<u8>().ok())
            .collect::<Option<_>>()?;
        match parts.as_slice() {
            [r, g, b] => Some(Self::rgb(*r, *g, *b)),
            _ => None,
        }
    }

    /// `#rrggbb` form, dropping alpha
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Named colors available to theme color strings
#[derive(Debug, Clone)]
pub struct Palette {
    /// Color mappings: lower-case name -> hex color
    pub colors: HashMap<String, String>,
}

/// Default named colors understood by the boot loader
const DEFAULT_COLORS: &[(&str, &str)] = &[
    ("black", "#000000"),
    ("white", "#ffffff"),
    ("gray", "#808080"),
    ("grey", "#808080"),
    ("silver", "#c0c0c0"),
    ("lightgray", "#d3d3d3"),
    ("lightgrey", "#d3d3d3"),
    ("darkgray", "#a9a9a9"),
    ("darkgrey", "#a9a9a9"),
    ("dimgray", "#696969"),
    ("red", "#ff0000"),
    ("darkred", "#8b0000"),
    ("maroon", "#800000"),
    ("orange", "#ffa500"),
    ("yellow", "#ffff00"),
    ("gold", "#ffd700"),
    ("green", "#008000"),
    ("lime", "#00ff00"),
    ("darkgreen", "#006400"),
    ("olive", "#808000"),
    ("teal", "#008080"),
    ("cyan", "#00ffff"),
    ("aqua", "#00ffff"),
    ("blue", "#0000ff"),
    ("navy", "#000080"),
    ("darkblue", "#00008b"),
    ("steelblue", "#4682b4"),
    ("skyblue", "#87ceeb"),
    ("purple", "#800080"),
    ("magenta", "#ff00ff"),
    ("fuchsia", "#ff00ff"),
    ("pink", "#ffc0cb"),
    ("brown", "#a52a2a"),
];

impl Palette {
    /// Add or replace named colors
    pub fn extend(&mut self, colors: impl IntoIterator<Item = (String, String)>) {
        self.colors.extend(
            colors
                .into_iter()
                .map(|(name, value)| (name.to_ascii_lowercase(), value)),
        );
    }

    /// Resolve a theme color string
    ///
    /// Returns None if the string is neither a literal color nor a known name.
    pub fn resolve(&self, spec: &str) -> Option<Color> {
        let spec = spec.trim();
        if spec.starts_with('#') {
            return Color::from_hex(spec);
        }
        if spec.contains(',') {
            return Color::from_components(spec);
        }
        self.colors
            .get(&spec.to_ascii_lowercase())
            .and_then(|hex| Color::from_hex(hex.trim()))
    }

    /// Resolve a theme color string, logging and falling back when it is not understood
    pub fn resolve_or(&self, spec: &str, fallback: Color) -> Color {
        self.resolve(spec).unwrap_or_else(|| {
            log::warn!("unknown color '{}', using {}", spec, fallback.to_hex());
            fallback
        })
    }
}

impl Default for Palette {
    fn default() -> Self {
        let mut palette = Palette {
            colors: HashMap::new(),
        };
        palette.extend(
            DEFAULT_COLORS
                .iter()
                .map(|(name, hex)| (name.to_string(), hex.to_string())),
        );
        palette
    }
}
