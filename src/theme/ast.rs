//! Syntax tree for GRUB theme files

use std::fmt::{self, Write as _};

use crate::layout::Length;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// Value of a theme property
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// Quoted string or bare word
    String(String),
    Length(Length),
    Bool(bool),
}

impl PropertyValue {
    fn type_name(&self) -> &'static str {
        match self {
            PropertyValue::String(_) => "string",
            PropertyValue::Length(_) => "length",
            PropertyValue::Bool(_) => "bool",
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::String(s) => write!(f, "{:?}", s),
            PropertyValue::Length(length) => write!(f, "{}", length),
            PropertyValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// A `name = value` (or `name: value`) pair
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    pub value: PropertyValue,
    pub span: Span,
}

impl Property {
    pub fn new(name: impl Into<String>, value: PropertyValue, span: Span) -> Self {
        Self {
            name: name.into(),
            value,
            span,
        }
    }
}

/// Typed access to a list of properties.
///
/// Lookups return the first property with the given name. A property that
/// exists with a different type is logged and treated as absent.
pub trait PropertySource {
    fn properties(&self) -> &[Property];

    /// Label used in warnings
    fn source_name(&self) -> &str;

    fn property(&self, name: &str) -> Option<&Property> {
        self.properties().iter().find(|p| p.name == name)
    }

    fn get_length(&self, name: &str) -> Option<Length> {
        match &self.property(name)?.value {
            PropertyValue::Length(length) => Some(*length),
            other => mismatch(self.source_name(), name, "length", other),
        }
    }

    fn get_string(&self, name: &str) -> Option<String> {
        match &self.property(name)?.value {
            PropertyValue::String(s) => Some(s.clone()),
            other => mismatch(self.source_name(), name, "string", other),
        }
    }

    fn get_bool(&self, name: &str) -> Option<bool> {
        match &self.property(name)?.value {
            PropertyValue::Bool(b) => Some(*b),
            other => mismatch(self.source_name(), name, "bool", other),
        }
    }
}

fn mismatch<T>(source: &str, name: &str, expected: &str, found: &PropertyValue) -> Option<T> {
    log::warn!(
        "{}: property '{}' should be a {}, found {} {}",
        source,
        name,
        expected,
        found.type_name(),
        found
    );
    None
}

/// A `+ kind { ... }` block
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub kind: String,
    pub properties: Vec<Property>,
    pub children: Vec<Component>,
    pub span: Span,
}

impl Component {
    pub fn new(kind: impl Into<String>, span: Span) -> Self {
        Self {
            kind: kind.into(),
            properties: Vec::new(),
            children: Vec::new(),
            span,
        }
    }

    fn dump_into(&self, out: &mut String, indent: usize) {
        let pad = "    ".repeat(indent);
        let _ = writeln!(out, "{}+ {} {{", pad, self.kind);
        for prop in &self.properties {
            let _ = writeln!(out, "{}    {} = {}", pad, prop.name, prop.value);
        }
        for child in &self.children {
            child.dump_into(out, indent + 1);
        }
        let _ = writeln!(out, "{}}}", pad);
    }
}

impl PropertySource for Component {
    fn properties(&self) -> &[Property] {
        &self.properties
    }

    fn source_name(&self) -> &str {
        &self.kind
    }
}

/// A parsed theme file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Theme {
    /// Global properties
    pub properties: Vec<Property>,
    pub components: Vec<Component>,
}

impl Theme {
    /// Readable listing of every property and component
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for prop in &self.properties {
            let _ = writeln!(out, "{} : {}", prop.name, prop.value);
        }
        for component in &self.components {
            component.dump_into(&mut out, 0);
        }
        out
    }
}

impl PropertySource for Theme {
    fn properties(&self) -> &[Property] {
        &self.properties
    }

    fn source_name(&self) -> &str {
        "theme"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label() -> Component {
        let mut c = Component::new("label", 0..0);
        c.properties = vec![
            Property::new("left", PropertyValue::Length(Length::Relative(50.0)), 0..0),
            Property::new("text", PropertyValue::String("hi".to_string()), 0..0),
            Property::new("visible", PropertyValue::Bool(false), 0..0),
            Property::new("text", PropertyValue::String("shadowed".to_string()), 0..0),
        ];
        c
    }

    #[test]
    fn test_typed_lookup() {
        let c = label();
        assert_eq!(c.get_length("left"), Some(Length::Relative(50.0)));
        assert_eq!(c.get_string("text").as_deref(), Some("hi"));
        assert_eq!(c.get_bool("visible"), Some(false));
        assert_eq!(c.get_length("top"), None);
    }

    #[test]
    fn test_type_mismatch_is_absent() {
        let c = label();
        assert_eq!(c.get_string("left"), None);
        assert_eq!(c.get_length("text"), None);
        assert_eq!(c.get_bool("text"), None);
    }

    #[test]
    fn test_dump() {
        let mut menu = Component::new("boot_menu", 0..0);
        menu.properties = vec![Property::new(
            "item_height",
            PropertyValue::Length(Length::Absolute(42.0)),
            0..0,
        )];
        menu.children.push(label());
        let theme = Theme {
            properties: vec![Property::new(
                "desktop-color",
                PropertyValue::String("#000".to_string()),
                0..0,
            )],
            components: vec![menu],
        };
        insta::assert_snapshot!(theme.dump(), @r###"
        desktop-color : "#000"
        + boot_menu {
            item_height = 42
            + label {
                left = 50%
                text = "hi"
                visible = false
                text = "shadowed"
            }
        }
        "###);
    }
}
