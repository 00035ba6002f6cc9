//! Backend-independent list of drawing commands

use crate::layout::{Rect, TextAlign};
use crate::palette::Color;

/// One drawing operation in canvas space
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        color: Color,
    },
    /// One pixel wide outline
    StrokeRect {
        rect: Rect,
        color: Color,
    },
    /// Theme image `name`, resized to `rect`
    Image {
        name: String,
        rect: Rect,
    },
    Text {
        text: String,
        rect: Rect,
        font_size: f64,
        color: Color,
        align: TextAlign,
    },
}

/// Drawing commands in painting order (back to front)
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayList {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Names of the images referenced, in painting order
    pub fn image_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Image { name, .. } => Some(name.as_str()),
            _ => None,
        })
    }
}
