//! Resolution context mapping unknown names to values

use std::collections::HashMap;

/// Unknown holding the output canvas width
pub const SCREEN_WIDTH: &str = "screen-width";

/// Unknown holding the output canvas height
pub const SCREEN_HEIGHT: &str = "screen-height";

/// Values for the unknown leaves of an expression tree.
///
/// Populated once before a render pass and only read while the tree is evaluated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvalContext {
    unknowns: HashMap<String, f64>,
}

impl EvalContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context with the screen dimensions set
    pub fn for_screen(width: u32, height: u32) -> Self {
        Self::new()
            .with_unknown(SCREEN_WIDTH, f64::from(width))
            .with_unknown(SCREEN_HEIGHT, f64::from(height))
    }

    /// Set the value of an unknown
    pub fn set_unknown(&mut self, name: impl Into<String>, value: f64) {
        self.unknowns.insert(name.into(), value);
    }

    /// Builder form of [`EvalContext::set_unknown`]
    pub fn with_unknown(mut self, name: impl Into<String>, value: f64) -> Self {
        self.set_unknown(name, value);
        self
    }

    /// Look up the value of an unknown
    pub fn get(&self, name: &str) -> Option<f64> {
        self.unknowns.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.unknowns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.unknowns.is_empty()
    }
}
