//! Declared lengths and how they resolve against a reference value

use std::fmt;

use super::error::LayoutError;
use super::expr::Expr;

/// Operator applied to the offset of a [`Length::Combined`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetOp {
    Add,
    Sub,
}

/// A length as written in a theme: `50`, `50%` or `50%-10`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    /// Pixels, independent of the reference
    Absolute(f64),
    /// Percentage of the reference
    Relative(f64),
    /// Percentage of the reference, then an offset in pixels
    Combined {
        percent: f64,
        offset: f64,
        op: OffsetOp,
    },
}

impl Length {
    pub fn combined(percent: f64, op: OffsetOp, offset: f64) -> Self {
        Length::Combined {
            percent,
            offset,
            op,
        }
    }

    /// Resolve against a concrete reference value
    pub fn resolve(&self, reference: f64) -> f64 {
        match *self {
            Length::Absolute(value) => value,
            Length::Relative(percent) => reference * (percent / 100.0),
            Length::Combined {
                percent,
                offset,
                op,
            } => {
                let scaled = reference * (percent / 100.0);
                match op {
                    OffsetOp::Add => scaled + offset,
                    OffsetOp::Sub => scaled - offset,
                }
            }
        }
    }

    /// Resolve against a reference that is itself still an expression
    pub fn to_expr(&self, reference: &Expr) -> Expr {
        match *self {
            Length::Absolute(value) => Expr::constant(value),
            Length::Relative(percent) => reference * &(Expr::constant(percent) / 100.0),
            Length::Combined {
                percent,
                offset,
                op,
            } => {
                let scaled = reference * &(Expr::constant(percent) / 100.0);
                match op {
                    OffsetOp::Add => scaled + offset,
                    OffsetOp::Sub => scaled - offset,
                }
            }
        }
    }

    /// Pixel value of a length that must not depend on a reference.
    ///
    /// `property` names the slot for the error message.
    pub fn absolute(&self, property: &str) -> Result<f64, LayoutError> {
        match *self {
            Length::Absolute(value) => Ok(value),
            _ => Err(LayoutError::malformed_length(
                property,
                "an absolute length",
                self,
            )),
        }
    }
}

impl Default for Length {
    fn default() -> Self {
        Length::Absolute(0.0)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Absolute(value) => write!(f, "{}", value),
            Length::Relative(percent) => write!(f, "{}%", percent),
            Length::Combined {
                percent,
                offset,
                op,
            } => {
                let sign = match op {
                    OffsetOp::Add => '+',
                    OffsetOp::Sub => '-',
                };
                write!(f, "{}%{}{}", percent, sign, offset)
            }
        }
    }
}
