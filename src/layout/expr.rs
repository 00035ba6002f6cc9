//! Lazy arithmetic expressions over named unknowns
//!
//! Geometry is built as expression trees rather than numbers because the
//! screen size is only known once a render is requested. Expressions are
//! immutable; combining two of them allocates a new node and shares the
//! operands.

use std::fmt;
use std::ops::{Add, Div, Mul, Sub};
use std::rc::Rc;

use super::context::EvalContext;
use super::error::LayoutError;

/// Binary arithmetic operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
        }
    }
}

/// A deferred arithmetic computation
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Known value
    Constant(f64),
    /// Value looked up in the [`EvalContext`] at evaluation time
    Unknown(Rc<str>),
    /// `lhs op rhs`
    Binary {
        op: BinaryOp,
        lhs: Rc<Expr>,
        rhs: Rc<Expr>,
    },
}

impl Expr {
    pub fn constant(value: f64) -> Self {
        Expr::Constant(value)
    }

    pub fn zero() -> Self {
        Expr::Constant(0.0)
    }

    pub fn unknown(name: impl Into<Rc<str>>) -> Self {
        Expr::Unknown(name.into())
    }

    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary {
            op,
            lhs: Rc::new(lhs),
            rhs: Rc::new(rhs),
        }
    }

    /// Evaluate the expression against a context.
    ///
    /// Operands are evaluated left to right. Fails if an unknown has no value
    /// in `ctx` or a division has a zero denominator.
    pub fn evaluate(&self, ctx: &EvalContext) -> Result<f64, LayoutError> {
        match self {
            Expr::Constant(value) => Ok(*value),
            Expr::Unknown(name) => ctx
                .get(name)
                .ok_or_else(|| LayoutError::unresolved(name.to_string())),
            Expr::Binary { op, lhs, rhs } => {
                let l = lhs.evaluate(ctx)?;
                let r = rhs.evaluate(ctx)?;
                match op {
                    BinaryOp::Add => Ok(l + r),
                    BinaryOp::Sub => Ok(l - r),
                    BinaryOp::Mul => Ok(l * r),
                    BinaryOp::Div => {
                        if r == 0.0 {
                            Err(LayoutError::division_by_zero(self))
                        } else {
                            Ok(l / r)
                        }
                    }
                }
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Constant(value) => write!(f, "{}", value),
            Expr::Unknown(name) => write!(f, "{}", name),
            Expr::Binary { op, lhs, rhs } => write!(f, "({} {} {})", lhs, op.symbol(), rhs),
        }
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Expr::Constant(value)
    }
}

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $op:expr) => {
        impl $trait for Expr {
            type Output = Expr;

            fn $method(self, rhs: Expr) -> Expr {
                Expr::binary($op, self, rhs)
            }
        }

        impl $trait<f64> for Expr {
            type Output = Expr;

            fn $method(self, rhs: f64) -> Expr {
                Expr::binary($op, self, Expr::Constant(rhs))
            }
        }

        impl $trait<&Expr> for &Expr {
            type Output = Expr;

            fn $method(self, rhs: &Expr) -> Expr {
                Expr::binary($op, self.clone(), rhs.clone())
            }
        }

        impl $trait<f64> for &Expr {
            type Output = Expr;

            fn $method(self, rhs: f64) -> Expr {
                Expr::binary($op, self.clone(), Expr::Constant(rhs))
            }
        }
    };
}

impl_binary_op!(Add, add, BinaryOp::Add);
impl_binary_op!(Sub, sub, BinaryOp::Sub);
impl_binary_op!(Mul, mul, BinaryOp::Mul);
impl_binary_op!(Div, div, BinaryOp::Div);
