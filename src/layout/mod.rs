//! Layout resolution
//!
//! Theme lengths become lazy expressions over the screen size, attached to a
//! tree of boxes. Walking the tree with an [`EvalContext`] produces concrete
//! pixel rectangles.

pub mod context;
pub mod error;
pub mod expr;
pub mod length;
pub mod tree;
pub mod types;

pub use context::{EvalContext, SCREEN_HEIGHT, SCREEN_WIDTH};
pub use error::LayoutError;
pub use expr::{BinaryOp, Expr};
pub use length::{Length, OffsetOp};
pub use tree::{Axis, BoxId, BoxTree, LayoutBox};
pub use types::{Rect, TextAlign};
