//! Geometry tree: boxes whose absolute geometry is derived from their ancestors
//!
//! Boxes live in a flat arena owned by [`BoxTree`]. Parent and child links
//! are [`BoxId`] indices, so a child never owns or borrows its parent.
//!
//! Every derived value is an [`Expr`] built on demand from the chain of
//! ancestors. Numbers only appear once a walk evaluates those expressions
//! against an [`EvalContext`].

use crate::paint::PaintKind;

use super::context::{EvalContext, SCREEN_HEIGHT, SCREEN_WIDTH};
use super::error::LayoutError;
use super::expr::Expr;
use super::length::Length;
use super::types::Rect;

/// Index of a box inside its [`BoxTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoxId(usize);

/// Layout axis. Left and width are horizontal, top and height vertical.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// One rectangular region of the output
#[derive(Debug, Clone, Default)]
pub struct LayoutBox {
    /// Name used in diagnostics and the debug dump
    pub name: String,
    pub left: Option<Length>,
    pub top: Option<Length>,
    pub width: Option<Length>,
    pub height: Option<Length>,
    /// Offset from the parent's left edge; replaces `left` when set
    pub left_expr: Option<Expr>,
    /// Offset from the parent's top edge; replaces `top` when set
    pub top_expr: Option<Expr>,
    pub width_expr: Option<Expr>,
    pub height_expr: Option<Expr>,
    pub paint: Option<PaintKind>,
    parent: Option<BoxId>,
    children: Vec<BoxId>,
}

impl LayoutBox {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_left(mut self, length: Length) -> Self {
        self.left = Some(length);
        self
    }

    pub fn with_top(mut self, length: Length) -> Self {
        self.top = Some(length);
        self
    }

    pub fn with_width(mut self, length: Length) -> Self {
        self.width = Some(length);
        self
    }

    pub fn with_height(mut self, length: Length) -> Self {
        self.height = Some(length);
        self
    }

    pub fn with_left_expr(mut self, expr: Expr) -> Self {
        self.left_expr = Some(expr);
        self
    }

    pub fn with_top_expr(mut self, expr: Expr) -> Self {
        self.top_expr = Some(expr);
        self
    }

    pub fn with_width_expr(mut self, expr: Expr) -> Self {
        self.width_expr = Some(expr);
        self
    }

    pub fn with_height_expr(mut self, expr: Expr) -> Self {
        self.height_expr = Some(expr);
        self
    }

    pub fn with_paint(mut self, paint: PaintKind) -> Self {
        self.paint = Some(paint);
        self
    }

    pub fn parent(&self) -> Option<BoxId> {
        self.parent
    }

    pub fn children(&self) -> &[BoxId] {
        &self.children
    }

    fn offset_length(&self, axis: Axis) -> Length {
        match axis {
            Axis::Horizontal => self.left,
            Axis::Vertical => self.top,
        }
        .unwrap_or_default()
    }

    fn extent_length(&self, axis: Axis) -> Length {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
        .unwrap_or_default()
    }

    fn offset_override(&self, axis: Axis) -> Option<&Expr> {
        match axis {
            Axis::Horizontal => self.left_expr.as_ref(),
            Axis::Vertical => self.top_expr.as_ref(),
        }
    }

    fn extent_override(&self, axis: Axis) -> Option<&Expr> {
        match axis {
            Axis::Horizontal => self.width_expr.as_ref(),
            Axis::Vertical => self.height_expr.as_ref(),
        }
    }
}

/// Arena of boxes rooted at the screen
#[derive(Debug, Clone)]
pub struct BoxTree {
    nodes: Vec<LayoutBox>,
}

impl BoxTree {
    /// Create a tree holding only the root box
    pub fn new() -> Self {
        Self {
            nodes: vec![LayoutBox::new("screen")],
        }
    }

    pub fn root(&self) -> BoxId {
        BoxId(0)
    }

    /// Attach `node` as the last child of `parent`
    pub fn add_child(&mut self, parent: BoxId, mut node: LayoutBox) -> BoxId {
        let id = BoxId(self.nodes.len());
        node.parent = Some(parent);
        node.children.clear();
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn get(&self, id: BoxId) -> &LayoutBox {
        &self.nodes[id.0]
    }

    pub fn get_mut(&mut self, id: BoxId) -> &mut LayoutBox {
        &mut self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of ancestors between `id` and the root
    pub fn depth(&self, id: BoxId) -> usize {
        let mut depth = 0;
        let mut current = self.get(id).parent;
        while let Some(parent) = current {
            depth += 1;
            current = self.get(parent).parent;
        }
        depth
    }

    pub fn derived_left(&self, id: BoxId) -> Expr {
        self.derived_offset(id, Axis::Horizontal)
    }

    pub fn derived_top(&self, id: BoxId) -> Expr {
        self.derived_offset(id, Axis::Vertical)
    }

    pub fn derived_width(&self, id: BoxId) -> Expr {
        self.derived_extent(id, Axis::Horizontal)
    }

    pub fn derived_height(&self, id: BoxId) -> Expr {
        self.derived_extent(id, Axis::Vertical)
    }

    /// Absolute position of the box's origin along `axis`
    pub fn derived_offset(&self, id: BoxId, axis: Axis) -> Expr {
        let node = self.get(id);
        let Some(parent) = node.parent else {
            return Expr::zero();
        };

        let origin = self.derived_offset(parent, axis);
        let local = match node.offset_override(axis) {
            Some(expr) => expr.clone(),
            None => node
                .offset_length(axis)
                .to_expr(&self.derived_extent(parent, axis)),
        };
        origin + local
    }

    /// Size of the box along `axis`
    pub fn derived_extent(&self, id: BoxId, axis: Axis) -> Expr {
        let node = self.get(id);
        if let Some(expr) = node.extent_override(axis) {
            return expr.clone();
        }

        match node.parent {
            None => Expr::unknown(match axis {
                Axis::Horizontal => SCREEN_WIDTH,
                Axis::Vertical => SCREEN_HEIGHT,
            }),
            Some(parent) => node
                .extent_length(axis)
                .to_expr(&self.derived_extent(parent, axis)),
        }
    }

    /// Evaluate the geometry of a single box
    pub fn resolve(&self, id: BoxId, ctx: &EvalContext) -> Result<Rect, LayoutError> {
        Ok(Rect::new(
            self.derived_left(id).evaluate(ctx)?,
            self.derived_top(id).evaluate(ctx)?,
            self.derived_width(id).evaluate(ctx)?,
            self.derived_height(id).evaluate(ctx)?,
        ))
    }

    /// Walk the tree depth-first, pre-order, resolving every box.
    ///
    /// `visit` sees a box before any of its children, and children in
    /// insertion order. The first evaluation error aborts the walk.
    pub fn walk<F>(&self, ctx: &EvalContext, mut visit: F) -> Result<(), LayoutError>
    where
        F: FnMut(BoxId, &LayoutBox, Rect),
    {
        self.walk_from(self.root(), ctx, &mut visit)
    }

    fn walk_from<F>(&self, id: BoxId, ctx: &EvalContext, visit: &mut F) -> Result<(), LayoutError>
    where
        F: FnMut(BoxId, &LayoutBox, Rect),
    {
        let rect = self.resolve(id, ctx)?;
        let node = self.get(id);
        visit(id, node, rect);
        for &child in &node.children {
            self.walk_from(child, ctx, visit)?;
        }
        Ok(())
    }

    /// Resolve every box, in walk order
    pub fn resolve_all(&self, ctx: &EvalContext) -> Result<Vec<(BoxId, Rect)>, LayoutError> {
        let mut resolved = Vec::with_capacity(self.nodes.len());
        self.walk(ctx, |id, _, rect| resolved.push((id, rect)))?;
        Ok(resolved)
    }
}

impl Default for BoxTree {
    fn default() -> Self {
        Self::new()
    }
}
