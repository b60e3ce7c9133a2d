//! Core expression types for dcpcheck.
//!
//! Expression nodes live in an [`ExprArena`](super::ExprArena) and refer to
//! each other by [`ExprId`]. A node's curvature, sign, name and children are
//! fixed when it is built; its parent link is set once, when the node becomes
//! an argument of another node.

use std::fmt;

use crate::atoms::{Atom, Parameter};
use crate::dcp::{Curvature, Diagnostic, Sign};

/// Index of an expression in its arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ExprId(pub(crate) usize);

impl ExprId {
    /// Get the raw index.
    pub fn raw(&self) -> usize {
        self.0
    }
}

/// What kind of node an expression is.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Numeric literal.
    Constant(f64),
    /// Named variable.
    Variable,
    /// Application of an atom.
    Atom {
        atom: Atom,
        parameter: Option<Parameter>,
    },
}

/// An expression node.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub(crate) kind: ExprKind,
    pub(crate) name: String,
    pub(crate) curvature: Curvature,
    pub(crate) sign: Sign,
    pub(crate) children: Vec<ExprId>,
    pub(crate) parent: Option<ExprId>,
    pub(crate) diagnostics: Vec<Diagnostic>,
}

impl Expr {
    pub(crate) fn leaf(kind: ExprKind, name: String, curvature: Curvature, sign: Sign) -> Self {
        Self {
            kind,
            name,
            curvature,
            sign,
            children: Vec::new(),
            parent: None,
            diagnostics: Vec::new(),
        }
    }

    /// Copy of a leaf without its parent link.
    pub(crate) fn detached(&self) -> Self {
        Self {
            parent: None,
            ..self.clone()
        }
    }

    pub fn kind(&self) -> &ExprKind {
        &self.kind
    }

    /// Display name, e.g. `norm(x, y, 3)`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn curvature(&self) -> Curvature {
        self.curvature
    }

    pub fn sign(&self) -> Sign {
        self.sign
    }

    /// Arguments of the atom, in order, excluding its parameter.
    pub fn children(&self) -> &[ExprId] {
        &self.children
    }

    /// The node this expression is an argument of; `None` for a root.
    pub fn parent(&self) -> Option<ExprId> {
        self.parent
    }

    /// DCP violations found when this node was built.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// The atom this node applies, if it is not a leaf.
    pub fn atom(&self) -> Option<Atom> {
        match self.kind {
            ExprKind::Atom { atom, .. } => Some(atom),
            _ => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        !matches!(self.kind, ExprKind::Atom { .. })
    }

    /// Numeric value of a constant leaf.
    pub fn constant_value(&self) -> Option<f64> {
        match self.kind {
            ExprKind::Constant(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_convex(&self) -> bool {
        self.curvature.is_convex()
    }

    pub fn is_concave(&self) -> bool {
        self.curvature.is_concave()
    }

    pub fn is_affine(&self) -> bool {
        self.curvature.is_affine()
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
