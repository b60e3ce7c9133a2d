//! Expression types and creation utilities.
//!
//! This module provides the expression tree:
//! - `ExprArena` - owns all nodes; builds atom applications
//! - `Expr` - a node: curvature, sign, name, children, parent, diagnostics
//! - `Arg` - an atom argument (expression, number or symbol)
//! - Variable creation via `VariableBuilder`

pub mod arena;
pub mod constant;
pub mod expression;
pub mod report;
pub mod variable;

// Re-export main types
pub use arena::{Ancestors, ExprArena};
pub use constant::Arg;
pub use expression::{Expr, ExprId, ExprKind};
pub use report::ExprReport;
pub use variable::VariableBuilder;
