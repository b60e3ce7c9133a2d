//! Nested, owned snapshot of an expression tree for tooling.

use super::arena::ExprArena;
use super::expression::ExprId;
use crate::dcp::{Curvature, Diagnostic, Sign};

/// One node of a tree report.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ExprReport {
    pub name: String,
    pub curvature: Curvature,
    pub sign: Sign,
    pub diagnostics: Vec<Diagnostic>,
    pub children: Vec<ExprReport>,
}

impl ExprReport {
    /// Whether no node in the report carries a diagnostic.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty() && self.children.iter().all(ExprReport::is_clean)
    }
}

impl ExprArena {
    /// Snapshot of the tree rooted at `id`.
    pub fn report(&self, id: ExprId) -> Option<ExprReport> {
        let expr = self.get(id)?;
        Some(ExprReport {
            name: expr.name().to_string(),
            curvature: expr.curvature(),
            sign: expr.sign(),
            diagnostics: expr.diagnostics().to_vec(),
            children: expr
                .children()
                .iter()
                .filter_map(|child| self.report(*child))
                .collect(),
        })
    }
}
