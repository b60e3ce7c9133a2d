//! Arena owning all expression nodes of one or more trees.

use std::collections::HashSet;
use std::ops::Index;

use super::constant::Arg;
use super::expression::{Expr, ExprId, ExprKind};
use crate::atoms::{format_number, registry, Atom, AtomRule, Literal, Operand};
use crate::dcp::{Curvature, Diagnostic, Sign};
use crate::error::{DcpError, Result};

/// Owns expression nodes by value.
///
/// Nodes are only ever appended. Building an atom node either succeeds
/// completely or leaves the arena untouched.
#[derive(Debug, Clone, Default)]
pub struct ExprArena {
    nodes: Vec<Expr>,
}

/// Where an expression argument comes from.
#[derive(Debug, Clone, Copy)]
enum Source {
    Existing(ExprId),
    Literal(f64),
}

/// An argument after resolution against the arena.
struct Resolved {
    source: Option<Source>,
    operand: Option<Operand>,
    literal: Option<Literal>,
    shown: String,
}

impl ExprArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: ExprId) -> Option<&Expr> {
        self.nodes.get(id.0)
    }

    /// All node ids, in creation order.
    pub fn ids(&self) -> impl Iterator<Item = ExprId> {
        (0..self.nodes.len()).map(ExprId)
    }

    fn push(&mut self, expr: Expr) -> ExprId {
        let id = ExprId(self.nodes.len());
        self.nodes.push(expr);
        id
    }

    /// Add a constant leaf.
    pub fn constant(&mut self, value: f64) -> ExprId {
        self.push(Expr::leaf(
            ExprKind::Constant(value),
            format_number(value),
            Curvature::Constant,
            Sign::of_value(value),
        ))
    }

    /// Add a variable of unknown sign.
    pub fn variable(&mut self, name: impl Into<String>) -> ExprId {
        self.push_variable(name.into(), Sign::Unknown)
    }

    pub(crate) fn push_variable(&mut self, name: String, sign: Sign) -> ExprId {
        self.push(Expr::leaf(ExprKind::Variable, name, Curvature::Affine, sign))
    }

    /// Apply the atom registered under `name` (case-insensitive).
    pub fn apply(&mut self, name: &str, args: Vec<Arg>) -> Result<ExprId> {
        registry().get(name)?.call(self, args)
    }

    /// Apply `atom` to `args` and add the resulting node.
    ///
    /// Literal arguments become constant leaves, except a literal the atom
    /// takes as its parameter. A leaf that is already an argument elsewhere
    /// (or appears twice in `args`) is copied; a compound expression cannot be
    /// reused.
    pub fn apply_atom(&mut self, atom: Atom, args: Vec<Arg>) -> Result<ExprId> {
        if args.is_empty() {
            return Err(DcpError::Arity {
                atom: atom.name().to_string(),
                expected: atom.arity().to_string(),
                got: 0,
            });
        }

        let resolved = args
            .iter()
            .map(|arg| self.resolve(arg))
            .collect::<Result<Vec<_>>>()?;
        let literals: Vec<Option<Literal>> = resolved.iter().map(|r| r.literal.clone()).collect();
        let shown: Vec<String> = resolved.iter().map(|r| r.shown.clone()).collect();
        let (n, parameter) = atom.split_parameter(&literals, &shown)?;

        let mut sources = Vec::with_capacity(n);
        let mut operands = Vec::with_capacity(n);
        for r in &resolved[..n] {
            match (r.source, r.operand) {
                (Some(source), Some(operand)) => {
                    sources.push(source);
                    operands.push(operand);
                }
                _ => {
                    return Err(DcpError::InvalidArgument {
                        atom: atom.name().to_string(),
                        message: format!("'{}' is not an expression", r.shown),
                    })
                }
            }
        }
        let copies = self.check_reuse(&sources)?;

        let rule = AtomRule::new(atom, operands, parameter)?;
        let (composition, diagnostics) = rule.evaluate()?;
        let name = format!("{}({})", atom.name(), shown.join(", "));

        // Nothing below can fail.
        let children: Vec<ExprId> = sources
            .iter()
            .zip(copies)
            .map(|(source, copy)| match (*source, copy) {
                (Source::Existing(id), false) => id,
                (Source::Existing(id), true) => {
                    let leaf = self.nodes[id.0].detached();
                    self.push(leaf)
                }
                (Source::Literal(v), _) => self.constant(v),
            })
            .collect();

        log::debug!(
            "{}: {}, {} ({} diagnostics)",
            name,
            composition.curvature,
            rule.sign(),
            diagnostics.len()
        );
        let id = self.push(Expr {
            kind: ExprKind::Atom {
                atom,
                parameter: rule.parameter(),
            },
            name,
            curvature: composition.curvature,
            sign: rule.sign(),
            children: children.clone(),
            parent: None,
            diagnostics,
        });
        for child in children {
            self.nodes[child.0].parent = Some(id);
        }
        Ok(id)
    }

    fn resolve(&self, arg: &Arg) -> Result<Resolved> {
        Ok(match arg {
            Arg::Expr(id) => {
                let expr = self.get(*id).ok_or(DcpError::UnknownExpression(*id))?;
                Resolved {
                    source: Some(Source::Existing(*id)),
                    operand: Some(Operand::new(expr.curvature, expr.sign)),
                    literal: expr.constant_value().map(Literal::Number),
                    shown: expr.name.clone(),
                }
            }
            Arg::Number(v) => Resolved {
                source: Some(Source::Literal(*v)),
                operand: Some(Operand::constant(*v)),
                literal: Some(Literal::Number(*v)),
                shown: format_number(*v),
            },
            Arg::Symbol(s) => Resolved {
                source: None,
                operand: None,
                literal: Some(Literal::Symbol(s.clone())),
                shown: s.clone(),
            },
        })
    }

    /// For each source, whether the leaf must be copied. Errors if a compound
    /// expression already has a parent or is passed twice.
    fn check_reuse(&self, sources: &[Source]) -> Result<Vec<bool>> {
        let mut seen = HashSet::new();
        sources
            .iter()
            .map(|source| match source {
                Source::Existing(id) => {
                    let taken = self.nodes[id.0].parent.is_some() || !seen.insert(*id);
                    match (taken, self.nodes[id.0].is_leaf()) {
                        (false, _) => Ok(false),
                        (true, true) => Ok(true),
                        (true, false) => Err(DcpError::AlreadyAttached(*id)),
                    }
                }
                Source::Literal(_) => Ok(false),
            })
            .collect()
    }

    /// Parent links from `id` (exclusive) up to its root.
    pub fn ancestors(&self, id: ExprId) -> Ancestors<'_> {
        Ancestors {
            arena: self,
            next: self.get(id).and_then(Expr::parent),
        }
    }

    /// Root of the tree containing `id`.
    pub fn root_of(&self, id: ExprId) -> ExprId {
        self.ancestors(id).last().unwrap_or(id)
    }

    /// All diagnostics in the tree below `id` (inclusive), depth-first, with
    /// the node each belongs to.
    pub fn all_diagnostics(&self, id: ExprId) -> Vec<(ExprId, &Diagnostic)> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(expr) = self.get(next) {
                out.extend(expr.diagnostics.iter().map(|d| (next, d)));
                stack.extend(expr.children.iter().rev());
            }
        }
        out
    }
}

impl Index<ExprId> for ExprArena {
    type Output = Expr;

    fn index(&self, id: ExprId) -> &Expr {
        &self.nodes[id.0]
    }
}

/// Iterator over the ancestors of a node.
pub struct Ancestors<'a> {
    arena: &'a ExprArena,
    next: Option<ExprId>,
}

impl Iterator for Ancestors<'_> {
    type Item = ExprId;

    fn next(&mut self) -> Option<ExprId> {
        let id = self.next?;
        self.next = self.arena.get(id).and_then(Expr::parent);
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;
    use crate::expr::VariableBuilder;

    #[test]
    fn test_constant_leaf() {
        let mut arena = ExprArena::new();
        let c = arena.constant(-2.0);
        assert_eq!(arena[c].sign(), Sign::Negative);
        assert_eq!(arena[c].curvature(), Curvature::Constant);
        assert_eq!(arena[c].name(), "-2");
        assert!(arena[c].is_leaf());
    }

    #[test]
    fn test_literal_arguments_become_children() {
        let mut arena = ExprArena::new();
        let x = arena.variable("x");
        let s = arena.apply_atom(Atom::Sum, args![x, 2.5]).unwrap();
        assert_eq!(arena[s].name(), "sum(x, 2.5)");
        assert_eq!(arena[s].children().len(), 2);
        let c = arena[s].children()[1];
        assert_eq!(arena[c].constant_value(), Some(2.5));
        assert_eq!(arena[c].parent(), Some(s));
    }

    #[test]
    fn test_parameter_is_not_a_child() {
        let mut arena = ExprArena::new();
        let x = arena.variable("x");
        let n = arena.apply_atom(Atom::Norm, args![x, 3]).unwrap();
        assert_eq!(arena[n].name(), "norm(x, 3)");
        assert_eq!(arena[n].children(), &[x]);
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn test_leaf_reuse_copies() {
        let mut arena = ExprArena::new();
        let x = arena.variable("x");
        let s = arena.apply_atom(Atom::Sum, args![x, x]).unwrap();
        let children = arena[s].children().to_vec();
        assert_eq!(children[0], x);
        assert_ne!(children[1], x);
        assert_eq!(arena[children[1]].name(), "x");
        assert_eq!(arena[children[1]].parent(), Some(s));
    }

    #[test]
    fn test_compound_reuse_fails_atomically() {
        let mut arena = ExprArena::new();
        let x = arena.variable("x");
        let e = arena.apply_atom(Atom::Exp, args![x]).unwrap();
        let _ = arena.apply_atom(Atom::Sum, args![e]).unwrap();
        let before = arena.len();
        let err = arena.apply_atom(Atom::Sum, args![1.0, e]).unwrap_err();
        assert_eq!(err, DcpError::AlreadyAttached(e));
        assert_eq!(arena.len(), before);
    }

    #[test]
    fn test_unknown_expression() {
        let mut arena = ExprArena::new();
        let err = arena.apply_atom(Atom::Exp, vec![Arg::Expr(ExprId(7))]).unwrap_err();
        assert_eq!(err, DcpError::UnknownExpression(ExprId(7)));
    }

    #[test]
    fn test_symbol_outside_parameter_slot() {
        let mut arena = ExprArena::new();
        let err = arena.apply_atom(Atom::Exp, args!["Inf"]).unwrap_err();
        assert!(matches!(err, DcpError::InvalidArgument { .. }));
        assert!(arena.is_empty());
    }

    #[test]
    fn test_ancestors() {
        let mut arena = ExprArena::new();
        let x = arena.variable("x");
        let e = arena.apply_atom(Atom::Exp, args![x]).unwrap();
        let s = arena.apply_atom(Atom::Sum, args![e, 1]).unwrap();
        assert_eq!(arena.ancestors(x).collect::<Vec<_>>(), vec![e, s]);
        assert_eq!(arena.root_of(x), s);
        assert_eq!(arena.root_of(s), s);
    }

    #[test]
    fn test_all_diagnostics() {
        let mut arena = ExprArena::new();
        let x = VariableBuilder::new("x").negative().build(&mut arena);
        let l = arena.apply_atom(Atom::Log, args![x]).unwrap();
        let y = arena.variable("y");
        let e = arena.apply_atom(Atom::Exp, args![l]).unwrap();
        let s = arena.apply_atom(Atom::Sum, args![e, y]).unwrap();
        let all = arena.all_diagnostics(s);
        let nodes: Vec<ExprId> = all.iter().map(|(id, _)| *id).collect();
        assert_eq!(nodes, vec![s, e, l, l]);
        assert_eq!(all[3].1.index(), Some(0));
    }
}
