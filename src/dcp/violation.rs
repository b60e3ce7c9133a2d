//! DCP violation diagnostics.
//!
//! Violations never abort construction: they are attached to the node whose
//! atom was misapplied, and that node's curvature is `Nonconvex`.

use std::fmt;

use super::composition::Composition;
use super::curvature::Curvature;
use super::monotonicity::Monotonicity;

/// What rule a diagnostic reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ViolationKind {
    /// An argument's curvature is incompatible with the atom's curvature and monotonicity.
    Composition,
    /// The argument signs lie outside the atom's domain.
    Domain,
}

/// A DCP violation attached to an expression node.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Diagnostic {
    kind: ViolationKind,
    index: Option<usize>,
    message: String,
}

impl Diagnostic {
    /// Violation caused by the argument at `index`.
    pub fn composition(index: usize, message: impl Into<String>) -> Self {
        Self {
            kind: ViolationKind::Composition,
            index: Some(index),
            message: message.into(),
        }
    }

    /// Violation not attributable to a single argument.
    pub fn unindexed(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            index: None,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ViolationKind {
        self.kind
    }

    /// Index of the offending argument, if there is one.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn is_indexed(&self) -> bool {
        self.index.is_some()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Same diagnostic with its argument index replaced.
    pub(crate) fn with_index(mut self, index: Option<usize>) -> Self {
        self.index = index;
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(i) => write!(f, "Argument {}: {}", i, self.message),
            None => f.write_str(&self.message),
        }
    }
}

fn adjective(c: Curvature) -> &'static str {
    match c {
        Curvature::Constant => "constant",
        Curvature::Affine => "affine",
        Curvature::Convex => "convex",
        Curvature::Concave => "concave",
        Curvature::Nonconvex => "non-convex",
    }
}

/// Diagnostics for one application of an atom.
///
/// `atom` is the atom's short display name. A domain error (signed curvature
/// `Nonconvex`) yields an unindexed diagnostic first. Each argument with a
/// non-convex contribution then gets an indexed diagnostic, including
/// arguments that are already non-convex. If the contributions are
/// individually fine but mix convex with concave, each convex or concave
/// contribution is flagged.
pub fn composition_errors(
    atom: &str,
    signed_curvature: Curvature,
    monotonicities: &[Monotonicity],
    arguments: &[Curvature],
    composition: &Composition,
) -> Vec<Diagnostic> {
    let mut errors = Vec::new();
    if signed_curvature == Curvature::Nonconvex {
        errors.push(Diagnostic::unindexed(
            ViolationKind::Domain,
            format!(
                "{} is not convex or concave for arguments of these signs (domain error)",
                atom
            ),
        ));
    }

    errors.extend(composition.failing_arguments().filter_map(|i| {
        let arg = arguments.get(i).copied()?;
        let m = monotonicities.get(i)?;
        let message = if arg == Curvature::Nonconvex {
            "argument is non-convex".to_string()
        } else if signed_curvature == Curvature::Nonconvex {
            format!("argument sign is outside the domain of {}", atom)
        } else {
            format!(
                "argument is {}, but {} is {} and {} in it, so the argument must be {}",
                adjective(arg),
                atom,
                adjective(signed_curvature),
                m,
                adjective(m.required_curvature(signed_curvature)),
            )
        };
        Some(Diagnostic::composition(i, message))
    }));

    if errors.is_empty() && composition.curvature == Curvature::Nonconvex {
        errors = composition
            .contributions
            .iter()
            .enumerate()
            .filter(|(_, c)| matches!(c, Curvature::Convex | Curvature::Concave))
            .map(|(i, c)| {
                Diagnostic::composition(
                    i,
                    format!(
                        "argument is {}, but other arguments of {} are {}; \
                         convex and concave terms cannot be combined",
                        adjective(*c),
                        atom,
                        adjective(c.negate()),
                    ),
                )
            })
            .collect();
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dcp::composition::dcp_curvature;
    use Curvature::*;
    use Monotonicity::*;

    fn errors(f: Curvature, m: &[Monotonicity], args: &[Curvature]) -> Vec<Diagnostic> {
        let c = dcp_curvature(f, m, args).unwrap();
        composition_errors("f", f, m, args, &c)
    }

    #[test]
    fn test_no_errors() {
        assert!(errors(Convex, &[Increasing], &[Convex]).is_empty());
        assert!(errors(Affine, &[Increasing, Increasing], &[Convex, Affine]).is_empty());
    }

    #[test]
    fn test_indexed_composition_error() {
        let e = errors(Convex, &[Increasing, Increasing], &[Affine, Concave]);
        assert_eq!(e.len(), 1);
        assert_eq!(e[0].index(), Some(1));
        assert_eq!(e[0].kind(), ViolationKind::Composition);
        assert!(e[0].message().contains("must be convex"));
    }

    #[test]
    fn test_decreasing_message() {
        let e = errors(Convex, &[Decreasing], &[Convex]);
        assert!(e[0].message().contains("decreasing"));
        assert!(e[0].message().contains("must be concave"));
    }

    #[test]
    fn test_domain_error_also_flags_arguments() {
        let e = errors(Nonconvex, &[Increasing], &[Affine]);
        assert_eq!(e.len(), 2);
        assert!(!e[0].is_indexed());
        assert_eq!(e[0].kind(), ViolationKind::Domain);
        assert_eq!(e[1].index(), Some(0));
        assert_eq!(e[1].kind(), ViolationKind::Composition);
        assert!(e[1].message().contains("domain of f"));

        let e = errors(Nonconvex, &[Nonmonotonic; 2], &[Affine, Constant]);
        let idx: Vec<_> = e.iter().map(|d| d.index()).collect();
        assert_eq!(idx, vec![None, Some(0), Some(1)]);
    }

    #[test]
    fn test_mixed_sum_flags_each_term() {
        let e = errors(Affine, &[Increasing; 3], &[Convex, Affine, Concave]);
        let idx: Vec<_> = e.iter().map(|d| d.index()).collect();
        assert_eq!(idx, vec![Some(0), Some(2)]);
    }

    #[test]
    fn test_nonconvex_argument_is_flagged() {
        let e = errors(Convex, &[Increasing], &[Nonconvex]);
        assert_eq!(e.len(), 1);
        assert_eq!(e[0].index(), Some(0));
        assert_eq!(e[0].message(), "argument is non-convex");

        // the convex term is fine on its own, so only the non-convex one is flagged
        let e = errors(Affine, &[Increasing, Increasing], &[Nonconvex, Convex]);
        let idx: Vec<_> = e.iter().map(|d| d.index()).collect();
        assert_eq!(idx, vec![Some(0)]);
    }

    #[test]
    fn test_display() {
        let d = Diagnostic::composition(2, "bad");
        assert_eq!(d.to_string(), "Argument 2: bad");
    }
}
