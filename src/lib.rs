//! # dcpcheck
//!
//! Static verification of Disciplined Convex Programming (DCP) rules.
//!
//! dcpcheck builds expression trees from a fixed library of atoms (`log`,
//! `norm`, `huber`, `quad_over_lin`, ...) and infers the sign and curvature
//! of every node. Wherever an atom is applied to an argument whose curvature
//! breaks the DCP composition rule, the node records a diagnostic.
//!
//! ## Quick Start
//!
//! ```
//! use dcpcheck::prelude::*;
//!
//! let mut arena = ExprArena::new();
//! let x = arena.variable("x");
//! let y = VariableBuilder::new("y").positive().build(&mut arena);
//!
//! let e = arena.apply("exp", args![x]).unwrap();
//! let l = arena.apply("log", args![y]).unwrap();
//! let d = arena.apply("sum", args![e, l]).unwrap();
//!
//! assert_eq!(arena[e].curvature(), Curvature::Convex);
//! assert_eq!(arena[l].curvature(), Curvature::Concave);
//! assert_eq!(arena[d].curvature(), Curvature::Nonconvex);
//! assert_eq!(arena[d].diagnostics().len(), 2);
//! ```
//!
//! ## DCP Rules
//!
//! For an atom `f` with signed curvature `κ` applied to arguments `x_i`:
//!
//! - **Constant or affine** `f` passes each argument's curvature through
//! - **Convex** `f` needs convex arguments where it is increasing, concave
//!   ones where it is decreasing, and affine ones where it is neither
//! - **Concave** `f` is the mirror image
//!
//! The node's curvature is the join of the per-argument results. An argument
//! sign outside the atom's domain (e.g. `log` of a negative expression) makes
//! the node non-convex.
//!
//! ## Errors
//!
//! Zero or the wrong number of arguments and invalid parameters (e.g.
//! `norm(x, 0.5)`) are errors; nothing is added to the arena. DCP violations
//! are not errors: they are recorded as [`Diagnostic`](dcp::Diagnostic)s.
//!
//! ## Architecture
//!
//! - **Lattices** for sign and curvature, and monotonicity labels (`dcp`)
//! - **Rule table**: one rule family per atom; derived atoms substitute
//!   arguments and delegate (`atoms`)
//! - **Expression arena** owning nodes by value, with parent links set once (`expr`)

pub mod atoms;
pub mod dcp;
pub mod error;
pub mod expr;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use dcpcheck::prelude::*;
/// ```
pub mod prelude {
    // Expression types
    pub use crate::args;
    pub use crate::expr::{Arg, Expr, ExprArena, ExprId, ExprKind, ExprReport, VariableBuilder};

    // Atoms
    pub use crate::atoms::{registry, Atom, AtomFn, AtomRule, Parameter};

    // DCP
    pub use crate::dcp::{Curvature, Diagnostic, Monotonicity, Sign, ViolationKind};

    // Errors
    pub use crate::error::{DcpError, Result};
}

// Re-export main types at crate root
pub use error::{DcpError, Result};
pub use expr::{ExprArena, ExprId};
