//! Error types for dcpcheck.

use thiserror::Error;

use crate::expr::ExprId;

/// Error type for expression construction.
///
/// Only fatal failures live here. DCP violations are recorded as
/// [`Diagnostic`](crate::dcp::Diagnostic)s on the built node instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DcpError {
    /// Atom applied to the wrong number of arguments.
    #[error("{atom} expects {expected} argument(s), got {got}")]
    Arity {
        atom: String,
        expected: String,
        got: usize,
    },

    /// Parameter failed the atom's validation predicate.
    #[error("{message}")]
    Parameter { atom: String, message: String },

    /// Malformed rule table entry (monotonicity count does not match arguments).
    #[error("Contract violation: {0}")]
    Contract(String),

    /// No atom registered under this name.
    #[error("Unknown atom '{0}'")]
    UnknownAtom(String),

    /// Expression id does not belong to this arena.
    #[error("Unknown expression {0:?}")]
    UnknownExpression(ExprId),

    /// Compound expression already has a parent.
    #[error("Expression {0:?} is already a subexpression of another node")]
    AlreadyAttached(ExprId),

    /// Argument cannot be turned into an expression.
    #[error("Invalid argument to {atom}: {message}")]
    InvalidArgument { atom: String, message: String },
}

/// Result type for dcpcheck operations.
pub type Result<T> = std::result::Result<T, DcpError>;
