//! DCP (Disciplined Convex Programming) analysis.
//!
//! This module provides the core DCP analysis functionality:
//! - Sign tracking (negative, zero, positive, unknown)
//! - Curvature tracking (constant, affine, convex, concave, non-convex)
//! - Monotonicity and the DCP composition rule
//! - Violation diagnostics

pub mod composition;
pub mod curvature;
pub mod monotonicity;
pub mod sign;
pub mod violation;

pub use composition::{dcp_curvature, Composition};
pub use curvature::{add_curvature, Curvature};
pub use monotonicity::Monotonicity;
pub use sign::{add_sign, max_sign, min_sign, Sign};
pub use violation::{composition_errors, Diagnostic, ViolationKind};
