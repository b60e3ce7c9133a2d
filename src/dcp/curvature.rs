//! Curvature tracking for DCP (Disciplined Convex Programming).
//!
//! Curvatures form a small lattice:
//!
//! ```text
//!          Nonconvex
//!          /       \
//!      Convex    Concave
//!          \       /
//!           Affine
//!             |
//!          Constant
//! ```
//!
//! Adding expressions joins their curvatures; `Nonconvex` is the failure element.

use std::cmp::Ordering;
use std::fmt;

/// Curvature of an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Curvature {
    /// Constant value (most restrictive).
    Constant,
    /// Affine function (both convex and concave).
    Affine,
    /// Convex function.
    Convex,
    /// Concave function.
    Concave,
    /// Neither convex nor concave as far as the rules can tell (not DCP-compliant).
    Nonconvex,
}

impl Curvature {
    /// All five curvatures.
    pub const ALL: [Curvature; 5] = [
        Curvature::Constant,
        Curvature::Affine,
        Curvature::Convex,
        Curvature::Concave,
        Curvature::Nonconvex,
    ];

    /// Check if the curvature is convex (constant, affine, or convex).
    pub fn is_convex(self) -> bool {
        matches!(self, Curvature::Constant | Curvature::Affine | Curvature::Convex)
    }

    /// Check if the curvature is concave (constant, affine, or concave).
    pub fn is_concave(self) -> bool {
        matches!(self, Curvature::Constant | Curvature::Affine | Curvature::Concave)
    }

    /// Check if the curvature is affine (constant or affine).
    pub fn is_affine(self) -> bool {
        matches!(self, Curvature::Constant | Curvature::Affine)
    }

    /// Check if this is a constant.
    pub fn is_constant(self) -> bool {
        matches!(self, Curvature::Constant)
    }

    /// Check if the expression follows the DCP rules.
    pub fn is_dcp(self) -> bool {
        self != Curvature::Nonconvex
    }

    /// Negate the curvature (convex <-> concave).
    pub fn negate(self) -> Self {
        match self {
            Curvature::Convex => Curvature::Concave,
            Curvature::Concave => Curvature::Convex,
            other => other,
        }
    }

    /// Join a sequence of curvatures. The empty sum is constant.
    pub fn sum<I: IntoIterator<Item = Curvature>>(curvatures: I) -> Curvature {
        curvatures.into_iter().fold(Curvature::Constant, add_curvature)
    }

    fn rank(self) -> u8 {
        match self {
            Curvature::Constant => 0,
            Curvature::Affine => 1,
            Curvature::Convex | Curvature::Concave => 2,
            Curvature::Nonconvex => 3,
        }
    }
}

/// `a <= b` when every `a`-curved expression is also `b`-curved.
/// Convex and concave are incomparable.
impl PartialOrd for Curvature {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            return Some(Ordering::Equal);
        }
        match (self, other) {
            (Curvature::Convex, Curvature::Concave) | (Curvature::Concave, Curvature::Convex) => {
                None
            }
            _ => Some(self.rank().cmp(&other.rank())),
        }
    }
}

impl fmt::Display for Curvature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Curvature::Constant => "CONSTANT",
            Curvature::Affine => "AFFINE",
            Curvature::Convex => "CONVEX",
            Curvature::Concave => "CONCAVE",
            Curvature::Nonconvex => "NONCONVEX",
        };
        f.write_str(s)
    }
}

/// Combine curvatures for addition: a + b.
pub fn add_curvature(a: Curvature, b: Curvature) -> Curvature {
    use Curvature::*;
    match (a, b) {
        // Constants don't affect curvature
        (Constant, x) | (x, Constant) => x,
        (Affine, Affine) => Affine,
        // Affine doesn't affect non-constant curvature
        (Affine, x) | (x, Affine) => x,
        (Convex, Convex) => Convex,
        (Concave, Concave) => Concave,
        (Convex, Concave) | (Concave, Convex) => Nonconvex,
        (Nonconvex, _) | (_, Nonconvex) => Nonconvex,
    }
}
