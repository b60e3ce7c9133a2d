//! Monotonicity of an atom in one of its arguments.

use std::fmt;

use super::curvature::Curvature;
use super::sign::Sign;

/// Whether an atom is non-decreasing, non-increasing, or neither in an argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Monotonicity {
    Increasing,
    Decreasing,
    Nonmonotonic,
}

impl Monotonicity {
    /// Monotonicity of `|x|`-shaped functions given the sign of `x`.
    pub fn of_abs(sign: Sign) -> Self {
        match sign {
            Sign::Positive | Sign::Zero => Monotonicity::Increasing,
            Sign::Negative => Monotonicity::Decreasing,
            Sign::Unknown => Monotonicity::Nonmonotonic,
        }
    }

    /// Curvature contributed by an argument of curvature `arg` to an atom with
    /// signed curvature `func` that has this monotonicity in the argument.
    ///
    /// Constant and affine atoms pass the argument's curvature through before
    /// monotonicity is consulted.
    pub fn dcp_curvature(self, func: Curvature, arg: Curvature) -> Curvature {
        use Curvature::*;
        match func {
            Nonconvex => Nonconvex,
            Constant | Affine => arg,
            _ if arg.is_constant() => Constant,
            Convex | Concave => {
                let ok = match self {
                    Monotonicity::Increasing => arg <= func,
                    Monotonicity::Decreasing => arg <= func.negate(),
                    Monotonicity::Nonmonotonic => arg.is_affine(),
                };
                if ok {
                    func
                } else {
                    Nonconvex
                }
            }
        }
    }

    /// Curvature an argument needs for [`dcp_curvature`](Self::dcp_curvature)
    /// to succeed under a convex or concave atom.
    pub fn required_curvature(self, func: Curvature) -> Curvature {
        match self {
            Monotonicity::Increasing => func,
            Monotonicity::Decreasing => func.negate(),
            Monotonicity::Nonmonotonic => Curvature::Affine,
        }
    }
}

impl fmt::Display for Monotonicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Monotonicity::Increasing => "increasing",
            Monotonicity::Decreasing => "decreasing",
            Monotonicity::Nonmonotonic => "non-monotonic",
        };
        f.write_str(s)
    }
}
