//! Rule families: sign, signed curvature and monotonicity of each atom.
//!
//! Several atoms share a family (e.g. `abs` and `norm2` are both `Norm`);
//! the mapping from atoms to families lives in [`super::atom`].

use crate::dcp::{max_sign, min_sign, Curvature, Monotonicity, Sign};

/// Curvature and sign of one argument, as seen by a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operand {
    pub curvature: Curvature,
    pub sign: Sign,
}

impl Operand {
    pub fn new(curvature: Curvature, sign: Sign) -> Self {
        Self { curvature, sign }
    }

    /// Operand for a numeric constant.
    pub fn constant(value: f64) -> Self {
        Self::new(Curvature::Constant, Sign::of_value(value))
    }
}

/// A rule family.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule {
    /// log(e^x1 + ... + e^xn)
    LogSumExp,
    Max,
    Min,
    Log,
    Sum,
    /// (x1 * ... * xn)^(1/n)
    GeoMean,
    LogNormcdf,
    Exp,
    Norm,
    /// -x log(x)
    Entr,
    Huber,
    /// Huber for positive x, zero for negative x.
    HuberPos,
    /// 1/x
    InvPos,
    /// x log(x/y) - x + y
    KlDiv,
    /// Sum of the k largest magnitudes.
    NormLargest,
    Pow { p: f64 },
    /// x log(x/y)
    RelEntr,
    /// x^2 / y
    QuadOverLin,
    SumLargest,
    SumSmallest,
}

fn signs(args: &[Operand]) -> impl Iterator<Item = Sign> + '_ {
    args.iter().map(|a| a.sign)
}

fn any_sign(args: &[Operand], sign: Sign) -> bool {
    signs(args).any(|s| s == sign)
}

/// Negative or zero: outside the domain of `log`, `inv_pos`, `x^2/y`.
fn nonpositive(sign: Option<Sign>) -> bool {
    matches!(sign, Some(Sign::Negative | Sign::Zero))
}

fn first_sign(args: &[Operand]) -> Option<Sign> {
    args.first().map(|a| a.sign)
}

fn divisor_sign(args: &[Operand]) -> Option<Sign> {
    match args {
        [_, y] => Some(y.sign),
        _ => None,
    }
}

impl Rule {
    /// Sign of the atom given its arguments.
    pub fn sign(&self, args: &[Operand]) -> Sign {
        match self {
            Rule::LogSumExp | Rule::Log | Rule::LogNormcdf | Rule::RelEntr => Sign::Unknown,
            Rule::SumLargest | Rule::SumSmallest => Sign::Unknown,
            Rule::Exp | Rule::KlDiv | Rule::NormLargest => Sign::Positive,
            Rule::Max => signs(args).reduce(max_sign).unwrap_or(Sign::Unknown),
            Rule::Min => signs(args).reduce(min_sign).unwrap_or(Sign::Unknown),
            Rule::Sum => Sign::sum(signs(args)),
            Rule::GeoMean => {
                if any_sign(args, Sign::Negative) {
                    Sign::Unknown
                } else if signs(args).all(|s| s == Sign::Zero) {
                    Sign::Zero
                } else {
                    Sign::Positive
                }
            }
            Rule::Norm => {
                if signs(args).all(|s| s == Sign::Zero) {
                    Sign::Zero
                } else {
                    Sign::Positive
                }
            }
            Rule::Entr => {
                if any_sign(args, Sign::Zero) {
                    Sign::Zero
                } else {
                    Sign::Unknown
                }
            }
            Rule::Huber => {
                if any_sign(args, Sign::Zero) {
                    Sign::Zero
                } else {
                    Sign::Positive
                }
            }
            Rule::HuberPos => match first_sign(args) {
                Some(s) if s <= Sign::Zero => Sign::Zero,
                _ => Sign::Positive,
            },
            Rule::InvPos => {
                if nonpositive(first_sign(args)) {
                    Sign::Unknown
                } else {
                    Sign::Positive
                }
            }
            Rule::Pow { p } => match first_sign(args) {
                Some(s) if pow_domain_error(*p, s) => Sign::Unknown,
                Some(Sign::Zero) => Sign::Zero,
                _ => Sign::Positive,
            },
            Rule::QuadOverLin => {
                if nonpositive(divisor_sign(args)) {
                    Sign::Unknown
                } else {
                    Sign::Positive
                }
            }
        }
    }

    /// Curvature of the atom treating its arguments as free variables.
    /// `Nonconvex` signals a domain error.
    pub fn signed_curvature(&self, args: &[Operand]) -> Curvature {
        match self {
            Rule::LogSumExp | Rule::Max | Rule::Exp | Rule::Norm | Rule::Huber => Curvature::Convex,
            Rule::NormLargest | Rule::RelEntr | Rule::SumLargest => Curvature::Convex,
            Rule::Min | Rule::LogNormcdf | Rule::SumSmallest => Curvature::Concave,
            Rule::Sum => Curvature::Affine,
            Rule::Log => {
                if nonpositive(first_sign(args)) {
                    Curvature::Nonconvex
                } else {
                    Curvature::Concave
                }
            }
            Rule::GeoMean | Rule::Entr => {
                if any_sign(args, Sign::Negative) {
                    Curvature::Nonconvex
                } else {
                    Curvature::Concave
                }
            }
            Rule::HuberPos => {
                if self.sign(args) <= Sign::Zero {
                    Curvature::Constant
                } else {
                    Curvature::Convex
                }
            }
            Rule::InvPos => {
                if nonpositive(first_sign(args)) {
                    Curvature::Nonconvex
                } else {
                    Curvature::Convex
                }
            }
            Rule::KlDiv => {
                if any_sign(args, Sign::Negative) || any_sign(args, Sign::Zero) {
                    Curvature::Nonconvex
                } else {
                    Curvature::Convex
                }
            }
            Rule::Pow { p } => match first_sign(args) {
                Some(s) if pow_domain_error(*p, s) => Curvature::Nonconvex,
                _ if *p <= 0.0 => Curvature::Convex,
                _ if *p <= 1.0 => Curvature::Concave,
                _ => Curvature::Convex,
            },
            Rule::QuadOverLin => {
                if nonpositive(divisor_sign(args)) {
                    Curvature::Nonconvex
                } else {
                    Curvature::Convex
                }
            }
        }
    }

    /// Monotonicity in each argument.
    ///
    /// Fixed-arity families return a fixed-length list regardless of how many
    /// arguments they are given; the composition rule rejects mismatches.
    pub fn monotonicity(&self, args: &[Operand]) -> Vec<Monotonicity> {
        use Monotonicity::*;
        match self {
            Rule::LogSumExp | Rule::Max | Rule::Min | Rule::Sum | Rule::GeoMean => {
                vec![Increasing; args.len()]
            }
            Rule::SumLargest | Rule::SumSmallest => vec![Increasing; args.len()],
            Rule::Log | Rule::LogNormcdf | Rule::Exp | Rule::HuberPos => vec![Increasing],
            Rule::Norm | Rule::NormLargest => signs(args).map(Monotonicity::of_abs).collect(),
            Rule::Entr => vec![Nonmonotonic],
            Rule::Huber => vec![Monotonicity::of_abs(first_sign(args).unwrap_or(Sign::Unknown))],
            Rule::InvPos => vec![Decreasing],
            Rule::KlDiv | Rule::RelEntr => vec![Nonmonotonic; args.len()],
            Rule::Pow { p } => {
                if *p <= 0.0 {
                    vec![Decreasing]
                } else if *p <= 1.0 {
                    vec![Increasing]
                } else {
                    vec![Monotonicity::of_abs(first_sign(args).unwrap_or(Sign::Unknown))]
                }
            }
            Rule::QuadOverLin => vec![
                Monotonicity::of_abs(first_sign(args).unwrap_or(Sign::Unknown)),
                Decreasing,
            ],
        }
    }
}

/// x^p is undefined for negative x, and for zero x when p <= 0.
fn pow_domain_error(p: f64, sign: Sign) -> bool {
    sign == Sign::Negative || (p <= 0.0 && sign == Sign::Zero)
}
