//! The DCP composition rule.
//!
//! An atom's curvature is the join of what each argument contributes, where
//! a contribution depends on the atom's signed curvature, its monotonicity in
//! that argument, and the argument's own curvature.

use super::curvature::Curvature;
use super::monotonicity::Monotonicity;
use crate::error::{DcpError, Result};

/// Result of applying the composition rule to one atom.
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    /// Overall curvature (join of the contributions).
    pub curvature: Curvature,
    /// Curvature contributed by each argument, in argument order.
    pub contributions: Vec<Curvature>,
}

impl Composition {
    /// Indices of arguments whose contribution is non-convex.
    pub fn failing_arguments(&self) -> impl Iterator<Item = usize> + '_ {
        self.contributions
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == Curvature::Nonconvex)
            .map(|(i, _)| i)
    }
}

/// Apply the composition rule.
///
/// # Errors
///
/// Returns [`DcpError::Contract`] if there is not exactly one monotonicity per argument.
pub fn dcp_curvature(
    signed_curvature: Curvature,
    monotonicities: &[Monotonicity],
    arguments: &[Curvature],
) -> Result<Composition> {
    if monotonicities.len() != arguments.len() {
        return Err(DcpError::Contract(format!(
            "{} monotonicities given for {} arguments",
            monotonicities.len(),
            arguments.len()
        )));
    }

    let contributions: Vec<Curvature> = monotonicities
        .iter()
        .zip(arguments)
        .map(|(m, arg)| {
            let c = m.dcp_curvature(signed_curvature, *arg);
            log::trace!("{} {} atom, {} argument: {}", m, signed_curvature, arg, c);
            c
        })
        .collect();

    Ok(Composition {
        curvature: Curvature::sum(contributions.iter().copied()),
        contributions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use Curvature::*;
    use Monotonicity::*;

    #[test]
    fn test_convex_increasing() {
        let c = dcp_curvature(Convex, &[Increasing], &[Convex]).unwrap();
        assert_eq!(c.curvature, Convex);
        assert_eq!(c.failing_arguments().count(), 0);

        let c = dcp_curvature(Convex, &[Increasing], &[Concave]).unwrap();
        assert_eq!(c.curvature, Nonconvex);
        assert_eq!(c.failing_arguments().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn test_affine_sum_mixes() {
        let c = dcp_curvature(Affine, &[Increasing, Increasing], &[Convex, Concave]).unwrap();
        assert_eq!(c.curvature, Nonconvex);
        assert_eq!(c.contributions, vec![Convex, Concave]);
        assert_eq!(c.failing_arguments().count(), 0);
    }

    #[test]
    fn test_all_constant_arguments() {
        let c = dcp_curvature(Concave, &[Increasing, Increasing], &[Constant, Constant]).unwrap();
        assert_eq!(c.curvature, Constant);
    }

    #[test]
    fn test_count_mismatch_is_contract_violation() {
        let err = dcp_curvature(Convex, &[Increasing], &[Affine, Affine]).unwrap_err();
        assert!(matches!(err, DcpError::Contract(_)));
    }
}
