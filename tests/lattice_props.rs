//! Property tests for the lattices and for node construction.

use dcpcheck::atoms::Atom;
use dcpcheck::dcp::{add_curvature, add_sign, max_sign, min_sign, Curvature, Sign};
use dcpcheck::expr::{Arg, ExprArena, VariableBuilder};
use proptest::prelude::*;

fn curvature() -> impl Strategy<Value = Curvature> {
    prop::sample::select(Curvature::ALL.to_vec())
}

fn sign() -> impl Strategy<Value = Sign> {
    prop::sample::select(Sign::ALL.to_vec())
}

fn atom() -> impl Strategy<Value = Atom> {
    prop::sample::select(Atom::ALL.to_vec())
}

proptest! {
    #[test]
    fn curvature_sum_is_associative(a in curvature(), b in curvature(), c in curvature()) {
        prop_assert_eq!(
            add_curvature(add_curvature(a, b), c),
            add_curvature(a, add_curvature(b, c))
        );
    }

    #[test]
    fn curvature_sum_is_commutative(a in curvature(), b in curvature()) {
        prop_assert_eq!(add_curvature(a, b), add_curvature(b, a));
    }

    #[test]
    fn curvature_sum_identity_and_absorption(a in curvature()) {
        prop_assert_eq!(add_curvature(a, Curvature::Constant), a);
        prop_assert_eq!(add_curvature(a, Curvature::Nonconvex), Curvature::Nonconvex);
        prop_assert_eq!(add_curvature(a, a), a);
    }

    #[test]
    fn curvature_sum_is_an_upper_bound(a in curvature(), b in curvature()) {
        let joined = add_curvature(a, b);
        prop_assert!(a <= joined);
        prop_assert!(b <= joined);
    }

    #[test]
    fn curvature_fold_ignores_order(v in prop::collection::vec(curvature(), 0..8)) {
        let forward = Curvature::sum(v.iter().copied());
        let backward = Curvature::sum(v.iter().rev().copied());
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn sign_sum_is_commutative(a in sign(), b in sign()) {
        prop_assert_eq!(add_sign(a, b), add_sign(b, a));
        prop_assert_eq!(add_sign(a, Sign::Zero), a);
    }

    #[test]
    fn max_min_are_symmetric(a in sign(), b in sign()) {
        prop_assert_eq!(max_sign(a, b), max_sign(b, a));
        prop_assert_eq!(min_sign(a, b), min_sign(b, a));
        prop_assert_eq!(max_sign(a, b).negate(), min_sign(a.negate(), b.negate()));
    }

    /// Building a node either succeeds with consistent links and diagnostics,
    /// or fails and leaves the arena as it was.
    #[test]
    fn apply_is_atomic(
        atom in atom(),
        signs in prop::collection::vec(sign(), 0..4),
        literal in prop::option::of(-2i32..4),
    ) {
        let mut arena = ExprArena::new();
        let mut args: Vec<Arg> = signs
            .iter()
            .enumerate()
            .map(|(i, s)| VariableBuilder::new(format!("x{}", i)).sign(*s).build(&mut arena).into())
            .collect();
        if let Some(v) = literal {
            args.push(v.into());
        }
        let before = arena.len();

        match arena.apply_atom(atom, args) {
            Ok(id) => {
                let expr = &arena[id];
                prop_assert_eq!(expr.parent(), None);
                for &child in expr.children() {
                    prop_assert_eq!(arena[child].parent(), Some(id));
                }
                // leaf arguments cannot carry an upstream violation
                prop_assert_eq!(
                    expr.curvature() == Curvature::Nonconvex,
                    !expr.diagnostics().is_empty()
                );
            }
            Err(_) => prop_assert_eq!(arena.len(), before),
        }
    }
}
