//! Registry of atom functions, keyed by lower-case name.
//!
//! Built once, on first use, from [`Atom::ALL`]; read-only afterwards.

use std::collections::HashMap;
use std::sync::OnceLock;

use super::atom::Atom;
use crate::error::{DcpError, Result};
use crate::expr::{Arg, ExprArena, ExprId};

/// A callable atom: builds an expression node from arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtomFn {
    atom: Atom,
}

impl AtomFn {
    pub fn atom(&self) -> Atom {
        self.atom
    }

    pub fn name(&self) -> &'static str {
        self.atom.name()
    }

    /// Apply the atom to `args`, adding the new node to `arena`.
    pub fn call(&self, arena: &mut ExprArena, args: Vec<Arg>) -> Result<ExprId> {
        arena.apply_atom(self.atom, args)
    }
}

/// Mapping from function name to atom function.
#[derive(Debug)]
pub struct Registry {
    atoms: HashMap<&'static str, AtomFn>,
}

impl Registry {
    fn new() -> Self {
        let atoms: HashMap<_, _> = Atom::ALL
            .iter()
            .map(|&atom| (atom.name(), AtomFn { atom }))
            .collect();
        log::debug!("registered {} atoms", atoms.len());
        Self { atoms }
    }

    /// Look up an atom function by name, ignoring case.
    pub fn get(&self, name: &str) -> Result<AtomFn> {
        self.atoms
            .get(name.to_lowercase().as_str())
            .copied()
            .ok_or_else(|| DcpError::UnknownAtom(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_ok()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.atoms.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }
}

/// The process-wide atom registry.
pub fn registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(Registry::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_atom_registered() {
        let reg = registry();
        assert_eq!(reg.len(), Atom::ALL.len());
        for atom in Atom::ALL {
            assert_eq!(reg.get(atom.name()).unwrap().atom(), atom);
        }
    }

    #[test]
    fn test_lookup_ignores_case() {
        assert_eq!(registry().get("Log_Sum_Exp").unwrap().atom(), Atom::LogSumExp);
        assert!(registry().contains("NORM"));
    }

    #[test]
    fn test_unknown_name() {
        let err = registry().get("frobnicate").unwrap_err();
        assert_eq!(err, DcpError::UnknownAtom("frobnicate".to_string()));
    }

    #[test]
    fn test_names_sorted() {
        let names = registry().names();
        assert_eq!(names.first(), Some(&"abs"));
        assert!(names.windows(2).all(|w| w[0] < w[1]));
    }
}
