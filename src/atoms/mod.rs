//! Atom definitions.
//!
//! Atoms are the named functions expressions are built from. Each has:
//!
//! - **Rule family**: sign, signed curvature and monotonicity ([`Rule`])
//! - **Parameter**: optional scalar such as the norm degree ([`ParamCheck`])
//! - **Registry entry**: lookup by lower-case name ([`registry`])

pub mod atom;
pub mod parameter;
pub mod registry;
pub mod rule;

pub use atom::{Arity, Atom, AtomRule, ParamSlot};
pub use parameter::{format_number, Literal, ParamCheck, Parameter};
pub use registry::{registry, AtomFn, Registry};
pub use rule::{Operand, Rule};
