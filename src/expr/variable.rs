//! Variable creation with builder pattern.

use super::arena::ExprArena;
use super::expression::ExprId;
use crate::dcp::Sign;

/// Builder for creating variables with a declared sign.
#[derive(Debug, Clone)]
pub struct VariableBuilder {
    name: String,
    sign: Sign,
}

impl VariableBuilder {
    /// Create a variable builder of unknown sign.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sign: Sign::Unknown,
        }
    }

    /// Declare the variable positive (x >= 0).
    pub fn positive(mut self) -> Self {
        self.sign = Sign::Positive;
        self
    }

    /// Declare the variable negative (x <= 0).
    pub fn negative(mut self) -> Self {
        self.sign = Sign::Negative;
        self
    }

    pub fn sign(mut self, sign: Sign) -> Self {
        self.sign = sign;
        self
    }

    /// Add the variable to the arena.
    pub fn build(self, arena: &mut ExprArena) -> ExprId {
        arena.push_variable(self.name, self.sign)
    }
}
