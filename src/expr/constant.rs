//! Arguments to atom applications and numeric literal coercion.

use super::expression::ExprId;

/// An argument to an atom: an existing expression or a scalar literal.
///
/// Numeric literals become constant leaves unless the atom consumes them
/// as its parameter. Symbols (`Inf`) are only valid as parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Expr(ExprId),
    Number(f64),
    Symbol(String),
}

impl Arg {
    /// Classify a source token: finite numbers are literals, anything else
    /// (including `Inf`) is a symbol.
    pub fn parse(token: &str) -> Self {
        match token.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Arg::Number(v),
            _ => Arg::Symbol(token.trim().to_string()),
        }
    }
}

impl From<ExprId> for Arg {
    fn from(id: ExprId) -> Self {
        Arg::Expr(id)
    }
}

impl From<f64> for Arg {
    fn from(v: f64) -> Self {
        Arg::Number(v)
    }
}

impl From<i32> for Arg {
    fn from(v: i32) -> Self {
        Arg::Number(f64::from(v))
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg::Symbol(s.to_string())
    }
}

/// Build an argument list from mixed expressions and literals.
///
/// ```
/// use dcpcheck::prelude::*;
///
/// let mut arena = ExprArena::new();
/// let x = arena.variable("x");
/// let n = arena.apply("norm", args![x, 3]).unwrap();
/// assert_eq!(arena[n].name(), "norm(x, 3)");
/// ```
#[macro_export]
macro_rules! args {
    ($($arg:expr),* $(,)?) => {
        vec![$($crate::expr::Arg::from($arg)),*]
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(Arg::parse("2"), Arg::Number(2.0));
        assert_eq!(Arg::parse(" -0.5 "), Arg::Number(-0.5));
        assert_eq!(Arg::parse("Inf"), Arg::Symbol("Inf".into()));
        assert_eq!(Arg::parse("x"), Arg::Symbol("x".into()));
    }
}
