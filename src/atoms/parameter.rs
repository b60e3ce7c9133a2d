//! Scalar parameters of parameterized atoms (norm degree, Huber threshold, ...).

use std::fmt;

use crate::error::{DcpError, Result};

/// Format a number the way it would be written in source: integral values
/// without a fractional part.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// A scalar argument that may be consumed as an atom's parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(f64),
    Symbol(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Number(v) => f.write_str(&format_number(*v)),
            Literal::Symbol(s) => f.write_str(s),
        }
    }
}

/// A validated parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Parameter {
    Number(f64),
    /// The symbol `Inf`.
    Inf,
}

impl Parameter {
    /// Numeric value, with `Inf` as positive infinity.
    pub fn value(self) -> f64 {
        match self {
            Parameter::Number(v) => v,
            Parameter::Inf => f64::INFINITY,
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parameter::Number(v) => f.write_str(&format_number(*v)),
            Parameter::Inf => f.write_str("Inf"),
        }
    }
}

/// Validation predicate for a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamCheck {
    /// Norm degree: a number >= 1 or the symbol `Inf`.
    NormDegree,
    /// Huber threshold `M`: a number > 0.
    Positive,
    /// Any number, named by the given letter in messages.
    AnyNumber(char),
    /// A number >= 1.
    AtLeastOne,
}

impl ParamCheck {
    /// Validate `literal` as the parameter of `atom`. `None` means no value was
    /// supplied and there is no default.
    pub fn validate(self, atom: &str, literal: Option<&Literal>) -> Result<Parameter> {
        let number = match literal {
            Some(Literal::Number(v)) if !v.is_nan() => Some(*v),
            _ => None,
        };
        let shown = literal.map_or_else(|| "none".to_string(), |l| l.to_string());
        let invalid = |message: String| DcpError::Parameter {
            atom: atom.to_string(),
            message,
        };

        match self {
            ParamCheck::NormDegree => match (number, literal) {
                (Some(v), _) if v.is_infinite() && v > 0.0 => Ok(Parameter::Inf),
                (Some(v), _) if v >= 1.0 => Ok(Parameter::Number(v)),
                (_, Some(Literal::Symbol(s))) if s == "Inf" => Ok(Parameter::Inf),
                _ => Err(invalid(format!(
                    "Invalid value '{}' for p in norm(..., p).",
                    shown
                ))),
            },
            ParamCheck::Positive => match number {
                Some(v) if v > 0.0 => Ok(Parameter::Number(v)),
                _ => Err(invalid(format!(
                    "Invalid value '{}' for M in {}(...,M).",
                    shown, atom
                ))),
            },
            ParamCheck::AnyNumber(letter) => match number {
                Some(v) => Ok(Parameter::Number(v)),
                // k is written without a space: sum_largest(...,k)
                None if letter == 'k' => Err(invalid(format!(
                    "Invalid value '{}' for k in {}(...,k).",
                    shown, atom
                ))),
                None => Err(invalid(format!(
                    "Invalid value '{}' for {} in {}(..., {}).",
                    shown, letter, atom, letter
                ))),
            },
            ParamCheck::AtLeastOne => match number {
                Some(v) if v >= 1.0 => Ok(Parameter::Number(v)),
                _ => Err(invalid(format!(
                    "Must have p >= 1 for {}(..., p), but have p = {}.",
                    atom, shown
                ))),
            },
        }
    }
}
