//! The atom table and atom rule instances.
//!
//! Each [`Atom`] is one registered function name. Atoms defined in terms of
//! other atoms (`square` is `quad_over_lin(x, 1)`, `sum_square` is
//! `quad_over_lin(norm(x1, ..., xn), 1)`, ...) substitute their arguments
//! when an [`AtomRule`] is built, and evaluate the rule family of the atom
//! they delegate to.

use std::fmt;

use super::parameter::{Literal, ParamCheck, Parameter};
use super::rule::{Operand, Rule};
use crate::dcp::{
    composition_errors, dcp_curvature, Composition, Curvature, Diagnostic, Monotonicity, Sign,
};
use crate::error::{DcpError, Result};

/// A registered atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Atom {
    LogSumExp,
    Max,
    Min,
    Log,
    Sum,
    GeoMean,
    Sqrt,
    LogNormcdf,
    Exp,
    Norm,
    Norm1,
    Norm2,
    NormInf,
    Abs,
    Entr,
    Huber,
    Berhu,
    HuberPos,
    HuberCirc,
    InvPos,
    KlDiv,
    NormLargest,
    Pos,
    Pow,
    PowAbs,
    PowPos,
    SquareAbs,
    SquarePos,
    RelEntr,
    QuadOverLin,
    Square,
    SumSquare,
    SumSquareAbs,
    SumSquarePos,
    SumLargest,
    SumSmallest,
}

/// Number of expression arguments an atom accepts (excluding its parameter).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeastOne,
}

impl Arity {
    fn accepts(self, n: usize) -> bool {
        match self {
            Arity::Exactly(k) => n == k,
            Arity::AtLeastOne => n >= 1,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(k) => write!(f, "{}", k),
            Arity::AtLeastOne => f.write_str("at least 1"),
        }
    }
}

/// Where an atom's parameter comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamSlot {
    /// Last of a variable number of arguments, if that argument is a scalar literal.
    Trailing { default: Option<f64> },
    /// The argument after the fixed expression arguments; optional when there is a default.
    Positional { default: Option<f64> },
    /// Fixed by the atom itself.
    Implied(Parameter),
}

impl Atom {
    /// Every atom, in registration order.
    pub const ALL: [Atom; 36] = [
        Atom::LogSumExp,
        Atom::Max,
        Atom::Min,
        Atom::Log,
        Atom::Sum,
        Atom::GeoMean,
        Atom::Sqrt,
        Atom::LogNormcdf,
        Atom::Exp,
        Atom::Norm,
        Atom::Norm1,
        Atom::Norm2,
        Atom::NormInf,
        Atom::Abs,
        Atom::Entr,
        Atom::Huber,
        Atom::Berhu,
        Atom::HuberPos,
        Atom::HuberCirc,
        Atom::InvPos,
        Atom::KlDiv,
        Atom::NormLargest,
        Atom::Pos,
        Atom::Pow,
        Atom::PowAbs,
        Atom::PowPos,
        Atom::SquareAbs,
        Atom::SquarePos,
        Atom::RelEntr,
        Atom::QuadOverLin,
        Atom::Square,
        Atom::SumSquare,
        Atom::SumSquareAbs,
        Atom::SumSquarePos,
        Atom::SumLargest,
        Atom::SumSmallest,
    ];

    /// Lower-case function name.
    pub fn name(self) -> &'static str {
        match self {
            Atom::LogSumExp => "log_sum_exp",
            Atom::Max => "max",
            Atom::Min => "min",
            Atom::Log => "log",
            Atom::Sum => "sum",
            Atom::GeoMean => "geo_mean",
            Atom::Sqrt => "sqrt",
            Atom::LogNormcdf => "log_normcdf",
            Atom::Exp => "exp",
            Atom::Norm => "norm",
            Atom::Norm1 => "norm1",
            Atom::Norm2 => "norm2",
            Atom::NormInf => "norm_inf",
            Atom::Abs => "abs",
            Atom::Entr => "entr",
            Atom::Huber => "huber",
            Atom::Berhu => "berhu",
            Atom::HuberPos => "huber_pos",
            Atom::HuberCirc => "huber_circ",
            Atom::InvPos => "inv_pos",
            Atom::KlDiv => "kl_div",
            Atom::NormLargest => "norm_largest",
            Atom::Pos => "pos",
            Atom::Pow => "pow",
            Atom::PowAbs => "pow_abs",
            Atom::PowPos => "pow_pos",
            Atom::SquareAbs => "square_abs",
            Atom::SquarePos => "square_pos",
            Atom::RelEntr => "rel_entr",
            Atom::QuadOverLin => "quad_over_lin",
            Atom::Square => "square",
            Atom::SumSquare => "sum_square",
            Atom::SumSquareAbs => "sum_square_abs",
            Atom::SumSquarePos => "sum_square_pos",
            Atom::SumLargest => "sum_largest",
            Atom::SumSmallest => "sum_smallest",
        }
    }

    /// Expression arguments accepted, not counting the parameter.
    pub fn arity(self) -> Arity {
        use Atom::*;
        match self {
            Log | Sqrt | LogNormcdf | Exp | Abs | Entr | InvPos | Pos => Arity::Exactly(1),
            Huber | Berhu | HuberPos | Pow | PowAbs | PowPos => Arity::Exactly(1),
            SquareAbs | SquarePos | Square => Arity::Exactly(1),
            KlDiv | RelEntr | QuadOverLin => Arity::Exactly(2),
            LogSumExp | Max | Min | Sum | GeoMean | Norm | Norm1 | Norm2 | NormInf => {
                Arity::AtLeastOne
            }
            HuberCirc | NormLargest | SumSquare | SumSquareAbs | SumSquarePos => Arity::AtLeastOne,
            SumLargest | SumSmallest => Arity::AtLeastOne,
        }
    }

    /// How the parameter is supplied and validated, for parameterized atoms.
    pub fn parameter(self) -> Option<(ParamSlot, ParamCheck)> {
        use Atom::*;
        let slot = match self {
            Norm => (ParamSlot::Trailing { default: Some(2.0) }, ParamCheck::NormDegree),
            Norm1 | Abs => (ParamSlot::Implied(Parameter::Number(1.0)), ParamCheck::NormDegree),
            Norm2 => (ParamSlot::Implied(Parameter::Number(2.0)), ParamCheck::NormDegree),
            NormInf => (ParamSlot::Implied(Parameter::Inf), ParamCheck::NormDegree),
            Huber | Berhu | HuberPos => (
                ParamSlot::Positional { default: Some(1.0) },
                ParamCheck::Positive,
            ),
            HuberCirc => (ParamSlot::Trailing { default: Some(1.0) }, ParamCheck::Positive),
            NormLargest | SumLargest | SumSmallest => (
                ParamSlot::Trailing { default: None },
                ParamCheck::AnyNumber('k'),
            ),
            Pow => (ParamSlot::Positional { default: None }, ParamCheck::AnyNumber('p')),
            PowAbs | PowPos => (ParamSlot::Positional { default: None }, ParamCheck::AtLeastOne),
            SquareAbs | SquarePos => (
                ParamSlot::Implied(Parameter::Number(2.0)),
                ParamCheck::AtLeastOne,
            ),
            _ => return None,
        };
        Some(slot)
    }

    /// Whether the short display name shows the parameter.
    ///
    /// Atoms with an implied parameter (`abs`, `norm2`, ...) do not.
    pub fn shows_parameter(self) -> bool {
        !matches!(self.parameter(), None | Some((ParamSlot::Implied(_), _)))
    }

    /// Split the argument list into expression arguments and a parameter.
    ///
    /// `literals[i]` is the scalar value of argument `i` if it is a numeric
    /// literal or symbol, and `shown[i]` its display name. Returns the number
    /// of leading expression arguments and the parameter literal, if one was
    /// supplied.
    pub fn split_parameter(
        self,
        literals: &[Option<Literal>],
        shown: &[String],
    ) -> Result<(usize, Option<Literal>)> {
        let n = literals.len();
        match self.parameter() {
            Some((ParamSlot::Trailing { .. }, _)) => match literals.last() {
                Some(Some(lit)) => Ok((n - 1, Some(lit.clone()))),
                _ => Ok((n, None)),
            },
            Some((ParamSlot::Positional { default }, _)) => {
                let fixed = match self.arity() {
                    Arity::Exactly(k) => k,
                    Arity::AtLeastOne => 1,
                };
                if n == fixed && default.is_some() {
                    return Ok((n, None));
                }
                if n != fixed + 1 {
                    let expected = if default.is_some() {
                        format!("{} or {}", fixed, fixed + 1)
                    } else {
                        format!("{}", fixed + 1)
                    };
                    return Err(DcpError::Arity {
                        atom: self.name().to_string(),
                        expected,
                        got: n,
                    });
                }
                let literal = match (&literals[fixed], shown.get(fixed)) {
                    (Some(lit), _) => lit.clone(),
                    (None, Some(name)) => Literal::Symbol(name.clone()),
                    (None, None) => Literal::Symbol(String::new()),
                };
                Ok((fixed, Some(literal)))
            }
            Some((ParamSlot::Implied(_), _)) | None => Ok((n, None)),
        }
    }

    /// The rule family evaluated after substitution.
    fn family(self, parameter: Option<Parameter>) -> Rule {
        use Atom::*;
        match self {
            LogSumExp => Rule::LogSumExp,
            Max | Pos => Rule::Max,
            Min => Rule::Min,
            Log => Rule::Log,
            Sum => Rule::Sum,
            GeoMean | Sqrt => Rule::GeoMean,
            LogNormcdf => Rule::LogNormcdf,
            Exp => Rule::Exp,
            Norm | Norm1 | Norm2 | NormInf | Abs => Rule::Norm,
            Entr => Rule::Entr,
            Huber | Berhu => Rule::Huber,
            HuberPos | HuberCirc => Rule::HuberPos,
            InvPos => Rule::InvPos,
            KlDiv => Rule::KlDiv,
            NormLargest => Rule::NormLargest,
            Pow | PowAbs | PowPos | SquareAbs | SquarePos => Rule::Pow {
                p: parameter.map_or(1.0, Parameter::value),
            },
            RelEntr => Rule::RelEntr,
            QuadOverLin | Square | SumSquare | SumSquareAbs | SumSquarePos => Rule::QuadOverLin,
            SumLargest => Rule::SumLargest,
            SumSmallest => Rule::SumSmallest,
        }
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which original argument a substituted argument stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    /// Original argument `i`, unchanged.
    Arg(usize),
    /// Result of an inner atom, built from original argument `i` or, if
    /// `None`, from all of them.
    Derived(Option<usize>),
    /// A constant inserted by the substitution.
    Inserted,
}

/// An atom applied internally while substituting arguments.
#[derive(Debug, Clone)]
struct Inner {
    rule: AtomRule,
    /// Original argument index of each of the inner rule's arguments.
    map: Vec<Option<usize>>,
    /// Whether the inner rule's arguments are themselves results of inner atoms.
    nested: bool,
}

/// Whether `d` is about an argument of `operands` that is already non-convex.
fn about_nonconvex(d: &Diagnostic, operands: &[Operand]) -> bool {
    d.index()
        .and_then(|i| operands.get(i))
        .map_or(false, |a| a.curvature == Curvature::Nonconvex)
}

/// One application of an atom to argument operands.
///
/// `original_args` are the operands the atom was applied to; `args` are the
/// operands its rule family is evaluated on. They differ for atoms defined in
/// terms of other atoms.
#[derive(Debug, Clone)]
pub struct AtomRule {
    atom: Atom,
    parameter: Option<Parameter>,
    rule: Rule,
    original_args: Vec<Operand>,
    args: Vec<Operand>,
    origins: Vec<Origin>,
    inner: Vec<Inner>,
}

impl AtomRule {
    /// Validate the parameter and arity, then substitute arguments.
    ///
    /// `literal` is the parameter split off by [`Atom::split_parameter`], if any.
    pub fn new(atom: Atom, original_args: Vec<Operand>, literal: Option<Literal>) -> Result<Self> {
        let parameter = match atom.parameter() {
            Some((ParamSlot::Implied(p), _)) => Some(p),
            Some((
                ParamSlot::Trailing { default } | ParamSlot::Positional { default },
                check,
            )) => {
                let literal = literal.or_else(|| default.map(Literal::Number));
                Some(check.validate(atom.name(), literal.as_ref())?)
            }
            None => None,
        };

        let arity = atom.arity();
        if !arity.accepts(original_args.len()) {
            return Err(DcpError::Arity {
                atom: atom.name().to_string(),
                expected: arity.to_string(),
                got: original_args.len(),
            });
        }

        let Substitution {
            args,
            origins,
            inner,
        } = substitute(atom, &original_args)?;
        Ok(Self {
            atom,
            parameter,
            rule: atom.family(parameter),
            original_args,
            args,
            origins,
            inner,
        })
    }

    pub fn atom(&self) -> Atom {
        self.atom
    }

    pub fn parameter(&self) -> Option<Parameter> {
        self.parameter
    }

    pub fn rule(&self) -> Rule {
        self.rule
    }

    /// Operands the atom was applied to.
    pub fn original_args(&self) -> &[Operand] {
        &self.original_args
    }

    /// Operands the rule family is evaluated on.
    pub fn args(&self) -> &[Operand] {
        &self.args
    }

    /// `name(..., parameter)` for parameterized atoms, else `name`.
    pub fn short_name(&self) -> String {
        match self.parameter {
            Some(p) if self.atom.shows_parameter() => format!("{}(..., {})", self.atom.name(), p),
            _ => self.atom.name().to_string(),
        }
    }

    pub fn sign(&self) -> Sign {
        self.rule.sign(&self.args)
    }

    pub fn signed_curvature(&self) -> Curvature {
        self.rule.signed_curvature(&self.args)
    }

    pub fn monotonicity(&self) -> Vec<Monotonicity> {
        self.rule.monotonicity(&self.args)
    }

    pub fn argument_curvatures(&self) -> Vec<Curvature> {
        self.args.iter().map(|a| a.curvature).collect()
    }

    /// Apply the composition rule to the substituted arguments.
    pub fn composition(&self) -> Result<Composition> {
        dcp_curvature(
            self.signed_curvature(),
            &self.monotonicity(),
            &self.argument_curvatures(),
        )
    }

    pub fn curvature(&self) -> Result<Curvature> {
        Ok(self.composition()?.curvature)
    }

    /// The atom as an operand of an enclosing atom.
    pub fn as_operand(&self) -> Result<Operand> {
        Ok(Operand::new(self.curvature()?, self.sign()))
    }

    /// Composition result and diagnostics.
    ///
    /// Diagnostics of inner atoms come first. Argument indices refer to the
    /// original arguments; a diagnostic about an argument built from all of
    /// them is unindexed.
    pub fn evaluate(&self) -> Result<(Composition, Vec<Diagnostic>)> {
        let mut diagnostics = Vec::new();
        for inner in &self.inner {
            let (_, found) = inner.rule.evaluate()?;
            diagnostics.extend(
                found
                    .into_iter()
                    .filter(|d| !(inner.nested && about_nonconvex(d, inner.rule.original_args())))
                    .map(|d| {
                        let index = d.index().and_then(|i| inner.map.get(i).copied().flatten());
                        d.with_index(index)
                    }),
            );
        }

        let signed = self.signed_curvature();
        let monotonicities = self.monotonicity();
        let curvatures = self.argument_curvatures();
        let composition = dcp_curvature(signed, &monotonicities, &curvatures)?;
        let own = composition_errors(
            &self.short_name(),
            signed,
            &monotonicities,
            &curvatures,
            &composition,
        );
        for d in own {
            let origin = d.index().and_then(|i| self.origins.get(i));
            // a non-convex inner result was reported by the inner atom
            if matches!(origin, Some(Origin::Derived(_))) && about_nonconvex(&d, &self.args) {
                continue;
            }
            let index = match origin {
                Some(Origin::Arg(j)) | Some(Origin::Derived(Some(j))) => Some(*j),
                _ => None,
            };
            diagnostics.push(d.with_index(index));
        }
        Ok((composition, diagnostics))
    }
}

struct Substitution {
    args: Vec<Operand>,
    origins: Vec<Origin>,
    inner: Vec<Inner>,
}

impl Substitution {
    fn empty() -> Self {
        Self {
            args: Vec::new(),
            origins: Vec::new(),
            inner: Vec::new(),
        }
    }

    fn direct(xs: &[Operand]) -> Self {
        Self {
            args: xs.to_vec(),
            origins: (0..xs.len()).map(Origin::Arg).collect(),
            inner: Vec::new(),
        }
    }

    fn push(&mut self, operand: Operand, origin: Origin) {
        self.args.push(operand);
        self.origins.push(origin);
    }

    /// Apply `atom` to `args` and add it as the next substituted argument.
    fn push_inner(
        &mut self,
        atom: Atom,
        args: Vec<Operand>,
        parameter: Option<f64>,
        map: Vec<Option<usize>>,
        nested: bool,
    ) -> Result<()> {
        let rule = AtomRule::new(atom, args, parameter.map(Literal::Number))?;
        let origin = match map.as_slice() {
            [Some(j)] => Origin::Derived(Some(*j)),
            _ => Origin::Derived(None),
        };
        self.push(rule.as_operand()?, origin);
        self.inner.push(Inner { rule, map, nested });
        Ok(())
    }
}

/// Substitute the arguments of atoms defined in terms of other atoms.
fn substitute(atom: Atom, xs: &[Operand]) -> Result<Substitution> {
    use Atom::*;
    let mut s = Substitution::empty();
    let all: Vec<Option<usize>> = (0..xs.len()).map(Some).collect();

    match atom {
        Pos => {
            s = Substitution::direct(xs);
            s.push(Operand::constant(0.0), Origin::Inserted);
        }
        Square => {
            s = Substitution::direct(xs);
            s.push(Operand::constant(1.0), Origin::Inserted);
        }
        HuberCirc => s.push_inner(Norm, xs.to_vec(), Some(2.0), all, false)?,
        PowAbs | SquareAbs | PowPos | SquarePos => {
            let wrapper = if matches!(atom, PowAbs | SquareAbs) { Abs } else { Pos };
            for (j, x) in xs.iter().enumerate() {
                s.push_inner(wrapper, vec![*x], None, vec![Some(j)], false)?;
            }
        }
        SumSquare => {
            s.push_inner(Norm, xs.to_vec(), Some(2.0), all, false)?;
            s.push(Operand::constant(1.0), Origin::Inserted);
        }
        SumSquareAbs | SumSquarePos => {
            let wrapper = if atom == SumSquareAbs { Abs } else { Pos };
            let mut wrapped = Substitution::empty();
            for (j, x) in xs.iter().enumerate() {
                wrapped.push_inner(wrapper, vec![*x], None, vec![Some(j)], false)?;
            }
            s.inner = wrapped.inner;
            s.push_inner(Norm, wrapped.args, Some(2.0), all, true)?;
            s.push(Operand::constant(1.0), Origin::Inserted);
        }
        _ => s = Substitution::direct(xs),
    }
    Ok(s)
}
