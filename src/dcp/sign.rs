//! Sign tracking for DCP (Disciplined Convex Programming).
//!
//! Every expression is classified as negative, zero, positive or of unknown
//! sign. The declaration order of [`Sign`] is a total order
//! (`Negative < Zero < Positive < Unknown`) which some atoms compare against.

use std::fmt;

/// Sign of an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Sign {
    /// Expression is always <= 0.
    Negative,
    /// Expression is always == 0.
    Zero,
    /// Expression is always >= 0.
    Positive,
    /// Sign is unknown.
    Unknown,
}

impl Sign {
    /// All four signs, in order.
    pub const ALL: [Sign; 4] = [Sign::Negative, Sign::Zero, Sign::Positive, Sign::Unknown];

    /// Sign of a numeric literal.
    pub fn of_value(value: f64) -> Self {
        if value == 0.0 {
            Sign::Zero
        } else if value > 0.0 {
            Sign::Positive
        } else if value < 0.0 {
            Sign::Negative
        } else {
            Sign::Unknown
        }
    }

    /// Check if the sign is non-negative (>= 0).
    pub fn is_nonneg(self) -> bool {
        matches!(self, Sign::Positive | Sign::Zero)
    }

    /// Check if the sign is non-positive (<= 0).
    pub fn is_nonpos(self) -> bool {
        matches!(self, Sign::Negative | Sign::Zero)
    }

    /// Check if the sign is zero.
    pub fn is_zero(self) -> bool {
        matches!(self, Sign::Zero)
    }

    /// Negate the sign.
    pub fn negate(self) -> Self {
        match self {
            Sign::Positive => Sign::Negative,
            Sign::Negative => Sign::Positive,
            Sign::Zero => Sign::Zero,
            Sign::Unknown => Sign::Unknown,
        }
    }

    /// Sign of a sum of terms with the given signs.
    ///
    /// The empty sum is zero.
    pub fn sum<I: IntoIterator<Item = Sign>>(signs: I) -> Sign {
        signs.into_iter().fold(Sign::Zero, add_sign)
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Sign::Negative => "NEGATIVE",
            Sign::Zero => "ZERO",
            Sign::Positive => "POSITIVE",
            Sign::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

/// Combine signs for addition: a + b.
pub fn add_sign(a: Sign, b: Sign) -> Sign {
    use Sign::*;
    match (a, b) {
        // Zero doesn't change sign
        (Zero, x) | (x, Zero) => x,
        (Positive, Positive) => Positive,
        (Negative, Negative) => Negative,
        (Positive, Negative) | (Negative, Positive) => Unknown,
        (Unknown, _) | (_, Unknown) => Unknown,
    }
}

/// Sign of `max(a, b)`.
///
/// Lookup table rather than `Ord::max`: a zero operand bounds the result
/// from below, so `max(0, ?)` is positive.
pub fn max_sign(a: Sign, b: Sign) -> Sign {
    use Sign::*;
    match (a, b) {
        (Positive, _) | (_, Positive) => Positive,
        (Zero, Unknown) | (Unknown, Zero) => Positive,
        (Zero, Zero) => Zero,
        (Zero, Negative) | (Negative, Zero) => Zero,
        (Unknown, Negative) | (Negative, Unknown) => Unknown,
        (Negative, Negative) => Negative,
        (Unknown, Unknown) => Unknown,
    }
}

/// Sign of `min(a, b)`. Mirror image of [`max_sign`].
pub fn min_sign(a: Sign, b: Sign) -> Sign {
    use Sign::*;
    match (a, b) {
        (Negative, _) | (_, Negative) => Negative,
        (Zero, Unknown) | (Unknown, Zero) => Negative,
        (Zero, Zero) => Zero,
        (Zero, Positive) | (Positive, Zero) => Zero,
        (Unknown, Positive) | (Positive, Unknown) => Unknown,
        (Positive, Positive) => Positive,
        (Unknown, Unknown) => Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_basics() {
        assert!(Sign::Positive.is_nonneg());
        assert!(!Sign::Positive.is_nonpos());

        assert!(!Sign::Negative.is_nonneg());
        assert!(Sign::Negative.is_nonpos());

        assert!(Sign::Zero.is_nonneg());
        assert!(Sign::Zero.is_nonpos());
        assert!(Sign::Zero.is_zero());

        assert!(!Sign::Unknown.is_nonneg());
        assert!(!Sign::Unknown.is_nonpos());
    }

    #[test]
    fn test_sign_order() {
        assert!(Sign::Negative < Sign::Zero);
        assert!(Sign::Zero < Sign::Positive);
        assert!(Sign::Positive < Sign::Unknown);
    }

    #[test]
    fn test_negate_sign() {
        assert_eq!(Sign::Positive.negate(), Sign::Negative);
        assert_eq!(Sign::Negative.negate(), Sign::Positive);
        assert_eq!(Sign::Zero.negate(), Sign::Zero);
        assert_eq!(Sign::Unknown.negate(), Sign::Unknown);
    }

    #[test]
    fn test_of_value() {
        assert_eq!(Sign::of_value(5.0), Sign::Positive);
        assert_eq!(Sign::of_value(-5.0), Sign::Negative);
        assert_eq!(Sign::of_value(0.0), Sign::Zero);
        assert_eq!(Sign::of_value(f64::NAN), Sign::Unknown);
    }

    #[test]
    fn test_add_sign() {
        use Sign::*;
        assert_eq!(add_sign(Positive, Positive), Positive);
        assert_eq!(add_sign(Negative, Negative), Negative);
        assert_eq!(add_sign(Positive, Negative), Unknown);
        assert_eq!(add_sign(Zero, Positive), Positive);
        assert_eq!(add_sign(Unknown, Zero), Unknown);
    }

    #[test]
    fn test_sum() {
        use Sign::*;
        assert_eq!(Sign::sum([Positive, Zero, Positive]), Positive);
        assert_eq!(Sign::sum([Negative, Positive]), Unknown);
        assert_eq!(Sign::sum([]), Zero);
    }

    #[test]
    fn test_max_min_tables() {
        use Sign::*;
        assert_eq!(max_sign(Zero, Unknown), Positive);
        assert_eq!(max_sign(Negative, Unknown), Unknown);
        assert_eq!(max_sign(Positive, Unknown), Positive);
        assert_eq!(max_sign(Zero, Negative), Zero);

        assert_eq!(min_sign(Zero, Unknown), Negative);
        assert_eq!(min_sign(Positive, Unknown), Unknown);
        assert_eq!(min_sign(Negative, Unknown), Negative);
        assert_eq!(min_sign(Zero, Positive), Zero);
    }

    #[test]
    fn test_max_min_commute() {
        for a in Sign::ALL {
            for b in Sign::ALL {
                assert_eq!(max_sign(a, b), max_sign(b, a));
                assert_eq!(min_sign(a, b), min_sign(b, a));
                assert_eq!(max_sign(a, b), min_sign(a.negate(), b.negate()).negate());
            }
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Sign::Positive.to_string(), "POSITIVE");
        assert_eq!(Sign::Unknown.to_string(), "UNKNOWN");
    }
}
