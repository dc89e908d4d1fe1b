use std::fmt::Debug;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Num, ToPrimitive};

use crate::tableau::{ButcherTableau, DualTableau, TableauError};

/// Scalar type a tableau's coefficients are expressed in.
///
/// Every published tableau is authored once in exact rational arithmetic and
/// mirrored into `f64` when it is built. The coefficient type of the caller's
/// state picks which of the two forms a step reads from, so exact states never
/// see rounded coefficients and float states never pay for big-integer math.
pub trait Coefficient: Num + Clone + Debug + Send + Sync + 'static {
    /// Converts an exact rational coefficient into this representation.
    fn from_exact(value: &BigRational) -> Self;

    /// Picks the form of a built tableau that matches this coefficient type.
    fn select(tableau: &DualTableau) -> &ButcherTableau<Self>;

    /// Equality used when validating row sums. Exact for rationals.
    fn matches(&self, other: &Self) -> bool;
}

impl Coefficient for f64 {
    fn from_exact(value: &BigRational) -> Self {
        value.to_f64().unwrap_or(f64::NAN)
    }

    fn select(tableau: &DualTableau) -> &ButcherTableau<Self> {
        tableau.fast()
    }

    /// Relative comparison at 1e-12, absolute below magnitude one.
    fn matches(&self, other: &Self) -> bool {
        let scale = self.abs().max(other.abs()).max(1.0);
        (self - other).abs() <= 1e-12 * scale
    }
}

impl Coefficient for BigRational {
    fn from_exact(value: &BigRational) -> Self {
        value.clone()
    }

    fn select(tableau: &DualTableau) -> &ButcherTableau<Self> {
        tableau.exact()
    }

    fn matches(&self, other: &Self) -> bool {
        self == other
    }
}

/// Exact coefficient `numerator / denominator`.
///
/// # Panics
///
/// Panics if `denominator` is zero.
pub fn ratio(numerator: i64, denominator: i64) -> BigRational {
    BigRational::new(BigInt::from(numerator), BigInt::from(denominator))
}

/// Parses a decimal literal such as `-0.6160178650170565` digit for digit,
/// so the rational equals the printed number exactly.
pub fn decimal(literal: &str) -> Result<BigRational, TableauError> {
    let invalid = || TableauError::InvalidLiteral(literal.to_string());

    let trimmed = literal.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));

    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    if !whole
        .chars()
        .chain(fraction.chars())
        .all(|c| c.is_ascii_digit())
    {
        return Err(invalid());
    }

    let mut numerator: BigInt = format!("{whole}{fraction}")
        .parse()
        .map_err(|_| invalid())?;
    if negative {
        numerator = -numerator;
    }
    let exponent = u32::try_from(fraction.len()).map_err(|_| invalid())?;
    let denominator = BigInt::from(10u32).pow(exponent);

    Ok(BigRational::new(numerator, denominator))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_is_exact() {
        assert_eq!(decimal("-0.616").unwrap(), ratio(-616, 1000));
        assert_eq!(decimal("1.5").unwrap(), ratio(3, 2));
        assert_eq!(decimal(".25").unwrap(), ratio(1, 4));
        assert_eq!(decimal("+2").unwrap(), ratio(2, 1));
        assert_eq!(decimal("0.000").unwrap(), ratio(0, 1));
    }

    #[test]
    fn decimal_keeps_every_digit() {
        let value = decimal("0.0271990297818803").unwrap();
        assert_eq!(
            value,
            BigRational::new(
                BigInt::from(271990297818803_i64),
                BigInt::from(10_000_000_000_000_000_i64)
            )
        );
    }

    #[test]
    fn decimal_rejects_garbage() {
        for literal in ["", "-", ".", "1.2.3", "abc", "1e-3", "- 1"] {
            assert_eq!(
                decimal(literal),
                Err(TableauError::InvalidLiteral(literal.to_string())),
                "{literal}"
            );
        }
    }

    #[test]
    fn float_mirror_rounds_once() {
        assert_eq!(f64::from_exact(&ratio(1, 3)), 1.0 / 3.0);
        assert_eq!(f64::from_exact(&ratio(-7857, 10000)), -0.7857);
        assert_eq!(BigRational::from_exact(&ratio(5, 9)), ratio(5, 9));
    }

    #[test]
    fn matches_is_exact_for_rationals() {
        assert!(ratio(1, 3).matches(&ratio(2, 6)));
        assert!(!ratio(1, 3).matches(&ratio(333, 1000)));
        assert!((0.1_f64 + 0.2).matches(&0.3));
        assert!(!0.3_f64.matches(&0.3000001));
    }
}
