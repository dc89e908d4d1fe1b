//! Horner evaluation of dense and sparse polynomials over real or complex
//! coefficients. Dense coefficients are ordered from the highest power down.

use std::collections::BTreeMap;

use num_traits::{Num, pow};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolynomialError {
    #[error("polynomial has no coefficients")]
    Empty,
}

/// Evaluates `p(x)` and `p'(x)` in one pass.
pub fn horner<T>(coefficients: &[T], x: T) -> Result<(T, T), PolynomialError>
where
    T: Num + Copy,
{
    let (first, rest) = coefficients.split_first().ok_or(PolynomialError::Empty)?;
    let mut value = *first;
    let mut derivative = T::zero();
    for &coefficient in rest {
        derivative = derivative * x + value;
        value = value * x + coefficient;
    }
    Ok((value, derivative))
}

/// Evaluates `[p(x), p'(x), ..., p^(n)(x)]` for a polynomial of degree `n`
/// by repeated synthetic division.
pub fn horner_derivatives<T>(coefficients: &[T], x: T) -> Result<Vec<T>, PolynomialError>
where
    T: Num + Copy,
{
    let (first, rest) = coefficients.split_first().ok_or(PolynomialError::Empty)?;
    let degree = rest.len();

    // d[j] holds p^(j)(x) / j! once every coefficient is consumed
    let mut d = vec![T::zero(); degree + 1];
    d[0] = *first;
    for (i, &coefficient) in rest.iter().enumerate() {
        for j in (1..=(i + 1)).rev() {
            d[j] = d[j] * x + d[j - 1];
        }
        d[0] = d[0] * x + coefficient;
    }

    let mut factorial = T::one();
    let mut count = T::zero();
    for value in d.iter_mut().skip(1) {
        count = count + T::one();
        factorial = factorial * count;
        *value = *value * factorial;
    }
    Ok(d)
}

/// Evaluates a polynomial stored as `power -> coefficient`, skipping the
/// missing powers instead of multiplying through zeros.
pub fn horner_sparse<T>(terms: &BTreeMap<usize, T>, x: T) -> Result<T, PolynomialError>
where
    T: Num + Copy,
{
    let mut iter = terms.iter().rev();
    let (&highest, &leading) = iter.next().ok_or(PolynomialError::Empty)?;

    let mut value = leading;
    let mut power = highest;
    for (&next, &coefficient) in iter {
        value = value * pow(x, power - next) + coefficient;
        power = next;
    }
    Ok(value * pow(x, power))
}
