//! Convergence acceleration for slowly converging series.

use num_traits::Num;
use serde::{Deserialize, Serialize};

/// Numerator used when filling the epsilon table.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EpsilonVariant {
    /// Wynn's epsilon algorithm, numerator 1.
    #[default]
    Standard,
    /// Numerator `column + 1`, for logarithmically converging sequences.
    Logarithmic,
}

/// Wynn's epsilon algorithm over a sequence of partial sums.
///
/// Column 1 of the table holds the partial sums and each further column is
/// `r[row][col] = r[row + 1][col - 2] + numerator / (r[row + 1][col - 1] - r[row][col - 1])`.
/// A vanishing difference makes the entry infinite, which turns the next
/// quotient into zero. Returns the top entry of the last odd column, i.e.
/// the highest even-order estimate, or the last partial sum if that entry is
/// infinite. Returns `None` when there are no partial sums.
pub fn wynn_epsilon<T>(partial_sums: &[T], variant: EpsilonVariant) -> Option<T>
where
    T: Num + Copy + From<f64>,
{
    let m = partial_sums.len();
    let last = *partial_sums.last()?;

    // None marks an infinite entry
    let mut r: Vec<Vec<Option<T>>> = vec![vec![Some(T::zero()); m + 1]; m + 1];
    for (row, &sum) in partial_sums.iter().enumerate() {
        r[row][1] = Some(sum);
    }

    for column in 2..=m {
        let numerator = match variant {
            EpsilonVariant::Standard => T::one(),
            EpsilonVariant::Logarithmic => T::from((column + 1) as f64),
        };
        for row in 0..=(m - column) {
            let quotient = match (r[row + 1][column - 1], r[row][column - 1]) {
                (Some(next), Some(current)) => {
                    let divisor = next - current;
                    if divisor.is_zero() {
                        None
                    } else {
                        Some(numerator / divisor)
                    }
                }
                _ => Some(T::zero()),
            };
            r[row][column] = match (r[row + 1][column - 2], quotient) {
                (Some(base), Some(quotient)) => Some(base + quotient),
                _ => None,
            };
        }
    }

    let column = if m % 2 == 1 { m } else { m - 1 };
    Some(r[0][column].unwrap_or(last))
}

/// Euler transform of the alternating series `sum (-1)^k a_k`.
///
/// Returns the terms `(1/2)^(k+1) * Δ^k a_0`, which are all positive for
/// completely monotone `|a_k|` and sum to the same limit. Signs of the input
/// are ignored.
pub fn euler_transform(a: &[f64]) -> Vec<f64> {
    (0..a.len())
        .map(|k| {
            let mut binomial = 1.0;
            let mut difference = 0.0;
            for m in 0..=k {
                if m > 0 {
                    binomial *= (k - m + 1) as f64 / m as f64;
                }
                let sign = if m % 2 == 0 { 1.0 } else { -1.0 };
                difference += sign * binomial * a[m].abs();
            }
            0.5_f64.powi(k as i32 + 1) * difference
        })
        .collect()
}
