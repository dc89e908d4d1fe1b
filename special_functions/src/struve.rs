//! Struve function `H_ν(z)` for complex arguments.

use std::f64::consts::PI;

use num_complex::Complex;
use series::{EpsilonVariant, wynn_epsilon};

use crate::gamma::gamma;

/// Below this modulus the power series is summed, above it the asymptotic
/// expansions are used.
const SERIES_LIMIT: f64 = 20.0;
const MAX_TERMS: usize = 100;
const SERIES_TOLERANCE: f64 = 1e-12;
const ASYMPTOTIC_TOLERANCE: f64 = 1e-17;

/// Struve function of order `nu`.
pub fn struve_h(nu: f64, z: Complex<f64>) -> Complex<f64> {
    if z.norm() < SERIES_LIMIT {
        power_series(nu, z)
    } else {
        struve_h_minus_y(nu, z) + bessel_y_asymptotic(nu, z)
    }
}

/// `sum_m (-1)^m (z/2)^(2m+ν+1) / (Γ(m+3/2) Γ(m+ν+3/2))`, accelerated with
/// Wynn's epsilon algorithm on the partial sums.
fn power_series(nu: f64, z: Complex<f64>) -> Complex<f64> {
    if z == Complex::new(0.0, 0.0) {
        return z;
    }
    let half = z * 0.5;
    let ratio = -(half * half);
    let mut term = half.powf(nu + 1.0) / (gamma(1.5) * gamma(nu + 1.5));
    let mut sum = term;
    let mut partial_sums = Vec::with_capacity(MAX_TERMS);
    partial_sums.push(sum);

    for m in 1..MAX_TERMS {
        let m = m as f64;
        term = term * ratio / ((m + 0.5) * (m + nu + 0.5));
        sum += term;
        partial_sums.push(sum);

        let accelerated = wynn_epsilon(&partial_sums, EpsilonVariant::Standard).unwrap_or(sum);
        if (sum - accelerated).norm() < SERIES_TOLERANCE
            && term.norm() < SERIES_TOLERANCE * sum.norm().max(1.0)
        {
            return accelerated;
        }
    }
    sum
}

/// `H_ν(z) - Y_ν(z)` for large `|z|` from its asymptotic expansion
/// `sum_k Γ(k+1/2) (z/2)^(ν-1-2k) / (π Γ(ν+1/2-k))`.
///
/// The expansion is divergent; summation stops at the smallest term.
pub fn struve_h_minus_y(nu: f64, z: Complex<f64>) -> Complex<f64> {
    let half = z * 0.5;
    let ratio = (z * z).inv() * 4.0;
    let mut term = half.powf(nu - 1.0) / (PI.sqrt() * gamma(nu + 0.5));
    let mut sum = term;
    let mut previous = term.norm();

    for k in 1..MAX_TERMS {
        let k = k as f64;
        let next = term * ratio * ((k - 0.5) * (nu + 0.5 - k));
        let size = next.norm();
        if size >= previous || size < ASYMPTOTIC_TOLERANCE * sum.norm() {
            if size < previous {
                sum += next;
            }
            break;
        }
        term = next;
        sum += term;
        previous = size;
    }
    sum
}

/// Bessel function of the second kind from Hankel's asymptotic expansion,
/// `Y_ν(z) ≈ sqrt(2/(πz)) (sin(ω) P + cos(ω) Q)` with `ω = z - νπ/2 - π/4`.
pub fn bessel_y_asymptotic(nu: f64, z: Complex<f64>) -> Complex<f64> {
    let mu = 4.0 * nu * nu;
    let mut terms = vec![Complex::new(1.0, 0.0)];
    let mut previous = f64::INFINITY;
    for k in 1..MAX_TERMS {
        let odd = (2 * k - 1) as f64;
        let Some(&last) = terms.last() else { break };
        let next = last * (mu - odd * odd) / (z * (8 * k) as f64);
        let size = next.norm();
        if size > previous && k > 2 {
            break;
        }
        previous = size;
        terms.push(next);
        if size < ASYMPTOTIC_TOLERANCE {
            break;
        }
    }

    let mut p = Complex::new(0.0, 0.0);
    let mut q = Complex::new(0.0, 0.0);
    for (k, term) in terms.iter().enumerate() {
        let sign = if (k / 2) % 2 == 0 { 1.0 } else { -1.0 };
        if k % 2 == 0 {
            p += *term * sign;
        } else {
            q += *term * sign;
        }
    }

    let omega = z - nu * PI / 2.0 - PI / 4.0;
    (z * PI).inv().scale(2.0).sqrt() * (omega.sin() * p + omega.cos() * q)
}
