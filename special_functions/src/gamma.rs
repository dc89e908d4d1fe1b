//! Gamma function by the Lanczos approximation (g = 7, n = 9).

use std::f64::consts::{PI, TAU};

const LANCZOS_G: f64 = 7.0;
const LANCZOS_COEFFICIENTS: [f64; 9] = [
    0.999_999_999_999_809_9,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_1,
    -176.615_029_162_140_6,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_572e-6,
    1.505_632_735_149_311_6e-7,
];

fn lanczos_sum(z: f64) -> f64 {
    LANCZOS_COEFFICIENTS
        .iter()
        .enumerate()
        .skip(1)
        .fold(LANCZOS_COEFFICIENTS[0], |sum, (i, c)| sum + c / (z + i as f64))
}

/// Γ(x). Infinite at the poles 0, -1, -2, ...
pub fn gamma(x: f64) -> f64 {
    if x.is_nan() {
        return x;
    }
    if x <= 0.0 && x == x.floor() {
        return f64::INFINITY;
    }
    if x < 0.5 {
        // reflection
        return PI / ((PI * x).sin() * gamma(1.0 - x));
    }
    let z = x - 1.0;
    let t = z + LANCZOS_G + 0.5;
    TAU.sqrt() * t.powf(z + 0.5) * (-t).exp() * lanczos_sum(z)
}

/// ln |Γ(x)|, without overflow for large arguments.
pub fn ln_gamma(x: f64) -> f64 {
    if x.is_nan() {
        return x;
    }
    if x <= 0.0 && x == x.floor() {
        return f64::INFINITY;
    }
    if x < 0.5 {
        return PI.ln() - (PI * x).sin().abs().ln() - ln_gamma(1.0 - x);
    }
    let z = x - 1.0;
    let t = z + LANCZOS_G + 0.5;
    0.5 * TAU.ln() + (z + 0.5) * t.ln() - t + lanczos_sum(z).ln()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn factorials() {
        let mut factorial = 1.0;
        for n in 1..15 {
            assert_relative_eq!(gamma(n as f64), factorial, max_relative = 1e-13);
            factorial *= n as f64;
        }
    }

    #[test]
    fn half_integers() {
        assert_relative_eq!(gamma(0.5), PI.sqrt(), max_relative = 1e-14);
        assert_relative_eq!(gamma(1.5), 0.5 * PI.sqrt(), max_relative = 1e-14);
        assert_relative_eq!(gamma(-0.5), -2.0 * PI.sqrt(), max_relative = 1e-14);
    }

    #[test]
    fn poles() {
        assert!(gamma(0.0).is_infinite());
        assert!(gamma(-3.0).is_infinite());
        assert!(ln_gamma(-1.0).is_infinite());
    }

    #[test]
    fn log_gamma_large_argument() {
        assert_relative_eq!(ln_gamma(100.0), 359.134_205_369_575_4, max_relative = 1e-12);
        assert!(ln_gamma(1.0).abs() < 1e-14);
        assert_relative_eq!(ln_gamma(-0.5), (2.0 * PI.sqrt()).ln(), max_relative = 1e-13);
    }
}
