//! Spherical Hankel functions `h1_n = j_n + i y_n` and `h2_n = j_n - i y_n`
//! of integer order.
//!
//! Orders above one come from the upward recurrence
//! `h_{n+1}(z) = (2n + 1)/z h_n(z) - h_{n-1}(z)`, which is stable for the
//! Hankel combination because `y_n` dominates.

use std::f64::consts::PI;

use num_complex::Complex;

use crate::SpecialFunctionError;

const I: Complex<f64> = Complex::new(0.0, 1.0);

#[derive(Clone, Copy)]
enum Kind {
    First,
    Second,
}

fn orders_zero_and_one(kind: Kind, z: Complex<f64>) -> (Complex<f64>, Complex<f64>) {
    match kind {
        // h1_0 = -i e^{iz}/z, h1_1 = -e^{iz}(z + i)/z²
        Kind::First => {
            let e = (I * z).exp();
            (-I * e / z, -e * (z + I) / (z * z))
        }
        // h2_0 = i e^{-iz}/z, h2_1 = -e^{-iz}(z - i)/z²
        Kind::Second => {
            let e = (-I * z).exp();
            (I * e / z, -e * (z - I) / (z * z))
        }
    }
}

/// `[h_n(z), h_{n+1}(z)]`.
fn consecutive(kind: Kind, n: u32, z: Complex<f64>) -> Result<[Complex<f64>; 2], SpecialFunctionError> {
    if z.norm() == 0.0 {
        return Err(SpecialFunctionError::ZeroArgument);
    }
    let (mut lower, mut upper) = orders_zero_and_one(kind, z);
    for order in 1..=n {
        let next = upper * (2 * order + 1) as f64 / z - lower;
        lower = upper;
        upper = next;
    }
    Ok([lower, upper])
}

fn derivative(kind: Kind, n: u32, z: Complex<f64>) -> Result<Complex<f64>, SpecialFunctionError> {
    let [h, next] = consecutive(kind, n, z)?;
    Ok(-next + h * n as f64 / z)
}

/// Spherical Hankel function of the first kind, for integer order `n` only.
pub fn spherical_hankel1(n: u32, z: Complex<f64>) -> Result<Complex<f64>, SpecialFunctionError> {
    Ok(consecutive(Kind::First, n, z)?[0])
}

/// Spherical Hankel function of the second kind, for integer order `n` only.
pub fn spherical_hankel2(n: u32, z: Complex<f64>) -> Result<Complex<f64>, SpecialFunctionError> {
    Ok(consecutive(Kind::Second, n, z)?[0])
}

/// `d/dz h1_n(z) = -h1_{n+1}(z) + n/z h1_n(z)`.
pub fn spherical_hankel1_derivative(
    n: u32,
    z: Complex<f64>,
) -> Result<Complex<f64>, SpecialFunctionError> {
    derivative(Kind::First, n, z)
}

/// `d/dz h2_n(z) = -h2_{n+1}(z) + n/z h2_n(z)`.
pub fn spherical_hankel2_derivative(
    n: u32,
    z: Complex<f64>,
) -> Result<Complex<f64>, SpecialFunctionError> {
    derivative(Kind::Second, n, z)
}

/// Large-argument form of the cylindrical Hankel function of the first kind,
/// `sqrt(2/(πx)) e^{i(x - νπ/2 - π/4)}`.
pub fn asymptotic_hankel1(nu: f64, x: f64) -> Complex<f64> {
    let phase = x - nu * PI / 2.0 - PI / 4.0;
    Complex::from_polar((2.0 / (PI * x)).sqrt(), phase)
}
