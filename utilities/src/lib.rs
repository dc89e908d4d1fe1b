use std::fmt::Display;

use num_complex::Complex;
use num_traits::Float;

/// Asserts that two values agree to a relative tolerance of 1e-9.
pub fn assert_equal<T: Float + Display>(left: T, right: T) {
    assert_equal_reltol(left, right, T::from(1e-9).unwrap_or_else(T::epsilon));
}

pub fn assert_equal_reltol<T: Float + Display>(left: T, right: T, reltol: T) {
    let max = left.abs().max(right.abs());
    if max < T::epsilon() {
        // If both values are close to zero, we consider them equal
        return;
    }
    let abs_diff = (left - right).abs();
    let rel_diff = abs_diff / max;

    assert!(
        rel_diff < reltol,
        "Assertion failed: left ({}) and right ({}) are not approximately equal. Relative difference: {}. Absolute difference: {}",
        left,
        right,
        rel_diff,
        abs_diff,
    );
}

pub fn assert_equal_abstol<T: Float + Display>(left: T, right: T, abstol: T) {
    let abs_diff = (left - right).abs();
    assert!(
        abs_diff <= abstol,
        "Assertion failed: left ({}) and right ({}) differ by {}, more than {}",
        left,
        right,
        abs_diff,
        abstol,
    );
}

/// Asserts that two values agree when rounded to `places` decimal places.
pub fn assert_decimal_places(left: f64, right: f64, places: i32) {
    let scale = 10f64.powi(places);
    assert!(
        (left * scale).round() == (right * scale).round(),
        "Assertion failed: left ({}) and right ({}) differ within {} decimal places",
        left,
        right,
        places,
    );
}

/// Compares the modulus of the difference against the larger modulus.
pub fn assert_complex_equal(left: Complex<f64>, right: Complex<f64>, reltol: f64) {
    let max = left.norm().max(right.norm());
    if max < f64::EPSILON {
        return;
    }
    let rel_diff = (left - right).norm() / max;
    assert!(
        rel_diff < reltol,
        "Assertion failed: left ({}) and right ({}) are not approximately equal. Relative difference: {}",
        left,
        right,
        rel_diff,
    );
}
