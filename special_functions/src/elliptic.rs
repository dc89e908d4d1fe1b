//! Elliptic integrals of the first and second kind in Legendre form, built on
//! Carlson's symmetric integrals. The parameter is `m = k²` and amplitudes are
//! in radians.

use std::f64::consts::PI;

use crate::SpecialFunctionError;

const RF_TOLERANCE: f64 = 0.0025;
const RD_TOLERANCE: f64 = 0.0015;

/// Carlson's `R_F(x, y, z)`. At most one argument may be zero.
pub fn carlson_rf(x: f64, y: f64, z: f64) -> Result<f64, SpecialFunctionError> {
    if x.min(y).min(z) < 0.0 || (x + y).min(y + z).min(z + x) <= 0.0 {
        return Err(SpecialFunctionError::InvalidCarlsonArguments { x, y, z });
    }
    let (mut x, mut y, mut z) = (x, y, z);
    let (mean, dx, dy, dz) = loop {
        let lambda = duplication(x, y, z);
        x = 0.25 * (x + lambda);
        y = 0.25 * (y + lambda);
        z = 0.25 * (z + lambda);
        let mean = (x + y + z) / 3.0;
        let (dx, dy, dz) = (1.0 - x / mean, 1.0 - y / mean, 1.0 - z / mean);
        // a NaN deviation also ends the loop
        if !(dx.abs().max(dy.abs()).max(dz.abs()) > RF_TOLERANCE) {
            break (mean, dx, dy, dz);
        }
    };

    let e2 = dx * dy - dz * dz;
    let e3 = dx * dy * dz;
    let series = 1.0 - e2 / 10.0 + e3 / 14.0 + e2 * e2 / 24.0 - 3.0 * e2 * e3 / 44.0
        - 5.0 * e2 * e2 * e2 / 208.0
        + 3.0 * e3 * e3 / 104.0
        + e2 * e2 * e3 / 16.0;
    Ok(series / mean.sqrt())
}

/// Carlson's `R_D(x, y, z)`. `x` and `y` may not both be zero and `z` must
/// be positive.
pub fn carlson_rd(x: f64, y: f64, z: f64) -> Result<f64, SpecialFunctionError> {
    if x.min(y) < 0.0 || x + y <= 0.0 || z <= 0.0 {
        return Err(SpecialFunctionError::InvalidCarlsonArguments { x, y, z });
    }
    let (mut x, mut y, mut z) = (x, y, z);
    let mut tail = 0.0;
    let mut factor = 1.0;
    let (mean, dx, dy, dz) = loop {
        let lambda = duplication(x, y, z);
        tail += factor / (z.sqrt() * (z + lambda));
        factor *= 0.25;
        x = 0.25 * (x + lambda);
        y = 0.25 * (y + lambda);
        z = 0.25 * (z + lambda);
        let mean = (x + y + 3.0 * z) / 5.0;
        let (dx, dy, dz) = (1.0 - x / mean, 1.0 - y / mean, 1.0 - z / mean);
        if !(dx.abs().max(dy.abs()).max(dz.abs()) > RD_TOLERANCE) {
            break (mean, dx, dy, dz);
        }
    };

    let xy = dx * dy;
    let z2 = dz * dz;
    let e2 = xy - 6.0 * z2;
    let e3 = (3.0 * xy - 8.0 * z2) * dz;
    let e4 = 3.0 * (xy - z2) * z2;
    let e5 = xy * z2 * dz;
    let series = 1.0 - 3.0 * e2 / 14.0 + e3 / 6.0 + 9.0 * e2 * e2 / 88.0 - 3.0 * e4 / 22.0
        - 9.0 * e2 * e3 / 52.0
        + 3.0 * e5 / 26.0
        - e2 * e2 * e2 / 16.0
        + 3.0 * e3 * e3 / 40.0
        + 3.0 * e2 * e4 / 20.0
        + 45.0 * e2 * e2 * e3 / 272.0
        - 9.0 * (e3 * e4 + e2 * e5) / 68.0;
    Ok(3.0 * tail + factor * series / (mean * mean.sqrt()))
}

fn duplication(x: f64, y: f64, z: f64) -> f64 {
    let (sx, sy, sz) = (x.sqrt(), y.sqrt(), z.sqrt());
    sx * sy + sy * sz + sz * sx
}

fn check_parameter(m: f64) -> Result<(), SpecialFunctionError> {
    if (0.0..=1.0).contains(&m) {
        Ok(())
    } else {
        Err(SpecialFunctionError::ParameterOutOfRange { name: "m", value: m })
    }
}

/// Complete elliptic integral of the first kind `K(m)`, infinite at `m = 1`.
pub fn elliptic_k(m: f64) -> Result<f64, SpecialFunctionError> {
    check_parameter(m)?;
    if m == 1.0 {
        return Ok(f64::INFINITY);
    }
    carlson_rf(0.0, 1.0 - m, 1.0)
}

/// Complete elliptic integral of the second kind `E(m)`.
pub fn elliptic_e(m: f64) -> Result<f64, SpecialFunctionError> {
    check_parameter(m)?;
    if m == 1.0 {
        return Ok(1.0);
    }
    let y = 1.0 - m;
    Ok(carlson_rf(0.0, y, 1.0)? - m / 3.0 * carlson_rd(0.0, y, 1.0)?)
}

/// Splits `phi` into `phi - nπ` in `[-π/2, π/2]` and `n`.
fn reduce_amplitude(phi: f64) -> (f64, f64) {
    let periods = (phi / PI).round();
    (phi - periods * PI, periods)
}

/// Incomplete elliptic integral of the first kind `F(φ | m)`.
pub fn incomplete_elliptic_f(phi: f64, m: f64) -> Result<f64, SpecialFunctionError> {
    check_parameter(m)?;
    let (phi, periods) = reduce_amplitude(phi);
    let complete = if periods == 0.0 {
        0.0
    } else {
        2.0 * periods * elliptic_k(m)?
    };
    let (sin, cos) = phi.sin_cos();
    if m == 1.0 {
        return Ok(sin.atanh() + complete);
    }
    Ok(sin * carlson_rf(cos * cos, 1.0 - m * sin * sin, 1.0)? + complete)
}

/// Incomplete elliptic integral of the second kind `E(φ | m)`.
pub fn incomplete_elliptic_e(phi: f64, m: f64) -> Result<f64, SpecialFunctionError> {
    check_parameter(m)?;
    let (phi, periods) = reduce_amplitude(phi);
    let complete = if periods == 0.0 {
        0.0
    } else {
        2.0 * periods * elliptic_e(m)?
    };
    let (sin, cos) = phi.sin_cos();
    if m == 1.0 {
        return Ok(sin + complete);
    }
    let x = cos * cos;
    let y = 1.0 - m * sin * sin;
    let value = sin * carlson_rf(x, y, 1.0)?
        - m / 3.0 * sin * sin * sin * carlson_rd(x, y, 1.0)?;
    Ok(value + complete)
}
