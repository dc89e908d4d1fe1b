//! Catmull-Rom splines through a sequence of points, evaluated as cubic
//! Bézier segments.

use nalgebra::{Point, SVector};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum InterpolationError {
    #[error("interpolation step {0} must be in (0, 1]")]
    InvalidStep(f64),
}

/// All Bernstein polynomials of `degree` at `u`, from the recurrence
/// `B[i,n](u) = (1 - u) B[i,n-1](u) + u B[i-1,n-1](u)`.
pub fn bernstein_basis(degree: usize, u: f64) -> Vec<f64> {
    let mut basis = vec![0.0; degree + 1];
    basis[0] = 1.0;
    let complement = 1.0 - u;
    for j in 1..=degree {
        let mut saved = 0.0;
        for k in 0..j {
            let temp = basis[k];
            basis[k] = saved + complement * temp;
            saved = u * temp;
        }
        basis[j] = saved;
    }
    basis
}

fn blend<const D: usize>(points: &[Point<f64, D>], weights: &[f64]) -> Point<f64, D> {
    let sum = points
        .iter()
        .zip(weights)
        .fold(SVector::<f64, D>::zeros(), |sum, (p, w)| sum + p.coords * *w);
    Point::from(sum)
}

/// Point at `t` on the Bézier curve with the given control points, or `None`
/// without any.
pub fn bezier_point<const D: usize>(control: &[Point<f64, D>], t: f64) -> Option<Point<f64, D>> {
    let degree = control.len().checked_sub(1)?;
    Some(blend(control, &bernstein_basis(degree, t)))
}

/// Point at `t` in `[0, 1]` on the Catmull-Rom segment between `p1` and `p2`.
///
/// The tangents at `p1` and `p2` are `(p2 - p0)/2` and `(p3 - p1)/2`.
pub fn point_on_catmull_rom<const D: usize>(
    p0: &Point<f64, D>,
    p1: &Point<f64, D>,
    p2: &Point<f64, D>,
    p3: &Point<f64, D>,
    t: f64,
) -> Point<f64, D> {
    let tangent1 = (p2 - p0) * 0.5;
    let tangent2 = (p3 - p1) * 0.5;
    let control = [*p1, p1 + tangent1 / 3.0, p2 - tangent2 / 3.0, *p2];
    blend(&control, &bernstein_basis(3, t))
}

/// Samples a Catmull-Rom spline through `points` every `step` of each segment.
///
/// An open curve gets phantom end points mirrored half a segment beyond the
/// first and last points and ends exactly on the last point. A closed curve
/// wraps around and ends back on the first point. With
/// two points or fewer the points are returned unchanged.
pub fn catmull_rom_spline<const D: usize>(
    points: &[Point<f64, D>],
    step: f64,
    closed: bool,
) -> Result<Vec<Point<f64, D>>, InterpolationError> {
    if !(step > 0.0 && step <= 1.0) {
        return Err(InterpolationError::InvalidStep(step));
    }
    let n = points.len();
    if n <= 2 {
        return Ok(points.to_vec());
    }

    let samples = ((1.0 / step).round() as usize).max(1);
    let parameters: Vec<f64> = (0..samples).map(|j| j as f64 / samples as f64).collect();

    let mut result = Vec::with_capacity(samples * n + 1);
    let mut segment = |p0: &Point<f64, D>,
                       p1: &Point<f64, D>,
                       p2: &Point<f64, D>,
                       p3: &Point<f64, D>| {
        for &t in &parameters {
            result.push(point_on_catmull_rom(p0, p1, p2, p3, t));
        }
    };

    if closed {
        for i in 0..n {
            segment(
                &points[(i + n - 1) % n],
                &points[i],
                &points[(i + 1) % n],
                &points[(i + 2) % n],
            );
        }
        result.push(points[0]);
    } else {
        let first = points[0] - (points[1] - points[0]) * 0.5;
        let last = points[n - 1] + (points[n - 1] - points[n - 2]) * 0.5;
        let mut extended = Vec::with_capacity(n + 2);
        extended.push(first);
        extended.extend_from_slice(points);
        extended.push(last);
        for window in extended.windows(4) {
            segment(&window[0], &window[1], &window[2], &window[3]);
        }
        result.push(points[n - 1]);
    }
    Ok(result)
}
