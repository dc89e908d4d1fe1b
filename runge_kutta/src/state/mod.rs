use num_rational::BigRational;

use crate::coefficient::Coefficient;

pub mod state_array;
pub mod state_matrix;
pub mod state_vector;

/// Trait representing a state that can be advanced by an explicit step.
///
/// `T` is the coefficient type the state is scaled by. Scalars, fixed
/// arrays, grids, vectors and nalgebra matrices of an integrable element are
/// all integrable, so a step is written once for every shape.
pub trait Integrable<T: Coefficient>: Clone {
    /// `self += factor * other`, component-wise.
    fn add_scaled(&mut self, other: &Self, factor: &T);

    /// `self *= factor`, component-wise.
    fn scale(&mut self, factor: &T);

    /// `self /= reference`, component-wise. Used for relative errors.
    fn component_div(&mut self, reference: &Self);
}

impl Integrable<f64> for f64 {
    fn add_scaled(&mut self, other: &Self, factor: &f64) {
        *self += factor * other;
    }

    fn scale(&mut self, factor: &f64) {
        *self *= factor;
    }

    /// IEEE division, so a zero reference gives an infinite or NaN ratio.
    fn component_div(&mut self, reference: &Self) {
        *self /= reference;
    }
}

impl Integrable<BigRational> for BigRational {
    fn add_scaled(&mut self, other: &Self, factor: &BigRational) {
        *self += factor * other;
    }

    fn scale(&mut self, factor: &BigRational) {
        *self *= factor;
    }

    /// # Panics
    ///
    /// Panics if `reference` is zero, since an exact ratio does not exist.
    fn component_div(&mut self, reference: &Self) {
        *self /= reference;
    }
}
