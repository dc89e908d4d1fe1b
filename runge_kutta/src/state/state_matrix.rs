use nalgebra::{SMatrix, Scalar};

use super::Integrable;
use crate::coefficient::Coefficient;

/// Statically sized nalgebra matrices, including `SVector`.
///
/// `scale` and `component_div` shadow inherent nalgebra methods of the same
/// name, so call them through the trait on concrete matrix types.
impl<T, S, const R: usize, const C: usize> Integrable<T> for SMatrix<S, R, C>
where
    T: Coefficient,
    S: Integrable<T> + Scalar,
{
    fn add_scaled(&mut self, other: &Self, factor: &T) {
        for (value, other) in self.iter_mut().zip(other.iter()) {
            value.add_scaled(other, factor);
        }
    }

    fn scale(&mut self, factor: &T) {
        for value in self.iter_mut() {
            value.scale(factor);
        }
    }

    fn component_div(&mut self, reference: &Self) {
        for (value, reference) in self.iter_mut().zip(reference.iter()) {
            value.component_div(reference);
        }
    }
}
