use super::Integrable;
use crate::coefficient::Coefficient;

/// Fixed-size arrays of integrable elements. Nesting covers grids, so
/// `[[f64; C]; R]` is integrable through `[f64; C]`.
impl<T, S, const N: usize> Integrable<T> for [S; N]
where
    T: Coefficient,
    S: Integrable<T>,
{
    /// Adds each scaled element from `other` into `self` in-place.
    fn add_scaled(&mut self, other: &Self, factor: &T) {
        for (value, other) in self.iter_mut().zip(other) {
            value.add_scaled(other, factor);
        }
    }

    /// Multiplies each element of the array in-place by the given scalar.
    fn scale(&mut self, factor: &T) {
        for value in self.iter_mut() {
            value.scale(factor);
        }
    }

    fn component_div(&mut self, reference: &Self) {
        for (value, reference) in self.iter_mut().zip(reference) {
            value.component_div(reference);
        }
    }
}
