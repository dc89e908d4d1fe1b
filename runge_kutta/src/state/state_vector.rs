use super::Integrable;
use crate::coefficient::Coefficient;

/// Dynamically sized states. Every operand must have the length of `self`.
impl<T, S> Integrable<T> for Vec<S>
where
    T: Coefficient,
    S: Integrable<T>,
{
    /// Performs element-wise scaled addition of two vectors.
    ///
    /// # Panics
    ///
    /// Panics if the vectors have different lengths.
    fn add_scaled(&mut self, other: &Self, factor: &T) {
        if self.len() != other.len() {
            panic!("state vectors do not have same length")
        }
        for (value, other) in self.iter_mut().zip(other) {
            value.add_scaled(other, factor);
        }
    }

    /// Multiplies each element in the vector by a scalar value.
    fn scale(&mut self, factor: &T) {
        for value in self.iter_mut() {
            value.scale(factor);
        }
    }

    /// # Panics
    ///
    /// Panics if the vectors have different lengths.
    fn component_div(&mut self, reference: &Self) {
        if self.len() != reference.len() {
            panic!("state vectors do not have same length")
        }
        for (value, reference) in self.iter_mut().zip(reference) {
            value.component_div(reference);
        }
    }
}
