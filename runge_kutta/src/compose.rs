use crate::{coefficient::Coefficient, state::Integrable, tableau::ButcherTableau};

/// The outcome of a single step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult<S> {
    /// `x + dt * sum(b_high[i] * k_i)`.
    pub state: S,
    /// `dt * sum(d[i] * k_i)`, present when an error estimate was computed.
    pub absolute_error: Option<S>,
    /// `absolute_error / state`, component-wise.
    pub relative_error: Option<S>,
}

/// Accumulates stage derivatives into the new state and the error estimate
/// as the stages are produced, so no stage has to outlive its own use.
pub(crate) struct StepComposer<'a, T: Coefficient, S> {
    weights: &'a [T],
    error_weights: Option<&'a [T]>,
    dt: T,
    state: S,
    error: Option<S>,
}

impl<'a, T, S> StepComposer<'a, T, S>
where
    T: Coefficient,
    S: Integrable<T>,
{
    pub(crate) fn new(tableau: &'a ButcherTableau<T>, x: &S, dt: T, track_error: bool) -> Self {
        Self {
            weights: tableau.b_high(),
            error_weights: track_error.then(|| tableau.error_weights()),
            dt,
            state: x.clone(),
            error: None,
        }
    }

    /// Folds stage `index` in. Each stage is accepted exactly once.
    pub(crate) fn accept(&mut self, index: usize, k: &S) {
        let factor = self.dt.clone() * self.weights[index].clone();
        self.state.add_scaled(k, &factor);

        if let Some(error_weights) = self.error_weights {
            let factor = self.dt.clone() * error_weights[index].clone();
            match &mut self.error {
                Some(error) => error.add_scaled(k, &factor),
                None => {
                    let mut error = k.clone();
                    error.scale(&factor);
                    self.error = Some(error);
                }
            }
        }
    }

    pub(crate) fn finish(self) -> StepResult<S> {
        let absolute_error = match (self.error, self.error_weights) {
            (Some(error), _) => Some(error),
            // no stages were accepted, the estimate is exactly zero
            (None, Some(_)) => {
                let mut zero = self.state.clone();
                zero.scale(&T::zero());
                Some(zero)
            }
            (None, None) => None,
        };
        let relative_error = absolute_error.as_ref().map(|error| {
            let mut relative = error.clone();
            relative.component_div(&self.state);
            relative
        });

        StepResult {
            state: self.state,
            absolute_error,
            relative_error,
        }
    }
}
