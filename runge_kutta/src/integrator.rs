use std::{convert::Infallible, sync::Arc};

use crate::{
    coefficient::Coefficient,
    compose::StepResult,
    rk,
    schemes::Scheme,
    state::Integrable,
    tableau::{ButcherTableau, DualTableau, TableauError},
};

/// A selected scheme and its tableau, built once and shared read-only.
///
/// Steps never mutate the integrator, so one instance can serve any number of
/// threads. Reselecting rebuilds the tableau; reselecting the current scheme
/// keeps the existing one.
#[derive(Debug, Clone)]
pub struct ExplicitIntegrator {
    scheme: Scheme,
    tableau: Arc<DualTableau>,
}

impl ExplicitIntegrator {
    pub fn new(scheme: Scheme) -> Result<Self, TableauError> {
        Ok(Self {
            scheme,
            tableau: Arc::new(scheme.build()?),
        })
    }

    /// Switches to `scheme`. On failure the previous selection is kept.
    pub fn select(&mut self, scheme: Scheme) -> Result<(), TableauError> {
        if scheme == self.scheme {
            return Ok(());
        }
        self.tableau = Arc::new(scheme.build()?);
        self.scheme = scheme;
        Ok(())
    }

    pub fn with_scheme(mut self, scheme: Scheme) -> Result<Self, TableauError> {
        self.select(scheme)?;
        Ok(self)
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// The form of the tableau used for states with coefficient type `T`.
    pub fn tableau<T: Coefficient>(&self) -> &ButcherTableau<T> {
        T::select(&self.tableau)
    }

    pub fn shared_tableau(&self) -> Arc<DualTableau> {
        Arc::clone(&self.tableau)
    }

    /// False for the reserved scheme, whose steps leave the state unchanged.
    pub fn is_supported(&self) -> bool {
        self.tableau.is_supported()
    }

    /// Advances `x` from `t` by `dt`. `f(x, t)` is the time derivative.
    pub fn step<T, S, F>(&self, f: F, x: &S, t: T, dt: T) -> S
    where
        T: Coefficient,
        S: Integrable<T>,
        F: FnMut(&S, T) -> S,
    {
        rk::step(self.tableau::<T>(), f, x, t, dt)
    }

    /// Advances `x` and hands the component-wise relative error to
    /// `on_error` once the step is complete. The error is zero for tableaus
    /// without an embedded pair.
    ///
    /// # Panics
    ///
    /// For exact states, panics if a component of the new state is zero.
    pub fn step_with_error<T, S, F, R>(&self, mut f: F, x: &S, t: T, dt: T, on_error: R) -> S
    where
        T: Coefficient,
        S: Integrable<T>,
        F: FnMut(&S, T) -> S,
        R: FnOnce(&S),
    {
        let result = rk::try_step_with(
            self.tableau::<T>(),
            |x: &S, t: T| Ok::<S, Infallible>(f(x, t)),
            x,
            t,
            dt,
            true,
        );
        match result {
            Ok(StepResult {
                state,
                relative_error,
                ..
            }) => {
                if let Some(relative_error) = relative_error {
                    on_error(&relative_error);
                }
                state
            }
            Err(never) => match never {},
        }
    }

    /// Advances `x` with a fallible derivative. The first failure aborts the
    /// step and is returned unchanged.
    pub fn try_step<T, S, E, F>(&self, f: F, x: &S, t: T, dt: T) -> Result<StepResult<S>, E>
    where
        T: Coefficient,
        S: Integrable<T>,
        F: FnMut(&S, T) -> Result<S, E>,
    {
        rk::try_step(self.tableau::<T>(), f, x, t, dt)
    }

    /// Advances `x`, returning the error estimate when the scheme has one.
    pub fn evaluate<T, S, F>(&self, f: F, x: &S, t: T, dt: T) -> StepResult<S>
    where
        T: Coefficient,
        S: Integrable<T>,
        F: FnMut(&S, T) -> S,
    {
        rk::evaluate(self.tableau::<T>(), f, x, t, dt)
    }
}
