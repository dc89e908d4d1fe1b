use std::convert::Infallible;

use crate::{
    coefficient::Coefficient,
    compose::{StepComposer, StepResult},
    stages,
    state::Integrable,
    tableau::ButcherTableau,
};

/// Advances `x` from `t` by `dt` with a fallible derivative callback.
///
/// The error estimate is computed when the tableau is embedded, or always
/// when `track_error` is set. Any callback failure aborts the step and is
/// returned unchanged.
pub fn try_step_with<T, S, E, F>(
    tableau: &ButcherTableau<T>,
    mut f: F,
    x: &S,
    t: T,
    dt: T,
    track_error: bool,
) -> Result<StepResult<S>, E>
where
    T: Coefficient,
    S: Integrable<T>,
    F: FnMut(&S, T) -> Result<S, E>,
{
    let track_error = track_error || tableau.is_embedded();
    let mut composer = StepComposer::new(tableau, x, dt.clone(), track_error);
    stages::evaluate(tableau, &mut f, x, &t, &dt, &mut composer)?;
    Ok(composer.finish())
}

/// [`try_step_with`] that estimates the error only for embedded tableaus.
pub fn try_step<T, S, E, F>(
    tableau: &ButcherTableau<T>,
    f: F,
    x: &S,
    t: T,
    dt: T,
) -> Result<StepResult<S>, E>
where
    T: Coefficient,
    S: Integrable<T>,
    F: FnMut(&S, T) -> Result<S, E>,
{
    try_step_with(tableau, f, x, t, dt, false)
}

/// Infallible step, returning the new state together with any error estimate.
pub fn evaluate<T, S, F>(tableau: &ButcherTableau<T>, mut f: F, x: &S, t: T, dt: T) -> StepResult<S>
where
    T: Coefficient,
    S: Integrable<T>,
    F: FnMut(&S, T) -> S,
{
    match try_step(tableau, |x: &S, t: T| Ok::<S, Infallible>(f(x, t)), x, t, dt) {
        Ok(result) => result,
        Err(never) => match never {},
    }
}

/// Infallible step returning only the new state.
pub fn step<T, S, F>(tableau: &ButcherTableau<T>, f: F, x: &S, t: T, dt: T) -> S
where
    T: Coefficient,
    S: Integrable<T>,
    F: FnMut(&S, T) -> S,
{
    evaluate(tableau, f, x, t, dt).state
}
