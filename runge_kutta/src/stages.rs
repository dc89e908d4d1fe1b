use crate::{
    coefficient::Coefficient,
    compose::StepComposer,
    state::Integrable,
    tableau::{ButcherTableau, Coupling, LowStorage},
};

/// Evaluates every stage of `tableau` once, in increasing order, streaming
/// each derivative to `composer`. The first callback failure stops the step.
pub(crate) fn evaluate<T, S, E, F>(
    tableau: &ButcherTableau<T>,
    f: &mut F,
    x: &S,
    t: &T,
    dt: &T,
    composer: &mut StepComposer<'_, T, S>,
) -> Result<(), E>
where
    T: Coefficient,
    S: Integrable<T>,
    F: FnMut(&S, T) -> Result<S, E>,
{
    match tableau.coupling() {
        Coupling::General => general(tableau, f, x, t, dt, composer),
        Coupling::LowStorage(LowStorage::Williamson { a, b }) => {
            williamson(tableau, a, b, f, x, t, dt, composer)
        }
        Coupling::LowStorage(LowStorage::VanDerHouwen { subdiagonal }) => {
            van_der_houwen(tableau, subdiagonal, f, x, t, dt, composer)
        }
    }
}

fn stage_time<T: Coefficient>(tableau: &ButcherTableau<T>, i: usize, t: &T, dt: &T) -> T {
    t.clone() + tableau.c()[i].clone() * dt.clone()
}

/// `increment_i = x + dt * sum_{j<i} a[i][j] k_j`, keeping every stage.
fn general<T, S, E, F>(
    tableau: &ButcherTableau<T>,
    f: &mut F,
    x: &S,
    t: &T,
    dt: &T,
    composer: &mut StepComposer<'_, T, S>,
) -> Result<(), E>
where
    T: Coefficient,
    S: Integrable<T>,
    F: FnMut(&S, T) -> Result<S, E>,
{
    let mut k: Vec<S> = Vec::with_capacity(tableau.stages());
    for i in 0..tableau.stages() {
        let mut increment = x.clone();
        for (j, k_j) in k.iter().enumerate() {
            let a = &tableau.a()[i][j];
            if !a.is_zero() {
                increment.add_scaled(k_j, &(dt.clone() * a.clone()));
            }
        }
        let k_i = f(&increment, stage_time(tableau, i, t, dt))?;
        composer.accept(i, &k_i);
        k.push(k_i);
    }
    Ok(())
}

/// 2N registers: `q` holds the scaled direction, `u` the stage input.
#[allow(clippy::too_many_arguments)]
fn williamson<T, S, E, F>(
    tableau: &ButcherTableau<T>,
    a: &[T],
    b: &[T],
    f: &mut F,
    x: &S,
    t: &T,
    dt: &T,
    composer: &mut StepComposer<'_, T, S>,
) -> Result<(), E>
where
    T: Coefficient,
    S: Integrable<T>,
    F: FnMut(&S, T) -> Result<S, E>,
{
    let mut u = x.clone();
    let mut q: Option<S> = None;
    for i in 0..tableau.stages() {
        let k = f(&u, stage_time(tableau, i, t, dt))?;
        composer.accept(i, &k);

        let register = match q.take() {
            Some(mut register) => {
                register.scale(&a[i]);
                register.add_scaled(&k, dt);
                register
            }
            None => {
                let mut register = k;
                register.scale(dt);
                register
            }
        };
        u.add_scaled(&register, &b[i]);
        q = Some(register);
    }
    Ok(())
}

/// 2R registers: `partial` is `x` plus every weighted stage except the most
/// recent one, which is kept alongside it.
fn van_der_houwen<T, S, E, F>(
    tableau: &ButcherTableau<T>,
    subdiagonal: &[T],
    f: &mut F,
    x: &S,
    t: &T,
    dt: &T,
    composer: &mut StepComposer<'_, T, S>,
) -> Result<(), E>
where
    T: Coefficient,
    S: Integrable<T>,
    F: FnMut(&S, T) -> Result<S, E>,
{
    let weights = tableau.b_high();
    let mut partial = x.clone();
    let mut previous: Option<S> = None;
    for i in 0..tableau.stages() {
        let k = match previous.take() {
            Some(k_prev) => {
                let mut increment = partial.clone();
                increment.add_scaled(&k_prev, &(dt.clone() * subdiagonal[i].clone()));
                let k = f(&increment, stage_time(tableau, i, t, dt))?;
                partial.add_scaled(&k_prev, &(dt.clone() * weights[i - 1].clone()));
                k
            }
            None => f(&partial, stage_time(tableau, i, t, dt))?,
        };
        composer.accept(i, &k);
        previous = Some(k);
    }
    Ok(())
}
