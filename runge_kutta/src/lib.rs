//! Explicit Runge-Kutta stepping driven by Butcher tableaus.
//!
//! A [`Scheme`] is built once into a [`DualTableau`] holding exact rational
//! coefficients and their `f64` mirror. [`ExplicitIntegrator`] then advances
//! any [`Integrable`] state one step at a time, streaming stages into the new
//! state and, for embedded pairs, into a component-wise error estimate.
//!
//! ```
//! use runge_kutta::{ExplicitIntegrator, Scheme};
//!
//! let integrator = ExplicitIntegrator::new(Scheme::CashKarp45).unwrap();
//! let x = integrator.step(|x: &[f64; 2], _t| [x[1], -x[0]], &[1.0, 0.0], 0.0, 0.01);
//! assert!((x[0] - 0.01_f64.cos()).abs() < 1e-12);
//! ```

pub mod coefficient;
pub mod compose;
pub mod config;
pub mod integrator;
pub mod rk;
pub mod schemes;
mod stages;
pub mod state;
pub mod tableau;

pub use coefficient::{Coefficient, decimal, ratio};
pub use compose::StepResult;
pub use config::{ConfigError, IntegratorConfig};
pub use integrator::ExplicitIntegrator;
pub use rk::{evaluate, step, try_step, try_step_with};
pub use schemes::Scheme;
pub use state::Integrable;
pub use tableau::{ButcherTableau, Coupling, DualTableau, LowStorage, TableauError};
