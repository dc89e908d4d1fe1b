//! Special functions that show up in acoustics and wave problems: the gamma
//! function, Struve functions, complete and incomplete elliptic integrals and
//! spherical Hankel functions.

use thiserror::Error;

pub mod elliptic;
pub mod gamma;
pub mod hankel;
pub mod struve;

pub use elliptic::{
    carlson_rd, carlson_rf, elliptic_e, elliptic_k, incomplete_elliptic_e, incomplete_elliptic_f,
};
pub use gamma::{gamma, ln_gamma};
pub use hankel::{
    asymptotic_hankel1, spherical_hankel1, spherical_hankel1_derivative, spherical_hankel2,
    spherical_hankel2_derivative,
};
pub use struve::{bessel_y_asymptotic, struve_h, struve_h_minus_y};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SpecialFunctionError {
    #[error("{name} = {value} is outside [0, 1]")]
    ParameterOutOfRange { name: &'static str, value: f64 },
    #[error("invalid Carlson arguments ({x}, {y}, {z})")]
    InvalidCarlsonArguments { x: f64, y: f64, z: f64 },
    #[error("spherical Hankel functions are singular at z = 0")]
    ZeroArgument,
}
