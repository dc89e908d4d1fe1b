use std::{
    fs::File,
    io::{Read, Write},
    path::Path,
};

use ron::{
    from_str,
    ser::{PrettyConfig, to_string_pretty},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{integrator::ExplicitIntegrator, schemes::Scheme, tableau::TableauError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access integrator configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse integrator configuration: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("failed to write integrator configuration: {0}")]
    Serialize(#[from] ron::Error),
    #[error(transparent)]
    Tableau(#[from] TableauError),
}

/// Which scheme to integrate with, stored as RON, e.g. `(scheme: CashKarp45)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegratorConfig {
    pub scheme: Scheme,
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self {
            scheme: Scheme::RungeKutta4,
        }
    }
}

impl IntegratorConfig {
    pub fn new(scheme: Scheme) -> Self {
        Self { scheme }
    }

    pub fn from_ron_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(from_str(contents)?)
    }

    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        Ok(to_string_pretty(self, PrettyConfig::new())?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        Self::from_ron_str(&contents)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let mut file = File::create(path)?;
        file.write_all(self.to_ron_string()?.as_bytes())?;
        Ok(())
    }

    /// Builds the integrator for the configured scheme.
    pub fn build(&self) -> Result<ExplicitIntegrator, ConfigError> {
        Ok(ExplicitIntegrator::new(self.scheme)?)
    }
}
