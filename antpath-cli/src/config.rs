//! Configuration loading for the `antpath` binary.
//!
//! A TOML file is optional; every field has a default. Command-line
//! overrides are applied on top of the file, then the result is validated.

use antpath_core::{ConfigError, FractalFamily, GeneratorConfig};
use std::path::Path;

/// Values given on the command line. `None` keeps the file's value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub family: Option<FractalFamily>,
    pub iterations: Option<usize>,
    pub side_length: Option<f64>,
    pub max_operations: Option<usize>,
    pub jitter_seed: Option<u64>,
}

impl Overrides {
    pub fn apply(&self, config: &mut GeneratorConfig) {
        if let Some(family) = self.family {
            config.family = family;
        }
        if let Some(iterations) = self.iterations {
            config.iterations = Some(iterations);
        }
        if let Some(side_length) = self.side_length {
            config.side_length = side_length;
        }
        if let Some(max_operations) = self.max_operations {
            config.max_operations = max_operations;
        }
        if let Some(seed) = self.jitter_seed {
            config.jitter_seed = Some(seed);
        }
    }
}

/// Read `path` if given (defaults otherwise), apply `overrides`, validate.
pub fn load(path: Option<&Path>, overrides: &Overrides) -> Result<GeneratorConfig, ConfigError> {
    let mut config = match path {
        Some(path) => from_path(path)?,
        None => GeneratorConfig::default(),
    };
    overrides.apply(&mut config);
    config.validate()?;

    tracing::debug!(
        path = ?path,
        family = %config.family,
        side_length = config.side_length,
        iterations = config.effective_iterations(),
        "configuration loaded"
    );
    Ok(config)
}

/// Like [`load`] without overrides, but a path is mandatory.
pub fn load_required(path: Option<&Path>) -> Result<GeneratorConfig, ConfigError> {
    let path = path.ok_or(ConfigError::MissingConfigPath)?;
    load(Some(path), &Overrides::default())
}

pub fn from_path(path: &Path) -> Result<GeneratorConfig, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    from_toml(&contents)
}

pub fn from_toml(contents: &str) -> Result<GeneratorConfig, ConfigError> {
    toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
}
