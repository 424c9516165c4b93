use std::fs::read_to_string;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CAPACITY: usize = 128;

///
/// Registry settings, usually read from a TOML file such as:
///
/// ```toml
/// capacity = 1024
/// ```
///
#[derive(Deserialize, Serialize, Debug, Default, PartialEq)]
pub struct RegistryConfig {
    pub capacity: Option<usize>,
}

#[derive(Error, Debug)]
pub enum RegistryConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type RegistryConfigResult<T> = std::result::Result<T, RegistryConfigError>;

impl RegistryConfig {
    /// The capacity hint, falling back to [`DEFAULT_CAPACITY`].
    pub fn capacity(&self) -> usize {
        self.capacity.unwrap_or(DEFAULT_CAPACITY)
    }
}

impl FromStr for RegistryConfig {
    type Err = RegistryConfigError;

    fn from_str(s: &str) -> RegistryConfigResult<Self> {
        let config = toml::from_str(s)?;
        Ok(config)
    }
}

impl TryFrom<&Path> for RegistryConfig {
    type Error = RegistryConfigError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let toml_str = read_to_string(path)?;
        toml_str.parse()
    }
}
