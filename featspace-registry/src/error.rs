use thiserror::Error;

use featspace_core::VectorError;

use super::config::RegistryConfigError;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error(transparent)]
    Config(#[from] RegistryConfigError),
    #[error("Vector error: {0}")]
    Vector(#[from] VectorError),
}
