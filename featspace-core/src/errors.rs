use std::fmt;

use thiserror::Error;

/// Which side of a binary vector operation an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// The receiver (`self`).
    First,
    /// The argument (`other`).
    Second,
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::First => write!(f, "first"),
            Operand::Second => write!(f, "second"),
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorError {
    #[error("{0} vector has zero magnitude")]
    ZeroMagnitude(Operand),
}

pub type VectorResult<T> = std::result::Result<T, VectorError>;
