//! # featspace-registry
//!
//! Stable dimension assignment for sparse feature vectors.
//!
//! A [`DimensionRegistry`] maps arbitrary hashable keys (event names, composite keys, ...)
//! to dimensions on first use, and writes values into a [`SparseVector`] at those dimensions.
//! Vectors built through the same registry can then be compared with each other.
//!
//! ## Example
//!
//! ```rust
//! use featspace_registry::{DimensionRegistry, SparseVector};
//!
//! let mut registry = DimensionRegistry::with_capacity(128);
//!
//! let mut v1 = SparseVector::new();
//! registry.apply(&mut v1, "Event 1", 1.0);
//! registry.apply(&mut v1, "Event 2", 2.0);
//!
//! let mut v2 = SparseVector::new();
//! registry.apply(&mut v2, "Event 2", 2.0);
//!
//! assert_eq!(registry.get("Event 2"), Some(2));
//! let similarity = v1.cosine_similarity(&v2).unwrap();
//! assert!((similarity - 2.0 / 5f64.sqrt()).abs() < 1e-9);
//! ```
//!
pub mod config;
pub mod error;
pub mod registry;

// re-export things
pub use config::*;
pub use error::*;
pub use registry::*;

pub use featspace_core::{Operand, SparseVector, VectorError};
