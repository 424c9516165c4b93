//!
//! Sparse feature vectors for similarity scoring.
//!
//! A [`SparseVector`] stores only the dimensions that were written to, and
//! caches its magnitude until the next mutation. Dimension numbers are
//! usually handed out by a registry (see `featspace-registry`), which maps
//! arbitrary keys to stable dimensions on first use.
//!
//! ```rust
//! use featspace_core::SparseVector;
//!
//! let mut a = SparseVector::new();
//! a.add(1, 1.0);
//! a.add(2, 2.0);
//!
//! let mut b = SparseVector::new();
//! b.add(2, 2.0);
//!
//! let similarity = a.cosine_similarity(&b).unwrap();
//! assert!((similarity - 2.0 / 5f64.sqrt()).abs() < 1e-9);
//! assert_eq!(a.to_string(), "Vector{1:1.0000, 2:2.0000}");
//! ```
//!
pub mod errors;
pub mod sparse_vector;

// re-exports
pub use errors::*;
pub use sparse_vector::*;
