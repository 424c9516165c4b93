//!
//! Sparse feature vectors over an open-ended, key-addressed dimension space.
//!
//! Each component lives in its own crate; enable the matching feature to pull it in.
//!
#[cfg(feature = "core")]
#[doc(inline)]
pub use featspace_core as core;

#[cfg(feature = "registry")]
#[doc(inline)]
pub use featspace_registry as registry;
