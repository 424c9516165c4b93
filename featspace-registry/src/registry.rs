//!
//! This module defines the `DimensionRegistry` struct, which hands out stable dimensions to keys.
//!
//! The registry is the oracle of a feature space: every vector built through the same registry
//! agrees on which dimension each key lives in. Dimensions start at 1 and are assigned in
//! first-seen order; once assigned, a key keeps its dimension for the lifetime of the registry.
//!
use std::borrow::Borrow;
use std::hash::Hash;
use std::path::Path;

use fxhash::FxHashMap as HashMap;
use log::{debug, trace};

use featspace_core::SparseVector;

use crate::config::RegistryConfig;
use crate::error::RegistryError;

#[derive(Debug, Clone)]
pub struct DimensionRegistry<K> {
    next_dimension: u32,
    key_to_dimension: HashMap<K, u32>,
}

impl<K: Eq + Hash> Default for DimensionRegistry<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash> DimensionRegistry<K> {
    ///
    /// Create an empty registry.
    ///
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    ///
    /// Create an empty registry with room for `capacity` keys before reallocating.
    ///
    /// # Arguments:
    /// - `capacity`: a sizing hint only, it has no effect on dimension assignment
    ///
    pub fn with_capacity(capacity: usize) -> Self {
        DimensionRegistry {
            next_dimension: 0,
            key_to_dimension: HashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    ///
    /// Create a registry from a TOML config file.
    ///
    pub fn from_config<P: AsRef<Path>>(cfg_path: P) -> Result<Self, RegistryError> {
        let config = RegistryConfig::try_from(cfg_path.as_ref())?;
        debug!(
            "creating dimension registry from {} with capacity {}",
            cfg_path.as_ref().display(),
            config.capacity()
        );
        Ok(Self::with_capacity(config.capacity()))
    }

    ///
    /// Look up the dimension of a key, assigning the next free dimension if the key is new.
    ///
    /// # Arguments:
    /// - `key`: the key to resolve
    /// # Returns:
    /// - `u32`: the dimension of the key, starting at 1
    ///
    pub fn resolve(&mut self, key: K) -> u32 {
        let next_dimension = &mut self.next_dimension;
        *self.key_to_dimension.entry(key).or_insert_with(|| {
            *next_dimension += 1;
            trace!("assigned dimension {next_dimension}");
            *next_dimension
        })
    }

    ///
    /// Accumulate `value` into `vector` at the dimension of `key`.
    ///
    /// The key is resolved even when `value` is zero, so it still claims a
    /// dimension; the vector itself ignores zero deltas.
    ///
    pub fn apply(&mut self, vector: &mut SparseVector, key: K, value: f64) {
        let dimension = self.resolve(key);
        vector.add(dimension, value);
    }

    ///
    /// Convert a key to its dimension without assigning one.
    ///
    /// # Returns:
    /// - `Option<u32>`: the dimension of the key, or None if it was never resolved
    ///
    pub fn get<Q>(&self, key: &Q) -> Option<u32>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.key_to_dimension.get(key).copied()
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.key_to_dimension.contains_key(key)
    }

    ///
    /// Get the number of assigned dimensions. This is also the highest dimension handed out.
    ///
    pub fn len(&self) -> usize {
        self.next_dimension as usize
    }

    pub fn is_empty(&self) -> bool {
        self.next_dimension == 0
    }

    ///
    /// All keys, ordered by their dimension.
    ///
    pub fn keys(&self) -> Vec<&K> {
        let mut keys: Vec<(&K, u32)> = self
            .key_to_dimension
            .iter()
            .map(|(key, dimension)| (key, *dimension))
            .collect();
        keys.sort_unstable_by_key(|(_, dimension)| *dimension);
        keys.into_iter().map(|(key, _)| key).collect()
    }

    ///
    /// Expand a vector built from this registry into a dense vector with one slot per assigned
    /// dimension. See [`SparseVector::to_dense`].
    ///
    pub fn to_dense(&self, vector: &SparseVector) -> Vec<f64> {
        vector.to_dense(self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn events() -> Vec<&'static str> {
        vec!["Event 1", "Event 2", "Event 3"]
    }

    #[rstest]
    fn test_resolve_assigns_in_first_seen_order(events: Vec<&'static str>) {
        let mut registry = DimensionRegistry::new();
        let dimensions: Vec<u32> = events.iter().map(|event| registry.resolve(*event)).collect();

        assert_eq!(dimensions, vec![1, 2, 3]);
        assert_eq!(registry.len(), 3);
    }

    #[rstest]
    fn test_resolve_is_idempotent(events: Vec<&'static str>) {
        let mut registry = DimensionRegistry::new();
        for event in events.iter() {
            registry.resolve(*event);
        }

        assert_eq!(registry.resolve("Event 2"), 2);
        assert_eq!(registry.resolve("Event 1"), 1);
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.resolve("Event 4"), 4);
    }

    #[rstest]
    fn test_empty_registry() {
        let registry: DimensionRegistry<String> = DimensionRegistry::with_capacity(128);
        assert_eq!(registry.is_empty(), true);
        assert_eq!(registry.len(), 0);
        assert_eq!(registry.get("missing"), None);
    }

    #[rstest]
    fn test_get_does_not_assign() {
        let mut registry: DimensionRegistry<String> = DimensionRegistry::new();
        assert_eq!(registry.get("a"), None);
        assert_eq!(registry.contains_key("a"), false);
        assert_eq!(registry.is_empty(), true);

        registry.resolve("a".to_string());
        assert_eq!(registry.get("a"), Some(1));
        assert_eq!(registry.contains_key("a"), true);
    }

    #[rstest]
    fn test_apply_writes_to_vector() {
        let mut registry = DimensionRegistry::new();
        let mut vector = SparseVector::new();

        registry.apply(&mut vector, "b", 2.0);
        registry.apply(&mut vector, "a", 1.0);
        registry.apply(&mut vector, "b", 0.5);

        assert_eq!(vector.get(1), Some(2.5));
        assert_eq!(vector.get(2), Some(1.0));
        assert_eq!(vector.to_string(), "Vector{1:2.5000, 2:1.0000}");
    }

    #[rstest]
    fn test_apply_zero_still_assigns_dimension() {
        let mut registry = DimensionRegistry::new();
        let mut vector = SparseVector::new();

        registry.apply(&mut vector, "a", 0.0);

        assert_eq!(registry.get("a"), Some(1));
        assert_eq!(vector.is_empty(), true);
    }

    #[rstest]
    fn test_keys_in_dimension_order() {
        let mut registry = DimensionRegistry::new();
        for key in ["z", "a", "m", "a"] {
            registry.resolve(key);
        }
        assert_eq!(registry.keys(), vec![&"z", &"a", &"m"]);
    }

    #[rstest]
    fn test_to_dense_spans_registry() {
        let mut registry = DimensionRegistry::new();
        let mut vector = SparseVector::new();

        registry.resolve("a");
        registry.apply(&mut vector, "b", 2.0);
        registry.resolve("c");

        assert_eq!(registry.to_dense(&vector), vec![0.0, 2.0, 0.0]);
    }
}
