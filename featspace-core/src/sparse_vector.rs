use std::cell::Cell;
use std::fmt;

use fxhash::FxHashMap as HashMap;
use log::debug;

use crate::errors::{Operand, VectorError, VectorResult};

#[derive(Debug, Clone, Copy, PartialEq)]
enum MagnitudeCache {
    Invalid,
    Valid(f64),
}

/// A sparse vector of accumulated feature values.
///
/// Each stored dimension maps to the running sum of every non-zero delta
/// written to it. The L2 norm is computed lazily and cached until the next
/// mutation.
///
/// Dimension numbers only mean something relative to the registry that
/// assigned them. Comparing vectors built from different registries is not
/// detected.
#[derive(Debug, Clone)]
pub struct SparseVector {
    coordinates: HashMap<u32, f64>,
    magnitude: Cell<MagnitudeCache>,
}

impl Default for SparseVector {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for SparseVector {
    fn eq(&self, other: &Self) -> bool {
        self.coordinates == other.coordinates
    }
}

impl SparseVector {
    /// Create an empty sparse vector.
    pub fn new() -> Self {
        SparseVector {
            coordinates: HashMap::default(),
            magnitude: Cell::new(MagnitudeCache::Invalid),
        }
    }

    ///
    /// Accumulate `value` into `dimension`.
    ///
    /// A zero `value` is ignored entirely: no entry is created and the
    /// cached magnitude is left untouched. Offsetting deltas may still bring a
    /// stored value to exactly zero, in which case the entry stays.
    ///
    pub fn add(&mut self, dimension: u32, value: f64) {
        if value == 0.0 {
            return;
        }

        *self.coordinates.entry(dimension).or_insert(0.0) += value;
        self.invalidate();
    }

    /// Remove a dimension. Absent dimensions are a no-op.
    pub fn delete(&mut self, dimension: u32) {
        if self.coordinates.remove(&dimension).is_some() {
            self.invalidate();
        }
    }

    ///
    /// The L2 norm of the vector.
    ///
    /// Recomputed only when the vector changed since the last call.
    ///
    pub fn magnitude(&self) -> f64 {
        if let MagnitudeCache::Valid(magnitude) = self.magnitude.get() {
            return magnitude;
        }

        let magnitude = self
            .coordinates
            .values()
            .map(|value| value * value)
            .sum::<f64>()
            .sqrt();
        self.magnitude.set(MagnitudeCache::Valid(magnitude));

        magnitude
    }

    ///
    /// Dot product with another vector.
    ///
    /// Iterates whichever operand stores fewer entries (`self` on a tie) and
    /// probes the other, so the cost is O(min(|a|, |b|)).
    ///
    pub fn dot_product(&self, other: &SparseVector) -> f64 {
        let (small, large) = if self.coordinates.len() <= other.coordinates.len() {
            (self, other)
        } else {
            (other, self)
        };

        small
            .coordinates
            .iter()
            .filter_map(|(dimension, value)| {
                large
                    .coordinates
                    .get(dimension)
                    .map(|other_value| value * other_value)
            })
            .sum()
    }

    ///
    /// Cosine similarity with another vector.
    ///
    /// # Errors
    /// - `VectorError::ZeroMagnitude(Operand::First)` if `self` has zero magnitude
    /// - `VectorError::ZeroMagnitude(Operand::Second)` if `other` has zero magnitude
    ///
    pub fn cosine_similarity(&self, other: &SparseVector) -> VectorResult<f64> {
        let magnitude = self.magnitude();
        if magnitude == 0.0 {
            return Err(VectorError::ZeroMagnitude(Operand::First));
        }

        let other_magnitude = other.magnitude();
        if other_magnitude == 0.0 {
            return Err(VectorError::ZeroMagnitude(Operand::Second));
        }

        Ok(self.dot_product(other) / (magnitude * other_magnitude))
    }

    /// Multiply every stored value by `scalar`. Entries are kept even when `scalar` is zero.
    pub fn scale(&mut self, scalar: f64) {
        for value in self.coordinates.values_mut() {
            *value *= scalar;
        }
        self.invalidate();
    }

    /// Scale the vector to unit magnitude. A zero vector is left unchanged.
    pub fn normalize(&mut self) {
        let magnitude = self.magnitude();
        if magnitude == 0.0 {
            debug!("skipping normalization of zero-magnitude vector");
            return;
        }
        self.scale(1.0 / magnitude);
    }

    /// Returns the stored value of a dimension, if any.
    pub fn get(&self, dimension: u32) -> Option<f64> {
        self.coordinates.get(&dimension).copied()
    }

    pub fn contains(&self, dimension: u32) -> bool {
        self.coordinates.contains_key(&dimension)
    }

    /// Returns the number of stored entries, including entries whose value cancelled to zero.
    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    /// Returns true if the vector has no entries.
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// The highest stored dimension.
    pub fn max_dimension(&self) -> Option<u32> {
        self.coordinates.keys().max().copied()
    }

    /// Stored `(dimension, value)` pairs in ascending dimension order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        let mut entries: Vec<(u32, f64)> = self
            .coordinates
            .iter()
            .map(|(dimension, value)| (*dimension, *value))
            .collect();
        entries.sort_unstable_by_key(|(dimension, _)| *dimension);
        entries.into_iter()
    }

    /// Whether the magnitude is currently cached.
    pub fn is_magnitude_cached(&self) -> bool {
        matches!(self.magnitude.get(), MagnitudeCache::Valid(_))
    }

    ///
    /// Expand into a dense vector with `dimensions` slots.
    ///
    /// Slot `i` holds dimension `i + 1`, since dimension 0 is never assigned.
    /// Missing dimensions are zero-filled and stored dimensions outside
    /// `1..=dimensions` are dropped.
    ///
    pub fn to_dense(&self, dimensions: usize) -> Vec<f64> {
        let mut dense = vec![0.0; dimensions];
        let mut dropped = 0;

        for (dimension, value) in &self.coordinates {
            let slot = (*dimension as usize)
                .checked_sub(1)
                .and_then(|index| dense.get_mut(index));
            match slot {
                Some(slot) => *slot = *value,
                None => dropped += 1,
            }
        }

        if dropped > 0 {
            debug!("dropped {dropped} dimensions outside 1..={dimensions} when densifying");
        }

        dense
    }

    fn invalidate(&mut self) {
        self.magnitude.set(MagnitudeCache::Invalid);
    }
}

impl Extend<(u32, f64)> for SparseVector {
    fn extend<T: IntoIterator<Item = (u32, f64)>>(&mut self, iter: T) {
        for (dimension, value) in iter {
            self.add(dimension, value);
        }
    }
}

impl FromIterator<(u32, f64)> for SparseVector {
    fn from_iter<T: IntoIterator<Item = (u32, f64)>>(iter: T) -> Self {
        let mut vector = SparseVector::new();
        vector.extend(iter);
        vector
    }
}

impl fmt::Display for SparseVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector{{")?;
        for (i, (dimension, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{dimension}:{value:.4}")?;
        }
        write!(f, "}}")
    }
}
