//! FILENAME: core/tabulate-engine/src/source.rs
//! Observation and weight sources consumed by the engine.
//!
//! The engine only needs read access to an ordered sequence of optional values
//! (None = missing) and, optionally, the fixed domain the values are drawn from.

use crate::categorical::{Categorical, CategoricalColumn, Levels};
use crate::value::{DomainKey, HasUnderlyingValue, ValueType};

/// A finite, ordered sequence of observations of one value type.
pub trait ValueSource {
    type Item: HasUnderlyingValue;

    fn observations(&self) -> &[Option<Self::Item>];

    /// The declared sample space, if the source has one.
    fn levels(&self) -> Option<&Levels<<Self::Item as HasUnderlyingValue>::Underlying>> {
        None
    }

    fn value_type(&self) -> ValueType {
        <<Self::Item as HasUnderlyingValue>::Underlying as DomainKey>::VALUE_TYPE
    }
}

impl<T: HasUnderlyingValue> ValueSource for [Option<T>] {
    type Item = T;

    fn observations(&self) -> &[Option<T>] {
        self
    }
}

impl<T: HasUnderlyingValue> ValueSource for Vec<Option<T>> {
    type Item = T;

    fn observations(&self) -> &[Option<T>] {
        self
    }
}

impl<T: HasUnderlyingValue, const N: usize> ValueSource for [Option<T>; N] {
    type Item = T;

    fn observations(&self) -> &[Option<T>] {
        self
    }
}

impl<K: DomainKey> ValueSource for CategoricalColumn<K> {
    type Item = Categorical<K>;

    fn observations(&self) -> &[Option<Categorical<K>>] {
        self.values()
    }

    fn levels(&self) -> Option<&Levels<K>> {
        Some(CategoricalColumn::levels(self))
    }
}

/// A source that overrides the declared value type of an inner observation slice.
/// Used by adapters whose storage is type-erased (e.g. `Datum` columns).
#[derive(Debug, Clone, Copy)]
pub struct Tagged<'a, T: HasUnderlyingValue> {
    observations: &'a [Option<T>],
    levels: Option<&'a Levels<T::Underlying>>,
    value_type: ValueType,
}

impl<'a, T: HasUnderlyingValue> Tagged<'a, T> {
    pub fn new(observations: &'a [Option<T>], value_type: ValueType) -> Self {
        Tagged {
            observations,
            levels: None,
            value_type,
        }
    }

    pub fn with_levels(mut self, levels: &'a Levels<T::Underlying>) -> Self {
        self.levels = Some(levels);
        self
    }
}

impl<'a, T: HasUnderlyingValue> ValueSource for Tagged<'a, T> {
    type Item = T;

    fn observations(&self) -> &[Option<T>] {
        self.observations
    }

    fn levels(&self) -> Option<&Levels<T::Underlying>> {
        self.levels
    }

    fn value_type(&self) -> ValueType {
        self.value_type
    }
}

// ============================================================================
// WEIGHTS
// ============================================================================

/// Borrowed observation weights, one per observation.
#[derive(Debug, Clone, Copy)]
pub enum Weights<'a> {
    Dense(&'a [f64]),
    /// A missing weight counts as zero.
    Nullable(&'a [Option<f64>]),
}

impl<'a> Weights<'a> {
    pub fn len(&self) -> usize {
        match self {
            Weights::Dense(w) => w.len(),
            Weights::Nullable(w) => w.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The raw weight at `index`; `None` when missing.
    pub fn raw(&self, index: usize) -> Option<f64> {
        match self {
            Weights::Dense(w) => w.get(index).copied(),
            Weights::Nullable(w) => w.get(index).copied().flatten(),
        }
    }

    /// The effective weight at `index` (missing counts as zero).
    pub fn at(&self, index: usize) -> f64 {
        self.raw(index).unwrap_or(0.0)
    }
}

impl<'a> From<&'a [f64]> for Weights<'a> {
    fn from(w: &'a [f64]) -> Self {
        Weights::Dense(w)
    }
}

impl<'a> From<&'a [Option<f64>]> for Weights<'a> {
    fn from(w: &'a [Option<f64>]) -> Self {
        Weights::Nullable(w)
    }
}

impl<'a> From<&'a Vec<f64>> for Weights<'a> {
    fn from(w: &'a Vec<f64>) -> Self {
        Weights::Dense(w.as_slice())
    }
}

impl<'a> From<&'a Vec<Option<f64>>> for Weights<'a> {
    fn from(w: &'a Vec<Option<f64>>) -> Self {
        Weights::Nullable(w.as_slice())
    }
}
