//! FILENAME: core/tabulate-engine/src/categorical.rs
//! Categorical columns - values drawn from a declared, fixed set of levels.
//!
//! A categorical source declares its whole sample space up front. Tables built
//! from it keep every declared level, in declaration order, even when a level
//! was never observed.

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::error::{TabulateError, TabulateResult};
use crate::value::{DomainKey, HasUnderlyingValue};

// ============================================================================
// LEVELS
// ============================================================================

/// A declared, duplicate-free level sequence.
#[derive(Debug, Clone, Serialize)]
pub struct Levels<K: DomainKey> {
    values: Vec<K>,
    /// Whether the declaration order is a meaningful rank order.
    ordered: bool,
    #[serde(skip)]
    positions: FxHashMap<K, u32>,
}

impl<K: DomainKey> Levels<K> {
    /// Declares levels in the given order. Fails on the first repeated level.
    pub fn new(values: Vec<K>, ordered: bool) -> TabulateResult<Self> {
        let mut positions = FxHashMap::default();
        positions.reserve(values.len());
        for (i, value) in values.iter().enumerate() {
            if positions.insert(value.clone(), i as u32).is_some() {
                return Err(TabulateError::DuplicateLevel(format!("{:?}", value)));
            }
        }
        Ok(Levels {
            values,
            ordered,
            positions,
        })
    }

    /// Levels whose order is an arbitrary but fixed label order.
    pub fn unordered(values: Vec<K>) -> TabulateResult<Self> {
        Self::new(values, false)
    }

    /// Levels whose order encodes a rank.
    pub fn ordered(values: Vec<K>) -> TabulateResult<Self> {
        Self::new(values, true)
    }

    pub fn values(&self) -> &[K] {
        &self.values
    }

    pub fn is_ordered(&self) -> bool {
        self.ordered
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Position of a level in declaration order.
    pub fn code_of(&self, value: &K) -> Option<u32> {
        self.positions.get(value).copied()
    }
}

impl<K: DomainKey> PartialEq for Levels<K> {
    fn eq(&self, other: &Self) -> bool {
        self.ordered == other.ordered && self.values == other.values
    }
}

// ============================================================================
// CATEGORICAL VALUE
// ============================================================================

/// One categorical observation: its level code and the level itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Categorical<K> {
    code: u32,
    level: K,
}

impl<K> Categorical<K> {
    pub fn code(&self) -> u32 {
        self.code
    }

    pub fn level(&self) -> &K {
        &self.level
    }
}

impl<K: DomainKey> HasUnderlyingValue for Categorical<K> {
    type Underlying = K;

    fn underlying(&self) -> &K {
        &self.level
    }
}

// ============================================================================
// CATEGORICAL COLUMN
// ============================================================================

/// A column of optional categorical values sharing one level declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoricalColumn<K: DomainKey> {
    levels: Levels<K>,
    values: Vec<Option<Categorical<K>>>,
}

impl<K: DomainKey> CategoricalColumn<K> {
    pub fn new(levels: Levels<K>) -> Self {
        CategoricalColumn {
            levels,
            values: Vec::new(),
        }
    }

    /// Builds a column from raw values, checking each against the levels.
    pub fn from_values<I>(levels: Levels<K>, values: I) -> TabulateResult<Self>
    where
        I: IntoIterator<Item = Option<K>>,
    {
        let mut column = Self::new(levels);
        for value in values {
            column.push(value)?;
        }
        Ok(column)
    }

    /// Appends one observation (`None` = missing).
    pub fn push(&mut self, value: Option<K>) -> TabulateResult<()> {
        let entry = match value {
            None => None,
            Some(level) => match self.levels.code_of(&level) {
                Some(code) => Some(Categorical { code, level }),
                None => {
                    return Err(TabulateError::UnknownLevel {
                        index: self.values.len(),
                        value: format!("{:?}", level),
                    })
                }
            },
        };
        self.values.push(entry);
        Ok(())
    }

    pub fn levels(&self) -> &Levels<K> {
        &self.levels
    }

    pub fn values(&self) -> &[Option<Categorical<K>>] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
