//! FILENAME: core/tabulate-engine/src/domain.rs
//! Value Domain - the canonical, stable ordering of one dimension's values.
//!
//! Resolution rules:
//! - Declared levels win: the domain is the level sequence as declared.
//! - Otherwise the distinct non-missing observations, sorted ascending
//!   (or in first-seen order when requested).
//! - A single trailing `Missing` entry is appended iff missing values are kept
//!   and at least one observation is missing.
//!
//! Every entry maps to its 0-based position through a hash index keyed by
//! `Level<K>`, so aggregation lookups are O(1).

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::categorical::Levels;
use crate::value::{Datum, DomainKey, HasUnderlyingValue, Level};

/// How undeclared domains are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainOrder {
    /// Ascending by the key's natural order.
    #[default]
    Sorted,
    /// Order of first appearance in the observations.
    FirstSeen,
}

/// The ordered, duplicate-free values of one table dimension.
#[derive(Debug, Clone)]
pub struct ValueDomain<K: DomainKey> {
    values: Vec<Level<K>>,
    index: FxHashMap<Level<K>, usize>,
    declared: bool,
}

impl<K: DomainKey> ValueDomain<K> {
    /// Resolves the domain of `observations`, honoring declared `levels`.
    pub fn resolve<V>(
        observations: &[Option<V>],
        levels: Option<&Levels<K>>,
        exclude_missing: bool,
        order: DomainOrder,
    ) -> Self
    where
        V: HasUnderlyingValue<Underlying = K>,
        K: Ord,
    {
        if let Some(levels) = levels {
            return Self::from_levels(observations, levels, exclude_missing);
        }

        match order {
            DomainOrder::FirstSeen => Self::resolve_first_seen(observations, None, exclude_missing),
            DomainOrder::Sorted => {
                let mut seen: FxHashSet<&K> = FxHashSet::default();
                let mut has_missing = false;
                for obs in observations {
                    match obs {
                        Some(v) => {
                            seen.insert(v.underlying());
                        }
                        None => has_missing = true,
                    }
                }

                let mut values: Vec<K> = seen.into_iter().cloned().collect();
                values.sort();
                Self::build(values, has_missing && !exclude_missing, false)
            }
        }
    }

    /// Resolves a domain in first-seen order. This is the fallback for key
    /// types without a natural total order: it needs only equality and hashing.
    pub fn resolve_first_seen<V>(
        observations: &[Option<V>],
        levels: Option<&Levels<K>>,
        exclude_missing: bool,
    ) -> Self
    where
        V: HasUnderlyingValue<Underlying = K>,
    {
        if let Some(levels) = levels {
            return Self::from_levels(observations, levels, exclude_missing);
        }

        let mut seen: FxHashSet<&K> = FxHashSet::default();
        let mut values = Vec::new();
        let mut has_missing = false;
        for obs in observations {
            match obs {
                Some(v) => {
                    let key = v.underlying();
                    if seen.insert(key) {
                        values.push(key.clone());
                    }
                }
                None => has_missing = true,
            }
        }

        Self::build(values, has_missing && !exclude_missing, false)
    }

    fn from_levels<V>(observations: &[Option<V>], levels: &Levels<K>, exclude_missing: bool) -> Self {
        let has_missing = !exclude_missing && observations.iter().any(Option::is_none);
        Self::build(levels.values().to_vec(), has_missing, true)
    }

    fn build(values: Vec<K>, append_missing: bool, declared: bool) -> Self {
        let mut levels: Vec<Level<K>> = values.into_iter().map(Level::Value).collect();
        if append_missing {
            levels.push(Level::Missing);
        }

        let mut index = FxHashMap::default();
        index.reserve(levels.len());
        for (i, level) in levels.iter().enumerate() {
            index.insert(level.clone(), i);
        }

        ValueDomain {
            values: levels,
            index,
            declared,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[Level<K>] {
        &self.values
    }

    /// Whether the domain came from declared levels.
    pub fn is_declared(&self) -> bool {
        self.declared
    }

    pub fn has_missing(&self) -> bool {
        matches!(self.values.last(), Some(Level::Missing))
    }

    pub fn index_of(&self, level: &Level<K>) -> Option<usize> {
        self.index.get(level).copied()
    }

    /// Slot for one observation (`None` = missing).
    pub fn position(&self, value: Option<&K>) -> Option<usize> {
        match value {
            Some(key) => self.index.get(&Level::Value(key.clone())).copied(),
            None => self.index.get(&Level::Missing).copied(),
        }
    }

    /// Type-erased copy of the entries, for result axes.
    pub fn labels(&self) -> Vec<Level<Datum>> {
        self.values
            .iter()
            .map(|level| match level {
                Level::Value(k) => Level::Value(k.to_datum()),
                Level::Missing => Level::Missing,
            })
            .collect()
    }
}
