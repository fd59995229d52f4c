//! FILENAME: core/tabulate-engine/src/value.rs
//! Value keys - hashable, ordered representations of observed values.
//!
//! Observations arrive as arbitrary typed values. The engine needs three things
//! from them:
//! - Equality and hashing (to find each value's slot in O(1))
//! - A natural total order (to sort a domain ascending)
//! - A type-erased label (`Datum`) for the finished table axes
//!
//! `Level` wraps a key with an explicit `Missing` variant so a real value can
//! never collide with the missing bucket.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

// ============================================================================
// ORDERED FLOAT
// ============================================================================

/// Wrapper around f64 that implements Eq, Ord and Hash for use as domain keys.
/// NaN values are equal to each other and sort after every number.
/// `-0.0` and `0.0` are the same key.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OrderedFloat(pub f64);

impl OrderedFloat {
    pub fn as_f64(&self) -> f64 {
        self.0
    }
}

impl PartialEq for OrderedFloat {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OrderedFloat {}

impl PartialOrd for OrderedFloat {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderedFloat {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.0.is_nan(), other.0.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            // Neither is NaN, so partial_cmp always succeeds.
            (false, false) => self.0.partial_cmp(&other.0).unwrap_or(Ordering::Equal),
        }
    }
}

impl Hash for OrderedFloat {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if self.0.is_nan() {
            // All NaN values hash to the same thing
            u64::MAX.hash(state);
        } else if self.0 == 0.0 {
            0u64.hash(state);
        } else {
            self.0.to_bits().hash(state);
        }
    }
}

impl From<f64> for OrderedFloat {
    fn from(value: f64) -> Self {
        OrderedFloat(value)
    }
}

// ============================================================================
// DATUM
// ============================================================================

/// A type-erased axis label. Result tables store their labels as `Datum` so
/// one- and two-dimensional tables share one representation regardless of
/// the key types they were built from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Datum {
    Integer(i64),
    Number(OrderedFloat),
    Text(String),
    Boolean(bool),
}

impl Datum {
    fn rank(&self) -> u8 {
        match self {
            Datum::Integer(_) | Datum::Number(_) => 0,
            Datum::Text(_) => 1,
            Datum::Boolean(_) => 2,
        }
    }

    /// Numeric view of the label, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Datum::Integer(i) => Some(*i as f64),
            Datum::Number(n) => Some(n.0),
            _ => None,
        }
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            Datum::Integer(_) => ValueType::Integer,
            Datum::Number(_) => ValueType::Float,
            Datum::Text(_) => ValueType::Text,
            Datum::Boolean(_) => ValueType::Boolean,
        }
    }
}

impl PartialOrd for Datum {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Datum {
    /// Numbers < Text < Booleans. Integers and floats compare numerically;
    /// on a numeric tie the integer sorts first so the order stays consistent with Eq.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Datum::Integer(a), Datum::Integer(b)) => a.cmp(b),
            (Datum::Number(a), Datum::Number(b)) => a.cmp(b),
            (Datum::Integer(a), Datum::Number(b)) => OrderedFloat(*a as f64)
                .cmp(b)
                .then(Ordering::Less),
            (Datum::Number(a), Datum::Integer(b)) => a
                .cmp(&OrderedFloat(*b as f64))
                .then(Ordering::Greater),
            (Datum::Text(a), Datum::Text(b)) => a.cmp(b),
            (Datum::Boolean(a), Datum::Boolean(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Datum::Integer(i) => write!(f, "{}", i),
            Datum::Number(n) => write!(f, "{}", n.0),
            Datum::Text(s) => f.write_str(s),
            Datum::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl From<i64> for Datum {
    fn from(value: i64) -> Self {
        Datum::Integer(value)
    }
}

impl From<i32> for Datum {
    fn from(value: i32) -> Self {
        Datum::Integer(value as i64)
    }
}

impl From<f64> for Datum {
    fn from(value: f64) -> Self {
        Datum::Number(OrderedFloat(value))
    }
}

impl From<&str> for Datum {
    fn from(value: &str) -> Self {
        Datum::Text(value.to_string())
    }
}

impl From<String> for Datum {
    fn from(value: String) -> Self {
        Datum::Text(value)
    }
}

impl From<bool> for Datum {
    fn from(value: bool) -> Self {
        Datum::Boolean(value)
    }
}

// ============================================================================
// VALUE TYPE TAG
// ============================================================================

/// The declared value type of one table dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    Integer,
    Float,
    Text,
    Boolean,
    /// Heterogeneous values (e.g. a column of `Datum`).
    Mixed,
}

// ============================================================================
// LEVEL (VALUE OR MISSING)
// ============================================================================

/// One entry of a value domain: a concrete value or the missing bucket.
/// The derived order puts `Missing` after every value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Level<K> {
    Value(K),
    Missing,
}

impl<K> Level<K> {
    pub fn is_missing(&self) -> bool {
        matches!(self, Level::Missing)
    }

    pub fn value(&self) -> Option<&K> {
        match self {
            Level::Value(v) => Some(v),
            Level::Missing => None,
        }
    }
}

impl Level<Datum> {
    /// Shorthand for building lookup labels.
    pub fn of(value: impl Into<Datum>) -> Self {
        Level::Value(value.into())
    }
}

impl<K: fmt::Display> fmt::Display for Level<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Value(v) => v.fmt(f),
            Level::Missing => f.write_str("missing"),
        }
    }
}

// ============================================================================
// KEY TRAITS
// ============================================================================

/// A value usable as a domain key.
pub trait DomainKey: Clone + Eq + Hash + fmt::Debug {
    /// Type tag recorded on the axis built from keys of this type.
    const VALUE_TYPE: ValueType;

    /// Type-erased label for result tables.
    fn to_datum(&self) -> Datum;
}

/// Capability of an observation to expose the raw value it stands for.
/// Plain keys are their own underlying value; categorical values unwrap to their level.
pub trait HasUnderlyingValue {
    type Underlying: DomainKey;

    fn underlying(&self) -> &Self::Underlying;
}

macro_rules! impl_key {
    ($ty:ty, $tag:expr, |$v:ident| $conv:expr) => {
        impl DomainKey for $ty {
            const VALUE_TYPE: ValueType = $tag;

            fn to_datum(&self) -> Datum {
                let $v = self;
                $conv
            }
        }

        impl HasUnderlyingValue for $ty {
            type Underlying = $ty;

            fn underlying(&self) -> &$ty {
                self
            }
        }
    };
}

impl_key!(i8, ValueType::Integer, |v| Datum::Integer(*v as i64));
impl_key!(i16, ValueType::Integer, |v| Datum::Integer(*v as i64));
impl_key!(i32, ValueType::Integer, |v| Datum::Integer(*v as i64));
impl_key!(i64, ValueType::Integer, |v| Datum::Integer(*v));
impl_key!(u8, ValueType::Integer, |v| Datum::Integer(*v as i64));
impl_key!(u16, ValueType::Integer, |v| Datum::Integer(*v as i64));
impl_key!(u32, ValueType::Integer, |v| Datum::Integer(*v as i64));
impl_key!(bool, ValueType::Boolean, |v| Datum::Boolean(*v));
impl_key!(char, ValueType::Text, |v| Datum::Text(v.to_string()));
impl_key!(String, ValueType::Text, |v| Datum::Text(v.clone()));
impl_key!(OrderedFloat, ValueType::Float, |v| Datum::Number(*v));
impl_key!(Datum, ValueType::Mixed, |v| v.clone());

impl<'a> DomainKey for &'a str {
    const VALUE_TYPE: ValueType = ValueType::Text;

    fn to_datum(&self) -> Datum {
        Datum::Text((*self).to_string())
    }
}

impl<'a> HasUnderlyingValue for &'a str {
    type Underlying = &'a str;

    fn underlying(&self) -> &&'a str {
        self
    }
}
