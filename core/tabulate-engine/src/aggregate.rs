//! FILENAME: core/tabulate-engine/src/aggregate.rs
//! Aggregator - one pass over the observations into a dense count table.
//!
//! Validation runs first and fails fast:
//! - every observation sequence is non-empty
//! - all sequences (and the weights) have the same length
//! - every present weight is finite and non-negative
//!
//! Counting then walks the (paired) observations once. Each retained
//! observation is resolved to its domain slot and bumps the cell by 1
//! (unweighted, integer counts) or by its weight (weighted, real counts).
//! Cells start at zero, so the table shape depends only on the domains.

use crate::domain::ValueDomain;
use crate::error::{TabulateError, TabulateResult};
use crate::logging::{log_warn, CATEGORY};
use crate::source::Weights;
use crate::table::{CountTable, Dense, Tally};
use crate::value::{DomainKey, HasUnderlyingValue};

// ============================================================================
// VALIDATION
// ============================================================================

/// Checks sequence lengths and weights. Shared by both arities.
pub fn validate(lengths: &[usize], weights: Option<&Weights<'_>>) -> TabulateResult<()> {
    for (dimension, &len) in lengths.iter().enumerate() {
        if len == 0 {
            return Err(TabulateError::EmptyInput { dimension });
        }
    }

    let expected = match lengths.first() {
        Some(&len) => len,
        None => return Err(TabulateError::EmptyInput { dimension: 0 }),
    };

    for &actual in &lengths[1..] {
        if actual != expected {
            return Err(TabulateError::LengthMismatch {
                what: "observation sequence",
                expected,
                actual,
            });
        }
    }

    if let Some(weights) = weights {
        if weights.len() != expected {
            return Err(TabulateError::LengthMismatch {
                what: "weight vector",
                expected,
                actual: weights.len(),
            });
        }
        for index in 0..weights.len() {
            if let Some(weight) = weights.raw(index) {
                if weight < 0.0 {
                    return Err(TabulateError::NegativeWeight { index, weight });
                }
                if !weight.is_finite() {
                    return Err(TabulateError::NonFiniteWeight { index, weight });
                }
            }
        }
    }

    Ok(())
}

// ============================================================================
// COUNTING
// ============================================================================

fn slot<K: DomainKey>(
    domain: &ValueDomain<K>,
    key: Option<&K>,
    index: usize,
) -> TabulateResult<usize> {
    domain.position(key).ok_or_else(|| {
        log_warn!(CATEGORY, "observation {} is outside its declared levels", index);
        TabulateError::UnknownLevel {
            index,
            value: format!("{:?}", key),
        }
    })
}

fn count_one<V, K, N, F>(
    observations: &[Option<V>],
    domain: &ValueDomain<K>,
    exclude_missing: bool,
    weight: F,
) -> TabulateResult<Dense<N>>
where
    V: HasUnderlyingValue<Underlying = K>,
    K: DomainKey,
    N: Tally,
    F: Fn(usize) -> N,
{
    let mut counts = Dense::zeros(&[domain.len()]);
    for (i, obs) in observations.iter().enumerate() {
        let key = obs.as_ref().map(HasUnderlyingValue::underlying);
        if exclude_missing && key.is_none() {
            continue;
        }
        *counts.slot_mut(slot(domain, key, i)?) += weight(i);
    }
    Ok(counts)
}

fn count_two<V1, V2, K1, K2, N, F>(
    rows: &[Option<V1>],
    cols: &[Option<V2>],
    row_domain: &ValueDomain<K1>,
    col_domain: &ValueDomain<K2>,
    exclude_missing: bool,
    weight: F,
) -> TabulateResult<Dense<N>>
where
    V1: HasUnderlyingValue<Underlying = K1>,
    V2: HasUnderlyingValue<Underlying = K2>,
    K1: DomainKey,
    K2: DomainKey,
    N: Tally,
    F: Fn(usize) -> N,
{
    let width = col_domain.len();
    let mut counts = Dense::zeros(&[row_domain.len(), width]);
    for (i, (r, c)) in rows.iter().zip(cols).enumerate() {
        let r = r.as_ref().map(HasUnderlyingValue::underlying);
        let c = c.as_ref().map(HasUnderlyingValue::underlying);
        if exclude_missing && (r.is_none() || c.is_none()) {
            continue;
        }
        let flat = slot(row_domain, r, i)? * width + slot(col_domain, c, i)?;
        *counts.slot_mut(flat) += weight(i);
    }
    Ok(counts)
}

/// Counts already-validated one-dimensional observations.
pub(crate) fn tally_one<V, K>(
    observations: &[Option<V>],
    weights: Option<&Weights<'_>>,
    domain: &ValueDomain<K>,
    exclude_missing: bool,
) -> TabulateResult<CountTable>
where
    V: HasUnderlyingValue<Underlying = K>,
    K: DomainKey,
{
    match weights {
        Some(w) => count_one(observations, domain, exclude_missing, |i| w.at(i)).map(CountTable::Real),
        None => count_one(observations, domain, exclude_missing, |_| 1u64).map(CountTable::Integer),
    }
}

/// Counts already-validated paired observations.
pub(crate) fn tally_two<V1, V2, K1, K2>(
    rows: &[Option<V1>],
    cols: &[Option<V2>],
    weights: Option<&Weights<'_>>,
    row_domain: &ValueDomain<K1>,
    col_domain: &ValueDomain<K2>,
    exclude_missing: bool,
) -> TabulateResult<CountTable>
where
    V1: HasUnderlyingValue<Underlying = K1>,
    V2: HasUnderlyingValue<Underlying = K2>,
    K1: DomainKey,
    K2: DomainKey,
{
    match weights {
        Some(w) => count_two(rows, cols, row_domain, col_domain, exclude_missing, |i| w.at(i))
            .map(CountTable::Real),
        None => count_two(rows, cols, row_domain, col_domain, exclude_missing, |_| 1u64)
            .map(CountTable::Integer),
    }
}

/// Validates then counts one sequence over `domain`.
pub fn aggregate_one<V, K>(
    observations: &[Option<V>],
    weights: Option<Weights<'_>>,
    domain: &ValueDomain<K>,
    exclude_missing: bool,
) -> TabulateResult<CountTable>
where
    V: HasUnderlyingValue<Underlying = K>,
    K: DomainKey,
{
    validate(&[observations.len()], weights.as_ref())?;
    tally_one(observations, weights.as_ref(), domain, exclude_missing)
}

/// Validates then counts paired sequences over `row_domain` x `col_domain`.
pub fn aggregate_two<V1, V2, K1, K2>(
    rows: &[Option<V1>],
    cols: &[Option<V2>],
    weights: Option<Weights<'_>>,
    row_domain: &ValueDomain<K1>,
    col_domain: &ValueDomain<K2>,
    exclude_missing: bool,
) -> TabulateResult<CountTable>
where
    V1: HasUnderlyingValue<Underlying = K1>,
    V2: HasUnderlyingValue<Underlying = K2>,
    K1: DomainKey,
    K2: DomainKey,
{
    validate(&[rows.len(), cols.len()], weights.as_ref())?;
    tally_two(rows, cols, weights.as_ref(), row_domain, col_domain, exclude_missing)
}

/// Sums partial tables built over the same domains (e.g. one per partition of
/// a large input). Cell accumulation is commutative, so the order of parts
/// does not matter.
pub fn merge_counts(parts: &[CountTable]) -> Option<CountTable> {
    let (first, rest) = parts.split_first()?;
    let mut merged = first.clone();
    for part in rest {
        if part.shape() != merged.shape() {
            return None;
        }
        merged = match (merged, part) {
            (CountTable::Integer(a), CountTable::Integer(b)) => CountTable::Integer(add(&a, b)),
            (a, b) => CountTable::Real(add(&a.to_real(), &b.to_real())),
        };
    }
    Some(merged)
}

fn add<N: Tally>(a: &Dense<N>, b: &Dense<N>) -> Dense<N> {
    let data = a
        .as_slice()
        .iter()
        .zip(b.as_slice())
        .map(|(&x, &y)| {
            let mut sum = x;
            sum += y;
            sum
        })
        .collect();
    Dense::from_parts(a.shape().into(), data)
}
