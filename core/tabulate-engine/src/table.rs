//! FILENAME: core/tabulate-engine/src/table.rs
//! Table Results - immutable dense tables plus their provenance metadata.
//!
//! Two result kinds share the same axis model:
//! - `ContingencyTable`: integer (unweighted) or real (weighted) counts
//! - `ProportionTable`: real proportions plus the normalization used
//!
//! Derivations never mutate a result; they build a new one.

use serde::Serialize;
use smallvec::SmallVec;

use crate::proportion::Normalization;
use crate::value::{Datum, Level, ValueType};

// ============================================================================
// DENSE STORAGE
// ============================================================================

/// A cell type that can be accumulated and read back as a real number.
pub trait Tally: Copy + Default + PartialEq + std::ops::AddAssign {
    fn to_f64(self) -> f64;
}

impl Tally for u64 {
    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl Tally for f64 {
    fn to_f64(self) -> f64 {
        self
    }
}

/// Row-major dense storage for a one- or two-dimensional table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dense<N> {
    shape: SmallVec<[usize; 2]>,
    data: Vec<N>,
}

impl<N: Copy + Default> Dense<N> {
    /// A zero-filled table of the given shape.
    pub fn zeros(shape: &[usize]) -> Self {
        let len = shape.iter().product();
        Dense {
            shape: SmallVec::from_slice(shape),
            data: vec![N::default(); len],
        }
    }
}

impl<N: Copy> Dense<N> {
    pub(crate) fn from_parts(shape: SmallVec<[usize; 2]>, data: Vec<N>) -> Self {
        debug_assert_eq!(shape.iter().product::<usize>(), data.len());
        Dense { shape, data }
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn ndims(&self) -> usize {
        self.shape.len()
    }

    pub fn as_slice(&self) -> &[N] {
        &self.data
    }

    /// Number of columns; a one-dimensional table is treated as a single row.
    fn row_len(&self) -> usize {
        if self.shape.len() == 2 {
            self.shape[1]
        } else {
            self.data.len()
        }
    }

    /// Cell at a multi-dimensional index.
    pub fn get(&self, index: &[usize]) -> Option<N> {
        if index.len() != self.shape.len() {
            return None;
        }
        let mut flat = 0;
        for (&i, &extent) in index.iter().zip(self.shape.iter()) {
            if i >= extent {
                return None;
            }
            flat = flat * extent + i;
        }
        self.data.get(flat).copied()
    }

    pub(crate) fn slot_mut(&mut self, flat: usize) -> &mut N {
        &mut self.data[flat]
    }

    pub fn map<M: Copy, F: Fn(N) -> M>(&self, f: F) -> Dense<M> {
        Dense {
            shape: self.shape.clone(),
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Rows of a two-dimensional table (a one-dimensional table is one row).
    pub fn rows(&self) -> impl Iterator<Item = &[N]> + '_ {
        let width = self.row_len();
        let height = if self.shape.len() == 2 { self.shape[0] } else { 1 };
        (0..height).map(move |r| &self.data[r * width..(r + 1) * width])
    }
}

impl<N: Tally> Dense<N> {
    /// Sum of every cell.
    pub fn total(&self) -> f64 {
        self.data.iter().map(|&v| v.to_f64()).sum()
    }

    /// Sum of each row (over the columns). One value for a 1-D table.
    pub fn row_sums(&self) -> Vec<f64> {
        self.rows()
            .map(|row| row.iter().map(|&v| v.to_f64()).sum())
            .collect()
    }

    /// Sum of each column (over the rows). Equals the cells for a 1-D table.
    pub fn column_sums(&self) -> Vec<f64> {
        let mut sums = vec![0.0; self.row_len()];
        for row in self.rows() {
            for (sum, &v) in sums.iter_mut().zip(row) {
                *sum += v.to_f64();
            }
        }
        sums
    }

    pub fn to_real(&self) -> Dense<f64> {
        self.map(Tally::to_f64)
    }
}

// ============================================================================
// COUNTS
// ============================================================================

/// Numeric type of a table's counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CountType {
    Integer,
    Real,
}

/// Count storage: integers when unweighted, reals when weighted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CountTable {
    Integer(Dense<u64>),
    Real(Dense<f64>),
}

impl CountTable {
    pub fn count_type(&self) -> CountType {
        match self {
            CountTable::Integer(_) => CountType::Integer,
            CountTable::Real(_) => CountType::Real,
        }
    }

    pub fn shape(&self) -> &[usize] {
        match self {
            CountTable::Integer(d) => d.shape(),
            CountTable::Real(d) => d.shape(),
        }
    }

    pub fn get(&self, index: &[usize]) -> Option<f64> {
        match self {
            CountTable::Integer(d) => d.get(index).map(Tally::to_f64),
            CountTable::Real(d) => d.get(index),
        }
    }

    pub fn total(&self) -> f64 {
        match self {
            CountTable::Integer(d) => d.total(),
            CountTable::Real(d) => d.total(),
        }
    }

    pub fn row_sums(&self) -> Vec<f64> {
        match self {
            CountTable::Integer(d) => d.row_sums(),
            CountTable::Real(d) => d.row_sums(),
        }
    }

    pub fn column_sums(&self) -> Vec<f64> {
        match self {
            CountTable::Integer(d) => d.column_sums(),
            CountTable::Real(d) => d.column_sums(),
        }
    }

    pub fn to_real(&self) -> Dense<f64> {
        match self {
            CountTable::Integer(d) => d.to_real(),
            CountTable::Real(d) => d.clone(),
        }
    }

    pub fn as_integer(&self) -> Option<&Dense<u64>> {
        match self {
            CountTable::Integer(d) => Some(d),
            CountTable::Real(_) => None,
        }
    }

    pub fn as_real(&self) -> Option<&Dense<f64>> {
        match self {
            CountTable::Integer(_) => None,
            CountTable::Real(d) => Some(d),
        }
    }
}

// ============================================================================
// AXIS METADATA
// ============================================================================

/// One table dimension: its labels and where they came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    /// Optional dimension name (e.g. the source column name).
    pub name: Option<String>,
    /// Domain entries in table order, including a trailing `Missing` when present.
    pub labels: Vec<Level<Datum>>,
    pub value_type: ValueType,
    /// Declared levels, when the source carried a fixed domain.
    pub levels: Option<Vec<Datum>>,
    /// Whether the declared levels encode a rank order.
    pub ordered: bool,
}

impl Axis {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn position(&self, label: &Level<Datum>) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }
}

pub type Axes = SmallVec<[Axis; 2]>;

fn locate(axes: &Axes, labels: &[Level<Datum>]) -> Option<SmallVec<[usize; 2]>> {
    if labels.len() != axes.len() {
        return None;
    }
    axes.iter()
        .zip(labels)
        .map(|(axis, label)| axis.position(label))
        .collect()
}

// ============================================================================
// CONTINGENCY TABLE
// ============================================================================

/// Counts over one or two dimensions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContingencyTable {
    axes: Axes,
    counts: CountTable,
    weighted: bool,
}

impl ContingencyTable {
    pub(crate) fn new(axes: Axes, counts: CountTable, weighted: bool) -> Self {
        debug_assert_eq!(
            axes.iter().map(Axis::len).collect::<Vec<_>>(),
            counts.shape().to_vec()
        );
        ContingencyTable {
            axes,
            counts,
            weighted,
        }
    }

    pub fn ndims(&self) -> usize {
        self.axes.len()
    }

    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }

    pub fn axis(&self, dim: usize) -> Option<&Axis> {
        self.axes.get(dim)
    }

    pub fn counts(&self) -> &CountTable {
        &self.counts
    }

    pub fn count_type(&self) -> CountType {
        self.counts.count_type()
    }

    pub fn is_weighted(&self) -> bool {
        self.weighted
    }

    pub fn value_types(&self) -> Vec<ValueType> {
        self.axes.iter().map(|a| a.value_type).collect()
    }

    /// Declared levels of a dimension (None when undeclared or out of range).
    pub fn levels(&self, dim: usize) -> Option<&[Datum]> {
        self.axes.get(dim).and_then(|a| a.levels.as_deref())
    }

    pub fn is_ordered(&self, dim: usize) -> bool {
        self.axes.get(dim).map(|a| a.ordered).unwrap_or(false)
    }

    pub fn shape(&self) -> &[usize] {
        self.counts.shape()
    }

    /// Count at a position index.
    pub fn get(&self, index: &[usize]) -> Option<f64> {
        self.counts.get(index)
    }

    /// Count for a combination of labels, one per dimension.
    pub fn lookup(&self, labels: &[Level<Datum>]) -> Option<f64> {
        locate(&self.axes, labels).and_then(|index| self.counts.get(&index))
    }

    pub fn total(&self) -> f64 {
        self.counts.total()
    }

    pub fn row_sums(&self) -> Vec<f64> {
        self.counts.row_sums()
    }

    pub fn column_sums(&self) -> Vec<f64> {
        self.counts.column_sums()
    }

    pub(crate) fn axes_owned(&self) -> Axes {
        self.axes.clone()
    }
}

// ============================================================================
// PROPORTION TABLE
// ============================================================================

/// Proportions over the same axes as the contingency table they came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProportionTable {
    axes: Axes,
    proportions: Dense<f64>,
    normalization: Normalization,
    weighted: bool,
}

impl ProportionTable {
    pub(crate) fn new(
        axes: Axes,
        proportions: Dense<f64>,
        normalization: Normalization,
        weighted: bool,
    ) -> Self {
        ProportionTable {
            axes,
            proportions,
            normalization,
            weighted,
        }
    }

    pub fn ndims(&self) -> usize {
        self.axes.len()
    }

    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }

    pub fn axis(&self, dim: usize) -> Option<&Axis> {
        self.axes.get(dim)
    }

    pub fn proportions(&self) -> &Dense<f64> {
        &self.proportions
    }

    pub fn normalization(&self) -> Normalization {
        self.normalization
    }

    /// Proportions are always real-valued.
    pub fn count_type(&self) -> CountType {
        CountType::Real
    }

    pub fn is_weighted(&self) -> bool {
        self.weighted
    }

    pub fn value_types(&self) -> Vec<ValueType> {
        self.axes.iter().map(|a| a.value_type).collect()
    }

    pub fn levels(&self, dim: usize) -> Option<&[Datum]> {
        self.axes.get(dim).and_then(|a| a.levels.as_deref())
    }

    pub fn is_ordered(&self, dim: usize) -> bool {
        self.axes.get(dim).map(|a| a.ordered).unwrap_or(false)
    }

    pub fn shape(&self) -> &[usize] {
        self.proportions.shape()
    }

    pub fn get(&self, index: &[usize]) -> Option<f64> {
        self.proportions.get(index)
    }

    pub fn lookup(&self, labels: &[Level<Datum>]) -> Option<f64> {
        locate(&self.axes, labels).and_then(|index| self.proportions.get(&index))
    }

    pub fn total(&self) -> f64 {
        self.proportions.total()
    }

    pub fn row_sums(&self) -> Vec<f64> {
        self.proportions.row_sums()
    }

    pub fn column_sums(&self) -> Vec<f64> {
        self.proportions.column_sums()
    }
}
