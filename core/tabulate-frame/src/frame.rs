//! FILENAME: core/tabulate-frame/src/frame.rs
//! Named, equally long columns of optional values.
//!
//! Columns keep their native storage. For tabulation every column is viewed
//! as a sequence of `Datum` keys tagged with the column's own value type, so
//! any two columns can be crossed without a per-type dispatch.

use std::borrow::Cow;

use serde::Serialize;
use tabulate_engine::logging::log_debug;
use tabulate_engine::{
    CategoricalColumn, ContingencyTable, Datum, Levels, OneWay, OrderedFloat, TabulateOptions,
    Tagged, TwoWay, ValueType, Weights,
};

use crate::error::{FrameError, FrameResult};
use crate::CATEGORY;

// ============================================================================
// COLUMN
// ============================================================================

/// One column's storage. `None` marks a missing value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Column {
    Integer(Vec<Option<i64>>),
    Number(Vec<Option<OrderedFloat>>),
    Text(Vec<Option<String>>),
    Boolean(Vec<Option<bool>>),
    Categorical(CategoricalColumn<Datum>),
    Mixed(Vec<Option<Datum>>),
}

impl Column {
    pub fn integers<I: IntoIterator<Item = Option<i64>>>(values: I) -> Self {
        Column::Integer(values.into_iter().collect())
    }

    pub fn numbers<I: IntoIterator<Item = Option<f64>>>(values: I) -> Self {
        Column::Number(values.into_iter().map(|v| v.map(OrderedFloat)).collect())
    }

    pub fn text<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        Column::Text(values.into_iter().map(|v| v.map(Into::into)).collect())
    }

    pub fn booleans<I: IntoIterator<Item = Option<bool>>>(values: I) -> Self {
        Column::Boolean(values.into_iter().collect())
    }

    /// Categorical column over declared `levels`. Fails with `UnknownLevel`
    /// when a value is not one of them.
    pub fn categorical<I, V>(levels: Levels<Datum>, values: I) -> FrameResult<Self>
    where
        I: IntoIterator<Item = Option<V>>,
        V: Into<Datum>,
    {
        let column =
            CategoricalColumn::from_values(levels, values.into_iter().map(|v| v.map(Into::into)))?;
        Ok(Column::Categorical(column))
    }

    pub fn len(&self) -> usize {
        match self {
            Column::Integer(v) => v.len(),
            Column::Number(v) => v.len(),
            Column::Text(v) => v.len(),
            Column::Boolean(v) => v.len(),
            Column::Categorical(c) => c.len(),
            Column::Mixed(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The value type recorded on result axes built from this column.
    /// A categorical column reports the common type of its levels.
    pub fn value_type(&self) -> ValueType {
        match self {
            Column::Integer(_) => ValueType::Integer,
            Column::Number(_) => ValueType::Float,
            Column::Text(_) => ValueType::Text,
            Column::Boolean(_) => ValueType::Boolean,
            Column::Categorical(c) => common_type(c.levels().values()),
            Column::Mixed(_) => ValueType::Mixed,
        }
    }

    pub fn levels(&self) -> Option<&Levels<Datum>> {
        match self {
            Column::Categorical(c) => Some(c.levels()),
            _ => None,
        }
    }

    /// The column as type-erased keys. Borrowed for `Mixed`, converted otherwise.
    pub fn datums(&self) -> Cow<'_, [Option<Datum>]> {
        fn convert<T, F: Fn(&T) -> Datum>(values: &[Option<T>], f: F) -> Vec<Option<Datum>> {
            values.iter().map(|v| v.as_ref().map(&f)).collect()
        }

        match self {
            Column::Mixed(v) => Cow::Borrowed(v.as_slice()),
            Column::Integer(v) => Cow::Owned(convert(v, |&i| Datum::Integer(i))),
            Column::Number(v) => Cow::Owned(convert(v, |&n| Datum::Number(n))),
            Column::Text(v) => Cow::Owned(convert(v, |s| Datum::Text(s.clone()))),
            Column::Boolean(v) => Cow::Owned(convert(v, |&b| Datum::Boolean(b))),
            Column::Categorical(c) => Cow::Owned(
                c.values()
                    .iter()
                    .map(|v| v.as_ref().map(|cat| cat.level().clone()))
                    .collect(),
            ),
        }
    }

    /// Numeric view for weight extraction.
    fn as_weights(&self) -> Option<Vec<Option<f64>>> {
        match self {
            Column::Integer(v) => Some(v.iter().map(|w| w.map(|i| i as f64)).collect()),
            Column::Number(v) => Some(v.iter().map(|w| w.map(|n| n.as_f64())).collect()),
            _ => None,
        }
    }
}

fn common_type(values: &[Datum]) -> ValueType {
    let mut types = values.iter().map(Datum::value_type);
    match types.next() {
        Some(first) if types.all(|t| t == first) => first,
        _ => ValueType::Mixed,
    }
}

// ============================================================================
// FRAME
// ============================================================================

/// Ordered collection of named columns sharing one row count.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Frame {
    columns: Vec<(String, Column)>,
}

impl Frame {
    pub fn new() -> Self {
        Frame::default()
    }

    /// Builder form of [`Frame::add_column`].
    pub fn with_column(mut self, name: impl Into<String>, column: Column) -> FrameResult<Self> {
        self.add_column(name, column)?;
        Ok(self)
    }

    pub fn add_column(&mut self, name: impl Into<String>, column: Column) -> FrameResult<()> {
        let name = name.into();
        if self.position(&name).is_some() {
            return Err(FrameError::DuplicateColumn(name));
        }
        if let Some((_, first)) = self.columns.first() {
            if first.len() != column.len() {
                return Err(FrameError::ColumnLength {
                    name,
                    expected: first.len(),
                    actual: column.len(),
                });
            }
        }
        self.columns.push((name, column));
        Ok(())
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|(n, _)| n == name)
    }

    pub fn column(&self, name: &str) -> FrameResult<&Column> {
        self.position(name)
            .map(|i| &self.columns[i].1)
            .ok_or_else(|| FrameError::UnknownColumn(name.to_string()))
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(|(n, _)| n.as_str())
    }

    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    pub fn nrows(&self) -> usize {
        self.columns.first().map(|(_, c)| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Weights from a numeric column; a missing entry counts as zero.
    pub fn weights(&self, name: &str) -> FrameResult<Vec<Option<f64>>> {
        self.column(name)?
            .as_weights()
            .ok_or_else(|| FrameError::NonNumericWeights(name.to_string()))
    }

    // ========================================================================
    // TABULATION
    // ========================================================================

    /// Frequency table of one column.
    pub fn tabulate(
        &self,
        rows: &str,
        weights: Option<&str>,
        options: TabulateOptions,
    ) -> FrameResult<ContingencyTable> {
        self.crosstab(rows, None, weights, options)
    }

    /// Contingency table of `rows` (crossed with `cols` when given).
    pub fn crosstab(
        &self,
        rows: &str,
        cols: Option<&str>,
        weights: Option<&str>,
        options: TabulateOptions,
    ) -> FrameResult<ContingencyTable> {
        log_debug!(
            CATEGORY,
            "crosstab rows={} cols={:?} weights={:?} nrows={}",
            rows,
            cols,
            weights,
            self.nrows()
        );

        let row_column = self.column(rows)?;
        let col_column = cols.map(|name| self.column(name)).transpose()?;
        let weights = weights.map(|name| self.weights(name)).transpose()?;

        let row_keys = row_column.datums();
        let row_source = tagged(row_column, &row_keys);

        let table = match cols.zip(col_column) {
            Some((col_name, col_column)) => {
                let col_keys = col_column.datums();
                let col_source = tagged(col_column, &col_keys);
                let mut request = TwoWay::new(&row_source, &col_source)
                    .named(rows, col_name)
                    .options(options);
                if let Some(w) = &weights {
                    request = request.weights(Weights::from(w));
                }
                request.tabulate()?
            }
            None => {
                let mut request = OneWay::new(&row_source).named(rows).options(options);
                if let Some(w) = &weights {
                    request = request.weights(Weights::from(w));
                }
                request.tabulate()?
            }
        };
        Ok(table)
    }
}

fn tagged<'a>(column: &'a Column, keys: &'a [Option<Datum>]) -> Tagged<'a, Datum> {
    let source = Tagged::new(keys, column.value_type());
    match column.levels() {
        Some(levels) => source.with_levels(levels),
        None => source,
    }
}
