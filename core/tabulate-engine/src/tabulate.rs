//! FILENAME: core/tabulate-engine/src/tabulate.rs
//! Tabulation requests - the public entry points.
//!
//! A request names its sources explicitly: `OneWay` for a single variable,
//! `TwoWay` for a cross-tabulation of two variables (whose key types may differ).
//! Each carries its own weights, names and options:
//!
//! validate -> resolve domains -> aggregate -> ContingencyTable
//!
//! `proportions` composes the same steps with a proportion derivation.

use serde::{Deserialize, Serialize};
use smallvec::smallvec;

use crate::aggregate::{tally_one, tally_two, validate};
use crate::domain::{DomainOrder, ValueDomain};
use crate::error::TabulateResult;
use crate::logging::{log_debug, log_enter, log_exit, CATEGORY};
use crate::proportion::{proportion_table, Normalization};
use crate::source::{ValueSource, Weights};
use crate::table::{Axis, ContingencyTable, ProportionTable};
use crate::value::{DomainKey, HasUnderlyingValue};

// ============================================================================
// OPTIONS
// ============================================================================

/// Options shared by every tabulation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TabulateOptions {
    /// Drop observations with a missing member instead of counting them in
    /// a trailing missing bucket.
    pub skip_missing: bool,

    /// Ordering of undeclared domains.
    pub order: DomainOrder,
}

fn resolve_domain<S>(
    source: &S,
    options: &TabulateOptions,
) -> ValueDomain<<S::Item as HasUnderlyingValue>::Underlying>
where
    S: ValueSource + ?Sized,
    <S::Item as HasUnderlyingValue>::Underlying: Ord,
{
    ValueDomain::resolve(
        source.observations(),
        source.levels(),
        options.skip_missing,
        options.order,
    )
}

fn axis_for<S, K>(source: &S, domain: &ValueDomain<K>, name: Option<String>) -> Axis
where
    S: ValueSource + ?Sized,
    S::Item: HasUnderlyingValue<Underlying = K>,
    K: DomainKey,
{
    let levels = source.levels();
    Axis {
        name,
        labels: domain.labels(),
        value_type: source.value_type(),
        levels: levels.map(|l| l.values().iter().map(DomainKey::to_datum).collect()),
        ordered: levels.map(|l| l.is_ordered()).unwrap_or(false),
    }
}

// ============================================================================
// ONE-WAY REQUEST
// ============================================================================

/// Frequency table of a single variable.
#[derive(Debug, Clone)]
pub struct OneWay<'a, S: ?Sized> {
    source: &'a S,
    weights: Option<Weights<'a>>,
    name: Option<String>,
    options: TabulateOptions,
}

impl<'a, S: ?Sized> OneWay<'a, S> {
    pub fn new(source: &'a S) -> Self {
        OneWay {
            source,
            weights: None,
            name: None,
            options: TabulateOptions::default(),
        }
    }

    pub fn weights(mut self, weights: impl Into<Weights<'a>>) -> Self {
        self.weights = Some(weights.into());
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn skip_missing(mut self, skip: bool) -> Self {
        self.options.skip_missing = skip;
        self
    }

    pub fn order(mut self, order: DomainOrder) -> Self {
        self.options.order = order;
        self
    }

    pub fn options(mut self, options: TabulateOptions) -> Self {
        self.options = options;
        self
    }
}

impl<'a, S> OneWay<'a, S>
where
    S: ValueSource + ?Sized,
    <S::Item as HasUnderlyingValue>::Underlying: Ord,
{
    /// Builds the contingency table.
    pub fn tabulate(&self) -> TabulateResult<ContingencyTable> {
        let observations = self.source.observations();
        log_enter!(
            CATEGORY,
            "OneWay::tabulate",
            "n={} weighted={} skip_missing={}",
            observations.len(),
            self.weights.is_some(),
            self.options.skip_missing
        );

        validate(&[observations.len()], self.weights.as_ref())?;

        let domain = resolve_domain(self.source, &self.options);
        log_debug!(CATEGORY, "resolved domain of {} values", domain.len());

        let counts = tally_one(
            observations,
            self.weights.as_ref(),
            &domain,
            self.options.skip_missing,
        )?;

        let axis = axis_for(self.source, &domain, self.name.clone());
        let table = ContingencyTable::new(smallvec![axis], counts, self.weights.is_some());
        log_exit!(CATEGORY, "OneWay::tabulate", "total={}", table.total());
        Ok(table)
    }

    /// Builds the contingency table and derives proportions from it.
    pub fn proportions(&self, normalization: Normalization) -> TabulateResult<ProportionTable> {
        Ok(proportion_table(&self.tabulate()?, normalization))
    }
}

// ============================================================================
// TWO-WAY REQUEST
// ============================================================================

/// Cross-tabulation of two variables: `rows` indexes dimension 1, `cols` dimension 2.
#[derive(Debug, Clone)]
pub struct TwoWay<'a, R: ?Sized, C: ?Sized> {
    rows: &'a R,
    cols: &'a C,
    weights: Option<Weights<'a>>,
    names: [Option<String>; 2],
    options: TabulateOptions,
}

impl<'a, R: ?Sized, C: ?Sized> TwoWay<'a, R, C> {
    pub fn new(rows: &'a R, cols: &'a C) -> Self {
        TwoWay {
            rows,
            cols,
            weights: None,
            names: [None, None],
            options: TabulateOptions::default(),
        }
    }

    pub fn weights(mut self, weights: impl Into<Weights<'a>>) -> Self {
        self.weights = Some(weights.into());
        self
    }

    pub fn named(mut self, rows: impl Into<String>, cols: impl Into<String>) -> Self {
        self.names = [Some(rows.into()), Some(cols.into())];
        self
    }

    pub fn skip_missing(mut self, skip: bool) -> Self {
        self.options.skip_missing = skip;
        self
    }

    pub fn order(mut self, order: DomainOrder) -> Self {
        self.options.order = order;
        self
    }

    pub fn options(mut self, options: TabulateOptions) -> Self {
        self.options = options;
        self
    }
}

impl<'a, R, C> TwoWay<'a, R, C>
where
    R: ValueSource + ?Sized,
    C: ValueSource + ?Sized,
    <R::Item as HasUnderlyingValue>::Underlying: Ord,
    <C::Item as HasUnderlyingValue>::Underlying: Ord,
{
    /// Builds the two-dimensional contingency table.
    pub fn tabulate(&self) -> TabulateResult<ContingencyTable> {
        let rows = self.rows.observations();
        let cols = self.cols.observations();
        log_enter!(
            CATEGORY,
            "TwoWay::tabulate",
            "n={} weighted={} skip_missing={}",
            rows.len(),
            self.weights.is_some(),
            self.options.skip_missing
        );

        validate(&[rows.len(), cols.len()], self.weights.as_ref())?;

        let row_domain = resolve_domain(self.rows, &self.options);
        let col_domain = resolve_domain(self.cols, &self.options);
        log_debug!(
            CATEGORY,
            "resolved domains of {} x {} values",
            row_domain.len(),
            col_domain.len()
        );

        let counts = tally_two(
            rows,
            cols,
            self.weights.as_ref(),
            &row_domain,
            &col_domain,
            self.options.skip_missing,
        )?;

        let [row_name, col_name] = self.names.clone();
        let axes = smallvec![
            axis_for(self.rows, &row_domain, row_name),
            axis_for(self.cols, &col_domain, col_name),
        ];
        let table = ContingencyTable::new(axes, counts, self.weights.is_some());
        log_exit!(CATEGORY, "TwoWay::tabulate", "total={}", table.total());
        Ok(table)
    }

    /// Builds the table and derives proportions from it.
    pub fn proportions(&self, normalization: Normalization) -> TabulateResult<ProportionTable> {
        Ok(proportion_table(&self.tabulate()?, normalization))
    }
}
