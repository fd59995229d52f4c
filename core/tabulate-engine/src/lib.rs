//! FILENAME: core/tabulate-engine/src/lib.rs
//! Tabulation engine: contingency tables over one or two discrete variables.
//!
//! Given one or two observation sequences (optionally weighted), the engine
//! resolves each variable's value domain, counts co-occurrences into a dense
//! table and derives proportion and expected-frequency tables from it.
//!
//! Layers:
//! - `value` / `categorical`: domain keys, declared levels, categorical columns
//! - `source`: what can be tabulated (slices, categorical columns, weights)
//! - `domain`: canonical per-dimension value ordering
//! - `aggregate`: validation and one-pass counting
//! - `table`: result types (what we return)
//! - `proportion` / `expected`: derived tables
//! - `tabulate`: request builders tying it together

pub mod logging;

pub mod error;
pub mod value;
pub mod categorical;
pub mod source;
pub mod domain;
pub mod aggregate;
pub mod table;
pub mod proportion;
pub mod expected;
pub mod tabulate;

pub use error::{TabulateError, TabulateResult};
pub use value::{Datum, DomainKey, HasUnderlyingValue, Level, OrderedFloat, ValueType};
pub use categorical::{Categorical, CategoricalColumn, Levels};
pub use source::{Tagged, ValueSource, Weights};
pub use domain::{DomainOrder, ValueDomain};
pub use aggregate::{aggregate_one, aggregate_two, merge_counts, validate};
pub use table::{Axis, ContingencyTable, CountTable, CountType, Dense, ProportionTable, Tally};
pub use proportion::{proportion_table, Normalization};
pub use expected::expected_frequency;
pub use tabulate::{OneWay, TabulateOptions, TwoWay};
