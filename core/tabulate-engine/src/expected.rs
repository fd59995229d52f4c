//! FILENAME: core/tabulate-engine/src/expected.rs
//! Expected frequencies under row/column independence.
//!
//! expected(i, j) = row_total(i) * column_total(j) / grand_total
//!
//! The result keeps the input's axes and every marginal. A one-dimensional
//! table has no independence model and comes back unchanged. An all-zero
//! table divides by zero and yields NaN cells.

use crate::logging::{log_debug, CATEGORY};
use crate::table::{ContingencyTable, CountTable, Dense};

/// Expected counts for a two-dimensional table.
pub fn expected_frequency(table: &ContingencyTable) -> ContingencyTable {
    if table.ndims() < 2 {
        log_debug!(CATEGORY, "expected_frequency on a 1-D table returns the input");
        return table.clone();
    }

    let rows = table.row_sums();
    let cols = table.column_sums();
    let total = table.total();
    log_debug!(
        CATEGORY,
        "expected_frequency shape={:?} total={}",
        table.shape(),
        total
    );

    let data = rows
        .iter()
        .flat_map(|&r| cols.iter().map(move |&c| r * c / total))
        .collect();
    let expected = Dense::from_parts(table.shape().into(), data);

    ContingencyTable::new(
        table.axes_owned(),
        CountTable::Real(expected),
        table.is_weighted(),
    )
}

impl ContingencyTable {
    /// Shorthand for [`expected_frequency`].
    pub fn expected(&self) -> ContingencyTable {
        expected_frequency(self)
    }
}
