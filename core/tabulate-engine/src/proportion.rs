//! FILENAME: core/tabulate-engine/src/proportion.rs
//! Proportion derivation - counts divided by a grand, row or column total.
//!
//! A one-dimensional table has a single axis, so every normalization reduces
//! to dividing by the grand total.
//!
//! A zero row or column total is divided by as-is and yields NaN cells.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{TabulateError, TabulateResult};
use crate::logging::{log_debug, CATEGORY};
use crate::table::{ContingencyTable, Dense, ProportionTable};

/// Which total a proportion divides by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Normalization {
    /// Divide by the grand total.
    #[default]
    Total,
    /// Divide each cell by its row total.
    Row,
    /// Divide each cell by its column total.
    Column,
}

impl Normalization {
    pub fn as_str(&self) -> &'static str {
        match self {
            Normalization::Total => "none",
            Normalization::Row => "row",
            Normalization::Column => "col",
        }
    }
}

impl FromStr for Normalization {
    type Err = TabulateError;

    fn from_str(s: &str) -> TabulateResult<Self> {
        match s {
            "none" => Ok(Normalization::Total),
            "row" => Ok(Normalization::Row),
            "col" => Ok(Normalization::Column),
            other => Err(TabulateError::invalid_argument(format!(
                "normalization must be one of none, row, col; got {:?}",
                other
            ))),
        }
    }
}

impl TryFrom<String> for Normalization {
    type Error = TabulateError;

    fn try_from(value: String) -> TabulateResult<Self> {
        value.parse()
    }
}

impl From<Normalization> for String {
    fn from(value: Normalization) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Normalization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derives proportions from a contingency table.
pub fn proportion_table(table: &ContingencyTable, normalization: Normalization) -> ProportionTable {
    log_debug!(
        CATEGORY,
        "proportion_table dims={} normalization={}",
        table.ndims(),
        normalization
    );

    let counts = table.counts().to_real();
    let proportions = if table.ndims() < 2 {
        divide_by_total(&counts)
    } else {
        match normalization {
            Normalization::Total => divide_by_total(&counts),
            Normalization::Row => divide_by_rows(&counts),
            Normalization::Column => divide_by_columns(&counts),
        }
    };

    ProportionTable::new(
        table.axes_owned(),
        proportions,
        normalization,
        table.is_weighted(),
    )
}

fn divide_by_total(counts: &Dense<f64>) -> Dense<f64> {
    let total = counts.total();
    counts.map(|v| v / total)
}

fn divide_by_rows(counts: &Dense<f64>) -> Dense<f64> {
    let totals = counts.row_sums();
    let data = counts
        .rows()
        .zip(&totals)
        .flat_map(|(row, &total)| row.iter().map(move |&v| v / total))
        .collect();
    Dense::from_parts(counts.shape().into(), data)
}

fn divide_by_columns(counts: &Dense<f64>) -> Dense<f64> {
    let totals = counts.column_sums();
    let data = counts
        .rows()
        .flat_map(|row| row.iter().zip(&totals).map(|(&v, &total)| v / total))
        .collect();
    Dense::from_parts(counts.shape().into(), data)
}

impl ContingencyTable {
    /// Shorthand for [`proportion_table`].
    pub fn proportions(&self, normalization: Normalization) -> ProportionTable {
        proportion_table(self, normalization)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tabulate::{OneWay, TwoWay};

    const EPS: f64 = 1e-9;

    #[test]
    fn test_parse_literals() {
        assert_eq!("none".parse::<Normalization>().unwrap(), Normalization::Total);
        assert_eq!("row".parse::<Normalization>().unwrap(), Normalization::Row);
        assert_eq!("col".parse::<Normalization>().unwrap(), Normalization::Column);
    }

    #[test]
    fn test_parse_rejects_other_values() {
        for bad in ["bogus", "ROW", "column", ""] {
            let err = bad.parse::<Normalization>().unwrap_err();
            assert!(matches!(err, TabulateError::InvalidArgument(_)), "{}", bad);
        }
    }

    #[test]
    fn test_one_dimensional_ignores_axis() {
        let x = vec![Some(1), Some(2), Some(2), Some(3), Some(3), Some(3)];
        let table = OneWay::new(&x).tabulate().unwrap();

        let total = table.proportions(Normalization::Total);
        let row = table.proportions(Normalization::Row);
        let col = table.proportions(Normalization::Column);

        assert_eq!(total.proportions(), row.proportions());
        assert_eq!(total.proportions(), col.proportions());
        assert_eq!(row.normalization(), Normalization::Row);
        assert!((total.total() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_row_and_column_normalization() {
        let x = vec![Some("a"), Some("a"), Some("a"), Some("b")];
        let y = vec![Some(1), Some(2), Some(2), Some(2)];
        let table = TwoWay::new(&x, &y).tabulate().unwrap();

        let by_row = table.proportions(Normalization::Row);
        for sum in by_row.row_sums() {
            assert!((sum - 1.0).abs() < EPS);
        }
        assert!((by_row.get(&[0, 0]).unwrap() - 1.0 / 3.0).abs() < EPS);

        let by_col = table.proportions(Normalization::Column);
        for sum in by_col.column_sums() {
            assert!((sum - 1.0).abs() < EPS);
        }
        assert!((by_col.get(&[1, 1]).unwrap() - 1.0 / 3.0).abs() < EPS);
    }

    #[test]
    fn test_zero_row_total_yields_nan() {
        // "b" is only paired with a missing y, so its row is all zeros once missing is skipped.
        let x = vec![Some("a"), Some("b")];
        let y = vec![Some(1), None];
        let table = TwoWay::new(&x, &y).skip_missing(true).tabulate().unwrap();
        assert_eq!(table.shape(), &[2, 1]);

        let by_row = table.proportions(Normalization::Row);
        assert_eq!(by_row.get(&[0, 0]), Some(1.0));
        assert!(by_row.get(&[1, 0]).unwrap().is_nan());
    }

    #[test]
    fn test_serde_uses_literals() {
        let json = serde_json::to_string(&Normalization::Column).unwrap();
        assert_eq!(json, "\"col\"");
        let parsed: Normalization = serde_json::from_str("\"row\"").unwrap();
        assert_eq!(parsed, Normalization::Row);
        assert!(serde_json::from_str::<Normalization>("\"bogus\"").is_err());
    }
}
