//! FILENAME: core/tabulate-frame/src/query.rs
//! Serializable description of a tabulation over frame columns.
//!
//! A `FrameQuery` names the columns to use and carries the engine options, so
//! a caller can ship it as JSON and run it against any frame with those columns.

use serde::{Deserialize, Serialize};
use tabulate_engine::logging::{log_enter, log_exit};
use tabulate_engine::{ContingencyTable, Normalization, ProportionTable, TabulateOptions};

use crate::error::FrameResult;
use crate::frame::Frame;
use crate::CATEGORY;

/// Which columns to tabulate and how.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameQuery {
    /// Column indexing the first dimension.
    pub rows: String,
    /// Column indexing the second dimension, for a cross-tabulation.
    #[serde(default)]
    pub cols: Option<String>,
    /// Numeric column holding per-row weights.
    #[serde(default)]
    pub weights: Option<String>,
    #[serde(default)]
    pub options: TabulateOptions,
    /// Normalization used by [`FrameQuery::proportions`].
    #[serde(default)]
    pub normalization: Normalization,
}

impl FrameQuery {
    pub fn new(rows: impl Into<String>) -> Self {
        FrameQuery {
            rows: rows.into(),
            cols: None,
            weights: None,
            options: TabulateOptions::default(),
            normalization: Normalization::default(),
        }
    }

    pub fn by(mut self, cols: impl Into<String>) -> Self {
        self.cols = Some(cols.into());
        self
    }

    pub fn weighted_by(mut self, weights: impl Into<String>) -> Self {
        self.weights = Some(weights.into());
        self
    }

    pub fn options(mut self, options: TabulateOptions) -> Self {
        self.options = options;
        self
    }

    pub fn normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }

    /// Contingency table of the named columns.
    pub fn counts(&self, frame: &Frame) -> FrameResult<ContingencyTable> {
        log_enter!(CATEGORY, "FrameQuery::counts", "rows={} cols={:?}", self.rows, self.cols);
        let table = frame.crosstab(
            &self.rows,
            self.cols.as_deref(),
            self.weights.as_deref(),
            self.options,
        )?;
        log_exit!(CATEGORY, "FrameQuery::counts", "shape={:?}", table.shape());
        Ok(table)
    }

    /// Proportions under the query's normalization.
    pub fn proportions(&self, frame: &Frame) -> FrameResult<ProportionTable> {
        Ok(self.counts(frame)?.proportions(self.normalization))
    }

    /// Expected frequencies under independence of the two columns.
    pub fn expected(&self, frame: &Frame) -> FrameResult<ContingencyTable> {
        Ok(self.counts(frame)?.expected())
    }
}
