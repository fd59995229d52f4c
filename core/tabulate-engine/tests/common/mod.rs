//! FILENAME: tests/common/mod.rs
//! Fixtures and assertion helpers for tabulation integration tests.

#![allow(dead_code)]

use tabulate_engine::{ContingencyTable, Level, ProportionTable};

pub const EPS: f64 = 1e-9;

// ============================================================================
// FIXTURES
// ============================================================================

/// Survey answers: region, product preference, satisfaction (1-5, None = unanswered)
/// and a sampling weight.
pub struct SurveyFixture;

impl SurveyFixture {
    pub fn data() -> Vec<(&'static str, &'static str, Option<i32>, f64)> {
        vec![
            ("North", "Widget", Some(4), 1.0),
            ("North", "Widget", Some(5), 1.5),
            ("North", "Gadget", Some(3), 0.5),
            ("North", "Gadget", None, 1.0),
            ("South", "Widget", Some(2), 2.0),
            ("South", "Widget", Some(4), 1.0),
            ("South", "Gadget", Some(4), 1.0),
            ("South", "Gadget", Some(5), 0.5),
            ("East", "Widget", None, 1.0),
            ("East", "Widget", Some(3), 1.0),
            ("East", "Gadget", Some(1), 2.0),
            ("East", "Gadget", Some(4), 1.5),
        ]
    }

    pub fn regions() -> Vec<Option<&'static str>> {
        Self::data().into_iter().map(|(r, _, _, _)| Some(r)).collect()
    }

    pub fn products() -> Vec<Option<&'static str>> {
        Self::data().into_iter().map(|(_, p, _, _)| Some(p)).collect()
    }

    pub fn satisfaction() -> Vec<Option<i32>> {
        Self::data().into_iter().map(|(_, _, s, _)| s).collect()
    }

    pub fn weights() -> Vec<f64> {
        Self::data().into_iter().map(|(_, _, _, w)| w).collect()
    }
}

// ============================================================================
// ASSERTION HELPERS
// ============================================================================

/// Assert that the cell at `labels` holds `expected`.
pub fn assert_count(table: &ContingencyTable, labels: &[Level<tabulate_engine::Datum>], expected: f64) {
    match table.lookup(labels) {
        Some(actual) => assert!(
            (actual - expected).abs() < EPS,
            "cell {:?} expected {} but got {}",
            labels,
            expected,
            actual
        ),
        None => panic!("cell {:?} not found in table", labels),
    }
}

/// Assert that the proportion at `labels` holds `expected`.
pub fn assert_proportion(table: &ProportionTable, labels: &[Level<tabulate_engine::Datum>], expected: f64) {
    match table.lookup(labels) {
        Some(actual) => assert!(
            (actual - expected).abs() < EPS,
            "proportion {:?} expected {} but got {}",
            labels,
            expected,
            actual
        ),
        None => panic!("proportion {:?} not found in table", labels),
    }
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPS,
        "expected {} but got {}",
        expected,
        actual
    );
}
