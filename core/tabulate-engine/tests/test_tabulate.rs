//! FILENAME: tests/test_tabulate.rs
//! Integration tests for one-way and two-way tabulation requests.

mod common;

use common::{assert_close, assert_count, assert_proportion, SurveyFixture};
use tabulate_engine::{
    CategoricalColumn, CountType, Datum, DomainOrder, Level, Levels, Normalization, OneWay,
    TabulateError, TabulateOptions, TwoWay, ValueType, Weights,
};

// ============================================================================
// ONE-WAY COUNTS
// ============================================================================

#[test]
fn test_counts_and_proportions() {
    let x = vec![Some(1), Some(2), Some(2), Some(3), Some(3), Some(3)];
    let table = OneWay::new(&x).tabulate().unwrap();

    assert_eq!(table.shape(), &[3]);
    assert_count(&table, &[Level::of(1)], 1.0);
    assert_count(&table, &[Level::of(2)], 2.0);
    assert_count(&table, &[Level::of(3)], 3.0);
    assert_close(table.total(), 6.0);

    let props = OneWay::new(&x).proportions(Normalization::Total).unwrap();
    assert_proportion(&props, &[Level::of(1)], 1.0 / 6.0);
    assert_proportion(&props, &[Level::of(2)], 1.0 / 3.0);
    assert_proportion(&props, &[Level::of(3)], 1.0 / 2.0);
}

#[test]
fn test_missing_bucket_kept_or_skipped() {
    let x = vec![Some(1), Some(2), None, Some(2), Some(3), None];

    let kept = OneWay::new(&x).tabulate().unwrap();
    assert_eq!(
        kept.axis(0).unwrap().labels,
        vec![Level::of(1), Level::of(2), Level::of(3), Level::Missing]
    );
    assert_eq!(kept.counts().as_integer().unwrap().as_slice(), &[1, 2, 1, 2]);

    let skipped = OneWay::new(&x).skip_missing(true).tabulate().unwrap();
    assert_eq!(skipped.shape(), &[3]);
    assert_eq!(skipped.counts().as_integer().unwrap().as_slice(), &[1, 2, 1]);
    assert_close(skipped.total(), 4.0);
}

#[test]
fn test_weighted_counts_are_real() {
    let x = vec![Some(1), Some(2), Some(2), Some(3)];
    let w = vec![2.0, 1.0, 2.0, 1.0];
    let table = OneWay::new(&x).weights(&w).tabulate().unwrap();

    assert!(table.is_weighted());
    assert_eq!(table.count_type(), CountType::Real);
    assert_count(&table, &[Level::of(1)], 2.0);
    assert_count(&table, &[Level::of(2)], 3.0);
    assert_count(&table, &[Level::of(3)], 1.0);
}

#[test]
fn test_nullable_weights_count_zero_when_missing() {
    let x = vec![Some("a"), Some("b"), Some("a")];
    let w: Vec<Option<f64>> = vec![Some(0.5), None, Some(1.5)];
    let table = OneWay::new(&x).weights(&w).tabulate().unwrap();

    assert_count(&table, &[Level::of("a")], 2.0);
    assert_count(&table, &[Level::of("b")], 0.0);
}

#[test]
fn test_text_and_boolean_keys() {
    let answers = vec![Some(true), Some(false), Some(true), None];
    let table = OneWay::new(&answers).tabulate().unwrap();
    assert_eq!(
        table.axis(0).unwrap().labels,
        vec![Level::of(false), Level::of(true), Level::Missing]
    );
    assert_eq!(table.value_types(), vec![ValueType::Boolean]);

    let owned: Vec<Option<String>> = vec![Some("z".into()), Some("a".into())];
    let table = OneWay::new(&owned).tabulate().unwrap();
    assert_eq!(
        table.axis(0).unwrap().labels,
        vec![Level::of("a"), Level::of("z")]
    );
}

// ============================================================================
// TWO-WAY COUNTS
// ============================================================================

#[test]
fn test_balanced_two_way_design() {
    let x1 = vec![Some("A"), Some("A"), Some("B"), Some("B")];
    let x2 = vec![Some(1), Some(2), Some(1), Some(2)];
    let table = TwoWay::new(&x1, &x2).tabulate().unwrap();

    assert_eq!(table.shape(), &[2, 2]);
    assert_eq!(table.counts().as_integer().unwrap().as_slice(), &[1, 1, 1, 1]);

    let expected = table.expected();
    for &cell in expected.counts().as_real().unwrap().as_slice() {
        assert_close(cell, 1.0);
    }
}

#[test]
fn test_survey_cross_tab_marginals() {
    let regions = SurveyFixture::regions();
    let products = SurveyFixture::products();
    let table = TwoWay::new(&regions, &products)
        .named("region", "product")
        .tabulate()
        .unwrap();

    // Sorted: East, North, South x Gadget, Widget
    assert_eq!(table.shape(), &[3, 2]);
    assert_eq!(table.row_sums(), vec![4.0, 4.0, 4.0]);
    assert_eq!(table.column_sums(), vec![6.0, 6.0]);
    assert_count(&table, &[Level::of("South"), Level::of("Widget")], 2.0);
    assert_eq!(table.axis(0).unwrap().name.as_deref(), Some("region"));
}

#[test]
fn test_weighted_cross_tab_with_missing_satisfaction() {
    let regions = SurveyFixture::regions();
    let satisfaction = SurveyFixture::satisfaction();
    let weights = SurveyFixture::weights();

    let kept = TwoWay::new(&regions, &satisfaction)
        .weights(&weights)
        .tabulate()
        .unwrap();
    let last = kept.axis(1).unwrap().labels.last().cloned();
    assert_eq!(last, Some(Level::Missing));
    assert_count(&kept, &[Level::of("North"), Level::Missing], 1.0);
    assert_close(kept.total(), weights.iter().sum());

    let skipped = TwoWay::new(&regions, &satisfaction)
        .weights(&weights)
        .skip_missing(true)
        .tabulate()
        .unwrap();
    assert!(!skipped.axis(1).unwrap().labels.contains(&Level::Missing));
    assert_close(skipped.total(), weights.iter().sum::<f64>() - 2.0);
}

#[test]
fn test_row_proportions_over_survey() {
    let regions = SurveyFixture::regions();
    let products = SurveyFixture::products();
    let props = TwoWay::new(&regions, &products)
        .proportions(Normalization::Row)
        .unwrap();

    assert_eq!(props.normalization(), Normalization::Row);
    for sum in props.row_sums() {
        assert_close(sum, 1.0);
    }
    assert_proportion(&props, &[Level::of("East"), Level::of("Gadget")], 0.5);
}

// ============================================================================
// DECLARED LEVELS
// ============================================================================

#[test]
fn test_categorical_levels_fix_the_domain() {
    let levels = Levels::ordered(vec![1, 2, 3, 4, 5]).unwrap();
    let satisfaction =
        CategoricalColumn::from_values(levels, SurveyFixture::satisfaction()).unwrap();
    let table = OneWay::new(&satisfaction).tabulate().unwrap();

    assert_eq!(table.shape(), &[6]);
    assert!(table.is_ordered(0));
    assert_eq!(table.levels(0).map(|l| l.len()), Some(5));
    assert_count(&table, &[Level::of(4)], 4.0);
    assert_count(&table, &[Level::Missing], 2.0);
}

#[test]
fn test_unobserved_levels_keep_zero_cells() {
    let levels = Levels::unordered(vec!["Widget", "Gadget", "Gizmo"]).unwrap();
    let products =
        CategoricalColumn::from_values(levels, SurveyFixture::products()).unwrap();
    let regions = SurveyFixture::regions();
    let table = TwoWay::new(&regions, &products).tabulate().unwrap();

    assert_eq!(table.shape(), &[3, 3]);
    assert_eq!(
        table.axis(1).unwrap().labels,
        vec![Level::of("Widget"), Level::of("Gadget"), Level::of("Gizmo")]
    );
    assert_eq!(table.column_sums(), vec![6.0, 6.0, 0.0]);
    assert!(!table.is_ordered(1));

    let by_col = table.proportions(Normalization::Column);
    assert!(by_col.get(&[0, 2]).unwrap().is_nan());
}

#[test]
fn test_categorical_push_rejects_unknown_level() {
    let levels = Levels::unordered(vec!["a", "b"]).unwrap();
    let mut column = CategoricalColumn::new(levels);
    column.push(Some("a")).unwrap();
    column.push(None).unwrap();
    let err = column.push(Some("c")).unwrap_err();
    assert!(matches!(err, TabulateError::UnknownLevel { index: 2, .. }));
}

// ============================================================================
// ERRORS
// ============================================================================

#[test]
fn test_input_contract_errors() {
    let empty: Vec<Option<i32>> = vec![];
    assert_eq!(
        OneWay::new(&empty).tabulate().unwrap_err(),
        TabulateError::EmptyInput { dimension: 0 }
    );

    let x = vec![Some(1), Some(2), Some(3)];
    let short = vec![1.0, 2.0];
    assert!(matches!(
        OneWay::new(&x).weights(&short).tabulate().unwrap_err(),
        TabulateError::LengthMismatch { expected: 3, actual: 2, .. }
    ));

    let negative = vec![-1.0, 1.0, 1.0];
    assert_eq!(
        OneWay::new(&x).weights(&negative).tabulate().unwrap_err(),
        TabulateError::NegativeWeight { index: 0, weight: -1.0 }
    );

    let nan = vec![1.0, f64::NAN, 1.0];
    assert!(matches!(
        OneWay::new(&x).weights(Weights::Dense(&nan)).tabulate().unwrap_err(),
        TabulateError::NonFiniteWeight { index: 1, .. }
    ));
}

#[test]
fn test_invalid_normalization_literal() {
    let err = "bogus".parse::<Normalization>().unwrap_err();
    assert!(matches!(err, TabulateError::InvalidArgument(_)));
    assert!(err.to_string().contains("bogus"));
}

#[test]
fn test_mismatched_pair_lengths() {
    let x1 = vec![Some("A"), Some("B")];
    let x2 = vec![Some(1)];
    let err = TwoWay::new(&x1, &x2).proportions(Normalization::Row).unwrap_err();
    assert!(matches!(err, TabulateError::LengthMismatch { expected: 2, actual: 1, .. }));
}

// ============================================================================
// OPTIONS & SERIALIZATION
// ============================================================================

#[test]
fn test_options_apply_together() {
    let x = vec![Some("b"), None, Some("a"), Some("b")];
    let options: TabulateOptions =
        serde_json::from_str(r#"{"skip_missing": true, "order": "first_seen"}"#).unwrap();
    let table = OneWay::new(&x).options(options).tabulate().unwrap();
    assert_eq!(
        table.axis(0).unwrap().labels,
        vec![Level::of("b"), Level::of("a")]
    );

    let table = OneWay::new(&x).order(DomainOrder::Sorted).tabulate().unwrap();
    assert_eq!(table.axis(0).unwrap().labels[0], Level::of("a"));
}

#[test]
fn test_table_serializes_to_json() {
    let x = vec![Some(1), None];
    let table = OneWay::new(&x).named("x").tabulate().unwrap();
    let json = serde_json::to_value(&table).unwrap();

    assert_eq!(json["weighted"], serde_json::json!(false));
    assert_eq!(json["axes"][0]["name"], serde_json::json!("x"));
    assert_eq!(json["axes"][0]["labels"][1], serde_json::json!("Missing"));
}

#[test]
fn test_mixed_datum_source() {
    let x = vec![
        Some(Datum::from("b")),
        Some(Datum::from(2.5)),
        Some(Datum::from(1)),
        Some(Datum::from(true)),
    ];
    let table = OneWay::new(&x).tabulate().unwrap();
    assert_eq!(table.value_types(), vec![ValueType::Mixed]);
    assert_eq!(
        table.axis(0).unwrap().labels,
        vec![Level::of(1), Level::of(2.5), Level::of("b"), Level::of(true)]
    );
}
