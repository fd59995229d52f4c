//! FILENAME: tests/common/mod.rs
//! Shared frame fixtures for frame adapter integration tests.

#![allow(dead_code)]

use tabulate_engine::{Datum, Levels};
use tabulate_frame::{Column, Frame};

pub struct SalesFixture;

impl SalesFixture {
    pub fn headers() -> Vec<&'static str> {
        vec!["Region", "Product", "Quarter", "Units", "Returned"]
    }

    pub fn data() -> Vec<(&'static str, &'static str, &'static str, Option<i64>, Option<bool>)> {
        vec![
            ("North", "Widget", "Q1", Some(100), Some(false)),
            ("North", "Widget", "Q2", Some(120), Some(false)),
            ("North", "Gadget", "Q1", Some(80), Some(true)),
            ("North", "Gadget", "Q2", None, None),
            ("South", "Widget", "Q1", Some(150), Some(false)),
            ("South", "Widget", "Q2", Some(140), Some(true)),
            ("South", "Gadget", "Q1", Some(110), Some(false)),
            ("South", "Gadget", "Q2", Some(130), Some(false)),
            ("East", "Widget", "Q1", Some(90), None),
            ("East", "Widget", "Q2", Some(110), Some(false)),
            ("East", "Gadget", "Q1", Some(70), Some(true)),
            ("East", "Gadget", "Q2", Some(85), Some(false)),
        ]
    }

    /// The sales data as a frame; `Quarter` is an ordered categorical over Q1..Q4.
    pub fn frame() -> Frame {
        let data = Self::data();
        let quarters = Levels::ordered(vec![
            Datum::from("Q1"),
            Datum::from("Q2"),
            Datum::from("Q3"),
            Datum::from("Q4"),
        ])
        .unwrap();

        Frame::new()
            .with_column("Region", Column::text(data.iter().map(|r| Some(r.0))))
            .unwrap()
            .with_column("Product", Column::text(data.iter().map(|r| Some(r.1))))
            .unwrap()
            .with_column(
                "Quarter",
                Column::categorical(quarters, data.iter().map(|r| Some(r.2))).unwrap(),
            )
            .unwrap()
            .with_column("Units", Column::integers(data.iter().map(|r| r.3)))
            .unwrap()
            .with_column("Returned", Column::booleans(data.iter().map(|r| r.4)))
            .unwrap()
    }
}
