//! FILENAME: core/tabulate-frame/src/export.rs
//! Flattens result tables into long-format frames: one row per cell, one
//! column per dimension plus a value column.
//!
//! Dimension columns take the axis name (`dim1`, `dim2` when unnamed) and are
//! typed from the axis value type. Axes with declared levels come back as
//! categorical columns over those levels. `Missing` labels become missing values.

use tabulate_engine::{Axis, ContingencyTable, CountTable, Datum, Level, Levels, ProportionTable, ValueType};

use crate::error::FrameResult;
use crate::frame::{Column, Frame};

/// Long-format frame of a contingency table with a `count` column.
/// Integer counts stay integers; weighted counts are numbers.
pub fn counts_to_frame(table: &ContingencyTable) -> FrameResult<Frame> {
    let counts = match table.counts() {
        CountTable::Integer(dense) => {
            Column::integers(dense.as_slice().iter().map(|&c| Some(c as i64)))
        }
        CountTable::Real(dense) => Column::numbers(dense.as_slice().iter().map(|&c| Some(c))),
    };
    long_frame(table.axes(), "count", counts)
}

/// Long-format frame of a proportion table with a `proportion` column.
pub fn proportions_to_frame(table: &ProportionTable) -> FrameResult<Frame> {
    let values = Column::numbers(table.proportions().as_slice().iter().map(|&p| Some(p)));
    long_frame(table.axes(), "proportion", values)
}

fn long_frame(axes: &[Axis], value_name: &str, values: Column) -> FrameResult<Frame> {
    let mut frame = Frame::new();
    let strides = strides(axes);
    let cells = values.len();

    for (dim, axis) in axes.iter().enumerate() {
        let labels: Vec<Option<Datum>> = (0..cells)
            .map(|cell| {
                let position = (cell / strides[dim]) % axis.len().max(1);
                match &axis.labels[position] {
                    Level::Value(d) => Some(d.clone()),
                    Level::Missing => None,
                }
            })
            .collect();

        let name = axis
            .name
            .clone()
            .unwrap_or_else(|| format!("dim{}", dim + 1));
        frame.add_column(name, typed_column(axis, labels)?)?;
    }

    frame.add_column(value_name, values)?;
    Ok(frame)
}

/// Row-major stride of each dimension.
fn strides(axes: &[Axis]) -> Vec<usize> {
    let mut strides = vec![1; axes.len()];
    for dim in (0..axes.len().saturating_sub(1)).rev() {
        strides[dim] = strides[dim + 1] * axes[dim + 1].len();
    }
    strides
}

fn typed_column(axis: &Axis, labels: Vec<Option<Datum>>) -> FrameResult<Column> {
    if let Some(levels) = &axis.levels {
        let levels = Levels::new(levels.clone(), axis.ordered)?;
        return Column::categorical(levels, labels);
    }

    let column = match axis.value_type {
        ValueType::Integer => Column::integers(labels.iter().map(|d| match d {
            Some(Datum::Integer(i)) => Some(*i),
            _ => None,
        })),
        ValueType::Float => Column::numbers(labels.iter().map(|d| d.as_ref().and_then(Datum::as_f64))),
        ValueType::Text => Column::text(labels.iter().map(|d| match d {
            Some(Datum::Text(s)) => Some(s.clone()),
            _ => None,
        })),
        ValueType::Boolean => Column::booleans(labels.iter().map(|d| match d {
            Some(Datum::Boolean(b)) => Some(*b),
            _ => None,
        })),
        ValueType::Mixed => Column::Mixed(labels),
    };
    Ok(column)
}
