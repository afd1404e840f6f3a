//! Scatter plot projection of prediction records.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{FieldName, PredictionRecord};

/// One dot on the scatter plot, coloured by the actual delay class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    /// 1 if the flight was actually delayed, else 0.
    pub class: u8,
}

/// Axis description for the scatter plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterAxis {
    pub field: FieldName,
    pub label: String,
    /// Whether the axis plots raw numbers (decided from the first record).
    pub numeric: bool,
}

/// Project records onto `(x, y, class)` triples.
///
/// - `x` is the numeric value of `x_field`, or `0` when it is not numeric.
/// - `y` is the numeric value of `y_field`; when it is not numeric, `y` is the
///   number of records in `records` sharing the same raw value.
/// - `class` is 1 for actually delayed flights and 0 otherwise.
///
/// The frequency table is built from `records` as given, so a carrier-filtered
/// slice yields frequencies local to that carrier. One point is produced per
/// record, in input order.
pub fn project(
    records: &[PredictionRecord],
    x_field: FieldName,
    y_field: FieldName,
) -> Vec<ScatterPoint> {
    let mut frequencies: Option<HashMap<String, u64>> = None;

    records
        .iter()
        .map(|record| {
            let x = record.value(x_field).as_number().unwrap_or(0.0);

            let y_value = record.value(y_field);
            let y = match y_value.as_number() {
                Some(y) => y,
                None => {
                    let table =
                        frequencies.get_or_insert_with(|| frequency_table(records, y_field));
                    table.get(&y_value.group_key()).copied().unwrap_or(0) as f64
                }
            };

            ScatterPoint {
                x,
                y,
                class: u8::from(record.is_delayed()),
            }
        })
        .collect()
}

/// Describe one scatter axis for `records`.
///
/// Numeric-ness is decided from the first record only. A non-numeric y axis
/// plots frequencies and is labelled accordingly.
pub fn describe_axis(records: &[PredictionRecord], field: FieldName, is_y: bool) -> ScatterAxis {
    let numeric = records
        .first()
        .map(|r| r.value(field).is_numeric())
        .unwrap_or(true);

    let label = if !numeric && is_y {
        format!("{} (Frequency)", field.label())
    } else {
        field.label().to_string()
    };

    ScatterAxis {
        field,
        label,
        numeric,
    }
}

fn frequency_table(records: &[PredictionRecord], field: FieldName) -> HashMap<String, u64> {
    let mut counts = HashMap::new();
    for record in records {
        *counts.entry(record.value(field).group_key()).or_insert(0) += 1;
    }
    counts
}
