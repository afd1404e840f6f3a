//! Carrier filtering and the prediction table view.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::models::{FieldValue, PredictionRecord};
use crate::services::time_block::{classify_or_unknown, DayPart};

/// One row of the predictions table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRow {
    /// 1-based position within the (filtered) table.
    pub index: usize,
    pub part_of_day: DayPart,
    pub day_of_week: FieldValue,
    pub month: FieldValue,
    pub carrier_name: Option<String>,
    pub previous_airport: Option<String>,
    pub departing_airport: Option<String>,
    /// "Delayed" or "On Time".
    pub predicted: String,
}

/// Keep only records operated by `carrier`.
///
/// `None` or an empty carrier keeps every record.
pub fn filter_by_carrier(
    records: &[PredictionRecord],
    carrier: Option<&str>,
) -> Vec<PredictionRecord> {
    match carrier.filter(|c| !c.is_empty()) {
        None => records.to_vec(),
        Some(carrier) => records
            .iter()
            .filter(|r| r.carrier_name.as_deref() == Some(carrier))
            .cloned()
            .collect(),
    }
}

/// Distinct carrier names in first-seen order. Records without a carrier are skipped.
pub fn distinct_carriers(records: &[PredictionRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter_map(|r| r.carrier_name.as_deref())
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}

/// Build the table rows shown under the upload form.
pub fn prediction_rows(records: &[PredictionRecord]) -> Vec<PredictionRow> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| PredictionRow {
            index: i + 1,
            part_of_day: record
                .departure_time_block
                .as_deref()
                .map(classify_or_unknown)
                .unwrap_or(DayPart::Unknown),
            day_of_week: record.day_of_week.clone(),
            month: record.month.clone(),
            carrier_name: record.carrier_name.clone(),
            previous_airport: record.previous_airport.clone(),
            departing_airport: record.departing_airport.clone(),
            predicted: if record.is_predicted_delayed() {
                "Delayed".to_string()
            } else {
                "On Time".to_string()
            },
        })
        .collect()
}
