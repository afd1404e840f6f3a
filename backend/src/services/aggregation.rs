//! Per-attribute delay counts for the line and radar charts.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{FieldName, FieldValue, PredictionRecord};
use crate::services::time_block::{classify_or_unknown, DayPart};

/// Delay counts for every record sharing one attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedBucket {
    /// Grouping value, echoed from the first record that carried it.
    pub attribute_value: FieldValue,
    pub delayed_count: u64,
    pub on_time_count: u64,
    pub predicted_delayed_count: u64,
    pub predicted_on_time_count: u64,
}

impl AggregatedBucket {
    pub fn new(attribute_value: FieldValue) -> Self {
        Self {
            attribute_value,
            delayed_count: 0,
            on_time_count: 0,
            predicted_delayed_count: 0,
            predicted_on_time_count: 0,
        }
    }

    /// Number of records counted into this bucket.
    pub fn total(&self) -> u64 {
        self.delayed_count + self.on_time_count
    }

    fn count(&mut self, record: &PredictionRecord) {
        if record.is_delayed() {
            self.delayed_count += 1;
        } else {
            self.on_time_count += 1;
        }
        if record.is_predicted_delayed() {
            self.predicted_delayed_count += 1;
        } else {
            self.predicted_on_time_count += 1;
        }
    }
}

/// Group records by `field` and count actual and predicted outcomes per group.
///
/// Buckets come back in the order their value was first seen; chart x-axes
/// are drawn in this order. Records without a value for `field` share a
/// single bucket whose `attribute_value` is [`FieldValue::Missing`].
pub fn aggregate(records: &[PredictionRecord], field: FieldName) -> Vec<AggregatedBucket> {
    group_by(records, |record| record.value(field))
}

/// Group records by the part of the day of their departure time block.
///
/// Unparseable or missing blocks are counted under "Unknown".
pub fn aggregate_by_day_part(records: &[PredictionRecord]) -> Vec<AggregatedBucket> {
    group_by(records, |record| {
        let part = record
            .departure_time_block
            .as_deref()
            .map(classify_or_unknown)
            .unwrap_or(DayPart::Unknown);
        FieldValue::from(part.label())
    })
}

fn group_by<F>(records: &[PredictionRecord], key_of: F) -> Vec<AggregatedBucket>
where
    F: Fn(&PredictionRecord) -> FieldValue,
{
    let mut buckets: Vec<AggregatedBucket> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        let value = key_of(record);
        let slot = *index.entry(value.group_key()).or_insert_with(|| {
            buckets.push(AggregatedBucket::new(value));
            buckets.len() - 1
        });
        buckets[slot].count(record);
    }

    log::debug!(
        "Aggregated {} records into {} buckets",
        records.len(),
        buckets.len()
    );
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(day: f64, actual: f64, predicted: f64) -> PredictionRecord {
        PredictionRecord {
            day_of_week: FieldValue::Number(day),
            actual_delay: FieldValue::Number(actual),
            predicted_delay: FieldValue::Number(predicted),
            ..Default::default()
        }
    }

    #[test]
    fn test_aggregate_empty() {
        assert!(aggregate(&[], FieldName::DayOfWeek).is_empty());
    }

    #[test]
    fn test_aggregate_counts_in_first_seen_order() {
        let records = vec![record(1.0, 1.0, 0.0), record(1.0, 0.0, 0.0), record(2.0, 1.0, 1.0)];
        let buckets = aggregate(&records, FieldName::DayOfWeek);

        assert_eq!(
            buckets,
            vec![
                AggregatedBucket {
                    attribute_value: FieldValue::Number(1.0),
                    delayed_count: 1,
                    on_time_count: 1,
                    predicted_delayed_count: 0,
                    predicted_on_time_count: 2,
                },
                AggregatedBucket {
                    attribute_value: FieldValue::Number(2.0),
                    delayed_count: 1,
                    on_time_count: 0,
                    predicted_delayed_count: 1,
                    predicted_on_time_count: 0,
                },
            ]
        );
    }

    #[test]
    fn test_aggregate_keeps_insertion_order_not_sorted() {
        let records = vec![record(7.0, 0.0, 0.0), record(2.0, 0.0, 0.0), record(7.0, 1.0, 1.0)];
        let values: Vec<_> = aggregate(&records, FieldName::DayOfWeek)
            .into_iter()
            .map(|b| b.attribute_value)
            .collect();
        assert_eq!(values, vec![FieldValue::Number(7.0), FieldValue::Number(2.0)]);
    }

    #[test]
    fn test_aggregate_missing_values_share_a_bucket() {
        let records = vec![
            PredictionRecord::default(),
            record(3.0, 1.0, 1.0),
            PredictionRecord {
                actual_delay: FieldValue::Number(1.0),
                ..Default::default()
            },
        ];
        let buckets = aggregate(&records, FieldName::DayOfWeek);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].attribute_value, FieldValue::Missing);
        assert_eq!(buckets[0].total(), 2);
        assert_eq!(buckets[0].delayed_count, 1);
        assert_eq!(buckets[0].predicted_on_time_count, 2);
    }

    #[test]
    fn test_aggregate_text_field() {
        let records = vec![
            PredictionRecord {
                carrier_name: Some("Delta Air Lines Inc.".into()),
                actual_delay: FieldValue::Number(1.0),
                ..Default::default()
            },
            PredictionRecord {
                carrier_name: Some("Delta Air Lines Inc.".into()),
                predicted_delay: FieldValue::Number(1.0),
                ..Default::default()
            },
        ];
        let buckets = aggregate(&records, FieldName::CarrierName);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].delayed_count, 1);
        assert_eq!(buckets[0].predicted_delayed_count, 1);
    }

    #[test]
    fn test_aggregate_by_day_part() {
        let blocks = ["0600-0659", "2100-2159", "0700-0759", "bogus"];
        let records: Vec<_> = blocks
            .iter()
            .map(|b| PredictionRecord {
                departure_time_block: Some(b.to_string()),
                ..Default::default()
            })
            .collect();

        let buckets = aggregate_by_day_part(&records);
        let labels: Vec<_> = buckets.iter().map(|b| b.attribute_value.to_string()).collect();
        assert_eq!(labels, vec!["Morning", "Early Morning & Late Night", "Unknown"]);
        assert_eq!(buckets[0].total(), 2);
    }

    #[test]
    fn test_bucket_serializes_camel_case() {
        let json = serde_json::to_value(AggregatedBucket::new(FieldValue::Number(4.0))).unwrap();
        assert_eq!(json["attributeValue"], 4.0);
        assert_eq!(json["predictedOnTimeCount"], 0);
    }
}
