//! Named series for the line, radar and model-metric charts.

use serde::{Deserialize, Serialize};

use crate::models::{ClassMetrics, FieldValue, ModelEvaluation};
use crate::services::aggregation::AggregatedBucket;

/// A named list of `(category, value)` points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub name: String,
    pub points: Vec<SeriesPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub category: FieldValue,
    pub value: f64,
}

pub const ACTUAL_DELAYED: &str = "Actual Delayed";
pub const ACTUAL_ON_TIME: &str = "Actual On Time";
pub const PREDICTED_DELAYED: &str = "Predicted Delayed";
pub const PREDICTED_ON_TIME: &str = "Predicted On Time";

/// The four outcome series drawn by the line and radar charts, in bucket order.
pub fn outcome_series(buckets: &[AggregatedBucket]) -> Vec<ChartSeries> {
    let series = |name: &str, pick: fn(&AggregatedBucket) -> u64| ChartSeries {
        name: name.to_string(),
        points: buckets
            .iter()
            .map(|b| SeriesPoint {
                category: b.attribute_value.clone(),
                value: pick(b) as f64,
            })
            .collect(),
    };

    vec![
        series(ACTUAL_DELAYED, |b| b.delayed_count),
        series(ACTUAL_ON_TIME, |b| b.on_time_count),
        series(PREDICTED_DELAYED, |b| b.predicted_delayed_count),
        series(PREDICTED_ON_TIME, |b| b.predicted_on_time_count),
    ]
}

/// Precision, recall and F1 per class for the model bar chart.
pub fn class_metric_series(evaluation: &ModelEvaluation) -> Vec<ChartSeries> {
    let report = &evaluation.classification_report;
    let classes = [
        ("Class 0 (OnTime)", &report.on_time),
        ("Class 1 (Delayed)", &report.delayed),
    ];

    let metrics: [(&str, fn(&ClassMetrics) -> f64); 3] = [
        ("Precision", |m| m.precision),
        ("Recall", |m| m.recall),
        ("F1 Score", |m| m.f1_score),
    ];

    metrics
        .iter()
        .map(|(name, pick)| ChartSeries {
            name: name.to_string(),
            points: classes
                .iter()
                .map(|(label, class_metrics)| SeriesPoint {
                    category: FieldValue::from(*label),
                    value: pick(*class_metrics),
                })
                .collect(),
        })
        .collect()
}
