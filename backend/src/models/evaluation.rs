//! Model evaluation metrics as published by the model service.
//!
//! The shape mirrors scikit-learn's `confusion_matrix(...).tolist()` and
//! `classification_report(..., output_dict=True)` for the binary delay label.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Evaluation results keyed by model display name (e.g. "Random Forest").
pub type EvaluationReport = BTreeMap<String, ModelEvaluation>;

/// Metrics for one trained model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelEvaluation {
    pub accuracy: f64,
    pub confusion_matrix: ConfusionMatrix,
    pub classification_report: ClassificationReport,
}

/// 2x2 confusion matrix; rows are the actual class, columns the predicted class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfusionMatrix {
    pub cells: [[u64; 2]; 2],
}

impl ConfusionMatrix {
    pub fn new(cells: [[u64; 2]; 2]) -> Self {
        Self { cells }
    }

    pub fn true_negatives(&self) -> u64 {
        self.cells[0][0]
    }

    pub fn false_positives(&self) -> u64 {
        self.cells[0][1]
    }

    pub fn false_negatives(&self) -> u64 {
        self.cells[1][0]
    }

    pub fn true_positives(&self) -> u64 {
        self.cells[1][1]
    }

    pub fn total(&self) -> u64 {
        self.cells.iter().flatten().sum()
    }

    /// Share of correct predictions; 0 for an empty matrix.
    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        (self.true_negatives() + self.true_positives()) as f64 / total as f64
    }
}

/// Precision, recall, F1 and support for one class or one average.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    #[serde(rename = "f1-score")]
    pub f1_score: f64,
    pub support: f64,
}

/// Per-class report for the binary delay label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    /// Class 0: departed on time.
    #[serde(rename = "0", alias = "0.0")]
    pub on_time: ClassMetrics,
    /// Class 1: delayed by 15 minutes or more.
    #[serde(rename = "1", alias = "1.0")]
    pub delayed: ClassMetrics,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
    #[serde(rename = "macro avg")]
    pub macro_avg: ClassMetrics,
    #[serde(rename = "weighted avg")]
    pub weighted_avg: ClassMetrics,
}
