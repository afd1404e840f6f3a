//! Model overview built from the evaluation report.

use serde::{Deserialize, Serialize};

use crate::models::{ClassMetrics, ConfusionMatrix, EvaluationReport, ModelEvaluation};

/// Rounded metrics for one class or average, as shown in the overview tables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricRow {
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub support: u64,
}

/// Overview of one model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelOverview {
    pub model: String,
    pub accuracy: f64,
    pub on_time: MetricRow,
    pub delayed: MetricRow,
    pub macro_avg: MetricRow,
    pub weighted_avg: MetricRow,
    pub confusion_matrix: ConfusionMatrix,
}

/// All model overviews, best first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationSummary {
    pub models: Vec<ModelOverview>,
    pub best_model: Option<String>,
}

/// Round to three decimals, the precision the dashboard displays.
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

fn metric_row(metrics: &ClassMetrics) -> MetricRow {
    MetricRow {
        precision: round3(metrics.precision),
        recall: round3(metrics.recall),
        f1_score: round3(metrics.f1_score),
        support: metrics.support.max(0.0).round() as u64,
    }
}

fn overview(name: &str, evaluation: &ModelEvaluation) -> ModelOverview {
    let report = &evaluation.classification_report;

    let matrix_accuracy = evaluation.confusion_matrix.accuracy();
    if evaluation.confusion_matrix.total() > 0
        && (matrix_accuracy - evaluation.accuracy).abs() > 1e-3
    {
        log::warn!(
            "Model '{}' reports accuracy {:.4} but its confusion matrix gives {:.4}",
            name,
            evaluation.accuracy,
            matrix_accuracy
        );
    }

    ModelOverview {
        model: name.to_string(),
        accuracy: round3(evaluation.accuracy),
        on_time: metric_row(&report.on_time),
        delayed: metric_row(&report.delayed),
        macro_avg: metric_row(&report.macro_avg),
        weighted_avg: metric_row(&report.weighted_avg),
        confusion_matrix: evaluation.confusion_matrix,
    }
}

/// Summarize every model in the report, sorted by accuracy (descending, ties by name).
pub fn summarize(report: &EvaluationReport) -> EvaluationSummary {
    let mut models: Vec<ModelOverview> = report
        .iter()
        .map(|(name, evaluation)| overview(name, evaluation))
        .collect();

    models.sort_by(|a, b| {
        b.accuracy
            .partial_cmp(&a.accuracy)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.model.cmp(&b.model))
    });

    let best_model = models.first().map(|m| m.model.clone());

    EvaluationSummary { models, best_model }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ClassificationReport;

    fn evaluation(accuracy: f64, cells: [[u64; 2]; 2]) -> ModelEvaluation {
        let metrics = ClassMetrics {
            precision: 0.123456,
            recall: 0.98765,
            f1_score: 0.5,
            support: 149.0,
        };
        ModelEvaluation {
            accuracy,
            confusion_matrix: ConfusionMatrix::new(cells),
            classification_report: ClassificationReport {
                on_time: metrics,
                delayed: metrics,
                accuracy: Some(accuracy),
                macro_avg: metrics,
                weighted_avg: metrics,
            },
        }
    }

    #[test]
    fn test_round3() {
        assert_eq!(round3(0.123456), 0.123);
        assert_eq!(round3(0.98765), 0.988);
        assert_eq!(round3(1.0), 1.0);
    }

    #[test]
    fn test_summarize_orders_by_accuracy() {
        let mut report = EvaluationReport::new();
        report.insert("Gradient Boosting".into(), evaluation(0.79, [[79, 11], [10, 0]]));
        report.insert("Random Forest".into(), evaluation(0.81, [[81, 9], [10, 0]]));
        report.insert("K Nearest Neighbor".into(), evaluation(0.79, [[79, 11], [10, 0]]));

        let summary = summarize(&report);
        let order: Vec<_> = summary.models.iter().map(|m| m.model.as_str()).collect();
        assert_eq!(order, vec!["Random Forest", "Gradient Boosting", "K Nearest Neighbor"]);
        assert_eq!(summary.best_model.as_deref(), Some("Random Forest"));
    }

    #[test]
    fn test_summarize_rounds_metrics() {
        let mut report = EvaluationReport::new();
        report.insert("Random Forest".into(), evaluation(0.81234, [[81, 9], [10, 0]]));
        let model = &summarize(&report).models[0];
        assert_eq!(model.accuracy, 0.812);
        assert_eq!(model.delayed.precision, 0.123);
        assert_eq!(model.delayed.recall, 0.988);
        assert_eq!(model.delayed.support, 149);
    }

    #[test]
    fn test_summarize_empty() {
        let summary = summarize(&EvaluationReport::new());
        assert!(summary.models.is_empty());
        assert_eq!(summary.best_model, None);
    }
}
