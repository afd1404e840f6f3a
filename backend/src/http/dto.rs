//! Data Transfer Objects for the HTTP API.
//!
//! Pipeline types already derive Serialize/Deserialize and are returned as
//! they are; the types here only wrap them into response envelopes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{EvaluationReport, FieldName, ModelChoice};
use crate::services::{
    AggregatedBucket, ChartSeries, DatasetSummary, EvaluationSummary, PredictionRow, ScatterAxis,
    ScatterPoint,
};

/// Pseudo attribute that groups by the classified departure time block.
pub const DAY_PART_ATTRIBUTE: &str = "DAY_PART";

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Model service the server forwards to
    pub model_service: String,
}

/// A selectable option (`id` plus display label).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionDto {
    pub id: String,
    pub label: String,
}

impl From<ModelChoice> for OptionDto {
    fn from(choice: ModelChoice) -> Self {
        Self {
            id: choice.as_str().to_string(),
            label: choice.label().to_string(),
        }
    }
}

impl From<FieldName> for OptionDto {
    fn from(field: FieldName) -> Self {
        Self {
            id: field.as_str().to_string(),
            label: field.label().to_string(),
        }
    }
}

/// Attribute lists for the grouping and scatter dropdowns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributesResponse {
    pub grouping: Vec<OptionDto>,
    pub scatter: Vec<OptionDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetListResponse {
    pub datasets: Vec<DatasetSummary>,
    pub total: usize,
}

/// Carrier filter shared by the dataset views.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CarrierQuery {
    #[serde(default)]
    pub carrier: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionsResponse {
    pub rows: Vec<PredictionRow>,
    pub total: usize,
}

/// Query parameters for the aggregate endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AggregateQuery {
    /// Field key to group by (default: DAY_OF_WEEK)
    #[serde(default)]
    pub attribute: Option<String>,
    #[serde(default)]
    pub carrier: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateResponse {
    pub attribute: String,
    pub buckets: Vec<AggregatedBucket>,
    /// Outcome series for the line and radar charts
    pub series: Vec<ChartSeries>,
}

/// Query parameters for the scatter endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScatterQuery {
    /// X axis field (default: DAY_OF_WEEK)
    #[serde(default)]
    pub x: Option<String>,
    /// Y axis field (default: SNOW)
    #[serde(default)]
    pub y: Option<String>,
    #[serde(default)]
    pub carrier: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScatterResponse {
    pub x_axis: ScatterAxis,
    pub y_axis: ScatterAxis,
    pub points: Vec<ScatterPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResponse {
    /// Raw report as returned by the model service
    pub models: EvaluationReport,
    pub summary: EvaluationSummary,
    /// Precision / recall / F1 series per model
    pub class_metrics: BTreeMap<String, Vec<ChartSeries>>,
}
