//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for the actual data processing.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Arc;

use super::dto::{
    AggregateQuery, AggregateResponse, AttributesResponse, CarrierQuery, DatasetListResponse,
    EvaluationResponse, HealthResponse, OptionDto, PredictionsResponse, ScatterQuery,
    ScatterResponse, DAY_PART_ATTRIBUTE,
};
use super::error::AppError;
use super::state::AppState;
use crate::client::PredictionUpload;
use crate::models::{FieldName, ModelChoice, PredictionRecord};
use crate::services::{self, DatasetSummary, PredictionSet};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check & Metadata
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        model_service: state.predictor.describe(),
    }))
}

/// GET /v1/models
pub async fn list_models() -> HandlerResult<Vec<OptionDto>> {
    Ok(Json(ModelChoice::ALL.iter().copied().map(OptionDto::from).collect()))
}

/// GET /v1/attributes
///
/// Grouping attributes include the `DAY_PART` pseudo attribute, which
/// classifies the departure time block instead of reading a column.
pub async fn list_attributes() -> HandlerResult<AttributesResponse> {
    let mut grouping: Vec<OptionDto> = FieldName::GROUPING_FIELDS
        .iter()
        .copied()
        .map(OptionDto::from)
        .collect();
    grouping.push(OptionDto {
        id: DAY_PART_ATTRIBUTE.to_string(),
        label: "Part of Day (from Departure Time Block)".to_string(),
    });

    Ok(Json(AttributesResponse {
        grouping,
        scatter: FieldName::SCATTER_FIELDS
            .iter()
            .copied()
            .map(OptionDto::from)
            .collect(),
    }))
}

// =============================================================================
// Predictions
// =============================================================================

/// POST /v1/predictions
///
/// Multipart upload with `file` (required), `choice` and `sample_size`.
/// Forwards the CSV to the model service and stores the returned predictions.
pub async fn create_predictions(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<DatasetSummary>), AppError> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut choice = ModelChoice::default();
    let mut sample_size = state.default_sample_size;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or("upload.csv").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read file: {}", e)))?;
                file = Some((file_name, bytes.to_vec()));
            }
            "choice" => {
                let text = read_text(field).await?;
                choice = ModelChoice::from_str(text.trim()).map_err(AppError::BadRequest)?;
            }
            "sample_size" => {
                let text = read_text(field).await?;
                sample_size = parse_sample_size(&text)?;
            }
            other => {
                tracing::debug!("Ignoring unexpected multipart field '{}'", other);
            }
        }
    }

    let (file_name, contents) =
        file.ok_or_else(|| AppError::BadRequest("Please upload a CSV file".to_string()))?;
    if contents.is_empty() {
        return Err(AppError::BadRequest(format!("Uploaded file '{}' is empty", file_name)));
    }

    tracing::info!(
        "Predicting '{}' with {} (sample size {})",
        file_name,
        choice,
        sample_size
    );

    let records = state
        .predictor
        .predict(PredictionUpload {
            file_name: file_name.clone(),
            contents: contents.clone(),
            choice,
            sample_size,
        })
        .await?;

    let summary = state
        .datasets
        .insert(PredictionSet::new(choice, file_name, &contents, records));
    tracing::info!(
        "Stored dataset {} with {} predictions",
        summary.dataset_id,
        summary.record_count
    );

    Ok((StatusCode::CREATED, Json(summary)))
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart field: {}", e)))
}

fn parse_sample_size(text: &str) -> Result<u32, AppError> {
    match text.trim().parse::<u32>() {
        Ok(size) if size > 0 => Ok(size),
        _ => Err(AppError::BadRequest(format!(
            "sample_size must be a positive integer, got '{}'",
            text.trim()
        ))),
    }
}

// =============================================================================
// Datasets
// =============================================================================

/// GET /v1/datasets
pub async fn list_datasets(State(state): State<AppState>) -> HandlerResult<DatasetListResponse> {
    let datasets = state.datasets.list();
    let total = datasets.len();
    Ok(Json(DatasetListResponse { datasets, total }))
}

/// GET /v1/datasets/{dataset_id}
pub async fn get_dataset(
    State(state): State<AppState>,
    Path(dataset_id): Path<String>,
) -> HandlerResult<DatasetSummary> {
    state
        .datasets
        .summary(&dataset_id)
        .map(Json)
        .ok_or_else(|| dataset_not_found(&dataset_id))
}

/// DELETE /v1/datasets/{dataset_id}
pub async fn delete_dataset(
    State(state): State<AppState>,
    Path(dataset_id): Path<String>,
) -> Result<StatusCode, AppError> {
    if state.datasets.remove(&dataset_id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(dataset_not_found(&dataset_id))
    }
}

/// GET /v1/datasets/{dataset_id}/predictions
pub async fn get_predictions(
    State(state): State<AppState>,
    Path(dataset_id): Path<String>,
    Query(query): Query<CarrierQuery>,
) -> HandlerResult<PredictionsResponse> {
    let records = filtered_records(&state, &dataset_id, query.carrier.as_deref())?;
    let rows = services::prediction_rows(&records);
    let total = rows.len();
    Ok(Json(PredictionsResponse { rows, total }))
}

/// GET /v1/datasets/{dataset_id}/aggregate
///
/// Groups by `attribute` (default `DAY_OF_WEEK`). `DAY_PART` groups by the
/// classified departure time block.
pub async fn get_aggregate(
    State(state): State<AppState>,
    Path(dataset_id): Path<String>,
    Query(query): Query<AggregateQuery>,
) -> HandlerResult<AggregateResponse> {
    let attribute = query
        .attribute
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .unwrap_or(FieldName::DayOfWeek.as_str());

    let field = if attribute.eq_ignore_ascii_case(DAY_PART_ATTRIBUTE) {
        None
    } else {
        Some(FieldName::from_str(attribute)?)
    };

    let records = filtered_records(&state, &dataset_id, query.carrier.as_deref())?;

    let response = tokio::task::spawn_blocking(move || {
        let (attribute, buckets) = match field {
            Some(field) => (field.as_str().to_string(), services::aggregate(&records, field)),
            None => (
                DAY_PART_ATTRIBUTE.to_string(),
                services::aggregate_by_day_part(&records),
            ),
        };
        let series = services::outcome_series(&buckets);
        AggregateResponse {
            attribute,
            buckets,
            series,
        }
    })
    .await
    .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?;

    Ok(Json(response))
}

/// GET /v1/datasets/{dataset_id}/scatter
///
/// Projects records onto `x` (default `DAY_OF_WEEK`) and `y` (default `SNOW`).
pub async fn get_scatter(
    State(state): State<AppState>,
    Path(dataset_id): Path<String>,
    Query(query): Query<ScatterQuery>,
) -> HandlerResult<ScatterResponse> {
    let x_field = parse_field(query.x.as_deref(), FieldName::DayOfWeek)?;
    let y_field = parse_field(query.y.as_deref(), FieldName::Snow)?;

    let records = filtered_records(&state, &dataset_id, query.carrier.as_deref())?;

    let response = tokio::task::spawn_blocking(move || ScatterResponse {
        x_axis: services::describe_axis(&records, x_field, false),
        y_axis: services::describe_axis(&records, y_field, true),
        points: services::project(&records, x_field, y_field),
    })
    .await
    .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?;

    Ok(Json(response))
}

fn parse_field(raw: Option<&str>, default: FieldName) -> Result<FieldName, AppError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(name) => Ok(FieldName::from_str(name)?),
        None => Ok(default),
    }
}

fn dataset_not_found(dataset_id: &str) -> AppError {
    AppError::NotFound(format!("Dataset '{}' not found", dataset_id))
}

/// Records of a dataset, narrowed to one carrier when requested. The carrier
/// name is matched exactly as sent; only an empty value disables the filter.
fn filtered_records(
    state: &AppState,
    dataset_id: &str,
    carrier: Option<&str>,
) -> Result<Arc<[PredictionRecord]>, AppError> {
    let records = state
        .datasets
        .records(dataset_id)
        .ok_or_else(|| dataset_not_found(dataset_id))?;

    match carrier.filter(|c| !c.is_empty()) {
        None => Ok(records),
        Some(carrier) => Ok(services::filter_by_carrier(&records, Some(carrier)).into()),
    }
}

// =============================================================================
// Evaluation
// =============================================================================

/// GET /v1/evaluation
pub async fn get_evaluation(State(state): State<AppState>) -> HandlerResult<EvaluationResponse> {
    let report = state.predictor.evaluate().await?;

    let summary = services::summarize(&report);
    let class_metrics: BTreeMap<_, _> = report
        .iter()
        .map(|(name, evaluation)| (name.clone(), services::class_metric_series(evaluation)))
        .collect();

    Ok(Json(EvaluationResponse {
        models: report,
        summary,
        class_metrics,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sample_size() {
        assert_eq!(parse_sample_size(" 500 ").unwrap(), 500);
        assert!(parse_sample_size("0").is_err());
        assert!(parse_sample_size("-3").is_err());
        assert!(parse_sample_size("many").is_err());
    }

    #[test]
    fn test_parse_field_defaults_and_errors() {
        assert_eq!(parse_field(None, FieldName::Snow).unwrap(), FieldName::Snow);
        assert_eq!(parse_field(Some(" "), FieldName::Snow).unwrap(), FieldName::Snow);
        assert_eq!(parse_field(Some("plane_age"), FieldName::Snow).unwrap(), FieldName::PlaneAge);
        assert!(matches!(
            parse_field(Some("WINGSPAN"), FieldName::Snow),
            Err(AppError::BadRequest(_))
        ));
    }
}
