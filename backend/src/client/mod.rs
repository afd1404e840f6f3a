//! Client for the external model service.
//!
//! The model service owns the trained classifiers. It exposes two endpoints:
//!
//! - `POST /predict`: multipart upload (`file`, `choice`, `sample_size`),
//!   answers with a JSON array of prediction records
//! - `GET /evaluate`: answers with the evaluation report of every model
//!
//! Each call issues exactly one request. There is no retry or caching.

pub mod error;

pub use error::{extract_detail, ClientError, ClientResult};

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::ModelServiceSettings;
use crate::models::{EvaluationReport, ModelChoice, PredictionRecord};

/// A CSV upload to be scored by the model service.
#[derive(Debug, Clone)]
pub struct PredictionUpload {
    pub file_name: String,
    pub contents: Vec<u8>,
    pub choice: ModelChoice,
    pub sample_size: u32,
}

/// Operations the dashboard needs from the model service.
#[async_trait]
pub trait PredictionService: Send + Sync {
    /// Score an uploaded dataset with the chosen model.
    async fn predict(&self, upload: PredictionUpload) -> ClientResult<Vec<PredictionRecord>>;

    /// Fetch the evaluation report of every trained model.
    async fn evaluate(&self) -> ClientResult<EvaluationReport>;

    /// Short description for health output.
    fn describe(&self) -> String {
        "model-service".to_string()
    }
}

/// reqwest-backed [`PredictionService`].
#[derive(Debug, Clone)]
pub struct HttpPredictionClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpPredictionClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ClientResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::InvalidRequest(format!(
                "model service URL must start with http:// or https://, got '{}'",
                base_url
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                ClientError::InvalidRequest(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            http,
            base_url,
            timeout,
        })
    }

    pub fn from_settings(settings: &ModelServiceSettings) -> ClientResult<Self> {
        Self::new(settings.base_url.clone(), settings.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn transport_error(&self, err: reqwest::Error) -> ClientError {
        if err.is_timeout() {
            ClientError::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }
        } else if err.is_builder() {
            ClientError::InvalidRequest(err.to_string())
        } else {
            ClientError::Connection(err.to_string())
        }
    }

    /// Check the status and decode a JSON body.
    async fn read_json<T: DeserializeOwned>(&self, response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            let detail = extract_detail(&body);
            log::warn!("Model service returned {}: {}", status, detail);
            return Err(ClientError::status(status.as_u16(), detail));
        }

        serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

#[async_trait]
impl PredictionService for HttpPredictionClient {
    async fn predict(&self, upload: PredictionUpload) -> ClientResult<Vec<PredictionRecord>> {
        let PredictionUpload {
            file_name,
            contents,
            choice,
            sample_size,
        } = upload;

        log::debug!(
            "Requesting predictions for '{}' ({} bytes) with {} (sample {})",
            file_name,
            contents.len(),
            choice,
            sample_size
        );

        let file = Part::bytes(contents)
            .file_name(file_name)
            .mime_str("text/csv")
            .map_err(|e| ClientError::InvalidRequest(e.to_string()))?;
        let form = Form::new()
            .part("file", file)
            .text("choice", choice.as_str().to_string())
            .text("sample_size", sample_size.to_string());

        let response = self
            .http
            .post(self.endpoint("predict"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let records: Vec<PredictionRecord> = self.read_json(response).await?;
        log::debug!("Model service returned {} predictions", records.len());
        Ok(records)
    }

    async fn evaluate(&self) -> ClientResult<EvaluationReport> {
        let response = self
            .http
            .get(self.endpoint("evaluate"))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        self.read_json(response).await
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}
