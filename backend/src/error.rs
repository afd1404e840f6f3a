//! Error types for the prediction aggregation pipeline.
//!
//! The pipeline itself never performs I/O, so these errors only describe
//! malformed inputs. Callers decide whether to surface them or degrade
//! (e.g. show "Unknown" for an unparseable time block).

use crate::models::FieldName;

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Error type for pipeline operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PipelineError {
    /// A departure time block did not match `HHMM-HHMM`.
    #[error("Invalid time block '{input}': {reason}")]
    TimeBlockParse { input: String, reason: String },

    /// A record does not carry a value for the requested field.
    #[error("Missing field: {field}")]
    MissingField { field: FieldName },

    /// The requested attribute name is not a known prediction field.
    #[error("Unknown field '{name}'")]
    UnknownField { name: String },
}

impl PipelineError {
    /// Create a time block parse error.
    pub fn time_block(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::TimeBlockParse {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Create a missing field error.
    pub fn missing_field(field: FieldName) -> Self {
        Self::MissingField { field }
    }

    /// Create an unknown field error.
    pub fn unknown_field(name: impl Into<String>) -> Self {
        Self::UnknownField { name: name.into() }
    }
}
