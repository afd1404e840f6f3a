//! # Flight Delay Dashboard Backend
//!
//! Prediction aggregation engine behind the flight delay dashboard.
//!
//! Users upload a CSV of flights; an external model service scores every row
//! with a trained classifier and this crate turns the scored rows into the
//! dashboard's views: per-attribute delay counts, scatter projections, the
//! predictions table and the model evaluation overview. A REST API is exposed
//! via Axum for the front end.
//!
//! ## Architecture
//!
//! - [`models`]: Prediction records, field names and evaluation report types
//! - [`services`]: Pure pipeline functions and the in-memory dataset store
//! - [`client`]: Async client for the external model service
//! - [`config`]: TOML and environment configuration
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! ## Example
//!
//! ```
//! use flight_delay::models::{FieldName, FieldValue, PredictionRecord};
//! use flight_delay::services::aggregate;
//!
//! let flight = |delayed: f64| PredictionRecord {
//!     day_of_week: FieldValue::Number(1.0),
//!     actual_delay: FieldValue::Number(delayed),
//!     ..Default::default()
//! };
//! let records = vec![flight(1.0), flight(0.0)];
//! let buckets = aggregate(&records, FieldName::DayOfWeek);
//! assert_eq!(buckets.len(), 1);
//! assert_eq!(buckets[0].delayed_count, 1);
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
