//! HTTP server module for the dashboard backend.
//!
//! Exposes the prediction pipeline as a REST API consumed by the dashboard
//! front end.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                               │
//! │  - Multipart upload, query parsing                        │
//! │  - JSON serialization/deserialization                     │
//! │  - CORS, compression, error handling                      │
//! └──────────┬───────────────────────────────┬───────────────┘
//!            │                               │
//! ┌──────────▼──────────────────┐ ┌──────────▼───────────────┐
//! │  Service Layer (services/)  │ │  Model service client     │
//! │  - Time block classifier    │ │  (client/)                │
//! │  - Aggregation, scatter     │ │  - POST /predict          │
//! │  - In-memory dataset store  │ │  - GET /evaluate          │
//! └─────────────────────────────┘ └──────────────────────────┘
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::{create_router, create_router_with_settings};
pub use state::AppState;
