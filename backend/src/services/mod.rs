//! Service layer for the dashboard's data processing.
//!
//! Services are pure functions over prediction records plus the in-memory
//! dataset store. The HTTP layer composes them; nothing here does I/O.

pub mod aggregation;
pub mod charts;
pub mod dataset_store;
pub mod evaluation;
pub mod filtering;
pub mod scatter;
pub mod time_block;

pub use aggregation::{aggregate, aggregate_by_day_part, AggregatedBucket};
pub use charts::{class_metric_series, outcome_series, ChartSeries, SeriesPoint};
pub use dataset_store::{DatasetStore, DatasetSummary, PredictionSet};
pub use evaluation::{summarize, EvaluationSummary, ModelOverview};
pub use filtering::{distinct_carriers, filter_by_carrier, prediction_rows, PredictionRow};
pub use scatter::{describe_axis, project, ScatterAxis, ScatterPoint};
pub use time_block::{classify, classify_or_unknown, classify_record, DayPart};
