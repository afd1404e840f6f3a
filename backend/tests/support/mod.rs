#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use flight_delay::models::{FieldValue, PredictionRecord};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// Restores the variables on unwind and serializes access to process-global
/// env vars so tests running in parallel do not see each other's changes.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// Builder for prediction records used across integration tests.
#[derive(Debug, Clone, Default)]
pub struct RecordBuilder {
    record: PredictionRecord,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn day_of_week(mut self, day: f64) -> Self {
        self.record.day_of_week = FieldValue::Number(day);
        self
    }

    pub fn month(mut self, month: f64) -> Self {
        self.record.month = FieldValue::Number(month);
        self
    }

    pub fn time_block(mut self, block: &str) -> Self {
        self.record.departure_time_block = Some(block.to_string());
        self
    }

    pub fn carrier(mut self, carrier: &str) -> Self {
        self.record.carrier_name = Some(carrier.to_string());
        self
    }

    pub fn snow(mut self, snow: f64) -> Self {
        self.record.snow_presence = FieldValue::Number(snow);
        self
    }

    pub fn plane_age(mut self, age: f64) -> Self {
        self.record.plane_age = FieldValue::Number(age);
        self
    }

    pub fn delayed(mut self, actual: bool) -> Self {
        self.record.actual_delay = FieldValue::Number(if actual { 1.0 } else { 0.0 });
        self
    }

    pub fn predicted(mut self, predicted: bool) -> Self {
        self.record.predicted_delay = FieldValue::Number(if predicted { 1.0 } else { 0.0 });
        self
    }

    pub fn build(self) -> PredictionRecord {
        self.record
    }
}

/// A small mixed dataset: two carriers, several days and time blocks.
pub fn sample_records() -> Vec<PredictionRecord> {
    vec![
        RecordBuilder::new()
            .day_of_week(1.0)
            .month(1.0)
            .time_block("0600-0659")
            .carrier("Delta Air Lines Inc.")
            .snow(0.0)
            .plane_age(5.0)
            .delayed(true)
            .predicted(true)
            .build(),
        RecordBuilder::new()
            .day_of_week(1.0)
            .month(1.0)
            .time_block("1700-1759")
            .carrier("Southwest Airlines Co.")
            .snow(0.5)
            .plane_age(12.0)
            .delayed(false)
            .predicted(true)
            .build(),
        RecordBuilder::new()
            .day_of_week(3.0)
            .month(2.0)
            .time_block("2100-2159")
            .carrier("Delta Air Lines Inc.")
            .snow(0.0)
            .plane_age(8.0)
            .delayed(false)
            .predicted(false)
            .build(),
        RecordBuilder::new()
            .day_of_week(5.0)
            .month(2.0)
            .time_block("1200-1259")
            .carrier("Southwest Airlines Co.")
            .snow(1.2)
            .plane_age(3.0)
            .delayed(true)
            .predicted(false)
            .build(),
    ]
}
