//! In-memory store for uploaded prediction sets.
//!
//! Every successful upload is kept under a fresh id so the dashboard can
//! re-filter and re-chart it without re-running the model. Nothing is
//! persisted; restarting the server forgets every set.

use parking_lot::RwLock;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::models::{ModelChoice, PredictionRecord};
use crate::services::filtering::distinct_carriers;

/// One uploaded dataset together with the model's predictions.
#[derive(Debug, Clone)]
pub struct PredictionSet {
    pub dataset_id: String,
    pub model: ModelChoice,
    pub file_name: String,
    /// SHA-256 of the uploaded file, hex encoded.
    pub checksum: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub records: Arc<[PredictionRecord]>,
}

/// Dataset metadata returned to the UI.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DatasetSummary {
    pub dataset_id: String,
    pub model: ModelChoice,
    pub file_name: String,
    pub checksum: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub record_count: usize,
    /// Distinct carriers, in first-seen order, for the carrier dropdown.
    pub carriers: Vec<String>,
}

impl PredictionSet {
    /// Build a set with a fresh id from the uploaded bytes and the returned records.
    pub fn new(
        model: ModelChoice,
        file_name: impl Into<String>,
        contents: &[u8],
        records: Vec<PredictionRecord>,
    ) -> Self {
        Self {
            dataset_id: Uuid::new_v4().to_string(),
            model,
            file_name: file_name.into(),
            checksum: checksum(contents),
            created_at: chrono::Utc::now(),
            records: records.into(),
        }
    }

    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            dataset_id: self.dataset_id.clone(),
            model: self.model,
            file_name: self.file_name.clone(),
            checksum: self.checksum.clone(),
            created_at: self.created_at,
            record_count: self.records.len(),
            carriers: distinct_carriers(&self.records),
        }
    }
}

/// Hex-encoded SHA-256 of `contents`.
pub fn checksum(contents: &[u8]) -> String {
    hex::encode(Sha256::digest(contents))
}

/// Thread-safe map of dataset id to prediction set.
#[derive(Clone)]
pub struct DatasetStore {
    sets: Arc<RwLock<HashMap<String, PredictionSet>>>,
    /// Maximum number of sets kept; 0 means unbounded.
    capacity: usize,
}

impl DatasetStore {
    /// Create an unbounded store.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a store that evicts the oldest set once `capacity` sets are held.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sets: Arc::new(RwLock::new(HashMap::new())),
            capacity,
        }
    }

    /// Store a set and return its summary.
    pub fn insert(&self, set: PredictionSet) -> DatasetSummary {
        let summary = set.summary();
        let mut sets = self.sets.write();

        if self.capacity > 0 {
            while sets.len() >= self.capacity {
                let oldest = sets
                    .values()
                    .min_by_key(|s| s.created_at)
                    .map(|s| s.dataset_id.clone());
                match oldest {
                    Some(id) => {
                        log::info!("Evicting dataset {} (store full)", id);
                        sets.remove(&id);
                    }
                    None => break,
                }
            }
        }

        sets.insert(set.dataset_id.clone(), set);
        summary
    }

    /// Get a set by id.
    pub fn get(&self, dataset_id: &str) -> Option<PredictionSet> {
        self.sets.read().get(dataset_id).cloned()
    }

    /// Get only the records of a set; cheap to clone.
    pub fn records(&self, dataset_id: &str) -> Option<Arc<[PredictionRecord]>> {
        self.sets
            .read()
            .get(dataset_id)
            .map(|set| Arc::clone(&set.records))
    }

    pub fn summary(&self, dataset_id: &str) -> Option<DatasetSummary> {
        self.sets.read().get(dataset_id).map(PredictionSet::summary)
    }

    /// Remove a set; returns whether it existed.
    pub fn remove(&self, dataset_id: &str) -> bool {
        self.sets.write().remove(dataset_id).is_some()
    }

    /// Summaries of every set, newest first.
    pub fn list(&self) -> Vec<DatasetSummary> {
        let sets = self.sets.read();
        let mut summaries: Vec<DatasetSummary> =
            sets.values().map(PredictionSet::summary).collect();
        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        summaries
    }

    pub fn len(&self) -> usize {
        self.sets.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.read().is_empty()
    }
}

impl Default for DatasetStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_set(carriers: &[&str]) -> PredictionSet {
        let records = carriers
            .iter()
            .map(|c| PredictionRecord {
                carrier_name: Some(c.to_string()),
                ..Default::default()
            })
            .collect();
        PredictionSet::new(ModelChoice::RandomForest, "flights.csv", b"MONTH\n1\n", records)
    }

    #[test]
    fn test_insert_and_get() {
        let store = DatasetStore::new();
        let summary = store.insert(sample_set(&["Delta", "United", "Delta"]));

        assert_eq!(summary.record_count, 3);
        assert_eq!(summary.carriers, vec!["Delta", "United"]);
        assert_eq!(store.len(), 1);

        let set = store.get(&summary.dataset_id).unwrap();
        assert_eq!(set.file_name, "flights.csv");
        assert_eq!(store.records(&summary.dataset_id).unwrap().len(), 3);
    }

    #[test]
    fn test_missing_dataset() {
        let store = DatasetStore::new();
        assert!(store.get("nope").is_none());
        assert!(store.summary("nope").is_none());
        assert!(!store.remove("nope"));
    }

    #[test]
    fn test_remove() {
        let store = DatasetStore::new();
        let summary = store.insert(sample_set(&["Delta"]));
        assert!(store.remove(&summary.dataset_id));
        assert!(store.is_empty());
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let store = DatasetStore::with_capacity(2);
        let first = store.insert(sample_set(&["A"]));
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = store.insert(sample_set(&["B"]));
        std::thread::sleep(std::time::Duration::from_millis(2));
        let third = store.insert(sample_set(&["C"]));

        assert_eq!(store.len(), 2);
        assert!(store.get(&first.dataset_id).is_none());
        assert!(store.get(&second.dataset_id).is_some());
        assert!(store.get(&third.dataset_id).is_some());

        let listed: Vec<_> = store.list().into_iter().map(|s| s.dataset_id).collect();
        assert_eq!(listed, vec![third.dataset_id, second.dataset_id]);
    }

    #[test]
    fn test_checksum_is_sha256_hex() {
        assert_eq!(
            checksum(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
