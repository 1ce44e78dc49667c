//! Submission log store
//!
//! Append-only log of submitted form instances, persisted as one JSON array
//! in `dynamicFormsData.json`. The application never updates or deletes
//! entries.

use super::{read_json, write_json, FileResult, SUBMISSIONS_FILE};
use crate::models::SubmissionRecord;
use std::path::{Path, PathBuf};

/// Store for the append-only submission log
#[derive(Debug, Clone)]
pub struct SubmissionStore {
    path: PathBuf,
}

impl SubmissionStore {
    /// Create a store backed by `dynamicFormsData.json` inside `data_dir`
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(SUBMISSIONS_FILE),
        }
    }

    /// Read the whole log; a missing file is an empty log
    fn read_all(&self) -> FileResult<Vec<SubmissionRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        read_json(&self.path)
    }

    /// Append one record: reads the full log, pushes, writes back
    pub fn append(&self, record: SubmissionRecord) -> FileResult<()> {
        let mut records = self.read_all()?;
        records.push(record);
        write_json(&self.path, &records)?;

        log::info!("Appended submission ({} total)", records.len());
        Ok(())
    }

    /// All records in insertion order
    pub fn list(&self) -> FileResult<Vec<SubmissionRecord>> {
        self.read_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Map, Value};
    use tempfile::TempDir;

    fn record(title: &str, key: &str, value: &str) -> SubmissionRecord {
        let mut data = Map::new();
        data.insert(key.to_string(), Value::String(value.to_string()));
        SubmissionRecord {
            data,
            timestamp: chrono::Utc::now().to_rfc3339(),
            form_title: title.to_string(),
        }
    }

    #[test]
    fn test_append_preserves_insertion_order() {
        let temp_dir = TempDir::new().unwrap();
        let store = SubmissionStore::new(temp_dir.path());

        store.append(record("Form A", "name", "first")).unwrap();
        store.append(record("Form B", "name", "second")).unwrap();

        let records = store.list().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].form_title, "Form A");
        assert_eq!(records[1].form_title, "Form B");
    }

    #[test]
    fn test_list_on_empty_store() {
        let temp_dir = TempDir::new().unwrap();
        let store = SubmissionStore::new(temp_dir.path());

        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_persisted_shape_is_a_json_array() {
        let temp_dir = TempDir::new().unwrap();
        let store = SubmissionStore::new(temp_dir.path());

        store.append(record("Form A", "name", "Ana")).unwrap();

        let raw = std::fs::read_to_string(temp_dir.path().join(SUBMISSIONS_FILE)).unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();
        assert!(value.is_array());
        assert_eq!(value[0]["formTitle"], "Form A");
        assert_eq!(value[0]["data"]["name"], "Ana");
        assert!(value[0]["timestamp"].is_string());
    }
}
