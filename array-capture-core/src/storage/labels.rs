//! Cumulative label sidecar.
//!
//! One JSON array at `output_dir/experiment_labels.json`, one element per
//! saved sample. Appending is a whole-file read-modify-write, not an atomic
//! append: the file must have a single writer per output directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::models::error::LabelError;
use crate::models::label::LabelEntry;

use super::paths;

/// Append-only store for label entries.
///
/// Holds no open file handle; each append opens, rewrites, and closes the
/// sidecar.
#[derive(Debug, Clone)]
pub struct LabelStore {
    path: PathBuf,
}

impl LabelStore {
    /// Store rooted at `output_dir/experiment_labels.json`.
    pub fn in_dir(output_dir: &Path) -> Self {
        Self {
            path: paths::label_file(output_dir),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry and rewrite the file. Returns the new length.
    ///
    /// A missing or unparseable file starts a fresh array. Existing array
    /// elements that are not `LabelEntry`-shaped are carried through
    /// untouched.
    pub fn append(&self, entry: &LabelEntry) -> Result<usize, LabelError> {
        let mut values = self.load_values();

        let value = serde_json::to_value(entry).map_err(LabelError::Serialize)?;
        values.push(value);

        let json = serde_json::to_string_pretty(&values).map_err(LabelError::Serialize)?;
        fs::write(&self.path, json).map_err(|e| LabelError::Write {
            path: self.path.clone(),
            source: e,
        })?;

        Ok(values.len())
    }

    /// Entries currently on disk that parse as `LabelEntry`.
    pub fn entries(&self) -> Vec<LabelEntry> {
        self.load_values()
            .into_iter()
            .filter_map(|v| serde_json::from_value(v).ok())
            .collect()
    }

    /// Number of rows currently on disk.
    pub fn len(&self) -> usize {
        self.load_values().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn load_values(&self) -> Vec<Value> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(_) => return Vec::new(),
        };

        match serde_json::from_str(&json) {
            Ok(Value::Array(values)) => values,
            Ok(_) | Err(_) => {
                log::warn!(
                    "label file {} is not a JSON array, starting a fresh one",
                    self.path.display()
                );
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::models::config::EffectiveConfig;
    use crate::models::experiment::ExperimentMetadata;

    use super::*;

    fn entry(output_dir: &Path) -> LabelEntry {
        let config = EffectiveConfig {
            device: None,
            hardware_type: "respeaker".into(),
            channels: 2,
            gain: 1.0,
            duration_secs: 1.0,
            sample_rate: 16000,
            output_dir: output_dir.to_path_buf(),
        };
        let metadata = ExperimentMetadata {
            doa: 30.0,
            elevation: 0.0,
            category: "speech".into(),
            frequency: 1000.0,
            amplitude: 0.5,
            experiment_id: "exp-001".into(),
            sample_count: 1,
        };
        LabelEntry::for_sample(
            &config,
            &metadata,
            &[PathBuf::from("a.wav"), PathBuf::from("b.wav")],
        )
    }

    #[test]
    fn first_append_creates_a_one_element_array() {
        let dir = tempfile::tempdir().unwrap();
        let store = LabelStore::in_dir(dir.path());

        let len = store.append(&entry(dir.path())).unwrap();

        assert_eq!(len, 1);
        let entries = store.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].doa, 30.0);
        assert_eq!(entries[0].category, "speech");
        assert_eq!(entries[0].files.len(), 2);
    }

    #[test]
    fn append_is_length_plus_one() {
        let dir = tempfile::tempdir().unwrap();
        let store = LabelStore::in_dir(dir.path());

        for expected in 1..=3 {
            let len = store.append(&entry(dir.path())).unwrap();
            assert_eq!(len, expected);
            assert_eq!(store.len(), expected);
        }
    }

    #[test]
    fn corrupt_file_resets_to_a_fresh_array() {
        let dir = tempfile::tempdir().unwrap();
        let store = LabelStore::in_dir(dir.path());
        fs::write(store.path(), "{not json").unwrap();

        let len = store.append(&entry(dir.path())).unwrap();

        assert_eq!(len, 1);
        let json = fs::read_to_string(store.path()).unwrap();
        let values: Vec<Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(values.len(), 1);
    }

    #[test]
    fn non_array_json_resets_to_a_fresh_array() {
        let dir = tempfile::tempdir().unwrap();
        let store = LabelStore::in_dir(dir.path());
        fs::write(store.path(), "{\"doa\": 30}").unwrap();

        let len = store.append(&entry(dir.path())).unwrap();

        assert_eq!(len, 1);
    }

    #[test]
    fn foreign_array_entries_are_carried_through() {
        let dir = tempfile::tempdir().unwrap();
        let store = LabelStore::in_dir(dir.path());
        fs::write(store.path(), "[{\"legacy\": true}]").unwrap();

        let len = store.append(&entry(dir.path())).unwrap();

        assert_eq!(len, 2);
        // Only the appended row parses as a LabelEntry.
        assert_eq!(store.entries().len(), 1);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = LabelStore::in_dir(dir.path());

        assert!(store.is_empty());
        assert!(store.entries().is_empty());
    }
}
