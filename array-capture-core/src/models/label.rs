use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::config::EffectiveConfig;
use super::experiment::ExperimentMetadata;

/// One row in the label sidecar, tying a saved sample to its experimental
/// parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelEntry {
    pub id: String,
    pub experiment_id: String,
    pub doa: f64,
    pub elevation: f64,
    pub frequency: f64,
    pub amplitude: f64,
    pub category: String,
    pub gain: f32,
    pub duration: f64,
    pub created_at: String,
    /// Paths of the per-channel WAV files this entry labels.
    pub files: Vec<String>,
}

impl LabelEntry {
    /// Build the entry for one saved sample.
    pub fn for_sample(
        config: &EffectiveConfig,
        metadata: &ExperimentMetadata,
        files: &[PathBuf],
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            experiment_id: metadata.experiment_id.clone(),
            doa: metadata.doa,
            elevation: metadata.elevation,
            frequency: metadata.frequency,
            amplitude: metadata.amplitude,
            category: metadata.category.clone(),
            gain: config.gain,
            duration: config.duration_secs,
            created_at: chrono::Utc::now().to_rfc3339(),
            files: files
                .iter()
                .map(|p| p.to_string_lossy().into_owned())
                .collect(),
        }
    }
}

/// Result of persisting one captured sample.
#[derive(Debug, Clone)]
pub struct SavedSample {
    /// One mono WAV file per channel, in channel order.
    pub wav_paths: Vec<PathBuf>,

    /// The label entry appended for this sample.
    pub label: LabelEntry,
}
