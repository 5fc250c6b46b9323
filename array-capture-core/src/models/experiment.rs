use serde::{Deserialize, Serialize};

/// Experiment metadata for one data-collection run.
///
/// Read-only once constructed; consumed by both file naming and label
/// entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentMetadata {
    /// Direction of arrival of the sound source, in degrees.
    pub doa: f64,

    /// Source elevation, in degrees.
    pub elevation: f64,

    /// Sound category label (e.g. "speech", "sine").
    pub category: String,

    /// Stimulus frequency in Hz.
    pub frequency: f64,

    /// Stimulus amplitude, normalized.
    pub amplitude: f64,

    /// Unique identifier for this run.
    pub experiment_id: String,

    /// Number of samples to record, at least 1.
    pub sample_count: u32,
}
