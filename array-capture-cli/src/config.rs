use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use array_capture_core::{ExperimentMetadata, HardwareConfig, RecorderConfig};

/// On-disk run configuration.
///
/// ```toml
/// selected_hardware = "respeaker"
///
/// [recorder]
/// duration_secs = 1.0
/// sample_rate = 16000
/// channels = 2
/// output_dir = "/data/run"
///
/// [hardware.respeaker]
/// device_id = "ReSpeaker 4 Mic Array"
/// type = "respeaker"
/// channels = 6
/// gain = 2.0
///
/// [experiment]
/// doa = 30.0
/// elevation = 0.0
/// category = "speech"
/// frequency = 1000.0
/// amplitude = 0.5
/// experiment_id = "exp-001"
/// sample_count = 10
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Hardware profile used when the command line does not name one.
    pub selected_hardware: String,

    pub recorder: RecorderConfig,

    /// Hardware profiles by name.
    pub hardware: BTreeMap<String, HardwareConfig>,

    pub experiment: ExperimentMetadata,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("error deserializing TOML: {0}")]
    Read(#[from] toml::de::Error),

    #[error("unknown hardware profile {0:?}")]
    UnknownHardware(String),
}

impl RunConfig {
    pub fn read(path: &Path) -> Result<Self, Error> {
        let toml = std::fs::read_to_string(path)?;
        let config = toml::from_str(&toml)?;
        Ok(config)
    }

    /// Look up a hardware profile by name.
    pub fn profile(&self, name: &str) -> Result<&HardwareConfig, Error> {
        self.hardware
            .get(name)
            .ok_or_else(|| Error::UnknownHardware(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        selected_hardware = "respeaker"

        [recorder]
        duration_secs = 1.0
        sample_rate = 16000
        channels = 2
        output_dir = "/tmp/run"

        [hardware.respeaker]
        device_id = "ReSpeaker 4 Mic Array"
        type = "respeaker"
        channels = 6
        gain = 2.0

        [hardware.minidsp]
        type = "minidsp"

        [experiment]
        doa = 30.0
        elevation = 0.0
        category = "speech"
        frequency = 1000.0
        amplitude = 0.5
        experiment_id = "exp-001"
        sample_count = 10
    "#;

    #[test]
    fn parses_a_full_run_file() {
        let config: RunConfig = toml::from_str(SAMPLE).unwrap();

        assert_eq!(config.selected_hardware, "respeaker");
        assert_eq!(config.recorder.sample_rate, 16000);
        assert_eq!(config.experiment.sample_count, 10);

        let respeaker = config.profile("respeaker").unwrap();
        assert_eq!(respeaker.hardware_type.as_deref(), Some("respeaker"));
        assert_eq!(respeaker.channels, Some(6));
    }

    #[test]
    fn recorder_gain_defaults_to_unity() {
        let config: RunConfig = toml::from_str(SAMPLE).unwrap();
        assert_eq!(config.recorder.gain, 1.0);
    }

    #[test]
    fn sparse_profiles_leave_overrides_unset() {
        let config: RunConfig = toml::from_str(SAMPLE).unwrap();

        let minidsp = config.profile("minidsp").unwrap();
        assert_eq!(minidsp.device_id, None);
        assert_eq!(minidsp.channels, None);
        assert_eq!(minidsp.gain, None);
    }

    #[test]
    fn unknown_profile_is_an_error() {
        let config: RunConfig = toml::from_str(SAMPLE).unwrap();

        assert!(matches!(
            config.profile("umik"),
            Err(Error::UnknownHardware(_))
        ));
    }
}
