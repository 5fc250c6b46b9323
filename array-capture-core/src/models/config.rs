use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

fn default_gain() -> f32 {
    1.0
}

/// General recorder configuration shared by every hardware profile.
///
/// Owned by the run driver and passed by reference to the recorder; immutable
/// for the duration of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecorderConfig {
    /// Length of one sample in seconds.
    pub duration_secs: f64,

    /// Capture sample rate in Hz.
    pub sample_rate: u32,

    /// Channel count used when the hardware profile does not override it.
    pub channels: u16,

    /// Root directory for recorded samples and the label sidecar.
    pub output_dir: PathBuf,

    /// Linear gain applied before quantization (default: 1.0).
    #[serde(default = "default_gain")]
    pub gain: f32,

    /// Fallback device identifier. `None` selects the system default input.
    #[serde(default)]
    pub device: Option<String>,

    /// Fallback hardware family label.
    #[serde(default, rename = "type")]
    pub hardware_type: Option<String>,
}

/// Hardware-specific configuration for one microphone array.
///
/// Any value present here takes precedence over the corresponding
/// `RecorderConfig` value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HardwareConfig {
    /// Opaque device identifier, resolved by the capture backend.
    #[serde(default)]
    pub device_id: Option<String>,

    /// Hardware family label (e.g. "respeaker", "minidsp").
    #[serde(default, rename = "type")]
    pub hardware_type: Option<String>,

    /// Overrides `RecorderConfig::channels` when set.
    #[serde(default)]
    pub channels: Option<u16>,

    /// Overrides `RecorderConfig::gain` when set.
    #[serde(default)]
    pub gain: Option<f32>,
}

/// Fully-resolved configuration for one run.
///
/// Field precedence, hardware profile first:
///
/// | field                             | hardware | general  |
/// |-----------------------------------|----------|----------|
/// | device                            | wins     | fallback |
/// | hardware type                     | wins     | fallback |
/// | channels                          | wins     | fallback |
/// | gain                              | wins     | fallback |
/// | duration, sample rate, output dir | —        | always   |
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveConfig {
    /// Device identifier, `None` for the system default input.
    pub device: Option<String>,
    pub hardware_type: String,
    pub channels: u16,
    pub gain: f32,
    pub duration_secs: f64,
    pub sample_rate: u32,
    pub output_dir: PathBuf,
}

impl EffectiveConfig {
    /// Merge a hardware profile over the general recorder configuration.
    pub fn resolve(
        hardware: &HardwareConfig,
        general: &RecorderConfig,
    ) -> Result<Self, ConfigError> {
        let resolved = Self {
            device: hardware
                .device_id
                .clone()
                .or_else(|| general.device.clone()),
            hardware_type: hardware
                .hardware_type
                .clone()
                .or_else(|| general.hardware_type.clone())
                .ok_or(ConfigError::MissingHardwareType)?,
            channels: hardware.channels.unwrap_or(general.channels),
            gain: hardware.gain.unwrap_or(general.gain),
            duration_secs: general.duration_secs,
            sample_rate: general.sample_rate,
            output_dir: general.output_dir.clone(),
        };
        resolved.validate()?;
        Ok(resolved)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.channels == 0 {
            return Err(ConfigError::InvalidChannelCount);
        }
        if self.sample_rate == 0 {
            return Err(ConfigError::InvalidSampleRate);
        }
        if self.duration_secs <= 0.0 {
            return Err(ConfigError::InvalidDuration(self.duration_secs));
        }
        if !self.gain.is_finite() {
            return Err(ConfigError::InvalidGain(self.gain));
        }
        Ok(())
    }

    /// Frames captured per channel for one sample.
    pub fn frames_per_sample(&self) -> usize {
        (self.duration_secs * self.sample_rate as f64) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn general() -> RecorderConfig {
        RecorderConfig {
            duration_secs: 1.0,
            sample_rate: 16000,
            channels: 2,
            output_dir: PathBuf::from("/tmp/run"),
            gain: 1.0,
            device: None,
            hardware_type: Some("generic".into()),
        }
    }

    #[test]
    fn hardware_values_win_when_set() {
        let hardware = HardwareConfig {
            device_id: Some("hw:1".into()),
            hardware_type: Some("respeaker".into()),
            channels: Some(6),
            gain: Some(2.5),
        };

        let effective = EffectiveConfig::resolve(&hardware, &general()).unwrap();

        assert_eq!(effective.device.as_deref(), Some("hw:1"));
        assert_eq!(effective.hardware_type, "respeaker");
        assert_eq!(effective.channels, 6);
        assert_eq!(effective.gain, 2.5);
    }

    #[test]
    fn general_values_fill_gaps() {
        let effective =
            EffectiveConfig::resolve(&HardwareConfig::default(), &general()).unwrap();

        assert_eq!(effective.device, None);
        assert_eq!(effective.hardware_type, "generic");
        assert_eq!(effective.channels, 2);
        assert_eq!(effective.gain, 1.0);
        assert_eq!(effective.sample_rate, 16000);
        assert_eq!(effective.duration_secs, 1.0);
    }

    #[test]
    fn missing_type_on_both_sources_is_an_error() {
        let mut config = general();
        config.hardware_type = None;

        let result = EffectiveConfig::resolve(&HardwareConfig::default(), &config);

        assert_eq!(result.unwrap_err(), ConfigError::MissingHardwareType);
    }

    #[test]
    fn zero_channels_rejected() {
        let hardware = HardwareConfig {
            channels: Some(0),
            ..HardwareConfig::default()
        };

        let result = EffectiveConfig::resolve(&hardware, &general());

        assert_eq!(result.unwrap_err(), ConfigError::InvalidChannelCount);
    }

    #[test]
    fn non_positive_duration_rejected() {
        let mut config = general();
        config.duration_secs = 0.0;

        let result = EffectiveConfig::resolve(&HardwareConfig::default(), &config);

        assert!(matches!(result, Err(ConfigError::InvalidDuration(_))));
    }

    #[test]
    fn frames_per_sample_is_duration_times_rate() {
        let effective =
            EffectiveConfig::resolve(&HardwareConfig::default(), &general()).unwrap();
        assert_eq!(effective.frames_per_sample(), 16000);

        let mut config = general();
        config.duration_secs = 0.5;
        let effective = EffectiveConfig::resolve(&HardwareConfig::default(), &config).unwrap();
        assert_eq!(effective.frames_per_sample(), 8000);
    }
}
