//! Run directory layout and sample file naming.
//!
//! Saved samples are grouped by save-time date and time of day:
//!
//! ```text
//! output_dir/
//! ├── experiment_labels.json
//! └── 2026-08-06/
//!     └── 14-30-00/
//!         ├── 2026-08-06_respeaker_ch1_DOA30_elev0_catspeech_freq1000_gain1_amp0.5_len1_14-30-00_s1.wav
//!         └── 2026-08-06_respeaker_ch2_DOA30_elev0_catspeech_freq1000_gain1_amp0.5_len1_14-30-00_s1.wav
//! ```

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::models::config::EffectiveConfig;
use crate::models::experiment::ExperimentMetadata;

/// Name of the label sidecar at the output-directory root.
pub const LABEL_FILE_NAME: &str = "experiment_labels.json";

/// Date and time-of-day stamps for one save call.
///
/// Derived from a single clock reading so the directory name and every
/// channel file name agree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveStamp {
    /// `%Y-%m-%d`
    pub date: String,
    /// `%H-%M-%S`
    pub time: String,
}

impl SaveStamp {
    pub fn now() -> Self {
        Self::from_datetime(Local::now())
    }

    pub fn from_datetime(at: DateTime<Local>) -> Self {
        Self {
            date: at.format("%Y-%m-%d").to_string(),
            time: at.format("%H-%M-%S").to_string(),
        }
    }
}

/// Directory for one saved sample: `output_dir/<date>/<time>`.
pub fn sample_dir(output_dir: &Path, stamp: &SaveStamp) -> PathBuf {
    output_dir.join(&stamp.date).join(&stamp.time)
}

/// Label sidecar path: `output_dir/experiment_labels.json`.
pub fn label_file(output_dir: &Path) -> PathBuf {
    output_dir.join(LABEL_FILE_NAME)
}

/// File name for one channel of one saved sample.
///
/// `channel` is 1-based. The trailing `s<index>` carries the run driver's
/// sample index so two saves within the same wall-clock second cannot
/// collide.
pub fn channel_file_name(
    config: &EffectiveConfig,
    metadata: &ExperimentMetadata,
    stamp: &SaveStamp,
    channel: u16,
    sample_index: u32,
) -> String {
    format!(
        "{date}_{hw}_ch{channel}_DOA{doa}_elev{elev}_cat{cat}_freq{freq}_gain{gain}_amp{amp}_len{len}_{time}_s{index}.wav",
        date = stamp.date,
        hw = config.hardware_type,
        channel = channel,
        doa = metadata.doa,
        elev = metadata.elevation,
        cat = metadata.category,
        freq = metadata.frequency,
        gain = config.gain,
        amp = metadata.amplitude,
        len = config.duration_secs,
        time = stamp.time,
        index = sample_index,
    )
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use chrono::TimeZone;

    use super::*;

    fn config() -> EffectiveConfig {
        EffectiveConfig {
            device: None,
            hardware_type: "respeaker".into(),
            channels: 2,
            gain: 1.0,
            duration_secs: 1.0,
            sample_rate: 16000,
            output_dir: PathBuf::from("/tmp/run"),
        }
    }

    fn metadata() -> ExperimentMetadata {
        ExperimentMetadata {
            doa: 30.0,
            elevation: 0.0,
            category: "speech".into(),
            frequency: 1000.0,
            amplitude: 0.5,
            experiment_id: "exp-001".into(),
            sample_count: 1,
        }
    }

    fn stamp() -> SaveStamp {
        let at = Local.with_ymd_and_hms(2026, 8, 6, 14, 30, 0).unwrap();
        SaveStamp::from_datetime(at)
    }

    #[test]
    fn stamp_formats_date_and_time() {
        let stamp = stamp();
        assert_eq!(stamp.date, "2026-08-06");
        assert_eq!(stamp.time, "14-30-00");
    }

    #[test]
    fn sample_dir_nests_date_then_time() {
        let dir = sample_dir(Path::new("/tmp/run"), &stamp());
        assert_eq!(dir, PathBuf::from("/tmp/run/2026-08-06/14-30-00"));
    }

    #[test]
    fn label_file_sits_at_output_root() {
        let path = label_file(Path::new("/tmp/run"));
        assert_eq!(path, PathBuf::from("/tmp/run/experiment_labels.json"));
    }

    #[test]
    fn channel_file_name_embeds_every_parameter() {
        let name = channel_file_name(&config(), &metadata(), &stamp(), 1, 3);

        assert_eq!(
            name,
            "2026-08-06_respeaker_ch1_DOA30_elev0_catspeech_freq1000_gain1_amp0.5_len1_14-30-00_s3.wav"
        );
    }

    #[test]
    fn channel_and_sample_index_disambiguate() {
        let a = channel_file_name(&config(), &metadata(), &stamp(), 1, 1);
        let b = channel_file_name(&config(), &metadata(), &stamp(), 2, 1);
        let c = channel_file_name(&config(), &metadata(), &stamp(), 1, 2);

        assert_ne!(a, b);
        assert_ne!(a, c);
    }
}
