use std::fs;

use crate::models::buffer::RecordingBuffer;
use crate::models::config::{EffectiveConfig, HardwareConfig, RecorderConfig};
use crate::models::error::{CaptureError, ConfigError, SaveError};
use crate::models::experiment::ExperimentMetadata;
use crate::models::label::{LabelEntry, SavedSample};
use crate::processing::pcm;
use crate::storage::labels::LabelStore;
use crate::storage::paths::{self, SaveStamp};
use crate::storage::wav;
use crate::traits::capture_provider::{CaptureProvider, CaptureRequest};

/// Records fixed-duration multi-channel samples and persists them with their
/// experiment labels.
///
/// Generic over the capture backend via [`CaptureProvider`]; one recorder
/// instance covers every hardware profile through its resolved configuration.
///
/// Data flow per sample:
/// ```text
/// provider.capture → RecordingBuffer → gain → i16 PCM per channel
///                                    → ch1.wav … chN.wav → LabelStore
/// ```
pub struct DeviceRecorder<P: CaptureProvider> {
    provider: P,
    config: EffectiveConfig,
    metadata: ExperimentMetadata,
    labels: LabelStore,
}

impl<P: CaptureProvider> DeviceRecorder<P> {
    /// Resolve the effective configuration and root the label store.
    pub fn new(
        provider: P,
        hardware: &HardwareConfig,
        general: &RecorderConfig,
        metadata: ExperimentMetadata,
    ) -> Result<Self, ConfigError> {
        let config = EffectiveConfig::resolve(hardware, general)?;
        if metadata.sample_count == 0 {
            return Err(ConfigError::InvalidSampleCount);
        }

        log::info!(
            "recorder ready: type={} device={} channels={} gain={} {}s @ {} Hz",
            config.hardware_type,
            config.device.as_deref().unwrap_or("<default>"),
            config.channels,
            config.gain,
            config.duration_secs,
            config.sample_rate,
        );

        Ok(Self {
            labels: LabelStore::in_dir(&config.output_dir),
            provider,
            config,
            metadata,
        })
    }

    pub fn config(&self) -> &EffectiveConfig {
        &self.config
    }

    pub fn metadata(&self) -> &ExperimentMetadata {
        &self.metadata
    }

    pub fn label_store(&self) -> &LabelStore {
        &self.labels
    }

    /// Record one sample, blocking for the configured duration.
    ///
    /// On success the buffer shape is exactly
    /// `(duration * sample_rate, channels)`; extra trailing frames a backend
    /// delivers are dropped, short deliveries are an error.
    pub fn capture(&mut self) -> Result<RecordingBuffer, CaptureError> {
        let request = CaptureRequest {
            device: self.config.device.clone(),
            channels: self.config.channels,
            sample_rate: self.config.sample_rate,
            duration_secs: self.config.duration_secs,
        };
        let expected = self.config.frames_per_sample();

        let mut buffer = self.provider.capture(&request)?;

        if buffer.channels() != request.channels {
            return Err(CaptureError::ChannelMismatch {
                got: buffer.channels(),
                requested: request.channels,
            });
        }
        if buffer.frames() < expected {
            return Err(CaptureError::ShortCapture {
                got: buffer.frames(),
                expected,
            });
        }
        buffer.truncate_frames(expected);

        Ok(buffer)
    }

    /// Persist one captured sample: gain, one mono WAV per channel, then one
    /// label entry.
    ///
    /// Channel files already written stay on disk if a later channel fails;
    /// the label entry is appended only after every channel file succeeded.
    /// `sample_index` is the run driver's 1-based counter, embedded in file
    /// names to keep same-second saves apart.
    pub fn save(
        &self,
        buffer: &RecordingBuffer,
        sample_index: u32,
    ) -> Result<SavedSample, SaveError> {
        if buffer.channels() != self.config.channels {
            return Err(SaveError::ChannelMismatch {
                got: buffer.channels(),
                expected: self.config.channels,
            });
        }

        let stamp = SaveStamp::now();
        let dir = paths::sample_dir(&self.config.output_dir, &stamp);
        fs::create_dir_all(&dir).map_err(|e| SaveError::CreateDir {
            path: dir.clone(),
            source: e,
        })?;

        let mut wav_paths = Vec::with_capacity(buffer.channels() as usize);
        for channel in 0..buffer.channels() {
            let samples = buffer.channel(channel);
            if pcm::peak_level(&samples) * self.config.gain > 1.0 {
                log::warn!(
                    "channel {} clips at gain {}",
                    channel + 1,
                    self.config.gain
                );
            }

            let quantized = pcm::quantize_with_gain(&samples, self.config.gain);
            let name = paths::channel_file_name(
                &self.config,
                &self.metadata,
                &stamp,
                channel + 1,
                sample_index,
            );
            let path = dir.join(name);

            wav::write_mono_wav(&path, self.config.sample_rate, &quantized).map_err(|e| {
                SaveError::WavWrite {
                    channel: channel + 1,
                    path: path.clone(),
                    source: e,
                }
            })?;

            log::debug!(
                "wrote channel {} to {} (rms {:.4})",
                channel + 1,
                path.display(),
                pcm::rms_level(&samples)
            );
            wav_paths.push(path);
        }

        let label = LabelEntry::for_sample(&self.config, &self.metadata, &wav_paths);
        let total = self.labels.append(&label)?;

        log::info!(
            "sample {} saved: {} channel file(s), {} label entries",
            sample_index,
            wav_paths.len(),
            total
        );

        Ok(SavedSample { wav_paths, label })
    }
}
