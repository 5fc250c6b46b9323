use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while resolving the effective recorder configuration.
///
/// All of these are fatal to the run and surfaced at construction; there is
/// nothing to retry.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("hardware type missing from both the hardware and recorder configuration")]
    MissingHardwareType,

    #[error("channel count must be a positive integer")]
    InvalidChannelCount,

    #[error("sample rate must be positive")]
    InvalidSampleRate,

    #[error("duration must be positive, got {0}")]
    InvalidDuration(f64),

    #[error("gain must be a finite number, got {0}")]
    InvalidGain(f32),

    #[error("sample count must be at least 1")]
    InvalidSampleCount,
}

/// Errors raised by a capture backend while recording one sample.
///
/// The current sample is skipped and nothing is written; the run driver
/// decides whether to continue the sample loop.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("input device not available: {0}")]
    DeviceNotAvailable(String),

    #[error("no supported input configuration for {channels} channel(s) at {sample_rate} Hz")]
    UnsupportedStreamConfig { channels: u16, sample_rate: u32 },

    #[error("audio stream failed: {0}")]
    Stream(String),

    #[error("backend delivered {got} channel(s), requested {requested}")]
    ChannelMismatch { got: u16, requested: u16 },

    #[error("capture delivered {got} frames, expected {expected}")]
    ShortCapture { got: usize, expected: usize },

    #[error("capture timed out after {0:.1}s")]
    Timeout(f64),
}

/// Errors raised while appending to the label sidecar.
#[derive(Debug, Error)]
pub enum LabelError {
    #[error("failed to serialize label entry: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to write label file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Errors raised while persisting one captured sample.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("buffer has {got} channel(s), recorder is configured for {expected}")]
    ChannelMismatch { got: u16, expected: u16 },

    #[error("failed to create sample directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write channel {channel} file {path}: {source}")]
    WavWrite {
        channel: u16,
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    /// The channel files are already on disk when this is raised; audio and
    /// labels disagree until the caller reconciles them.
    #[error("audio saved but label append failed: {0}")]
    Label(#[from] LabelError),
}
