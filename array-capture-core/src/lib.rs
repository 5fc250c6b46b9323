//! # array-capture-core
//!
//! Backend-agnostic core for recording labeled multi-channel audio samples
//! from microphone-array hardware during data-collection experiments.
//!
//! Capture backends (cpal, test mocks) implement the [`CaptureProvider`]
//! trait and plug into the generic [`DeviceRecorder`], which records one
//! fixed-duration sample at a time and persists it as per-channel mono WAV
//! files plus one row in a cumulative JSON label sidecar.
//!
//! ## Architecture
//!
//! ```text
//! array-capture-core (this crate)
//! ├── traits/       ← CaptureProvider
//! ├── models/       ← RecorderConfig, HardwareConfig, EffectiveConfig,
//! │                   ExperimentMetadata, RecordingBuffer, LabelEntry, errors
//! ├── processing/   ← gain + 16-bit PCM quantization, channel extraction
//! ├── session/      ← DeviceRecorder (generic orchestrator)
//! └── storage/      ← run layout, WAV output, label store
//! ```

pub mod models;
pub mod processing;
pub mod session;
pub mod storage;
pub mod traits;

// Re-export key types at crate root for convenience.
pub use models::buffer::RecordingBuffer;
pub use models::config::{EffectiveConfig, HardwareConfig, RecorderConfig};
pub use models::device::InputDevice;
pub use models::error::{CaptureError, ConfigError, LabelError, SaveError};
pub use models::experiment::ExperimentMetadata;
pub use models::label::{LabelEntry, SavedSample};
pub use session::recorder::DeviceRecorder;
pub use storage::labels::LabelStore;
pub use traits::capture_provider::{CaptureProvider, CaptureRequest};
