//! # array-capture-cpal
//!
//! Cross-platform capture backend for array-capture-kit, built on `cpal`.
//!
//! Provides:
//! - `CpalCapture` — blocking fixed-duration multi-channel capture
//! - `device` — input-device resolution by name fragment or USB
//!   `VID_…&PID_…` identifier, and device listing
//!
//! ## Usage
//! ```ignore
//! use array_capture_core::{CaptureProvider, CaptureRequest};
//! use array_capture_cpal::CpalCapture;
//!
//! let mut backend = CpalCapture::new();
//! let buffer = backend.capture(&CaptureRequest {
//!     device: None,
//!     channels: 2,
//!     sample_rate: 16000,
//!     duration_secs: 1.0,
//! })?;
//! ```

pub mod capture;
pub mod device;

pub use capture::CpalCapture;
