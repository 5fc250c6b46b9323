use crate::models::buffer::RecordingBuffer;
use crate::models::device::InputDevice;
use crate::models::error::CaptureError;

/// Parameters for one fixed-duration capture.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureRequest {
    /// Device identifier, `None` for the system default input.
    pub device: Option<String>,

    /// Channels to record.
    pub channels: u16,

    /// Capture sample rate in Hz.
    pub sample_rate: u32,

    /// Capture length in seconds.
    pub duration_secs: f64,
}

impl CaptureRequest {
    /// Frames per channel this request asks for.
    pub fn frames(&self) -> usize {
        (self.duration_secs * self.sample_rate as f64) as usize
    }
}

/// Interface for platform audio capture backends.
///
/// Implemented by `CpalCapture` in the companion backend crate; tests use
/// in-memory providers.
pub trait CaptureProvider {
    /// Whether any input device backing this provider is available.
    fn is_available(&self) -> bool;

    /// Record `request.frames()` frames, blocking until the capture is done.
    ///
    /// The device is held exclusively for the duration of the call; callers
    /// must not start a second capture on the same device while one is
    /// running. Backends may deliver extra trailing frames; they must never
    /// deliver fewer without returning an error.
    fn capture(&mut self, request: &CaptureRequest) -> Result<RecordingBuffer, CaptureError>;

    /// Input devices visible to this backend.
    fn list_devices(&self) -> Result<Vec<InputDevice>, CaptureError>;
}
