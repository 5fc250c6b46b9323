//! Blocking fixed-duration capture on top of cpal.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SampleFormat, SupportedStreamConfig};
use parking_lot::Mutex;

use array_capture_core::models::buffer::RecordingBuffer;
use array_capture_core::models::device::InputDevice;
use array_capture_core::models::error::CaptureError;
use array_capture_core::traits::capture_provider::{CaptureProvider, CaptureRequest};

use crate::device;

/// Extra wall-clock time a capture may take beyond its nominal duration
/// before it is reported as timed out.
const CAPTURE_GRACE: Duration = Duration::from_secs(2);

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Cross-platform capture backend.
///
/// Each [`capture`](CaptureProvider::capture) call opens an input stream on
/// the requested device, collects interleaved f32 samples until the target
/// frame count is reached, and closes the stream before returning, so the
/// device is held only for the duration of the call.
pub struct CpalCapture {
    host: cpal::Host,
}

impl CpalCapture {
    pub fn new() -> Self {
        Self {
            host: cpal::default_host(),
        }
    }
}

impl Default for CpalCapture {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureProvider for CpalCapture {
    fn is_available(&self) -> bool {
        self.host
            .input_devices()
            .map(|mut devices| devices.next().is_some())
            .unwrap_or(false)
    }

    fn capture(&mut self, request: &CaptureRequest) -> Result<RecordingBuffer, CaptureError> {
        let device = device::resolve_input_device(&self.host, request.device.as_deref())?;
        let supported = supported_config(&device, request)?;
        let sample_format = supported.sample_format();
        let config: cpal::StreamConfig = supported.into();

        log::debug!(
            "capturing {} frame(s) x {} channel(s) at {} Hz ({:?})",
            request.frames(),
            request.channels,
            request.sample_rate,
            sample_format,
        );

        let target = request.frames() * request.channels as usize;
        let sink: Arc<Mutex<Vec<f32>>> = Arc::new(Mutex::new(Vec::with_capacity(target)));
        let failure: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));

        let stream = build_stream(
            &device,
            &config,
            sample_format,
            Arc::clone(&sink),
            Arc::clone(&failure),
            target,
        )?;
        stream
            .play()
            .map_err(|e| CaptureError::Stream(e.to_string()))?;

        let deadline =
            Instant::now() + Duration::from_secs_f64(request.duration_secs) + CAPTURE_GRACE;
        loop {
            if sink.lock().len() >= target {
                break;
            }
            if let Some(message) = failure.lock().take() {
                return Err(CaptureError::Stream(message));
            }
            if Instant::now() >= deadline {
                return Err(CaptureError::Timeout(
                    request.duration_secs + CAPTURE_GRACE.as_secs_f64(),
                ));
            }
            thread::sleep(POLL_INTERVAL);
        }

        // Release the device before handing the buffer back.
        drop(stream);

        let mut samples = std::mem::take(&mut *sink.lock());
        samples.truncate(target);
        Ok(RecordingBuffer::from_interleaved(
            samples,
            request.channels,
            request.sample_rate,
        ))
    }

    fn list_devices(&self) -> Result<Vec<InputDevice>, CaptureError> {
        device::list_input_devices(&self.host)
    }
}

/// Find a supported input configuration with the exact requested channel
/// count and a rate range containing the requested sample rate.
fn supported_config(
    device: &cpal::Device,
    request: &CaptureRequest,
) -> Result<SupportedStreamConfig, CaptureError> {
    device
        .supported_input_configs()
        .map_err(|e| CaptureError::Stream(e.to_string()))?
        .filter(|c| c.channels() == request.channels)
        .find(|c| {
            c.min_sample_rate().0 <= request.sample_rate
                && request.sample_rate <= c.max_sample_rate().0
        })
        .map(|c| c.with_sample_rate(cpal::SampleRate(request.sample_rate)))
        .ok_or(CaptureError::UnsupportedStreamConfig {
            channels: request.channels,
            sample_rate: request.sample_rate,
        })
}

fn build_stream(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    sample_format: SampleFormat,
    sink: Arc<Mutex<Vec<f32>>>,
    failure: Arc<Mutex<Option<String>>>,
    target: usize,
) -> Result<cpal::Stream, CaptureError> {
    match sample_format {
        SampleFormat::F32 => build_stream_typed::<f32>(device, config, sink, failure, target),
        SampleFormat::I16 => build_stream_typed::<i16>(device, config, sink, failure, target),
        SampleFormat::U16 => build_stream_typed::<u16>(device, config, sink, failure, target),
        other => Err(CaptureError::Stream(format!(
            "unsupported sample format {other:?}"
        ))),
    }
}

fn build_stream_typed<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    sink: Arc<Mutex<Vec<f32>>>,
    failure: Arc<Mutex<Option<String>>>,
    target: usize,
) -> Result<cpal::Stream, CaptureError>
where
    T: cpal::SizedSample + Send + 'static,
    f32: FromSample<T>,
{
    device
        .build_input_stream(
            config,
            move |data: &[T], _: &cpal::InputCallbackInfo| {
                let mut sink = sink.lock();
                if sink.len() >= target {
                    return;
                }
                for &sample in data {
                    if sink.len() >= target {
                        break;
                    }
                    sink.push(f32::from_sample(sample));
                }
            },
            move |err| {
                log::error!("input stream error: {}", err);
                *failure.lock() = Some(err.to_string());
            },
            None,
        )
        .map_err(|e| CaptureError::Stream(e.to_string()))
}
