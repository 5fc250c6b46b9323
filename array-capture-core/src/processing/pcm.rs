/// Pure-math sample helpers.
///
/// All operations work on `&[f32]` buffers with no platform dependencies.
/// Extract one channel from an interleaved buffer.
///
/// - `samples`: interleaved frames `[c1, c2, ..., cN, c1, ...]`.
/// - `channels`: channels per frame.
/// - `channel`: 0-based channel to extract.
pub fn deinterleave_channel(samples: &[f32], channels: usize, channel: usize) -> Vec<f32> {
    if channels <= 1 {
        return samples.to_vec();
    }
    let frame_count = samples.len() / channels;
    let mut out = Vec::with_capacity(frame_count);
    for frame in 0..frame_count {
        out.push(samples[frame * channels + channel]);
    }
    out
}

/// Apply linear gain and quantize f32 samples to 16-bit signed PCM.
///
/// Values are clamped to ±1.0 after the gain is applied.
pub fn quantize_with_gain(samples: &[f32], gain: f32) -> Vec<i16> {
    samples
        .iter()
        .map(|&sample| {
            let clamped = (sample * gain).clamp(-1.0, 1.0);
            (clamped * i16::MAX as f32) as i16
        })
        .collect()
}

/// Compute RMS level of samples (0.0–1.0 range for normalized audio).
pub fn rms_level(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_sq: f32 = samples.iter().map(|s| s * s).sum();
    (sum_sq / samples.len() as f32).sqrt()
}

/// Compute peak absolute level of samples.
pub fn peak_level(samples: &[f32]) -> f32 {
    samples.iter().map(|s| s.abs()).fold(0.0f32, f32::max)
}
