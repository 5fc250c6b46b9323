/// One captured multi-channel sample.
///
/// Samples are interleaved f32 frames (`[c1, c2, ..., cN, c1, ...]`),
/// normalized to ±1.0. Produced by one capture call, consumed exactly once by
/// the save step, then discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingBuffer {
    samples: Vec<f32>,
    channels: u16,
    sample_rate: u32,
}

impl RecordingBuffer {
    /// Wrap an interleaved sample buffer.
    ///
    /// `samples.len()` must be a whole number of frames.
    pub fn from_interleaved(samples: Vec<f32>, channels: u16, sample_rate: u32) -> Self {
        debug_assert!(channels > 0);
        debug_assert_eq!(samples.len() % channels as usize, 0);
        Self {
            samples,
            channels,
            sample_rate,
        }
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of frames per channel.
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    /// The raw interleaved samples.
    pub fn interleaved(&self) -> &[f32] {
        &self.samples
    }

    /// De-interleaved copy of one channel (0-based).
    pub fn channel(&self, channel: u16) -> Vec<f32> {
        self.samples
            .iter()
            .skip(channel as usize)
            .step_by(self.channels as usize)
            .copied()
            .collect()
    }

    /// Drop frames beyond `frames`, keeping the leading portion.
    pub fn truncate_frames(&mut self, frames: usize) {
        let keep = frames * self.channels as usize;
        if keep < self.samples.len() {
            self.samples.truncate(keep);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_counts_per_channel() {
        let buffer = RecordingBuffer::from_interleaved(vec![0.0; 8], 2, 16000);
        assert_eq!(buffer.frames(), 4);
        assert_eq!(buffer.channels(), 2);
        assert_eq!(buffer.sample_rate(), 16000);
    }

    #[test]
    fn channel_deinterleaves() {
        let buffer =
            RecordingBuffer::from_interleaved(vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6], 2, 16000);
        assert_eq!(buffer.channel(0), vec![0.1, 0.3, 0.5]);
        assert_eq!(buffer.channel(1), vec![0.2, 0.4, 0.6]);
    }

    #[test]
    fn truncate_drops_trailing_frames() {
        let mut buffer =
            RecordingBuffer::from_interleaved(vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6], 2, 16000);

        buffer.truncate_frames(2);

        assert_eq!(buffer.frames(), 2);
        assert_eq!(buffer.interleaved(), &[0.1, 0.2, 0.3, 0.4]);
    }

    #[test]
    fn truncate_beyond_length_is_a_no_op() {
        let mut buffer = RecordingBuffer::from_interleaved(vec![0.1, 0.2], 2, 16000);

        buffer.truncate_frames(10);

        assert_eq!(buffer.frames(), 1);
    }
}
