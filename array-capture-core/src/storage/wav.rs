use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};

/// Write one channel of a sample as a mono 16-bit PCM WAV file.
pub fn write_mono_wav(path: &Path, sample_rate: u32, samples: &[i16]) -> Result<(), hound::Error> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec)?;
    for &sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()
}
