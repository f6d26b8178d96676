use hound::{SampleFormat, WavReader};
use std::path::Path;
use tracing::debug;

use crate::error::{Result, SampleRmsError};

/// Frames decoded per read.
pub const CHUNK_FRAMES: usize = 1024;

/// One channel of a file, one amplitude per frame.
pub type SampleBuffer = Vec<f32>;

/// Decodes every frame of `channel` from the WAV file at `file_path`.
///
/// Integer PCM is scaled to `[-1.0, 1.0)` by its bit depth; float data is
/// passed through unchanged.
pub fn read_channel(file_path: &Path, channel: usize) -> Result<SampleBuffer> {
    debug!("Reading WAV file from {}", file_path.display());
    let mut reader =
        WavReader::open(file_path).map_err(|e| SampleRmsError::decode(file_path, e))?;
    let spec = reader.spec();
    let channels = usize::from(spec.channels);
    if channel >= channels {
        return Err(SampleRmsError::decode(
            file_path,
            format!("channel {channel} requested but file has {channels} channel(s)"),
        ));
    }
    let total_frames = reader.duration() as usize;

    let buffer = match spec.sample_format {
        SampleFormat::Float => read_frames(
            file_path,
            reader.samples::<f32>(),
            channels,
            channel,
            total_frames,
            |s| s,
        )?,
        SampleFormat::Int => {
            let full_scale = (1u64 << spec.bits_per_sample.saturating_sub(1)) as f64;
            read_frames(
                file_path,
                reader.samples::<i32>(),
                channels,
                channel,
                total_frames,
                |s| (f64::from(s) / full_scale) as f32,
            )?
        }
    };

    debug!(
        "Read {} frames ({} Hz, {} bit, {} channels)",
        buffer.len(),
        spec.sample_rate,
        spec.bits_per_sample,
        spec.channels
    );
    Ok(buffer)
}

fn read_frames<S, I, F>(
    file_path: &Path,
    mut samples: I,
    channels: usize,
    channel: usize,
    total_frames: usize,
    to_f32: F,
) -> Result<SampleBuffer>
where
    S: Copy,
    I: Iterator<Item = hound::Result<S>>,
    F: Fn(S) -> f32,
{
    // The header's frame count is unverified until the data is read.
    let mut buffer = Vec::with_capacity(total_frames.min(CHUNK_FRAMES * 64));
    let mut chunk = Vec::with_capacity(CHUNK_FRAMES * channels);

    while buffer.len() < total_frames {
        chunk.clear();
        let wanted = CHUNK_FRAMES.min(total_frames - buffer.len()) * channels;
        for sample in samples.by_ref().take(wanted) {
            chunk.push(sample.map_err(|e| SampleRmsError::decode(file_path, e))?);
        }

        // A short read would otherwise spin forever.
        if chunk.len() < channels {
            return Err(SampleRmsError::decode(
                file_path,
                format!(
                    "sample data ends after {} of {} frames",
                    buffer.len(),
                    total_frames
                ),
            ));
        }
        buffer.extend(chunk.chunks_exact(channels).map(|frame| to_f32(frame[channel])));
    }

    Ok(buffer)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use hound::{SampleFormat, WavSpec, WavWriter};
    use std::path::Path;

    pub fn float_spec(channels: u16) -> WavSpec {
        WavSpec {
            channels,
            sample_rate: 44_100,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        }
    }

    /// Writes interleaved float samples.
    pub fn write_float_wav(path: &Path, channels: u16, samples: &[f32]) {
        let mut writer = WavWriter::create(path, float_spec(channels)).unwrap();
        for &sample in samples {
            writer.write_sample(sample).unwrap();
        }
        writer.finalize().unwrap();
    }

    pub fn write_i16_wav(path: &Path, channels: u16, samples: &[i16]) {
        let spec = WavSpec {
            channels,
            sample_rate: 48_000,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(path, spec).unwrap();
        for &sample in samples {
            writer.write_sample(sample).unwrap();
        }
        writer.finalize().unwrap();
    }
}
