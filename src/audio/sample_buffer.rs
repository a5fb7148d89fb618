use std::path::Path;

use super::frame::StereoFrame;

/// A decoded sound, resampled to the output device rate.
#[derive(Clone, Debug)]
pub struct SampleBuffer {
    pub data: Vec<StereoFrame>,
}

impl SampleBuffer {
    pub fn from_frames(data: Vec<StereoFrame>) -> Self {
        Self { data }
    }

    /// Decode a WAV file into stereo frames at the device rate.
    pub fn load_wav(path: &Path, target_rate: u32) -> anyhow::Result<Self> {
        let mut reader = hound::WavReader::open(path)?;
        let spec = reader.spec();

        let samples: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Float => {
                reader.samples::<f32>().collect::<Result<Vec<_>, _>>()?
            }
            hound::SampleFormat::Int => {
                // scale ints into [-1, 1]
                let max = (1i64 << (spec.bits_per_sample - 1)) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|x| x as f32 / max))
                    .collect::<Result<Vec<_>, _>>()?
            }
        };

        let channels = spec.channels as usize;
        let mut frames: Vec<StereoFrame> = match channels {
            1 => samples.into_iter().map(StereoFrame::mono).collect(),
            _ => samples
                .chunks_exact(channels)
                .map(|c| StereoFrame {
                    left: c[0],
                    right: if c.len() > 1 { c[1] } else { c[0] },
                })
                .collect(),
        };

        if spec.sample_rate != target_rate {
            frames = resample_linear(&frames, spec.sample_rate, target_rate);
        }

        Ok(Self::from_frames(frames))
    }
}

// Linear resampler; good enough for short one-shot clips.
fn resample_linear(frames: &[StereoFrame], source_rate: u32, target_rate: u32) -> Vec<StereoFrame> {
    if source_rate == target_rate || frames.is_empty() {
        return frames.to_vec();
    }
    let ratio = target_rate as f64 / source_rate as f64;
    let out_len = (frames.len() as f64 * ratio).ceil() as usize;
    let mut out = Vec::with_capacity(out_len);

    for i in 0..out_len {
        let src_pos = i as f64 / ratio;
        let idx = src_pos.floor() as usize;
        let frac = (src_pos - idx as f64) as f32;
        if idx + 1 >= frames.len() {
            out.push(*frames.last().unwrap_or(&StereoFrame::zero()));
        } else {
            let a = frames[idx];
            let b = frames[idx + 1];
            out.push(StereoFrame {
                left: a.left * (1.0 - frac) + b.left * frac,
                right: a.right * (1.0 - frac) + b.right * frac,
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resample_preserves_rate_identity() {
        let frames = vec![StereoFrame::mono(0.5); 10];
        let out = resample_linear(&frames, 44100, 44100);
        assert_eq!(out.len(), 10);
    }

    #[test]
    fn upsampling_doubles_the_length() {
        let frames: Vec<StereoFrame> = (0..8).map(|i| StereoFrame::mono(i as f32)).collect();
        let out = resample_linear(&frames, 22050, 44100);
        assert_eq!(out.len(), 16);
        // interpolated midpoints sit between neighbors
        assert!((out[1].left - 0.5).abs() < 1e-6);
    }
}
