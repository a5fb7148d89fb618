use super::frame::StereoFrame;
use super::handle::SoundHandle;
use super::sample_buffer::SampleBuffer;

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// One playing sound. Pitch is the playback rate; fractional positions
/// are read with linear interpolation.
#[derive(Clone, Copy, Debug)]
pub struct Voice {
    pub handle: SoundHandle,
    pub pos: f32,
    pub pitch: f32,
    pub active: bool,
}

impl Voice {
    pub fn new(handle: SoundHandle, pitch: f32) -> Self {
        Self {
            handle,
            pos: 0.0,
            pitch: pitch.clamp(0.5, 2.0),
            active: true,
        }
    }

    pub fn render_into(&mut self, buffer: &SampleBuffer, out: &mut [StereoFrame]) {
        if !self.active {
            return;
        }
        let len = buffer.data.len();
        if len == 0 {
            self.active = false;
            return;
        }

        for frame in out.iter_mut() {
            let i = self.pos as usize;
            if i + 1 >= len {
                self.active = false;
                break;
            }
            let frac = self.pos - i as f32;
            let s0 = buffer.data[i];
            let s1 = buffer.data[i + 1];
            frame.left += lerp(s0.left, s1.left, frac);
            frame.right += lerp(s0.right, s1.right, frac);
            self.pos += self.pitch;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_buffer(n: usize) -> SampleBuffer {
        SampleBuffer::from_frames((0..n).map(|i| StereoFrame::mono(i as f32)).collect())
    }

    #[test]
    fn voice_mixes_into_output_and_finishes() {
        let buffer = ramp_buffer(4);
        let mut voice = Voice::new(SoundHandle(1), 1.0);
        let mut out = [StereoFrame::zero(); 8];
        voice.render_into(&buffer, &mut out);
        assert!(!voice.active);
        assert_eq!(out[0].left, 0.0);
        assert_eq!(out[1].left, 1.0);
        assert_eq!(out[2].left, 2.0);
        // past the end nothing is added
        assert_eq!(out[4].left, 0.0);
    }

    #[test]
    fn double_pitch_reads_twice_as_fast() {
        let buffer = ramp_buffer(8);
        let mut voice = Voice::new(SoundHandle(1), 2.0);
        let mut out = [StereoFrame::zero(); 4];
        voice.render_into(&buffer, &mut out);
        assert_eq!(out[0].left, 0.0);
        assert_eq!(out[1].left, 2.0);
        assert_eq!(out[2].left, 4.0);
    }

    #[test]
    fn pitch_is_clamped_to_supported_range() {
        let voice = Voice::new(SoundHandle(1), 8.0);
        assert_eq!(voice.pitch, 2.0);
        let voice = Voice::new(SoundHandle(1), 0.01);
        assert_eq!(voice.pitch, 0.5);
    }
}
