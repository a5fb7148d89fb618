use std::collections::HashMap;

use crate::audio_api::AudioCommand;

use super::frame::StereoFrame;
use super::handle::SoundHandle;
use super::sample_buffer::SampleBuffer;
use super::voice::Voice;

// Hard cap so rapid multi-tapping can't grow the voice list inside the
// audio callback. Past the cap the oldest voice is stolen.
const MAX_VOICES: usize = 32;

/// Runs entirely on the cpal callback thread. Commands arrive over the
/// channel drained in `handle_cmd`; unknown or invalid handles are ignored.
pub struct Engine {
    buffers: HashMap<SoundHandle, SampleBuffer>,
    voices: Vec<Voice>,
}

impl Engine {
    pub fn new() -> Self {
        Self {
            buffers: HashMap::new(),
            voices: Vec::with_capacity(MAX_VOICES),
        }
    }

    pub fn handle_cmd(&mut self, cmd: AudioCommand) {
        match cmd {
            AudioCommand::RegisterBuffer { handle, buffer } => {
                self.buffers.insert(handle, buffer);
            }
            AudioCommand::Play { handle, pitch } => self.trigger(handle, pitch),
            AudioCommand::StopAll => self.voices.clear(),
        }
    }

    fn trigger(&mut self, handle: SoundHandle, pitch: f32) {
        if !handle.is_valid() || !self.buffers.contains_key(&handle) {
            return;
        }
        if self.voices.len() >= MAX_VOICES {
            // steal the oldest voice
            self.voices.remove(0);
        }
        self.voices.push(Voice::new(handle, pitch));
    }

    pub fn render_block(&mut self, out: &mut [StereoFrame]) {
        for frame in out.iter_mut() {
            *frame = StereoFrame::zero();
        }
        for voice in &mut self.voices {
            if let Some(buffer) = self.buffers.get(&voice.handle) {
                voice.render_into(buffer, out);
            } else {
                voice.active = false;
            }
        }
        self.voices.retain(|v| v.active);
    }

    #[cfg(test)]
    pub fn active_voices(&self) -> usize {
        self.voices.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constant_buffer(n: usize, value: f32) -> SampleBuffer {
        SampleBuffer::from_frames(vec![StereoFrame::mono(value); n])
    }

    #[test]
    fn play_without_register_is_a_no_op() {
        let mut engine = Engine::new();
        engine.handle_cmd(AudioCommand::Play {
            handle: SoundHandle(7),
            pitch: 1.0,
        });
        assert_eq!(engine.active_voices(), 0);
    }

    #[test]
    fn invalid_handle_is_silently_ignored() {
        let mut engine = Engine::new();
        engine.handle_cmd(AudioCommand::Play {
            handle: SoundHandle::INVALID,
            pitch: 1.0,
        });
        assert_eq!(engine.active_voices(), 0);
    }

    #[test]
    fn registered_buffer_mixes_into_the_block() {
        let mut engine = Engine::new();
        let handle = SoundHandle(1);
        engine.handle_cmd(AudioCommand::RegisterBuffer {
            handle,
            buffer: constant_buffer(64, 0.25),
        });
        engine.handle_cmd(AudioCommand::Play { handle, pitch: 1.0 });

        let mut out = [StereoFrame::zero(); 16];
        engine.render_block(&mut out);
        assert!((out[0].left - 0.25).abs() < 1e-6);
        assert_eq!(engine.active_voices(), 1);
    }

    #[test]
    fn stop_all_kills_every_voice() {
        let mut engine = Engine::new();
        let handle = SoundHandle(1);
        engine.handle_cmd(AudioCommand::RegisterBuffer {
            handle,
            buffer: constant_buffer(1024, 0.5),
        });
        engine.handle_cmd(AudioCommand::Play { handle, pitch: 1.0 });
        engine.handle_cmd(AudioCommand::Play { handle, pitch: 1.5 });
        engine.handle_cmd(AudioCommand::StopAll);
        assert_eq!(engine.active_voices(), 0);
    }

    #[test]
    fn voice_pool_is_capped() {
        let mut engine = Engine::new();
        let handle = SoundHandle(1);
        engine.handle_cmd(AudioCommand::RegisterBuffer {
            handle,
            buffer: constant_buffer(1 << 20, 0.1),
        });
        for _ in 0..(MAX_VOICES + 8) {
            engine.handle_cmd(AudioCommand::Play { handle, pitch: 1.0 });
        }
        assert_eq!(engine.active_voices(), MAX_VOICES);
    }
}
