use std::path::Path;

use anyhow::Context;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossbeam_channel::{Receiver, Sender};

use crate::audio_api::AudioCommand;
use crate::engines::AudioEngine;

mod engine;
mod frame;
mod handle;
mod sample_buffer;
mod voice;

pub use frame::StereoFrame;
pub use handle::{next_handle, SoundHandle};
pub use sample_buffer::SampleBuffer;

use engine::Engine;

pub struct AudioOutput {
    tx: Sender<AudioCommand>,
    sample_rate: u32,
    _stream: cpal::Stream,
}

impl AudioOutput {
    pub fn send(&self, cmd: AudioCommand) {
        let _ = self.tx.try_send(cmd);
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

pub fn start_audio() -> anyhow::Result<AudioOutput> {
    let (tx, rx) = crossbeam_channel::bounded::<AudioCommand>(1024);

    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .context("no default output device")?;
    let config = device
        .default_output_config()
        .context("no default output config")?;

    let sample_rate = config.sample_rate();
    let channels = config.channels() as usize;

    match config.sample_format() {
        cpal::SampleFormat::F32 => {
            let stream = build_output_stream_f32(&device, &config.into(), rx, channels)?;
            stream.play().context("failed to play output stream")?;
            Ok(AudioOutput {
                tx,
                sample_rate,
                _stream: stream,
            })
        }
        _ => anyhow::bail!("unsupported sample format (only f32 supported for now)"),
    }
}

fn build_output_stream_f32(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    rx: Receiver<AudioCommand>,
    channels: usize,
) -> anyhow::Result<cpal::Stream> {
    let mut engine = Engine::new();

    let err_fn = |err| log::error!("audio output stream error: {err}");

    let stream = device.build_output_stream(
        config,
        move |data: &mut [f32], _info| {
            while let Ok(cmd) = rx.try_recv() {
                engine.handle_cmd(cmd);
            }

            let n_frames = data.len() / channels;
            // casting raw floats to StereoFrames
            let frames: &mut [StereoFrame] = unsafe {
                std::slice::from_raw_parts_mut(data.as_mut_ptr() as *mut StereoFrame, n_frames)
            };
            engine.render_block(frames);
        },
        err_fn,
        None,
    )?;

    Ok(stream)
}

/// Cpal-backed implementation of the `AudioEngine` boundary. Decoding
/// happens on the caller's thread; the callback only mixes registered
/// buffers.
pub struct CpalAudioEngine {
    output: Option<AudioOutput>,
}

impl CpalAudioEngine {
    pub fn new(output: AudioOutput) -> Self {
        Self {
            output: Some(output),
        }
    }
}

impl AudioEngine for CpalAudioEngine {
    fn preload(&mut self, path: &Path) -> SoundHandle {
        let Some(output) = &self.output else {
            return SoundHandle::INVALID;
        };
        match SampleBuffer::load_wav(path, output.sample_rate()) {
            Ok(buffer) => {
                let handle = next_handle();
                log::debug!("preloaded {} as handle {}", path.display(), handle.0);
                output.send(AudioCommand::RegisterBuffer { handle, buffer });
                handle
            }
            Err(e) => {
                log::warn!("preload failed for {}: {e}", path.display());
                SoundHandle::INVALID
            }
        }
    }

    fn play(&self, handle: SoundHandle, pitch: f32) {
        if !handle.is_valid() {
            return;
        }
        if let Some(output) = &self.output {
            output.send(AudioCommand::Play { handle, pitch });
        }
    }

    fn stop_all(&self) {
        if let Some(output) = &self.output {
            output.send(AudioCommand::StopAll);
        }
    }

    fn release(&mut self) {
        // dropping the output closes the stream; second call is a no-op
        self.output.take();
    }
}
