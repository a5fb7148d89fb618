pub use crate::audio::{SampleBuffer, SoundHandle};

// Commands crossing into the cpal callback thread. The engine can't touch
// the filesystem (that would stall the callback), so buffers are decoded
// up front and registered, then triggered by handle.
#[derive(Clone, Debug)]
pub enum AudioCommand {
    RegisterBuffer { handle: SoundHandle, buffer: SampleBuffer },

    // fire-and-forget playback of a registered buffer
    Play { handle: SoundHandle, pitch: f32 },

    StopAll,
}
