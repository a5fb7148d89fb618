// Boundaries to the platform: audio playback, haptic feedback, analytics.
// The reducer only ever talks to these traits, so tests swap in fakes.

use std::io::Write;
use std::path::Path;

use crate::audio::SoundHandle;

/// Abstraction over sound playback.
/// Implementations: CpalAudioEngine (cpal thread), fakes in tests.
pub trait AudioEngine {
    /// Decode a sound file into an engine buffer for instant playback.
    /// Returns `SoundHandle::INVALID` when the file can't be loaded;
    /// playing an invalid handle is a silent no-op.
    fn preload(&mut self, path: &Path) -> SoundHandle;

    /// Fire-and-forget playback of a preloaded sound.
    /// pitch is the playback rate: 0.5 (half) to 2.0 (double).
    fn play(&self, handle: SoundHandle, pitch: f32);

    fn stop_all(&self);

    /// Drop buffers and close the device. Safe to call more than once.
    fn release(&mut self);
}

/// Physical feedback. On mobile this would be a vibrator; in a terminal
/// the best we have is the bell.
pub trait HapticEngine {
    fn impact(&mut self, intensity: f32);
    fn vibrate(&mut self, duration_ms: u64);
    fn release(&mut self);
}

/// Event tracking boundary. In a real deployment this would wrap an
/// analytics backend; here it goes to the log.
pub trait AnalyticsLogger {
    fn log_app_open(&mut self);
    fn log_sound_played(&mut self, sound_id: &str);
    fn log_interaction(&mut self, pointer_count: u32);
}

/// Terminal bell as a stand-in haptic. Strong impacts ring the bell,
/// weak ones are dropped so rapid tapping doesn't turn into a siren.
pub struct TerminalHaptics {
    released: bool,
}

impl TerminalHaptics {
    pub fn new() -> Self {
        Self { released: false }
    }
}

impl Default for TerminalHaptics {
    fn default() -> Self {
        Self::new()
    }
}

impl HapticEngine for TerminalHaptics {
    fn impact(&mut self, intensity: f32) {
        if self.released || intensity < 0.75 {
            return;
        }
        // best effort; a failed write is not worth surfacing
        let mut out = std::io::stdout();
        let _ = out.write_all(b"\x07");
        let _ = out.flush();
    }

    fn vibrate(&mut self, duration_ms: u64) {
        if self.released {
            return;
        }
        log::debug!("haptic vibrate {duration_ms}ms");
    }

    fn release(&mut self) {
        self.released = true;
    }
}

/// Log-backed analytics.
#[derive(Default)]
pub struct LogAnalytics;

impl AnalyticsLogger for LogAnalytics {
    fn log_app_open(&mut self) {
        log::info!("analytics: app_open");
    }

    fn log_sound_played(&mut self, sound_id: &str) {
        log::info!("analytics: sound_played id={sound_id}");
    }

    fn log_interaction(&mut self, pointer_count: u32) {
        log::info!("analytics: interaction pointers={pointer_count}");
    }
}
