// The canvas view-model: an intent-driven reducer over one state snapshot.
//
// All mutation happens here, single-threaded. Input handlers and the tick
// driver both funnel into this reducer, so the snapshot never needs a lock.
// Sound playback leaves through a bounded one-shot channel instead of the
// state so a redraw can never replay it.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::audio::SoundHandle;
use crate::engines::{AnalyticsLogger, AudioEngine, HapticEngine};
use crate::pack::interaction::{InteractionEvent, TriggerInteraction};
use crate::pack::model::{AnimationType, Sound};
use crate::pack::preload;
use crate::shared::{
    ActiveAnimation, CanvasIntent, CanvasSideEffect, CanvasState, GridCell, ANIMATION_MS,
    HIGHLIGHT_MS,
};

/// Energy added per tap.
const ENERGY_INCREMENT: f32 = 0.15;
/// Linear energy decay per second.
const ENERGY_DECAY_RATE: f32 = 0.8;
/// Shake is a random vector scaled by energy; this is the max amplitude
/// in screen cells.
const SHAKE_SCALE: f32 = 1.5;
/// Below this energy the canvas sits still.
const SHAKE_FLOOR: f32 = 0.1;

pub struct CanvasViewModel {
    state: CanvasState,
    trigger: TriggerInteraction,
    audio: Box<dyn AudioEngine>,
    haptics: Box<dyn HapticEngine>,
    analytics: Box<dyn AnalyticsLogger>,
    /// sound id -> preloaded engine handle
    handles: HashMap<String, SoundHandle>,
    /// fixed sorted order used for pad assignment and rotation
    sound_ids: Vec<String>,
    effects_tx: Sender<CanvasSideEffect>,
    effects_rx: Receiver<CanvasSideEffect>,
    rng: StdRng,
    next_animation_id: u64,
    last_update: Option<Duration>,
    released: bool,
}

impl CanvasViewModel {
    pub fn new(
        trigger: TriggerInteraction,
        audio: Box<dyn AudioEngine>,
        haptics: Box<dyn HapticEngine>,
        analytics: Box<dyn AnalyticsLogger>,
    ) -> Self {
        let (effects_tx, effects_rx) = crossbeam_channel::bounded(64);
        let mut vm = Self {
            state: CanvasState::default(),
            trigger,
            audio,
            haptics,
            analytics,
            handles: HashMap::new(),
            sound_ids: Vec::new(),
            effects_tx,
            effects_rx,
            rng: StdRng::from_entropy(),
            next_animation_id: 0,
            last_update: None,
            released: false,
        };
        vm.analytics.log_app_open();
        vm
    }

    pub fn state(&self) -> &CanvasState {
        &self.state
    }

    /// Preload every pack sound and assign pads. Sound ids cycle when the
    /// grid has more cells than the pack has sounds, so the assignment map
    /// always covers the full grid (empty pack leaves every pad unassigned).
    pub fn load_sounds(&mut self, pack_dir: &Path) {
        self.handles = preload::preload_all(
            self.trigger.repository().all_sounds(),
            self.audio.as_mut(),
            pack_dir,
        );
        let mut ids: Vec<String> = self.handles.keys().cloned().collect();
        ids.sort();
        self.sound_ids = ids;

        let mut assignments = HashMap::new();
        if !self.sound_ids.is_empty() {
            for row in 0..self.state.grid_rows {
                for col in 0..self.state.grid_cols {
                    let index = (row * self.state.grid_cols + col) % self.sound_ids.len();
                    assignments.insert((row, col), self.sound_ids[index].clone());
                }
            }
        }
        self.state.pad_assignments = assignments;
        self.state.loading = false;
        if !self.sound_ids.is_empty() {
            // short buzz to say the pads are live
            self.haptics.vibrate(40);
        }
    }

    pub fn handle_intent(&mut self, intent: CanvasIntent, now: Duration) {
        match intent {
            CanvasIntent::TapPad {
                x,
                y,
                screen_w,
                screen_h,
                pointer_id,
            } => self.tap_pad(x, y, screen_w, screen_h, pointer_id, now),
            CanvasIntent::RotateSound {
                x,
                y,
                screen_w,
                screen_h,
            } => self.rotate_sound(x, y, screen_w, screen_h),
            CanvasIntent::KeyPress(key) => self.key_press(key, now),
        }
    }

    fn tap_pad(&mut self, x: f32, y: f32, w: f32, h: f32, _pointer_id: i32, now: Duration) {
        let cell = grid_cell(x, y, w, h, self.state.grid_rows, self.state.grid_cols);
        let Some(sound_id) = self.state.pad_assignments.get(&cell).cloned() else {
            return; // unassigned pad, not an error
        };

        let energy = (self.state.energy + ENERGY_INCREMENT).clamp(0.0, 1.0);
        self.haptics.impact(0.5 + energy * 0.5);
        self.state.energy = energy;
        self.state
            .highlighted_pads
            .insert(cell, now + Duration::from_millis(HIGHLIGHT_MS));

        let Some(sound) = self.trigger.sound_by_id(&sound_id).cloned() else {
            return;
        };
        self.analytics.log_interaction(1);
        self.trigger_animation(&sound, (x, y), energy, now);
    }

    fn rotate_sound(&mut self, x: f32, y: f32, w: f32, h: f32) {
        let cell = grid_cell(x, y, w, h, self.state.grid_rows, self.state.grid_cols);
        let Some(current) = self.state.pad_assignments.get(&cell) else {
            return;
        };
        let Some(index) = self.sound_ids.iter().position(|id| id == current) else {
            return;
        };
        let next = self.sound_ids[(index + 1) % self.sound_ids.len()].clone();
        self.state.pad_assignments.insert(cell, next);
    }

    fn key_press(&mut self, key: char, now: Duration) {
        let event = InteractionEvent::key(key, now);
        let Some(sound) = self.trigger.resolve(&event).cloned() else {
            return; // unmapped key, not an error
        };
        // key triggers ride the current energy but don't build it
        self.haptics.impact(self.state.energy);
        self.analytics.log_interaction(1);
        let energy = self.state.energy;
        self.trigger_animation(&sound, (-1.0, -1.0), energy, event.timestamp);
    }

    fn trigger_animation(&mut self, sound: &Sound, origin: (f32, f32), energy: f32, now: Duration) {
        self.analytics.log_sound_played(&sound.id);

        let id = self.next_animation_id;
        self.next_animation_id += 1;
        let full_screen = origin.0 < 0.0 && origin.1 < 0.0;
        self.state.animations.push(ActiveAnimation {
            id,
            kind: sound.animation_type,
            origin,
            color: sound.rgb(),
            full_screen,
            progress: 0.0,
            started_at: now,
            duration_ms: ANIMATION_MS,
        });

        // hue drifts on every trigger, skipping the muddy green band
        let mut hue = (self.state.background_hue + 20.0) % 360.0;
        if (40.0..=160.0).contains(&hue) {
            hue = 180.0;
        }
        self.state.background_hue = hue;

        if let Some(&handle) = self.handles.get(&sound.id) {
            // detune by up to ±(energy * 0.15) around normal speed
            let range = energy * 0.15;
            let pitch = 1.0 + self.rng.gen_range(-1.0..=1.0) * range;
            let _ = self
                .effects_tx
                .try_send(CanvasSideEffect::PlaySound { handle, pitch });
        }
    }

    /// Advance every active animation, expire highlights, decay energy and
    /// recompute shake/flash. Returns false (leaving the snapshot untouched)
    /// when nothing changed, so callers can skip redraw signaling.
    pub fn update_animations(&mut self, now: Duration) -> bool {
        let dt = self
            .last_update
            .map(|last| now.saturating_sub(last))
            .unwrap_or(Duration::ZERO);
        self.last_update = Some(now);

        let mut animations = Vec::with_capacity(self.state.animations.len());
        for anim in &self.state.animations {
            let elapsed_ms = now.saturating_sub(anim.started_at).as_secs_f32() * 1000.0;
            let progress = (elapsed_ms / anim.duration_ms as f32).clamp(0.0, 1.0);
            if progress < 1.0 {
                let mut next = anim.clone();
                next.progress = progress;
                animations.push(next);
            }
        }

        let highlights: HashMap<GridCell, Duration> = self
            .state
            .highlighted_pads
            .iter()
            .filter(|&(_, &expiry)| expiry > now)
            .map(|(&cell, &expiry)| (cell, expiry))
            .collect();

        let energy = (self.state.energy - ENERGY_DECAY_RATE * dt.as_secs_f32()).max(0.0);

        let shake = if energy > SHAKE_FLOOR {
            (
                self.rng.gen_range(-1.0..=1.0) * energy * SHAKE_SCALE,
                self.rng.gen_range(-1.0..=1.0) * energy * SHAKE_SCALE,
            )
        } else {
            (0.0, 0.0)
        };

        let flash = animations
            .iter()
            .filter(|a| a.kind == AnimationType::Flash)
            .map(|a| flash_envelope(a.progress))
            .fold(0.0f32, f32::max);

        let unchanged = animations == self.state.animations
            && highlights.len() == self.state.highlighted_pads.len()
            && energy == self.state.energy
            && shake == self.state.shake_offset
            && flash == self.state.flash_intensity;
        if unchanged {
            return false;
        }

        self.state.animations = animations;
        self.state.highlighted_pads = highlights;
        self.state.energy = energy;
        self.state.shake_offset = shake;
        self.state.flash_intensity = flash;
        true
    }

    /// Drain the one-shot channel, forwarding playback to the audio engine.
    /// The main loop calls this once per frame.
    pub fn pump_side_effects(&mut self) {
        while let Ok(effect) = self.effects_rx.try_recv() {
            match effect {
                CanvasSideEffect::PlaySound { handle, pitch } => {
                    self.audio.play(handle, pitch);
                }
            }
        }
    }

    #[cfg(test)]
    pub fn poll_side_effect(&self) -> Option<CanvasSideEffect> {
        self.effects_rx.try_recv().ok()
    }

    /// Tear down engine resources. Safe to call twice; only the first
    /// call does anything.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.audio.stop_all();
        self.audio.release();
        self.haptics.release();
    }
}

/// Map a screen position to a grid cell. Pure; clamped to the grid.
pub fn grid_cell(x: f32, y: f32, w: f32, h: f32, rows: usize, cols: usize) -> GridCell {
    let col = ((x / (w / cols as f32)) as usize).min(cols.saturating_sub(1));
    let row = ((y / (h / rows as f32)) as usize).min(rows.saturating_sub(1));
    (row, col)
}

// Brightness envelope of the full-screen flash: quick attack, long fade.
fn flash_envelope(progress: f32) -> f32 {
    let alpha = if progress < 0.1 {
        progress * 10.0
    } else {
        (1.0 - progress) * 1.1
    };
    alpha.clamp(0.0, 0.6)
}
