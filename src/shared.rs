// Shared types between the canvas reducer and the TUI.
//
// The idea of the rendering process:
//   - Only the view-model holds canvas state; the TUI just renders the
//     latest `CanvasState` snapshot on every frame.
//   - Input (mouse taps, key presses) turns into `CanvasIntent`s, the
//     reducer folds them into the next snapshot, and one-shot side effects
//     (sound playback) go out over a separate channel so they can't be
//     replayed by a redraw.

use std::collections::HashMap;
use std::time::Duration;

use crate::audio::SoundHandle;
use crate::pack::model::AnimationType;

pub const GRID_ROWS: usize = 3;
pub const GRID_COLS: usize = 4;

/// How long a tapped pad stays lit.
pub const HIGHLIGHT_MS: u64 = 150;
/// Lifetime of a spawned animation.
pub const ANIMATION_MS: u64 = 800;

/// Grid cell as (row, col).
pub type GridCell = (usize, usize);

#[derive(Clone, Debug, PartialEq)]
pub enum CanvasIntent {
    // tap somewhere on the canvas; coords are in screen units
    TapPad {
        x: f32,
        y: f32,
        screen_w: f32,
        screen_h: f32,
        pointer_id: i32,
    },

    // drag over a cell to cycle which sound lives there
    RotateSound {
        x: f32,
        y: f32,
        screen_w: f32,
        screen_h: f32,
    },

    // keyboard trigger, resolved through the pack's key mappings
    KeyPress(char),
}

/// One-shot effects emitted by the reducer. Consumed exactly once by
/// forwarding to the audio engine; never part of the state snapshot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CanvasSideEffect {
    PlaySound { handle: SoundHandle, pitch: f32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ActiveAnimation {
    pub id: u64,
    pub kind: AnimationType,
    /// Spawn point in screen units. (-1, -1) is the sentinel for
    /// "render at screen center" (key-press triggers have no position).
    pub origin: (f32, f32),
    pub color: (u8, u8, u8),
    pub full_screen: bool,
    pub progress: f32,
    pub started_at: Duration,
    pub duration_ms: u64,
}

impl ActiveAnimation {
    pub fn is_centered(&self) -> bool {
        self.origin.0 < 0.0 && self.origin.1 < 0.0
    }
}

/// The single canvas snapshot. Replaced atomically by the reducer;
/// the renderer only ever borrows it.
#[derive(Clone, Debug, PartialEq)]
pub struct CanvasState {
    pub loading: bool,
    pub animations: Vec<ActiveAnimation>,
    pub background_hue: f32,
    pub grid_rows: usize,
    pub grid_cols: usize,
    /// cell -> sound id. Exactly grid_rows * grid_cols entries once
    /// loading completes (cyclic assignment when cells outnumber sounds).
    pub pad_assignments: HashMap<GridCell, String>,
    /// cell -> highlight expiry (monotonic time since app start)
    pub highlighted_pads: HashMap<GridCell, Duration>,
    /// recent interaction intensity, always within [0, 1]
    pub energy: f32,
    pub shake_offset: (f32, f32),
    pub flash_intensity: f32,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self {
            loading: true,
            animations: Vec::new(),
            background_hue: 220.0,
            grid_rows: GRID_ROWS,
            grid_cols: GRID_COLS,
            pad_assignments: HashMap::new(),
            highlighted_pads: HashMap::new(),
            energy: 0.0,
            shake_offset: (0.0, 0.0),
            flash_intensity: 0.0,
        }
    }
}
