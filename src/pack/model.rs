// Sound pack data model. Loaded once from JSON at startup, immutable after.

use serde::{Deserialize, Serialize};

/// One of the twelve visual renderers a sound can trigger. Closed set;
/// the canvas dispatches on this with a plain match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationType {
    Ripple,
    Burst,
    Spiral,
    Wave,
    Scatter,
    Pulse,
    Bloom,
    Shatter,
    Orbit,
    Flash,
    Mirror,
    Slice,
}

/// A single entry in a sound pack.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sound {
    pub id: String,
    pub label: String,
    /// audio file path, relative to the pack directory
    pub file: String,
    #[serde(rename = "animationType")]
    pub animation_type: AnimationType,
    /// hex display color, e.g. "#FF6B6B"
    pub color: String,
    /// single-character keyboard trigger
    #[serde(rename = "keyMapping")]
    pub key_mapping: String,
}

impl Sound {
    /// Display color as (r, g, b). Bad hex degrades to white rather
    /// than failing a render pass.
    pub fn rgb(&self) -> (u8, u8, u8) {
        parse_hex_color(&self.color).unwrap_or((255, 255, 255))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SoundPack {
    #[serde(rename = "packId")]
    pub pack_id: String,
    #[serde(rename = "packName")]
    pub pack_name: String,
    pub version: u32,
    pub sounds: Vec<Sound>,
}

impl SoundPack {
    /// Sentinel pack handed out when loading fails. Callers always get a
    /// usable (possibly empty) pack.
    pub fn empty() -> Self {
        Self {
            pack_id: "empty".to_string(),
            pack_name: "Empty (Load Failed)".to_string(),
            version: 0,
            sounds: Vec::new(),
        }
    }
}

pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }
    let value = u32::from_str_radix(hex, 16).ok()?;
    Some((
        ((value >> 16) & 0xFF) as u8,
        ((value >> 8) & 0xFF) as u8,
        (value & 0xFF) as u8,
    ))
}
