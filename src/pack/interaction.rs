// Resolves an interaction event (tap or key press) to a sound.

use std::time::Duration;

use crate::pack::model::Sound;
use crate::pack::repository::SoundRepository;

/// A single input event in screen coordinates. Built fresh per event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InteractionEvent {
    pub x: f32,
    pub y: f32,
    pub pointer_id: i32,
    pub key: Option<char>,
    pub timestamp: Duration,
}

impl InteractionEvent {
    pub fn key(key: char, timestamp: Duration) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            pointer_id: 0,
            key: Some(key),
            timestamp,
        }
    }
}

pub struct TriggerInteraction {
    repo: SoundRepository,
}

impl TriggerInteraction {
    pub fn new(repo: SoundRepository) -> Self {
        Self { repo }
    }

    /// Map an event to its sound. A key always wins over position; taps
    /// hash their position so the same spot keeps the same sound.
    pub fn resolve(&self, event: &InteractionEvent) -> Option<&Sound> {
        if let Some(key) = event.key {
            return self.repo.sound_for_key(key);
        }
        let sounds = self.repo.all_sounds();
        if sounds.is_empty() {
            return None;
        }
        let index = position_hash(event) % sounds.len();
        self.repo.sound_by_index(index)
    }

    pub fn sound_by_id(&self, id: &str) -> Option<&Sound> {
        self.repo.all_sounds().iter().find(|s| s.id == id)
    }

    pub fn repository(&self) -> &SoundRepository {
        &self.repo
    }
}

// Deterministic spatial hash: truncate to integer, take the absolute
// value. Same (x, y, pointer) always lands on the same sound.
fn position_hash(event: &InteractionEvent) -> usize {
    let raw = event.x * 7.0 + event.y * 13.0 + event.pointer_id as f32 * 31.0;
    (raw as i64).unsigned_abs() as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pack::loader::SoundPackLoader;
    use std::path::Path;

    const TEST_JSON: &str = r##"{
        "packId": "test",
        "packName": "Test Pack",
        "version": 1,
        "sounds": [
            {"id":"s01","label":"Kick","file":"kick.wav","animationType":"ripple","color":"#FF6B6B","keyMapping":"Q"},
            {"id":"s02","label":"Snare","file":"snare.wav","animationType":"burst","color":"#4ECDC4","keyMapping":"W"},
            {"id":"s03","label":"HiHat","file":"hihat.wav","animationType":"scatter","color":"#45B7D1","keyMapping":"E"}
        ]
    }"##;

    fn use_case() -> TriggerInteraction {
        let mut repo = SoundRepository::new(SoundPackLoader::with_reader(|_| {
            Ok(TEST_JSON.to_string())
        }));
        repo.load_sound_pack(Path::new("soundpack.json"));
        TriggerInteraction::new(repo)
    }

    fn tap(x: f32, y: f32, pointer_id: i32) -> InteractionEvent {
        InteractionEvent {
            x,
            y,
            pointer_id,
            key: None,
            timestamp: Duration::ZERO,
        }
    }

    #[test]
    fn key_press_maps_to_its_sound() {
        let uc = use_case();
        let event = InteractionEvent::key('Q', Duration::ZERO);
        assert_eq!(uc.resolve(&event).unwrap().id, "s01");
    }

    #[test]
    fn lowercase_and_uppercase_keys_resolve_the_same() {
        let uc = use_case();
        let lower = uc.resolve(&InteractionEvent::key('q', Duration::ZERO));
        let upper = uc.resolve(&InteractionEvent::key('Q', Duration::ZERO));
        assert_eq!(lower.unwrap().id, upper.unwrap().id);
    }

    #[test]
    fn unmapped_key_resolves_to_none() {
        let uc = use_case();
        assert!(uc.resolve(&InteractionEvent::key('Z', Duration::ZERO)).is_none());
    }

    #[test]
    fn key_takes_priority_over_position() {
        let uc = use_case();
        let mut event = tap(999.0, 999.0, 0);
        event.key = Some('E');
        assert_eq!(uc.resolve(&event).unwrap().id, "s03");
    }

    #[test]
    fn same_position_is_deterministic() {
        let uc = use_case();
        let event = tap(150.0, 250.0, 0);
        let first = uc.resolve(&event).map(|s| s.id.clone());
        let second = uc.resolve(&event).map(|s| s.id.clone());
        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[test]
    fn positions_spread_across_multiple_sounds() {
        let uc = use_case();
        let mut seen = std::collections::HashSet::new();
        for x in (0..500).step_by(50) {
            for y in (0..500).step_by(50) {
                let event = tap(x as f32, y as f32, 0);
                if let Some(s) = uc.resolve(&event) {
                    seen.insert(s.id.clone());
                }
            }
        }
        assert!(seen.len() > 1, "expected variety, got {seen:?}");
    }

    #[test]
    fn empty_pack_resolves_to_none() {
        let repo = SoundRepository::new(SoundPackLoader::with_reader(|_| {
            anyhow::bail!("nope")
        }));
        let uc = TriggerInteraction::new(repo);
        let event = tap(100.0, 200.0, 0);
        assert!(uc.resolve(&event).is_none());
    }

    #[test]
    fn sound_by_id_finds_pack_entries() {
        let uc = use_case();
        assert_eq!(uc.sound_by_id("s02").unwrap().label, "Snare");
        assert!(uc.sound_by_id("missing").is_none());
    }
}
