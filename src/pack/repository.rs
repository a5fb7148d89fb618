// In-memory lookup over the last-loaded sound pack.

use std::collections::HashMap;
use std::path::Path;

use crate::pack::loader::SoundPackLoader;
use crate::pack::model::{Sound, SoundPack};

pub struct SoundRepository {
    loader: SoundPackLoader,
    pack: SoundPack,
    /// uppercased key mapping -> index into pack.sounds
    by_key: HashMap<String, usize>,
}

impl SoundRepository {
    pub fn new(loader: SoundPackLoader) -> Self {
        Self {
            loader,
            pack: SoundPack::empty(),
            by_key: HashMap::new(),
        }
    }

    /// Load (or reload) the pack, replacing whatever was held before.
    pub fn load_sound_pack(&mut self, path: &Path) -> &SoundPack {
        self.pack = self.loader.load(path);
        self.by_key = self
            .pack
            .sounds
            .iter()
            .enumerate()
            .map(|(i, s)| (s.key_mapping.to_uppercase(), i))
            .collect();
        &self.pack
    }

    /// Case-insensitive exact match on a sound's key mapping.
    pub fn sound_for_key(&self, key: char) -> Option<&Sound> {
        let key = key.to_uppercase().to_string();
        self.by_key.get(&key).map(|&i| &self.pack.sounds[i])
    }

    /// Modulo-wrapped index into the sound list.
    pub fn sound_by_index(&self, index: usize) -> Option<&Sound> {
        if self.pack.sounds.is_empty() {
            return None;
        }
        Some(&self.pack.sounds[index % self.pack.sounds.len()])
    }

    pub fn all_sounds(&self) -> &[Sound] {
        &self.pack.sounds
    }
}
