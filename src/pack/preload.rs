// Preloads every sound in the pack so playback is instant. Runs once at
// startup, in pack order. Failed preloads keep their slot with the
// engine's invalid sentinel; playback for those is a silent no-op.

use std::collections::HashMap;
use std::path::Path;

use crate::audio::SoundHandle;
use crate::engines::AudioEngine;
use crate::pack::model::Sound;

pub fn preload_all(
    sounds: &[Sound],
    engine: &mut dyn AudioEngine,
    pack_dir: &Path,
) -> HashMap<String, SoundHandle> {
    let mut handles = HashMap::with_capacity(sounds.len());
    for sound in sounds {
        let handle = engine.preload(&pack_dir.join(&sound.file));
        handles.insert(sound.id.clone(), handle);
    }
    handles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pack::model::AnimationType;
    use std::path::PathBuf;

    struct RecordingEngine {
        requested: Vec<PathBuf>,
        fail_on: Option<&'static str>,
        next: u64,
    }

    impl RecordingEngine {
        fn new(fail_on: Option<&'static str>) -> Self {
            Self {
                requested: Vec::new(),
                fail_on,
                next: 0,
            }
        }
    }

    impl AudioEngine for RecordingEngine {
        fn preload(&mut self, path: &Path) -> SoundHandle {
            self.requested.push(path.to_path_buf());
            if let Some(name) = self.fail_on {
                if path.ends_with(name) {
                    return SoundHandle::INVALID;
                }
            }
            let handle = SoundHandle(self.next);
            self.next += 1;
            handle
        }

        fn play(&self, _handle: SoundHandle, _pitch: f32) {}
        fn stop_all(&self) {}
        fn release(&mut self) {}
    }

    fn sound(id: &str, file: &str) -> Sound {
        Sound {
            id: id.into(),
            label: id.into(),
            file: file.into(),
            animation_type: AnimationType::Pulse,
            color: "#FFFFFF".into(),
            key_mapping: "Q".into(),
        }
    }

    #[test]
    fn preloads_in_pack_order() {
        let sounds = vec![
            sound("s01", "kick.wav"),
            sound("s02", "snare.wav"),
            sound("s03", "hihat.wav"),
        ];
        let mut engine = RecordingEngine::new(None);
        let handles = preload_all(&sounds, &mut engine, Path::new("pack"));

        let names: Vec<_> = engine
            .requested
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, ["kick.wav", "snare.wav", "hihat.wav"]);
        assert_eq!(handles.len(), 3);
        assert!(handles["s01"].is_valid());
    }

    #[test]
    fn failed_preload_keeps_the_sentinel() {
        let sounds = vec![sound("s01", "kick.wav"), sound("s02", "broken.wav")];
        let mut engine = RecordingEngine::new(Some("broken.wav"));
        let handles = preload_all(&sounds, &mut engine, Path::new("pack"));
        assert!(handles["s01"].is_valid());
        assert_eq!(handles["s02"], SoundHandle::INVALID);
    }
}
