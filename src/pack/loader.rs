// Loads the sound pack JSON from disk (or any injected text source).
// Load failures of any kind fall back to the empty sentinel pack; the
// caller never has to handle an error here.

use std::path::Path;

use crate::pack::model::SoundPack;

type AssetReader = Box<dyn Fn(&Path) -> anyhow::Result<String>>;

pub struct SoundPackLoader {
    read_asset: AssetReader,
}

impl SoundPackLoader {
    /// Loader backed by the filesystem. Tests inject their own reader.
    pub fn from_fs() -> Self {
        Self::with_reader(|path| Ok(std::fs::read_to_string(path)?))
    }

    pub fn with_reader<F>(read_asset: F) -> Self
    where
        F: Fn(&Path) -> anyhow::Result<String> + 'static,
    {
        Self {
            read_asset: Box::new(read_asset),
        }
    }

    pub fn load(&self, path: &Path) -> SoundPack {
        match self.try_load(path) {
            Ok(pack) => pack,
            Err(e) => {
                log::warn!("sound pack load failed ({}): {e}", path.display());
                SoundPack::empty()
            }
        }
    }

    fn try_load(&self, path: &Path) -> anyhow::Result<SoundPack> {
        let text = (self.read_asset)(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}
