use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_HANDLE: AtomicU64 = AtomicU64::new(0);

/// Opaque id for a preloaded sound buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SoundHandle(pub u64);

impl SoundHandle {
    /// Sentinel for a failed preload. Playing it is a silent no-op.
    pub const INVALID: SoundHandle = SoundHandle(u64::MAX);

    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

// atomic counter so handles stay unique across threads
pub fn next_handle() -> SoundHandle {
    SoundHandle(NEXT_HANDLE.fetch_add(1, Ordering::Relaxed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_unique_and_valid() {
        let a = next_handle();
        let b = next_handle();
        assert_ne!(a, b);
        assert!(a.is_valid());
        assert!(!SoundHandle::INVALID.is_valid());
    }
}
