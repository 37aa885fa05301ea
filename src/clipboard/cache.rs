//! Session clipboard cache
//!
//! Holds the most recently copied or cut fragment for same-session paste. One
//! slot, overwritten on every copy/cut, read without being consumed.

use crate::fragment::Fragment;

/// Single-slot fragment store, owned by the session that drives copy/cut
#[derive(Clone, Debug, Default)]
pub struct ClipboardCache {
    slot: Option<Fragment>,
}

impl ClipboardCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cached fragment (last write wins)
    pub fn set(&mut self, fragment: Fragment) {
        log::debug!("clipboard cache: storing {} blocks", fragment.len());
        self.slot = Some(fragment);
    }

    pub fn get(&self) -> Option<&Fragment> {
        self.slot.as_ref()
    }

    pub fn take(&mut self) -> Option<Fragment> {
        self.slot.take()
    }

    pub fn clear(&mut self) {
        self.slot = None;
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContentBlock;

    fn fragment(text: &str) -> Fragment {
        Fragment::new(vec![ContentBlock::new("k", text)], Default::default())
    }

    #[test]
    fn test_last_write_wins() {
        let mut cache = ClipboardCache::new();
        assert!(cache.is_empty());

        cache.set(fragment("first"));
        cache.set(fragment("second"));
        assert_eq!(cache.get().unwrap().plain_text(), "second");
    }

    #[test]
    fn test_get_does_not_consume() {
        let mut cache = ClipboardCache::new();
        cache.set(fragment("kept"));

        assert!(cache.get().is_some());
        assert!(cache.get().is_some());
        assert_eq!(cache.take().unwrap().plain_text(), "kept");
        assert!(cache.is_empty());
    }
}
