//! Item icon textures
//!
//! Textures are loaded and freed by the host. Items only ever hold a shared
//! [`TextureRef`]; dropping the reference (item removal, `clear_icon`, pool
//! teardown) is how an item releases its icon.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use parking_lot::RwLock;

/// A texture owned by the host renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Texture {
    /// Native texture handle
    pub handle: u64,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Texture {
    /// Wrap a native handle
    pub fn new(handle: u64, width: u32, height: u32) -> Self {
        Self {
            handle,
            width,
            height,
        }
    }

    /// Size as (width, height)
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Shared, reference-counted handle to a texture
#[derive(Clone, PartialEq, Eq)]
pub struct TextureRef(Arc<Texture>);

impl TextureRef {
    /// Create a new reference
    pub fn new(texture: Texture) -> Self {
        Self(Arc::new(texture))
    }

    /// Get the texture
    pub fn texture(&self) -> &Texture {
        &self.0
    }

    /// Number of live references to this texture
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.0)
    }

    /// Check if two references point at the same texture
    pub fn ptr_eq(&self, other: &TextureRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for TextureRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TextureRef({:#x}, {}x{})",
            self.0.handle, self.0.width, self.0.height
        )
    }
}

impl From<Texture> for TextureRef {
    fn from(texture: Texture) -> Self {
        Self::new(texture)
    }
}

/// Weapon icon cache, keyed by weapon type
///
/// Icons are per game episode; loading for a different episode releases
/// everything cached for the previous one.
pub struct TextureCache {
    textures: RwLock<HashMap<i32, TextureRef>>,
    episode: RwLock<Option<u32>>,
}

impl TextureCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self {
            textures: RwLock::new(HashMap::with_capacity(32)),
            episode: RwLock::new(None),
        }
    }

    /// Replace the cache contents with textures for `episode`
    ///
    /// Returns false (and keeps the current contents) if the cache already
    /// holds textures for that episode.
    pub fn load_episode<I>(&self, episode: u32, textures: I) -> bool
    where
        I: IntoIterator<Item = (i32, Texture)>,
    {
        if *self.episode.read() == Some(episode) && !self.is_empty() {
            return false;
        }

        let mut map = self.textures.write();
        map.clear();
        for (weapon_type, texture) in textures {
            map.insert(weapon_type, TextureRef::new(texture));
        }
        *self.episode.write() = Some(episode);

        log::debug!("Loaded {} icon(s) for episode {}", map.len(), episode);
        true
    }

    /// Episode the cached textures belong to
    pub fn episode(&self) -> Option<u32> {
        *self.episode.read()
    }

    /// Get the icon for a weapon type
    pub fn get(&self, weapon_type: i32) -> Option<TextureRef> {
        self.textures.read().get(&weapon_type).cloned()
    }

    /// Number of cached textures
    pub fn len(&self) -> usize {
        self.textures.read().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.textures.read().is_empty()
    }

    /// Drop every cached reference
    pub fn release_all(&self) {
        self.textures.write().clear();
        *self.episode.write() = None;
    }
}

impl Default for TextureCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ref_counting() {
        let a = TextureRef::new(Texture::new(0x10, 64, 64));
        let b = a.clone();
        assert_eq!(a.ref_count(), 2);
        drop(b);
        assert_eq!(a.ref_count(), 1);
    }

    #[test]
    fn test_cache_episode_reload() {
        let cache = TextureCache::new();
        assert!(cache.load_episode(0, vec![(7, Texture::new(1, 8, 8))]));
        assert!(!cache.load_episode(0, vec![(9, Texture::new(2, 8, 8))]));
        assert!(cache.get(7).is_some());

        assert!(cache.load_episode(1, vec![(9, Texture::new(2, 8, 8))]));
        assert!(cache.get(7).is_none());
        assert_eq!(cache.episode(), Some(1));
    }

    #[test]
    fn test_release_all_drops_references() {
        let cache = TextureCache::new();
        cache.load_episode(0, vec![(7, Texture::new(1, 8, 8))]);
        let held = cache.get(7).unwrap();
        assert_eq!(held.ref_count(), 2);

        cache.release_all();
        assert!(cache.is_empty());
        assert_eq!(held.ref_count(), 1);
    }
}
