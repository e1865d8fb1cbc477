//! Texture store.
//!
//! Owns every [`Texture`] of the application keyed by a string ID. Textures
//! are loaded during startup and looked up by key in the render pass.

use std::path::Path;

use raylib::prelude::Color;
use rustc_hash::FxHashMap;

use crate::backend::Backend;
use crate::error::LoadError;
use crate::resources::texture::Texture;

pub struct TextureStore<B: Backend> {
    map: FxHashMap<String, Texture<B>>,
}

impl<B: Backend> Default for TextureStore<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend> TextureStore<B> {
    pub fn new() -> Self {
        Self {
            map: FxHashMap::default(),
        }
    }

    /// Load an image into the texture stored under `key`, creating the entry
    /// if needed. On failure the entry stays, empty.
    pub fn load(
        &mut self,
        backend: &mut B,
        key: impl Into<String>,
        path: impl AsRef<Path>,
        color_key: Color,
    ) -> Result<(), LoadError> {
        self.entry(key).load(backend, path, color_key)
    }

    /// Texture stored under `key`, inserting an empty one if absent.
    pub fn entry(&mut self, key: impl Into<String>) -> &mut Texture<B> {
        self.map.entry(key.into()).or_default()
    }

    pub fn insert(&mut self, key: impl Into<String>, texture: Texture<B>) {
        self.map.insert(key.into(), texture);
    }

    pub fn get(&self, key: impl AsRef<str>) -> Option<&Texture<B>> {
        self.map.get(key.as_ref())
    }

    pub fn get_mut(&mut self, key: impl AsRef<str>) -> Option<&mut Texture<B>> {
        self.map.get_mut(key.as_ref())
    }

    /// Remove and release the texture under `key`.
    pub fn remove(&mut self, key: impl AsRef<str>) -> bool {
        self.map.remove(key.as_ref()).is_some()
    }

    /// Release every texture.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::RawPixels;
    use crate::backend::headless::HeadlessBackend;
    use crate::resources::texture::DEFAULT_COLOR_KEY;

    #[test]
    fn test_load_and_get() {
        let mut backend =
            HeadlessBackend::new().with_image("img/a.png", RawPixels::filled(3, 3, Color::RED));
        let mut store = TextureStore::<HeadlessBackend>::new();
        store
            .load(&mut backend, "a", "img/a.png", DEFAULT_COLOR_KEY)
            .unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.get("a").is_some_and(|t| t.is_loaded()));
        assert!(store.get("b").is_none());
    }

    #[test]
    fn test_failed_load_keeps_empty_entry() {
        let mut backend = HeadlessBackend::new();
        let mut store = TextureStore::<HeadlessBackend>::new();
        assert!(store
            .load(&mut backend, "a", "missing.png", DEFAULT_COLOR_KEY)
            .is_err());
        assert!(store.get("a").is_some_and(|t| !t.is_loaded()));
    }

    #[test]
    fn test_remove_and_clear_release_handles() {
        let mut backend = HeadlessBackend::new()
            .with_image("a.png", RawPixels::filled(1, 1, Color::RED))
            .with_image("b.png", RawPixels::filled(1, 1, Color::RED));
        let mut store = TextureStore::<HeadlessBackend>::new();
        store.load(&mut backend, "a", "a.png", DEFAULT_COLOR_KEY).unwrap();
        store.load(&mut backend, "b", "b.png", DEFAULT_COLOR_KEY).unwrap();
        assert_eq!(backend.live_textures(), 2);

        assert!(store.remove("a"));
        assert!(!store.remove("a"));
        assert_eq!(backend.live_textures(), 1);

        store.clear();
        assert!(store.is_empty());
        assert_eq!(backend.live_textures(), 0);
    }
}
