//! Loading theme images relative to the theme directory

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use image::RgbaImage;
use thiserror::Error;

/// Errors that can occur while loading a theme image
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("failed to load image '{}': {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Decoded theme images, keyed by their theme-relative name.
///
/// Failed loads are remembered too, so a missing image is reported once.
#[derive(Debug, Default)]
pub struct ImageCache {
    theme_dir: PathBuf,
    images: HashMap<String, Option<Rc<RgbaImage>>>,
}

impl ImageCache {
    pub fn new(theme_dir: impl Into<PathBuf>) -> Self {
        Self {
            theme_dir: theme_dir.into(),
            images: HashMap::new(),
        }
    }

    pub fn theme_dir(&self) -> &Path {
        &self.theme_dir
    }

    /// Path of a theme resource on disk
    pub fn path_of(&self, name: &str) -> PathBuf {
        self.theme_dir.join(name)
    }

    /// Decode an image from disk, bypassing the cache
    pub fn load(&self, name: &str) -> Result<RgbaImage, ResourceError> {
        let path = self.path_of(name);
        let image = image::open(&path).map_err(|source| ResourceError::Image { path, source })?;
        Ok(image.to_rgba8())
    }

    /// Get a cached image, loading it on first use.
    ///
    /// Returns None (after logging a warning on the first attempt) if the
    /// image cannot be loaded.
    pub fn get(&mut self, name: &str) -> Option<Rc<RgbaImage>> {
        if let Some(cached) = self.images.get(name) {
            return cached.clone();
        }

        let loaded = match self.load(name) {
            Ok(image) => {
                log::debug!(
                    "loaded image '{}' ({}x{})",
                    name,
                    image.width(),
                    image.height()
                );
                Some(Rc::new(image))
            }
            Err(e) => {
                log::warn!("{}", e);
                None
            }
        };
        self.images.insert(name.to_string(), loaded.clone());
        loaded
    }

    /// Natural size of an image
    pub fn dimensions(&mut self, name: &str) -> Option<(u32, u32)> {
        self.get(name).map(|image| image.dimensions())
    }

    /// Register an already decoded image under `name`
    pub fn insert(&mut self, name: impl Into<String>, image: RgbaImage) {
        self.images.insert(name.into(), Some(Rc::new(image)));
    }
}
