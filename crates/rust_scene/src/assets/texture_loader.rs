//! Texture loading
//!
//! Decodes image files into RGBA8 pixel data with the `image` crate and
//! reports each file to the loader's [`LoadingManager`].

use std::path::Path;

use crate::assets::loading_manager::LoadingManager;
use crate::error::{SceneError, SceneResult};

/// Decoded RGBA8 image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    /// Source path
    pub source: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Row-major RGBA pixels
    pub data: Vec<u8>,
}

impl Texture {
    /// Size of the pixel data in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}

/// Caller-owned texture loader
#[derive(Debug, Clone, Default)]
pub struct TextureLoader {
    manager: LoadingManager,
}

impl TextureLoader {
    /// Loader with its own manager
    pub fn new() -> Self {
        Self::default()
    }
    
    /// Loader reporting to an existing manager
    pub fn with_manager(manager: LoadingManager) -> Self {
        Self { manager }
    }
    
    /// The manager progress is reported to
    pub fn manager(&self) -> &LoadingManager {
        &self.manager
    }
    
    /// Load and decode one image
    pub fn load(&self, path: impl AsRef<Path>) -> SceneResult<Texture> {
        let path = path.as_ref();
        let source = path.display().to_string();
        self.manager.item_start(&source);
        
        let result = image::open(path)
            .map_err(|e| SceneError::asset(&source, e))
            .map(|img| {
                let rgba = img.to_rgba8();
                let (width, height) = rgba.dimensions();
                log::debug!("Loaded texture {}x{} from {}", width, height, source);
                Texture {
                    source: source.clone(),
                    width,
                    height,
                    data: rgba.into_raw(),
                }
            });
        
        if result.is_err() {
            self.manager.item_error(&source);
        }
        self.manager.item_end(&source);
        result
    }
    
    /// Load several images, one result per path in the same order
    pub fn load_all<P: AsRef<Path>>(&self, paths: &[P]) -> Vec<SceneResult<Texture>> {
        paths.iter().map(|path| self.load(path)).collect()
    }
}
