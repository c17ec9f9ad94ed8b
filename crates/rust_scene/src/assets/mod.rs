//! Asset loaders
//!
//! Loaders are plain values owned by the caller. Each reports to a
//! [`LoadingManager`], which can be shared between loaders to track one
//! combined progress.

pub mod loading_manager;
pub mod model_loader;
pub mod texture_loader;

pub use loading_manager::LoadingManager;
pub use model_loader::{parse_model, ErrorCallback, ModelLoader, ProgressCallback, ProgressEvent};
pub use texture_loader::{Texture, TextureLoader};
