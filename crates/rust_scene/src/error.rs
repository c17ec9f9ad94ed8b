//! Crate-level error types

use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by the orchestration layer
///
/// Construction and configuration errors abort the call that triggered them
/// before any registry is touched. Asset failures only ever reach the
/// caller's own error callback or deferred value.
#[derive(Error, Debug)]
pub enum SceneError {
    /// A scene object or debug entry could not be built
    #[error("Construction error: {0}")]
    Construction(String),
    
    /// An operation needs a subsystem that was not enabled at construction
    #[error("Configuration error: {0}")]
    Configuration(String),
    
    /// The orchestrator is in the wrong lifecycle state for the call
    #[error("Invalid state: {0}")]
    InvalidState(String),
    
    /// An asset failed to load
    #[error("Failed to load asset '{path}': {reason}")]
    AssetLoad {
        /// Path or URL of the asset
        path: String,
        /// Human readable cause
        reason: String,
    },
    
    /// The renderer rejected a frame
    #[error("Rendering error: {0}")]
    Render(String),
    
    /// A configuration file could not be read
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl SceneError {
    /// Shorthand for an [`SceneError::AssetLoad`] error
    pub fn asset(path: impl Into<String>, reason: impl ToString) -> Self {
        Self::AssetLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result alias used throughout the crate
pub type SceneResult<T> = Result<T, SceneError>;
