//! Orchestrator configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::Config;

/// Perspective camera parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraProps {
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Near clipping plane distance
    pub near: f32,
    /// Far clipping plane distance
    pub far: f32,
}

impl Default for CameraProps {
    fn default() -> Self {
        Self {
            fov: 75.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// Options recognised by [`crate::Orchestrator::new`]
///
/// Every field has a default, so a config file only needs the keys it
/// changes:
///
/// ```toml
/// full_screen = true
/// track_mouse = true
///
/// [camera]
/// fov = 60.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Size the surface from the window instead of the surface's own box
    pub full_screen: bool,
    /// Camera projection parameters
    pub camera: CameraProps,
    /// Lazily attach damped orbit camera controls on start
    pub use_orbit_controls: bool,
    /// Enable the pointer tracker and the selection manager
    pub track_mouse: bool,
    /// Enable the debug panel builder
    pub debug: bool,
    /// Quiet period after the last pointer move before the pointer counts as idle
    pub pointer_idle_ms: u64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            full_screen: false,
            camera: CameraProps::default(),
            use_orbit_controls: true,
            track_mouse: false,
            debug: false,
            pointer_idle_ms: 300,
        }
    }
}

impl SceneConfig {
    /// Set full-screen sizing
    pub fn with_full_screen(mut self, full_screen: bool) -> Self {
        self.full_screen = full_screen;
        self
    }
    
    /// Set camera parameters
    pub fn with_camera(mut self, fov: f32, near: f32, far: f32) -> Self {
        self.camera = CameraProps { fov, near, far };
        self
    }
    
    /// Enable or disable orbit controls
    pub fn with_orbit_controls(mut self, enabled: bool) -> Self {
        self.use_orbit_controls = enabled;
        self
    }
    
    /// Enable or disable pointer tracking and selection
    pub fn with_track_mouse(mut self, enabled: bool) -> Self {
        self.track_mouse = enabled;
        self
    }
    
    /// Enable or disable the debug panel
    pub fn with_debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }
    
    /// Pointer debounce window
    pub fn pointer_idle(&self) -> Duration {
        Duration::from_millis(self.pointer_idle_ms)
    }
}

impl Config for SceneConfig {}
