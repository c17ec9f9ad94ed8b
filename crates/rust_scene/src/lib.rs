//! # Rust Scene
//!
//! A scene-orchestration layer: a frame loop driven by the host, resize
//! handling, lazily loaded camera controls and debug panel, object
//! registries with lifecycle hooks, and pointer hover picking.
//!
//! ## Features
//!
//! - **Scene objects**: implement [`scene::ObjectBehavior`] to build and animate a node
//! - **Hover picking**: nearest object under the pointer gets `on_intersect_enter`
//! - **Debug panel**: live bindings to node and parameter properties
//! - **Animation**: keyframe clips advanced once per frame
//! - **Headless**: any [`render::Renderer`] and [`host::Host`] can drive it
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rust_scene::prelude::*;
//!
//! struct Window;
//!
//! impl Host for Window {
//!     fn window_size(&self) -> Size { Size::new(800, 600) }
//!     fn surface_size(&self) -> Size { Size::new(800, 600) }
//!     fn device_pixel_ratio(&self) -> f64 { 1.0 }
//!     fn request_animation_frame(&mut self) {}
//! }
//!
//! fn main() -> SceneResult<()> {
//!     let config = SceneConfig::default().with_track_mouse(true);
//!     let mut scene = Orchestrator::new(config, HeadlessRenderer::new(), Window);
//!     scene.start()?;
//!     loop {
//!         scene.tick()?;
//!     }
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::cast_precision_loss)]

pub mod foundation;
pub mod config;
pub mod scene;
pub mod render;
pub mod picking;
pub mod input;
pub mod debug;
pub mod animation;
pub mod controls;
pub mod assets;
pub mod host;

mod error;
mod orchestrator;

#[cfg(test)]
mod tests;

pub use error::{SceneError, SceneResult};
pub use orchestrator::{AnimateHandle, LifecycleState, MixerHandle, Orchestrator};

/// Common imports for scene users
pub mod prelude {
    pub use crate::{
        Orchestrator, SceneError, SceneResult,
        config::{Config, SceneConfig, CameraProps},
        foundation::{
            math::{Vec2, Vec3, Mat4, Transform},
            time::{Clock, SystemClock, ManualClock},
        },
        scene::{
            AsNode, Color, Geometry, Material, Node, NodeRef,
            ObjectBehavior, ObjectParams, ParamValue, SceneObject, SharedObject,
        },
        render::{HeadlessRenderer, PerspectiveCamera, Renderer},
        host::{Host, HostEvent, PointerButtons, Size},
        debug::{DebugBinding, DebugEntry, ParamRange},
        animation::{AnimatedAsset, AnimationMixer},
        assets::{ModelLoader, TextureLoader},
    };
}
