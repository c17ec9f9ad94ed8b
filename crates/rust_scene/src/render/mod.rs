//! Rendering interface
//!
//! The camera the orchestrator renders through and the [`Renderer`] trait it
//! draws with.

pub mod camera;
pub mod renderer;

pub use camera::PerspectiveCamera;
pub use renderer::{FrameStats, HeadlessRenderer, Renderer};
