//! Renderer interface
//!
//! The orchestrator never talks to a graphics API directly; it drives a
//! [`Renderer`] bound to the drawing surface. [`HeadlessRenderer`] walks the
//! scene without drawing and is what tests and the demo app run against.

use crate::error::SceneResult;
use crate::render::camera::PerspectiveCamera;
use crate::scene::SceneGraph;

/// Draws a scene through a camera onto a surface
pub trait Renderer {
    /// Draw one frame
    fn render(&mut self, scene: &SceneGraph, camera: &PerspectiveCamera) -> SceneResult<()>;
    
    /// Resize the drawing surface, in CSS/logical pixels
    fn set_size(&mut self, width: u32, height: u32);
    
    /// Set the device pixel ratio used for the backing store
    fn set_pixel_ratio(&mut self, ratio: f64);
}

/// Statistics for the last frame drawn by a [`HeadlessRenderer`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Visible nodes visited
    pub nodes: usize,
    /// Visible nodes with a mesh
    pub draw_calls: usize,
}

/// Renderer that traverses the scene without a GPU
#[derive(Debug, Clone, Default)]
pub struct HeadlessRenderer {
    frames: u64,
    width: u32,
    height: u32,
    pixel_ratio: f64,
    last_frame: FrameStats,
}

impl HeadlessRenderer {
    /// Create a renderer with a zero-sized surface
    pub fn new() -> Self {
        Self {
            pixel_ratio: 1.0,
            ..Default::default()
        }
    }
    
    /// Frames rendered so far
    pub fn frames(&self) -> u64 {
        self.frames
    }
    
    /// Current surface size
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
    
    /// Current device pixel ratio
    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }
    
    /// Statistics for the most recent frame
    pub fn last_frame(&self) -> FrameStats {
        self.last_frame
    }
}

impl Renderer for HeadlessRenderer {
    fn render(&mut self, scene: &SceneGraph, camera: &PerspectiveCamera) -> SceneResult<()> {
        let mut stats = FrameStats::default();
        for child in scene.children() {
            count_visible(&child, &mut stats);
        }
        self.frames += 1;
        self.last_frame = stats;
        log::trace!(
            "Frame {}: {} nodes, {} draw calls, camera at {:?}",
            self.frames,
            stats.nodes,
            stats.draw_calls,
            camera.position
        );
        Ok(())
    }
    
    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
    
    fn set_pixel_ratio(&mut self, ratio: f64) {
        self.pixel_ratio = ratio;
    }
}

fn count_visible(node: &crate::scene::NodeRef, stats: &mut FrameStats) {
    let (visible, has_mesh) = {
        let n = node.borrow();
        (n.visible, n.mesh.is_some())
    };
    if !visible {
        return;
    }
    stats.nodes += 1;
    if has_mesh {
        stats.draw_calls += 1;
    }
    for child in node.children() {
        count_visible(&child, stats);
    }
}
