//! Test doubles shared by the scenario tests

use std::cell::RefCell;
use std::rc::Rc;

use crate::debug::DebugEntry;
use crate::error::SceneResult;
use crate::foundation::math::Vec3;
use crate::host::{Host, Size};
use crate::render::{PerspectiveCamera, Renderer};
use crate::scene::SceneGraph;
use crate::scene::{Color, Geometry, Material, Node, NodeRef, ObjectBehavior, ObjectParams};

/// Host with settable sizes that counts frame requests
#[derive(Debug, Clone)]
pub struct TestHost {
    pub window: Size,
    pub surface: Size,
    pub pixel_ratio: f64,
    pub frame_requests: u32,
}

impl TestHost {
    pub fn new(surface: Size) -> Self {
        Self {
            window: surface,
            surface,
            pixel_ratio: 1.0,
            frame_requests: 0,
        }
    }
}

impl Host for TestHost {
    fn window_size(&self) -> Size {
        self.window
    }
    
    fn surface_size(&self) -> Size {
        self.surface
    }
    
    fn device_pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }
    
    fn request_animation_frame(&mut self) {
        self.frame_requests += 1;
    }
}

/// Shared record of hook calls
pub type EventLog = Rc<RefCell<Vec<String>>>;

/// Renderer that appends its calls to an [`EventLog`]
pub struct RecordingRenderer {
    pub log: EventLog,
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, scene: &SceneGraph, _camera: &PerspectiveCamera) -> SceneResult<()> {
        self.log.borrow_mut().push(format!("render {}", scene.len()));
        Ok(())
    }
    
    fn set_size(&mut self, width: u32, height: u32) {
        self.log.borrow_mut().push(format!("set_size {width}x{height}"));
    }
    
    fn set_pixel_ratio(&mut self, ratio: f64) {
        self.log.borrow_mut().push(format!("pixel_ratio {ratio}"));
    }
}

/// Unit cube that records its hooks
pub struct LoggedCube {
    pub name: &'static str,
    pub position: Vec3,
    pub log: EventLog,
}

impl LoggedCube {
    pub fn new(name: &'static str, position: Vec3, log: &EventLog) -> Self {
        Self {
            name,
            position,
            log: log.clone(),
        }
    }
}

impl ObjectBehavior for LoggedCube {
    fn create(&mut self, _params: &ObjectParams) -> SceneResult<NodeRef> {
        Ok(NodeRef::new(
            Node::mesh(self.name, Geometry::cube(1.0), Material::basic(Color::from_hex(0xff0000))).at(self.position),
        ))
    }
    
    fn update(&mut self, _node: &NodeRef, elapsed: f32) {
        self.log.borrow_mut().push(format!("update {} {:.2}", self.name, elapsed));
    }
    
    fn on_intersect_enter(&mut self, node: &NodeRef) {
        if let Some(mesh) = node.borrow_mut().mesh.as_mut() {
            mesh.material.color = Color::WHITE;
        }
        self.log.borrow_mut().push(format!("enter {}", self.name));
    }
    
    fn on_intersect_leave(&mut self, node: &NodeRef) {
        if let Some(mesh) = node.borrow_mut().mesh.as_mut() {
            mesh.material.color = Color::from_hex(0xff0000);
        }
        self.log.borrow_mut().push(format!("leave {}", self.name));
    }
    
    fn debug_bindings(&mut self, node: &NodeRef) -> Vec<DebugEntry> {
        vec![DebugEntry::group(self.name, vec![DebugEntry::leaf(node.as_target(), "visible")])]
    }
}
