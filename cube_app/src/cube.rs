//! Sample cube object
//!
//! Spins around Y, turns white while the pointer is over it, and exposes
//! height, scale, wireframe and color to the debug panel.

use std::cell::RefCell;
use std::rc::Rc;

use rust_scene::debug::TweakTarget;
use rust_scene::foundation::math::constants;
use rust_scene::prelude::*;

/// Seconds per full turn
const TURN_SECONDS: f32 = 5.0;

pub struct Cube {
    name: String,
    settings: Rc<RefCell<ObjectParams>>,
}

impl Cube {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            settings: Rc::new(RefCell::new(ObjectParams::new())),
        }
    }
    
    fn base_color(&self) -> Color {
        self.settings.borrow().color_or("color", Color::from_hex(0xff0000))
    }
    
    fn set_color(node: &NodeRef, color: Color) {
        if let Some(mesh) = node.borrow_mut().mesh.as_mut() {
            mesh.material.color = color;
        }
    }
}

impl ObjectBehavior for Cube {
    fn create(&mut self, params: &ObjectParams) -> SceneResult<NodeRef> {
        let size = params.f32_or("size", 1.0);
        let color = params.color_or("color", Color::from_hex(0xff0000));
        let position = Vec3::new(
            params.f32_or("x", 0.0),
            params.f32_or("y", 0.0),
            params.f32_or("z", 0.0),
        );
        
        {
            let mut settings = self.settings.borrow_mut();
            settings.insert("scale", 1.0_f32);
            settings.insert("color", color);
        }
        
        Ok(NodeRef::new(
            Node::mesh(self.name.clone(), Geometry::cube(size), Material::basic(color)).at(position),
        ))
    }
    
    fn update(&mut self, node: &NodeRef, elapsed: f32) {
        node.borrow_mut().transform.rotation.y = (elapsed / TURN_SECONDS) * constants::TAU;
    }
    
    fn on_intersect_enter(&mut self, node: &NodeRef) {
        Self::set_color(node, Color::WHITE);
    }
    
    fn on_intersect_leave(&mut self, node: &NodeRef) {
        Self::set_color(node, self.base_color());
    }
    
    fn debug_bindings(&mut self, node: &NodeRef) -> Vec<DebugEntry> {
        let settings: TweakTarget = self.settings.clone();
        let scaled = node.clone();
        let tinted = node.clone();
        
        vec![DebugEntry::group(
            self.name.clone(),
            vec![
                DebugBinding::new(node.as_target(), "position.y")
                    .with_range(-2.0, 2.0)
                    .with_step(0.001)
                    .with_name("Height")
                    .into(),
                DebugBinding::new(settings.clone(), "scale")
                    .with_range(0.0, 3.0)
                    .with_step(0.001)
                    .on_change(move |value| {
                        if let Some(scale) = value.as_f64() {
                            scaled.borrow_mut().transform.set_uniform_scale(scale as f32);
                        }
                    })
                    .into(),
                DebugEntry::leaf(node.as_target(), "wireframe"),
                DebugBinding::new(settings, "color")
                    .as_color()
                    .on_change(move |value| {
                        if let Some(color) = value.as_color() {
                            Self::set_color(&tinted, color);
                        }
                    })
                    .into(),
            ],
        )]
    }
}
