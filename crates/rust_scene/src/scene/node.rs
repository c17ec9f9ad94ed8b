//! Native scene nodes
//!
//! A node is the engine-level renderable entity: a transform, an optional
//! mesh, and child nodes. Nodes are shared handles ([`NodeRef`]) because the
//! same node is referenced by its owning scene object, by the scene graph
//! and by any debug bindings pointing at it.

use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use crate::debug::{TweakTarget, Tweakable};
use crate::error::SceneError;
use crate::foundation::math::{Mat4, Transform, Vec3};
use crate::scene::params::{Color, ParamValue};

/// Shape of a mesh in its local space, centred on the origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    /// Axis-aligned box
    Box {
        /// Extent along X
        width: f32,
        /// Extent along Y
        height: f32,
        /// Extent along Z
        depth: f32,
    },
    /// Sphere
    Sphere {
        /// Sphere radius
        radius: f32,
    },
}

impl Geometry {
    /// A cube with equal sides
    pub fn cube(size: f32) -> Self {
        Self::Box {
            width: size,
            height: size,
            depth: size,
        }
    }
}

/// Surface appearance of a mesh
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Base color
    pub color: Color,
    /// Render edges only
    #[serde(default)]
    pub wireframe: bool,
}

impl Material {
    /// Unlit material with the given color
    pub fn basic(color: Color) -> Self {
        Self {
            color,
            wireframe: false,
        }
    }
}

/// Geometry plus material
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    /// Local-space shape
    pub geometry: Geometry,
    /// Appearance
    pub material: Material,
}

/// Engine-level scene node
#[derive(Debug, Clone, Default)]
pub struct Node {
    /// Display name, used in logs and by asset loaders
    pub name: String,
    /// Local transform relative to the parent
    pub transform: Transform,
    /// Whether the renderer draws this node and its children
    pub visible: bool,
    /// Renderable content, if any
    pub mesh: Option<Mesh>,
    children: Vec<NodeRef>,
}

impl Node {
    /// Empty group node
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visible: true,
            ..Default::default()
        }
    }
    
    /// Node carrying a mesh
    pub fn mesh(name: impl Into<String>, geometry: Geometry, material: Material) -> Self {
        Self {
            mesh: Some(Mesh { geometry, material }),
            ..Self::group(name)
        }
    }
    
    /// Builder-style position
    pub fn at(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }
    
    /// Child nodes in insertion order
    pub fn children(&self) -> &[NodeRef] {
        &self.children
    }
    
    /// Local transform as a matrix
    pub fn local_matrix(&self) -> Mat4 {
        self.transform.to_matrix()
    }
}

/// Shared handle to a [`Node`]
///
/// Equality is identity: two handles are equal when they point at the same
/// node.
#[derive(Clone)]
pub struct NodeRef(Rc<RefCell<Node>>);

impl NodeRef {
    /// Wrap a node in a new shared handle
    pub fn new(node: Node) -> Self {
        Self(Rc::new(RefCell::new(node)))
    }
    
    /// Borrow the node
    pub fn borrow(&self) -> Ref<'_, Node> {
        self.0.borrow()
    }
    
    /// Mutably borrow the node
    pub fn borrow_mut(&self) -> RefMut<'_, Node> {
        self.0.borrow_mut()
    }
    
    /// Whether both handles point at the same node
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
    
    /// Append a child node
    pub fn add_child(&self, child: NodeRef) {
        self.0.borrow_mut().children.push(child);
    }
    
    /// Remove a child by identity; returns whether it was found
    pub fn remove_child(&self, child: &NodeRef) -> bool {
        let mut node = self.0.borrow_mut();
        let before = node.children.len();
        node.children.retain(|c| !c.ptr_eq(child));
        node.children.len() != before
    }
    
    /// Snapshot of the current children
    pub fn children(&self) -> Vec<NodeRef> {
        self.0.borrow().children.clone()
    }
    
    /// Depth-first visit of this node and every descendant
    pub fn traverse(&self, f: &mut dyn FnMut(&NodeRef)) {
        f(self);
        for child in self.children() {
            child.traverse(f);
        }
    }
    
    /// Find the first descendant (or self) with the given name
    pub fn find_by_name(&self, name: &str) -> Option<NodeRef> {
        let mut found = None;
        self.traverse(&mut |node| {
            if found.is_none() && node.borrow().name == name {
                found = Some(node.clone());
            }
        });
        found
    }
    
    /// This node as a debug-binding target
    pub fn as_target(&self) -> TweakTarget {
        let target: Rc<RefCell<dyn Tweakable>> = self.0.clone();
        target
    }
}

impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(node) => f.debug_tuple("NodeRef").field(&node.name).finish(),
            Err(_) => f.write_str("NodeRef(<borrowed>)"),
        }
    }
}

fn axis_mut<'a>(vector: &'a mut Vec3, axis: &str) -> Option<&'a mut f32> {
    match axis {
        "x" => Some(&mut vector.x),
        "y" => Some(&mut vector.y),
        "z" => Some(&mut vector.z),
        _ => None,
    }
}

fn number(property: &str, value: &ParamValue) -> Result<f32, SceneError> {
    value.as_f64().map(|v| v as f32).ok_or_else(|| {
        SceneError::Construction(format!(
            "property '{property}' expects a number, got {}",
            value.kind()
        ))
    })
}

/// Properties: `position.{x,y,z}`, `rotation.{x,y,z}`, `scale.{x,y,z}`,
/// `scale` (uniform, reads X), `visible`, and for mesh nodes `color` and
/// `wireframe`.
impl Tweakable for Node {
    fn get_property(&self, property: &str) -> Option<ParamValue> {
        let t = &self.transform;
        let value: ParamValue = match property {
            "position.x" => t.position.x.into(),
            "position.y" => t.position.y.into(),
            "position.z" => t.position.z.into(),
            "rotation.x" => t.rotation.x.into(),
            "rotation.y" => t.rotation.y.into(),
            "rotation.z" => t.rotation.z.into(),
            "scale" | "scale.x" => t.scale.x.into(),
            "scale.y" => t.scale.y.into(),
            "scale.z" => t.scale.z.into(),
            "visible" => self.visible.into(),
            "color" => self.mesh?.material.color.into(),
            "wireframe" => self.mesh?.material.wireframe.into(),
            _ => return None,
        };
        Some(value)
    }
    
    fn set_property(&mut self, property: &str, value: ParamValue) -> Result<(), SceneError> {
        if property == "scale" {
            let scale = number(property, &value)?;
            self.transform.set_uniform_scale(scale);
            return Ok(());
        }
        if let Some((group, axis)) = property.split_once('.') {
            let vector = match group {
                "position" => &mut self.transform.position,
                "rotation" => &mut self.transform.rotation,
                "scale" => &mut self.transform.scale,
                _ => return Err(SceneError::Construction(format!("unknown node property '{property}'"))),
            };
            let slot = axis_mut(vector, axis)
                .ok_or_else(|| SceneError::Construction(format!("unknown node property '{property}'")))?;
            *slot = number(property, &value)?;
            return Ok(());
        }
        match property {
            "visible" => {
                self.visible = value.as_bool().ok_or_else(|| {
                    SceneError::Construction("property 'visible' expects a bool".to_string())
                })?;
            }
            "color" | "wireframe" => {
                let mesh = self.mesh.as_mut().ok_or_else(|| {
                    SceneError::Construction(format!("node '{}' has no material", self.name))
                })?;
                if property == "color" {
                    mesh.material.color = value.as_color().ok_or_else(|| {
                        SceneError::Construction("property 'color' expects a color".to_string())
                    })?;
                } else {
                    mesh.material.wireframe = value.as_bool().ok_or_else(|| {
                        SceneError::Construction("property 'wireframe' expects a bool".to_string())
                    })?;
                }
            }
            _ => return Err(SceneError::Construction(format!("unknown node property '{property}'"))),
        }
        Ok(())
    }
}
