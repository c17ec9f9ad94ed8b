//! Scene objects
//!
//! A [`SceneObject`] is the unit application code works with: it owns one
//! native node plus the behaviour that builds and animates it. Concrete
//! objects implement [`ObjectBehavior`]; only [`ObjectBehavior::create`] is
//! mandatory, every other hook defaults to doing nothing.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::debug::DebugEntry;
use crate::error::SceneResult;
use crate::scene::node::NodeRef;
use crate::scene::params::ObjectParams;

/// Construction logic and lifecycle hooks of a scene object
///
/// # Example
/// ```
/// use rust_scene::prelude::*;
///
/// struct Marker;
///
/// impl ObjectBehavior for Marker {
///     fn create(&mut self, params: &ObjectParams) -> SceneResult<NodeRef> {
///         let size = params.f32_or("size", 1.0);
///         Ok(NodeRef::new(Node::mesh("marker", Geometry::cube(size), Material::basic(Color::WHITE))))
///     }
/// }
///
/// let marker = SceneObject::new(Marker, ObjectParams::new().with("size", 2.0_f32)).unwrap();
/// assert_eq!(marker.node().borrow().name, "marker");
/// ```
pub trait ObjectBehavior {
    /// Build the native node; called exactly once, during construction
    fn create(&mut self, params: &ObjectParams) -> SceneResult<NodeRef>;
    
    /// Per-frame update with the clock's elapsed seconds
    fn update(&mut self, _node: &NodeRef, _elapsed: f32) {}
    
    /// The pointer ray now hits this object first
    fn on_intersect_enter(&mut self, _node: &NodeRef) {}
    
    /// The object lost (or did not win) the pointer ray this evaluation
    fn on_intersect_leave(&mut self, _node: &NodeRef) {}
    
    /// Entries to show in the debug panel
    fn debug_bindings(&mut self, _node: &NodeRef) -> Vec<DebugEntry> {
        Vec::new()
    }
}

/// A constructed scene object
pub struct SceneObject {
    params: ObjectParams,
    node: NodeRef,
    behavior: Box<dyn ObjectBehavior>,
}

/// Scene object shared between registries
pub type SharedObject = Rc<RefCell<SceneObject>>;

impl SceneObject {
    /// Store `params`, run the behaviour's factory and keep the node it returns
    ///
    /// A failing factory aborts construction with its error.
    pub fn new(behavior: impl ObjectBehavior + 'static, params: ObjectParams) -> SceneResult<Self> {
        let mut behavior: Box<dyn ObjectBehavior> = Box::new(behavior);
        let node = behavior.create(&params)?;
        log::debug!("Created scene object {:?}", node);
        Ok(Self {
            params,
            node,
            behavior,
        })
    }
    
    /// Construct and wrap for registration
    pub fn new_shared(behavior: impl ObjectBehavior + 'static, params: ObjectParams) -> SceneResult<SharedObject> {
        Self::new(behavior, params).map(Self::into_shared)
    }
    
    /// Wrap for registration
    pub fn into_shared(self) -> SharedObject {
        Rc::new(RefCell::new(self))
    }
    
    /// The owned native node
    pub fn node(&self) -> &NodeRef {
        &self.node
    }
    
    /// Construction parameters
    pub fn params(&self) -> &ObjectParams {
        &self.params
    }
    
    /// Forward a frame update to the behaviour
    pub fn update(&mut self, elapsed: f32) {
        self.behavior.update(&self.node, elapsed);
    }
    
    /// Forward a hover-enter to the behaviour
    pub fn on_intersect_enter(&mut self) {
        self.behavior.on_intersect_enter(&self.node);
    }
    
    /// Forward a hover-leave to the behaviour
    pub fn on_intersect_leave(&mut self) {
        self.behavior.on_intersect_leave(&self.node);
    }
    
    /// Debug entries declared by the behaviour
    pub fn debug_bindings(&mut self) -> Vec<DebugEntry> {
        self.behavior.debug_bindings(&self.node)
    }
}

impl fmt::Debug for SceneObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneObject")
            .field("node", &self.node)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Anything that can be inserted into the scene graph
///
/// Lets [`crate::Orchestrator::add`] take wrapped scene objects and raw
/// engine nodes alike.
pub trait AsNode {
    /// The native node to insert
    fn as_node(&self) -> NodeRef;
}

impl AsNode for NodeRef {
    fn as_node(&self) -> NodeRef {
        self.clone()
    }
}

impl AsNode for SceneObject {
    fn as_node(&self) -> NodeRef {
        self.node.clone()
    }
}

impl AsNode for SharedObject {
    fn as_node(&self) -> NodeRef {
        self.borrow().node.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SceneError;
    use crate::scene::node::{Geometry, Material, Node};
    use crate::scene::params::Color;
    use std::cell::Cell;

    struct Counting {
        creates: Rc<Cell<u32>>,
    }

    impl ObjectBehavior for Counting {
        fn create(&mut self, params: &ObjectParams) -> SceneResult<NodeRef> {
            self.creates.set(self.creates.get() + 1);
            let size = params.f32_or("size", 1.0);
            Ok(NodeRef::new(Node::mesh("counted", Geometry::cube(size), Material::basic(Color::WHITE))))
        }
    }

    struct Broken;

    impl ObjectBehavior for Broken {
        fn create(&mut self, _params: &ObjectParams) -> SceneResult<NodeRef> {
            Err(SceneError::Construction("no geometry".to_string()))
        }
    }

    #[test]
    fn test_create_runs_once_and_params_are_kept() {
        let creates = Rc::new(Cell::new(0));
        let params = ObjectParams::new().with("size", 3.0_f32);
        let mut object = SceneObject::new(Counting { creates: creates.clone() }, params.clone()).unwrap();
        
        object.update(1.0);
        object.on_intersect_enter();
        object.on_intersect_leave();
        
        assert_eq!(creates.get(), 1);
        assert_eq!(object.params(), &params);
        assert!(object.debug_bindings().is_empty());
        assert_eq!(
            object.node().borrow().mesh.map(|m| m.geometry),
            Some(Geometry::cube(3.0))
        );
    }

    #[test]
    fn test_failing_factory_aborts_construction() {
        let result = SceneObject::new(Broken, ObjectParams::new());
        assert!(matches!(result, Err(SceneError::Construction(_))));
    }

    #[test]
    fn test_as_node_shares_the_same_node() {
        let creates = Rc::new(Cell::new(0));
        let shared = SceneObject::new_shared(Counting { creates }, ObjectParams::new()).unwrap();
        let node = shared.as_node();
        assert!(node.ptr_eq(shared.borrow().node()));
    }
}
