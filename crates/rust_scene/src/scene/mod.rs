//! Scene module
//!
//! Native nodes, the scene graph that holds them, and the scene objects
//! application code builds on top of them.

pub mod graph;
pub mod node;
pub mod object;
pub mod params;

pub use graph::SceneGraph;
pub use node::{Geometry, Material, Mesh, Node, NodeRef};
pub use object::{AsNode, ObjectBehavior, SceneObject, SharedObject};
pub use params::{Color, ObjectParams, ParamValue};
