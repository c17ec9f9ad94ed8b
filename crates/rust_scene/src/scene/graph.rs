//! Scene graph container

use crate::scene::node::{Node, NodeRef};

/// Root container for everything the renderer draws
#[derive(Debug, Clone)]
pub struct SceneGraph {
    root: NodeRef,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    /// Create an empty scene
    pub fn new() -> Self {
        Self {
            root: NodeRef::new(Node::group("scene")),
        }
    }
    
    /// Insert a node at the top level
    pub fn add(&mut self, node: NodeRef) {
        log::trace!("Scene add: {:?}", node);
        self.root.add_child(node);
    }
    
    /// Remove a top-level node by identity
    pub fn remove(&mut self, node: &NodeRef) -> bool {
        self.root.remove_child(node)
    }
    
    /// Whether `node` is a top-level child
    pub fn contains(&self, node: &NodeRef) -> bool {
        self.root.borrow().children().iter().any(|c| c.ptr_eq(node))
    }
    
    /// The root node
    pub fn root(&self) -> &NodeRef {
        &self.root
    }
    
    /// Top-level nodes in insertion order
    pub fn children(&self) -> Vec<NodeRef> {
        self.root.children()
    }
    
    /// Number of top-level nodes
    pub fn len(&self) -> usize {
        self.root.borrow().children().len()
    }
    
    /// Whether the scene has no nodes
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    
    /// Depth-first visit of every node below the root
    pub fn traverse(&self, f: &mut dyn FnMut(&NodeRef)) {
        for child in self.children() {
            child.traverse(f);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_traverse() {
        let mut scene = SceneGraph::new();
        let parent = NodeRef::new(Node::group("parent"));
        parent.add_child(NodeRef::new(Node::group("child")));
        scene.add(parent.clone());
        
        let mut names = Vec::new();
        scene.traverse(&mut |node| names.push(node.borrow().name.clone()));
        
        assert_eq!(names, vec!["parent", "child"]);
        assert!(scene.contains(&parent));
        assert!(scene.remove(&parent));
        assert!(scene.is_empty());
    }
}
