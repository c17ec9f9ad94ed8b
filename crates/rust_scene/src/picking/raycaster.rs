//! Ray casting against scene nodes

use crate::foundation::math::{Mat4, Vec2, Vec3};
use crate::picking::ray::Ray;
use crate::render::PerspectiveCamera;
use crate::scene::NodeRef;

/// A ray hit on a node
#[derive(Debug, Clone)]
pub struct Intersection {
    /// Distance from the ray origin to the hit point
    pub distance: f32,
    /// Hit point in world space
    pub point: Vec3,
    /// The mesh node that was hit
    pub node: NodeRef,
}

/// Casts rays from a camera through pointer coordinates
#[derive(Debug, Clone)]
pub struct Raycaster {
    /// Current ray in world space
    pub ray: Ray,
    /// Hits closer than this are ignored
    pub near: f32,
    /// Hits farther than this are ignored
    pub far: f32,
}

impl Default for Raycaster {
    fn default() -> Self {
        Self::new()
    }
}

impl Raycaster {
    /// Raycaster with an unbounded range
    pub fn new() -> Self {
        Self {
            ray: Ray::default(),
            near: 0.0,
            far: f32::INFINITY,
        }
    }
    
    /// Aim the ray from the camera through normalized device coordinates
    pub fn set_from_camera(&mut self, coords: Vec2, camera: &PerspectiveCamera) {
        let through = camera.unproject(Vec3::new(coords.x, coords.y, 0.5));
        self.ray = Ray::new(camera.position, through - camera.position);
    }
    
    /// Hits on `node` (and, when `recursive`, its descendants), nearest first
    ///
    /// `node` is treated as a top-level scene node: its local transform is
    /// its world transform.
    pub fn intersect_object(&self, node: &NodeRef, recursive: bool) -> Vec<Intersection> {
        let mut hits = Vec::new();
        self.intersect_node(node, &Mat4::identity(), recursive, &mut hits);
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
    
    fn intersect_node(
        &self,
        node: &NodeRef,
        parent_world: &Mat4,
        recursive: bool,
        hits: &mut Vec<Intersection>,
    ) {
        let (world, mesh) = {
            let n = node.borrow();
            (parent_world * n.local_matrix(), n.mesh)
        };
        
        if let Some(mesh) = mesh {
            if let Some(to_local) = world.try_inverse() {
                let local_ray = self.ray.transformed(&to_local);
                if let Some(t) = local_ray.intersect_geometry(&mesh.geometry) {
                    if t >= self.near && t <= self.far {
                        hits.push(Intersection {
                            distance: t,
                            point: self.ray.point_at(t),
                            node: node.clone(),
                        });
                    }
                }
            }
        }
        
        if recursive {
            for child in node.children() {
                self.intersect_node(&child, &world, true, hits);
            }
        }
    }
}
