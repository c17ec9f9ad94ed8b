//! # Perspective Camera
//!
//! The single camera an orchestrator renders through. Projection parameters
//! are cached: after changing `fov`, `aspect`, `near` or `far`, call
//! [`PerspectiveCamera::update_projection_matrix`] before the next render or
//! ray cast.
//!
//! ## Coordinate System
//! Right-handed, Y-up. A fresh camera sits at the origin looking down -Z.
//! Normalized device coordinates span `[-1, 1]` on every axis with +Y up.

use crate::config::CameraProps;
use crate::foundation::math::{utils, Mat4, Mat4Ext, Point3, Vec3};

/// Perspective camera with a look-at orientation
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    /// Camera position in world space
    pub position: Vec3,
    
    /// Point the camera is looking at in world space
    pub target: Vec3,
    
    /// Up vector for camera orientation (typically [0, 1, 0])
    pub up: Vec3,
    
    /// Vertical field of view in degrees
    pub fov: f32,
    
    /// Aspect ratio (width / height)
    pub aspect: f32,
    
    /// Distance to near clipping plane
    pub near: f32,
    
    /// Distance to far clipping plane
    pub far: f32,
    
    projection: Mat4,
    projection_inverse: Mat4,
}

impl PerspectiveCamera {
    /// Create a camera at the origin looking down -Z
    ///
    /// # Arguments
    /// * `fov` - Vertical field of view in degrees
    /// * `aspect` - Aspect ratio (width / height) of the viewport
    /// * `near` - Distance to near clipping plane (must be > 0)
    /// * `far` - Distance to far clipping plane (must be > near)
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            position: Vec3::zeros(),
            target: Vec3::new(0.0, 0.0, -1.0),
            up: Vec3::y(),
            fov,
            aspect,
            near,
            far,
            projection: Mat4::identity(),
            projection_inverse: Mat4::identity(),
        };
        camera.update_projection_matrix();
        camera
    }
    
    /// Create a camera from configuration
    pub fn from_props(props: &CameraProps, aspect: f32) -> Self {
        Self::new(props.fov, aspect, props.near, props.far)
    }
    
    /// Recompute the cached projection after a parameter change
    pub fn update_projection_matrix(&mut self) {
        self.projection = Mat4::perspective(utils::deg_to_rad(self.fov), self.aspect, self.near, self.far);
        self.projection_inverse = self.projection.try_inverse().unwrap_or_else(|| {
            log::warn!("Degenerate projection (fov {}, aspect {}), keeping identity inverse", self.fov, self.aspect);
            Mat4::identity()
        });
        log::trace!("Camera projection updated: fov {:.1}, aspect {:.3}", self.fov, self.aspect);
    }
    
    /// Update camera position in world space
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }
    
    /// Point the camera at `target`
    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }
    
    /// Cached projection matrix
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection
    }
    
    /// World-to-camera transform
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.position, self.target, self.up)
    }
    
    /// Combined projection × view
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }
    
    /// Unit vector the camera is facing
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize()
    }
    
    /// Map a point from normalized device coordinates back to world space
    pub fn unproject(&self, ndc: Vec3) -> Vec3 {
        let camera_to_world = self.view_matrix().try_inverse().unwrap_or_else(Mat4::identity);
        let view_point = self.projection_inverse.transform_point(&Point3::from(ndc));
        camera_to_world.transform_point(&view_point).coords
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::from_props(&CameraProps::default(), 1.0)
    }
}
