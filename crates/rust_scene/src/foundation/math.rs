//! Math utilities and types
//!
//! Provides the fundamental math types shared by the scene graph, the camera
//! and the picking code.

pub use nalgebra::{
    Vector2, Vector3, Vector4,
    Matrix4,
    Quaternion,
    Unit,
};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Transform representing position, rotation, and scale
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,
    
    /// Rotation as XYZ Euler angles in radians
    pub rotation: Vec3,
    
    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }
    
    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }
    
    /// Rotation as a unit quaternion (roll = X, pitch = Y, yaw = Z)
    pub fn quaternion(&self) -> Quat {
        Quat::from_euler_angles(self.rotation.x, self.rotation.y, self.rotation.z)
    }
    
    /// Convert to a transformation matrix
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.quaternion().to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }
    
    /// Set the same scale factor on every axis
    pub fn set_uniform_scale(&mut self, scale: f32) {
        self.scale = Vec3::new(scale, scale, scale);
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;
    
    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;
    
    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::constants;
    
    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }
    
    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }
}

/// Extension trait for Mat4 with camera matrix constructors
pub trait Mat4Ext {
    /// Create an OpenGL-style perspective projection matrix (NDC depth in [-1, 1])
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4;
    
    /// Create a right-handed look-at view matrix
    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        // P = [1/(a*tan(φ/2))  0            0               0            ]
        //     [0               1/tan(φ/2)   0               0            ]
        //     [0               0            -(f+n)/(f-n)    -2fn/(f-n)   ]
        //     [0               0            -1              0            ]
        let tan_half_fovy = (fov_y * 0.5).tan();
        
        let mut result = Mat4::zeros();
        result[(0, 0)] = 1.0 / (aspect * tan_half_fovy);
        result[(1, 1)] = 1.0 / tan_half_fovy;
        result[(2, 2)] = -(far + near) / (far - near);
        result[(2, 3)] = -(2.0 * far * near) / (far - near);
        result[(3, 2)] = -1.0;
        
        result
    }
    
    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        let forward = (target - eye).normalize();
        let right = forward.cross(&up).normalize();
        let camera_up = right.cross(&forward);
        
        let translation = Mat4::new(
            1.0, 0.0, 0.0, -eye.x,
            0.0, 1.0, 0.0, -eye.y,
            0.0, 0.0, 1.0, -eye.z,
            0.0, 0.0, 0.0, 1.0,
        );
        
        let rotation = Mat4::new(
            right.x, right.y, right.z, 0.0,
            camera_up.x, camera_up.y, camera_up.z, 0.0,
            -forward.x, -forward.y, -forward.z, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        
        rotation * translation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_transform_matrix_translates_points() {
        let transform = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
        let moved = transform.to_matrix().transform_point(&Point3::origin());
        assert_relative_eq!(moved.coords, Vec3::new(1.0, 2.0, 3.0), epsilon = 1e-6);
    }

    #[test]
    fn test_perspective_maps_near_plane_to_minus_one() {
        let proj = Mat4::perspective(utils::deg_to_rad(75.0), 1.0, 0.1, 1000.0);
        let clip = proj * Vec4::new(0.0, 0.0, -0.1, 1.0);
        assert_relative_eq!(clip.z / clip.w, -1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_look_at_moves_eye_to_origin() {
        let view = Mat4::look_at(Vec3::new(0.0, 0.0, 10.0), Vec3::zeros(), Vec3::y());
        let eye = view.transform_point(&Point3::new(0.0, 0.0, 10.0));
        assert_relative_eq!(eye.coords, Vec3::zeros(), epsilon = 1e-6);
    }
}
