//! Rays and ray/shape intersection

use crate::foundation::math::{Mat4, Point3, Vec3};
use crate::scene::Geometry;

/// A ray with an origin and a direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// The origin point of the ray
    pub origin: Vec3,
    /// The direction of the ray (normalized for world-space rays)
    pub direction: Vec3,
}

impl Default for Ray {
    fn default() -> Self {
        Self {
            origin: Vec3::zeros(),
            direction: Vec3::new(0.0, 0.0, -1.0),
        }
    }
}

impl Ray {
    /// Creates a new ray with the given origin and direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }
    
    /// Get a point along the ray at parameter t
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
    
    /// Express the ray in another space without renormalizing
    ///
    /// Keeping the direction unnormalized preserves the ray parameter: a hit
    /// at `t` in the transformed space is at `t` in the original one too.
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        Self {
            origin: matrix.transform_point(&Point3::from(self.origin)).coords,
            direction: matrix.transform_vector(&self.direction),
        }
    }
    
    /// Ray parameter of the first hit with a local-space shape, if any
    ///
    /// A ray starting inside the shape reports its exit point.
    pub fn intersect_geometry(&self, geometry: &Geometry) -> Option<f32> {
        match *geometry {
            Geometry::Box { width, height, depth } => {
                self.intersect_box(Vec3::new(width, height, depth) * 0.5)
            }
            Geometry::Sphere { radius } => self.intersect_sphere(radius),
        }
    }
    
    /// Slab test against an origin-centred box
    fn intersect_box(&self, half_extents: Vec3) -> Option<f32> {
        let mut t_min = f32::NEG_INFINITY;
        let mut t_max = f32::INFINITY;
        
        for axis in 0..3 {
            let origin = self.origin[axis];
            let direction = self.direction[axis];
            let half = half_extents[axis];
            
            if direction.abs() < f32::EPSILON {
                // Parallel to this slab: miss unless the origin is inside it
                if origin < -half || origin > half {
                    return None;
                }
                continue;
            }
            
            let inv = 1.0 / direction;
            let mut t1 = (-half - origin) * inv;
            let mut t2 = (half - origin) * inv;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }
            t_min = t_min.max(t1);
            t_max = t_max.min(t2);
            if t_min > t_max {
                return None;
            }
        }
        
        if t_max < 0.0 {
            None
        } else if t_min >= 0.0 {
            Some(t_min)
        } else {
            Some(t_max)
        }
    }
    
    /// Quadratic test against an origin-centred sphere
    fn intersect_sphere(&self, radius: f32) -> Option<f32> {
        let a = self.direction.dot(&self.direction);
        let b = 2.0 * self.origin.dot(&self.direction);
        let c = self.origin.dot(&self.origin) - radius * radius;
        
        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 || a == 0.0 {
            return None;
        }
        
        let sqrt_discriminant = discriminant.sqrt();
        let t1 = (-b - sqrt_discriminant) / (2.0 * a);
        let t2 = (-b + sqrt_discriminant) / (2.0 * a);
        
        if t1 >= 0.0 {
            Some(t1)
        } else if t2 >= 0.0 {
            Some(t2)
        } else {
            None
        }
    }
}
