//! Orbit camera controls
//!
//! Orbits the camera around its target: dragging with the primary button
//! rotates, the wheel zooms. Input accumulates into a pending delta that
//! [`OrbitControls::update`] bleeds off by the damping factor every frame,
//! so motion eases out after the input stops.

use crate::foundation::math::{constants, Vec3};
use crate::host::{HostEvent, PointerButtons, Size};
use crate::render::PerspectiveCamera;

const MIN_POLAR: f32 = 1.0e-6;
const SETTLED: f32 = 1.0e-6;

/// Damped orbit controls
#[derive(Debug, Clone)]
pub struct OrbitControls {
    /// Point the camera orbits around
    pub target: Vec3,
    /// Fraction of the pending motion applied per update
    pub damping_factor: f32,
    /// Rotation speed multiplier
    pub rotate_speed: f32,
    /// Zoom speed multiplier
    pub zoom_speed: f32,
    /// Closest allowed distance to the target
    pub min_distance: f32,
    /// Farthest allowed distance to the target
    pub max_distance: f32,
    
    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
    drag_from: Option<(f64, f64)>,
}

impl OrbitControls {
    /// Controls orbiting the camera's current target
    pub fn new(camera: &PerspectiveCamera) -> Self {
        Self {
            target: camera.target,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
            drag_from: None,
        }
    }
    
    /// Feed a host event; `surface` scales drag distances
    pub fn handle_event(&mut self, event: &HostEvent, surface: Size) {
        match *event {
            HostEvent::PointerDown { client_x, client_y, button } if button.contains(PointerButtons::PRIMARY) => {
                self.drag_from = Some((client_x, client_y));
            }
            HostEvent::PointerUp { button } if button.contains(PointerButtons::PRIMARY) => {
                self.drag_from = None;
            }
            HostEvent::PointerMove { client_x, client_y, buttons } => {
                let Some((from_x, from_y)) = self.drag_from else {
                    return;
                };
                if !buttons.contains(PointerButtons::PRIMARY) {
                    self.drag_from = None;
                    return;
                }
                let height = surface.height.max(1) as f32;
                let dx = (client_x - from_x) as f32;
                let dy = (client_y - from_y) as f32;
                self.rotate_left(constants::TAU * dx / height * self.rotate_speed);
                self.rotate_up(constants::TAU * dy / height * self.rotate_speed);
                self.drag_from = Some((client_x, client_y));
            }
            HostEvent::Wheel { delta_y } => {
                let step = 0.95_f32.powf(self.zoom_speed);
                if delta_y > 0.0 {
                    self.scale /= step;
                } else if delta_y < 0.0 {
                    self.scale *= step;
                }
            }
            _ => {}
        }
    }
    
    /// Queue a rotation around the vertical axis
    pub fn rotate_left(&mut self, angle: f32) {
        self.delta_theta -= angle;
    }
    
    /// Queue a rotation towards the poles
    pub fn rotate_up(&mut self, angle: f32) {
        self.delta_phi -= angle;
    }
    
    /// Whether the drag button is held
    pub fn is_dragging(&self) -> bool {
        self.drag_from.is_some()
    }
    
    /// Apply one frame of damped motion to `camera`; returns whether it moved
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let offset = camera.position - self.target;
        let mut radius = offset.norm();
        let (mut theta, mut phi) = if radius > 0.0 {
            (offset.x.atan2(offset.z), (offset.y / radius).clamp(-1.0, 1.0).acos())
        } else {
            (0.0, constants::PI / 2.0)
        };
        
        theta += self.delta_theta * self.damping_factor;
        phi = (phi + self.delta_phi * self.damping_factor).clamp(MIN_POLAR, constants::PI - MIN_POLAR);
        radius = (radius * (1.0 + (self.scale - 1.0) * self.damping_factor)).clamp(self.min_distance, self.max_distance);
        
        let new_offset = Vec3::new(
            radius * phi.sin() * theta.sin(),
            radius * phi.cos(),
            radius * phi.sin() * theta.cos(),
        );
        let position = self.target + new_offset;
        let moved = (position - camera.position).norm() > SETTLED || camera.target != self.target;
        
        camera.set_position(position);
        camera.look_at(self.target);
        
        let keep = 1.0 - self.damping_factor;
        self.delta_theta *= keep;
        self.delta_phi *= keep;
        self.scale = 1.0 + (self.scale - 1.0) * keep;
        
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn camera() -> PerspectiveCamera {
        let mut camera = PerspectiveCamera::new(75.0, 1.0, 0.1, 1000.0);
        camera.set_position(Vec3::new(0.0, 0.0, 10.0));
        camera.look_at(Vec3::zeros());
        camera
    }

    #[test]
    fn test_idle_controls_keep_camera() {
        let mut camera = camera();
        let mut controls = OrbitControls::new(&camera);
        
        assert!(!controls.update(&mut camera));
        assert_relative_eq!(camera.position, Vec3::new(0.0, 0.0, 10.0), epsilon = 1e-4);
    }

    #[test]
    fn test_drag_rotates_with_damping() {
        let mut camera = camera();
        let mut controls = OrbitControls::new(&camera);
        let surface = Size::new(100, 100);
        
        controls.handle_event(
            &HostEvent::PointerDown { client_x: 50.0, client_y: 50.0, button: PointerButtons::PRIMARY },
            surface,
        );
        controls.handle_event(
            &HostEvent::PointerMove { client_x: 60.0, client_y: 50.0, buttons: PointerButtons::PRIMARY },
            surface,
        );
        
        assert!(controls.update(&mut camera));
        let first = camera.position;
        assert!(controls.update(&mut camera));
        
        assert_relative_eq!(camera.position.norm(), 10.0, epsilon = 1e-3);
        assert!(first.x < 0.0);
        assert!(camera.position.x < first.x);
    }

    #[test]
    fn test_wheel_zooms_out_and_in() {
        let mut camera = camera();
        let mut controls = OrbitControls::new(&camera);
        
        controls.handle_event(&HostEvent::Wheel { delta_y: 1.0 }, Size::new(100, 100));
        controls.update(&mut camera);
        assert!(camera.position.z > 10.0);
        
        let mut camera = self::camera();
        let mut controls = OrbitControls::new(&camera);
        controls.handle_event(&HostEvent::Wheel { delta_y: -1.0 }, Size::new(100, 100));
        controls.update(&mut camera);
        assert!(camera.position.z < 10.0);
    }

    #[test]
    fn test_move_without_button_ends_drag() {
        let camera = camera();
        let mut controls = OrbitControls::new(&camera);
        controls.handle_event(
            &HostEvent::PointerDown { client_x: 0.0, client_y: 0.0, button: PointerButtons::PRIMARY },
            Size::new(10, 10),
        );
        controls.handle_event(
            &HostEvent::PointerMove { client_x: 1.0, client_y: 1.0, buttons: PointerButtons::empty() },
            Size::new(10, 10),
        );
        assert!(!controls.is_dragging());
    }
}
