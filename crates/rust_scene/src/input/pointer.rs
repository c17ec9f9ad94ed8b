//! Pointer tracking
//!
//! Converts pointer positions into normalized device coordinates and keeps
//! a debounced "moving" flag. Every move pushes the single idle deadline
//! forward; the flag only drops once the pointer has been still for the
//! whole idle period.

use std::time::{Duration, Instant};

use crate::foundation::math::Vec2;
use crate::host::Size;

/// Default time without movement before the pointer counts as idle
pub const DEFAULT_IDLE: Duration = Duration::from_millis(300);

/// Pointer position and movement state
#[derive(Debug, Clone)]
pub struct PointerTracker {
    coords: Vec2,
    moving: bool,
    idle_after: Duration,
    deadline: Option<Instant>,
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new(DEFAULT_IDLE)
    }
}

impl PointerTracker {
    /// Create a tracker that goes idle after `idle_after` without movement
    pub fn new(idle_after: Duration) -> Self {
        Self {
            coords: Vec2::zeros(),
            moving: false,
            idle_after,
            deadline: None,
        }
    }
    
    /// Record a move to surface position (`client_x`, `client_y`) on a
    /// surface of `surface` size
    ///
    /// Coordinates map to `[-1, 1]` with +Y up. Re-arms the idle deadline.
    pub fn handle_pointer_move(&mut self, client_x: f64, client_y: f64, surface: Size, now: Instant) {
        let width = f64::from(surface.width.max(1));
        let height = f64::from(surface.height.max(1));
        self.coords = Vec2::new(
            ((client_x / width) * 2.0 - 1.0) as f32,
            (-(client_y / height) * 2.0 + 1.0) as f32,
        );
        self.moving = true;
        self.deadline = Some(now + self.idle_after);
    }
    
    /// Expire the idle deadline if it has passed
    pub fn poll(&mut self, now: Instant) {
        if let Some(deadline) = self.deadline {
            if now >= deadline {
                self.moving = false;
                self.deadline = None;
            }
        }
    }
    
    /// Whether the pointer moved within the idle period
    pub fn is_moving(&self) -> bool {
        self.moving
    }
    
    /// Last pointer position in normalized device coordinates
    pub fn coords(&self) -> Vec2 {
        self.coords
    }
    
    /// Idle period
    pub fn idle_after(&self) -> Duration {
        self.idle_after
    }
    
    /// Pending idle deadline, if the pointer is moving
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SURFACE: Size = Size::new(800, 600);

    #[test]
    fn test_coordinate_mapping() {
        let mut tracker = PointerTracker::default();
        let now = Instant::now();
        
        tracker.handle_pointer_move(400.0, 300.0, SURFACE, now);
        assert_relative_eq!(tracker.coords(), Vec2::zeros());
        
        tracker.handle_pointer_move(0.0, 0.0, SURFACE, now);
        assert_relative_eq!(tracker.coords(), Vec2::new(-1.0, 1.0));
        
        tracker.handle_pointer_move(800.0, 600.0, SURFACE, now);
        assert_relative_eq!(tracker.coords(), Vec2::new(1.0, -1.0));
    }

    #[test]
    fn test_moves_within_idle_period_keep_moving() {
        let mut tracker = PointerTracker::new(Duration::from_millis(300));
        let start = Instant::now();
        
        for step in 0..10u64 {
            let now = start + Duration::from_millis(step * 100);
            tracker.handle_pointer_move(10.0, 10.0, SURFACE, now);
            tracker.poll(now);
            assert!(tracker.is_moving());
        }
        
        let last_move = start + Duration::from_millis(900);
        tracker.poll(last_move + Duration::from_millis(299));
        assert!(tracker.is_moving());
        
        tracker.poll(last_move + Duration::from_millis(300));
        assert!(!tracker.is_moving());
        assert!(tracker.deadline().is_none());
    }

    #[test]
    fn test_single_deadline_is_replaced() {
        let mut tracker = PointerTracker::new(Duration::from_millis(300));
        let start = Instant::now();
        
        tracker.handle_pointer_move(1.0, 1.0, SURFACE, start);
        tracker.handle_pointer_move(2.0, 2.0, SURFACE, start + Duration::from_millis(200));
        
        assert_eq!(tracker.deadline(), Some(start + Duration::from_millis(500)));
        tracker.poll(start + Duration::from_millis(400));
        assert!(tracker.is_moving());
    }

    #[test]
    fn test_idle_without_moves() {
        let mut tracker = PointerTracker::default();
        tracker.poll(Instant::now());
        assert!(!tracker.is_moving());
    }
}
