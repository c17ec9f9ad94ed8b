//! Time management utilities
//!
//! The orchestrator reads time exclusively through the [`Clock`] trait so
//! frame timing and pointer debouncing can be driven deterministically in
//! tests with a [`ManualClock`].

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Monotonic time source for the frame loop
pub trait Clock {
    /// Current instant, used for debounce deadlines
    fn now(&self) -> Instant;
    
    /// Seconds elapsed since the clock was created
    fn elapsed_seconds(&self) -> f32;
}

/// Wall clock backed by [`Instant`]
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    /// Create a clock that starts counting now
    pub fn new() -> Self {
        Self { start: Instant::now() }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
    
    fn elapsed_seconds(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}

/// Clock that only moves when told to
///
/// Clones share the same offset, so a test can keep one handle and hand
/// another to the orchestrator.
#[derive(Debug, Clone)]
pub struct ManualClock {
    start: Instant,
    offset: Rc<Cell<Duration>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    /// Create a clock frozen at its start instant
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            offset: Rc::new(Cell::new(Duration::ZERO)),
        }
    }
    
    /// Move the clock forward
    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get() + by);
    }
    
    /// Move the clock forward by a number of milliseconds
    pub fn advance_millis(&self, millis: u64) {
        self.advance(Duration::from_millis(millis));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.start + self.offset.get()
    }
    
    fn elapsed_seconds(&self) -> f32 {
        self.offset.get().as_secs_f32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_clones_share_time() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        
        handle.advance_millis(1500);
        
        assert!((clock.elapsed_seconds() - 1.5).abs() < 1e-6);
        assert_eq!(clock.now(), handle.now());
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let first = clock.elapsed_seconds();
        let second = clock.elapsed_seconds();
        assert!(second >= first);
    }
}
