//! Pointer hover selection
//!
//! Candidates subscribe with [`SelectionManager::subscribe`]. Each
//! evaluation casts one ray from the camera through the pointer, tells every
//! candidate it has been left, then tells the nearest hit candidate it has
//! been entered. Exactly one object (or none) is "entered" per evaluation.

use crate::foundation::collections::OrderedRegistry;
use crate::foundation::math::Vec2;
use crate::picking::raycaster::Raycaster;
use crate::render::PerspectiveCamera;
use crate::scene::SharedObject;

slotmap::new_key_type! {
    /// Handle returned by [`SelectionManager::subscribe`]
    pub struct SelectHandle;
}

/// Registry of hover-selectable scene objects
#[derive(Debug, Default)]
pub struct SelectionManager {
    raycaster: Raycaster,
    candidates: OrderedRegistry<SelectHandle, SharedObject>,
}

impl SelectionManager {
    /// Create an empty manager
    pub fn new() -> Self {
        Self::default()
    }
    
    /// Register a candidate; the same object may be registered more than once
    pub fn subscribe(&mut self, object: SharedObject) -> SelectHandle {
        let handle = self.candidates.insert(object);
        log::debug!("Selectable registered: {:?}", handle);
        handle
    }
    
    /// Remove a candidate; unknown handles are ignored
    pub fn unsubscribe(&mut self, handle: SelectHandle) -> Option<SharedObject> {
        let removed = self.candidates.remove(handle);
        if removed.is_some() {
            log::debug!("Selectable removed: {:?}", handle);
        }
        removed
    }
    
    /// Number of registered candidates
    pub fn len(&self) -> usize {
        self.candidates.len()
    }
    
    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
    
    /// The ray used by the last evaluation
    pub fn raycaster(&self) -> &Raycaster {
        &self.raycaster
    }
    
    /// Run one hover evaluation for the pointer at `coords` (NDC)
    ///
    /// Returns the handle of the candidate that received the enter hook.
    /// Equal distances resolve to the earliest registration.
    pub fn evaluate(&mut self, coords: Vec2, camera: &PerspectiveCamera) -> Option<SelectHandle> {
        if self.candidates.is_empty() {
            return None;
        }
        
        self.raycaster.set_from_camera(coords, camera);
        
        let mut closest: Option<(SelectHandle, SharedObject)> = None;
        let mut closest_distance = f32::MAX;
        
        for (handle, object) in self.candidates.snapshot() {
            let node = object.borrow().node().clone();
            let hits = self.raycaster.intersect_object(&node, true);
            
            object.borrow_mut().on_intersect_leave();
            
            if let Some(first) = hits.first() {
                if first.distance < closest_distance {
                    closest_distance = first.distance;
                    closest = Some((handle, object));
                }
            }
        }
        
        let (handle, object) = closest?;
        log::trace!("Pointer over {:?} at distance {:.3}", handle, closest_distance);
        object.borrow_mut().on_intersect_enter();
        Some(handle)
    }
}
