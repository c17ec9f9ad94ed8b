//! Ray picking and hover selection

pub mod ray;
pub mod raycaster;
pub mod selection;

pub use ray::Ray;
pub use raycaster::{Intersection, Raycaster};
pub use selection::{SelectHandle, SelectionManager};
