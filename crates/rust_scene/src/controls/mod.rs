//! Camera controls

pub mod orbit;

pub use orbit::OrbitControls;
