//! Pointer input

pub mod pointer;

pub use pointer::{PointerTracker, DEFAULT_IDLE};
