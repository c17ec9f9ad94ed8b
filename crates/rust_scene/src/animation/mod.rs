//! Keyframe animation

pub mod clip;
pub mod mixer;

pub use clip::{AnimatedAsset, AnimationClip, KeyframeTrack};
pub use mixer::{AnimationAction, AnimationMixer};
