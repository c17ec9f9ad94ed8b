//! Keyframe animation clips
//!
//! A clip is a set of tracks. Each track drives one named property of one
//! named node (the property names are the ones nodes expose for debug
//! binding, e.g. `position.y` or `rotation.z`) and is sampled with linear
//! interpolation between keyframes.

use serde::{Deserialize, Serialize};

use crate::debug::Tweakable;
use crate::error::{SceneError, SceneResult};
use crate::foundation::math::utils;
use crate::scene::NodeRef;

/// Keyframes for one property of one node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyframeTrack {
    /// Name of the animated node
    pub node: String,
    /// Property on that node
    pub property: String,
    /// Keyframe times in seconds, ascending
    pub times: Vec<f32>,
    /// One value per keyframe
    pub values: Vec<f32>,
}

impl KeyframeTrack {
    /// Create a track
    pub fn new(node: impl Into<String>, property: impl Into<String>, times: Vec<f32>, values: Vec<f32>) -> Self {
        Self {
            node: node.into(),
            property: property.into(),
            times,
            values,
        }
    }
    
    /// Time of the last keyframe
    pub fn end_time(&self) -> f32 {
        self.times.last().copied().unwrap_or(0.0)
    }
    
    /// Value at `time`, holding the first and last keys outside the range
    ///
    /// A NaN time reads the first key.
    pub fn sample(&self, time: f32) -> Option<f32> {
        let count = self.times.len().min(self.values.len());
        if count == 0 {
            return None;
        }
        if time.is_nan() || time <= self.times[0] {
            return Some(self.values[0]);
        }
        if time >= self.times[count - 1] {
            return Some(self.values[count - 1]);
        }
        
        let next = self.times[..count].partition_point(|t| *t <= time);
        let (t0, t1) = (self.times[next - 1], self.times[next]);
        let span = t1 - t0;
        let alpha = if span > 0.0 { (time - t0) / span } else { 1.0 };
        Some(utils::lerp(self.values[next - 1], self.values[next], alpha))
    }
}

/// Named set of tracks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationClip {
    /// Clip name, unique within an asset's mixer
    pub name: String,
    /// Length in seconds; negative means "derive from the tracks"
    #[serde(default = "derived_duration")]
    pub duration: f32,
    /// Tracks in this clip
    pub tracks: Vec<KeyframeTrack>,
}

fn derived_duration() -> f32 {
    -1.0
}

impl AnimationClip {
    /// Create a clip whose duration is the end of its longest track
    pub fn new(name: impl Into<String>, tracks: Vec<KeyframeTrack>) -> Self {
        let mut clip = Self {
            name: name.into(),
            duration: derived_duration(),
            tracks,
        };
        clip.reset_duration();
        clip
    }
    
    /// Recompute the duration from the tracks
    pub fn reset_duration(&mut self) {
        self.duration = self.tracks.iter().map(KeyframeTrack::end_time).fold(0.0, f32::max);
    }
}

/// A loaded model: its node tree plus the clips that animate it
#[derive(Debug, Clone)]
pub struct AnimatedAsset {
    /// Root of the model's node tree
    pub scene: NodeRef,
    /// Bundled clips, in file order
    pub animations: Vec<AnimationClip>,
}

impl AnimatedAsset {
    /// Bundle a node tree with its clips
    pub fn new(scene: NodeRef, animations: Vec<AnimationClip>) -> Self {
        Self { scene, animations }
    }
    
    /// Check that every track names a node in the tree and a numeric
    /// property on it
    pub fn validate(&self) -> SceneResult<()> {
        for clip in &self.animations {
            for track in &clip.tracks {
                let node = self.scene.find_by_name(&track.node).ok_or_else(|| {
                    SceneError::Construction(format!("clip '{}' animates missing node '{}'", clip.name, track.node))
                })?;
                let value = node.borrow().get_property(&track.property);
                match value {
                    Some(value) if value.as_f64().is_some() => {}
                    Some(value) => {
                        return Err(SceneError::Construction(format!(
                            "clip '{}' animates '{}.{}', which is a {}",
                            clip.name,
                            track.node,
                            track.property,
                            value.kind()
                        )));
                    }
                    None => {
                        return Err(SceneError::Construction(format!(
                            "clip '{}' animates unknown property '{}.{}'",
                            clip.name, track.node, track.property
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn bounce() -> KeyframeTrack {
        bounce_on("body", "position.y")
    }

    fn bounce_on(node: &str, property: &str) -> KeyframeTrack {
        KeyframeTrack::new(node, property, vec![0.0, 1.0, 2.0], vec![0.0, 2.0, 0.0])
    }

    #[test]
    fn test_linear_sampling() {
        let track = bounce();
        assert_relative_eq!(track.sample(0.5).unwrap(), 1.0);
        assert_relative_eq!(track.sample(1.0).unwrap(), 2.0);
        assert_relative_eq!(track.sample(1.75).unwrap(), 0.5);
    }

    #[test]
    fn test_sampling_holds_ends() {
        let track = bounce();
        assert_eq!(track.sample(-1.0), Some(0.0));
        assert_eq!(track.sample(5.0), Some(0.0));
        assert_eq!(KeyframeTrack::new("n", "p", vec![], vec![]).sample(0.0), None);
    }

    #[test]
    fn test_clip_duration_from_tracks() {
        let clip = AnimationClip::new(
            "Walk",
            vec![bounce(), KeyframeTrack::new("body", "rotation.y", vec![0.0, 3.0], vec![0.0, 1.0])],
        );
        assert_eq!(clip.duration, 3.0);
    }

    #[test]
    fn test_nan_time_reads_first_key() {
        assert_eq!(bounce().sample(f32::NAN), Some(0.0));
        assert_eq!(bounce().sample(f32::INFINITY), Some(0.0));
    }

    #[test]
    fn test_validate_names_bad_tracks() {
        let root = NodeRef::new(crate::scene::Node::group("robot"));
        let good = AnimatedAsset::new(root.clone(), vec![AnimationClip::new("Walk", vec![bounce_on("robot", "position.y")])]);
        let unknown = AnimatedAsset::new(root.clone(), vec![AnimationClip::new("Fade", vec![bounce_on("robot", "opacity")])]);
        let boolean = AnimatedAsset::new(root.clone(), vec![AnimationClip::new("Blink", vec![bounce_on("robot", "visible")])]);
        let orphan = AnimatedAsset::new(root, vec![AnimationClip::new("Wave", vec![bounce_on("arm", "rotation.z")])]);
        
        assert!(good.validate().is_ok());
        assert!(matches!(unknown.validate(), Err(SceneError::Construction(_))));
        assert!(matches!(boolean.validate(), Err(SceneError::Construction(_))));
        assert!(matches!(orphan.validate(), Err(SceneError::Construction(_))));
    }
}
