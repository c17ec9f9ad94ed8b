//! Animation mixer
//!
//! One mixer wraps one [`AnimatedAsset`]. Every clip becomes an
//! [`AnimationAction`] indexed by clip name; [`AnimationMixer::update`]
//! advances the playing actions and writes their sampled values onto the
//! asset's nodes.

use std::collections::BTreeMap;

use crate::animation::clip::{AnimatedAsset, AnimationClip};
use crate::debug::Tweakable;
use crate::error::SceneResult;
use crate::scene::{NodeRef, ParamValue};

/// Playback state of one clip
#[derive(Debug, Clone)]
pub struct AnimationAction {
    clip: AnimationClip,
    time: f32,
    playing: bool,
    looping: bool,
}

impl AnimationAction {
    fn new(clip: AnimationClip) -> Self {
        Self {
            clip,
            time: 0.0,
            playing: false,
            looping: true,
        }
    }
    
    /// Start (or resume) playback
    pub fn play(&mut self) -> &mut Self {
        self.playing = true;
        self
    }
    
    /// Stop playback and rewind
    pub fn stop(&mut self) -> &mut Self {
        self.playing = false;
        self.time = 0.0;
        self
    }
    
    /// Repeat from the start after the last keyframe (the default)
    pub fn set_loop(&mut self, looping: bool) -> &mut Self {
        self.looping = looping;
        self
    }
    
    /// Whether the action is advancing
    pub fn is_running(&self) -> bool {
        self.playing
    }
    
    /// Local playback time in seconds
    pub fn time(&self) -> f32 {
        self.time
    }
    
    /// The clip this action plays
    pub fn clip(&self) -> &AnimationClip {
        &self.clip
    }
    
    fn advance(&mut self, delta: f32) {
        if !self.playing {
            return;
        }
        self.time += delta;
        let duration = self.clip.duration;
        if duration <= 0.0 {
            return;
        }
        if self.looping {
            self.time = self.time.rem_euclid(duration);
        } else if self.time >= duration {
            self.time = duration;
            self.playing = false;
        }
    }
}

/// Drives every clip of one animated asset
#[derive(Debug)]
pub struct AnimationMixer {
    root: NodeRef,
    actions: BTreeMap<String, AnimationAction>,
    time: f32,
}

impl AnimationMixer {
    /// Index every clip of `asset` by name
    ///
    /// A clip whose name repeats an earlier one replaces it. Tracks that
    /// cannot drive their node are reported here and skipped on update.
    pub fn new(asset: &AnimatedAsset) -> Self {
        if let Err(error) = asset.validate() {
            log::warn!("Animated asset has unusable tracks: {}", error);
        }
        let mut actions = BTreeMap::new();
        for clip in &asset.animations {
            if actions.insert(clip.name.clone(), AnimationAction::new(clip.clone())).is_some() {
                log::warn!("Duplicate animation clip '{}', keeping the later one", clip.name);
            }
        }
        log::debug!("Animation mixer created with {} actions", actions.len());
        Self {
            root: asset.scene.clone(),
            actions,
            time: 0.0,
        }
    }
    
    /// Actions indexed by clip name
    pub fn actions(&self) -> &BTreeMap<String, AnimationAction> {
        &self.actions
    }
    
    /// Action for the named clip
    pub fn action(&self, name: &str) -> Option<&AnimationAction> {
        self.actions.get(name)
    }
    
    /// Mutable action for the named clip
    pub fn action_mut(&mut self, name: &str) -> Option<&mut AnimationAction> {
        self.actions.get_mut(name)
    }
    
    /// All actions, ordered by name
    pub fn actions_list(&self) -> Vec<&AnimationAction> {
        self.actions.values().collect()
    }
    
    /// Whether the asset bundled any clip
    pub fn has_animations(&self) -> bool {
        !self.actions.is_empty()
    }
    
    /// Root node the tracks are resolved against
    pub fn root(&self) -> &NodeRef {
        &self.root
    }
    
    /// Total time advanced so far
    pub fn time(&self) -> f32 {
        self.time
    }
    
    /// Advance playing actions by `delta` seconds and apply their tracks
    ///
    /// Tracks naming a node missing from the asset are ignored. A track the
    /// node rejects is skipped; the remaining tracks still apply and the
    /// first rejection is returned.
    pub fn update(&mut self, delta: f32) -> SceneResult<()> {
        self.time += delta;
        let mut rejected = None;
        for action in self.actions.values_mut() {
            if !action.playing {
                continue;
            }
            action.advance(delta);
            for track in &action.clip.tracks {
                let (Some(node), Some(value)) = (self.root.find_by_name(&track.node), track.sample(action.time)) else {
                    continue;
                };
                let applied = node.borrow_mut().set_property(&track.property, ParamValue::from(value));
                if let Err(error) = applied {
                    rejected.get_or_insert(error);
                }
            }
        }
        rejected.map_or(Ok(()), Err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::clip::KeyframeTrack;
    use crate::error::SceneError;
    use crate::scene::Node;
    use approx::assert_relative_eq;

    fn asset() -> AnimatedAsset {
        let root = NodeRef::new(Node::group("robot"));
        root.add_child(NodeRef::new(Node::group("body")));
        AnimatedAsset::new(
            root,
            vec![
                AnimationClip::new("Walk", vec![KeyframeTrack::new("body", "position.x", vec![0.0, 2.0], vec![0.0, 4.0])]),
                AnimationClip::new("Idle", vec![KeyframeTrack::new("body", "position.y", vec![0.0, 1.0], vec![0.0, 1.0])]),
            ],
        )
    }

    #[test]
    fn test_walk_and_idle_are_indexed() {
        let mixer = AnimationMixer::new(&asset());
        
        assert!(mixer.has_animations());
        assert_eq!(mixer.actions().len(), 2);
        assert!(mixer.action("Walk").is_some());
        assert!(mixer.action("Idle").is_some());
        assert_eq!(mixer.actions_list().len(), 2);
    }

    #[test]
    fn test_empty_asset_has_no_animations() {
        let mixer = AnimationMixer::new(&AnimatedAsset::new(NodeRef::new(Node::group("empty")), Vec::new()));
        assert!(!mixer.has_animations());
    }

    #[test]
    fn test_later_duplicate_replaces_earlier() {
        let mut asset = asset();
        asset.animations.push(AnimationClip::new("Walk", Vec::new()));
        
        let mixer = AnimationMixer::new(&asset);
        assert_eq!(mixer.actions().len(), 2);
        assert!(mixer.action("Walk").unwrap().clip().tracks.is_empty());
    }

    #[test]
    fn test_update_applies_playing_tracks_only() {
        let asset = asset();
        let mut mixer = AnimationMixer::new(&asset);
        mixer.action_mut("Walk").unwrap().play();
        
        mixer.update(0.5).unwrap();
        
        let body = asset.scene.find_by_name("body").unwrap();
        assert_relative_eq!(body.borrow().transform.position.x, 1.0);
        assert_eq!(body.borrow().transform.position.y, 0.0);
        assert_relative_eq!(mixer.time(), 0.5);
    }

    #[test]
    fn test_looping_and_clamping() {
        let asset = asset();
        let mut mixer = AnimationMixer::new(&asset);
        mixer.action_mut("Walk").unwrap().play();
        mixer.action_mut("Idle").unwrap().play().set_loop(false);
        
        mixer.update(2.5).unwrap();
        
        assert_relative_eq!(mixer.action("Walk").unwrap().time(), 0.5);
        assert!(mixer.action("Walk").unwrap().is_running());
        assert_eq!(mixer.action("Idle").unwrap().time(), 1.0);
        assert!(!mixer.action("Idle").unwrap().is_running());
    }

    #[test]
    fn test_rejected_track_does_not_block_the_others() {
        let mut asset = asset();
        let body = asset.scene.find_by_name("body").unwrap();
        asset.animations.push(AnimationClip::new(
            "Fade",
            vec![KeyframeTrack::new("body", "opacity", vec![0.0, 1.0], vec![1.0, 0.0])],
        ));
        let mut mixer = AnimationMixer::new(&asset);
        mixer.action_mut("Fade").unwrap().play();
        mixer.action_mut("Walk").unwrap().play();
        
        let result = mixer.update(0.5);
        
        assert!(matches!(result, Err(SceneError::Construction(_))));
        assert_relative_eq!(body.borrow().transform.position.x, 1.0);
    }
}
