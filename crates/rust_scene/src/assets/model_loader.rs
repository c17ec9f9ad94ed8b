//! Animated model loading
//!
//! Models are RON documents describing a node tree and the keyframe clips
//! that animate it:
//!
//! ```text
//! (
//!     scene: (
//!         name: "robot",
//!         children: [
//!             (name: "body", position: (0.0, 1.0, 0.0), mesh: Some((
//!                 geometry: Box(width: 1.0, height: 2.0, depth: 1.0),
//!                 material: (color: (r: 0.8, g: 0.2, b: 0.2)),
//!             ))),
//!         ],
//!     ),
//!     animations: [
//!         (name: "Idle", tracks: [
//!             (node: "body", property: "position.y", times: [0.0, 1.0], values: [1.0, 1.2]),
//!         ]),
//!     ],
//! )
//! ```
//!
//! Loads run as tasks on the loader's [`TaskQueue`], so results arrive
//! through a callback or a [`Deferred`] after the queue is drained.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::animation::{AnimatedAsset, AnimationClip};
use crate::assets::loading_manager::LoadingManager;
use crate::error::{SceneError, SceneResult};
use crate::foundation::deferred::{Deferred, TaskQueue};
use crate::foundation::math::{Transform, Vec3};
use crate::scene::{Mesh, Node, NodeRef};

/// Bytes read so far out of the total
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressEvent {
    /// Bytes read
    pub loaded: u64,
    /// Total bytes
    pub total: u64,
}

/// Progress listener
pub type ProgressCallback = Box<dyn FnMut(ProgressEvent)>;

/// Failure listener
pub type ErrorCallback = Box<dyn FnOnce(SceneError)>;

#[derive(Debug, Deserialize)]
struct NodeDescriptor {
    name: String,
    #[serde(default)]
    position: (f32, f32, f32),
    #[serde(default)]
    rotation: (f32, f32, f32),
    #[serde(default = "unit_scale")]
    scale: (f32, f32, f32),
    #[serde(default = "visible")]
    visible: bool,
    #[serde(default)]
    mesh: Option<Mesh>,
    #[serde(default)]
    children: Vec<NodeDescriptor>,
}

fn unit_scale() -> (f32, f32, f32) {
    (1.0, 1.0, 1.0)
}

fn visible() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct AssetDescriptor {
    scene: NodeDescriptor,
    #[serde(default)]
    animations: Vec<AnimationClip>,
}

impl NodeDescriptor {
    fn build(self) -> NodeRef {
        let vec3 = |(x, y, z): (f32, f32, f32)| Vec3::new(x, y, z);
        let mut node = Node::group(self.name);
        node.transform = Transform {
            position: vec3(self.position),
            rotation: vec3(self.rotation),
            scale: vec3(self.scale),
        };
        node.visible = self.visible;
        node.mesh = self.mesh;
        
        let node = NodeRef::new(node);
        for child in self.children {
            node.add_child(child.build());
        }
        node
    }
}

/// Parse a model document
///
/// Every track must drive a numeric property of a node in the tree.
pub fn parse_model(source: &str, path: &str) -> SceneResult<AnimatedAsset> {
    let descriptor: AssetDescriptor = ron::from_str(source).map_err(|e| SceneError::asset(path, e))?;
    let mut animations = descriptor.animations;
    for clip in &mut animations {
        if clip.duration < 0.0 {
            clip.reset_duration();
        }
    }
    let asset = AnimatedAsset::new(descriptor.scene.build(), animations);
    asset.validate().map_err(|e| SceneError::asset(path, e))?;
    Ok(asset)
}

fn read_model(path: &Path, on_progress: &mut Option<ProgressCallback>) -> SceneResult<AnimatedAsset> {
    let display = path.display().to_string();
    let source = std::fs::read_to_string(path).map_err(|e| SceneError::asset(&display, e))?;
    if let Some(callback) = on_progress.as_mut() {
        let total = source.len() as u64;
        callback(ProgressEvent { loaded: total, total });
    }
    let asset = parse_model(&source, &display)?;
    log::info!("Loaded model {} with {} animations", display, asset.animations.len());
    Ok(asset)
}

/// Caller-owned model loader
#[derive(Debug, Clone)]
pub struct ModelLoader {
    tasks: TaskQueue,
    manager: LoadingManager,
}

impl ModelLoader {
    /// Loader scheduling its work on `tasks`
    pub fn new(tasks: TaskQueue) -> Self {
        Self::with_manager(tasks, LoadingManager::new())
    }
    
    /// Loader reporting to an existing manager
    pub fn with_manager(tasks: TaskQueue, manager: LoadingManager) -> Self {
        Self { tasks, manager }
    }
    
    /// The manager progress is reported to
    pub fn manager(&self) -> &LoadingManager {
        &self.manager
    }
    
    /// Load `path` and hand the result to `on_load` or `on_error`
    ///
    /// Without an error callback, failures are logged.
    pub fn load(
        &self,
        path: impl Into<PathBuf>,
        on_load: impl FnOnce(AnimatedAsset) + 'static,
        mut on_progress: Option<ProgressCallback>,
        on_error: Option<ErrorCallback>,
    ) {
        let path = path.into();
        let url = path.display().to_string();
        let manager = self.manager.clone();
        manager.item_start(&url);
        
        self.tasks.spawn(move || {
            match read_model(&path, &mut on_progress) {
                Ok(asset) => on_load(asset),
                Err(error) => {
                    manager.item_error(&url);
                    match on_error {
                        Some(callback) => callback(error),
                        None => log::error!("{}", error),
                    }
                }
            }
            manager.item_end(&url);
        });
    }
    
    /// Load `path` into a [`Deferred`] that resolves when the queue drains
    pub fn load_async(&self, path: impl Into<PathBuf>, mut on_progress: Option<ProgressCallback>) -> Deferred<AnimatedAsset> {
        let path = path.into();
        let url = path.display().to_string();
        let manager = self.manager.clone();
        manager.item_start(&url);
        
        self.tasks.defer(move || {
            let result = read_model(&path, &mut on_progress);
            if result.is_err() {
                manager.item_error(&url);
            }
            manager.item_end(&url);
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::AnimationMixer;
    use crate::scene::Geometry;
    use std::cell::RefCell;
    use std::rc::Rc;

    const ROBOT: &str = r#"(
        scene: (
            name: "robot",
            children: [
                (name: "body", position: (0.0, 1.0, 0.0), mesh: Some((
                    geometry: Box(width: 1.0, height: 2.0, depth: 1.0),
                    material: (color: (r: 0.8, g: 0.2, b: 0.2)),
                ))),
            ],
        ),
        animations: [
            (name: "Walk", tracks: [(node: "body", property: "position.x", times: [0.0, 2.0], values: [0.0, 1.0])]),
            (name: "Idle", tracks: [(node: "body", property: "position.y", times: [0.0, 1.0], values: [1.0, 1.2])]),
        ],
    )"#;

    fn write_model(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_parse_builds_tree_and_clips() {
        let asset = parse_model(ROBOT, "robot.ron").unwrap();
        
        let body = asset.scene.find_by_name("body").unwrap();
        assert_eq!(body.borrow().transform.position, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(
            body.borrow().mesh.map(|m| m.geometry),
            Some(Geometry::Box { width: 1.0, height: 2.0, depth: 1.0 })
        );
        assert_eq!(asset.animations[0].duration, 2.0);
        
        let mixer = AnimationMixer::new(&asset);
        assert!(mixer.has_animations());
        assert_eq!(mixer.actions().len(), 2);
    }

    #[test]
    fn test_parse_error_is_asset_error() {
        assert!(matches!(parse_model("(scene: oops)", "bad.ron"), Err(SceneError::AssetLoad { .. })));
    }

    #[test]
    fn test_track_on_unknown_property_fails_the_load() {
        let model = ROBOT.replace(r#"property: "position.y""#, r#"property: "opacity""#);
        let result = parse_model(&model, "robot.ron");
        assert!(matches!(result, Err(SceneError::AssetLoad { ref reason, .. }) if reason.contains("opacity")));
    }

    #[test]
    fn test_callback_load_runs_on_drain() {
        let path = write_model("rust_scene_robot_callback.ron", ROBOT);
        let tasks = TaskQueue::new();
        let loader = ModelLoader::new(tasks.clone());
        let loaded = Rc::new(RefCell::new(None));
        let progress = Rc::new(RefCell::new(Vec::new()));
        
        let sink = loaded.clone();
        let seen = progress.clone();
        loader.load(
            &path,
            move |asset| *sink.borrow_mut() = Some(asset.animations.len()),
            Some(Box::new(move |event| seen.borrow_mut().push(event))),
            None,
        );
        assert!(loaded.borrow().is_none());
        assert!(loader.manager().is_loading());
        
        tasks.run_pending();
        
        assert_eq!(*loaded.borrow(), Some(2));
        assert_eq!(progress.borrow().len(), 1);
        assert!(!loader.manager().is_loading());
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_missing_file_goes_to_error_callback() {
        let tasks = TaskQueue::new();
        let loader = ModelLoader::new(tasks.clone());
        let failed = Rc::new(RefCell::new(false));
        let sink = failed.clone();
        
        loader.load(
            std::env::temp_dir().join("rust_scene_no_such_model.ron"),
            |_| panic!("should not load"),
            None,
            Some(Box::new(move |error| *sink.borrow_mut() = matches!(error, SceneError::AssetLoad { .. }))),
        );
        tasks.run_pending();
        
        assert!(*failed.borrow());
    }

    #[test]
    fn test_async_load_resolves_after_drain() {
        let path = write_model("rust_scene_robot_async.ron", ROBOT);
        let tasks = TaskQueue::new();
        let loader = ModelLoader::new(tasks.clone());
        
        let mut deferred = loader.load_async(&path, None);
        assert!(deferred.poll().is_none());
        
        tasks.run_pending();
        
        let asset = deferred.poll().unwrap();
        assert_eq!(asset.scene.borrow().name, "robot");
        std::fs::remove_file(path).ok();
    }
}
