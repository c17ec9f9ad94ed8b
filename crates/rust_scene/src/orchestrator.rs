//! Scene orchestrator
//!
//! The [`Orchestrator`] owns the scene graph, the camera and the renderer,
//! and drives one frame per [`Orchestrator::tick`]. Each tick runs, in
//! order:
//!
//! 1. read the clock
//! 2. observe lazily loaded subsystems (camera controls, debug panel)
//! 3. update the camera controls
//! 4. expire the pointer debounce and, while the pointer is moving, run the
//!    hover evaluation
//! 5. advance animation mixers by the time since the previous tick
//! 6. update animated objects with the elapsed time
//! 7. render
//! 8. ask the host for the next frame
//! 9. run queued loader tasks; their results are observed next tick
//!
//! Optional subsystems only exist when enabled in [`SceneConfig`]; the
//! registration calls that need them fail with
//! [`SceneError::Configuration`] otherwise.

use crate::animation::AnimationMixer;
use crate::config::SceneConfig;
use crate::controls::OrbitControls;
use crate::debug::{BoxedPanel, DebugEntry, DebugPanelBuilder, PanelBackend, PropertyPanel};
use crate::error::{SceneError, SceneResult};
use crate::foundation::collections::OrderedRegistry;
use crate::foundation::deferred::{Deferred, TaskQueue};
use crate::foundation::time::{Clock, SystemClock};
use crate::host::{Host, HostEvent, Size};
use crate::input::PointerTracker;
use crate::picking::{SelectHandle, SelectionManager};
use crate::render::{PerspectiveCamera, Renderer};
use crate::scene::{AsNode, SceneGraph, SharedObject};

slotmap::new_key_type! {
    /// Handle returned by [`Orchestrator::animate`]
    pub struct AnimateHandle;
    /// Handle returned by [`Orchestrator::add_mixer`]
    pub struct MixerHandle;
}

/// Lifecycle of an orchestrator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Surface, camera and clock are ready; no frame loop yet
    Constructed,
    /// The frame loop is running
    Started,
}

/// Top-level driver of a scene
pub struct Orchestrator<R: Renderer, H: Host> {
    config: SceneConfig,
    renderer: R,
    host: H,
    clock: Box<dyn Clock>,
    scene: SceneGraph,
    camera: PerspectiveCamera,
    size: Size,
    state: LifecycleState,
    tasks: TaskQueue,

    controls: Option<Deferred<OrbitControls>>,
    pointer: Option<PointerTracker>,
    selection: Option<SelectionManager>,
    hovered: Option<SelectHandle>,
    debug: Option<DebugPanelBuilder>,

    animated: OrderedRegistry<AnimateHandle, SharedObject>,
    mixers: OrderedRegistry<MixerHandle, AnimationMixer>,
    previous_elapsed: f32,
    frames: u64,
}

impl<R: Renderer, H: Host> Orchestrator<R, H> {
    /// Set up the camera and renderer for the host's current size
    ///
    /// With `debug` enabled the panel widget load is queued right away.
    pub fn new(config: SceneConfig, mut renderer: R, host: H) -> Self {
        let size = Self::measure(&config, &host);
        let camera = PerspectiveCamera::from_props(&config.camera, size.aspect());
        renderer.set_size(size.width, size.height);
        renderer.set_pixel_ratio(host.device_pixel_ratio());

        let tasks = TaskQueue::new();
        let (pointer, selection) = if config.track_mouse {
            (Some(PointerTracker::new(config.pointer_idle())), Some(SelectionManager::new()))
        } else {
            (None, None)
        };
        let debug = config.debug.then(|| {
            let panel = tasks.defer(|| Ok(Box::new(PropertyPanel::default()) as BoxedPanel));
            DebugPanelBuilder::new(panel)
        });

        log::info!(
            "Scene created: {}x{} (full screen: {}), fov {}",
            size.width,
            size.height,
            config.full_screen,
            config.camera.fov
        );

        Self {
            config,
            renderer,
            host,
            clock: Box::new(SystemClock::new()),
            scene: SceneGraph::new(),
            camera,
            size,
            state: LifecycleState::Constructed,
            tasks,
            controls: None,
            pointer,
            selection,
            hovered: None,
            debug,
            animated: OrderedRegistry::new(),
            mixers: OrderedRegistry::new(),
            previous_elapsed: 0.0,
            frames: 0,
        }
    }

    /// Replace the time source
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.previous_elapsed = clock.elapsed_seconds();
        self.clock = Box::new(clock);
        self
    }

    fn measure(config: &SceneConfig, host: &H) -> Size {
        if config.full_screen {
            host.window_size()
        } else {
            host.surface_size()
        }
    }

    /// Render the first frame, start the loop and queue optional controls
    pub fn start(&mut self) -> SceneResult<()> {
        if self.state == LifecycleState::Started {
            return Err(SceneError::InvalidState("scene already started".to_string()));
        }

        self.renderer.render(&self.scene, &self.camera)?;
        self.state = LifecycleState::Started;
        self.host.request_animation_frame();

        if self.config.use_orbit_controls {
            let camera = self.camera.clone();
            self.controls = Some(self.tasks.defer(move || Ok(OrbitControls::new(&camera))));
        }
        log::info!("Scene started");
        Ok(())
    }

    /// Insert a scene object's node, or a raw node, into the scene graph
    pub fn add(&mut self, object: &impl AsNode) {
        let node = object.as_node();
        log::debug!("Adding {:?} to the scene", node);
        self.scene.add(node);
    }

    /// Call `update` on `object` every tick
    pub fn animate(&mut self, object: &SharedObject) -> AnimateHandle {
        let handle = self.animated.insert(object.clone());
        log::debug!("Animating {:?}", handle);
        handle
    }

    /// Stop updating a registration; returns whether it existed
    pub fn stop_animate(&mut self, handle: AnimateHandle) -> bool {
        self.animated.remove(handle).is_some()
    }

    /// Make `object` a hover candidate
    pub fn selectable(&mut self, object: &SharedObject) -> SceneResult<SelectHandle> {
        let selection = self.selection.as_mut().ok_or_else(|| {
            SceneError::Configuration("selectable objects need `track_mouse` enabled".to_string())
        })?;
        Ok(selection.subscribe(object.clone()))
    }

    /// Remove a hover candidate; returns whether it existed
    pub fn stop_selectable(&mut self, handle: SelectHandle) -> SceneResult<bool> {
        let selection = self.selection.as_mut().ok_or_else(|| {
            SceneError::Configuration("selectable objects need `track_mouse` enabled".to_string())
        })?;
        if self.hovered == Some(handle) {
            self.hovered = None;
        }
        Ok(selection.unsubscribe(handle).is_some())
    }

    /// Hand a batch of entries to the debug panel
    pub fn add_to_debug(&mut self, entries: Vec<DebugEntry>) -> SceneResult<()> {
        self.debug_builder()?.add(entries)
    }

    /// Add the entries an object declares for itself
    pub fn add_object_to_debug(&mut self, object: &SharedObject) -> SceneResult<()> {
        let builder = self.debug_builder()?;
        let entries = object.borrow_mut().debug_bindings();
        builder.add(entries)
    }

    fn debug_builder(&mut self) -> SceneResult<&mut DebugPanelBuilder> {
        self.debug
            .as_mut()
            .ok_or_else(|| SceneError::Configuration("debug entries need `debug` enabled".to_string()))
    }

    /// Advance `mixer` every tick
    pub fn add_mixer(&mut self, mixer: AnimationMixer) -> MixerHandle {
        let handle = self.mixers.insert(mixer);
        log::debug!("Mixer added: {:?}", handle);
        handle
    }

    /// Stop advancing a mixer and hand it back
    pub fn remove_mixer(&mut self, handle: MixerHandle) -> Option<AnimationMixer> {
        self.mixers.remove(handle)
    }

    /// A registered mixer, to start or stop its actions
    pub fn mixer_mut(&mut self, handle: MixerHandle) -> Option<&mut AnimationMixer> {
        self.mixers.get_mut(handle)
    }

    /// Route a host event
    pub fn handle_event(&mut self, event: HostEvent) {
        match event {
            HostEvent::Resize => {
                self.handle_resize();
            }
            HostEvent::PointerMove { client_x, client_y, .. } => {
                if let Some(pointer) = self.pointer.as_mut() {
                    pointer.handle_pointer_move(client_x, client_y, self.size, self.clock.now());
                }
            }
            _ => {}
        }
        if let Some(controls) = self.controls.as_mut().and_then(Deferred::get_mut) {
            controls.handle_event(&event, self.size);
        }
    }

    /// Re-measure the surface and propagate a changed size
    ///
    /// Returns `false` (and touches nothing) when the size is unchanged.
    pub fn handle_resize(&mut self) -> bool {
        let size = Self::measure(&self.config, &self.host);
        if size == self.size {
            return false;
        }
        self.size = size;

        self.camera.aspect = size.aspect();
        self.camera.update_projection_matrix();
        self.renderer.set_size(size.width, size.height);
        self.renderer.set_pixel_ratio(self.host.device_pixel_ratio());

        log::info!("Resized to {}x{}", size.width, size.height);
        true
    }

    /// Run one frame
    pub fn tick(&mut self) -> SceneResult<()> {
        if self.state != LifecycleState::Started {
            return Err(SceneError::InvalidState("tick before start".to_string()));
        }

        let elapsed = self.clock.elapsed_seconds();
        let now = self.clock.now();

        self.poll_subsystems();

        if let Some(controls) = self.controls.as_mut().and_then(Deferred::get_mut) {
            controls.update(&mut self.camera);
        }

        if let (Some(pointer), Some(selection)) = (self.pointer.as_mut(), self.selection.as_mut()) {
            pointer.poll(now);
            if pointer.is_moving() {
                self.hovered = selection.evaluate(pointer.coords(), &self.camera);
            }
        }

        self.advance_mixers(elapsed);

        for (_, object) in self.animated.snapshot() {
            object.borrow_mut().update(elapsed);
        }

        self.renderer.render(&self.scene, &self.camera)?;
        self.frames += 1;
        self.host.request_animation_frame();

        let ran = self.tasks.run_pending();
        log::trace!("Frame {} at {:.3}s, {} loader tasks ran", self.frames, elapsed, ran);
        Ok(())
    }

    fn poll_subsystems(&mut self) {
        if let Some(controls) = self.controls.as_mut() {
            let was_ready = controls.is_ready();
            let failed = controls.error().is_some();
            if controls.poll().is_some() && !was_ready {
                log::info!("Orbit controls ready");
            }
            if let (false, Some(error)) = (failed, controls.error()) {
                log::error!("Orbit controls failed to load: {}", error);
            }
        }
        if let Some(debug) = self.debug.as_mut() {
            debug.poll();
        }
    }

    fn advance_mixers(&mut self, elapsed: f32) {
        let delta = elapsed - self.previous_elapsed;
        self.previous_elapsed = elapsed;
        if !delta.is_finite() || delta < 0.0 {
            log::warn!("Skipping mixer update for invalid delta {}", delta);
            return;
        }

        self.mixers.for_each_mut(|handle, mixer| {
            if let Err(error) = mixer.update(delta) {
                log::warn!("Mixer {:?} skipped a track: {}", handle, error);
            }
        });
    }

    /// Current lifecycle state
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// The configuration this orchestrator was built with
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// The scene graph
    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    /// The camera
    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    /// The camera, mutably
    pub fn camera_mut(&mut self) -> &mut PerspectiveCamera {
        &mut self.camera
    }

    /// The renderer
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// The host
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host, mutably
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Last size propagated to the camera and renderer
    pub fn size(&self) -> Size {
        self.size
    }

    /// Queue that loader tasks run on; share it with asset loaders
    pub fn tasks(&self) -> &TaskQueue {
        &self.tasks
    }

    /// Frames rendered by [`Orchestrator::tick`]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// The pointer tracker, when `track_mouse` is enabled
    pub fn pointer(&self) -> Option<&PointerTracker> {
        self.pointer.as_ref()
    }

    /// The hover candidates, when `track_mouse` is enabled
    pub fn selection(&self) -> Option<&SelectionManager> {
        self.selection.as_ref()
    }

    /// Winner of the most recent hover evaluation
    pub fn hovered(&self) -> Option<SelectHandle> {
        self.hovered
    }

    /// Loaded orbit controls
    pub fn controls(&self) -> Option<&OrbitControls> {
        self.controls.as_ref().and_then(Deferred::get)
    }

    /// Number of registered animated objects
    pub fn animated_len(&self) -> usize {
        self.animated.len()
    }

    /// Debug panel builder, when `debug` is enabled
    pub fn debug(&self) -> Option<&DebugPanelBuilder> {
        self.debug.as_ref()
    }

    /// Loaded debug panel
    pub fn debug_panel_mut(&mut self) -> Option<&mut (dyn PanelBackend + 'static)> {
        self.debug.as_mut().and_then(DebugPanelBuilder::panel_mut)
    }
}
