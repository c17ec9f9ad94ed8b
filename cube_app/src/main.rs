//! Cube demo application
//!
//! Drives a scene of spinning cubes with a scripted host: the pointer
//! sweeps across the surface, the window is resized once, and a debug
//! control is tweaked, all rendered through the headless renderer.

mod cube;

use std::path::Path;
use std::time::Duration;

use rand::Rng;
use rust_scene::config::ConfigError;
use rust_scene::foundation::logging;
use rust_scene::prelude::*;

use crate::cube::Cube;

const CONFIG_PATH: &str = "scene.toml";
const FRAMES: u32 = 180;
const CUBES: usize = 5;

#[derive(thiserror::Error, Debug)]
enum AppError {
    #[error(transparent)]
    Scene(#[from] SceneError),
    
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Host that replays a fixed pointer and resize script
struct ScriptedHost {
    window: Size,
    frame_requested: bool,
}

impl ScriptedHost {
    fn new(width: u32, height: u32) -> Self {
        Self {
            window: Size::new(width, height),
            frame_requested: false,
        }
    }
    
    fn take_frame_request(&mut self) -> bool {
        std::mem::take(&mut self.frame_requested)
    }
}

impl Host for ScriptedHost {
    fn window_size(&self) -> Size {
        self.window
    }
    
    fn surface_size(&self) -> Size {
        self.window
    }
    
    fn device_pixel_ratio(&self) -> f64 {
        1.0
    }
    
    fn request_animation_frame(&mut self) {
        self.frame_requested = true;
    }
}

fn load_config() -> Result<SceneConfig, ConfigError> {
    if Path::new(CONFIG_PATH).exists() {
        SceneConfig::load_from_file(CONFIG_PATH)
    } else {
        log::info!("No {} found, using demo defaults", CONFIG_PATH);
        Ok(SceneConfig::default().with_track_mouse(true).with_debug(true))
    }
}

fn build_cubes(scene: &mut Orchestrator<HeadlessRenderer, ScriptedHost>) -> Result<(), AppError> {
    let mut rng = rand::thread_rng();
    for index in 0..CUBES {
        let params = ObjectParams::new()
            .with("size", rng.gen_range(0.5_f32..1.2))
            .with("x", (index as f32 - 2.0) * 1.5)
            .with("z", rng.gen_range(-2.0_f32..0.0))
            .with("color", Color::from_hex(rng.gen_range(0..0x00ff_ffff)));
        let cube = SceneObject::new_shared(Cube::new(format!("Cube {index}")), params)?;
        
        scene.add(&cube);
        scene.animate(&cube);
        if scene.config().track_mouse {
            scene.selectable(&cube)?;
        }
        if scene.config().debug {
            scene.add_object_to_debug(&cube)?;
        }
    }
    Ok(())
}

/// Scripted input for one frame
fn script(frame: u32, scene: &mut Orchestrator<HeadlessRenderer, ScriptedHost>) {
    if (20..120).contains(&frame) {
        let size = scene.size();
        let t = f64::from(frame - 20) / 100.0;
        scene.handle_event(HostEvent::PointerMove {
            client_x: t * f64::from(size.width),
            client_y: f64::from(size.height) / 2.0,
            buttons: PointerButtons::empty(),
        });
    }
    if frame == 90 {
        scene.host_mut().window = Size::new(1024, 600);
        scene.handle_event(HostEvent::Resize);
    }
}

fn tweak_first_cube(scene: &mut Orchestrator<HeadlessRenderer, ScriptedHost>) -> Result<(), AppError> {
    let Some(panel) = scene.debug_panel_mut() else {
        log::warn!("Debug panel not loaded, nothing to tweak");
        return Ok(());
    };
    log::info!("Debug controls: {:?}", panel.control_paths());
    if let Some(height) = panel.find("Cube 0/Height") {
        panel.set_value(height, ParamValue::Number(1.0))?;
    }
    if let Some(scale) = panel.find("Cube 0/scale") {
        panel.set_value(scale, ParamValue::Number(2.0))?;
    }
    Ok(())
}

fn run() -> Result<(), AppError> {
    let config = load_config()?;
    let mut scene = Orchestrator::new(config, HeadlessRenderer::new(), ScriptedHost::new(800, 600));
    scene.camera_mut().set_position(Vec3::new(0.0, 0.0, 6.0));
    scene.camera_mut().look_at(Vec3::zeros());
    
    build_cubes(&mut scene)?;
    scene.start()?;
    
    for frame in 0..FRAMES {
        script(frame, &mut scene);
        if frame == 60 {
            tweak_first_cube(&mut scene)?;
        }
        if scene.host_mut().take_frame_request() {
            scene.tick()?;
        }
        std::thread::sleep(Duration::from_millis(16));
    }
    
    log::info!(
        "Rendered {} frames, last frame {:?}, hovered {:?}",
        scene.renderer().frames(),
        scene.renderer().last_frame(),
        scene.hovered()
    );
    Ok(())
}

fn main() {
    logging::init();
    log::info!("Starting cube demo");
    
    if let Err(e) = run() {
        log::error!("Cube demo failed: {}", e);
        std::process::exit(1);
    }
    log::info!("Cube demo finished");
}
