//! Browser bindings
//!
//! The JS host owns the camera, the hand-landmark model and the draw call.
//! It feeds landmark buffers and pointer positions in, calls `tick` once per
//! animation frame, and uploads `instance_bytes` into its instance buffer.
//! Everything runs on the page's single thread, so the shared state is held
//! directly rather than behind a handle.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::gesture::{GesturePipeline, LandmarkFrame};
use crate::renderer::FrameOutput;
use crate::settings::Settings;
use crate::sim::{Scene, ShapeKind, SwarmEffects, TickInput, tick};
use crate::state::SharedState;

/// Install the panic hook and console logger. Safe to call more than once.
#[wasm_bindgen]
pub fn init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        return;
    }
    log::info!("Stellar Particles (WASM) starting...");
}

#[wasm_bindgen]
pub struct StellarApp {
    settings: Settings,
    scene: Scene,
    shared: SharedState,
    pipeline: GesturePipeline,
    input: TickInput,
    output: FrameOutput,
}

#[wasm_bindgen]
impl StellarApp {
    /// Build from stored settings
    #[wasm_bindgen(constructor)]
    pub fn new() -> StellarApp {
        let settings = Settings::load();
        let scene = Scene::from_settings(&settings);
        let output = FrameOutput::from_scene(&scene);
        log::info!(
            "Swarm ready: {} particles, quality {}",
            scene.swarm.len(),
            settings.quality.as_str()
        );
        StellarApp {
            shared: SharedState::with_shape(settings.initial_shape),
            settings,
            scene,
            pipeline: GesturePipeline::new(),
            input: TickInput::default(),
            output,
        }
    }

    /// Advance one animation frame (`dt` in seconds) and repack instances
    pub fn tick(&mut self, dt: f32) {
        tick(&mut self.scene, &self.shared, &self.input, dt);
        self.output.refresh(&self.scene);
    }

    /// Feed one landmark frame: `stride` floats per landmark (x, y[, z]).
    /// Malformed buffers count as "no hand".
    pub fn push_landmarks(&mut self, data: &js_sys::Float32Array, stride: usize) {
        let frame = LandmarkFrame::from_flat_or_absent(&data.to_vec(), stride);
        self.pipeline.process(&frame, &mut self.shared);
    }

    /// The landmark model found no hand in the latest video frame
    pub fn hand_lost(&mut self) {
        self.pipeline.process(&LandmarkFrame::Absent, &mut self.shared);
    }

    /// Pointer in [-1, 1]², y up
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.input.pointer = Some(Vec2::new(x, y));
    }

    pub fn clear_pointer(&mut self) {
        self.input.pointer = None;
    }

    /// Visible world extent at the swarm's depth
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.input.viewport = Vec2::new(width, height);
    }

    /// Manual shape selection; unknown names pick the random cloud
    pub fn set_shape(&mut self, name: &str) {
        self.shared.select_shape(ShapeKind::parse_or_random(name));
    }

    pub fn set_reduced_motion(&mut self, on: bool) {
        self.settings.reduced_motion = on;
        self.scene.swarm.set_effects(SwarmEffects {
            twinkle: self.settings.effective_twinkle(),
            sparkle: self.settings.effective_sparkle(),
        });
        self.settings.save();
    }

    pub fn set_pointer_fallback(&mut self, on: bool) {
        self.settings.pointer_fallback = on;
        self.scene.pointer_fallback = on;
        self.settings.save();
    }

    /// Packed `ParticleInstance` data from the last tick
    pub fn instance_bytes(&self) -> Vec<u8> {
        self.output.as_bytes().to_vec()
    }

    pub fn instance_count(&self) -> usize {
        self.output.len()
    }

    /// Group rotation as (x, y, z, w)
    pub fn rotation(&self) -> Vec<f32> {
        self.output.rotation.to_array().to_vec()
    }

    pub fn shape(&self) -> String {
        self.shared.target_shape.display_name().to_string()
    }

    pub fn gesture(&self) -> String {
        self.shared
            .gesture
            .map_or("none", |g| g.as_str())
            .to_string()
    }

    pub fn gesture_hint(&self) -> String {
        self.shared
            .gesture
            .map_or("", |g| g.hint())
            .to_string()
    }

    pub fn hand_detected(&self) -> bool {
        self.shared.hand_detected
    }

    pub fn grabbing(&self) -> bool {
        self.shared.grab_active()
    }

    /// Names for a shape picker, in display order
    pub fn shape_names() -> Vec<String> {
        ShapeKind::ALL
            .iter()
            .map(|s| s.as_str().to_string())
            .collect()
    }
}

impl Default for StellarApp {
    fn default() -> Self {
        Self::new()
    }
}
