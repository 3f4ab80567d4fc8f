//! Per-render-tick orchestration
//!
//! Reads the shared state, works out the interaction point, steps the
//! rotation frame and then the swarm. Called once per displayed frame.

use glam::{Vec2, Vec3};

use super::frame::InteractionFrame;
use super::swarm::{Swarm, SwarmEffects};
use crate::consts::*;
use crate::settings::Settings;
use crate::state::SharedState;

/// Longest frame time fed to the swarm (tab switches, debugger pauses)
const MAX_FRAME_DT: f32 = 0.1;

/// Host input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer position in [-1, 1]², y up (mouse/trackpad fallback)
    pub pointer: Option<Vec2>,
    /// Visible world extent at the swarm's depth (width, height)
    pub viewport: Vec2,
}

/// Swarm, rotation frame and the options that shape a tick
#[derive(Debug, Clone)]
pub struct Scene {
    pub swarm: Swarm,
    pub frame: InteractionFrame,
    /// Use the pointer as interaction point when no hand is visible
    pub pointer_fallback: bool,
    ticks: u64,
}

impl Scene {
    pub fn new(swarm: Swarm) -> Self {
        Self {
            swarm,
            frame: InteractionFrame::new(),
            pointer_fallback: true,
            ticks: 0,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let effects = SwarmEffects {
            twinkle: settings.effective_twinkle(),
            sparkle: settings.effective_sparkle(),
        };
        let swarm = Swarm::new(settings.particle_count(), settings.seed).with_effects(effects);
        Self {
            pointer_fallback: settings.pointer_fallback,
            ..Self::new(swarm)
        }
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

/// World-space interaction point for this tick, if any.
///
/// A visible hand always wins; otherwise the pointer is used when the
/// fallback is enabled. The pointer is never considered idle. Non-finite
/// coordinates count as no interaction.
pub fn interaction_point(shared: &SharedState, input: &TickInput, pointer_fallback: bool) -> Option<Vec3> {
    let point = if shared.hand_detected {
        let (sx, sy) = HAND_WORLD_SCALE;
        Some(Vec3::new(shared.hand_position.x * sx, shared.hand_position.y * sy, 0.0))
    } else if pointer_fallback {
        input
            .pointer
            .map(|p| Vec3::new(p.x * input.viewport.x / 2.0, p.y * input.viewport.y / 2.0, 0.0))
    } else {
        None
    };
    point.filter(|p| p.is_finite())
}

/// Advance the scene by one render tick
pub fn tick(scene: &mut Scene, shared: &SharedState, input: &TickInput, dt: f32) {
    // clamp() passes NaN through
    let dt = if dt.is_finite() { dt.clamp(0.0, MAX_FRAME_DT) } else { 0.0 };
    let grab = shared.grab_active();
    let hand = shared.hand_detected.then_some(shared.hand_position);

    scene.frame.update_grab(grab, hand);
    // Rendered rotation moves first: forces below use this tick's frame
    scene.frame.smooth();

    let point = interaction_point(shared, input, scene.pointer_fallback);
    scene
        .swarm
        .advance(dt, shared.target_shape, point, grab, &scene.frame);
    scene.ticks += 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::Gesture;
    use crate::sim::ShapeKind;
    use crate::sim::frame::GrabState;

    fn quiet_scene(count: usize) -> Scene {
        Scene::new(Swarm::new(count, 1).with_effects(SwarmEffects {
            twinkle: false,
            sparkle: false,
        }))
    }

    #[test]
    fn test_hand_beats_pointer() {
        let input = TickInput {
            pointer: Some(Vec2::new(1.0, 1.0)),
            viewport: Vec2::new(20.0, 10.0),
        };
        let mut shared = SharedState::default();
        assert_eq!(interaction_point(&shared, &input, true), Some(Vec3::new(10.0, 5.0, 0.0)));
        assert_eq!(interaction_point(&shared, &input, false), None);

        shared.hand_detected = true;
        shared.hand_position = Vec2::new(0.5, -0.5);
        assert_eq!(interaction_point(&shared, &input, false), Some(Vec3::new(6.0, -4.0, 0.0)));
    }

    #[test]
    fn test_fist_rotates_scene() {
        let mut scene = quiet_scene(10);
        let input = TickInput::default();
        let mut shared = SharedState {
            hand_detected: true,
            gesture: Some(Gesture::Fist),
            ..Default::default()
        };

        for i in 0..10 {
            shared.hand_position = Vec2::new(i as f32 * 0.05, 0.0);
            tick(&mut scene, &shared, &input, RENDER_DT);
        }
        assert_eq!(scene.frame.state(), GrabState::Grabbing);
        let yaw = scene.frame.current_rotation().yaw;
        assert!((yaw - 9.0 * 0.05 * GRAB_ROTATION_GAIN).abs() < 1e-4);
        assert!(scene.frame.rendered_rotation().yaw > 0.0);
        assert!(scene.frame.rendered_rotation().yaw < yaw);

        // Open hand: rotation holds, frame goes idle
        shared.gesture = Some(Gesture::Open);
        tick(&mut scene, &shared, &input, RENDER_DT);
        assert_eq!(scene.frame.state(), GrabState::Idle);
        assert_eq!(scene.frame.current_rotation().yaw, yaw);
    }

    #[test]
    fn test_non_finite_pointer_is_ignored() {
        let input = TickInput {
            pointer: Some(Vec2::new(f32::NAN, 0.0)),
            viewport: Vec2::new(20.0, 10.0),
        };
        assert_eq!(interaction_point(&SharedState::default(), &input, true), None);

        let input = TickInput {
            pointer: Some(Vec2::ZERO),
            viewport: Vec2::new(f32::INFINITY, 10.0),
        };
        assert_eq!(interaction_point(&SharedState::default(), &input, true), None);
    }

    #[test]
    fn test_bad_frame_times_do_not_freeze_swarm() {
        let mut scene = Scene::new(Swarm::new(200, 2));
        let shared = SharedState::with_shape(ShapeKind::Cube);
        let nan_pointer = TickInput {
            pointer: Some(Vec2::new(f32::NAN, f32::NAN)),
            viewport: Vec2::new(20.0, 10.0),
        };

        tick(&mut scene, &shared, &TickInput::default(), f32::NAN);
        tick(&mut scene, &shared, &TickInput::default(), f32::INFINITY);
        assert_eq!(scene.swarm.elapsed(), 0.0);

        let start = scene.swarm.max_target_error(ShapeKind::Cube);
        for _ in 0..300 {
            tick(&mut scene, &shared, &nan_pointer, RENDER_DT);
        }
        assert!(scene.swarm.elapsed().is_finite());
        // Twinkle keeps particles orbiting within ~TWINKLE_AMPLITUDE / POSITION_BLEND
        let err = scene.swarm.max_target_error(ShapeKind::Cube);
        assert!(err < 2.0 && err < start, "err {} start {}", err, start);
        assert!(scene.swarm.snapshot().all(|v| v.scale.is_finite()));
    }

    #[test]
    fn test_tick_counts_and_shape() {
        let mut scene = quiet_scene(100);
        let shared = SharedState::with_shape(ShapeKind::Flower);
        for _ in 0..300 {
            tick(&mut scene, &shared, &TickInput::default(), RENDER_DT);
        }
        assert_eq!(scene.ticks(), 300);
        assert!(scene.swarm.max_target_error(ShapeKind::Flower) < 0.01);
    }
}
