//! Stellar Particles entry point
//!
//! Native: headless run of the swarm driven by a scripted hand, logging what
//! the gesture pipeline decides. Web: the JS host drives `StellarApp`.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::time::Duration;

    use glam::Vec2;
    use stellar_particles::consts::RENDER_DT;
    use stellar_particles::gesture::{Gesture, LandmarkFrame, LandmarkWorker, ScriptedSource, posed_hand};
    use stellar_particles::renderer::FrameOutput;
    use stellar_particles::sim::{Scene, TickInput, tick};
    use stellar_particles::{Settings, SharedState, StateHandle};

    /// Frames each scripted pose is held for
    const HOLD_FRAMES: usize = 30;
    /// Landmark frames arrive at ~30 Hz
    const LANDMARK_INTERVAL: Duration = Duration::from_millis(33);

    /// A hand that cycles through every shape gesture, grabs and turns the
    /// swarm, then leaves the camera.
    fn demo_script() -> Vec<LandmarkFrame> {
        let center = Vec2::new(0.5, 0.5);
        let mut frames = Vec::new();
        for gesture in [
            Gesture::Open,
            Gesture::Victory,
            Gesture::Pointer,
            Gesture::PinchIndex,
            Gesture::PinchMiddle,
            Gesture::Three,
        ] {
            frames.extend(std::iter::repeat_n(posed_hand(gesture, center), HOLD_FRAMES));
        }
        // Fist sweeping left to right
        frames.extend((0..HOLD_FRAMES * 2).map(|i| {
            let x = 0.3 + 0.4 * i as f32 / (HOLD_FRAMES * 2) as f32;
            posed_hand(Gesture::Fist, Vec2::new(x, 0.5))
        }));
        frames.extend(std::iter::repeat_n(LandmarkFrame::Absent, HOLD_FRAMES));
        frames
    }

    pub fn run() {
        env_logger::init();
        log::info!("Stellar Particles (native) starting...");

        let settings = Settings::load();
        let mut scene = Scene::from_settings(&settings);
        let state = StateHandle::new(SharedState::with_shape(settings.initial_shape));
        let input = TickInput::default();
        let mut output = FrameOutput::default();

        let worker = LandmarkWorker::spawn(
            ScriptedSource::new(demo_script(), LANDMARK_INTERVAL),
            state.clone(),
        );

        let frame_time = Duration::from_secs_f32(RENDER_DT);
        let mut last = state.load();
        loop {
            let shared = state.load();
            if shared.target_shape != last.target_shape {
                log::info!(
                    "tick {}: shape -> {}",
                    scene.ticks(),
                    shared.target_shape.display_name()
                );
            }
            if shared.gesture != last.gesture {
                if let Some(g) = shared.gesture {
                    log::info!("tick {}: gesture {} ({})", scene.ticks(), g.as_str(), g.hint());
                }
            }
            last = shared;

            tick(&mut scene, &shared, &input, RENDER_DT);
            output.refresh(&scene);

            if worker.is_finished() {
                break;
            }
            std::thread::sleep(frame_time);
        }
        worker.stop();

        let shared = state.load();
        let rotation = scene.frame.rendered_rotation();
        log::info!(
            "{} ticks, {} instances ({} bytes), yaw {:.2} pitch {:.2}",
            scene.ticks(),
            output.len(),
            output.as_bytes().len(),
            rotation.yaw,
            rotation.pitch
        );
        log::info!(
            "max distance from {} target: {:.3}",
            shared.target_shape.display_name(),
            scene.swarm.max_target_error(shared.target_shape)
        );
        settings.save();
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    stellar_particles::web::init();
}
