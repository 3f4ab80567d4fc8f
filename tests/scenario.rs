//! End-to-end scenarios: swarm convergence and gesture-driven shape changes

use glam::Vec2;
use stellar_particles::consts::{POSITION_BLEND, RENDER_DT};
use stellar_particles::gesture::{Gesture, GesturePipeline, LandmarkFrame, posed_hand};
use stellar_particles::sim::{InteractionFrame, Scene, ShapeKind, Swarm, SwarmEffects, TickInput, position_of, tick};
use stellar_particles::{SharedState, StateHandle};

const QUIET: SwarmEffects = SwarmEffects {
    twinkle: false,
    sparkle: false,
};

fn quiet_swarm(count: usize) -> Swarm {
    Swarm::new(count, 42).with_effects(QUIET)
}

#[test]
fn sphere_converges_without_interaction() {
    let mut swarm = quiet_swarm(6000);
    let frame = InteractionFrame::new();
    for _ in 0..1000 {
        swarm.advance(RENDER_DT, ShapeKind::Sphere, None, false, &frame);
    }
    let err = swarm.max_target_error(ShapeKind::Sphere);
    assert!(err < 1e-3, "max error {}", err);
}

#[test]
fn shape_switch_converges_monotonically() {
    let mut swarm = quiet_swarm(1000);
    let frame = InteractionFrame::new();
    for _ in 0..600 {
        swarm.advance(RENDER_DT, ShapeKind::Sphere, None, false, &frame);
    }

    let count = swarm.len() as u32;
    let distances = |swarm: &Swarm| -> Vec<f32> {
        swarm
            .particles()
            .iter()
            .enumerate()
            .map(|(i, p)| (p.position - position_of(i as u32, count, ShapeKind::Cube)).length())
            .collect()
    };

    let mut before = distances(&swarm);
    for _ in 0..200 {
        let positions: Vec<_> = swarm.particles().iter().map(|p| p.position).collect();
        swarm.advance(RENDER_DT, ShapeKind::Cube, None, false, &frame);
        let after = distances(&swarm);

        for (i, p) in swarm.particles().iter().enumerate() {
            assert!(after[i] <= before[i] + 1e-5, "particle {} moved away", i);
            let step = (p.position - positions[i]).length();
            assert!(step <= POSITION_BLEND * before[i] + 1e-5, "particle {} overshot", i);
        }
        before = after;
    }
}

#[test]
fn gesture_selects_shape_and_swarm_follows() {
    let mut scene = Scene::new(quiet_swarm(500));
    let mut shared = SharedState::default();
    let mut pipeline = GesturePipeline::new();
    let input = TickInput::default();

    let victory = posed_hand(Gesture::Victory, Vec2::new(0.5, 0.5));
    for _ in 0..6 {
        pipeline.process(&victory, &mut shared);
        tick(&mut scene, &shared, &input, RENDER_DT);
    }
    assert_eq!(shared.target_shape, ShapeKind::Flower);

    // Hand leaves; the shape stays selected and nothing repels
    pipeline.process(&LandmarkFrame::Absent, &mut shared);
    assert!(!shared.hand_detected);
    for _ in 0..600 {
        tick(&mut scene, &shared, &input, RENDER_DT);
    }
    assert_eq!(shared.target_shape, ShapeKind::Flower);
    assert!(scene.swarm.max_target_error(ShapeKind::Flower) < 1e-3);
}

#[test]
fn fist_rotates_without_scattering() {
    let mut scene = Scene::new(quiet_swarm(300));
    let handle = StateHandle::new(SharedState::with_shape(ShapeKind::Sphere));
    let mut pipeline = GesturePipeline::new();
    let input = TickInput::default();

    for _ in 0..600 {
        tick(&mut scene, &handle.load(), &input, RENDER_DT);
    }

    // Hand held in the image corner, far outside the falloff radius
    for i in 0..30 {
        let x = i as f32 * 0.005;
        let frame = posed_hand(Gesture::Fist, Vec2::new(x, 0.0));
        handle.update(|s| pipeline.process(&frame, s));
        tick(&mut scene, &handle.load(), &input, RENDER_DT);
    }

    let shared = handle.load();
    assert_eq!(shared.gesture, Some(Gesture::Fist));
    assert!(shared.grab_active());
    // Mirrored x: moving right in the image turns the swarm the other way
    assert!(scene.frame.current_rotation().yaw < 0.0);
    // Rotation only changes the group transform; the local shape is untouched
    assert!(scene.swarm.max_target_error(ShapeKind::Sphere) < 1e-3);
}

#[test]
fn manual_selection_wins_until_next_commit() {
    let handle = StateHandle::default();
    let mut pipeline = GesturePipeline::new();
    let three = posed_hand(Gesture::Three, Vec2::new(0.5, 0.5));

    for _ in 0..8 {
        handle.update(|s| pipeline.process(&three, s));
    }
    assert_eq!(handle.load().target_shape, ShapeKind::Cube);

    handle.select_shape_named("heart");
    for _ in 0..8 {
        handle.update(|s| pipeline.process(&three, s));
    }
    assert_eq!(handle.load().target_shape, ShapeKind::Heart);

    handle.select_shape_named("not-a-shape");
    assert_eq!(handle.load().target_shape, ShapeKind::Random);
}
