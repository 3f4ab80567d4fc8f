//! Landmark frame -> shared state
//!
//! Runs once per landmark frame, at whatever rate frames arrive. It never
//! touches the swarm; it only writes the shared state the render tick reads.

use super::classifier::{GestureSample, classify};
use super::debounce::{GestureCommit, GestureDebouncer};
use super::landmarks::LandmarkFrame;
use crate::state::SharedState;

/// Classifier plus debouncer for one hand stream
#[derive(Debug, Clone, Default)]
pub struct GesturePipeline {
    debouncer: GestureDebouncer,
    last_sample: GestureSample,
}

impl GesturePipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw classification of the most recent frame
    pub fn last_sample(&self) -> GestureSample {
        self.last_sample
    }

    pub fn debouncer(&self) -> &GestureDebouncer {
        &self.debouncer
    }

    /// Process one frame and write the result into `state`.
    ///
    /// Returns the commit when the debounced decision changed.
    pub fn process(&mut self, frame: &LandmarkFrame, state: &mut SharedState) -> Option<GestureCommit> {
        let sample = classify(frame);
        self.last_sample = sample;

        match frame.hand_position() {
            Some(pos) => {
                if !state.hand_detected {
                    log::info!("Hand detected");
                }
                state.hand_detected = true;
                state.hand_position = pos;
            }
            None => {
                if state.hand_detected {
                    log::info!("Hand lost");
                }
                state.hand_detected = false;
            }
        }

        let commit = self.debouncer.observe(&sample)?;
        state.gesture = Some(commit.gesture());
        if let Some(shape) = commit.shape {
            if state.target_shape != shape {
                log::info!("Gesture switched shape to {}", shape.as_str());
            }
            state.target_shape = shape;
        }
        Some(commit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::{Gesture, posed_hand};
    use crate::sim::ShapeKind;
    use glam::Vec2;

    #[test]
    fn test_pose_drives_shape() {
        let mut pipeline = GesturePipeline::new();
        let mut state = SharedState::default();
        let frame = posed_hand(Gesture::Three, Vec2::new(0.4, 0.3));

        for _ in 0..5 {
            assert!(pipeline.process(&frame, &mut state).is_none());
            assert!(state.hand_detected);
        }
        assert_eq!(state.target_shape, ShapeKind::Sphere);

        assert!(pipeline.process(&frame, &mut state).is_some());
        assert_eq!(state.target_shape, ShapeKind::Cube);
        assert_eq!(state.gesture, Some(Gesture::Open));
        assert!((state.hand_position - Vec2::new(0.2, 0.4)).length() < 1e-5);
    }

    #[test]
    fn test_hand_loss_keeps_shape() {
        let mut pipeline = GesturePipeline::new();
        let mut state = SharedState::default();
        let fist = posed_hand(Gesture::Fist, Vec2::new(0.5, 0.5));
        for _ in 0..8 {
            pipeline.process(&fist, &mut state);
        }
        assert!(state.grab_active());

        pipeline.process(&LandmarkFrame::Absent, &mut state);
        assert!(!state.hand_detected);
        assert!(!state.grab_active());
        assert_eq!(pipeline.debouncer().window_len(), 0);
        assert_eq!(state.target_shape, ShapeKind::Sphere);
    }

    #[test]
    fn test_manual_selection_survives_held_gesture() {
        let mut pipeline = GesturePipeline::new();
        let mut state = SharedState::default();
        let victory = posed_hand(Gesture::Victory, Vec2::new(0.5, 0.5));
        for _ in 0..10 {
            pipeline.process(&victory, &mut state);
        }
        assert_eq!(state.target_shape, ShapeKind::Flower);

        // User picks a shape while still holding the same gesture
        state.target_shape = ShapeKind::Saturn;
        for _ in 0..10 {
            pipeline.process(&victory, &mut state);
        }
        assert_eq!(state.target_shape, ShapeKind::Saturn);
    }
}
