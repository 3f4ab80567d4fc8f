//! Temporal smoothing of raw gesture labels
//!
//! Keeps the last [`GESTURE_WINDOW`] labels and commits a change only once a
//! single label clearly dominates. A hand-loss frame wipes the window so a
//! stale gesture cannot linger and re-commit when the hand returns.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::classifier::{Gesture, GestureSample};
use crate::consts::{DOMINANCE_RATIO, GESTURE_WINDOW, MIN_COMMIT_WINDOW};
use crate::sim::ShapeKind;

/// One entry in the window. Gestures that suggest a shape are recorded as
/// that shape, so "sphere", "fist", "firework" share one label space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GestureLabel {
    Shape(ShapeKind),
    Gesture(Gesture),
}

impl GestureLabel {
    pub fn from_sample(sample: &GestureSample) -> Self {
        match sample.shape {
            Some(shape) => GestureLabel::Shape(shape),
            None => GestureLabel::Gesture(sample.gesture),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GestureLabel::Shape(shape) => shape.as_str(),
            GestureLabel::Gesture(gesture) => gesture.as_str(),
        }
    }
}

/// A stable gesture decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestureCommit {
    /// Fist is held: hand motion rotates the swarm
    pub grab: bool,
    /// New target shape, if the dominant label names one
    pub shape: Option<ShapeKind>,
}

impl GestureCommit {
    /// Committed gesture as seen by the rest of the app
    pub fn gesture(&self) -> Gesture {
        if self.grab { Gesture::Fist } else { Gesture::Open }
    }
}

/// Sliding-window debouncer
#[derive(Debug, Clone, Default)]
pub struct GestureDebouncer {
    window: VecDeque<GestureLabel>,
    committed: Option<GestureCommit>,
}

impl GestureDebouncer {
    pub fn new() -> Self {
        Self {
            window: VecDeque::with_capacity(GESTURE_WINDOW + 1),
            committed: None,
        }
    }

    pub fn window_len(&self) -> usize {
        self.window.len()
    }

    /// Last committed decision
    pub fn committed(&self) -> Option<GestureCommit> {
        self.committed
    }

    pub fn clear(&mut self) {
        self.window.clear();
    }

    /// Feed one frame's sample. Returns a commit only when the committed
    /// decision changes.
    pub fn observe(&mut self, sample: &GestureSample) -> Option<GestureCommit> {
        if !sample.detected {
            self.clear();
            return None;
        }

        self.window.push_back(GestureLabel::from_sample(sample));
        while self.window.len() > GESTURE_WINDOW {
            self.window.pop_front();
        }

        let (label, hits) = self.dominant()?;
        let len = self.window.len();
        if hits as f32 <= len as f32 * DOMINANCE_RATIO || len <= MIN_COMMIT_WINDOW {
            return None;
        }

        let commit = match label {
            GestureLabel::Gesture(Gesture::Fist) => GestureCommit {
                grab: true,
                shape: None,
            },
            GestureLabel::Shape(shape) => GestureCommit {
                grab: false,
                shape: Some(shape),
            },
            GestureLabel::Gesture(_) => GestureCommit {
                grab: false,
                shape: None,
            },
        };

        if self.committed == Some(commit) {
            return None;
        }
        log::debug!("Gesture committed: {} ({}/{})", label.as_str(), hits, len);
        self.committed = Some(commit);
        Some(commit)
    }

    /// Most frequent label; ties go to the one seen first
    fn dominant(&self) -> Option<(GestureLabel, usize)> {
        let mut counts: Vec<(GestureLabel, usize)> = Vec::with_capacity(GESTURE_WINDOW);
        for label in &self.window {
            match counts.iter_mut().find(|(l, _)| l == label) {
                Some((_, n)) => *n += 1,
                None => counts.push((*label, 1)),
            }
        }
        counts
            .into_iter()
            .fold(None, |best, (label, n)| match best {
                Some((_, best_n)) if best_n >= n => best,
                _ => Some((label, n)),
            })
    }
}
