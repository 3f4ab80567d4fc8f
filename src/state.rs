//! Shared state between the gesture pipeline and the render tick
//!
//! The gesture pipeline writes hand position, detection, committed gesture
//! and target shape; manual shape selection writes the target shape; the
//! render tick reads all of it. Values are handed over as one snapshot under
//! a single lock so a reader never sees half of an update.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::gesture::Gesture;
use crate::sim::ShapeKind;

/// Everything the core exposes to the rest of the app
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SharedState {
    /// Normalized hand position in [-1, 1]², mirrored
    pub hand_position: Vec2,
    pub hand_detected: bool,
    /// Last committed gesture (fist or open)
    pub gesture: Option<Gesture>,
    pub target_shape: ShapeKind,
}

impl SharedState {
    pub fn with_shape(shape: ShapeKind) -> Self {
        Self {
            target_shape: shape,
            ..Default::default()
        }
    }

    /// Hand is present and holding the grab gesture
    pub fn grab_active(&self) -> bool {
        self.hand_detected && self.gesture == Some(Gesture::Fist)
    }

    /// Manual shape selection; last writer wins. Returns true on a change.
    pub fn select_shape(&mut self, shape: ShapeKind) -> bool {
        if self.target_shape == shape {
            return false;
        }
        log::info!("Shape selected: {}", shape.as_str());
        self.target_shape = shape;
        true
    }
}

/// Cloneable handle to state shared across threads
#[derive(Debug, Clone, Default)]
pub struct StateHandle {
    inner: Arc<Mutex<SharedState>>,
}

impl StateHandle {
    pub fn new(initial: SharedState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(initial)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SharedState> {
        // State is plain data; a panicked writer cannot leave it unusable
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the current state
    pub fn load(&self) -> SharedState {
        *self.lock()
    }

    /// Apply `f` atomically with respect to other readers and writers
    pub fn update<R>(&self, f: impl FnOnce(&mut SharedState) -> R) -> R {
        f(&mut self.lock())
    }

    /// Manual shape selection; last writer wins
    pub fn select_shape(&self, shape: ShapeKind) {
        self.update(|s| s.select_shape(shape));
    }

    /// Manual shape selection by name; unknown names select the random cloud
    pub fn select_shape_named(&self, name: &str) {
        self.select_shape(ShapeKind::parse_or_random(name));
    }
}
