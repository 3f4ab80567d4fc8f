//! Gesture recognition
//!
//! Landmark frames flow through the classifier (one raw label per frame) and
//! the debouncer (stable decisions), and land in the shared state via the
//! pipeline. Acquisition can run on a worker thread or inline on the host's
//! own frame callback.

pub mod classifier;
pub mod debounce;
pub mod landmarks;
pub mod pipeline;
pub mod source;

pub use classifier::{Gesture, GestureSample, classify, extended_fingers};
pub use debounce::{GestureCommit, GestureDebouncer, GestureLabel};
pub use landmarks::{HandLandmark, LANDMARK_COUNT, LandmarkFrame, posed_hand};
pub use pipeline::GesturePipeline;
pub use source::{LandmarkSource, LandmarkWorker, ScriptedSource, UnavailableSource};
