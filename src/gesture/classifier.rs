//! Per-frame gesture classification
//!
//! Stateless: each frame is judged on its own landmarks. Noise is dealt with
//! downstream by the debouncer.

use serde::{Deserialize, Serialize};

use super::landmarks::*;
use crate::consts::{EXTENSION_RATIO, PINCH_THRESHOLD};
use crate::sim::ShapeKind;

/// Raw hand gesture for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Gesture {
    #[default]
    None,
    Fist,
    PinchIndex,
    PinchMiddle,
    Victory,
    Pointer,
    Three,
    Open,
}

impl Gesture {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gesture::None => "none",
            Gesture::Fist => "fist",
            Gesture::PinchIndex => "pinchIndex",
            Gesture::PinchMiddle => "pinchMiddle",
            Gesture::Victory => "victory",
            Gesture::Pointer => "pointer",
            Gesture::Three => "three",
            Gesture::Open => "open",
        }
    }

    /// Legend line for the on-screen gesture guide
    pub fn hint(&self) -> &'static str {
        match self {
            Gesture::None => "No hand",
            Gesture::Fist => "Fist: grab & rotate",
            Gesture::PinchIndex => "Pinch (index): heart",
            Gesture::PinchMiddle => "Pinch (middle): saturn",
            Gesture::Victory => "Victory (index + middle): flower",
            Gesture::Pointer => "Pointer (index only): firework",
            Gesture::Three => "Three fingers: cube",
            Gesture::Open => "Open hand: sphere, interact/repel",
        }
    }
}

/// Result of classifying one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GestureSample {
    pub gesture: Gesture,
    /// Shape this gesture asks for, if any
    pub shape: Option<ShapeKind>,
    pub detected: bool,
}

impl GestureSample {
    /// Sample for a frame with no hand
    pub const ABSENT: GestureSample = GestureSample {
        gesture: Gesture::None,
        shape: None,
        detected: false,
    };

    fn hand(gesture: Gesture, shape: Option<ShapeKind>) -> Self {
        Self {
            gesture,
            shape,
            detected: true,
        }
    }
}

/// Which digits are extended: [thumb, index, middle, ring, pinky]
pub fn extended_fingers(l: &[HandLandmark; LANDMARK_COUNT]) -> [bool; 5] {
    let wrist = l[WRIST].xy();
    let extended = |tip: usize, joint: usize| {
        let d_tip = l[tip].xy().distance(wrist);
        let d_joint = l[joint].xy().distance(wrist);
        d_tip > d_joint * EXTENSION_RATIO
    };

    [
        // Thumb is judged against landmark 2, the other fingers against their PIP
        extended(THUMB_TIP, THUMB_MCP),
        extended(INDEX_TIP, INDEX_PIP),
        extended(MIDDLE_TIP, MIDDLE_PIP),
        extended(RING_TIP, RING_PIP),
        extended(PINKY_TIP, PINKY_PIP),
    ]
}

fn pinched(l: &[HandLandmark; LANDMARK_COUNT], tip: usize) -> bool {
    l[THUMB_TIP].xy().distance(l[tip].xy()) < PINCH_THRESHOLD
}

/// Classify one landmark frame. First matching rule wins.
pub fn classify(frame: &LandmarkFrame) -> GestureSample {
    let Some(l) = frame.landmarks() else {
        return GestureSample::ABSENT;
    };

    let [thumb, index, middle, ring, pinky] = extended_fingers(l);
    let count = [thumb, index, middle, ring, pinky].iter().filter(|&&e| e).count();

    if pinched(l, INDEX_TIP) {
        GestureSample::hand(Gesture::PinchIndex, Some(ShapeKind::Heart))
    } else if pinched(l, MIDDLE_TIP) {
        GestureSample::hand(Gesture::PinchMiddle, Some(ShapeKind::Saturn))
    } else if count == 0 || (count == 1 && thumb) {
        GestureSample::hand(Gesture::Fist, None)
    } else if index && middle && !ring && !pinky {
        GestureSample::hand(Gesture::Victory, Some(ShapeKind::Flower))
    } else if index && !middle && !ring && !pinky {
        GestureSample::hand(Gesture::Pointer, Some(ShapeKind::Firework))
    } else if index && middle && ring && !pinky {
        GestureSample::hand(Gesture::Three, Some(ShapeKind::Cube))
    } else if count >= 4 {
        GestureSample::hand(Gesture::Open, Some(ShapeKind::Sphere))
    } else {
        GestureSample::hand(Gesture::Open, None)
    }
}
