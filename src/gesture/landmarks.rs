//! Hand landmark frames
//!
//! A frame is either `Absent` or a full set of 21 points in normalized image
//! space ([0, 1], y pointing down), indexed the usual hand-tracker way.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::classifier::Gesture;
use crate::error::LandmarkError;

pub const LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// One tracked point; `z` is relative depth and unused by classification
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HandLandmark {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

impl HandLandmark {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }

    #[inline]
    pub fn xy(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// One landmark-source frame
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LandmarkFrame {
    #[default]
    Absent,
    Hand([HandLandmark; LANDMARK_COUNT]),
}

impl LandmarkFrame {
    /// Build a frame from tracker output. Extra points are ignored.
    pub fn from_points(points: &[HandLandmark]) -> Result<Self, LandmarkError> {
        if points.len() < LANDMARK_COUNT {
            return Err(LandmarkError::TooShort { got: points.len() });
        }
        if let Some(index) = points[..LANDMARK_COUNT].iter().position(|p| !p.is_finite()) {
            return Err(LandmarkError::NonFinite { index });
        }

        let mut landmarks = [HandLandmark::default(); LANDMARK_COUNT];
        landmarks.copy_from_slice(&points[..LANDMARK_COUNT]);
        Ok(LandmarkFrame::Hand(landmarks))
    }

    /// Build a frame from a flat `[x, y, (z), ...]` buffer with 2 or 3 floats per point
    pub fn from_flat(data: &[f32], stride: usize) -> Result<Self, LandmarkError> {
        if !(2..=3).contains(&stride) || data.len() % stride != 0 {
            return Err(LandmarkError::BadStride {
                len: data.len(),
                stride,
            });
        }
        let points: Vec<HandLandmark> = data
            .chunks_exact(stride)
            .map(|c| HandLandmark {
                x: c[0],
                y: c[1],
                z: c.get(2).copied().unwrap_or(0.0),
            })
            .collect();
        Self::from_points(&points)
    }

    /// Like [`Self::from_flat`], but degrades a malformed buffer to `Absent`
    pub fn from_flat_or_absent(data: &[f32], stride: usize) -> Self {
        Self::from_flat(data, stride).unwrap_or_else(|e| {
            log::warn!("Rejected landmark frame: {}", e);
            LandmarkFrame::Absent
        })
    }

    pub fn is_hand(&self) -> bool {
        matches!(self, LandmarkFrame::Hand(_))
    }

    pub fn landmarks(&self) -> Option<&[HandLandmark; LANDMARK_COUNT]> {
        match self {
            LandmarkFrame::Hand(landmarks) => Some(landmarks),
            LandmarkFrame::Absent => None,
        }
    }

    /// Index fingertip mapped to [-1, 1]², mirrored so the hand moves like a
    /// reflection, y up
    pub fn hand_position(&self) -> Option<Vec2> {
        self.landmarks().map(|l| {
            let tip = l[INDEX_TIP];
            Vec2::new(-(tip.x - 0.5) * 2.0, -(tip.y - 0.5) * 2.0)
        })
    }
}

/// Finger layout for [`posed_hand`]: x offset of each finger column
const FINGER_COLUMNS: [(usize, usize, usize, usize, f32); 4] = [
    (INDEX_MCP, INDEX_PIP, INDEX_DIP, INDEX_TIP, -0.06),
    (MIDDLE_MCP, MIDDLE_PIP, MIDDLE_DIP, MIDDLE_TIP, 0.0),
    (RING_MCP, RING_PIP, RING_DIP, RING_TIP, 0.06),
    (PINKY_MCP, PINKY_PIP, PINKY_DIP, PINKY_TIP, 0.12),
];

/// Synthesize an upright hand making `gesture`, with its index fingertip
/// near `tip` (normalized image coordinates).
///
/// Used by the headless driver to script a performance, and by tests.
/// `Gesture::None` produces an absent frame.
pub fn posed_hand(gesture: Gesture, tip: Vec2) -> LandmarkFrame {
    // [thumb, index, middle, ring, pinky]
    let extended = match gesture {
        Gesture::None => return LandmarkFrame::Absent,
        Gesture::Fist => [false; 5],
        Gesture::PinchIndex | Gesture::PinchMiddle | Gesture::Open => [true; 5],
        Gesture::Victory => [false, true, true, false, false],
        Gesture::Pointer => [false, true, false, false, false],
        Gesture::Three => [false, true, true, true, false],
    };

    // Anchor so that the index tip lands on `tip`
    let index_reach = if extended[1] { 0.25 } else { 0.08 };
    let wrist = tip + Vec2::new(-FINGER_COLUMNS[0].4, index_reach);
    let at = |offset: Vec2| {
        let p = wrist + offset;
        HandLandmark::new(p.x, p.y)
    };

    let mut l = [HandLandmark::default(); LANDMARK_COUNT];
    l[WRIST] = at(Vec2::ZERO);

    l[THUMB_CMC] = at(Vec2::new(-0.04, -0.03));
    l[THUMB_MCP] = at(Vec2::new(-0.10, -0.08));
    l[THUMB_IP] = at(Vec2::new(-0.13, -0.11));
    l[THUMB_TIP] = if extended[0] {
        at(Vec2::new(-0.18, -0.14))
    } else {
        at(Vec2::new(-0.10, -0.02))
    };

    for (finger, &(mcp, pip, dip, tip_idx, dx)) in FINGER_COLUMNS.iter().enumerate() {
        l[mcp] = at(Vec2::new(dx, -0.07));
        l[pip] = at(Vec2::new(dx, -0.15));
        if extended[finger + 1] {
            l[dip] = at(Vec2::new(dx, -0.20));
            l[tip_idx] = at(Vec2::new(dx, -0.25));
        } else {
            l[dip] = at(Vec2::new(dx, -0.11));
            l[tip_idx] = at(Vec2::new(dx, -0.08));
        }
    }

    match gesture {
        Gesture::PinchIndex => l[THUMB_TIP] = l[INDEX_TIP],
        Gesture::PinchMiddle => l[THUMB_TIP] = l[MIDDLE_TIP],
        _ => {}
    }

    LandmarkFrame::Hand(l)
}
