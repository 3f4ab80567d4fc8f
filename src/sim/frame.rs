//! Interaction frame: grab-driven rotation of the swarm
//!
//! Two rotations are tracked. The accumulated (target) rotation moves only
//! while the grab gesture is held. The rendered rotation chases it every tick,
//! and is the one used both to draw the swarm and to map world-space input
//! into the swarm's local frame, so repulsion lands where the particles are
//! actually drawn.

use glam::{EulerRot, Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::consts::{GRAB_ROTATION_GAIN, ROTATION_BLEND};

/// Yaw (about Y) and pitch (about X), in radians
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rotation {
    pub yaw: f32,
    pub pitch: f32,
}

impl Rotation {
    pub const fn new(yaw: f32, pitch: f32) -> Self {
        Self { yaw, pitch }
    }

    /// Move a fraction `t` of the way toward `target`
    pub fn lerp(self, target: Rotation, t: f32) -> Rotation {
        Rotation {
            yaw: self.yaw + (target.yaw - self.yaw) * t,
            pitch: self.pitch + (target.pitch - self.pitch) * t,
        }
    }

    /// Group orientation (pitch applied outermost, then yaw)
    pub fn to_quat(self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.pitch, self.yaw, 0.0)
    }
}

/// Whether the grab gesture is currently steering rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GrabState {
    #[default]
    Idle,
    Grabbing,
}

/// Tracks accumulated and rendered swarm rotation
#[derive(Debug, Clone, Default)]
pub struct InteractionFrame {
    target: Rotation,
    rendered: Rotation,
    state: GrabState,
    /// Hand position on the previous grabbing tick
    prev_hand: Option<Vec2>,
}

impl InteractionFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GrabState {
        self.state
    }

    /// Accumulate a grab delta in normalized hand units
    pub fn apply_grab_delta(&mut self, dx: f32, dy: f32) {
        self.target.yaw += dx * GRAB_ROTATION_GAIN;
        // Screen-up hand motion tips the swarm toward the viewer
        self.target.pitch -= dy * GRAB_ROTATION_GAIN;
    }

    /// Advance the grab state machine for one tick.
    ///
    /// `hand` is the normalized hand position when a hand is visible. Leaving
    /// the grab clears the previous-position memory; the accumulated rotation
    /// is kept.
    pub fn update_grab(&mut self, grab_active: bool, hand: Option<Vec2>) {
        match (grab_active, hand) {
            (true, Some(pos)) => {
                if self.state == GrabState::Idle {
                    log::debug!("Grab started at ({:.2}, {:.2})", pos.x, pos.y);
                    self.state = GrabState::Grabbing;
                }
                if let Some(prev) = self.prev_hand {
                    let delta = pos - prev;
                    self.apply_grab_delta(delta.x, delta.y);
                }
                self.prev_hand = Some(pos);
            }
            _ => {
                if self.state == GrabState::Grabbing {
                    log::debug!(
                        "Grab released at yaw {:.2}, pitch {:.2}",
                        self.target.yaw,
                        self.target.pitch
                    );
                }
                self.state = GrabState::Idle;
                self.prev_hand = None;
            }
        }
    }

    /// Chase the accumulated rotation (call once per render tick)
    pub fn smooth(&mut self) {
        self.rendered = self.rendered.lerp(self.target, ROTATION_BLEND);
    }

    /// Accumulated rotation driven by grab input
    pub fn current_rotation(&self) -> Rotation {
        self.target
    }

    /// Smoothed rotation the swarm is drawn with
    pub fn rendered_rotation(&self) -> Rotation {
        self.rendered
    }

    /// Map a world-space point into the swarm's local frame
    pub fn inverse_transform(&self, point: Vec3) -> Vec3 {
        self.rendered.to_quat().inverse() * point
    }

    /// Map a local point into world space (inverse of [`Self::inverse_transform`])
    pub fn transform(&self, point: Vec3) -> Vec3 {
        self.rendered.to_quat() * point
    }
}
