//! Stellar Particles - a gesture-driven particle swarm
//!
//! Core modules:
//! - `sim`: Deterministic swarm simulation (shape fields, particle motion, rotation frame)
//! - `gesture`: Hand landmark classification and debouncing
//! - `state`: Shared state handed between the gesture pipeline and the render tick
//! - `renderer`: GPU-ready packing of the per-tick swarm snapshot
//! - `settings`: User-tunable configuration

pub mod error;
pub mod gesture;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod state;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::{LandmarkError, SettingsError};
pub use settings::{QualityPreset, Settings};
pub use state::{SharedState, StateHandle};

use glam::Vec3;

/// Simulation configuration constants
pub mod consts {
    /// Nominal render tick (60 Hz)
    pub const RENDER_DT: f32 = 1.0 / 60.0;

    /// Default number of particles in the swarm
    pub const DEFAULT_PARTICLE_COUNT: usize = 6000;
    /// Side of the cube particles are scattered in at creation
    pub const SPAWN_EXTENT: f32 = 20.0;

    /// Radius of the sphere and firework base shapes
    pub const SWARM_RADIUS: f32 = 5.0;
    /// Half-extent of the cube grid
    pub const CUBE_HALF_EXTENT: f32 = 7.0;
    /// Radius of the saturn planet body
    pub const PLANET_RADIUS: f32 = 3.0;
    /// Fraction of particles that form the saturn planet (rest form the ring)
    pub const PLANET_SHARE: f32 = 0.6;

    /// Distance inside which the interaction point repels particles
    pub const FALLOFF_RADIUS: f32 = 4.0;
    /// Peak repulsive displacement (at distance 0)
    pub const REPULSION_STRENGTH: f32 = 1.5;

    /// Per-tick position blend toward the target (~25 tick time constant)
    pub const POSITION_BLEND: f32 = 0.04;
    /// Per-tick color blend toward the shape color
    pub const COLOR_BLEND: f32 = 0.1;
    /// Per-tick blend of rendered rotation toward the accumulated rotation
    pub const ROTATION_BLEND: f32 = 0.1;
    /// Radians of rotation per unit of normalized hand motion while grabbing
    pub const GRAB_ROTATION_GAIN: f32 = 2.0;

    /// Amplitude of the per-tick twinkle displacement
    pub const TWINKLE_AMPLITUDE: f32 = 0.05;
    /// Per-tick chance that a particle's scale spikes
    pub const SPARKLE_SCALE_CHANCE: f32 = 0.02;
    /// Scale multiplier during a sparkle spike
    pub const SPARKLE_SCALE: f32 = 1.5;
    /// Per-tick chance that a particle flashes white
    pub const WHITE_FLASH_CHANCE: f32 = 0.01;

    /// World-space extent of the normalized hand position (x, y)
    pub const HAND_WORLD_SCALE: (f32, f32) = (12.0, 8.0);

    /// Number of raw labels kept by the gesture debouncer
    pub const GESTURE_WINDOW: usize = 10;
    /// Share of the window a label must exceed before it commits
    pub const DOMINANCE_RATIO: f32 = 0.8;
    /// Window length that must be exceeded before anything commits
    pub const MIN_COMMIT_WINDOW: usize = 5;

    /// Tip-to-wrist over joint-to-wrist ratio for an extended finger
    pub const EXTENSION_RATIO: f32 = 1.15;
    /// Normalized fingertip distance that counts as a pinch
    pub const PINCH_THRESHOLD: f32 = 0.05;
}

/// Deterministic value in [0, 1) derived from an index and a salt.
///
/// Stands in for randomness wherever the result must be stable across ticks.
#[inline]
pub fn hash01(index: u32, salt: u32) -> f32 {
    let hash = index
        .wrapping_add(salt.wrapping_mul(0x9E37_79B9))
        .wrapping_mul(2654435761)
        ^ salt;
    let hash = (hash ^ (hash >> 15)).wrapping_mul(7919);
    ((hash >> 8) % 10_000) as f32 / 10_000.0
}

/// Convert HSL (all components in [0, 1], hue wraps) to linear RGB
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Vec3 {
    let h = h.rem_euclid(1.0);
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    if s == 0.0 {
        return Vec3::splat(l);
    }

    let q = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    Vec3::new(
        hue_to_channel(p, q, h + 1.0 / 3.0),
        hue_to_channel(p, q, h),
        hue_to_channel(p, q, h - 1.0 / 3.0),
    )
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}
