//! Particle swarm: per-slot state and the per-tick integrator
//!
//! Particles live in a fixed-size vector indexed by slot. Positions are in
//! the swarm's local (unrotated) frame; the renderer applies the frame's
//! rendered rotation to the whole group.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use super::frame::InteractionFrame;
use super::shape::{ShapeKind, color_of, position_of};
use crate::consts::*;
use crate::{hash01, hsl_to_rgb};

const SALT_SCALE: u32 = 11;

/// A single particle slot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Local-frame position
    pub position: Vec3,
    /// Linear RGB in [0, 1]
    pub color: Vec3,
    /// Render scale from the last tick
    pub scale: f32,
    /// Stable per-slot phase for scale oscillation
    pub scale_seed: f32,
}

/// What the renderer needs for one particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleView {
    pub position: Vec3,
    pub scale: f32,
    pub color: Vec3,
}

/// Cosmetic effects that can be switched off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwarmEffects {
    /// Oscillatory per-particle drift
    pub twinkle: bool,
    /// White flashes and scale spikes
    pub sparkle: bool,
}

impl Default for SwarmEffects {
    fn default() -> Self {
        Self {
            twinkle: true,
            sparkle: true,
        }
    }
}

/// Repulsive displacement of a particle at `particle` from `point`, both local.
///
/// Magnitude falls off linearly from [`REPULSION_STRENGTH`] at distance 0 to
/// zero at [`FALLOFF_RADIUS`]. A particle exactly on the point is pushed
/// along +Y.
pub fn repulsion(point: Vec3, particle: Vec3) -> Vec3 {
    let away = particle - point;
    let dist = away.length();
    if dist >= FALLOFF_RADIUS {
        return Vec3::ZERO;
    }
    let falloff = (FALLOFF_RADIUS - dist) / FALLOFF_RADIUS;
    away.normalize_or(Vec3::Y) * falloff * REPULSION_STRENGTH
}

/// The particle swarm
#[derive(Debug, Clone)]
pub struct Swarm {
    particles: Vec<Particle>,
    effects: SwarmEffects,
    /// Seconds advanced so far
    elapsed: f32,
    /// Drives cosmetic sparkle only; positions never read it
    rng: Pcg32,
}

impl Swarm {
    /// Scatter `count` particles through the spawn cube with random hues
    pub fn new(count: usize, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let half = SPAWN_EXTENT / 2.0;

        let particles = (0..count)
            .map(|i| {
                let position = Vec3::new(
                    rng.random_range(-half..half),
                    rng.random_range(-half..half),
                    rng.random_range(-half..half),
                );
                let color = hsl_to_rgb(rng.random::<f32>(), 0.8, 0.5);
                Particle {
                    position,
                    color,
                    scale: 0.5,
                    scale_seed: hash01(i as u32, SALT_SCALE) * TAU,
                }
            })
            .collect();

        log::info!("Swarm created with {} particles (seed {})", count, seed);

        Self {
            particles,
            effects: SwarmEffects::default(),
            elapsed: 0.0,
            rng,
        }
    }

    pub fn with_effects(mut self, effects: SwarmEffects) -> Self {
        self.effects = effects;
        self
    }

    pub fn effects(&self) -> SwarmEffects {
        self.effects
    }

    pub fn set_effects(&mut self, effects: SwarmEffects) {
        self.effects = effects;
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Advance every particle by one render tick.
    ///
    /// `interaction` is a world-space point; it is mapped into the local frame
    /// with the frame's *rendered* rotation. No repulsion is applied while
    /// `grab_active`, since the hand is steering rotation instead.
    pub fn advance(
        &mut self,
        dt: f32,
        shape: ShapeKind,
        interaction: Option<Vec3>,
        grab_active: bool,
        frame: &InteractionFrame,
    ) {
        if self.particles.is_empty() {
            return;
        }

        // A bad frame time stalls the clock for one tick instead of poisoning it
        if dt.is_finite() {
            self.elapsed += dt;
        }
        let time = self.elapsed;
        let count = self.particles.len() as u32;
        let local_point = match (interaction, grab_active) {
            (Some(world), false) => Some(frame.inverse_transform(world)),
            _ => None,
        };
        let SwarmEffects { twinkle, sparkle } = self.effects;

        for (i, p) in self.particles.iter_mut().enumerate() {
            let index = i as u32;
            let target = position_of(index, count, shape);
            let force = local_point.map_or(Vec3::ZERO, |point| repulsion(point, p.position));

            let mut next = p.position + (target + force - p.position) * POSITION_BLEND;
            if twinkle {
                let fi = i as f32;
                next.x += (time + fi * 0.1).sin() * TWINKLE_AMPLITUDE;
                next.y += (time + fi * 0.2).cos() * TWINKLE_AMPLITUDE;
            }
            // A bad sample freezes this particle rather than poisoning the swarm
            if next.is_finite() {
                p.position = next;
            }

            if sparkle && self.rng.random::<f32>() < WHITE_FLASH_CHANCE {
                p.color = Vec3::ONE;
            } else {
                let target_color = color_of(index, count, shape);
                p.color += (target_color - p.color) * COLOR_BLEND;
            }

            let spike = if sparkle && self.rng.random::<f32>() < SPARKLE_SCALE_CHANCE {
                SPARKLE_SCALE
            } else {
                1.0
            };
            let scale = (0.5 + (time * 3.0 + p.scale_seed).sin() * 0.3) * spike;
            if scale.is_finite() {
                p.scale = scale;
            }
        }
    }

    /// Per-particle render state from the last tick
    pub fn snapshot(&self) -> impl ExactSizeIterator<Item = ParticleView> + '_ {
        self.particles.iter().map(|p| ParticleView {
            position: p.position,
            scale: p.scale,
            color: p.color,
        })
    }

    /// Largest distance from any particle to its target for `shape`
    pub fn max_target_error(&self, shape: ShapeKind) -> f32 {
        let count = self.particles.len() as u32;
        self.particles
            .iter()
            .enumerate()
            .map(|(i, p)| (p.position - position_of(i as u32, count, shape)).length())
            .fold(0.0, f32::max)
    }
}
