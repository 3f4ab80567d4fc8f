//! Shape fields: index -> target position and color
//!
//! Every function here is a pure function of `(index, count, shape)`. Targets
//! are recomputed each tick, so anything that varied between calls would show
//! up as jitter. Irregular-looking shapes use [`hash01`] instead of an RNG.

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::{hash01, hsl_to_rgb};

/// Salts keep the per-shape hashes independent of each other
const SALT_RING: u32 = 1;
const SALT_BURST: u32 = 2;
const SALT_HUE: u32 = 3;

/// Number of concentric heart outlines
const HEART_SHELLS: u32 = 6;
/// Rose curve petal factor
const FLOWER_PETALS: f32 = 4.0;
/// Rose curve turns across all particles
const FLOWER_TURNS: f32 = 10.0;
/// Saturn ring turns across its particles
const RING_TURNS: f32 = 10.0;

/// Target geometry the swarm morphs toward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Sphere,
    Cube,
    Heart,
    Flower,
    Saturn,
    Firework,
    Random,
}

impl ShapeKind {
    /// All shapes, in picker order
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::Sphere,
        ShapeKind::Cube,
        ShapeKind::Heart,
        ShapeKind::Flower,
        ShapeKind::Saturn,
        ShapeKind::Firework,
        ShapeKind::Random,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Sphere => "sphere",
            ShapeKind::Cube => "cube",
            ShapeKind::Heart => "heart",
            ShapeKind::Flower => "flower",
            ShapeKind::Saturn => "saturn",
            ShapeKind::Firework => "firework",
            ShapeKind::Random => "random",
        }
    }

    /// Capitalized name for shape picker buttons
    pub fn display_name(&self) -> &'static str {
        match self {
            ShapeKind::Sphere => "Sphere",
            ShapeKind::Cube => "Cube",
            ShapeKind::Heart => "Heart",
            ShapeKind::Flower => "Flower",
            ShapeKind::Saturn => "Saturn",
            ShapeKind::Firework => "Firework",
            ShapeKind::Random => "Random",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "sphere" => Some(ShapeKind::Sphere),
            "cube" => Some(ShapeKind::Cube),
            "heart" => Some(ShapeKind::Heart),
            "flower" => Some(ShapeKind::Flower),
            "saturn" => Some(ShapeKind::Saturn),
            "firework" => Some(ShapeKind::Firework),
            "random" => Some(ShapeKind::Random),
            _ => None,
        }
    }

    /// Parse a manual selection, falling back to the random cloud
    pub fn parse_or_random(s: &str) -> Self {
        Self::from_str(s).unwrap_or_else(|| {
            log::warn!("Unknown shape {:?}, using random", s);
            ShapeKind::Random
        })
    }
}

/// Target position of particle `index` out of `count` for `shape`.
///
/// Returns the origin when `count` is zero.
pub fn position_of(index: u32, count: u32, shape: ShapeKind) -> Vec3 {
    if count == 0 {
        return Vec3::ZERO;
    }

    match shape {
        ShapeKind::Sphere => fibonacci_sphere(index as f32, count as f32, SWARM_RADIUS),
        ShapeKind::Cube => cube_grid(index, count),
        ShapeKind::Heart => heart(index, count),
        ShapeKind::Flower => flower(index, count),
        ShapeKind::Saturn => saturn(index, count),
        ShapeKind::Firework => {
            let radius = 2.0 + hash01(index, SALT_BURST) * 15.0;
            fibonacci_sphere(index as f32, count as f32, radius)
        }
        ShapeKind::Random => {
            let s = index as f32 * 0.5;
            Vec3::new((s * 1.1).sin(), (s * 1.3).cos(), (s * 1.7).sin()) * 7.0
        }
    }
}

/// Target color of particle `index` for `shape`, as linear RGB in [0, 1]
pub fn color_of(index: u32, count: u32, shape: ShapeKind) -> Vec3 {
    let jitter = hash01(index, SALT_HUE);
    match shape {
        ShapeKind::Heart => hsl_to_rgb(0.9 + jitter * 0.1, 0.9, 0.6),
        ShapeKind::Saturn => hsl_to_rgb(0.1 + (index as f32 * 0.01) % 0.1, 0.9, 0.6),
        ShapeKind::Flower => hsl_to_rgb(0.55 + jitter * 0.3, 0.9, 0.6),
        ShapeKind::Firework => {
            // Full sweep: spread hues along the index, offset by the hash
            let progress = if count == 0 { 0.0 } else { index as f32 / count as f32 };
            hsl_to_rgb(progress + jitter, 1.0, 0.6)
        }
        ShapeKind::Sphere | ShapeKind::Cube | ShapeKind::Random => hsl_to_rgb(0.6, 0.9, 0.7),
    }
}

/// Golden-spiral point on a sphere; `i` in [0, n)
fn fibonacci_sphere(i: f32, n: f32, radius: f32) -> Vec3 {
    let phi = (-1.0 + 2.0 * i / n).clamp(-1.0, 1.0).acos();
    let theta = (n * PI).sqrt() * phi;
    Vec3::new(
        radius * phi.sin() * theta.cos(),
        radius * phi.sin() * theta.sin(),
        radius * phi.cos(),
    )
}

/// Smallest side length whose cube holds `count` cells
fn grid_side(count: u32) -> u32 {
    let mut side = (count as f32).cbrt().floor().max(1.0) as u32;
    while (side as u64).pow(3) < count as u64 {
        side += 1;
    }
    while side > 1 && ((side - 1) as u64).pow(3) >= count as u64 {
        side -= 1;
    }
    side
}

fn cube_grid(index: u32, count: u32) -> Vec3 {
    let side = grid_side(count);
    let spacing = 2.0 * CUBE_HALF_EXTENT / side as f32;
    let offset = (side - 1) as f32 * spacing / 2.0;

    let ix = index % side;
    let iy = (index / side) % side;
    let iz = index / (side * side);

    Vec3::new(ix as f32, iy as f32, iz as f32) * spacing - Vec3::splat(offset)
}

fn heart(index: u32, count: u32) -> Vec3 {
    let t = index as f32 / count as f32 * TAU;
    let x = 16.0 * t.sin().powi(3);
    let y = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();

    // Shells 1..=6 fake volume; depth comes from sin(index), not an RNG
    let shell = (index % HEART_SHELLS + 1) as f32;
    let scale = shell * 0.15;
    let depth = (index as f32).sin() * 2.0;

    Vec3::new(x * scale, y * scale + 2.0, depth * scale) * 0.5
}

fn flower(index: u32, count: u32) -> Vec3 {
    let progress = index as f32 / count as f32;
    let phi = progress * TAU * FLOWER_TURNS;
    let r = 6.0 * (FLOWER_PETALS * phi).cos();
    Vec3::new(r * phi.cos(), r * phi.sin(), progress * 6.0 - 3.0)
}

fn saturn(index: u32, count: u32) -> Vec3 {
    let planet_count = count as f32 * PLANET_SHARE;
    let i = index as f32;

    if i < planet_count {
        return fibonacci_sphere(i, planet_count, PLANET_RADIUS);
    }

    let ring_count = count as f32 - planet_count;
    let angle = (i - planet_count) / ring_count * TAU * RING_TURNS;
    let r = 4.5 + hash01(index, SALT_RING) * 5.0;
    // Flattened, tilted ring
    Vec3::new(r * angle.cos(), r * angle.sin() * 0.2, r * angle.sin())
}
