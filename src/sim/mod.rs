//! Deterministic swarm simulation
//!
//! Everything that decides where particles go lives here:
//! - Shape targets are pure functions of particle index
//! - Seeded RNG only, and only for cosmetic sparkle
//! - Stable iteration order (by slot index)
//! - No rendering or platform dependencies

pub mod frame;
pub mod shape;
pub mod swarm;
pub mod tick;

pub use frame::{GrabState, InteractionFrame, Rotation};
pub use shape::{ShapeKind, color_of, position_of};
pub use swarm::{Particle, ParticleView, Swarm, SwarmEffects, repulsion};
pub use tick::{Scene, TickInput, interaction_point, tick};
