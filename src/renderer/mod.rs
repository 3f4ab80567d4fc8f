//! Render output
//!
//! Packs the swarm snapshot into GPU-ready instance data. The host owns the
//! surface and the draw call.

pub mod instance;

pub use instance::{FrameOutput, PARTICLE_ALPHA, ParticleInstance};
