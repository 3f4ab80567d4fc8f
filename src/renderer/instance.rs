//! Instance data for the particle draw call
//!
//! One instance per particle, laid out for a single instanced quad/sprite
//! draw. The swarm's rotation is applied as a group transform, so
//! positions stay in the local frame.

use bytemuck::{Pod, Zeroable};
use glam::Quat;

use crate::sim::{ParticleView, Scene};

/// Particle opacity (additive blending)
pub const PARTICLE_ALPHA: f32 = 0.8;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    pub position: [f32; 3],
    pub scale: f32,
    pub color: [f32; 4],
}

impl ParticleInstance {
    pub fn from_view(view: ParticleView) -> Self {
        Self {
            position: view.position.to_array(),
            scale: view.scale,
            color: [view.color.x, view.color.y, view.color.z, PARTICLE_ALPHA],
        }
    }
}

/// Everything the render surface needs for one displayed frame
#[derive(Debug, Clone)]
pub struct FrameOutput {
    pub instances: Vec<ParticleInstance>,
    /// Group rotation of the swarm
    pub rotation: Quat,
}

impl Default for FrameOutput {
    fn default() -> Self {
        Self {
            instances: Vec::new(),
            rotation: Quat::IDENTITY,
        }
    }
}

impl FrameOutput {
    pub fn from_scene(scene: &Scene) -> Self {
        let mut out = Self::default();
        out.refresh(scene);
        out
    }

    /// Repack from the scene, reusing the instance buffer
    pub fn refresh(&mut self, scene: &Scene) {
        self.instances.clear();
        self.instances
            .extend(scene.swarm.snapshot().map(ParticleInstance::from_view));
        self.rotation = scene.frame.rendered_rotation().to_quat();
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Raw instance bytes for a GPU buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }
}
