use glam::{Quat, Vec3};
use std::collections::HashMap;

use super::common::{particle_instance, particle_material, particle_visual};
use super::{Effect, EffectSnapshot, Input, Signal};
use crate::camera::Camera;
use crate::config::SimConfig;
use crate::frame::FrameInfo;
use crate::math::Color;
use crate::scene::{HitTest, Material, TorusTarget};
use crate::sim::{FloatingPath, ParticleEmitter, ParticleId, ParticlePool};
use crate::stage::{
    HandleAllocator, InstanceData, MaterialUpdate, Shape, Stage, Visual, VisualHandle,
};

pub const TORUS_RADIUS: f32 = 1.0;
pub const TORUS_TUBE: f32 = 0.4;
pub const TORUS_SCALE: f32 = 6.0;
pub const ORBIT_RADIUS: f32 = 60.0;
/// Radians per second
pub const ORBIT_RATE: f32 = 0.1;

fn torus_material() -> Material {
    Material::glowing(Color::from_hex(0xffd700), 0.3)
}

/// A glowing torus drifting through space; clicks on it spray sparks
pub struct DonutEffect {
    path: FloatingPath,
    position: Vec3,
    pool: ParticlePool,
    handles: HandleAllocator,
    torus_handle: VisualHandle,
    particle_handles: HashMap<ParticleId, VisualHandle>,
    particle_material: Material,
}

impl DonutEffect {
    pub fn new(config: &SimConfig) -> Self {
        let path = FloatingPath::default();
        let emitter = ParticleEmitter::new(config.particles, config.rng(3));
        let mut handles = HandleAllocator::new();
        let torus_handle = handles.allocate();

        Self {
            position: path.position_at(0.0),
            path,
            pool: ParticlePool::new(emitter),
            handles,
            torus_handle,
            particle_handles: HashMap::new(),
            particle_material: particle_material(),
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    pub fn target(&self) -> TorusTarget {
        TorusTarget {
            center: self.position,
            rotation: Quat::IDENTITY,
            scale: TORUS_SCALE,
            radius: TORUS_RADIUS,
            tube: TORUS_TUBE,
        }
    }
}

impl Effect for DonutEffect {
    fn name(&self) -> &str {
        "donut"
    }

    fn setup(&mut self, stage: &mut dyn Stage) {
        let material = torus_material();
        stage.add(
            self.torus_handle,
            Visual {
                shape: Shape::Torus {
                    radius: TORUS_RADIUS,
                    tube: TORUS_TUBE,
                },
                instance: InstanceData::new(self.position, Vec3::ZERO, Vec3::splat(TORUS_SCALE))
                    .with_material(&material),
                material,
            },
        );
    }

    fn handle(&mut self, input: Input, stage: &mut dyn Stage) -> Vec<Signal> {
        let Input::Pointer(ray) = input else {
            return Vec::new();
        };
        let Some(origin) = self.target().hit(&ray) else {
            return Vec::new();
        };

        let fresh = self.pool.burst(origin);
        for particle in fresh {
            let handle = self.handles.allocate();
            stage.add(handle, particle_visual(particle));
            self.particle_handles.insert(particle.id, handle);
        }
        vec![Signal::Burst {
            origin,
            count: fresh.len(),
        }]
    }

    fn step(&mut self, frame: &FrameInfo, stage: &mut dyn Stage) {
        self.position = self.path.position_at(frame.time);
        stage.set_transform(
            self.torus_handle,
            InstanceData::new(self.position, Vec3::ZERO, Vec3::splat(TORUS_SCALE))
                .with_material(&torus_material()),
        );

        for particle in self.pool.step() {
            if let Some(handle) = self.particle_handles.remove(&particle.id) {
                stage.remove(handle);
            }
        }

        for particle in self.pool.particles() {
            if let Some(&handle) = self.particle_handles.get(&particle.id) {
                let material = &self.particle_material;
                stage.set_transform(handle, particle_instance(particle, material));
                stage.set_material(
                    handle,
                    MaterialUpdate {
                        opacity: particle.opacity(),
                        ..MaterialUpdate::from_material(material)
                    },
                );
            }
        }
    }

    fn snapshot(&self) -> EffectSnapshot {
        EffectSnapshot {
            name: self.name().to_string(),
            particles: Some(self.pool.len()),
            ..EffectSnapshot::default()
        }
    }

    /// A point on the ring itself; the centre is the hole
    fn focus(&self) -> Vec3 {
        self.position + Vec3::X * TORUS_RADIUS * TORUS_SCALE
    }

    /// Slow horizontal orbit around the focus point
    fn camera(&self, time: f32, aspect: f32) -> Camera {
        Camera::orbiting(self.focus(), ORBIT_RADIUS, time * ORBIT_RATE, aspect)
    }
}
