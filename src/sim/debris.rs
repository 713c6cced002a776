use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::body::KineticBody;
use super::fragment::FragmentDescriptor;
use super::integrator::Integrator;
use crate::scene::Material;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebrisParams {
    pub gravity: f32,
    pub damping: f32,
    /// Launch velocity is uniform in `[-max, max]` per axis
    pub max_launch_speed: f32,
    /// Spin is uniform in `[-max, max]` per axis
    pub max_spin: f32,
}

impl Default for DebrisParams {
    fn default() -> Self {
        Self {
            gravity: 0.02,
            damping: 0.99,
            max_launch_speed: 2.0,
            max_spin: 0.075,
        }
    }
}

impl DebrisParams {
    pub fn integrator(&self) -> Integrator {
        Integrator::new(self.gravity, self.damping)
    }
}

/// A launched fragment. Fragments are never removed.
#[derive(Clone, Debug)]
pub struct Fragment {
    pub body: KineticBody,
    pub size: Vec3,
    pub material: Material,
}

/// Owns every fragment produced by an explosion and moves them each step
#[derive(Debug, Default)]
pub struct DebrisField {
    integrator: Integrator,
    fragments: Vec<Fragment>,
}

impl DebrisField {
    pub fn new(integrator: Integrator) -> Self {
        Self {
            integrator,
            fragments: Vec::new(),
        }
    }

    /// Give each descriptor a random launch velocity and spin, then take
    /// ownership of it. Returns the range of indices just added.
    pub fn launch<R: Rng + ?Sized>(
        &mut self,
        descriptors: Vec<FragmentDescriptor>,
        params: &DebrisParams,
        rng: &mut R,
    ) -> std::ops::Range<usize> {
        let start = self.fragments.len();
        for descriptor in descriptors {
            let velocity = symmetric_vec3(rng, params.max_launch_speed);
            let spin = symmetric_vec3(rng, params.max_spin);
            self.fragments.push(Fragment {
                body: KineticBody::new(descriptor.position, velocity)
                    .with_rotation(descriptor.rotation)
                    .with_spin(spin),
                size: descriptor.size,
                material: descriptor.material,
            });
        }
        start..self.fragments.len()
    }

    pub fn step(&mut self) {
        self.integrator
            .integrate_all(self.fragments.iter_mut().map(|f| &mut f.body));
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

/// Uniform sample in `[-extent, extent]` per axis
pub(crate) fn symmetric_vec3<R: Rng + ?Sized>(rng: &mut R, extent: f32) -> Vec3 {
    if extent <= 0.0 {
        return Vec3::ZERO;
    }
    Vec3::new(
        rng.gen_range(-extent..=extent),
        rng.gen_range(-extent..=extent),
        rng.gen_range(-extent..=extent),
    )
}
