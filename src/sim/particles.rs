//! Short-lived sparks: burst emission, per-step fade and removal.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, PI, TAU};

use super::body::KineticBody;
use crate::math::finite_or_zero;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleParams {
    /// Particles per burst
    pub count: usize,
    pub min_speed: f32,
    pub max_speed: f32,
    /// Starting lifetime in seconds
    pub lifetime: f32,
    /// Lifetime removed per step
    pub decay: f32,
    /// Velocity multiplier per step
    pub damping: f32,
}

impl Default for ParticleParams {
    fn default() -> Self {
        Self {
            count: 20,
            min_speed: 2.0,
            max_speed: 6.0,
            lifetime: 1.5,
            decay: 0.016,
            damping: 0.98,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ParticleId(pub u64);

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub id: ParticleId,
    pub body: KineticBody,
    pub lifetime: f32,
    pub initial_lifetime: f32,
}

impl Particle {
    /// Fades linearly from 1 at birth to 0 at expiry
    pub fn opacity(&self) -> f32 {
        if self.initial_lifetime <= 0.0 {
            return 0.0;
        }
        (self.lifetime / self.initial_lifetime).clamp(0.0, 1.0)
    }

    pub fn is_expired(&self) -> bool {
        self.lifetime <= 0.0
    }
}

/// Samples bursts and advances particles. Owns its random source and the
/// id counter so bursts from one emitter never share ids.
#[derive(Debug)]
pub struct ParticleEmitter {
    params: ParticleParams,
    rng: StdRng,
    next_id: u64,
}

impl ParticleEmitter {
    pub fn new(params: ParticleParams, rng: StdRng) -> Self {
        Self {
            params,
            rng,
            next_id: 0,
        }
    }

    pub fn params(&self) -> &ParticleParams {
        &self.params
    }

    /// `count` particles at `origin`, each flying in a uniformly sampled
    /// azimuth/elevation direction at a uniformly sampled speed
    pub fn emit(&mut self, origin: Vec3, count: usize) -> Vec<Particle> {
        let (min_speed, max_speed) = (self.params.min_speed, self.params.max_speed.max(self.params.min_speed));
        let mut particles = Vec::with_capacity(count);

        for _ in 0..count {
            let azimuth = self.rng.gen_range(0.0..TAU);
            let elevation = self.rng.gen::<f32>() * PI - FRAC_PI_2;
            let speed = if max_speed > min_speed {
                self.rng.gen_range(min_speed..max_speed)
            } else {
                min_speed
            };

            let velocity = Vec3::new(
                elevation.cos() * azimuth.cos(),
                elevation.sin(),
                elevation.cos() * azimuth.sin(),
            ) * speed;

            particles.push(Particle {
                id: ParticleId(self.next_id),
                body: KineticBody::new(origin, velocity),
                lifetime: self.params.lifetime,
                initial_lifetime: self.params.lifetime,
            });
            self.next_id += 1;
        }

        particles
    }

    /// Move, damp and age one particle by a single step
    pub fn advance(&self, particle: &mut Particle) {
        let body = &mut particle.body;
        body.position = finite_or_zero(body.position + body.velocity);
        body.velocity = finite_or_zero(body.velocity * self.params.damping);
        particle.lifetime -= self.params.decay;
    }

    /// Advance every particle and keep the ones still alive
    pub fn step(&self, particles: Vec<Particle>) -> Vec<Particle> {
        self.step_partitioned(particles).0
    }

    /// Advance every particle, split into `(alive, expired)`.
    /// Expiry is judged on the lifetime after this step's decrement.
    pub fn step_partitioned(&self, particles: Vec<Particle>) -> (Vec<Particle>, Vec<Particle>) {
        particles
            .into_iter()
            .map(|mut particle| {
                self.advance(&mut particle);
                particle
            })
            .partition(|particle| !particle.is_expired())
    }
}

/// Live particle set owned by one effect
#[derive(Debug)]
pub struct ParticlePool {
    emitter: ParticleEmitter,
    live: Vec<Particle>,
}

impl ParticlePool {
    pub fn new(emitter: ParticleEmitter) -> Self {
        Self {
            emitter,
            live: Vec::new(),
        }
    }

    /// Emit a configured-size burst; returns the new particles
    pub fn burst(&mut self, origin: Vec3) -> &[Particle] {
        let count = self.emitter.params().count;
        self.burst_n(origin, count)
    }

    pub fn burst_n(&mut self, origin: Vec3, count: usize) -> &[Particle] {
        let start = self.live.len();
        let fresh = self.emitter.emit(origin, count);
        log::debug!("particle burst of {} at {:?}", fresh.len(), origin);
        self.live.extend(fresh);
        &self.live[start..]
    }

    /// Step all particles; returns the ones removed this step
    pub fn step(&mut self) -> Vec<Particle> {
        let (alive, expired) = self.emitter.step_partitioned(std::mem::take(&mut self.live));
        self.live = alive;
        expired
    }

    pub fn particles(&self) -> &[Particle] {
        &self.live
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}
