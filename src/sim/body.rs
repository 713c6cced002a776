use glam::Vec3;
use serde::Serialize;

/// Anything that moves under per-step integration.
///
/// Velocity is expressed in units per step, not per second. Angular velocity,
/// when present, is added to the Euler rotation every step and never damped.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize)]
pub struct KineticBody {
    pub position: Vec3,
    pub velocity: Vec3,
    pub rotation: Vec3,
    pub angular_velocity: Option<Vec3>,
}

impl KineticBody {
    pub fn new(position: Vec3, velocity: Vec3) -> Self {
        Self {
            position,
            velocity,
            rotation: Vec3::ZERO,
            angular_velocity: None,
        }
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_spin(mut self, angular_velocity: Vec3) -> Self {
        self.angular_velocity = Some(angular_velocity);
        self
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }
}
