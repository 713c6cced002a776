use serde::{Deserialize, Serialize};

use super::body::KineticBody;
use crate::math::finite_or_zero;

/// Gravity and drag applied per fixed step
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Integrator {
    /// Subtracted from `velocity.y` every step
    pub gravity: f32,
    /// Multiplies the whole velocity every step
    pub damping: f32,
}

impl Integrator {
    pub const DEBRIS: Integrator = Integrator {
        gravity: 0.02,
        damping: 0.99,
    };

    pub fn new(gravity: f32, damping: f32) -> Self {
        Self { gravity, damping }
    }

    /// Advance one body by one step.
    ///
    /// Position moves with the pre-step velocity; gravity and damping only
    /// affect the velocity used on the next step.
    pub fn integrate(&self, body: &mut KineticBody) {
        body.position = finite_or_zero(body.position + body.velocity);

        let mut velocity = body.velocity;
        velocity.y -= self.gravity;
        velocity *= self.damping;
        body.velocity = finite_or_zero(velocity);

        if let Some(spin) = body.angular_velocity {
            body.rotation += spin;
        }
    }

    pub fn integrate_all<'a, I>(&self, bodies: I)
    where
        I: IntoIterator<Item = &'a mut KineticBody>,
    {
        for body in bodies {
            self.integrate(body);
        }
    }
}

impl Default for Integrator {
    fn default() -> Self {
        Self::DEBRIS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn position_uses_velocity_before_gravity() {
        let mut body = KineticBody::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));
        Integrator::DEBRIS.integrate(&mut body);

        assert_eq!(body.position, Vec3::new(1.0, 0.0, 0.0));
        assert!((body.velocity.x - 0.99).abs() < 1e-6);
        assert!((body.velocity.y + 0.02 * 0.99).abs() < 1e-6);
    }

    #[test]
    fn spin_is_not_damped() {
        let spin = Vec3::new(0.05, -0.02, 0.01);
        let mut body = KineticBody::new(Vec3::ZERO, Vec3::ZERO).with_spin(spin);
        for _ in 0..10 {
            Integrator::DEBRIS.integrate(&mut body);
        }
        assert_eq!(body.angular_velocity, Some(spin));
        assert!((body.rotation - spin * 10.0).length() < 1e-5);
    }

    #[test]
    fn body_without_spin_keeps_rotation() {
        let rotation = Vec3::new(0.0, 1.0, 0.0);
        let mut body = KineticBody::new(Vec3::ZERO, Vec3::ONE).with_rotation(rotation);
        Integrator::DEBRIS.integrate(&mut body);
        assert_eq!(body.rotation, rotation);
    }

    #[test]
    fn non_finite_values_are_cleared() {
        let mut body = KineticBody::new(Vec3::ZERO, Vec3::new(f32::INFINITY, 1.0, f32::NAN));
        Integrator::DEBRIS.integrate(&mut body);
        assert!(body.is_finite());
    }
}
