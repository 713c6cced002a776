//! Pointer picking against simple target surfaces.
//!
//! This is the raycasting side of pointer input: the host turns a screen
//! coordinate into a [`Ray`], a target reports the first surface point hit.
//! The simulation itself only ever sees the resulting point.

use glam::{Quat, Vec3};

use crate::math::{intersect_aabb, Ray, AABB};

pub trait HitTest {
    /// Nearest surface point in front of the ray origin
    fn hit(&self, ray: &Ray) -> Option<Vec3>;
}

#[derive(Copy, Clone, Debug)]
pub struct BoxTarget {
    pub bounds: AABB,
}

impl HitTest for BoxTarget {
    fn hit(&self, ray: &Ray) -> Option<Vec3> {
        let t = intersect_aabb(ray.origin, ray.direction, self.bounds.min, self.bounds.max);
        (t >= 0.0).then(|| ray.at(t))
    }
}

#[derive(Copy, Clone, Debug)]
pub struct SphereTarget {
    pub center: Vec3,
    pub radius: f32,
}

impl SphereTarget {
    fn distance(&self, ray: &Ray) -> Option<f32> {
        let oc = ray.origin - self.center;
        let a = ray.direction.dot(ray.direction);
        let half_b = oc.dot(ray.direction);
        let c = oc.dot(oc) - self.radius * self.radius;

        let discriminant = half_b * half_b - a * c;
        if discriminant < 0.0 || a == 0.0 {
            return None;
        }

        let sqrt_d = discriminant.sqrt();
        [(-half_b - sqrt_d) / a, (-half_b + sqrt_d) / a]
            .into_iter()
            .find(|&t| t > 1e-4)
    }
}

impl HitTest for SphereTarget {
    fn hit(&self, ray: &Ray) -> Option<Vec3> {
        self.distance(ray).map(|t| ray.at(t))
    }
}

/// Torus lying in its local XY plane, uniformly scaled
#[derive(Copy, Clone, Debug)]
pub struct TorusTarget {
    pub center: Vec3,
    pub rotation: Quat,
    pub scale: f32,
    pub radius: f32,
    pub tube: f32,
}

const MARCH_STEPS: usize = 256;
const MARCH_EPSILON: f32 = 1e-4;
const MARCH_FAR: f32 = 1_000.0;

impl TorusTarget {
    fn signed_distance(&self, p: Vec3) -> f32 {
        let ring = p.truncate().length() - self.radius;
        (ring * ring + p.z * p.z).sqrt() - self.tube
    }
}

impl HitTest for TorusTarget {
    fn hit(&self, ray: &Ray) -> Option<Vec3> {
        if self.scale <= 0.0 || ray.direction == Vec3::ZERO {
            return None;
        }

        // Skip empty space up to the bounding sphere before marching
        let bound = SphereTarget {
            center: self.center,
            radius: (self.radius + self.tube) * self.scale,
        };
        let inside = (ray.origin - self.center).length() <= bound.radius;
        let start = if inside { 0.0 } else { bound.distance(ray)? };

        let inverse = self.rotation.inverse();
        let origin = inverse * (ray.at(start) - self.center) / self.scale;
        let direction = inverse * ray.direction;

        let mut t = 0.0;
        for _ in 0..MARCH_STEPS {
            let d = self.signed_distance(origin + direction * t);
            if d < MARCH_EPSILON {
                return Some(ray.at(start + t * self.scale));
            }
            t += d;
            if t * self.scale > MARCH_FAR {
                break;
            }
        }
        None
    }
}
