mod aabb;
mod color;
mod ray;

pub use aabb::AABB;
pub use color::Color;
pub use ray::{intersect_aabb, Ray};

use glam::Vec3;

/// Replace non-finite components with zero
pub fn finite_or_zero(v: Vec3) -> Vec3 {
    let clean = |c: f32| if c.is_finite() { c } else { 0.0 };
    Vec3::new(clean(v.x), clean(v.y), clean(v.z))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finite_or_zero() {
        let v = Vec3::new(f32::NAN, 2.0, f32::INFINITY);
        assert_eq!(finite_or_zero(v), Vec3::new(0.0, 2.0, 0.0));
    }
}
