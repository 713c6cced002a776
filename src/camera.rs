use glam::{Vec2, Vec3};

use crate::math::Ray;

pub const DEFAULT_FOV_Y: f32 = 75.0;

/// Perspective camera used to turn pointer positions into picking rays
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in degrees
    pub fov_y: f32,
    pub aspect: f32,
}

impl Camera {
    pub fn new(position: Vec3, target: Vec3, aspect: f32) -> Self {
        Self {
            position,
            target,
            fov_y: DEFAULT_FOV_Y,
            aspect,
        }
    }

    /// On a horizontal circle of `radius` around `target`, at `angle` radians
    pub fn orbiting(target: Vec3, radius: f32, angle: f32, aspect: f32) -> Self {
        let position = target + Vec3::new(angle.cos() * radius, 0.0, angle.sin() * radius);
        Self::new(position, target, aspect)
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize_or_zero()
    }

    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }

    /// Ray through a normalized device coordinate in `[-1, 1]²`, +Y up
    pub fn ndc_ray(&self, ndc: Vec2) -> Ray {
        let half_height = (self.fov_y.to_radians() * 0.5).tan();
        let half_width = half_height * self.aspect;
        let direction = self.forward()
            + self.right() * ndc.x * half_width
            + self.up() * ndc.y * half_height;
        Ray::new(self.position, direction)
    }

    /// Ray through a pixel, origin top-left
    pub fn screen_ray(&self, x: f32, y: f32, width: f32, height: f32) -> Ray {
        let ndc = Vec2::new(
            (x / width.max(1.0)) * 2.0 - 1.0,
            -(y / height.max(1.0)) * 2.0 + 1.0,
        );
        self.ndc_ray(ndc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centre_pixel_looks_at_target() {
        let camera = Camera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, 4.0 / 3.0);
        let ray = camera.screen_ray(400.0, 300.0, 800.0, 600.0);
        assert!((ray.direction - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn top_edge_points_up() {
        let camera = Camera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, 1.0);
        let ray = camera.screen_ray(50.0, 0.0, 100.0, 100.0);
        assert!(ray.direction.y > 0.0);
        let expected = (DEFAULT_FOV_Y.to_radians() * 0.5).tan();
        assert!((ray.direction.y / -ray.direction.z - expected).abs() < 1e-4);
    }

    #[test]
    fn orbiting_camera_keeps_radius() {
        let camera = Camera::orbiting(Vec3::ZERO, 60.0, 1.2, 1.0);
        assert!((camera.position.length() - 60.0).abs() < 1e-3);
        assert!((camera.forward().length() - 1.0).abs() < 1e-5);
    }
}
