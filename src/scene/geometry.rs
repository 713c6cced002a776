use glam::Vec3;
use std::f32::consts::TAU;

use crate::math::AABB;

/// Vertex positions in mesh-local space
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Geometry {
    pub positions: Vec<Vec3>,
}

impl Geometry {
    pub fn from_positions(positions: Vec<Vec3>) -> Self {
        Self { positions }
    }

    /// Box centred on the origin
    pub fn cuboid(size: Vec3) -> Self {
        let half = size * 0.5;
        Self {
            positions: AABB::new(-half, half).corners().to_vec(),
        }
    }

    /// Torus lying in the XY plane, ring radius `radius`, tube radius `tube`
    pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> Self {
        let radial_segments = radial_segments.max(3);
        let tubular_segments = tubular_segments.max(3);
        let mut positions = Vec::with_capacity(((radial_segments + 1) * (tubular_segments + 1)) as usize);

        for j in 0..=radial_segments {
            let v = j as f32 / radial_segments as f32 * TAU;
            for i in 0..=tubular_segments {
                let u = i as f32 / tubular_segments as f32 * TAU;
                let ring = radius + tube * v.cos();
                positions.push(Vec3::new(ring * u.cos(), ring * u.sin(), tube * v.sin()));
            }
        }

        Self { positions }
    }

    /// Cone along Y with its apex at `+height / 2`
    pub fn cone(radius: f32, height: f32, radial_segments: u32) -> Self {
        let radial_segments = radial_segments.max(3);
        let half = height * 0.5;
        let mut positions = vec![Vec3::new(0.0, half, 0.0)];
        for i in 0..radial_segments {
            let theta = i as f32 / radial_segments as f32 * TAU;
            positions.push(Vec3::new(radius * theta.sin(), -half, radius * theta.cos()));
        }
        Self { positions }
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Local bounds, `None` for an empty vertex list
    pub fn bounds(&self) -> Option<AABB> {
        AABB::from_points(self.positions.iter().copied())
    }
}
