use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::body::KineticBody;
use super::debris::symmetric_vec3;
use crate::math::{finite_or_zero, Color};

pub const DEFAULT_PALETTE: [u32; 6] = [0xffa500, 0xffd700, 0xff69b4, 0xff1493, 0x00ff00, 0x00ffff];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BouncerParams {
    /// Half-width of the cube the body is kept inside
    pub boundary: f32,
    /// Colors cycled on every reflection, as `0xRRGGBB`
    pub palette: Vec<u32>,
    /// Launch velocity is uniform in `[-max, max]` on X and Y
    pub max_launch_speed: f32,
    /// Per-step rotation about X and Y
    pub spin: f32,
}

impl Default for BouncerParams {
    fn default() -> Self {
        Self {
            boundary: 2.5,
            palette: DEFAULT_PALETTE.to_vec(),
            max_launch_speed: 0.04,
            spin: 0.02,
        }
    }
}

impl BouncerParams {
    pub fn colors(&self) -> Vec<Color> {
        self.palette.iter().map(|&hex| Color::from_hex(hex)).collect()
    }

    /// A body at the origin moving in the XY plane
    pub fn spawn<R: Rng + ?Sized>(&self, rng: &mut R) -> BouncingBody {
        let mut velocity = symmetric_vec3(rng, self.max_launch_speed);
        velocity.z = 0.0;
        let body = KineticBody::new(Vec3::ZERO, velocity).with_spin(Vec3::new(self.spin, self.spin, 0.0));
        BouncingBody::new(body, self.colors())
    }
}

/// Body confined to a cube, cycling its color on every reflection
#[derive(Clone, Debug)]
pub struct BouncingBody {
    pub body: KineticBody,
    color_index: usize,
    palette: Vec<Color>,
}

impl BouncingBody {
    /// An empty palette falls back to white so the index is always valid
    pub fn new(body: KineticBody, palette: Vec<Color>) -> Self {
        let palette = if palette.is_empty() { vec![Color::WHITE] } else { palette };
        Self {
            body,
            color_index: 0,
            palette,
        }
    }

    pub fn color_index(&self) -> usize {
        self.color_index
    }

    /// Base and emissive color are always this value
    pub fn color(&self) -> Color {
        self.palette[self.color_index]
    }

    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    fn advance_color(&mut self) {
        self.color_index = (self.color_index + 1) % self.palette.len();
    }
}

/// Straight-line motion with velocity reflection at `±boundary`
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bouncer {
    pub boundary: f32,
}

impl Bouncer {
    pub fn new(boundary: f32) -> Self {
        Self { boundary }
    }

    /// Move one step, then reflect every axis past the boundary.
    /// Each reflected axis advances the palette once, so a corner hit advances
    /// it twice. Returns the number of reflections.
    pub fn step(&self, bouncing: &mut BouncingBody) -> u32 {
        let body = &mut bouncing.body;
        body.position = finite_or_zero(body.position + body.velocity);
        if let Some(spin) = body.angular_velocity {
            body.rotation += spin;
        }

        let mut reflections = 0;
        for axis in 0..3 {
            if bouncing.body.position[axis].abs() > self.boundary {
                bouncing.body.velocity[axis] = -bouncing.body.velocity[axis];
                bouncing.advance_color();
                reflections += 1;
            }
        }
        reflections
    }
}
