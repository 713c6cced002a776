//! Decorative motion that needs no physics: star drift, spinning, floating.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldParams {
    pub count: usize,
    /// Side length of the cube the stars are scattered in
    pub extent: f32,
    /// Per-step rotation of the whole field
    pub spin: Vec3,
}

impl Default for StarfieldParams {
    fn default() -> Self {
        Self {
            count: 2000,
            extent: 200.0,
            spin: Vec3::new(0.00005, 0.00008, 0.0),
        }
    }
}

/// Static point cloud that rotates as a whole
#[derive(Clone, Debug)]
pub struct Starfield {
    points: Vec<Vec3>,
    spinner: Spinner,
}

impl Starfield {
    pub fn new<R: Rng + ?Sized>(params: &StarfieldParams, rng: &mut R) -> Self {
        let points = (0..params.count)
            .map(|_| {
                Vec3::new(
                    rng.gen::<f32>() - 0.5,
                    rng.gen::<f32>() - 0.5,
                    rng.gen::<f32>() - 0.5,
                ) * params.extent
            })
            .collect();
        Self {
            points,
            spinner: Spinner::new(params.spin),
        }
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn rotation(&self) -> Vec3 {
        self.spinner.rotation
    }

    pub fn step(&mut self) {
        self.spinner.step();
    }
}

/// Constant per-step Euler rotation
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Spinner {
    pub rotation: Vec3,
    pub spin: Vec3,
}

impl Spinner {
    pub fn new(spin: Vec3) -> Self {
        Self {
            rotation: Vec3::ZERO,
            spin,
        }
    }

    pub fn step(&mut self) {
        self.rotation += self.spin;
    }
}

/// Lissajous drift driven by elapsed seconds
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FloatingPath {
    pub amplitude: f32,
    pub frequency: Vec3,
}

impl FloatingPath {
    pub fn position_at(&self, time: f32) -> Vec3 {
        Vec3::new(
            (time * self.frequency.x).sin(),
            (time * self.frequency.y).cos(),
            (time * self.frequency.z).sin(),
        ) * self.amplitude
    }
}

impl Default for FloatingPath {
    fn default() -> Self {
        Self {
            amplitude: 5.0,
            frequency: Vec3::new(1.0, 0.7, 0.5),
        }
    }
}

/// Vertical sine bob driven by elapsed seconds
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bob {
    pub amplitude: f32,
    pub frequency: f32,
}

impl Bob {
    pub fn offset_at(&self, time: f32) -> f32 {
        (time * self.frequency).sin() * self.amplitude
    }
}

impl Default for Bob {
    fn default() -> Self {
        Self {
            amplitude: 0.3,
            frequency: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn stars_fill_the_cube() {
        let mut rng = StdRng::seed_from_u64(2);
        let field = Starfield::new(&StarfieldParams::default(), &mut rng);
        assert_eq!(field.points().len(), 2000);
        assert!(field.points().iter().all(|p| p.abs().max_element() <= 100.0));
    }

    #[test]
    fn starfield_rotation_accumulates() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut field = Starfield::new(&StarfieldParams::default(), &mut rng);
        for _ in 0..1000 {
            field.step();
        }
        assert!((field.rotation().y - 0.08).abs() < 1e-4);
    }

    #[test]
    fn floating_path_starts_at_top() {
        let path = FloatingPath::default();
        assert_eq!(path.position_at(0.0), Vec3::new(0.0, 5.0, 0.0));
    }

    #[test]
    fn bob_is_bounded() {
        let bob = Bob::default();
        for i in 0..100 {
            assert!(bob.offset_at(i as f32 * 0.1).abs() <= 0.3 + 1e-6);
        }
    }
}
