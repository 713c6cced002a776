//! Page effects built from the simulation components.
//!
//! An effect owns its components, turns host input into component calls and
//! mirrors component state onto a [`Stage`] after every step.

pub mod common;
pub mod donut;
pub mod gallery;
pub mod landing;

use glam::Vec3;
use serde::Serialize;

use crate::camera::Camera;
use crate::frame::FrameInfo;
use crate::math::Ray;
use crate::sim::{ExplosionState, Theme};
use crate::stage::Stage;

pub use donut::DonutEffect;
pub use gallery::GalleryEffect;
pub use landing::LandingEffect;

pub const DEFAULT_CAMERA_POSITION: Vec3 = Vec3::new(0.0, 0.0, 10.0);

/// Host input, already projected into the scene
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Input {
    /// A click, as a picking ray from the camera
    Pointer(Ray),
    /// The page's "explode" button
    Detonate,
}

/// Outward notifications for the presentation layer
#[derive(Clone, Debug, PartialEq)]
pub enum Signal {
    Escalated { clicks: u32, scale: f32 },
    Exploded(Theme),
    Burst { origin: Vec3, count: usize },
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct EffectSnapshot {
    pub name: String,
    pub explosion: Option<ExplosionSnapshot>,
    pub particles: Option<usize>,
    pub bouncer: Option<BouncerSnapshot>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExplosionSnapshot {
    pub state: ExplosionState,
    pub model_scale: f32,
    pub model_visible: bool,
    pub fragments: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BouncerSnapshot {
    pub color_index: usize,
    pub color: u32,
    pub position: Vec3,
}

/// One page's worth of animated content
pub trait Effect {
    fn name(&self) -> &str;

    /// Register the initial visuals
    fn setup(&mut self, stage: &mut dyn Stage);

    fn handle(&mut self, input: Input, stage: &mut dyn Stage) -> Vec<Signal>;

    /// Advance one fixed simulation step
    fn step(&mut self, frame: &FrameInfo, stage: &mut dyn Stage);

    fn snapshot(&self) -> EffectSnapshot;

    /// Where a scripted click should aim
    fn focus(&self) -> Vec3 {
        Vec3::ZERO
    }

    /// Viewpoint at `time` seconds, looking at [`Effect::focus`]
    fn camera(&self, _time: f32, aspect: f32) -> Camera {
        Camera::new(DEFAULT_CAMERA_POSITION, self.focus(), aspect)
    }
}
