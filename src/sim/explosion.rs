//! Click-to-destroy gate around a model.
//!
//! Each interaction grows the model; the `threshold`-th interaction, or an
//! explicit detonation, shatters it exactly once. `Exploded` is terminal.

use glam::Vec3;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::ops::Range;

use super::debris::{DebrisField, DebrisParams};
use super::fragment::{fragment_model, FragmentOptions};
use crate::scene::SceneNode;

/// Presentation change requested when the model is destroyed
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Background color, `0xRRGGBB`
    pub background: u32,
    pub headline: String,
    pub subline: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: 0xff0000,
            headline: "YOU DEMON!".to_string(),
            subline: "Even satan feels disgusted by your behaviour.".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplosionParams {
    /// Interactions needed to explode
    pub threshold: u32,
    /// Scale multiplier applied on every interaction
    pub scale_factor: f32,
    /// Uniform scale the model starts with
    pub initial_scale: f32,
    /// Where the model root is placed
    pub model_offset: Vec3,
    /// Per-step Y rotation of the intact model
    pub model_spin: f32,
    pub theme: Theme,
}

impl Default for ExplosionParams {
    fn default() -> Self {
        Self {
            threshold: 5,
            scale_factor: 1.5,
            initial_scale: 5.0,
            model_offset: Vec3::new(0.0, -1.0, 0.0),
            model_spin: 0.01,
            theme: Theme::default(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum ExplosionState {
    Idle,
    Escalating { clicks: u32 },
    Exploded,
}

/// What an input did to the machine
#[derive(Clone, Debug, PartialEq)]
pub enum Transition {
    Escalated { clicks: u32, scale: f32 },
    Exploded(Detonation),
    /// Input arrived after the explosion
    Ignored,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Detonation {
    /// Indices of the new fragments in the debris field
    pub fragments: Range<usize>,
    pub theme: Theme,
}

pub struct ExplosionMachine {
    params: ExplosionParams,
    fragment_options: FragmentOptions,
    debris_params: DebrisParams,
    state: ExplosionState,
    model: SceneNode,
    scale: f32,
    debris: DebrisField,
    rng: StdRng,
}

impl ExplosionMachine {
    pub fn new(
        mut model: SceneNode,
        params: ExplosionParams,
        fragment_options: FragmentOptions,
        debris_params: DebrisParams,
        rng: StdRng,
    ) -> Self {
        let transform = model.transform_mut();
        transform.position = params.model_offset;
        transform.scale = Vec3::splat(params.initial_scale);
        model.set_visible(true);

        Self {
            scale: params.initial_scale,
            params,
            fragment_options,
            debris: DebrisField::new(debris_params.integrator()),
            debris_params,
            state: ExplosionState::Idle,
            model,
            rng,
        }
    }

    pub fn state(&self) -> ExplosionState {
        self.state
    }

    pub fn is_exploded(&self) -> bool {
        self.state == ExplosionState::Exploded
    }

    pub fn model(&self) -> &SceneNode {
        &self.model
    }

    /// Current uniform scale of the model
    pub fn model_scale(&self) -> f32 {
        self.scale
    }

    pub fn debris(&self) -> &DebrisField {
        &self.debris
    }

    pub fn params(&self) -> &ExplosionParams {
        &self.params
    }

    /// A pointer interaction: grow the model, explode on the threshold
    pub fn interact(&mut self) -> Transition {
        let clicks = match self.state {
            ExplosionState::Exploded => return Transition::Ignored,
            ExplosionState::Idle => 1,
            ExplosionState::Escalating { clicks } => clicks + 1,
        };

        self.scale *= self.params.scale_factor;
        self.model.transform_mut().scale = Vec3::splat(self.scale);
        log::info!("interaction {}/{}", clicks, self.params.threshold);

        if clicks >= self.params.threshold {
            self.explode()
        } else {
            self.state = ExplosionState::Escalating { clicks };
            Transition::Escalated {
                clicks,
                scale: self.scale,
            }
        }
    }

    /// Explode now, regardless of the click count
    pub fn detonate(&mut self) -> Transition {
        if self.is_exploded() {
            return Transition::Ignored;
        }
        self.explode()
    }

    fn explode(&mut self) -> Transition {
        let descriptors = fragment_model(&self.model, &self.fragment_options);
        let fragments = self
            .debris
            .launch(descriptors, &self.debris_params, &mut self.rng);
        self.model.set_visible(false);
        self.state = ExplosionState::Exploded;

        log::info!("model shattered into {} fragments", fragments.len());
        Transition::Exploded(Detonation {
            fragments,
            theme: self.params.theme.clone(),
        })
    }

    /// Spin the intact model, or move the debris once exploded
    pub fn step(&mut self) {
        if self.is_exploded() {
            self.debris.step();
        } else {
            self.model.transform_mut().rotation.y += self.params.model_spin;
        }
    }
}
