use glam::Vec3;

use super::common::{fragment_instance, fragment_visual, node_instance};
use super::{Effect, EffectSnapshot, ExplosionSnapshot, Input, Signal};
use crate::config::SimConfig;
use crate::frame::FrameInfo;
use crate::math::Color;
use crate::scene::{Material, SceneNode};
use crate::sim::{ExplosionMachine, Starfield, Transition};
use crate::stage::{HandleAllocator, InstanceData, Shape, Stage, Visual, VisualHandle};

const STAR_SIZE: f32 = 0.3;

/// Landing page: a spinning model that grows on every click and shatters on
/// the last one, in front of a slowly turning starfield
pub struct LandingEffect {
    machine: ExplosionMachine,
    starfield: Starfield,
    handles: HandleAllocator,
    model_handle: VisualHandle,
    star_handle: VisualHandle,
    fragment_handles: Vec<VisualHandle>,
}

impl LandingEffect {
    pub fn new(model: SceneNode, config: &SimConfig) -> Self {
        let machine = ExplosionMachine::new(
            model,
            config.explosion.clone(),
            config.fragment,
            config.debris,
            config.rng(1),
        );
        let starfield = Starfield::new(&config.starfield, &mut config.rng(2));

        let mut handles = HandleAllocator::new();
        let star_handle = handles.allocate();
        let model_handle = handles.allocate();

        Self {
            machine,
            starfield,
            handles,
            model_handle,
            star_handle,
            fragment_handles: Vec::new(),
        }
    }

    pub fn machine(&self) -> &ExplosionMachine {
        &self.machine
    }

    pub fn model_handle(&self) -> VisualHandle {
        self.model_handle
    }

    pub fn fragment_handles(&self) -> &[VisualHandle] {
        &self.fragment_handles
    }

    fn apply(&mut self, transition: Transition, stage: &mut dyn Stage) -> Vec<Signal> {
        match transition {
            Transition::Ignored => Vec::new(),
            Transition::Escalated { clicks, scale } => {
                stage.set_transform(self.model_handle, node_instance(self.machine.model()));
                vec![Signal::Escalated { clicks, scale }]
            }
            Transition::Exploded(detonation) => {
                for fragment in &self.machine.debris().fragments()[detonation.fragments] {
                    let handle = self.handles.allocate();
                    stage.add(handle, fragment_visual(fragment));
                    self.fragment_handles.push(handle);
                }
                stage.set_visible(self.model_handle, false);
                stage.apply_theme(&detonation.theme);
                vec![Signal::Exploded(detonation.theme)]
            }
        }
    }
}

impl Effect for LandingEffect {
    fn name(&self) -> &str {
        "landing"
    }

    fn setup(&mut self, stage: &mut dyn Stage) {
        stage.add(
            self.star_handle,
            Visual {
                shape: Shape::Points {
                    positions: self.starfield.points().to_vec(),
                    size: STAR_SIZE,
                },
                material: Material {
                    opacity: 0.8,
                    transparent: true,
                    ..Material::standard(Color::WHITE)
                },
                instance: InstanceData::new(Vec3::ZERO, Vec3::ZERO, Vec3::ONE),
            },
        );

        let model = self.machine.model();
        stage.add(
            self.model_handle,
            Visual {
                shape: Shape::Model {
                    name: model.name().unwrap_or("model").to_string(),
                },
                material: Material::default(),
                instance: node_instance(model),
            },
        );
    }

    fn handle(&mut self, input: Input, stage: &mut dyn Stage) -> Vec<Signal> {
        let transition = match input {
            Input::Pointer(_) => self.machine.interact(),
            Input::Detonate => self.machine.detonate(),
        };
        self.apply(transition, stage)
    }

    fn step(&mut self, _frame: &FrameInfo, stage: &mut dyn Stage) {
        self.machine.step();
        self.starfield.step();
        stage.set_transform(
            self.star_handle,
            InstanceData::new(Vec3::ZERO, self.starfield.rotation(), Vec3::ONE),
        );

        if self.machine.is_exploded() {
            let fragments = self.machine.debris().fragments();
            for (handle, fragment) in self.fragment_handles.iter().zip(fragments) {
                stage.set_transform(*handle, fragment_instance(fragment));
            }
        } else {
            stage.set_transform(self.model_handle, node_instance(self.machine.model()));
        }
    }

    fn snapshot(&self) -> EffectSnapshot {
        EffectSnapshot {
            name: self.name().to_string(),
            explosion: Some(ExplosionSnapshot {
                state: self.machine.state(),
                model_scale: self.machine.model_scale(),
                model_visible: self.machine.model().is_visible(),
                fragments: self.machine.debris().len(),
            }),
            ..EffectSnapshot::default()
        }
    }
}
