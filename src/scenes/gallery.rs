use glam::Vec3;

use super::{BouncerSnapshot, Effect, EffectSnapshot, Input, Signal};
use crate::config::SimConfig;
use crate::frame::FrameInfo;
use crate::math::Color;
use crate::scene::Material;
use crate::sim::{Bob, Bouncer, BouncingBody, Spinner};
use crate::stage::{
    HandleAllocator, InstanceData, MaterialUpdate, Shape, Stage, Visual, VisualHandle,
};

const CUBE_SIZE: f32 = 0.3;
const CUBE_SCALE: f32 = 1.5;
const MODEL_SCALE: f32 = 5.0;
const MODEL_OFFSET: Vec3 = Vec3::new(0.0, -0.5, 0.0);

fn pyramid_material() -> Material {
    Material::standard(Color::from_hex(0x438c5c))
}

/// About page: three small boxes, each with its own motion
pub struct GalleryEffect {
    model_spin: Spinner,
    bouncer: Bouncer,
    cube: BouncingBody,
    pyramid_spin: Spinner,
    pyramid_bob: Bob,
    handles: HandleAllocator,
    model_handle: VisualHandle,
    cube_handle: VisualHandle,
    pyramid_handle: VisualHandle,
}

impl GalleryEffect {
    pub fn new(config: &SimConfig) -> Self {
        let mut handles = HandleAllocator::new();
        Self {
            model_spin: Spinner::new(Vec3::new(0.01, 0.01, 0.0)),
            bouncer: Bouncer::new(config.bouncer.boundary),
            cube: config.bouncer.spawn(&mut config.rng(4)),
            pyramid_spin: Spinner::new(Vec3::new(0.005, 0.01, 0.0)),
            pyramid_bob: Bob::default(),
            model_handle: handles.allocate(),
            cube_handle: handles.allocate(),
            pyramid_handle: handles.allocate(),
            handles,
        }
    }

    pub fn cube(&self) -> &BouncingBody {
        &self.cube
    }

    pub fn cube_handle(&self) -> VisualHandle {
        self.cube_handle
    }

    fn cube_material(&self) -> Material {
        Material::glowing(self.cube.color(), 1.0)
    }

    fn cube_instance(&self) -> InstanceData {
        let body = &self.cube.body;
        InstanceData::new(body.position, body.rotation, Vec3::splat(CUBE_SCALE))
            .with_material(&self.cube_material())
    }

    /// Number of visuals this effect registers
    pub fn visual_count(&self) -> usize {
        self.handles.issued() as usize
    }
}

impl Effect for GalleryEffect {
    fn name(&self) -> &str {
        "gallery"
    }

    fn setup(&mut self, stage: &mut dyn Stage) {
        stage.add(
            self.model_handle,
            Visual {
                shape: Shape::Model {
                    name: "model".to_string(),
                },
                material: Material::default(),
                instance: InstanceData::new(MODEL_OFFSET, Vec3::ZERO, Vec3::splat(MODEL_SCALE)),
            },
        );
        stage.add(
            self.cube_handle,
            Visual {
                shape: Shape::Cuboid {
                    size: Vec3::splat(CUBE_SIZE),
                },
                material: self.cube_material(),
                instance: self.cube_instance(),
            },
        );
        let stone = pyramid_material();
        stage.add(
            self.pyramid_handle,
            Visual {
                shape: Shape::Cone {
                    radius: 0.8,
                    height: 1.5,
                },
                instance: InstanceData::new(Vec3::ZERO, Vec3::ZERO, Vec3::ONE).with_material(&stone),
                material: stone,
            },
        );
    }

    fn handle(&mut self, _input: Input, _stage: &mut dyn Stage) -> Vec<Signal> {
        Vec::new()
    }

    fn step(&mut self, frame: &FrameInfo, stage: &mut dyn Stage) {
        self.model_spin.step();
        stage.set_transform(
            self.model_handle,
            InstanceData::new(MODEL_OFFSET, self.model_spin.rotation, Vec3::splat(MODEL_SCALE)),
        );

        if self.bouncer.step(&mut self.cube) > 0 {
            stage.set_material(
                self.cube_handle,
                MaterialUpdate::from_material(&self.cube_material()),
            );
        }
        stage.set_transform(self.cube_handle, self.cube_instance());

        self.pyramid_spin.step();
        let height = self.pyramid_bob.offset_at(frame.time);
        stage.set_transform(
            self.pyramid_handle,
            InstanceData::new(Vec3::new(0.0, height, 0.0), self.pyramid_spin.rotation, Vec3::ONE)
                .with_material(&pyramid_material()),
        );
    }

    fn snapshot(&self) -> EffectSnapshot {
        EffectSnapshot {
            name: self.name().to_string(),
            bouncer: Some(BouncerSnapshot {
                color_index: self.cube.color_index(),
                color: self.cube.color().to_hex(),
                position: self.cube.body.position,
            }),
            ..EffectSnapshot::default()
        }
    }
}
