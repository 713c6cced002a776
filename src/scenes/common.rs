use glam::Vec3;

use crate::math::Color;
use crate::scene::{Geometry, Group, Material, Mesh, SceneNode, Transform};
use crate::sim::{Fragment, Particle};
use crate::stage::{InstanceData, Shape, Visual};

pub const PARTICLE_RADIUS: f32 = 0.2;

/// Stand-in model used when no glTF file is supplied: a small pedestal
/// figure, roughly unit height, made of three meshes.
pub fn default_model() -> SceneNode {
    let stone = Material::standard(Color::from_hex(0x8a8a8a));
    let gold = Material::glowing(Color::from_hex(0xffd700), 0.2);

    let base = Mesh::new(Geometry::cuboid(Vec3::new(0.4, 0.1, 0.4)), stone.clone())
        .named("pedestal")
        .at(Transform::from_position(Vec3::new(0.0, 0.05, 0.0)));
    let body = Mesh::new(Geometry::cuboid(Vec3::new(0.2, 0.35, 0.15)), stone)
        .named("body")
        .at(Transform::from_position(Vec3::new(0.0, 0.275, 0.0)));
    let head = Mesh::new(Geometry::cuboid(Vec3::splat(0.14)), gold)
        .named("head")
        .at(Transform::from_position(Vec3::new(0.0, 0.52, 0.0)));

    let mut group = Group::new(vec![base.into(), body.into(), head.into()]);
    group.name = Some("model".to_string());
    SceneNode::Group(group)
}

pub fn node_instance(node: &SceneNode) -> InstanceData {
    let transform = node.transform();
    InstanceData::new(transform.position, transform.rotation, transform.scale)
}

pub fn fragment_visual(fragment: &Fragment) -> Visual {
    Visual {
        shape: Shape::Cuboid {
            size: fragment.size,
        },
        material: fragment.material.clone(),
        instance: fragment_instance(fragment),
    }
}

pub fn fragment_instance(fragment: &Fragment) -> InstanceData {
    InstanceData::new(fragment.body.position, fragment.body.rotation, Vec3::ONE)
        .with_material(&fragment.material)
}

pub fn particle_material() -> Material {
    Material {
        transparent: true,
        ..Material::glowing(Color::WHITE, 0.6)
    }
}

pub fn particle_visual(particle: &Particle) -> Visual {
    let material = particle_material();
    Visual {
        shape: Shape::Sphere {
            radius: PARTICLE_RADIUS,
        },
        instance: particle_instance(particle, &material),
        material,
    }
}

pub fn particle_instance(particle: &Particle, material: &Material) -> InstanceData {
    let mut instance =
        InstanceData::new(particle.body.position, Vec3::ZERO, Vec3::ONE).with_material(material);
    instance.opacity = particle.opacity();
    instance
}
