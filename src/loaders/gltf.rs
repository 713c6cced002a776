use anyhow::{bail, Context, Result};
use glam::{EulerRot, Quat, Vec3};
use std::path::Path;

use crate::math::Color;
use crate::scene::{
    CameraNode, Geometry, Group, Material, MaterialSlot, Mesh, SceneNode, Transform,
};

/// Loads a glTF file into a scene tree rooted at a group named after the file
pub fn load_model(path: impl AsRef<Path>) -> Result<SceneNode> {
    let path = path.as_ref();
    log::info!("Loading glTF file: {:?}", path);

    let (document, buffers, _images) =
        gltf::import(path).with_context(|| format!("Failed to load glTF file: {:?}", path))?;

    let scene = match document.default_scene() {
        Some(scene) => scene,
        None => match document.scenes().next() {
            Some(scene) => scene,
            None => bail!("glTF file has no scenes: {:?}", path),
        },
    };

    let children = scene
        .nodes()
        .map(|node| convert_node(&node, &buffers))
        .collect::<Result<Vec<_>>>()?;

    let mut root = Group::new(children);
    root.name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned());
    let root = SceneNode::Group(root);

    let meshes = root.world_meshes().len();
    if meshes == 0 {
        log::warn!("No geometry found in glTF file: {:?}", path);
    }
    log::debug!(
        "glTF loaded: {} nodes, {} meshes in scene",
        document.nodes().count(),
        meshes
    );
    Ok(root)
}

fn convert_transform(node: &gltf::Node) -> Transform {
    let (translation, rotation, scale) = node.transform().decomposed();
    let (x, y, z) = Quat::from_array(rotation).to_euler(EulerRot::XYZ);
    Transform {
        position: Vec3::from_array(translation),
        rotation: Vec3::new(x, y, z),
        scale: Vec3::from_array(scale),
    }
}

fn convert_node(node: &gltf::Node, buffers: &[gltf::buffer::Data]) -> Result<SceneNode> {
    let name = node.name().map(str::to_string);
    let transform = convert_transform(node);
    let children = node
        .children()
        .map(|child| convert_node(&child, buffers))
        .collect::<Result<Vec<_>>>()?;

    if let Some(mesh) = node.mesh() {
        let (geometry, material) = convert_mesh(&mesh, buffers)?;
        return Ok(SceneNode::Mesh(Mesh {
            name: name.or_else(|| mesh.name().map(str::to_string)),
            transform,
            visible: true,
            geometry,
            material,
            children,
        }));
    }

    if let Some(camera) = node.camera() {
        if children.is_empty() {
            let fov_y = match camera.projection() {
                gltf::camera::Projection::Perspective(p) => p.yfov().to_degrees(),
                gltf::camera::Projection::Orthographic(_) => crate::camera::DEFAULT_FOV_Y,
            };
            return Ok(SceneNode::Camera(CameraNode {
                name,
                transform,
                fov_y,
            }));
        }
    }

    let mut group = Group::new(children);
    group.name = name;
    group.transform = transform;
    Ok(SceneNode::Group(group))
}

/// All primitives merged into one vertex list, one material per primitive
fn convert_mesh(
    mesh: &gltf::Mesh,
    buffers: &[gltf::buffer::Data],
) -> Result<(Option<Geometry>, MaterialSlot)> {
    let mut positions = Vec::new();
    let mut materials = Vec::new();

    for primitive in mesh.primitives() {
        let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|d| &d[..]));
        if let Some(read) = reader.read_positions() {
            positions.extend(read.map(Vec3::from_array));
        }
        materials.push(convert_material(&primitive.material()));
    }

    let geometry = (!positions.is_empty()).then(|| Geometry::from_positions(positions));
    let material = match materials.len() {
        0 => MaterialSlot::default(),
        1 => MaterialSlot::Single(materials.remove(0)),
        _ => MaterialSlot::Multi(materials),
    };
    Ok((geometry, material))
}

fn convert_material(material: &gltf::Material) -> Material {
    let [r, g, b, a] = material.pbr_metallic_roughness().base_color_factor();
    let [er, eg, eb] = material.emissive_factor();
    let emissive = Color::rgb(er, eg, eb);
    Material {
        color: Color::rgb(r, g, b),
        emissive,
        emissive_intensity: if emissive == Color::BLACK { 0.0 } else { 1.0 },
        opacity: a,
        transparent: material.alpha_mode() == gltf::material::AlphaMode::Blend,
    }
}
