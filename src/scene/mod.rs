//! Scene hierarchy handed to the simulation by the host.
//!
//! Nodes are an explicit tagged enum so traversal is an exhaustive match. Only
//! the parts the simulation reads are modelled: local transforms, visibility,
//! vertex positions and the handful of material channels that are animated.

pub mod geometry;
pub mod hit;

use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::math::{Color, AABB};

pub use geometry::Geometry;
pub use hit::{BoxTarget, HitTest, SphereTarget, TorusTarget};

/// Local translation, Euler rotation (XYZ, radians) and scale
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }

    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.quat(), self.position)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Animated material channels
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub color: Color,
    pub emissive: Color,
    pub emissive_intensity: f32,
    pub opacity: f32,
    pub transparent: bool,
}

impl Material {
    pub fn standard(color: Color) -> Self {
        Self {
            color,
            emissive: Color::BLACK,
            emissive_intensity: 0.0,
            opacity: 1.0,
            transparent: false,
        }
    }

    /// Base and emissive set to the same color
    pub fn glowing(color: Color, intensity: f32) -> Self {
        Self {
            color,
            emissive: color,
            emissive_intensity: intensity,
            opacity: 1.0,
            transparent: false,
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Material::standard(Color::WHITE)
    }
}

/// A mesh carries either one material or one per geometry group
#[derive(Clone, Debug, PartialEq)]
pub enum MaterialSlot {
    Single(Material),
    Multi(Vec<Material>),
}

impl MaterialSlot {
    /// The material fragments inherit: the only one, or the first of a list
    pub fn primary(&self) -> Option<&Material> {
        match self {
            MaterialSlot::Single(material) => Some(material),
            MaterialSlot::Multi(materials) => materials.first(),
        }
    }
}

impl Default for MaterialSlot {
    fn default() -> Self {
        MaterialSlot::Single(Material::default())
    }
}

#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub name: Option<String>,
    pub transform: Transform,
    pub visible: bool,
    pub geometry: Option<Geometry>,
    pub material: MaterialSlot,
    pub children: Vec<SceneNode>,
}

impl Mesh {
    pub fn new(geometry: Geometry, material: Material) -> Self {
        Self {
            name: None,
            transform: Transform::IDENTITY,
            visible: true,
            geometry: Some(geometry),
            material: MaterialSlot::Single(material),
            children: Vec::new(),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn at(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }
}

#[derive(Clone, Debug, Default)]
pub struct Group {
    pub name: Option<String>,
    pub transform: Transform,
    pub visible: bool,
    pub children: Vec<SceneNode>,
}

impl Group {
    pub fn new(children: Vec<SceneNode>) -> Self {
        Self {
            name: None,
            transform: Transform::IDENTITY,
            visible: true,
            children,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LightKind {
    Ambient,
    Directional,
    Point,
}

#[derive(Clone, Debug)]
pub struct Light {
    pub name: Option<String>,
    pub transform: Transform,
    pub kind: LightKind,
    pub color: Color,
    pub intensity: f32,
}

#[derive(Clone, Debug)]
pub struct CameraNode {
    pub name: Option<String>,
    pub transform: Transform,
    pub fov_y: f32,
}

#[derive(Clone, Debug)]
pub enum SceneNode {
    Mesh(Mesh),
    Group(Group),
    Light(Light),
    Camera(CameraNode),
}

impl SceneNode {
    pub fn name(&self) -> Option<&str> {
        match self {
            SceneNode::Mesh(node) => node.name.as_deref(),
            SceneNode::Group(node) => node.name.as_deref(),
            SceneNode::Light(node) => node.name.as_deref(),
            SceneNode::Camera(node) => node.name.as_deref(),
        }
    }

    pub fn transform(&self) -> &Transform {
        match self {
            SceneNode::Mesh(node) => &node.transform,
            SceneNode::Group(node) => &node.transform,
            SceneNode::Light(node) => &node.transform,
            SceneNode::Camera(node) => &node.transform,
        }
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        match self {
            SceneNode::Mesh(node) => &mut node.transform,
            SceneNode::Group(node) => &mut node.transform,
            SceneNode::Light(node) => &mut node.transform,
            SceneNode::Camera(node) => &mut node.transform,
        }
    }

    pub fn children(&self) -> &[SceneNode] {
        match self {
            SceneNode::Mesh(node) => &node.children,
            SceneNode::Group(node) => &node.children,
            SceneNode::Light(_) | SceneNode::Camera(_) => &[],
        }
    }

    /// Lights and cameras are never drawn
    pub fn is_visible(&self) -> bool {
        match self {
            SceneNode::Mesh(node) => node.visible,
            SceneNode::Group(node) => node.visible,
            SceneNode::Light(_) | SceneNode::Camera(_) => false,
        }
    }

    pub fn set_visible(&mut self, visible: bool) {
        match self {
            SceneNode::Mesh(node) => node.visible = visible,
            SceneNode::Group(node) => node.visible = visible,
            SceneNode::Light(_) | SceneNode::Camera(_) => {}
        }
    }

    /// Every mesh in the subtree, root included, with its world matrix.
    /// Depth-first, parents before children.
    pub fn world_meshes(&self) -> Vec<WorldMesh<'_>> {
        let mut out = Vec::new();
        collect_meshes(self, &Mat4::IDENTITY, &mut out);
        out
    }

    /// World bounds of every mesh in the subtree
    pub fn world_bounds(&self) -> Option<AABB> {
        self.world_meshes()
            .iter()
            .filter_map(WorldMesh::world_bounds)
            .reduce(|a, b| a.union(&b))
    }
}

impl From<Mesh> for SceneNode {
    fn from(mesh: Mesh) -> Self {
        SceneNode::Mesh(mesh)
    }
}

impl From<Group> for SceneNode {
    fn from(group: Group) -> Self {
        SceneNode::Group(group)
    }
}

fn collect_meshes<'a>(node: &'a SceneNode, parent: &Mat4, out: &mut Vec<WorldMesh<'a>>) {
    let world = *parent * node.transform().matrix();
    if let SceneNode::Mesh(mesh) = node {
        out.push(WorldMesh { mesh, world });
    }
    for child in node.children() {
        collect_meshes(child, &world, out);
    }
}

/// A mesh paired with its accumulated world matrix
#[derive(Clone, Debug)]
pub struct WorldMesh<'a> {
    pub mesh: &'a Mesh,
    pub world: Mat4,
}

impl WorldMesh<'_> {
    pub fn world_position(&self) -> Vec3 {
        self.world.w_axis.truncate()
    }

    /// `None` when the mesh has no geometry or no vertices
    pub fn world_bounds(&self) -> Option<AABB> {
        let local = self.mesh.geometry.as_ref()?.bounds()?;
        Some(local.transformed(&self.world))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube(size: f32) -> Mesh {
        Mesh::new(Geometry::cuboid(Vec3::splat(size)), Material::default())
    }

    #[test]
    fn world_meshes_skips_lights_and_groups() {
        let root = SceneNode::Group(Group::new(vec![
            cube(1.0).into(),
            SceneNode::Light(Light {
                name: None,
                transform: Transform::IDENTITY,
                kind: LightKind::Ambient,
                color: Color::WHITE,
                intensity: 0.6,
            }),
            Group::new(vec![cube(2.0).into()]).into(),
        ]));

        assert_eq!(root.world_meshes().len(), 2);
    }

    #[test]
    fn world_matrix_accumulates_parent_transforms() {
        let child = cube(1.0).at(Transform::from_position(Vec3::new(1.0, 0.0, 0.0)));
        let mut parent = Group::new(vec![child.into()]);
        parent.transform = Transform::from_position(Vec3::new(0.0, -1.0, 0.0)).with_scale(5.0);
        let root = SceneNode::Group(parent);

        let meshes = root.world_meshes();
        assert_eq!(meshes.len(), 1);
        let position = meshes[0].world_position();
        assert!((position - Vec3::new(5.0, -1.0, 0.0)).length() < 1e-5);

        let bounds = meshes[0].world_bounds().unwrap();
        assert!((bounds.size() - Vec3::splat(5.0)).length() < 1e-4);
    }

    #[test]
    fn mesh_without_geometry_has_no_bounds() {
        let mut mesh = cube(1.0);
        mesh.geometry = None;
        let root = SceneNode::Mesh(mesh);
        assert!(root.world_meshes()[0].world_bounds().is_none());
        assert!(root.world_bounds().is_none());
    }

    #[test]
    fn primary_material_of_multi_slot_is_first() {
        let slot = MaterialSlot::Multi(vec![
            Material::standard(Color::from_hex(0xff0000)),
            Material::standard(Color::from_hex(0x00ff00)),
        ]);
        assert_eq!(slot.primary().unwrap().color, Color::from_hex(0xff0000));
        assert!(MaterialSlot::Multi(Vec::new()).primary().is_none());
    }

    #[test]
    fn hiding_a_group_leaves_children_flags_alone() {
        let mut root = SceneNode::Group(Group::new(vec![cube(1.0).into()]));
        root.set_visible(false);
        assert!(!root.is_visible());
        assert!(root.children()[0].is_visible());
    }
}
