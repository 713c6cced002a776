//! Procedural shattering: split a mesh's world bounds into a grid of boxes.

use glam::{UVec3, Vec3};
use serde::{Deserialize, Serialize};

use crate::math::finite_or_zero;
use crate::scene::{Material, SceneNode, WorldMesh};

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FragmentOptions {
    /// Cells per axis; `grid_size³` fragments per mesh. Zero is treated as one.
    pub grid_size: u32,
    /// Box size as a fraction of its cell, leaves visible seams below 1.0
    pub seam: f32,
}

impl FragmentOptions {
    /// Largest grid a config may ask for; 64³ boxes per mesh
    pub const MAX_GRID_SIZE: u32 = 64;
}

impl Default for FragmentOptions {
    fn default() -> Self {
        Self {
            grid_size: 3,
            seam: 0.9,
        }
    }
}

/// One piece of debris, ready to be handed to the stage and the debris field
#[derive(Clone, Debug, PartialEq)]
pub struct FragmentDescriptor {
    pub cell: UVec3,
    /// Box dimensions
    pub size: Vec3,
    /// World-space centre
    pub position: Vec3,
    /// Euler rotation inherited from the source mesh
    pub rotation: Vec3,
    /// Independent copy of the source material
    pub material: Material,
}

/// Partition one mesh into `grid_size³` boxes centred on its world position.
///
/// Meshes without geometry, or with no vertices, yield nothing. Cells are
/// emitted x-outer, y-middle, z-inner. The source mesh is left untouched.
pub fn fragment(mesh: &WorldMesh<'_>, options: &FragmentOptions) -> Vec<FragmentDescriptor> {
    let Some(bounds) = mesh.world_bounds() else {
        return Vec::new();
    };

    let grid = options.grid_size.max(1);
    let cell_size = finite_or_zero(bounds.size()) / grid as f32;
    let box_size = cell_size * options.seam;
    let origin = mesh.world_position();
    let rotation = mesh.mesh.transform.rotation;
    let material = mesh.mesh.material.primary().cloned().unwrap_or_default();
    let half = grid as f32 / 2.0;

    let mut fragments = Vec::with_capacity(cell_count(grid));
    for x in 0..grid {
        for y in 0..grid {
            for z in 0..grid {
                let cell = UVec3::new(x, y, z);
                let offset = (cell.as_vec3() - Vec3::splat(half) + Vec3::splat(0.5)) * cell_size;
                fragments.push(FragmentDescriptor {
                    cell,
                    size: box_size,
                    position: origin + offset,
                    rotation,
                    material: material.clone(),
                });
            }
        }
    }
    fragments
}

/// `grid³` in `usize`, saturating instead of overflowing
pub fn cell_count(grid: u32) -> usize {
    (grid as usize).saturating_pow(3)
}

/// Fragment every mesh in a model, in traversal order
pub fn fragment_model(root: &SceneNode, options: &FragmentOptions) -> Vec<FragmentDescriptor> {
    root.world_meshes()
        .iter()
        .flat_map(|mesh| fragment(mesh, options))
        .collect()
}
