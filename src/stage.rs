//! Output side of the simulation: what the renderer is asked to do.

use glam::{EulerRot, Quat, Vec3};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::math::Color;
use crate::scene::Material;
use crate::sim::Theme;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct VisualHandle(pub u64);

/// Hands out unique handles for one stage
#[derive(Debug, Default)]
pub struct HandleAllocator {
    next: u64,
}

impl HandleAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self) -> VisualHandle {
        let handle = VisualHandle(self.next);
        self.next += 1;
        handle
    }

    pub fn issued(&self) -> u64 {
        self.next
    }
}

/// Per-instance record laid out for direct upload to an instance buffer
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceData {
    pub position: [f32; 3],
    pub opacity: f32,
    /// Quaternion, xyzw
    pub rotation: [f32; 4],
    pub scale: [f32; 3],
    pub emissive_intensity: f32,
    pub color: [f32; 3],
    pub _pad: f32,
}

impl InstanceData {
    pub fn new(position: Vec3, euler: Vec3, scale: Vec3) -> Self {
        let rotation = Quat::from_euler(EulerRot::XYZ, euler.x, euler.y, euler.z);
        Self {
            position: position.to_array(),
            opacity: 1.0,
            rotation: rotation.to_array(),
            scale: scale.to_array(),
            emissive_intensity: 0.0,
            color: Color::WHITE.to_array(),
            _pad: 0.0,
        }
    }

    pub fn with_material(mut self, material: &Material) -> Self {
        self.color = material.color.to_array();
        self.opacity = material.opacity;
        self.emissive_intensity = material.emissive_intensity;
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Cuboid { size: Vec3 },
    Sphere { radius: f32 },
    Torus { radius: f32, tube: f32 },
    Cone { radius: f32, height: f32 },
    /// A loaded model, drawn from the host's own assets
    Model { name: String },
    Points { positions: Vec<Vec3>, size: f32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Visual {
    pub shape: Shape,
    pub material: Material,
    pub instance: InstanceData,
}

/// Material channels animated after creation
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MaterialUpdate {
    pub color: Color,
    pub emissive: Color,
    pub emissive_intensity: f32,
    pub opacity: f32,
}

impl MaterialUpdate {
    pub fn from_material(material: &Material) -> Self {
        Self {
            color: material.color,
            emissive: material.emissive,
            emissive_intensity: material.emissive_intensity,
            opacity: material.opacity,
        }
    }
}

/// The renderer and page chrome as seen by the effects
pub trait Stage {
    fn add(&mut self, handle: VisualHandle, visual: Visual);
    fn remove(&mut self, handle: VisualHandle);
    fn set_transform(&mut self, handle: VisualHandle, instance: InstanceData);
    fn set_material(&mut self, handle: VisualHandle, update: MaterialUpdate);
    fn set_visible(&mut self, handle: VisualHandle, visible: bool);
    /// Background and text change on the hosting page
    fn apply_theme(&mut self, theme: &Theme);
}

#[derive(Clone, Debug, PartialEq)]
pub struct StagedVisual {
    pub visual: Visual,
    pub visible: bool,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StageCounters {
    pub added: u64,
    pub removed: u64,
    pub transforms: u64,
    pub materials: u64,
    pub visibility: u64,
    /// Commands addressed to handles that are not live
    pub stale: u64,
}

/// In-memory stage that keeps the latest state of every live visual
#[derive(Debug, Default)]
pub struct RecordingStage {
    live: BTreeMap<VisualHandle, StagedVisual>,
    counters: StageCounters,
    theme: Option<Theme>,
}

impl RecordingStage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, handle: VisualHandle) -> Option<&StagedVisual> {
        self.live.get(&handle)
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn visible_count(&self) -> usize {
        self.live.values().filter(|v| v.visible).count()
    }

    pub fn counters(&self) -> StageCounters {
        self.counters
    }

    pub fn theme(&self) -> Option<&Theme> {
        self.theme.as_ref()
    }

    /// Visible instances in handle order, packed for upload
    pub fn instance_bytes(&self) -> Vec<u8> {
        let instances: Vec<InstanceData> = self
            .live
            .values()
            .filter(|v| v.visible)
            .map(|v| v.visual.instance)
            .collect();
        bytemuck::cast_slice::<InstanceData, u8>(&instances).to_vec()
    }

    fn entry(&mut self, handle: VisualHandle) -> Option<&mut StagedVisual> {
        let entry = self.live.get_mut(&handle);
        if entry.is_none() {
            self.counters.stale += 1;
            log::warn!("command for unknown visual {:?}", handle);
        }
        entry
    }
}

impl Stage for RecordingStage {
    fn add(&mut self, handle: VisualHandle, visual: Visual) {
        self.counters.added += 1;
        self.live.insert(
            handle,
            StagedVisual {
                visual,
                visible: true,
            },
        );
    }

    fn remove(&mut self, handle: VisualHandle) {
        if self.live.remove(&handle).is_some() {
            self.counters.removed += 1;
        } else {
            self.counters.stale += 1;
        }
    }

    fn set_transform(&mut self, handle: VisualHandle, instance: InstanceData) {
        self.counters.transforms += 1;
        if let Some(entry) = self.entry(handle) {
            entry.visual.instance = instance;
        }
    }

    fn set_material(&mut self, handle: VisualHandle, update: MaterialUpdate) {
        self.counters.materials += 1;
        if let Some(entry) = self.entry(handle) {
            let material = &mut entry.visual.material;
            material.color = update.color;
            material.emissive = update.emissive;
            material.emissive_intensity = update.emissive_intensity;
            material.opacity = update.opacity;
            entry.visual.instance = entry.visual.instance.with_material(material);
        }
    }

    fn set_visible(&mut self, handle: VisualHandle, visible: bool) {
        self.counters.visibility += 1;
        if let Some(entry) = self.entry(handle) {
            entry.visible = visible;
        }
    }

    fn apply_theme(&mut self, theme: &Theme) {
        log::info!("theme -> #{:06x} \"{}\"", theme.background, theme.headline);
        self.theme = Some(theme.clone());
    }
}
