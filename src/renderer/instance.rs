//! Per-body instance records for a renderer's instance buffer

use bytemuck::{Pod, Zeroable};

use crate::sim::{Body, BodyTag, Shape, World};

/// One body as the renderer sees it
///
/// `extent` is (radius, radius, radius) for spheres, (radius, height, radius)
/// for cylinders and the half-size for boxes. The renderer builds the world
/// transform from `position` and `extent`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct BodyInstance {
    pub position: [f32; 3],
    pub kind: u32,
    pub extent: [f32; 3],
    /// Visual id attached to the body, or `u32::MAX` for none
    pub visual: u32,
}

/// Shape kinds as stored in `BodyInstance::kind`
pub mod kinds {
    pub const SPHERE: u32 = 0;
    pub const BOX: u32 = 1;
    pub const CYLINDER: u32 = 2;
}

impl BodyInstance {
    pub fn from_body(body: &Body) -> Self {
        let (kind, extent, center) = match body.shape {
            Shape::Sphere { radius } => (kinds::SPHERE, [radius; 3], body.position),
            Shape::Cylinder { radius, height } => {
                (kinds::CYLINDER, [radius, height, radius], body.position)
            }
            Shape::Box { min, max } => {
                let half = (max - min) * 0.5;
                // Local corners need not be centered on the body position
                (kinds::BOX, half.to_array(), body.position + (min + max) * 0.5)
            }
        };

        Self {
            position: center.to_array(),
            kind,
            extent,
            visual: body.visual.map(|v| v.0).unwrap_or(u32::MAX),
        }
    }
}

/// Static bodies (optionally filtered by tag) followed by every moving body
pub fn extract_instances(world: &World, skip: &[BodyTag]) -> Vec<BodyInstance> {
    world
        .static_bodies()
        .iter()
        .chain(world.bodies().map(|(_, body)| body))
        .filter(|body| !skip.contains(&body.tag))
        .map(BodyInstance::from_body)
        .collect()
}

/// Moving bodies only, for per-frame updates once the statics are uploaded
pub fn extract_dynamic(world: &World) -> Vec<BodyInstance> {
    world.bodies().map(|(_, body)| BodyInstance::from_body(body)).collect()
}
