//! Bodies and their collision shapes

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Handle to a dynamic body in the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyHandle(pub usize);

/// Index of a static body, in registration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StaticId(pub usize);

/// Opaque visual attached by a renderer; never inspected by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisualId(pub u32);

/// What a body is, for consumers outside the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyTag {
    Ball,
    Pin,
    Wall,
    Divider,
    Floor,
    Glass,
}

/// Collision shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Sphere { radius: f32 },
    /// Axis-aligned box; corners are relative to the body position
    Box { min: Vec3, max: Vec3 },
    /// Vertical-axis cylinder centered on the body position
    Cylinder { radius: f32, height: f32 },
}

/// One simulated object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub position: Vec3,
    pub velocity: Vec3,
    pub shape: Shape,
    pub is_static: bool,
    pub tag: BodyTag,
    /// Cleared for balls captured by a pocket; they keep falling but skip contacts
    pub collides: bool,
    pub visual: Option<VisualId>,
}

impl Body {
    fn new(position: Vec3, shape: Shape, is_static: bool, tag: BodyTag) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            shape,
            is_static,
            tag,
            collides: true,
            visual: None,
        }
    }

    /// A moving ball
    pub fn ball(position: Vec3, velocity: Vec3, radius: f32) -> Self {
        let mut body = Self::new(position, Shape::Sphere { radius }, false, BodyTag::Ball);
        body.velocity = velocity;
        body
    }

    pub fn static_sphere(center: Vec3, radius: f32, tag: BodyTag) -> Self {
        Self::new(center, Shape::Sphere { radius }, true, tag)
    }

    pub fn static_cylinder(center: Vec3, radius: f32, height: f32, tag: BodyTag) -> Self {
        Self::new(center, Shape::Cylinder { radius, height }, true, tag)
    }

    /// Static box from world-space corners; the body sits at the box center
    pub fn static_box(min: Vec3, max: Vec3, tag: BodyTag) -> Self {
        let center = (min + max) * 0.5;
        Self::new(
            center,
            Shape::Box {
                min: min - center,
                max: max - center,
            },
            true,
            tag,
        )
    }

    pub fn with_visual(mut self, visual: VisualId) -> Self {
        self.visual = Some(visual);
        self
    }

    /// World-space box corners, if this body is a box
    pub fn aabb(&self) -> Option<(Vec3, Vec3)> {
        match self.shape {
            Shape::Box { min, max } => Some((self.position + min, self.position + max)),
            _ => None,
        }
    }

    /// Radius if this body is a sphere
    pub fn sphere_radius(&self) -> Option<f32> {
        match self.shape {
            Shape::Sphere { radius } => Some(radius),
            _ => None,
        }
    }
}
