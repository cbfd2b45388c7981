//! Pachinko - a gravity-driven ball board
//!
//! Core modules:
//! - `sim`: Fixed-step simulation (bodies, collisions, board, ball lifecycle)
//! - `renderer`: Plain-old-data body instances for a renderer
//! - `settings`: Data-driven tunables loaded from JSON

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{BoardSettings, LaunchSettings, PhysicsSettings, SessionSettings, Settings};

use glam::Vec3;

/// Simulation configuration constants
pub mod consts {
    /// Largest step the integrator will take (60 Hz)
    pub const MAX_STEP: f32 = 1.0 / 60.0;

    /// Vertical acceleration (units/s²)
    pub const GRAVITY: f32 = -9.8;
    /// Fraction of normal speed kept after a bounce
    pub const RESTITUTION: f32 = 0.6;
    /// Horizontal damping per step (velocity *= 1 - coefficient)
    pub const FRICTION_COEFFICIENT: f32 = 0.01;
    /// Width of the uniform horizontal kick (units/s)
    pub const PERTURBATION: f32 = 0.1;
    /// Horizontal speed below which no kick is applied
    pub const PERTURBATION_MIN_SPEED: f32 = 0.01;

    /// Board defaults
    pub const BOARD_WIDTH: f32 = 6.0;
    pub const BOARD_HEIGHT: f32 = 12.0;
    pub const BOARD_DEPTH: f32 = 0.5;
    pub const WALL_THICKNESS: f32 = 0.2;
    pub const FLOOR_THICKNESS: f32 = 0.25;

    /// Pins
    pub const PIN_RADIUS: f32 = 0.06;
    pub const PIN_HEIGHT: f32 = 0.3;
    pub const PIN_ROW_SPACING: f32 = 0.8;
    pub const PIN_COL_SPACING: f32 = 0.6;

    /// Slots
    pub const SLOT_COUNT: usize = 7;
    pub const DIVIDER_WIDTH: f32 = 0.05;
    pub const DIVIDER_HEIGHT: f32 = 1.5;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 0.15;
    pub const LAUNCH_BASE_SPEED: f32 = 3.0;
    pub const LAUNCH_POWER_SPEED: f32 = 5.0;
    pub const LAUNCH_JITTER: f32 = 0.1;

    /// Balls below this height are checked against the slots
    pub const SCORE_CHECK_Y: f32 = 1.0;
    /// Balls below this height are retired
    pub const REMOVE_BELOW_Y: f32 = -2.0;
    /// Balls still colliding after this long are captured (seconds)
    pub const MAX_BALL_AGE: f32 = 30.0;

    /// Starting ball inventory
    pub const STARTING_BALLS: u32 = 100;
}

/// Length of the horizontal (XZ) part of a vector
#[inline]
pub fn horizontal_length(v: Vec3) -> f32 {
    (v.x * v.x + v.z * v.z).sqrt()
}

/// Reflect the component of `velocity` along `normal`, scaled by restitution
///
/// v' = v - (1 + e)(v·n)n, so the normal part becomes -e·(v·n)
#[inline]
pub fn reflect_with_restitution(velocity: Vec3, normal: Vec3, restitution: f32) -> Vec3 {
    velocity - (1.0 + restitution) * velocity.dot(normal) * normal
}
