//! Simulation settings and tunables
//!
//! Every section deserializes with defaults, so a settings file only needs
//! the fields it changes.

use std::path::Path;

use anyhow::{Context, Result, ensure};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Integrator and contact constants shared by every body in the world
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    /// Vertical acceleration (negative is down)
    pub gravity: f32,
    /// Fraction of normal speed kept after a bounce (0..=1)
    pub restitution: f32,
    /// Horizontal damping applied once per step
    pub friction_coefficient: f32,
    /// Largest step `advance` will integrate
    pub max_step: f32,
    /// Width of the uniform horizontal kick, 0 disables it
    pub perturbation: f32,
    /// Horizontal speed a body needs before it gets kicked
    pub perturbation_min_speed: f32,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            restitution: RESTITUTION,
            friction_coefficient: FRICTION_COEFFICIENT,
            max_step: MAX_STEP,
            perturbation: PERTURBATION,
            perturbation_min_speed: PERTURBATION_MIN_SPEED,
        }
    }
}

impl PhysicsSettings {
    /// Multiplier applied to v_x and v_z every step
    #[inline]
    pub fn friction_factor(&self) -> f32 {
        1.0 - self.friction_coefficient
    }

    /// Same constants with every random kick turned off
    pub fn without_perturbation(mut self) -> Self {
        self.perturbation = 0.0;
        self
    }
}

/// Board geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardSettings {
    /// Inner width; the board spans x in [-width/2, width/2)
    pub width: f32,
    /// Inner height; the floor top sits at y = 0, the ceiling at y = height
    pub height: f32,
    /// Depth along z, centered on z = 0
    pub depth: f32,
    pub wall_thickness: f32,
    pub floor_thickness: f32,
    /// Add a front panel so balls cannot leave along +z
    pub front_glass: bool,

    pub pin_radius: f32,
    /// Vertical extent of each pin's collision band
    pub pin_height: f32,
    pub pin_min_y: f32,
    pub pin_max_y: f32,
    pub pin_row_spacing: f32,
    pub pin_col_spacing: f32,
    /// Clearance between the side walls and the outermost pins
    pub pin_margin: f32,
    /// Offset every other row by half a column (brick pattern)
    pub staggered: bool,

    pub slot_count: usize,
    /// Points from the outermost slots inward; the last entry is the jackpot
    pub slot_points: Vec<u32>,
    pub divider_width: f32,
    pub divider_height: f32,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            depth: BOARD_DEPTH,
            wall_thickness: WALL_THICKNESS,
            floor_thickness: FLOOR_THICKNESS,
            front_glass: true,

            pin_radius: PIN_RADIUS,
            pin_height: PIN_HEIGHT,
            pin_min_y: 2.5,
            pin_max_y: 10.0,
            pin_row_spacing: PIN_ROW_SPACING,
            pin_col_spacing: PIN_COL_SPACING,
            pin_margin: 0.35,
            staggered: true,

            slot_count: SLOT_COUNT,
            slot_points: vec![100, 200, 500, 1000],
            divider_width: DIVIDER_WIDTH,
            divider_height: DIVIDER_HEIGHT,
        }
    }
}

impl BoardSettings {
    /// Left edge of the playfield
    #[inline]
    pub fn left(&self) -> f32 {
        -self.width / 2.0
    }

    /// Right edge of the playfield
    #[inline]
    pub fn right(&self) -> f32 {
        self.width / 2.0
    }
}

/// Launcher and ball lifecycle
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchSettings {
    /// Where new balls appear
    pub origin: Vec3,
    pub ball_radius: f32,
    /// Speed at power 0
    pub base_speed: f32,
    /// Extra speed at power 1
    pub power_speed: f32,
    /// Upward component of the launch direction per unit of inward travel
    pub loft: f32,
    /// Width of the uniform horizontal jitter added at launch, 0 disables it
    pub jitter: f32,
    pub score_check_y: f32,
    pub remove_below_y: f32,
    pub max_ball_age: f32,
}

impl Default for LaunchSettings {
    fn default() -> Self {
        Self {
            origin: Vec3::new(2.5, 11.5, 0.0),
            ball_radius: BALL_RADIUS,
            base_speed: LAUNCH_BASE_SPEED,
            power_speed: LAUNCH_POWER_SPEED,
            loft: 0.6,
            jitter: LAUNCH_JITTER,
            score_check_y: SCORE_CHECK_Y,
            remove_below_y: REMOVE_BELOW_Y,
            max_ball_age: MAX_BALL_AGE,
        }
    }
}

/// Session bookkeeping
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    pub starting_balls: u32,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            starting_balls: STARTING_BALLS,
        }
    }
}

/// All tunables for one session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub physics: PhysicsSettings,
    pub board: BoardSettings,
    pub launcher: LaunchSettings,
    pub session: SessionSettings,
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json).context("invalid settings JSON")?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file, or defaults when the file does not exist
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::warn!("Settings file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let settings = Self::from_json(&json)
            .with_context(|| format!("failed to load settings from {}", path.display()))?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject settings the board generator cannot lay out
    pub fn validate(&self) -> Result<()> {
        let board = &self.board;
        ensure!(board.width > 0.0 && board.height > 0.0, "board must have a positive size");
        ensure!(board.slot_count > 0, "board needs at least one slot");
        ensure!(!board.slot_points.is_empty(), "slot point table is empty");
        ensure!(
            board.divider_width * (board.slot_count as f32 - 1.0) < board.width,
            "dividers are wider than the board"
        );
        ensure!(board.pin_min_y <= board.pin_max_y, "pin_min_y is above pin_max_y");
        ensure!(
            board.pin_row_spacing > 0.0 && board.pin_col_spacing > 0.0,
            "pin spacing must be positive"
        );

        let physics = &self.physics;
        ensure!(physics.max_step > 0.0, "max_step must be positive");
        ensure!(
            (0.0..=1.0).contains(&physics.restitution),
            "restitution must be within 0..=1"
        );
        ensure!(
            (0.0..=1.0).contains(&physics.friction_coefficient),
            "friction_coefficient must be within 0..=1"
        );

        let launcher = &self.launcher;
        ensure!(launcher.ball_radius > 0.0, "ball_radius must be positive");
        ensure!(
            launcher.remove_below_y < launcher.score_check_y,
            "remove_below_y must be under score_check_y"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "board": { "slot_count": 5 } }"#).unwrap();
        assert_eq!(settings.board.slot_count, 5);
        assert_eq!(settings.board.width, BOARD_WIDTH);
        assert_eq!(settings.physics.gravity, GRAVITY);
    }

    #[test]
    fn test_json_roundtrip_keeps_launch_origin() {
        let mut settings = Settings::default();
        settings.launcher.origin = Vec3::new(-2.0, 10.0, 0.0);
        let json = settings.to_json().unwrap();
        let back = Settings::from_json(&json).unwrap();
        assert_eq!(back.launcher.origin, Vec3::new(-2.0, 10.0, 0.0));
    }

    #[test]
    fn test_rejects_zero_slots() {
        let err = Settings::from_json(r#"{ "board": { "slot_count": 0 } }"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_rejects_bad_restitution() {
        let mut settings = Settings::default();
        settings.physics.restitution = 1.5;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let settings = Settings::load("/nonexistent/pachinko-settings.json").unwrap();
        assert_eq!(settings.board.slot_count, SLOT_COUNT);
    }

    #[test]
    fn test_friction_factor() {
        let physics = PhysicsSettings {
            friction_coefficient: 0.25,
            ..Default::default()
        };
        assert!((physics.friction_factor() - 0.75).abs() < 1e-6);
    }
}
