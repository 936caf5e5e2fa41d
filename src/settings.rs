//! Game tuning and arena configuration
//!
//! Loaded from JSON by the host harness; every field falls back to the
//! constants in [`crate::consts`] when omitted.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::SimError;
use crate::consts::*;
use crate::sim::{BoundaryPolicy, MotionProfile, Rect};

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Arena ===
    pub arena_width: i32,
    pub arena_height: i32,

    // === Ship motion ===
    /// Fraction of velocity removed every tick (0.0 - 1.0)
    pub drag: f32,
    pub max_velocity: f32,
    pub max_rotation_speed: f32,
    pub turn_impulse: f32,
    pub acceleration: f32,

    // === Projectiles ===
    pub projectile_speed: f32,
    pub projectile_cap: usize,
    /// Edge behavior for fired projectiles (Reflect or Destroy)
    pub projectile_boundary: BoundaryPolicy,

    // === Asteroids ===
    pub asteroid_count: u32,
    pub asteroid_min_speed: f32,
    pub asteroid_max_speed: f32,
    pub asteroid_max_spin: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,

            drag: DRAG_COEFFICIENT,
            max_velocity: MAX_VELOCITY,
            max_rotation_speed: MAX_ROTATION_SPEED,
            turn_impulse: TURN_IMPULSE,
            acceleration: ACCELERATION,

            projectile_speed: PROJECTILE_SPEED,
            projectile_cap: PROJECTILE_CAP,
            projectile_boundary: BoundaryPolicy::Destroy,

            asteroid_count: ASTEROID_COUNT,
            asteroid_min_speed: ASTEROID_MIN_SPEED,
            asteroid_max_speed: ASTEROID_MAX_SPEED,
            asteroid_max_spin: ASTEROID_MAX_SPIN,
        }
    }
}

impl Settings {
    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the integrator cannot handle
    pub fn validate(&self) -> Result<(), SimError> {
        if self.arena_width <= 0 || self.arena_height <= 0 {
            return Err(SimError::InvalidSettings(format!(
                "arena must be non-empty (got {}x{})",
                self.arena_width, self.arena_height
            )));
        }
        // Drag above 1.0 would flip velocity sign in a single tick
        if !(0.0..=1.0).contains(&self.drag) {
            return Err(SimError::InvalidSettings(format!(
                "drag must be within [0, 1] (got {})",
                self.drag
            )));
        }
        if self.max_velocity <= 0.0 || self.max_rotation_speed <= 0.0 {
            return Err(SimError::InvalidSettings(
                "speed caps must be positive".to_string(),
            ));
        }
        if self.projectile_boundary == BoundaryPolicy::Clamp {
            return Err(SimError::InvalidSettings(
                "projectiles must use Reflect or Destroy".to_string(),
            ));
        }
        if self.asteroid_min_speed < 0.0 || self.asteroid_max_spin < 0.0 {
            return Err(SimError::InvalidSettings(
                "asteroid speed and spin limits must be non-negative".to_string(),
            ));
        }
        if self.asteroid_min_speed > self.asteroid_max_speed {
            return Err(SimError::InvalidSettings(format!(
                "asteroid speed range is empty ({}..{})",
                self.asteroid_min_speed, self.asteroid_max_speed
            )));
        }
        Ok(())
    }

    /// Playfield rectangle anchored at the origin
    pub fn arena(&self) -> Rect {
        Rect::new(0, 0, self.arena_width, self.arena_height)
    }

    /// Motion limits for the player ship
    pub fn ship_motion(&self) -> MotionProfile {
        MotionProfile {
            drag: self.drag,
            max_velocity: self.max_velocity,
            max_rotation_speed: self.max_rotation_speed,
        }
    }

    /// Motion limits for drifting bodies (asteroids, projectiles): no drag
    pub fn drift_motion(&self) -> MotionProfile {
        MotionProfile {
            drag: 0.0,
            ..self.ship_motion()
        }
    }
}
