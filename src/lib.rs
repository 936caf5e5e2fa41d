//! Asteroid Engine - kinematics and pixel-perfect collision for a 2D arcade game
//!
//! Core modules:
//! - `sim`: Entity simulation (transforms, bounds, motion, arena edges, collisions)
//! - `settings`: Data-driven tuning loaded from JSON
//! - `error`: Error type shared by the simulation
//!
//! Rendering, asset decoding and keyboard polling live in the host harness; it
//! feeds pixel buffers and per-tick input in and reads transforms back out.

pub mod error;
pub mod settings;
pub mod sim;

pub use error::SimError;
pub use settings::Settings;

use glam::Vec2;
use std::f32::consts::TAU;

/// Game configuration constants
pub mod consts {
    use std::f32::consts::PI;

    /// Nominal simulation timestep (one 60 Hz frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Default arena extent (a 1280x720 window)
    pub const ARENA_WIDTH: i32 = 1280;
    pub const ARENA_HEIGHT: i32 = 720;

    /// Per-tick fractional velocity loss
    pub const DRAG_COEFFICIENT: f32 = 0.008;
    /// Linear speed cap per axis (pixels/s)
    pub const MAX_VELOCITY: f32 = 10_000.0;
    /// Angular speed cap (radians/s)
    pub const MAX_ROTATION_SPEED: f32 = PI;
    /// Angular acceleration applied while a turn command is held (radians/s²)
    pub const TURN_IMPULSE: f32 = PI;
    /// Thrust acceleration along the facing direction (pixels/s²)
    pub const ACCELERATION: f32 = 160.0;

    /// Projectile muzzle speed added to the ship velocity (pixels/s)
    pub const PROJECTILE_SPEED: f32 = 600.0;
    /// Maximum live projectiles per player
    pub const PROJECTILE_CAP: usize = 5;

    /// Asteroid field defaults
    pub const ASTEROID_COUNT: u32 = 6;
    pub const ASTEROID_MIN_SPEED: f32 = 30.0;
    pub const ASTEROID_MAX_SPEED: f32 = 90.0;
    pub const ASTEROID_MAX_SPIN: f32 = 1.0;
}

/// Wrap an angle into [0, 2π)
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Unit vector pointing along `angle` (0 = +X, positive turns toward +Y)
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_angle_range() {
        assert_eq!(normalize_angle(0.0), 0.0);
        assert!((normalize_angle(TAU + 0.5) - 0.5).abs() < 1e-5);
        assert!((normalize_angle(-PI / 2.0) - 1.5 * PI).abs() < 1e-5);
        // Several wraps at once
        assert!((normalize_angle(5.0 * TAU + 1.0) - 1.0).abs() < 1e-3);
        assert!(normalize_angle(-1e-9) < TAU);
        assert_eq!(normalize_angle(TAU), 0.0);
    }

    #[test]
    fn test_heading() {
        let h = heading(PI / 2.0);
        assert!(h.x.abs() < 1e-6);
        assert!((h.y - 1.0).abs() < 1e-6);
    }
}
