//! Per-tick motion integration
//!
//! Drag is a flat per-tick fraction (`v -= v * drag`), not a time-scaled
//! exponential, so the feel of the ship depends on the tick rate.

use glam::Vec2;

use crate::normalize_angle;

/// Limits applied while integrating one kind of body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionProfile {
    /// Fraction of velocity removed each tick (0.0 - 1.0)
    pub drag: f32,
    /// Per-axis linear speed cap
    pub max_velocity: f32,
    /// Angular speed cap
    pub max_rotation_speed: f32,
}

/// Linear and angular rates of a moving entity
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KinematicBody {
    pub velocity: Vec2,
    /// Impulse for the current tick only
    pub acceleration: Vec2,
    pub angular_velocity: f32,
    /// Impulse for the current tick only
    pub angular_acceleration: f32,
}

impl KinematicBody {
    pub fn with_velocity(velocity: Vec2) -> Self {
        Self {
            velocity,
            ..Default::default()
        }
    }

    /// Advance `position` and `angle` by `dt` seconds.
    ///
    /// Order per axis: drag, accelerate, clamp, integrate. The angle comes
    /// back wrapped into [0, 2π).
    pub fn integrate(&mut self, position: &mut Vec2, angle: &mut f32, dt: f32, motion: &MotionProfile) {
        // Linear
        self.velocity -= self.velocity * motion.drag;
        self.velocity += self.acceleration * dt;
        self.velocity = self
            .velocity
            .clamp(Vec2::splat(-motion.max_velocity), Vec2::splat(motion.max_velocity));
        *position += self.velocity * dt;

        // Angular
        self.angular_velocity -= self.angular_velocity * motion.drag;
        self.angular_velocity += self.angular_acceleration * dt;
        self.angular_velocity = self
            .angular_velocity
            .clamp(-motion.max_rotation_speed, motion.max_rotation_speed);
        *angle = normalize_angle(*angle + self.angular_velocity * dt);
    }

    /// Drop this tick's impulses before the next input sample
    pub fn clear_impulses(&mut self) {
        self.acceleration = Vec2::ZERO;
        self.angular_acceleration = 0.0;
    }
}
