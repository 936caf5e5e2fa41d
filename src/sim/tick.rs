//! Per-tick entity update
//!
//! One step for a single entity: integrate motion, rebuild the transform and
//! bounds, then apply the arena policy.

use super::boundary::BoundaryOutcome;
use super::entity::{Entity, EntityKind};
use super::kinematics::MotionProfile;
use crate::{Settings, SimError, heading};

/// Input commands for a single tick
///
/// Built by the host from whatever device it polls; the core never reads a
/// keyboard itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub turn_left: bool,
    pub turn_right: bool,
    pub thrust_forward: bool,
    pub thrust_backward: bool,
    /// Held state; a shot fires on the tick this becomes true
    pub fire: bool,
}

/// Motion limits for an entity kind
pub fn motion_profile(kind: EntityKind, settings: &Settings) -> MotionProfile {
    match kind {
        EntityKind::Player => settings.ship_motion(),
        EntityKind::Asteroid | EntityKind::Projectile => settings.drift_motion(),
    }
}

/// Turn held commands into this tick's acceleration impulses.
///
/// Right overrides left and backward overrides forward when both are held.
pub fn apply_input(entity: &mut Entity, input: &TickInput, settings: &Settings) {
    let facing = heading(entity.angle());
    let body = &mut entity.body;
    body.clear_impulses();

    if input.turn_left {
        body.angular_acceleration = -settings.turn_impulse;
    }
    if input.turn_right {
        body.angular_acceleration = settings.turn_impulse;
    }

    if input.thrust_forward {
        body.acceleration = facing * settings.acceleration;
    }
    if input.thrust_backward {
        body.acceleration = facing * -settings.acceleration;
    }
}

/// Advance one entity by `dt` seconds
pub fn tick_entity(entity: &mut Entity, dt: f32, motion: &MotionProfile) -> Result<BoundaryOutcome, SimError> {
    entity.pixels()?;

    let mut position = entity.position();
    let mut angle = entity.angle();
    entity.body.integrate(&mut position, &mut angle, dt, motion);
    entity.body.clear_impulses();
    entity.set_pose(position, angle);

    entity.apply_boundary()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::boundary::BoundaryPolicy;
    use crate::sim::bounds::Rect;
    use crate::sim::pixels::{PixelBuffer, Rgba};
    use glam::Vec2;
    use std::f32::consts::FRAC_PI_2;

    const ARENA: Rect = Rect::new(0, 0, 400, 300);

    fn entity(kind: EntityKind, pos: Vec2) -> Entity {
        let mut e = Entity::new(1, kind, pos).with_arena(ARENA);
        e.attach_pixels(PixelBuffer::filled(10, 10, Rgba::WHITE).unwrap()).unwrap();
        e
    }

    #[test]
    fn test_tick_requires_pixels() {
        let mut e = Entity::new(3, EntityKind::Asteroid, Vec2::ZERO);
        let motion = Settings::default().drift_motion();
        assert!(matches!(
            tick_entity(&mut e, 0.1, &motion),
            Err(SimError::Uninitialized { id: 3 })
        ));
    }

    #[test]
    fn test_tick_refreshes_bounds() {
        let mut e = entity(EntityKind::Asteroid, Vec2::new(100.0, 100.0)).with_velocity(Vec2::new(50.0, 0.0));
        let motion = Settings::default().drift_motion();
        tick_entity(&mut e, 0.2, &motion).unwrap();
        assert_eq!(e.position(), Vec2::new(110.0, 100.0));
        assert_eq!(e.bounds(), Rect::new(110, 100, 10, 10));
    }

    #[test]
    fn test_thrust_follows_facing() {
        let settings = Settings::default();
        let mut ship = entity(EntityKind::Player, Vec2::new(200.0, 150.0)).with_angle(FRAC_PI_2);
        let input = TickInput {
            thrust_forward: true,
            ..Default::default()
        };
        apply_input(&mut ship, &input, &settings);
        assert!(ship.body.acceleration.x.abs() < 1e-3);
        assert!((ship.body.acceleration.y - settings.acceleration).abs() < 1e-3);

        tick_entity(&mut ship, 0.5, &settings.ship_motion()).unwrap();
        assert!(ship.velocity().y > 0.0);
        // Impulse does not persist into the next tick
        assert_eq!(ship.body.acceleration, Vec2::ZERO);
    }

    #[test]
    fn test_conflicting_commands_resolve_right_and_backward() {
        let settings = Settings::default();
        let mut ship = entity(EntityKind::Player, Vec2::new(200.0, 150.0));
        let input = TickInput {
            turn_left: true,
            turn_right: true,
            thrust_forward: true,
            thrust_backward: true,
            fire: false,
        };
        apply_input(&mut ship, &input, &settings);
        assert_eq!(ship.body.angular_acceleration, settings.turn_impulse);
        assert!(ship.body.acceleration.x < 0.0);
    }

    #[test]
    fn test_clamp_left_edge_after_tick() {
        let settings = Settings::default();
        let mut ship = entity(EntityKind::Player, Vec2::new(3.0, 100.0)).with_velocity(Vec2::new(-200.0, 0.0));
        tick_entity(&mut ship, 0.1, &settings.ship_motion()).unwrap();
        assert_eq!(ship.bounds().left(), ARENA.left());
        // Clamping leaves velocity alone
        assert!(ship.velocity().x < 0.0);
    }

    #[test]
    fn test_reflect_right_edge_after_tick() {
        let settings = Settings::default();
        let mut shot = entity(EntityKind::Projectile, Vec2::new(385.0, 100.0))
            .with_policy(BoundaryPolicy::Reflect)
            .with_velocity(Vec2::new(300.0, 40.0));
        tick_entity(&mut shot, 0.1, &settings.drift_motion()).unwrap();
        assert_eq!(shot.velocity(), Vec2::new(-300.0, 40.0));
        // Position is not corrected on the bounce tick
        assert!(shot.bounds().right() > ARENA.right());
    }

    #[test]
    fn test_destroy_once_clear_of_arena() {
        let settings = Settings::default();
        let mut shot = entity(EntityKind::Projectile, Vec2::new(385.0, 100.0)).with_velocity(Vec2::new(100.0, 0.0));
        assert_eq!(
            tick_entity(&mut shot, 0.1, &settings.drift_motion()).unwrap(),
            BoundaryOutcome::Keep
        );
        assert_eq!(
            tick_entity(&mut shot, 0.1, &settings.drift_motion()).unwrap(),
            BoundaryOutcome::Expired
        );
    }

    #[test]
    fn test_motion_profile_by_kind() {
        let settings = Settings::default();
        assert_eq!(motion_profile(EntityKind::Player, &settings).drag, settings.drag);
        assert_eq!(motion_profile(EntityKind::Projectile, &settings).drag, 0.0);
    }
}
