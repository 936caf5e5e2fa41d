//! Sprite entities: player ship, asteroids and projectiles
//!
//! All kinds share one struct. The kind tag picks the input source and motion
//! limits; the boundary policy is fixed when the entity is built.

use glam::{Affine2, Vec2};

use super::boundary::{self, BoundaryOutcome, BoundaryPolicy};
use super::bounds::{self, Rect};
use super::kinematics::KinematicBody;
use super::pixels::PixelBuffer;
use super::transform;
use crate::{SimError, heading, normalize_angle};

/// Stable entity identifier
pub type EntityId = u32;

/// Entity kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// Keyboard-driven ship
    Player,
    /// Drifting obstacle
    Asteroid,
    /// Fired shot, constant velocity
    Projectile,
}

impl EntityKind {
    /// Policy an entity of this kind gets unless told otherwise
    pub fn default_policy(&self) -> BoundaryPolicy {
        match self {
            EntityKind::Player | EntityKind::Asteroid => BoundaryPolicy::Clamp,
            EntityKind::Projectile => BoundaryPolicy::Destroy,
        }
    }

    /// Whether per-tick input commands steer this kind
    pub fn takes_input(&self) -> bool {
        matches!(self, EntityKind::Player)
    }
}

/// A sprite taking part in motion and collision.
///
/// Pose fields are private: every setter rebuilds the cached transform and
/// bounds so they never go stale.
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    position: Vec2,
    /// Radians, kept in [0, 2π)
    angle: f32,
    scale: f32,
    /// Pivot in local pixel space
    origin: Vec2,
    pub body: KinematicBody,
    pixels: Option<PixelBuffer>,
    transform: Affine2,
    bounds: Rect,
    collided: bool,
    expired: bool,
    arena: Option<Rect>,
    policy: BoundaryPolicy,
}

impl Entity {
    pub fn new(id: EntityId, kind: EntityKind, position: Vec2) -> Self {
        Self {
            id,
            kind,
            position,
            angle: 0.0,
            scale: 1.0,
            origin: Vec2::ZERO,
            body: KinematicBody::default(),
            pixels: None,
            transform: Affine2::IDENTITY,
            bounds: Rect::default(),
            collided: false,
            expired: false,
            arena: None,
            policy: kind.default_policy(),
        }
    }

    pub fn with_angle(mut self, angle: f32) -> Self {
        self.set_angle(angle);
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.set_scale(scale);
        self
    }

    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.set_origin(origin);
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.body.velocity = velocity;
        self
    }

    /// Move at `speed` along the current facing
    pub fn with_heading_speed(mut self, speed: f32) -> Self {
        self.body.velocity = heading(self.angle) * speed;
        self
    }

    pub fn with_angular_velocity(mut self, angular_velocity: f32) -> Self {
        self.body.angular_velocity = angular_velocity;
        self
    }

    pub fn with_arena(mut self, arena: Rect) -> Self {
        self.arena = Some(arena);
        self
    }

    pub fn with_policy(mut self, policy: BoundaryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Attach texture data; transform and bounds become valid from here on.
    ///
    /// A later attach may swap the texels but not the dimensions.
    pub fn attach_pixels(&mut self, pixels: PixelBuffer) -> Result<(), SimError> {
        if let Some(current) = &self.pixels {
            if (current.width(), current.height()) != (pixels.width(), pixels.height()) {
                return Err(SimError::PixelDimensionsChanged {
                    id: self.id,
                    width: current.width(),
                    height: current.height(),
                    new_width: pixels.width(),
                    new_height: pixels.height(),
                });
            }
        }

        log::debug!(
            "Entity {} ({:?}) attached {}x{} pixels",
            self.id,
            self.kind,
            pixels.width(),
            pixels.height()
        );
        self.pixels = Some(pixels);
        self.refresh_bounds();
        Ok(())
    }

    /// Pivot on the texture center
    pub fn center_origin(&mut self) -> Result<(), SimError> {
        let pixels = self.pixels()?;
        self.origin = Vec2::new(pixels.width() as f32, pixels.height() as f32) / 2.0;
        self.refresh_bounds();
        Ok(())
    }

    /// Pixel data, or `Uninitialized` before `attach_pixels`
    pub fn pixels(&self) -> Result<&PixelBuffer, SimError> {
        self.pixels
            .as_ref()
            .ok_or(SimError::Uninitialized { id: self.id })
    }

    /// Recompute transform and bounds from position, angle, scale and origin
    pub fn refresh(&mut self) -> Result<(), SimError> {
        self.pixels()?;
        self.refresh_bounds();
        Ok(())
    }

    fn refresh_bounds(&mut self) {
        self.transform = transform::compute(self.position, self.angle, self.scale, self.origin);
        if let Some(pixels) = &self.pixels {
            self.bounds = bounds::compute(&self.transform, pixels.width(), pixels.height());
        }
    }

    /// Apply this entity's boundary policy against its arena
    pub fn apply_boundary(&mut self) -> Result<BoundaryOutcome, SimError> {
        let Some(arena) = self.arena else {
            return Ok(BoundaryOutcome::Keep);
        };
        let (width, height) = {
            let pixels = self.pixels()?;
            (pixels.width(), pixels.height())
        };

        match self.policy {
            BoundaryPolicy::Clamp => {
                let (angle, scale, origin) = (self.angle, self.scale, self.origin);
                boundary::clamp(&mut self.position, &mut self.bounds, &arena, |position| {
                    let t = transform::compute(position, angle, scale, origin);
                    bounds::compute(&t, width, height)
                });
                self.transform = transform::compute(self.position, angle, scale, origin);
            }
            BoundaryPolicy::Reflect => {
                boundary::reflect(&mut self.body.velocity, &self.bounds, &arena);
            }
            BoundaryPolicy::Destroy => {
                if boundary::has_left_arena(&self.bounds, &arena) {
                    self.expired = true;
                    return Ok(BoundaryOutcome::Expired);
                }
            }
        }
        Ok(BoundaryOutcome::Keep)
    }

    /// Turn by `delta` radians (wraps)
    pub fn rotate_by(&mut self, delta: f32) {
        self.set_angle(self.angle + delta);
    }

    pub fn set_angle(&mut self, angle: f32) {
        self.angle = normalize_angle(angle);
        self.refresh_bounds();
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.refresh_bounds();
    }

    /// Move and turn in one step, rebuilding the transform once
    pub fn set_pose(&mut self, position: Vec2, angle: f32) {
        self.position = position;
        self.angle = normalize_angle(angle);
        self.refresh_bounds();
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
        self.refresh_bounds();
    }

    pub fn set_origin(&mut self, origin: Vec2) {
        self.origin = origin;
        self.refresh_bounds();
    }

    /// Unrotated and unscaled: texels map 1:1 onto world pixels
    pub fn is_axis_aligned(&self) -> bool {
        self.angle == 0.0 && self.scale == 1.0
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn velocity(&self) -> Vec2 {
        self.body.velocity
    }

    /// Cached bounding rectangle
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Cached local-to-world transform
    pub fn transform(&self) -> Affine2 {
        self.transform
    }

    /// Result of the last collision test touching this entity
    pub fn collided(&self) -> bool {
        self.collided
    }

    pub fn set_collided(&mut self, collided: bool) {
        self.collided = collided;
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }

    /// Overwrite the cached bounds without touching the pose
    #[cfg(test)]
    pub(crate) fn force_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    pub fn policy(&self) -> BoundaryPolicy {
        self.policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::pixels::Rgba;
    use std::f32::consts::{FRAC_PI_2, TAU};

    fn square(size: u32) -> PixelBuffer {
        PixelBuffer::filled(size, size, Rgba::WHITE).unwrap()
    }

    #[test]
    fn test_uninitialized_entity_errors() {
        let mut e = Entity::new(7, EntityKind::Asteroid, Vec2::ZERO);
        assert!(matches!(e.refresh(), Err(SimError::Uninitialized { id: 7 })));
        assert!(matches!(e.center_origin(), Err(SimError::Uninitialized { id: 7 })));
    }

    #[test]
    fn test_identity_bounds_after_attach() {
        let mut e = Entity::new(1, EntityKind::Asteroid, Vec2::new(30.0, 40.0));
        e.attach_pixels(square(12)).unwrap();
        assert_eq!(e.bounds(), Rect::new(30, 40, 12, 12));
    }

    #[test]
    fn test_center_origin_pivots_on_position() {
        let mut e = Entity::new(1, EntityKind::Player, Vec2::new(100.0, 100.0));
        e.attach_pixels(square(20)).unwrap();
        e.center_origin().unwrap();
        assert_eq!(e.origin(), Vec2::new(10.0, 10.0));
        assert_eq!(e.bounds(), Rect::new(90, 90, 20, 20));
    }

    #[test]
    fn test_full_turn_restores_angle_and_bounds() {
        let mut e = Entity::new(1, EntityKind::Player, Vec2::new(200.0, 150.0)).with_angle(0.7);
        e.attach_pixels(square(16)).unwrap();
        e.center_origin().unwrap();
        let before = e.bounds();
        let angle = e.angle();

        e.rotate_by(TAU);
        e.refresh().unwrap();
        assert!((e.angle() - angle).abs() < 1e-4);
        let after = e.bounds();
        assert!((after.left() - before.left()).abs() <= 1);
        assert!((after.top() - before.top()).abs() <= 1);
        assert!((after.right() - before.right()).abs() <= 1);
        assert!((after.bottom() - before.bottom()).abs() <= 1);
    }

    #[test]
    fn test_heading_speed_follows_angle() {
        let e = Entity::new(1, EntityKind::Asteroid, Vec2::ZERO)
            .with_angle(FRAC_PI_2)
            .with_heading_speed(60.0);
        assert!(e.velocity().x.abs() < 1e-4);
        assert!((e.velocity().y - 60.0).abs() < 1e-4);
    }

    #[test]
    fn test_kind_selects_default_policy() {
        assert_eq!(Entity::new(1, EntityKind::Player, Vec2::ZERO).policy(), BoundaryPolicy::Clamp);
        assert_eq!(
            Entity::new(2, EntityKind::Projectile, Vec2::ZERO).policy(),
            BoundaryPolicy::Destroy
        );
        assert!(EntityKind::Player.takes_input());
        assert!(!EntityKind::Asteroid.takes_input());
    }

    #[test]
    fn test_no_arena_keeps_entity() {
        let mut e = Entity::new(1, EntityKind::Projectile, Vec2::new(-500.0, 0.0));
        e.attach_pixels(square(4)).unwrap();
        assert_eq!(e.apply_boundary().unwrap(), BoundaryOutcome::Keep);
    }

    #[test]
    fn test_destroy_marks_expired() {
        let mut e = Entity::new(1, EntityKind::Projectile, Vec2::new(300.0, 10.0))
            .with_arena(Rect::new(0, 0, 200, 100));
        e.attach_pixels(square(4)).unwrap();
        assert_eq!(e.apply_boundary().unwrap(), BoundaryOutcome::Expired);
        assert!(e.is_expired());
    }

    #[test]
    fn test_reattach_keeps_dimensions() {
        let mut e = Entity::new(4, EntityKind::Asteroid, Vec2::ZERO);
        e.attach_pixels(square(8)).unwrap();
        // Same size swaps texels
        e.attach_pixels(PixelBuffer::filled(8, 8, Rgba::TRANSPARENT).unwrap()).unwrap();
        assert!(matches!(
            e.attach_pixels(square(9)),
            Err(SimError::PixelDimensionsChanged { id: 4, width: 8, new_width: 9, .. })
        ));
        assert_eq!(e.bounds(), Rect::new(0, 0, 8, 8));
    }

    #[test]
    fn test_pose_setters_refresh_bounds() {
        let mut e = Entity::new(1, EntityKind::Player, Vec2::new(50.0, 50.0));
        e.attach_pixels(square(10)).unwrap();

        e.set_position(Vec2::new(70.0, 20.0));
        assert_eq!(e.bounds(), Rect::new(70, 20, 10, 10));

        e.set_scale(2.0);
        assert_eq!(e.bounds(), Rect::new(70, 20, 20, 20));

        e.set_origin(Vec2::new(5.0, 5.0));
        assert_eq!(e.bounds(), Rect::new(60, 10, 20, 20));

        e.set_angle(FRAC_PI_2);
        assert!(!e.is_axis_aligned());
        assert_eq!(e.transform(), transform::compute(e.position(), FRAC_PI_2, 2.0, Vec2::new(5.0, 5.0)));
    }
}
