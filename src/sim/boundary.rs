//! Arena edge behaviors

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bounds::Rect;

/// Passes allowed to settle a clamp when truncation leaves a 1 px residue
const MAX_CLAMP_PASSES: usize = 3;

/// What an entity does when its bounding rectangle meets the arena edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoundaryPolicy {
    /// Shift back inside so the crossed edge sits flush with the arena
    #[default]
    Clamp,
    /// Bounce: flip the velocity component heading out of the arena
    Reflect,
    /// Expire once fully outside the arena
    Destroy,
}

/// Result of applying a boundary policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryOutcome {
    /// Entity stays in play
    Keep,
    /// Entity left the arena and should be removed
    Expired,
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Translation that brings `bounds` back inside `arena`.
///
/// Left beats right and top beats bottom when the rectangle overflows both.
pub fn clamp_offset(bounds: &Rect, arena: &Rect) -> (i32, i32) {
    let dx = if bounds.left() < arena.left() {
        arena.left() - bounds.left()
    } else if bounds.right() > arena.right() {
        arena.right() - bounds.right()
    } else {
        0
    };

    let dy = if bounds.top() < arena.top() {
        arena.top() - bounds.top()
    } else if bounds.bottom() > arena.bottom() {
        arena.bottom() - bounds.bottom()
    } else {
        0
    };

    (dx, dy)
}

/// Shift `position` until `bounds` no longer overflows `arena`.
///
/// `rebound` recomputes the bounding rectangle for a new position. Each axis
/// keeps correcting the side it first violated, so an entity wider than the
/// arena ends flush left rather than oscillating.
pub fn clamp(
    position: &mut Vec2,
    bounds: &mut Rect,
    arena: &Rect,
    mut rebound: impl FnMut(Vec2) -> Rect,
) {
    let (first_dx, first_dy) = clamp_offset(bounds, arena);
    if first_dx == 0 && first_dy == 0 {
        return;
    }

    let mut dx = first_dx;
    let mut dy = first_dy;
    for _ in 0..MAX_CLAMP_PASSES {
        *position += Vec2::new(dx as f32, dy as f32);
        *bounds = rebound(*position);

        let (next_dx, next_dy) = clamp_offset(bounds, arena);
        dx = if next_dx.signum() == first_dx.signum() { next_dx } else { 0 };
        dy = if next_dy.signum() == first_dy.signum() { next_dy } else { 0 };
        if dx == 0 && dy == 0 {
            break;
        }
    }
}

/// Flip velocity components that carry `bounds` further past an arena edge.
///
/// Position is left alone; the reversed velocity separates the entity on the
/// following ticks.
pub fn reflect(velocity: &mut Vec2, bounds: &Rect, arena: &Rect) {
    if (bounds.left() < arena.left() && velocity.x < 0.0)
        || (bounds.right() > arena.right() && velocity.x > 0.0)
    {
        *velocity = reflect_velocity(*velocity, Vec2::X);
    }
    if (bounds.top() < arena.top() && velocity.y < 0.0)
        || (bounds.bottom() > arena.bottom() && velocity.y > 0.0)
    {
        *velocity = reflect_velocity(*velocity, Vec2::Y);
    }
}

/// Whether `bounds` has completely left `arena`.
///
/// Sitting flush against an edge covers no arena pixel, so it counts as gone.
#[inline]
pub fn has_left_arena(bounds: &Rect, arena: &Rect) -> bool {
    bounds.intersection(arena).is_none()
}
