//! Broad- and narrow-phase collision between sprites
//!
//! The broad phase compares cached bounding rectangles. Only pairs that pass
//! it get the per-pixel test, which reports a hit at the first texel pair
//! where both sprites are opaque.

use glam::Vec2;

use super::entity::Entity;
use super::pixels::PixelBuffer;
use super::transform;
use crate::SimError;

/// Which per-pixel walk a pair of entities needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrowPhase {
    /// Both sprites map texels 1:1 onto world pixels
    WorldAligned,
    /// At least one sprite is rotated or scaled
    TransformAware,
}

impl NarrowPhase {
    pub fn select(a: &Entity, b: &Entity) -> Self {
        if a.is_axis_aligned() && b.is_axis_aligned() {
            NarrowPhase::WorldAligned
        } else {
            NarrowPhase::TransformAware
        }
    }
}

/// Bounding-rectangle overlap (shared edges count)
#[inline]
pub fn broad_phase(a: &Entity, b: &Entity) -> bool {
    a.bounds().intersects(&b.bounds())
}

/// Per-pixel overlap test, skipping the broad phase
pub fn pixels_overlap(a: &Entity, b: &Entity) -> Result<bool, SimError> {
    let (pixels_a, pixels_b) = (a.pixels()?, b.pixels()?);

    Ok(match NarrowPhase::select(a, b) {
        NarrowPhase::WorldAligned => world_aligned_overlap(a, pixels_a, b, pixels_b),
        NarrowPhase::TransformAware => transformed_overlap(a, pixels_a, b, pixels_b),
    })
}

/// Walk the world-space overlap of two unrotated, unscaled sprites
fn world_aligned_overlap(a: &Entity, pixels_a: &PixelBuffer, b: &Entity, pixels_b: &PixelBuffer) -> bool {
    let (rect_a, rect_b) = (a.bounds(), b.bounds());
    let Some(overlap) = rect_a.intersection(&rect_b) else {
        return false;
    };

    for y in overlap.top()..overlap.bottom() {
        for x in overlap.left()..overlap.right() {
            if pixels_a.is_opaque_at(x - rect_a.left(), y - rect_a.top())
                && pixels_b.is_opaque_at(x - rect_b.left(), y - rect_b.top())
            {
                return true;
            }
        }
    }

    false
}

/// Map every texel of `a` into `b`'s local space and sample both
fn transformed_overlap(a: &Entity, pixels_a: &PixelBuffer, b: &Entity, pixels_b: &PixelBuffer) -> bool {
    let transform_b = b.transform();
    // A collapsed sprite covers no pixels
    if transform::is_singular(&transform_b) || transform::is_singular(&a.transform()) {
        return false;
    }

    let a_to_b = transform::relative(&a.transform(), &transform_b);

    // Unit steps in b's space for one texel along a's local X and Y
    let step_x = a_to_b.transform_vector2(Vec2::X);
    let step_y = a_to_b.transform_vector2(Vec2::Y);
    let mut column_start = a_to_b.transform_point2(Vec2::ZERO);

    for x in 0..pixels_a.width() as i32 {
        let mut target = column_start;
        for y in 0..pixels_a.height() as i32 {
            // Truncation toward zero, out-of-range targets are skipped
            let (target_x, target_y) = (target.x as i32, target.y as i32);
            if pixels_b.is_opaque_at(target_x, target_y) && pixels_a.is_opaque_at(x, y) {
                return true;
            }
            target += step_y;
        }
        column_start += step_x;
    }

    false
}

/// Broad then narrow phase; no side effects
pub fn collides(a: &Entity, b: &Entity) -> Result<bool, SimError> {
    // Surface missing pixels even when the rectangles miss
    a.pixels()?;
    b.pixels()?;

    if !broad_phase(a, b) {
        return Ok(false);
    }
    pixels_overlap(a, b)
}

/// Full pairwise test: both `collided` flags are overwritten with the result
pub fn test_collision(a: &mut Entity, b: &mut Entity) -> Result<bool, SimError> {
    let hit = collides(a, b)?;
    a.set_collided(hit);
    b.set_collided(hit);
    if hit {
        log::debug!("Collision between entity {} and entity {}", a.id, b.id);
    }
    Ok(hit)
}
