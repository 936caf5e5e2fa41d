//! Local-to-world affine transform for sprites
//!
//! A sprite's pixel grid lives in local space with (0, 0) at its top-left
//! texel. The world transform pivots that grid on `origin`, scales it
//! uniformly, rotates it, then places the pivot at `position`.

use glam::{Affine2, Vec2};

/// Build the local-to-world transform.
///
/// Applied to a local point `p` this yields
/// `position + R(angle) * (scale * (p - origin))`.
pub fn compute(position: Vec2, angle: f32, scale: f32, origin: Vec2) -> Affine2 {
    Affine2::from_scale_angle_translation(Vec2::splat(scale), angle, position)
        * Affine2::from_translation(-origin)
}

/// Transform mapping points in `a`'s local space into `b`'s local space
#[inline]
pub fn relative(a: &Affine2, b: &Affine2) -> Affine2 {
    b.inverse() * *a
}

/// Whether `transform` collapses space (zero scale) and cannot be inverted
#[inline]
pub fn is_singular(transform: &Affine2) -> bool {
    let det = transform.matrix2.determinant();
    det == 0.0 || !det.is_finite()
}
