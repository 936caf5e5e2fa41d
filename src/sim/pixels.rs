//! Immutable, shared RGBA pixel grids used for per-pixel collision

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};

use crate::SimError;

/// A single texel
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Any non-zero alpha counts as solid for collision
    #[inline]
    pub const fn is_opaque(&self) -> bool {
        self.a != 0
    }
}

/// Row-major pixel grid with fixed dimensions.
///
/// Cloning is cheap: clones share the same allocation, so every projectile
/// fired from one prototype reads the same texels.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Arc<[Rgba]>,
}

impl PixelBuffer {
    /// Wrap `pixels`, which must hold exactly `width * height` texels
    pub fn new(width: u32, height: u32, pixels: Vec<Rgba>) -> Result<Self, SimError> {
        if width == 0 || height == 0 {
            return Err(SimError::EmptyPixelBuffer { width, height });
        }
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(SimError::PixelDataLength {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels: pixels.into(),
        })
    }

    /// Build from tightly packed RGBA8 bytes as produced by image decoders
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Result<Self, SimError> {
        if bytes.len() % 4 != 0 {
            return Err(SimError::RawPixelData(bytes.len()));
        }
        // Rgba has alignment 1, so the cast cannot fail once the length divides
        let pixels = bytemuck::cast_slice::<u8, Rgba>(bytes).to_vec();
        Self::new(width, height, pixels)
    }

    /// Uniformly filled buffer
    pub fn filled(width: u32, height: u32, color: Rgba) -> Result<Self, SimError> {
        Self::new(width, height, vec![color; width as usize * height as usize])
    }

    /// Build by evaluating `f(x, y)` for every texel
    pub fn from_fn(
        width: u32,
        height: u32,
        mut f: impl FnMut(u32, u32) -> Rgba,
    ) -> Result<Self, SimError> {
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self::new(width, height, pixels)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Texel at (x, y); `None` outside the grid
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<Rgba> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        self.pixels
            .get(x as usize + y as usize * self.width as usize)
            .copied()
    }

    /// Whether (x, y) is inside the grid and opaque
    #[inline]
    pub fn is_opaque_at(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_some_and(|p| p.is_opaque())
    }

    /// Whether two buffers share one allocation
    pub fn shares_pixels_with(&self, other: &PixelBuffer) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels)
    }

    /// Number of live handles to the underlying pixels
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.pixels)
    }
}
