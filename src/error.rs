//! Simulation error type

use thiserror::Error;

use crate::sim::EntityId;

/// Errors raised by the simulation core.
///
/// Only precondition violations and malformed inputs end up here. Pixel
/// lookups that fall outside a buffer during the narrow phase and fire
/// commands past the projectile cap are normal control flow.
#[derive(Debug, Error)]
pub enum SimError {
    /// Transform, bounds or collision requested before pixels were attached
    #[error("entity {id} has no pixel data attached")]
    Uninitialized { id: EntityId },

    /// Texture dimensions are fixed once an entity has pixels
    #[error("entity {id} already holds {width}x{height} pixels, cannot attach {new_width}x{new_height}")]
    PixelDimensionsChanged {
        id: EntityId,
        width: u32,
        height: u32,
        new_width: u32,
        new_height: u32,
    },

    /// Pixel slice does not match `width * height`
    #[error("pixel data holds {actual} pixels, expected {expected}")]
    PixelDataLength { expected: usize, actual: usize },

    /// Zero-sized textures cannot take part in collisions
    #[error("pixel buffer must be at least 1x1 (got {width}x{height})")]
    EmptyPixelBuffer { width: u32, height: u32 },

    /// Raw RGBA8 bytes not a whole number of pixels
    #[error("raw pixel data length {0} is not a multiple of 4")]
    RawPixelData(usize),

    /// A projectile was requested before a prototype was registered
    #[error("no projectile prototype registered")]
    NoProjectilePrototype,

    /// Settings failed validation
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// Settings JSON could not be parsed
    #[error("failed to parse settings: {0}")]
    Settings(#[from] serde_json::Error),

    /// Settings file could not be read
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
}
