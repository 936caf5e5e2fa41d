//! Entity simulation
//!
//! Everything here is synchronous and frame-driven. The host calls
//! [`World::tick`] once per frame, then [`World::detect_collisions`], then
//! reads transforms and flags back for drawing. No rendering or platform
//! dependencies.

pub mod boundary;
pub mod bounds;
pub mod collision;
pub mod entity;
pub mod kinematics;
pub mod pixels;
pub mod state;
pub mod tick;
pub mod transform;

pub use boundary::{BoundaryOutcome, BoundaryPolicy, reflect_velocity};
pub use bounds::Rect;
pub use collision::{NarrowPhase, broad_phase, collides, pixels_overlap, test_collision};
pub use entity::{Entity, EntityId, EntityKind};
pub use kinematics::{KinematicBody, MotionProfile};
pub use pixels::{PixelBuffer, Rgba};
pub use state::{Contact, World};
pub use tick::{TickInput, apply_input, motion_profile, tick_entity};
