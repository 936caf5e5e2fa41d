//! World state: the player ship, its projectiles and the asteroid field
//!
//! The host loop drives it once per frame: `tick` with the frame's input and
//! elapsed time, then `detect_collisions`, then reads entities back for
//! drawing.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use std::f32::consts::TAU;

use super::bounds::Rect;
use super::collision::collides;
use super::entity::{Entity, EntityId, EntityKind};
use super::pixels::PixelBuffer;
use super::tick::{TickInput, apply_input, motion_profile, tick_entity};
use crate::{Settings, SimError, heading};

/// Minimum spawn distance between an asteroid and the ship
const SPAWN_CLEARANCE: f32 = 150.0;
/// Placement attempts per asteroid before accepting any spot
const SPAWN_ATTEMPTS: u32 = 16;

/// Id reserved for the projectile prototype (never active)
const PROTOTYPE_ID: EntityId = 0;

/// A confirmed pixel-level overlap found by `detect_collisions`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub a: EntityId,
    pub b: EntityId,
}

/// Everything the simulation owns
#[derive(Debug, Clone)]
pub struct World {
    pub settings: Settings,
    pub arena: Rect,
    pub player: Entity,
    /// Active asteroids, in spawn order
    pub asteroids: Vec<Entity>,
    /// Live projectiles, in firing order
    pub projectiles: Vec<Entity>,
    /// Template cloned for each shot; shares its pixels with every clone
    projectile_prototype: Option<Entity>,
    /// Fire command state from the previous tick (edge detection)
    fire_held: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    next_id: EntityId,
}

impl World {
    /// Create a world with the ship centered in the arena.
    ///
    /// The ship has no pixels yet; attach them before the first tick.
    pub fn new(settings: Settings) -> Result<Self, SimError> {
        settings.validate()?;
        let arena = settings.arena();
        let center = Vec2::new(
            arena.left() as f32 + arena.width as f32 / 2.0,
            arena.top() as f32 + arena.height as f32 / 2.0,
        );

        let player_id = PROTOTYPE_ID + 1;
        let player = Entity::new(player_id, EntityKind::Player, center).with_arena(arena);

        let world = Self {
            settings,
            arena,
            player,
            asteroids: Vec::new(),
            projectiles: Vec::new(),
            projectile_prototype: None,
            fire_held: false,
            time_ticks: 0,
            next_id: player_id + 1,
        };

        log::info!("World created: arena {}x{}", arena.width, arena.height);
        Ok(world)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Attach the ship texture and pivot it on its center
    pub fn attach_player_pixels(&mut self, pixels: PixelBuffer) -> Result<(), SimError> {
        self.player.attach_pixels(pixels)?;
        self.player.center_origin()
    }

    /// Register the texture every fired projectile will share
    pub fn set_projectile_prototype(&mut self, pixels: PixelBuffer, scale: f32) -> Result<(), SimError> {
        let mut prototype = Entity::new(PROTOTYPE_ID, EntityKind::Projectile, Vec2::ZERO)
            .with_scale(scale)
            .with_arena(self.arena)
            .with_policy(self.settings.projectile_boundary);
        prototype.attach_pixels(pixels)?;
        prototype.center_origin()?;
        self.projectile_prototype = Some(prototype);
        Ok(())
    }

    /// Fire a projectile from the ship.
    ///
    /// Returns `Ok(None)` when the live-projectile cap is reached.
    pub fn fire(&mut self) -> Result<Option<EntityId>, SimError> {
        if self.projectiles.len() >= self.settings.projectile_cap {
            log::debug!("Fire ignored: {} projectiles live", self.projectiles.len());
            return Ok(None);
        }
        let Some(prototype) = &self.projectile_prototype else {
            return Err(SimError::NoProjectilePrototype);
        };

        let angle = self.player.angle();
        let velocity = self.player.velocity() + heading(angle) * self.settings.projectile_speed;
        let mut projectile = prototype.clone();
        projectile.id = self.next_entity_id();
        projectile.set_pose(self.player.position(), angle);
        projectile.body.velocity = velocity;

        let id = projectile.id;
        log::debug!("Projectile {} fired at {:?} with velocity {:?}", id, projectile.position(), velocity);
        self.projectiles.push(projectile);
        Ok(Some(id))
    }

    /// Add one asteroid; `pixels` is shared, not copied
    pub fn spawn_asteroid(
        &mut self,
        pixels: &PixelBuffer,
        position: Vec2,
        angle: f32,
        speed: f32,
        spin: f32,
    ) -> Result<EntityId, SimError> {
        let id = self.next_entity_id();
        let mut asteroid = Entity::new(id, EntityKind::Asteroid, position)
            .with_angle(angle)
            .with_heading_speed(speed)
            .with_angular_velocity(spin)
            .with_arena(self.arena);
        asteroid.attach_pixels(pixels.clone())?;
        asteroid.center_origin()?;
        self.asteroids.push(asteroid);
        Ok(id)
    }

    /// Scatter `settings.asteroid_count` asteroids with a seeded RNG.
    ///
    /// The same seed always produces the same field.
    pub fn spawn_asteroid_field(&mut self, seed: u64, pixels: &PixelBuffer) -> Result<Vec<EntityId>, SimError> {
        let mut rng = Pcg32::seed_from_u64(seed);
        let arena = self.arena;
        let ship = self.player.position();
        let (min_speed, max_speed) = (self.settings.asteroid_min_speed, self.settings.asteroid_max_speed);
        let max_spin = self.settings.asteroid_max_spin;

        let mut ids = Vec::with_capacity(self.settings.asteroid_count as usize);
        for _ in 0..self.settings.asteroid_count {
            let mut position = Vec2::ZERO;
            for _ in 0..SPAWN_ATTEMPTS {
                position = Vec2::new(
                    rng.random_range(arena.left() as f32..=arena.right() as f32),
                    rng.random_range(arena.top() as f32..=arena.bottom() as f32),
                );
                if position.distance(ship) >= SPAWN_CLEARANCE {
                    break;
                }
            }
            let angle = rng.random_range(0.0..TAU);
            let speed = rng.random_range(min_speed..=max_speed);
            let spin = rng.random_range(-max_spin..=max_spin);

            ids.push(self.spawn_asteroid(pixels, position, angle, speed, spin)?);
        }

        log::info!("Spawned {} asteroids (seed {})", ids.len(), seed);
        Ok(ids)
    }

    /// Advance the whole world by `dt` seconds
    pub fn tick(&mut self, input: &TickInput, dt: f32) -> Result<(), SimError> {
        self.time_ticks += 1;

        if self.player.kind.takes_input() {
            apply_input(&mut self.player, input, &self.settings);
        }

        // Fire on the press, not while held
        if input.fire && !self.fire_held {
            match self.fire() {
                Err(SimError::NoProjectilePrototype) => {
                    log::warn!("Fire pressed with no projectile prototype registered");
                }
                other => {
                    other?;
                }
            }
        }
        self.fire_held = input.fire;

        let ship_motion = motion_profile(self.player.kind, &self.settings);
        tick_entity(&mut self.player, dt, &ship_motion)?;

        for asteroid in &mut self.asteroids {
            let motion = motion_profile(asteroid.kind, &self.settings);
            tick_entity(asteroid, dt, &motion)?;
        }

        for projectile in &mut self.projectiles {
            let motion = motion_profile(projectile.kind, &self.settings);
            tick_entity(projectile, dt, &motion)?;
        }

        // Dropping an expired projectile releases its pixel handle
        let before = self.projectiles.len();
        self.projectiles.retain(|p| !p.is_expired());
        if self.projectiles.len() != before {
            log::debug!("Removed {} expired projectiles", before - self.projectiles.len());
        }

        Ok(())
    }

    /// Test ship/asteroid and projectile/asteroid pairs.
    ///
    /// Every `collided` flag is rewritten: cleared first, then set for each
    /// entity in at least one contact.
    pub fn detect_collisions(&mut self) -> Result<Vec<Contact>, SimError> {
        self.player.set_collided(false);
        for entity in self.asteroids.iter_mut().chain(self.projectiles.iter_mut()) {
            entity.set_collided(false);
        }

        let mut contacts = Vec::new();
        for i in 0..self.asteroids.len() {
            if collides(&self.player, &self.asteroids[i])? {
                contacts.push(Contact {
                    a: self.player.id,
                    b: self.asteroids[i].id,
                });
                self.player.set_collided(true);
                self.asteroids[i].set_collided(true);
            }

            for j in 0..self.projectiles.len() {
                if collides(&self.projectiles[j], &self.asteroids[i])? {
                    contacts.push(Contact {
                        a: self.projectiles[j].id,
                        b: self.asteroids[i].id,
                    });
                    self.projectiles[j].set_collided(true);
                    self.asteroids[i].set_collided(true);
                }
            }
        }

        for contact in &contacts {
            log::debug!("Contact: {} <-> {}", contact.a, contact.b);
        }
        Ok(contacts)
    }

    /// All active entities, ship first (render order)
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        std::iter::once(&self.player)
            .chain(self.asteroids.iter())
            .chain(self.projectiles.iter())
    }

    /// Look up an active entity
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities().find(|e| e.id == id)
    }
}
