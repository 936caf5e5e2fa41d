//! Asteroid Engine entry point
//!
//! Headless demo harness: runs the crossing-sprites debug scene and a short
//! asteroid-field session, logging collisions. Pass a settings JSON path as
//! the first argument to override the defaults.

use glam::Vec2;
use std::f32::consts::PI;

use asteroid_engine::consts::SIM_DT;
use asteroid_engine::sim::{
    Entity, EntityKind, PixelBuffer, Rgba, TickInput, World, motion_profile, test_collision, tick_entity,
};
use asteroid_engine::{Settings, SimError};

fn main() {
    env_logger::init();
    log::info!("Asteroid Engine (headless) starting...");

    if let Err(err) = run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), SimError> {
    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    crossing_sprites(&settings)?;
    asteroid_session(settings)?;
    Ok(())
}

/// Arrow-shaped ship texture pointing along local +X
fn ship_texture(width: u32, height: u32) -> Result<PixelBuffer, SimError> {
    let half = height as f32 / 2.0;
    PixelBuffer::from_fn(width, height, |x, y| {
        let spread = half * (1.0 - x as f32 / width as f32);
        if (y as f32 + 0.5 - half).abs() <= spread {
            Rgba::WHITE
        } else {
            Rgba::TRANSPARENT
        }
    })
}

/// Round rock texture
fn rock_texture(size: u32) -> Result<PixelBuffer, SimError> {
    let center = Vec2::splat(size as f32 / 2.0);
    let radius = size as f32 / 2.0;
    PixelBuffer::from_fn(size, size, |x, y| {
        let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
        if p.distance(center) <= radius {
            Rgba::new(140, 120, 100, 255)
        } else {
            Rgba::TRANSPARENT
        }
    })
}

/// Two sprites heading toward each other on offset lanes
fn crossing_sprites(settings: &Settings) -> Result<(), SimError> {
    let arena = settings.arena();
    let mid = arena.height as f32 / 2.0;
    let texture = ship_texture(64, 64)?;

    let mut left = Entity::new(1, EntityKind::Asteroid, Vec2::new(0.0, mid - 120.0))
        .with_heading_speed(70.0)
        .with_arena(arena);
    let mut right = Entity::new(2, EntityKind::Asteroid, Vec2::new(arena.width as f32, mid + 120.0))
        .with_angle(PI)
        .with_heading_speed(60.0)
        .with_arena(arena);
    left.attach_pixels(texture.clone())?;
    right.attach_pixels(texture)?;

    let motion = motion_profile(EntityKind::Asteroid, settings);
    let mut was_colliding = false;
    for frame in 0..(20.0 / SIM_DT) as u32 {
        tick_entity(&mut left, SIM_DT, &motion)?;
        tick_entity(&mut right, SIM_DT, &motion)?;

        let colliding = test_collision(&mut left, &mut right)?;
        if colliding != was_colliding {
            log::info!(
                "frame {frame}: sprites {} at {:?} / {:?}",
                if colliding { "collide" } else { "separate" },
                left.bounds(),
                right.bounds()
            );
            was_colliding = colliding;
        }
    }
    Ok(())
}

/// Ship circling and firing through a seeded asteroid field
fn asteroid_session(settings: Settings) -> Result<(), SimError> {
    let mut world = World::new(settings)?;
    world.attach_player_pixels(ship_texture(32, 24)?)?;
    world.set_projectile_prototype(PixelBuffer::filled(4, 4, Rgba::WHITE)?, 1.0)?;
    world.spawn_asteroid_field(0x5eed, &rock_texture(48)?)?;

    let mut contacts = 0;
    for frame in 0..(10.0 / SIM_DT) as u32 {
        let input = TickInput {
            turn_right: frame % 120 < 30,
            thrust_forward: frame % 90 < 45,
            fire: frame % 20 == 0,
            ..Default::default()
        };
        world.tick(&input, SIM_DT)?;

        for contact in world.detect_collisions()? {
            contacts += 1;
            log::info!("frame {frame}: entity {} hit entity {}", contact.a, contact.b);
        }
    }

    log::info!(
        "Session done: {} ticks, {} contacts, {} projectiles live",
        world.time_ticks,
        contacts,
        world.projectiles.len()
    );
    Ok(())
}
