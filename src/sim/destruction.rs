//! Asteroid splitting, bullet hits and explosion bursts

use std::f32::consts::{FRAC_PI_4, TAU};

use glam::Vec2;

use super::defs::PaletteColor;
use super::entity::{Entity, EntityState};
use super::state::{Particle, World};
use crate::rotated_degrees;

/// Fragments produced when a large or medium asteroid breaks
pub const FRAGMENT_COUNT: usize = 2;

/// Burst of debris around `entity`, one particle per two units of on-screen area
pub fn explode_entity(world: &mut World, entity: &Entity) {
    let count = (entity.area() as i32 / 2).max(0) as usize;
    let r = entity.effective_radius();
    let min_life = (world.fps() as f32 * 0.25) as i32;
    let max_life = world.fps() as i32;

    let mut debris = Vec::with_capacity(count);
    for _ in 0..count {
        let rng = &mut world.rng;

        let offset = Vec2::new(0.0, rng.float(-r, 0.0));
        let position = rotated_degrees(offset, rng.angle_degrees()) + entity.position;

        let direction = rotated_degrees(Vec2::X, rng.angle_degrees());
        let velocity = direction * rng.float(15.0, 40.0) + entity.velocity;

        let color = rng
            .pick(entity.colors.as_slice())
            .unwrap_or(PaletteColor::White);
        let lifespan = rng.int(min_life, max_life);

        debris.push(Particle {
            position,
            velocity,
            lifespan,
            color,
        });
    }

    world.spawn_particles(debris);
}

/// Mark an asteroid for removal and spawn its fragments
pub fn destroy_asteroid(world: &mut World, asteroid: &mut Entity) {
    asteroid.state = EntityState::PendingRemoval;

    let Some(fragment_kind) = asteroid.kind.fragment_kind() else {
        log::debug!("{} destroyed at {:?}", asteroid.kind, asteroid.position);
        return;
    };

    let r = asteroid.effective_radius();
    for _ in 0..FRAGMENT_COUNT {
        let rng = &mut world.rng;

        let offset = rotated_degrees(Vec2::new(0.0, r), rng.angle_degrees());
        let rotation = rng.float(0.0, TAU) + rng.float(-FRAC_PI_4, FRAC_PI_4);
        let angular_speed = asteroid.angular_speed * rng.float(2.0, 4.0);
        let speed_up = asteroid.velocity * rng.float(1.5, 2.0);
        let velocity = rotated_degrees(speed_up, rng.float(-45.0, 45.0));

        let fragment = world.spawn_entity(fragment_kind, asteroid.position + offset, rotation);
        fragment.angular_speed = angular_speed;
        fragment.velocity = velocity;
    }

    log::debug!(
        "{} split into {} {}s at {:?}",
        asteroid.kind,
        FRAGMENT_COUNT,
        fragment_kind,
        asteroid.position
    );
}

/// Bullets consume themselves on asteroids and ignore everything else
pub fn bullet_contact(world: &mut World, bullet: &mut Entity, hit: &mut Entity) {
    if !hit.kind.is_asteroid() {
        return;
    }

    bullet.state = EntityState::PendingRemoval;
    destroy_asteroid(world, hit);
    explode_entity(world, hit);
}
