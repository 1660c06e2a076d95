//! Game session: owns the world, the level number and the frame counter

use std::f32::consts::TAU;

use glam::Vec2;

use crate::settings::{Settings, SettingsError};
use crate::sim::defs::{DefinitionTable, EntityKind};
use crate::sim::state::World;
use crate::sim::tick::{TickInput, tick};

/// Asteroid launch speed range, units/s
const ASTEROID_MIN_SPEED: f32 = 7.0;
const ASTEROID_MAX_SPEED: f32 = 13.0;
/// Largest spin of a fresh asteroid, degrees/s either way
const ASTEROID_MAX_SPIN_DEGREES: f32 = 60.0;

#[derive(Debug, Clone)]
pub struct Game {
    settings: Settings,
    world: World,
    level: u32,
    frame: u64,
}

impl Game {
    /// World with stars and an appearing player, at level 1 with no asteroids yet
    pub fn new(settings: Settings, defs: DefinitionTable) -> Result<Self, SettingsError> {
        let world = World::new(&settings, defs)?;
        Ok(Self {
            settings,
            world,
            level: 1,
            frame: 0,
        })
    }

    /// Launch a wave of large asteroids from the screen edges
    pub fn start_level(&mut self, number: u32) {
        self.level = number;

        let bounds = *self.world.bounds();
        let width = bounds.width as i32;
        let height = bounds.height as i32;
        let spin = ASTEROID_MAX_SPIN_DEGREES.to_radians();

        for _ in 0..self.settings.asteroids_per_level {
            let rng = &mut self.world.rng;

            let position = if rng.coin() {
                // Left or right side
                let x = if rng.coin() { 1.0 } else { bounds.width - 1.0 };
                Vec2::new(x, rng.int(0, height) as f32)
            } else {
                // Top or bottom
                let y = if rng.coin() { 1.0 } else { bounds.height - 1.0 };
                Vec2::new(rng.int(0, width) as f32, y)
            };

            let rotation = rng.float(0.0, TAU);
            let speed = rng.float(ASTEROID_MIN_SPEED, ASTEROID_MAX_SPEED);
            let angular_speed = rng.float(-spin, spin);

            let asteroid = self.world.spawn_entity(EntityKind::AsteroidLarge, position, rotation);
            asteroid.velocity = asteroid.forward() * speed;
            asteroid.angular_speed = angular_speed;
        }

        log::info!(
            "Level {} started with {} asteroids",
            number,
            self.settings.asteroids_per_level
        );
    }

    /// Advance one frame
    pub fn do_frame(&mut self, input: &TickInput, dt: f32) {
        tick(&mut self.world, input, dt);
        self.frame += 1;
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
