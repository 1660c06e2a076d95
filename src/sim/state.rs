//! World state and spawning
//!
//! The world exclusively owns three stores: entities, particles and stars.
//! Nothing spawned into a world outlives it.

use glam::Vec2;

use super::defs::{DefinitionTable, EntityKind, PaletteColor};
use super::entity::{Entity, EntityState};
use super::rng::SimRng;
use crate::settings::{Settings, SettingsError};
use crate::store::Store;
use crate::Bounds;

/// Initial particle store size
pub const PARTICLE_CAPACITY: usize = 1024;
/// Initial entity store size
pub const ENTITY_CAPACITY: usize = 64;
/// One star per this many square units of playfield
pub const STAR_DENSITY: f32 = 60.0;

const STAR_COLORS: [PaletteColor; 2] = [PaletteColor::Gray, PaletteColor::Blue];

/// Player heading at spawn, pointing up the screen
pub const PLAYER_START_ROTATION: f32 = 270.0_f32 * std::f32::consts::PI / 180.0;

/// A short-lived point of debris or exhaust
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Frames remaining. Frozen at zero until swept.
    pub lifespan: i32,
    pub color: PaletteColor,
}

/// Decorative background point, fixed for the world's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Star {
    pub x: i32,
    pub y: i32,
    pub color: PaletteColor,
}

#[derive(Debug, Clone)]
pub struct World {
    bounds: Bounds,
    fps: u32,
    defs: DefinitionTable,
    pub(crate) rng: SimRng,
    pub(crate) entities: Store<Entity>,
    pub(crate) particles: Store<Particle>,
    stars: Store<Star>,
}

impl World {
    /// Build a world with its star field and the player appearing at the centre
    pub fn new(settings: &Settings, defs: DefinitionTable) -> Result<Self, SettingsError> {
        settings.validate()?;

        let bounds = settings.bounds();
        let mut world = Self {
            bounds,
            fps: settings.fps,
            defs,
            rng: SimRng::new(settings.seed),
            entities: Store::new(ENTITY_CAPACITY),
            particles: Store::new(PARTICLE_CAPACITY),
            stars: Store::new(0),
        };

        world.init_stars();

        let player = world.spawn_entity(EntityKind::Player, bounds.center(), PLAYER_START_ROTATION);
        player.scale = 0.0;
        player.state = EntityState::Appearing;

        log::info!(
            "World created: {}x{}, {} stars, seed {}",
            bounds.width,
            bounds.height,
            world.stars.len(),
            settings.seed
        );

        Ok(world)
    }

    fn init_stars(&mut self) {
        let count = (self.bounds.width * self.bounds.height / STAR_DENSITY) as usize;
        let width = self.bounds.width as i32;
        let height = self.bounds.height as i32;

        self.stars = Store::new(count);
        for _ in 0..count {
            let star = Star {
                x: self.rng.int(0, width),
                y: self.rng.int(0, height),
                color: self.rng.pick(&STAR_COLORS).unwrap_or(PaletteColor::Gray),
            };
            self.stars.append(star);
        }
    }

    /// Copy the definition for `kind` into a new active entity.
    ///
    /// The returned reference is only valid until the next spawn.
    pub fn spawn_entity(&mut self, kind: EntityKind, position: Vec2, rotation: f32) -> &mut Entity {
        let entity = Entity::from_def(self.defs.get(kind), position, rotation);
        let index = self.entities.append(entity);
        &mut self.entities[index]
    }

    pub fn spawn_particles<I: IntoIterator<Item = Particle>>(&mut self, particles: I) {
        self.particles.extend(particles);
    }

    /// Entities in store order (stable between updates)
    pub fn entities(&self) -> &[Entity] {
        self.entities.as_slice()
    }

    pub fn particles(&self) -> &[Particle] {
        self.particles.as_slice()
    }

    pub fn stars(&self) -> &[Star] {
        self.stars.as_slice()
    }

    pub fn player(&self) -> Option<&Entity> {
        self.entities.iter().find(|e| e.kind == EntityKind::Player)
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.entities.iter().filter(|e| e.kind == kind).count()
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}
