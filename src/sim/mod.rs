//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (store order, swap-remove only at sweep time)
//! - No rendering or platform dependencies

pub mod collision;
pub mod defs;
pub mod destruction;
pub mod entity;
pub mod player;
pub mod rng;
pub mod state;
pub mod tick;

pub use defs::{
    ColorSet, ColorSetError, ContactBehavior, DefinitionError, DefinitionTable, EntityDef,
    EntityFlags, EntityKind, PaletteColor, UpdateBehavior,
};
pub use entity::{Entity, EntityState, Payload, PlayerInfo};
pub use rng::SimRng;
pub use state::{Particle, Star, World};
pub use tick::{TickInput, tick};
