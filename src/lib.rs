//! Astro Drift - a wrap-around asteroid field arcade simulation
//!
//! Core modules:
//! - `store`: Growable swap-remove container used for every world collection
//! - `sim`: Frame-driven simulation (entities, collisions, player, particles)
//! - `game`: Session wrapper (levels, frame counter)
//! - `renderer`: Draw contract and the read-only draw pass
//! - `settings`: Data-driven configuration

pub mod game;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod store;

pub use game::Game;
pub use settings::{Settings, SettingsError};
pub use store::Store;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Simulation frames per second
    pub const FPS: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / FPS as f32;

    /// Logical screen dimensions
    pub const GAME_WIDTH: f32 = 320.0;
    pub const GAME_HEIGHT: f32 = 200.0;

    /// Largest colour set a definition may carry
    pub const MAX_COLORS: usize = 16;
}

/// Playfield extent. Positions of wrapping entities live in `[0, width) x [0, height)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            width: consts::GAME_WIDTH,
            height: consts::GAME_HEIGHT,
        }
    }
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Toroidal wrap of a position
    pub fn wrap(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            wrap_coordinate(p.x, self.width),
            wrap_coordinate(p.y, self.height),
        )
    }

    /// Whether `p` lies inside the playfield grown by `margin` on every side
    pub fn contains_with_margin(&self, p: Vec2, margin: f32) -> bool {
        p.x >= -margin && p.x < self.width + margin && p.y >= -margin && p.y < self.height + margin
    }
}

/// Reduce a coordinate into `[0, extent)`.
///
/// Exact modulo, never clamps. A tiny negative input can round up to
/// `extent` in `rem_euclid`; that case folds back to zero.
#[inline]
pub fn wrap_coordinate(value: f32, extent: f32) -> f32 {
    let wrapped = value.rem_euclid(extent);
    if wrapped >= extent { 0.0 } else { wrapped }
}

/// Rotate a vector by an angle given in degrees
#[inline]
pub fn rotated_degrees(v: Vec2, degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians()).rotate(v)
}

/// Unit vector for a heading in radians
#[inline]
pub fn heading(rotation: f32) -> Vec2 {
    Vec2::new(rotation.cos(), rotation.sin())
}
