//! Entity records and generic kinematics

use glam::Vec2;

use super::defs::{ColorSet, ContactBehavior, EntityDef, EntityFlags, EntityKind, UpdateBehavior};
use crate::{Bounds, heading};

/// Lifecycle state of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityState {
    /// Moving and tangible
    Active,
    /// Player waiting for a clear spawn point (frozen, invisible, intangible)
    Respawning,
    /// Player scaling back in (intangible)
    Appearing,
    /// Swept from the store at the end of the frame
    PendingRemoval,
}

/// Player-only data
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerInfo {
    /// Frames until the next shot is allowed
    pub shot_timer: u32,
}

/// Per-kind payload
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Payload {
    #[default]
    None,
    Player(PlayerInfo),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entity {
    pub kind: EntityKind,
    pub state: EntityState,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Heading in radians
    pub rotation: f32,
    /// Radians per second
    pub angular_speed: f32,
    /// Base radius, see `effective_radius`
    pub radius: f32,
    /// 0..1 while appearing, 1 otherwise
    pub scale: f32,
    pub flags: EntityFlags,
    pub colors: ColorSet,
    pub update: UpdateBehavior,
    pub contact: ContactBehavior,
    pub payload: Payload,
}

impl Entity {
    /// Fresh entity stamped from its definition
    pub fn from_def(def: &EntityDef, position: Vec2, rotation: f32) -> Self {
        let payload = match def.kind {
            EntityKind::Player => Payload::Player(PlayerInfo::default()),
            _ => Payload::None,
        };

        Self {
            kind: def.kind,
            state: EntityState::Active,
            position,
            velocity: Vec2::ZERO,
            rotation,
            angular_speed: 0.0,
            radius: def.radius,
            scale: 1.0,
            flags: def.flags,
            colors: def.colors,
            update: def.update,
            contact: def.contact,
            payload,
        }
    }

    /// Radius used for every collision and visibility test
    #[inline]
    pub fn effective_radius(&self) -> f32 {
        self.radius * self.scale
    }

    #[inline]
    pub fn forward(&self) -> Vec2 {
        heading(self.rotation)
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.state == EntityState::Active
    }

    /// On-screen area, which drives explosion particle counts
    pub fn area(&self) -> f32 {
        let r = self.effective_radius();
        std::f32::consts::PI * r * r
    }

    /// Inside the playfield grown by one diameter on each side
    pub fn is_visible(&self, bounds: &Bounds) -> bool {
        let diameter = self.effective_radius() * 2.0;
        bounds.contains_with_margin(self.position, diameter)
    }

    pub fn player_info(&self) -> Option<&PlayerInfo> {
        match &self.payload {
            Payload::Player(info) => Some(info),
            Payload::None => None,
        }
    }

    pub fn player_info_mut(&mut self) -> Option<&mut PlayerInfo> {
        match &mut self.payload {
            Payload::Player(info) => Some(info),
            Payload::None => None,
        }
    }

    /// Generic kinematics shared by every kind. Only active entities move.
    ///
    /// Wrapping entities are reduced into the playfield. Non-wrapping ones
    /// that drift clear of the margin are marked for removal.
    pub fn general_update(&mut self, dt: f32, bounds: &Bounds) {
        if self.state != EntityState::Active {
            return;
        }

        self.position += self.velocity * dt;
        self.rotation += self.angular_speed * dt;

        if !self.flags.no_wrap {
            self.position = bounds.wrap(self.position);
        }

        if !self.is_visible(bounds) {
            self.state = EntityState::PendingRemoval;
        }
    }
}
