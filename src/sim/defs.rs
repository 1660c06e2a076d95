//! Static per-kind entity definitions
//!
//! The definition table is the single source of truth for what a freshly
//! spawned entity of a given kind looks like. It is built once at startup,
//! either from the built-in classic table or from JSON, and validated there.
//! Nothing in it is re-checked per frame.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::MAX_COLORS;

/// Entity kinds. The discriminant order indexes the definition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    AsteroidLarge,
    AsteroidMedium,
    AsteroidSmall,
    Bullet,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Player,
        EntityKind::AsteroidLarge,
        EntityKind::AsteroidMedium,
        EntityKind::AsteroidSmall,
        EntityKind::Bullet,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_asteroid(self) -> bool {
        matches!(
            self,
            EntityKind::AsteroidLarge | EntityKind::AsteroidMedium | EntityKind::AsteroidSmall
        )
    }

    /// Kind of the two fragments an asteroid breaks into, if any
    pub fn fragment_kind(self) -> Option<EntityKind> {
        match self {
            EntityKind::AsteroidLarge => Some(EntityKind::AsteroidMedium),
            EntityKind::AsteroidMedium => Some(EntityKind::AsteroidSmall),
            _ => None,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Player => "player",
            EntityKind::AsteroidLarge => "large asteroid",
            EntityKind::AsteroidMedium => "medium asteroid",
            EntityKind::AsteroidSmall => "small asteroid",
            EntityKind::Bullet => "bullet",
        };
        f.write_str(name)
    }
}

/// 16-colour display palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaletteColor {
    Black,
    Blue,
    Green,
    Cyan,
    Red,
    Magenta,
    Brown,
    White,
    Gray,
    BrightBlue,
    BrightGreen,
    BrightCyan,
    BrightRed,
    BrightMagenta,
    Yellow,
    BrightWhite,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorSetError {
    #[error("colour set is empty")]
    Empty,
    #[error("colour set has {0} colours, at most 16 allowed")]
    TooMany(usize),
}

/// Non-empty set of up to `MAX_COLORS` palette colours used to tint particles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PaletteColor>", into = "Vec<PaletteColor>")]
pub struct ColorSet {
    colors: [PaletteColor; MAX_COLORS],
    len: u8,
}

impl ColorSet {
    pub fn new(colors: &[PaletteColor]) -> Result<Self, ColorSetError> {
        if colors.is_empty() {
            return Err(ColorSetError::Empty);
        }
        if colors.len() > MAX_COLORS {
            return Err(ColorSetError::TooMany(colors.len()));
        }
        let mut array = [PaletteColor::Black; MAX_COLORS];
        array[..colors.len()].copy_from_slice(colors);
        Ok(Self {
            colors: array,
            len: colors.len() as u8,
        })
    }

    const fn from_array<const N: usize>(colors: [PaletteColor; N]) -> Self {
        assert!(N > 0 && N <= MAX_COLORS);
        let mut array = [PaletteColor::Black; MAX_COLORS];
        let mut i = 0;
        while i < N {
            array[i] = colors[i];
            i += 1;
        }
        Self {
            colors: array,
            len: N as u8,
        }
    }

    pub fn as_slice(&self) -> &[PaletteColor] {
        &self.colors[..self.len as usize]
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl TryFrom<Vec<PaletteColor>> for ColorSet {
    type Error = ColorSetError;

    fn try_from(colors: Vec<PaletteColor>) -> Result<Self, Self::Error> {
        ColorSet::new(&colors)
    }
}

impl From<ColorSet> for Vec<PaletteColor> {
    fn from(set: ColorSet) -> Self {
        set.as_slice().to_vec()
    }
}

/// Per-entity behaviour flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityFlags {
    /// Moves off-screen instead of wrapping, and is culled once clear of the margin
    pub no_wrap: bool,
}

impl EntityFlags {
    pub const NO_WRAP: EntityFlags = EntityFlags { no_wrap: true };
}

/// Per-frame behaviour run after generic kinematics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateBehavior {
    #[default]
    None,
    Player,
}

/// Reaction to a confirmed collision
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactBehavior {
    #[default]
    None,
    Player,
    Bullet,
}

/// Defaults for one entity kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityDef {
    pub kind: EntityKind,
    /// Base radius before scale
    pub radius: f32,
    /// Sprite identifier, opaque to the simulation
    pub sprite: String,
    #[serde(default)]
    pub flags: EntityFlags,
    pub colors: ColorSet,
    #[serde(default)]
    pub update: UpdateBehavior,
    #[serde(default)]
    pub contact: ContactBehavior,
}

#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("no definition for {0}")]
    MissingKind(EntityKind),

    #[error("{0} is defined more than once")]
    DuplicateKind(EntityKind),

    #[error("{kind} has invalid radius {radius}")]
    InvalidRadius { kind: EntityKind, radius: f32 },

    #[error("malformed definition table: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not read definition table: {0}")]
    Io(#[from] std::io::Error),
}

/// Immutable, kind-indexed table of entity definitions
#[derive(Debug, Clone, PartialEq)]
pub struct DefinitionTable {
    /// Exactly one entry per kind, ordered by `EntityKind::index`
    defs: Vec<EntityDef>,
}

const ASTEROID_COLORS: ColorSet = ColorSet::from_array([
    PaletteColor::Gray,
    PaletteColor::White,
    PaletteColor::BrightWhite,
]);

impl DefinitionTable {
    /// The classic table
    pub fn builtin() -> Self {
        let asteroid = |kind, radius, sprite: &str| EntityDef {
            kind,
            radius,
            sprite: sprite.to_string(),
            flags: EntityFlags::default(),
            colors: ASTEROID_COLORS,
            update: UpdateBehavior::None,
            contact: ContactBehavior::None,
        };

        Self {
            defs: vec![
                EntityDef {
                    kind: EntityKind::Player,
                    radius: 4.0,
                    sprite: "assets/ship.px".to_string(),
                    flags: EntityFlags::default(),
                    colors: ColorSet::from_array([
                        PaletteColor::BrightCyan,
                        PaletteColor::BrightBlue,
                        PaletteColor::Gray,
                        PaletteColor::White,
                        PaletteColor::BrightWhite,
                        PaletteColor::Red,
                        PaletteColor::BrightRed,
                    ]),
                    update: UpdateBehavior::Player,
                    contact: ContactBehavior::Player,
                },
                asteroid(EntityKind::AsteroidLarge, 16.0, "assets/asteroid-large.px"),
                asteroid(EntityKind::AsteroidMedium, 8.0, "assets/asteroid-medium.px"),
                asteroid(EntityKind::AsteroidSmall, 4.0, "assets/asteroid-small.px"),
                EntityDef {
                    kind: EntityKind::Bullet,
                    radius: 1.5,
                    sprite: "assets/bullet.px".to_string(),
                    flags: EntityFlags::NO_WRAP,
                    colors: ColorSet::from_array([PaletteColor::Green, PaletteColor::BrightGreen]),
                    update: UpdateBehavior::None,
                    contact: ContactBehavior::Bullet,
                },
            ],
        }
    }

    /// Build a table from definitions in any order. Every kind must appear exactly once.
    pub fn from_defs(defs: Vec<EntityDef>) -> Result<Self, DefinitionError> {
        let mut slots: [Option<EntityDef>; 5] = Default::default();

        for def in defs {
            if !def.radius.is_finite() || def.radius <= 0.0 {
                return Err(DefinitionError::InvalidRadius {
                    kind: def.kind,
                    radius: def.radius,
                });
            }
            let slot = &mut slots[def.kind.index()];
            if slot.is_some() {
                return Err(DefinitionError::DuplicateKind(def.kind));
            }
            *slot = Some(def);
        }

        let mut ordered = Vec::with_capacity(EntityKind::ALL.len());
        for (kind, slot) in EntityKind::ALL.into_iter().zip(slots) {
            ordered.push(slot.ok_or(DefinitionError::MissingKind(kind))?);
        }

        Ok(Self { defs: ordered })
    }

    /// Parse a JSON array of definitions
    pub fn from_json(json: &str) -> Result<Self, DefinitionError> {
        let defs: Vec<EntityDef> = serde_json::from_str(json)?;
        Self::from_defs(defs)
    }

    pub fn load(path: &Path) -> Result<Self, DefinitionError> {
        let json = std::fs::read_to_string(path)?;
        let table = Self::from_json(&json)?;
        log::info!("Loaded entity definitions from {}", path.display());
        Ok(table)
    }

    pub fn to_json(&self) -> Result<String, DefinitionError> {
        Ok(serde_json::to_string_pretty(&self.defs)?)
    }

    #[inline]
    pub fn get(&self, kind: EntityKind) -> &EntityDef {
        &self.defs[kind.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntityDef> {
        self.defs.iter()
    }
}

impl Default for DefinitionTable {
    fn default() -> Self {
        Self::builtin()
    }
}
