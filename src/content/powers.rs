//! Power catalog: every ranged attack the player or a boss can cast.

use std::str::FromStr;

use bevy::platform::collections::HashMap;
use bevy::prelude::*;

use super::ContentError;

/// Closed set of powers.
///
/// The kind doubles as the cooldown key and the projectile tag, so adding a
/// power forces every `match` over it to be revisited.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PowerKind {
    Fireball,
    Waterball,
    Iceball,
    Lightning,
}

impl PowerKind {
    pub const ALL: [PowerKind; 4] = [
        PowerKind::Fireball,
        PowerKind::Waterball,
        PowerKind::Iceball,
        PowerKind::Lightning,
    ];

    /// Fallback when a catalog flags no power as `starts_unlocked`.
    pub const STARTING: PowerKind = PowerKind::Fireball;

    pub fn id(self) -> &'static str {
        match self {
            PowerKind::Fireball => "fireball",
            PowerKind::Waterball => "waterball",
            PowerKind::Iceball => "iceball",
            PowerKind::Lightning => "lightning",
        }
    }
}

impl FromStr for PowerKind {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PowerKind::ALL
            .into_iter()
            .find(|k| k.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| ContentError::UnknownPower(s.to_owned()))
    }
}

#[derive(Debug, Clone)]
pub struct PowerDefinition {
    pub kind: PowerKind,
    pub name: &'static str,
    /// Art key; also used to name projectile entities.
    pub sprite: &'static str,
    /// Sprite edge length in pixels before `scale`.
    pub size: f32,
    pub scale: f32,
    pub speed: f32,
    /// Seconds between two casts by the same caster.
    pub cooldown: f32,
    /// Always >= 1.
    pub damage: i32,
    pub trail_color: Color,
    /// Seconds between two trail particles.
    pub trail_interval: f32,
    pub effect_colors: [Color; 2],
    pub sound: Option<&'static str>,
    /// Unlocked at the start of a session. The live flag is `Progression::is_unlocked`.
    pub starts_unlocked: bool,
}

/// Read-only lookup table keyed by [`PowerKind`].
#[derive(Resource, Debug, Clone)]
pub struct PowerCatalog {
    defs: HashMap<PowerKind, PowerDefinition>,
}

impl PowerCatalog {
    pub fn from_definitions(defs: impl IntoIterator<Item = PowerDefinition>) -> Self {
        Self {
            defs: defs.into_iter().map(|d| (d.kind, d)).collect(),
        }
    }

    pub fn get(&self, kind: PowerKind) -> Result<&PowerDefinition, ContentError> {
        self.defs.get(&kind).ok_or(ContentError::MissingPower(kind))
    }

    /// Textual lookup, for ids coming from outside the type system.
    pub fn lookup(&self, id: &str) -> Result<&PowerDefinition, ContentError> {
        self.get(id.parse()?)
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Kinds flagged `starts_unlocked`, in [`PowerKind::ALL`] order.
    pub fn starting_powers(&self) -> Vec<PowerKind> {
        PowerKind::ALL
            .into_iter()
            .filter(|k| self.defs.get(k).is_some_and(|d| d.starts_unlocked))
            .collect()
    }
}

impl Default for PowerCatalog {
    fn default() -> Self {
        Self::from_definitions([
            PowerDefinition {
                kind: PowerKind::Fireball,
                name: "Fireball",
                sprite: "fireball",
                size: 40.0,
                scale: 0.4,
                speed: 650.0,
                cooldown: 0.2,
                damage: 1,
                trail_color: Color::srgb_u8(255, 150, 0),
                trail_interval: 0.03,
                effect_colors: [Color::srgb_u8(255, 150, 0), Color::srgb_u8(255, 100, 0)],
                sound: Some("fireballExplosion"),
                starts_unlocked: true,
            },
            PowerDefinition {
                kind: PowerKind::Waterball,
                name: "Waterball",
                sprite: "waterball",
                size: 40.0,
                scale: 0.4,
                speed: 380.0,
                cooldown: 1.2,
                damage: 1,
                trail_color: Color::srgb_u8(0, 150, 255),
                trail_interval: 0.04,
                effect_colors: [Color::srgb_u8(100, 150, 255), Color::srgb_u8(0, 100, 255)],
                sound: Some("waterballExplosion"),
                starts_unlocked: false,
            },
            PowerDefinition {
                kind: PowerKind::Iceball,
                name: "Iceball",
                sprite: "iceball",
                size: 40.0,
                scale: 0.4,
                speed: 450.0,
                cooldown: 0.8,
                damage: 1,
                trail_color: Color::srgb_u8(200, 255, 255),
                trail_interval: 0.04,
                effect_colors: [Color::srgb_u8(200, 255, 255), Color::srgb_u8(150, 200, 255)],
                sound: None,
                starts_unlocked: false,
            },
            PowerDefinition {
                kind: PowerKind::Lightning,
                name: "Lightning Bolt",
                sprite: "lightning",
                size: 48.0,
                scale: 0.4,
                speed: 800.0,
                cooldown: 1.5,
                damage: 2,
                trail_color: Color::srgb_u8(255, 255, 0),
                trail_interval: 0.02,
                effect_colors: [Color::srgb_u8(255, 255, 0), Color::srgb_u8(255, 200, 0)],
                sound: None,
                starts_unlocked: false,
            },
        ])
    }
}
