//! Boss catalog.

use bevy::platform::collections::HashMap;
use bevy::prelude::*;

use super::ContentError;
use super::powers::PowerKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BossKind {
    WaterDragon,
    IceDragon,
    StormDragon,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MovePattern {
    Horizontal,
    Vertical,
    Circular,
    Static,
}

/// Movement data for every pattern.
///
/// Only the fields the boss's [`MovePattern`] needs are read; the rest are
/// ignored. A pattern whose field is missing degrades to a stationary boss.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BossMotionConfig {
    /// (left, right)
    pub lane_x: Option<(f32, f32)>,
    /// (bottom, top)
    pub lane_y: Option<(f32, f32)>,
    /// (center, radius)
    pub circle: Option<(Vec2, f32)>,
}

#[derive(Debug, Clone)]
pub struct BossTheme {
    pub body: Color,
    pub health_bar: Color,
    pub health_bg: Color,
    pub explosion: Color,
}

#[derive(Debug, Clone)]
pub struct BossDefinition {
    pub kind: BossKind,
    pub name: &'static str,
    pub size: f32,
    /// > 0
    pub hp: i32,
    pub speed: f32,
    pub power: PowerKind,
    pub attack_cooldown: f32,
    pub pattern: MovePattern,
    pub motion: BossMotionConfig,
    pub reward: PowerKind,
    pub spawn: Vec2,
    pub theme: BossTheme,
}

#[derive(Resource, Debug, Clone)]
pub struct BossCatalog {
    defs: HashMap<BossKind, BossDefinition>,
}

impl BossCatalog {
    pub fn from_definitions(defs: impl IntoIterator<Item = BossDefinition>) -> Self {
        Self {
            defs: defs.into_iter().map(|d| (d.kind, d)).collect(),
        }
    }

    pub fn get(&self, kind: BossKind) -> Result<&BossDefinition, ContentError> {
        self.defs.get(&kind).ok_or(ContentError::MissingBoss(kind))
    }
}

impl Default for BossCatalog {
    fn default() -> Self {
        Self::from_definitions([
            BossDefinition {
                kind: BossKind::WaterDragon,
                name: "Water Dragon",
                size: 120.0,
                hp: 15,
                speed: 100.0,
                power: PowerKind::Waterball,
                attack_cooldown: 1.2,
                pattern: MovePattern::Horizontal,
                motion: BossMotionConfig {
                    lane_x: Some((1800.0, 2100.0)),
                    ..default()
                },
                reward: PowerKind::Waterball,
                spawn: Vec2::new(1950.0, 400.0),
                theme: BossTheme {
                    body: Color::srgb_u8(60, 120, 230),
                    health_bar: Color::srgb_u8(255, 0, 0),
                    health_bg: Color::srgb_u8(100, 0, 0),
                    explosion: Color::srgb_u8(255, 0, 255),
                },
            },
            BossDefinition {
                kind: BossKind::IceDragon,
                name: "Ice Dragon",
                size: 140.0,
                hp: 20,
                speed: 80.0,
                power: PowerKind::Iceball,
                attack_cooldown: 0.8,
                pattern: MovePattern::Vertical,
                motion: BossMotionConfig {
                    lane_y: Some((300.0, 500.0)),
                    ..default()
                },
                reward: PowerKind::Iceball,
                spawn: Vec2::new(1950.0, 450.0),
                theme: BossTheme {
                    body: Color::srgb_u8(170, 230, 255),
                    health_bar: Color::srgb_u8(0, 200, 255),
                    health_bg: Color::srgb_u8(0, 100, 150),
                    explosion: Color::srgb_u8(200, 255, 255),
                },
            },
            BossDefinition {
                kind: BossKind::StormDragon,
                name: "Storm Dragon",
                size: 160.0,
                hp: 25,
                speed: 120.0,
                power: PowerKind::Lightning,
                attack_cooldown: 1.5,
                pattern: MovePattern::Circular,
                motion: BossMotionConfig {
                    circle: Some((Vec2::new(1950.0, 400.0), 150.0)),
                    ..default()
                },
                reward: PowerKind::Lightning,
                spawn: Vec2::new(1950.0, 400.0),
                theme: BossTheme {
                    body: Color::srgb_u8(120, 110, 170),
                    health_bar: Color::srgb_u8(255, 255, 0),
                    health_bg: Color::srgb_u8(150, 150, 0),
                    explosion: Color::srgb_u8(255, 255, 200),
                },
            },
        ])
    }
}
