//! Level table. Coordinates are world space, y up.

use std::fmt;

use bevy::prelude::*;

use super::ContentError;
use super::bosses::BossKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LevelId(pub u32);

impl LevelId {
    pub const FIRST: LevelId = LevelId(1);

    #[inline]
    pub fn next(self) -> LevelId {
        LevelId(self.0 + 1)
    }
}

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlatformKind {
    Start,
    Normal,
    Boss,
    End,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlatformDef {
    pub pos: Vec2,
    pub kind: PlatformKind,
}

const fn platform(x: f32, y: f32, kind: PlatformKind) -> PlatformDef {
    PlatformDef { pos: Vec2::new(x, y), kind }
}

#[derive(Debug, Clone)]
pub struct LevelDefinition {
    pub id: LevelId,
    pub name: &'static str,
    pub boss: BossKind,
    pub width: f32,
    pub player_spawn: Vec2,
    pub platforms: Vec<PlatformDef>,
    pub background: Color,
    pub hazard: Color,
}

impl LevelDefinition {
    pub fn end_platform(&self) -> Result<&PlatformDef, ContentError> {
        self.platforms
            .iter()
            .find(|p| p.kind == PlatformKind::End)
            .ok_or(ContentError::NoEndPlatform(self.id))
    }

    /// World x at which the boss encounter starts.
    pub fn encounter_threshold(&self, lead: f32) -> Result<f32, ContentError> {
        Ok(self.end_platform()?.pos.x - lead)
    }

    /// Respawn point once the player has reached the boss area.
    pub fn boss_area_respawn(&self) -> Result<Vec2, ContentError> {
        let end = self.end_platform()?;
        Ok(end.pos + Vec2::new(-150.0, 50.0))
    }
}

#[derive(Resource, Debug, Clone)]
pub struct LevelCatalog {
    levels: Vec<LevelDefinition>,
}

impl LevelCatalog {
    pub fn new(levels: Vec<LevelDefinition>) -> Self {
        Self { levels }
    }

    pub fn get(&self, id: LevelId) -> Result<&LevelDefinition, ContentError> {
        self.levels
            .iter()
            .find(|l| l.id == id)
            .ok_or(ContentError::UnknownLevel(id))
    }

    pub fn contains(&self, id: LevelId) -> bool {
        self.levels.iter().any(|l| l.id == id)
    }
}

impl Default for LevelCatalog {
    fn default() -> Self {
        use PlatformKind::*;

        Self::new(vec![
            LevelDefinition {
                id: LevelId(1),
                name: "Lava Caverns",
                boss: BossKind::WaterDragon,
                width: 2400.0,
                player_spawn: Vec2::new(180.0, 200.0),
                platforms: vec![
                    platform(150.0, 80.0, Start),
                    platform(350.0, 150.0, Normal),
                    platform(550.0, 220.0, Normal),
                    platform(750.0, 280.0, Normal),
                    platform(950.0, 150.0, Normal),
                    platform(1200.0, 220.0, Normal),
                    platform(1450.0, 280.0, Normal),
                    platform(1700.0, 320.0, Normal),
                    platform(1950.0, 250.0, Boss),
                    platform(2200.0, 220.0, End),
                ],
                background: Color::srgb_u8(15, 10, 30),
                hazard: Color::srgb_u8(255, 60, 0),
            },
            LevelDefinition {
                id: LevelId(2),
                name: "Frozen Peaks",
                boss: BossKind::IceDragon,
                width: 2400.0,
                player_spawn: Vec2::new(180.0, 200.0),
                platforms: vec![
                    platform(150.0, 80.0, Start),
                    platform(400.0, 200.0, Normal),
                    platform(650.0, 280.0, Normal),
                    platform(900.0, 350.0, Normal),
                    platform(1150.0, 220.0, Normal),
                    platform(1400.0, 300.0, Normal),
                    platform(1650.0, 380.0, Normal),
                    platform(1900.0, 250.0, Boss),
                    platform(2150.0, 320.0, End),
                ],
                background: Color::srgb_u8(10, 15, 30),
                hazard: Color::srgb_u8(200, 230, 255),
            },
            LevelDefinition {
                id: LevelId(3),
                name: "Storm Clouds",
                boss: BossKind::StormDragon,
                width: 2400.0,
                player_spawn: Vec2::new(180.0, 200.0),
                platforms: vec![
                    platform(150.0, 80.0, Start),
                    platform(450.0, 180.0, Normal),
                    platform(750.0, 250.0, Normal),
                    platform(1050.0, 320.0, Normal),
                    platform(1350.0, 200.0, Normal),
                    platform(1650.0, 280.0, Normal),
                    platform(1950.0, 350.0, Boss),
                    platform(2250.0, 220.0, End),
                ],
                background: Color::srgb_u8(20, 10, 30),
                hazard: Color::srgb_u8(100, 100, 150),
            },
        ])
    }
}
