//! World plugin: level geometry and level flow.
//!
//! Entering `InGame` loads `GameSession::level` from the [`LevelCatalog`]:
//! platforms become static `Terrain`, the lava strip is drawn under them, and
//! the [`Playfield`] bounds used for off-screen projectile cleanup are set.
//! Level-to-level flow (advance, transition, restart) lives in [`flow`].

pub mod flow;

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::layers::terrain_layers;
use crate::common::session::{GameSession, LevelSession};
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::content::levels::{LevelCatalog, LevelDefinition, LevelId, PlatformKind};

const PLATFORM_SIZE: Vec2 = Vec2::new(160.0, 24.0);
const LAVA_HEIGHT: f32 = 40.0;

/// Static level geometry. Projectiles shatter on it and the player stands on it.
#[derive(Component, Debug, Clone, Copy)]
pub struct Terrain;

/// World-space area in which projectiles stay alive.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Playfield(pub Rect);

impl Playfield {
    pub fn for_level(width: f32, view_size: Vec2, margin: f32) -> Self {
        Self(Rect::new(-margin, -margin, width + margin, view_size.y + margin))
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        self.0.contains(p)
    }
}

/// Summary of the loaded level.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct CurrentLevel {
    pub id: LevelId,
    pub name: &'static str,
    pub width: f32,
}

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), load_level);
    flow::plugin(app);
}

fn platform_color(kind: PlatformKind) -> Color {
    match kind {
        PlatformKind::Start => Color::srgb(0.35, 0.55, 0.35),
        PlatformKind::Normal => Color::srgb(0.4, 0.32, 0.28),
        PlatformKind::Boss => Color::srgb(0.45, 0.25, 0.3),
        PlatformKind::End => Color::srgb(0.75, 0.65, 0.3),
    }
}

fn load_level(
    mut commands: Commands,
    tunables: Res<Tunables>,
    levels: Res<LevelCatalog>,
    session: Res<GameSession>,
    mut level_session: ResMut<LevelSession>,
    mut next: ResMut<NextState<GameState>>,
) {
    *level_session = LevelSession::default();

    let level = match levels.get(session.level) {
        Ok(level) => level,
        Err(e) => {
            error!("cannot load level: {e}");
            next.set(GameState::GameOver);
            return;
        }
    };
    info!("level {}: {}", level.id, level.name);

    commands.insert_resource(CurrentLevel {
        id: level.id,
        name: level.name,
        width: level.width,
    });
    commands.insert_resource(Playfield::for_level(
        level.width,
        tunables.view_size,
        tunables.offscreen_margin,
    ));
    commands.insert_resource(ClearColor(level.background));

    spawn_platforms(&mut commands, level);
    spawn_lava(&mut commands, level);
}

fn spawn_platforms(commands: &mut Commands, level: &LevelDefinition) {
    for (i, platform) in level.platforms.iter().enumerate() {
        commands.spawn((
            Name::new(format!("Platform{i}({:?})", platform.kind)),
            Terrain,
            Sprite::from_color(platform_color(platform.kind), PLATFORM_SIZE),
            Transform::from_translation(platform.pos.extend(0.0)),
            RigidBody::Static,
            Collider::rectangle(PLATFORM_SIZE.x, PLATFORM_SIZE.y),
            terrain_layers(),
            DespawnOnExit(GameState::InGame),
        ));
    }
}

/// Visual only; the death plane below it does the killing.
fn spawn_lava(commands: &mut Commands, level: &LevelDefinition) {
    let size = Vec2::new(level.width, LAVA_HEIGHT);
    commands.spawn((
        Name::new("Lava"),
        Sprite::from_color(level.hazard, size),
        Transform::from_xyz(level.width * 0.5, LAVA_HEIGHT * 0.5 - 20.0, -1.0),
        DespawnOnExit(GameState::InGame),
    ));
}

#[cfg(test)]
mod tests;
