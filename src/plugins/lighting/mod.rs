//! Lighting plugin (Firefly) (render-only).
//!
//! A warm light follows the player, each projectile glows in its power's trail
//! color and platforms cast shadows.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy_firefly::prelude::*;

use crate::common::state::GameState;
use crate::content::powers::PowerCatalog;
use crate::plugins::boss::Boss;
use crate::plugins::player::Player;
use crate::plugins::projectiles::components::Projectile;
use crate::plugins::world::Terrain;

#[derive(Component)]
pub struct PlayerLight;

pub fn plugin(app: &mut App) {
    if !app.is_plugin_added::<FireflyPlugin>() {
        app.add_plugins(FireflyPlugin);
    }

    app.add_systems(OnEnter(GameState::InGame), setup)
        .add_systems(
            Update,
            (follow_player_light, light_projectiles, light_bosses, shade_terrain)
                .run_if(in_state(GameState::InGame)),
        );
}

fn setup(mut commands: Commands) {
    commands.spawn((
        Name::new("PlayerLight"),
        PlayerLight,
        PointLight2d {
            color: Color::srgb(1.0, 0.9, 0.75),
            radius: 450.0,
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 10.0),
        DespawnOnExit(GameState::InGame),
    ));
}

fn follow_player_light(
    q_player: Query<&Transform, (With<Player>, Without<PlayerLight>)>,
    mut q_light: Query<&mut Transform, (With<PlayerLight>, Without<Player>)>,
) {
    let Ok(tf_player) = q_player.single() else {
        return;
    };
    let Ok(mut tf_light) = q_light.single_mut() else {
        return;
    };

    tf_light.translation.x = tf_player.translation.x;
    tf_light.translation.y = tf_player.translation.y;
}

/// Lights live on the projectile itself, so they go when it despawns.
fn light_projectiles(
    mut commands: Commands,
    catalog: Res<PowerCatalog>,
    q_new: Query<(Entity, &Projectile), Added<Projectile>>,
) {
    for (e, projectile) in &q_new {
        let Ok(def) = catalog.get(projectile.power) else { continue };
        commands.entity(e).insert(PointLight2d {
            color: def.trail_color,
            radius: 120.0,
            ..default()
        });
    }
}

fn light_bosses(mut commands: Commands, q_new: Query<Entity, Added<Boss>>) {
    for e in &q_new {
        commands.entity(e).insert(PointLight2d {
            color: Color::srgb(0.9, 0.8, 1.0),
            radius: 300.0,
            ..default()
        });
    }
}

fn shade_terrain(mut commands: Commands, q_new: Query<(Entity, &Sprite), Added<Terrain>>) {
    for (e, sprite) in &q_new {
        let size = sprite.custom_size.unwrap_or(Vec2::splat(16.0));
        commands.entity(e).insert(Occluder2d::rectangle(size.x, size.y));
    }
}
