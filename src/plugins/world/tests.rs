use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::session::{GameSession, LevelSession};
use crate::common::state::GameState;
use crate::common::test_utils::{ensure_messages, run_system_once};
use crate::common::tunables::Tunables;
use crate::content::levels::{LevelCatalog, LevelId};
use crate::content::powers::{PowerCatalog, PowerKind};
use crate::plugins::boss::LevelAdvanceRequest;
use crate::plugins::player::{PlayerInput, PowerSelection};
use crate::plugins::progression::Progression;
use crate::plugins::projectiles::cooldown::{CooldownOwner, Cooldowns};

use super::flow::{advance_level, restart_on_confirm};
use super::*;

fn level_world(level: LevelId) -> World {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    world.insert_resource(LevelCatalog::default());
    let mut session = GameSession::new(3);
    session.level = level;
    world.insert_resource(session);
    world.insert_resource(LevelSession {
        boss_triggered: true,
        reward_granted: true,
        in_boss_area: true,
        advance_requested: true,
    });
    world.init_resource::<NextState<GameState>>();
    world
}

fn pending(world: &World) -> Option<GameState> {
    match world.resource::<NextState<GameState>>() {
        NextState::Pending(s) => Some(*s),
        _ => None,
    }
}

#[test]
fn loading_spawns_static_platforms_and_resets_the_level_session() {
    let mut world = level_world(LevelId(1));
    run_system_once(&mut world, super::load_level);

    let platforms = world
        .query_filtered::<&RigidBody, With<Terrain>>()
        .iter(&world)
        .filter(|rb| matches!(**rb, RigidBody::Static))
        .count();
    assert_eq!(platforms, 10);

    assert_eq!(world.resource::<LevelSession>(), &LevelSession::default());
    assert_eq!(world.resource::<CurrentLevel>().name, "Lava Caverns");
    assert!(world.resource::<Playfield>().contains(Vec2::new(2400.0, 300.0)));
    assert!(pending(&world).is_none());
}

#[test]
fn unknown_level_forces_game_over() {
    let mut world = level_world(LevelId(7));
    run_system_once(&mut world, super::load_level);

    assert_eq!(pending(&world), Some(GameState::GameOver));
    assert_eq!(world.query::<&Terrain>().iter(&world).count(), 0);
}

#[test]
fn playfield_keeps_a_margin_around_the_level() {
    let field = Playfield::for_level(2400.0, Vec2::new(800.0, 600.0), 64.0);
    assert!(field.contains(Vec2::new(-60.0, 10.0)));
    assert!(field.contains(Vec2::new(2460.0, 660.0)));
    assert!(!field.contains(Vec2::new(-70.0, 10.0)));
    assert!(!field.contains(Vec2::new(100.0, 700.0)));
}

#[test]
fn advance_goes_to_the_next_level_then_to_victory() {
    let mut world = level_world(LevelId(1));
    ensure_messages::<LevelAdvanceRequest>(&mut world);
    world.write_message(LevelAdvanceRequest);
    run_system_once(&mut world, advance_level);

    assert_eq!(world.resource::<GameSession>().level, LevelId(2));
    assert_eq!(pending(&world), Some(GameState::LevelTransition));

    let mut world = level_world(LevelId(3));
    ensure_messages::<LevelAdvanceRequest>(&mut world);
    world.write_message(LevelAdvanceRequest);
    run_system_once(&mut world, advance_level);

    assert_eq!(pending(&world), Some(GameState::Victory));
}

#[test]
fn no_request_no_advance() {
    let mut world = level_world(LevelId(1));
    ensure_messages::<LevelAdvanceRequest>(&mut world);
    run_system_once(&mut world, advance_level);

    assert_eq!(world.resource::<GameSession>().level, LevelId(1));
    assert!(pending(&world).is_none());
}

#[test]
fn confirm_restarts_a_fresh_session() {
    let mut world = level_world(LevelId(3));
    world.resource_mut::<GameSession>().score = 4200;
    world.insert_resource(PowerCatalog::default());
    let mut progression = Progression::new(&PowerCatalog::default());
    progression.unlock_power(PowerKind::Lightning);
    world.insert_resource(progression);
    let mut cooldowns = Cooldowns::default();
    cooldowns.try_use(CooldownOwner::Player, PowerKind::Fireball, 0.0, 10.0);
    world.insert_resource(cooldowns);
    world.insert_resource(PowerSelection { index: 1 });
    world.insert_resource(PlayerInput::default());

    run_system_once(&mut world, restart_on_confirm);
    assert!(pending(&world).is_none());

    world.resource_mut::<PlayerInput>().confirm = true;
    run_system_once(&mut world, restart_on_confirm);

    assert_eq!(world.resource::<GameSession>(), &GameSession::new(3));
    assert_eq!(world.resource::<Progression>(), &Progression::new(&PowerCatalog::default()));
    assert_eq!(world.resource::<PowerSelection>(), &PowerSelection::default());
    assert!(world.resource::<Cooldowns>().is_ready(CooldownOwner::Player, PowerKind::Fireball, 0.0, 10.0));
    assert_eq!(pending(&world), Some(GameState::InGame));
}
