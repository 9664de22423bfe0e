mod common;

use avian2d::prelude::*;
use bevy::prelude::*;
use smash_dragons::common::session::{GameSession, LevelSession};
use smash_dragons::common::state::GameState;
use smash_dragons::common::tunables::Tunables;
use smash_dragons::content::bosses::BossKind;
use smash_dragons::content::levels::LevelId;
use smash_dragons::content::powers::{PowerCatalog, PowerKind};
use smash_dragons::plugins::boss::{
    Boss, BossAttack, BossEncounter, BossHealth, BossVictory, BossVisual, EncounterState,
};
use smash_dragons::plugins::hud::VictoryPanel;
use smash_dragons::plugins::player::{DeathCause, PlayerDeath, PlayerInput};
use smash_dragons::plugins::progression::Progression;
use smash_dragons::plugins::projectiles::components::{CasterRole, Projectile, ProjectileState};

#[derive(Resource, Default)]
struct Victories(usize);

fn count_victories(mut reader: MessageReader<BossVictory>, mut seen: ResMut<Victories>) {
    seen.0 += reader.read().count();
}

fn state(app: &App) -> GameState {
    *app.world().resource::<State<GameState>>().get()
}

fn encounter_state(world: &World) -> EncounterState {
    world.resource::<BossEncounter>().state.clone()
}

/// Spawn a one-damage player shot on the boss and report the contact the way
/// the physics step does, then run one frame.
fn land_player_hit(app: &mut App, boss: Entity) {
    let world = app.world_mut();
    let at = world
        .get::<Transform>(boss)
        .map(|tf| tf.translation)
        .expect("boss transform");
    let shot = world
        .spawn((
            Projectile {
                power: PowerKind::Fireball,
                role: CasterRole::Player,
                damage: 1,
            },
            ProjectileState::Flying,
            Transform::from_translation(at),
        ))
        .id();
    world.write_message(CollisionStart {
        collider1: shot,
        collider2: boss,
        body1: None,
        body2: Some(boss),
    });
    app.update();
}

/// Boot, walk past the threshold and wait for the real boss.
fn reach_active_boss(app: &mut App) -> Entity {
    app.update();
    app.update();
    common::pin_player(app.world_mut(), Vec2::new(1850.0, 400.0));

    common::run_until(app, 1.0, |w| {
        matches!(encounter_state(w), EncounterState::Announced { .. })
    });
    assert!(app.world().resource::<LevelSession>().boss_triggered);

    common::run_until(app, 2.0, |w| {
        matches!(encounter_state(w), EncounterState::Entering { .. })
    });
    {
        let world = app.world_mut();
        let visuals = world.query_filtered::<(), With<BossVisual>>().iter(world).count();
        assert_eq!(visuals, 1);
    }

    common::run_until(app, 3.0, |w| {
        w.resource::<BossEncounter>().active_boss().is_some()
    });
    app.world()
        .resource::<BossEncounter>()
        .active_boss()
        .expect("active boss")
}

#[test]
fn encounter_runs_from_threshold_to_next_level() {
    let mut app = common::app_headless();
    app.init_resource::<Victories>()
        .add_systems(Last, count_victories);
    let boss = reach_active_boss(&mut app);

    {
        let world = app.world_mut();
        let visuals = world.query_filtered::<(), With<BossVisual>>().iter(world).count();
        assert_eq!(visuals, 0, "visual stand-in is replaced by the real boss");
        assert_eq!(
            world.get::<Boss>(boss),
            Some(&Boss { kind: BossKind::WaterDragon })
        );
        assert_eq!(world.get::<BossHealth>(boss).map(|h| h.current), Some(15));
    }

    app.world_mut().entity_mut(boss).remove::<BossAttack>();
    let score_before = app.world().resource::<GameSession>().score;
    let tunables = app.world().resource::<Tunables>().clone();

    for hit in 1..=15 {
        land_player_hit(&mut app, boss);
        if hit < 15 {
            let hp = app.world().get::<BossHealth>(boss).map(|h| h.current);
            assert_eq!(hp, Some(15 - hit));
        }
    }
    assert_eq!(
        app.world().resource::<BossEncounter>().state,
        EncounterState::Defeated
    );
    app.update();

    {
        let world = app.world_mut();
        assert!(world.get_entity(boss).is_err());
        assert!(world.resource::<Progression>().is_unlocked(PowerKind::Waterball));
        assert!(world.resource::<Progression>().has_completed(LevelId(1)));
        assert!(world.resource::<LevelSession>().reward_granted);
        let earned = 15 * tunables.score_per_damage + tunables.boss_defeat_bonus;
        assert!(world.resource::<GameSession>().score >= score_before + earned);
        assert_eq!(world.resource::<Victories>().0, 1);
        let shots = world
            .query::<&Projectile>()
            .iter(world)
            .filter(|p| p.role == CasterRole::Player)
            .count();
        assert_eq!(shots, 0, "every landed shot is spent and despawned");
        let panels = world.query_filtered::<(), With<VictoryPanel>>().iter(world).count();
        assert_eq!(panels, 1);
    }

    app.world_mut().resource_mut::<PlayerInput>().confirm = true;
    app.update();
    app.world_mut().resource_mut::<PlayerInput>().confirm = false;
    common::run_for(&mut app, 0.1);

    assert_eq!(state(&app), GameState::InGame);
    let world = app.world();
    assert_eq!(world.resource::<GameSession>().level, LevelId(2));
    assert_eq!(world.resource::<BossEncounter>().boss, BossKind::IceDragon);
    assert!(world.resource::<BossEncounter>().is_dormant());
    assert_eq!(world.resource::<LevelSession>(), &LevelSession::default());
    // Progression survives the level change.
    assert!(world.resource::<Progression>().is_unlocked(PowerKind::Waterball));
}

#[test]
fn losing_the_last_life_ends_the_game_and_confirm_restarts() {
    let mut app = common::app_headless();
    app.update();
    app.update();
    common::pin_player(app.world_mut(), Vec2::new(150.0, 200.0));

    app.world_mut().resource_mut::<GameSession>().lives = 1;
    app.world_mut().resource_mut::<Progression>().unlock_power(PowerKind::Iceball);
    app.world_mut().write_message(PlayerDeath { cause: DeathCause::Fell });

    common::run_until(&mut app, 4.0, |w| {
        *w.resource::<State<GameState>>().get() == GameState::GameOver
    });
    assert_eq!(app.world().resource::<GameSession>().lives, 0);

    app.world_mut().resource_mut::<PlayerInput>().confirm = true;
    app.update();
    app.world_mut().resource_mut::<PlayerInput>().confirm = false;
    common::run_for(&mut app, 0.1);

    assert_eq!(state(&app), GameState::InGame);
    let world = app.world_mut();
    assert_eq!(world.resource::<GameSession>(), &GameSession::new(3));
    assert_eq!(world.resource::<Progression>(), &Progression::new(&PowerCatalog::default()));
    common::player(world);
}
