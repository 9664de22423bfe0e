//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides core ECS runtime.
//! - we then call `smash_dragons::game::configure_headless` to install gameplay plugins.
//! - time advances by a fixed step per `update()` so timers are deterministic.

#![allow(dead_code)]

use std::time::Duration;

use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use smash_dragons::plugins::player::Player;

pub const FRAME: f32 = 1.0 / 60.0;

pub fn app_headless() -> App {
    let mut app = App::new();

    // AssetPlugin + ScenePlugin so SceneSpawner exists for state-scoped cleanup.
    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(FRAME)));

    smash_dragons::game::configure_headless(&mut app);

    // `App::run` does this before the first frame; plugins register resources in `finish`.
    app.finish();
    app.cleanup();
    app
}

/// Run `secs` worth of frames.
pub fn run_for(app: &mut App, secs: f32) {
    let frames = (secs / FRAME).ceil() as usize;
    for _ in 0..frames {
        app.update();
    }
}

/// Update until `done` holds, failing after `max_secs` of game time.
pub fn run_until(app: &mut App, max_secs: f32, mut done: impl FnMut(&mut World) -> bool) {
    let frames = (max_secs / FRAME).ceil() as usize;
    for _ in 0..frames {
        app.update();
        if done(app.world_mut()) {
            return;
        }
    }
    panic!("condition not reached within {max_secs}s");
}

pub fn player(world: &mut World) -> Entity {
    world
        .query_filtered::<Entity, With<Player>>()
        .single(world)
        .expect("exactly one player")
}

/// Pin the player at `at`, out of the physics simulation.
pub fn pin_player(world: &mut World, at: Vec2) {
    let e = player(world);
    world.entity_mut(e).remove::<avian2d::prelude::RigidBody>();
    if let Some(mut tf) = world.get_mut::<Transform>(e) {
        tf.translation.x = at.x;
        tf.translation.y = at.y;
    }
}
