//! Feature plugins.

use bevy::prelude::*;

use crate::plugins::projectiles::ProjectilesPlugin;

pub mod boss;
pub mod core;
pub mod effects;
pub mod hud;
pub mod physics;
pub mod player;
pub mod progression;
pub mod projectiles;
pub mod world;

// Render-only (camera also holds the headless `CameraRig`)
pub mod camera;
pub mod lighting;

/// Register gameplay plugins that work in headless tests.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    physics::plugin(app);
    progression::plugin(app);
    camera::rig::plugin(app);
    world::plugin(app);
    player::plugin(app);
    boss::plugin(app);
    effects::plugin(app);
    hud::plugin(app);
    app.add_plugins(ProjectilesPlugin);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    lighting::plugin(app);
    camera::plugin(app);
}

/// Register all plugins (full app).
pub fn register_all(app: &mut App) {
    register_gameplay(app);
    register_render(app);
}
