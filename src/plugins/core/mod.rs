//! Core plugin: shared resources and global settings.
//!
//! Content catalogs and session state are inserted only when absent, so tests
//! can pre-insert reduced catalogs before building the app.

use bevy::prelude::*;

use crate::common::session::{GameSession, LevelSession};
use crate::common::tunables::Tunables;
use crate::content::bosses::BossCatalog;
use crate::content::levels::LevelCatalog;
use crate::content::powers::PowerCatalog;

pub fn plugin(app: &mut App) {
    app.init_resource::<Tunables>()
        .init_resource::<PowerCatalog>()
        .init_resource::<BossCatalog>()
        .init_resource::<LevelCatalog>()
        .init_resource::<LevelSession>();

    if !app.world().contains_resource::<GameSession>() {
        let lives = app.world().resource::<Tunables>().starting_lives;
        app.insert_resource(GameSession::new(lives));
    }

    app.insert_resource(ClearColor(Color::srgb(0.05, 0.05, 0.07)));
}

#[cfg(test)]
mod tests;
