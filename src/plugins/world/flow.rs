//! Level flow: advance requests, the transition state and restarts.

use bevy::prelude::*;

use crate::common::session::GameSession;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::content::levels::LevelCatalog;
use crate::content::powers::PowerCatalog;
use crate::plugins::boss::LevelAdvanceRequest;
use crate::plugins::player::{PlayerInput, PowerSelection};
use crate::plugins::progression::Progression;
use crate::plugins::projectiles::cooldown::Cooldowns;

pub fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        advance_level.run_if(in_state(GameState::InGame)),
    )
    .add_systems(OnEnter(GameState::LevelTransition), enter_next_level)
    .add_systems(
        Update,
        restart_on_confirm.run_if(in_state(GameState::GameOver).or(in_state(GameState::Victory))),
    );
}

/// Move to the next level, or to the victory screen after the last one.
pub fn advance_level(
    levels: Res<LevelCatalog>,
    mut session: ResMut<GameSession>,
    mut requests: MessageReader<LevelAdvanceRequest>,
    mut next: ResMut<NextState<GameState>>,
) {
    if requests.read().count() == 0 {
        return;
    }

    session.level = session.level.next();
    if levels.contains(session.level) {
        info!("advancing to level {}", session.level);
        next.set(GameState::LevelTransition);
    } else {
        info!("all levels cleared, final score {}", session.score);
        next.set(GameState::Victory);
    }
}

fn enter_next_level(mut next: ResMut<NextState<GameState>>) {
    next.set(GameState::InGame);
}

/// Start a fresh session from level 1.
pub fn restart_on_confirm(
    input: Res<PlayerInput>,
    tunables: Res<Tunables>,
    catalog: Res<PowerCatalog>,
    mut session: ResMut<GameSession>,
    mut progression: ResMut<Progression>,
    mut cooldowns: ResMut<Cooldowns>,
    mut selection: ResMut<PowerSelection>,
    mut next: ResMut<NextState<GameState>>,
) {
    if !input.confirm {
        return;
    }
    *session = GameSession::new(tunables.starting_lives);
    *progression = Progression::new(&catalog);
    *selection = PowerSelection::default();
    cooldowns.clear();
    info!("restarting");
    next.set(GameState::InGame);
}
