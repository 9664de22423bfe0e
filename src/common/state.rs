//! Global state machine.

use bevy::prelude::*;

/// Top-level flow.
///
/// `LevelTransition` exists so that a level advance always runs the full
/// `OnExit(InGame)` / `OnEnter(InGame)` pair, which despawns and rebuilds the level.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    #[default]
    InGame,
    LevelTransition,
    GameOver,
    Victory,
}
