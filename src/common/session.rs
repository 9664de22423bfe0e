//! Session-scoped state.
//!
//! Two lifetimes live here:
//! - [`GameSession`]: one per play-through, reset on restart.
//! - [`LevelSession`]: one per level load, reset on every entry to `InGame`.
//!
//! Progression and cooldowns have their own modules but follow the same rule:
//! they are resources owned by the app, never module-level statics.

use bevy::prelude::*;

use crate::content::levels::LevelId;

#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    pub score: u32,
    pub lives: u32,
    pub level: LevelId,
}

impl GameSession {
    pub fn new(lives: u32) -> Self {
        Self { score: 0, lives, level: LevelId::FIRST }
    }

    #[inline]
    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Remove one life and return how many are left.
    #[inline]
    pub fn lose_life(&mut self) -> u32 {
        self.lives = self.lives.saturating_sub(1);
        self.lives
    }
}

/// One-shot guards for the current level instance.
///
/// These are the first line of defense for "at most once per level"; the
/// progression store's own idempotence is the second.
#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct LevelSession {
    pub boss_triggered: bool,
    pub reward_granted: bool,
    /// Set once the encounter threshold is crossed; moves the respawn point.
    pub in_boss_area: bool,
    pub advance_requested: bool,
}
