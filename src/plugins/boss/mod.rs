//! Boss plugin: the per-level encounter state machine and the boss itself.
//!
//! ---------------------------
//! ENCOUNTER (one per level load)
//! ---------------------------
//! ```text
//! Dormant --(player crosses threshold)--> Announced{timer}
//! Announced --(timer done)--> Entering{entrance}      visual-only boss slides in
//! Entering --(progress == 1)--> Active{boss}          real boss, grace delay, fitted motion
//! Active --(BossDefeated)--> Defeated                 reward, victory panel
//! Defeated --(confirm)--> LevelAdvanceRequest
//! ```
//!
//! Every stage is a stored timer or progress value recomputed each frame; no
//! stage blocks. The "at most once per level" guards live on [`LevelSession`],
//! the progression store's idempotence backs them up.
//!
//! [`LevelSession`]: crate::common::session::LevelSession

pub mod attack;
pub mod encounter;
pub mod motion;

use avian2d::collision::narrow_phase::CollisionEventSystems;
use bevy::prelude::*;

use crate::common::state::GameState;
use crate::content::bosses::BossKind;
use crate::content::powers::PowerKind;
use crate::plugins::projectiles::collision::resolve_projectile_collisions;
use crate::plugins::projectiles::commit::despawn_spent_projectiles;
use crate::plugins::projectiles::spawner::spawn_requested_projectiles;

pub use attack::BossAttack;
pub use encounter::{BossEncounter, EncounterState, Entrance};
pub use motion::BossMotion;

// -----------------------------------------------------------------------------
// Components
// -----------------------------------------------------------------------------

/// The real, interactive boss.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boss {
    pub kind: BossKind,
}

/// Non-interactive stand-in used during the entrance animation.
#[derive(Component, Debug, Clone, Copy)]
pub struct BossVisual;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitOutcome {
    Wounded,
    /// This hit took the boss to zero. Happens at most once per boss.
    Defeated,
    /// The boss was already down; the hit changed nothing.
    AlreadyDown,
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BossHealth {
    pub current: i32,
    pub max: i32,
}

impl BossHealth {
    pub fn new(max: i32) -> Self {
        let max = max.max(1);
        Self { current: max, max }
    }

    /// Apply `damage` (at least 1). Hit points never go below zero.
    pub fn take_damage(&mut self, damage: i32) -> HitOutcome {
        if self.current <= 0 {
            return HitOutcome::AlreadyDown;
        }
        self.current = (self.current - damage.max(1)).max(0);
        if self.current == 0 {
            HitOutcome::Defeated
        } else {
            HitOutcome::Wounded
        }
    }

    #[inline]
    pub fn fraction(&self) -> f32 {
        (self.current as f32 / self.max as f32).clamp(0.0, 1.0)
    }
}

// -----------------------------------------------------------------------------
// Messages
// -----------------------------------------------------------------------------

#[derive(Message, Clone, Debug, PartialEq, Eq)]
pub struct EncounterAnnounced {
    pub name: &'static str,
}

#[derive(Message, Clone, Debug, PartialEq, Eq)]
pub struct BossActivated {
    pub boss: Entity,
    pub kind: BossKind,
    pub name: &'static str,
    pub max_hp: i32,
}

#[derive(Message, Clone, Debug, PartialEq, Eq)]
pub struct BossVictory {
    pub name: &'static str,
    pub reward: PowerKind,
    /// `false` when the player already owned the reward.
    pub newly_unlocked: bool,
}

/// Ask the level loader for the next level.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelAdvanceRequest;

// -----------------------------------------------------------------------------
// Plugin
// -----------------------------------------------------------------------------

pub fn plugin(app: &mut App) {
    app.init_resource::<BossEncounter>()
        .add_message::<EncounterAnnounced>()
        .add_message::<BossActivated>()
        .add_message::<BossVictory>()
        .add_message::<LevelAdvanceRequest>()
        .add_systems(OnEnter(GameState::InGame), encounter::prepare_encounter);

    app.add_systems(
        Update,
        (
            encounter::detect_encounter_threshold,
            encounter::advance_announcement,
            encounter::advance_entrance,
            attack::boss_attack.before(spawn_requested_projectiles),
            encounter::await_confirmation,
        )
            .chain()
            .run_if(in_state(GameState::InGame)),
    );

    app.add_systems(
        FixedUpdate,
        attack::boss_movement.run_if(in_state(GameState::InGame)),
    );

    app.add_systems(
        FixedPostUpdate,
        encounter::conclude_encounter
            .after(CollisionEventSystems)
            .after(resolve_projectile_collisions)
            .before(despawn_spent_projectiles)
            .run_if(in_state(GameState::InGame)),
    );
}
