//! Projectiles plugin: **message-based cast requests** → spawner → collision resolver → commit.
//!
//! Player and boss attacks share one data-driven pipeline. A power definition
//! (speed, cooldown, damage, colors) is all that distinguishes a fireball from
//! a waterball; the caster role decides who it can hurt.
//!
//! # Data flow (big picture)
//! ```text
//!   Update schedule (variable dt)
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (A) Producers: player::fire_selected_power, boss::attack::boss_attack     │
//!│      - writes: CastRequest message                                         │
//!│                                                                            │
//!│  (B) Consumer: spawner::spawn_requested_projectiles                        │
//!│      - reads: CastRequest, PowerCatalog, Player / Boss transforms          │
//!│      - mutates: Cooldowns                                                  │
//!│      - spawns: Projectile + TrailEmitter                                   │
//!│                                                                            │
//!│  (C) trail::emit_trails                                                    │
//!│      - despawns an emitter once its projectile is gone or spent            │
//!└────────────────────────────────────────────────────────────────────────────┘
//!                │
//!                v
//!FixedPostUpdate (fixed dt)
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (D) Physics emits CollisionStart messages (Avian)                         │
//!│                                                                            │
//!│  (E) collision::resolve_projectile_collisions                              │
//!│      - projectile × player  → PlayerDeath        (boss casts only)         │
//!│      - projectile × boss    → damage, score, BossDefeated (player casts)   │
//!│      - projectile × terrain → impact only                                  │
//!│      - mutates: ProjectileState -> Spent                                   │
//!│                                                                            │
//!│  (F) commit::despawn_spent_projectiles                                     │
//!└────────────────────────────────────────────────────────────────────────────┘
//!
//!PostUpdate: commit::mark_offscreen_projectiles -> commit::despawn_spent_projectiles
//! ```

pub mod collision;
pub mod commit;
pub mod components;
pub mod cooldown;
pub mod messages;
pub mod spawner;
pub mod trail;

use avian2d::collision::narrow_phase::CollisionEventSystems;
use bevy::prelude::*;

use crate::common::state::GameState;

pub struct ProjectilesPlugin;

impl Plugin for ProjectilesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<cooldown::Cooldowns>()
            .add_message::<messages::CastRequest>()
            .add_message::<messages::BossDefeated>()
            .add_systems(OnEnter(GameState::InGame), cooldown::reset_cooldowns);

        // Update-phase pipeline: request -> spawn -> trails
        app.add_systems(
            Update,
            (
                spawner::spawn_requested_projectiles,
                trail::emit_trails.after(spawner::spawn_requested_projectiles),
            )
                .run_if(in_state(GameState::InGame)),
        );

        // Fixed collision pipeline
        app.add_systems(
            FixedPostUpdate,
            collision::resolve_projectile_collisions
                .after(CollisionEventSystems)
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            FixedPostUpdate,
            commit::despawn_spent_projectiles
                .after(collision::resolve_projectile_collisions)
                .run_if(in_state(GameState::InGame)),
        );

        app.add_systems(
            PostUpdate,
            (
                commit::mark_offscreen_projectiles,
                commit::despawn_spent_projectiles,
            )
                .chain()
                .run_if(in_state(GameState::InGame)),
        );
    }
}
