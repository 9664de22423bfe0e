//! Projectile pipeline messages.
//!
//! Producers (player input, boss AI) only write [`CastRequest`]s; the spawner is
//! the single consumer that touches cooldowns and spawns entities.

use bevy::prelude::*;

use crate::content::powers::PowerKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CasterRef {
    Player,
    Boss(Entity),
}

#[derive(Message, Clone, Copy, Debug)]
pub struct CastRequest {
    pub caster: CasterRef,
    pub power: PowerKind,
    /// Explicit aim point. Boss casts fall back to the live player position.
    pub target: Option<Vec2>,
}

impl CastRequest {
    pub fn player(power: PowerKind) -> Self {
        Self { caster: CasterRef::Player, power, target: None }
    }

    pub fn boss(boss: Entity, power: PowerKind) -> Self {
        Self { caster: CasterRef::Boss(boss), power, target: None }
    }

    pub fn aimed_at(mut self, target: Vec2) -> Self {
        self.target = Some(target);
        self
    }
}

/// Written once, by the collision resolver, when a boss's hit points reach zero.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct BossDefeated {
    pub boss: Entity,
    pub at: Vec2,
}
