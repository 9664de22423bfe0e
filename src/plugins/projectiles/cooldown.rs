//! Per-caster, per-power cast cooldowns.
//!
//! The player is a single global caster, so its key is role-scoped. Bosses are
//! keyed by entity so two bosses never share a timer.

use bevy::platform::collections::HashMap;
use bevy::prelude::*;

use crate::content::powers::PowerKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CooldownOwner {
    Player,
    Boss(Entity),
}

#[derive(Resource, Debug, Default)]
pub struct Cooldowns {
    last_use: HashMap<(CooldownOwner, PowerKind), f64>,
}

impl Cooldowns {
    pub fn is_ready(&self, owner: CooldownOwner, power: PowerKind, now: f64, cooldown: f32) -> bool {
        self.remaining(owner, power, now, cooldown) <= 0.0
    }

    /// Seconds until `power` can be cast again by `owner` (0 when ready).
    pub fn remaining(&self, owner: CooldownOwner, power: PowerKind, now: f64, cooldown: f32) -> f32 {
        match self.last_use.get(&(owner, power)) {
            Some(last) => (f64::from(cooldown) - (now - last)).max(0.0) as f32,
            None => 0.0,
        }
    }

    /// Record a use if the cooldown has elapsed. Returns whether the cast may proceed.
    pub fn try_use(&mut self, owner: CooldownOwner, power: PowerKind, now: f64, cooldown: f32) -> bool {
        if !self.is_ready(owner, power, now, cooldown) {
            return false;
        }
        self.last_use.insert((owner, power), now);
        true
    }

    pub fn clear(&mut self) {
        self.last_use.clear();
    }
}

/// Boss entity ids do not survive a level reload.
pub fn reset_cooldowns(mut cooldowns: ResMut<Cooldowns>) {
    cooldowns.clear();
}
