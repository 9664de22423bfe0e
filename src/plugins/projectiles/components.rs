use bevy::prelude::*;

use crate::content::powers::PowerKind;

/// Which side of the fight cast a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CasterRole {
    Player,
    Boss,
}

#[derive(Component, Debug, Clone)]
pub struct Projectile {
    pub power: PowerKind,
    pub role: CasterRole,
    pub damage: i32,
}

/// Projectile lifecycle.
///
/// `Spent` projectiles are inert: the resolver skips them and the commit system
/// despawns them at the end of the same schedule. This is what makes a hit in
/// frame N unable to land again in frame N+1.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectileState {
    #[default]
    Flying,
    Spent,
}
