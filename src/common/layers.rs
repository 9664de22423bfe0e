//! Collision layers.

use avian2d::prelude::*;

#[derive(PhysicsLayer, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    #[default]
    Default,
    World,
    Player,
    Boss,
    PlayerProjectile,
    BossProjectile,
}

#[inline]
pub fn terrain_layers() -> CollisionLayers {
    CollisionLayers::new(
        Layer::World,
        [Layer::Player, Layer::PlayerProjectile, Layer::BossProjectile],
    )
}

#[inline]
pub fn player_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Player, [Layer::World, Layer::BossProjectile])
}

/// Bosses only meet player projectiles; the player can walk through them.
#[inline]
pub fn boss_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Boss, [Layer::PlayerProjectile])
}
