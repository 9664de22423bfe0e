//! Spent commit: the only place projectiles are despawned.
//!
//! Everything else (collision, off-screen, player death) just flips
//! `ProjectileState::Spent`. Trail emitters notice on their next tick.

use bevy::prelude::*;

use crate::plugins::world::Playfield;

use super::components::{Projectile, ProjectileState};

/// Projectiles that left the playfield are spent.
pub fn mark_offscreen_projectiles(
    playfield: Option<Res<Playfield>>,
    mut q: Query<(&Transform, &mut ProjectileState), With<Projectile>>,
) {
    let Some(playfield) = playfield else { return };

    for (tf, mut state) in &mut q {
        if *state == ProjectileState::Flying && !playfield.contains(tf.translation.truncate()) {
            *state = ProjectileState::Spent;
        }
    }
}

pub fn despawn_spent_projectiles(
    mut commands: Commands,
    q: Query<(Entity, &ProjectileState), With<Projectile>>,
) {
    for (e, state) in &q {
        if *state == ProjectileState::Spent {
            commands.entity(e).despawn();
        }
    }
}

/// Mark every projectile in flight as spent (player death clears the screen).
pub fn spend_all(q: &mut Query<&mut ProjectileState, With<Projectile>>) {
    for mut state in q.iter_mut() {
        *state = ProjectileState::Spent;
    }
}
