use avian2d::prelude::*;
use bevy::platform::collections::HashSet;
use bevy::prelude::*;

use crate::common::session::GameSession;
use crate::common::tunables::Tunables;
use crate::content::powers::PowerCatalog;
use crate::plugins::boss::{Boss, BossHealth, HitOutcome};
use crate::plugins::effects::ImpactFx;
use crate::plugins::player::{DeathCause, Player, PlayerDeath, PlayerLife};
use crate::plugins::world::Terrain;

use super::components::{CasterRole, Projectile, ProjectileState};
use super::messages::BossDefeated;

#[derive(Clone, Copy, Debug)]
struct CollisionTarget {
    collider: Entity,
    body: Option<Entity>,
}

impl CollisionTarget {
    #[inline]
    fn gameplay_owner(self) -> Entity {
        self.body.unwrap_or(self.collider)
    }
}

#[inline]
fn targets(ev: &CollisionStart) -> (CollisionTarget, CollisionTarget) {
    (
        CollisionTarget {
            collider: ev.collider1,
            body: ev.body1,
        },
        CollisionTarget {
            collider: ev.collider2,
            body: ev.body2,
        },
    )
}

/// What a projectile touched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Contact {
    Player { vulnerable: bool },
    Boss,
    Terrain,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reaction {
    HitPlayer,
    HitBoss,
    Shatter,
    Ignore,
}

/// The caster role alone decides which branch may fire.
///
/// Player shots never hurt the player, boss shots never hurt the boss, and
/// terrain stops everything.
#[inline]
pub fn reaction(role: CasterRole, contact: Contact) -> Reaction {
    match (role, contact) {
        (CasterRole::Boss, Contact::Player { vulnerable: true }) => Reaction::HitPlayer,
        (CasterRole::Player, Contact::Boss) => Reaction::HitBoss,
        (_, Contact::Terrain) => Reaction::Shatter,
        _ => Reaction::Ignore,
    }
}

pub fn resolve_projectile_collisions(
    mut started: MessageReader<CollisionStart>,
    tunables: Res<Tunables>,
    catalog: Res<PowerCatalog>,
    mut session: ResMut<GameSession>,
    mut q_projectiles: Query<(&Projectile, &mut ProjectileState, &Transform)>,
    q_player: Query<&PlayerLife, With<Player>>,
    mut q_boss: Query<(&mut BossHealth, &Transform), (With<Boss>, Without<Projectile>)>,
    q_terrain: Query<(), With<Terrain>>,
    mut impacts: MessageWriter<ImpactFx>,
    mut deaths: MessageWriter<PlayerDeath>,
    mut defeats: MessageWriter<BossDefeated>,
    // Per-frame dedupe
    mut seen: Local<HashSet<Entity>>,
) {
    seen.clear();

    for ev in started.read() {
        let (t1, t2) = targets(ev);

        let p1 = q_projectiles.contains(t1.collider);
        let p2 = q_projectiles.contains(t2.collider);
        if !(p1 ^ p2) {
            continue; // must be exactly one projectile
        }
        let (shot, other) = if p1 { (t1, t2) } else { (t2, t1) };
        let owner = other.gameplay_owner();

        let contact = if let Ok(life) = q_player.get(owner) {
            Contact::Player { vulnerable: life.is_vulnerable() }
        } else if q_boss.contains(owner) {
            Contact::Boss
        } else if q_terrain.contains(owner) || q_terrain.contains(other.collider) {
            Contact::Terrain
        } else {
            continue;
        };

        let Ok((projectile, mut state, tf)) = q_projectiles.get_mut(shot.collider) else {
            continue;
        };
        if *state != ProjectileState::Flying {
            continue;
        }

        let reaction = reaction(projectile.role, contact);
        if reaction == Reaction::Ignore {
            continue;
        }
        if !seen.insert(shot.collider) {
            continue;
        }

        let at = tf.translation.truncate();
        let impact = match catalog.get(projectile.power) {
            Ok(def) => ImpactFx::hit(at, def.effect_colors, def.sound),
            Err(e) => {
                warn!("impact without effect data: {e}");
                ImpactFx::hit(at, [Color::WHITE; 2], None)
            }
        };

        match reaction {
            Reaction::HitPlayer => {
                *state = ProjectileState::Spent;
                impacts.write(impact);
                deaths.write(PlayerDeath {
                    cause: DeathCause::Struck(projectile.power),
                });
            }
            Reaction::HitBoss => {
                let Ok((mut hp, boss_tf)) = q_boss.get_mut(owner) else {
                    continue;
                };
                let outcome = hp.take_damage(projectile.damage);
                if outcome == HitOutcome::AlreadyDown {
                    continue;
                }

                *state = ProjectileState::Spent;
                let damage = u32::try_from(projectile.damage).unwrap_or(0);
                session.add_score(damage * tunables.score_per_damage);
                impacts.write(impact);

                if outcome == HitOutcome::Defeated {
                    defeats.write(BossDefeated {
                        boss: owner,
                        at: boss_tf.translation.truncate(),
                    });
                }
            }
            Reaction::Shatter => {
                *state = ProjectileState::Spent;
                impacts.write(impact);
            }
            Reaction::Ignore => {}
        }
    }
}
