//! Spawn consumer: turn cast requests into projectile entities.
//!
//! # Where do we branch?
//! - Catalog miss: logged, request dropped.
//! - Caster or target missing (player mid-respawn, boss already gone): request dropped.
//! - Cooldown: request dropped silently; this is a rate limiter, not an error.
//!
//! The decision part lives in [`plan_cast`] so it can be tested without a world.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::layers::Layer;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::content::ContentError;
use crate::content::powers::{PowerCatalog, PowerDefinition, PowerKind};
use crate::plugins::boss::Boss;
use crate::plugins::player::{Facing, Player, PlayerLife};

use super::components::{CasterRole, Projectile, ProjectileState};
use super::cooldown::{CooldownOwner, Cooldowns};
use super::messages::{CastRequest, CasterRef};
use super::trail::TrailEmitter;

/// A caster resolved for this frame, carrying only what its role needs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Caster {
    Player { origin: Vec2, facing: f32 },
    Boss { entity: Entity, origin: Vec2, target: Vec2 },
}

impl Caster {
    #[inline]
    pub fn role(&self) -> CasterRole {
        match self {
            Caster::Player { .. } => CasterRole::Player,
            Caster::Boss { .. } => CasterRole::Boss,
        }
    }

    #[inline]
    pub fn cooldown_owner(&self) -> CooldownOwner {
        match self {
            Caster::Player { .. } => CooldownOwner::Player,
            Caster::Boss { entity, .. } => CooldownOwner::Boss(*entity),
        }
    }

    /// Spawn point and unit direction.
    ///
    /// The player shoots along its facing with a small upward bias; a boss aims
    /// straight at its target.
    pub fn aim(&self, tunables: &Tunables) -> (Vec2, Vec2) {
        match *self {
            Caster::Player { origin, facing } => {
                let facing = if facing < 0.0 { -1.0 } else { 1.0 };
                let dir = Vec2::new(facing, tunables.player_upward_bias).normalize();
                let offset = Vec2::new(tunables.player_cast_offset.x * facing, tunables.player_cast_offset.y);
                (origin + offset, dir)
            }
            Caster::Boss { origin, target, .. } => {
                let dir = (target - origin).try_normalize().unwrap_or(Vec2::NEG_X);
                (origin + tunables.boss_cast_offset, dir)
            }
        }
    }
}

/// Everything needed to spawn one projectile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Launch {
    pub power: PowerKind,
    pub role: CasterRole,
    pub origin: Vec2,
    pub velocity: Vec2,
    pub damage: i32,
}

/// Decide whether `caster` may cast `power` at `now`, consuming the cooldown if so.
///
/// `Ok(None)` means "still cooling down".
pub fn plan_cast(
    catalog: &PowerCatalog,
    cooldowns: &mut Cooldowns,
    tunables: &Tunables,
    now: f64,
    caster: &Caster,
    power: PowerKind,
) -> Result<Option<Launch>, ContentError> {
    let def = catalog.get(power)?;

    if !cooldowns.try_use(caster.cooldown_owner(), power, now, def.cooldown) {
        return Ok(None);
    }

    let (origin, dir) = caster.aim(tunables);
    Ok(Some(Launch {
        power,
        role: caster.role(),
        origin,
        velocity: dir * def.speed,
        damage: def.damage,
    }))
}

#[inline]
fn projectile_layers(role: CasterRole) -> CollisionLayers {
    match role {
        CasterRole::Player => CollisionLayers::new(Layer::PlayerProjectile, [Layer::World, Layer::Boss]),
        CasterRole::Boss => CollisionLayers::new(Layer::BossProjectile, [Layer::World, Layer::Player]),
    }
}

/// Spawn the projectile and its trail emitter. Returns the projectile entity.
pub fn spawn_projectile(
    commands: &mut Commands,
    def: &PowerDefinition,
    launch: &Launch,
) -> Entity {
    let edge = def.size * def.scale;

    let projectile = commands
        .spawn((
            Name::new(format!("Projectile({})", def.sprite)),
            Projectile {
                power: launch.power,
                role: launch.role,
                damage: launch.damage,
            },
            ProjectileState::Flying,
            Sprite::from_color(def.trail_color, Vec2::splat(edge)),
            Transform::from_translation(launch.origin.extend(2.0)),
            // Dynamic + sensor + no gravity: flies straight and reports overlaps
            // with static terrain without being pushed by it.
            RigidBody::Dynamic,
            GravityScale(0.0),
            Collider::circle(edge * 0.5),
            Sensor,
            projectile_layers(launch.role),
            LinearVelocity(launch.velocity),
            CollisionEventsEnabled,
            DespawnOnExit(GameState::InGame),
        ))
        .id();

    commands.spawn((
        Name::new("TrailEmitter"),
        TrailEmitter::new(projectile, def.trail_color, def.trail_interval),
        DespawnOnExit(GameState::InGame),
    ));

    projectile
}

pub fn spawn_requested_projectiles(
    mut commands: Commands,
    time: Res<Time>,
    tunables: Res<Tunables>,
    catalog: Res<PowerCatalog>,
    mut cooldowns: ResMut<Cooldowns>,
    mut requests: MessageReader<CastRequest>,
    q_player: Query<(&Transform, &Facing, &PlayerLife), With<Player>>,
    q_boss: Query<&Transform, (With<Boss>, Without<Player>)>,
) {
    let now = time.elapsed_secs_f64();

    // Live player position, if the player can currently be targeted.
    let player_target = q_player
        .single()
        .ok()
        .filter(|(_, _, life)| life.is_targetable())
        .map(|(tf, _, _)| tf.translation.truncate());

    for req in requests.read() {
        let caster = match req.caster {
            CasterRef::Player => {
                let Ok((tf, facing, life)) = q_player.single() else {
                    debug!("cast skipped: no single player");
                    continue;
                };
                if !life.can_act() {
                    continue;
                }
                Caster::Player { origin: tf.translation.truncate(), facing: facing.0 }
            }
            CasterRef::Boss(entity) => {
                let Ok(tf) = q_boss.get(entity) else {
                    debug!("cast skipped: boss {entity:?} is gone");
                    continue;
                };
                let Some(target) = req.target.or(player_target) else {
                    debug!("cast skipped: no target for boss {entity:?}");
                    continue;
                };
                Caster::Boss { entity, origin: tf.translation.truncate(), target }
            }
        };

        let launch = match plan_cast(&catalog, &mut cooldowns, &tunables, now, &caster, req.power) {
            Ok(Some(launch)) => launch,
            Ok(None) => continue,
            Err(e) => {
                warn!("cast skipped: {e}");
                continue;
            }
        };

        // plan_cast already resolved this definition.
        let Ok(def) = catalog.get(launch.power) else { continue };
        spawn_projectile(&mut commands, def, &launch);
    }
}
