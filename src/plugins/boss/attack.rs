//! Boss AI: movement tick and ranged attacks.

use bevy::prelude::*;

use crate::content::powers::{PowerCatalog, PowerKind};
use crate::plugins::projectiles::messages::CastRequest;

use super::Boss;
use super::motion::BossMotion;

/// Attack clock. Holds fire during `grace`, then casts every `interval` seconds.
///
/// `last_shot` is stamped from the same elapsed time the spawner checks
/// [`Cooldowns`](crate::plugins::projectiles::cooldown::Cooldowns) against, so a
/// request sent here is never refused as "still cooling down".
#[derive(Component, Debug, Clone)]
pub struct BossAttack {
    pub power: PowerKind,
    pub grace: Timer,
    pub interval: f32,
    pub last_shot: Option<f64>,
    pub enabled: bool,
}

impl BossAttack {
    pub fn new(power: PowerKind, grace: f32, interval: f32) -> Self {
        Self {
            power,
            grace: Timer::from_seconds(grace.max(0.0), TimerMode::Once),
            interval: interval.max(0.05),
            last_shot: None,
            enabled: false,
        }
    }

    /// Seconds between casts: never shorter than the power's own cooldown.
    #[inline]
    pub fn effective_interval(&self, power_cooldown: f32) -> f32 {
        self.interval.max(power_cooldown)
    }

    /// Whether a cast is due at `now`, stamping it if so.
    pub fn try_fire(&mut self, now: f64, interval: f32) -> bool {
        let due = self
            .last_shot
            .is_none_or(|last| now - last >= f64::from(interval));
        if due {
            self.last_shot = Some(now);
        }
        due
    }
}

pub fn boss_attack(
    time: Res<Time>,
    catalog: Res<PowerCatalog>,
    mut q_boss: Query<(Entity, &mut BossAttack), With<Boss>>,
    mut casts: MessageWriter<CastRequest>,
) {
    let now = time.elapsed_secs_f64();

    for (e, mut attack) in &mut q_boss {
        if !attack.enabled {
            attack.grace.tick(time.delta());
            if !attack.grace.is_finished() {
                continue;
            }
            attack.enabled = true;
            // First volley one interval after the grace period.
            attack.last_shot = Some(now);
            debug!("boss {e:?} starts attacking");
            continue;
        }

        let cooldown = catalog.get(attack.power).map_or(0.0, |def| def.cooldown);
        let interval = attack.effective_interval(cooldown);
        if attack.try_fire(now, interval) {
            casts.write(CastRequest::boss(e, attack.power));
        }
    }
}

/// Fixed-step pattern evaluation.
pub fn boss_movement(time: Res<Time>, mut q_boss: Query<(&mut Transform, &mut BossMotion), With<Boss>>) {
    let dt = time.delta_secs();
    for (mut tf, mut motion) in &mut q_boss {
        let next = motion.advance(tf.translation.truncate(), dt);
        tf.translation.x = next.x;
        tf.translation.y = next.y;
    }
}
