//! Trail emitters.
//!
//! An emitter is its own entity pointing at a projectile. It is a repeating
//! timer, not a blocking loop, so cancellation is "check the target each tick,
//! stop when it is gone or spent".

use bevy::prelude::*;

use crate::plugins::effects::{ParticleSpec, spawn_particle};

use super::components::{Projectile, ProjectileState};

#[derive(Component, Debug, Clone)]
pub struct TrailEmitter {
    pub target: Entity,
    pub color: Color,
    pub timer: Timer,
    pub emitted: u32,
}

impl TrailEmitter {
    pub fn new(target: Entity, color: Color, interval: f32) -> Self {
        Self {
            target,
            color,
            timer: Timer::from_seconds(interval.max(0.005), TimerMode::Repeating),
            emitted: 0,
        }
    }
}

/// Deterministic scatter in [-1, 1]² (golden-angle walk, no RNG needed).
#[inline]
pub fn scatter(seq: u32) -> Vec2 {
    let a = seq as f32 * 2.399_963;
    Vec2::new(a.sin(), (a * 1.618_034).cos())
}

pub fn emit_trails(
    mut commands: Commands,
    time: Res<Time>,
    mut q_emitters: Query<(Entity, &mut TrailEmitter)>,
    q_targets: Query<(&Transform, &ProjectileState), With<Projectile>>,
) {
    for (e, mut emitter) in &mut q_emitters {
        let alive = q_targets
            .get(emitter.target)
            .ok()
            .filter(|(_, state)| **state == ProjectileState::Flying)
            .map(|(tf, _)| tf.translation.truncate());

        let Some(pos) = alive else {
            commands.entity(e).despawn();
            continue;
        };

        emitter.timer.tick(time.delta());
        for _ in 0..emitter.timer.times_finished_this_tick() {
            emitter.emitted = emitter.emitted.wrapping_add(1);
            let jitter = scatter(emitter.emitted);
            spawn_particle(
                &mut commands,
                ParticleSpec {
                    at: pos + jitter * 5.0,
                    velocity: Vec2::ZERO,
                    color: emitter.color,
                    size: 3.0 + 2.5 * (1.0 + jitter.x),
                    life: 0.4,
                    fade: 0.3,
                    z: 1.5,
                },
            );
        }
    }
}
