//! Effects plugin: impact bursts, trail particles, camera trauma and sound cues.
//!
//! Gameplay code never spawns particles for impacts directly; it writes an
//! [`ImpactFx`] message and this plugin turns it into presentation. Particles are
//! plain colored sprites, so the whole thing runs headless.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;
use crate::plugins::camera::CameraRig;
use crate::plugins::projectiles::trail::scatter;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Burst {
    /// Projectile impact.
    Hit,
    /// Boss or player destroyed.
    Explosion,
}

impl Burst {
    #[inline]
    fn particle_count(self) -> u32 {
        match self {
            Burst::Hit => 24,
            Burst::Explosion => 48,
        }
    }

    #[inline]
    fn trauma(self) -> f32 {
        match self {
            Burst::Hit => 0.35,
            Burst::Explosion => 0.7,
        }
    }

    #[inline]
    fn speed_range(self) -> (f32, f32) {
        match self {
            Burst::Hit => (150.0, 350.0),
            Burst::Explosion => (200.0, 500.0),
        }
    }
}

#[derive(Message, Clone, Debug, PartialEq)]
pub struct ImpactFx {
    pub at: Vec2,
    pub palette: [Color; 2],
    pub burst: Burst,
    pub sound: Option<&'static str>,
}

impl ImpactFx {
    pub fn hit(at: Vec2, palette: [Color; 2], sound: Option<&'static str>) -> Self {
        Self { at, palette, burst: Burst::Hit, sound }
    }

    pub fn explosion(at: Vec2, color: Color) -> Self {
        Self { at, palette: [color; 2], burst: Burst::Explosion, sound: None }
    }
}

/// Request for the audio collaborator. This crate does not mix audio.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SoundCue(pub &'static str);

#[derive(Component, Debug, Clone)]
pub struct Particle {
    pub velocity: Vec2,
    pub life: Timer,
    /// Fade over the last `fade` seconds of life.
    pub fade: f32,
}

impl Particle {
    /// Alpha for the current age, in [0, 1].
    #[inline]
    pub fn alpha(&self) -> f32 {
        if self.fade <= 0.0 {
            return 1.0;
        }
        (self.life.remaining_secs() / self.fade).clamp(0.0, 1.0)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ParticleSpec {
    pub at: Vec2,
    pub velocity: Vec2,
    pub color: Color,
    pub size: f32,
    pub life: f32,
    pub fade: f32,
    pub z: f32,
}

pub fn spawn_particle(commands: &mut Commands, spec: ParticleSpec) -> Entity {
    commands
        .spawn((
            Particle {
                velocity: spec.velocity,
                life: Timer::from_seconds(spec.life.max(0.01), TimerMode::Once),
                fade: spec.fade,
            },
            Sprite::from_color(spec.color, Vec2::splat(spec.size.max(1.0))),
            Transform::from_translation(spec.at.extend(spec.z)),
            DespawnOnExit(GameState::InGame),
        ))
        .id()
}

pub fn plugin(app: &mut App) {
    app.add_message::<ImpactFx>()
        .add_message::<SoundCue>()
        .add_systems(
            Update,
            (spawn_impact_bursts, update_particles).run_if(in_state(GameState::InGame)),
        );
}

/// Radial burst along golden-angle directions, alternating the two palette colors.
fn spawn_impact_bursts(
    mut commands: Commands,
    mut reader: MessageReader<ImpactFx>,
    mut rig: ResMut<CameraRig>,
    mut sounds: MessageWriter<SoundCue>,
) {
    for fx in reader.read() {
        let (lo, hi) = fx.burst.speed_range();
        let count = fx.burst.particle_count();

        for i in 0..count {
            let s = scatter(i + 1);
            let dir = Vec2::from_angle(i as f32 * 2.399_963);
            let speed = lo + (hi - lo) * (0.5 + 0.5 * s.x);
            spawn_particle(
                &mut commands,
                ParticleSpec {
                    at: fx.at,
                    velocity: dir * speed,
                    color: fx.palette[(i % 2) as usize],
                    size: 3.0 + 4.5 * (1.0 + s.y),
                    life: 0.8,
                    fade: 0.6,
                    z: 15.0,
                },
            );
        }

        rig.add_trauma(fx.burst.trauma());

        if let Some(sound) = fx.sound {
            sounds.write(SoundCue(sound));
        }
    }
}

fn update_particles(
    mut commands: Commands,
    time: Res<Time>,
    mut q: Query<(Entity, &mut Particle, &mut Transform, &mut Sprite)>,
) {
    let dt = time.delta_secs();

    for (e, mut particle, mut tf, mut sprite) in &mut q {
        particle.life.tick(time.delta());
        if particle.life.is_finished() {
            commands.entity(e).despawn();
            continue;
        }

        tf.translation += (particle.velocity * dt).extend(0.0);

        let mut c = sprite.color.to_srgba();
        c.alpha = particle.alpha();
        sprite.color = c.into();
    }
}

#[cfg(test)]
mod tests;
