use bevy::prelude::*;

use crate::common::test_utils::{collect_messages, ensure_messages, insert_time, run_system_once};
use crate::plugins::camera::CameraRig;

use super::*;

fn effects_world() -> World {
    let mut world = World::new();
    ensure_messages::<ImpactFx>(&mut world);
    ensure_messages::<SoundCue>(&mut world);
    world.insert_resource(CameraRig::new(Vec2::new(800.0, 600.0)));
    world
}

fn particle_count(world: &mut World) -> usize {
    world.query::<&Particle>().iter(world).count()
}

#[test]
fn hit_burst_spawns_particles_shakes_and_cues_sound() {
    let mut world = effects_world();
    world.write_message(ImpactFx::hit(
        Vec2::new(10.0, 20.0),
        [Color::WHITE, Color::BLACK],
        Some("fire_hit"),
    ));

    run_system_once(&mut world, spawn_impact_bursts);

    assert_eq!(particle_count(&mut world), 24);
    assert!(world.resource::<CameraRig>().trauma.get() > 0.0);
    assert_eq!(collect_messages::<SoundCue>(&mut world), vec![SoundCue("fire_hit")]);
}

#[test]
fn explosion_is_bigger_and_silent() {
    let mut world = effects_world();
    world.write_message(ImpactFx::explosion(Vec2::ZERO, Color::WHITE));

    run_system_once(&mut world, spawn_impact_bursts);

    assert_eq!(particle_count(&mut world), 48);
    assert!(collect_messages::<SoundCue>(&mut world).is_empty());
}

#[test]
fn particle_alpha_fades_over_its_tail() {
    let mut p = Particle {
        velocity: Vec2::ZERO,
        life: Timer::from_seconds(1.0, TimerMode::Once),
        fade: 0.5,
    };
    assert_eq!(p.alpha(), 1.0);

    p.life.tick(std::time::Duration::from_secs_f32(0.75));
    approx::assert_relative_eq!(p.alpha(), 0.5, epsilon = 1e-4);
}

#[test]
fn particles_move_and_expire() {
    let mut world = World::new();
    let e = world
        .spawn((
            Particle {
                velocity: Vec2::new(100.0, 0.0),
                life: Timer::from_seconds(0.3, TimerMode::Once),
                fade: 0.1,
            },
            Sprite::from_color(Color::WHITE, Vec2::ONE),
            Transform::default(),
        ))
        .id();

    insert_time(&mut world, 0.1);
    run_system_once(&mut world, update_particles);
    let x = world.get::<Transform>(e).map(|tf| tf.translation.x);
    approx::assert_relative_eq!(x.unwrap_or_default(), 10.0, epsilon = 1e-3);

    insert_time(&mut world, 0.5);
    run_system_once(&mut world, update_particles);
    assert!(world.get_entity(e).is_err());
}
