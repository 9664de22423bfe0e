//! Camera plugin (render-only).
//!
//! Applies the gameplay [`CameraRig`] to the main `Camera2d`:
//! - smooth toward the rig focus (frame-rate independent exponential follow),
//! - add a deterministic shake offset driven by rig trauma.
//!
//! ```text
//! OnEnter(InGame): spawn MainCamera
//! PostUpdate:      rig::track_player -> apply_rig (before transform propagation)
//! ```

pub mod rig;

use bevy::prelude::*;
use bevy_firefly::prelude::*;

use crate::common::state::GameState;

pub use rig::CameraRig;

#[derive(Component)]
pub struct MainCamera {
    pub responsiveness: f32,
    /// Smoothed focus without shake.
    base: Vec2,
    shake_phase: f32,
}

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_camera).add_systems(
        PostUpdate,
        apply_rig
            .after(rig::track_player)
            .before(TransformSystems::Propagate),
    );
}

fn spawn_camera(mut commands: Commands, rig: Res<CameraRig>) {
    commands.spawn((
        Name::new("MainCamera"),
        Camera2d,
        MainCamera {
            responsiveness: 5.0,
            base: rig.focus,
            shake_phase: 0.0,
        },
        FireflyConfig::default(),
        Transform::from_translation(rig.focus.extend(999.0)),
    ));
}

fn apply_rig(
    time: Res<Time>,
    state: Res<State<GameState>>,
    mut rig: ResMut<CameraRig>,
    mut q_cam: Query<(&mut Transform, &mut MainCamera)>,
) {
    let Ok((mut tf, mut cam)) = q_cam.single_mut() else {
        debug!("No single MainCamera");
        return;
    };

    let dt = time.delta_secs();

    // Locked framing snaps; following eases.
    if rig.lock.is_some() || *state.get() != GameState::InGame {
        cam.base = rig.focus;
    } else {
        let alpha = 1.0 - (-cam.responsiveness * dt).exp();
        cam.base = cam.base + (rig.focus - cam.base) * alpha;
    }

    // Decay trauma for a short tail.
    cam.shake_phase += dt;
    rig.trauma.decay_to_zero(1.2, dt);

    let mut offset = Vec2::ZERO;
    if rig.trauma.get() > 0.0 {
        let strength = rig.trauma.get() * rig.trauma.get();
        let amp = 24.0 * strength;

        // Deterministic pseudo-noise (no RNG needed).
        let x = (cam.shake_phase * 37.0 * std::f32::consts::TAU).sin()
            + 0.5 * (cam.shake_phase * 61.0 * std::f32::consts::TAU).sin();
        let y = (cam.shake_phase * 41.0 * std::f32::consts::TAU).cos()
            + 0.5 * (cam.shake_phase * 53.0 * std::f32::consts::TAU).cos();

        offset = Vec2::new(x, y).clamp_length_max(1.0) * amp;
    }

    tf.translation.x = cam.base.x + offset.x;
    tf.translation.y = cam.base.y + offset.y;
}
