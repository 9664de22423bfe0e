//! Camera rig: the gameplay side of the camera.
//!
//! Gameplay writes where the camera should look and how hard it should shake.
//! The render-only camera plugin applies that to the actual `Camera2d`, so the
//! locked encounter frame is a plain `Rect` even in headless runs.

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::player::Player;
use crate::plugins::world::CurrentLevel;

/// Newtype for values that are conceptually normalized to [0..1].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct UnitF32(f32);

impl UnitF32 {
    #[inline]
    pub fn new_clamped(v: f32) -> Self {
        Self(v.clamp(0.0, 1.0))
    }
    #[inline]
    pub fn get(self) -> f32 {
        self.0
    }
    #[inline]
    pub fn add_clamped(&mut self, dv: f32) {
        self.0 = (self.0 + dv).clamp(0.0, 1.0);
    }
    #[inline]
    pub fn decay_to_zero(&mut self, rate_per_sec: f32, dt: f32) {
        self.0 = (self.0 - rate_per_sec * dt).max(0.0);
    }
}

#[derive(Resource, Debug, Clone)]
pub struct CameraRig {
    pub focus: Vec2,
    /// When set, the camera ignores the player and holds this focus.
    pub lock: Option<Vec2>,
    pub trauma: UnitF32,
    pub view_size: Vec2,
}

impl CameraRig {
    pub fn new(view_size: Vec2) -> Self {
        Self {
            focus: view_size * 0.5,
            lock: None,
            trauma: UnitF32::default(),
            view_size,
        }
    }

    /// World-space rectangle currently framed.
    #[inline]
    pub fn frame(&self) -> Rect {
        Rect::from_center_size(self.lock.unwrap_or(self.focus), self.view_size)
    }

    #[inline]
    pub fn add_trauma(&mut self, amount: f32) {
        self.trauma.add_clamped(amount);
    }

    /// Lock on `focus` and jump there immediately.
    pub fn lock_on(&mut self, focus: Vec2) {
        self.lock = Some(focus);
        self.focus = focus;
    }

    /// Follow target for a player at `player_x`, clamped to the level.
    #[inline]
    pub fn follow_focus(&self, player_x: f32, level_width: f32) -> Vec2 {
        let half = self.view_size * 0.5;
        let max_x = (level_width - half.x).max(half.x);
        Vec2::new(player_x.clamp(half.x, max_x), half.y)
    }
}

impl FromWorld for CameraRig {
    fn from_world(world: &mut World) -> Self {
        let view = world
            .get_resource::<Tunables>()
            .map(|t| t.view_size)
            .unwrap_or(Vec2::new(800.0, 600.0));
        Self::new(view)
    }
}

pub fn plugin(app: &mut App) {
    app.init_resource::<CameraRig>()
        .add_systems(OnEnter(GameState::InGame), reset_rig)
        .add_systems(PostUpdate, track_player.run_if(in_state(GameState::InGame)));
}

fn reset_rig(mut rig: ResMut<CameraRig>, tunables: Res<Tunables>) {
    *rig = CameraRig::new(tunables.view_size);
}

pub fn track_player(
    mut rig: ResMut<CameraRig>,
    level: Option<Res<CurrentLevel>>,
    q_player: Query<&Transform, With<Player>>,
) {
    if let Some(lock) = rig.lock {
        rig.focus = lock;
        return;
    }
    let Ok(tf) = q_player.single() else { return };
    let width = level.map(|l| l.width).unwrap_or(rig.view_size.x);
    rig.focus = rig.follow_focus(tf.translation.x, width);
}
