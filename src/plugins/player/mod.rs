//! Player plugin.
//!
//! Pipeline:
//! - PreUpdate: sample the keyboard into the [`PlayerInput`] resource
//! - Update: power selection, fire requests, life-cycle timers
//! - FixedUpdate: horizontal velocity, grounded jump, death-plane check
//! - FixedPostUpdate: death transition (after projectile collisions)
//!
//! Life cycle:
//! ```text
//! Alive --death--> Dead{respawn} --timer--> Invulnerable --timer--> Alive
//!                  \--no lives left--> Out --timer--> GameOver
//! ```
//!
//! Headless apps have no `ButtonInput<KeyCode>`; `gather_input` then leaves
//! `PlayerInput` untouched so tests can drive it directly.

use avian2d::prelude::*;
use bevy::input::InputSystems;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::layers::player_layers;
use crate::common::session::{GameSession, LevelSession};
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::content::ContentError;
use crate::content::levels::{LevelCatalog, LevelId};
use crate::content::powers::{PowerCatalog, PowerKind};
use crate::plugins::effects::ImpactFx;
use crate::plugins::progression::Progression;
use crate::plugins::projectiles::collision::resolve_projectile_collisions;
use crate::plugins::projectiles::commit::{despawn_spent_projectiles, spend_all};
use crate::plugins::projectiles::components::{Projectile, ProjectileState};
use crate::plugins::projectiles::messages::CastRequest;
use crate::plugins::projectiles::spawner::spawn_requested_projectiles;
use crate::plugins::world::Terrain;

const PLAYER_SIZE: Vec2 = Vec2::new(32.0, 48.0);
const PLAYER_COLOR: Color = Color::srgb(0.95, 0.55, 0.2);

#[derive(Component)]
pub struct Player;

/// +1 facing right, -1 facing left.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Facing(pub f32);

#[derive(Resource, Default, Debug, Clone, PartialEq)]
pub struct PlayerInput {
    pub move_x: f32,
    pub jump: bool,
    pub fire: bool,
    pub cycle: bool,
    pub confirm: bool,
}

/// Index into `Progression::available_powers`.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerSelection {
    pub index: usize,
}

impl PowerSelection {
    /// Keep the index valid for a list of `len` powers.
    #[inline]
    pub fn clamp_to(&mut self, len: usize) {
        self.index = self.index.min(len.saturating_sub(1));
    }
}

#[derive(Component, Debug, Clone, PartialEq)]
pub enum PlayerLife {
    Alive,
    Invulnerable { timer: Timer },
    Dead { timer: Timer, respawn: Vec2 },
    /// Last life lost; waiting to show the game-over screen.
    Out { timer: Timer },
}

impl PlayerLife {
    /// Boss projectiles only hurt a vulnerable player.
    #[inline]
    pub fn is_vulnerable(&self) -> bool {
        matches!(self, PlayerLife::Alive)
    }

    /// Bosses aim at a player that is on screen.
    #[inline]
    pub fn is_targetable(&self) -> bool {
        matches!(self, PlayerLife::Alive | PlayerLife::Invulnerable { .. })
    }

    #[inline]
    pub fn can_act(&self) -> bool {
        self.is_targetable()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeathCause {
    Struck(PowerKind),
    Fell,
}

/// Player-death transition request.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerDeath {
    pub cause: DeathCause,
}

#[derive(Message, Clone, Debug, PartialEq, Eq)]
pub struct PowerSwitched {
    pub name: &'static str,
}

pub fn plugin(app: &mut App) {
    app.init_resource::<PlayerInput>()
        .init_resource::<PowerSelection>()
        .add_message::<PlayerDeath>()
        .add_message::<PowerSwitched>()
        .add_systems(OnEnter(GameState::InGame), spawn)
        .add_systems(PreUpdate, gather_input.after(InputSystems))
        .add_systems(
            Update,
            (
                clamp_power_selection.run_if(resource_changed::<Progression>),
                cycle_power,
                fire_selected_power.before(spawn_requested_projectiles),
                tick_player_life,
            )
                .chain()
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            FixedUpdate,
            (apply_movement, check_death_plane).run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            FixedPostUpdate,
            handle_player_death
                .after(resolve_projectile_collisions)
                .before(despawn_spent_projectiles)
                .run_if(in_state(GameState::InGame)),
        );
}

fn spawn(mut commands: Commands, levels: Res<LevelCatalog>, session: Res<GameSession>) {
    let Ok(level) = levels.get(session.level) else {
        return;
    };

    commands.spawn((
        Name::new("Player"),
        Player,
        Facing(1.0),
        PlayerLife::Alive,
        Sprite::from_color(PLAYER_COLOR, PLAYER_SIZE),
        Transform::from_translation(level.player_spawn.extend(2.0)),
        RigidBody::Dynamic,
        Collider::rectangle(PLAYER_SIZE.x - 4.0, PLAYER_SIZE.y - 4.0),
        LockedAxes::ROTATION_LOCKED,
        GravityScale(1.0),
        Friction::ZERO,
        player_layers(),
        LinearVelocity::ZERO,
        CollidingEntities::default(),
        DespawnOnExit(GameState::InGame),
    ));
}

fn gather_input(keys: Option<Res<ButtonInput<KeyCode>>>, mut input: ResMut<PlayerInput>) {
    let Some(keys) = keys else { return };

    let mut axis = 0.0;
    if keys.any_pressed([KeyCode::KeyA, KeyCode::KeyQ, KeyCode::ArrowLeft]) {
        axis -= 1.0;
    }
    if keys.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]) {
        axis += 1.0;
    }

    *input = PlayerInput {
        move_x: axis,
        jump: keys.any_pressed([KeyCode::KeyZ, KeyCode::KeyW, KeyCode::ArrowUp]),
        fire: keys.any_pressed([KeyCode::Space, KeyCode::KeyE]),
        cycle: keys.any_just_pressed([KeyCode::KeyC, KeyCode::KeyX]),
        confirm: keys.any_just_pressed([KeyCode::Space, KeyCode::Enter]),
    };
}

fn apply_movement(
    tunables: Res<Tunables>,
    input: Res<PlayerInput>,
    q_terrain: Query<(), With<Terrain>>,
    mut q_player: Query<
        (&PlayerLife, &mut LinearVelocity, &mut Facing, &CollidingEntities),
        With<Player>,
    >,
) {
    let Ok((life, mut vel, mut facing, touching)) = q_player.single_mut() else {
        return;
    };
    if !life.can_act() {
        vel.x = 0.0;
        return;
    }

    vel.x = input.move_x * tunables.player_speed;
    if input.move_x != 0.0 {
        facing.0 = input.move_x.signum();
    }

    let grounded = vel.y <= 1.0 && touching.iter().any(|e| q_terrain.contains(*e));
    if input.jump && grounded {
        vel.y = tunables.jump_velocity;
    }
}

/// Falling into the lava kills, even while invulnerable.
fn check_death_plane(
    tunables: Res<Tunables>,
    q_player: Query<(&Transform, &PlayerLife), With<Player>>,
    mut deaths: MessageWriter<PlayerDeath>,
) {
    let Ok((tf, life)) = q_player.single() else { return };
    if life.can_act() && tf.translation.y < tunables.death_plane_y {
        deaths.write(PlayerDeath { cause: DeathCause::Fell });
    }
}

fn clamp_power_selection(
    catalog: Res<PowerCatalog>,
    progression: Res<Progression>,
    mut selection: ResMut<PowerSelection>,
) {
    let len = progression.available_powers(&catalog).len();
    selection.clamp_to(len);
}

fn cycle_power(
    input: Res<PlayerInput>,
    catalog: Res<PowerCatalog>,
    progression: Res<Progression>,
    mut selection: ResMut<PowerSelection>,
    mut switched: MessageWriter<PowerSwitched>,
) {
    if !input.cycle {
        return;
    }
    let available = progression.available_powers(&catalog);
    if available.len() <= 1 {
        return;
    }
    selection.index = (selection.index + 1) % available.len();
    switched.write(PowerSwitched {
        name: available[selection.index].name,
    });
}

fn fire_selected_power(
    input: Res<PlayerInput>,
    catalog: Res<PowerCatalog>,
    progression: Res<Progression>,
    selection: Res<PowerSelection>,
    q_player: Query<&PlayerLife, With<Player>>,
    mut casts: MessageWriter<CastRequest>,
) {
    if !input.fire {
        return;
    }
    let Ok(life) = q_player.single() else { return };
    if !life.can_act() {
        return;
    }
    let available = progression.available_powers(&catalog);
    let Some(def) = available.get(selection.index) else {
        warn!("power index {} out of range ({} available)", selection.index, available.len());
        return;
    };
    casts.write(CastRequest::player(def.kind));
}

/// Where the player comes back after dying in `level`.
pub fn respawn_point(
    levels: &LevelCatalog,
    level: LevelId,
    in_boss_area: bool,
) -> Result<Vec2, ContentError> {
    let def = levels.get(level)?;
    if in_boss_area {
        def.boss_area_respawn()
    } else {
        Ok(def.player_spawn)
    }
}

/// Take a life and decide what comes next.
pub fn begin_death(
    tunables: &Tunables,
    levels: &LevelCatalog,
    game: &mut GameSession,
    level: &LevelSession,
) -> Result<PlayerLife, ContentError> {
    if game.lose_life() == 0 {
        return Ok(PlayerLife::Out {
            timer: Timer::from_seconds(tunables.game_over_delay, TimerMode::Once),
        });
    }
    let respawn = respawn_point(levels, game.level, level.in_boss_area)?;
    Ok(PlayerLife::Dead {
        timer: Timer::from_seconds(tunables.respawn_delay, TimerMode::Once),
        respawn,
    })
}

fn handle_player_death(
    tunables: Res<Tunables>,
    levels: Res<LevelCatalog>,
    level: Res<LevelSession>,
    mut game: ResMut<GameSession>,
    mut deaths: MessageReader<PlayerDeath>,
    mut q_player: Query<
        (
            &mut PlayerLife,
            &Transform,
            &mut LinearVelocity,
            &mut GravityScale,
            &mut Visibility,
        ),
        With<Player>,
    >,
    mut q_projectiles: Query<&mut ProjectileState, With<Projectile>>,
    mut impacts: MessageWriter<ImpactFx>,
    mut next: ResMut<NextState<GameState>>,
) {
    let Ok((mut life, tf, mut vel, mut gravity, mut visibility)) = q_player.single_mut() else {
        deaths.clear();
        return;
    };

    for death in deaths.read() {
        // Only the first death of a life counts.
        if !life.can_act() {
            continue;
        }

        match begin_death(&tunables, &levels, &mut game, &level) {
            Ok(next_life) => {
                info!("player died ({:?}), {} lives left", death.cause, game.lives);
                *life = next_life;
            }
            Err(e) => {
                error!("player death transition failed: {e}");
                next.set(GameState::GameOver);
                return;
            }
        }

        vel.0 = Vec2::ZERO;
        gravity.0 = 0.0;
        *visibility = Visibility::Hidden;
        impacts.write(ImpactFx::explosion(tf.translation.truncate(), PLAYER_COLOR));
        spend_all(&mut q_projectiles);
    }
}

fn tick_player_life(
    time: Res<Time>,
    mut next: ResMut<NextState<GameState>>,
    tunables: Res<Tunables>,
    mut q_player: Query<
        (
            &mut PlayerLife,
            &mut Transform,
            &mut LinearVelocity,
            &mut GravityScale,
            &mut Visibility,
        ),
        With<Player>,
    >,
) {
    let Ok((mut life, mut tf, mut vel, mut gravity, mut visibility)) = q_player.single_mut() else {
        return;
    };

    match &mut *life {
        PlayerLife::Alive => {}
        PlayerLife::Dead { timer, respawn } => {
            timer.tick(time.delta());
            if timer.is_finished() {
                tf.translation.x = respawn.x;
                tf.translation.y = respawn.y;
                vel.0 = Vec2::ZERO;
                gravity.0 = 1.0;
                *visibility = Visibility::Inherited;
                *life = PlayerLife::Invulnerable {
                    timer: Timer::from_seconds(tunables.invulnerability, TimerMode::Once),
                };
            }
        }
        PlayerLife::Invulnerable { timer } => {
            timer.tick(time.delta());
            if timer.is_finished() {
                *visibility = Visibility::Inherited;
                *life = PlayerLife::Alive;
            } else {
                // Blink at 10 Hz.
                let on = (timer.elapsed_secs() * 10.0) as u32 % 2 == 0;
                *visibility = if on { Visibility::Inherited } else { Visibility::Hidden };
            }
        }
        PlayerLife::Out { timer } => {
            timer.tick(time.delta());
            if timer.is_finished() {
                next.set(GameState::GameOver);
            }
        }
    }
}
