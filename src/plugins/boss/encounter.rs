//! Encounter state machine systems.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::layers::boss_layers;
use crate::common::session::{GameSession, LevelSession};
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::content::bosses::{BossCatalog, BossDefinition, BossKind};
use crate::content::levels::LevelCatalog;
use crate::plugins::camera::CameraRig;
use crate::plugins::effects::ImpactFx;
use crate::plugins::player::{Player, PlayerInput, PlayerLife};
use crate::plugins::progression::Progression;
use crate::plugins::projectiles::messages::BossDefeated;
use crate::plugins::world::CurrentLevel;

use super::attack::BossAttack;
use super::motion::{BossMotion, fit_to_frame};
use super::{
    Boss, BossActivated, BossHealth, BossVictory, BossVisual, EncounterAnnounced,
    LevelAdvanceRequest,
};

/// Linear slide from off-screen to the arena, driven by stored elapsed time.
#[derive(Debug, Clone, PartialEq)]
pub struct Entrance {
    pub start: Vec2,
    pub target: Vec2,
    pub elapsed: f32,
    pub duration: f32,
    pub visual: Entity,
}

impl Entrance {
    /// `elapsed / duration`, clamped to [0, 1].
    #[inline]
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.start.lerp(self.target, self.progress())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EncounterState {
    Dormant,
    Announced { timer: Timer },
    Entering { entrance: Entrance },
    Active { boss: Entity },
    Defeated,
}

#[derive(Resource, Debug, Clone)]
pub struct BossEncounter {
    pub boss: BossKind,
    /// World x the player must reach. `INFINITY` disables the encounter.
    pub threshold_x: f32,
    pub state: EncounterState,
}

impl Default for BossEncounter {
    fn default() -> Self {
        Self {
            boss: BossKind::WaterDragon,
            threshold_x: f32::INFINITY,
            state: EncounterState::Dormant,
        }
    }
}

impl BossEncounter {
    pub fn new(boss: BossKind, threshold_x: f32) -> Self {
        Self {
            boss,
            threshold_x,
            state: EncounterState::Dormant,
        }
    }

    #[inline]
    pub fn is_dormant(&self) -> bool {
        matches!(self.state, EncounterState::Dormant)
    }

    #[inline]
    pub fn active_boss(&self) -> Option<Entity> {
        match self.state {
            EncounterState::Active { boss } => Some(boss),
            _ => None,
        }
    }
}

/// Reset the encounter for the level being entered.
pub fn prepare_encounter(
    tunables: Res<Tunables>,
    levels: Res<LevelCatalog>,
    session: Res<GameSession>,
    mut encounter: ResMut<BossEncounter>,
) {
    *encounter = match levels.get(session.level) {
        Ok(level) => match level.encounter_threshold(tunables.encounter_lead) {
            Ok(x) => BossEncounter::new(level.boss, x),
            Err(e) => {
                warn!("boss encounter disabled: {e}");
                BossEncounter::new(level.boss, f32::INFINITY)
            }
        },
        Err(e) => {
            warn!("boss encounter disabled: {e}");
            BossEncounter::default()
        }
    };
}

/// Dormant -> Announced, at most once per level.
pub fn detect_encounter_threshold(
    tunables: Res<Tunables>,
    catalog: Res<BossCatalog>,
    level: Option<Res<CurrentLevel>>,
    mut encounter: ResMut<BossEncounter>,
    mut session: ResMut<LevelSession>,
    mut rig: ResMut<CameraRig>,
    q_player: Query<(&Transform, &PlayerLife), With<Player>>,
    mut announced: MessageWriter<EncounterAnnounced>,
) {
    if session.boss_triggered || !encounter.is_dormant() {
        return;
    }
    let Ok((tf, life)) = q_player.single() else { return };
    if !life.is_targetable() || tf.translation.x < encounter.threshold_x {
        return;
    }
    let Ok(def) = catalog.get(encounter.boss) else {
        debug!("threshold crossed but {:?} has no definition", encounter.boss);
        return;
    };

    session.boss_triggered = true;
    session.in_boss_area = true;

    let width = level.map(|l| l.width).unwrap_or(rig.view_size.x);
    let focus = rig.follow_focus(def.spawn.x, width);
    rig.lock_on(focus);
    rig.add_trauma(0.5);

    encounter.state = EncounterState::Announced {
        timer: Timer::from_seconds(tunables.announce_delay, TimerMode::Once),
    };
    info!("boss encounter: {}", def.name);
    announced.write(EncounterAnnounced { name: def.name });
}

/// Where the boss should come to rest inside `frame`.
fn arena_target(def: &BossDefinition, frame: Rect, margin: f32) -> Vec2 {
    let area = frame.inflate(-margin);
    if area.is_empty() {
        return frame.center();
    }
    def.spawn.clamp(area.min, area.max)
}

/// Announced -> Entering once the delay has elapsed.
pub fn advance_announcement(
    mut commands: Commands,
    time: Res<Time>,
    tunables: Res<Tunables>,
    catalog: Res<BossCatalog>,
    rig: Res<CameraRig>,
    mut encounter: ResMut<BossEncounter>,
) {
    let EncounterState::Announced { timer } = &mut encounter.state else {
        return;
    };
    timer.tick(time.delta());
    if !timer.is_finished() {
        return;
    }
    let Ok(def) = catalog.get(encounter.boss) else { return };

    let frame = rig.frame();
    let target = arena_target(def, frame, tunables.boss_frame_margin);
    let start = Vec2::new(frame.max.x + def.size + 150.0, target.y);

    let visual = commands
        .spawn((
            Name::new(format!("BossVisual({})", def.name)),
            BossVisual,
            Sprite::from_color(def.theme.body, Vec2::splat(def.size)),
            Transform::from_translation(start.extend(3.0)),
            DespawnOnExit(GameState::InGame),
        ))
        .id();

    encounter.state = EncounterState::Entering {
        entrance: Entrance {
            start,
            target,
            elapsed: 0.0,
            duration: tunables.entrance_duration,
            visual,
        },
    };
}

/// Spawn the interactive boss at `at`.
pub fn spawn_boss(
    commands: &mut Commands,
    def: &BossDefinition,
    at: Vec2,
    motion: BossMotion,
    grace: f32,
) -> Entity {
    commands
        .spawn((
            Name::new(format!("Boss({})", def.name)),
            Boss { kind: def.kind },
            BossHealth::new(def.hp),
            motion,
            BossAttack::new(def.power, grace, def.attack_cooldown),
            Sprite::from_color(def.theme.body, Vec2::splat(def.size)),
            Transform::from_translation(at.extend(3.0)),
            RigidBody::Kinematic,
            Collider::rectangle(def.size * 0.8, def.size * 0.6),
            boss_layers(),
            CollisionEventsEnabled,
            DespawnOnExit(GameState::InGame),
        ))
        .id()
}

/// Entering -> Active when the slide completes.
pub fn advance_entrance(
    mut commands: Commands,
    time: Res<Time>,
    tunables: Res<Tunables>,
    catalog: Res<BossCatalog>,
    rig: Res<CameraRig>,
    mut encounter: ResMut<BossEncounter>,
    mut q_visual: Query<&mut Transform, With<BossVisual>>,
    mut activated: MessageWriter<BossActivated>,
) {
    let kind = encounter.boss;
    let EncounterState::Entering { entrance } = &mut encounter.state else {
        return;
    };

    entrance.elapsed += time.delta_secs();
    let pos = entrance.position();
    if let Ok(mut tf) = q_visual.get_mut(entrance.visual) {
        tf.translation.x = pos.x;
        tf.translation.y = pos.y;
    }
    if entrance.progress() < 1.0 {
        return;
    }

    commands.entity(entrance.visual).try_despawn();
    let Ok(def) = catalog.get(kind) else {
        encounter.state = EncounterState::Defeated;
        return;
    };

    let motion = fit_to_frame(
        def,
        pos,
        rig.frame(),
        tunables.boss_frame_margin,
        tunables.circle_step,
    );
    let boss = spawn_boss(&mut commands, def, pos, motion, tunables.attack_grace);

    encounter.state = EncounterState::Active { boss };
    activated.write(BossActivated {
        boss,
        kind: def.kind,
        name: def.name,
        max_hp: def.hp,
    });
}

/// Active -> Defeated: remove the boss, pay out and grant the reward once.
pub fn conclude_encounter(
    mut commands: Commands,
    tunables: Res<Tunables>,
    catalog: Res<BossCatalog>,
    mut encounter: ResMut<BossEncounter>,
    mut game: ResMut<GameSession>,
    mut level: ResMut<LevelSession>,
    mut progression: ResMut<Progression>,
    mut defeats: MessageReader<BossDefeated>,
    mut impacts: MessageWriter<ImpactFx>,
    mut victories: MessageWriter<BossVictory>,
) {
    for ev in defeats.read() {
        if encounter.active_boss() != Some(ev.boss) {
            continue;
        }
        commands.entity(ev.boss).try_despawn();
        encounter.state = EncounterState::Defeated;
        game.add_score(tunables.boss_defeat_bonus);

        let Ok(def) = catalog.get(encounter.boss) else {
            warn!("defeated boss {:?} has no definition", encounter.boss);
            continue;
        };
        impacts.write(ImpactFx::explosion(ev.at, def.theme.explosion));

        if level.reward_granted {
            continue;
        }
        level.reward_granted = true;
        let newly_unlocked = progression.unlock_power(def.reward);
        progression.complete_level(game.level);
        victories.write(BossVictory {
            name: def.name,
            reward: def.reward,
            newly_unlocked,
        });
    }
}

/// Defeated -> level advance on confirm.
pub fn await_confirmation(
    input: Res<PlayerInput>,
    encounter: Res<BossEncounter>,
    mut session: ResMut<LevelSession>,
    mut advance: MessageWriter<LevelAdvanceRequest>,
) {
    if encounter.state != EncounterState::Defeated || !input.confirm || session.advance_requested {
        return;
    }
    session.advance_requested = true;
    advance.write(LevelAdvanceRequest);
}
