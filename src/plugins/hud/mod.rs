//! HUD: status line, boss banner and health bar, toasts, victory panel and end screens.
//!
//! Everything here is derived from gameplay facts (`GameSession`, `BossHealth`)
//! or from the messages gameplay already writes. Nothing in this module feeds
//! back into the simulation.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::session::GameSession;
use crate::common::state::GameState;
use crate::content::bosses::BossCatalog;
use crate::content::powers::PowerCatalog;
use crate::plugins::boss::{BossActivated, BossHealth, BossVictory, EncounterAnnounced};
use crate::plugins::player::{PowerSelection, PowerSwitched};
use crate::plugins::progression::Progression;
use crate::plugins::projectiles::cooldown::{CooldownOwner, Cooldowns};

const BANNER_SECS: f32 = 2.5;
const TOAST_SECS: f32 = 1.2;

#[derive(Component)]
pub struct HudStatus;

/// Short-lived text (announcement banner, power toast).
#[derive(Component, Debug)]
pub struct Fading {
    pub timer: Timer,
}

/// Fill node of a boss health bar. The bar root is its parent.
#[derive(Component, Debug, Clone, Copy)]
pub struct BossHealthBar {
    pub boss: Entity,
}

#[derive(Component)]
pub struct VictoryPanel;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_status)
        .add_systems(
            Update,
            (
                update_status,
                show_banner,
                show_power_toast,
                spawn_health_bar,
                update_health_bars,
                show_victory_panel,
                fade_out,
            )
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(OnEnter(GameState::GameOver), spawn_game_over)
        .add_systems(OnEnter(GameState::Victory), spawn_victory_screen);
}

/// Second line of the victory panel.
pub fn reward_line(power_name: &str, newly_unlocked: bool) -> String {
    if newly_unlocked {
        format!("New power: {power_name}")
    } else {
        format!("Already mastered: {power_name}")
    }
}

pub fn status_line(session: &GameSession, power_name: &str, cooldown: f32) -> String {
    let mut line = format!(
        "Score: {}   Lives: {}   Level: {}\nPower: {power_name}",
        session.score, session.lives, session.level
    );
    if cooldown > 0.0 {
        line.push_str(&format!(" ({cooldown:.1}s)"));
    }
    line
}

fn text_bundle(text: impl Into<String>, size: f32, color: Color) -> (Text, TextFont, TextColor) {
    (
        Text::new(text),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(color),
    )
}

fn spawn_status(mut commands: Commands) {
    commands.spawn((
        Name::new("HudStatus"),
        HudStatus,
        text_bundle("", 20.0, Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(12.0),
            top: Val::Px(8.0),
            ..default()
        },
        DespawnOnExit(GameState::InGame),
    ));
}

fn update_status(
    time: Res<Time>,
    session: Res<GameSession>,
    catalog: Res<PowerCatalog>,
    progression: Res<Progression>,
    selection: Res<PowerSelection>,
    cooldowns: Res<Cooldowns>,
    mut q_text: Query<&mut Text, With<HudStatus>>,
) {
    let Ok(mut text) = q_text.single_mut() else { return };

    let available = progression.available_powers(&catalog);
    let (name, cooldown) = match available.get(selection.index) {
        Some(def) => (
            def.name,
            cooldowns.remaining(CooldownOwner::Player, def.kind, time.elapsed_secs_f64(), def.cooldown),
        ),
        None => ("-", 0.0),
    };

    let line = status_line(&session, name, cooldown);
    if text.0 != line {
        text.0 = line;
    }
}

fn spawn_fading(commands: &mut Commands, name: &'static str, text: String, top: f32, size: f32, color: Color, secs: f32) {
    commands.spawn((
        Name::new(name),
        Fading {
            timer: Timer::from_seconds(secs, TimerMode::Once),
        },
        text_bundle(text, size, color),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Percent(top),
            width: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            ..default()
        },
        TextLayout::new_with_justify(Justify::Center),
        DespawnOnExit(GameState::InGame),
    ));
}

fn show_banner(mut commands: Commands, mut reader: MessageReader<EncounterAnnounced>) {
    for ev in reader.read() {
        spawn_fading(
            &mut commands,
            "BossBanner",
            format!("{} APPROACHES!", ev.name.to_uppercase()),
            30.0,
            42.0,
            Color::srgb(1.0, 0.3, 0.2),
            BANNER_SECS,
        );
    }
}

fn show_power_toast(mut commands: Commands, mut reader: MessageReader<PowerSwitched>) {
    for ev in reader.read() {
        spawn_fading(
            &mut commands,
            "PowerToast",
            format!("Power: {}", ev.name),
            75.0,
            24.0,
            Color::WHITE,
            TOAST_SECS,
        );
    }
}

fn fade_out(mut commands: Commands, time: Res<Time>, mut q: Query<(Entity, &mut Fading, &mut TextColor)>) {
    for (e, mut fading, mut color) in &mut q {
        fading.timer.tick(time.delta());
        if fading.timer.is_finished() {
            commands.entity(e).despawn();
            continue;
        }
        color.0.set_alpha(fading.timer.fraction_remaining().min(1.0));
    }
}

/// Driven by the message alone: the boss entity may not be applied yet.
fn spawn_health_bar(
    mut commands: Commands,
    bosses: Res<BossCatalog>,
    mut reader: MessageReader<BossActivated>,
) {
    for ev in reader.read() {
        let Ok(def) = bosses.get(ev.kind) else { continue };

        commands
            .spawn((
                Name::new("BossHealthBar"),
                Node {
                    position_type: PositionType::Absolute,
                    top: Val::Px(48.0),
                    left: Val::Percent(25.0),
                    width: Val::Percent(50.0),
                    height: Val::Px(16.0),
                    ..default()
                },
                BackgroundColor(def.theme.health_bg),
                DespawnOnExit(GameState::InGame),
            ))
            .with_children(|bar| {
                bar.spawn((
                    BossHealthBar { boss: ev.boss },
                    Node {
                        width: Val::Percent(100.0),
                        height: Val::Percent(100.0),
                        ..default()
                    },
                    BackgroundColor(def.theme.health_bar),
                ));
            });
    }
}

/// Fill width follows hit points; the whole bar goes when its boss does.
fn update_health_bars(
    mut commands: Commands,
    q_boss: Query<&BossHealth>,
    mut q_bars: Query<(&BossHealthBar, &ChildOf, &mut Node)>,
) {
    for (bar, child_of, mut node) in &mut q_bars {
        match q_boss.get(bar.boss) {
            Ok(hp) => node.width = Val::Percent(hp.fraction() * 100.0),
            Err(_) => commands.entity(child_of.parent()).despawn(),
        }
    }
}

fn show_victory_panel(
    mut commands: Commands,
    catalog: Res<PowerCatalog>,
    mut reader: MessageReader<BossVictory>,
) {
    for ev in reader.read() {
        let reward = catalog.get(ev.reward).map(|d| d.name).unwrap_or(ev.reward.id());
        let body = format!(
            "{} defeated!\n{}\nPress SPACE for next level",
            ev.name,
            reward_line(reward, ev.newly_unlocked)
        );
        commands.spawn((
            Name::new("VictoryPanel"),
            VictoryPanel,
            text_bundle(body, 32.0, Color::srgb(1.0, 0.85, 0.3)),
            TextLayout::new_with_justify(Justify::Center),
            Node {
                position_type: PositionType::Absolute,
                top: Val::Percent(35.0),
                width: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                ..default()
            },
            DespawnOnExit(GameState::InGame),
        ));
    }
}

fn spawn_end_screen(commands: &mut Commands, state: GameState, title: &str, session: &GameSession) {
    commands.spawn((
        Name::new("EndScreen"),
        text_bundle(
            format!("{title}\nScore: {}\nPress SPACE to play again", session.score),
            48.0,
            Color::WHITE,
        ),
        TextLayout::new_with_justify(Justify::Center),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Percent(35.0),
            width: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            ..default()
        },
        DespawnOnExit(state),
    ));
}

fn spawn_game_over(mut commands: Commands, session: Res<GameSession>) {
    spawn_end_screen(&mut commands, GameState::GameOver, "GAME OVER", &session);
}

fn spawn_victory_screen(mut commands: Commands, session: Res<GameSession>) {
    spawn_end_screen(&mut commands, GameState::Victory, "YOU WIN!", &session);
}
