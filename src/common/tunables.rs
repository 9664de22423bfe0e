//! Tunable gameplay constants.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    pub pixels_per_meter: f32,
    pub gravity: f32,

    // Player
    pub player_speed: f32,
    pub jump_velocity: f32,
    pub starting_lives: u32,
    pub respawn_delay: f32,
    pub game_over_delay: f32,
    pub invulnerability: f32,
    /// Falling below this y kills the player (lava).
    pub death_plane_y: f32,

    // View
    pub view_size: Vec2,

    // Casting
    /// Spawn offset in front of the player, x is multiplied by facing.
    pub player_cast_offset: Vec2,
    /// Upward component added to the player's facing before normalizing.
    pub player_upward_bias: f32,
    pub boss_cast_offset: Vec2,
    /// Projectiles further than this outside the playfield are despawned.
    pub offscreen_margin: f32,

    // Scoring
    pub score_per_damage: u32,
    pub boss_defeat_bonus: u32,

    // Boss encounter
    /// Threshold = end platform x minus this.
    pub encounter_lead: f32,
    pub announce_delay: f32,
    pub entrance_duration: f32,
    pub attack_grace: f32,
    /// Radians added to a circular boss's angle every fixed tick.
    pub circle_step: f32,
    /// Inset of the locked camera frame that boss movement must stay inside.
    pub boss_frame_margin: f32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            pixels_per_meter: 20.0,
            gravity: 1800.0,

            player_speed: 280.0,
            jump_velocity: 750.0,
            starting_lives: 3,
            respawn_delay: 2.0,
            game_over_delay: 2.0,
            invulnerability: 2.0,
            death_plane_y: -50.0,

            view_size: Vec2::new(800.0, 600.0),

            player_cast_offset: Vec2::new(30.0, 10.0),
            player_upward_bias: 0.1,
            boss_cast_offset: Vec2::new(-30.0, -10.0),
            offscreen_margin: 64.0,

            score_per_damage: 100,
            boss_defeat_bonus: 1000,

            encounter_lead: 400.0,
            announce_delay: 1.5,
            entrance_duration: 2.0,
            attack_grace: 1.0,
            circle_step: 0.02,
            boss_frame_margin: 60.0,
        }
    }
}
