//! Game tuning and playfield configuration
//!
//! Every numeric the simulation depends on lives here and is threaded
//! explicitly into the tick — no process-wide globals. A JSON file with the
//! same shape can override any subset of fields.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Complete tuning set for one run of the simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // === Playfield ===
    /// Playfield width in world units.
    pub screen_width: f32,
    /// Playfield height in world units.
    pub screen_height: f32,
    /// Target tick rate enforced by the external clock.
    pub tick_hz: u32,

    // === Player ===
    /// Starting (and maximum) player health.
    pub player_health: i32,
    /// Distance moved per tick while a direction is held.
    pub player_step: f32,
    /// Player collision box size.
    pub player_box: Vec2,
    /// Collision box offset from the player's anchor.
    pub player_box_offset: Vec2,

    // === Enemies ===
    /// Starting enemy health.
    pub enemy_health: i32,
    /// Pursuit step per axis per tick (fixed, not distance-scaled).
    pub enemy_step: f32,
    /// Enemy collision box size.
    pub enemy_box: Vec2,
    /// Collision box offset from an enemy's anchor.
    pub enemy_box_offset: Vec2,
    /// Player health lost per overlapping enemy per tick.
    pub contact_damage: i32,

    // === Projectiles ===
    /// Projectile speed in units per tick.
    pub projectile_speed: f32,
    /// Projectile rectangle size.
    pub projectile_size: Vec2,
    /// Damage dealt to the first enemy hit.
    pub projectile_damage: i32,

    // === Power ball ===
    /// Spawn offset from the firing entity's anchor.
    pub power_ball_offset: Vec2,
    /// Initial radius.
    pub power_ball_radius: f32,
    /// Radius beyond which the ball is removed.
    pub power_ball_max_radius: f32,
    /// Radius growth per tick.
    pub power_ball_growth: f32,
    /// Damage dealt to every overlapping enemy, every tick while active.
    pub power_ball_damage: i32,

    // === Power bar ===
    /// Meter capacity; firing the special costs exactly this much.
    pub power_max: f32,
    /// Meter gain per elapsed millisecond.
    pub power_rate_per_ms: f32,

    // === Waves ===
    /// Wave duration in milliseconds before a forced transition.
    pub wave_duration_ms: f32,
    /// How long the "Level N" banner stays up (cosmetic).
    pub banner_duration_ms: f32,
    /// Enemy quota for the first wave.
    pub initial_quota: u32,
    /// Quota increase on every transition.
    pub quota_increment: u32,
    /// Surviving this many stages ends the run in victory.
    pub stages_to_win: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screen_width: 600.0,
            screen_height: 600.0,
            tick_hz: 30,

            player_health: 100,
            player_step: 5.0,
            player_box: Vec2::new(60.0, 80.0),
            player_box_offset: Vec2::new(40.0, 0.0),

            enemy_health: 100,
            enemy_step: 1.0,
            enemy_box: Vec2::new(60.0, 80.0),
            enemy_box_offset: Vec2::new(60.0, 0.0),
            contact_damage: 1,

            projectile_speed: 10.0,
            projectile_size: Vec2::new(16.0, 16.0),
            projectile_damage: 10,

            power_ball_offset: Vec2::new(30.0, 40.0),
            power_ball_radius: 10.0,
            power_ball_max_radius: 130.0,
            power_ball_growth: 10.0,
            power_ball_damage: 20,

            power_max: 100.0,
            power_rate_per_ms: 0.05,

            wave_duration_ms: 60_000.0,
            banner_duration_ms: 2_000.0,
            initial_quota: 3,
            quota_increment: 4,
            stages_to_win: 10,
        }
    }
}

impl Config {
    /// Playfield bounds as a rectangle rooted at the origin.
    pub fn playfield(&self) -> crate::sim::Rect {
        crate::sim::Rect::new(0.0, 0.0, self.screen_width, self.screen_height)
    }

    /// Load a config from a JSON file, falling back to defaults on any
    /// failure (missing file, parse error). The failure is logged, never
    /// fatal.
    pub fn load_or_default(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    config
                }
                Err(err) => {
                    log::warn!("Bad config {}: {err}; using defaults", path.display());
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!("Cannot read {}: {err}; using defaults", path.display());
                Self::default()
            }
        }
    }
}
