//! Game state and core simulation types
//!
//! `GameState` owns every live entity and is mutated only by the tick
//! orchestrator. Enemies are built by a factory that deep-constructs a fresh
//! `AnimationState` and `CollisionBox` per spawn — instances are never shared
//! between entities.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::animation::{AnimationId, AnimationState, Clip};
use super::collision::{CollisionBox, Rect};
use crate::config::Config;

/// Current phase of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay.
    Playing,
    /// Player health hit zero. Terminal display state: the sim keeps ticking
    /// animations so the end banner renders over a live scene, but input,
    /// combat, steering and spawning are all suppressed.
    Defeated,
    /// The final stage was survived. Terminal display state like `Defeated`.
    Victory,
}

impl GamePhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::Defeated | GamePhase::Victory)
    }
}

/// The player or one enemy: health, an anchor position, and exclusively
/// owned animation + collision components.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Clamped at 0 on the low end, never negative.
    pub health: i32,
    /// Anchor position; places both the sprite and (via offset) the hitbox.
    pub pos: Vec2,
    pub anim: AnimationState,
    pub hitbox: CollisionBox,
}

impl Entity {
    pub fn new(health: i32, pos: Vec2, anim: AnimationState, hitbox: CollisionBox) -> Self {
        Self {
            health,
            pos,
            anim,
            hitbox,
        }
    }

    /// Subtract `amount` from health, clamping at zero.
    pub fn apply_damage(&mut self, amount: i32) {
        self.health = (self.health - amount).max(0);
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Recompute the hitbox from the current anchor.
    pub fn sync_hitbox(&mut self) {
        let anchor = self.pos;
        self.hitbox.sync(anchor);
    }

    /// Switch animation, logging (and otherwise ignoring) unknown ids so a
    /// bad request never aborts the frame.
    pub fn set_animation(&mut self, id: AnimationId) {
        if let Err(err) = self.anim.set(id) {
            log::warn!("{err}; keeping current animation");
        }
    }
}

/// An instant projectile: fixed velocity, damages the first enemy it
/// touches, then disappears. Leaving the playfield is a normal lifecycle
/// exit, not an error.
#[derive(Debug, Clone)]
pub struct Projectile {
    pub rect: Rect,
    pub vel: Vec2,
    pub damage: i32,
}

impl Projectile {
    /// Unconditional per-tick motion.
    pub fn advance(&mut self) {
        self.rect.x += self.vel.x;
        self.rect.y += self.vel.y;
    }
}

/// The expanding area-effect hazard. Damages every overlapping enemy each
/// tick while active, including the tick it expires on.
#[derive(Debug, Clone)]
pub struct PowerBall {
    pub center: Vec2,
    pub radius: f32,
    pub max_radius: f32,
    pub growth_per_tick: f32,
    pub damage: i32,
}

impl PowerBall {
    pub fn advance(&mut self) {
        self.radius += self.growth_per_tick;
    }

    /// Removal condition: strictly past the maximum. A ball sitting exactly
    /// at `max_radius` gets one more tick.
    pub fn expired(&self) -> bool {
        self.radius > self.max_radius
    }
}

/// Time-accumulating gauge gating the power-ball attack.
#[derive(Debug, Clone)]
pub struct PowerBar {
    value: f32,
    max: f32,
    rate_per_ms: f32,
}

impl PowerBar {
    pub fn new(config: &Config) -> Self {
        Self {
            value: 0.0,
            max: config.power_max,
            rate_per_ms: config.power_rate_per_ms,
        }
    }

    /// Continuous gain, clamped to the maximum.
    pub fn charge(&mut self, dt_ms: f32) {
        self.value = (self.value + dt_ms * self.rate_per_ms).min(self.max);
    }

    /// Wave-transition refill: one full meter's worth, clamped.
    pub fn refill(&mut self) {
        self.value = (self.value + self.max).min(self.max);
    }

    /// Spend a full meter if available. Returns false (and changes nothing)
    /// when the meter is short — the caller silently drops the request.
    pub fn try_spend(&mut self) -> bool {
        if self.value >= self.max {
            self.value -= self.max;
            true
        } else {
            false
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn fraction(&self) -> f32 {
        if self.max > 0.0 { self.value / self.max } else { 0.0 }
    }
}

/// Wave progression state. Mutated only by the wave controller step.
#[derive(Debug, Clone)]
pub struct WaveState {
    /// Stage number, starting at 1.
    pub stage: u32,
    /// Enemies spawned per batch; grows every transition.
    pub quota: u32,
    /// Sim-clock timestamp when the current wave began.
    pub started_at_ms: f32,
    /// Remaining "Level N" banner time. Cosmetic only.
    pub banner_ms: f32,
}

/// Clip prototypes for each entity archetype, loaded once through the asset
/// provider. Spawning clones from these so every entity gets independent
/// animation state.
#[derive(Debug, Clone, Default)]
pub struct SpriteLibrary {
    pub player: Vec<(AnimationId, Clip)>,
    pub enemy: Vec<(AnimationId, Clip)>,
}

/// Complete simulation state. Owned exclusively by the tick orchestrator;
/// no other component mutates it.
#[derive(Debug)]
pub struct GameState {
    pub phase: GamePhase,
    /// Total elapsed simulation time in milliseconds.
    pub clock_ms: f32,
    pub player: Entity,
    pub enemies: Vec<Entity>,
    pub projectiles: Vec<Projectile>,
    pub power_balls: Vec<PowerBall>,
    pub power_bar: PowerBar,
    pub wave: WaveState,
    /// Run seed, for reproducing a session's spawn layout.
    pub seed: u64,
    library: SpriteLibrary,
    rng: Pcg32,
}

impl GameState {
    /// Create a run: player centered, first wave batch spawned.
    pub fn new(config: &Config, library: SpriteLibrary, seed: u64) -> Self {
        let player_pos = Vec2::new(config.screen_width / 2.0, config.screen_height / 2.0);
        let mut player = Entity::new(
            config.player_health,
            player_pos,
            build_animation(&library.player),
            CollisionBox::new(config.player_box, config.player_box_offset),
        );
        player.set_animation(AnimationId::Idle);
        player.sync_hitbox();

        let mut state = Self {
            phase: GamePhase::Playing,
            clock_ms: 0.0,
            player,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            power_balls: Vec::new(),
            power_bar: PowerBar::new(config),
            wave: WaveState {
                stage: 1,
                quota: config.initial_quota,
                started_at_ms: 0.0,
                banner_ms: config.banner_duration_ms,
            },
            seed,
            library,
            rng: Pcg32::seed_from_u64(seed),
        };
        state.spawn_enemy_batch(config);
        state
    }

    /// Factory for one enemy with fresh animation and collision instances.
    pub fn spawn_enemy(&mut self, config: &Config, pos: Vec2) {
        let mut enemy = Entity::new(
            config.enemy_health,
            pos,
            build_animation(&self.library.enemy),
            CollisionBox::new(config.enemy_box, config.enemy_box_offset),
        );
        enemy.set_animation(AnimationId::WalkSide);
        enemy.sync_hitbox();
        self.enemies.push(enemy);
    }

    /// Spawn the current quota of enemies at random in-bounds positions.
    pub fn spawn_enemy_batch(&mut self, config: &Config) {
        for _ in 0..self.wave.quota {
            let pos = Vec2::new(
                self.rng.random_range(0.0..config.screen_width),
                self.rng.random_range(0.0..config.screen_height),
            );
            self.spawn_enemy(config, pos);
        }
    }

    /// Spawn a projectile from the player aimed at `target`. With a
    /// degenerate target (on top of the player) the shot follows the
    /// player's facing instead.
    pub fn fire_projectile(&mut self, config: &Config, target: Vec2) {
        let origin = self.player.pos;
        let dir = (target - origin).normalize_or_zero();
        let dir = if dir == Vec2::ZERO {
            if self.player.anim.mirror_x {
                Vec2::new(-1.0, 0.0)
            } else {
                Vec2::new(1.0, 0.0)
            }
        } else {
            dir
        };
        self.projectiles.push(Projectile {
            rect: Rect::new(
                origin.x,
                origin.y,
                config.projectile_size.x,
                config.projectile_size.y,
            ),
            vel: dir * config.projectile_speed,
            damage: config.projectile_damage,
        });
    }

    /// Spend a full meter and spawn a power ball at the player's anchor plus
    /// the configured offset. With insufficient meter the request is silently
    /// ignored — no state change at all.
    pub fn fire_power_ball(&mut self, config: &Config) {
        if !self.power_bar.try_spend() {
            return;
        }
        self.power_balls.push(PowerBall {
            center: self.player.pos + config.power_ball_offset,
            radius: config.power_ball_radius,
            max_radius: config.power_ball_max_radius,
            growth_per_tick: config.power_ball_growth,
            damage: config.power_ball_damage,
        });
    }
}

/// Deep-construct an `AnimationState` from archetype clip prototypes.
fn build_animation(clips: &[(AnimationId, Clip)]) -> AnimationState {
    let mut anim = AnimationState::new();
    for (id, clip) in clips {
        anim.register(*id, clip.clone());
    }
    anim
}

/// Test fixture: stub clip prototypes shared by sim unit tests.
#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::sim::animation::FrameHandle;

    fn stub_clip(frames: u32, duration_ms: f32) -> Clip {
        Clip::new((0..frames).map(FrameHandle).collect(), duration_ms)
    }

    pub(crate) fn stub_library() -> SpriteLibrary {
        SpriteLibrary {
            player: vec![
                (AnimationId::Idle, stub_clip(3, 200.0)),
                (AnimationId::WalkSide, stub_clip(8, 200.0)),
                (AnimationId::WalkDown, stub_clip(4, 200.0)),
                (AnimationId::WalkUp, stub_clip(4, 200.0)),
                (AnimationId::Defeated, stub_clip(1, 200.0)),
            ],
            enemy: vec![(AnimationId::WalkSide, stub_clip(4, 150.0))],
        }
    }
}
