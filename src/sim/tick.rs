//! Fixed-order simulation tick
//!
//! One call advances the whole simulation by one frame. The nine-step order
//! inside `tick` is a design contract: input, box sync, steering, hazard
//! motion, combat, meter, wave control, animation, terminal checks.
//! Reordering changes observable outcomes (e.g. advancing animations before
//! the death sweep would render a dead enemy's last frame one tick longer).

use glam::Vec2;

use super::animation::AnimationId;
use super::collision::circle_overlaps_rect;
use super::state::{GamePhase, GameState};
use super::steering::pursuit_step;
use crate::config::Config;

/// Input signals for a single tick, polled once at tick start.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Primary attack, with the aim target point.
    pub primary_fire: Option<Vec2>,
    /// Special (power ball) attack request.
    pub special_fire: bool,
}

/// Advance the game state by one frame of `dt_ms` elapsed real time.
///
/// Never blocks, never fails: per-entity problems degrade locally (logged
/// or skipped) instead of aborting the frame. In the terminal phases only
/// animations keep advancing, so the end banner renders over a live scene.
pub fn tick(state: &mut GameState, config: &Config, input: &TickInput, dt_ms: f32) {
    state.clock_ms += dt_ms;

    // (1) Player input. Suppressed entirely once the player is defeated.
    if state.phase == GamePhase::Playing {
        apply_player_input(state, config, input);
    }

    // (2) Collision boxes follow current anchors.
    state.player.sync_hitbox();
    for enemy in &mut state.enemies {
        enemy.sync_hitbox();
    }

    if state.phase == GamePhase::Playing {
        // (3) AI pursuit.
        steer_enemies(state, config);

        // (4) Hazard motion.
        for proj in &mut state.projectiles {
            proj.advance();
        }
        for ball in &mut state.power_balls {
            ball.advance();
        }

        // (5) Combat resolution and lifecycle sweeps.
        resolve_combat(state, config);

        // (6) Meter gain.
        state.power_bar.charge(dt_ms);

        // (7) Wave progression.
        run_wave_controller(state, config, dt_ms);
    }

    // (8) Animations advance for everything still alive.
    state.player.anim.advance(dt_ms);
    for enemy in &mut state.enemies {
        enemy.anim.advance(dt_ms);
    }

    // (9) Terminal conditions.
    if state.phase == GamePhase::Playing && state.player.is_dead() {
        state.player.set_animation(AnimationId::Defeated);
        state.phase = GamePhase::Defeated;
        log::info!("player defeated on stage {}", state.wave.stage);
    }
}

/// Movement uses a mutually exclusive priority order: right > left > down >
/// up. Horizontal movement reuses one side-facing clip, mirrored for left.
fn apply_player_input(state: &mut GameState, config: &Config, input: &TickInput) {
    let player = &mut state.player;
    if input.right {
        player.pos.x += config.player_step;
        player.set_animation(AnimationId::WalkSide);
        player.anim.mirror_x = false;
    } else if input.left {
        player.pos.x -= config.player_step;
        player.set_animation(AnimationId::WalkSide);
        player.anim.mirror_x = true;
    } else if input.down {
        player.pos.y += config.player_step;
        player.set_animation(AnimationId::WalkDown);
    } else if input.up {
        player.pos.y -= config.player_step;
        player.set_animation(AnimationId::WalkUp);
    } else {
        player.set_animation(AnimationId::Idle);
    }

    if let Some(target) = input.primary_fire {
        state.fire_projectile(config, target);
    }
    if input.special_fire {
        // Insufficient meter: silently ignored inside fire_power_ball.
        state.fire_power_ball(config);
    }
}

fn steer_enemies(state: &mut GameState, config: &Config) {
    let target = state.player.pos;
    for enemy in &mut state.enemies {
        let delta = pursuit_step(target, enemy.pos, config.enemy_step);
        enemy.pos += delta;
        // Moved this tick, so the box must follow before any overlap test.
        enemy.sync_hitbox();
        enemy.set_animation(AnimationId::WalkSide);
        if delta.x != 0.0 {
            enemy.anim.mirror_x = delta.x < 0.0;
        }
    }
}

/// Combat resolution, in a fixed order:
/// (a) player-vs-enemy contact, (b) projectile first-hit, (c) power-ball
/// area damage, (d) death sweep. An enemy dying this tick still damages the
/// player in (a). Removal is mark-then-retain after each scan completes —
/// collections are never mutated while being iterated.
fn resolve_combat(state: &mut GameState, config: &Config) {
    let playfield = config.playfield();

    // (a) Contact damage, only while the player still has health.
    for enemy in state.enemies.iter() {
        if state.player.health > 0 && enemy.hitbox.overlaps(&state.player.hitbox) {
            state.player.apply_damage(config.contact_damage);
        }
    }

    // (b) Each projectile hits at most one enemy, scanning in registration
    // order; the first overlap consumes the projectile.
    let mut consumed = vec![false; state.projectiles.len()];
    for (i, proj) in state.projectiles.iter().enumerate() {
        for enemy in state.enemies.iter_mut() {
            if proj.rect.overlaps(&enemy.hitbox.rect) {
                enemy.apply_damage(proj.damage);
                consumed[i] = true;
                break;
            }
        }
    }
    let mut idx = 0;
    state.projectiles.retain(|proj| {
        let keep = !consumed[idx] && proj.rect.overlaps(&playfield);
        idx += 1;
        keep
    });

    // (c) Power balls damage every overlapping enemy, again each tick while
    // active. Expired balls leave only after dealing this tick's damage.
    for ball in state.power_balls.iter() {
        for enemy in state.enemies.iter_mut() {
            if circle_overlaps_rect(ball.center, ball.radius, &enemy.hitbox.rect) {
                enemy.apply_damage(ball.damage);
            }
        }
    }
    state.power_balls.retain(|ball| !ball.expired());

    // (d) Death sweep.
    state.enemies.retain(|enemy| !enemy.is_dead());
}

/// Wave state machine: `InWave(stage, deadline)` advances when the wave
/// times out or the roster empties. Transition: stage += 1, quota += 4,
/// bulk-remove stragglers, spawn a fresh batch, reset the deadline, refill
/// the meter, raise the level banner. Surviving the configured final stage
/// ends the run in victory instead.
fn run_wave_controller(state: &mut GameState, config: &Config, dt_ms: f32) {
    state.wave.banner_ms = (state.wave.banner_ms - dt_ms).max(0.0);

    let elapsed = state.clock_ms - state.wave.started_at_ms;
    let timed_out = elapsed > config.wave_duration_ms;
    let cleared = state.enemies.is_empty();
    if !(timed_out || cleared) {
        return;
    }

    if state.wave.stage >= config.stages_to_win {
        state.phase = GamePhase::Victory;
        log::info!("stage {} survived, run won", state.wave.stage);
        return;
    }

    let reason = if cleared { "cleared" } else { "timeout" };
    state.wave.stage += 1;
    state.wave.quota += config.quota_increment;
    state.enemies.clear();
    state.spawn_enemy_batch(config);
    state.wave.started_at_ms = state.clock_ms;
    state.power_bar.refill();
    state.wave.banner_ms = config.banner_duration_ms;
    log::info!(
        "wave {} ({reason}): spawned {} enemies",
        state.wave.stage,
        state.enemies.len()
    );
}
