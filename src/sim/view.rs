//! Per-tick render output assembly
//!
//! The renderer is an external collaborator; the sim hands it one
//! `RenderFrame` per tick and never talks to a surface itself. Entities with
//! no animation ever set are skipped rather than treated as errors.

use glam::Vec2;

use super::animation::FrameHandle;
use super::collision::Rect;
use super::state::{Entity, GamePhase, GameState};
use crate::config::Config;
use crate::format_mm_ss;

/// One sprite draw: an opaque frame handle, where to put it, and whether to
/// mirror it horizontally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub frame: FrameHandle,
    pub pos: Vec2,
    pub mirror: bool,
}

/// HUD model: plain values the renderer turns into text.
#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    pub player_health: i32,
    /// Time left in the current wave, formatted `mm:ss`.
    pub countdown: String,
    pub stage: u32,
    /// Meter fill in `[0, 1]`.
    pub power_fraction: f32,
    /// End-game or level banner, when one should be on screen.
    pub banner: Option<String>,
}

/// Everything the renderer consumes for one tick.
#[derive(Debug, Clone)]
pub struct RenderFrame {
    pub sprites: Vec<DrawCommand>,
    pub hud: Hud,
    /// Rectangle overlays for hazards and debugging.
    pub overlays: Vec<Rect>,
}

fn draw_entity(entity: &Entity, out: &mut Vec<DrawCommand>) {
    // No animation ever set: skip the draw entirely.
    let Some(frame) = entity.anim.current_frame() else {
        return;
    };
    out.push(DrawCommand {
        frame,
        pos: entity.pos,
        mirror: entity.anim.mirror_x,
    });
}

/// Build the draw list, HUD and overlay set for the current state.
pub fn compose(state: &GameState, config: &Config) -> RenderFrame {
    let mut sprites = Vec::with_capacity(1 + state.enemies.len());
    for enemy in &state.enemies {
        draw_entity(enemy, &mut sprites);
    }
    draw_entity(&state.player, &mut sprites);

    let mut overlays = Vec::new();
    for proj in &state.projectiles {
        overlays.push(proj.rect);
    }
    for ball in &state.power_balls {
        // Bounding square of the circle
        overlays.push(Rect::new(
            ball.center.x - ball.radius,
            ball.center.y - ball.radius,
            ball.radius * 2.0,
            ball.radius * 2.0,
        ));
    }

    let banner = match state.phase {
        GamePhase::Defeated => Some("DEFEATED".to_string()),
        GamePhase::Victory => Some("VICTORY".to_string()),
        GamePhase::Playing if state.wave.banner_ms > 0.0 => {
            Some(format!("Level {}", state.wave.stage))
        }
        GamePhase::Playing => None,
    };

    let wave_elapsed = state.clock_ms - state.wave.started_at_ms;
    let hud = Hud {
        player_health: state.player.health,
        countdown: format_mm_ss(config.wave_duration_ms - wave_elapsed),
        stage: state.wave.stage,
        power_fraction: state.power_bar.fraction(),
        banner,
    };

    RenderFrame {
        sprites,
        hud,
        overlays,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::SpriteLibrary;
    use crate::sim::state::test_support::stub_library;

    #[test]
    fn test_compose_draws_player_and_enemies() {
        let config = Config::default();
        let state = GameState::new(&config, stub_library(), 3);
        let frame = compose(&state, &config);
        // 3 enemies + player
        assert_eq!(frame.sprites.len(), 4);
        assert_eq!(frame.hud.player_health, config.player_health);
        assert_eq!(frame.hud.stage, 1);
        assert_eq!(frame.hud.countdown, "01:00");
    }

    #[test]
    fn test_entities_without_animation_are_skipped() {
        let config = Config::default();
        // An empty library: nothing ever registered, nothing to draw.
        let state = GameState::new(&config, SpriteLibrary::default(), 3);
        let frame = compose(&state, &config);
        assert!(frame.sprites.is_empty());
    }

    #[test]
    fn test_level_banner_shows_while_timer_runs() {
        let config = Config::default();
        let mut state = GameState::new(&config, stub_library(), 3);
        assert_eq!(
            compose(&state, &config).hud.banner.as_deref(),
            Some("Level 1")
        );
        state.wave.banner_ms = 0.0;
        assert_eq!(compose(&state, &config).hud.banner, None);
    }

    #[test]
    fn test_terminal_banners() {
        let config = Config::default();
        let mut state = GameState::new(&config, stub_library(), 3);
        state.phase = GamePhase::Defeated;
        assert_eq!(
            compose(&state, &config).hud.banner.as_deref(),
            Some("DEFEATED")
        );
        state.phase = GamePhase::Victory;
        assert_eq!(
            compose(&state, &config).hud.banner.as_deref(),
            Some("VICTORY")
        );
    }

    #[test]
    fn test_hazard_overlays() {
        let config = Config::default();
        let mut state = GameState::new(&config, stub_library(), 3);
        state.fire_projectile(&config, state.player.pos + glam::Vec2::X);
        state.power_bar.charge(10_000.0);
        state.fire_power_ball(&config);
        let frame = compose(&state, &config);
        assert_eq!(frame.overlays.len(), 2);
    }
}
