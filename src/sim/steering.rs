//! Enemy pursuit steering
//!
//! Per axis, independently: strictly greater moves the enemy a fixed step
//! toward the player, strictly less moves it the other way, equal holds
//! still. The step is NOT scaled by distance — an enemy one unit away moves
//! the same amount as one across the field, which makes enemies overshoot
//! and oscillate at close range. That is intentional, preserved behavior.

use glam::Vec2;

/// Displacement to apply to an enemy at `enemy` pursuing `player` this tick.
/// Bounded to at most `step` units per axis.
pub fn pursuit_step(player: Vec2, enemy: Vec2, step: f32) -> Vec2 {
    let axis = |target: f32, current: f32| -> f32 {
        if target > current {
            step
        } else if target < current {
            -step
        } else {
            0.0
        }
    };
    Vec2::new(axis(player.x, enemy.x), axis(player.y, enemy.y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moves_toward_player_on_both_axes() {
        let delta = pursuit_step(Vec2::new(100.0, 100.0), Vec2::new(0.0, 200.0), 1.0);
        assert_eq!(delta, Vec2::new(1.0, -1.0));
    }

    #[test]
    fn test_equal_axis_holds_still() {
        let delta = pursuit_step(Vec2::new(50.0, 100.0), Vec2::new(50.0, 0.0), 1.0);
        assert_eq!(delta.x, 0.0);
        assert_eq!(delta.y, 1.0);
    }

    #[test]
    fn test_step_is_not_distance_scaled() {
        let far = pursuit_step(Vec2::new(1000.0, 0.0), Vec2::ZERO, 3.0);
        let near = pursuit_step(Vec2::new(0.5, 0.0), Vec2::ZERO, 3.0);
        assert_eq!(far.x, 3.0);
        assert_eq!(near.x, 3.0);
    }

    #[test]
    fn test_overshoot_oscillates_at_close_range() {
        // Enemy 1 unit away with step 3 hops over the player and back.
        let player = Vec2::new(10.0, 0.0);
        let mut enemy = Vec2::new(9.0, 0.0);
        enemy += pursuit_step(player, enemy, 3.0);
        assert_eq!(enemy.x, 12.0);
        enemy += pursuit_step(player, enemy, 3.0);
        assert_eq!(enemy.x, 9.0);
    }
}
