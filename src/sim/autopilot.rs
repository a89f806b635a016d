//! Demo mode steering
//!
//! Picks a target X that keeps the craft out of the way of whatever is
//! about to land on it. Good enough for an attract screen, not a solver.

use super::state::GameState;
use crate::consts::*;

/// How far above the craft an obstacle counts as a threat
const LOOKAHEAD: f32 = 260.0;
/// Extra clearance kept from an obstacle's edge
const CLEARANCE: f32 = 10.0;

/// Target for the craft centre, or None to keep the current target
pub fn steer(state: &GameState) -> Option<f32> {
    let player = state.player.rect();
    let top = player.min.y;
    let (min_x, max_x) = (
        state.tuning.wall_margin + PLAYER_WIDTH / 2.0,
        BASE_WIDTH - state.tuning.wall_margin - PLAYER_WIDTH / 2.0,
    );

    // Nearest obstacle above the craft whose span (plus the craft's width)
    // covers the craft centre
    let half = PLAYER_WIDTH / 2.0 + CLEARANCE;
    let center = state.player.center_x();
    let threat = state
        .obstacles
        .iter()
        .filter(|o| o.pos.y + o.size.y <= top + PLAYER_HEIGHT && top - o.pos.y < LOOKAHEAD)
        .filter(|o| center > o.pos.x - half && center < o.pos.x + o.size.x + half)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))?;

    let left = threat.pos.x - half;
    let right = threat.pos.x + threat.size.x + half;

    // Prefer the side reachable with less travel, if it fits
    let candidates = [(left, left >= min_x), (right, right <= max_x)];
    candidates
        .iter()
        .filter(|(_, fits)| *fits)
        .map(|(x, _)| *x)
        .min_by(|a, b| (a - center).abs().total_cmp(&(b - center).abs()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{GamePhase, Obstacle};
    use crate::sim::tick::{TickInput, start, tick};
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn state_with(obstacle_x: f32, obstacle_w: f32) -> GameState {
        let mut state = GameState::new(1, Tuning::default());
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            pos: Vec2::new(obstacle_x, PLAYER_Y - 100.0),
            size: Vec2::new(obstacle_w, 16.0),
            speed: 120.0,
        });
        state
    }

    #[test]
    fn test_no_threat_keeps_target() {
        // Obstacle far to the right of the centred craft
        let state = state_with(280.0, 60.0);
        assert_eq!(steer(&state), None);
    }

    #[test]
    fn test_dodges_to_nearer_side() {
        // Obstacle covers the centre, sticking out more to the right
        let state = state_with(160.0, 100.0);
        let target = steer(&state).unwrap();
        assert!(target < 160.0 - PLAYER_WIDTH / 2.0);
    }

    #[test]
    fn test_demo_survives_a_while() {
        let mut state = GameState::new(7, Tuning::default());
        start(&mut state);
        for _ in 0..600 {
            let input = TickInput {
                target_x: steer(&state),
                ..Default::default()
            };
            tick(&mut state, &input, 1.0 / 60.0);
        }
        // Nothing can reach the craft in the first four seconds
        assert!(state.frames >= 240);
        assert!(state.score > 0);
        assert!(state.phase == GamePhase::Running || state.phase == GamePhase::Ended);
    }
}
