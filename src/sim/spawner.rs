//! Obstacle spawning and difficulty escalation

use glam::Vec2;
use rand::Rng;

use super::particles::burst_on_spawn;
use super::state::{GamePhase, GameState, Obstacle};
use crate::consts::BASE_WIDTH;

/// Spawn an obstacle if the spawn timer has run past the interval.
///
/// Call once per frame after the timer has been advanced. Returns the new
/// obstacle's id, or None when nothing spawned.
pub fn maybe_spawn(state: &mut GameState) -> Option<u32> {
    if state.phase != GamePhase::Running || state.spawn_timer_ms <= state.spawn_interval_ms {
        return None;
    }

    let id = spawn_obstacle(state);

    let tuning = &state.tuning;
    state.spawn_timer_ms = 0.0;
    state.spawn_interval_ms =
        (state.spawn_interval_ms * tuning.spawn_interval_decay).max(tuning.spawn_interval_floor_ms);
    state.base_speed += tuning.speed_increment;

    log::debug!(
        "spawned obstacle {} (interval {:.0}ms, base speed {:.0})",
        id,
        state.spawn_interval_ms,
        state.base_speed
    );
    Some(id)
}

/// Create one obstacle just above the top edge plus its shard burst
fn spawn_obstacle(state: &mut GameState) -> u32 {
    let id = state.next_entity_id();
    let tuning = &state.tuning;
    let rng = &mut state.rng;

    let (min_w, max_w) = tuning.obstacle_width;
    let (min_h, max_h) = tuning.obstacle_height;
    let width = random_between(rng, min_w, max_w);
    let x = random_between(rng, 0.0, (BASE_WIDTH - width).max(0.0));
    let height = random_between(rng, min_h, max_h);
    let speed = tuning.obstacle_min_speed
        + state.base_speed * tuning.difficulty_scale
        + random_between(rng, 0.0, tuning.obstacle_speed_jitter);

    let obstacle = Obstacle {
        id,
        pos: Vec2::new(x, -height),
        size: Vec2::new(width, height),
        speed,
    };

    burst_on_spawn(&mut state.particles, rng, obstacle.top_center());
    state.obstacles.push(obstacle);
    id
}

/// Uniform in [lo, hi); lo when the range is empty
fn random_between(rng: &mut impl Rng, lo: f32, hi: f32) -> f32 {
    if hi > lo { rng.random_range(lo..hi) } else { lo }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    fn running(seed: u64) -> GameState {
        let mut state = GameState::new(seed, Tuning::default());
        state.phase = GamePhase::Running;
        state
    }

    #[test]
    fn test_no_spawn_before_interval() {
        let mut state = running(1);
        state.spawn_timer_ms = 1400.0;
        assert_eq!(maybe_spawn(&mut state), None);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.spawn_interval_ms, 1400.0);
    }

    #[test]
    fn test_no_spawn_unless_running() {
        for phase in [GamePhase::Idle, GamePhase::Ended] {
            let mut state = running(1);
            state.phase = phase;
            state.spawn_timer_ms = 10_000.0;
            assert_eq!(maybe_spawn(&mut state), None);
            assert!(state.obstacles.is_empty());
        }
    }

    #[test]
    fn test_spawn_shape_and_escalation() {
        let mut state = running(42);
        state.spawn_timer_ms = 1401.0;

        let id = maybe_spawn(&mut state).unwrap();
        assert_eq!(state.obstacles.len(), 1);
        let o = &state.obstacles[0];
        assert_eq!(o.id, id);
        assert!((60.0..120.0).contains(&o.size.x));
        assert!((12.0..24.0).contains(&o.size.y));
        assert!(o.pos.x >= 0.0 && o.pos.x + o.size.x <= BASE_WIDTH);
        assert_eq!(o.pos.y, -o.size.y);
        // 90 + 120 * 0.35 + [0, 30)
        assert!((132.0..162.0).contains(&o.speed));

        assert!((2..=4).contains(&state.particles.len()));
        for p in state.particles.iter() {
            assert_eq!(p.pos, o.top_center());
        }

        assert_eq!(state.spawn_timer_ms, 0.0);
        assert!((state.spawn_interval_ms - 1358.0).abs() < 1e-3);
        assert_eq!(state.base_speed, 126.0);
    }

    #[test]
    fn test_ids_unique_across_spawns() {
        let mut state = running(5);
        let mut ids = Vec::new();
        for _ in 0..20 {
            state.spawn_timer_ms = 1e6;
            ids.push(maybe_spawn(&mut state).unwrap());
        }
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    proptest! {
        #[test]
        fn prop_interval_non_increasing_with_floor(seed in any::<u64>(), spawns in 1usize..120) {
            let mut state = running(seed);
            let mut last = state.spawn_interval_ms;
            for _ in 0..spawns {
                state.spawn_timer_ms = state.spawn_interval_ms + 1.0;
                prop_assert!(maybe_spawn(&mut state).is_some());
                prop_assert!(state.spawn_interval_ms <= last);
                prop_assert!(state.spawn_interval_ms >= 450.0);
                last = state.spawn_interval_ms;
            }
        }
    }
}
