//! Game state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Rect;
use super::particles::ParticlePool;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Waiting for the first launch
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Crashed; frozen until restart
    Ended,
}

/// Things the host reacts to (persistence, overlays)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A run began
    Started,
    /// Brief full-screen flash
    Flash { duration_ms: f64 },
    /// The craft hit an obstacle
    Crashed { score: u64 },
    /// The best score was raised
    NewBest { score: u64 },
}

/// The player's craft
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Top-left corner; y never changes
    pub pos: Vec2,
    /// Horizontal velocity (units per frame)
    pub vel_x: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(BASE_WIDTH / 2.0 - PLAYER_WIDTH / 2.0, PLAYER_Y),
            vel_x: 0.0,
        }
    }
}

impl Player {
    pub fn center_x(&self) -> f32 {
        self.pos.x + PLAYER_WIDTH / 2.0
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT) / 2.0
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT))
    }

    /// Allowed range for `pos.x`
    pub fn x_bounds(margin: f32) -> (f32, f32) {
        (margin, BASE_WIDTH - PLAYER_WIDTH - margin)
    }
}

/// A falling shard
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Fall speed (units/s)
    pub speed: f32,
}

impl Obstacle {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Top-center, where spawn shards burst from
    pub fn top_center(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x / 2.0, self.pos.y)
    }
}

/// A decorative particle
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// 1 at birth, dead at <= 0
    pub life: f32,
    /// HSL hue in degrees
    pub hue: f32,
}

/// Complete run state. One of these per simulation; nothing is global.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    /// Current phase
    pub phase: GamePhase,
    pub score: u64,
    /// Best score seen by this state (seeded from persistence by the host)
    pub best_score: u64,
    /// Time since the last spawn (ms)
    pub spawn_timer_ms: f32,
    /// Current spawn interval (ms)
    pub spawn_interval_ms: f32,
    /// Obstacle base speed (units/s)
    pub base_speed: f32,
    /// Where input wants the craft centre to be
    pub target_x: f32,
    pub player: Player,
    /// Active obstacles (spawn order)
    pub obstacles: Vec<Obstacle>,
    /// Visual particles
    pub particles: ParticlePool,
    /// Frames simulated in the current run
    pub frames: u64,
    events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create an idle game state with the given seed. `tuning` is
    /// sanitized first.
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        let particles = ParticlePool::new(tuning.max_particles);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            score: 0,
            best_score: 0,
            spawn_timer_ms: 0.0,
            spawn_interval_ms: tuning.spawn_interval_ms,
            base_speed: tuning.base_speed,
            target_x: BASE_WIDTH / 2.0,
            player: Player::default(),
            obstacles: Vec::new(),
            particles,
            frames: 0,
            events: Vec::new(),
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Put every run field back to its initial value. Phase, best score,
    /// RNG and id counter are left alone.
    pub fn reset_run(&mut self) {
        self.score = 0;
        self.spawn_timer_ms = 0.0;
        self.spawn_interval_ms = self.tuning.spawn_interval_ms;
        self.base_speed = self.tuning.base_speed;
        self.target_x = BASE_WIDTH / 2.0;
        self.player = Player::default();
        self.obstacles.clear();
        self.particles.clear();
        self.frames = 0;
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle_and_centered() {
        let state = GameState::new(1, Tuning::default());
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.player.center_x(), BASE_WIDTH / 2.0);
        assert_eq!(state.player.pos.y, 556.0);
        assert_eq!(state.target_x, state.player.center_x());
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut state = GameState::new(1, Tuning::default());
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert_ne!(a, b);
        assert!(b > a);
    }

    #[test]
    fn test_drain_events_empties_queue() {
        let mut state = GameState::new(1, Tuning::default());
        state.push_event(GameEvent::Started);
        assert_eq!(state.drain_events(), vec![GameEvent::Started]);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_hostile_tuning_keeps_cap_and_floor() {
        use crate::sim::tick::{TickInput, start, tick};

        let tuning = Tuning::from_json(
            r#"{ "max_particles": 500, "spawn_interval_floor_ms": 10.0, "spawn_interval_decay": 0.5 }"#,
        )
        .unwrap();
        let mut state = GameState::new(9, tuning);
        start(&mut state);

        let mut min_interval = state.spawn_interval_ms;
        let mut max_particles = 0;
        for _ in 0..60 * 60 {
            tick(&mut state, &TickInput::default(), 1.0 / 60.0);
            min_interval = min_interval.min(state.spawn_interval_ms);
            max_particles = max_particles.max(state.particles.len());
            if state.phase != GamePhase::Running {
                break;
            }
        }
        assert!(min_interval >= 450.0);
        assert!(max_particles <= 40);
    }
}
