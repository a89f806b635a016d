//! Data-driven game balance
//!
//! Every gameplay constant that shapes difficulty lives here so it can be
//! overridden from JSON without recompiling. Missing fields fall back to
//! the shipped defaults.

use serde::Deserialize;

use crate::consts::{BASE_WIDTH, PLAYER_WIDTH};
use crate::error::Result;

/// Gameplay balance constants
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Velocity carried over each frame (not scaled by delta)
    pub damping_per_frame: f32,
    /// Steering gain toward the target (per second)
    pub steering_gain: f32,
    /// Horizontal clearance kept from each side wall
    pub wall_margin: f32,

    // === Spawning ===
    /// Interval before the first obstacle and after every restart (ms)
    pub spawn_interval_ms: f32,
    /// Interval never shrinks below this (ms)
    pub spawn_interval_floor_ms: f32,
    /// Interval multiplier applied after each spawn
    pub spawn_interval_decay: f32,
    /// Base obstacle speed at run start (units/s)
    pub base_speed: f32,
    /// Added to base speed after each spawn
    pub speed_increment: f32,
    /// Fraction of base speed added to each new obstacle
    pub difficulty_scale: f32,
    /// Obstacle speed floor and random jitter (units/s)
    pub obstacle_min_speed: f32,
    pub obstacle_speed_jitter: f32,
    pub obstacle_width: (f32, f32),
    pub obstacle_height: (f32, f32),

    // === Particles ===
    /// Maximum retained particles
    pub max_particles: usize,
    /// Life lost per second
    pub particle_decay: f32,
    /// Particles in a crash burst
    pub impact_burst: usize,

    // === Host ===
    /// Longest frame delta fed to the simulation (s)
    pub max_frame_delta: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            damping_per_frame: 0.85,
            steering_gain: 6.0,
            wall_margin: 12.0,

            spawn_interval_ms: 1400.0,
            spawn_interval_floor_ms: 450.0,
            spawn_interval_decay: 0.97,
            base_speed: 120.0,
            speed_increment: 6.0,
            difficulty_scale: 0.35,
            obstacle_min_speed: 90.0,
            obstacle_speed_jitter: 30.0,
            obstacle_width: (60.0, 120.0),
            obstacle_height: (12.0, 24.0),

            max_particles: 40,
            particle_decay: 0.8,
            impact_burst: 12,

            max_frame_delta: 0.1,
        }
    }
}

impl Tuning {
    /// Storage key for a developer override
    pub const STORAGE_KEY: &'static str = "neon-glide-tuning";

    /// Particle pool ceiling
    pub const MAX_PARTICLES: usize = 40;
    /// Spawn interval floor (ms)
    pub const SPAWN_INTERVAL_FLOOR_MS: f32 = 450.0;

    /// Parse a (possibly partial) tuning override. The result is not yet
    /// sanitized; see [`Tuning::sanitized`].
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Pull an override back inside the limits the game is built around.
    ///
    /// The particle cap and spawn floor may only be tightened. The impact
    /// burst and damping are fixed. Everything else is kept finite and
    /// ordered so the simulation stays well-defined.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let finite_or = |v: f32, fallback: f32| if v.is_finite() { v } else { fallback };
        let ordered = |(lo, hi): (f32, f32), fallback: (f32, f32)| {
            let (lo, hi) = (finite_or(lo, fallback.0), finite_or(hi, fallback.1));
            (lo.min(hi).max(1.0), lo.max(hi).max(1.0))
        };

        let spawn_interval_floor_ms = finite_or(self.spawn_interval_floor_ms, 0.0)
            .max(Self::SPAWN_INTERVAL_FLOOR_MS);
        let decay = self.spawn_interval_decay;
        let spawn_interval_decay = if decay > 0.0 && decay <= 1.0 {
            decay
        } else {
            defaults.spawn_interval_decay
        };
        let max_delta = self.max_frame_delta;
        let max_frame_delta = if max_delta > 0.0 && max_delta.is_finite() {
            max_delta
        } else {
            defaults.max_frame_delta
        };

        Self {
            damping_per_frame: defaults.damping_per_frame,
            steering_gain: finite_or(self.steering_gain, defaults.steering_gain),
            wall_margin: finite_or(self.wall_margin, defaults.wall_margin)
                .clamp(0.0, (BASE_WIDTH - PLAYER_WIDTH) / 2.0),
            spawn_interval_ms: finite_or(self.spawn_interval_ms, defaults.spawn_interval_ms)
                .max(spawn_interval_floor_ms),
            spawn_interval_floor_ms,
            spawn_interval_decay,
            base_speed: finite_or(self.base_speed, defaults.base_speed).max(0.0),
            speed_increment: finite_or(self.speed_increment, defaults.speed_increment).max(0.0),
            difficulty_scale: finite_or(self.difficulty_scale, defaults.difficulty_scale).max(0.0),
            obstacle_min_speed: finite_or(self.obstacle_min_speed, defaults.obstacle_min_speed)
                .max(0.0),
            obstacle_speed_jitter: finite_or(
                self.obstacle_speed_jitter,
                defaults.obstacle_speed_jitter,
            )
            .max(0.0),
            obstacle_width: ordered(self.obstacle_width, defaults.obstacle_width),
            obstacle_height: ordered(self.obstacle_height, defaults.obstacle_height),
            max_particles: self.max_particles.min(Self::MAX_PARTICLES),
            particle_decay: finite_or(self.particle_decay, defaults.particle_decay).max(0.0),
            impact_burst: defaults.impact_burst,
            max_frame_delta,
        }
    }

    /// Load the override from a store, falling back to defaults
    pub fn load(store: &dyn crate::persistence::KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Some(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    let sanitized = tuning.clone().sanitized();
                    if sanitized != tuning {
                        log::warn!("Tuning override adjusted to stay within game limits");
                    }
                    log::info!("Loaded tuning override");
                    sanitized
                }
                Err(e) => {
                    log::warn!("Ignoring tuning override: {e}");
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{KeyValueStore, MemoryStore};

    #[test]
    fn test_partial_override_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "base_speed": 200.0 }"#).unwrap();
        assert_eq!(tuning.base_speed, 200.0);
        assert_eq!(tuning.spawn_interval_floor_ms, 450.0);
        assert_eq!(tuning.max_particles, 40);
    }

    #[test]
    fn test_bad_override_falls_back() {
        let mut store = MemoryStore::new();
        store.set(Tuning::STORAGE_KEY, "{ not json").unwrap();
        assert_eq!(Tuning::load(&store), Tuning::default());
    }

    #[test]
    fn test_defaults_already_sanitized() {
        assert_eq!(Tuning::default().sanitized(), Tuning::default());
    }

    #[test]
    fn test_hostile_override_clamped() {
        let mut store = MemoryStore::new();
        store
            .set(
                Tuning::STORAGE_KEY,
                r#"{
                    "max_particles": 500,
                    "spawn_interval_floor_ms": 10.0,
                    "spawn_interval_decay": 0.5,
                    "impact_burst": 80,
                    "damping_per_frame": 1.5,
                    "wall_margin": 400.0,
                    "obstacle_width": [200.0, 20.0]
                }"#,
            )
            .unwrap();

        let tuning = Tuning::load(&store);
        assert_eq!(tuning.max_particles, 40);
        assert_eq!(tuning.spawn_interval_floor_ms, 450.0);
        assert_eq!(tuning.spawn_interval_decay, 0.5);
        assert_eq!(tuning.impact_burst, 12);
        assert_eq!(tuning.damping_per_frame, 0.85);
        assert_eq!(tuning.wall_margin, (BASE_WIDTH - PLAYER_WIDTH) / 2.0);
        assert_eq!(tuning.obstacle_width, (20.0, 200.0));
    }

    #[test]
    fn test_out_of_range_decay_reverts() {
        for decay in [0.0, -1.0, 1.5] {
            let tuning = Tuning {
                spawn_interval_decay: decay,
                ..Default::default()
            }
            .sanitized();
            assert_eq!(tuning.spawn_interval_decay, 0.97);
        }
    }

    #[test]
    fn test_tighter_limits_kept() {
        let tuning = Tuning {
            max_particles: 10,
            spawn_interval_floor_ms: 600.0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(tuning.max_particles, 10);
        assert_eq!(tuning.spawn_interval_floor_ms, 600.0);
        assert_eq!(tuning.spawn_interval_ms, 1400.0);
    }
}
