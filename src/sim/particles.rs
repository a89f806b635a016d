//! Particle effects
//!
//! Particles live in a bounded pool. Pushing into a full pool evicts the
//! oldest particle first, so the pool always holds the most recent
//! `capacity` entries in spawn order.

use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;

use super::state::Particle;
use crate::consts::{BASE_HEIGHT, PARTICLE_CULL_MARGIN};

/// Bounded, ordered particle collection with drop-oldest eviction
#[derive(Debug, Clone)]
pub struct ParticlePool {
    items: VecDeque<Particle>,
    capacity: usize,
}

impl ParticlePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Insert a particle, evicting the oldest when full
    pub fn push(&mut self, particle: Particle) {
        if self.capacity == 0 {
            return;
        }
        while self.items.len() >= self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(particle);
    }

    /// Oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Particle> {
        self.items.iter_mut()
    }

    pub fn retain(&mut self, keep: impl FnMut(&Particle) -> bool) {
        self.items.retain(keep);
    }
}

/// Shards thrown up from the top of a freshly spawned obstacle: 2-4
/// particles in the cyan to blue-purple range, drifting upward.
pub fn burst_on_spawn(pool: &mut ParticlePool, rng: &mut impl Rng, origin: Vec2) {
    let count = rng.random_range(2..=4);
    let base_hue: f32 = rng.random_range(180.0..280.0);

    for _ in 0..count {
        pool.push(Particle {
            pos: origin,
            vel: Vec2::new(rng.random_range(-30.0..30.0), -30.0 - rng.random_range(0.0..40.0)),
            radius: rng.random_range(2.0..4.0),
            life: 1.0,
            hue: base_hue + rng.random_range(0.0..40.0),
        });
    }
}

/// Crash burst around the player: magenta/pink, flying in every direction
pub fn burst_on_impact(pool: &mut ParticlePool, rng: &mut impl Rng, center: Vec2, count: usize) {
    for _ in 0..count {
        let jitter = Vec2::new(rng.random_range(-20.0..20.0), rng.random_range(-20.0..20.0));
        pool.push(Particle {
            pos: center + jitter,
            vel: Vec2::new(rng.random_range(-100.0..100.0), rng.random_range(-100.0..100.0)),
            radius: rng.random_range(3.0..7.0),
            life: 1.0,
            hue: rng.random_range(320.0..360.0),
        });
    }
}

/// Drop dead and off-screen particles, keeping order
pub fn sweep(pool: &mut ParticlePool) {
    pool.retain(|p| p.life > 0.0 && p.pos.y < BASE_HEIGHT + PARTICLE_CULL_MARGIN);
}
