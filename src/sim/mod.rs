//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod integrate;
pub mod particles;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Rect, first_hit, player_hits_any};
pub use particles::ParticlePool;
pub use state::{GameEvent, GamePhase, GameState, Obstacle, Particle, Player};
pub use tick::{TickInput, start, tick};
