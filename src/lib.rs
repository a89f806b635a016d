//! Neon Glide - A vertical arcade dodger
//!
//! Core modules:
//! - `sim`: Simulation (physics, spawning, collisions, particles, game phases)
//! - `renderer`: Procedural 2D drawing over an abstract surface
//! - `platform`: Input mapping, viewport sizing, frame clock and loop
//! - `persistence`: Key-value storage (LocalStorage on web)
//! - `tuning`: Data-driven game balance
//! - `app`: Per-frame session driving sim + renderer for a host

pub mod app;
pub mod best_score;
pub mod error;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use app::Session;
pub use best_score::BestScore;
pub use error::{Error, Result};
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

/// Playfield geometry. Everything in `sim` works in these logical units,
/// independent of the real canvas size.
pub mod consts {
    /// Logical playfield size
    pub const BASE_WIDTH: f32 = 360.0;
    pub const BASE_HEIGHT: f32 = 640.0;

    /// Player craft size
    pub const PLAYER_WIDTH: f32 = 48.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;
    /// Gap between the craft and the bottom edge
    pub const PLAYER_BOTTOM_GAP: f32 = 24.0;
    /// Fixed craft row
    pub const PLAYER_Y: f32 = BASE_HEIGHT - PLAYER_HEIGHT - PLAYER_BOTTOM_GAP;

    /// Obstacles are culled this far below the bottom edge
    pub const OBSTACLE_CULL_MARGIN: f32 = 40.0;
    /// Particles are culled this far below the bottom edge
    pub const PARTICLE_CULL_MARGIN: f32 = 20.0;

    /// Flash durations (ms)
    pub const START_FLASH_MS: f64 = 120.0;
    pub const CRASH_FLASH_MS: f64 = 160.0;
}
