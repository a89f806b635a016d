//! Motion integration
//!
//! Advances the craft, obstacles and particles by one frame. These touch
//! nothing but the entities handed in, so they can be driven without a
//! renderer.

use super::particles::ParticlePool;
use super::state::{Obstacle, Player};
use crate::tuning::Tuning;

/// Steer the craft toward `target_x` (its desired centre) and clamp it to
/// the playfield.
///
/// Damping is applied once per frame and is not scaled by `dt`, so the
/// feel depends on frame rate. The velocity is in units per frame and is
/// added to the position as is.
pub fn integrate_player(player: &mut Player, target_x: f32, dt: f32, tuning: &Tuning) {
    let diff = target_x - player.center_x();
    player.vel_x = player.vel_x * tuning.damping_per_frame + diff * tuning.steering_gain * dt;
    player.pos.x += player.vel_x;

    let (min_x, max_x) = Player::x_bounds(tuning.wall_margin);
    player.pos.x = player.pos.x.clamp(min_x, max_x);
}

/// Move every obstacle down by its own speed
pub fn integrate_obstacles(obstacles: &mut [Obstacle], dt: f32) {
    for obstacle in obstacles {
        obstacle.pos.y += obstacle.speed * dt;
    }
}

/// Move particles and age them
pub fn integrate_particles(particles: &mut ParticlePool, dt: f32, decay: f32) {
    for particle in particles.iter_mut() {
        particle.pos += particle.vel * dt;
        particle.life -= decay * dt;
    }
}
