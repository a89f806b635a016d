//! Frame composition
//!
//! Draws one frame from the current game state. Reads state only; the
//! single time-dependent element is the pulse on the craft's marks.

use glam::Vec2;

use super::surface::{Color, LinearGradient, Paint, Surface, fit_radius};
use crate::consts::*;
use crate::platform::Viewport;
use crate::settings::Settings;
use crate::sim::{GameState, Obstacle, Particle, Player};

/// Palette
pub mod colors {
    use super::Color;

    pub const BACKGROUND_TOP: Color = Color::rgba(12, 19, 38, 0.9);
    pub const BACKGROUND_BOTTOM: Color = Color::rgba(23, 7, 45, 0.95);
    pub const LANE_EVEN: Color = Color::rgb(0x1f, 0x29, 0x37);
    pub const LANE_ODD: Color = Color::rgb(0x11, 0x18, 0x27);
    pub const OBSTACLE_LEFT: Color = Color::rgba(2, 132, 199, 0.9);
    pub const OBSTACLE_RIGHT: Color = Color::rgba(147, 51, 234, 0.9);
    pub const OBSTACLE_STRIP: Color = Color::rgba(148, 163, 184, 0.25);
    pub const OBSTACLE_GLOW: Color = Color::rgb(0xbf, 0xdb, 0xfe);
    pub const PLAYER_TOP: Color = Color::rgb(0x60, 0xa5, 0xfa);
    pub const PLAYER_BOTTOM: Color = Color::rgb(0xc0, 0x84, 0xfc);
    pub const PLAYER_BORDER: Color = Color::rgba(255, 255, 255, 0.2);
    pub const PLAYER_MARK: Color = Color::rgba(255, 255, 255, 0.8);
    pub const PLAYER_GLOW: Color = Color::rgb(0xa8, 0x55, 0xf7);
}

const LANE_COUNT: usize = 8;
const LANE_ALPHA: f32 = 0.15;
const STRIP_HEIGHT: f32 = 6.0;
const STRIP_GLOW: f32 = 8.0;
const PLAYER_RADIUS: f32 = 18.0;
const PLAYER_BORDER_WIDTH: f32 = 2.0;
const MARK_SIZE: Vec2 = Vec2::new(6.0, 12.0);
const MARK_Y: f32 = 20.0;
const MARK_INSET: f32 = 12.0;

/// Shadow blur on the craft's marks at `time_ms`
pub fn pulse_glow(time_ms: f64) -> f32 {
    ((time_ms / 150.0).sin() * 4.0 + 6.0) as f32
}

/// Draw a full frame
pub fn draw_frame(
    surface: &mut dyn Surface,
    state: &GameState,
    viewport: &Viewport,
    time_ms: f64,
    settings: &Settings,
) {
    surface.clear();
    surface.save();
    let (sx, sy) = viewport.scale();
    surface.scale(sx, sy);

    draw_background(surface, settings);

    let glow = settings.quality.glow_enabled();
    for obstacle in &state.obstacles {
        draw_obstacle(surface, obstacle, glow);
    }

    if settings.particles {
        draw_particles(surface, state.particles.iter());
    }

    let mark_glow = if !glow {
        0.0
    } else if settings.effective_pulse() {
        pulse_glow(time_ms)
    } else {
        pulse_glow(0.0)
    };
    draw_player(surface, &state.player, mark_glow);

    surface.restore();
}

fn draw_background(surface: &mut dyn Surface, settings: &Settings) {
    surface.set_fill(Paint::Linear(LinearGradient {
        from: Vec2::ZERO,
        to: Vec2::new(0.0, BASE_HEIGHT),
        start: colors::BACKGROUND_TOP,
        end: colors::BACKGROUND_BOTTOM,
    }));
    surface.fill_rect(Vec2::ZERO, Vec2::new(BASE_WIDTH, BASE_HEIGHT));

    if !settings.quality.lane_guides_enabled() {
        return;
    }

    surface.save();
    surface.set_alpha(LANE_ALPHA);
    let lane = BASE_WIDTH / LANE_COUNT as f32;
    for i in 0..LANE_COUNT {
        let color = if i % 2 == 0 {
            colors::LANE_EVEN
        } else {
            colors::LANE_ODD
        };
        surface.set_fill(color.into());
        surface.fill_rect(
            Vec2::new(lane * i as f32, 0.0),
            Vec2::new(lane / 2.0, BASE_HEIGHT),
        );
    }
    surface.restore();
}

fn draw_obstacle(surface: &mut dyn Surface, obstacle: &Obstacle, glow: bool) {
    let Obstacle { pos, size, .. } = *obstacle;

    surface.set_fill(Paint::Linear(LinearGradient {
        from: pos,
        to: pos + Vec2::new(size.x, 0.0),
        start: colors::OBSTACLE_LEFT,
        end: colors::OBSTACLE_RIGHT,
    }));
    surface.fill_rect(pos, size);

    if glow {
        surface.set_shadow(colors::OBSTACLE_GLOW, STRIP_GLOW);
    }
    surface.set_fill(colors::OBSTACLE_STRIP.into());
    surface.fill_rect(pos + Vec2::new(0.0, size.y), Vec2::new(size.x, STRIP_HEIGHT));
    if glow {
        surface.set_shadow(colors::OBSTACLE_GLOW, 0.0);
    }
}

fn draw_particles<'a>(surface: &mut dyn Surface, particles: impl Iterator<Item = &'a Particle>) {
    for particle in particles {
        let alpha = particle.life.clamp(0.0, 1.0);
        surface.set_fill(Color::Hsla(particle.hue, 90.0, 70.0, alpha).into());
        surface.fill_circle(particle.pos, particle.radius);
    }
}

fn draw_player(surface: &mut dyn Surface, player: &Player, mark_glow: f32) {
    let pos = player.pos;
    let size = Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT);
    let radius = fit_radius(size, PLAYER_RADIUS);

    surface.set_fill(Paint::Linear(LinearGradient {
        from: pos,
        to: pos + Vec2::new(0.0, PLAYER_HEIGHT),
        start: colors::PLAYER_TOP,
        end: colors::PLAYER_BOTTOM,
    }));
    surface.fill_rounded_rect(pos, size, radius);

    surface.set_stroke(colors::PLAYER_BORDER, PLAYER_BORDER_WIDTH);
    surface.stroke_rounded_rect(pos, size, radius);

    surface.set_shadow(colors::PLAYER_GLOW, mark_glow);
    surface.set_fill(colors::PLAYER_MARK.into());
    surface.fill_rect(pos + Vec2::new(MARK_INSET, MARK_Y), MARK_SIZE);
    surface.fill_rect(
        pos + Vec2::new(PLAYER_WIDTH - MARK_INSET - MARK_SIZE.x, MARK_Y),
        MARK_SIZE,
    );
    surface.set_shadow(colors::PLAYER_GLOW, 0.0);
}
