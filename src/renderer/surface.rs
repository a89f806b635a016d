//! Drawing surface abstraction
//!
//! A small subset of a 2D canvas: enough for procedurally drawn
//! rectangles, rounded rectangles, circles, linear gradients and glows.
//! Coordinates are playfield units once the scene has applied its scale.

use glam::Vec2;

/// A CSS-style color
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    /// 8-bit channels, alpha 0..=1
    Rgba(u8, u8, u8, f32),
    /// Hue in degrees, saturation and lightness in percent, alpha 0..=1
    Hsla(f32, f32, f32, f32),
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgba(r, g, b, 1.0)
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Color::Rgba(r, g, b, a)
    }

    /// CSS color string
    pub fn to_css(&self) -> String {
        match *self {
            Color::Rgba(r, g, b, a) if a >= 1.0 => format!("#{r:02x}{g:02x}{b:02x}"),
            Color::Rgba(r, g, b, a) => format!("rgba({r},{g},{b},{})", clean(a)),
            Color::Hsla(h, s, l, a) => {
                format!("hsla({}, {}%, {}%, {})", clean(h), clean(s), clean(l), clean(a))
            }
        }
    }
}

/// Trim float noise for CSS output
fn clean(v: f32) -> f32 {
    (v * 1000.0).round() / 1000.0
}

/// A two-stop linear gradient between two points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearGradient {
    pub from: Vec2,
    pub to: Vec2,
    pub start: Color,
    pub end: Color,
}

/// How a shape is filled
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    Solid(Color),
    Linear(LinearGradient),
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Paint::Solid(color)
    }
}

impl From<LinearGradient> for Paint {
    fn from(gradient: LinearGradient) -> Self {
        Paint::Linear(gradient)
    }
}

/// Primitive drawing operations the scene needs
pub trait Surface {
    /// Clear the whole backing store
    fn clear(&mut self);

    /// Push / pop transform, alpha, fill, stroke and shadow state
    fn save(&mut self);
    fn restore(&mut self);

    fn scale(&mut self, sx: f32, sy: f32);

    fn set_alpha(&mut self, alpha: f32);
    fn set_fill(&mut self, paint: Paint);
    fn set_stroke(&mut self, color: Color, line_width: f32);
    /// Glow around subsequent fills; `blur == 0` turns it off
    fn set_shadow(&mut self, color: Color, blur: f32);

    fn fill_rect(&mut self, pos: Vec2, size: Vec2);
    fn fill_rounded_rect(&mut self, pos: Vec2, size: Vec2, radius: f32);
    fn stroke_rounded_rect(&mut self, pos: Vec2, size: Vec2, radius: f32);
    fn fill_circle(&mut self, center: Vec2, radius: f32);
}

/// Corner radius that fits a `size` rectangle
pub fn fit_radius(size: Vec2, radius: f32) -> f32 {
    radius.min(size.x / 2.0).min(size.y / 2.0).max(0.0)
}
