//! Recording surface
//!
//! Stores every drawing call as a [`DrawCommand`]. Used by tests and the
//! headless native build in place of a real canvas.

use glam::Vec2;

use super::surface::{Color, Paint, Surface};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Save,
    Restore,
    Scale(f32, f32),
    Alpha(f32),
    Fill(Paint),
    Stroke(Color, f32),
    Shadow(Color, f32),
    Rect { pos: Vec2, size: Vec2 },
    RoundedRect { pos: Vec2, size: Vec2, radius: f32, stroke: bool },
    Circle { center: Vec2, radius: f32 },
}

#[derive(Debug, Clone, Default)]
pub struct Recorder {
    pub commands: Vec<DrawCommand>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    /// Number of filled circles (particles) drawn
    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }

    /// Deepest save nesting reached, or None if save/restore are unbalanced
    pub fn save_depth(&self) -> Option<usize> {
        let mut depth = 0usize;
        let mut deepest = 0;
        for command in &self.commands {
            match command {
                DrawCommand::Save => {
                    depth += 1;
                    deepest = deepest.max(depth);
                }
                DrawCommand::Restore => depth = depth.checked_sub(1)?,
                _ => {}
            }
        }
        (depth == 0).then_some(deepest)
    }
}

impl Surface for Recorder {
    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.commands.push(DrawCommand::Scale(sx, sy));
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.commands.push(DrawCommand::Alpha(alpha));
    }

    fn set_fill(&mut self, paint: Paint) {
        self.commands.push(DrawCommand::Fill(paint));
    }

    fn set_stroke(&mut self, color: Color, line_width: f32) {
        self.commands.push(DrawCommand::Stroke(color, line_width));
    }

    fn set_shadow(&mut self, color: Color, blur: f32) {
        self.commands.push(DrawCommand::Shadow(color, blur));
    }

    fn fill_rect(&mut self, pos: Vec2, size: Vec2) {
        self.commands.push(DrawCommand::Rect { pos, size });
    }

    fn fill_rounded_rect(&mut self, pos: Vec2, size: Vec2, radius: f32) {
        self.commands.push(DrawCommand::RoundedRect {
            pos,
            size,
            radius,
            stroke: false,
        });
    }

    fn stroke_rounded_rect(&mut self, pos: Vec2, size: Vec2, radius: f32) {
        self.commands.push(DrawCommand::RoundedRect {
            pos,
            size,
            radius,
            stroke: true,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32) {
        self.commands.push(DrawCommand::Circle { center, radius });
    }
}
