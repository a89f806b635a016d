//! Canvas 2D backend

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::surface::{Color, Paint, Surface, fit_radius};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Wrap a canvas. None if a 2D context cannot be obtained, in which
    /// case the game loop is never started.
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Resize the backing store (device pixels)
    pub fn set_backing_size(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn rounded_rect_path(&self, pos: Vec2, size: Vec2, radius: f32) {
        let r = fit_radius(size, radius) as f64;
        let (x, y) = (pos.x as f64, pos.y as f64);
        let (w, h) = (size.x as f64, size.y as f64);
        let ctx = &self.ctx;

        ctx.begin_path();
        ctx.move_to(x + r, y);
        ctx.line_to(x + w - r, y);
        ctx.quadratic_curve_to(x + w, y, x + w, y + r);
        ctx.line_to(x + w, y + h - r);
        ctx.quadratic_curve_to(x + w, y + h, x + w - r, y + h);
        ctx.line_to(x + r, y + h);
        ctx.quadratic_curve_to(x, y + h, x, y + h - r);
        ctx.line_to(x, y + r);
        ctx.quadratic_curve_to(x, y, x + r, y);
        ctx.close_path();
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self) {
        self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).ok();
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.ctx.scale(sx as f64, sy as f64).ok();
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.ctx.set_global_alpha(alpha as f64);
    }

    fn set_fill(&mut self, paint: Paint) {
        match paint {
            Paint::Solid(color) => self.ctx.set_fill_style_str(&color.to_css()),
            Paint::Linear(g) => {
                let gradient = self.ctx.create_linear_gradient(
                    g.from.x as f64,
                    g.from.y as f64,
                    g.to.x as f64,
                    g.to.y as f64,
                );
                gradient.add_color_stop(0.0, &g.start.to_css()).ok();
                gradient.add_color_stop(1.0, &g.end.to_css()).ok();
                self.ctx.set_fill_style_canvas_gradient(&gradient);
            }
        }
    }

    fn set_stroke(&mut self, color: Color, line_width: f32) {
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(line_width as f64);
    }

    fn set_shadow(&mut self, color: Color, blur: f32) {
        self.ctx.set_shadow_color(&color.to_css());
        self.ctx.set_shadow_blur(blur as f64);
    }

    fn fill_rect(&mut self, pos: Vec2, size: Vec2) {
        self.ctx
            .fill_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
    }

    fn fill_rounded_rect(&mut self, pos: Vec2, size: Vec2, radius: f32) {
        self.rounded_rect_path(pos, size, radius);
        self.ctx.fill();
    }

    fn stroke_rounded_rect(&mut self, pos: Vec2, size: Vec2, radius: f32) {
        self.rounded_rect_path(pos, size, radius);
        self.ctx.stroke();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32) {
        self.ctx.begin_path();
        self.ctx
            .arc(
                center.x as f64,
                center.y as f64,
                radius.max(0.0) as f64,
                0.0,
                std::f64::consts::TAU,
            )
            .ok();
        self.ctx.fill();
    }
}
