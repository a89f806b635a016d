//! Surface sizing
//!
//! The playfield is always 360x640 logical units. The viewport scales it
//! onto whatever the page gives us, including the device pixel ratio.

use crate::consts::{BASE_HEIGHT, BASE_WIDTH};

/// Share of the window height the canvas may take
const MAX_HEIGHT_FRACTION: f32 = 0.8;

/// Drawable size in CSS pixels plus device pixel ratio
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: BASE_WIDTH,
            height: BASE_HEIGHT,
            pixel_ratio: 1.0,
        }
    }
}

impl Viewport {
    /// Fit the playfield into a container. `container_width` is None when
    /// the anchor element could not be measured; callers keep their last
    /// viewport in that case.
    pub fn fit(container_width: Option<f32>, window_height: f32, pixel_ratio: f32) -> Option<Self> {
        let width = container_width.filter(|w| w.is_finite() && *w > 0.0)?;
        let height = (window_height * MAX_HEIGHT_FRACTION).min(width / BASE_WIDTH * BASE_HEIGHT);
        if height.is_nan() || height <= 0.0 {
            return None;
        }
        Some(Self {
            width,
            height,
            pixel_ratio: if pixel_ratio > 0.0 { pixel_ratio } else { 1.0 },
        })
    }

    /// Backing store size in device pixels
    pub fn backing_size(&self) -> (u32, u32) {
        (
            (self.width * self.pixel_ratio).round() as u32,
            (self.height * self.pixel_ratio).round() as u32,
        )
    }

    /// Scale from playfield units to device pixels
    pub fn scale(&self) -> (f32, f32) {
        (
            self.width / BASE_WIDTH * self.pixel_ratio,
            self.height / BASE_HEIGHT * self.pixel_ratio,
        )
    }
}
