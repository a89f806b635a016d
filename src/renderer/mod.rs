//! Rendering module
//!
//! Everything is drawn procedurally through the [`Surface`] trait: a 2D
//! canvas in the browser, a command recorder in tests.

pub mod recorder;
pub mod scene;
pub mod surface;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use recorder::{DrawCommand, Recorder};
pub use scene::draw_frame;
pub use surface::{Color, LinearGradient, Paint, Surface};

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
