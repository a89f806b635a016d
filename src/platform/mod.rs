//! Platform abstraction layer
//!
//! Host-facing pieces that sit between browser events and the simulation:
//! - Input mapping and the intent queue
//! - Viewport sizing
//! - Frame timing and the cancellable frame loop

pub mod clock;
pub mod frame_loop;
pub mod input;
pub mod viewport;

pub use clock::FrameClock;
pub use frame_loop::{FrameLoop, FrameScheduler};
pub use input::{FrameIntents, Intent, IntentQueue, PointerMapper, PointerSample};
pub use viewport::Viewport;
