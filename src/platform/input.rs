//! Pointer input
//!
//! Event handlers never touch the simulation. They turn pointer events
//! into [`Intent`]s, which the session drains once per frame. Starting a
//! run goes through the queue too.

use std::collections::VecDeque;

use crate::consts::BASE_WIDTH;
use crate::sim::TickInput;

/// One pointer event, as much of it as the game cares about
#[derive(Debug, Clone, PartialEq)]
pub struct PointerSample {
    pub client_x: f32,
    pub pressure: f32,
    /// "mouse", "pen" or "touch"
    pub pointer_type: String,
}

impl PointerSample {
    /// A mouse moving with no button held is hovering, not dragging
    pub fn is_hover(&self) -> bool {
        self.pressure == 0.0 && self.pointer_type == "mouse"
    }
}

/// Maps client coordinates onto the playfield
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerMapper {
    /// Surface left edge in client space
    pub left: f32,
    /// Surface width in client space
    pub width: f32,
}

impl PointerMapper {
    pub fn new(left: f32, width: f32) -> Self {
        Self { left, width }
    }

    /// Playfield X for a client X. None while the surface has no width.
    pub fn to_playfield_x(self, client_x: f32) -> Option<f32> {
        if self.width <= 0.0 || !self.width.is_finite() {
            return None;
        }
        Some((client_x - self.left) / self.width * BASE_WIDTH)
    }
}

/// Things input asks the game to do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    /// Start a run (or restart after a crash)
    Start,
    /// Steer toward this playfield X
    SetTargetX(f32),
    /// Drag ended; stop the craft
    Release,
}

/// Everything input asked for since the last frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameIntents {
    /// A run should (re)start before this frame is simulated
    pub start: bool,
    /// Steering for the frame
    pub input: TickInput,
}

/// FIFO of intents, drained once per frame
#[derive(Debug, Clone, Default)]
pub struct IntentQueue {
    pending: VecDeque<Intent>,
}

impl IntentQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, intent: Intent) {
        self.pending.push_back(intent);
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Fold everything queued into one frame: the latest target wins, any
    /// release counts, repeated starts collapse into one.
    pub fn drain(&mut self) -> FrameIntents {
        let mut frame = FrameIntents::default();
        for intent in self.pending.drain(..) {
            match intent {
                Intent::Start => frame.start = true,
                Intent::SetTargetX(x) => frame.input.target_x = Some(x),
                Intent::Release => frame.input.release = true,
            }
        }
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping() {
        let mapper = PointerMapper::new(100.0, 720.0);
        assert_eq!(mapper.to_playfield_x(100.0), Some(0.0));
        assert_eq!(mapper.to_playfield_x(460.0), Some(180.0));
        assert_eq!(mapper.to_playfield_x(820.0), Some(BASE_WIDTH));
        assert_eq!(PointerMapper::new(0.0, 0.0).to_playfield_x(10.0), None);
    }

    #[test]
    fn test_hover_detection() {
        let mut sample = PointerSample {
            client_x: 0.0,
            pressure: 0.0,
            pointer_type: "mouse".into(),
        };
        assert!(sample.is_hover());
        sample.pointer_type = "touch".into();
        assert!(!sample.is_hover());
        sample.pointer_type = "mouse".into();
        sample.pressure = 0.5;
        assert!(!sample.is_hover());
    }

    #[test]
    fn test_drain_folds_intents() {
        let mut queue = IntentQueue::new();
        queue.push(Intent::SetTargetX(10.0));
        queue.push(Intent::Release);
        queue.push(Intent::SetTargetX(42.0));

        let frame = queue.drain();
        assert!(!frame.start);
        assert_eq!(frame.input.target_x, Some(42.0));
        assert!(frame.input.release);
        assert!(queue.is_empty());
        assert_eq!(queue.drain(), FrameIntents::default());
    }

    #[test]
    fn test_drain_collapses_starts() {
        let mut queue = IntentQueue::new();
        queue.push(Intent::Start);
        queue.push(Intent::SetTargetX(90.0));
        queue.push(Intent::Start);

        let frame = queue.drain();
        assert!(frame.start);
        assert_eq!(frame.input.target_x, Some(90.0));
    }
}
