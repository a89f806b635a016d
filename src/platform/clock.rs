//! Frame timing

/// Turns host timestamps (ms) into simulation deltas (s)
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: Option<f64>,
    max_delta: f32,
}

impl FrameClock {
    pub fn new(max_delta: f32) -> Self {
        Self {
            last_ms: None,
            max_delta,
        }
    }

    /// Delta since the previous frame. The first frame after a reset is 0;
    /// timestamps going backwards also give 0.
    pub fn delta(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0).max(0.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        dt.min(self.max_delta)
    }

    /// Forget the last timestamp (new run, resumed loop)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}
