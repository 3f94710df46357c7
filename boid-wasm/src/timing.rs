/// Frames averaged per timing report
pub const FRAMES_TO_AVERAGE: u32 = 10;

/// Accumulates per-frame engine time and yields an average every `window` frames.
#[derive(Debug, Clone)]
pub struct FrameTimer {
    window: u32,
    frames: u32,
    total_ms: f64,
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new(FRAMES_TO_AVERAGE)
    }
}

impl FrameTimer {
    pub fn new(window: u32) -> Self {
        Self {
            window: window.max(1),
            frames: 0,
            total_ms: 0.0,
        }
    }

    /// Adds one frame. Returns the window's average once it is full.
    pub fn record(&mut self, elapsed_ms: f64) -> Option<f64> {
        self.frames += 1;
        self.total_ms += elapsed_ms;
        if self.frames < self.window {
            return None;
        }
        let average = self.total_ms / self.frames as f64;
        self.frames = 0;
        self.total_ms = 0.0;
        Some(average)
    }
}
