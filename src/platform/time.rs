//! Frame timing

use std::time::{Duration, Instant};

/// Paces the main loop and reports elapsed time per frame
pub trait FrameClock {
    /// Wait out the rest of the frame at `target_fps` and return the
    /// milliseconds since the previous call
    fn tick(&mut self, target_fps: u32) -> u32;
    /// Milliseconds since the clock started
    fn now_ms(&self) -> u64;
}

/// Wall-clock pacing with `std::thread::sleep`
#[derive(Debug)]
pub struct SystemClock {
    start: Instant,
    last: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last: now,
        }
    }
}

impl FrameClock for SystemClock {
    fn tick(&mut self, target_fps: u32) -> u32 {
        let frame = Duration::from_secs_f64(1.0 / target_fps.max(1) as f64);
        let spent = self.last.elapsed();
        if spent < frame {
            std::thread::sleep(frame - spent);
        }
        let now = Instant::now();
        let dt = now.duration_since(self.last);
        self.last = now;
        dt.as_millis().min(u32::MAX as u128) as u32
    }

    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}
