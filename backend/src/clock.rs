use std::time::Instant;

/// Timing snapshot taken once per frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Seconds since the clock was started. Never decreases.
    pub elapsed: f32,
    /// Seconds since the previous tick.
    pub delta: f32,
    pub frame_index: u64,
}

/// Wall-clock seconds since rendering began.
///
/// Readings are measured against the instant captured at start, not against
/// the previous frame, and are clamped so a reading never goes backwards.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last_elapsed: f32,
    frame_index: u64,
}

impl FrameClock {
    pub fn start() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        FrameClock {
            start,
            last_elapsed: 0.0,
            frame_index: 0,
        }
    }

    /// Elapsed seconds of the most recent tick (0 before the first one).
    pub fn last_elapsed(&self) -> f32 {
        self.last_elapsed
    }

    /// Number of ticks so far.
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let elapsed = now
            .saturating_duration_since(self.start)
            .as_secs_f32()
            .max(self.last_elapsed);

        let time = FrameTime {
            elapsed,
            delta: elapsed - self.last_elapsed,
            frame_index: self.frame_index,
        };

        self.last_elapsed = elapsed;
        self.frame_index += 1;
        time
    }
}
