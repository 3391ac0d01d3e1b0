/// Fixed rate timer - fires at specific Hz
#[derive(Debug, Clone, Copy)]
pub struct FixedHz {
    pub interval: f32,
    pub accumulator: f32,
}

impl FixedHz {
    /// Create timer that fires at given frequency
    pub fn new(hz: f32) -> Self {
        Self {
            interval: 1.0 / hz,
            accumulator: 0.0,
        }
    }

    /// Update with delta, returns true if should fire
    pub fn tick(&mut self, delta: f32) -> bool {
        self.accumulator += delta;

        if self.accumulator >= self.interval {
            self.accumulator -= self.interval;
            true
        } else {
            false
        }
    }
}

/// Frames-per-second estimate, refreshed on a fixed cadence
#[derive(Debug, Clone, Copy)]
pub struct FpsCounter {
    timer: FixedHz,
    frames: u32,
    window: f32,
    fps: f32,
}

impl FpsCounter {
    pub fn new(updates_per_second: f32) -> Self {
        Self {
            timer: FixedHz::new(updates_per_second),
            frames: 0,
            window: 0.0,
            fps: 0.0,
        }
    }

    /// Count one frame; returns true when the estimate was refreshed
    pub fn tick(&mut self, delta: f32) -> bool {
        self.frames += 1;
        self.window += delta;

        if self.timer.tick(delta) {
            self.fps = self.frames as f32 / self.window.max(f32::EPSILON);
            self.frames = 0;
            self.window = 0.0;
            true
        } else {
            false
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_hz_fires_at_rate() {
        let mut timer = FixedHz::new(60.0); // 60Hz = 0.0166s

        // Small delta - no fire
        assert!(!timer.tick(0.01));

        // Accumulate to threshold
        assert!(timer.tick(0.01)); // Total ~0.02s >= 0.0166s

        // Immediate next - no fire
        assert!(!timer.tick(0.001));
    }

    #[test]
    fn fps_counter_averages_window() {
        let mut counter = FpsCounter::new(1.0);
        assert_eq!(counter.fps(), 0.0);

        let mut refreshed = false;
        for _ in 0..40 {
            refreshed |= counter.tick(0.025);
        }
        assert!(refreshed);
        assert!((counter.fps() - 40.0).abs() < 1.0, "fps = {}", counter.fps());
    }
}
