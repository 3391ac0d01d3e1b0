use std::time::Instant;

/// Longest step handed to the scene after a stall (window drag, breakpoint)
const MAX_DELTA: f32 = 0.25;

/// Frame metadata - carries frame number and timing info
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    pub number: u64,
    /// Seconds since the clock started, drives every animation
    pub time: f32,
    pub delta: f32,
}

impl FrameInfo {
    pub fn new(number: u64, time: f32, delta: f32) -> Self {
        Self {
            number,
            time,
            delta,
        }
    }
}

/// Infinite iterator that yields frame information
/// Use this in a loop: `for frame in frames { ... }`
pub struct FrameIterator {
    frame_number: u64,
    start_time: Instant,
    last_frame_time: Instant,
}

impl FrameIterator {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            frame_number: 0,
            start_time: now,
            last_frame_time: now,
        }
    }

    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    fn advance(&mut self, now: Instant) -> FrameInfo {
        let delta = now
            .saturating_duration_since(self.last_frame_time)
            .as_secs_f32()
            .min(MAX_DELTA);
        let time = now.saturating_duration_since(self.start_time).as_secs_f32();

        let info = FrameInfo::new(self.frame_number, time, delta);

        self.frame_number += 1;
        self.last_frame_time = now;

        info
    }
}

impl Default for FrameIterator {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for FrameIterator {
    type Item = FrameInfo;

    fn next(&mut self) -> Option<FrameInfo> {
        Some(self.advance(Instant::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_frames_are_numbered() {
        let mut frames = FrameIterator::new();
        let a = frames.next().unwrap();
        let b = frames.next().unwrap();
        assert_eq!(a.number, 0);
        assert_eq!(b.number, 1);
        assert!(b.time >= a.time);
        assert_eq!(frames.frame_number(), 2);
    }

    #[test]
    fn test_delta_is_capped_after_stall() {
        let mut frames = FrameIterator::new();
        let later = frames.start_time + Duration::from_secs(3);
        let info = frames.advance(later);
        assert_eq!(info.delta, MAX_DELTA);
        assert!((info.time - 3.0).abs() < 1e-6);
    }
}
