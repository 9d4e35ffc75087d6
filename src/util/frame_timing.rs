//! Wall-clock frame pacing.

use web_time::{Duration, Instant};

/// Wall-clock pacing for the frame loop: per-frame `dt`, a smoothed FPS,
/// and optional frame limiting.
#[derive(Debug, Clone)]
pub struct FrameTiming {
    /// Target FPS (0 = unlimited)
    target_fps: u32,
    min_frame_duration: Duration,
    last_frame: Instant,
    smoothed_fps: f32,
    /// Weight of the newest sample in the moving average.
    smoothing: f32,
}

impl FrameTiming {
    /// Create a new frame timer with the given FPS target (0 = unlimited).
    #[must_use]
    pub fn new(target_fps: u32) -> Self {
        let min_frame_duration = if target_fps > 0 {
            Duration::from_secs_f64(1.0 / f64::from(target_fps))
        } else {
            Duration::ZERO
        };

        Self {
            target_fps,
            min_frame_duration,
            last_frame: Instant::now(),
            smoothed_fps: 60.0,
            smoothing: 0.05,
        }
    }

    /// Whether enough time has passed since the last frame to draw again.
    #[must_use]
    pub fn should_render(&self) -> bool {
        if self.target_fps == 0 {
            return true;
        }
        self.last_frame.elapsed() >= self.min_frame_duration
    }

    /// Time left before the next frame is due; zero when unlimited or late.
    #[must_use]
    pub fn time_until_next_frame(&self) -> Duration {
        self.min_frame_duration
            .saturating_sub(self.last_frame.elapsed())
    }

    /// Close the current frame and return the time since the previous one.
    pub fn end_frame(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;
        self.record(elapsed);
        elapsed
    }

    /// Current FPS (smoothed).
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }

    fn record(&mut self, elapsed: Duration) {
        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlimited_always_renders() {
        let timing = FrameTiming::new(0);
        assert!(timing.should_render());
        assert_eq!(timing.time_until_next_frame(), Duration::ZERO);
    }

    #[test]
    fn limited_waits_for_frame_budget() {
        let timing = FrameTiming::new(1);
        assert!(!timing.should_render());
        assert!(timing.time_until_next_frame() > Duration::ZERO);
    }

    #[test]
    fn smoothing_moves_toward_sample() {
        let mut timing = FrameTiming::new(0);
        timing.record(Duration::from_millis(10));
        // 95% of 60 plus 5% of 100
        assert!((timing.fps() - 62.0).abs() < 1e-3);

        timing.record(Duration::ZERO);
        assert!((timing.fps() - 62.0).abs() < 1e-3);
    }

    #[test]
    fn end_frame_reports_elapsed() {
        let mut timing = FrameTiming::new(0);
        std::thread::sleep(Duration::from_millis(2));
        assert!(timing.end_frame() >= Duration::from_millis(2));
    }
}
