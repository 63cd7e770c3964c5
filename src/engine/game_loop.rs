//! Frame timing for the variable-timestep game loop
//!
//! Every frame is stepped by the wall-clock time since the previous frame.
//! The delta is not clamped: a stalled frame (window drag, debugger pause)
//! produces one large step, and the animation timers wrap it back into range.

use std::time::{Duration, Instant};

/// FPS tracking window (average over last N frames)
const FPS_WINDOW_SIZE: usize = 60;

/// Frame clock state
pub struct FrameClock {
    /// Time of last frame
    last_frame_time: Instant,

    /// Time when the clock started
    start_time: Instant,

    /// Frame timing history for FPS calculation
    frame_times: Vec<Duration>,

    /// Current frame number
    frame_count: u64,

    /// Current FPS (updated periodically)
    current_fps: f32,
}

impl FrameClock {
    /// Create a new frame clock starting now
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Create a frame clock whose first frame is measured from `start`
    pub fn starting_at(start: Instant) -> Self {
        Self {
            last_frame_time: start,
            start_time: start,
            frame_times: Vec::with_capacity(FPS_WINDOW_SIZE),
            frame_count: 0,
            current_fps: 0.0,
        }
    }

    /// Begin a new frame, returning the delta time in seconds
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Begin a new frame at `now`, returning the delta time in seconds
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let frame_time = now.saturating_duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.frame_count += 1;

        // Store frame time for FPS calculation
        self.frame_times.push(frame_time);
        if self.frame_times.len() > FPS_WINDOW_SIZE {
            self.frame_times.remove(0);
        }

        // Update FPS counter every 10 frames
        if self.frame_count % 10 == 0 {
            self.update_fps();
        }

        frame_time.as_secs_f32()
    }

    /// Get current FPS
    pub fn fps(&self) -> f32 {
        self.current_fps
    }

    /// Get total elapsed time since start
    pub fn elapsed(&self) -> Duration {
        Instant::now().duration_since(self.start_time)
    }

    /// Get total number of frames ticked
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Update FPS calculation
    fn update_fps(&mut self) {
        if self.frame_times.is_empty() {
            self.current_fps = 0.0;
            return;
        }

        // Calculate average frame time
        let total: Duration = self.frame_times.iter().sum();
        let avg_frame_time = total / self.frame_times.len() as u32;

        // Convert to FPS
        self.current_fps = if avg_frame_time.as_secs_f32() > 0.0 {
            1.0 / avg_frame_time.as_secs_f32()
        } else {
            0.0
        };
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::thread;

    #[test]
    fn test_clock_creation() {
        let clock = FrameClock::new();
        assert_eq!(clock.frame_count(), 0);
        assert_eq!(clock.fps(), 0.0);
    }

    #[test]
    fn test_delta_time() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);

        let dt = clock.tick_at(start + Duration::from_millis(16));
        assert_abs_diff_eq!(dt, 0.016, epsilon = 1e-6);

        let dt = clock.tick_at(start + Duration::from_millis(50));
        assert_abs_diff_eq!(dt, 0.034, epsilon = 1e-6);
        assert_eq!(clock.frame_count(), 2);
    }

    #[test]
    fn test_stalled_frame_not_clamped() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);

        let dt = clock.tick_at(start + Duration::from_secs(3));
        assert_abs_diff_eq!(dt, 3.0, epsilon = 1e-6);
    }

    #[test]
    fn test_fps_average() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);

        for frame in 1..=10 {
            clock.tick_at(start + Duration::from_millis(20 * frame));
        }

        assert_abs_diff_eq!(clock.fps(), 50.0, epsilon = 0.01);
    }

    #[test]
    fn test_elapsed_time() {
        let clock = FrameClock::new();
        thread::sleep(Duration::from_millis(10));
        assert!(clock.elapsed() >= Duration::from_millis(10));
    }

    #[test]
    fn test_real_tick() {
        let mut clock = FrameClock::new();
        thread::sleep(Duration::from_millis(5));
        let dt = clock.tick();
        assert!(dt >= 0.005);
        assert_eq!(clock.frame_count(), 1);
    }
}
