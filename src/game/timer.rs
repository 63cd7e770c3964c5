// Wrapping interval timer used to drive animation clocks

use super::animation::AnimationError;

/// Tracks elapsed time inside a fixed, wrapping interval
///
/// `elapsed` always stays in `[0, length)`: stepping past the end wraps
/// around instead of clamping, so a stalled frame with a huge delta still
/// lands on a valid position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timer {
    length: f32,
    elapsed: f32,
}

impl Timer {
    /// Create a timer with the given interval length in seconds
    pub fn new(length: f32) -> Result<Self, AnimationError> {
        if !length.is_finite() || length <= 0.0 {
            return Err(AnimationError::InvalidLength(length));
        }

        Ok(Self {
            length,
            elapsed: 0.0,
        })
    }

    /// Advance the timer by `dt` seconds, wrapping at the interval length
    pub fn step(&mut self, dt: f32) {
        assert!(
            dt.is_finite() && dt >= 0.0,
            "timer stepped with invalid delta time {dt}"
        );

        // Wrap before adding so huge values never overflow to infinity
        let remaining = self.length - self.elapsed;
        if dt < remaining {
            self.elapsed += dt;
        } else {
            self.elapsed = (dt - remaining) % self.length;
        }

        if self.elapsed >= self.length {
            self.elapsed %= self.length;
        }
    }

    /// Rewind to the start of the interval
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    /// Current position within the interval
    pub fn time(&self) -> f32 {
        self.elapsed
    }

    pub fn length(&self) -> f32 {
        self.length
    }
}
