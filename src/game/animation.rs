// Sprite animation clips and per-object playback clocks

use super::timer::Timer;

/// Errors raised while defining animation clips
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum AnimationError {
    #[error("Invalid animation length: {0} (must be a positive number of seconds)")]
    InvalidLength(f32),

    #[error("Animation clip must have at least one frame")]
    NoFrames,
}

/// Index of an animation inside an object's animation set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationId(pub usize);

/// Definition of an animation: a horizontal strip of frames played over `length` seconds
///
/// Clips are shared read-only data; playback state lives in [`Animation`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clip {
    frame_count: usize,
    /// Fresh timer handed to every playback clock started from this clip
    timer: Timer,
}

impl Clip {
    /// Create a new clip
    pub fn new(frame_count: usize, length: f32) -> Result<Self, AnimationError> {
        if frame_count == 0 {
            return Err(AnimationError::NoFrames);
        }
        Ok(Self {
            frame_count,
            timer: Timer::new(length)?,
        })
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Total duration of one loop in seconds
    pub fn length(&self) -> f32 {
        self.timer.length()
    }

    /// Duration each frame stays on screen
    pub fn frame_duration(&self) -> f32 {
        self.length() / self.frame_count as f32
    }

    /// Start an independent playback clock for this clip
    pub fn play(&self) -> Animation {
        Animation {
            clip: *self,
            timer: self.timer,
        }
    }
}

/// Playback clock for a single clip, owned by one object
///
/// Looping is implicit: the timer wraps, so the frame index falls back to 0.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    clip: Clip,
    timer: Timer,
}

impl Animation {
    /// Frame currently on screen, in `[0, frame_count - 1]`
    pub fn current_frame(&self) -> usize {
        let progress = self.timer.time() / self.timer.length();
        let frame = (progress * self.clip.frame_count as f32) as usize;
        // The timer keeps elapsed < length, but the division can still round up to 1.0
        frame.min(self.clip.frame_count - 1)
    }

    /// Advance playback by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        self.timer.step(dt);
    }

    /// Rewind to the first frame
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn reset(&mut self) {
        self.timer.reset();
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn time(&self) -> f32 {
        self.timer.time()
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn clip(&self) -> &Clip {
        &self.clip
    }
}
