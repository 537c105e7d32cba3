//! Animation timer for sprite frame sequences.
//!
//! Cycles a sprite's current frame through an inclusive range of frames at a
//! fixed interval, a limited number of times. Independent of kinematics.

/// Repeat count meaning "cycle until stopped".
pub const REPEAT_FOREVER: u32 = u32::MAX;

/// Frame-cycling state for one sprite.
///
/// While animating, `interval > 0`, `repeats > 0` and the current frame lies
/// in `begin..=end`. When the repeats run out both are forced to zero and the
/// timer stays quiescent until [`AnimationTimer::start`] is called again.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationTimer {
    /// Number of frames the sprite has.
    frame_count: usize,
    /// Seconds per frame (0 = not animating).
    interval: f32,
    /// Time accumulated since the last frame change.
    time: f32,
    current: usize,
    begin: usize,
    end: usize,
    /// Remaining full cycles.
    repeats: u32,
}

impl AnimationTimer {
    /// Create an idle timer for a sprite with `frame_count` frames, showing frame 0.
    pub fn new(frame_count: usize) -> Self {
        debug_assert!(frame_count > 0);
        Self {
            frame_count,
            interval: 0.0,
            time: 0.0,
            current: 0,
            begin: 0,
            end: 0,
            repeats: 0,
        }
    }

    fn last_frame(&self) -> usize {
        self.frame_count.saturating_sub(1)
    }

    /// Cycle frames `first..=last`, `repeats` times, `interval` seconds per frame.
    ///
    /// Frame numbers are clamped to the valid range and swapped if reversed.
    /// Does nothing if `interval` is not positive. With zero `repeats` the
    /// range is set and its first frame shown, but nothing animates.
    pub fn start(&mut self, first: usize, last: usize, interval: f32, repeats: u32) {
        if !(interval > 0.0) {
            return;
        }
        let first = first.min(self.last_frame());
        let last = last.min(self.last_frame());
        let (begin, end) = if first > last { (last, first) } else { (first, last) };

        self.repeats = repeats;
        self.interval = if repeats == 0 { 0.0 } else { interval };
        self.time = 0.0;
        self.begin = begin;
        self.end = end;
        self.current = begin;
    }

    /// Cycle frames `first..=last` until stopped.
    pub fn start_looping(&mut self, first: usize, last: usize, interval: f32) {
        self.start(first, last, interval, REPEAT_FOREVER);
    }

    /// Freeze on the current frame.
    pub fn stop(&mut self) {
        self.interval = 0.0;
    }

    /// Stop animating and show frame `frame`, clamped to a valid index.
    pub fn set_frame(&mut self, frame: usize) {
        self.interval = 0.0;
        self.current = frame.min(self.last_frame());
    }

    pub fn is_animating(&self) -> bool {
        self.interval > 0.0
    }

    /// Index of the frame to show.
    pub fn current(&self) -> usize {
        self.current
    }

    /// First frame of the cycle.
    pub fn begin(&self) -> usize {
        self.begin
    }

    /// Last frame of the cycle (inclusive).
    pub fn end(&self) -> usize {
        self.end
    }

    pub fn repeats(&self) -> u32 {
        self.repeats
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    /// Time accumulated towards the next frame change.
    pub fn elapsed(&self) -> f32 {
        self.time
    }

    /// Advance by `dt` seconds. Returns true if the current frame changed.
    ///
    /// A single call may step through several frames when `dt` spans more than
    /// one interval.
    pub fn tick(&mut self, dt: f32) -> bool {
        let mut frame_changed = false;

        if self.interval > 0.0 && self.repeats > 0 {
            self.time += dt;
            // Whole intervals strictly inside the accumulated time
            let steps = ((self.time / self.interval).ceil() - 1.0).max(0.0);
            if steps > 0.0 {
                let rest = self.time - steps * self.interval;
                self.time = if rest.is_finite() { rest.clamp(0.0, self.interval) } else { 0.0 };
                self.step_frames(steps as u64);
                frame_changed = true;
            }
        }

        if self.repeats == 0 && self.interval != 0.0 {
            log::debug!("animation finished on frame {}", self.current);
            self.interval = 0.0;
        }

        frame_changed
    }

    /// Move `steps` frames forward through the cycle, using up a repeat at
    /// every wrap from `end` back to `begin`.
    fn step_frames(&mut self, steps: u64) {
        let len = (self.end - self.begin + 1) as u64;
        let pos = (self.current.saturating_sub(self.begin) as u64).saturating_add(steps);
        self.current = self.begin + (pos % len) as usize;
        let wraps = u32::try_from(pos / len).unwrap_or(u32::MAX);
        self.repeats = self.repeats.saturating_sub(wraps);
    }
}
