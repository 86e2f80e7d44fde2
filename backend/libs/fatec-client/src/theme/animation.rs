/// Light/dark fade driver
///
/// Linear ramp of a single value between 0.0 (light) and 1.0 (dark). Time is
/// passed in by the caller so frames and tests sample it deterministically.
use std::time::{Duration, Instant};

pub const FADE_DURATION: Duration = Duration::from_millis(400);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeAnimation {
    from: f32,
    to: f32,
    started: Option<Instant>,
    duration: Duration,
}

impl FadeAnimation {
    /// Settled at `value`
    pub fn new(value: f32) -> Self {
        Self {
            from: value,
            to: value,
            started: None,
            duration: FADE_DURATION,
        }
    }

    /// Start moving toward `target` from wherever the value is at `now`
    pub fn retarget(&mut self, target: f32, now: Instant) {
        self.from = self.value_at(now);
        self.to = target;
        self.started = Some(now);
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn value_at(&self, now: Instant) -> f32 {
        let Some(started) = self.started else {
            return self.to;
        };

        let elapsed = now.saturating_duration_since(started);
        if elapsed >= self.duration || self.duration.is_zero() {
            return self.to;
        }

        let progress = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        self.from + (self.to - self.from) * progress
    }

    pub fn is_running(&self, now: Instant) -> bool {
        match self.started {
            Some(started) => now.saturating_duration_since(started) < self.duration,
            None => false,
        }
    }
}
