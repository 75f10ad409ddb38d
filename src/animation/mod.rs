mod animatable;
mod timeline;
mod timing;

pub use animatable::Animatable;
pub use timeline::Timeline;
pub use timing::TimingFunction;

/// Configuration for one timed interval of an animation
#[derive(Clone, Debug)]
pub struct Transition {
    /// Duration of the animation in milliseconds
    pub duration_ms: f32,
    /// Timing function controlling the animation curve
    pub timing: TimingFunction,
    /// Delay before animation starts in milliseconds
    pub delay_ms: f32,
}

impl Transition {
    /// Create a new transition with the given duration and timing function
    pub fn new(duration_ms: f32, timing: TimingFunction) -> Self {
        Self {
            duration_ms,
            timing,
            delay_ms: 0.0,
        }
    }

    /// Set the delay before the animation starts
    pub fn delay(mut self, delay_ms: f32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Time at which this transition reaches its target, in milliseconds
    pub fn end_ms(&self) -> f32 {
        self.delay_ms + self.duration_ms.max(0.0)
    }

    /// Eased progress in [0, 1] after `elapsed_ms` milliseconds.
    ///
    /// Returns 0 until the delay has passed and exactly 1 once the
    /// duration has completed.
    pub fn fraction(&self, elapsed_ms: f32) -> f32 {
        let local = elapsed_ms - self.delay_ms;
        if local < 0.0 || local.is_nan() {
            return 0.0;
        }
        if self.duration_ms <= 0.0 || local >= self.duration_ms {
            return 1.0;
        }
        self.timing
            .evaluate(local / self.duration_ms)
            .clamp(0.0, 1.0)
    }
}

impl Default for Transition {
    /// Default transition is the flag's row animation: 500ms, decelerating
    fn default() -> Self {
        Self::new(500.0, TimingFunction::Decelerate(2.0))
    }
}
