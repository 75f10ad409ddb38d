//! Timing functions (easing curves) for animations.
//!
//! A timing function maps linear elapsed progress onto eased progress.
//! Both ends are fixed: 0.0 maps to 0.0 and 1.0 maps to 1.0.
//!
//! ```
//! use underwood::animation::TimingFunction;
//!
//! let curve = TimingFunction::Decelerate(2.0);
//! assert!(curve.evaluate(0.5) > 0.5);
//! assert_eq!(curve.evaluate(1.0), 1.0);
//! ```

/// Timing function that controls the animation curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimingFunction {
    /// Linear interpolation (constant speed)
    Linear,
    /// Starts fast, ends slow
    EaseOut,
    /// `1 - (1 - t)^(2 * factor)`; a factor of 1.0 equals [`TimingFunction::EaseOut`]
    Decelerate(f32),
}

impl TimingFunction {
    /// Evaluate the timing function at time t (0.0 to 1.0)
    pub fn evaluate(&self, t: f32) -> f32 {
        match self {
            TimingFunction::Linear => t,
            TimingFunction::EaseOut => ease_out(t),
            TimingFunction::Decelerate(factor) => decelerate(t, *factor),
        }
    }
}

fn ease_out(t: f32) -> f32 {
    t * (2.0 - t)
}

fn decelerate(t: f32, factor: f32) -> f32 {
    if factor == 1.0 {
        return ease_out(t);
    }
    1.0 - (1.0 - t).powf(2.0 * factor)
}
